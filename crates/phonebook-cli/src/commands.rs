use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use phonebook_server::{PhonebookServer, ServerConfig, StoreBackend};
use phonebook_service::{apply_upsert, DeleteOutcome, DirectoryService, UpsertOutcome};
use phonebook_store::{EntryStore, JournalConfig, JournalEntryStore};
use phonebook_types::Entry;
use tracing::debug;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let journal = cli.journal_path();
    let format = cli.format.clone();
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.journal.as_deref()).await,
        Command::List(_) => cmd_list(&open_directory(&journal)?, &format).await,
        Command::Add(args) => cmd_add(&open_directory(&journal)?, args, &format).await,
        Command::Update(args) => cmd_update(&open_directory(&journal)?, args, &format).await,
        Command::Remove(args) => cmd_remove(&open_directory(&journal)?, args).await,
        Command::Info(_) => cmd_info(&open_directory(&journal)?, &format).await,
    }
}

fn open_directory(journal: &Path) -> anyhow::Result<DirectoryService> {
    let store = JournalEntryStore::open(journal, JournalConfig::default())
        .with_context(|| format!("opening journal {}", journal.display()))?;
    debug!(path = %journal.display(), offset = store.offset()?, "journal opened");
    let store: Arc<dyn EntryStore> = Arc::new(store);
    Ok(DirectoryService::new(store))
}

fn serve_config(args: &ServeArgs, journal: Option<&Path>) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if args.persistent {
        config.backend = StoreBackend::Journal;
    }
    if let Some(journal) = journal {
        config.journal_path = journal.to_path_buf();
    }
    if args.seed {
        config.seed_sample_entries = true;
    }
    Ok(config)
}

async fn cmd_serve(args: ServeArgs, journal: Option<&Path>) -> anyhow::Result<()> {
    let config = serve_config(&args, journal)?;
    println!("Phonebook server on {} ({:?} store)", config.bind_addr.to_string().bold(), config.backend);
    PhonebookServer::new(config).serve().await?;
    Ok(())
}

fn print_entry(entry: &Entry) {
    println!("{:>5}  {}  {}", entry.id.to_string().yellow(), entry.name.bold(), entry.number);
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_list(directory: &DirectoryService, format: &OutputFormat) -> anyhow::Result<()> {
    let entries = directory.list_entries().await?;
    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No entries.");
            }
            entries.iter().for_each(print_entry);
            Ok(())
        }
    }
}

async fn cmd_add(directory: &DirectoryService, args: AddArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let replace = args.replace;
    let outcome = apply_upsert(directory, &args.name, &args.number, |_, _| replace).await?;
    if let OutputFormat::Json = format {
        let entry = match &outcome {
            UpsertOutcome::Added(e)
            | UpsertOutcome::Updated(e)
            | UpsertOutcome::Unchanged(e)
            | UpsertOutcome::Declined(e) => e,
        };
        return print_json(entry);
    }
    match outcome {
        UpsertOutcome::Added(e) => println!("{} Added {}", "✓".green().bold(), e.name.bold()),
        UpsertOutcome::Updated(e) => println!("{} Updated number for {}", "✓".green().bold(), e.name.bold()),
        UpsertOutcome::Unchanged(e) => println!("{} is already added to phonebook", e.name.bold()),
        UpsertOutcome::Declined(e) => println!(
            "{} is already added to phonebook with number {}; pass {} to replace it",
            e.name.bold(),
            e.number,
            "--replace".yellow()
        ),
    }
    Ok(())
}

async fn cmd_update(directory: &DirectoryService, args: UpdateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let entry = directory.update_entry(&args.id, Some(&args.number)).await?;
    match format {
        OutputFormat::Json => print_json(&entry),
        OutputFormat::Text => {
            println!("{} Updated number for {}", "✓".green().bold(), entry.name.bold());
            Ok(())
        }
    }
}

async fn cmd_remove(directory: &DirectoryService, args: RemoveArgs) -> anyhow::Result<()> {
    match directory.delete_entry(&args.id).await? {
        DeleteOutcome::Removed => println!("{} Entry {} deleted", "✓".green().bold(), args.id.yellow()),
        DeleteOutcome::Absent => println!("Entry {} was not listed", args.id.yellow()),
    }
    Ok(())
}

async fn cmd_info(directory: &DirectoryService, format: &OutputFormat) -> anyhow::Result<()> {
    let info = directory.info().await?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "count": info.count,
            "generated_at": info.generated_at.to_rfc3339(),
        })),
        OutputFormat::Text => {
            println!("Phonebook has info for {} people", info.count.to_string().bold());
            println!("{}", info.generated_at.to_rfc2822().dimmed());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonebook_service::DirectoryError;

    fn add_args(name: &str, number: &str, replace: bool) -> AddArgs {
        AddArgs { name: name.into(), number: number.into(), replace }
    }

    #[tokio::test]
    async fn add_replace_flow_against_journal() {
        let dir = tempfile::tempdir().unwrap();
        let journal = dir.path().join("pb.journal");

        {
            let directory = open_directory(&journal).unwrap();
            cmd_add(&directory, add_args("Ada Lovelace", "39-44-5323523", false), &OutputFormat::Text).await.unwrap();
            // Existing name without --replace leaves the number alone.
            cmd_add(&directory, add_args("Ada Lovelace", "00-000000", false), &OutputFormat::Text).await.unwrap();
            assert_eq!(directory.list_entries().await.unwrap()[0].number, "39-44-5323523");
        }

        let directory = open_directory(&journal).unwrap();
        cmd_add(&directory, add_args("Ada Lovelace", "00-000000", true), &OutputFormat::Json).await.unwrap();
        let entries = directory.list_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].number, "00-000000");
    }

    #[tokio::test]
    async fn update_and_remove_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let directory = open_directory(&dir.path().join("pb.journal")).unwrap();
        cmd_add(&directory, add_args("Arto Hellas", "040-123456", false), &OutputFormat::Text).await.unwrap();

        cmd_update(&directory, UpdateArgs { id: "1".into(), number: "1".into() }, &OutputFormat::Text).await.unwrap();
        assert_eq!(directory.get_entry("1").await.unwrap().number, "1");

        cmd_remove(&directory, RemoveArgs { id: "1".into() }).await.unwrap();
        cmd_remove(&directory, RemoveArgs { id: "1".into() }).await.unwrap();
        assert_eq!(directory.count().await.unwrap(), 0);

        let err = cmd_remove(&directory, RemoveArgs { id: "one".into() }).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DirectoryError>(),
            Some(&DirectoryError::MalformedId("one".into()))
        );
    }

    #[tokio::test]
    async fn list_and_info_run() {
        let dir = tempfile::tempdir().unwrap();
        let directory = open_directory(&dir.path().join("pb.journal")).unwrap();
        cmd_list(&directory, &OutputFormat::Text).await.unwrap();
        cmd_add(&directory, add_args("Dan Abramov", "12-43-234345", false), &OutputFormat::Text).await.unwrap();
        cmd_list(&directory, &OutputFormat::Json).await.unwrap();
        cmd_info(&directory, &OutputFormat::Text).await.unwrap();
        cmd_info(&directory, &OutputFormat::Json).await.unwrap();
    }

    #[test]
    fn serve_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("phonebook.toml");
        std::fs::write(&config_path, "bind_addr = \"127.0.0.1:4000\"\nid_space = 50\n").unwrap();

        let args = ServeArgs {
            config: Some(config_path),
            bind: Some("0.0.0.0:8080".into()),
            persistent: true,
            seed: true,
        };
        let journal = dir.path().join("pb.journal");
        let config = serve_config(&args, Some(&journal)).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.id_space, 50);
        assert_eq!(config.backend, StoreBackend::Journal);
        assert_eq!(config.journal_path, journal);
        assert!(config.seed_sample_entries);
    }

    #[test]
    fn serve_rejects_bad_bind() {
        let args = ServeArgs { config: None, bind: Some("nowhere".into()), persistent: false, seed: false };
        assert!(serve_config(&args, None).is_err());
    }
}
