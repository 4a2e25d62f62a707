use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phonebook",
    about = "Phonebook directory: HTTP server and local administration",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Journal file [default: phonebook.journal]
    #[arg(long, global = true)]
    pub journal: Option<PathBuf>,
}

impl Cli {
    /// Journal file for the local commands.
    pub fn journal_path(&self) -> PathBuf {
        self.journal
            .clone()
            .unwrap_or_else(|| PathBuf::from("phonebook.journal"))
    }
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List all entries
    List(ListArgs),
    /// Add an entry, or replace the number of an existing one
    Add(AddArgs),
    /// Change the number of an entry
    Update(UpdateArgs),
    /// Delete an entry
    Remove(RemoveArgs),
    /// Show how many entries the phonebook holds
    Info(InfoArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to bind, overriding the configuration file.
    #[arg(long)]
    pub bind: Option<String>,
    /// Serve from the journal file instead of memory.
    #[arg(long)]
    pub persistent: bool,
    /// Load the sample entries into an empty store.
    #[arg(long)]
    pub seed: bool,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,
    pub number: String,
    /// Replace the number if the name is already listed.
    #[arg(long)]
    pub replace: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: String,
    pub number: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub id: String,
}

#[derive(Args)]
pub struct InfoArgs {}
