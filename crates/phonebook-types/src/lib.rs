//! Foundation types for the phonebook directory.
//!
//! Every other crate in the workspace speaks in terms of these types:
//!
//! - [`EntryId`] -- opaque, store-assigned identifier
//! - [`Entry`] -- a stored record (id, name, number)
//! - [`NewEntry`] -- a validated record that has not been assigned an id yet
//! - [`Field`] -- names of the user-supplied fields, used in error reporting

pub mod entry;
pub mod error;
pub mod id;

pub use entry::{Entry, Field, NewEntry};
pub use error::TypeError;
pub use id::EntryId;
