//! Item catalog: records, department labels and the code lookup.

pub mod department;
mod error;
mod index;
mod lookup;
mod types;

pub use error::{NetworkError, StorageError};
pub use lookup::{LoadState, LookupService, Provenance};
pub use types::{Item, ItemList};
