//! Domain types.

mod document;
mod env;

pub use document::{FileEntry, Metadata, StoreDocument};
pub use env::{Entry, Env};
