//! Storage backend abstraction.
//!
//! Pluggable byte store for uploaded file content, backed by the local
//! filesystem by default. The database never holds file bytes, only
//! metadata pointing into this store.

#![allow(dead_code)] // Delete/exists are part of the backend contract but only exercised in tests

mod backend;
mod local;

pub use backend::{namespaces, StorageBackend, StorageError, StorageResult};
pub use local::LocalStorage;
