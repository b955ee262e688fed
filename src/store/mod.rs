//! Fjall-based persistence layer for snippets
//!
//! The core treats the backend as a keyed store with per-record atomicity:
//! no cross-record transactions are assumed or required. [`SnippetStore`]
//! is the contract the engine and services are written against, so tests
//! can substitute [`MemoryStore`] for the durable [`FjallSnippetStore`].
//!
//! The one operation beyond plain get/put/delete is [`SnippetStore::update`],
//! a single-key atomic read-modify-write. It exists because the view budget
//! is shared mutable state: two readers racing on the last remaining view
//! must not both observe the same pre-decrement count. Time budgets need no
//! such treatment since remaining time derives from the immutable creation
//! timestamp.

pub mod error;
mod fjall;
mod keys;
mod memory;

pub use self::fjall::FjallSnippetStore;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;

use crate::snippet::Snippet;

/// Contract over the keyed persistence backend.
pub trait SnippetStore: Send + Sync + 'static {
    /// Fetch a snippet by id.
    fn get(&self, id: &str) -> Result<Option<Snippet>>;

    /// Store a snippet under its id.
    fn put(&self, snippet: &Snippet) -> Result<()>;

    /// Delete a snippet by id. Idempotent: deleting an absent id is not an
    /// error and does not affect other records.
    fn delete(&self, id: &str) -> Result<()>;

    /// All snippets with neither a time nor a view restriction, in no
    /// particular order.
    fn list_unrestricted(&self) -> Result<Vec<Snippet>>;

    /// Single-key atomic read-modify-write.
    ///
    /// `apply` receives the current record (`None` if absent) and returns
    /// the record to store, or `None` to delete it. The closure runs under
    /// the backend's per-key write exclusion, so concurrent `update` calls
    /// on the same id serialize. Returns the record as stored by this call,
    /// `None` if it was deleted or absent.
    fn update<F>(&self, id: &str, apply: F) -> Result<Option<Snippet>>
    where
        F: FnMut(Option<Snippet>) -> Option<Snippet>;
}
