//! Expiring-entity engine: lazy eviction and the snippet services
//!
//! Reads of restricted snippets pass through [`expiry::admit`], which
//! decides keep/decrement/evict at access time. There is no background
//! sweep; a snippet past its budget lives in the backend until something
//! touches it. [`SnippetService`] wires the engine to a store handle and
//! adds the ingestion and "latest" paths.

pub mod expiry;
pub mod service;

pub use expiry::ReadGrant;
pub use service::SnippetService;

use thiserror::Error;

use crate::snippet::BudgetError;
use crate::store::StoreError;

/// Failure modes of the snippet operations.
///
/// `NotFound` deliberately folds "never existed", "already evicted", and
/// "evicted by this call" into one outcome: an evicted snippet behaves
/// exactly like one that never existed.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error("content must not be empty")]
    EmptyContent,

    #[error("snippet not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}
