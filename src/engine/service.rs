use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::snippet::Snippet;
use crate::store::SnippetStore;

use super::expiry::{self, ReadGrant};
use super::SnippetError;

/// Ingestion and retrieval over an explicit store handle.
///
/// Holds no snippet state of its own; every read re-fetches and
/// re-validates restrictions from the backend.
pub struct SnippetService<S> {
    store: Arc<S>,
}

impl<S> Clone for SnippetService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SnippetStore> SnippetService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and persist a new snippet, returning the stored record.
    /// Nothing is persisted when validation fails. This path has no read
    /// side and cannot trigger eviction.
    pub fn create(
        &self,
        content: &str,
        time_budget_seconds: i64,
        view_budget: Option<i64>,
    ) -> Result<Snippet, SnippetError> {
        if content.is_empty() {
            return Err(SnippetError::EmptyContent);
        }

        let snippet = Snippet::new(content, time_budget_seconds, view_budget)?;
        self.store.put(&snippet)?;
        info!(
            id = %snippet.id,
            time_restricted = snippet.is_time_restricted(),
            view_restricted = snippet.is_view_restricted(),
            "snippet created"
        );
        Ok(snippet)
    }

    /// Read one snippet, consuming a view and/or evicting as needed.
    pub fn get(&self, id: &str) -> Result<ReadGrant, SnippetError> {
        expiry::admit(self.store.as_ref(), id, Utc::now())
    }

    /// The `limit` most recently created unrestricted snippets, newest
    /// first. Never triggers eviction: only unrestricted snippets are
    /// listed, and those carry no budgets to consume.
    pub fn latest(&self, limit: usize) -> Result<Vec<Snippet>, SnippetError> {
        let mut snippets = self.store.list_unrestricted()?;
        // Total, deterministic order: creation time descending, UUIDv7 id
        // (insertion order) breaking exact ties.
        snippets.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        snippets.truncate(limit);
        Ok(snippets)
    }
}
