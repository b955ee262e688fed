//! Lazy eviction protocol, run once per read of a restricted snippet.
//!
//! The view budget is the only shared mutable state in the system, so the
//! exhausted-check, the decrement, and the eviction execute as one atomic
//! unit per id via [`SnippetStore::update`]. Of K readers racing on the
//! final view, exactly one is granted content; the rest observe `NotFound`
//! as if they had arrived after eviction. Time budgets are re-derived from
//! the immutable creation timestamp on every read and need no exclusion.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::snippet::Snippet;
use crate::store::SnippetStore;

use super::SnippetError;

/// A read admitted by the engine, with the consumption already committed.
///
/// `views_remaining` is the post-decrement count (a budget of V yields the
/// sequence V-1, V-2, …, 0 over successive reads). Both figures are `None`
/// when the corresponding restriction is not set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGrant {
    pub snippet: Snippet,
    pub views_remaining: Option<u64>,
    pub time_remaining_seconds: Option<u64>,
}

/// Admit or reject one read of the snippet at `id`, applying the side
/// effects of consumption (view decrement, eviction) before returning.
pub fn admit<S: SnippetStore>(
    store: &S,
    id: &str,
    now: DateTime<Utc>,
) -> Result<ReadGrant, SnippetError> {
    let Some(snippet) = store.get(id)? else {
        return Err(SnippetError::NotFound);
    };

    if !snippet.is_restricted() {
        return Ok(grant(snippet, now));
    }

    if snippet.is_view_restricted() {
        return consume(store, id, now);
    }

    // Time restriction only: nothing to mutate, the deadline derives from
    // the immutable anchor. Deletion is idempotent, so two readers both
    // observing expiry may both evict without harm.
    if snippet.is_expired_at(now) {
        store.delete(id)?;
        debug!(id, "time budget elapsed, snippet evicted");
        return Err(SnippetError::NotFound);
    }

    Ok(grant(snippet, now))
}

/// Decrement-or-evict for a view-restricted snippet, as a single atomic
/// read-modify-write on the id. The decrement is persisted before content
/// is returned, so an abandoned response still consumes a view.
fn consume<S: SnippetStore>(
    store: &S,
    id: &str,
    now: DateTime<Utc>,
) -> Result<ReadGrant, SnippetError> {
    let mut evicted = false;
    let updated = store.update(id, |current| {
        let Some(mut snippet) = current else {
            return None;
        };
        // Exhausted by a prior read, or the time budget ran out in the
        // meantime: drop the record instead of rewriting it.
        if snippet.view_budget == Some(0) || snippet.is_expired_at(now) {
            evicted = true;
            return None;
        }
        snippet.view_budget = snippet.view_budget.map(|views| views - 1);
        Some(snippet)
    })?;

    match updated {
        Some(snippet) => Ok(grant(snippet, now)),
        None => {
            if evicted {
                debug!(id, "budget exhausted, snippet evicted");
            }
            Err(SnippetError::NotFound)
        }
    }
}

fn grant(snippet: Snippet, now: DateTime<Utc>) -> ReadGrant {
    let views_remaining = snippet.view_budget;
    let time_remaining_seconds = snippet.time_remaining(now);
    ReadGrant {
        snippet,
        views_remaining,
        time_remaining_seconds,
    }
}
