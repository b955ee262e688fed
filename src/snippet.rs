//! Snippet entity and restriction derivations.
//!
//! A snippet carries up to two independent expiry rules: a wall-clock time
//! budget anchored at `created_at`, and a mutable view budget consumed by
//! reads. Remaining time is always derived from the immutable creation
//! timestamp plus the static budget; only the view counter is persisted
//! mutable state.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("time budget must be non-negative, got {0}")]
    NegativeTime(i64),

    #[error("view budget must be non-negative, got {0}")]
    NegativeViews(i64),
}

/// The stored text record with optional expiry rules.
///
/// Restriction flags are recomputed from the budgets, never stored as
/// independent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub content: String,
    /// Microsecond precision; anchor for the time restriction and the
    /// primary sort key for "latest".
    #[serde(with = "chrono::serde::ts_microseconds")]
    pub created_at: DateTime<Utc>,
    /// `0` means no time restriction.
    pub time_budget_seconds: u64,
    /// `None` means unlimited reads; `Some(n)` is the number of reads
    /// still permitted.
    pub view_budget: Option<u64>,
}

impl Snippet {
    /// Build a new snippet: assigns a UUIDv7 id, stamps `created_at`, and
    /// rejects negative budgets before anything touches storage.
    pub fn new(
        content: impl Into<String>,
        time_budget_seconds: i64,
        view_budget: Option<i64>,
    ) -> Result<Self, BudgetError> {
        if time_budget_seconds < 0 {
            return Err(BudgetError::NegativeTime(time_budget_seconds));
        }
        if let Some(views) = view_budget {
            if views < 0 {
                return Err(BudgetError::NegativeViews(views));
            }
        }

        Ok(Self {
            id: Uuid::now_v7().to_string(),
            content: content.into(),
            // Truncated to the precision the store keeps, so a record
            // compares equal to itself after a round-trip.
            created_at: Utc::now().trunc_subsecs(6),
            time_budget_seconds: time_budget_seconds as u64,
            view_budget: view_budget.map(|views| views as u64),
        })
    }

    pub fn is_time_restricted(&self) -> bool {
        self.time_budget_seconds != 0
    }

    pub fn is_view_restricted(&self) -> bool {
        self.view_budget.is_some()
    }

    pub fn is_restricted(&self) -> bool {
        self.is_time_restricted() || self.is_view_restricted()
    }

    /// Instant at which the time budget elapses, if one is set.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if !self.is_time_restricted() {
            return None;
        }
        Some(self.created_at + Duration::seconds(self.time_budget_seconds as i64))
    }

    /// Whether the time budget has elapsed at `now`. Expiry is inclusive:
    /// a read at exactly `created_at + budget` is already too late.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    /// Whole seconds left on the time budget at `now`, floored at zero.
    /// `None` when no time restriction is set.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<u64> {
        let deadline = self.expires_at()?;
        let left = (deadline - now).num_seconds();
        Some(left.max(0) as u64)
    }
}
