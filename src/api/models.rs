//! API models for the snippet endpoints.
//!
//! The create path accepts a [`CreateSnippetRequest`]; budgets are signed
//! on the wire so that negative values can be rejected with a dedicated
//! error rather than a generic deserialization failure. A zero or omitted
//! `time_budget_seconds` and an omitted/null `view_budget` mean the
//! snippet is unrestricted on that axis.
//!
//! A complete create payload (as JSON):
//!
//! ```json
//! {
//!   "content": "fn main() { println!(\"hi\"); }",
//!   "time_budget_seconds": 600,
//!   "view_budget": 3
//! }
//! ```
//!
//! Reads return a [`SnippetResponse`]; the remaining-budget figures are
//! present only for the restrictions the snippet carries. The latest
//! listing returns [`SnippetSummary`] rows, which never carry budgets
//! because only unrestricted snippets are listed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::ReadGrant;
use crate::snippet::Snippet;

#[derive(Debug, Deserialize, Clone)]
pub struct CreateSnippetRequest {
    pub content: String,
    #[serde(default)]
    pub time_budget_seconds: i64,
    #[serde(default)]
    pub view_budget: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SnippetCreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SnippetResponse {
    pub id: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_remaining_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_remaining: Option<u64>,
}

impl From<ReadGrant> for SnippetResponse {
    fn from(grant: ReadGrant) -> Self {
        Self {
            id: grant.snippet.id,
            content: grant.snippet.content,
            created_at: grant.snippet.created_at,
            time_remaining_seconds: grant.time_remaining_seconds,
            views_remaining: grant.views_remaining,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SnippetSummary {
    pub id: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl From<Snippet> for SnippetSummary {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id,
            content: snippet.content,
            created_at: snippet.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub version: String,
}
