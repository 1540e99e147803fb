//! Search models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use hostwatch_core::types::DbId;

/// A single hit from a host or network search.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchResultRow {
    /// `"host"` or `"network"`.
    pub kind: String,
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub rank: f32,
}

/// Query parameters for `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    /// Comma-separated kinds; all kinds when absent.
    pub kinds: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub total_count: i64,
    pub results: Vec<SearchResultRow>,
}
