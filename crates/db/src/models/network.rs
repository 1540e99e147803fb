//! Network entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use hostwatch_core::types::{DbId, Timestamp};

/// A row from the `networks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Network {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Network as returned by `GET /networks/{id}`, with member host ids.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkDetail {
    pub network_id: DbId,
    pub name: String,
    pub description: String,
    pub hosts: Vec<DbId>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NetworkListItem {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNetwork {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNetwork {
    pub name: Option<String>,
    pub description: Option<String>,
}
