//! Host entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use hostwatch_core::types::{DbId, Timestamp};

/// Default timezone for hosts that do not declare one.
pub const DEFAULT_HOST_TIMEZONE: &str = "UTC";

/// A row from the `hosts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Host {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub ipv4: String,
    pub ipv6: String,
    pub timezone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Host as returned by `GET /hosts/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct HostDetail {
    pub host_id: DbId,
    pub name: String,
    pub description: String,
    pub ipv4: String,
    pub ipv6: String,
    pub timezone: String,
}

impl From<Host> for HostDetail {
    fn from(host: Host) -> Self {
        Self {
            host_id: host.id,
            name: host.name,
            description: host.description,
            ipv4: host.ipv4,
            ipv6: host.ipv6,
            timezone: host.timezone,
        }
    }
}

/// Entry of `GET /hosts/list`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HostListItem {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a host.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHost {
    pub name: String,
    pub description: Option<String>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
    pub timezone: Option<String>,
}

/// DTO for updating a host. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHost {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
    pub timezone: Option<String>,
}
