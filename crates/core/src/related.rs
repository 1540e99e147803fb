//! Generic references from notifications to arbitrary records.
//!
//! A notification may point at any object through a `(related_type,
//! related_id)` pair. Both halves are set together or not at all.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedKind {
    Event,
    EventType,
    Host,
    Network,
}

impl RelatedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelatedKind::Event => "event",
            RelatedKind::EventType => "event_type",
            RelatedKind::Host => "host",
            RelatedKind::Network => "network",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "event" => Ok(RelatedKind::Event),
            "event_type" => Ok(RelatedKind::EventType),
            "host" => Ok(RelatedKind::Host),
            "network" => Ok(RelatedKind::Network),
            other => Err(CoreError::Validation(format!(
                "Unknown related object type '{other}'"
            ))),
        }
    }
}

/// A resolved generic reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelatedRef {
    pub kind: RelatedKind,
    pub id: DbId,
}

impl RelatedRef {
    pub fn new(kind: RelatedKind, id: DbId) -> Self {
        Self { kind, id }
    }

    /// Rebuild a reference from its stored columns.
    ///
    /// Returns `Ok(None)` when both are null and an error when only one is.
    pub fn from_columns(
        related_type: Option<&str>,
        related_id: Option<DbId>,
    ) -> Result<Option<Self>, CoreError> {
        match (related_type, related_id) {
            (None, None) => Ok(None),
            (Some(kind), Some(id)) => Ok(Some(Self::new(RelatedKind::parse(kind)?, id))),
            _ => Err(CoreError::Validation(
                "related_type and related_id must be set together".into(),
            )),
        }
    }
}
