//! Alert levels attached to event types.
//!
//! The level does not change how events are reported or stored; it only marks
//! how important events of a type are so clients can treat them differently.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Importance of an event type. Stored as `SMALLINT` (0-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum AlertLevel {
    #[default]
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl AlertLevel {
    pub const ALL: [AlertLevel; 4] = [
        AlertLevel::None,
        AlertLevel::Low,
        AlertLevel::Medium,
        AlertLevel::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AlertLevel::None => "No alert",
            AlertLevel::Low => "Low",
            AlertLevel::Medium => "Medium",
            AlertLevel::High => "High",
        }
    }
}

impl TryFrom<i16> for AlertLevel {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AlertLevel::None),
            1 => Ok(AlertLevel::Low),
            2 => Ok(AlertLevel::Medium),
            3 => Ok(AlertLevel::High),
            other => Err(CoreError::Validation(format!(
                "Invalid alert level {other}. Valid levels: 0-3"
            ))),
        }
    }
}

impl From<AlertLevel> for i16 {
    fn from(level: AlertLevel) -> Self {
        level as i16
    }
}
