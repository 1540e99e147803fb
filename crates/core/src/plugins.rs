//! Dashboard plugins and the widgets they contribute.
//!
//! Plugins are compiled in; [`PluginRegistry::builtin`] lists them. Whether a
//! plugin is active is stored per installation in `plugin_settings`, and only
//! widgets of active plugins may be placed on a dashboard.

use serde::Serialize;

use crate::error::CoreError;

/// Dashboard columns a widget can be placed in.
pub const WIDGET_COLUMNS: [i16; 2] = [1, 2];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetInfo {
    /// Stable identifier stored in `widget_settings.widget_class`.
    pub class_name: &'static str,
    /// Display name.
    pub name: &'static str,
}

pub trait Plugin: Send + Sync {
    fn meta(&self) -> PluginMeta;
    fn widgets(&self) -> Vec<WidgetInfo>;
}

// ---------------------------------------------------------------------------
// Built-in plugins
// ---------------------------------------------------------------------------

struct EventsPlugin;

impl Plugin for EventsPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: "events",
            description: "Recent events and unchecked alerts",
            author: "hostwatch",
        }
    }

    fn widgets(&self) -> Vec<WidgetInfo> {
        vec![
            WidgetInfo {
                class_name: "RecentEventsWidget",
                name: "Recent events",
            },
            WidgetInfo {
                class_name: "PendingAlertsWidget",
                name: "Pending alerts",
            },
        ]
    }
}

struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: "inventory",
            description: "Hosts and networks overview",
            author: "hostwatch",
        }
    }

    fn widgets(&self) -> Vec<WidgetInfo> {
        vec![
            WidgetInfo {
                class_name: "HostListWidget",
                name: "Hosts",
            },
            WidgetInfo {
                class_name: "NetworkListWidget",
                name: "Networks",
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new(plugins: Vec<Box<dyn Plugin>>) -> Self {
        Self { plugins }
    }

    pub fn builtin() -> Self {
        Self::new(vec![Box::new(EventsPlugin), Box::new(InventoryPlugin)])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.meta().name).collect()
    }

    /// Metadata of the named plugin, if it is registered.
    pub fn plugin_meta(&self, name: &str) -> Option<PluginMeta> {
        self.plugins
            .iter()
            .map(|p| p.meta())
            .find(|meta| meta.name == name)
    }

    /// `(class_name, name)` pairs for the widgets of the given active plugins.
    pub fn widget_choices(&self, active: &[String]) -> Vec<WidgetInfo> {
        self.plugins
            .iter()
            .filter(|p| active.iter().any(|a| a == p.meta().name))
            .flat_map(|p| p.widgets())
            .collect()
    }

    /// Check that `widget_class` belongs to one of the active plugins.
    pub fn validate_widget_class(
        &self,
        widget_class: &str,
        active: &[String],
    ) -> Result<(), CoreError> {
        if self
            .widget_choices(active)
            .iter()
            .any(|w| w.class_name == widget_class)
        {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Select a valid choice. {widget_class} is not one of the available widgets."
            )))
        }
    }
}

/// Only columns 1 and 2 exist.
pub fn validate_column(column: i16) -> Result<(), CoreError> {
    if WIDGET_COLUMNS.contains(&column) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid column {column}. Valid columns: 1, 2"
        )))
    }
}
