//! Hostwatch event bus and notification infrastructure.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, carrying [`ReportedEvent`]s.
//! - [`AlertNotifier`]: background service that queues a notification for
//!   every reported event whose type asks for one.
//! - [`delivery`]: the [`Transport`] seam with SMTP and log implementations.
//! - [`Dispatcher`]: sends every queued notification once.
//! - [`DispatchScheduler`]: runs the dispatcher periodically.

pub mod bus;
pub mod delivery;
pub mod dispatcher;
pub mod notifier;

pub use bus::{EventBus, ReportedEvent};
pub use delivery::email::{EmailConfig, EmailError, EmailTransport};
pub use delivery::log::LogTransport;
pub use delivery::{transport_from_env, DispatchError, Transport};
pub use dispatcher::{DispatchReport, DispatchScheduler, Dispatcher};
pub use notifier::AlertNotifier;
