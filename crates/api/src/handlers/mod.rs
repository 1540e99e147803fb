pub mod categories;
pub mod dashboard;
pub mod event_types;
pub mod events;
pub mod hosts;
pub mod networks;
pub mod notifications;
pub mod plugins;
pub mod search;
pub mod users;
