pub mod event;
pub mod host;
pub mod network;
pub mod notification;
pub mod plugin;
pub mod search;
pub mod user;
