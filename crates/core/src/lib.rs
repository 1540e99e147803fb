//! Domain logic for hostwatch.
//!
//! Everything in this crate is pure: no database, no network. The `db`,
//! `events` and `api` crates build on these types and helpers.

pub mod alert;
pub mod error;
pub mod event_fields;
pub mod plugins;
pub mod registration;
pub mod related;
pub mod render;
pub mod search;
pub mod slug;
pub mod timezone;
pub mod types;
