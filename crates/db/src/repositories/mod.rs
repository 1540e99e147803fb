//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods taking a `user_id`
//! only see rows owned by that user.

pub mod dashboard_repo;
pub mod event_comment_repo;
pub mod event_repo;
pub mod event_type_category_repo;
pub mod event_type_repo;
pub mod host_repo;
pub mod network_repo;
pub mod notification_repo;
pub mod plugin_repo;
pub mod search_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use event_comment_repo::EventCommentRepo;
pub use event_repo::EventRepo;
pub use event_type_category_repo::EventTypeCategoryRepo;
pub use event_type_repo::EventTypeRepo;
pub use host_repo::HostRepo;
pub use network_repo::NetworkRepo;
pub use notification_repo::NotificationRepo;
pub use plugin_repo::PluginRepo;
pub use search_repo::SearchRepo;
pub use user_repo::UserRepo;
