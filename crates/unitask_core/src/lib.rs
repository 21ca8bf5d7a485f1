//! Core domain logic for UniTask.
//! This crate is the single source of truth for task, notification and
//! reminder invariants; renderers only consume its view models.

pub mod app;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transfer;
pub mod view;

pub use app::{AppError, AppResult, ImportSummary, UniTaskApp};
pub use clock::{Clock, ManualClock, SystemClock};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, LogConfig, LoggingError};
pub use model::notification::{Notification, NotificationId, NotificationKind};
pub use model::resource::{default_resources, Resource, ResourceId};
pub use model::settings::{SettingUpdate, Settings, Theme};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskValidationError};
pub use model::user::UserProfile;
pub use repo::snapshot_repo::{
    AppSnapshot, RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository,
};
pub use service::notification_engine::{AlertSink, LogAlertSink, NoopAlertSink, NotificationEngine};
pub use service::reminder::{ReminderNotice, ReminderScheduler};
pub use service::session::{AuthError, Registration};
pub use service::task_store::{DashboardStats, TaskFilter, TaskSort, TaskStore};
pub use transfer::{backup_file_name, ExportDocument, ImportError};
pub use view::calendar::CalendarCursor;
pub use view::status::StatusMessage;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
