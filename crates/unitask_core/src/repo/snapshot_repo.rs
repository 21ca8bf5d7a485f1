//! Snapshot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load every persisted collection at startup, defaulting what is absent.
//! - Overwrite whole collections after each mutation.
//!
//! # Invariants
//! - `load_all` never fails on malformed JSON: the affected key falls back to
//!   its default and a `warn` event is emitted.
//! - The task bundle (tasks, notifications, resources) is written in one
//!   transaction.

use crate::db::DbError;
use crate::model::notification::Notification;
use crate::model::resource::{default_resources, Resource};
use crate::model::settings::Settings;
use crate::model::task::Task;
use crate::model::user::UserProfile;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TASKS_KEY: &str = "tasks";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const RESOURCES_KEY: &str = "resources";
pub const SETTINGS_KEY: &str = "settings";
pub const CURRENT_USER_KEY: &str = "current_user";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure. Corrupt stored values are not errors.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Everything the app restores at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
    pub resources: Vec<Resource>,
    pub settings: Settings,
    pub user: Option<UserProfile>,
}

impl Default for AppSnapshot {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            notifications: Vec::new(),
            resources: default_resources(),
            settings: Settings::default(),
            user: None,
        }
    }
}

/// Persistence adapter used by the composition root.
pub trait SnapshotRepository {
    fn load_all(&self) -> RepoResult<AppSnapshot>;
    fn save_tasks_bundle(
        &self,
        tasks: &[Task],
        notifications: &[Notification],
        resources: &[Resource],
    ) -> RepoResult<()>;
    fn save_settings(&self, settings: &Settings) -> RepoResult<()>;
    /// Stores the signed-in profile, or removes it when `None`.
    fn save_user(&self, user: Option<&UserProfile>) -> RepoResult<()>;
}

/// SQLite-backed key-value snapshot store.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Returns the raw stored value for one key.
    pub fn read_raw(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrites the raw stored value for one key.
    pub fn write_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        write_entry(self.conn, key, value)
    }

    fn load_or_default<T: DeserializeOwned>(
        &self,
        key: &str,
        default: impl FnOnce() -> T,
    ) -> RepoResult<T> {
        let Some(raw) = self.read_raw(key)? else {
            return Ok(default());
        };
        match serde_json::from_str::<Option<T>>(raw.as_str()) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(default()),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=corrupt key={} error={}",
                    key, err
                );
                Ok(default())
            }
        }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_all(&self) -> RepoResult<AppSnapshot> {
        Ok(AppSnapshot {
            tasks: self.load_or_default(TASKS_KEY, Vec::new)?,
            notifications: self.load_or_default(NOTIFICATIONS_KEY, Vec::new)?,
            resources: self.load_or_default(RESOURCES_KEY, default_resources)?,
            settings: self.load_or_default(SETTINGS_KEY, Settings::default)?,
            user: self.load_or_default(CURRENT_USER_KEY, || None)?,
        })
    }

    fn save_tasks_bundle(
        &self,
        tasks: &[Task],
        notifications: &[Notification],
        resources: &[Resource],
    ) -> RepoResult<()> {
        let tasks_json = encode(tasks)?;
        let notifications_json = encode(notifications)?;
        let resources_json = encode(resources)?;

        let tx = self.conn.unchecked_transaction()?;
        write_entry(&tx, TASKS_KEY, tasks_json.as_str())?;
        write_entry(&tx, NOTIFICATIONS_KEY, notifications_json.as_str())?;
        write_entry(&tx, RESOURCES_KEY, resources_json.as_str())?;
        tx.commit()?;
        Ok(())
    }

    fn save_settings(&self, settings: &Settings) -> RepoResult<()> {
        write_entry(self.conn, SETTINGS_KEY, encode(settings)?.as_str())
    }

    fn save_user(&self, user: Option<&UserProfile>) -> RepoResult<()> {
        match user {
            Some(profile) => write_entry(self.conn, CURRENT_USER_KEY, encode(profile)?.as_str()),
            None => {
                self.conn
                    .execute("DELETE FROM kv_entries WHERE key = ?1;", [CURRENT_USER_KEY])?;
                Ok(())
            }
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> RepoResult<String> {
    Ok(serde_json::to_string(value)?)
}

fn write_entry(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO kv_entries (key, value, updated_at)
         VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![key, value],
    )?;
    Ok(())
}
