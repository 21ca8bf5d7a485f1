//! Backup export and import payloads.
//!
//! # Responsibility
//! - Define the single-document backup shape shared by export and import.
//! - Validate an import payload completely before any state is replaced.
//!
//! # Invariants
//! - An import is accepted only when `tasks`, `notifications`, `resources`
//!   and `settings` are all present and non-null, and every section decodes.
//! - `user` is optional on import; when absent the current user is kept.

use crate::model::notification::Notification;
use crate::model::resource::Resource;
use crate::model::settings::Settings;
use crate::model::task::Task;
use crate::model::user::UserProfile;
use crate::model::wire_time;
use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Keys an import payload must carry.
pub const REQUIRED_IMPORT_KEYS: [&str; 4] = ["tasks", "notifications", "resources", "settings"];

/// Full backup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
    pub resources: Vec<Resource>,
    pub settings: Settings,
    pub user: Option<UserProfile>,
    #[serde(with = "wire_time")]
    pub exported_at: NaiveDateTime,
}

/// Validated import content, ready to replace in-memory state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPayload {
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
    pub resources: Vec<Resource>,
    pub settings: Settings,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Payload is not JSON, or not a JSON object.
    InvalidJson(String),
    /// A required section is absent or null.
    MissingKey(&'static str),
    /// A section is present but does not decode.
    MalformedSection { key: &'static str, message: String },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(message) => write!(f, "invalid data: {message}"),
            Self::MissingKey(key) => write!(f, "invalid data: missing `{key}`"),
            Self::MalformedSection { key, message } => {
                write!(f, "invalid data: malformed `{key}`: {message}")
            }
        }
    }
}

impl Error for ImportError {}

/// Default download name: `unitask-backup-YYYY-MM-DD.json`.
pub fn backup_file_name(today: NaiveDate) -> String {
    format!("unitask-backup-{}.json", today.format("%Y-%m-%d"))
}

/// Parses and validates an import document without touching any state.
pub fn parse_import(json: &str) -> Result<ImportPayload, ImportError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| ImportError::InvalidJson(err.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(ImportError::InvalidJson(
            "top-level value must be an object".to_string(),
        ));
    };

    for key in REQUIRED_IMPORT_KEYS {
        if object.get(key).map_or(true, Value::is_null) {
            return Err(ImportError::MissingKey(key));
        }
    }

    let tasks = take_section(&mut object, "tasks")?;
    let notifications = take_section(&mut object, "notifications")?;
    let resources = take_section(&mut object, "resources")?;
    let settings = take_section(&mut object, "settings")?;
    let user = match object.remove("user") {
        None | Some(Value::Null) => None,
        Some(value) => Some(decode_section("user", value)?),
    };

    Ok(ImportPayload {
        tasks,
        notifications,
        resources,
        settings,
        user,
    })
}

fn take_section<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<T, ImportError> {
    let value = object.remove(key).ok_or(ImportError::MissingKey(key))?;
    decode_section(key, value)
}

fn decode_section<T: DeserializeOwned>(key: &'static str, value: Value) -> Result<T, ImportError> {
    serde_json::from_value(value).map_err(|err| ImportError::MalformedSection {
        key,
        message: err.to_string(),
    })
}
