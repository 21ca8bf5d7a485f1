//! Demo-mode session (non-authoritative).
//!
//! # Responsibility
//! - Turn login/registration form input into a `UserProfile`.
//!
//! # Invariants
//! - Any non-empty credentials are accepted. This is not a security boundary
//!   and nothing in the core is gated on it.
//! - Passwords are only checked for shape and never stored or logged.

use crate::model::user::UserProfile;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Rejected login or registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingFields,
    InvalidEmail(String),
    PasswordMismatch,
    PasswordTooShort { min_chars: usize },
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Please fill in all fields"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::PasswordTooShort { min_chars } => {
                write!(f, "Password must be at least {min_chars} characters")
            }
        }
    }
}

impl Error for AuthError {}

/// Registration form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub password: String,
    pub confirm_password: String,
}

/// Accepts any non-empty credentials and derives a profile from the email.
pub fn login(email: &str, password: &str, now: NaiveDateTime) -> Result<UserProfile, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    Ok(UserProfile {
        name: display_name_from_email(email),
        email: email.to_string(),
        student_id: pseudo_student_id(now),
    })
}

pub fn register(registration: &Registration) -> Result<UserProfile, AuthError> {
    let name = registration.name.trim();
    let email = registration.email.trim();
    let student_id = registration.student_id.trim();
    if name.is_empty()
        || email.is_empty()
        || student_id.is_empty()
        || registration.password.is_empty()
        || registration.confirm_password.is_empty()
    {
        return Err(AuthError::MissingFields);
    }
    if !EMAIL_SHAPE_RE.is_match(email) {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    if registration.password != registration.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if registration.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::PasswordTooShort {
            min_chars: MIN_PASSWORD_CHARS,
        });
    }

    Ok(UserProfile {
        name: name.to_string(),
        email: email.to_string(),
        student_id: student_id.to_string(),
    })
}

/// `jane.doe@uni.edu` -> `Jane Doe`.
pub fn display_name_from_email(email: &str) -> String {
    let local_part = email.split('@').next().unwrap_or_default();
    local_part
        .split('.')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `STU` followed by six digits, derived from the login time.
fn pseudo_student_id(now: NaiveDateTime) -> String {
    let millis = now.and_utc().timestamp_millis().unsigned_abs();
    format!("STU{}", 100_000 + millis % 900_000)
}
