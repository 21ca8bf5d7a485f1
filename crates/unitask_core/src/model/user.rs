//! Demo session profile.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in demo user.
///
/// Carried in exports and persisted across sessions; it grants nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub student_id: String,
}

impl UserProfile {
    /// Up to two uppercase initials for avatar badges.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}
