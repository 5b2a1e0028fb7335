use serde::{Deserialize, Serialize};

/// Client assigned to the trainer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, rename = "lastWorkout")]
    pub last_workout: Option<String>,
    #[serde(default)]
    pub streak: u32,
}

impl Client {
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "Unknown"
        } else {
            &self.full_name
        }
    }

    /// Avatar glyph, falling back to the name's initial and then `?`
    pub fn avatar_glyph(&self) -> String {
        if let Some(avatar) = self.avatar.as_deref().filter(|a| !a.is_empty()) {
            return avatar.to_string();
        }

        self.full_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn last_workout_label(&self) -> &str {
        self.last_workout
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or("Never")
    }

    /// Case-insensitive substring match on name or email.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.full_name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}
