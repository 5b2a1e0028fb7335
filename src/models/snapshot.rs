use serde::{Deserialize, Serialize};

use super::{Client, Session};

/// Point-in-time data for the trainer's "today" view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySnapshot {
    #[serde(default)]
    pub profile: Option<TrainerProfile>,
    #[serde(default)]
    pub training_sessions: Vec<Session>,
    #[serde(default)]
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerProfile {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
}

impl TodaySnapshot {
    /// First name used in the greeting
    pub fn first_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.full_name.split_whitespace().next())
            .unwrap_or("Trainer")
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.training_sessions.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        let mut snapshot = TodaySnapshot::default();
        assert_eq!(snapshot.first_name(), "Trainer");

        snapshot.profile = Some(TrainerProfile {
            id: "p1".to_string(),
            full_name: "Marta Gomez".to_string(),
        });
        assert_eq!(snapshot.first_name(), "Marta");

        snapshot.profile = Some(TrainerProfile {
            id: "p1".to_string(),
            full_name: "  ".to_string(),
        });
        assert_eq!(snapshot.first_name(), "Trainer");
    }

    #[test]
    fn test_snapshot_accepts_missing_lists() {
        let snapshot: TodaySnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.training_sessions.is_empty());
        assert!(snapshot.clients.is_empty());
    }
}
