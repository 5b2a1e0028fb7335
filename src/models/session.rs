use serde::{Deserialize, Serialize};

/// Coaching session scheduled for today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Wall-clock start time, `HH:MM` (a trailing `:SS` is tolerated)
    pub scheduled_time: String,
    pub duration_minutes: u32,
    pub status: SessionStatus,
    #[serde(rename = "type")]
    pub session_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub client: Option<ClientRef>,
}

/// Lightweight reference to the client attending a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl Session {
    /// Client name shown in lists
    pub fn client_name(&self) -> &str {
        match &self.client {
            Some(client) if !client.full_name.trim().is_empty() => &client.full_name,
            _ => "Unknown Client",
        }
    }

    pub fn is_upcoming(&self) -> bool {
        self.status == SessionStatus::Scheduled
    }
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "Scheduled",
            SessionStatus::Completed => "Completed",
            SessionStatus::Cancelled => "Cancelled",
            SessionStatus::NoShow => "No Show",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            "no_show" => Ok(SessionStatus::NoShow),
            _ => Err(anyhow::anyhow!("Invalid session status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_snake_case() {
        let status: SessionStatus = serde_json::from_str("\"no_show\"").unwrap();
        assert_eq!(status, SessionStatus::NoShow);
        assert!(serde_json::from_str::<SessionStatus>("\"pending\"").is_err());
    }

    #[test]
    fn test_session_from_json() {
        let json = r#"{
            "id": "s1",
            "scheduled_time": "09:30",
            "duration_minutes": 60,
            "status": "scheduled",
            "type": "Strength",
            "client": { "id": "c1", "full_name": "Ana Silva" }
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.session_type, "Strength");
        assert_eq!(session.location, None);
        assert_eq!(session.client_name(), "Ana Silva");
        assert!(session.is_upcoming());
    }

    #[test]
    fn test_client_name_fallback() {
        let json = r#"{"id":"s2","scheduled_time":"10:00","duration_minutes":30,"status":"completed","type":"Cardio"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.client_name(), "Unknown Client");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Cancelled".parse::<SessionStatus>().unwrap(), SessionStatus::Cancelled);
        assert!("later".parse::<SessionStatus>().is_err());
    }
}
