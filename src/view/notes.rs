use crate::config::TimeFormat;
use crate::models::{Session, WorkoutTemplate};

use super::sessions::format_time;

/// Text buffer bound to an open notes modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEditor {
    target: NoteTarget,
    buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteTarget {
    Session {
        id: String,
        /// `Client - Type`
        title: String,
        /// `9:00 AM • 60 min`
        subtitle: String,
    },
    Template {
        id: String,
        name: String,
    },
}

/// Request to persist the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSave {
    pub target: NoteTarget,
    pub text: String,
}

impl NoteEditor {
    /// Quick notes always start empty
    pub fn for_session(session: &Session, time_format: TimeFormat) -> Self {
        Self {
            target: NoteTarget::Session {
                id: session.id.clone(),
                title: format!("{} - {}", session.client_name(), session.session_type),
                subtitle: format!(
                    "{} • {} min",
                    format_time(&session.scheduled_time, time_format),
                    session.duration_minutes
                ),
            },
            buffer: String::new(),
        }
    }

    /// Template notes start from what was stored before
    pub fn for_template(template: &WorkoutTemplate, existing: Option<String>) -> Self {
        Self {
            target: NoteTarget::Template {
                id: template.id.clone(),
                name: template.name.clone(),
            },
            buffer: existing.unwrap_or_default(),
        }
    }

    pub fn target(&self) -> &NoteTarget {
        &self.target
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn title(&self) -> &str {
        match &self.target {
            NoteTarget::Session { .. } => "Quick Notes",
            NoteTarget::Template { .. } => "Template Notes",
        }
    }

    /// Save request for the buffer. Blank session notes produce nothing;
    /// a blank template note clears what was stored.
    pub fn save_request(&self) -> Option<NoteSave> {
        if let NoteTarget::Session { .. } = self.target {
            if self.buffer.trim().is_empty() {
                return None;
            }
        }

        Some(NoteSave {
            target: self.target.clone(),
            text: self.buffer.clone(),
        })
    }
}

impl NoteSave {
    pub fn success_message(&self) -> &'static str {
        match self.target {
            NoteTarget::Session { .. } => "Session notes saved successfully",
            NoteTarget::Template { .. } => "Notes saved successfully",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRef, SessionStatus};

    fn session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            scheduled_time: "18:00".to_string(),
            duration_minutes: 60,
            status: SessionStatus::Scheduled,
            session_type: "HIIT".to_string(),
            location: None,
            client: Some(ClientRef {
                id: "c1".to_string(),
                full_name: "Ana".to_string(),
            }),
        }
    }

    #[test]
    fn test_session_summary() {
        let editor = NoteEditor::for_session(&session("s1"), TimeFormat::TwelveHour);
        match editor.target() {
            NoteTarget::Session { title, subtitle, .. } => {
                assert_eq!(title, "Ana - HIIT");
                assert_eq!(subtitle, "6:00 PM • 60 min");
            }
            other => panic!("unexpected target {:?}", other),
        }
    }

    #[test]
    fn test_blank_session_note_is_not_saved() {
        let mut editor = NoteEditor::for_session(&session("s1"), TimeFormat::TwelveHour);
        editor.set_text("   \n");
        assert!(editor.save_request().is_none());

        editor.set_text("Good form on squats");
        let save = editor.save_request().unwrap();
        assert_eq!(save.text, "Good form on squats");
    }

    #[test]
    fn test_template_note_loads_existing() {
        let template = WorkoutTemplate::new("Push".to_string(), "Strength".to_string(), 45);
        let mut editor = NoteEditor::for_template(&template, Some("old".to_string()));
        assert_eq!(editor.text(), "old");

        editor.backspace();
        editor.backspace();
        editor.backspace();
        assert!(editor.save_request().is_some());
    }
}
