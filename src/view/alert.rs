/// Dismissible message shown over the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

impl Alert {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, title, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, "Success", message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, "Error", message)
    }

    fn new(kind: AlertKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
        }
    }
}
