use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reusable named collection of exercises with prescribed sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    /// Order is significant and preserved through storage
    #[serde(default)]
    pub exercises: Vec<TemplateExercise>,
    /// Planned duration in minutes
    pub duration: u32,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExercise {
    pub id: String,
    pub exercise: Exercise,
    #[serde(default)]
    pub sets: Vec<TargetSet>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
}

/// Prescribed set; weight in kg, duration and rest in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSet {
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub rest_time: Option<u32>,
}

impl WorkoutTemplate {
    /// Create an empty template with generated ID and timestamps
    pub fn new(name: String, category: String, duration: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: None,
            category,
            exercises: Vec::new(),
            duration,
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn visibility(&self) -> &'static str {
        if self.is_public {
            "Public"
        } else {
            "Private"
        }
    }
}

impl TargetSet {
    /// One-line description, e.g. `10 reps @ 60kg for 30s • Rest 90s`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(reps) = self.reps.filter(|r| *r > 0) {
            parts.push(format!("{} reps", reps));
        }
        if let Some(weight) = self.weight.filter(|w| *w > 0.0) {
            parts.push(format!("@ {}kg", weight));
        }
        if let Some(duration) = self.duration.filter(|d| *d > 0) {
            parts.push(format!("for {}s", duration));
        }

        let mut line = parts.join(" ");

        if let Some(rest) = self.rest_time.filter(|r| *r > 0) {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&format!("• Rest {}s", rest));
        }

        line
    }
}

/// Format a duration in minutes as `45 min` or `1h 15m`
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, rest)
    }
}
