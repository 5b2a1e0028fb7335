pub mod client;
pub mod session;
pub mod snapshot;
pub mod template;

pub use client::Client;
pub use session::{ClientRef, Session, SessionStatus};
pub use snapshot::{TodaySnapshot, TrainerProfile};
pub use template::{format_duration, Exercise, TargetSet, TemplateExercise, WorkoutTemplate};
