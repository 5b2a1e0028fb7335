// Terminal UI module using ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{App, Effect, Screen};
pub use dashboard::Dashboard;
