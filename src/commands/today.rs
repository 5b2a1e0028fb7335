use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DataSource, TodaySource};
use crate::config::{Config, TimeFormat};
use crate::models::{Session, SessionStatus, TodaySnapshot};
use crate::view::{date_header, format_time, TrainerView};

#[derive(Args)]
pub struct TodayCommand {}

impl TodayCommand {
    pub async fn execute(self, config: &Config, snapshot: Option<PathBuf>) -> Result<()> {
        let source = DataSource::from_config(config, snapshot)?;
        let snapshot = fetch_with_spinner(&source).await?;

        let mut view = TrainerView::new(&config.ui);
        view.finish_load(Ok(snapshot));

        let now = Local::now().naive_local();
        println!("{}", date_header(now).dimmed());
        println!("{}", view.greeting(now).bold());
        println!();

        let Some(board) = view.board() else {
            return Ok(());
        };

        let rate = board
            .completion_rate()
            .map(|r| format!("{}%", r))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "Sessions: {} completed · {} remaining · completion rate {}",
            board.progress_label(),
            board.remaining(),
            rate
        );
        println!();

        let format = view.time_format();
        print_section("Upcoming Sessions", &board.upcoming, format, "No upcoming sessions today.");
        print_section("Recently Completed", &board.completed, format, "Nothing completed yet.");
        if !board.other.is_empty() {
            print_section("Cancelled / No Show", &board.other, format, "");
        }

        Ok(())
    }
}

/// Fetch with a spinner on stderr
pub(crate) async fn fetch_with_spinner(source: &DataSource) -> Result<TodaySnapshot> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!("Loading today's schedule from {}", source.describe()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = source.fetch_today().await;
    spinner.finish_and_clear();

    result.context("Unable to load data")
}

fn print_section(title: &str, sessions: &[&Session], time_format: TimeFormat, empty: &str) {
    println!("{}", title.bold());
    println!("────────────────────────────────");

    if sessions.is_empty() {
        println!("  {}", empty.dimmed());
    }

    for session in sessions {
        let mut line = format!(
            "  {:>8}  {:<20} {:<12} {}",
            format_time(&session.scheduled_time, time_format),
            session.client_name(),
            session.session_type,
            status_label(session.status),
        );
        if let Some(location) = &session.location {
            line.push_str(&format!("  📍 {}", location));
        }
        line.push_str(&format!("  {} min", session.duration_minutes));
        println!("{}", line);
    }

    println!();
}

fn status_label(status: SessionStatus) -> ColoredString {
    let label = status.label();
    match status {
        SessionStatus::Scheduled => label.cyan(),
        SessionStatus::Completed => label.green(),
        SessionStatus::Cancelled => label.red(),
        SessionStatus::NoShow => label.yellow(),
    }
}
