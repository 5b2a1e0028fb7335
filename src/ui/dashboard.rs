use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;

use super::app::{App, Screen};
use super::widgets;
use crate::api::TodaySource;
use crate::storage::TemplateStore;
use crate::view::{date_header, LoadState, Tab, TemplatePhase, TrainerView};

/// Dashboard manages the TUI lifecycle
pub struct Dashboard<S, T> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App<S, T>,
}

impl<S: TodaySource, T: TemplateStore> Dashboard<S, T> {
    /// Take over the terminal for `app`
    pub fn new(app: App<S, T>) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self { terminal, app })
    }

    /// Run the dashboard event loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let size = self.terminal.size().context("Failed to read terminal size")?;
            self.app.fit_viewport(size.height);

            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            // Effects run after the frame that shows their loading state
            if self.app.has_pending() {
                self.app.run_pending().await?;
                continue;
            }

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.app.handle_key(key)?;
                    }
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        if let Some(route) = &self.app.last_intent {
            tracing::debug!("Last unhandled intent: {}", route);
        }

        Ok(())
    }
}

impl<S, T> Dashboard<S, T> {
    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl<S, T> Drop for Dashboard<S, T> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui<S: TodaySource, T: TemplateStore>(f: &mut Frame, app: &App<S, T>) {
    let size = f.area();

    // Main area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    match app.screen() {
        Screen::Trainer(view) => render_trainer(f, main_chunks[0], view),
        Screen::Templates(list) => {
            widgets::render_templates(main_chunks[0], f.buffer_mut(), list);
            if let Some(alert) = &list.alert {
                widgets::render_alert(centered_rect(50, 25, size), f.buffer_mut(), alert);
            }
        }
        Screen::TemplateDetail(detail) => {
            match detail.phase {
                TemplatePhase::Loading => {
                    widgets::render_loading(main_chunks[0], f.buffer_mut(), "Loading template...")
                }
                TemplatePhase::NotFound => {
                    widgets::render_template_not_found(main_chunks[0], f.buffer_mut())
                }
                TemplatePhase::Loaded(_) => {
                    widgets::render_template_detail(main_chunks[0], f.buffer_mut(), detail)
                }
            }

            if let Some(editor) = &detail.notes {
                widgets::render_notes_modal(centered_rect(60, 60, size), f.buffer_mut(), editor);
            }
            if detail.confirming_delete {
                if let Some(template) = detail.template() {
                    widgets::render_confirm_delete(
                        centered_rect(50, 25, size),
                        f.buffer_mut(),
                        &template.name,
                    );
                }
            }
            if let Some(alert) = &detail.alert {
                widgets::render_alert(centered_rect(50, 25, size), f.buffer_mut(), alert);
            }
        }
    }

    widgets::render_status_bar(
        main_chunks[1],
        f.buffer_mut(),
        app.has_pending(),
        app.last_intent.as_ref(),
    );

    if app.show_help {
        let help_area = centered_rect(60, 80, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

fn render_trainer(f: &mut Frame, area: Rect, view: &TrainerView) {
    let now = Local::now().naive_local();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    widgets::render_header(
        chunks[0],
        f.buffer_mut(),
        &date_header(now),
        &view.greeting(now),
        view.refreshing,
    );

    match &view.load {
        LoadState::Loading => {
            widgets::render_loading(chunks[2], f.buffer_mut(), "Loading today's schedule...");
            return;
        }
        LoadState::Failed(message) => {
            widgets::render_load_error(chunks[2], f.buffer_mut(), message);
            return;
        }
        LoadState::Ready(_) => {}
    }

    widgets::render_tabs(chunks[1], f.buffer_mut(), view.tab);

    match view.tab {
        Tab::Overview => widgets::render_overview(chunks[2], f.buffer_mut(), view),
        Tab::Sessions => widgets::render_sessions(chunks[2], f.buffer_mut(), view),
        Tab::Clients => widgets::render_clients(chunks[2], f.buffer_mut(), view),
    }

    let size = f.area();
    if let Some(editor) = &view.notes {
        widgets::render_notes_modal(centered_rect(60, 60, size), f.buffer_mut(), editor);
    }
    if let Some(alert) = &view.alert {
        widgets::render_alert(centered_rect(50, 25, size), f.buffer_mut(), alert);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
