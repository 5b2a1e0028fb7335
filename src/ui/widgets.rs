use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Widget, Wrap},
};

use crate::config::TimeFormat;
use crate::models::{format_duration, Session, SessionStatus, WorkoutTemplate};
use crate::view::{
    format_time, Alert, AlertKind, NoteEditor, NoteTarget, Route, Tab, TemplateDetail, TemplateList,
    TrainerView, QUICK_ACTIONS,
};

fn panel(title: &str, is_selected: bool) -> Block<'_> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

/// Draw `items` scrolled so that `selected` stays on screen
fn render_scrolled_list(area: Rect, buf: &mut Buffer, items: Vec<ListItem>, selected: Option<usize>) {
    let mut state = ListState::default().with_selected(selected);
    ratatui::widgets::StatefulWidget::render(List::new(items), area, buf, &mut state);
}

fn status_color(status: SessionStatus) -> Color {
    match status {
        SessionStatus::Scheduled => Color::Cyan,
        SessionStatus::Completed => Color::Green,
        SessionStatus::Cancelled => Color::Red,
        SessionStatus::NoShow => Color::Yellow,
    }
}

fn row_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Render date and greeting header
pub fn render_header(area: Rect, buf: &mut Buffer, date: &str, greeting: &str, refreshing: bool) {
    let mut title = vec![Span::styled(
        format!("{} 💪", greeting),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if refreshing {
        title.push(Span::styled("  ⟳ refreshing", Style::default().fg(Color::Yellow)));
    }

    let lines = vec![
        Line::from(Span::styled(date.to_string(), Style::default().fg(Color::Gray))),
        Line::from(title),
    ];

    Paragraph::new(lines).render(area, buf);
}

/// Render the Overview / Sessions / Clients tab bar
pub fn render_tabs(area: Rect, buf: &mut Buffer, selected: Tab) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(idx, tab)| format!(" {} {} ", idx + 1, tab.title()))
        .collect();

    Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .render(area, buf);
}

pub fn render_loading(area: Rect, buf: &mut Buffer, text: &str) {
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Gray),
    )))
    .alignment(ratatui::layout::Alignment::Center)
    .render(area, buf);
}

/// Full-screen fetch failure with the retry hint
pub fn render_load_error(area: Rect, buf: &mut Buffer, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Unable to load data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            "[R] Try Again",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

/// Render the overview tab: progress, stats and quick actions
pub fn render_overview(area: Rect, buf: &mut Buffer, view: &TrainerView) {
    let Some(board) = view.board() else {
        return;
    };
    let active_clients = view.snapshot().map(|s| s.clients.len()).unwrap_or(0);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let block = panel(" 📅 Today's Sessions ", false);
    let inner = block.inner(rows[0]);
    block.render(rows[0], buf);

    let progress = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    Paragraph::new(Line::from(vec![
        Span::styled(
            board.progress_label(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} sessions remaining", board.remaining()),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .render(progress[0], buf);

    let ratio = if board.total() == 0 {
        0.0
    } else {
        board.completed_count() as f64 / board.total() as f64
    };
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .render(progress[1], buf);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let clients_block = panel(" 👥 Active Clients ", false);
    let clients_inner = clients_block.inner(stats[0]);
    clients_block.render(stats[0], buf);
    Paragraph::new(Span::styled(
        active_clients.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .render(clients_inner, buf);

    let rate_block = panel(" 📈 Completion Rate ", false);
    let rate_inner = rate_block.inner(stats[1]);
    rate_block.render(stats[1], buf);
    let rate = board
        .completion_rate()
        .map(|r| format!("{}%", r))
        .unwrap_or_else(|| "—".to_string());
    Paragraph::new(Span::styled(
        rate,
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))
    .render(rate_inner, buf);

    let actions_block = panel(" ⚡ Quick Actions ", true);
    let actions_inner = actions_block.inner(rows[2]);
    actions_block.render(rows[2], buf);

    let items: Vec<ListItem> = QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(idx, (label, _))| {
            let style = if idx == view.selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format!("  {}", label), style)))
        })
        .collect();

    render_scrolled_list(actions_inner, buf, items, Some(view.selected));
}

fn session_line(session: &Session, time_format: TimeFormat, highlighted: bool) -> Line<'static> {
    let mut meta = format!("{} min", session.duration_minutes);
    if let Some(location) = &session.location {
        meta = format!("📍 {} · {}", location, meta);
    }

    Line::from(vec![
        Span::styled(
            format!("{:>8}  ", format_time(&session.scheduled_time, time_format)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("{:<20}", session.client_name()), row_style(highlighted)),
        Span::styled(
            format!(" {:<10}", session.status.label()),
            Style::default().fg(status_color(session.status)),
        ),
        Span::styled(format!(" {:<12}", session.session_type), Style::default().fg(Color::White)),
        Span::styled(format!(" {}", meta), Style::default().fg(Color::DarkGray)),
    ])
}

/// Render upcoming and recently completed sessions
pub fn render_sessions(area: Rect, buf: &mut Buffer, view: &TrainerView) {
    let Some(board) = view.board() else {
        return;
    };

    // Completed list takes at most half the panel
    let completed_height = if board.completed.is_empty() {
        0
    } else {
        u16::try_from(board.completed.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height / 2)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(completed_height)])
        .split(area);

    let block = panel(" 🕐 Upcoming Sessions ", true);
    let inner = block.inner(rows[0]);
    block.render(rows[0], buf);

    if board.upcoming.is_empty() {
        Paragraph::new("No upcoming sessions today.\nPress 'A' to schedule your first session!")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
    } else {
        let items: Vec<ListItem> = board
            .upcoming
            .iter()
            .enumerate()
            .map(|(idx, session)| {
                ListItem::new(session_line(session, view.time_format(), idx == view.selected))
            })
            .collect();
        let selected = Some(view.selected).filter(|idx| *idx < board.upcoming.len());
        render_scrolled_list(inner, buf, items, selected);
    }

    if !board.completed.is_empty() {
        let block = panel(" ✓ Recently Completed ", false);
        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);

        let offset = board.upcoming.len();
        let items: Vec<ListItem> = board
            .completed
            .iter()
            .enumerate()
            .map(|(idx, session)| {
                let line = Line::from(vec![
                    Span::styled(
                        format!("{:<20}", session.client_name()),
                        row_style(offset + idx == view.selected),
                    ),
                    Span::styled(format!(" {:<12}", session.session_type), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!(
                            " Completed at {}",
                            format_time(&session.scheduled_time, view.time_format())
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled("  ✓ Done", Style::default().fg(Color::Green)),
                ]);
                ListItem::new(line)
            })
            .collect();
        let selected = view
            .selected
            .checked_sub(offset)
            .filter(|idx| *idx < board.completed.len());
        render_scrolled_list(inner, buf, items, selected);
    }
}

/// Render the search box and the filtered client list
pub fn render_clients(area: Rect, buf: &mut Buffer, view: &TrainerView) {
    let Some(snapshot) = view.snapshot() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_block = panel(" 🔍 Search ", view.search.active);
    let search_inner = search_block.inner(rows[0]);
    search_block.render(rows[0], buf);

    let search_text = if view.search.query().is_empty() && !view.search.active {
        Span::styled("Press / to search clients...", Style::default().fg(Color::DarkGray))
    } else {
        let cursor = if view.search.active { "▏" } else { "" };
        Span::styled(
            format!("{}{}", view.search.query(), cursor),
            Style::default().fg(Color::White),
        )
    };
    Paragraph::new(Line::from(search_text)).render(search_inner, buf);

    let clients = view.visible_clients();
    let title = format!(" 👥 Your Clients ({}) ", snapshot.clients.len());
    let block = panel(&title, !view.search.active);
    let inner = block.inner(rows[1]);
    block.render(rows[1], buf);

    if snapshot.clients.is_empty() {
        Paragraph::new("No clients assigned yet")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    if clients.is_empty() {
        Paragraph::new(format!("No clients match \"{}\"", view.search.query()))
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = clients
        .iter()
        .enumerate()
        .map(|(idx, client)| {
            let mut spans = vec![
                Span::styled(
                    format!(" {} ", client.avatar_glyph()),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ),
                Span::styled(format!(" {:<20}", client.display_name()), row_style(idx == view.selected)),
                Span::styled(format!(" {:<28}", client.email), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!(" Last: {}", client.last_workout_label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if client.streak > 0 {
                spans.push(Span::styled(
                    format!("  ⚡{}", client.streak),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    render_scrolled_list(inner, buf, items, Some(view.selected));
}

/// Render the saved templates list
pub fn render_templates(area: Rect, buf: &mut Buffer, list: &TemplateList) {
    let block = panel(" 🏋 Workout Templates ", true);
    let inner = block.inner(area);
    block.render(area, buf);

    if list.templates.is_empty() {
        Paragraph::new("No templates yet.\nImport one with `coach-trainer templates import <file>`.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = list
        .templates
        .iter()
        .enumerate()
        .map(|(idx, template)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<28}", template.name), row_style(idx == list.selected)),
                Span::styled(format!(" {:<12}", template.category), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(
                        " {} exercises · {}",
                        template.exercise_count(),
                        format_duration(template.duration)
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    render_scrolled_list(inner, buf, items, Some(list.selected));
}

/// "Template Not Found" with the single way out
pub fn render_template_not_found(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "Template Not Found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "The requested template could not be found.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Esc] Go Back",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .render(area, buf);
}

/// Render a loaded template: overview, exercises and information
pub fn render_template_detail(area: Rect, buf: &mut Buffer, detail: &TemplateDetail) {
    let Some(template) = detail.template() else {
        return;
    };

    let block = panel(" Template Details ", true);
    Paragraph::new(template_detail_lines(template))
        .block(block)
        .scroll((detail.scroll, 0))
        .render(area, buf);
}

/// Content of the detail panel, one entry per terminal row
pub fn template_detail_lines(template: &WorkoutTemplate) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            template.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  [{}]", template.category), Style::default().fg(Color::Cyan)),
    ])];

    if let Some(description) = &template.description {
        lines.push(Line::from(Span::styled(description.clone(), label)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Exercises: ", label),
        Span::styled(template.exercise_count().to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("   Duration: ", label),
        Span::styled(format_duration(template.duration), Style::default().fg(Color::Green)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Exercises ({})", template.exercise_count()),
        heading,
    )));

    for (idx, item) in template.exercises.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(Color::Cyan)),
            Span::styled(
                item.exercise.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", item.exercise.category), label),
        ]));
        if !item.exercise.muscle_groups.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", item.exercise.muscle_groups.join(", ")),
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (set_idx, set) in item.sets.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("    Set {}: ", set_idx + 1), label),
                Span::raw(set.describe()),
            ]));
        }
        if let Some(notes) = &item.notes {
            lines.push(Line::from(Span::styled(
                format!("    {}", notes),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Template Information", heading)));
    lines.push(Line::from(vec![
        Span::styled("Created:      ", label),
        Span::raw(template.created_at.format("%Y-%m-%d").to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Last Updated: ", label),
        Span::raw(template.updated_at.format("%Y-%m-%d").to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Visibility:   ", label),
        Span::raw(template.visibility()),
    ]));

    lines
}

/// Render the notes modal over `area`
pub fn render_notes_modal(area: Rect, buf: &mut Buffer, editor: &NoteEditor) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" 📝 {} ", editor.title()))
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = match editor.target() {
        NoteTarget::Session { title, subtitle, .. } => vec![
            Line::from(Span::styled(
                title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(subtitle.clone(), Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(Span::styled("Session Notes", Style::default().fg(Color::Cyan))),
        ],
        NoteTarget::Template { name, .. } => vec![Line::from(Span::styled(
            format!("Notes for {}", name),
            Style::default().fg(Color::Cyan),
        ))],
    };

    if editor.text().is_empty() {
        lines.push(Line::from(Span::styled(
            "Start typing...",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(editor.text().split('\n').map(|l| Line::from(l.to_string())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Ctrl+S save · Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}

pub fn render_confirm_delete(area: Rect, buf: &mut Buffer, name: &str) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete Template ")
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    block.render(area, buf);

    Paragraph::new(vec![
        Line::from(format!("Are you sure you want to delete \"{}\"?", name)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y] Delete", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("[N] Cancel", Style::default().fg(Color::Gray)),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .render(inner, buf);
}

pub fn render_alert(area: Rect, buf: &mut Buffer, alert: &Alert) {
    Clear.render(area, buf);

    let color = match alert.kind {
        AlertKind::Info => Color::Cyan,
        AlertKind::Success => Color::Green,
        AlertKind::Error => Color::Red,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", alert.title))
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    block.render(area, buf);

    Paragraph::new(vec![
        Line::from(alert.message.clone()),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::DarkGray))),
    ])
    .wrap(Wrap { trim: true })
    .render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let section = Style::default().fg(Color::Cyan);
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Dashboard:", section)),
        Line::from("  1/2/3, Tab   - Overview / Sessions / Clients"),
        Line::from("  ↑/k ↓/j      - Move selection"),
        Line::from("  Enter        - Open selected"),
        Line::from("  r            - Refresh"),
        Line::from("  a            - Schedule new session"),
        Line::from("  t            - Workout templates"),
        Line::from("  n            - Quick notes (upcoming session)"),
        Line::from("  m / c / v    - Message / call / video client"),
        Line::from("  /            - Search clients"),
        Line::from("  s            - Schedule selected client"),
        Line::from(""),
        Line::from(Span::styled("Templates:", section)),
        Line::from("  w            - Start workout"),
        Line::from("  e / u        - Edit / duplicate"),
        Line::from("  n            - Template notes"),
        Line::from("  x            - Delete (asks first)"),
        Line::from("  Esc          - Back"),
        Line::from(""),
        Line::from(Span::styled("Other:", section)),
        Line::from("  ?            - Toggle this help"),
        Line::from("  q            - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, busy: bool, last_intent: Option<&Route>) {
    let mut spans = Vec::new();

    if busy {
        spans.push(Span::styled(
            " ⏳ working ",
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        ));
    }

    if let Some(route) = last_intent {
        spans.push(Span::styled(
            format!(" → {} ", route),
            Style::default().fg(Color::Cyan).bg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        " Press ? for help ",
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    ));

    Paragraph::new(Line::from(spans)).render(area, buf);
}
