use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::widgets;
use crate::api::TodaySource;
use crate::config::UiConfig;
use crate::storage::TemplateStore;
use crate::view::{
    Alert, ContactMethod, DeleteRequest, LoadState, NoteEditor, NoteSave, NoteTarget, Route, Tab,
    TemplateDetail, TemplateList, TemplatePhase, TrainerView,
};

/// A screen on the navigation stack
#[derive(Debug)]
pub enum Screen {
    Trainer(TrainerView),
    Templates(TemplateList),
    TemplateDetail(TemplateDetail),
}

impl Screen {
    fn alert_mut(&mut self) -> &mut Option<Alert> {
        match self {
            Screen::Trainer(view) => &mut view.alert,
            Screen::Templates(list) => &mut list.alert,
            Screen::TemplateDetail(detail) => &mut detail.alert,
        }
    }

    fn notes_mut(&mut self) -> Option<&mut Option<NoteEditor>> {
        match self {
            Screen::Trainer(view) => Some(&mut view.notes),
            Screen::TemplateDetail(detail) => Some(&mut detail.notes),
            Screen::Templates(_) => None,
        }
    }
}

/// Rows of the frame not used by detail content: status bar and borders
const DETAIL_FRAME_ROWS: u16 = 3;

/// Deferred work, run by the event loop after the next draw
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchToday,
    LoadTemplates,
    LoadTemplate(String),
    DeleteTemplate(DeleteRequest),
    SaveNotes(NoteSave),
}

/// Application state for the TUI dashboard
pub struct App<S, T> {
    /// Should the application quit?
    pub should_quit: bool,
    /// Show help overlay
    pub show_help: bool,
    /// Last intent for a screen this terminal app does not provide
    pub last_intent: Option<Route>,
    source: S,
    store: T,
    stack: Vec<Screen>,
    pending: Option<Effect>,
}

impl<S: TodaySource, T: TemplateStore> App<S, T> {
    /// Create the app on the trainer dashboard with the first fetch queued
    pub fn new(source: S, store: T, ui: &UiConfig) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            last_intent: None,
            source,
            store,
            stack: vec![Screen::Trainer(TrainerView::new(ui))],
            pending: Some(Effect::FetchToday),
        }
    }

    pub fn screen(&self) -> &Screen {
        // The trainer view is never popped, so the stack is never empty
        &self.stack[self.stack.len() - 1]
    }

    fn screen_mut(&mut self) -> &mut Screen {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    fn trainer_mut(&mut self) -> &mut TrainerView {
        match &mut self.stack[0] {
            Screen::Trainer(view) => view,
            _ => unreachable!("trainer view is always at the bottom of the stack"),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn pending(&self) -> Option<&Effect> {
        self.pending.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn queue(&mut self, effect: Effect) {
        if let Some(previous) = self.pending.replace(effect) {
            tracing::debug!("Replacing pending effect {:?}", previous);
        }
    }

    /// Run the queued effect to completion
    pub async fn run_pending(&mut self) -> Result<()> {
        let Some(effect) = self.pending.take() else {
            return Ok(());
        };

        tracing::debug!("Running effect {:?}", effect);

        match effect {
            Effect::FetchToday => {
                let result = self.source.fetch_today().await;
                self.trainer_mut().finish_load(result);
            }
            Effect::LoadTemplates => {
                let result = self.store.list_templates();
                if let Screen::Templates(list) = self.screen_mut() {
                    list.finish_load(result);
                }
            }
            Effect::LoadTemplate(id) => {
                let result = self.store.get_template(&id);
                if let Screen::TemplateDetail(detail) = self.screen_mut() {
                    detail.finish_load(result);
                }
            }
            Effect::DeleteTemplate(request) => {
                let result = self.store.delete_template(&request.id);
                if result.is_ok() {
                    tracing::info!("Deleted template {} ({})", request.name, request.id);
                }
                let route = match self.screen_mut() {
                    Screen::TemplateDetail(detail) => detail.finish_delete(result),
                    _ => None,
                };
                if let Some(route) = route {
                    self.navigate(route);
                }
            }
            Effect::SaveNotes(save) => {
                let result = match &save.target {
                    NoteTarget::Session { id, .. } => self.store.save_session_notes(id, &save.text),
                    NoteTarget::Template { id, .. } => self.store.save_template_notes(id, &save.text),
                };
                match self.screen_mut() {
                    Screen::Trainer(view) => view.finish_save(&save, result),
                    Screen::TemplateDetail(detail) => detail.finish_save(&save, result),
                    Screen::Templates(_) => {}
                }
            }
        }

        Ok(())
    }

    /// Tell the top screen how many terminal rows it has
    pub fn fit_viewport(&mut self, height: u16) {
        if let Screen::TemplateDetail(detail) = self.screen_mut() {
            let lines = detail
                .template()
                .map(|t| widgets::template_detail_lines(t).len())
                .unwrap_or(0);
            let visible = usize::from(height.saturating_sub(DETAIL_FRAME_ROWS));
            let max_scroll = u16::try_from(lines.saturating_sub(visible)).unwrap_or(u16::MAX);
            detail.set_max_scroll(max_scroll);
        }
    }

    /// Follow a navigation intent
    pub fn navigate(&mut self, route: Route) {
        tracing::info!("Navigate {}", route);

        match route {
            Route::Back => {
                if self.stack.len() > 1 {
                    let mut popped = self.stack.pop();
                    let carried = popped.as_mut().and_then(|s| s.alert_mut().take());
                    if carried.is_some() {
                        *self.screen_mut().alert_mut() = carried;
                    }
                    if let Screen::Templates(_) = self.screen() {
                        self.queue(Effect::LoadTemplates);
                    }
                }
            }
            Route::Templates => {
                self.stack.push(Screen::Templates(TemplateList::default()));
                self.queue(Effect::LoadTemplates);
            }
            Route::TemplateDetails(id) => {
                self.stack.push(Screen::TemplateDetail(TemplateDetail::new(id.clone())));
                self.queue(Effect::LoadTemplate(id));
            }
            other => {
                self.last_intent = Some(other);
            }
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        // Help overlay takes precedence
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return Ok(());
        }

        // Any key dismisses an alert
        if self.screen_mut().alert_mut().take().is_some() {
            return Ok(());
        }

        if self.handle_notes_key(key) {
            return Ok(());
        }

        // No other shortcut takes Ctrl
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(());
        }

        if let Screen::TemplateDetail(detail) = self.screen_mut() {
            if detail.confirming_delete {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                        if let Some(request) = detail.confirm_delete() {
                            self.queue(Effect::DeleteTemplate(request));
                        }
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => detail.cancel_delete(),
                    _ => {}
                }
                return Ok(());
            }
        }

        if let Screen::Trainer(view) = self.screen_mut() {
            if view.search.active {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => view.search.active = false,
                    KeyCode::Backspace => view.search.pop(),
                    KeyCode::Char(c) => {
                        view.search.push(c);
                        view.selected = 0;
                    }
                    _ => {}
                }
                return Ok(());
            }
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return Ok(());
            }
            _ => {}
        }

        match self.screen() {
            Screen::Trainer(_) => self.handle_trainer_key(key.code),
            Screen::Templates(_) => self.handle_templates_key(key.code),
            Screen::TemplateDetail(_) => self.handle_detail_key(key.code),
        }

        Ok(())
    }

    /// Text entry for an open notes modal; returns whether the key was used
    fn handle_notes_key(&mut self, key: KeyEvent) -> bool {
        let Some(slot) = self.screen_mut().notes_mut() else {
            return false;
        };
        let Some(editor) = slot.as_mut() else {
            return false;
        };

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let save = control && key.code == KeyCode::Char('s');

        match key.code {
            _ if control => {}
            KeyCode::Esc => *slot = None,
            KeyCode::Enter => editor.newline(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Char(c) => editor.push(c),
            _ => {}
        }

        if save {
            let request = match self.screen_mut() {
                Screen::Trainer(view) => view.save_notes(),
                Screen::TemplateDetail(detail) => detail.save_notes(),
                Screen::Templates(_) => None,
            };
            if let Some(request) = request {
                self.queue(Effect::SaveNotes(request));
            }
        }

        true
    }

    fn handle_trainer_key(&mut self, code: KeyCode) {
        let view = self.trainer_mut();

        match view.load {
            LoadState::Loading => return,
            LoadState::Failed(_) => {
                if matches!(code, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) {
                    view.begin_load();
                    self.queue(Effect::FetchToday);
                }
                return;
            }
            LoadState::Ready(_) => {}
        }

        let route = match code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                view.begin_refresh();
                self.queue(Effect::FetchToday);
                None
            }
            KeyCode::Tab | KeyCode::Right => {
                view.select_tab(view.tab.next());
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                view.select_tab(view.tab.prev());
                None
            }
            KeyCode::Char('1') => {
                view.select_tab(Tab::Overview);
                None
            }
            KeyCode::Char('2') => {
                view.select_tab(Tab::Sessions);
                None
            }
            KeyCode::Char('3') => {
                view.select_tab(Tab::Clients);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                view.move_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                view.move_down();
                None
            }
            KeyCode::Enter => view.open_selected(),
            KeyCode::Char('a') => Some(Route::NewSession { client_id: None }),
            KeyCode::Char('t') => Some(Route::Templates),
            KeyCode::Char('n') if view.tab == Tab::Sessions => {
                view.open_quick_notes();
                None
            }
            KeyCode::Char('m') => view.contact(ContactMethod::Message),
            KeyCode::Char('c') => view.contact(ContactMethod::Call),
            KeyCode::Char('v') => view.contact(ContactMethod::Video),
            KeyCode::Char('/') if view.tab == Tab::Clients => {
                view.search.active = true;
                None
            }
            KeyCode::Esc if view.tab == Tab::Clients => {
                view.search.clear();
                None
            }
            KeyCode::Char('s') if view.tab == Tab::Clients => view.schedule_selected_client(),
            _ => None,
        };

        if let Some(route) = route {
            self.navigate(route);
        }
    }

    fn handle_templates_key(&mut self, code: KeyCode) {
        let Screen::Templates(list) = self.screen_mut() else {
            return;
        };

        let route = match code {
            KeyCode::Up | KeyCode::Char('k') => {
                list.move_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                list.move_down();
                None
            }
            KeyCode::Enter => list.open_selected(),
            KeyCode::Char('n') => Some(list.create()),
            KeyCode::Char('r') => {
                self.queue(Effect::LoadTemplates);
                None
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Route::Back),
            _ => None,
        };

        if let Some(route) = route {
            self.navigate(route);
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        let back = matches!(code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b'));

        // Notes are read before borrowing the screen
        let existing_notes = match (code, self.screen()) {
            (KeyCode::Char('n'), Screen::TemplateDetail(detail)) if detail.template().is_some() => {
                match self.store.template_notes(detail.id()) {
                    Ok(notes) => notes,
                    Err(e) => {
                        tracing::warn!("Could not read template notes: {:#}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        let Screen::TemplateDetail(detail) = self.screen_mut() else {
            return;
        };

        if back {
            let route = detail.back();
            self.navigate(route);
            return;
        }

        if detail.phase != TemplatePhase::NotFound {
            let route = match code {
                KeyCode::Char('e') => detail.edit(),
                KeyCode::Char('u') => detail.duplicate(),
                KeyCode::Char('x') | KeyCode::Delete => {
                    detail.request_delete();
                    None
                }
                KeyCode::Char('w') => {
                    detail.start_workout();
                    None
                }
                KeyCode::Char('n') => {
                    detail.open_notes(existing_notes);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    detail.scroll_down();
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    detail.scroll_up();
                    None
                }
                _ => None,
            };

            if let Some(route) = route {
                self.navigate(route);
            }
        }
    }
}
