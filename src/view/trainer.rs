use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};

use crate::config::{TimeFormat, UiConfig};
use crate::models::{Client, Session, TodaySnapshot};

use super::alert::Alert;
use super::clients::ClientSearch;
use super::navigation::{ContactAction, ContactMethod, Route, TemplateSeed};
use super::notes::{NoteEditor, NoteSave};
use super::sessions::SessionBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Sessions,
    Clients,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Sessions, Tab::Clients];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Sessions => "Sessions",
            Tab::Clients => "Clients",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Overview => 0,
            Tab::Sessions => 1,
            Tab::Clients => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Fetch lifecycle of the today snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    /// Terminal state; the only way out is a manual retry
    Failed(String),
    Ready(TodaySnapshot),
}

/// Overview shortcuts, in display order
pub const QUICK_ACTIONS: [(&str, QuickAction); 6] = [
    ("Schedule New", QuickAction::NewSession),
    ("Create Template", QuickAction::CreateTemplate),
    ("View Templates", QuickAction::ViewTemplates),
    ("Create Plan", QuickAction::CreatePlan),
    ("View Plans", QuickAction::ViewPlans),
    ("Messages", QuickAction::Messages),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    NewSession,
    CreateTemplate,
    ViewTemplates,
    CreatePlan,
    ViewPlans,
    Messages,
}

impl QuickAction {
    pub fn route(&self) -> Route {
        match self {
            QuickAction::NewSession => Route::NewSession { client_id: None },
            QuickAction::CreateTemplate => Route::CreateTemplate(TemplateSeed::Blank),
            QuickAction::ViewTemplates => Route::Templates,
            QuickAction::CreatePlan => Route::CreatePlan,
            QuickAction::ViewPlans => Route::WorkoutPlans,
            QuickAction::Messages => Route::TrainerMessages,
        }
    }
}

/// Screen state for the trainer dashboard
#[derive(Debug)]
pub struct TrainerView {
    pub tab: Tab,
    pub load: LoadState,
    /// A refresh is running over already loaded data
    pub refreshing: bool,
    /// Row index within the current tab's list
    pub selected: usize,
    pub search: ClientSearch,
    pub notes: Option<NoteEditor>,
    pub alert: Option<Alert>,
    time_format: TimeFormat,
    sort_by_time: bool,
}

impl TrainerView {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            tab: Tab::Overview,
            load: LoadState::Loading,
            refreshing: false,
            selected: 0,
            search: ClientSearch::default(),
            notes: None,
            alert: None,
            time_format: ui.time_format,
            sort_by_time: ui.sort_sessions_by_time,
        }
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected = 0;
            self.search.active = false;
        }
    }

    /// Full-screen load, used at startup and for retry after a failure
    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
        self.refreshing = false;
    }

    /// Re-fetch; keeps showing current data while it runs
    pub fn begin_refresh(&mut self) {
        match self.load {
            LoadState::Ready(_) => self.refreshing = true,
            _ => self.begin_load(),
        }
    }

    pub fn finish_load(&mut self, result: Result<TodaySnapshot>) {
        self.refreshing = false;
        self.load = match result {
            Ok(snapshot) => LoadState::Ready(snapshot),
            Err(e) => {
                tracing::error!("Error loading trainer data: {:#}", e);
                LoadState::Failed(e.to_string())
            }
        };
        self.clamp_selection();
    }

    pub fn snapshot(&self) -> Option<&TodaySnapshot> {
        match &self.load {
            LoadState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn board(&self) -> Option<SessionBoard<'_>> {
        self.snapshot().map(|s| {
            if self.sort_by_time {
                SessionBoard::sorted_by_time(&s.training_sessions)
            } else {
                SessionBoard::new(&s.training_sessions)
            }
        })
    }

    /// Client list after the search query
    pub fn visible_clients(&self) -> Vec<&Client> {
        self.snapshot()
            .map(|s| self.search.apply(&s.clients))
            .unwrap_or_default()
    }

    /// Rows of the sessions tab: upcoming first, then completed
    pub fn session_rows(&self) -> Vec<&Session> {
        self.board()
            .map(|b| b.upcoming.into_iter().chain(b.completed).collect())
            .unwrap_or_default()
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Overview => QUICK_ACTIONS.len(),
            Tab::Sessions => self.session_rows().len(),
            Tab::Clients => self.visible_clients().len(),
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.row_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.row_count() {
            self.selected += 1;
        }
    }

    pub fn selected_session(&self) -> Option<&Session> {
        if self.tab != Tab::Sessions {
            return None;
        }
        self.session_rows().get(self.selected).copied()
    }

    pub fn selected_client(&self) -> Option<&Client> {
        if self.tab != Tab::Clients {
            return None;
        }
        self.visible_clients().get(self.selected).copied()
    }

    /// Route for the highlighted row
    pub fn open_selected(&self) -> Option<Route> {
        match self.tab {
            Tab::Overview => QUICK_ACTIONS.get(self.selected).map(|(_, a)| a.route()),
            Tab::Sessions => self.selected_session().map(|s| Route::Session(s.id.clone())),
            Tab::Clients => self.selected_client().map(|c| Route::ClientDetail(c.id.clone())),
        }
    }

    /// Open quick notes for the highlighted upcoming session
    pub fn open_quick_notes(&mut self) -> bool {
        match self.selected_session().filter(|s| s.is_upcoming()) {
            Some(session) => {
                let id = session.id.clone();
                self.open_quick_notes_for(&id)
            }
            None => false,
        }
    }

    /// Open quick notes for a session; the buffer always starts empty
    pub fn open_quick_notes_for(&mut self, session_id: &str) -> bool {
        let editor = self
            .snapshot()
            .and_then(|s| s.session(session_id))
            .map(|session| NoteEditor::for_session(session, self.time_format));

        match editor {
            Some(editor) => {
                self.notes = Some(editor);
                true
            }
            None => false,
        }
    }

    pub fn close_notes(&mut self) {
        self.notes = None;
    }

    /// Close the modal and hand back the save request.
    /// Blank notes keep the modal open and yield nothing.
    pub fn save_notes(&mut self) -> Option<NoteSave> {
        let request = self.notes.as_ref()?.save_request()?;
        self.notes = None;
        Some(request)
    }

    pub fn finish_save(&mut self, save: &NoteSave, result: Result<()>) {
        self.alert = Some(match result {
            Ok(()) => Alert::success(save.success_message()),
            Err(e) => {
                tracing::error!("Error saving notes: {:#}", e);
                Alert::error("Failed to save notes")
            }
        });
    }

    /// Contact the client behind the highlighted row. Messages navigate;
    /// calls and video calls raise an alert.
    pub fn contact(&mut self, method: ContactMethod) -> Option<Route> {
        let (id, name) = match self.tab {
            Tab::Sessions => {
                let client = self.selected_session()?.client.as_ref()?;
                (client.id.clone(), client.full_name.clone())
            }
            Tab::Clients => {
                let client = self.selected_client()?;
                (client.id.clone(), client.display_name().to_string())
            }
            Tab::Overview => return None,
        };

        match method.dispatch(&id, &name) {
            ContactAction::Navigate(route) => Some(route),
            ContactAction::Call { client_name } => {
                self.alert = Some(Alert::info("Call Client", format!("Calling {}...", client_name)));
                None
            }
            ContactAction::VideoCall { client_name } => {
                self.alert = Some(Alert::info(
                    "Video Call",
                    format!("Starting video call with {}...", client_name),
                ));
                None
            }
        }
    }

    /// New session prefilled with the highlighted client
    pub fn schedule_selected_client(&self) -> Option<Route> {
        self.selected_client().map(|c| Route::NewSession {
            client_id: Some(c.id.clone()),
        })
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn greeting(&self, now: NaiveDateTime) -> String {
        let name = self.snapshot().map(|s| s.first_name()).unwrap_or("Trainer");
        format!("{}, {}!", salutation(now.hour()), name)
    }
}

fn salutation(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        _ => "Good Evening",
    }
}

/// Header date, e.g. `SUNDAY, OCT 18`
pub fn date_header(now: NaiveDateTime) -> String {
    now.format("%A, %b %-d").to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRef, SessionStatus, TrainerProfile};
    use chrono::NaiveDate;

    fn session(id: &str, status: SessionStatus, client: &str) -> Session {
        Session {
            id: id.to_string(),
            scheduled_time: "10:00".to_string(),
            duration_minutes: 60,
            status,
            session_type: "Strength".to_string(),
            location: Some("Studio A".to_string()),
            client: Some(ClientRef {
                id: format!("c-{}", client),
                full_name: client.to_string(),
            }),
        }
    }

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            avatar: None,
            last_workout: None,
            streak: 2,
        }
    }

    fn ready_view() -> TrainerView {
        let mut view = TrainerView::new(&UiConfig::default());
        view.finish_load(Ok(TodaySnapshot {
            profile: Some(TrainerProfile {
                id: "p1".to_string(),
                full_name: "Marta Gomez".to_string(),
            }),
            training_sessions: vec![
                session("s1", SessionStatus::Scheduled, "Ana"),
                session("s2", SessionStatus::Completed, "Beto"),
                session("s3", SessionStatus::Scheduled, "Caro"),
            ],
            clients: vec![client("c1", "Ana"), client("c2", "Beto")],
        }));
        view
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Overview.next(), Tab::Sessions);
        assert_eq!(Tab::Clients.next(), Tab::Overview);
        assert_eq!(Tab::Overview.prev(), Tab::Clients);
    }

    #[test]
    fn test_failed_load_is_terminal_until_retry() {
        let mut view = TrainerView::new(&UiConfig::default());
        view.finish_load(Err(anyhow::anyhow!("connection refused")));
        assert_eq!(view.load, LoadState::Failed("connection refused".to_string()));
        assert!(view.board().is_none());

        view.begin_refresh();
        assert_eq!(view.load, LoadState::Loading);
    }

    #[test]
    fn test_refresh_keeps_data_visible() {
        let mut view = ready_view();
        view.begin_refresh();
        assert!(view.refreshing);
        assert!(view.snapshot().is_some());
    }

    #[test]
    fn test_session_rows_upcoming_then_completed() {
        let mut view = ready_view();
        view.select_tab(Tab::Sessions);
        let ids: Vec<_> = view.session_rows().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3", "s2"]);

        view.move_down();
        assert_eq!(view.open_selected(), Some(Route::Session("s3".to_string())));
    }

    #[test]
    fn test_quick_notes_reset_between_sessions() {
        let mut view = ready_view();

        assert!(view.open_quick_notes_for("s1"));
        view.notes.as_mut().unwrap().set_text("Ana: watch left knee");
        view.close_notes();

        assert!(view.open_quick_notes_for("s3"));
        assert_eq!(view.notes.as_ref().unwrap().text(), "");
    }

    #[test]
    fn test_quick_notes_only_for_upcoming_rows() {
        let mut view = ready_view();
        view.select_tab(Tab::Sessions);
        view.selected = 2; // completed s2
        assert!(!view.open_quick_notes());
        assert!(view.notes.is_none());

        view.selected = 0;
        assert!(view.open_quick_notes());
    }

    #[test]
    fn test_save_notes_closes_modal() {
        let mut view = ready_view();
        view.open_quick_notes_for("s1");

        assert!(view.save_notes().is_none());
        assert!(view.notes.is_some());

        view.notes.as_mut().unwrap().set_text("Great session");
        let save = view.save_notes().unwrap();
        assert!(view.notes.is_none());

        view.finish_save(&save, Err(anyhow::anyhow!("disk full")));
        assert_eq!(view.alert, Some(Alert::error("Failed to save notes")));
    }

    #[test]
    fn test_client_search_drives_selection() {
        let mut view = ready_view();
        view.select_tab(Tab::Clients);
        view.search.set_query("beto");

        assert_eq!(view.visible_clients().len(), 1);
        assert_eq!(view.open_selected(), Some(Route::ClientDetail("c2".to_string())));
        assert_eq!(
            view.schedule_selected_client(),
            Some(Route::NewSession {
                client_id: Some("c2".to_string())
            })
        );
    }

    #[test]
    fn test_contact_methods() {
        let mut view = ready_view();
        view.select_tab(Tab::Clients);

        assert_eq!(view.contact(ContactMethod::Message), Some(Route::Chat("c1".to_string())));
        assert!(view.alert.is_none());

        assert_eq!(view.contact(ContactMethod::Call), None);
        assert_eq!(view.alert.as_ref().unwrap().message, "Calling Ana...");
    }

    #[test]
    fn test_greeting_and_date() {
        let view = ready_view();
        let evening = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        assert_eq!(view.greeting(evening), "Good Evening, Marta!");
        assert_eq!(date_header(evening), "SUNDAY, OCT 18");
    }

    #[test]
    fn test_selection_clamped_after_reload() {
        let mut view = ready_view();
        view.select_tab(Tab::Sessions);
        view.selected = 2;

        view.finish_load(Ok(TodaySnapshot::default()));
        assert_eq!(view.selected, 0);
        assert!(view.open_selected().is_none());
    }
}
