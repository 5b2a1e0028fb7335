use anyhow::Result;

use crate::models::WorkoutTemplate;

use super::alert::Alert;
use super::navigation::{Route, TemplateSeed};
use super::notes::{NoteEditor, NoteSave};

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePhase {
    Loading,
    /// Missing or failed to load; only back-navigation is offered
    NotFound,
    Loaded(WorkoutTemplate),
}

/// Actions offered by the detail screen in its current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Back,
    Edit,
    Duplicate,
    Delete,
    StartWorkout,
    Notes,
}

/// Confirmed request to delete a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: String,
    pub name: String,
}

/// Screen state for a single workout template
#[derive(Debug)]
pub struct TemplateDetail {
    id: String,
    pub phase: TemplatePhase,
    /// Set once the trainer asked to delete and before they answered
    pub confirming_delete: bool,
    pub notes: Option<NoteEditor>,
    pub alert: Option<Alert>,
    pub scroll: u16,
    /// Last scroll offset that still fills the viewport
    max_scroll: u16,
}

impl TemplateDetail {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phase: TemplatePhase::Loading,
            confirming_delete: false,
            notes: None,
            alert: None,
            scroll: 0,
            max_scroll: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// A lookup error renders the same way as a missing template
    pub fn finish_load(&mut self, result: Result<Option<WorkoutTemplate>>) {
        self.phase = match result {
            Ok(Some(template)) => TemplatePhase::Loaded(template),
            Ok(None) => {
                tracing::warn!("Template {} not found", self.id);
                TemplatePhase::NotFound
            }
            Err(e) => {
                tracing::error!("Error loading template details: {:#}", e);
                TemplatePhase::NotFound
            }
        };
    }

    pub fn template(&self) -> Option<&WorkoutTemplate> {
        match &self.phase {
            TemplatePhase::Loaded(template) => Some(template),
            _ => None,
        }
    }

    pub fn actions(&self) -> Vec<DetailAction> {
        match self.phase {
            TemplatePhase::Loaded(_) => vec![
                DetailAction::Back,
                DetailAction::StartWorkout,
                DetailAction::Edit,
                DetailAction::Duplicate,
                DetailAction::Notes,
                DetailAction::Delete,
            ],
            TemplatePhase::Loading | TemplatePhase::NotFound => vec![DetailAction::Back],
        }
    }

    pub fn back(&self) -> Route {
        Route::Back
    }

    pub fn edit(&self) -> Option<Route> {
        self.template()
            .map(|t| Route::CreateTemplate(TemplateSeed::Edit(t.id.clone())))
    }

    pub fn duplicate(&self) -> Option<Route> {
        self.template()
            .map(|t| Route::CreateTemplate(TemplateSeed::Duplicate(t.id.clone())))
    }

    pub fn start_workout(&mut self) {
        if let Some(name) = self.template().map(|t| t.name.clone()) {
            self.alert = Some(Alert::info(
                "Start Workout",
                format!("Starting workout with {} template", name),
            ));
        }
    }

    /// First stage of deletion. Ignored unless a template is loaded.
    pub fn request_delete(&mut self) -> bool {
        self.confirming_delete = self.template().is_some();
        self.confirming_delete
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Second stage: turns a pending confirmation into a request
    pub fn confirm_delete(&mut self) -> Option<DeleteRequest> {
        if !self.confirming_delete {
            return None;
        }
        self.confirming_delete = false;

        self.template().map(|t| DeleteRequest {
            id: t.id.clone(),
            name: t.name.clone(),
        })
    }

    /// On success, navigate back. On failure, raise an alert and keep
    /// everything else as it was.
    pub fn finish_delete(&mut self, result: Result<()>) -> Option<Route> {
        match result {
            Ok(()) => {
                self.alert = Some(Alert::success("Template deleted successfully"));
                Some(Route::Back)
            }
            Err(e) => {
                tracing::error!("Error deleting template: {:#}", e);
                self.alert = Some(Alert::error("Failed to delete template"));
                None
            }
        }
    }

    pub fn open_notes(&mut self, existing: Option<String>) -> bool {
        let editor = self
            .template()
            .map(|template| NoteEditor::for_template(template, existing));

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

    pub fn save_notes(&mut self) -> Option<NoteSave> {
        let request = self.notes.as_ref()?.save_request()?;
        self.notes = None;
        Some(request)
    }

    pub fn finish_save(&mut self, save: &NoteSave, result: Result<()>) {
        self.alert = Some(match result {
            Ok(()) => Alert::success(save.success_message()),
            Err(e) => {
                tracing::error!("Error saving template notes: {:#}", e);
                Alert::error("Failed to save notes")
            }
        });
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn scroll_down(&mut self) {
        if self.scroll < self.max_scroll {
            self.scroll += 1;
        }
    }

    /// Bound scrolling to content that does not fit on screen
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
