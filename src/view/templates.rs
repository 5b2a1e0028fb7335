use anyhow::Result;

use crate::models::WorkoutTemplate;

use super::alert::Alert;
use super::navigation::{Route, TemplateSeed};

/// Screen state for the saved templates list
#[derive(Debug, Default)]
pub struct TemplateList {
    pub templates: Vec<WorkoutTemplate>,
    pub selected: usize,
    pub alert: Option<Alert>,
}

impl TemplateList {
    pub fn finish_load(&mut self, result: Result<Vec<WorkoutTemplate>>) {
        match result {
            Ok(templates) => self.templates = templates,
            Err(e) => {
                tracing::error!("Error loading templates: {:#}", e);
                self.templates.clear();
                self.alert = Some(Alert::error("Failed to load templates"));
            }
        }
        if self.selected >= self.templates.len() {
            self.selected = self.templates.len().saturating_sub(1);
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.templates.len() {
            self.selected += 1;
        }
    }

    pub fn open_selected(&self) -> Option<Route> {
        self.templates
            .get(self.selected)
            .map(|t| Route::TemplateDetails(t.id.clone()))
    }

    pub fn create(&self) -> Route {
        Route::CreateTemplate(TemplateSeed::Blank)
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
