// Local storage module using sled embedded database

use anyhow::{Context, Result};
use sled::Db;
use std::path::Path;

use crate::models::WorkoutTemplate;

const TEMPLATES_TREE: &str = "templates";
const TEMPLATE_NOTES_TREE: &str = "template_notes";
const SESSION_NOTES_TREE: &str = "session_notes";

/// Persisted workout templates and notes
pub trait TemplateStore {
    fn get_template(&self, id: &str) -> Result<Option<WorkoutTemplate>>;

    /// Fails when no template has this id
    fn delete_template(&self, id: &str) -> Result<()>;

    fn save_template(&self, template: &WorkoutTemplate) -> Result<()>;

    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>>;

    fn template_notes(&self, template_id: &str) -> Result<Option<String>>;

    fn save_template_notes(&self, template_id: &str, notes: &str) -> Result<()>;

    fn save_session_notes(&self, session_id: &str, notes: &str) -> Result<()>;
}

/// Storage manager for local embedded database
pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open (or create) the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        tracing::info!("Opening sled database at {:?}", path);

        let db = sled::open(path).context("Failed to open sled database")?;

        Ok(Self { db })
    }

    fn tree(&self, name: &str) -> Result<sled::Tree> {
        self.db
            .open_tree(name)
            .with_context(|| format!("Failed to open {} tree", name))
    }

    fn put_text(&self, tree: &str, key: &str, text: &str) -> Result<()> {
        self.tree(tree)?
            .insert(key.as_bytes(), text.as_bytes())
            .with_context(|| format!("Failed to write {} entry", tree))?;

        self.db.flush().context("Failed to flush database")?;
        Ok(())
    }

    fn get_text(&self, tree: &str, key: &str) -> Result<Option<String>> {
        match self
            .tree(tree)?
            .get(key.as_bytes())
            .with_context(|| format!("Failed to read {} entry", tree))?
        {
            Some(value) => {
                let text = String::from_utf8(value.to_vec())
                    .with_context(|| format!("Corrupt {} entry for {}", tree, key))?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    /// Notes recorded for a session, if any
    pub fn session_notes(&self, session_id: &str) -> Result<Option<String>> {
        self.get_text(SESSION_NOTES_TREE, session_id)
    }
}

impl TemplateStore for Storage {
    fn get_template(&self, id: &str) -> Result<Option<WorkoutTemplate>> {
        let tree = self.tree(TEMPLATES_TREE)?;

        if let Some(value) = tree.get(id.as_bytes()).context("Failed to get template")? {
            let template: WorkoutTemplate =
                bincode::deserialize(&value).context("Failed to deserialize template")?;
            Ok(Some(template))
        } else {
            Ok(None)
        }
    }

    fn delete_template(&self, id: &str) -> Result<()> {
        let tree = self.tree(TEMPLATES_TREE)?;

        let removed = tree
            .remove(id.as_bytes())
            .context("Failed to delete template")?
            .is_some();

        if !removed {
            return Err(anyhow::anyhow!("Template {} not found", id));
        }

        self.tree(TEMPLATE_NOTES_TREE)?
            .remove(id.as_bytes())
            .context("Failed to delete template notes")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Deleted template {}", id);
        Ok(())
    }

    fn save_template(&self, template: &WorkoutTemplate) -> Result<()> {
        let tree = self.tree(TEMPLATES_TREE)?;

        let value = bincode::serialize(template).context("Failed to serialize template")?;

        tree.insert(template.id.as_bytes(), value)
            .context("Failed to insert template")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved template {}", template.id);
        Ok(())
    }

    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>> {
        let tree = self.tree(TEMPLATES_TREE)?;

        let mut templates = Vec::new();

        for item in tree.iter() {
            let (_key, value) = item.context("Failed to iterate templates")?;
            let template: WorkoutTemplate =
                bincode::deserialize(&value).context("Failed to deserialize template")?;
            templates.push(template);
        }

        templates.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(templates)
    }

    fn template_notes(&self, template_id: &str) -> Result<Option<String>> {
        self.get_text(TEMPLATE_NOTES_TREE, template_id)
    }

    /// Blank notes remove what was stored
    fn save_template_notes(&self, template_id: &str, notes: &str) -> Result<()> {
        if notes.trim().is_empty() {
            self.tree(TEMPLATE_NOTES_TREE)?
                .remove(template_id.as_bytes())
                .context("Failed to clear template notes")?;
            self.db.flush().context("Failed to flush database")?;

            tracing::debug!("Cleared notes for template {}", template_id);
            return Ok(());
        }

        self.put_text(TEMPLATE_NOTES_TREE, template_id, notes)?;
        tracing::debug!("Saved notes for template {}", template_id);
        Ok(())
    }

    fn save_session_notes(&self, session_id: &str, notes: &str) -> Result<()> {
        self.put_text(SESSION_NOTES_TREE, session_id, notes)?;
        tracing::debug!("Saved notes for session {}", session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, TargetSet, TemplateExercise};
    use tempfile::tempdir;

    fn create_test_storage() -> Result<(tempfile::TempDir, Storage)> {
        let dir = tempdir()?;
        let storage = Storage::open(dir.path())?;
        Ok((dir, storage))
    }

    fn exercise(id: &str, name: &str, reps: u32) -> TemplateExercise {
        TemplateExercise {
            id: id.to_string(),
            exercise: Exercise {
                id: format!("ex-{}", id),
                name: name.to_string(),
                category: "Strength".to_string(),
                muscle_groups: vec!["Legs".to_string()],
            },
            sets: vec![
                TargetSet {
                    reps: Some(reps),
                    ..Default::default()
                },
                TargetSet {
                    reps: Some(reps - 2),
                    weight: Some(80.0),
                    ..Default::default()
                },
            ],
            notes: None,
        }
    }

    #[test]
    fn test_save_and_get_template_preserves_order() -> Result<()> {
        let (_dir, storage) = create_test_storage()?;

        let mut template = WorkoutTemplate::new("Leg Day".to_string(), "Strength".to_string(), 55);
        template.exercises = vec![
            exercise("a", "Squat", 10),
            exercise("b", "Lunge", 12),
            exercise("c", "Deadlift", 6),
        ];

        storage.save_template(&template)?;

        let retrieved = storage.get_template(&template.id)?.unwrap();
        assert_eq!(retrieved, template);
        let names: Vec<_> = retrieved.exercises.iter().map(|e| e.exercise.name.as_str()).collect();
        assert_eq!(names, vec!["Squat", "Lunge", "Deadlift"]);
        assert_eq!(retrieved.exercises[0].sets[1].reps, Some(8));

        Ok(())
    }

    #[test]
    fn test_get_missing_template() -> Result<()> {
        let (_dir, storage) = create_test_storage()?;
        assert!(storage.get_template("t1")?.is_none());
        Ok(())
    }

    #[test]
    fn test_delete_template() -> Result<()> {
        let (_dir, storage) = create_test_storage()?;

        let template = WorkoutTemplate::new("Core".to_string(), "Mobility".to_string(), 20);
        storage.save_template(&template)?;
        storage.save_template_notes(&template.id, "keep it slow")?;

        storage.delete_template(&template.id)?;
        assert!(storage.get_template(&template.id)?.is_none());
        assert!(storage.template_notes(&template.id)?.is_none());

        // Second delete reports the missing template
        assert!(storage.delete_template(&template.id).is_err());

        Ok(())
    }

    #[test]
    fn test_list_templates_sorted_by_name() -> Result<()> {
        let (_dir, storage) = create_test_storage()?;

        storage.save_template(&WorkoutTemplate::new("push".to_string(), "Strength".to_string(), 40))?;
        storage.save_template(&WorkoutTemplate::new("Cardio Blast".to_string(), "Cardio".to_string(), 30))?;

        let names: Vec<_> = storage.list_templates()?.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Cardio Blast", "push"]);

        Ok(())
    }

    #[test]
    fn test_notes_roundtrip() -> Result<()> {
        let (_dir, storage) = create_test_storage()?;

        assert!(storage.template_notes("t1")?.is_none());
        storage.save_template_notes("t1", "Swap lunges for step-ups")?;
        assert_eq!(storage.template_notes("t1")?.as_deref(), Some("Swap lunges for step-ups"));

        storage.save_session_notes("s1", "Knee felt fine")?;
        assert_eq!(storage.session_notes("s1")?.as_deref(), Some("Knee felt fine"));

        Ok(())
    }
}
