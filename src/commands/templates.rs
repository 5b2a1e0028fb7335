use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use serde::Deserialize;
use std::path::Path;

use crate::models::{format_duration, WorkoutTemplate};
use crate::storage::{Storage, TemplateStore};

/// An import file holds one template or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<WorkoutTemplate>),
    One(Box<WorkoutTemplate>),
}

impl ImportFile {
    fn into_templates(self) -> Vec<WorkoutTemplate> {
        match self {
            ImportFile::Many(templates) => templates,
            ImportFile::One(template) => vec![*template],
        }
    }
}

pub fn list_templates(store: &impl TemplateStore) -> Result<()> {
    let templates = store.list_templates()?;

    println!("Workout Templates ({})", templates.len());
    println!("────────────────────────────────");

    if templates.is_empty() {
        println!("No templates yet. Add some with: coach-trainer templates import <file>");
        return Ok(());
    }

    for template in templates {
        println!(
            "  {:<36}  {:<28} {:<12} {} exercises · {}",
            template.id.dimmed(),
            template.name,
            template.category,
            template.exercise_count(),
            format_duration(template.duration)
        );
    }

    Ok(())
}

pub fn show_template(store: &impl TemplateStore, id: &str) -> Result<()> {
    let Some(template) = store.get_template(id)? else {
        bail!("Template Not Found: {}", id);
    };

    println!("{}  [{}]", template.name.bold(), template.category.cyan());
    if let Some(description) = &template.description {
        println!("{}", description);
    }
    println!();
    println!(
        "Exercises: {}   Duration: {}",
        template.exercise_count(),
        format_duration(template.duration)
    );
    println!();

    for (idx, item) in template.exercises.iter().enumerate() {
        println!("{:>2}. {}", idx + 1, item.exercise.name.bold());
        if !item.exercise.muscle_groups.is_empty() {
            println!("    {}", item.exercise.muscle_groups.join(", ").dimmed());
        }
        for (set_idx, set) in item.sets.iter().enumerate() {
            println!("    Set {}: {}", set_idx + 1, set.describe());
        }
        if let Some(notes) = &item.notes {
            println!("    {}", notes.italic());
        }
    }

    println!();
    println!("Created:      {}", template.created_at.format("%Y-%m-%d"));
    println!("Last Updated: {}", template.updated_at.format("%Y-%m-%d"));
    println!("Visibility:   {}", template.visibility());

    if let Some(notes) = store.template_notes(id)? {
        println!();
        println!("Notes:");
        println!("{}", notes);
    }

    Ok(())
}

pub fn delete_template(storage: &Storage, id: &str, force: bool) -> Result<()> {
    let Some(template) = storage.get_template(id)? else {
        bail!("Template Not Found: {}", id);
    };

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete \"{}\"?",
                template.name
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    storage
        .delete_template(id)
        .context("Failed to delete template")?;

    println!("✓ Template deleted successfully");

    Ok(())
}

pub async fn import_templates(store: &impl TemplateStore, file: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let templates = serde_json::from_str::<ImportFile>(&contents)
        .context("File is neither a template nor a list of templates")?
        .into_templates();

    for template in &templates {
        store.save_template(template)?;
        tracing::info!("Imported template {} ({})", template.name, template.id);
    }

    println!("✓ Imported {} template(s)", templates.len());

    Ok(())
}
