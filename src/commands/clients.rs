use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::today::fetch_with_spinner;
use crate::api::DataSource;
use crate::config::Config;
use crate::view::filter_clients;

pub async fn list_clients(
    config: &Config,
    snapshot: Option<PathBuf>,
    search: Option<String>,
) -> Result<()> {
    let source = DataSource::from_config(config, snapshot)?;
    let snapshot = fetch_with_spinner(&source).await?;

    let query = search.unwrap_or_default();
    let clients = filter_clients(&snapshot.clients, &query);

    println!("Your Clients ({})", snapshot.clients.len());
    println!("────────────────────────────────");

    if snapshot.clients.is_empty() {
        println!("No clients assigned yet");
        return Ok(());
    }

    if clients.is_empty() {
        println!("No clients match \"{}\"", query.trim());
        return Ok(());
    }

    for client in clients {
        let streak = if client.streak > 0 {
            format!("⚡{}", client.streak).yellow().to_string()
        } else {
            String::new()
        };

        println!(
            "  {:<3} {:<20} {:<28} Last: {:<12} {}",
            client.avatar_glyph(),
            client.display_name(),
            client.email,
            client.last_workout_label(),
            streak
        );
    }

    Ok(())
}
