use anyhow::Result;
use std::path::Path;

use crate::config::Config;

pub fn show_config(path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(path)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration");
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);
    println!("Database: {}", config.storage_path()?.display());

    Ok(())
}

pub fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let config_file = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_file()?,
    };

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(&config_file)?;

    println!("✓ Configuration initialized at: {}", config_file.display());
    println!();
    println!("Set api.token to authenticate against the coaching API.");

    Ok(())
}
