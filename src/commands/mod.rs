mod clients;
mod config_cmd;
mod dashboard;
mod templates;
mod today;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::storage::Storage;

pub use dashboard::DashboardCommand;
pub use today::TodayCommand;

#[derive(Parser)]
#[command(name = "coach-trainer")]
#[command(about = "Trainer dashboard for AI Coach: today's sessions, clients and templates", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "COACH_TRAINER_CONFIG")]
    config: Option<PathBuf>,

    /// Read today's data from a JSON snapshot instead of the API
    #[arg(long, global = true, env = "COACH_TRAINER_SNAPSHOT")]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive dashboard
    Dashboard(DashboardCommand),

    /// Print today's sessions
    Today(TodayCommand),

    /// List clients
    Clients {
        /// Only show clients whose name or email contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Manage workout templates
    #[command(subcommand)]
    Templates(TemplatesSubcommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum TemplatesSubcommands {
    /// List saved templates
    List,

    /// Show template details
    Show {
        /// Template ID
        id: String,
    },

    /// Delete a template
    Delete {
        /// Template ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Import templates from a JSON file (one template or an array)
    Import {
        /// JSON file to read
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Whether the command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Dashboard(_))
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();

        match self.command {
            Commands::Dashboard(cmd) => {
                let config = Config::load_or_default(config_path)?;
                cmd.execute(&config, self.snapshot).await
            }
            Commands::Today(cmd) => {
                let config = Config::load_or_default(config_path)?;
                cmd.execute(&config, self.snapshot).await
            }
            Commands::Clients { search } => {
                let config = Config::load_or_default(config_path)?;
                clients::list_clients(&config, self.snapshot, search).await
            }
            Commands::Templates(subcmd) => {
                let config = Config::load_or_default(config_path)?;
                let storage = open_storage(&config)?;
                match subcmd {
                    TemplatesSubcommands::List => templates::list_templates(&storage),
                    TemplatesSubcommands::Show { id } => templates::show_template(&storage, &id),
                    TemplatesSubcommands::Delete { id, force } => {
                        templates::delete_template(&storage, &id, force)
                    }
                    TemplatesSubcommands::Import { file } => {
                        templates::import_templates(&storage, &file).await
                    }
                }
            }
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path),
                ConfigSubcommands::Init { force } => config_cmd::init_config(config_path, force),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn open_storage(config: &Config) -> Result<Storage> {
    Storage::open(&config.storage_path()?)
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dashboard_is_interactive() {
        let cli = Cli::parse_from(["coach-trainer", "dashboard"]);
        assert!(cli.is_interactive());

        let cli = Cli::parse_from(["coach-trainer", "--snapshot", "today.json", "today"]);
        assert!(!cli.is_interactive());
        assert_eq!(cli.snapshot, Some(PathBuf::from("today.json")));
    }
}
