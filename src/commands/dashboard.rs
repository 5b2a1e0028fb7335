use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::open_storage;
use crate::api::DataSource;
use crate::config::Config;
use crate::ui::{App, Dashboard};

#[derive(Args)]
pub struct DashboardCommand {}

impl DashboardCommand {
    pub async fn execute(self, config: &Config, snapshot: Option<PathBuf>) -> Result<()> {
        let source = DataSource::from_config(config, snapshot)?;
        let storage = open_storage(config)?;

        tracing::info!("Launching dashboard with data from {}", source.describe());

        let app = App::new(source, storage, &config.ui);
        let mut dashboard = Dashboard::new(app)?;
        let result = dashboard.run().await;
        dashboard.cleanup()?;

        result
    }
}
