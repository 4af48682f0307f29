pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::{DashboardSnapshot, GeoMetric, Granularity};
use anyhow::Result;
use tracing::{debug, info};

/// Reports that can be produced from a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Summary,
    Revenue,
    Fans,
    Geo {
        metric: GeoMetric,
        limit: Option<usize>,
    },
    Trend {
        granularity: Option<Granularity>,
    },
}

/// Renders the requested report for a loaded dataset as text or JSON.
pub fn render_command(command: AppCommand, config: &AppConfig, json: bool) -> Result<String> {
    match command {
        AppCommand::Summary => cli::summary::render(&DashboardSnapshot::compute(config), json),
        AppCommand::Revenue => {
            cli::revenue::render(config, &DashboardSnapshot::compute(config), json)
        }
        AppCommand::Fans => cli::fans::render(config, &DashboardSnapshot::compute(config), json),
        AppCommand::Geo { metric, limit } => cli::geo::render(config, metric, limit, json),
        AppCommand::Trend { granularity } => cli::trend::render(config, granularity, json),
    }
}

pub fn run_command(command: AppCommand, config_path: Option<&str>, json: bool) -> Result<()> {
    info!("fanmetrics starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let output = render_command(command, &config, json)?;
    println!("{output}");
    Ok(())
}
