use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fanmetrics::core::log::init_logging;
use fanmetrics::core::{GeoMetric, Granularity};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional dataset file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print the report as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fanmetrics::AppCommand {
    fn from(cmd: Commands) -> fanmetrics::AppCommand {
        match cmd {
            Commands::Summary => fanmetrics::AppCommand::Summary,
            Commands::Revenue => fanmetrics::AppCommand::Revenue,
            Commands::Fans => fanmetrics::AppCommand::Fans,
            Commands::Geo { metric, limit } => fanmetrics::AppCommand::Geo { metric, limit },
            Commands::Trend { granularity } => fanmetrics::AppCommand::Trend { granularity },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an example dataset at the default location
    Setup,
    /// Display the dashboard overview
    Summary,
    /// Display monthly fan spend by tier and revenue concentration
    Revenue,
    /// Display conversion, churn, retention and growth rates
    Fans,
    /// Display regional totals and top countries
    Geo {
        /// Rank countries by `fans` or `revenue`
        #[arg(short, long, default_value = "fans")]
        metric: GeoMetric,

        /// Number of countries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Display bucketed revenue with a moving average
    Trend {
        /// Bucket size: hour, day, week, month, quarter or year
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fanmetrics::cli::setup::setup(),
        Some(cmd) => fanmetrics::run_command(cmd.into(), cli.config_path.as_deref(), cli.json),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
