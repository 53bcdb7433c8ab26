use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::{chart, details, labels, layout, util};
use tl_cli::{ChartArgs, Cli, Commands, Config, LabelsArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut options = config.layout_options();
    if let Some(step) = cli.step {
        options.step_minutes = step;
    }

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Chart(ChartArgs {
            file,
            width,
            hide_participants,
        })) => {
            let timeline = util::load_layout(file, &options)?;
            chart::run(
                &mut stdout,
                &timeline,
                width.unwrap_or(config.chart_width),
                !hide_participants,
            )?;
        }
        Some(Commands::Labels(LabelsArgs { file, start, end })) => {
            let (start, end) = match (file, start, end) {
                (Some(file), _, _) => {
                    let session = util::load_session(file)?;
                    (session.window.start(), session.window.end())
                }
                (None, Some(start), Some(end)) => (
                    util::parse_timestamp(start, "start")?,
                    util::parse_timestamp(end, "end")?,
                ),
                _ => anyhow::bail!("either a session file or --start and --end are required"),
            };
            labels::run(&mut stdout, start, end, &options)?;
        }
        Some(Commands::Details { file, participant }) => {
            let timeline = util::load_layout(file, &options)?;
            details::run(&mut stdout, &timeline, participant, options.offset)?;
        }
        Some(Commands::Layout { file }) => {
            let timeline = util::load_layout(file, &options)?;
            layout::run(&mut stdout, &timeline)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
