use anyhow::Context;
use clap::{Parser, Subcommand};
use sortbench::application::benchmarking::{BenchmarkReporter, MeasurementRepo};
use sortbench::application::client::BenchmarkClient;
use sortbench::application::session::ComparisonSession;
use sortbench::config::Config;
use sortbench::domain::chart_bounds::ChartBounds;
use sortbench::domain::sorting::SortStrategy;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Compare sorting strategies across input sizes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure one slider position
    Run {
        /// Slider value; the largest size is N x BOUND_MULTIPLIER (defaults to INITIAL_N)
        #[arg(short, long)]
        n: Option<u32>,

        /// Strategies to measure (comma separated: bubble,heap,merge,default)
        #[arg(short, long, default_value = "bubble,heap,merge,default")]
        strategies: String,

        /// Print measurements as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write a JSON report to REPORT_DIR
        #[arg(long)]
        report: bool,

        /// Seconds to wait for the measurements
        #[arg(long, default_value = "600")]
        timeout: u64,
    },
    /// Walk the slider from one value to another, reusing cached timings
    Sweep {
        /// First slider value (defaults to SLIDER_MIN)
        #[arg(long)]
        from: Option<u32>,

        /// Last slider value (defaults to SLIDER_MAX)
        #[arg(long)]
        to: Option<u32>,

        /// Strategies to measure (comma separated)
        #[arg(short, long, default_value = "bubble,heap,merge,default")]
        strategies: String,

        /// Seconds to wait per slider position
        #[arg(long, default_value = "600")]
        timeout: u64,
    },
    /// List the available strategies in legend order
    Strategies,
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.observability.log_level));

    // Logs go to stderr so stdout stays clean for tables and JSON.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.observability.with_target)
        .with_ansi(config.observability.ansi);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

fn start_session(config: &Config, bounds: ChartBounds) -> anyhow::Result<ComparisonSession> {
    let repo = Arc::new(MeasurementRepo::with_settings(
        config.benchmark.sample_count,
        config.benchmark.seed,
    ));
    let client = BenchmarkClient::spawn(repo).context("Failed to start benchmark worker")?;
    let session = ComparisonSession::new(client, config.scale(), bounds)
        .context("Failed to create comparison session")?;
    Ok(session)
}

fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config);

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            n,
            strategies,
            json,
            report,
            timeout,
        } => {
            let mut bounds = config.initial_bounds();
            if let Some(n) = n {
                bounds.n = n;
            }
            bounds.strategies = SortStrategy::parse_list(&strategies)?;
            let mut session = start_session(&config, bounds)?;
            info!("{}", session.caption());

            let measurements = session
                .wait(Duration::from_secs(timeout))
                .context("Benchmark did not complete")?
                .to_vec();

            if json {
                println!("{}", serde_json::to_string_pretty(&measurements)?);
            } else {
                println!("{}", session.caption());
                BenchmarkReporter::print_summary(&measurements);
            }

            if report {
                let reporter = BenchmarkReporter::new(&config.benchmark.report_dir)?;
                let path = reporter.generate_report(&measurements, &session.bounds().id())?;
                println!("Report saved to: {}", path.display());
            }
        }
        Commands::Sweep {
            from,
            to,
            strategies,
            timeout,
        } => {
            let from = from.unwrap_or(config.benchmark.slider_min);
            let to = to.unwrap_or(config.benchmark.slider_max);
            if from > to {
                anyhow::bail!("--from ({}) must not exceed --to ({})", from, to);
            }

            let bounds = ChartBounds {
                n: from,
                strategies: SortStrategy::parse_list(&strategies)?,
            };
            let mut session = start_session(&config, bounds)?;

            for n in from..=to {
                session.set_n(n)?;
                let samples = session
                    .wait(Duration::from_secs(timeout))
                    .with_context(|| format!("Benchmark for slider {} did not complete", n))?
                    .len();
                println!("{} ({} samples)", session.caption(), samples);
            }

            let stats = session.client().repo().stats();
            println!(
                "Cache: {} entries, {} computed, {} hits",
                stats.entries, stats.computed, stats.hits
            );
        }
        Commands::Strategies => {
            for strategy in SortStrategy::legend_order() {
                println!("{:<8} {}", strategy.key(), strategy.title());
            }
        }
    }

    Ok(())
}
