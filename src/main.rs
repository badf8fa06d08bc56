//! COVID-19 Dashboard
//!
//! Command-line entry point:
//! - Serve the dashboard
//! - Render a single series to the terminal
//! - List the selectable options
//! - Generate a default config file

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use covid_dashboard::config::{generate_default_config, Config, LoggingConfig};
use covid_dashboard::data::{load, parse_day_first, BaseTable, Metric, ViewMode};
use covid_dashboard::view::{render, RenderRequest, Series};
use covid_dashboard::{serve, AppState};

#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive COVID-19 data dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset path, overrides the config file
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render one series to stdout
    Render {
        /// Country name, e.g. "India"
        #[arg(long)]
        country: String,
        /// Metric key, e.g. new_cases
        #[arg(short, long, default_value = "new_cases")]
        metric: String,
        /// Start date (ISO or day-first; default: first date in the dataset)
        #[arg(long)]
        start: Option<String>,
        /// End date (ISO or day-first; default: last date in the dataset)
        #[arg(long)]
        end: Option<String>,
        /// Log-scale y-axis hint
        #[arg(long)]
        log: bool,
        /// daily or cumulative
        #[arg(short, long, default_value = "daily")]
        view: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List countries, metrics and the date range
    Options {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OptionsFormat::Table)]
        format: OptionsFormat,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OptionsFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { output } => write_default_config(output)?,

        Commands::Serve { host, port } => {
            let mut config = load_config(cli.config, cli.data)?;
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = port {
                config.api.port = port;
            }

            tracing::info!("Starting COVID-19 dashboard v{}", env!("CARGO_PKG_VERSION"));

            // Without data there is nothing to serve
            let table = load_table(&config)?;

            let state = AppState::new(table, config.dashboard, config.api);
            serve(state).await?;
        }

        Commands::Render {
            country,
            metric,
            start,
            end,
            log,
            view,
            format,
        } => {
            let config = load_config(cli.config, cli.data)?;
            let metric: Metric = metric.parse()?;
            let view: ViewMode = view.parse().map_err(anyhow::Error::msg)?;

            let table = load_table(&config)?;
            let (min, max) = table
                .date_bounds()
                .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
            let start = parse_date_arg(start.as_deref(), min)?;
            let end = parse_date_arg(end.as_deref(), max)?;

            let request = RenderRequest::new(country, metric, start, end)
                .log_scale(log)
                .view_mode(view);
            let series = render(&table, &request);

            print_series(&series, format)?;
        }

        Commands::Options { format } => {
            let config = load_config(cli.config, cli.data)?;
            let table = load_table(&config)?;
            print_options(&table, format)?;
        }
    }

    Ok(())
}

fn write_default_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Resolve config (file, environment, flags) and start logging
fn load_config(path: Option<PathBuf>, data: Option<PathBuf>) -> anyhow::Result<Config> {
    let (mut config, skipped) = match path {
        Some(path) => (Config::load_with_env(&path)?, Vec::new()),
        None => Config::load_default(),
    };
    if let Some(data) = data {
        config.data.path = data;
    }

    init_tracing(&config.logging);
    for error in skipped {
        tracing::warn!(error = %error, "Skipping config file");
    }
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("covid_dashboard={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_table(config: &Config) -> anyhow::Result<BaseTable> {
    load(&config.data.path)
        .with_context(|| format!("Failed to load dataset {:?}", config.data.path))
}

fn parse_date_arg(arg: Option<&str>, default: NaiveDate) -> anyhow::Result<NaiveDate> {
    match arg {
        None => Ok(default),
        Some(s) => parse_day_first(s).with_context(|| format!("Invalid date: {}", s)),
    }
}

fn print_series(series: &Series, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(series)?),
        OutputFormat::Csv => print!("{}", series.to_csv()?),
        OutputFormat::Table => {
            println!("{} ({}, {} axis)", series.title, series.view_mode, series.y_axis);
            println!("{}", "-".repeat(40));
            for point in &series.points {
                let value = point
                    .value
                    .map(|v| format!("{:.0}", v))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<12} {:>20}", point.date.to_string(), value);
            }
            println!();
            println!("{} points, {} with values", series.len(), series.plottable_len());
        }
    }
    Ok(())
}

fn print_options(table: &BaseTable, format: OptionsFormat) -> anyhow::Result<()> {
    if let OptionsFormat::Json = format {
        let metrics: Vec<_> = Metric::all()
            .iter()
            .map(|m| serde_json::json!({ "key": m, "label": m.label() }))
            .collect();
        let body = serde_json::json!({
            "countries": table.countries(),
            "metrics": metrics,
            "date_bounds": table.date_bounds(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{:<26} {}", "Metric", "Label");
    println!("{}", "-".repeat(44));
    for metric in Metric::all() {
        println!("{:<26} {}", metric.key(), metric.label());
    }

    println!();
    match table.date_bounds() {
        Some((start, end)) => println!("Dates: {} to {}", start, end),
        None => println!("Dates: (no rows)"),
    }

    println!();
    println!("Countries ({}):", table.countries().len());
    for country in table.countries() {
        println!("  {}", country);
    }

    Ok(())
}
