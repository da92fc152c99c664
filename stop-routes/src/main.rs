use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use stop_routes::config::Config;
use stop_routes::export::{self, ExportError};
use stop_routes::fetch::{self, FetchConfig, FetchError, PatternsClient};
use stop_routes::lines::{self, LinesError};
use stop_routes::pipeline::{self, PipelineError};

/// Correlate transit stops with the lines serving them.
#[derive(Parser)]
#[command(name = "stop-routes", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Correlate stops with pattern files and write the map and CSV
    Correlate {
        /// NeTEx stop dataset
        #[arg(long, default_value = "stops.xml")]
        stops: PathBuf,

        /// Directory of per-line pattern files
        #[arg(long, default_value = "Routes")]
        routes: PathBuf,

        /// Map page output
        #[arg(long, default_value = "stops_routes_map.html")]
        map: PathBuf,

        /// CSV output
        #[arg(long, default_value = "stops_routes_data.csv")]
        csv: PathBuf,

        /// Skip writing the map page
        #[arg(long)]
        no_map: bool,

        /// Skip writing the CSV
        #[arg(long)]
        no_csv: bool,

        /// Number of diagnostics to print after the summary
        #[arg(long, default_value_t = 10)]
        show_diagnostics: usize,
    },

    /// Fetch one pattern file per line from the transit-patterns API
    Fetch {
        /// NeTEx line-definition document
        #[arg(long, default_value = "lines.xml")]
        lines: PathBuf,

        /// Directory to write pattern files to
        #[arg(long, default_value = "routes")]
        out: PathBuf,

        /// API key
        #[arg(long, env = "TRANSIT_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Agency operator id
        #[arg(long, default_value = "SF")]
        operator: String,

        /// Seconds to wait between requests
        #[arg(long, default_value_t = 60)]
        delay_secs: u64,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the line listing from a line-definition document
    Lines {
        /// NeTEx line-definition document
        path: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Lines(#[from] LinesError),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Correlate {
            stops,
            routes,
            map,
            csv,
            no_map,
            no_csv,
            show_diagnostics,
        } => {
            let config = Config::default()
                .with_stops_path(stops)
                .with_routes_dir(routes)
                .with_map_output(map)
                .with_csv_output(csv);
            correlate(&config, !no_map, !no_csv, show_diagnostics).await
        }
        Command::Fetch {
            lines,
            out,
            api_key,
            operator,
            delay_secs,
            base_url,
        } => {
            let mut config = FetchConfig::new(api_key)
                .with_operator(operator)
                .with_output_dir(out)
                .with_delay(Duration::from_secs(delay_secs));
            if let Some(url) = base_url {
                config = config.with_base_url(url);
            }
            fetch_patterns(&lines, &config).await
        }
        Command::Lines { path } => {
            let text = std::fs::read(&path).map_err(LinesError::from)?;
            let text = stop_routes::decode::decode(&text).text;
            let (parsed, diagnostics) = lines::parse(&text)?;
            print!("{}", lines::categorize("Transit System - Complete Line Listing", parsed));
            if !diagnostics.is_empty() {
                println!();
                println!("Skipped {} incomplete line entries", diagnostics.len());
            }
            Ok(())
        }
    }
}

async fn correlate(
    config: &Config,
    write_map: bool,
    write_csv: bool,
    show_diagnostics: usize,
) -> Result<(), CliError> {
    let report = pipeline::run(config).await?;

    if write_map {
        export::write_map_file(
            &config.map_output,
            &report.registry,
            &report.correlation,
            &config.map,
        )?;
        println!("Map saved as {}", config.map_output.display());
    }
    if write_csv {
        export::write_csv_file(&config.csv_output, &report.registry, &report.correlation)?;
        println!("CSV saved as {}", config.csv_output.display());
    }

    println!();
    print!("{}", report.summary());

    let total = report.diagnostics().count();
    if show_diagnostics > 0 && total > 0 {
        println!();
        println!("Diagnostics (showing {} of {total}):", show_diagnostics.min(total));
        for diagnostic in report.diagnostics().take(show_diagnostics) {
            println!("  {diagnostic}");
        }
    }

    Ok(())
}

async fn fetch_patterns(lines_path: &std::path::Path, config: &FetchConfig) -> Result<(), CliError> {
    let bytes = std::fs::read(lines_path).map_err(LinesError::from)?;
    let text = stop_routes::decode::decode(&bytes).text;
    let line_ids = lines::line_ids(&text)?;

    println!("Lines to be queried:");
    println!(
        "{}",
        line_ids
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let client = PatternsClient::new(config)?;
    let summary = fetch::fetch_all(&client, &line_ids, config).await?;

    println!(
        "Fetched {} of {} lines into {}",
        summary.saved.len(),
        line_ids.len(),
        config.output_dir.display()
    );
    for (line, e) in &summary.failed {
        println!("  {line}: {e}");
    }
    Ok(())
}
