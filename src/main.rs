use anyhow::Context;
use clap::{Parser, Subcommand};

mod benchlog;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "mvcc-bench-report")]
#[command(about = "Throughput report for MVCC hash-list benchmark logs", long_about = None)]
struct Cli {
    /// Debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a benchmark log, print ops/s per thread count, write plot + JSON.
    Report {
        /// Benchmark console log (LF or CRLF line endings).
        #[arg(value_name = "LOG")]
        log_path: String,

        /// Parsed log output [default: <LOG>.json].
        #[arg(long)]
        json: Option<String>,

        /// Skip writing the parsed log.
        #[arg(long, conflicts_with = "json")]
        no_json: bool,

        /// HTML plot output [default: <LOG>.html].
        #[arg(long)]
        plot: Option<String>,
    },

    /// Print ops/s per thread count from a parsed log written by `report`.
    Series {
        /// JSON file produced by `report`.
        #[arg(value_name = "JSON")]
        json_path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.cmd {
        Commands::Report {
            log_path,
            json,
            no_json,
            plot,
        } => {
            let json = if no_json {
                None
            } else {
                Some(json.unwrap_or_else(|| render::json_path_for(&log_path)))
            };
            let plot = plot.unwrap_or_else(|| format!("{}.html", log_path));
            let series = report(&log_path, &plot, json.as_deref())?;
            println!("{}", render::to_pretty_json(&series)?);
        }
        Commands::Series { json_path } => {
            let parsed = render::read_parsed_log(&json_path)?;
            let series = model::build_series(&parsed)?;
            println!("{}", render::to_pretty_json(&series)?);
        }
    }

    Ok(())
}

/// Parse, aggregate, write the plot and (optionally) the parsed log.
///
/// Nothing is written unless parsing and aggregation both succeed.
fn report(log_path: &str, plot: &str, json: Option<&str>) -> Result<model::ThroughputSeries> {
    // 1) Parse log.
    let parsed = benchlog::parse_log_file(log_path)?;
    let records: usize = parsed.iter().map(|g| g.content.len()).sum();
    log::info!(
        "parsed {}: {} configuration group(s), {} result record(s)",
        log_path,
        parsed.len(),
        records
    );

    // 2) Aggregate.
    let summaries = model::summarize_groups(&parsed)?;
    let series = model::series_from_summaries(&summaries);
    log::info!("{} thread count(s) in series", series.len());

    // 3) Render plot.
    let html = render::render_html_report(log_path, &series, &summaries)?;
    std::fs::write(plot, html).with_context(|| format!("write plot {}", plot))?;
    log::info!("wrote {}", plot);

    // 4) Persist parsed log.
    if let Some(json) = json {
        render::write_parsed_log(json, &parsed)?;
        log::info!("wrote {}", json);
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    const LOG: &str = "qemu: booting\n\
                       \n#### mvcc bench ####\n\
                       -Nb threads   : 2\n\
                       -Initial size : 1024\n\
                       -Buckets      : 64\n\
                       -Duration     : 1000\n\
                       -Update rate  : 200\n\
                       -range        : 2048\n\
                       \n#### total ####\n\
                       Set size      : 1030 (expected: 1030)\n\
                       Duration      : 1000 (ms)\n\
                       #ops          : 500 (500.0 / s)\n\
                       #read ops     : 400 (400.0 / s)\n\
                       #update ops   : 100 (100.0 / s)\n\
                       benchlist end\n";

    #[test]
    fn report_requires_log_path() {
        let err = Cli::try_parse_from(["mvcc-bench-report", "report"]).err().unwrap();

        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn no_json_conflicts_with_json_path() {
        let err = Cli::try_parse_from([
            "mvcc-bench-report",
            "report",
            "run.log",
            "--json",
            "out.json",
            "--no-json",
        ])
        .err()
        .unwrap();

        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn report_writes_plot_and_parsed_log() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        std::fs::write(&log_path, LOG).unwrap();
        let log_path = log_path.to_str().unwrap();
        let plot = format!("{}.html", log_path);
        let json = render::json_path_for(log_path);

        let series = report(log_path, &plot, Some(&json)).unwrap();

        assert_eq!(series.clone().into_iter().collect::<Vec<_>>(), vec![(2, 500.0)]);
        assert!(std::fs::read_to_string(&plot).unwrap().contains("<polyline"));
        let reloaded = render::read_parsed_log(&json).unwrap();
        assert_eq!(model::build_series(&reloaded).unwrap(), series);
    }

    #[test]
    fn failed_parse_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("bad.log");
        std::fs::write(&log_path, LOG.replace("-Duration     : 1000", "-Duration     : ?")).unwrap();
        let log_path = log_path.to_str().unwrap();
        let plot = format!("{}.html", log_path);
        let json = render::json_path_for(log_path);

        let err = format!("{:#}", report(log_path, &plot, Some(&json)).unwrap_err());

        assert!(err.contains("Duration"), "{err}");
        assert!(!std::path::Path::new(&plot).exists());
        assert!(!std::path::Path::new(&json).exists());
    }
}
