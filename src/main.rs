use clap::Parser;
use osu_report_charts::chart::{ChartOptions, Metric};
use std::path::PathBuf;
use tracing::Level;

/// Turn an OSU benchmark report into latency and bandwidth comparison charts.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Report produced by the regression test runner
    #[arg(default_value = "result.txt")]
    input: PathBuf,
    /// Directory the PNG charts are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Pixels per inch
    #[arg(long, default_value_t = 150)]
    dpi: u32,
    /// Height of each facet in inches
    #[arg(long, default_value_t = 5.0)]
    facet_height: f64,
    /// Facet width over height
    #[arg(long, default_value_t = 1.25)]
    aspect: f64,
    /// Only render these metrics (default: all)
    #[arg(long, value_enum)]
    metric: Vec<Metric>,
    /// Print the parsed records as JSON
    #[arg(long)]
    dump: bool,
    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let level = match (args.quiet, args.verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    let dataset = match osu_report_charts::parse_file(&args.input) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if args.dump {
        match serde_json::to_string_pretty(&dataset) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("cannot serialize dataset: {e}"),
        }
    }

    if dataset.is_empty() {
        tracing::warn!("No data parsed. Check {} and its table layout.", args.input.display());
        return;
    }

    let metrics = if args.metric.is_empty() { Metric::ALL.to_vec() } else { args.metric };
    let options = ChartOptions {
        out_dir: args.out_dir,
        dpi: args.dpi,
        facet_height: args.facet_height,
        aspect: args.aspect,
    };
    osu_report_charts::render_all(&dataset, &metrics, &options);
}
