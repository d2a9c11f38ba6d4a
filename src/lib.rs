pub mod errors;
pub mod context;
pub mod row;
pub mod scenario;
pub mod dataset;
pub mod layout;
pub mod palette;
pub mod chart;

use std::path::Path;

use chart::{ChartOptions, Metric, RenderOutcome};
use errors::{ReportError, Result};

pub use context::{Context, InstallMethod, System};
pub use dataset::{parse_report, Dataset, Record, SkipStats};
pub use scenario::{classify, Scenario};

/// Read and parse a report file. An unreadable file is the only fatal error.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let ds = parse_report(&text);
    tracing::debug!(
        records = ds.len(),
        no_context = ds.skipped.no_context,
        field_count = ds.skipped.field_count,
        bad_value = ds.skipped.bad_value,
        "parsed {}",
        path.display()
    );
    Ok(ds)
}

/// Render each metric on its own. A failure for one metric is logged and
/// returned in its slot; the others are still attempted.
pub fn render_all(
    dataset: &Dataset,
    metrics: &[Metric],
    options: &ChartOptions,
) -> Vec<(Metric, Result<RenderOutcome>)> {
    metrics
        .iter()
        .map(|&metric| {
            let outcome = chart::render_metric(dataset, metric, options);
            if let Err(e) = &outcome {
                tracing::error!("{} chart failed: {e}", metric.pvar());
            }
            (metric, outcome)
        })
        .collect()
}
