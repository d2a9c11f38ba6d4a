use std::path::PathBuf;
use thiserror::Error;

/// Failures that can surface from parsing a report or rendering a chart.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input log could not be read. This is the only fatal condition.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Drawing or encoding a chart failed.
    #[error("chart error: {0}")]
    Chart(String),

    /// The layout could not be fitted into the figure.
    #[error("layout error: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
