use thiserror::Error;

/// Errors raised while generating a chart
///
/// Each request fails as a whole: there are no partial charts and no retry
/// semantics at this layer. Layout problems never surface here; the layout
/// engine degrades softly instead (see `layout_service`).
#[derive(Debug, Error)]
pub enum ChartError {
    /// Missing or malformed request fields; the pipeline never runs
    #[error("Invalid request: {0}")]
    Validation(String),
    /// Ephemeris failure or degenerate data (bad cusps, non-finite values)
    #[error("Calculation error: {0}")]
    Calculation(String),
    /// Plotting backend failure
    #[error("Render error: {0}")]
    Render(String),
    /// File lifecycle failure (output directory, image write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Response serialization failure
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
