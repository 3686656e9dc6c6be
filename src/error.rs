use thiserror::Error;

/// Errors surfaced by the analysis pipeline and job runner.
///
/// Degenerate signals (silence, inputs shorter than one analysis frame)
/// are not errors: every component returns a well-formed empty or zero
/// result for them instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The byte stream is empty or not a parseable audio container.
    #[error("failed to decode audio: {0}")]
    Decode(String),

    /// Invalid parameters (zero frame size, hop larger than frame, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Resampling to the configured target rate failed.
    #[error("resampling failed: {0}")]
    Resample(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
