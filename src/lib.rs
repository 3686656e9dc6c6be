//! maestro — batch audio analysis for musical performance critique.
//!
//! One decoded waveform feeds four independent feature extractors: a
//! global tempo estimate, a 12-bin harmonic profile, a local-tempo curve,
//! and a per-frame dominant-pitch trajectory. The merged
//! [`AnalysisResult`] is what the presentation/critique layers consume.
//! [`jobs::JobRunner`] executes runs off the caller's path and caches
//! results by content fingerprint.

pub mod audio;
pub mod config;
pub mod error;
pub mod jobs;
pub mod submission;

pub use audio::analysis::analyze;
pub use audio::decode::{decode_bytes, decode_file, Signal};
pub use audio::features::{AnalysisResult, PitchStep, TempoPoint};
pub use config::Config;
pub use error::AnalysisError;
pub use jobs::{JobRunner, JobStatus, Submitted};
pub use submission::{Submission, SubmissionKind};

/// Decode raw audio bytes and run the full pipeline in one call.
pub fn analyze_bytes(bytes: Vec<u8>, config: &Config) -> Result<AnalysisResult, AnalysisError> {
    let signal = audio::decode::decode_bytes(bytes, None, config.audio.target_rate())?;
    audio::analysis::analyze(&signal, config)
}
