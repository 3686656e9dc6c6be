use serde::Serialize;

/// One instantaneous-tempo reading on the local-tempo curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempoPoint {
    /// Seconds from the start of the recording.
    pub time: f32,
    /// Instantaneous tempo, clamped to the plausible range.
    pub bpm: f32,
}

/// Dominant pitch class of one analysis frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchStep {
    /// Frame start in seconds.
    pub time: f32,
    /// Canonical pitch-class label (C, C#, ... B).
    pub pitch: &'static str,
}

/// The terminal output of one pipeline run: everything the presentation
/// and critique layers consume. Immutable, cacheable, safe to share
/// across concurrent requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Whole-track tempo estimate in BPM; 0.0 means no discernible pulse.
    pub tempo_bpm: f32,
    /// Tempo formatted for display, e.g. "123.45 BPM".
    pub tempo_display: String,
    /// Time-averaged pitch-class energies, rescaled so the max bin is 100
    /// (all zero for silent input).
    pub harmonic_profile: [f32; 12],
    /// Canonical labels matching the profile bins, C-first.
    pub pitch_labels: [&'static str; 12],
    /// Indices of the three most prominent pitch classes, ascending by
    /// energy.
    pub top_pitch_indices: [usize; 3],
    pub top_pitch_labels: [&'static str; 3],
    /// Local tempo over the bounded onset-tracking window.
    pub tempo_curve: Vec<TempoPoint>,
    /// Per-frame dominant pitch class across the whole recording.
    pub pitch_trajectory: Vec<PitchStep>,
    pub duration_secs: f32,
    pub sample_rate: u32,
}
