use super::chroma;
use super::decode::Signal;
use super::features::AnalysisResult;
use super::onset;
use super::stft;
use super::tempo;
use crate::config::Config;
use crate::error::AnalysisError;

/// Run the full feature-extraction pipeline over one decoded signal.
///
/// The spectrogram is computed once; the four consumers (global tempo,
/// harmonic profile, local-tempo curve, pitch trajectory) each read it
/// independently and none depends on another's output.
pub fn analyze(signal: &Signal, config: &Config) -> Result<AnalysisResult, AnalysisError> {
    let frame_size = config.audio.frame_size;
    let hop_size = config.audio.hop_size;
    if frame_size == 0 || hop_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "frame_size and hop_size must be non-zero".into(),
        ));
    }

    log::info!(
        "Analyzing {:.1}s of audio at {}Hz (frame={}, hop={})",
        signal.duration_secs(),
        signal.sample_rate,
        frame_size,
        hop_size
    );

    let spec = stft::magnitude_frames(&signal.samples, signal.sample_rate, frame_size, hop_size);

    // Harmonic content and per-frame dominant pitch share one chromagram.
    let chromagram = chroma::chromagram(&spec);
    let harmonic_profile = chroma::harmonic_profile(&chromagram);
    let top_pitch_indices = chroma::top_pitch_classes(&harmonic_profile);
    let pitch_trajectory = chroma::pitch_trajectory(&chromagram, hop_size, signal.sample_rate);

    // Both tempo views read the same flux envelope. The whole track feeds
    // the global estimate; the local curve is bounded to the leading
    // window so long recordings stay cheap.
    let flux = onset::onset_envelope(&spec);
    let beats = onset::pick_onsets(&flux, hop_size, signal.sample_rate);
    let tempo_bpm = tempo::estimate_tempo(&beats);

    let tracked = bounded_frames(flux.len(), config.tempo.window_secs, hop_size, signal.sample_rate);
    let onsets = onset::pick_onsets(&flux[..tracked], hop_size, signal.sample_rate);
    let tempo_curve = tempo::tempo_curve(&onsets);

    log::info!(
        "Tempo {:.2} BPM, {} onsets in window, {} trajectory frames",
        tempo_bpm,
        onsets.len(),
        pitch_trajectory.len()
    );

    Ok(AnalysisResult {
        tempo_bpm,
        tempo_display: format!("{tempo_bpm:.2} BPM"),
        harmonic_profile,
        pitch_labels: chroma::PITCH_CLASSES,
        top_pitch_indices,
        top_pitch_labels: top_pitch_indices.map(|i| chroma::PITCH_CLASSES[i]),
        tempo_curve,
        pitch_trajectory,
        duration_secs: signal.duration_secs(),
        sample_rate: signal.sample_rate,
    })
}

/// Number of leading frames whose start time falls inside the tracking
/// window. A non-positive window disables the bound.
fn bounded_frames(n_frames: usize, window_secs: f32, hop_size: usize, sample_rate: u32) -> usize {
    if window_secs <= 0.0 {
        return n_frames;
    }
    let limit = (window_secs * sample_rate as f32 / hop_size as f32) as usize + 1;
    limit.min(n_frames)
}
