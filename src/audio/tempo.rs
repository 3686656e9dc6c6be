use super::features::TempoPoint;

/// Musically plausible tempo range in BPM; instantaneous estimates are
/// clamped to it to suppress detector artifacts.
pub const MIN_BPM: f32 = 40.0;
pub const MAX_BPM: f32 = 240.0;

/// Inter-onset intervals below this are detector noise, not rhythm.
const MIN_ONSET_INTERVAL_SECS: f32 = 0.01;

/// Global tempo from the median inter-beat interval.
///
/// Returns 0.0 when fewer than two beats (or no plausible intervals) are
/// found — the documented "no discernible pulse" reading for silent or
/// degenerate input. Never an error.
pub fn estimate_tempo(beat_times: &[f32]) -> f32 {
    if beat_times.len() < 2 {
        return 0.0;
    }

    let intervals: Vec<f32> = beat_times.windows(2).map(|w| w[1] - w[0]).collect();

    // Keep intervals inside the plausible range (40-240 BPM).
    let reasonable: Vec<f32> = intervals
        .iter()
        .copied()
        .filter(|&i| i >= 60.0 / MAX_BPM && i <= 60.0 / MIN_BPM)
        .collect();

    if reasonable.is_empty() {
        return 0.0;
    }

    let median_interval = {
        let mut sorted = reasonable.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sorted[sorted.len() / 2]
    };

    60.0 / median_interval
}

/// Instantaneous tempo over time from inter-onset intervals.
///
/// Each surviving interval becomes one point: 60/interval clamped to the
/// plausible range, timestamped at the onset opening the interval. Fewer
/// than three onsets yield an empty curve, which is a valid reading.
pub fn tempo_curve(onsets: &[f32]) -> Vec<TempoPoint> {
    if onsets.len() < 3 {
        return Vec::new();
    }

    let mut curve = Vec::with_capacity(onsets.len() - 1);
    for pair in onsets.windows(2) {
        let interval = pair[1] - pair[0];
        if interval <= MIN_ONSET_INTERVAL_SECS {
            continue;
        }
        curve.push(TempoPoint {
            time: pair[0],
            bpm: (60.0 / interval).clamp(MIN_BPM, MAX_BPM),
        });
    }
    curve
}
