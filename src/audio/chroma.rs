use super::features::PitchStep;
use super::stft::Spectrogram;

/// Canonical pitch-class labels, C-first.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Lowest frequency folded onto the chroma circle (A0). Bins below it are
/// dominated by DC and rumble rather than pitched content.
const MIN_PITCHED_HZ: f32 = 27.5;

const EPSILON: f32 = 1e-10;

/// One 12-bin pitch-class energy vector per analysis frame.
///
/// Spectral power is folded octave-wise onto the 12 equal-tempered pitch
/// classes, then each frame is scaled to unit maximum so loud and quiet
/// passages weigh equally in downstream averages. Silent frames stay
/// all-zero.
pub fn chromagram(spec: &Spectrogram) -> Vec<[f32; 12]> {
    let classes = bin_pitch_classes(spec.frames.first().map_or(0, |f| f.len()), spec.bin_hz());

    spec.frames
        .iter()
        .map(|mags| {
            let mut bins = [0.0f32; 12];
            for (k, &mag) in mags.iter().enumerate() {
                if let Some(pc) = classes[k] {
                    bins[pc] += mag * mag;
                }
            }
            let max = bins.iter().fold(0.0f32, |a, &b| a.max(b));
            if max > EPSILON {
                for b in &mut bins {
                    *b /= max;
                }
            }
            bins
        })
        .collect()
}

/// Map FFT bin index to a pitch class via equal temperament (A4 = 440 Hz).
/// `None` for bins below the pitched range.
fn bin_pitch_classes(n_bins: usize, bin_hz: f32) -> Vec<Option<usize>> {
    (0..n_bins)
        .map(|k| {
            let freq = k as f32 * bin_hz;
            if freq < MIN_PITCHED_HZ {
                return None;
            }
            let midi = 69.0 + 12.0 * (freq / 440.0).log2();
            Some(midi.round() as usize % 12)
        })
        .collect()
}

/// Time-averaged pitch-class profile, rescaled so the maximum bin is 100.
/// An empty or silent chromagram stays all-zero (no rescaling).
pub fn harmonic_profile(frames: &[[f32; 12]]) -> [f32; 12] {
    let mut mean = [0.0f32; 12];
    if frames.is_empty() {
        return mean;
    }
    for frame in frames {
        for (acc, &v) in mean.iter_mut().zip(frame.iter()) {
            *acc += v;
        }
    }
    for v in &mut mean {
        *v /= frames.len() as f32;
    }
    let max = mean.iter().fold(0.0f32, |a, &b| a.max(b));
    if max > EPSILON {
        for v in &mut mean {
            *v = *v / max * 100.0;
        }
    }
    mean
}

/// Indices of the three most prominent pitch classes, in ascending order
/// of energy. Stable ascending sort then tail: equal energies resolve to
/// the higher pitch-class index.
pub fn top_pitch_classes(profile: &[f32; 12]) -> [usize; 3] {
    let mut idx: Vec<usize> = (0..12).collect();
    idx.sort_by(|&a, &b| {
        profile[a]
            .partial_cmp(&profile[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    [idx[9], idx[10], idx[11]]
}

/// Dominant pitch class per frame, timestamped at the frame start.
/// Argmax over the 12 bins; the first (lowest) index wins ties.
pub fn pitch_trajectory(
    frames: &[[f32; 12]],
    hop_size: usize,
    sample_rate: u32,
) -> Vec<PitchStep> {
    frames
        .iter()
        .enumerate()
        .map(|(i, bins)| {
            let mut best = 0usize;
            for (pc, &v) in bins.iter().enumerate() {
                if v > bins[best] {
                    best = pc;
                }
            }
            PitchStep {
                time: (i * hop_size) as f32 / sample_rate as f32,
                pitch: PITCH_CLASSES[best],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::stft::magnitude_frames;

    fn sine(freq: f32, sr: u32, secs: f32) -> Vec<f32> {
        (0..(sr as f32 * secs) as usize)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sr as f32).sin())
            .collect()
    }

    #[test]
    fn a440_lands_in_pitch_class_a() {
        let sr = 22_050;
        let spec = magnitude_frames(&sine(440.0, sr, 2.0), sr, 2048, 512);
        let chroma = chromagram(&spec);
        let profile = harmonic_profile(&chroma);

        let peak = profile
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 9, "A440 should peak at chroma bin A (index 9)");
        assert!((profile[9] - 100.0).abs() < 1e-3);
        assert!(top_pitch_classes(&profile).contains(&9));
    }

    #[test]
    fn silence_stays_all_zero() {
        let sr = 22_050;
        let spec = magnitude_frames(&vec![0.0f32; sr as usize], sr, 2048, 512);
        let chroma = chromagram(&spec);
        let profile = harmonic_profile(&chroma);

        assert!(profile.iter().all(|&v| v == 0.0));
        assert!(profile.iter().all(|v| v.is_finite()));
        // All-equal energies: ascending stable sort leaves indices in order,
        // so the tail is the three highest pitch-class indices.
        assert_eq!(top_pitch_classes(&profile), [9, 10, 11]);
    }

    #[test]
    fn top_three_prefers_higher_index_on_ties() {
        let mut profile = [0.0f32; 12];
        profile[0] = 100.0;
        profile[1] = 100.0;
        profile[5] = 50.0;
        // Ascending by energy: 50 before the tied 100s, which keep index order.
        assert_eq!(top_pitch_classes(&profile), [5, 0, 1]);
    }

    #[test]
    fn trajectory_argmax_first_index_wins_ties() {
        let mut a = [0.0f32; 12];
        a[9] = 1.0;
        let mut tied = [0.0f32; 12];
        tied[3] = 0.7;
        tied[7] = 0.7;
        let steps = pitch_trajectory(&[a, tied], 512, 22_050);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].pitch, "A");
        assert_eq!(steps[1].pitch, "D#");
        assert!((steps[1].time - 512.0 / 22_050.0).abs() < 1e-6);
    }

    #[test]
    fn empty_chromagram_yields_empty_trajectory() {
        assert!(pitch_trajectory(&[], 512, 22_050).is_empty());
    }
}
