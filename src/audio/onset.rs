use super::stft::Spectrogram;

/// Half-wave-rectified spectral flux, one value per frame. Rising spectral
/// energy marks note and beat attacks.
pub fn onset_envelope(spec: &Spectrogram) -> Vec<f32> {
    let n_bins = spec.frames.first().map_or(0, |f| f.len());
    let mut prev = vec![0.0f32; n_bins];
    let mut flux = Vec::with_capacity(spec.frames.len());

    for mags in &spec.frames {
        let value: f32 = mags
            .iter()
            .zip(prev.iter())
            .map(|(cur, prev)| (cur - prev).max(0.0))
            .sum();
        flux.push(value);
        prev.clone_from(mags);
    }

    flux
}

/// Pick onset times from a flux envelope with an adaptive local-mean
/// threshold. Only local peaks count, and candidates closer than 100 ms to
/// the previous pick are suppressed.
pub fn pick_onsets(flux: &[f32], hop_size: usize, sample_rate: u32) -> Vec<f32> {
    if flux.is_empty() {
        return Vec::new();
    }

    let window = 20; // ~half a second of context at the stock hop rate
    let mut onsets: Vec<f32> = Vec::new();

    for i in 0..flux.len() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(flux.len());
        let local_mean: f32 = flux[start..end].iter().sum::<f32>() / (end - start) as f32;

        let threshold = local_mean * 1.5 + 0.01;

        if flux[i] > threshold {
            let is_peak = (i == 0 || flux[i] >= flux[i - 1])
                && (i == flux.len() - 1 || flux[i] >= flux[i + 1]);

            let time = (i * hop_size) as f32 / sample_rate as f32;
            let far_enough = onsets.last().map_or(true, |&last| time - last > 0.1);

            if is_peak && far_enough {
                onsets.push(time);
            }
        }
    }

    onsets
}
