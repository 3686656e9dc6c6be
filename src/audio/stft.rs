use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

/// Hann-windowed magnitude spectra over a signal at a fixed frame/hop.
///
/// Frames start at `i * hop_size` and require a full window; a signal
/// shorter than one frame yields zero frames. Every spectral consumer in
/// the pipeline reads the same framing so their timelines line up.
pub struct Spectrogram {
    /// One magnitude vector (frame_size / 2 + 1 bins) per frame.
    pub frames: Vec<Vec<f32>>,
    pub frame_size: usize,
    pub hop_size: usize,
    pub sample_rate: u32,
}

impl Spectrogram {
    /// Width of one FFT bin in Hz.
    pub fn bin_hz(&self) -> f32 {
        self.sample_rate as f32 / self.frame_size as f32
    }

    /// Start timestamp of frame `i` in seconds.
    pub fn frame_time(&self, i: usize) -> f32 {
        (i * self.hop_size) as f32 / self.sample_rate as f32
    }
}

pub fn magnitude_frames(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
) -> Spectrogram {
    debug_assert!(frame_size > 0 && hop_size > 0);

    let hann = hann_window(frame_size);
    let n_frames = if samples.len() >= frame_size {
        (samples.len() - frame_size) / hop_size + 1
    } else {
        0
    };

    let frames: Vec<Vec<f32>> = (0..n_frames)
        .into_par_iter()
        .map(|frame_idx| {
            let start = frame_idx * hop_size;
            let mut buffer: Vec<Complex<f32>> = samples[start..start + frame_size]
                .iter()
                .enumerate()
                .map(|(i, &s)| Complex::new(s * hann[i], 0.0))
                .collect();

            // Per-thread FFT planner (rayon-safe)
            let mut planner = FftPlanner::<f32>::new();
            let fft = planner.plan_fft_forward(frame_size);
            fft.process(&mut buffer);

            buffer[..frame_size / 2 + 1].iter().map(|c| c.norm()).collect()
        })
        .collect();

    Spectrogram {
        frames,
        frame_size,
        hop_size,
        sample_rate,
    }
}

fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos())
        })
        .collect()
}
