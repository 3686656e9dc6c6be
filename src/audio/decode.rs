use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AnalysisError;

/// A decoded mono waveform. Immutable once produced; every analysis
/// component reads it, none mutates it.
#[derive(Debug, Clone)]
pub struct Signal {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Signal {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode raw audio bytes into a mono [`Signal`].
///
/// Multi-channel audio is collapsed by per-frame averaging. When
/// `target_rate` is set and differs from the file's native rate, the
/// output is resampled so downstream cost stays bounded regardless of
/// the upload's rate.
pub fn decode_bytes(
    bytes: Vec<u8>,
    hint_ext: Option<&str>,
    target_rate: Option<u32>,
) -> Result<Signal, AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::Decode("empty payload".into()));
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = hint_ext {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AnalysisError::Decode(format!("unrecognized container: {e}")))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::Decode("no audio tracks found".into()))?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AnalysisError::Decode("unknown sample rate".into()))?;
    if sample_rate == 0 {
        return Err(AnalysisError::Decode("zero sample rate".into()));
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalysisError::Decode(format!("no decoder for codec: {e}")))?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(AnalysisError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(AnalysisError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        let samples = sample_buf.samples();

        // Downmix to mono; non-finite samples flush to 0 so the Signal
        // invariant holds.
        if channels == 1 {
            all_samples.extend(samples.iter().map(|&s| sanitize(s)));
        } else {
            for frame_samples in samples.chunks(channels) {
                let mono: f32 = frame_samples.iter().sum::<f32>() / channels as f32;
                all_samples.push(sanitize(mono));
            }
        }
    }

    if all_samples.is_empty() {
        return Err(AnalysisError::Decode("no audio frames decoded".into()));
    }

    let (samples, sample_rate) = match target_rate {
        Some(target) if target != sample_rate => {
            let resampled = resample(&all_samples, sample_rate, target)?;
            (resampled, target)
        }
        _ => (all_samples, sample_rate),
    };

    log::info!(
        "Decoded audio: {} samples, {}Hz, {:.1}s",
        samples.len(),
        sample_rate,
        samples.len() as f32 / sample_rate as f32
    );

    Ok(Signal { samples, sample_rate })
}

/// Decode an audio file from disk, using its extension as a format hint.
pub fn decode_file(path: &Path, target_rate: Option<u32>) -> Result<Signal, AnalysisError> {
    let bytes = std::fs::read(path)?;
    let ext = path.extension().and_then(|e| e.to_str());
    decode_bytes(bytes, ext, target_rate)
}

fn sanitize(s: f32) -> f32 {
    if s.is_finite() { s } else { 0.0 }
}

/// Resample mono f32 audio between arbitrary rates using rubato.
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AnalysisError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
        WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        2.0, // max relative ratio
        params,
        samples.len(),
        1, // mono
    )
    .map_err(|e| AnalysisError::Resample(e.to_string()))?;

    let input = vec![samples.to_vec()];
    let output = resampler
        .process(&input, None)
        .map_err(|e| AnalysisError::Resample(e.to_string()))?;

    Ok(output.into_iter().next().unwrap_or_default())
}
