//! End-to-end pipeline properties over synthesized recordings.

use std::io::Cursor;

use maestro::{analyze_bytes, decode_file, AnalysisError, Config};

/// Render mono f32 samples to an in-memory 16-bit WAV.
fn wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer
                .write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                .unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn sine(freq: f32, sr: u32, secs: f32) -> Vec<f32> {
    (0..(sr as f32 * secs) as usize)
        .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sr as f32).sin() * 0.7)
        .collect()
}

/// Percussive bursts every `interval` seconds over silence.
fn click_track(sr: u32, secs: f32, interval: f32) -> Vec<f32> {
    let mut samples = vec![0.0f32; (sr as f32 * secs) as usize];
    let step = (sr as f32 * interval) as usize;
    let mut pos = 0;
    let mut phase = 0.19f32;
    while pos < samples.len() {
        for i in 0..800.min(samples.len() - pos) {
            phase = (phase * 7.13 + 0.37).fract();
            let decay = 1.0 - i as f32 / 800.0;
            samples[pos + i] = (phase * 2.0 - 1.0) * decay;
        }
        pos += step;
    }
    samples
}

#[test]
fn pure_a440_dominates_pitch_class_a() {
    let sr = 22_050;
    let bytes = wav_bytes(&sine(440.0, sr, 5.0), sr);
    let result = analyze_bytes(bytes, &Config::default()).unwrap();

    // Canonical label order puts A at index 9.
    assert_eq!(result.pitch_labels[9], "A");
    let peak = result
        .harmonic_profile
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak, 9);
    assert!((result.harmonic_profile[9] - 100.0).abs() < 1e-3);
    assert!(result.top_pitch_indices.contains(&9));
    assert!(result.top_pitch_labels.contains(&"A"));

    // The trajectory should spend nearly all its frames on A.
    let on_a = result
        .pitch_trajectory
        .iter()
        .filter(|s| s.pitch == "A")
        .count();
    assert!(
        on_a * 10 >= result.pitch_trajectory.len() * 9,
        "only {on_a}/{} frames on A",
        result.pitch_trajectory.len()
    );
}

#[test]
fn steady_click_track_reads_near_120_bpm() {
    let sr = 22_050;
    let bytes = wav_bytes(&click_track(sr, 10.0, 0.5), sr);
    let result = analyze_bytes(bytes, &Config::default()).unwrap();

    assert!(
        (result.tempo_bpm - 120.0).abs() <= 5.0,
        "estimated {} BPM",
        result.tempo_bpm
    );
    assert_eq!(result.tempo_display, format!("{:.2} BPM", result.tempo_bpm));

    assert!(!result.tempo_curve.is_empty());
    for point in &result.tempo_curve {
        assert!(point.bpm >= 40.0 && point.bpm <= 240.0);
        assert!(point.time.is_finite() && point.time >= 0.0);
    }
    for pair in result.tempo_curve.windows(2) {
        assert!(pair[1].time >= pair[0].time);
    }

    // Local tempo clusters tightly around the click rate.
    let near: usize = result
        .tempo_curve
        .iter()
        .filter(|p| (p.bpm - 120.0).abs() <= 10.0)
        .count();
    assert!(
        near * 2 >= result.tempo_curve.len(),
        "{near}/{} points near 120 BPM",
        result.tempo_curve.len()
    );
}

#[test]
fn silence_produces_zeroes_not_errors() {
    let sr = 22_050;
    let bytes = wav_bytes(&vec![0.0; sr as usize * 3], sr);
    let result = analyze_bytes(bytes, &Config::default()).unwrap();

    assert_eq!(result.tempo_bpm, 0.0);
    assert!(result.harmonic_profile.iter().all(|&v| v == 0.0));
    assert_eq!(result.top_pitch_indices, [9, 10, 11]);
    assert!(result.tempo_curve.is_empty());
    for step in &result.pitch_trajectory {
        assert!(step.time.is_finite());
    }
    for window in result.pitch_trajectory.windows(2) {
        assert!(window[1].time > window[0].time);
    }
}

#[test]
fn trajectory_timestamps_match_hop_arithmetic() {
    let sr = 22_050;
    let bytes = wav_bytes(&sine(261.63, sr, 2.0), sr);
    let config = Config::default();
    let result = analyze_bytes(bytes, &config).unwrap();

    let hop = config.audio.hop_size as f32;
    for (i, step) in result.pitch_trajectory.iter().enumerate() {
        let expected = i as f32 * hop / sr as f32;
        assert!(
            (step.time - expected).abs() < 1e-5,
            "frame {i}: {} vs {expected}",
            step.time
        );
    }
}

#[test]
fn byte_identical_input_gives_identical_results() {
    let sr = 22_050;
    let bytes = wav_bytes(&sine(330.0, sr, 2.0), sr);
    let config = Config::default();

    let a = analyze_bytes(bytes.clone(), &config).unwrap();
    let b = analyze_bytes(bytes, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn malformed_payload_fails_with_decode_error() {
    let err = analyze_bytes(b"not audio at all".to_vec(), &Config::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::Decode(_)));
}

#[test]
fn decode_file_reads_an_upload_from_disk() {
    let sr = 22_050;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.wav");
    std::fs::write(&path, wav_bytes(&sine(440.0, sr, 1.0), sr)).unwrap();

    let signal = decode_file(&path, None).unwrap();
    assert_eq!(signal.sample_rate, sr);
    assert!(signal.samples.iter().all(|s| s.is_finite()));
}
