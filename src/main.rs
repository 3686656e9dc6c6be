mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cli::Cli;
use maestro::audio::decode;
use maestro::{analyze, AnalysisResult, Config, Submission, SubmissionKind};

/// What the binary emits: the untouched submission metadata next to the
/// extracted features, ready for the critique layer.
#[derive(Serialize)]
struct Report<'a> {
    submission: &'a Submission,
    analysis: &'a AnalysisResult,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect maestro.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("maestro.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("maestro").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("maestro").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });

    let mut config = Config::default();
    if let Some(ref path) = config_path {
        if let Some(cfg) = maestro::config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            config = cfg;
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }
    // CLI wins over config when set away from its default
    if cli.sample_rate != 22_050 {
        config.audio.target_sample_rate = cli.sample_rate;
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    log::info!("maestro - performance feature extraction");
    log::info!("Input: {}", input.display());

    let signal = decode::decode_file(input, config.audio.target_rate())
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    let analysis = analyze(&signal, &config).context("Analysis failed")?;

    log::info!("Estimated tempo: {}", analysis.tempo_display);
    log::info!(
        "Top pitch classes: {}",
        analysis.top_pitch_labels.join(", ")
    );

    let submission = Submission {
        kind: SubmissionKind::parse(&cli.kind),
        instruments: cli.instruments.clone(),
        song: cli.song.clone(),
        artist_or_genre: cli.artist_or_genre.clone(),
        vocals_present: cli.vocals,
    };

    let report = Report {
        submission: &submission,
        analysis: &analysis,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
