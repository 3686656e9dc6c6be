use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "maestro", about = "Extract performance features from an audio recording")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG, AAC)
    pub input: Option<PathBuf>,

    /// Write the report JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to maestro.toml / user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Decoder output rate in Hz (0 keeps the file's native rate)
    #[arg(long, default_value_t = 22_050)]
    pub sample_rate: u32,

    /// Submission type: "Cover Song", "Original Composition", anything else is a remix
    #[arg(long, default_value = "Original Composition")]
    pub kind: String,

    /// Instrument(s) featured in the recording
    #[arg(long, default_value = "")]
    pub instruments: String,

    /// Song or piece title
    #[arg(long, default_value = "")]
    pub song: String,

    /// Original artist (covers) or genre/mood (originals, remixes)
    #[arg(long, default_value = "")]
    pub artist_or_genre: String,

    /// The recording includes vocals
    #[arg(long)]
    pub vocals: bool,
}
