use serde::{Deserialize, Serialize};

/// What kind of performance was uploaded. Unrecognized labels fall back
/// to `Remix`, matching the upload form's three-way branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionKind {
    #[serde(rename = "Cover Song")]
    CoverSong,
    #[serde(rename = "Original Composition")]
    OriginalComposition,
    Remix,
}

impl SubmissionKind {
    pub fn parse(label: &str) -> Self {
        match label {
            "Cover Song" => Self::CoverSong,
            "Original Composition" => Self::OriginalComposition,
            _ => Self::Remix,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoverSong => "Cover Song",
            Self::OriginalComposition => "Original Composition",
            Self::Remix => "Remix",
        }
    }
}

/// Submission metadata from the upload layer. The pipeline never reads
/// it; it rides alongside the analysis for the critique step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub kind: SubmissionKind,
    /// Instrument(s) featured, free text.
    pub instruments: String,
    /// Song title (covers/remixes) or piece title (originals).
    pub song: String,
    /// Original artist (covers) or genre/mood (originals, remixes).
    pub artist_or_genre: String,
    #[serde(default)]
    pub vocals_present: bool,
}
