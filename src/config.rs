use serde::Deserialize;
use std::path::PathBuf;

/// Pipeline configuration, loadable from `maestro.toml`.
///
/// Every field has a default; an empty file (or no file at all) yields the
/// stock analysis parameters.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub tempo: TempoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Decoder output rate in Hz. 0 keeps the file's native rate.
    #[serde(default = "default_target_sample_rate")]
    pub target_sample_rate: u32,
    /// Analysis window length in samples, shared by all spectral features.
    #[serde(default = "default_frame_size")]
    pub frame_size: usize,
    /// Stride between analysis windows in samples.
    #[serde(default = "default_hop_size")]
    pub hop_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TempoConfig {
    /// Onset tracking is restricted to this many leading seconds so long
    /// recordings stay bounded. The global tempo estimate is unaffected.
    #[serde(default = "default_window_secs")]
    pub window_secs: f32,
}

impl AudioConfig {
    /// Target rate as an option: `None` means keep the native rate.
    pub fn target_rate(&self) -> Option<u32> {
        if self.target_sample_rate == 0 {
            None
        } else {
            Some(self.target_sample_rate)
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: default_target_sample_rate(),
            frame_size: default_frame_size(),
            hop_size: default_hop_size(),
        }
    }
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}

fn default_target_sample_rate() -> u32 { 22_050 }
fn default_frame_size() -> usize { 2048 }
fn default_hop_size() -> usize { 512 }
fn default_window_secs() -> f32 { 120.0 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
