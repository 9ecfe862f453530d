//! Recognized audio container formats
//!
//! The walker only considers paths whose extension maps to one of these
//! variants. Adding a format means adding a variant here.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Audio container formats the catalog recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG layer III
    Mp3,
    /// Free Lossless Audio Codec
    Flac,
    /// Ogg Vorbis
    Ogg,
    /// Opus in Ogg
    Opus,
    /// RIFF wave
    Wav,
    /// Raw AAC / ADTS
    Aac,
    /// MPEG-4 audio
    M4a,
}

impl AudioFormat {
    /// All recognized formats
    pub const ALL: &'static [AudioFormat] = &[
        Self::Mp3,
        Self::Flac,
        Self::Ogg,
        Self::Opus,
        Self::Wav,
        Self::Aac,
        Self::M4a,
    ];

    /// Canonical lowercase extension
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::Wav => "wav",
            Self::Aac => "aac",
            Self::M4a => "m4a",
        }
    }

    /// Match a file extension (case-insensitive)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "opus" => Some(Self::Opus),
            "wav" => Some(Self::Wav),
            "aac" => Some(Self::Aac),
            "m4a" => Some(Self::M4a),
            _ => None,
        }
    }

    /// Detect the format of a path from its extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Check if a path has a recognized audio extension
#[must_use]
pub fn is_audio_file(path: &Path) -> bool {
    AudioFormat::from_path(path).is_some()
}
