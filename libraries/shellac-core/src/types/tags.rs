//! Extracted audio tags
//!
//! Every field is independently optional: a file with a corrupt or missing
//! tag container is still cataloged, just without tags.

use serde::{Deserialize, Serialize};

/// Tags and audio properties extracted from one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AudioTags {
    /// Track title
    pub title: Option<String>,

    /// Artist name
    pub artist: Option<String>,

    /// Album title
    pub album: Option<String>,

    /// Album artist (may differ from track artist)
    pub album_artist: Option<String>,

    /// Genre
    pub genre: Option<String>,

    /// Release year
    pub year: Option<i32>,

    /// Track number
    pub track_number: Option<u32>,

    /// Duration in seconds
    pub duration_seconds: Option<f64>,

    /// Bitrate in kbps
    pub bitrate: Option<u32>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,
}

impl AudioTags {
    /// Whether no field was extracted at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.album_artist.is_none()
            && self.genre.is_none()
            && self.year.is_none()
            && self.track_number.is_none()
            && self.duration_seconds.is_none()
            && self.bitrate.is_none()
            && self.sample_rate.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tags_are_empty() {
        assert!(AudioTags::default().is_empty());
    }

    #[test]
    fn any_field_makes_tags_non_empty() {
        let tags = AudioTags {
            artist: Some("Nina Simone".to_string()),
            ..AudioTags::default()
        };
        assert!(!tags.is_empty());

        let tags = AudioTags {
            duration_seconds: Some(192.4),
            ..AudioTags::default()
        };
        assert!(!tags.is_empty());
    }
}
