//! Tag reading via lofty
//!
//! Lofty's probe dispatches on the detected container, so every recognized
//! format funnels into one uniform [`AudioTags`] record.

use crate::error::{MetadataError, Result};
use lofty::{Accessor, AudioFile, Probe, TaggedFileExt};
use shellac_core::AudioTags;
use std::path::Path;

/// Read tags and audio properties from a file
///
/// # Errors
/// Returns an error if the file cannot be opened or its container cannot be
/// parsed. Callers cataloging files should prefer [`read_tags_or_empty`].
pub fn read_tags(path: &Path) -> Result<AudioTags> {
    if !path.exists() {
        return Err(MetadataError::FileNotFound(path.display().to_string()));
    }

    let tagged_file = Probe::open(path)
        .map_err(|e| MetadataError::ParseError(format!("failed to open file: {}", e)))?
        .read()
        .map_err(|e| MetadataError::ParseError(format!("failed to read container: {}", e)))?;

    // Prefer the primary tag (ID3v2 for MP3, Vorbis comments for OGG/FLAC)
    let tag = tagged_file.primary_tag().or(tagged_file.first_tag());

    let properties = tagged_file.properties();
    let duration_seconds = Some(properties.duration().as_secs_f64());
    let bitrate = properties.audio_bitrate();
    let sample_rate = properties.sample_rate();

    let mut tags = match tag {
        Some(tag) => AudioTags {
            title: tag.title().map(|s| s.to_string()),
            artist: tag.artist().map(|s| s.to_string()),
            album: tag.album().map(|s| s.to_string()),
            album_artist: tag
                .get_string(&lofty::ItemKey::AlbumArtist)
                .map(|s| s.to_string()),
            genre: tag.genre().map(|s| s.to_string()),
            year: tag.year().map(|y| y as i32).or_else(|| {
                tag.get_string(&lofty::ItemKey::RecordingDate)
                    .and_then(parse_year)
            }),
            track_number: tag.track(),
            ..AudioTags::default()
        },
        None => AudioTags::default(),
    };

    tags.duration_seconds = duration_seconds;
    tags.bitrate = bitrate;
    tags.sample_rate = sample_rate;

    Ok(tags)
}

/// Read tags, degrading to an empty record on any extraction failure
///
/// A malformed tag container must never abort a scan: the file is still
/// hashed and cataloged, just untagged.
pub fn read_tags_or_empty(path: &Path) -> AudioTags {
    match read_tags(path) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!("no tags extracted from {}: {}", path.display(), e);
            AudioTags::default()
        }
    }
}

/// Parse a year out of a date tag, tolerating values like `"1999-05"` or
/// `" 2003 "`. Garbage yields `None`.
fn parse_year(raw: &str) -> Option<i32> {
    let lead = raw.split('-').next()?;
    let lead = lead.trim().replace(' ', "");
    if lead.is_empty() {
        return None;
    }
    lead.parse().ok()
}
