// SPDX-License-Identifier: MPL-2.0
//! Artwork entity and upload input.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque artwork identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(String);

impl ArtworkId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArtworkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ArtworkId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single uploaded image with its metadata.
///
/// Serialized with the field names of the `artworks` storage key
/// (`imageUrl`, ISO-8601 `timestamp`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: ArtworkId,
    pub image_url: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: u32,
}

/// Older galleries stored `null` for absent optional fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCount {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

/// Like counter as found on disk: `null`, negative or fractional values
/// are clamped into `0..=u32::MAX`.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Option::<StoredCount>::deserialize(deserializer)? {
        None => 0,
        Some(StoredCount::Unsigned(n)) => u32::try_from(n).unwrap_or(u32::MAX),
        Some(StoredCount::Signed(n)) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
        // Saturating cast: NaN and negatives become 0.
        Some(StoredCount::Float(f)) => f as u32,
    };
    Ok(count)
}

impl Artwork {
    /// Returns whether title, artist or any tag contains `needle`.
    ///
    /// `needle` must already be lower-cased and trimmed.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.artist.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Upload input: everything the user supplies for a new artwork.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewArtwork {
    pub title: String,
    pub artist: String,
    pub tags: Vec<String>,
    pub image_url: String,
}

impl NewArtwork {
    /// Checks the required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.image_url.trim().is_empty() {
            return Err(ValidationError::MissingImage);
        }
        Ok(())
    }

    /// Builds the artwork with a fresh id, the given instant and no likes.
    pub(crate) fn into_artwork(self, id: ArtworkId, timestamp: DateTime<Utc>) -> Artwork {
        Artwork {
            id,
            image_url: self.image_url,
            title: self.title,
            artist: self.artist,
            tags: self.tags,
            timestamp,
            likes: 0,
        }
    }
}

/// Splits a comma separated tag field, dropping blanks.
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
