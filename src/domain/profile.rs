// SPDX-License-Identifier: MPL-2.0
//! The local user's profile and the fixed avatar set.

use crate::config::{DEFAULT_DISPLAY_NAME, MAX_DISPLAY_NAME_CHARS};
use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One of the built-in avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AvatarId {
    #[default]
    Avatar1,
    Avatar2,
    Avatar3,
    Avatar4,
    Avatar5,
    Avatar6,
}

impl AvatarId {
    pub const ALL: [AvatarId; 6] = [
        AvatarId::Avatar1,
        AvatarId::Avatar2,
        AvatarId::Avatar3,
        AvatarId::Avatar4,
        AvatarId::Avatar5,
        AvatarId::Avatar6,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            AvatarId::Avatar1 => "avatar1",
            AvatarId::Avatar2 => "avatar2",
            AvatarId::Avatar3 => "avatar3",
            AvatarId::Avatar4 => "avatar4",
            AvatarId::Avatar5 => "avatar5",
            AvatarId::Avatar6 => "avatar6",
        }
    }

    /// Parses a key, rejecting anything outside the avatar set.
    pub fn parse_strict(key: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|avatar| avatar.key() == key)
            .ok_or_else(|| ValidationError::UnknownAvatar(key.to_string()))
    }

    /// Parses a key, falling back to the default avatar when unrecognized.
    #[must_use]
    pub fn parse_lenient(key: &str) -> Self {
        Self::parse_strict(key).unwrap_or_default()
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for AvatarId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// Persisted profiles may carry stale or corrupted keys.
impl<'de> Deserialize<'de> for AvatarId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// Display name and avatar of the local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    #[serde(rename = "avatarUrl")]
    pub avatar: AvatarId,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            avatar: AvatarId::default(),
        }
    }
}

impl Profile {
    /// Builds a validated profile from raw form input.
    ///
    /// The display name is trimmed and must hold between 1 and
    /// [`MAX_DISPLAY_NAME_CHARS`] characters.
    pub fn new(display_name: &str, avatar_key: &str) -> Result<Self, ValidationError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        let chars = display_name.chars().count();
        if chars > MAX_DISPLAY_NAME_CHARS {
            return Err(ValidationError::DisplayNameTooLong { chars });
        }
        let avatar = AvatarId::parse_strict(avatar_key)?;

        Ok(Self {
            display_name: display_name.to_string(),
            avatar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_first_launch() {
        let profile = Profile::default();
        assert_eq!(profile.display_name, "Anonymous Artist");
        assert_eq!(profile.avatar, AvatarId::Avatar1);
    }

    #[test]
    fn new_trims_display_name() {
        let profile = Profile::new("  Ada  ", "avatar3").unwrap();
        assert_eq!(profile.display_name, "Ada");
        assert_eq!(profile.avatar, AvatarId::Avatar3);
    }

    #[test]
    fn new_rejects_blank_and_long_names() {
        assert_eq!(
            Profile::new("   ", "avatar1"),
            Err(ValidationError::EmptyDisplayName)
        );

        let long = "é".repeat(MAX_DISPLAY_NAME_CHARS + 1);
        assert_eq!(
            Profile::new(&long, "avatar1"),
            Err(ValidationError::DisplayNameTooLong {
                chars: MAX_DISPLAY_NAME_CHARS + 1
            })
        );

        let exact = "é".repeat(MAX_DISPLAY_NAME_CHARS);
        assert!(Profile::new(&exact, "avatar1").is_ok());
    }

    #[test]
    fn new_rejects_unknown_avatar() {
        assert_eq!(
            Profile::new("Ada", "avatar99"),
            Err(ValidationError::UnknownAvatar("avatar99".to_string()))
        );
    }

    #[test]
    fn stored_profile_uses_avatar_url_key() {
        let json = serde_json::to_string(&Profile::default()).unwrap();
        assert_eq!(
            json,
            r#"{"displayName":"Anonymous Artist","avatarUrl":"avatar1"}"#
        );
    }

    #[test]
    fn corrupted_avatar_falls_back_to_default() {
        let profile: Profile =
            serde_json::from_str(r#"{"displayName":"Ada","avatarUrl":"https://evil"}"#).unwrap();
        assert_eq!(profile.avatar, AvatarId::Avatar1);
        assert_eq!(profile.display_name, "Ada");
    }
}
