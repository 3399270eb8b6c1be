// SPDX-License-Identifier: MPL-2.0
//! Domain layer - gallery entities and their validation rules.
//!
//! # Modules
//!
//! - [`artwork`]: Uploaded images ([`Artwork`](artwork::Artwork),
//!   [`ArtworkId`](artwork::ArtworkId), [`NewArtwork`](artwork::NewArtwork))
//! - [`comment`]: Per-artwork comment threads ([`CommentThread`](comment::CommentThread))
//! - [`profile`]: The local user ([`Profile`](profile::Profile),
//!   [`AvatarId`](profile::AvatarId))

pub mod artwork;
pub mod comment;
pub mod profile;

pub use artwork::{Artwork, ArtworkId, NewArtwork};
pub use comment::{Comment, CommentThread};
pub use profile::{AvatarId, Profile};
