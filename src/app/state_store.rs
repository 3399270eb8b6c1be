// SPDX-License-Identifier: MPL-2.0
//! Canonical gallery state and its persistence.
//!
//! [`StateStore`] owns the four persisted collections (artworks, owned ids,
//! liked ids, profile). It is constructed once at startup with [`StateStore::load`]
//! and every mutation writes back only the collections it touched.
//!
//! Storage failures never reach the caller as errors: reads fall back to the
//! collection's default, writes are best-effort and the in-memory state stays
//! authoritative. Failures are logged and queued for
//! [`StateStore::take_storage_warnings`] so a front end can show a notice.

use crate::domain::artwork::{Artwork, ArtworkId, NewArtwork};
use crate::domain::profile::Profile;
use crate::error::{StorageError, ValidationError};
use crate::storage::{Collection, KeyValueStore};
use chrono::Utc;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Like state of one artwork after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    /// Whether the local user's like is now applied.
    pub liked: bool,
    /// The artwork's like counter after the toggle.
    pub likes: u32,
}

pub struct StateStore<S: KeyValueStore> {
    store: S,
    artworks: Vec<Artwork>,
    owned_ids: BTreeSet<ArtworkId>,
    liked_ids: BTreeSet<ArtworkId>,
    profile: Profile,
    storage_warnings: Vec<StorageError>,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Loads every collection from `store`.
    ///
    /// Each key is loaded on its own: a missing or unreadable key falls back to
    /// its default without affecting the others. The failures met along the
    /// way are returned (and logged).
    pub fn load(store: S) -> (Self, Vec<StorageError>) {
        let mut warnings = Vec::new();

        let artworks: Vec<Artwork> =
            load_collection(&store, Collection::Artworks, &mut warnings).unwrap_or_default();
        let owned_ids = load_collection(&store, Collection::OwnedArtworkIds, &mut warnings)
            .unwrap_or_default();
        let liked_ids = load_collection(&store, Collection::LikedArtworkIds, &mut warnings)
            .unwrap_or_default();
        let profile =
            load_collection(&store, Collection::Profile, &mut warnings).unwrap_or_default();

        debug!(
            artworks = artworks.len(),
            failures = warnings.len(),
            "gallery state loaded"
        );

        let state = Self {
            store,
            artworks,
            owned_ids,
            liked_ids,
            profile,
            storage_warnings: Vec::new(),
        };
        (state, warnings)
    }

    /// Serializes `collection` and writes it under its storage key.
    ///
    /// Returns the failure, if any. A failure is also logged and queued in
    /// the storage warnings; the in-memory value is kept either way.
    pub fn persist(&mut self, collection: Collection) -> Option<StorageError> {
        let key = collection.key();
        let serialized = match collection {
            Collection::Artworks => serde_json::to_string(&self.artworks),
            Collection::OwnedArtworkIds => serde_json::to_string(&self.owned_ids),
            Collection::LikedArtworkIds => serde_json::to_string(&self.liked_ids),
            Collection::Profile => serde_json::to_string(&self.profile),
        };

        let result = serialized
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                message: err.to_string(),
            })
            .and_then(|json| self.store.set(key, &json));

        match result {
            Ok(()) => {
                debug!(key, "collection persisted");
                None
            }
            Err(err) => {
                warn!(key, error = %err, "failed to persist collection");
                self.storage_warnings.push(err.clone());
                Some(err)
            }
        }
    }

    /// Adds a new artwork at the front of the gallery, owned by the local user.
    pub fn upload(&mut self, input: NewArtwork) -> Result<&Artwork, ValidationError> {
        input.validate()?;

        let id = ArtworkId::generate();
        let artwork = input.into_artwork(id.clone(), Utc::now());
        info!(id = %id, title = %artwork.title, "artwork uploaded");

        self.artworks.insert(0, artwork);
        self.owned_ids.insert(id);
        self.persist(Collection::Artworks);
        self.persist(Collection::OwnedArtworkIds);

        Ok(&self.artworks[0])
    }

    /// Removes the artwork with `id` along with its ownership and like marks.
    ///
    /// Absent ids are a no-op. Ownership is not checked; see
    /// [`Self::delete_owned`] for the guarded variant. Returns whether an
    /// artwork was removed.
    pub fn delete(&mut self, id: &ArtworkId) -> bool {
        let before = self.artworks.len();
        self.artworks.retain(|art| &art.id != id);
        let removed = self.artworks.len() != before;
        let was_owned = self.owned_ids.remove(id);
        let was_liked = self.liked_ids.remove(id);

        if removed {
            info!(id = %id, "artwork deleted");
            self.persist(Collection::Artworks);
        }
        if was_owned {
            self.persist(Collection::OwnedArtworkIds);
        }
        if was_liked {
            self.persist(Collection::LikedArtworkIds);
        }
        removed
    }

    /// Like [`Self::delete`], but only for artworks the local user uploaded.
    pub fn delete_owned(&mut self, id: &ArtworkId) -> Result<bool, ValidationError> {
        if !self.owned_ids.contains(id) {
            return Err(ValidationError::NotOwner(id.to_string()));
        }
        Ok(self.delete(id))
    }

    /// Flips the local user's like on `id`.
    ///
    /// The counter only moves down when the id was in the liked set, so it
    /// stays in lockstep with the set and never goes negative. Returns `None`
    /// when no artwork has this id.
    pub fn toggle_like(&mut self, id: &ArtworkId) -> Option<LikeState> {
        let Some(artwork) = self.artworks.iter_mut().find(|art| &art.id == id) else {
            debug!(id = %id, "like toggled on unknown artwork");
            return None;
        };

        let liked = if self.liked_ids.remove(id) {
            artwork.likes = artwork.likes.saturating_sub(1);
            false
        } else {
            self.liked_ids.insert(id.clone());
            artwork.likes = artwork.likes.saturating_add(1);
            true
        };
        let state = LikeState {
            liked,
            likes: artwork.likes,
        };

        self.persist(Collection::Artworks);
        self.persist(Collection::LikedArtworkIds);
        Some(state)
    }

    /// Replaces the profile wholesale after validating the form input.
    pub fn update_profile(
        &mut self,
        display_name: &str,
        avatar_key: &str,
    ) -> Result<&Profile, ValidationError> {
        let profile = Profile::new(display_name, avatar_key)?;
        info!(name = %profile.display_name, avatar = %profile.avatar, "profile updated");

        self.profile = profile;
        self.persist(Collection::Profile);
        Ok(&self.profile)
    }

    /// Artworks whose title, artist or a tag contains `query`, case-insensitively.
    ///
    /// A blank query returns the whole gallery. Order is preserved.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Artwork> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.artworks.iter().collect();
        }
        self.artworks
            .iter()
            .filter(|art| art.matches(&needle))
            .collect()
    }

    /// All artworks, most recent upload first.
    #[must_use]
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    #[must_use]
    pub fn artwork(&self, id: &ArtworkId) -> Option<&Artwork> {
        self.artworks.iter().find(|art| &art.id == id)
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn is_owned(&self, id: &ArtworkId) -> bool {
        self.owned_ids.contains(id)
    }

    #[must_use]
    pub fn is_liked(&self, id: &ArtworkId) -> bool {
        self.liked_ids.contains(id)
    }

    #[must_use]
    pub fn owned_ids(&self) -> &BTreeSet<ArtworkId> {
        &self.owned_ids
    }

    #[must_use]
    pub fn liked_ids(&self) -> &BTreeSet<ArtworkId> {
        &self.liked_ids
    }

    /// Drains the write failures collected since the last call.
    pub fn take_storage_warnings(&mut self) -> Vec<StorageError> {
        std::mem::take(&mut self.storage_warnings)
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Gives the backing store back, dropping the in-memory state.
    pub fn into_store(self) -> S {
        self.store
    }
}

fn load_collection<S: KeyValueStore, T: DeserializeOwned>(
    store: &S,
    collection: Collection,
    warnings: &mut Vec<StorageError>,
) -> Option<T> {
    let key = collection.key();
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(key, error = %err, "falling back to default");
            warnings.push(err);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            let err = StorageError::Parse {
                key: key.to_string(),
                message: err.to_string(),
            };
            warn!(key, error = %err, "falling back to default");
            warnings.push(err);
            None
        }
    }
}
