// SPDX-License-Identifier: MPL-2.0
//! Durable key/value storage.
//!
//! The gallery persists each collection as one JSON document under a stable
//! key. Backends only move strings in and out; serialization stays with
//! [`crate::app::state_store::StateStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// A string key/value store that survives process restarts.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// The four persisted collections and their storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Artworks,
    OwnedArtworkIds,
    LikedArtworkIds,
    Profile,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Artworks,
        Collection::OwnedArtworkIds,
        Collection::LikedArtworkIds,
        Collection::Profile,
    ];

    /// Stable storage key of the collection.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Collection::Artworks => "artworks",
            Collection::OwnedArtworkIds => "ownedArtworkIds",
            Collection::LikedArtworkIds => "likedArtworkIds",
            Collection::Profile => "profile",
        }
    }
}
