// SPDX-License-Identifier: MPL-2.0
//! `#artwork/<id>` location fragments.
//!
//! A fragment naming an artwork in the gallery opens the viewer on it once;
//! it is cleared when consumed so a reload does not reopen it.

use super::state_store::StateStore;
use crate::domain::artwork::ArtworkId;
use crate::storage::KeyValueStore;
use tracing::debug;

const ARTWORK_PREFIX: &str = "artwork/";

/// Extracts the artwork id from a fragment, with or without the leading `#`.
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<ArtworkId> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let id = fragment.strip_prefix(ARTWORK_PREFIX)?;
    if id.is_empty() {
        return None;
    }
    Some(ArtworkId::from(id))
}

/// Resolves `fragment` against the gallery.
///
/// When it names an existing artwork the fragment is cleared and the id is
/// returned. Unknown ids leave the fragment untouched.
pub fn consume<S: KeyValueStore>(fragment: &mut String, state: &StateStore<S>) -> Option<ArtworkId> {
    let id = parse_fragment(fragment)?;
    if state.artwork(&id).is_none() {
        debug!(id = %id, "deep link names an unknown artwork");
        return None;
    }
    fragment.clear();
    Some(id)
}

/// Link that opens `id` in the viewer when visited.
#[must_use]
pub fn share_url(base: &str, id: &ArtworkId) -> String {
    let base = base.split('#').next().unwrap_or(base);
    format!("{base}#{ARTWORK_PREFIX}{id}")
}
