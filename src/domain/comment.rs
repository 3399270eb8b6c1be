// SPDX-License-Identifier: MPL-2.0
//! Per-artwork comments.
//!
//! Threads live only as long as the view that owns them; nothing here is
//! written to the durable store.

use super::profile::Profile;
use crate::error::ValidationError;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub author: Profile,
}

/// Comments on one artwork, newest first.
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
    next_id: u64,
}

impl CommentThread {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a comment authored by a snapshot of `author`.
    pub fn add(&mut self, text: &str, author: &Profile) -> Result<&Comment, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyComment);
        }

        self.next_id += 1;
        self.comments.insert(
            0,
            Comment {
                id: self.next_id,
                text: text.to_string(),
                timestamp: Utc::now(),
                author: author.clone(),
            },
        );
        Ok(&self.comments[0])
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
