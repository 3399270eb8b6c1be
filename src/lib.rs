// SPDX-License-Identifier: MPL-2.0
//! `gallery_lens` is a local art gallery with a zoom/pan image viewer.
//!
//! Artworks, ownership marks, likes and the user profile are persisted one
//! JSON document per collection and survive restarts. The viewer keeps its
//! zoom and pan state per opened artwork.

#![doc(html_root_url = "https://docs.rs/gallery_lens/0.1.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod media;
pub mod storage;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
