// SPDX-License-Identifier: MPL-2.0
//! User interface state.
//!
//! Rendering is left to the front end; this module holds the state it draws
//! from and the transitions user input drives.
//!
//! - [`viewer`] - Lightbox with zoom and pan for a single artwork
//! - [`avatar`] - SVG markup for the built-in profile avatars
//! - [`state`] - Reusable state (zoom scale, pan gesture)

pub mod avatar;
pub mod state;
pub mod viewer;
