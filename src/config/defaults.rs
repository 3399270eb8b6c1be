// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Viewer scale bounds and zoom factor
//! - **Profile**: Display name limits and the default profile
//! - **Logging**: Fallback tracing filter

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Scale of the viewer when an artwork is opened (1.0 = fitted image).
pub const MIN_ZOOM: f32 = 1.0;

/// Maximum scale of the viewer.
pub const MAX_ZOOM: f32 = 8.0;

/// Multiplier applied by one zoom-in step (divisor for zoom-out).
pub const DEFAULT_ZOOM_FACTOR: f32 = 1.5;

/// Smallest accepted zoom factor from `settings.toml`.
pub const MIN_ZOOM_FACTOR: f32 = 1.05;

/// Largest accepted zoom factor from `settings.toml`.
pub const MAX_ZOOM_FACTOR: f32 = 4.0;

// ==========================================================================
// Profile Defaults
// ==========================================================================

/// Display name used until the user saves a profile.
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous Artist";

/// Maximum display name length, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Tracing filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "gallery_lens=info";
