// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Value types and small state machines shared by the viewer, kept apart
//! from the components that drive them.

pub mod pan;
pub mod zoom;

// Re-export commonly used types for convenience
pub use pan::{PanState, Point};
pub use zoom::{ZoomFactor, ZoomScale};
