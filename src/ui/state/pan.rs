// SPDX-License-Identifier: MPL-2.0
//! Pan state management
//!
//! Handles grab-and-drag interaction state for moving a zoomed image.

use std::ops::Sub;

/// A position or offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Whether a pan gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    /// Pointer position minus the offset at the moment the pan began.
    Panning { anchor: Point },
}

impl PanState {
    /// Enters the panning state for a pointer at `pointer` over an image at `offset`.
    pub fn start(&mut self, pointer: Point, offset: Point) {
        *self = PanState::Panning {
            anchor: pointer - offset,
        };
    }

    /// Leaves the panning state.
    pub fn stop(&mut self) {
        *self = PanState::Idle;
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, PanState::Panning { .. })
    }

    /// Image offset for the pointer at `pointer`, or `None` when idle.
    #[must_use]
    pub fn offset_for(&self, pointer: Point) -> Option<Point> {
        match self {
            PanState::Idle => None,
            PanState::Panning { anchor } => Some(pointer - *anchor),
        }
    }
}
