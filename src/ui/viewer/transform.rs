// SPDX-License-Identifier: MPL-2.0
//! Zoom and pan state of the artwork open in the viewer.
//!
//! ```text
//!            zoom in (scale > 1)           pointer down
//!   Viewing ---------------------> Zoomed -------------> Panning
//!      ^                             |  ^                  |
//!      |            reset            |  |  pointer up/leave|
//!      +-----------------------------+  +------------------+
//! ```
//!
//! Zooming never touches the offset. Panning only starts while zoomed.

use crate::ui::state::pan::{PanState, Point};
use crate::ui::state::zoom::{ZoomFactor, ZoomScale};
use tracing::debug;

/// Rendering transform: translate by `translate`, then scale by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Point,
    pub scale: f32,
}

impl Transform {
    /// CSS `transform` value for the enlarged image.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

/// Pointer cursor to show over the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone)]
pub struct ImageViewerTransform {
    scale: ZoomScale,
    factor: ZoomFactor,
    offset: Point,
    pan: PanState,
}

impl Default for ImageViewerTransform {
    fn default() -> Self {
        Self::new(ZoomFactor::default())
    }
}

impl ImageViewerTransform {
    #[must_use]
    pub fn new(factor: ZoomFactor) -> Self {
        Self {
            scale: ZoomScale::default(),
            factor,
            offset: Point::ORIGIN,
            pan: PanState::Idle,
        }
    }

    pub fn zoom_in(&mut self) {
        self.scale = self.scale.zoom_in(self.factor);
        debug!(scale = self.scale.value(), "zoom in");
    }

    pub fn zoom_out(&mut self) {
        self.scale = self.scale.zoom_out(self.factor);
        debug!(scale = self.scale.value(), "zoom out");
    }

    /// Starts panning if the image is zoomed. Returns whether panning started.
    pub fn pointer_down(&mut self, pointer: Point) -> bool {
        if self.scale.is_min() {
            return false;
        }
        self.pan.start(pointer, self.offset);
        true
    }

    /// Moves the image with the pointer while panning. Returns whether the offset changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match self.pan.offset_for(pointer) {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    /// Ends panning (pointer released or left the window).
    pub fn pointer_up(&mut self) {
        self.pan.stop();
    }

    /// Back to the initial view: no zoom, no offset, not panning.
    pub fn reset(&mut self) {
        self.scale = ZoomScale::default();
        self.offset = Point::ORIGIN;
        self.pan.stop();
    }

    #[must_use]
    pub fn can_reset(&self) -> bool {
        !self.scale.is_min() || self.offset != Point::ORIGIN
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        !self.scale.is_max()
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        !self.scale.is_min()
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.is_panning()
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform {
            translate: self.offset,
            scale: self.scale.value(),
        }
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.pan.is_panning() {
            Cursor::Grabbing
        } else if !self.scale.is_min() {
            Cursor::Grab
        } else {
            Cursor::Default
        }
    }
}
