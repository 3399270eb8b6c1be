// SPDX-License-Identifier: MPL-2.0
//! Image viewer: the lightbox an artwork opens in.
//!
//! At most one artwork is open at a time. Its zoom/pan state lives only as
//! long as it stays open; opening another artwork or reopening the same one
//! always starts from the initial view.

pub mod input;
pub mod transform;

pub use input::{Key, ViewerEvent};
pub use transform::{Cursor, ImageViewerTransform, Transform};

use crate::domain::artwork::ArtworkId;
use crate::ui::state::zoom::ZoomFactor;
use tracing::debug;

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerOutcome {
    /// Keep the viewer on screen and redraw.
    Continue,
    /// The viewer closed itself.
    Close,
    /// No artwork is open; the event was dropped.
    Ignored,
}

#[derive(Debug, Clone)]
struct Session {
    artwork: ArtworkId,
    transform: ImageViewerTransform,
}

#[derive(Debug, Clone, Default)]
pub struct ImageViewer {
    zoom_factor: ZoomFactor,
    session: Option<Session>,
}

impl ImageViewer {
    #[must_use]
    pub fn new(zoom_factor: ZoomFactor) -> Self {
        Self {
            zoom_factor,
            session: None,
        }
    }

    /// Opens `artwork` at the initial view, replacing whatever was open.
    pub fn open(&mut self, artwork: ArtworkId) {
        debug!(id = %artwork, "viewer opened");
        self.session = Some(Session {
            artwork,
            transform: ImageViewerTransform::new(self.zoom_factor),
        });
    }

    /// Closes the viewer and discards its transform.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(id = %session.artwork, "viewer closed");
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn artwork(&self) -> Option<&ArtworkId> {
        self.session.as_ref().map(|s| &s.artwork)
    }

    #[must_use]
    pub fn transform(&self) -> Option<&ImageViewerTransform> {
        self.session.as_ref().map(|s| &s.transform)
    }

    /// Applies one input event to the open artwork's transform.
    pub fn handle(&mut self, event: ViewerEvent) -> ViewerOutcome {
        if self.session.is_some() && event == ViewerEvent::Key(Key::Escape) {
            self.close();
            return ViewerOutcome::Close;
        }
        let Some(session) = self.session.as_mut() else {
            return ViewerOutcome::Ignored;
        };
        let transform = &mut session.transform;

        match event {
            ViewerEvent::Key(Key::Plus | Key::Equals) | ViewerEvent::ZoomIn => {
                transform.zoom_in();
            }
            ViewerEvent::Key(Key::Minus) | ViewerEvent::ZoomOut => transform.zoom_out(),
            ViewerEvent::Key(Key::Escape | Key::Other) => {}
            ViewerEvent::Wheel { delta_y } => {
                if delta_y < 0.0 {
                    transform.zoom_in();
                } else {
                    transform.zoom_out();
                }
            }
            ViewerEvent::PointerDown(point) => {
                transform.pointer_down(point);
            }
            ViewerEvent::PointerMove(point) => {
                transform.pointer_move(point);
            }
            ViewerEvent::PointerUp | ViewerEvent::PointerLeave => transform.pointer_up(),
            ViewerEvent::Reset => transform.reset(),
        }
        ViewerOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use crate::ui::state::pan::Point;

    fn zoomed_and_panned(viewer: &mut ImageViewer) {
        for _ in 0..4 {
            viewer.handle(ViewerEvent::ZoomIn);
        }
        viewer.handle(ViewerEvent::PointerDown(Point::new(0.0, 0.0)));
        viewer.handle(ViewerEvent::PointerMove(Point::new(50.0, 20.0)));
        viewer.handle(ViewerEvent::PointerUp);
    }

    #[test]
    fn events_without_open_artwork_are_ignored() {
        let mut viewer = ImageViewer::default();
        assert_eq!(viewer.handle(ViewerEvent::ZoomIn), ViewerOutcome::Ignored);
        assert!(viewer.transform().is_none());
    }

    #[test]
    fn opening_another_artwork_resets_transform() {
        let mut viewer = ImageViewer::default();
        viewer.open(ArtworkId::from("a"));
        zoomed_and_panned(&mut viewer);
        let before = viewer.transform().unwrap();
        assert!(before.scale() > 4.0);
        assert_eq!(before.offset(), Point::new(50.0, 20.0));

        viewer.open(ArtworkId::from("b"));

        let after = viewer.transform().unwrap();
        assert_eq!(viewer.artwork(), Some(&ArtworkId::from("b")));
        assert_abs_diff_eq!(after.scale(), 1.0);
        assert_eq!(after.offset(), Point::ORIGIN);
    }

    #[test]
    fn reopening_same_artwork_starts_fresh() {
        let mut viewer = ImageViewer::default();
        viewer.open(ArtworkId::from("a"));
        zoomed_and_panned(&mut viewer);
        viewer.close();
        assert!(!viewer.is_open());

        viewer.open(ArtworkId::from("a"));
        assert!(!viewer.transform().unwrap().can_reset());
    }

    #[test]
    fn escape_closes_viewer() {
        let mut viewer = ImageViewer::default();
        viewer.open(ArtworkId::from("a"));
        assert_eq!(
            viewer.handle(ViewerEvent::Key(Key::Escape)),
            ViewerOutcome::Close
        );
        assert!(!viewer.is_open());
    }

    #[test]
    fn wheel_and_keys_map_to_zoom() {
        let mut viewer = ImageViewer::default();
        viewer.open(ArtworkId::from("a"));

        viewer.handle(ViewerEvent::Wheel { delta_y: -1.0 });
        viewer.handle(ViewerEvent::Key(Key::Equals));
        assert_abs_diff_eq!(viewer.transform().unwrap().scale(), 2.25);

        viewer.handle(ViewerEvent::Wheel { delta_y: 3.0 });
        viewer.handle(ViewerEvent::Key(Key::Minus));
        assert_abs_diff_eq!(viewer.transform().unwrap().scale(), 1.0);
    }

    #[test]
    fn pointer_leave_ends_panning() {
        let mut viewer = ImageViewer::default();
        viewer.open(ArtworkId::from("a"));
        viewer.handle(ViewerEvent::ZoomIn);
        viewer.handle(ViewerEvent::PointerDown(Point::new(1.0, 1.0)));
        assert!(viewer.transform().unwrap().is_panning());

        viewer.handle(ViewerEvent::PointerLeave);

        assert!(!viewer.transform().unwrap().is_panning());
    }
}
