// SPDX-License-Identifier: MPL-2.0
//! Events the image viewer reacts to.

use crate::ui::state::pan::Point;

/// Keys with a viewer binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Plus,
    Equals,
    Minus,
    Other,
}

impl Key {
    /// Maps a key name (`"Escape"`, `"+"`, `"="`, `"-"`) to a key.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "+" => Key::Plus,
            "=" => Key::Equals,
            "-" => Key::Minus,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    /// Scroll wheel; negative `delta_y` (scrolling up) zooms in.
    Wheel { delta_y: f32 },
    Key(Key),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerLeave,
    /// Toolbar buttons.
    ZoomIn,
    ZoomOut,
    Reset,
}

impl ViewerEvent {
    /// Parses one line of the text event protocol used by the command line:
    ///
    /// `wheel <dy>`, `key <name>`, `down <x> <y>`, `move <x> <y>`, `up`,
    /// `leave`, `zoom-in`, `zoom-out`, `reset`. A bare `+`, `=`, `-` or
    /// `Escape` is read as a key press.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;

        let event = match command {
            "wheel" => ViewerEvent::Wheel {
                delta_y: next_number(&mut parts)?,
            },
            "key" => ViewerEvent::Key(Key::from_name(parts.next()?)),
            "down" => ViewerEvent::PointerDown(next_point(&mut parts)?),
            "move" => ViewerEvent::PointerMove(next_point(&mut parts)?),
            "up" => ViewerEvent::PointerUp,
            "leave" => ViewerEvent::PointerLeave,
            "zoom-in" => ViewerEvent::ZoomIn,
            "zoom-out" => ViewerEvent::ZoomOut,
            "reset" => ViewerEvent::Reset,
            other => match Key::from_name(other) {
                Key::Other => return None,
                key => ViewerEvent::Key(key),
            },
        };
        Some(event)
    }
}

fn next_number<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<f32> {
    parts.next()?.parse().ok()
}

fn next_point<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<Point> {
    let x = next_number(parts)?;
    let y = next_number(parts)?;
    Some(Point::new(x, y))
}
