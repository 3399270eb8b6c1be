// SPDX-License-Identifier: MPL-2.0
//! Built-in profile avatars.
//!
//! Every [`AvatarId`] maps to a function returning its SVG markup. The table
//! is closed: a key that is not part of the avatar set renders as the default
//! avatar instead of failing.
//!
//! All avatars share the "beam" layout: a round badge with a tilted shape
//! behind a two-eyed face.

use crate::domain::profile::AvatarId;

/// Renders an avatar as standalone SVG markup.
pub type AvatarRenderer = fn() -> &'static str;

/// Defines an avatar renderer from its palette and face placement.
macro_rules! beam_avatar {
    (
        $name:ident,
        background: $bg:literal,
        shape: ($shape_transform:literal, $shape_fill:literal, $shape_rx:literal),
        face: ($face_transform:literal, $ink:literal),
        mouth: open
    ) => {
        fn $name() -> &'static str {
            concat!(
                r#"<svg viewBox="0 0 36 36" fill="none" role="img" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<mask id="mask__beam" maskUnits="userSpaceOnUse" x="0" y="0" width="36" height="36">"#,
                r##"<rect width="36" height="36" rx="72" fill="#FFFFFF"/></mask>"##,
                r#"<g mask="url(#mask__beam)">"#,
                r#"<rect width="36" height="36" fill=""#, $bg, r#""/>"#,
                r#"<rect x="0" y="0" width="36" height="36" transform=""#, $shape_transform,
                r#"" fill=""#, $shape_fill, r#"" rx=""#, $shape_rx, r#""/>"#,
                r#"<g transform=""#, $face_transform, r#"">"#,
                r#"<path d="M13,21 a1,1 0 0,0 10,0" fill=""#, $ink, r#""/>"#,
                r#"<rect x="12" y="14" width="3.5" height="3.5" rx="1" fill=""#, $ink, r#""/>"#,
                r#"<rect x="20" y="14" width="3.5" height="3.5" rx="1" fill=""#, $ink, r#""/>"#,
                "</g></g></svg>"
            )
        }
    };
    (
        $name:ident,
        background: $bg:literal,
        shape: ($shape_transform:literal, $shape_fill:literal, $shape_rx:literal),
        face: ($face_transform:literal, $ink:literal),
        mouth: smile
    ) => {
        fn $name() -> &'static str {
            concat!(
                r#"<svg viewBox="0 0 36 36" fill="none" role="img" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<mask id="mask__beam" maskUnits="userSpaceOnUse" x="0" y="0" width="36" height="36">"#,
                r##"<rect width="36" height="36" rx="72" fill="#FFFFFF"/></mask>"##,
                r#"<g mask="url(#mask__beam)">"#,
                r#"<rect width="36" height="36" fill=""#, $bg, r#""/>"#,
                r#"<rect x="0" y="0" width="36" height="36" transform=""#, $shape_transform,
                r#"" fill=""#, $shape_fill, r#"" rx=""#, $shape_rx, r#""/>"#,
                r#"<g transform=""#, $face_transform, r#"">"#,
                r#"<path d="M15 21c2 1 4 1 6 0" stroke=""#, $ink, r#"" fill="none" stroke-linecap="round"/>"#,
                r#"<rect x="11" y="14" width="3.5" height="3.5" rx="1" fill=""#, $ink, r#""/>"#,
                r#"<rect x="21" y="14" width="3.5" height="3.5" rx="1" fill=""#, $ink, r#""/>"#,
                "</g></g></svg>"
            )
        }
    };
}

beam_avatar!(
    avatar1,
    background: "#f0db59",
    shape: ("translate(4 4) rotate(340 18 18) scale(1.1)", "#000000", "36"),
    face: ("translate(2 -5) rotate(0 18 18)", "#FFFFFF"),
    mouth: open
);

beam_avatar!(
    avatar2,
    background: "#75c043",
    shape: ("translate(-5 5) rotate(10 18 18) scale(1.1)", "#2d2d2d", "36"),
    face: ("translate(-5 0) rotate(0 18 18)", "#FFFFFF"),
    mouth: smile
);

beam_avatar!(
    avatar3,
    background: "#c20d0d",
    shape: ("translate(5 -5) rotate(220 18 18) scale(1.2)", "#ffffff", "36"),
    face: ("translate(-5 -5) rotate(0 18 18)", "#000000"),
    mouth: open
);

beam_avatar!(
    avatar4,
    background: "#366882",
    shape: ("translate(1 -3) rotate(318 18 18) scale(1.2)", "#e5e5e5", "6"),
    face: ("translate(7 -3) rotate(0 18 18)", "#000000"),
    mouth: open
);

beam_avatar!(
    avatar5,
    background: "#405457",
    shape: ("translate(2 6) rotate(140 18 18) scale(1)", "#f0db59", "36"),
    face: ("translate(-6 0) rotate(10 18 18)", "#000000"),
    mouth: smile
);

beam_avatar!(
    avatar6,
    background: "#e8772e",
    shape: ("translate(-3 -4) rotate(48 18 18) scale(1.1)", "#2b2b4b", "10"),
    face: ("translate(3 2) rotate(-6 18 18)", "#FFFFFF"),
    mouth: smile
);

/// Renderer for `avatar`.
#[must_use]
pub fn renderer(avatar: AvatarId) -> AvatarRenderer {
    match avatar {
        AvatarId::Avatar1 => avatar1,
        AvatarId::Avatar2 => avatar2,
        AvatarId::Avatar3 => avatar3,
        AvatarId::Avatar4 => avatar4,
        AvatarId::Avatar5 => avatar5,
        AvatarId::Avatar6 => avatar6,
    }
}

/// SVG markup for `avatar`.
#[must_use]
pub fn render(avatar: AvatarId) -> &'static str {
    renderer(avatar)()
}

/// SVG markup for a stored avatar key; unknown keys render the default avatar.
#[must_use]
pub fn render_key(key: &str) -> &'static str {
    render(AvatarId::parse_lenient(key))
}
