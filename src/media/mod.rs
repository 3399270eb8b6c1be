// SPDX-License-Identifier: MPL-2.0
//! Image bytes in and out of the gallery.
//!
//! Artwork images are addressed by URL: uploads are stored inline as `data:`
//! URIs, while seeded or imported artworks may point at a remote `http(s)`
//! URL or a local file. [`ImageSource`] tells them apart; [`upload`] turns a
//! picked file into a data URI and [`download`] writes any of them to disk.

pub mod data_uri;
pub mod download;
pub mod upload;

pub use download::{download, download_or_open, filename_for, DownloadOutcome, DownloadRequest};
pub use upload::{read_image_as_data_url, UploadDialog, UploadTicket};

use std::path::PathBuf;

/// Where an artwork's image bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Inline `data:` URI.
    DataUri(String),
    /// `http://` or `https://` URL.
    Remote(String),
    /// `file://` URL or plain filesystem path.
    Local(PathBuf),
}

impl ImageSource {
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        if starts_with_ignore_case(url, "data:") {
            ImageSource::DataUri(url.to_string())
        } else if starts_with_ignore_case(url, "http://") || starts_with_ignore_case(url, "https://")
        {
            ImageSource::Remote(url.to_string())
        } else if let Some(path) = url.strip_prefix("file://") {
            ImageSource::Local(PathBuf::from(path))
        } else {
            ImageSource::Local(PathBuf::from(url))
        }
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Guesses the MIME type of image bytes from their signature.
///
/// Raster formats are recognized by the `image` crate; SVG is recognized
/// by its root element since it has no magic number.
#[must_use]
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if let Ok(format) = image_rs::guess_format(bytes) {
        return Some(format.to_mime_type());
    }
    if looks_like_svg(bytes) {
        return Some("image/svg+xml");
    }
    None
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    // The cut may land inside a multi-byte character.
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let text = head.trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// File extension for an `image/*` content type (`image/svg+xml` → `svg`).
///
/// Parameters such as `; charset=...` are ignored. Returns `None` for
/// non-image types and for subtypes that are not safe as a file extension.
#[must_use]
pub fn extension_for_mime(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let subtype = essence.strip_prefix("image/")?;
    match subtype {
        "svg+xml" => Some("svg".to_string()),
        other if is_safe_extension(other) => Some(other.to_string()),
        _ => None,
    }
}

const MAX_EXTENSION_LEN: usize = 16;

fn is_safe_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b"+.-".contains(&b))
        && !ext.starts_with('.')
        && !ext.ends_with('.')
        && !ext.contains("..")
}

/// File extension for image bytes, from their signature.
#[must_use]
pub fn extension_for_bytes(bytes: &[u8]) -> Option<&'static str> {
    if let Ok(format) = image_rs::guess_format(bytes) {
        return format.extensions_str().first().copied();
    }
    looks_like_svg(bytes).then_some("svg")
}


#[cfg(test)]
mod tests {
    use super::fixtures::{PNG_BYTES, SVG_BYTES};
    use super::*;

    #[test]
    fn parse_classifies_sources() {
        assert_eq!(
            ImageSource::parse("data:image/png;base64,AAAA"),
            ImageSource::DataUri("data:image/png;base64,AAAA".into())
        );
        assert_eq!(
            ImageSource::parse("https://picsum.photos/800"),
            ImageSource::Remote("https://picsum.photos/800".into())
        );
        assert_eq!(
            ImageSource::parse("HTTP://example.com/a.png"),
            ImageSource::Remote("HTTP://example.com/a.png".into())
        );
        assert_eq!(
            ImageSource::parse("file:///tmp/a.png"),
            ImageSource::Local(PathBuf::from("/tmp/a.png"))
        );
        assert_eq!(
            ImageSource::parse("pictures/a.png"),
            ImageSource::Local(PathBuf::from("pictures/a.png"))
        );
    }

    #[test]
    fn sniff_recognizes_png_and_svg() {
        assert_eq!(sniff_mime(PNG_BYTES), Some("image/png"));
        assert_eq!(sniff_mime(SVG_BYTES), Some("image/svg+xml"));
        assert_eq!(sniff_mime(b"hello, world"), None);
    }

    #[test]
    fn extension_for_mime_maps_subtype() {
        assert_eq!(extension_for_mime("image/png").as_deref(), Some("png"));
        assert_eq!(extension_for_mime("image/jpeg").as_deref(), Some("jpeg"));
        assert_eq!(extension_for_mime("image/svg+xml").as_deref(), Some("svg"));
        assert_eq!(
            extension_for_mime("image/webp; q=0.9").as_deref(),
            Some("webp")
        );
        assert_eq!(extension_for_mime("application/octet-stream"), None);
        assert_eq!(extension_for_mime("image/"), None);
    }

    #[test]
    fn extension_for_mime_rejects_unsafe_subtypes() {
        assert_eq!(extension_for_mime("image/png/../../x"), None);
        assert_eq!(extension_for_mime("image/..\\evil"), None);
        assert_eq!(extension_for_mime("image/.."), None);
        assert_eq!(extension_for_mime("image/a b"), None);
        assert_eq!(extension_for_mime("image/averyveryverylongsubtype"), None);
        assert_eq!(extension_for_mime("image/x-icon").as_deref(), Some("x-icon"));
    }

    #[test]
    fn svg_sniffing_survives_a_split_character_at_the_cut() {
        for pad in 0..2 {
            let mut svg = String::from("<svg>");
            svg.push_str(&" ".repeat(pad));
            svg.push_str(&"é".repeat(300));
            svg.push_str("</svg>");
            assert_eq!(sniff_mime(svg.as_bytes()), Some("image/svg+xml"));
        }
    }

    #[test]
    fn extension_for_bytes_uses_signature() {
        assert_eq!(extension_for_bytes(PNG_BYTES), Some("png"));
        assert_eq!(extension_for_bytes(SVG_BYTES), Some("svg"));
        assert_eq!(extension_for_bytes(b"plain text"), None);
    }
}
