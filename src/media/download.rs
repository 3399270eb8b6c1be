// SPDX-License-Identifier: MPL-2.0
//! Saving an artwork's image to disk.
//!
//! The file is named after the artwork (`<title>-by-<artist>.<ext>`) and never
//! replaces an existing file. When the bytes cannot be fetched or written,
//! [`download_or_open`] hands the URL to the system opener instead.

use super::{data_uri, extension_for_bytes, extension_for_mime, ImageSource};
use crate::domain::artwork::Artwork;
use crate::error::TransferError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

const FALLBACK_EXTENSION: &str = "jpg";
const FALLBACK_STEM: &str = "artwork";
const USER_AGENT: &str = concat!("gallery_lens/", env!("CARGO_PKG_VERSION"));

/// What to download and how to name it.
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequest<'a> {
    pub image_url: &'a str,
    pub title: &'a str,
    pub artist: &'a str,
}

impl<'a> From<&'a Artwork> for DownloadRequest<'a> {
    fn from(artwork: &'a Artwork) -> Self {
        Self {
            image_url: &artwork.image_url,
            title: &artwork.title,
            artist: &artwork.artist,
        }
    }
}

/// How a download request was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    /// The bytes could not be saved; the URL was opened in the default
    /// application instead.
    OpenedExternally,
}

struct Fetched {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// Lower-cases `input`, collapses every run of characters outside `[a-z0-9]`
/// into one `-` and trims leading/trailing dashes.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// File name for a downloaded artwork.
///
/// An empty sanitized title becomes `artwork`; the `-by-<artist>` part is
/// left out when the sanitized artist is empty.
#[must_use]
pub fn filename_for(title: &str, artist: &str, extension: &str) -> String {
    let mut stem = sanitize(title);
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }
    let artist = sanitize(artist);
    if !artist.is_empty() {
        stem.push_str("-by-");
        stem.push_str(&artist);
    }
    format!("{}.{}", stem, extension)
}

/// Fetches the image and writes it into `dir`.
///
/// # Errors
///
/// Returns a [`TransferError`] if the bytes cannot be fetched, decoded or
/// written.
pub async fn download(request: DownloadRequest<'_>, dir: &Path) -> Result<PathBuf, TransferError> {
    let fetched = fetch(&ImageSource::parse(request.image_url)).await?;

    let extension = fetched
        .content_type
        .as_deref()
        .and_then(extension_for_mime)
        .or_else(|| extension_for_bytes(&fetched.bytes).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    let filename = filename_for(request.title, request.artist, &extension);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| TransferError::Write(format!("{}: {}", dir.display(), e)))?;
    let path = write_new_file(dir, &filename, &fetched.bytes).await?;

    info!(path = %path.display(), size = fetched.bytes.len(), "artwork downloaded");
    Ok(path)
}

/// [`download`], falling back to opening the URL with the system handler.
///
/// # Errors
///
/// Returns [`TransferError::Open`] only when both the download and the
/// fallback failed.
pub async fn download_or_open(
    request: DownloadRequest<'_>,
    dir: &Path,
) -> Result<DownloadOutcome, TransferError> {
    match download(request, dir).await {
        Ok(path) => Ok(DownloadOutcome::Saved(path)),
        Err(e) => {
            warn!(error = %e, "download failed, opening image externally");
            let target = match ImageSource::parse(request.image_url) {
                ImageSource::Local(path) => path.into_os_string(),
                ImageSource::DataUri(url) | ImageSource::Remote(url) => url.into(),
            };
            open::that(&target).map_err(|open_err| {
                error!(error = %open_err, "failed to open image externally");
                TransferError::Open(open_err.to_string())
            })?;
            Ok(DownloadOutcome::OpenedExternally)
        }
    }
}

async fn fetch(source: &ImageSource) -> Result<Fetched, TransferError> {
    match source {
        ImageSource::DataUri(uri) => {
            let decoded = data_uri::decode(uri)?;
            Ok(Fetched {
                bytes: decoded.bytes,
                content_type: decoded.mime,
            })
        }
        ImageSource::Remote(url) => {
            let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
            let response = client.get(url).send().await?.error_for_status()?;
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes().await?.to_vec();
            Ok(Fetched {
                bytes,
                content_type,
            })
        }
        ImageSource::Local(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| TransferError::Read(format!("{}: {}", path.display(), e)))?;
            Ok(Fetched {
                bytes,
                content_type: None,
            })
        }
    }
}

/// Writes `bytes` to `dir/filename`, or `stem-1.ext`, `stem-2.ext`, ... if
/// that name is taken.
async fn write_new_file(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, TransferError> {
    let (stem, extension) = filename.rsplit_once('.').unwrap_or((filename, ""));
    let mut attempt = 0u32;
    loop {
        let candidate = if attempt == 0 {
            dir.join(filename)
        } else if extension.is_empty() {
            dir.join(format!("{}-{}", stem, attempt))
        } else {
            dir.join(format!("{}-{}.{}", stem, attempt, extension))
        };

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(mut file) => {
                let write_error =
                    |e: std::io::Error| TransferError::Write(format!("{}: {}", candidate.display(), e));
                file.write_all(bytes).await.map_err(write_error)?;
                file.flush().await.map_err(write_error)?;
                return Ok(candidate);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => {
                return Err(TransferError::Write(format!(
                    "{}: {}",
                    candidate.display(),
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fixtures::{PNG_BYTES, SVG_BYTES};
    use tempfile::tempdir;

    fn request<'a>(image_url: &'a str, title: &'a str, artist: &'a str) -> DownloadRequest<'a> {
        DownloadRequest {
            image_url,
            title,
            artist,
        }
    }

    #[test]
    fn sanitize_collapses_and_trims() {
        assert_eq!(sanitize("  Starry Night!! "), "starry-night");
        assert_eq!(sanitize("A--B__C"), "a-b-c");
        assert_eq!(sanitize("Été 2024"), "t-2024");
        assert_eq!(sanitize("!!!"), "");
    }

    #[test]
    fn filename_includes_artist_when_present() {
        assert_eq!(
            filename_for("Starry Night", "Vincent van Gogh", "png"),
            "starry-night-by-vincent-van-gogh.png"
        );
        assert_eq!(filename_for("Sunset", "", "jpeg"), "sunset.jpeg");
        assert_eq!(filename_for("Sunset", "???", "jpeg"), "sunset.jpeg");
        assert_eq!(filename_for("", "Ann", "svg"), "artwork-by-ann.svg");
    }

    #[tokio::test]
    async fn downloads_data_uri_with_declared_type() {
        let dir = tempdir().expect("failed to create temp dir");
        let url = data_uri::encode("image/svg+xml", SVG_BYTES);

        let path = download(request(&url, "Blue Square", "Ann"), dir.path())
            .await
            .expect("download should succeed");

        assert_eq!(path, dir.path().join("blue-square-by-ann.svg"));
        assert_eq!(std::fs::read(&path).unwrap(), SVG_BYTES);
    }

    #[tokio::test]
    async fn percent_encoded_svg_is_written_decoded() {
        let dir = tempdir().expect("failed to create temp dir");
        let url = "data:image/svg+xml,%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22%3E%3C%2Fsvg%3E";

        let path = download(request(url, "Inline", ""), dir.path())
            .await
            .expect("download should succeed");

        assert_eq!(path, dir.path().join("inline.svg"));
        assert_eq!(
            std::fs::read(&path).unwrap(),
            br#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#
        );
    }

    #[tokio::test]
    async fn unsafe_declared_type_falls_back_to_sniffing() {
        let dir = tempdir().expect("failed to create temp dir");
        let url = format!(
            "data:image/png/../../x;base64,{}",
            data_uri::encode("image/png", PNG_BYTES)
                .split_once(',')
                .unwrap()
                .1
        );

        let path = download(request(&url, "Sunset", ""), dir.path())
            .await
            .expect("download should succeed");

        assert_eq!(path, dir.path().join("sunset.png"));
        assert_eq!(std::fs::read(&path).unwrap(), PNG_BYTES);
    }

    #[tokio::test]
    async fn local_file_extension_is_sniffed() {
        let dir = tempdir().expect("failed to create temp dir");
        let source = dir.path().join("source.bin");
        std::fs::write(&source, PNG_BYTES).unwrap();
        let out = dir.path().join("out");

        let path = download(request(source.to_str().unwrap(), "Dot", ""), &out)
            .await
            .expect("download should succeed");

        assert_eq!(path, out.join("dot.png"));
    }

    #[tokio::test]
    async fn unknown_bytes_fall_back_to_jpg() {
        let dir = tempdir().expect("failed to create temp dir");
        let url = data_uri::encode("application/octet-stream", b"mystery");

        let path = download(request(&url, "Mystery", ""), dir.path())
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "mystery.jpg");
    }

    #[tokio::test]
    async fn never_overwrites_existing_files() {
        let dir = tempdir().expect("failed to create temp dir");
        std::fs::write(dir.path().join("sunset.png"), b"keep me").unwrap();
        let url = data_uri::encode("image/png", PNG_BYTES);

        let first = download(request(&url, "Sunset", ""), dir.path())
            .await
            .unwrap();
        let second = download(request(&url, "Sunset", ""), dir.path())
            .await
            .unwrap();

        assert_eq!(first, dir.path().join("sunset-1.png"));
        assert_eq!(second, dir.path().join("sunset-2.png"));
        assert_eq!(std::fs::read(dir.path().join("sunset.png")).unwrap(), b"keep me");
    }

    #[tokio::test]
    async fn malformed_data_uri_is_a_decode_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = download(request("data:image/png;base64,%%%", "X", ""), dir.path()).await;
        assert!(matches!(result, Err(TransferError::Decode(_))));
    }

    #[tokio::test]
    async fn missing_local_file_is_a_read_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("nope.png");
        let result = download(request(missing.to_str().unwrap(), "X", ""), dir.path()).await;
        assert!(matches!(result, Err(TransferError::Read(_))));
    }
}
