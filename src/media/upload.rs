// SPDX-License-Identifier: MPL-2.0
//! Turning a picked file into an artwork image.
//!
//! The file read is the one asynchronous step of an upload. The dialog that
//! started it may be closed before the read completes, so results are
//! matched against an [`UploadTicket`] and dropped if the dialog has moved on.

use super::{data_uri, sniff_mime};
use crate::error::{Error, Result, TransferError, ValidationError};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;

/// Reads an image file and returns it as a base64 `data:` URL.
///
/// `on_progress` receives the percentage read so far (0–100) and is always
/// called with 100 once the whole file is in memory.
///
/// # Errors
///
/// - [`TransferError::Read`] if the file cannot be opened or read
/// - [`ValidationError::NotAnImage`] if the bytes are not a recognized image
pub async fn read_image_as_data_url<F>(path: &Path, mut on_progress: F) -> Result<String>
where
    F: FnMut(u8),
{
    let read_error = |e: std::io::Error| TransferError::Read(format!("{}: {}", path.display(), e));

    let mut file = tokio::fs::File::open(path).await.map_err(read_error)?;
    let total = file.metadata().await.map_err(read_error)?.len();

    let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut last_reported = None;
    loop {
        let n = file.read(&mut chunk).await.map_err(read_error)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        if total > 0 {
            let percent = percent_of(bytes.len() as u64, total);
            if last_reported != Some(percent) {
                on_progress(percent);
                last_reported = Some(percent);
            }
        }
    }
    if last_reported != Some(100) {
        on_progress(100);
    }

    let mime = sniff_mime(&bytes).ok_or(Error::Validation(ValidationError::NotAnImage))?;
    debug!(path = %path.display(), mime, size = bytes.len(), "image read for upload");
    Ok(data_uri::encode(mime, &bytes))
}

fn percent_of(done: u64, total: u64) -> u8 {
    let percent = (done.saturating_mul(100) + total / 2) / total;
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Proof that a result belongs to a particular opening of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
}

/// Lifecycle of the upload dialog.
#[derive(Debug, Default)]
pub struct UploadDialog {
    generation: u64,
    open: bool,
    uploading: bool,
    progress: u8,
}

impl UploadDialog {
    pub fn open(&mut self) {
        self.open = true;
        self.uploading = false;
        self.progress = 0;
    }

    /// Closes the dialog. Results of reads started before this are discarded.
    pub fn close(&mut self) {
        self.generation += 1;
        self.open = false;
        self.uploading = false;
        self.progress = 0;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Marks an upload as started. Returns `None` while the dialog is closed.
    pub fn begin(&mut self) -> Option<UploadTicket> {
        if !self.open {
            return None;
        }
        self.uploading = true;
        self.progress = 0;
        Some(UploadTicket {
            generation: self.generation,
        })
    }

    /// Records progress for `ticket`; stale tickets are ignored.
    pub fn report_progress(&mut self, ticket: UploadTicket, percent: u8) {
        if self.is_current(ticket) {
            self.progress = percent.min(100);
        }
    }

    /// Hands back `result` if `ticket` is still current, ending the upload.
    ///
    /// Returns `None` when the dialog was closed (or closed and reopened)
    /// after the ticket was issued.
    pub fn finish<T>(&mut self, ticket: UploadTicket, result: T) -> Option<T> {
        if !self.is_current(ticket) {
            debug!("discarding upload result for a closed dialog");
            return None;
        }
        self.uploading = false;
        Some(result)
    }

    fn is_current(&self, ticket: UploadTicket) -> bool {
        self.open && self.uploading && ticket.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fixtures::PNG_BYTES;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_image_as_data_url_with_progress() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("sunset.png");
        std::fs::write(&path, PNG_BYTES).expect("failed to write image");

        let mut reported = Vec::new();
        let url = read_image_as_data_url(&path, |p| reported.push(p))
            .await
            .expect("png should be accepted");

        assert!(url.starts_with("data:image/png;base64,"));
        let decoded = data_uri::decode(&url).unwrap();
        assert_eq!(decoded.bytes, PNG_BYTES);
        assert_eq!(reported.last(), Some(&100));
    }

    #[tokio::test]
    async fn rejects_non_image_files() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just words").expect("failed to write file");

        let result = read_image_as_data_url(&path, |_| {}).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NotAnImage))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = read_image_as_data_url(&dir.path().join("gone.png"), |_| {}).await;
        assert!(matches!(result, Err(Error::Transfer(TransferError::Read(_)))));
    }

    #[test]
    fn percent_rounds_and_caps() {
        assert_eq!(percent_of(0, 10), 0);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(3, 3), 100);
    }

    #[test]
    fn begin_requires_open_dialog() {
        let mut dialog = UploadDialog::default();
        assert!(dialog.begin().is_none());
        dialog.open();
        assert!(dialog.begin().is_some());
        assert!(dialog.is_uploading());
    }

    #[test]
    fn finish_applies_current_result() {
        let mut dialog = UploadDialog::default();
        dialog.open();
        let ticket = dialog.begin().unwrap();
        dialog.report_progress(ticket, 40);
        assert_eq!(dialog.progress(), 40);

        assert_eq!(dialog.finish(ticket, "data:..."), Some("data:..."));
        assert!(!dialog.is_uploading());
    }

    #[test]
    fn result_after_close_is_discarded() {
        let mut dialog = UploadDialog::default();
        dialog.open();
        let ticket = dialog.begin().unwrap();

        dialog.close();
        dialog.report_progress(ticket, 90);
        assert_eq!(dialog.progress(), 0);
        assert_eq!(dialog.finish(ticket, 1), None);

        // Reopening does not revive the old ticket.
        dialog.open();
        let _fresh = dialog.begin().unwrap();
        assert_eq!(dialog.finish(ticket, 2), None);
        assert!(dialog.is_uploading());
    }
}
