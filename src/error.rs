// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Storage(StorageError),
    Validation(ValidationError),
    Transfer(TransferError),
}

/// Failures against the durable key/value store.
///
/// These are never fatal: reads fall back to defaults and writes are
/// best-effort, the in-memory state stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The value under `key` could not be read.
    Read { key: String, message: String },

    /// The value under `key` could not be written.
    Write { key: String, message: String },

    /// The value under `key` was read but is not valid JSON for its shape.
    Parse { key: String, message: String },
}

impl StorageError {
    /// Returns the notification key shown to the user for this failure.
    pub fn notification_key(&self) -> &'static str {
        match self {
            StorageError::Read { .. } => "notification-storage-read-error",
            StorageError::Write { .. } => "notification-storage-write-error",
            StorageError::Parse { .. } => "notification-storage-parse-error",
        }
    }

    /// The storage key the failure happened on.
    pub fn key(&self) -> &str {
        match self {
            StorageError::Read { key, .. }
            | StorageError::Write { key, .. }
            | StorageError::Parse { key, .. } => key,
        }
    }
}

/// Rejected user input. Surfaced to the caller as a blocking rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Upload without a title (after trimming).
    EmptyTitle,

    /// Upload without an image source.
    MissingImage,

    /// The selected file is not a decodable image format.
    NotAnImage,

    /// Profile display name is empty after trimming.
    EmptyDisplayName,

    /// Profile display name exceeds the character limit.
    DisplayNameTooLong { chars: usize },

    /// Avatar key outside the fixed avatar set.
    UnknownAvatar(String),

    /// Comment text is empty after trimming.
    EmptyComment,

    /// Guarded deletion of an artwork the local user did not upload.
    NotOwner(String),
}

impl ValidationError {
    /// Returns the notification key shown to the user for this rejection.
    pub fn notification_key(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle => "upload-error-empty-title",
            ValidationError::MissingImage => "upload-error-missing-image",
            ValidationError::NotAnImage => "upload-error-not-an-image",
            ValidationError::EmptyDisplayName => "profile-error-empty-name",
            ValidationError::DisplayNameTooLong { .. } => "profile-error-name-too-long",
            ValidationError::UnknownAvatar(_) => "profile-error-unknown-avatar",
            ValidationError::EmptyComment => "comment-error-empty",
            ValidationError::NotOwner(_) => "delete-error-not-owner",
        }
    }
}

/// Image byte loading failures during upload or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Remote fetch failed (network, HTTP status).
    Fetch(String),

    /// Local file could not be read.
    Read(String),

    /// Data URI could not be decoded.
    Decode(String),

    /// Downloaded bytes could not be written to disk.
    Write(String),

    /// Fallback hand-off to the system opener failed.
    Open(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Read { key, message } => {
                write!(f, "failed to read '{}': {}", key, message)
            }
            StorageError::Write { key, message } => {
                write!(f, "failed to write '{}': {}", key, message)
            }
            StorageError::Parse { key, message } => {
                write!(f, "failed to parse '{}': {}", key, message)
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "A title is required"),
            ValidationError::MissingImage => write!(f, "An image is required"),
            ValidationError::NotAnImage => write!(
                f,
                "Invalid file type. Please upload an image (PNG, JPG, etc.)"
            ),
            ValidationError::EmptyDisplayName => write!(f, "Display name cannot be empty"),
            ValidationError::DisplayNameTooLong { chars } => {
                write!(f, "Display name is too long ({} characters)", chars)
            }
            ValidationError::UnknownAvatar(key) => write!(f, "Unknown avatar: {}", key),
            ValidationError::EmptyComment => write!(f, "Comment cannot be empty"),
            ValidationError::NotOwner(id) => {
                write!(f, "Artwork {} was not uploaded by you", id)
            }
        }
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            TransferError::Read(msg) => write!(f, "Read failed: {}", msg),
            TransferError::Decode(msg) => write!(f, "Decode failed: {}", msg),
            TransferError::Write(msg) => write!(f, "Write failed: {}", msg),
            TransferError::Open(msg) => write!(f, "Open failed: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Storage(e) => write!(f, "Storage Error: {}", e),
            Error::Validation(e) => write!(f, "Validation Error: {}", e),
            Error::Transfer(e) => write!(f, "Transfer Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<TransferError> for Error {
    fn from(err: TransferError) -> Self {
        Error::Transfer(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        TransferError::Fetch(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
