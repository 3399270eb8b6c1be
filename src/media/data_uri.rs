// SPDX-License-Identifier: MPL-2.0
//! `data:` URI encoding and decoding (RFC 2397).

use crate::error::TransferError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::percent_decode_str;

/// Payload of a decoded data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type without parameters, if the URI declared one.
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Encodes `bytes` as `data:<mime>;base64,<payload>`.
#[must_use]
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decodes a data URI.
///
/// Payloads without `;base64` are percent-decoded.
///
/// # Errors
///
/// Returns [`TransferError::Decode`] if the URI has no `data:` scheme, no
/// comma separator, or an invalid base64 payload.
pub fn decode(uri: &str) -> Result<DataUri, TransferError> {
    let uri = uri.trim();
    let rest = match uri.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("data:") => &uri[5..],
        _ => return Err(TransferError::Decode("not a data URI".to_string())),
    };
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| TransferError::Decode("missing ',' separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_ascii_lowercase);
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        // Some encoders wrap long payloads.
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD
            .decode(compact)
            .map_err(|e| TransferError::Decode(e.to_string()))?
    } else {
        percent_decode_str(payload).collect()
    };

    Ok(DataUri { mime, bytes })
}
