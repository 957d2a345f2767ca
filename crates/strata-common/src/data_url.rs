//! `data:` URL encoding for inline SVG backgrounds.
//!
//! [RFC 2397 The "data" URL scheme](https://www.rfc-editor.org/rfc/rfc2397)
//!
//! Pattern, mask, and divider shapes are emitted as `background-image` values
//! that carry their SVG markup inline, so no asset has to be served for them.

use base64::Engine;
use thiserror::Error;

/// Media type used for every inline SVG the engine emits.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Errors produced while decoding a `data:` URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    /// The string does not start with the `data:` scheme.
    #[error("not a data URL: {0}")]
    MissingScheme(String),

    /// There is no `,` separating the metadata from the payload.
    #[error("invalid data URL: missing comma")]
    MissingComma,

    /// Only base64 payloads are produced (and therefore understood).
    #[error("unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),

    /// The payload is not valid base64.
    #[error("base64 decode error: {0}")]
    Base64(String),
}

/// A parsed `data:` URL.
///
/// "dataurl := "data:" [ mediatype ] [ ";base64" ] "," data"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// The media type, e.g. `image/svg+xml`.
    pub media_type: String,
    /// The decoded payload.
    pub data: Vec<u8>,
}

impl DataUrl {
    /// Build a `data:` URL for SVG markup, base64-encoding the payload.
    #[must_use]
    pub fn encode_svg(markup: &str) -> String {
        Self::encode(SVG_MEDIA_TYPE, markup.as_bytes())
    }

    /// Build a base64 `data:` URL for an arbitrary payload.
    #[must_use]
    pub fn encode(media_type: &str, data: &[u8]) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        format!("data:{media_type};base64,{encoded}")
    }

    /// Parse and decode a `data:` URL.
    ///
    /// Only base64 payloads are supported.
    ///
    /// # Errors
    ///
    /// Returns a [`DataUrlError`] if the scheme, separator, or encoding is
    /// missing or invalid.
    pub fn parse(raw: &str) -> Result<Self, DataUrlError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| DataUrlError::MissingScheme(raw.to_string()))?;
        let (metadata, payload) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;

        let Some(media_type) = metadata.strip_suffix(";base64") else {
            return Err(DataUrlError::UnsupportedEncoding(metadata.to_string()));
        };

        let data = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| DataUrlError::Base64(e.to_string()))?;

        Ok(Self {
            media_type: media_type.to_string(),
            data,
        })
    }

    /// The payload as UTF-8 text, if it is valid UTF-8.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_round_trip() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="#000"/></svg>"##;
        let url = DataUrl::encode_svg(markup);
        assert!(url.starts_with("data:image/svg+xml;base64,"));

        let parsed = DataUrl::parse(&url).unwrap();
        assert_eq!(parsed.media_type, SVG_MEDIA_TYPE);
        assert_eq!(parsed.text(), Some(markup));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert_eq!(
            DataUrl::parse("image/png;base64,AAAA"),
            Err(DataUrlError::MissingScheme("image/png;base64,AAAA".to_string()))
        );
    }

    #[test]
    fn test_rejects_percent_encoding() {
        assert_eq!(
            DataUrl::parse("data:image/svg+xml,%3Csvg%3E"),
            Err(DataUrlError::UnsupportedEncoding("image/svg+xml".to_string()))
        );
    }

    #[test]
    fn test_rejects_missing_comma() {
        assert_eq!(DataUrl::parse("data:image/png;base64"), Err(DataUrlError::MissingComma));
    }
}
