// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text encoding wrapper
//!
//! Thin value type over [`encoding_rs`] encodings. The codec treats an
//! encoding as the caller's claim about how the *input text variable*
//! maps to bytes; inside an XML document, the declared encoding wins
//! (see [`crate::wire`]).

use std::borrow::Cow;

/// A byte encoding used to transcode text before and after the
/// underlying serializer runs.
///
/// Copyable handle; all named encodings are process-wide statics.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static encoding_rs::Encoding);

impl TextEncoding {
    /// UTF-8, the default for every codec.
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    /// Resolve an encoding by WHATWG label, e.g. `"iso-8859-1"` or
    /// `"utf-16le"`. Returns `None` for unknown labels.
    pub fn for_label(label: &str) -> Option<Self> {
        encoding_rs::Encoding::for_label(label.as_bytes()).map(Self)
    }

    /// Canonical name of the encoding, e.g. `"UTF-8"`.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Encode text into bytes. Characters the encoding cannot represent
    /// are replaced with numeric character references (HTML-style), the
    /// standard lossy behavior of the underlying encoder.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        self.0.encode(text).0
    }

    /// Decode bytes into text. Malformed sequences become U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        self.0.decode(bytes).0
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl std::fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TextEncoding({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_roundtrip_is_lossless() {
        let enc = TextEncoding::utf8();
        let text = "Multi Barrier Reverse Convertible ® ü";
        let bytes = enc.encode(text);
        assert_eq!(enc.decode(&bytes), text);
    }

    #[test]
    fn resolves_latin1_label() {
        let enc = TextEncoding::for_label("iso-8859-1").unwrap();
        // WHATWG maps the latin-1 label onto windows-1252
        assert_eq!(enc.name(), "windows-1252");
    }

    #[test]
    fn unknown_label_is_none() {
        assert!(TextEncoding::for_label("no-such-encoding").is_none());
    }

    #[test]
    fn latin1_encodes_registered_sign_as_single_byte() {
        let enc = TextEncoding::for_label("iso-8859-1").unwrap();
        let bytes = enc.encode("®");
        assert_eq!(bytes.as_ref(), &[0xAE]);
    }
}
