//! Text codecs used for the character column and for encoding text queries.
//!
//! A [`Codec`] is stateless: decoding the same bytes twice gives the same result.
//! The built-in set is implemented directly so that its strictness is exact (for
//! instance `windows-1252` rejects its five unassigned bytes); additional codecs are
//! resolved by label through `encoding_rs`.

pub mod builtin;
pub mod registry;

pub use builtin::BuiltinCodec;
pub use registry::CodecRegistry;

use encoding_rs::Encoding;
use std::fmt;

/// Placeholder shown for bytes that fail to decode
pub const ERROR_GLYPH: char = '?';
/// Placeholder shown for bytes that decode to something non-printable
pub const DOT_GLYPH: char = '.';

/// Outcome class of decoding a single byte for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphStatus {
    Printable,
    Dot,
    Error,
}

/// Display character for one byte together with how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub status: GlyphStatus,
}

impl Glyph {
    pub fn printable(ch: char) -> Self {
        Self {
            ch,
            status: GlyphStatus::Printable,
        }
    }

    pub fn dot() -> Self {
        Self {
            ch: DOT_GLYPH,
            status: GlyphStatus::Dot,
        }
    }

    pub fn error() -> Self {
        Self {
            ch: ERROR_GLYPH,
            status: GlyphStatus::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == GlyphStatus::Error
    }
}

/// A named text encoding
#[derive(Debug, Clone, PartialEq)]
pub enum Codec {
    Builtin(BuiltinCodec),
    /// Codec resolved from a WHATWG label, keeping the name it was requested under
    Labeled {
        name: String,
        encoding: &'static Encoding,
    },
}

impl Codec {
    /// Resolve a codec by name. Built-in names and their common aliases win over
    /// `encoding_rs` labels.
    pub fn resolve(name: &str) -> Option<Codec> {
        if let Some(builtin) = BuiltinCodec::from_name(name) {
            return Some(Codec::Builtin(builtin));
        }
        Encoding::for_label(name.trim().as_bytes()).map(|encoding| Codec::Labeled {
            name: name.trim().to_string(),
            encoding,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Codec::Builtin(builtin) => builtin.name(),
            Codec::Labeled { name, .. } => name,
        }
    }

    /// Strictly decode `bytes`; `None` when they are not valid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Codec::Builtin(builtin) => builtin.decode(bytes),
            Codec::Labeled { encoding, .. } => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        }
    }

    /// Encode `text`; `None` when some character has no representation
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            Codec::Builtin(builtin) => builtin.encode(text),
            Codec::Labeled { encoding, .. } => {
                let (bytes, used, had_errors) = encoding.encode(text);
                // encoding_rs emits UTF-8 for UTF-16 family encoders
                if had_errors || used != *encoding {
                    None
                } else {
                    Some(bytes.into_owned())
                }
            }
        }
    }

    /// Decode a single byte for the character column
    pub fn decode_one(&self, byte: u8) -> Glyph {
        decode_one(byte, self)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode `byte` under `codec` and classify the result.
///
/// Only plain ASCII graphic characters and the space are shown as themselves;
/// control characters, other whitespace and anything outside ASCII become a dot so
/// every byte occupies exactly one column.
pub fn decode_one(byte: u8, codec: &Codec) -> Glyph {
    let Some(text) = codec.decode(&[byte]) else {
        return Glyph::error();
    };

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if (' '..='~').contains(&ch) => Glyph::printable(ch),
        _ => Glyph::dot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(name: &str) -> Codec {
        Codec::resolve(name).expect("codec should resolve")
    }

    #[test]
    fn ascii_printable_and_control_bytes() {
        let ascii = codec("ascii");
        assert_eq!(decode_one(b'A', &ascii), Glyph::printable('A'));
        assert_eq!(decode_one(b' ', &ascii), Glyph::printable(' '));
        assert_eq!(decode_one(b'\t', &ascii), Glyph::dot());
        assert_eq!(decode_one(b'\n', &ascii), Glyph::dot());
        assert_eq!(decode_one(0x00, &ascii), Glyph::dot());
        assert_eq!(decode_one(0x7f, &ascii), Glyph::dot());
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        let glyph = decode_one(0x80, &codec("ascii"));
        assert_eq!(glyph.status, GlyphStatus::Error);
        assert_eq!(glyph.ch, '?');
    }

    #[test]
    fn latin1_decodes_everything_but_shows_non_ascii_as_dot() {
        let latin1 = codec("latin-1");
        for byte in 0..=255u8 {
            assert!(!decode_one(byte, &latin1).is_error());
        }
        assert_eq!(decode_one(0xe9, &latin1), Glyph::dot());
    }

    #[test]
    fn utf16_lone_byte_is_an_error() {
        let utf16 = codec("utf-16-le");
        assert_eq!(decode_one(b'A', &utf16), Glyph::error());
    }

    #[test]
    fn labeled_codec_from_encoding_rs() {
        let koi8 = codec("koi8-r");
        assert_eq!(koi8.name(), "koi8-r");
        assert_eq!(decode_one(b'z', &koi8), Glyph::printable('z'));
        assert_eq!(koi8.encode("abc"), Some(b"abc".to_vec()));
    }

    #[test]
    fn labeled_multibyte_lead_byte_is_an_error() {
        let sjis = codec("shift_jis");
        assert!(decode_one(0x82, &sjis).is_error());
        assert_eq!(decode_one(b'a', &sjis), Glyph::printable('a'));
    }

    #[test]
    fn unknown_codec_does_not_resolve() {
        assert!(Codec::resolve("no-such-encoding").is_none());
    }
}
