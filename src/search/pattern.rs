//! Expansion of a textual query into concrete byte patterns.
//!
//! One query can stand for several byte sequences. Classification, in priority order:
//!
//! 1. `0x...` (any case): a hex literal, one `hex` candidate.
//! 2. Only decimal digits: the text itself plus fixed-width integer and float
//!    encodings of the number, in a fixed order.
//! 3. Anything else: the text encoded under the active codec.

use crate::codec::Codec;
use crate::error::{Result, RlhexError};
use crate::format::{format_general, Endianness};
use std::fmt;

/// Which expansion of the query a candidate (and therefore a hit) came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    Ascii,
    Hex,
    Int16Le,
    Int16Be,
    Int32Le,
    Int32Be,
    Float32Le,
    Float32Be,
}

impl FormatTag {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Ascii => "ascii",
            FormatTag::Hex => "hex",
            FormatTag::Int16Le => "int16le",
            FormatTag::Int16Be => "int16be",
            FormatTag::Int32Le => "int32le",
            FormatTag::Int32Be => "int32be",
            FormatTag::Float32Le => "float32le",
            FormatTag::Float32Be => "float32be",
        }
    }

    /// Pattern length for numeric tags; text and hex patterns vary with the query
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            FormatTag::Int16Le | FormatTag::Int16Be => Some(2),
            FormatTag::Int32Le | FormatTag::Int32Be | FormatTag::Float32Le | FormatTag::Float32Be => {
                Some(4)
            }
            FormatTag::Ascii | FormatTag::Hex => None,
        }
    }

    pub fn endianness(self) -> Option<Endianness> {
        match self {
            FormatTag::Int16Le | FormatTag::Int32Le | FormatTag::Float32Le => Some(Endianness::Little),
            FormatTag::Int16Be | FormatTag::Int32Be | FormatTag::Float32Be => Some(Endianness::Big),
            FormatTag::Ascii | FormatTag::Hex => None,
        }
    }

    /// Re-read `bytes` as the value this tag encodes, formatted for display
    pub fn decode_value(self, bytes: &[u8]) -> Option<String> {
        let endianness = self.endianness()?;
        match self {
            FormatTag::Int16Le | FormatTag::Int16Be => {
                endianness.read_u16(bytes).map(|v| v.to_string())
            }
            FormatTag::Int32Le | FormatTag::Int32Be => {
                endianness.read_u32(bytes).map(|v| v.to_string())
            }
            FormatTag::Float32Le | FormatTag::Float32Be => endianness
                .read_f32(bytes)
                .map(|v| format_general(f64::from(v), 6)),
            FormatTag::Ascii | FormatTag::Hex => None,
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete byte sequence to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub bytes: Vec<u8>,
    pub tag: FormatTag,
}

impl Candidate {
    fn new(bytes: Vec<u8>, tag: FormatTag) -> Self {
        Self { bytes, tag }
    }
}

/// Turns a query into its ordered candidate patterns under one codec
#[derive(Debug, Clone, Copy)]
pub struct PatternExpander<'a> {
    codec: &'a Codec,
}

impl<'a> PatternExpander<'a> {
    pub fn new(codec: &'a Codec) -> Self {
        Self { codec }
    }

    /// Expand `query` into candidates.
    ///
    /// # Errors
    /// * `InvalidPattern` for a malformed hex literal
    /// * `EncodeError` when plain text has no representation in the codec
    pub fn expand(&self, query: &str) -> Result<Vec<Candidate>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(digits) = strip_hex_prefix(query) {
            return Ok(vec![Candidate::new(parse_hex(digits)?, FormatTag::Hex)]);
        }

        if query.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(self.expand_numeric(query));
        }

        let bytes = self.encode_text(query)?;
        Ok(vec![Candidate::new(bytes, FormatTag::Ascii)])
    }

    fn encode_text(&self, text: &str) -> Result<Vec<u8>> {
        self.codec.encode(text).ok_or_else(|| RlhexError::EncodeError {
            encoding: self.codec.name().to_string(),
            message: format!("{:?} contains characters outside the encoding", text),
        })
    }

    fn expand_numeric(&self, query: &str) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(7);

        match self.codec.encode(query) {
            Some(bytes) => candidates.push(Candidate::new(bytes, FormatTag::Ascii)),
            None => log::debug!("{} cannot encode digits; text candidate skipped", self.codec),
        }

        // Values past u32::MAX only search as text
        let Some(value) = query.parse::<u64>().ok().and_then(|v| u32::try_from(v).ok()) else {
            return candidates;
        };

        if let Ok(short) = u16::try_from(value) {
            candidates.push(Candidate::new(short.to_le_bytes().to_vec(), FormatTag::Int16Le));
            candidates.push(Candidate::new(short.to_be_bytes().to_vec(), FormatTag::Int16Be));
        }
        candidates.push(Candidate::new(value.to_le_bytes().to_vec(), FormatTag::Int32Le));
        candidates.push(Candidate::new(value.to_be_bytes().to_vec(), FormatTag::Int32Be));

        if let Some(float) = query
            .parse::<f64>()
            .ok()
            .map(|v| v as f32)
            .filter(|v| v.is_finite())
        {
            candidates.push(Candidate::new(float.to_le_bytes().to_vec(), FormatTag::Float32Le));
            candidates.push(Candidate::new(float.to_be_bytes().to_vec(), FormatTag::Float32Be));
        }

        candidates
    }
}

fn strip_hex_prefix(query: &str) -> Option<&str> {
    let prefix = query.get(..2)?;
    prefix.eq_ignore_ascii_case("0x").then(|| &query[2..])
}

/// Decode hex digits into bytes, left-padding an odd digit count with `0`
fn parse_hex(digits: &str) -> Result<Vec<u8>> {
    if digits.is_empty() {
        return Err(RlhexError::invalid_pattern("hex literal has no digits"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(RlhexError::invalid_pattern(format!(
            "{:?} is not a hex digit",
            bad
        )));
    }

    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    padded
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|text| u8::from_str_radix(text, 16).ok())
                .ok_or_else(|| RlhexError::invalid_pattern("malformed hex pair"))
        })
        .collect()
}
