//! Built-in codec set with exact strict decode/encode rules.

/// Code points for bytes 0x80..=0x9F in windows-1252; `None` marks unassigned bytes.
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Encodings that are always available, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCodec {
    Ascii,
    Utf8,
    Latin1,
    Windows1252,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl BuiltinCodec {
    pub const ALL: [BuiltinCodec; 8] = [
        BuiltinCodec::Ascii,
        BuiltinCodec::Utf8,
        BuiltinCodec::Latin1,
        BuiltinCodec::Windows1252,
        BuiltinCodec::Utf16Le,
        BuiltinCodec::Utf16Be,
        BuiltinCodec::Utf32Le,
        BuiltinCodec::Utf32Be,
    ];

    /// Canonical display name
    pub fn name(self) -> &'static str {
        match self {
            BuiltinCodec::Ascii => "ascii",
            BuiltinCodec::Utf8 => "utf-8",
            BuiltinCodec::Latin1 => "latin-1",
            BuiltinCodec::Windows1252 => "windows-1252",
            BuiltinCodec::Utf16Le => "utf-16-le",
            BuiltinCodec::Utf16Be => "utf-16-be",
            BuiltinCodec::Utf32Le => "utf-32-le",
            BuiltinCodec::Utf32Be => "utf-32-be",
        }
    }

    /// Match a canonical name or a common alias, ignoring case and `_`/`-` differences
    pub fn from_name(name: &str) -> Option<BuiltinCodec> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        let codec = match normalized.as_str() {
            "ascii" | "us-ascii" => BuiltinCodec::Ascii,
            "utf-8" | "utf8" => BuiltinCodec::Utf8,
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => BuiltinCodec::Latin1,
            "windows-1252" | "cp1252" => BuiltinCodec::Windows1252,
            "utf-16-le" | "utf-16le" | "utf16-le" => BuiltinCodec::Utf16Le,
            "utf-16-be" | "utf-16be" | "utf16-be" => BuiltinCodec::Utf16Be,
            "utf-32-le" | "utf-32le" | "utf32-le" => BuiltinCodec::Utf32Le,
            "utf-32-be" | "utf-32be" | "utf32-be" => BuiltinCodec::Utf32Be,
            _ => return None,
        };
        Some(codec)
    }

    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            BuiltinCodec::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| b as char).collect()),
            BuiltinCodec::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            BuiltinCodec::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            BuiltinCodec::Windows1252 => bytes.iter().map(|&b| windows_1252_char(b)).collect(),
            BuiltinCodec::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            BuiltinCodec::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            BuiltinCodec::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
            BuiltinCodec::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
        }
    }

    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            BuiltinCodec::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
            BuiltinCodec::Utf8 => Some(text.as_bytes().to_vec()),
            BuiltinCodec::Latin1 => text
                .chars()
                .map(|ch| u8::try_from(u32::from(ch)).ok())
                .collect(),
            BuiltinCodec::Windows1252 => text.chars().map(windows_1252_byte).collect(),
            BuiltinCodec::Utf16Le => Some(
                text.encode_utf16()
                    .flat_map(|unit| unit.to_le_bytes())
                    .collect(),
            ),
            BuiltinCodec::Utf16Be => Some(
                text.encode_utf16()
                    .flat_map(|unit| unit.to_be_bytes())
                    .collect(),
            ),
            BuiltinCodec::Utf32Le => Some(
                text.chars()
                    .flat_map(|ch| u32::from(ch).to_le_bytes())
                    .collect(),
            ),
            BuiltinCodec::Utf32Be => Some(
                text.chars()
                    .flat_map(|ch| u32::from(ch).to_be_bytes())
                    .collect(),
            ),
        }
    }
}

fn windows_1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9f => WINDOWS_1252_HIGH[(byte - 0x80) as usize],
        _ => Some(byte as char),
    }
}

fn windows_1252_byte(ch: char) -> Option<u8> {
    match u32::from(ch) {
        code @ (0x00..=0x7f | 0xa0..=0xff) => Some(code as u8),
        _ => WINDOWS_1252_HIGH
            .iter()
            .position(|&mapped| mapped == Some(ch))
            .map(|idx| 0x80 + idx as u8),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> Option<String> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    bytes
        .chunks_exact(4)
        .map(|quad| char::from_u32(unit([quad[0], quad[1], quad[2], quad[3]])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_back_to_codecs() {
        for codec in BuiltinCodec::ALL {
            assert_eq!(BuiltinCodec::from_name(codec.name()), Some(codec));
        }
        assert_eq!(
            BuiltinCodec::from_name("CP1252"),
            Some(BuiltinCodec::Windows1252)
        );
        assert_eq!(
            BuiltinCodec::from_name("utf_16_le"),
            Some(BuiltinCodec::Utf16Le)
        );
        assert_eq!(BuiltinCodec::from_name("ebcdic"), None);
    }

    #[test]
    fn windows_1252_unassigned_bytes_fail() {
        for byte in [0x81, 0x8d, 0x8f, 0x90, 0x9d] {
            assert_eq!(BuiltinCodec::Windows1252.decode(&[byte]), None);
        }
        assert_eq!(
            BuiltinCodec::Windows1252.decode(&[0x80]),
            Some("\u{20AC}".to_string())
        );
    }

    #[test]
    fn windows_1252_encodes_euro_sign() {
        assert_eq!(BuiltinCodec::Windows1252.encode("€1"), Some(vec![0x80, b'1']));
        assert_eq!(BuiltinCodec::Windows1252.encode("\u{0100}"), None);
    }

    #[test]
    fn utf8_rejects_lone_continuation_and_lead_bytes() {
        assert_eq!(BuiltinCodec::Utf8.decode(&[0xc3]), None);
        assert_eq!(BuiltinCodec::Utf8.decode(&[0x80]), None);
        assert_eq!(
            BuiltinCodec::Utf8.decode(&[0xc3, 0xa9]),
            Some("é".to_string())
        );
    }

    #[test]
    fn utf16_and_utf32_need_whole_units() {
        assert_eq!(BuiltinCodec::Utf16Le.decode(&[0x41]), None);
        assert_eq!(
            BuiltinCodec::Utf16Le.decode(&[0x41, 0x00]),
            Some("A".to_string())
        );
        assert_eq!(
            BuiltinCodec::Utf16Be.decode(&[0x00, 0x41]),
            Some("A".to_string())
        );
        assert_eq!(BuiltinCodec::Utf32Le.decode(&[0x41, 0, 0]), None);
        assert_eq!(
            BuiltinCodec::Utf32Be.decode(&[0, 0, 0, 0x41]),
            Some("A".to_string())
        );
    }

    #[test]
    fn wide_encoders_emit_no_byte_order_mark() {
        assert_eq!(BuiltinCodec::Utf16Le.encode("ab"), Some(vec![b'a', 0, b'b', 0]));
        assert_eq!(BuiltinCodec::Utf16Be.encode("a"), Some(vec![0, b'a']));
        assert_eq!(BuiltinCodec::Utf32Le.encode("a"), Some(vec![b'a', 0, 0, 0]));
    }

    #[test]
    fn ascii_and_latin1_encoding_limits() {
        assert_eq!(BuiltinCodec::Ascii.encode("é"), None);
        assert_eq!(BuiltinCodec::Latin1.encode("é"), Some(vec![0xe9]));
        assert_eq!(BuiltinCodec::Latin1.encode("€"), None);
    }
}
