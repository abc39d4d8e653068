//! Summary of the selected search hit: where it is, how it matched, what it holds.

use crate::codec::Codec;
use crate::file_handler::ByteStore;
use crate::search::pattern::{FormatTag, PatternExpander};
use crate::search::{SearchHit, SearchResults};

/// Details of the hit under the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct HitDetails {
    pub hit: SearchHit,
    /// Matched bytes, when the whole pattern lies inside the file
    pub bytes: Option<Vec<u8>>,
    /// Value re-read under the hit's width and byte order (numeric tags only)
    pub value: Option<String>,
}

impl HitDetails {
    /// One-line rendering for the info bar
    pub fn summary(&self) -> String {
        let mut out = format!(
            " Search hit: offset 0x{:x} ({}) | Found as: {} | ",
            self.hit.offset, self.hit.offset, self.hit.tag
        );
        if let Some(bytes) = &self.bytes {
            let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            out.push_str(&format!("Bytes: {} | ", hex));
        }
        if let Some(value) = &self.value {
            out.push_str(&format!("Value: {} | ", value));
        }
        out
    }
}

/// Length of the pattern that produced hits tagged `tag` for `query`
pub fn pattern_len(tag: FormatTag, query: &str, codec: &Codec) -> Option<usize> {
    if let Some(width) = tag.fixed_width() {
        return Some(width);
    }
    PatternExpander::new(codec)
        .expand(query)
        .ok()?
        .into_iter()
        .find(|candidate| candidate.tag == tag)
        .map(|candidate| candidate.bytes.len())
}

/// Describe the hit under the cursor of `results`
pub fn investigate(store: &ByteStore, results: &SearchResults, codec: &Codec) -> Option<HitDetails> {
    let hit = *results.current()?;
    let bytes = pattern_len(hit.tag, results.query(), codec)
        .filter(|&len| len > 0 && hit.offset + len as u64 <= store.len())
        .map(|len| store.slice(hit.offset, hit.offset + len as u64).to_vec());
    let value = bytes.as_deref().and_then(|b| hit.tag.decode_value(b));

    Some(HitDetails { hit, bytes, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BuiltinCodec;
    use crate::search::SearchEngine;
    use std::sync::Arc;

    fn ascii() -> Codec {
        Codec::Builtin(BuiltinCodec::Ascii)
    }

    #[test]
    fn numeric_hit_shows_bytes_and_value() {
        let store = Arc::new(ByteStore::from_bytes(vec![0xff, 0x00, 0x41, 0x00]));
        let engine = SearchEngine::new(Arc::clone(&store));
        let results = engine.search("65", 0, &ascii());

        let details = investigate(&store, &results, &ascii()).unwrap();
        assert_eq!(details.hit.tag, FormatTag::Int16Le);
        assert_eq!(details.bytes, Some(vec![0x41, 0x00]));
        assert_eq!(details.value.as_deref(), Some("65"));
        assert_eq!(
            details.summary(),
            " Search hit: offset 0x2 (2) | Found as: int16le | Bytes: 4100 | Value: 65 | "
        );
    }

    #[test]
    fn text_and_hex_hits_show_bytes_only() {
        let store = Arc::new(ByteStore::from_bytes(b"..hey..".to_vec()));
        let engine = SearchEngine::new(Arc::clone(&store));

        let results = engine.search("hey", 0, &ascii());
        let details = investigate(&store, &results, &ascii()).unwrap();
        assert_eq!(details.bytes, Some(b"hey".to_vec()));
        assert_eq!(details.value, None);

        let results = engine.search("0x6865", 0, &ascii());
        let details = investigate(&store, &results, &ascii()).unwrap();
        assert_eq!(details.hit.offset, 2);
        assert_eq!(details.bytes, Some(b"he".to_vec()));
    }

    #[test]
    fn no_details_without_hits() {
        let store = ByteStore::from_bytes(b"abc".to_vec());
        assert!(investigate(&store, &SearchResults::empty("zzz"), &ascii()).is_none());
    }

    #[test]
    fn pattern_len_for_each_tag() {
        let codec = Codec::Builtin(BuiltinCodec::Utf16Le);
        assert_eq!(pattern_len(FormatTag::Ascii, "ab", &codec), Some(4));
        assert_eq!(pattern_len(FormatTag::Float32Be, "1", &codec), Some(4));
        assert_eq!(pattern_len(FormatTag::Hex, "0x0102", &codec), Some(2));
        assert_eq!(pattern_len(FormatTag::Hex, "0xzz", &codec), None);
    }
}
