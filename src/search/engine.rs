//! Byte-pattern search over the whole file and the resulting hit list.

use crate::codec::Codec;
use crate::error::Result;
use crate::file_handler::ByteStore;
use crate::search::pattern::{FormatTag, PatternExpander};
use memchr::memmem;
use std::sync::Arc;

/// One match: where it starts and which candidate produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub offset: u64,
    pub tag: FormatTag,
}

/// Hits of one search invocation plus the cursor over them.
///
/// Hits are grouped by candidate in expansion order and ascend by offset inside each
/// group. The same offset can appear more than once under different tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    query: String,
    hits: Vec<SearchHit>,
    cursor: Option<usize>,
}

impl SearchResults {
    pub fn new(query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        let cursor = if hits.is_empty() { None } else { Some(0) };
        Self {
            query: query.into(),
            hits,
            cursor,
        }
    }

    /// Results for a query that matched nothing
    pub fn empty(query: impl Into<String>) -> Self {
        Self::new(query, Vec::new())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Cursor index; `None` when there are no hits
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&SearchHit> {
        self.cursor.and_then(|idx| self.hits.get(idx))
    }

    /// Advance the cursor, wrapping to the first hit. False when there are no hits.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Move the cursor back, wrapping to the last hit. False when there are no hits.
    pub fn prev(&mut self) -> bool {
        self.step(self.hits.len().saturating_sub(1))
    }

    fn step(&mut self, delta: usize) -> bool {
        if self.hits.is_empty() {
            return false;
        }
        let idx = self.cursor.unwrap_or(0);
        self.cursor = Some((idx + delta) % self.hits.len());
        true
    }

    /// Index of the hit closest to `to_offset`; ties go to the lowest index
    pub fn nearest(&self, to_offset: u64) -> Option<usize> {
        self.hits
            .iter()
            .enumerate()
            .min_by_key(|(_, hit)| hit.offset.abs_diff(to_offset))
            .map(|(idx, _)| idx)
    }

    /// Move the cursor to the hit closest to `to_offset`
    pub fn select_nearest(&mut self, to_offset: u64) -> Option<&SearchHit> {
        let idx = self.nearest(to_offset)?;
        self.cursor = Some(idx);
        self.hits.get(idx)
    }

    /// Whether any hit starts exactly at `offset`
    pub fn contains_offset(&self, offset: u64) -> bool {
        self.hits.iter().any(|hit| hit.offset == offset)
    }

    /// Hits whose start lies in `[start, end)`, with their indices
    pub fn hits_in_range(&self, start: u64, end: u64) -> impl Iterator<Item = (usize, &SearchHit)> {
        self.hits
            .iter()
            .enumerate()
            .filter(move |(_, hit)| hit.offset >= start && hit.offset < end)
    }
}

/// Synchronous multi-format search over a [`ByteStore`]
#[derive(Debug, Clone)]
pub struct SearchEngine {
    store: Arc<ByteStore>,
}

impl SearchEngine {
    pub fn new(store: Arc<ByteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ByteStore {
        &self.store
    }

    /// Search for every candidate of `query` at or after `from_offset`.
    ///
    /// # Errors
    /// Propagates pattern errors (malformed hex, unencodable text) so callers can
    /// report them; [`SearchEngine::search`] turns them into an empty result.
    pub fn try_search(&self, query: &str, from_offset: u64, codec: &Codec) -> Result<SearchResults> {
        let candidates = PatternExpander::new(codec).expand(query)?;

        let mut hits = Vec::new();
        for candidate in &candidates {
            hits.extend(
                self.find_all(&candidate.bytes, from_offset)
                    .into_iter()
                    .map(|offset| SearchHit {
                        offset,
                        tag: candidate.tag,
                    }),
            );
        }

        log::debug!(
            "search {:?} from {}: {} candidates, {} hits",
            query,
            from_offset,
            candidates.len(),
            hits.len()
        );
        Ok(SearchResults::new(query, hits))
    }

    /// Like [`SearchEngine::try_search`], treating an invalid query as matching nothing
    pub fn search(&self, query: &str, from_offset: u64, codec: &Codec) -> SearchResults {
        self.try_search(query, from_offset, codec)
            .unwrap_or_else(|e| {
                log::debug!("search {:?} matched nothing: {}", query, e);
                SearchResults::empty(query)
            })
    }

    /// Every start offset of `pattern` at or after `from_offset`, ascending.
    ///
    /// The scan resumes one byte after each match start, so overlapping occurrences
    /// are all reported.
    pub fn find_all(&self, pattern: &[u8], from_offset: u64) -> Vec<u64> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let haystack = self.store.slice(from_offset, self.store.len());
        let finder = memmem::Finder::new(pattern);
        let mut offsets = Vec::new();
        let mut pos = 0usize;

        while pos < haystack.len() {
            match finder.find(&haystack[pos..]) {
                Some(idx) => {
                    let start = pos + idx;
                    offsets.push(from_offset + start as u64);
                    pos = start + 1;
                }
                None => break,
            }
        }
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BuiltinCodec;

    fn engine(content: &[u8]) -> SearchEngine {
        SearchEngine::new(Arc::new(ByteStore::from_bytes(content.to_vec())))
    }

    fn ascii() -> Codec {
        Codec::Builtin(BuiltinCodec::Ascii)
    }

    fn offsets(results: &SearchResults) -> Vec<u64> {
        results.hits().iter().map(|hit| hit.offset).collect()
    }

    #[test]
    fn single_byte_hits_ascend() {
        let results = engine(b"aaab").search("a", 0, &ascii());
        assert_eq!(offsets(&results), vec![0, 1, 2]);
        assert_eq!(results.cursor(), Some(0));
    }

    #[test]
    fn overlapping_matches_are_reported() {
        let results = engine(b"aaa").search("aa", 0, &ascii());
        assert_eq!(offsets(&results), vec![0, 1]);
    }

    #[test]
    fn search_respects_start_offset() {
        let results = engine(b"abcabcabc").search("abc", 1, &ascii());
        assert_eq!(offsets(&results), vec![3, 6]);

        let past_end = engine(b"abc").search("a", 10, &ascii());
        assert!(past_end.is_empty());
        assert_eq!(past_end.cursor(), None);
    }

    #[test]
    fn candidates_are_concatenated_not_merged() {
        // "65" as text at 4; 0x41 0x00 (int16le) at 0; 0x00 0x41 (int16be) at 1
        let content = [0x41, 0x00, 0x41, 0x00, b'6', b'5'];
        let results = engine(&content).search("65", 0, &ascii());
        let found: Vec<(u64, FormatTag)> =
            results.hits().iter().map(|h| (h.offset, h.tag)).collect();
        assert_eq!(
            found,
            vec![
                (4, FormatTag::Ascii),
                (0, FormatTag::Int16Le),
                (2, FormatTag::Int16Le),
                (1, FormatTag::Int16Be),
            ]
        );
    }

    #[test]
    fn duplicate_offsets_across_tags_are_kept() {
        let results = engine(&[0, 0, 0, 0]).search("0", 0, &ascii());
        let zero_hits = results.hits().iter().filter(|h| h.offset == 0).count();
        // int16le, int16be, int32le, int32be, float32le, float32be all start at 0
        assert_eq!(zero_hits, 6);
    }

    #[test]
    fn invalid_hex_matches_nothing() {
        let eng = engine(b"\x41\x41");
        assert!(eng.search("0xzz", 0, &ascii()).is_empty());
        assert!(eng.try_search("0xzz", 0, &ascii()).is_err());
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(engine(b"abc").search("", 0, &ascii()).is_empty());
    }

    #[test]
    fn cursor_wraps_in_both_directions() {
        let mut results = engine(b"aaab").search("a", 0, &ascii());
        assert!(results.next());
        assert!(results.next());
        assert_eq!(results.cursor(), Some(2));
        assert!(results.next());
        assert_eq!(results.cursor(), Some(0));
        assert!(results.prev());
        assert_eq!(results.cursor(), Some(2));
        assert_eq!(results.current().map(|h| h.offset), Some(2));
    }

    #[test]
    fn navigation_on_empty_results_is_a_no_op() {
        let mut results = SearchResults::empty("x");
        assert!(!results.next());
        assert!(!results.prev());
        assert_eq!(results.cursor(), None);
        assert_eq!(results.nearest(5), None);
    }

    #[test]
    fn nearest_prefers_lowest_index_on_ties() {
        let hits = [10u64, 2, 6, 14]
            .iter()
            .map(|&offset| SearchHit {
                offset,
                tag: FormatTag::Ascii,
            })
            .collect();
        let mut results = SearchResults::new("q", hits);

        assert_eq!(results.nearest(12), Some(0));
        assert_eq!(results.nearest(4), Some(1));
        assert_eq!(results.nearest(100), Some(3));
        assert_eq!(results.select_nearest(7).map(|h| h.offset), Some(6));
        assert_eq!(results.cursor(), Some(2));
    }

    #[test]
    fn hits_in_range_filters_by_start() {
        let results = engine(b"xx.xx.xx.xx").search("xx", 0, &ascii());
        let in_range: Vec<usize> = results.hits_in_range(3, 9).map(|(i, _)| i).collect();
        assert_eq!(in_range, vec![1, 2]);
        assert!(results.contains_offset(9));
        assert!(!results.contains_offset(1));
    }

    #[test]
    fn hex_search_finds_bytes() {
        let results = engine(&[0xde, 0xad, 0xbe, 0xef, 0xde, 0xad]).search("0xDEAD", 0, &ascii());
        assert_eq!(offsets(&results), vec![0, 4]);
        assert!(results.hits().iter().all(|h| h.tag == FormatTag::Hex));
    }
}
