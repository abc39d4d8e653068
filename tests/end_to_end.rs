use std::io::Write;
use std::sync::Arc;

use rlhex::codec::{Codec, CodecRegistry};
use rlhex::config::EncodingConfig;
use rlhex::file_handler::ByteStoreFactory;
use rlhex::format::{Endianness, LineFormatter, LineOptions};
use rlhex::search::{investigate, FormatTag, SearchEngine};
use tempfile::NamedTempFile;

fn temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content).expect("write contents");
    file.flush().expect("flush");
    file
}

#[test]
fn sequential_file_renders_values_and_short_tail() {
    let file = temp_file(&(0u8..20).collect::<Vec<u8>>());
    let store = ByteStoreFactory::open(file.path()).unwrap();
    let registry = CodecRegistry::new();
    let codec = registry.get_or_default(0);
    let formatter = LineFormatter::new();

    let lines = formatter.visible_lines(&store, 0, 10, &LineOptions::new(codec));
    assert_eq!(lines.len(), 2);

    let first = &lines[0];
    assert!(first.text.starts_with(
        "00000000: 00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f   │................│"
    ));
    let values = first.values.expect("values shown");
    assert_eq!(values.int16, Some(256));
    assert_eq!(values.int32, Some(50462976));
    assert!(first.text.contains(" int16: 256 int32: 50462976 float: "));

    let tail = &lines[1];
    assert_eq!(tail.offset, 16);
    assert_eq!(tail.display, vec![16, 17, 18, 19]);
    assert_eq!(
        tail.text.find('│'),
        first.text.find('│'),
        "character column stays aligned on the short row"
    );

    let big = formatter.format_line(
        &store,
        0,
        &LineOptions::new(codec).with_endianness(Endianness::Big),
    );
    assert_eq!(big.values.and_then(|v| v.int16), Some(1));
    assert_eq!(big.values.and_then(|v| v.int32), Some(66051));
}

#[test]
fn shifted_view_keeps_the_address() {
    let file = temp_file(&(0u8..64).collect::<Vec<u8>>());
    let store = ByteStoreFactory::open(file.path()).unwrap();
    let registry = CodecRegistry::new();
    let formatter = LineFormatter::new();

    let options = LineOptions::new(registry.get_or_default(0)).with_shift(3);
    let row = formatter.format_line(&store, 16, &options);
    assert!(row.text.starts_with("00000010: 0d 0e 0f 10"));

    let first = formatter.format_line(&store, 0, &options);
    assert_eq!(&first.display[..4], &[0, 0, 0, 0]);
    assert_eq!(first.display.len(), 16);
}

#[test]
fn search_navigation_wraps_and_investigates() {
    let mut content = b"start".to_vec();
    content.extend_from_slice(&[0u8; 11]);
    content.extend_from_slice(b"needle");
    content.extend_from_slice(&[0u8; 10]);
    content.extend_from_slice(b"needle");
    let file = temp_file(&content);

    let store = Arc::new(ByteStoreFactory::open(file.path()).unwrap());
    let engine = SearchEngine::new(Arc::clone(&store));
    let registry = CodecRegistry::new();
    let codec = registry.get_or_default(0);

    let mut results = engine.search("needle", 0, codec);
    let offsets: Vec<u64> = results.hits().iter().map(|h| h.offset).collect();
    assert_eq!(offsets, vec![16, 32]);

    assert!(results.next());
    assert_eq!(results.current().map(|h| h.offset), Some(32));
    assert!(results.next());
    assert_eq!(results.current().map(|h| h.offset), Some(16));
    assert!(results.prev());
    assert_eq!(results.current().map(|h| h.offset), Some(32));

    let details = investigate(&store, &results, codec).unwrap();
    assert_eq!(
        details.summary(),
        " Search hit: offset 0x20 (32) | Found as: ascii | Bytes: 6e6565646c65 | "
    );

    let from_middle = engine.search("needle", 17, codec);
    assert_eq!(from_middle.len(), 1);
}

#[test]
fn numeric_search_finds_every_representation() {
    let mut content = Vec::new();
    content.extend_from_slice(&258u16.to_le_bytes());
    content.extend_from_slice(&[0xff; 2]);
    content.extend_from_slice(&258u32.to_be_bytes());
    content.extend_from_slice(&258f32.to_le_bytes());
    content.extend_from_slice(b"258");
    let file = temp_file(&content);

    let store = ByteStoreFactory::open(file.path()).unwrap();
    let engine = SearchEngine::new(Arc::new(store));
    let registry = CodecRegistry::new();
    let results = engine.search("258", 0, registry.get_or_default(0));

    let tags: Vec<FormatTag> = results.hits().iter().map(|h| h.tag).collect();
    assert_eq!(tags.first(), Some(&FormatTag::Ascii));
    for tag in [
        FormatTag::Int16Le,
        FormatTag::Int16Be,
        FormatTag::Int32Be,
        FormatTag::Float32Le,
    ] {
        assert!(tags.contains(&tag), "missing {}", tag);
    }
    assert!(results
        .hits()
        .iter()
        .any(|h| h.tag == FormatTag::Int32Be && h.offset == 4));
}

#[test]
fn custom_encodings_extend_the_cycle() {
    let config = EncodingConfig::from_toml_str(
        r#"encodings = ["koi8-r", { name = "shift_jis", module = "jis" }, "bogus-codec"]"#,
    )
    .unwrap();
    let mut registry = CodecRegistry::new();
    let builtin = registry.len();
    assert_eq!(registry.extend_from_config(&config), 2);
    assert_eq!(registry.len(), builtin + 2);

    let koi8 = registry.lookup("koi8-r").unwrap();
    assert_eq!(registry.cycle(registry.len() - 1), 0);

    // 0xc1 is a Cyrillic letter in KOI8-R: decodable but not ASCII printable
    let glyph = registry.get_or_default(koi8).decode_one(0xc1);
    assert_eq!(glyph.ch, '.');
    assert!(!glyph.is_error());

    let encoded = Codec::resolve("koi8-r").and_then(|c| c.encode("abc"));
    assert_eq!(encoded, Some(b"abc".to_vec()));
}
