use super::{language_for, Document, Position};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn exts() -> Vec<String> {
    vec!["yaml".to_string(), "yml".to_string()]
}

#[test]
fn test_reveal_offset_zero_is_origin() {
    for text in ["a: 1\n", "\n\n- x\n", "  indented:\n    deep: true\n", "é: ü\n"] {
        let document = Document::new("doc.yaml", "yaml", text);
        assert_eq!(document.line_start_position(0), Position::new(0, 0));
    }
}

#[test]
fn test_position_at_counts_characters() {
    let document = Document::new("doc.yaml", "yaml", "a: 1\nkéy: v\n");
    // 'v' is byte 11: "kéy: " is 5 chars but 6 bytes
    assert_eq!(document.position_at(11), Position::new(1, 5));
    assert_eq!(document.line_start_position(11), Position::new(1, 0));
}

#[test]
fn test_offsets_past_the_end_are_clamped() {
    let document = Document::new("doc.yaml", "yaml", "a: 1\nb: 2");
    assert_eq!(document.position_at(1_000), Position::new(1, 4));
    assert_eq!(document.line_start_position(usize::MAX), Position::new(1, 0));
}

#[test]
fn test_offsets_inside_a_character_snap_back() {
    let document = Document::new("doc.yaml", "yaml", "é");
    assert_eq!(document.clamp_offset(1), 0);
    assert_eq!(document.clamp_offset(2), 2);
}

#[test]
fn test_lines() {
    let document = Document::new("doc.yaml", "yaml", "one\r\ntwo\n");
    assert_eq!(document.line_count(), 3);
    assert_eq!(document.line(0), "one");
    assert_eq!(document.line(1), "two");
    assert_eq!(document.line(2), "");
    assert_eq!(document.line(9), "");
}

#[test]
fn test_language_for_extensions() {
    assert_eq!(language_for(Path::new("a.yaml"), &exts()), "yaml");
    assert_eq!(language_for(Path::new("b.YML"), &exts()), "yaml");
    assert_eq!(language_for(Path::new("c.json"), &exts()), "json");
    assert_eq!(language_for(Path::new("Makefile"), &exts()), "plaintext");
}

#[test]
fn test_open_reads_file_and_tags_language() {
    let mut file = NamedTempFile::with_suffix(".yml").unwrap();
    writeln!(file, "key: value").unwrap();

    let document = Document::open(file.path(), &exts()).unwrap();
    assert!(document.is_yaml());
    assert_eq!(document.text(), "key: value\n");
    assert_eq!(document.uri(), file.path().to_string_lossy());
}
