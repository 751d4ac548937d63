#![allow(clippy::unwrap_used)]
//! Integration tests for `multiformat::parse_file` and the JSON writer.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use multiformat::{
    BookRecord, ParseConfig, ParseErrorKind, Parsed, Stage, WriteConfig, parse_file, parse_str,
    write_json,
};
use serde_json::{Value, json};
use tempfile::TempDir;

fn write_input(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn books_xml(count: usize) -> String {
    let mut xml = String::from("<library>\n");
    for i in 1..=count {
        writeln!(
            xml,
            "  <book><id>{i}</id><title>Title {i}</title><author>Author {i}</author></book>"
        )
        .unwrap();
    }
    xml.push_str("</library>\n");
    xml
}

#[test]
fn test_json_file_round_trips_through_writer() {
    let tmp = TempDir::new().unwrap();
    let source = r#"{"name": "inventaire", "items": [{"sku": "A1", "qty": 3, "price": 9.5},
        {"sku": "B2", "qty": 0, "tags": []}], "active": true, "note": null}"#;
    let input = write_input(&tmp, "data.json", source);
    let output = tmp.path().join("output").join("standard.json");

    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    write_json(&parsed, &output, &WriteConfig::default()).unwrap();

    let original: Value = serde_json::from_str(source).unwrap();
    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(original, written);
}

#[test]
fn test_json_big_numbers_round_trip_exactly() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "ledger.json",
        r#"{"balance": 123456789012345678901234567890, "scale": 1e400}"#,
    );
    let output = tmp.path().join("standard.json");

    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    write_json(&parsed, &output, &WriteConfig::default()).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\n  \"balance\": 123456789012345678901234567890,\n  \"scale\": 1e400\n}"
    );
}

#[test]
fn test_xml_with_doctype() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "books.xml",
        "<!DOCTYPE library>\n<library><book><id>3</id><title>Ubik</title><author>Dick</author></book></library>\n",
    );
    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    assert_eq!(parsed.as_books().unwrap().len(), 1);
}

#[test]
fn test_json_example_mapping() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "a.json", r#"{"a": 1, "b": [2,3]}"#);
    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    assert_eq!(parsed, Parsed::Json(json!({"a": 1, "b": [2, 3]})));
}

#[test]
fn test_top_level_json_array() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "list.json", "\n\n  [1, \"two\", {\"three\": 3}]  \n");
    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    assert_eq!(parsed.kind_name(), "array");
}

#[test]
fn test_xml_example_record() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "data.xml",
        "<library><book><id>1</id><title>Dune</title><author>Herbert</author></book></library>",
    );
    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    assert_eq!(
        parsed.as_books().unwrap(),
        [BookRecord {
            id: 1,
            title: "Dune".to_owned(),
            author: "Herbert".to_owned(),
        }]
    );
}

#[test]
fn test_n_books_in_order() {
    let tmp = TempDir::new().unwrap();
    for count in [0, 1, 5, 40] {
        let input = write_input(&tmp, "books.xml", &books_xml(count));
        let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
        let books = parsed.as_books().unwrap();
        assert_eq!(books.len(), count);
        for (i, book) in books.iter().enumerate() {
            assert_eq!(book.id, i64::try_from(i + 1).unwrap());
            assert_eq!(book.title, format!("Title {}", i + 1));
        }
    }
}

#[test]
fn test_xml_with_declaration_and_comments() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "decl.xml",
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- catalogue -->\n<library>\n  <!-- first -->\n  <book><id>12</id><title>Fondation</title><author>Asimov</author></book>\n</library>\n",
    );
    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    assert_eq!(parsed.as_books().unwrap()[0].id, 12);
}

#[test]
fn test_xml_books_written_as_json_array() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "data.xml",
        "<library><book><id>1</id><title>L\u{2019}\u{c9}tranger</title><author>Camus</author></book></library>",
    );
    let output = tmp.path().join("out").join("books.json");

    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    write_json(&parsed, &output, &WriteConfig::default()).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("L\u{2019}\u{c9}tranger"));
    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        value,
        json!([{"id": 1, "title": "L\u{2019}\u{c9}tranger", "author": "Camus"}])
    );
}

#[test]
fn test_missing_author_is_missing_field() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "bad.xml",
        "<library><book><id>1</id><title>Dune</title></book></library>",
    );
    let err = parse_file(&input, &ParseConfig::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingField);
    assert_eq!(err.stage(), Stage::Xml);
    assert_eq!(err.file.as_deref(), Some(input.as_path()));
}

#[test]
fn test_blank_id_is_empty_field() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "blank_id.xml",
        "<library><book><id> </id><title>Dune</title><author>Herbert</author></book></library>",
    );
    let err = parse_file(&input, &ParseConfig::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EmptyField);
}

#[test]
fn test_non_numeric_id_is_invalid_id() {
    let err = parse_str(
        "<library><book><id>12a</id><title>Dune</title><author>Herbert</author></book></library>",
    )
    .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidId);
}

#[test]
fn test_empty_file_regardless_of_extension() {
    let tmp = TempDir::new().unwrap();
    for name in ["empty.json", "empty.xml", "empty.txt", "empty"] {
        for content in ["", "   \n\t  \n"] {
            let input = write_input(&tmp, name, content);
            let err = parse_file(&input, &ParseConfig::default()).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::EmptyContent, "file: {name}");
            assert_eq!(err.stage(), Stage::Load);
        }
    }
}

#[test]
fn test_unknown_format() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "data.json", "not json or xml");
    let err = parse_file(&input, &ParseConfig::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownFormat);
    assert_eq!(err.stage(), Stage::Detect);
}

#[test]
fn test_extension_does_not_drive_detection() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "misnamed.xml", "[1, 2, 3]");
    let parsed = parse_file(&input, &ParseConfig::default()).unwrap();
    assert_eq!(parsed, Parsed::Json(json!([1, 2, 3])));
}

#[test]
fn test_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = parse_file(&tmp.path().join("nope.json"), &ParseConfig::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NotFound);
    assert!(err.format_human_readable().contains("[load/not_found]"));
}

#[test]
fn test_invalid_json_carries_file() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "broken.json", "{\"a\": [1, 2}");
    let err = parse_file(&input, &ParseConfig::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidJson);
    assert_eq!(err.file.as_deref(), Some(input.as_path()));
    assert!(err.message.contains("column"), "got: {}", err.message);
}

#[test]
fn test_invalid_xml() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "broken.xml", "<library><book></library>");
    let err = parse_file(&input, &ParseConfig::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidXml);
}
