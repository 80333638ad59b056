//! Integration tests for loading OCR output from files.

use std::fs;

use ocrlayout::ingest::{self, ReadResult};
use ocrlayout::{Error, OcrLayout, UNIT_SQUARE};

const PAGES: &str = r#"[
    {
        "number": 2,
        "fragments": [
            {"text": "second", "corners": [{"x":0.1,"y":0.1},{"x":0.3,"y":0.1},{"x":0.3,"y":0.12},{"x":0.1,"y":0.12}]}
        ]
    },
    {
        "number": 1,
        "fragments": [
            {"text": "Total", "corners": [{"x":0.6,"y":0.2},{"x":0.7,"y":0.2},{"x":0.7,"y":0.22},{"x":0.6,"y":0.22}]},
            {"text": "Invoice", "corners": [{"x":0.1,"y":0.2},{"x":0.24,"y":0.2},{"x":0.24,"y":0.22},{"x":0.1,"y":0.22}]}
        ]
    }
]"#;

/// A read response in pixels for a 1000 x 2000 page.
const READ_RESPONSE: &str = r#"{
    "status": "succeeded",
    "analyzeResult": {
        "readResults": [{
            "page": 1,
            "width": 1000,
            "height": 2000,
            "lines": [
                {"text": "Amount", "boundingBox": [600, 400, 720, 400, 720, 440, 600, 440]},
                {"text": "Due", "boundingBox": [100, 400, 160, 400, 160, 440, 100, 440]},
                {"text": "", "boundingBox": [0, 0, 10, 0, 10, 10, 0, 10]}
            ]
        }]
    }
}"#;

const BLOCKS: &str = r#"{
    "Blocks": [
        {"BlockType": "PAGE", "Page": 1, "Geometry": {"Polygon": [
            {"X": 0.0, "Y": 0.0}, {"X": 1.0, "Y": 0.0}, {"X": 1.0, "Y": 1.0}, {"X": 0.0, "Y": 1.0}
        ]}}
    ]
}"#;

#[test]
fn test_reconstruct_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.json");
    fs::write(&path, PAGES).unwrap();

    let text = OcrLayout::new().with_seed(4).reconstruct_file(&path).unwrap();
    assert_eq!(
        text,
        "\n ------ BEGIN PAGE 1 ------ \nInvoice\tTotal \n ------ BEGIN PAGE 2 ------ \nsecond "
    );
}

#[test]
fn test_read_pages_file_defaults_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.json");
    fs::write(&path, PAGES).unwrap();

    let pages = ingest::read_pages_file(&path).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p.boundary == UNIT_SQUARE));
    assert!(pages[1].fragments.iter().all(|f| f.page == 1));
}

#[test]
fn test_read_response_with_boundaries() {
    let boundaries = ingest::read_boundaries_json(BLOCKS).unwrap();
    let pages = ReadResult::from_json(READ_RESPONSE)
        .unwrap()
        .into_pages(&boundaries)
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].fragment_count(), 2);

    let text = OcrLayout::new().with_seed(6).reconstruct_document(&pages).unwrap();
    assert_eq!(text, "\n ------ BEGIN PAGE 1 ------ \nDue\tAmount ");
}

#[test]
fn test_invalid_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(ingest::read_pages_file(&path), Err(Error::Json(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(ingest::read_pages_file(&path), Err(Error::Io(_))));
}
