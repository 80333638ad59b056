//! JSON page files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Page;

/// Parse a JSON array of pages.
pub fn read_pages_json(json: &str) -> Result<Vec<Page>> {
    let pages: Vec<Page> = serde_json::from_str(json)?;
    validate(pages)
}

/// Read a JSON array of pages from any reader.
pub fn read_pages_reader<R: Read>(reader: R) -> Result<Vec<Page>> {
    let pages: Vec<Page> = serde_json::from_reader(reader)?;
    validate(pages)
}

/// Read a JSON array of pages from a file.
pub fn read_pages_file<P: AsRef<Path>>(path: P) -> Result<Vec<Page>> {
    let file = File::open(path)?;
    read_pages_reader(BufReader::new(file))
}

/// Check page numbering and stamp each fragment with its page.
fn validate(mut pages: Vec<Page>) -> Result<Vec<Page>> {
    for page in pages.iter_mut() {
        if page.number == 0 {
            return Err(Error::InvalidInput(
                "page numbers start at 1".to_string(),
            ));
        }
        for fragment in page.fragments.iter_mut() {
            if fragment.page != page.number {
                log::debug!(
                    "fragment '{}' claims page {} but is listed under page {}",
                    fragment.text,
                    fragment.page,
                    page.number
                );
                fragment.page = page.number;
            }
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "number": 1,
            "boundary": [{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1},{"x":0,"y":1}],
            "fragments": [
                {
                    "text": "Hello",
                    "corners": [{"x":0.1,"y":0.1},{"x":0.2,"y":0.1},{"x":0.2,"y":0.12},{"x":0.1,"y":0.12}]
                }
            ]
        },
        { "number": 2 }
    ]"#;

    #[test]
    fn test_read_pages_json() {
        let pages = read_pages_json(SAMPLE).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].fragments[0].text, "Hello");
        assert_eq!(pages[0].fragments[0].page, 1);
        assert!(pages[1].fragments.is_empty());
    }

    #[test]
    fn test_fragment_page_follows_listing() {
        let json = r#"[{"number": 4, "fragments": [
            {"text": "x", "page": 9, "corners": [{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1},{"x":0,"y":1}]}
        ]}]"#;
        let pages = read_pages_json(json).unwrap();
        assert_eq!(pages[0].fragments[0].page, 4);
    }

    #[test]
    fn test_page_zero_rejected() {
        let err = read_pages_json(r#"[{"number": 0}]"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(read_pages_json("[{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_read_pages_reader() {
        let pages = read_pages_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(pages.len(), 2);
    }
}
