//! Line-level OCR "read" responses.
//!
//! The response lists, per page, its pixel size and the recognized lines,
//! each with a flat eight-number bounding box `x0 y0 x1 y1 x2 y2 x3 y3`
//! (clockwise from the reading top-left). Coordinates are normalized by the
//! page size so they share the `[0, 1]` frame of page boundary polygons
//! reported by document-analysis services.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Fragment, Page, Point, Quad, UNIT_SQUARE};

/// A read response: one entry per page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadResult {
    /// Recognized pages
    pub read_results: Vec<ReadPage>,
}

/// One page of a read response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadPage {
    /// Page number (1-indexed)
    pub page: u32,
    /// Page width in the provider's units
    pub width: f64,
    /// Page height in the provider's units
    pub height: f64,
    /// Recognized lines
    #[serde(default)]
    pub lines: Vec<ReadLine>,
}

/// One recognized line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadLine {
    /// Line text
    pub text: String,
    /// Flat corner list, eight numbers
    pub bounding_box: Vec<f64>,
}

/// The response may arrive bare or wrapped in `analyzeResult`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    #[serde(rename_all = "camelCase")]
    Wrapped { analyze_result: ReadResult },
    Bare(ReadResult),
}

impl ReadResult {
    /// Parse a read response, bare or wrapped in `analyzeResult`.
    pub fn from_json(json: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(json)?;
        Ok(match envelope {
            Envelope::Wrapped { analyze_result } => analyze_result,
            Envelope::Bare(result) => result,
        })
    }

    /// Convert into pages, attaching the boundary polygon recorded for each
    /// page number. Pages without a recorded boundary get the unit square.
    pub fn into_pages(self, boundaries: &BTreeMap<u32, Quad>) -> Result<Vec<Page>> {
        self.read_results
            .iter()
            .map(|read_page| {
                let boundary = boundaries
                    .get(&read_page.page)
                    .copied()
                    .unwrap_or(UNIT_SQUARE);
                let mut page = Page::new(read_page.page, boundary);
                for fragment in read_page.fragments()? {
                    page.add_fragment(fragment);
                }
                Ok(page)
            })
            .collect()
    }
}

impl ReadPage {
    /// Normalized fragments for this page. Lines without text are dropped.
    pub fn fragments(&self) -> Result<Vec<Fragment>> {
        if self.page == 0 {
            return Err(Error::InvalidInput("page numbers start at 1".to_string()));
        }
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.width) || !size_ok(self.height) {
            return Err(Error::InvalidInput(format!(
                "page {} has invalid size {}x{}",
                self.page, self.width, self.height
            )));
        }

        self.lines
            .iter()
            .filter(|line| !line.text.is_empty())
            .map(|line| {
                let corners = self.normalize_box(&line.bounding_box).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "line '{}' on page {} has {} bounding box values, expected 8",
                        line.text,
                        self.page,
                        line.bounding_box.len()
                    ))
                })?;
                Ok(Fragment::new(line.text.clone(), corners, self.page))
            })
            .collect()
    }

    fn normalize_box(&self, values: &[f64]) -> Option<Quad> {
        if values.len() != 8 {
            return None;
        }
        let corner = |i: usize| Point::new(values[2 * i] / self.width, values[2 * i + 1] / self.height);
        Some([corner(0), corner(1), corner(2), corner(3)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "status": "succeeded",
        "analyzeResult": {
            "readResults": [
                {
                    "page": 1,
                    "width": 200,
                    "height": 100,
                    "lines": [
                        { "text": "Invoice", "boundingBox": [20, 10, 60, 10, 60, 15, 20, 15] },
                        { "text": "", "boundingBox": [0, 0, 1, 0, 1, 1, 0, 1] }
                    ]
                },
                { "page": 2, "width": 200, "height": 100 }
            ]
        }
    }"#;

    #[test]
    fn test_normalizes_by_page_size() {
        let result = ReadResult::from_json(RESPONSE).unwrap();
        let fragments = result.read_results[0].fragments().unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].corners[0], Point::new(0.1, 0.1));
        assert_eq!(fragments[0].corners[2], Point::new(0.3, 0.15));
    }

    #[test]
    fn test_into_pages_attaches_boundaries() {
        let boundary = [
            Point::new(0.01, 0.02),
            Point::new(0.98, 0.01),
            Point::new(0.99, 0.97),
            Point::new(0.02, 0.99),
        ];
        let boundaries = BTreeMap::from([(1, boundary)]);
        let pages = ReadResult::from_json(RESPONSE)
            .unwrap()
            .into_pages(&boundaries)
            .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].boundary, boundary);
        assert_eq!(pages[1].boundary, UNIT_SQUARE);
        assert!(pages[1].fragments.is_empty());
    }

    #[test]
    fn test_bare_response() {
        let json = r#"{"readResults": [{"page": 1, "width": 10, "height": 10, "lines": []}]}"#;
        assert_eq!(ReadResult::from_json(json).unwrap().read_results.len(), 1);
    }

    #[test]
    fn test_short_bounding_box_rejected() {
        let page = ReadPage {
            page: 1,
            width: 10.0,
            height: 10.0,
            lines: vec![ReadLine {
                text: "x".to_string(),
                bounding_box: vec![0.0, 0.0, 1.0],
            }],
        };
        assert!(matches!(page.fragments(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_zero_size_rejected() {
        let page = ReadPage {
            page: 1,
            width: 0.0,
            height: 10.0,
            lines: Vec::new(),
        };
        assert!(matches!(page.fragments(), Err(Error::InvalidInput(_))));
    }
}
