//! OCR fragment types.

use serde::{Deserialize, Serialize};

use super::geometry::{rect_quad, Quad};

/// One OCR-detected unit of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Recognized text
    pub text: String,

    /// Page-relative quadrilateral, clockwise from the reading top-left
    pub corners: Quad,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, corners: Quad, page: u32) -> Self {
        Self {
            text: text.into(),
            corners,
            page,
        }
    }

    /// Create a fragment from an axis-aligned rectangle.
    pub fn from_rect(
        text: impl Into<String>,
        page: u32,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self::new(text, rect_quad(left, top, width, height), page)
    }

    /// Number of characters in the text (Unicode scalar values).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the fragment carries any text.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}
