//! Page-level types.

use super::{Fragment, Quad, UNIT_SQUARE};
use serde::{Deserialize, Serialize};

/// A single OCR page: its boundary polygon plus the fragments found on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page boundary polygon, clockwise from the reading top-left
    #[serde(default = "unit_square")]
    pub boundary: Quad,

    /// Text fragments on the page
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

fn unit_square() -> Quad {
    UNIT_SQUARE
}

impl Page {
    /// Create a new empty page with the given boundary.
    pub fn new(number: u32, boundary: Quad) -> Self {
        Self {
            number,
            boundary,
            fragments: Vec::new(),
        }
    }

    /// Create a new empty page whose boundary is the unit square.
    pub fn unit(number: u32) -> Self {
        Self::new(number, UNIT_SQUARE)
    }

    /// Add a fragment to the page, stamping it with this page's number.
    pub fn add_fragment(&mut self, mut fragment: Fragment) {
        fragment.page = self.number;
        self.fragments.push(fragment);
    }

    /// Builder-style variant of [`Page::add_fragment`].
    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.add_fragment(fragment);
        self
    }

    /// Check if the page has no fragments with text.
    pub fn is_empty(&self) -> bool {
        !self.fragments.iter().any(Fragment::has_text)
    }

    /// Get the number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::unit(1)
    }
}
