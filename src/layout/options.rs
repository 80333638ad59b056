//! Layout reconstruction options and configuration.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cluster::{DEFAULT_MAX_K, MIN_K};
use crate::error::{Error, Result};

/// Options for reconstructing page and document text.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Ceiling for the elbow search over fragment heights
    pub max_clusters: usize,

    /// Row tolerance is the dominant height divided by this
    pub line_height_divisor: f64,

    /// A gap wider than this many average characters becomes a tab
    pub tab_gap_factor: f64,

    /// How the row-binning reference moves
    pub row_anchor: RowAnchor,

    /// Error handling mode for document assembly
    pub error_mode: ErrorMode,

    /// Whether to reconstruct pages in parallel
    pub parallel: bool,

    /// Seed for clustering; `None` seeds from the operating system
    pub seed: Option<u64>,

    /// Page selection (source page numbers)
    pub pages: PageSelection,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the elbow search ceiling (at least 2).
    pub fn with_max_clusters(mut self, max_k: usize) -> Self {
        self.max_clusters = max_k.max(MIN_K);
        self
    }

    /// Set the line height divisor.
    pub fn with_line_height_divisor(mut self, divisor: f64) -> Self {
        self.line_height_divisor = divisor;
        self
    }

    /// Set the tab gap factor.
    pub fn with_tab_gap_factor(mut self, factor: f64) -> Self {
        self.tab_gap_factor = factor;
        self
    }

    /// Set the row anchor.
    pub fn with_row_anchor(mut self, anchor: RowAnchor) -> Self {
        self.row_anchor = anchor;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (mark failed pages and continue).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Make clustering reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Random source for the page at output position `index`.
    ///
    /// Seeded runs derive one generator per page, so the result does not
    /// depend on whether pages run in parallel.
    pub fn page_rng(&self, index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_clusters: DEFAULT_MAX_K,
            line_height_divisor: 3.0,
            tab_gap_factor: 2.0,
            row_anchor: RowAnchor::Previous,
            error_mode: ErrorMode::Strict,
            parallel: true,
            seed: None,
            pages: PageSelection::All,
        }
    }
}

/// Reference position a fragment's `top` is compared against when binning
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAnchor {
    /// The previous fragment's `top`. Gradually sloped baselines can chain
    /// into one row even when its ends are far apart.
    #[default]
    Previous,
    /// The `top` of the first fragment in the current row
    RowStart,
}

/// Error handling mode during document assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on the first failed page
    #[default]
    Strict,
    /// Replace a failed page with an explicit marker and continue
    Lenient,
}

/// Which source pages go into a document.
///
/// Selection happens before output numbering, so the selected pages are
/// still headed `BEGIN PAGE 1`, `BEGIN PAGE 2`, … in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// Source pages `first..=last`
    Range(RangeInclusive<u32>),
    /// Listed source pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Whether source page `number` is selected.
    pub fn includes(&self, number: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&number),
            PageSelection::Pages(pages) => pages.contains(&number),
        }
    }

    /// Whether no page number can match.
    pub fn is_empty(&self) -> bool {
        match self {
            PageSelection::All => false,
            PageSelection::Range(range) => range.is_empty(),
            PageSelection::Pages(pages) => pages.is_empty(),
        }
    }

    /// Parse a selection such as `"all"`, `"4"`, `"2-5"` or `"1,3,7-9"`.
    ///
    /// A single span becomes [`PageSelection::Range`]; a list becomes a
    /// sorted, deduplicated [`PageSelection::Pages`]. Page 0 and reversed
    /// spans are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let spans = s.split(',').map(parse_span).collect::<Result<Vec<_>>>()?;
        if let [span] = spans.as_slice() {
            return Ok(PageSelection::Range(span.clone()));
        }

        let mut pages: Vec<u32> = spans.into_iter().flatten().collect();
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_span(part: &str) -> Result<RangeInclusive<u32>> {
    let part = part.trim();
    let (first, last) = match part.split_once('-') {
        Some((first, last)) => (parse_page(first)?, parse_page(last)?),
        None => {
            let page = parse_page(part)?;
            (page, page)
        }
    };
    if first > last {
        return Err(Error::InvalidInput(format!(
            "page span '{part}' runs backwards"
        )));
    }
    Ok(first..=last)
}

fn parse_page(text: &str) -> Result<u32> {
    let text = text.trim();
    match text.parse::<u32>() {
        Ok(0) => Err(Error::InvalidInput("page numbers start at 1".to_string())),
        Ok(page) => Ok(page),
        Err(_) => Err(Error::InvalidInput(format!("'{text}' is not a page number"))),
    }
}
