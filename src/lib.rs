//! # ocrlayout
//!
//! Layout-preserving plain text from unordered OCR fragments.
//!
//! OCR engines return text as loose fragments, each anchored to a
//! quadrilateral on the page. This library rectifies every page with a
//! projective transform, infers the dominant line height with adaptive
//! 1-D k-means, bins fragments into rows and serializes each row with
//! spaces or tabs chosen from the horizontal gaps.
//!
//! ## Quick Start
//!
//! ```
//! use ocrlayout::{Fragment, OcrLayout, Page};
//!
//! fn main() -> ocrlayout::Result<()> {
//!     let page = Page::unit(1)
//!         .with_fragment(Fragment::from_rect("Invoice", 1, 0.10, 0.10, 0.07, 0.02))
//!         .with_fragment(Fragment::from_rect("Total", 1, 0.60, 0.10, 0.05, 0.02));
//!
//!     let text = OcrLayout::new().with_seed(7).reconstruct_document(&[page])?;
//!     assert_eq!(text, "\n ------ BEGIN PAGE 1 ------ \nInvoice\tTotal ");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Adaptive clustering**: k-means++ with elbow-selected cluster count
//! - **Pluggable rectification**: any [`TransformProvider`], with a local
//!   quad-to-rectangle solver included
//! - **Parallel processing**: pages are reconstructed with Rayon
//! - **Provider ingest**: JSON page files and line-level read responses

pub mod cluster;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod model;
pub mod transform;

// Re-export commonly used types
pub use cluster::AdaptiveClusterer;
pub use error::{Error, Result};
pub use layout::{ErrorMode, LayoutOptions, LayoutReconstructor, PageSelection, RowAnchor};
pub use model::{CanonicalBox, Fragment, Page, Point, Quad, UNIT_SQUARE};
pub use transform::{FixedProvider, Homography, RectifyingProvider, TransformProvider};

use std::path::Path;

/// Reconstruct the text of one page with default options.
///
/// # Example
///
/// ```
/// use ocrlayout::{reconstruct_page, Fragment, RectifyingProvider, UNIT_SQUARE};
///
/// let hello = Fragment::from_rect("Hello", 1, 0.1, 0.1, 0.2, 0.02);
/// let text = reconstruct_page(&[hello], &UNIT_SQUARE, RectifyingProvider::new()).unwrap();
/// assert_eq!(text, "Hello ");
/// ```
pub fn reconstruct_page<P: TransformProvider>(
    fragments: &[Fragment],
    boundary: &Quad,
    provider: P,
) -> Result<String> {
    LayoutReconstructor::new(provider).reconstruct_page(fragments, boundary)
}

/// Reconstruct a multi-page document with default options.
///
/// # Example
///
/// ```no_run
/// use ocrlayout::{ingest, reconstruct_document, RectifyingProvider};
///
/// let pages = ingest::read_pages_file("pages.json").unwrap();
/// let text = reconstruct_document(&pages, RectifyingProvider::new()).unwrap();
/// println!("{}", text);
/// ```
pub fn reconstruct_document<P: TransformProvider>(pages: &[Page], provider: P) -> Result<String> {
    LayoutReconstructor::new(provider).reconstruct_document(pages)
}

/// Cluster 1-D samples, choosing the cluster count automatically.
///
/// Uses an OS-seeded random source; see [`AdaptiveClusterer::seeded`] for
/// reproducible results.
pub fn optimal_cluster(samples: &[f64]) -> Vec<Vec<f64>> {
    AdaptiveClusterer::new().optimal_cluster(samples)
}

/// Builder for reconstructing OCR documents.
///
/// # Example
///
/// ```no_run
/// use ocrlayout::{OcrLayout, PageSelection, RowAnchor};
///
/// let text = OcrLayout::new()
///     .lenient()
///     .with_seed(42)
///     .with_row_anchor(RowAnchor::RowStart)
///     .with_pages(PageSelection::Range(1..=3))
///     .reconstruct_file("pages.json")?;
/// # Ok::<(), ocrlayout::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct OcrLayout<P = RectifyingProvider> {
    provider: P,
    options: LayoutOptions,
}

impl OcrLayout<RectifyingProvider> {
    /// Create a builder that rectifies pages onto the unit square.
    pub fn new() -> Self {
        Self {
            provider: RectifyingProvider::new(),
            options: LayoutOptions::default(),
        }
    }
}

impl Default for OcrLayout<RectifyingProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TransformProvider> OcrLayout<P> {
    /// Use a different transform provider.
    pub fn with_provider<Q: TransformProvider>(self, provider: Q) -> OcrLayout<Q> {
        OcrLayout {
            provider,
            options: self.options,
        }
    }

    /// Replace all layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace failed pages with a marker instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Seed the clustering random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options = self.options.with_seed(seed);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Set how rows are anchored while binning.
    pub fn with_row_anchor(mut self, anchor: RowAnchor) -> Self {
        self.options = self.options.with_row_anchor(anchor);
        self
    }

    /// Finish the builder.
    pub fn build(self) -> LayoutReconstructor<P> {
        LayoutReconstructor::with_options(self.provider, self.options)
    }

    /// Reconstruct one page.
    pub fn reconstruct_page(self, fragments: &[Fragment], boundary: &Quad) -> Result<String> {
        self.build().reconstruct_page(fragments, boundary)
    }

    /// Reconstruct a document.
    pub fn reconstruct_document(self, pages: &[Page]) -> Result<String> {
        self.build().reconstruct_document(pages)
    }

    /// Read a JSON page file and reconstruct it.
    pub fn reconstruct_file<Q: AsRef<Path>>(self, path: Q) -> Result<String> {
        let pages = ingest::read_pages_file(path)?;
        self.reconstruct_document(&pages)
    }
}
