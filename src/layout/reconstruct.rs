//! Per-page layout reconstruction.

use rand::Rng;

use crate::error::{Error, Result};
use crate::model::{Fragment, Quad};
use crate::transform::{Homography, TransformProvider};

use super::options::LayoutOptions;
use super::rows::{bin_rows, estimate_line_height, row_text, PlacedFragment};

/// Rebuilds plain text from OCR fragments using a [`TransformProvider`] for
/// page rectification.
///
/// The reconstructor holds no mutable state, so one instance can serve many
/// pages at once.
#[derive(Debug, Clone)]
pub struct LayoutReconstructor<P> {
    provider: P,
    options: LayoutOptions,
}

impl<P: TransformProvider> LayoutReconstructor<P> {
    /// Create a reconstructor with default options.
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, LayoutOptions::default())
    }

    /// Create a reconstructor with custom options.
    pub fn with_options(provider: P, options: LayoutOptions) -> Self {
        Self { provider, options }
    }

    /// Get the options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Get the transform provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Reconstruct the text of one page.
    ///
    /// Fragments without text are ignored; a page left with no fragments
    /// yields an empty string without consulting the provider.
    pub fn reconstruct_page(&self, fragments: &[Fragment], boundary: &Quad) -> Result<String> {
        let mut rng = self.options.page_rng(0);
        self.reconstruct_page_with_rng(fragments, boundary, &mut rng)
    }

    /// [`reconstruct_page`](Self::reconstruct_page) with an explicit random
    /// source for row-height clustering.
    pub fn reconstruct_page_with_rng<R: Rng>(
        &self,
        fragments: &[Fragment],
        boundary: &Quad,
        rng: &mut R,
    ) -> Result<String> {
        let number = fragments.first().map(|f| f.page).unwrap_or(1);
        self.page_text(number, fragments, boundary, rng)
    }

    pub(crate) fn page_text<R: Rng>(
        &self,
        number: u32,
        fragments: &[Fragment],
        boundary: &Quad,
        rng: &mut R,
    ) -> Result<String> {
        if !fragments.iter().any(Fragment::has_text) {
            log::debug!("page {}: no text fragments", number);
            return Ok(String::new());
        }

        let homography = self.homography(number, boundary)?;
        Ok(layout_fragments(fragments, &homography, &self.options, rng))
    }

    /// Ask the provider for the page transform and reject unusable matrices.
    fn homography(&self, number: u32, boundary: &Quad) -> Result<Homography> {
        let homography = self.provider.transform(boundary).map_err(|e| match e {
            Error::TransformUnavailable { .. } | Error::DegenerateGeometry(_) => e,
            other => Error::transform_unavailable(number, other),
        })?;
        homography.validate()?;
        Ok(homography)
    }
}

/// Lay out fragments that are mapped into canonical coordinates by
/// `homography`.
///
/// This is the geometric core of [`LayoutReconstructor::reconstruct_page`]:
/// place, estimate row height, bin rows, serialize rows and join them with
/// newlines. Fragments without text are skipped.
pub fn layout_fragments<R: Rng>(
    fragments: &[Fragment],
    homography: &Homography,
    options: &LayoutOptions,
    rng: &mut R,
) -> String {
    let placed: Vec<PlacedFragment<'_>> = fragments
        .iter()
        .filter(|f| f.has_text())
        .map(|f| PlacedFragment::place(f, homography))
        .collect();

    if placed.is_empty() {
        return String::new();
    }

    let line_height = estimate_line_height(
        &placed,
        options.max_clusters,
        options.line_height_divisor,
        rng,
    );

    let mut rows = bin_rows(placed, line_height, options.row_anchor);

    log::debug!(
        "line height {:.4}, {} rows ({:?} anchor)",
        line_height,
        rows.len(),
        options.row_anchor
    );

    rows.iter_mut()
        .map(|row| row_text(row, options.tab_gap_factor))
        .collect::<Vec<_>>()
        .join("\n")
}
