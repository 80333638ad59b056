//! Sources of page homographies.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{Quad, UNIT_SQUARE};

use super::Homography;

/// Supplies the homography that maps a page into canonical coordinates.
///
/// Implementations may be slow (a remote service, say) and may fail; a
/// failure, timeout or cancellation must be reported as an error so the page
/// is never laid out with a partial matrix. Providers are shared across
/// pages reconstructed in parallel, hence `Send + Sync`.
pub trait TransformProvider: Send + Sync {
    /// Compute the transform for a page boundary polygon.
    fn transform(&self, boundary: &Quad) -> Result<Homography>;
}

impl<T: TransformProvider + ?Sized> TransformProvider for &T {
    fn transform(&self, boundary: &Quad) -> Result<Homography> {
        (**self).transform(boundary)
    }
}

impl<T: TransformProvider + ?Sized> TransformProvider for Arc<T> {
    fn transform(&self, boundary: &Quad) -> Result<Homography> {
        (**self).transform(boundary)
    }
}

impl<T: TransformProvider + ?Sized> TransformProvider for Box<T> {
    fn transform(&self, boundary: &Quad) -> Result<Homography> {
        (**self).transform(boundary)
    }
}

/// Solves the boundary-to-rectangle transform locally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectifyingProvider {
    target: Quad,
}

impl RectifyingProvider {
    /// Rectify onto the unit square.
    pub fn new() -> Self {
        Self {
            target: UNIT_SQUARE,
        }
    }

    /// Rectify onto a `width` × `height` rectangle anchored at the origin.
    pub fn with_target_size(width: f64, height: f64) -> Self {
        Self {
            target: crate::model::rect_quad(0.0, 0.0, width, height),
        }
    }

    /// The quad page boundaries are mapped onto.
    pub fn target(&self) -> &Quad {
        &self.target
    }
}

impl Default for RectifyingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformProvider for RectifyingProvider {
    fn transform(&self, boundary: &Quad) -> Result<Homography> {
        Homography::from_quads(boundary, &self.target)
    }
}

/// Returns the same matrix for every page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedProvider(pub Homography);

impl FixedProvider {
    /// A provider for input that is already in canonical coordinates.
    pub fn identity() -> Self {
        Self(Homography::IDENTITY)
    }
}

impl TransformProvider for FixedProvider {
    fn transform(&self, _boundary: &Quad) -> Result<Homography> {
        Ok(self.0)
    }
}

/// Adapts a closure into a [`TransformProvider`].
#[derive(Clone)]
pub struct FnProvider<F>(F);

impl<F> TransformProvider for FnProvider<F>
where
    F: Fn(&Quad) -> Result<Homography> + Send + Sync,
{
    fn transform(&self, boundary: &Quad) -> Result<Homography> {
        (self.0)(boundary)
    }
}

/// Build a provider from a closure.
///
/// ```
/// use ocrlayout::transform::{from_fn, Homography, TransformProvider};
/// use ocrlayout::model::UNIT_SQUARE;
///
/// let provider = from_fn(|_boundary| Ok(Homography::affine_scale(2.0, 2.0, 0.0, 0.0)));
/// assert!(provider.transform(&UNIT_SQUARE).is_ok());
/// ```
pub fn from_fn<F>(f: F) -> FnProvider<F>
where
    F: Fn(&Quad) -> Result<Homography> + Send + Sync,
{
    FnProvider(f)
}
