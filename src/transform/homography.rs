//! 3×3 projective transforms.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Point, Quad};

/// Pivots smaller than this make a system singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A 3×3 projective transform, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Homography(pub [[f64; 3]; 3]);

impl Homography {
    /// The identity transform.
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Create a transform from row-major entries.
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self(rows)
    }

    /// A pure scale-and-translate transform.
    pub fn affine_scale(sx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self([[sx, 0.0, tx], [0.0, sy, ty], [0.0, 0.0, 1.0]])
    }

    /// Row-major entries.
    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Project a point: `H·[x, y, 1]ᵗ` divided by its third coordinate.
    ///
    /// A degenerate matrix may yield non-finite coordinates.
    pub fn apply(&self, point: Point) -> Point {
        let m = &self.0;
        let x = m[0][0] * point.x + m[0][1] * point.y + m[0][2];
        let y = m[1][0] * point.x + m[1][1] * point.y + m[1][2];
        let w = m[2][0] * point.x + m[2][1] * point.y + m[2][2];
        Point::new(x / w, y / w)
    }

    /// Project all four corners of a quad.
    pub fn apply_quad(&self, quad: &Quad) -> Quad {
        quad.map(|p| self.apply(p))
    }

    /// Determinant of the matrix.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }

    /// Largest absolute entry.
    pub fn max_abs_entry(&self) -> f64 {
        self.0.iter().flatten().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Reject non-finite or non-invertible matrices.
    ///
    /// `c·H` is the same transform as `H`, so the determinant is judged on
    /// the matrix scaled to a largest entry of 1.
    pub fn validate(&self) -> Result<()> {
        if !self.is_finite() {
            return Err(Error::DegenerateGeometry(
                "homography has non-finite entries".to_string(),
            ));
        }
        let scale = self.max_abs_entry();
        let det = if scale > 0.0 {
            self.determinant() / scale.powi(3)
        } else {
            0.0
        };
        if det.abs() < SINGULAR_EPSILON {
            return Err(Error::DegenerateGeometry(format!(
                "homography is not invertible (scaled determinant {det:e})"
            )));
        }
        Ok(())
    }

    /// Solve for the transform that maps each `source` corner onto the
    /// matching `target` corner.
    ///
    /// The nine entries are the null vector of the 8×9 correspondence
    /// system, so no entry is assumed non-zero. The result is scaled to a
    /// largest entry of 1. Fails with [`Error::DegenerateGeometry`] when
    /// three or more corners of either quad are collinear.
    pub fn from_quads(source: &Quad, target: &Quad) -> Result<Self> {
        let mut system = [[0.0f64; 9]; 8];
        for (i, (s, t)) in source.iter().zip(target.iter()).enumerate() {
            system[2 * i] = [s.x, s.y, 1.0, 0.0, 0.0, 0.0, -t.x * s.x, -t.x * s.y, -t.x];
            system[2 * i + 1] = [0.0, 0.0, 0.0, s.x, s.y, 1.0, -t.y * s.x, -t.y * s.y, -t.y];
        }

        let h = null_vector(system).ok_or_else(|| {
            Error::DegenerateGeometry("page boundary does not span a quadrilateral".to_string())
        })?;

        let scale = h.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        let h = h.map(|v| v / scale);
        let homography = Self([[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], h[8]]]);
        homography.validate()?;
        Ok(homography)
    }
}

impl Default for Homography {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Null vector of a rank-8 system by Gauss-Jordan elimination with full
/// pivoting. The column never chosen as a pivot is the free unknown.
fn null_vector(mut a: [[f64; 9]; 8]) -> Option<[f64; 9]> {
    let mut pivot_cols = [0usize; 8];
    let mut used = [false; 9];

    for row in 0..8 {
        let mut best = (row, 0, 0.0f64);
        for (r, line) in a.iter().enumerate().skip(row) {
            for (c, v) in line.iter().enumerate() {
                if !used[c] && v.abs() > best.2 {
                    best = (r, c, v.abs());
                }
            }
        }
        let (pivot_row, col, magnitude) = best;
        if magnitude.is_nan() || magnitude <= SINGULAR_EPSILON {
            return None;
        }
        a.swap(row, pivot_row);
        used[col] = true;
        pivot_cols[row] = col;

        let pivot = a[row][col];
        for v in a[row].iter_mut() {
            *v /= pivot;
        }
        let reduced = a[row];
        for (r, line) in a.iter_mut().enumerate() {
            let factor = line[col];
            if r == row || factor == 0.0 {
                continue;
            }
            for (v, p) in line.iter_mut().zip(reduced.iter()) {
                *v -= factor * p;
            }
        }
    }

    let free = (0..9).find(|&c| !used[c])?;
    let mut h = [0.0; 9];
    h[free] = 1.0;
    for (row, &col) in pivot_cols.iter().enumerate() {
        h[col] = -a[row][free];
    }

    h.iter().all(|v| v.is_finite()).then_some(h)
}
