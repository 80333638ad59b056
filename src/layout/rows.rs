//! Row detection and row serialization.
//!
//! Fragments are placed in canonical coordinates, binned into rows by their
//! `top`, ordered by `left` inside each row and joined with a space or a tab
//! depending on the horizontal gap to the next fragment.

use rand::Rng;

use crate::cluster::optimal_cluster_with_max_k;
use crate::model::{CanonicalBox, Fragment};
use crate::transform::Homography;

use super::options::RowAnchor;

/// A fragment together with its canonical box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFragment<'a> {
    /// Source fragment
    pub fragment: &'a Fragment,
    /// Box in canonical coordinates
    pub bbox: CanonicalBox,
}

impl<'a> PlacedFragment<'a> {
    /// Pair a fragment with an already computed box.
    pub fn new(fragment: &'a Fragment, bbox: CanonicalBox) -> Self {
        Self { fragment, bbox }
    }

    /// Project a fragment's corners and derive its box.
    pub fn place(fragment: &'a Fragment, homography: &Homography) -> Self {
        let corners = homography.apply_quad(&fragment.corners);
        Self::new(fragment, CanonicalBox::from_corners(&corners))
    }

    /// Recognized text.
    pub fn text(&self) -> &'a str {
        &self.fragment.text
    }

    /// See [`Fragment::char_count`].
    pub fn char_count(&self) -> usize {
        self.fragment.char_count()
    }
}

/// Ordering key for a coordinate. Non-finite values sort after every finite
/// one, so fragments with broken geometry end up in the last row.
fn sort_coord(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        f64::INFINITY
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Estimate the tolerance used to separate rows.
///
/// Heights are clustered and the most populated cluster (the first one on a
/// tie) is taken as the body text size; the tolerance is its largest member
/// divided by `divisor`. Fragments with a zero or non-finite height do not
/// take part. Returns `0.0` when no fragment qualifies.
pub fn estimate_line_height<R: Rng>(
    placed: &[PlacedFragment<'_>],
    max_clusters: usize,
    divisor: f64,
    rng: &mut R,
) -> f64 {
    let heights: Vec<f64> = placed
        .iter()
        .filter(|f| f.bbox.has_usable_height())
        .map(|f| f.bbox.height)
        .collect();

    if heights.is_empty() {
        return 0.0;
    }

    let clusters = optimal_cluster_with_max_k(&heights, max_clusters, rng);

    let mut dominant: &[f64] = &[];
    for cluster in &clusters {
        if cluster.len() > dominant.len() {
            dominant = cluster.as_slice();
        }
    }

    let tallest = dominant.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    log::debug!(
        "row height: {} heights in {} clusters, dominant size {}, tallest {}",
        heights.len(),
        clusters.len(),
        dominant.len(),
        tallest
    );

    tallest / divisor
}

/// Group fragments into rows, top to bottom.
///
/// Fragments are stably sorted by `top`. A new row starts whenever a
/// fragment's `top` differs from the reference by more than `line_height`.
/// With [`RowAnchor::Previous`] the reference follows every fragment; with
/// [`RowAnchor::RowStart`] it stays at the first fragment of the row.
pub fn bin_rows<'a>(
    mut placed: Vec<PlacedFragment<'a>>,
    line_height: f64,
    anchor: RowAnchor,
) -> Vec<Vec<PlacedFragment<'a>>> {
    placed.sort_by(|a, b| sort_coord(a.bbox.top).total_cmp(&sort_coord(b.bbox.top)));

    let mut rows = Vec::new();
    let mut reference = match placed.first() {
        Some(first) => sort_coord(first.bbox.top),
        None => return rows,
    };
    let mut current: Vec<PlacedFragment<'a>> = Vec::new();

    for fragment in placed {
        let top = sort_coord(fragment.bbox.top);

        // inf - inf is NaN, which keeps broken fragments together.
        if (top - reference).abs() > line_height {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            if anchor == RowAnchor::RowStart {
                reference = top;
            }
        }
        if anchor == RowAnchor::Previous {
            reference = top;
        }

        current.push(fragment);
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

/// Serialize one row.
///
/// Fragments are stably sorted by `left`. Each fragment's text is followed
/// by a tab when the gap to the next fragment exceeds `tab_gap_factor`
/// average character widths, otherwise by a space. The last fragment has a
/// gap of zero and therefore always gets a space. A row without characters
/// renders as an empty string.
pub fn row_text(row: &mut [PlacedFragment<'_>], tab_gap_factor: f64) -> String {
    row.sort_by(|a, b| sort_coord(a.bbox.left).total_cmp(&sort_coord(b.bbox.left)));

    let total_chars: usize = row.iter().map(PlacedFragment::char_count).sum();
    if total_chars == 0 {
        return String::new();
    }
    let total_width: f64 = row.iter().map(|f| finite_or_zero(f.bbox.width)).sum();
    let average_char_width = total_width / total_chars as f64;
    let tab_threshold = average_char_width * tab_gap_factor;

    let mut text = String::new();
    for (i, fragment) in row.iter().enumerate() {
        let gap = match row.get(i + 1) {
            Some(next) => {
                sort_coord(next.bbox.left)
                    - sort_coord(fragment.bbox.left)
                    - finite_or_zero(fragment.bbox.width)
            }
            None => 0.0,
        };

        text.push_str(fragment.text());
        text.push(if gap > tab_threshold { '\t' } else { ' ' });
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNIT_SQUARE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn placed(text: &str, left: f64, top: f64, width: f64, height: f64) -> PlacedFragment<'static> {
        let fragment = Box::leak(Box::new(Fragment::new(text, UNIT_SQUARE, 1)));
        PlacedFragment::new(
            fragment,
            CanonicalBox {
                top,
                left,
                width,
                height,
            },
        )
    }

    fn texts(rows: &[Vec<PlacedFragment<'_>>]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|f| f.text().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_place_uses_homography() {
        let fragment = Fragment::from_rect("abc", 1, 10.0, 20.0, 30.0, 4.0);
        let h = Homography::affine_scale(0.5, 0.5, 0.0, 0.0);
        let p = PlacedFragment::place(&fragment, &h);
        assert_eq!(p.bbox.left, 5.0);
        assert_eq!(p.bbox.top, 10.0);
        assert_eq!(p.bbox.width, 15.0);
        assert_eq!(p.bbox.height, 2.0);
    }

    #[test]
    fn test_char_count_counts_scalar_values() {
        let fragment = Fragment::from_rect("Größe €", 1, 0.0, 0.0, 1.0, 1.0);
        let p = PlacedFragment::place(&fragment, &Homography::IDENTITY);
        assert_eq!(p.char_count(), 7);
        assert_eq!(p.char_count(), fragment.char_count());
        assert_eq!(p.text(), "Größe €");
    }

    #[test]
    fn test_space_and_tab_separators() {
        // width 10 over 10 chars per fragment: average char width 1.
        let mut near = vec![
            placed("aaaaaaaaaa", 0.0, 0.0, 10.0, 1.0),
            placed("bbbbbbbbbb", 11.0, 0.0, 10.0, 1.0),
        ];
        assert_eq!(row_text(&mut near, 2.0), "aaaaaaaaaa bbbbbbbbbb ");

        let mut far = vec![
            placed("aaaaaaaaaa", 0.0, 0.0, 10.0, 1.0),
            placed("bbbbbbbbbb", 13.0, 0.0, 10.0, 1.0),
        ];
        assert_eq!(row_text(&mut far, 2.0), "aaaaaaaaaa\tbbbbbbbbbb ");
    }

    #[test]
    fn test_gap_equal_to_threshold_is_space() {
        let mut row = vec![
            placed("aaaaaaaaaa", 0.0, 0.0, 10.0, 1.0),
            placed("bbbbbbbbbb", 12.0, 0.0, 10.0, 1.0),
        ];
        assert_eq!(row_text(&mut row, 2.0), "aaaaaaaaaa bbbbbbbbbb ");
    }

    #[test]
    fn test_row_sorted_by_left() {
        let mut row = vec![
            placed("right", 50.0, 0.0, 5.0, 1.0),
            placed("left", 0.0, 0.0, 4.0, 1.0),
        ];
        assert_eq!(row_text(&mut row, 2.0), "left\tright ");
    }

    #[test]
    fn test_row_without_characters_is_empty() {
        let mut row = vec![placed("", 0.0, 0.0, 5.0, 1.0)];
        assert_eq!(row_text(&mut row, 2.0), "");
    }

    #[test]
    fn test_bin_rows_splits_on_tolerance() {
        let rows = bin_rows(
            vec![
                placed("c", 0.0, 20.0, 1.0, 3.0),
                placed("a", 0.0, 10.0, 1.0, 3.0),
                placed("b", 5.0, 10.5, 1.0, 3.0),
            ],
            1.0,
            RowAnchor::Previous,
        );
        assert_eq!(texts(&rows), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_running_reference_drifts() {
        let staircase: Vec<_> = (0..5)
            .map(|i| placed("w", i as f64 * 10.0, i as f64 * 0.8, 5.0, 3.0))
            .collect();

        let drifting = bin_rows(staircase.clone(), 1.0, RowAnchor::Previous);
        assert_eq!(drifting.len(), 1);

        let anchored = bin_rows(staircase, 1.0, RowAnchor::RowStart);
        assert_eq!(anchored.len(), 3);
    }

    #[test]
    fn test_non_finite_fragments_form_last_row() {
        let rows = bin_rows(
            vec![
                placed("lost", f64::NAN, f64::NAN, 1.0, 1.0),
                placed("top", 0.0, 0.0, 1.0, 1.0),
                placed("gone", f64::INFINITY, f64::INFINITY, 1.0, 1.0),
            ],
            0.5,
            RowAnchor::Previous,
        );
        assert_eq!(texts(&rows), vec![vec!["top"], vec!["lost", "gone"]]);
    }

    #[test]
    fn test_bin_rows_empty() {
        assert!(bin_rows(Vec::new(), 1.0, RowAnchor::Previous).is_empty());
    }

    #[test]
    fn test_line_height_uses_dominant_cluster() {
        let mut fragments: Vec<_> = (0..8)
            .map(|i| placed("body", 0.0, i as f64 * 10.0, 10.0, 3.0 + (i % 2) as f64 * 0.06))
            .collect();
        fragments.push(placed("HEADER", 0.0, -20.0, 30.0, 12.0));

        let mut rng = StdRng::seed_from_u64(4);
        let line_height = estimate_line_height(&fragments, 20, 3.0, &mut rng);
        assert!((line_height - 3.06 / 3.0).abs() < 1e-9, "{line_height}");
    }

    #[test]
    fn test_line_height_identical_heights() {
        let fragments: Vec<_> = (0..4).map(|i| placed("x", 0.0, i as f64, 1.0, 6.0)).collect();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(estimate_line_height(&fragments, 20, 3.0, &mut rng), 2.0);
    }

    #[test]
    fn test_line_height_ignores_degenerate_heights() {
        let fragments = vec![
            placed("flat", 0.0, 0.0, 1.0, 0.0),
            placed("nan", 0.0, 0.0, 1.0, f64::NAN),
            placed("ok", 0.0, 0.0, 1.0, 9.0),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(estimate_line_height(&fragments, 20, 3.0, &mut rng), 3.0);

        let none = vec![placed("flat", 0.0, 0.0, 1.0, 0.0)];
        assert_eq!(estimate_line_height(&none, 20, 3.0, &mut rng), 0.0);
    }
}
