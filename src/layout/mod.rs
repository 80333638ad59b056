//! Layout reconstruction: from unordered OCR fragments to plain text.
//!
//! For each page the fragments are rectified with the page homography, the
//! dominant text height is found by clustering fragment heights, fragments
//! are binned into rows using a third of that height as tolerance, and every
//! row is serialized left to right with spaces or tabs between fragments.

mod document;
mod options;
mod reconstruct;
mod rows;

pub use document::{assemble_document, failed_page_marker, page_header};
pub use options::{ErrorMode, LayoutOptions, PageSelection, RowAnchor};
pub use reconstruct::{layout_fragments, LayoutReconstructor};
pub use rows::{bin_rows, estimate_line_height, row_text, PlacedFragment};
