//! Data model for OCR layout reconstruction.
//!
//! Every type here is transient: it is built from provider output, consumed
//! by one page reconstruction and then dropped.

mod fragment;
mod geometry;
mod page;

pub use fragment::Fragment;
pub use geometry::{rect_quad, CanonicalBox, Point, Quad, UNIT_SQUARE};
pub use page::Page;
