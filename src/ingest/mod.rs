//! Loading OCR output into [`Page`](crate::model::Page)s.
//!
//! Two input shapes are supported:
//!
//! - JSON page files: an array of pages in the crate's own model, read with
//!   [`read_pages_file`] and friends.
//! - Line-level "read" responses from an OCR provider ([`ReadResult`]),
//!   normalized to the unit frame and joined with page boundary polygons
//!   from [`read_boundaries_json`].

mod boundaries;
mod pages;
mod read_result;

pub use boundaries::read_boundaries_json;
pub use pages::{read_pages_file, read_pages_json, read_pages_reader};
pub use read_result::{ReadLine, ReadPage, ReadResult};
