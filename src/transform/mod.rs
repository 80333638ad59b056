//! Page coordinate normalization.
//!
//! A page photographed at an angle or rotated on the scanner bed arrives as
//! an arbitrary quadrilateral. A [`Homography`] maps points on that page into
//! an axis-aligned canonical frame; a [`TransformProvider`] supplies one per
//! page boundary.

mod homography;
mod provider;

pub use homography::Homography;
pub use provider::{from_fn, FixedProvider, FnProvider, RectifyingProvider, TransformProvider};
