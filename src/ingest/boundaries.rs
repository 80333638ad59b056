//! Page boundary polygons from document-analysis block lists.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Point, Quad};

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BlockList {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Block {
    block_type: String,
    #[serde(default = "first_page")]
    page: u32,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Geometry {
    #[serde(default)]
    polygon: Vec<Point>,
}

fn first_page() -> u32 {
    1
}

/// Collect the `PAGE` block polygons of a block list, keyed by page number.
///
/// Single-page responses omit `Page`; such blocks count as page 1. When a
/// page appears twice the later polygon wins.
pub fn read_boundaries_json(json: &str) -> Result<BTreeMap<u32, Quad>> {
    let list: BlockList = serde_json::from_str(json)?;
    let mut boundaries = BTreeMap::new();

    for block in list.blocks.into_iter().filter(|b| b.block_type == "PAGE") {
        let polygon = block.geometry.map(|g| g.polygon).unwrap_or_default();
        let quad: Quad = polygon.as_slice().try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "page {} polygon has {} points, expected 4",
                block.page,
                polygon.len()
            ))
        })?;
        if boundaries.insert(block.page, quad).is_some() {
            log::warn!("duplicate PAGE block for page {}", block.page);
        }
    }

    Ok(boundaries)
}
