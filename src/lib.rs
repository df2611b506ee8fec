//! Split a GeoJSON feature collection into per-layer files
//! (`water`, `green`, `buildings`, `roads`) based on OSM-style property tags.

use std::path::Path;

pub mod classify;
pub mod error;
pub mod feature;
pub mod layer;
pub mod splitter;

pub use classify::classify;
pub use error::{DocumentError, Result, SplitError};
pub use feature::{Feature, FeatureCollection};
pub use layer::Layer;
pub use splitter::{LayerReport, SplitReport};

/// Split `input` into layer files under `output_dir`.
pub fn process_file(input: &Path, output_dir: &Path) -> Result<SplitReport> {
    splitter::split(input, output_dir)
}
