use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::classify::classify;
use crate::error::{Result, SplitError};
use crate::feature::{CollectionView, Feature, FeatureCollection};
use crate::layer::Layer;

const PROGRESS_INTERVAL: usize = 1000;

/// Features of one input grouped by layer, plus the number dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    layers: BTreeMap<Layer, Vec<Feature>>,
    pub skipped: usize,
}

impl Partition {
    fn empty() -> Self {
        Partition {
            layers: Layer::ALL.iter().map(|&layer| (layer, Vec::new())).collect(),
            skipped: 0,
        }
    }

    /// Features routed to `layer`, in input order.
    pub fn features(&self, layer: Layer) -> &[Feature] {
        self.layers
            .get(&layer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Layers with their features, in [`Layer::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &[Feature])> {
        self.layers
            .iter()
            .map(|(&layer, features)| (layer, features.as_slice()))
    }

    pub fn total_written(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    fn push(&mut self, layer: Layer, feature: Feature) {
        self.layers.entry(layer).or_default().push(feature);
    }
}

/// Classify every feature of `collection`, keeping input order within each layer.
pub fn partition(collection: FeatureCollection) -> Partition {
    let total = collection.len();
    let mut partition = Partition::empty();

    for (index, feature) in collection.features.into_iter().enumerate() {
        if (index + 1) % PROGRESS_INTERVAL == 0 {
            debug!("Classified {}/{} features", index + 1, total);
        }
        match classify(&feature) {
            Some(layer) => partition.push(layer, feature),
            None => partition.skipped += 1,
        }
    }

    partition
}

/// Outcome for a single layer of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerReport {
    pub layer: Layer,
    pub features: usize,
    /// Size of the written file, `None` when the layer was empty and nothing
    /// was written.
    pub bytes: Option<u64>,
}

/// Counts produced by [`split`]. `Display` renders the console summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub layers: Vec<LayerReport>,
    pub skipped: usize,
}

impl SplitReport {
    pub fn count(&self, layer: Layer) -> usize {
        self.layers
            .iter()
            .find(|report| report.layer == layer)
            .map_or(0, |report| report.features)
    }

    pub fn total_written(&self) -> usize {
        self.layers.iter().map(|report| report.features).sum()
    }

    pub fn total_input(&self) -> usize {
        self.total_written() + self.skipped
    }

    /// Layers that produced a file.
    pub fn written_files(&self) -> Vec<Layer> {
        self.layers
            .iter()
            .filter(|report| report.bytes.is_some())
            .map(|report| report.layer)
            .collect()
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.layers {
            match report.bytes {
                Some(bytes) => writeln!(
                    f,
                    "✓ {}: {} features, {:.1} KB",
                    report.layer.file_name(),
                    report.features,
                    bytes as f64 / 1024.0
                )?,
                None => writeln!(f, "⚠ {}: no features, skipped", report.layer.file_name())?,
            }
        }
        writeln!(f)?;
        writeln!(f, "Split complete")?;
        writeln!(f, "Total written: {} features", self.total_written())?;
        write!(f, "Skipped: {} features", self.skipped)
    }
}

/// Load a feature collection from `path`.
pub fn load_collection(path: &Path) -> Result<FeatureCollection> {
    if !path.is_file() {
        return Err(SplitError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    info!("Loading file: {}", path.display());
    let bytes = fs::read(path).map_err(|source| SplitError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let collection =
        FeatureCollection::from_slice(&bytes).map_err(|source| SplitError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Found {} features in file", collection.len());
    Ok(collection)
}

/// Write `features` as `<layer>.geojson` in `output_dir`, replacing any
/// existing file. Returns the number of bytes written.
fn write_layer(output_dir: &Path, layer: Layer, features: &[Feature]) -> Result<u64> {
    let output_path = layer_path(output_dir, layer);
    let write_error = |source: std::io::Error| SplitError::OutputWrite {
        path: output_path.clone(),
        source,
    };

    let bytes = serde_json::to_vec_pretty(&CollectionView::new(features))
        .map_err(|e| write_error(std::io::Error::from(e)))?;
    fs::write(&output_path, &bytes).map_err(write_error)?;

    debug!("Wrote {} ({} bytes)", output_path.display(), bytes.len());
    Ok(bytes.len() as u64)
}

/// Split the feature collection at `input` into one file per non-empty layer
/// under `output_dir`.
///
/// Nothing is created on disk unless the input exists and parses. Files
/// written before a later write failure are left in place.
pub fn split(input: &Path, output_dir: &Path) -> Result<SplitReport> {
    let collection = load_collection(input)?;

    fs::create_dir_all(output_dir).map_err(|source| SplitError::OutputWrite {
        path: output_dir.to_path_buf(),
        source,
    })?;
    info!("Using output directory: {}", output_dir.display());

    let partition = partition(collection);
    info!(
        "Classified {} features, skipped {}",
        partition.total_written(),
        partition.skipped
    );

    let mut layers = Vec::with_capacity(Layer::ALL.len());
    for (layer, features) in partition.iter() {
        let bytes = if features.is_empty() {
            debug!("Layer {} is empty, not writing", layer);
            None
        } else {
            let written = write_layer(output_dir, layer, features)?;
            info!("Written layer {} with {} features", layer, features.len());
            Some(written)
        };
        layers.push(LayerReport {
            layer,
            features: features.len(),
            bytes,
        });
    }

    Ok(SplitReport {
        layers,
        skipped: partition.skipped,
    })
}

/// Output path for `layer` under `output_dir`.
pub fn layer_path(output_dir: &Path, layer: Layer) -> PathBuf {
    output_dir.join(layer.file_name())
}
