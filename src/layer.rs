use std::fmt;

/// Output layer a feature can be routed to.
///
/// Declaration order is the order layers are initialised, written and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Water,
    Green,
    Buildings,
    Roads,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Water, Layer::Green, Layer::Buildings, Layer::Roads];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Water => "water",
            Layer::Green => "green",
            Layer::Buildings => "buildings",
            Layer::Roads => "roads",
        }
    }

    /// Name of the file this layer is written to, e.g. `water.geojson`.
    pub fn file_name(self) -> String {
        format!("{}.geojson", self.name())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
