//! Raw feature collection model.
//!
//! Features are kept as the JSON objects they were parsed from so that they can
//! be written back unchanged. Only the few fields the classifier reads get
//! typed accessors.

use geojson::{JsonObject, JsonValue};
use serde::Serialize;

use crate::error::DocumentError;

/// A single feature, exactly as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Feature(JsonObject);

impl Feature {
    pub fn new(object: JsonObject) -> Self {
        Feature(object)
    }

    /// `geometry.type`, if the feature has an object geometry with a string type.
    pub fn geometry_type(&self) -> Option<&str> {
        self.0
            .get("geometry")
            .and_then(JsonValue::as_object)
            .and_then(|geometry| geometry.get("type"))
            .and_then(JsonValue::as_str)
    }

    /// Property value for `key`. A missing or non-object `properties` member
    /// makes every property absent.
    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.0
            .get("properties")
            .and_then(JsonValue::as_object)
            .and_then(|properties| properties.get(key))
    }

    /// True when property `key` is the string `expected`.
    pub fn property_equals(&self, key: &str, expected: &str) -> bool {
        self.property(key).and_then(JsonValue::as_str) == Some(expected)
    }

    /// True when property `key` is present with a truthy value.
    pub fn property_is_truthy(&self, key: &str) -> bool {
        self.property(key).is_some_and(is_truthy)
    }

    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }
}

/// Truthiness of a property value: `null`, `false`, zero, and empty strings,
/// arrays or objects are falsy.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => match n.as_f64() {
            Some(x) => x != 0.0,
            // Outside f64 range, e.g. 1e400
            None => has_nonzero_mantissa(&n.to_string()),
        },
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(members) => !members.is_empty(),
    }
}

fn has_nonzero_mantissa(number: &str) -> bool {
    number
        .split(|c: char| c == 'e' || c == 'E')
        .next()
        .unwrap_or_default()
        .chars()
        .any(|c| c.is_ascii_digit() && c != '0')
}

const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Ordered features of a document. Serializes as
/// `{"type": "FeatureCollection", "features": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection {
            kind: FEATURE_COLLECTION,
            features,
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        let value: JsonValue = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Build a collection from a parsed document. A missing or `null`
    /// `features` member yields an empty collection.
    pub fn from_value(value: JsonValue) -> Result<Self, DocumentError> {
        let JsonValue::Object(mut document) = value else {
            return Err(DocumentError::NotAnObject);
        };

        let items = match document.remove("features") {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(items)) => items,
            Some(_) => return Err(DocumentError::FeaturesNotArray),
        };

        let features = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                JsonValue::Object(object) => Ok(Feature::new(object)),
                _ => Err(DocumentError::FeatureNotObject { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection::new(features))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Borrowed feature collection, serialized the same way as
/// [`FeatureCollection`] without copying the features.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionView<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: &'a [Feature],
}

impl<'a> CollectionView<'a> {
    pub fn new(features: &'a [Feature]) -> Self {
        CollectionView {
            kind: FEATURE_COLLECTION,
            features,
        }
    }
}
