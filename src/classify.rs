//! Tag based layer classification.
//!
//! [`RULES`] is evaluated top to bottom and the first matching row decides the
//! outcome. A row may decide "no layer", which is how point features are
//! excluded before any tag is looked at.

use crate::feature::Feature;
use crate::layer::Layer;

/// One row of the classification table.
pub struct Rule {
    pub name: &'static str,
    /// Layer assigned on match. `None` drops the feature.
    pub outcome: Option<Layer>,
    pub matches: fn(&Feature) -> bool,
}

impl Rule {
    pub fn applies_to(&self, feature: &Feature) -> bool {
        (self.matches)(feature)
    }
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "point",
        outcome: None,
        matches: is_point,
    },
    Rule {
        name: "water",
        outcome: Some(Layer::Water),
        matches: is_water,
    },
    Rule {
        name: "green",
        outcome: Some(Layer::Green),
        matches: is_green,
    },
    Rule {
        name: "buildings",
        outcome: Some(Layer::Buildings),
        matches: is_building,
    },
    Rule {
        name: "roads",
        outcome: Some(Layer::Roads),
        matches: is_road,
    },
];

/// Layer for `feature`, or `None` when it should be skipped.
pub fn classify(feature: &Feature) -> Option<Layer> {
    matching_rule(feature).and_then(|rule| rule.outcome)
}

/// First rule in [`RULES`] that applies to `feature`.
pub fn matching_rule(feature: &Feature) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.applies_to(feature))
}

fn is_point(feature: &Feature) -> bool {
    feature.geometry_type() == Some("Point")
}

fn is_water(feature: &Feature) -> bool {
    feature.property_equals("natural", "water") || feature.property_is_truthy("water")
}

fn is_green(feature: &Feature) -> bool {
    feature.property_equals("natural", "wood")
        || feature.property_equals("landuse", "cemetery")
        || feature.property_equals("natural", "wetland")
}

fn is_building(feature: &Feature) -> bool {
    feature.property_is_truthy("building")
}

fn is_road(feature: &Feature) -> bool {
    feature.property_is_truthy("highway")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureCollection;
    use geojson::JsonValue;
    use rstest::rstest;
    use serde_json::json;

    fn feature(geometry: &str, properties: JsonValue) -> Feature {
        let value = json!({
            "type": "Feature",
            "geometry": {"type": geometry, "coordinates": []},
            "properties": properties,
        });
        match value {
            JsonValue::Object(object) => Feature::new(object),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["point", "water", "green", "buildings", "roads"]);
    }

    #[rstest]
    #[case(json!({"natural": "water"}), Some(Layer::Water))]
    #[case(json!({"water": "lake"}), Some(Layer::Water))]
    #[case(json!({"water": true}), Some(Layer::Water))]
    #[case(json!({"natural": "wood"}), Some(Layer::Green))]
    #[case(json!({"landuse": "cemetery"}), Some(Layer::Green))]
    #[case(json!({"natural": "wetland"}), Some(Layer::Green))]
    #[case(json!({"building": "yes"}), Some(Layer::Buildings))]
    #[case(json!({"building": 1}), Some(Layer::Buildings))]
    #[case(json!({"highway": "primary"}), Some(Layer::Roads))]
    #[case(json!({"amenity": "school"}), None)]
    #[case(json!({}), None)]
    #[case(json!(null), None)]
    fn test_classify_polygon(#[case] properties: JsonValue, #[case] expected: Option<Layer>) {
        assert_eq!(classify(&feature("Polygon", properties)), expected);
    }

    #[rstest]
    #[case(json!({"water": false}))]
    #[case(json!({"water": ""}))]
    #[case(json!({"water": null}))]
    #[case(json!({"water": 0}))]
    #[case(json!({"building": false}))]
    #[case(json!({"building": ""}))]
    #[case(json!({"highway": 0}))]
    #[case(json!({"highway": null}))]
    fn test_falsy_tags_do_not_classify(#[case] properties: JsonValue) {
        assert_eq!(classify(&feature("LineString", properties)), None);
    }

    #[rstest]
    #[case(json!({"highway": "crossing"}))]
    #[case(json!({"natural": "water", "building": "yes"}))]
    #[case(json!({"natural": "wood"}))]
    #[case(json!({"building": "yes", "highway": "service"}))]
    fn test_points_are_never_classified(#[case] properties: JsonValue) {
        let f = feature("Point", properties);
        assert_eq!(classify(&f), None);
        assert_eq!(matching_rule(&f).map(|r| r.name), Some("point"));
    }

    #[rstest]
    #[case("building", Some(Layer::Buildings))]
    #[case("water", Some(Layer::Water))]
    #[case("highway", Some(Layer::Roads))]
    fn test_huge_number_tag_is_truthy(#[case] key: &str, #[case] expected: Option<Layer>) {
        let document = format!(
            r#"{{"features":[{{"geometry":{{"type":"Polygon"}},"properties":{{"{key}":1e400}}}}]}}"#
        );
        let collection = FeatureCollection::from_slice(document.as_bytes()).unwrap();
        assert_eq!(classify(&collection.features[0]), expected);
    }

    #[test]
    fn test_water_beats_building() {
        let f = feature("Polygon", json!({"natural": "water", "building": "yes"}));
        assert_eq!(classify(&f), Some(Layer::Water));
    }

    #[test]
    fn test_green_beats_building_and_road() {
        let f = feature(
            "Polygon",
            json!({"landuse": "cemetery", "building": "chapel", "highway": "path"}),
        );
        assert_eq!(classify(&f), Some(Layer::Green));
    }

    #[test]
    fn test_building_beats_road() {
        let f = feature("Polygon", json!({"building": "yes", "highway": "service"}));
        assert_eq!(classify(&f), Some(Layer::Buildings));
    }

    #[test]
    fn test_multi_point_is_not_excluded() {
        let f = feature("MultiPoint", json!({"highway": "crossing"}));
        assert_eq!(classify(&f), Some(Layer::Roads));
    }

    #[test]
    fn test_unknown_geometry_type_still_classified() {
        let f = feature("Blob", json!({"building": "yes"}));
        assert_eq!(classify(&f), Some(Layer::Buildings));
    }

    #[test]
    fn test_missing_geometry_still_classified() {
        let value = json!({"properties": {"natural": "wetland"}});
        let JsonValue::Object(object) = value else {
            unreachable!()
        };
        assert_eq!(classify(&Feature::new(object)), Some(Layer::Green));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let f = feature("Polygon", json!({"water": "river", "highway": "primary"}));
        let before = f.clone();
        assert_eq!(classify(&f), classify(&f));
        assert_eq!(f, before);
    }
}
