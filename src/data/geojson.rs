use crate::core::geo::{LatLng, LatLngBounds};
use crate::props::Properties;
use serde::{Deserialize, Serialize};

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

/// GeoJSON feature with geometry and an attribute record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    /// The feature's attribute record, empty when absent
    pub fn props(&self) -> Properties {
        self.properties.clone().unwrap_or_default()
    }

    /// Bounding box of the feature's geometry, if it has one
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.geometry.as_ref().and_then(Geometry::bounds)
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection { features: Vec<Feature> },
    Geometry(Geometry),
}

impl GeoJson {
    /// Parses a GeoJSON document from raw text
    pub fn from_str(text: &str) -> crate::Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))
    }

    /// All features in the document, in declaration order
    pub fn features(&self) -> Vec<&Feature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
            GeoJson::Geometry(_) => Vec::new(),
        }
    }

    /// Bounding box of every feature's geometry combined
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let mut bounds: Option<LatLngBounds> = None;

        for feature in self.features() {
            if let Some(feature_bounds) = feature.bounds() {
                bounds = Some(match bounds {
                    Some(b) => b.union(&feature_bounds),
                    None => feature_bounds,
                });
            }
        }

        bounds
    }
}

impl Geometry {
    /// Bounding box of this geometry
    pub fn bounds(&self) -> Option<LatLngBounds> {
        match self {
            Geometry::Point { coordinates } => {
                let point = LatLng::new(coordinates[1], coordinates[0]);
                Some(LatLngBounds::new(point, point))
            }
            Geometry::LineString { coordinates } => coords_bounds(coordinates),
            Geometry::Polygon { coordinates } => {
                coordinates.first().and_then(|exterior| coords_bounds(exterior))
            }
            Geometry::MultiPoint { coordinates } => coords_bounds(coordinates),
            Geometry::MultiLineString { coordinates } => {
                fold_bounds(coordinates.iter().filter_map(|line| coords_bounds(line)))
            }
            Geometry::MultiPolygon { coordinates } => fold_bounds(
                coordinates
                    .iter()
                    .filter_map(|polygon| polygon.first())
                    .filter_map(|exterior| coords_bounds(exterior)),
            ),
            Geometry::GeometryCollection { geometries } => {
                fold_bounds(geometries.iter().filter_map(Geometry::bounds))
            }
        }
    }

    /// The geometry's anchor point for marker placement: the coordinate of a
    /// Point, or the first coordinate of a MultiPoint
    pub fn point(&self) -> Option<LatLng> {
        match self {
            Geometry::Point { coordinates } => Some(LatLng::new(coordinates[1], coordinates[0])),
            Geometry::MultiPoint { coordinates } => coordinates
                .first()
                .map(|c| LatLng::new(c[1], c[0])),
            _ => None,
        }
    }
}

fn coords_bounds(coordinates: &[[f64; 2]]) -> Option<LatLngBounds> {
    let first = coordinates.first()?;
    let start = LatLng::new(first[1], first[0]);
    let mut bounds = LatLngBounds::new(start, start);

    for coord in coordinates.iter().skip(1) {
        bounds.extend(&LatLng::new(coord[1], coord[0]));
    }

    Some(bounds)
}

fn fold_bounds(parts: impl Iterator<Item = LatLngBounds>) -> Option<LatLngBounds> {
    parts.reduce(|acc, b| acc.union(&b))
}
