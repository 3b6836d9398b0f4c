//! Render styles for story layers.
//!
//! Area layers are styled per feature by bucketing a numeric score into one
//! of four fill tiers. Point layers use a fixed circle-marker style with a
//! popup built from name/address attribute candidates.

use crate::core::geo::LatLng;
use crate::data::geojson::Feature;
use crate::props::{first_str, Properties};
use serde::{Deserialize, Serialize};

/// Score thresholds (inclusive) separating the four fill tiers
pub const SCORE_TIERS: [f64; 3] = [2.0, 3.0, 4.0];

/// Fill colors per tier, lowest tier first
pub const TIER_FILLS: [&str; 4] = ["#14508f", "#123e7b", "#103468", "#0e2c5b"];

/// Stroke and fill style for area geometries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub stroke: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill: Option<String>,
    pub fill_opacity: f64,
}

impl PathStyle {
    /// A hollow outline style (no fill), as used for boundary layers
    pub fn outline(stroke: &str, weight: f64, opacity: f64) -> Self {
        Self {
            stroke: stroke.to_string(),
            weight,
            opacity,
            fill: None,
            fill_opacity: 0.0,
        }
    }
}

/// Buckets a score into a tier index in `0..4`, inclusive at each threshold
pub fn score_tier(score: f64) -> usize {
    SCORE_TIERS.iter().filter(|&&t| score >= t).count()
}

/// The graded fill style for a scored area feature
pub fn score_style(score: f64) -> PathStyle {
    PathStyle {
        stroke: "#bfe8ff".to_string(),
        weight: 0.45,
        opacity: 1.0,
        fill: Some(TIER_FILLS[score_tier(score)].to_string()),
        fill_opacity: 0.55,
    }
}

/// Fixed circle-marker style for point geometries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub stroke: String,
    pub weight: f64,
    pub fill: String,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    pub fn circle(fill: &str) -> Self {
        Self {
            radius: 6.0,
            stroke: "#fff".to_string(),
            weight: 1.0,
            fill: fill.to_string(),
            fill_opacity: 0.95,
        }
    }
}

/// Declarative marker rule for a point layer: style plus the attribute
/// candidates the popup text is resolved from
#[derive(Debug, Clone)]
pub struct MarkerConfig {
    pub style: MarkerStyle,
    pub name_keys: Vec<&'static str>,
    pub address_keys: Vec<&'static str>,
    /// Popup title when none of the name candidates resolve
    pub fallback_caption: &'static str,
}

impl MarkerConfig {
    pub fn new(
        style: MarkerStyle,
        name_keys: Vec<&'static str>,
        address_keys: Vec<&'static str>,
        fallback_caption: &'static str,
    ) -> Self {
        Self {
            style,
            name_keys,
            address_keys,
            fallback_caption,
        }
    }

    /// Popup text for a feature: resolved name (or the fallback caption),
    /// followed by the resolved address when present
    pub fn popup_text(&self, props: &Properties) -> String {
        let name = first_str(props, &self.name_keys).unwrap_or(self.fallback_caption);
        match first_str(props, &self.address_keys) {
            Some(address) => format!("{}\n{}", name, address),
            None => name.to_string(),
        }
    }

    /// Builds a marker for a point feature; non-point geometries yield `None`
    pub fn marker_for(&self, feature: &Feature) -> Option<Marker> {
        let position = feature.geometry.as_ref()?.point()?;
        let props = feature.props();
        Some(Marker {
            position,
            style: self.style.clone(),
            popup: self.popup_text(&props),
        })
    }
}

/// A placed marker with its popup content
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: String,
}
