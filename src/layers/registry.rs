use crate::core::geo::LatLngBounds;
use crate::data::geojson::{Feature, GeoJson};
use crate::layers::style::{Marker, MarkerConfig, PathStyle};
use crate::Result;
use std::collections::HashMap;

/// How a layer's features are rendered
pub enum LayerKind {
    /// Area geometries styled per feature
    Area {
        style: Box<dyn Fn(&Feature) -> PathStyle + Send + Sync>,
    },
    /// Point geometries rendered as fixed-style markers with popups
    Points { markers: MarkerConfig },
}

impl LayerKind {
    pub fn area<F>(style: F) -> Self
    where
        F: Fn(&Feature) -> PathStyle + Send + Sync + 'static,
    {
        Self::Area {
            style: Box::new(style),
        }
    }

    pub fn points(markers: MarkerConfig) -> Self {
        Self::Points { markers }
    }
}

/// A named geometry collection with its render rule. Created empty and
/// populated exactly once when its source document arrives; immutable after
/// that. Attachment to the visible map is tracked by the story map, never
/// here.
pub struct StoryLayer {
    name: String,
    kind: LayerKind,
    data: Option<GeoJson>,
}

impl StoryLayer {
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            data: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_populated(&self) -> bool {
        self.data.is_some()
    }

    /// Whether the layer holds any features
    pub fn is_empty(&self) -> bool {
        self.data
            .as_ref()
            .map(|d| d.features().is_empty())
            .unwrap_or(true)
    }

    /// Installs the layer's geometry document. One-shot: repopulating an
    /// already-populated layer is a layer error.
    pub fn populate(&mut self, data: GeoJson) -> Result<()> {
        if self.data.is_some() {
            return Err(crate::Error::Layer(format!(
                "layer '{}' is already populated",
                self.name
            )));
        }
        self.data = Some(data);
        Ok(())
    }

    /// Bounding box of the layer's features, `None` until populated
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.data.as_ref().and_then(GeoJson::bounds)
    }

    pub fn features(&self) -> Vec<&Feature> {
        self.data.as_ref().map(GeoJson::features).unwrap_or_default()
    }

    /// Per-feature style for area layers; `None` for point layers
    pub fn style_for(&self, feature: &Feature) -> Option<PathStyle> {
        match &self.kind {
            LayerKind::Area { style } => Some(style(feature)),
            LayerKind::Points { .. } => None,
        }
    }

    /// Markers for point layers; empty for area layers
    pub fn markers(&self) -> Vec<Marker> {
        match &self.kind {
            LayerKind::Points { markers } => self
                .features()
                .iter()
                .filter_map(|f| markers.marker_for(f))
                .collect(),
            LayerKind::Area { .. } => Vec::new(),
        }
    }
}

/// Fixed mapping from layer name to story layer. Entries are declared at
/// startup and never removed; only their map attachment changes per slide.
#[derive(Default)]
pub struct LayerRegistry {
    layers: HashMap<String, StoryLayer>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self {
            layers: HashMap::new(),
        }
    }

    /// Declares a layer. Chainable for startup configuration.
    pub fn register(mut self, name: impl Into<String>, kind: LayerKind) -> Self {
        let name = name.into();
        self.layers.insert(name.clone(), StoryLayer::new(name, kind));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StoryLayer> {
        self.layers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StoryLayer> {
        self.layers.get_mut(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Combined bounds of the named layers that exist and are non-empty.
    /// Unknown names are skipped silently; `None` when nothing contributes.
    pub fn bounds_of(&self, names: &[String]) -> Option<LatLngBounds> {
        names
            .iter()
            .filter_map(|name| self.layers.get(name))
            .filter_map(|layer| layer.bounds())
            .reduce(|acc, b| acc.union(&b))
    }
}
