use crate::core::geo::LatLng;

/// Declarative map configuration for one narrative slide.
///
/// Every field is optional: a slide with no layer and no viewport request
/// leaves the map exactly as the previous slide configured it (apart from
/// detaching that slide's layer). When both a fit list and a center are
/// declared, the fit list wins and the center is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    /// Layer to attach while this slide is active
    pub layer: Option<String>,
    /// Layers whose combined bounds the viewport should fit
    pub fit: Vec<String>,
    /// Explicit viewport center, used only when `fit` is empty
    pub center: Option<LatLng>,
    /// Zoom for the center move; `None` keeps the current zoom
    pub zoom: Option<f64>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layer attached while the slide is active
    pub fn layer(mut self, name: impl Into<String>) -> Self {
        self.layer = Some(name.into());
        self
    }

    /// Sets the layers whose combined bounds the viewport fits
    pub fn fit<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fit = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets an explicit viewport center
    pub fn center(mut self, lat: f64, lng: f64) -> Self {
        self.center = Some(LatLng::new(lat, lng));
        self
    }

    /// Sets the zoom used with an explicit center
    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

/// The ordered, non-empty slide list of a story
#[derive(Debug, Clone)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    /// Builds a deck; a deck must carry at least one slide
    pub fn new(slides: Vec<Slide>) -> crate::Result<Self> {
        if slides.is_empty() {
            return Err(crate::Error::Layer(
                "a slide deck needs at least one slide".to_string(),
            ));
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false: `new` rejects an empty slide list, so a constructed
    /// deck carries at least one slide.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}
