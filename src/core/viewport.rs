use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center and zoom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Re-centers and re-zooms the viewport so the given bounds are fully
    /// visible. The zoom is derived from the larger angular span of the box.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: Option<f64>) {
        let fitted = match padding {
            Some(fraction) => bounds.pad(fraction),
            None => bounds.clone(),
        };

        let span = fitted.span();
        let extent = span.lat.abs().max(span.lng.abs());

        // A zero-extent box (single point) gets the maximum zoom.
        let zoom = if extent > 0.0 {
            (360.0 / extent).log2()
        } else {
            self.max_zoom
        };

        self.set_center(fitted.center());
        self.set_zoom(zoom);
    }

    /// Computes the viewport this one would become after a command
    pub fn after(&self, command: &ViewportCommand) -> Viewport {
        let mut target = self.clone();
        match command {
            ViewportCommand::FitBounds { bounds, padding } => {
                target.fit_bounds(bounds, Some(*padding));
            }
            ViewportCommand::FlyTo { center, zoom } => {
                target.set_center(*center);
                if let Some(zoom) = zoom {
                    target.set_zoom(*zoom);
                }
            }
        }
        target
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0)
    }
}

/// A declarative viewport reposition request issued by a slide transition
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportCommand {
    /// Fit the combined bounds of a slide's fit-layer list, with padding
    FitBounds {
        bounds: LatLngBounds,
        padding: f64,
    },
    /// Fly to an explicit center; `None` zoom keeps the current zoom
    FlyTo {
        center: LatLng,
        zoom: Option<f64>,
    },
}
