//! # Storymap
//!
//! A scroll-driven "story map" engine: a deck of narrative slides kept in
//! sync with a map whose GeoJSON layers are attached and detached and whose
//! viewport is re-fit or flown as the active slide changes.
//!
//! The engine is headless. Slide configuration is supplied as typed records,
//! scroll detection is an abstract per-slide visibility feed, and slide
//! transitions are pure `(state, action) -> state` functions, so every piece
//! can be driven and asserted on without a rendering surface.

pub mod core;
pub mod data;
pub mod layers;
pub mod loader;
pub mod props;
pub mod story;
pub mod ui;

#[doc(hidden)]
pub mod fixtures;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, LatLngBounds},
    transition::{Transition, TransitionManager, TransitionState},
    viewport::{Viewport, ViewportCommand},
};

pub use data::geojson::{Feature, GeoJson, Geometry};

pub use layers::{
    registry::{LayerKind, LayerRegistry, StoryLayer},
    style::{score_style, Marker, MarkerConfig, MarkerStyle, PathStyle},
};

pub use loader::{load_all, FileSource, HttpSource, SlideSource};

pub use story::{
    controller::{Activation, NavAction, NavState, StoryMap},
    slide::{Slide, SlideDeck},
    visibility::VisibilityTracker,
};

pub use ui::chrome::{AttributionDialog, DotIndicator, Key, Keymap};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, StoryMapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum StoryMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = StoryMapError;
