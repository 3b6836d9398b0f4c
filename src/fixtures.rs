//! Ready-made configuration of the heat-vulnerability story: the four-layer
//! registry, its default view, and a demo slide deck. Used by the
//! integration tests and by demos.

use crate::core::geo::LatLng;
use crate::core::viewport::Viewport;
use crate::layers::registry::{LayerKind, LayerRegistry};
use crate::layers::style::{score_style, MarkerConfig, MarkerStyle, PathStyle};
use crate::props::number_or;
use crate::story::slide::{Slide, SlideDeck};

/// Default map view: Philadelphia at zoom 11.5
pub fn default_viewport() -> Viewport {
    Viewport::new(LatLng::new(39.9526, -75.1652), 11.5)
}

/// The story's layer registry: a scored heat-vulnerability area layer,
/// neighborhood outlines, and two point layers with popups.
pub fn story_registry() -> LayerRegistry {
    LayerRegistry::new()
        .register(
            "hvi",
            LayerKind::area(|feature| {
                let score = number_or(
                    &feature.props(),
                    &["hvi_score", "HVI_SCORE", "HVI", "hvi", "score", "SCORE"],
                    0.0,
                );
                score_style(score)
            }),
        )
        .register(
            "hoods",
            LayerKind::area(|_| PathStyle::outline("#ffffff", 0.6, 0.7)),
        )
        .register(
            "pools",
            LayerKind::points(MarkerConfig::new(
                MarkerStyle::circle("#7cc6ff"),
                vec!["NAME", "POOL_NAME", "SITE_NAME", "name"],
                vec!["ADDRESS", "ADDRESS1", "address"],
                "Pool",
            )),
        )
        .register(
            "sites",
            LayerKind::points(MarkerConfig::new(
                MarkerStyle::circle("#2dd4bf"),
                vec!["SITE_NAME", "NAME", "name"],
                vec!["ADDRESS", "ADDRESS1", "address"],
                "PPR Site",
            )),
        )
}

/// A six-slide demo deck exercising every per-slide parameter shape
pub fn demo_deck() -> SlideDeck {
    SlideDeck::new(vec![
        Slide::new().center(39.9526, -75.1652).zoom(11.5),
        Slide::new().layer("hvi").fit(["hvi"]),
        Slide::new().layer("hoods").fit(["hoods"]),
        Slide::new().layer("pools").fit(["pools"]),
        Slide::new().layer("sites").fit(["pools", "sites"]),
        Slide::new().center(39.9526, -75.1652).zoom(12.0),
    ])
    .expect("demo deck is non-empty")
}
