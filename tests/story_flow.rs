//! End-to-end story flow: load the layers, walk the deck, and check that the
//! map's attached-layer set and viewport always follow the active slide.

use async_trait::async_trait;
use storymap::fixtures::{default_viewport, demo_deck, story_registry};
use storymap::{
    load_all, LatLng, Slide, SlideDeck, SlideSource, StoryMap, TransitionState, VisibilityTracker,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct StaticSource(&'static str);

#[async_trait]
impl SlideSource for StaticSource {
    async fn fetch(&self) -> storymap::Result<String> {
        Ok(self.0.to_string())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

struct FailingSource;

#[async_trait]
impl SlideSource for FailingSource {
    async fn fetch(&self) -> storymap::Result<String> {
        Err(storymap::Error::Layer("connection refused".to_string()))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

const AREAS: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {"hvi_score": 3.2},
        "geometry": {"type": "Polygon", "coordinates": [[
            [-75.20, 39.90], [-75.10, 39.90], [-75.10, 40.00],
            [-75.20, 40.00], [-75.20, 39.90]
        ]]}
    }]
}"#;

const POOLS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"NAME": "Cobbs Creek Pool", "ADDRESS": "280 Cobbs Creek Pkwy"},
            "geometry": {"type": "Point", "coordinates": [-75.25, 39.96]}
        },
        {
            "type": "Feature",
            "properties": {"POOL_NAME": "Hunting Park Pool"},
            "geometry": {"type": "Point", "coordinates": [-75.15, 40.02]}
        }
    ]
}"#;

const SITES: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {"SITE_NAME": "Fishtown Rec"},
        "geometry": {"type": "Point", "coordinates": [-75.13, 39.97]}
    }]
}"#;

fn sources() -> Vec<(String, Box<dyn SlideSource>)> {
    vec![
        ("hvi".to_string(), Box::new(StaticSource(AREAS)) as Box<dyn SlideSource>),
        ("hoods".to_string(), Box::new(StaticSource(AREAS))),
        ("pools".to_string(), Box::new(StaticSource(POOLS))),
        ("sites".to_string(), Box::new(StaticSource(SITES))),
    ]
}

async fn loaded_story() -> StoryMap {
    init_logs();
    let mut registry = story_registry();
    load_all(&mut registry, sources()).await.unwrap();
    StoryMap::new(demo_deck(), registry, default_viewport())
}

#[tokio::test]
async fn initial_activation_runs_first_slide() {
    let story = loaded_story().await;

    assert_eq!(story.current_index(), 0);
    assert_eq!(story.viewport().center, LatLng::new(39.9526, -75.1652));
    assert_eq!(story.viewport().zoom, 11.5);
    assert!(story.attached_layers().is_empty());
}

#[tokio::test]
async fn attached_set_is_exactly_the_declared_layer() {
    let mut story = loaded_story().await;

    story.go_to(1);
    assert_eq!(story.attached_layers(), vec!["hvi"]);

    story.go_to(3);
    assert_eq!(story.attached_layers(), vec!["pools"]);

    // Back to a slide with no layer: nothing residual survives.
    story.go_to(0);
    assert!(story.attached_layers().is_empty());
}

#[tokio::test]
async fn go_to_clamps_into_deck() {
    let mut story = loaded_story().await;

    story.go_to(-5);
    assert_eq!(story.current_index(), 0);

    story.go_to(99);
    assert_eq!(story.current_index(), 5);
}

#[tokio::test]
async fn dots_follow_the_active_slide() {
    let mut story = loaded_story().await;
    story.go_to(4);

    let dots = story.dots();
    let active: Vec<usize> = (0..dots.count()).filter(|&i| dots.is_active(i)).collect();
    assert_eq!(active, vec![4]);
}

#[tokio::test]
async fn fit_list_takes_precedence_over_center() {
    init_logs();
    let mut registry = story_registry();
    load_all(&mut registry, sources()).await.unwrap();

    let deck = SlideDeck::new(vec![
        Slide::new(),
        Slide::new().fit(["pools"]).center(0.0, 0.0).zoom(3.0),
    ])
    .unwrap();

    let mut story = StoryMap::new(deck, registry, default_viewport());
    story.go_to(1);

    // The viewport centered on the pools' bounds, not the declared center.
    let center = story.viewport().center;
    assert!((center.lat - 39.99).abs() < 0.01);
    assert!((center.lng + 75.20).abs() < 0.01);
}

#[tokio::test]
async fn explicit_navigation_requests_scroll_visibility_does_not() {
    let mut story = loaded_story().await;
    // Construction activates slide 0 without any scroll request.
    assert_eq!(story.take_scroll_request(), None);

    story.go_to(2);
    assert_eq!(story.take_scroll_request(), Some(2));
    // The request is consumed once taken.
    assert_eq!(story.take_scroll_request(), None);

    let mut tracker = VisibilityTracker::new(story.deck().len());
    if let Some(action) = tracker.report(4, 0.8, story.current_index()) {
        story.dispatch(action);
    }
    assert_eq!(story.current_index(), 4);
    assert_eq!(story.take_scroll_request(), None);
}

#[tokio::test]
async fn visibility_feed_drives_navigation() {
    let mut story = loaded_story().await;
    let mut tracker = VisibilityTracker::new(story.deck().len());

    // Slide 2 scrolls into dominance.
    if let Some(action) = tracker.report(2, 0.8, story.current_index()) {
        story.dispatch(action);
    }
    assert_eq!(story.current_index(), 2);
    assert_eq!(story.attached_layers(), vec!["hoods"]);

    // The same report again does not re-fire.
    assert_eq!(tracker.report(2, 0.9, story.current_index()), None);
}

#[tokio::test]
async fn rapid_navigation_cancels_in_flight_transition() {
    let mut story = loaded_story().await;

    story.go_to(1);
    story.go_to(3);

    // Only the latest transition is active; the prior one was cancelled.
    let manager = story.transitions_mut();
    let current = manager.in_flight().expect("a transition is running");
    assert_eq!(current.state, TransitionState::Running);
}

#[tokio::test]
async fn load_failure_leaves_every_layer_empty() {
    init_logs();
    let mut registry = story_registry();
    let sources: Vec<(String, Box<dyn SlideSource>)> = vec![
        ("hvi".to_string(), Box::new(StaticSource(AREAS))),
        ("hoods".to_string(), Box::new(FailingSource)),
        ("pools".to_string(), Box::new(StaticSource(POOLS))),
        ("sites".to_string(), Box::new(StaticSource(SITES))),
    ];

    let result = load_all(&mut registry, sources).await;
    assert!(result.is_err());
    for name in ["hvi", "hoods", "pools", "sites"] {
        assert!(!registry.get(name).unwrap().is_populated());
    }

    // The story still works against the empty registry: transitions run,
    // fit steps are skipped, nothing panics.
    let mut story = StoryMap::new(demo_deck(), registry, default_viewport());
    story.go_to(3);
    assert_eq!(story.attached_layers(), vec!["pools"]);
    assert_eq!(story.viewport().center, LatLng::new(39.9526, -75.1652));
}

#[tokio::test]
async fn markers_carry_popup_text_with_fallbacks() {
    let story = loaded_story().await;
    let pools = story.registry().get("pools").unwrap();
    let markers = pools.markers();

    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].popup, "Cobbs Creek Pool\n280 Cobbs Creek Pkwy");
    // Second pool has no NAME; the POOL_NAME candidate resolves instead.
    assert_eq!(markers[1].popup, "Hunting Park Pool");
}
