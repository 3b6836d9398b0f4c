//! The slide controller: navigation state, pure transitions, and the map
//! activation sequence that keeps layers and viewport in sync with the
//! active slide.

use crate::core::geo::LatLng;
use crate::core::transition::TransitionManager;
use crate::core::viewport::{Viewport, ViewportCommand};
use crate::layers::registry::LayerRegistry;
use crate::story::slide::{Slide, SlideDeck};
use crate::ui::chrome::DotIndicator;
use log::debug;
use std::collections::BTreeSet;

/// Padding fraction applied around fitted bounds
pub const FIT_PADDING: f64 = 0.15;

/// Navigation state: the current slide index, always within `[0, len - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    index: usize,
    len: usize,
}

impl NavState {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: the state is built over a non-empty deck (`new` floors
    /// the length at one), so there is always a current slide.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pure transition function: applies an action and returns the next
    /// state. Out-of-range targets clamp; visibility reports for the
    /// current slide are identity.
    pub fn apply(self, action: NavAction) -> NavState {
        let index = match action {
            NavAction::GoTo(target) => target.clamp(0, self.len as i64 - 1) as usize,
            NavAction::Next => (self.index + 1).min(self.len - 1),
            NavAction::Prev => self.index.saturating_sub(1),
            NavAction::SlideVisible(i) if i < self.len => i,
            NavAction::SlideVisible(_) => self.index,
        };

        NavState { index, ..self }
    }
}

/// A navigation request against the slide deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Jump to a slide; out-of-range targets are clamped into the deck
    GoTo(i64),
    Next,
    Prev,
    /// A slide became the dominantly visible one (scroll-driven)
    SlideVisible(usize),
}

/// The layer/viewport plan computed for a slide transition
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    /// Layer to attach after detaching everything; `None` when the slide
    /// declares no layer or an unregistered one
    pub attach: Option<String>,
    /// Viewport move to issue, if any
    pub viewport: Option<ViewportCommand>,
}

impl Activation {
    /// Plans the activation for a slide against the registry.
    ///
    /// The fit list takes precedence over an explicit center whenever it is
    /// declared non-empty, even if none of the named layers currently
    /// contribute bounds. Every lookup degrades silently: unknown layer
    /// names and malformed centers simply skip their step.
    pub fn plan(slide: &Slide, registry: &LayerRegistry) -> Self {
        let attach = slide
            .layer
            .clone()
            .filter(|name| registry.contains(name));

        let viewport = if !slide.fit.is_empty() {
            registry
                .bounds_of(&slide.fit)
                .map(|bounds| ViewportCommand::FitBounds {
                    bounds,
                    padding: FIT_PADDING,
                })
        } else {
            slide
                .center
                .filter(LatLng::is_valid)
                .map(|center| ViewportCommand::FlyTo {
                    center,
                    zoom: slide.zoom.filter(|z| z.is_finite()),
                })
        };

        Self { attach, viewport }
    }
}

/// Owns the story's navigation state, layer registry, and viewport, and runs
/// the activation sequence on every slide transition.
///
/// Invariants: exactly one slide is active at a time, and the set of layers
/// attached to the map is fully determined by the active slide; a transition
/// never leaves a residual layer behind.
pub struct StoryMap {
    deck: SlideDeck,
    registry: LayerRegistry,
    nav: NavState,
    viewport: Viewport,
    attached: BTreeSet<String>,
    transitions: TransitionManager,
    dots: DotIndicator,
    scroll_request: Option<usize>,
}

impl StoryMap {
    /// Builds the story map and immediately activates the first slide's
    /// layer and viewport configuration.
    pub fn new(deck: SlideDeck, registry: LayerRegistry, viewport: Viewport) -> Self {
        let nav = NavState::new(deck.len());
        let dots = DotIndicator::new(deck.len());

        let mut map = Self {
            deck,
            registry,
            nav,
            viewport,
            attached: BTreeSet::new(),
            transitions: TransitionManager::new(),
            dots,
            scroll_request: None,
        };
        map.activate();
        map
    }

    pub fn current_index(&self) -> usize {
        self.nav.index()
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn active_slide(&self) -> &Slide {
        // nav index is always in range by construction
        self.deck
            .get(self.nav.index())
            .unwrap_or_else(|| &self.deck.slides()[0])
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LayerRegistry {
        &mut self.registry
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Layers currently attached to the map, in name order
    pub fn attached_layers(&self) -> Vec<&str> {
        self.attached.iter().map(String::as_str).collect()
    }

    pub fn is_attached(&self, name: &str) -> bool {
        self.attached.contains(name)
    }

    pub fn dots(&self) -> &DotIndicator {
        &self.dots
    }

    /// In-flight viewport animation state, for renderers that interpolate
    pub fn transitions_mut(&mut self) -> &mut TransitionManager {
        &mut self.transitions
    }

    /// The slide the host should scroll into view, if an explicit
    /// navigation just happened. Visibility-driven transitions never
    /// request a scroll; the viewer already scrolled there.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_request.take()
    }

    /// Applies a navigation action. Explicit navigation always re-runs the
    /// activation sequence and requests a scroll to the slide; a visibility
    /// report only activates when it actually changes the active slide.
    pub fn dispatch(&mut self, action: NavAction) {
        let next = self.nav.apply(action);
        let changed = next.index() != self.nav.index();
        self.nav = next;

        let explicit = !matches!(action, NavAction::SlideVisible(_));
        if explicit {
            self.scroll_request = Some(self.nav.index());
        }
        if explicit || changed {
            self.activate();
        }
    }

    /// Navigates directly to a slide, clamped into the deck
    pub fn go_to(&mut self, index: i64) {
        self.dispatch(NavAction::GoTo(index));
    }

    pub fn next(&mut self) {
        self.dispatch(NavAction::Next);
    }

    pub fn prev(&mut self) {
        self.dispatch(NavAction::Prev);
    }

    /// Runs the activation sequence for the active slide: detach every
    /// layer, attach the slide's declared layer, issue its viewport move,
    /// and refresh the pagination indicator.
    fn activate(&mut self) {
        let plan = Activation::plan(self.active_slide(), &self.registry);
        debug!(
            "activating slide {}: attach={:?} viewport={:?}",
            self.nav.index(),
            plan.attach,
            plan.viewport
        );

        // Detaching is idempotent: clearing an already-empty set is a no-op.
        self.attached.clear();
        if let Some(name) = plan.attach {
            self.attached.insert(name);
        }

        if let Some(command) = plan.viewport {
            let transition = self.transitions.begin(command, &self.viewport);
            self.viewport = transition.target().clone();
        }

        self.dots.set_active(self.nav.index());
    }
}
