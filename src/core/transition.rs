use crate::core::geo::LatLng;
use crate::core::viewport::{Viewport, ViewportCommand};
use instant::Instant;

/// Animation duration used for every slide-driven viewport move, in seconds
pub const TRANSITION_DURATION: f64 = 1.0;

/// State of a viewport transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// A viewport transition animation between two viewport states
#[derive(Debug, Clone)]
pub struct Transition {
    /// The command that produced this transition
    pub command: ViewportCommand,
    /// Duration in seconds
    pub duration: f64,
    /// Current state
    pub state: TransitionState,
    /// Start time, set when the transition begins running
    start_time: Option<Instant>,
    /// Initial viewport state
    start_viewport: Viewport,
    /// Target viewport state
    target_viewport: Viewport,
}

impl Transition {
    /// Create a new transition from the current viewport
    pub fn new(command: ViewportCommand, current: &Viewport, duration: f64) -> Self {
        let target_viewport = current.after(&command);
        Self {
            command,
            duration,
            state: TransitionState::NotStarted,
            start_time: None,
            start_viewport: current.clone(),
            target_viewport,
        }
    }

    /// The viewport this transition ends at
    pub fn target(&self) -> &Viewport {
        &self.target_viewport
    }

    pub fn start(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.state = TransitionState::Running;
    }

    pub fn cancel(&mut self) {
        if self.state == TransitionState::Running || self.state == TransitionState::NotStarted {
            self.state = TransitionState::Cancelled;
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            TransitionState::NotStarted | TransitionState::Running
        )
    }

    /// Advances the animation clock, returning the interpolated viewport.
    /// Completes the transition once the duration has elapsed.
    pub fn advance(&mut self, now: Instant) -> Viewport {
        let started = match self.start_time {
            Some(t) => t,
            None => {
                self.start(now);
                now
            }
        };

        if self.state == TransitionState::Cancelled {
            return self.start_viewport.clone();
        }

        let elapsed = now.duration_since(started).as_secs_f64();
        let t = if self.duration > 0.0 {
            (elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if t >= 1.0 {
            self.state = TransitionState::Completed;
            return self.target_viewport.clone();
        }

        let eased = ease_in_out_quad(t);
        let from = &self.start_viewport;
        let to = &self.target_viewport;

        let mut current = from.clone();
        current.set_center(LatLng::new(
            lerp(from.center.lat, to.center.lat, eased),
            lerp(from.center.lng, to.center.lng, eased),
        ));
        current.set_zoom(lerp(from.zoom, to.zoom, eased));
        current
    }
}

/// Owns at most one in-flight transition. Starting a new one cancels the
/// previous, so rapid navigation never leaves two animations racing.
#[derive(Debug, Default)]
pub struct TransitionManager {
    current: Option<Transition>,
}

impl TransitionManager {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Begins a transition toward the command's target, cancelling any
    /// in-flight transition first.
    pub fn begin(&mut self, command: ViewportCommand, viewport: &Viewport) -> &Transition {
        if let Some(prev) = self.current.as_mut() {
            prev.cancel();
        }

        let mut transition = Transition::new(command, viewport, TRANSITION_DURATION);
        transition.start(Instant::now());
        self.current.insert(transition)
    }

    /// Advances the in-flight transition, if any, and returns the viewport
    /// to display. Returns `None` when nothing is animating.
    pub fn tick(&mut self, now: Instant) -> Option<Viewport> {
        let transition = self.current.as_mut()?;
        if !transition.is_active() {
            return None;
        }
        Some(transition.advance(now))
    }

    pub fn in_flight(&self) -> Option<&Transition> {
        self.current.as_ref().filter(|t| t.is_active())
    }
}

fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLngBounds;
    use std::time::Duration;

    fn fly(center: LatLng) -> ViewportCommand {
        ViewportCommand::FlyTo {
            center,
            zoom: Some(12.0),
        }
    }

    #[test]
    fn test_transition_completes_after_duration() {
        let viewport = Viewport::new(LatLng::default(), 10.0);
        let mut transition = Transition::new(fly(LatLng::new(10.0, 10.0)), &viewport, 1.0);

        let start = Instant::now();
        transition.start(start);

        let mid = transition.advance(start + Duration::from_millis(500));
        assert_eq!(transition.state, TransitionState::Running);
        assert!(mid.center.lat > 0.0 && mid.center.lat < 10.0);

        let end = transition.advance(start + Duration::from_millis(1100));
        assert_eq!(transition.state, TransitionState::Completed);
        assert_eq!(end.center, LatLng::new(10.0, 10.0));
    }

    #[test]
    fn test_new_transition_cancels_in_flight() {
        let viewport = Viewport::new(LatLng::default(), 10.0);
        let mut manager = TransitionManager::new();

        manager.begin(fly(LatLng::new(10.0, 10.0)), &viewport);
        let first_target = manager.in_flight().unwrap().target().clone();

        manager.begin(
            ViewportCommand::FitBounds {
                bounds: LatLngBounds::from_coords(0.0, 0.0, 1.0, 1.0),
                padding: 0.15,
            },
            &viewport,
        );

        let current = manager.in_flight().unwrap();
        assert_ne!(current.target(), &first_target);
        assert_eq!(current.state, TransitionState::Running);
    }

    #[test]
    fn test_tick_none_when_idle() {
        let mut manager = TransitionManager::new();
        assert!(manager.tick(Instant::now()).is_none());
    }
}
