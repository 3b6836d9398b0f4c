//! Scroll-driven slide detection, decoupled from any rendering platform.
//!
//! The host reports a visible fraction per slide (however it measures it:
//! an intersection observer, viewport polling, a scroll position model).
//! When a slide's fraction crosses the dominance threshold and it is not
//! already the active slide, a [`NavAction::SlideVisible`] is emitted.

use crate::story::controller::NavAction;

/// Visible fraction above which a slide counts as the dominant one
pub const DOMINANCE_THRESHOLD: f64 = 0.6;

/// Tracks per-slide visible fractions and emits dominance events
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    threshold: f64,
    fractions: Vec<f64>,
}

impl VisibilityTracker {
    pub fn new(slide_count: usize) -> Self {
        Self::with_threshold(slide_count, DOMINANCE_THRESHOLD)
    }

    pub fn with_threshold(slide_count: usize, threshold: f64) -> Self {
        Self {
            threshold,
            fractions: vec![0.0; slide_count],
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Records a slide's visible fraction. Returns a navigation action when
    /// the slide just crossed the dominance threshold upward and is not the
    /// currently active slide; staying above the threshold does not re-fire.
    pub fn report(
        &mut self,
        index: usize,
        fraction: f64,
        active_index: usize,
    ) -> Option<NavAction> {
        let previous = *self.fractions.get(index)?;
        self.fractions[index] = fraction.clamp(0.0, 1.0);

        let crossed = previous < self.threshold && fraction >= self.threshold;
        if crossed && index != active_index {
            return Some(NavAction::SlideVisible(index));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_threshold_fires() {
        let mut tracker = VisibilityTracker::new(3);
        assert_eq!(
            tracker.report(1, 0.7, 0),
            Some(NavAction::SlideVisible(1))
        );
    }

    #[test]
    fn test_active_slide_does_not_fire() {
        let mut tracker = VisibilityTracker::new(3);
        assert_eq!(tracker.report(0, 0.9, 0), None);
    }

    #[test]
    fn test_staying_above_threshold_fires_once() {
        let mut tracker = VisibilityTracker::new(3);
        assert!(tracker.report(2, 0.8, 0).is_some());
        assert_eq!(tracker.report(2, 0.9, 0), None);
    }

    #[test]
    fn test_refires_after_dropping_below() {
        let mut tracker = VisibilityTracker::new(3);
        assert!(tracker.report(2, 0.8, 0).is_some());
        assert_eq!(tracker.report(2, 0.2, 0), None);
        assert!(tracker.report(2, 0.7, 0).is_some());
    }

    #[test]
    fn test_unknown_slide_index_ignored() {
        let mut tracker = VisibilityTracker::new(2);
        assert_eq!(tracker.report(9, 1.0, 0), None);
    }

    #[test]
    fn test_below_threshold_never_fires() {
        let mut tracker = VisibilityTracker::new(2);
        assert_eq!(tracker.report(1, 0.5, 0), None);
    }
}
