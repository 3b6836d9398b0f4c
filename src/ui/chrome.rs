//! Headless chrome-widget state: dot pagination, keyboard navigation, and
//! the attribution dialog. Rendering is the host's job; these types only
//! hold the state a renderer draws from and translate input into
//! navigation actions.

use crate::story::controller::NavAction;

/// Dot pagination indicator: one dot per slide, exactly one active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotIndicator {
    count: usize,
    active: usize,
}

impl DotIndicator {
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
            active: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Marks the dot at `index` active; out-of-range indices are ignored
    pub fn set_active(&mut self, index: usize) {
        if index < self.count {
            self.active = index;
        }
    }

    /// Whether the dot at `index` is the active one
    pub fn is_active(&self, index: usize) -> bool {
        index == self.active
    }

    /// The navigation action a click on dot `index` produces
    pub fn click(&self, index: usize) -> NavAction {
        NavAction::GoTo(index as i64)
    }
}

/// Keys the story responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
    Space,
    Other,
}

/// Fixed keyboard mapping: down/page-down/space advance, up/page-up go back
#[derive(Debug, Clone, Copy, Default)]
pub struct Keymap;

impl Keymap {
    pub fn action(&self, key: Key) -> Option<NavAction> {
        match key {
            Key::ArrowDown | Key::PageDown | Key::Space => Some(NavAction::Next),
            Key::ArrowUp | Key::PageUp => Some(NavAction::Prev),
            Key::Other => None,
        }
    }
}

/// Attribution dialog state: a single trigger opens it; dismissal is the
/// host's native behavior
#[derive(Debug, Clone, Default)]
pub struct AttributionDialog {
    open: bool,
}

impl AttributionDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
