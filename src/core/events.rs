//! # Navigation Notifications
//!
//! Typed listener lists for the three things a carousel announces:
//!
//! - `will_navigate`: before anything changes; any listener may veto.
//! - `slide_start`: an animated navigation began.
//! - `slide_end`: a navigation settled.

use crate::core::index::LogicalIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEvent {
    pub from: LogicalIndex,
    pub to: LogicalIndex,
    pub has_slide_changed: bool,
}

impl NavigationEvent {
    pub fn new(from: LogicalIndex, to: LogicalIndex) -> Self {
        Self {
            from,
            to,
            has_slide_changed: from != to,
        }
    }
}

type VetoListener = Box<dyn FnMut(&NavigationEvent) -> bool>;
type Listener = Box<dyn FnMut(&NavigationEvent)>;

#[derive(Default)]
pub struct Listeners {
    will_navigate: Vec<VetoListener>,
    slide_start: Vec<Listener>,
    slide_end: Vec<Listener>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("will_navigate", &self.will_navigate.len())
            .field("slide_start", &self.slide_start.len())
            .field("slide_end", &self.slide_end.len())
            .finish()
    }
}

impl Listeners {
    pub fn on_will_navigate(&mut self, listener: impl FnMut(&NavigationEvent) -> bool + 'static) {
        self.will_navigate.push(Box::new(listener));
    }

    pub fn on_slide_start(&mut self, listener: impl FnMut(&NavigationEvent) + 'static) {
        self.slide_start.push(Box::new(listener));
    }

    pub fn on_slide_end(&mut self, listener: impl FnMut(&NavigationEvent) + 'static) {
        self.slide_end.push(Box::new(listener));
    }

    /// Returns false if any listener vetoed. Every listener is still called.
    pub fn emit_will_navigate(&mut self, event: &NavigationEvent) -> bool {
        self.will_navigate
            .iter_mut()
            .fold(true, |allowed, listener| listener(event) && allowed)
    }

    pub fn emit_slide_start(&mut self, event: &NavigationEvent) {
        for listener in &mut self.slide_start {
            listener(event);
        }
    }

    pub fn emit_slide_end(&mut self, event: &NavigationEvent) {
        for listener in &mut self.slide_end {
            listener(event);
        }
    }
}
