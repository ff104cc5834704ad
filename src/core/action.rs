//! # Actions
//!
//! Everything that can happen in the viewer becomes an `Action`.
//! User presses →? That's `Action::Next`.
//! The track animation ends? That's `Action::TransitionFinished(handle)`.
//! The carousel settles? Its listener sends `Action::Notice(SlideSettled)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an [`Effect`] for the adapter to carry out.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed actions in, assert on `App`.

use log::{debug, info};
use std::time::Instant;

use crate::core::carousel::{Navigation, Rejection};
use crate::core::drag::DragRelease;
use crate::core::events::NavigationEvent;
use crate::core::renderer::{Renderer, TransitionHandle};
use crate::core::state::App;

/// Carousel notifications, forwarded by listener callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SlideStarted(NavigationEvent),
    SlideSettled(NavigationEvent),
    /// Refused because the viewer is locked.
    Blocked(NavigationEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Next,
    Previous,
    First,
    Last,
    /// Zero-based slide, as the user counts them.
    GoTo(usize),
    AddSlide,
    ToggleEnabled,
    ToggleLock,
    DragStart,
    DragMove(f32),
    DragEnd(DragRelease),
    TransitionFinished(TransitionHandle),
    Tick(Instant),
    Notice(Notice),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    Quit,
}

pub fn update<R: Renderer>(app: &mut App<R>, action: Action) -> Effect {
    // Ticks arrive every frame
    if !matches!(action, Action::Tick(_)) {
        debug!("update: {:?}", action);
    }
    match action {
        Action::Next => {
            let result = app.carousel.go_to_next();
            report(app, result)
        }
        Action::Previous => {
            let result = app.carousel.go_to_previous();
            report(app, result)
        }
        Action::First => {
            let result = app.carousel.go_to_slide(0);
            report(app, result)
        }
        Action::Last => {
            let last = app.carousel.original_count().saturating_sub(1);
            let result = app.carousel.go_to_slide(last);
            report(app, result)
        }
        Action::GoTo(index) => {
            if index >= app.carousel.original_count() {
                app.status_message = format!("No slide {}", index + 1);
                return Effect::Redraw;
            }
            let result = app.carousel.go_to_slide(index);
            report(app, result)
        }
        Action::AddSlide => {
            let content = app.next_added_slide();
            let title = content.title.clone();
            app.carousel.add_slide(content);
            info!("Added '{}', deck now has {} slides", title, app.carousel.original_count());
            app.status_message = format!("{} | {}", title, app.position_label());
            Effect::Redraw
        }
        Action::ToggleEnabled => {
            let enabled = !app.carousel.is_enabled();
            app.carousel.set_enabled(enabled);
            app.status_message = if enabled {
                "Carousel enabled".to_string()
            } else {
                "Carousel disabled".to_string()
            };
            Effect::Redraw
        }
        Action::ToggleLock => {
            let locked = !app.is_locked();
            app.set_locked(locked);
            app.status_message = if locked {
                "Locked".to_string()
            } else {
                "Unlocked".to_string()
            };
            Effect::Redraw
        }
        Action::DragStart => {
            app.carousel.begin_drag();
            Effect::Redraw
        }
        Action::DragMove(delta) => {
            app.carousel.drag_by(delta);
            Effect::Redraw
        }
        Action::DragEnd(release) => match app.carousel.end_drag(release) {
            Some(result) => report(app, result),
            None => Effect::None,
        },
        Action::TransitionFinished(handle) => {
            if app.carousel.finish_transition(handle) {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::Tick(now) => {
            if app.carousel.tick(now) {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::Notice(notice) => {
            apply_notice(app, notice);
            Effect::Redraw
        }
        Action::Quit => Effect::Quit,
    }
}

fn report<R: Renderer>(app: &mut App<R>, result: Result<Navigation, Rejection>) -> Effect {
    match result {
        Ok(navigation) => {
            debug!("Navigation accepted: {:?}", navigation);
            Effect::Redraw
        }
        Err(Rejection::AlreadySelected) => Effect::None,
        Err(Rejection::Disabled) => {
            app.status_message = "Carousel is disabled (press e)".to_string();
            Effect::Redraw
        }
        Err(Rejection::OutOfRange) => {
            app.status_message = if app.carousel.is_last_slide() {
                "Already at the last slide".to_string()
            } else {
                "Already at the first slide".to_string()
            };
            Effect::Redraw
        }
        // The Blocked notice carries the message
        Err(Rejection::Vetoed) => Effect::Redraw,
    }
}

fn apply_notice<R: Renderer>(app: &mut App<R>, notice: Notice) {
    match notice {
        Notice::SlideStarted(event) => {
            debug!("Slide transition started: {} -> {}", event.from, event.to);
        }
        Notice::SlideSettled(event) => {
            debug!(
                "Slide settled: {} -> {} (changed={})",
                event.from, event.to, event.has_slide_changed
            );
            app.status_message = app.position_label();
        }
        Notice::Blocked(event) => {
            let target = app.carousel.original_index(event.to);
            app.status_message = format!("Locked: cannot go to slide {} (press x)", target.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drag::{DragDirection, Velocity};
    use crate::core::index::LogicalIndex;
    use crate::test_support::{RecordingRenderer, pump, test_app};
    use std::sync::mpsc::Receiver;

    /// Applies an action, then any notices it produced.
    fn dispatch(app: &mut App<RecordingRenderer>, rx: &Receiver<Action>, action: Action) -> Effect {
        let effect = update(app, action);
        pump(app, rx);
        effect
    }

    fn finish(app: &mut App<RecordingRenderer>, rx: &Receiver<Action>) {
        if let Some(handle) = app.carousel.renderer_mut().in_flight.take() {
            dispatch(app, rx, Action::TransitionFinished(handle));
        }
    }

    #[test]
    fn test_next_then_finish_updates_status() {
        let (mut app, rx) = test_app(3, false);
        assert_eq!(dispatch(&mut app, &rx, Action::Next), Effect::Redraw);
        // Still animating: the label has not moved yet
        assert_eq!(app.status_message, "Slide 1 of 3");
        finish(&mut app, &rx);
        assert_eq!(app.status_message, "Slide 2 of 3");
    }

    #[test]
    fn test_next_at_last_reports_edge() {
        let (mut app, rx) = test_app(2, false);
        dispatch(&mut app, &rx, Action::Last);
        finish(&mut app, &rx);
        dispatch(&mut app, &rx, Action::Next);
        assert_eq!(app.status_message, "Already at the last slide");
        assert_eq!(app.carousel.selected_index(), LogicalIndex(1));
    }

    #[test]
    fn test_previous_at_first_reports_edge() {
        let (mut app, rx) = test_app(3, false);
        dispatch(&mut app, &rx, Action::Previous);
        assert_eq!(app.status_message, "Already at the first slide");
    }

    #[test]
    fn test_go_to_current_is_silent() {
        let (mut app, rx) = test_app(3, false);
        assert_eq!(dispatch(&mut app, &rx, Action::GoTo(0)), Effect::None);
    }

    #[test]
    fn test_go_to_unknown_slide() {
        let (mut app, rx) = test_app(3, false);
        dispatch(&mut app, &rx, Action::GoTo(7));
        assert_eq!(app.status_message, "No slide 8");
        assert_eq!(app.carousel.selected_index(), LogicalIndex(0));
    }

    #[test]
    fn test_lock_vetoes_navigation() {
        let (mut app, rx) = test_app(3, true);
        dispatch(&mut app, &rx, Action::ToggleLock);
        assert!(app.is_locked());
        dispatch(&mut app, &rx, Action::GoTo(2));
        assert_eq!(app.status_message, "Locked: cannot go to slide 3 (press x)");
        assert_eq!(app.carousel.selected_index(), LogicalIndex(0));

        dispatch(&mut app, &rx, Action::ToggleLock);
        dispatch(&mut app, &rx, Action::GoTo(2));
        finish(&mut app, &rx);
        assert_eq!(app.carousel.selected_index(), LogicalIndex(2));
    }

    #[test]
    fn test_disable_blocks_navigation() {
        let (mut app, rx) = test_app(3, false);
        dispatch(&mut app, &rx, Action::ToggleEnabled);
        dispatch(&mut app, &rx, Action::Next);
        assert_eq!(app.status_message, "Carousel is disabled (press e)");
        dispatch(&mut app, &rx, Action::ToggleEnabled);
        assert_eq!(app.status_message, "Carousel enabled");
    }

    #[test]
    fn test_add_slide_grows_deck() {
        let (mut app, rx) = test_app(2, true);
        dispatch(&mut app, &rx, Action::AddSlide);
        assert_eq!(app.carousel.original_count(), 3);
        assert!(!app.carousel.is_bidirectional());
        assert_eq!(app.status_message, "Added slide 1 | Slide 1 of 3");
    }

    #[test]
    fn test_drag_swipe_navigates() {
        let (mut app, rx) = test_app(3, false);
        dispatch(&mut app, &rx, Action::DragStart);
        dispatch(&mut app, &rx, Action::DragMove(-4.0));
        let release = DragRelease {
            velocity: Velocity { x: -1.0, y: 0.0 },
            direction: DragDirection::Left,
            did_move_on_axis: true,
        };
        dispatch(&mut app, &rx, Action::DragEnd(release));
        finish(&mut app, &rx);
        assert_eq!(app.status_message, "Slide 2 of 3");
    }

    #[test]
    fn test_tap_does_nothing() {
        let (mut app, rx) = test_app(3, false);
        dispatch(&mut app, &rx, Action::DragStart);
        assert_eq!(
            dispatch(&mut app, &rx, Action::DragEnd(DragRelease::default())),
            Effect::None
        );
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let (mut app, rx) = test_app(3, false);
        dispatch(&mut app, &rx, Action::Next);
        assert_eq!(
            dispatch(&mut app, &rx, Action::TransitionFinished(TransitionHandle(999))),
            Effect::None
        );
    }

    #[test]
    fn test_tick_settles_overdue_transition() {
        let (mut app, rx) = test_app(3, false);
        dispatch(&mut app, &rx, Action::Next);
        let later = Instant::now() + std::time::Duration::from_secs(5);
        assert_eq!(dispatch(&mut app, &rx, Action::Tick(later)), Effect::Redraw);
        assert_eq!(app.status_message, "Slide 2 of 3");
    }

    #[test]
    fn test_quit() {
        let (mut app, _rx) = test_app(1, false);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
