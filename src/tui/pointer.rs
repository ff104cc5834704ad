//! # Pointer Tracker
//!
//! Turns raw mouse down/drag/up events into carousel drag actions: a
//! `DragStart`, one `DragMove(delta)` per motion along the axis, and a
//! `DragEnd` carrying the measured [`DragRelease`].
//!
//! Terminal mice report whole cells. Deltas stay in columns (the track's
//! unit), but velocity is converted to approximate pixels per millisecond so
//! the swipe threshold means the same thing it would on a pixel screen.

use log::debug;
use std::time::Instant;

use crate::core::action::Action;
use crate::core::drag::{Axis, DragDirection, DragRelease, Velocity};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Rough size of a terminal cell in pixels.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Weight of the newest sample in the smoothed velocity.
const VELOCITY_SMOOTHING: f32 = 0.8;

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: (u16, u16),
    last: (u16, u16),
    last_at: Instant,
    velocity: Velocity,
}

#[derive(Debug)]
pub struct PointerTracker {
    axis: Axis,
    press: Option<Press>,
}

impl PointerTracker {
    pub fn new(axis: Axis) -> Self {
        Self { axis, press: None }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn handle_at(&mut self, event: &TuiEvent, now: Instant) -> Option<Action> {
        match *event {
            TuiEvent::MouseDown(col, row) => {
                self.press = Some(Press {
                    origin: (col, row),
                    last: (col, row),
                    last_at: now,
                    velocity: Velocity::default(),
                });
                Some(Action::DragStart)
            }
            TuiEvent::MouseDrag(col, row) => {
                let press = self.press.as_mut()?;
                let dx = f32::from(col) - f32::from(press.last.0);
                let dy = f32::from(row) - f32::from(press.last.1);
                let elapsed_ms = (now.saturating_duration_since(press.last_at).as_secs_f32() * 1000.0).max(1.0);

                let sample = Velocity {
                    x: dx * CELL_WIDTH_PX / elapsed_ms,
                    y: dy * CELL_HEIGHT_PX / elapsed_ms,
                };
                press.velocity = Velocity {
                    x: VELOCITY_SMOOTHING * sample.x + (1.0 - VELOCITY_SMOOTHING) * press.velocity.x,
                    y: VELOCITY_SMOOTHING * sample.y + (1.0 - VELOCITY_SMOOTHING) * press.velocity.y,
                };
                press.last = (col, row);
                press.last_at = now;

                let delta = along(self.axis, dx, dy);
                (delta != 0.0).then_some(Action::DragMove(delta))
            }
            TuiEvent::MouseUp(col, row) => {
                let mut press = self.press.take()?;
                press.last = (col, row);
                Some(Action::DragEnd(self.release(&press)))
            }
            _ => None,
        }
    }

    fn release(&self, press: &Press) -> DragRelease {
        let dx = f32::from(press.last.0) - f32::from(press.origin.0);
        let dy = f32::from(press.last.1) - f32::from(press.origin.1);
        let direction = direction(self.axis, dx, dy);
        let release = DragRelease {
            velocity: press.velocity,
            direction,
            did_move_on_axis: along(self.axis, dx, dy) != 0.0,
        };
        debug!("pointer: released {:?}", release);
        release
    }
}

impl EventHandler for PointerTracker {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        self.handle_at(event, Instant::now())
    }
}

/// Displacement that counts for `axis`. `Free` takes the dominant one.
fn along(axis: Axis, dx: f32, dy: f32) -> f32 {
    match axis {
        Axis::Horizontal => dx,
        Axis::Vertical => dy,
        Axis::Free if dx.abs() >= dy.abs() => dx,
        Axis::Free => dy,
    }
}

fn direction(axis: Axis, dx: f32, dy: f32) -> DragDirection {
    let horizontal = match axis {
        Axis::Horizontal => true,
        Axis::Vertical => false,
        Axis::Free => dx.abs() >= dy.abs(),
    };
    match (horizontal, dx, dy) {
        (true, dx, _) if dx < 0.0 => DragDirection::Left,
        (true, dx, _) if dx > 0.0 => DragDirection::Right,
        (false, _, dy) if dy < 0.0 => DragDirection::Up,
        (false, _, dy) if dy > 0.0 => DragDirection::Down,
        _ => DragDirection::None,
    }
}
