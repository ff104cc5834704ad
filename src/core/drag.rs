//! # Drag Navigation Policy
//!
//! Decides what a released drag means. The pointer collaborator measures
//! velocity and direction; this module only turns those measurements into
//! "go back", "go forward", "settle on the nearest slide", or "do nothing".
//!
//! ```text
//! not dragged, resting between slides ──────────────▶ Nearest(None)
//! fast flick right/down (and not at first) ─────────▶ Nearest(Backward)
//! fast flick left/up   (and not at last)  ──────────▶ Nearest(Forward)
//! moved on axis, or left off-center ────────────────▶ Nearest(None)
//! otherwise (a tap) ────────────────────────────────▶ Stay
//! ```

use serde::{Deserialize, Serialize};

use crate::core::index::DisplayPosition;

/// Axis a carousel moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
    /// Either axis counts.
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    /// Magnitude of the component that matters for `axis`.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x.abs(),
            Axis::Vertical => self.y.abs(),
            Axis::Free => self.x.abs().max(self.y.abs()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragDirection {
    Left,
    Right,
    Up,
    Down,
    #[default]
    None,
}

impl DragDirection {
    /// Dragging content right or down reveals the previous slide.
    pub fn step(self) -> Option<Step> {
        match self {
            DragDirection::Right | DragDirection::Down => Some(Step::Backward),
            DragDirection::Left | DragDirection::Up => Some(Step::Forward),
            DragDirection::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Backward,
    Forward,
}

impl Step {
    pub fn delta(self) -> isize {
        match self {
            Step::Backward => -1,
            Step::Forward => 1,
        }
    }
}

/// What the pointer collaborator reports when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragRelease {
    pub velocity: Velocity,
    pub direction: DragDirection,
    pub did_move_on_axis: bool,
}

/// Carousel state the policy needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragContext {
    pub has_dragged: bool,
    pub looped: bool,
    pub is_first: bool,
    pub is_last: bool,
    pub visually_offset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDecision {
    /// Settle on the nearest slide, nudged one step if it is the current one.
    Nearest(Option<Step>),
    Stay,
}

pub fn decide(release: &DragRelease, ctx: &DragContext, axis: Axis, swipe_threshold: f32) -> DragDecision {
    if !ctx.has_dragged && ctx.visually_offset {
        return DragDecision::Nearest(None);
    }

    let has_velocity = ctx.has_dragged && release.velocity.along(axis) > swipe_threshold;
    match (has_velocity, release.direction.step()) {
        (true, Some(Step::Backward)) if ctx.looped || !ctx.is_first => {
            DragDecision::Nearest(Some(Step::Backward))
        }
        (true, Some(Step::Forward)) if ctx.looped || !ctx.is_last => {
            DragDecision::Nearest(Some(Step::Forward))
        }
        _ if release.did_move_on_axis || ctx.visually_offset => DragDecision::Nearest(None),
        _ => DragDecision::Stay,
    }
}

/// Rounded comparison of a rendered slide start against the resting edge.
///
/// Both sides are rounded half away from zero, so a slide 0.49 units off
/// rest still counts as resting and one 0.5 units off does not.
pub fn is_visually_offset(rendered_start: f32, start_edge: f32) -> bool {
    rendered_start.round() != start_edge.round()
}

/// Position whose rendered start lies closest to `start_edge`. Ties go to
/// the earlier position.
pub fn nearest_position(
    rendered_starts: impl IntoIterator<Item = (DisplayPosition, f32)>,
    start_edge: f32,
) -> Option<DisplayPosition> {
    rendered_starts
        .into_iter()
        .fold(None, |best: Option<(DisplayPosition, f32)>, (position, start)| {
            let distance = (start - start_edge).abs();
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((position, distance)),
            }
        })
        .map(|(position, _)| position)
}
