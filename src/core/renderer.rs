//! # Renderer Seam
//!
//! The carousel never draws. It tells a [`Renderer`] where the track should
//! be and which elements must be reordered, and it reads back the current
//! visual offset when it needs to reason about where the user left things.
//!
//! ## Completion
//!
//! An animated [`Renderer::move_to`] carries a [`TransitionHandle`]. When the
//! animation ends, the host reports it with
//! [`Carousel::finish_transition`](crate::core::carousel::Carousel::finish_transition).
//! A handle that was cancelled, or already reported, is ignored there.
//!
//! ## Offsets
//!
//! All offsets are along the carousel axis, in whatever unit the renderer
//! uses (pixels, terminal cells). The track offset is the translation of the
//! whole strip of slides; a slide's rendered start is
//! `track_offset() + slide_start(position)`.

use std::fmt;

use crate::core::index::{DisplayPosition, LogicalIndex};

/// Identifies one animated transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle(pub u64);

impl fmt::Display for TransitionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition-{}", self.0)
    }
}

pub trait Renderer {
    /// Replace all elements with `order`, e.g. after the slide set changed.
    fn mount(&mut self, order: &[LogicalIndex]);

    /// Bring `position` to rest. `None` snaps immediately; `Some` animates
    /// and must later be reported as finished under that handle.
    fn move_to(&mut self, position: DisplayPosition, transition: Option<TransitionHandle>);

    /// Drop a pending completion. Must tolerate unknown or stale handles.
    fn cancel_pending_completion(&mut self, handle: TransitionHandle);

    /// Place `slide`'s element immediately before `before`'s, or at the end.
    fn relocate_element(&mut self, slide: LogicalIndex, before: Option<LogicalIndex>);

    /// Current translation of the track.
    fn track_offset(&self) -> f32;

    /// Move the track without animation.
    fn set_track_offset(&mut self, offset: f32);

    /// Start of the slot at `position`, measured along the untranslated track.
    fn slide_start(&self, position: DisplayPosition) -> f32;

    /// Offset from the wrapper's start edge at which a centered slide rests.
    fn centering_offset(&self) -> f32;
}
