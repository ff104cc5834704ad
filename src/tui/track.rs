//! # Track Renderer
//!
//! The terminal implementation of [`Renderer`]. It mirrors the carousel's
//! element order, owns the track offset in columns, and animates animated
//! moves with a time-based tween. The event loop calls
//! [`TrackRenderer::advance`] every frame; when a tween lands, the handle it
//! returns is fed back to the carousel as a completion.
//!
//! ```text
//!  viewport ┌──────────────────────────────────────┐
//!           │ peek │      slide_width       │ gap  │ ...
//!           └──────────────────────────────────────┘
//!  rendered start of slot p = offset + p * (slide_width + gap)
//! ```
//!
//! In fade mode the track never slides: the offset jumps to the target and
//! the tween only drives the cross-fade progress.

use log::debug;
use std::time::{Duration, Instant};

use crate::core::display_order::{Relocation, apply_relocation};
use crate::core::index::{DisplayPosition, LogicalIndex};
use crate::core::renderer::{Renderer, TransitionHandle};

pub const SLIDE_GAP: u16 = 2;
pub const MIN_SLIDE_WIDTH: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Time-based tween between two offsets.
#[derive(Debug, Clone)]
struct Tween {
    active: bool,
    start: f32,
    target: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    fn idle() -> Self {
        Self {
            active: false,
            start: 0.0,
            target: 0.0,
            started_at: Instant::now(),
            duration: Duration::ZERO,
            easing: Easing::EaseOut,
        }
    }

    fn start(&mut self, from: f32, to: f32, duration: Duration, easing: Easing) {
        self.active = true;
        self.start = from;
        self.target = to;
        self.started_at = Instant::now();
        self.duration = duration;
        self.easing = easing;
    }

    /// Eased progress in `0..=1`, or `None` when idle.
    fn progress(&self, now: Instant) -> Option<f32> {
        if !self.active {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            return Some(1.0);
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        Some(self.easing.apply(t))
    }

    fn value_at(&self, progress: f32) -> f32 {
        self.start + (self.target - self.start) * progress
    }
}

#[derive(Debug)]
pub struct TrackRenderer {
    elements: Vec<LogicalIndex>,
    offset: f32,
    viewport: u16,
    slide_width: u16,
    centered: bool,
    fade: bool,
    duration: Duration,
    tween: Tween,
    /// Cross-fade progress; `None` when not fading.
    fade_progress: Option<f32>,
    in_flight: Option<TransitionHandle>,
}

impl TrackRenderer {
    pub fn new(duration: Duration, centered: bool, fade: bool) -> Self {
        Self {
            elements: Vec::new(),
            offset: 0.0,
            viewport: MIN_SLIDE_WIDTH,
            slide_width: MIN_SLIDE_WIDTH,
            centered,
            fade,
            duration,
            tween: Tween::idle(),
            fade_progress: None,
            in_flight: None,
        }
    }

    pub fn elements(&self) -> &[LogicalIndex] {
        &self.elements
    }

    pub fn slide_width(&self) -> u16 {
        self.slide_width
    }

    pub fn pitch(&self) -> f32 {
        f32::from(self.slide_width + SLIDE_GAP)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.active
    }

    pub fn fade_progress(&self) -> Option<f32> {
        self.fade_progress
    }

    /// Resizes slides to the track area. Everything on the track is scaled
    /// around the resting edge so the same slide stays in view.
    pub fn set_viewport(&mut self, width: u16) {
        if width == self.viewport {
            return;
        }
        let old_edge = self.rest_edge();
        let old_pitch = self.pitch();

        self.viewport = width;
        let peek = width / 8;
        self.slide_width = width
            .saturating_sub(2 * peek + SLIDE_GAP)
            .max(MIN_SLIDE_WIDTH);

        let new_edge = self.rest_edge();
        let ratio = self.pitch() / old_pitch;
        let rescale = |value: f32| (value - old_edge) * ratio + new_edge;
        self.offset = rescale(self.offset);
        self.tween.start = rescale(self.tween.start);
        self.tween.target = rescale(self.tween.target);
        debug!(
            "track: viewport {} cols, slide width {}, offset {:.1}",
            width, self.slide_width, self.offset
        );
    }

    /// Moves the tween forward to `now`. Returns the handle of a transition
    /// that just landed.
    pub fn advance(&mut self, now: Instant) -> Option<TransitionHandle> {
        let progress = self.tween.progress(now)?;
        if self.fade {
            self.fade_progress = Some(progress);
        } else {
            self.offset = self.tween.value_at(progress);
        }
        if progress < 1.0 {
            return None;
        }
        self.tween.active = false;
        self.fade_progress = None;
        let handle = self.in_flight.take();
        if let Some(handle) = handle {
            debug!("track: {} landed at offset {:.1}", handle, self.offset);
        }
        handle
    }

    /// Slots intersecting the viewport: element, position, and rendered
    /// start column relative to the track area.
    pub fn visible_slots(&self) -> Vec<(LogicalIndex, DisplayPosition, i32)> {
        let width = i32::from(self.slide_width);
        let viewport = i32::from(self.viewport);
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(p, &slide)| {
                let position = DisplayPosition(p);
                let start = (self.offset + self.slide_start(position)).round() as i32;
                (start < viewport && start + width > 0).then_some((slide, position, start))
            })
            .collect()
    }

    fn rest_edge(&self) -> f32 {
        if self.centered {
            self.centering_offset()
        } else {
            0.0
        }
    }
}

impl Renderer for TrackRenderer {
    fn mount(&mut self, order: &[LogicalIndex]) {
        self.elements = order.to_vec();
    }

    fn move_to(&mut self, position: DisplayPosition, transition: Option<TransitionHandle>) {
        let target = self.rest_edge() - self.slide_start(position);
        match transition {
            None => {
                self.tween.active = false;
                self.fade_progress = None;
                self.offset = target;
            }
            Some(handle) if self.fade => {
                self.offset = target;
                self.fade_progress = Some(0.0);
                self.tween.start(0.0, 1.0, self.duration, Easing::Linear);
                self.in_flight = Some(handle);
            }
            Some(handle) => {
                self.tween
                    .start(self.offset, target, self.duration, Easing::EaseOut);
                self.in_flight = Some(handle);
            }
        }
    }

    fn cancel_pending_completion(&mut self, handle: TransitionHandle) {
        if self.in_flight == Some(handle) {
            // The offset stays wherever the last frame left it
            self.in_flight = None;
            self.tween.active = false;
            self.fade_progress = None;
        }
    }

    fn relocate_element(&mut self, slide: LogicalIndex, before: Option<LogicalIndex>) {
        apply_relocation(&mut self.elements, Relocation { slide, before });
    }

    fn track_offset(&self) -> f32 {
        self.offset
    }

    fn set_track_offset(&mut self, offset: f32) {
        self.tween.active = false;
        self.offset = offset;
    }

    fn slide_start(&self, position: DisplayPosition) -> f32 {
        position.0 as f32 * self.pitch()
    }

    fn centering_offset(&self) -> f32 {
        f32::from(self.viewport.saturating_sub(self.slide_width)) / 2.0
    }
}
