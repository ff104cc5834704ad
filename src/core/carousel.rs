//! # Navigation State Machine
//!
//! [`Carousel`] ties the registry, display order, and neighbor placement
//! together and decides which slide is selected.
//!
//! ```text
//!                 request_navigate (animated)
//!        ┌──────────────────────────────────────────┐
//!        │                                          ▼
//!    ┌───────┐   finish_transition / tick    ┌──────────────┐
//!    │ Idle  │ ◀──────────────────────────── │ Transitioning│
//!    └───────┘                               └──────────────┘
//!        │  ▲                                       │
//!        └──┘ request_navigate (skip animation)     │ request_navigate
//!             settles synchronously                 └─▶ cancel, then restart
//! ```
//!
//! ## Jumping
//!
//! With `jump` enabled, a navigation more than one slot away first swaps the
//! target into the slot next to the current slide, so the animation only
//! crosses one slot. The swap is undone when the transition settles.
//!
//! ## Looping
//!
//! Looped carousels re-run neighbor placement on every settle so the
//! selection is always flanked by its circular neighbors. Reordering moves
//! slides under the track, so the renderer is snapped to the recomputed
//! position afterwards.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::display_order::{DisplayOrder, Relocation};
use crate::core::drag::{self, Axis, DragContext, DragDecision, DragRelease, Step};
use crate::core::error::CarouselError;
use crate::core::events::{Listeners, NavigationEvent};
use crate::core::index::{DisplayPosition, IndexResolver, LogicalIndex};
use crate::core::neighbors;
use crate::core::registry::{IdSequence, Slide, SlideRegistry};
use crate::core::renderer::{Renderer, TransitionHandle};

pub const DEFAULT_NEIGHBOR_COUNT: usize = 1;
pub const DEFAULT_SWIPE_VELOCITY_THRESHOLD: f32 = 0.5;
pub const DEFAULT_TRANSITION_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CarouselOptions {
    pub looped: bool,
    pub jump: bool,
    pub fade: bool,
    pub centered: bool,
    pub enabled: bool,
    pub neighbor_count: usize,
    pub axis: Axis,
    /// Release velocity (offset units per millisecond) above which a drag
    /// counts as a swipe.
    pub swipe_velocity_threshold: f32,
    /// Backup wait for a completion the renderer never reports.
    pub transition_timeout: Duration,
    pub start_index: usize,
    pub id_prefix: String,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            looped: false,
            jump: false,
            fade: false,
            centered: false,
            enabled: true,
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            axis: Axis::default(),
            swipe_velocity_threshold: DEFAULT_SWIPE_VELOCITY_THRESHOLD,
            transition_timeout: DEFAULT_TRANSITION_TIMEOUT,
            start_index: 0,
            id_prefix: String::from("slide"),
        }
    }
}

impl CarouselOptions {
    fn validate(&self) -> Result<(), CarouselError> {
        if !self.swipe_velocity_threshold.is_finite() || self.swipe_velocity_threshold < 0.0 {
            return Err(CarouselError::InvalidOption {
                name: "swipe_velocity_threshold",
                reason: format!("must be a finite non-negative number, got {}", self.swipe_velocity_threshold),
            });
        }
        if self.transition_timeout.is_zero() {
            return Err(CarouselError::InvalidOption {
                name: "transition_timeout",
                reason: "must be longer than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    Transitioning,
}

/// Why a navigation request did not happen. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Disabled,
    /// Past an edge of a carousel that does not loop.
    OutOfRange,
    /// Already resting on the target.
    AlreadySelected,
    /// A `will_navigate` listener said no.
    Vetoed,
}

/// Outcome of an accepted navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub from: LogicalIndex,
    pub to: LogicalIndex,
    /// Position the renderer was sent to.
    pub position: DisplayPosition,
    pub jumped: bool,
    pub transition: Option<TransitionHandle>,
}

#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    handle: TransitionHandle,
    from: LogicalIndex,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Carousel<T, R: Renderer> {
    registry: SlideRegistry<T>,
    order: DisplayOrder,
    options: CarouselOptions,
    renderer: R,
    listeners: Listeners,
    selected: LogicalIndex,
    position: DisplayPosition,
    last_position: DisplayPosition,
    pending: Option<PendingTransition>,
    jumped: bool,
    has_dragged: bool,
    next_handle: u64,
}

impl<T: Clone, R: Renderer> Carousel<T, R> {
    /// Builds a carousel over `contents` and settles it on
    /// `options.start_index`.
    pub fn new(contents: Vec<T>, renderer: R, options: CarouselOptions) -> Result<Self, CarouselError> {
        if contents.is_empty() {
            return Err(CarouselError::NoSlides);
        }
        options.validate()?;

        let mut registry = SlideRegistry::new(contents, IdSequence::new(options.id_prefix.clone()));
        if options.looped {
            registry.expand_bidirectional();
        }
        let order = DisplayOrder::identity(registry.len());

        let mut carousel = Self {
            registry,
            order,
            options,
            renderer,
            listeners: Listeners::default(),
            selected: LogicalIndex(0),
            position: DisplayPosition(0),
            last_position: DisplayPosition(0),
            pending: None,
            jumped: false,
            has_dragged: false,
            next_handle: 0,
        };
        carousel.selected = carousel
            .resolver()
            .safe_index(isize::try_from(carousel.options.start_index).unwrap_or(isize::MAX));
        carousel.remount();

        info!(
            "carousel: {} slides (looped={}, jump={}, fade={}, bidirectional={}), selected {}",
            carousel.len(),
            carousel.options.looped,
            carousel.options.jump,
            carousel.options.fade,
            carousel.is_bidirectional(),
            carousel.selected
        );
        Ok(carousel)
    }

    /// Appends a slide. The display order is rebuilt from identity and the
    /// current selection re-settled without animation.
    pub fn add_slide(&mut self, content: T) -> LogicalIndex {
        self.cancel_transition();

        // Duplicates belong to the two-slide layout only
        let selected = self.registry.original_index(self.selected);
        self.registry.remove_duplicates();
        let index = self.registry.push(content);
        if self.options.looped {
            self.registry.expand_bidirectional();
        }

        self.jumped = false;
        self.selected = self.resolver().safe_index(selected.signed());
        self.remount();
        info!("carousel: added slide {}, now {} slides", index, self.len());
        index
    }
}

impl<T, R: Renderer> Carousel<T, R> {
    // ------------------------------------------------------------------
    // Public navigation API
    // ------------------------------------------------------------------

    /// Animates to `index`. Out-of-range indices wrap on looped carousels
    /// and are clamped otherwise.
    pub fn go_to_slide(&mut self, index: usize) -> Result<Navigation, Rejection> {
        let target = self.resolver().safe_index(isize::try_from(index).unwrap_or(isize::MAX));
        self.request_navigate(target.signed(), false)
    }

    /// Moves to `index` and settles before returning.
    pub fn go_to_slide_immediately(&mut self, index: usize) -> Result<Navigation, Rejection> {
        let target = self.resolver().safe_index(isize::try_from(index).unwrap_or(isize::MAX));
        self.request_navigate(target.signed(), true)
    }

    pub fn go_to_next(&mut self) -> Result<Navigation, Rejection> {
        self.request_navigate(self.selected.signed() + 1, false)
    }

    pub fn go_to_previous(&mut self) -> Result<Navigation, Rejection> {
        self.request_navigate(self.selected.signed() - 1, false)
    }

    /// Core entry point for every navigation. `target` may lie outside the
    /// slide range; looped carousels wrap it, others reject it.
    pub fn request_navigate(&mut self, target: isize, skip_animation: bool) -> Result<Navigation, Rejection> {
        let resolver = self.resolver();
        let target_index = resolver.safe_index(target);
        let target_position = self.order.position_of(target_index);

        if let Err(rejection) = self.can_navigate(target, target_position, skip_animation) {
            debug!("carousel: navigation to {} rejected: {:?}", target, rejection);
            return Err(rejection);
        }

        let event = NavigationEvent::new(self.selected, target_index);
        if !self.listeners.emit_will_navigate(&event) {
            debug!("carousel: navigation to {} vetoed by listener", target_index);
            return Err(Rejection::Vetoed);
        }

        self.cancel_transition();

        self.selected = target_index;
        let mut target_position = self.order.position_of(target_index);
        let mut jumped = false;
        if self.options.jump
            && !self.options.fade
            && !skip_animation
            && target_position.distance(self.position) > 1
        {
            target_position = self.jump_relocate(target_position);
            jumped = true;
        }

        self.last_position = self.position;
        self.position = target_position;
        let from = self.order.logical_at(self.last_position);

        let transition = if skip_animation {
            self.renderer.move_to(self.position, None);
            self.settle(from);
            None
        } else {
            let handle = self.allocate_handle();
            self.pending = Some(PendingTransition {
                handle,
                from,
                deadline: Instant::now() + self.options.transition_timeout,
            });
            self.renderer.move_to(self.position, Some(handle));
            self.listeners
                .emit_slide_start(&NavigationEvent::new(from, self.selected));
            Some(handle)
        };

        debug!(
            "carousel: navigate {} -> {} ({} -> {}), jumped={}, animated={}",
            from,
            self.selected,
            self.last_position,
            self.position,
            jumped,
            transition.is_some()
        );
        Ok(Navigation {
            from,
            to: self.selected,
            position: target_position,
            jumped,
            transition,
        })
    }

    /// Reports that the renderer finished the transition for `handle`.
    /// Stale or cancelled handles are ignored.
    pub fn finish_transition(&mut self, handle: TransitionHandle) -> bool {
        match self.pending {
            Some(pending) if pending.handle == handle => {
                self.settle(pending.from);
                true
            }
            _ => {
                debug!("carousel: ignoring completion for stale {}", handle);
                false
            }
        }
    }

    /// Settles a transition whose completion never arrived within the
    /// configured timeout.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.deadline {
            return false;
        }
        warn!(
            "carousel: {} not reported within {:?}, settling",
            pending.handle, self.options.transition_timeout
        );
        self.renderer.cancel_pending_completion(pending.handle);
        self.settle(pending.from);
        true
    }

    // ------------------------------------------------------------------
    // Drag lifecycle
    // ------------------------------------------------------------------

    /// Pointer went down on the track. Any running transition stops where
    /// it is.
    pub fn begin_drag(&mut self) {
        if !self.options.enabled {
            return;
        }
        self.cancel_transition();
        self.has_dragged = false;
    }

    /// Pointer moved by `delta` along the carousel axis.
    pub fn drag_by(&mut self, delta: f32) {
        if !self.options.enabled || delta == 0.0 {
            return;
        }
        self.has_dragged = true;
        let offset = self.renderer.track_offset() + delta;
        self.renderer.set_track_offset(offset);
    }

    /// Pointer released. Returns `None` when the release was a plain tap.
    pub fn end_drag(&mut self, release: DragRelease) -> Option<Result<Navigation, Rejection>> {
        let ctx = DragContext {
            has_dragged: self.has_dragged,
            looped: self.options.looped,
            is_first: self.is_first_slide(),
            is_last: self.is_last_slide(),
            visually_offset: self.is_visually_offset(),
        };
        let decision = drag::decide(
            &release,
            &ctx,
            self.options.axis,
            self.options.swipe_velocity_threshold,
        );
        debug!("carousel: drag released {:?} -> {:?}", release, decision);

        let result = match decision {
            DragDecision::Stay => None,
            DragDecision::Nearest(step) => {
                let target = self.nearest_target(step);
                let result = self.request_navigate(target, false);
                if result.is_err() && self.is_visually_offset() {
                    // Put the track back where the selection rests
                    self.renderer.move_to(self.position, None);
                }
                Some(result)
            }
        };
        self.has_dragged = false;
        result
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn selected_index(&self) -> LogicalIndex {
        self.selected
    }

    pub fn position(&self) -> DisplayPosition {
        self.position
    }

    pub fn last_position(&self) -> DisplayPosition {
        self.last_position
    }

    pub fn is_first_slide(&self) -> bool {
        self.selected.0 == 0
    }

    pub fn is_last_slide(&self) -> bool {
        self.selected.0 + 1 == self.len()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn is_bidirectional(&self) -> bool {
        self.options.looped && self.registry.has_duplicates()
    }

    pub fn is_jumped(&self) -> bool {
        self.jumped
    }

    pub fn is_dragging(&self) -> bool {
        self.has_dragged
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled != enabled {
            info!("carousel: {}", if enabled { "enabled" } else { "disabled" });
        }
        self.options.enabled = enabled;
    }

    pub fn transition_state(&self) -> TransitionState {
        if self.pending.is_some() {
            TransitionState::Transitioning
        } else {
            TransitionState::Idle
        }
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn display_order(&self) -> &DisplayOrder {
        &self.order
    }

    pub fn slide(&self, index: LogicalIndex) -> Option<&Slide<T>> {
        self.registry.get(index)
    }

    pub fn slides(&self) -> impl Iterator<Item = &Slide<T>> {
        self.registry.iter()
    }

    /// Number of slides the application supplied, ignoring bidirectional
    /// copies.
    pub fn original_count(&self) -> usize {
        self.registry.original_count()
    }

    /// The supplied slide a logical index shows.
    pub fn original_index(&self, index: LogicalIndex) -> LogicalIndex {
        self.registry.original_index(index)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// True when the selected slide is not resting on the start edge.
    pub fn is_visually_offset(&self) -> bool {
        drag::is_visually_offset(self.rendered_start(self.position), self.start_edge())
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn on_will_navigate(&mut self, listener: impl FnMut(&NavigationEvent) -> bool + 'static) {
        self.listeners.on_will_navigate(listener);
    }

    pub fn on_slide_start(&mut self, listener: impl FnMut(&NavigationEvent) + 'static) {
        self.listeners.on_slide_start(listener);
    }

    pub fn on_slide_end(&mut self, listener: impl FnMut(&NavigationEvent) + 'static) {
        self.listeners.on_slide_end(listener);
    }

    /// Tears the carousel down, returning the supplied contents without
    /// bidirectional copies.
    pub fn dispose(mut self) -> Vec<T> {
        if let Some(pending) = self.pending.take() {
            self.renderer.cancel_pending_completion(pending.handle);
        }
        self.registry.into_contents()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn resolver(&self) -> IndexResolver {
        IndexResolver::new(self.registry.len(), self.options.looped)
    }

    fn places_neighbors(&self) -> bool {
        self.options.looped && !self.options.fade
    }

    fn start_edge(&self) -> f32 {
        if self.options.centered {
            self.renderer.centering_offset()
        } else {
            0.0
        }
    }

    fn rendered_start(&self, position: DisplayPosition) -> f32 {
        self.renderer.track_offset() + self.renderer.slide_start(position)
    }

    fn allocate_handle(&mut self) -> TransitionHandle {
        self.next_handle += 1;
        TransitionHandle(self.next_handle)
    }

    fn can_navigate(
        &self,
        target: isize,
        target_position: DisplayPosition,
        skip_animation: bool,
    ) -> Result<(), Rejection> {
        if !self.options.enabled {
            return Err(Rejection::Disabled);
        }
        if self.resolver().is_out_of_range(target) && !self.options.looped {
            return Err(Rejection::OutOfRange);
        }
        if target_position == self.position
            && !skip_animation
            && !self.has_dragged
            && !self.is_visually_offset()
        {
            return Err(Rejection::AlreadySelected);
        }
        Ok(())
    }

    fn apply(&mut self, relocations: Vec<Relocation>) -> bool {
        let changed = !relocations.is_empty();
        for relocation in relocations {
            self.renderer
                .relocate_element(relocation.slide, relocation.before);
        }
        changed
    }

    /// Rebuilds the renderer from an identity order and settles the current
    /// selection in place.
    fn remount(&mut self) {
        self.order = DisplayOrder::identity(self.registry.len());
        self.renderer.mount(self.order.as_slice());
        if self.places_neighbors() {
            let resolver = self.resolver();
            let relocations = neighbors::place_neighbors(
                &mut self.order,
                &resolver,
                self.selected,
                self.options.neighbor_count,
            );
            self.apply(relocations);
        }
        self.position = self.order.position_of(self.selected);
        self.last_position = self.position;
        self.renderer.move_to(self.position, None);
    }

    /// Swaps the target into the slot next to the current one and returns
    /// that slot.
    fn jump_relocate(&mut self, target_position: DisplayPosition) -> DisplayPosition {
        let adjacent = if target_position > self.position {
            DisplayPosition(self.position.0 + 1)
        } else {
            DisplayPosition(self.position.0 - 1)
        };
        let occupant = self.order.logical_at(adjacent);
        debug!(
            "carousel: jump {} -> {}, swapping {} out of {}",
            self.position, target_position, occupant, adjacent
        );
        let relocations = self.order.swap(self.selected, occupant);
        self.apply(relocations);
        self.jumped = true;
        adjacent
    }

    fn settle(&mut self, from: LogicalIndex) {
        self.pending = None;

        let mut changed = false;
        if self.jumped {
            let relocations = self.order.to_identity();
            changed |= self.apply(relocations);
        }
        if self.places_neighbors() {
            let resolver = self.resolver();
            let relocations = neighbors::place_neighbors(
                &mut self.order,
                &resolver,
                self.selected,
                self.options.neighbor_count,
            );
            changed |= self.apply(relocations);
        }
        self.position = self.order.position_of(self.selected);
        if changed || self.places_neighbors() {
            self.renderer.move_to(self.position, None);
        }
        self.jumped = false;

        debug_assert!(self.order.is_permutation());
        debug!("carousel: settled on {} at {}", self.selected, self.position);
        self.listeners
            .emit_slide_end(&NavigationEvent::new(from, self.selected));
    }

    /// Drops the pending completion and resets the layout without moving
    /// anything on screen. Returns false when nothing was in flight.
    fn cancel_transition(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.renderer.cancel_pending_completion(pending.handle);
        debug!("carousel: cancelled {}", pending.handle);
        if self.options.fade {
            return true;
        }

        let anchor = self.selected;
        let anchor_start = self.rendered_start(self.order.position_of(anchor));

        if self.jumped {
            let relocations = self.order.to_identity();
            self.apply(relocations);
            self.jumped = false;
        }
        if self.places_neighbors() {
            let resolver = self.resolver();
            let relocations = neighbors::place_neighbors(
                &mut self.order,
                &resolver,
                anchor,
                self.options.neighbor_count,
            );
            self.apply(relocations);
        }

        // Same anchor, same place on screen, new slot
        self.position = self.order.position_of(anchor);
        let offset = anchor_start - self.renderer.slide_start(self.position);
        self.renderer.set_track_offset(offset);
        true
    }

    /// Logical target for settling after a drag.
    fn nearest_target(&self, step: Option<Step>) -> isize {
        let edge = self.start_edge();
        let nearest = drag::nearest_position(
            (0..self.order.len()).map(|p| {
                let position = DisplayPosition(p);
                (position, self.rendered_start(position))
            }),
            edge,
        )
        .unwrap_or(self.position);
        let logical = self.order.logical_at(nearest);
        match step {
            Some(step) if logical == self.selected => self.selected.signed() + step.delta(),
            _ => logical.signed(),
        }
    }
}
