//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::mpsc::{self, Receiver};

use crate::core::action::{Action, update};
use crate::core::carousel::{Carousel, CarouselOptions};
use crate::core::config::{
    CarouselFileConfig, CarouselSection, CliOverrides, GeneralConfig, SlideEntry, resolve_with,
};
use crate::core::display_order::{Relocation, apply_relocation};
use crate::core::index::{DisplayPosition, LogicalIndex};
use crate::core::renderer::{Renderer, TransitionHandle};
use crate::core::state::App;

/// Width of every slot in [`RecordingRenderer`].
pub const SLOT: f32 = 10.0;

/// A renderer that keeps its own element order and records every call.
///
/// Animated moves land instantly; the handle stays in `in_flight` until a
/// test reports it finished or it is cancelled.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub elements: Vec<LogicalIndex>,
    pub offset: f32,
    pub centering: f32,
    pub moves: Vec<(DisplayPosition, Option<TransitionHandle>)>,
    pub relocations: Vec<Relocation>,
    pub cancelled: Vec<TransitionHandle>,
    pub in_flight: Option<TransitionHandle>,
}

impl RecordingRenderer {
    pub fn animated_moves(&self) -> usize {
        self.moves.iter().filter(|(_, h)| h.is_some()).count()
    }
}

impl Renderer for RecordingRenderer {
    fn mount(&mut self, order: &[LogicalIndex]) {
        self.elements = order.to_vec();
    }

    fn move_to(&mut self, position: DisplayPosition, transition: Option<TransitionHandle>) {
        self.offset = self.centering - self.slide_start(position);
        self.moves.push((position, transition));
        self.in_flight = transition;
    }

    fn cancel_pending_completion(&mut self, handle: TransitionHandle) {
        if self.in_flight == Some(handle) {
            self.in_flight = None;
        }
        self.cancelled.push(handle);
    }

    fn relocate_element(&mut self, slide: LogicalIndex, before: Option<LogicalIndex>) {
        let relocation = Relocation { slide, before };
        apply_relocation(&mut self.elements, relocation);
        self.relocations.push(relocation);
    }

    fn track_offset(&self) -> f32 {
        self.offset
    }

    fn set_track_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn slide_start(&self, position: DisplayPosition) -> f32 {
        position.0 as f32 * SLOT
    }

    fn centering_offset(&self) -> f32 {
        self.centering
    }
}

/// A carousel of `count` numbered slides.
pub fn test_carousel(count: usize, options: CarouselOptions) -> Carousel<usize, RecordingRenderer> {
    Carousel::new((0..count).collect(), RecordingRenderer::default(), options)
        .expect("test carousel should build")
}

/// Finishes whatever transition is in flight.
pub fn finish(carousel: &mut Carousel<usize, RecordingRenderer>) {
    if let Some(handle) = carousel.renderer_mut().in_flight.take() {
        carousel.finish_transition(handle);
    }
}

/// An app over `count` cards named "Card 1".."Card n", plus the receiving
/// end of its notice channel.
pub fn test_app(count: usize, looped: bool) -> (App<RecordingRenderer>, Receiver<Action>) {
    let config = CarouselFileConfig {
        general: GeneralConfig {
            deck_title: Some("Test deck".to_string()),
            ..Default::default()
        },
        carousel: CarouselSection {
            looped: Some(looped),
            ..Default::default()
        },
        slides: (1..=count)
            .map(|n| SlideEntry::new(format!("Card {n}"), format!("Body of card {n}")))
            .collect(),
    };
    let resolved = resolve_with(&config, &CliOverrides::default(), |_| None);
    let (tx, rx) = mpsc::channel();
    let app = App::new(&resolved, RecordingRenderer::default(), tx).expect("test app should build");
    (app, rx)
}

/// Feeds every queued notice back through `update`.
pub fn pump(app: &mut App<RecordingRenderer>, rx: &Receiver<Action>) {
    while let Ok(action) = rx.try_recv() {
        update(app, action);
    }
}
