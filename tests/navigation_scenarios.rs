use carousel::core::display_order::{Relocation, apply_relocation};
use carousel::core::drag::{DragDirection, DragRelease, Velocity};
use carousel::core::index::IndexResolver;
use carousel::core::neighbors::neighbors_in_place;
use carousel::core::{
    Carousel, CarouselError, CarouselOptions, DisplayPosition, LogicalIndex, Rejection, Renderer,
    TransitionHandle, TransitionState,
};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Helper Functions
// ============================================================================

const WIDTH: f32 = 100.0;

/// Keeps its own element list and remembers the last animated handle.
#[derive(Debug, Default)]
struct MirrorRenderer {
    elements: Vec<LogicalIndex>,
    offset: f32,
    pending: Option<TransitionHandle>,
    animated: usize,
}

impl Renderer for MirrorRenderer {
    fn mount(&mut self, order: &[LogicalIndex]) {
        self.elements = order.to_vec();
    }

    fn move_to(&mut self, position: DisplayPosition, transition: Option<TransitionHandle>) {
        self.offset = -self.slide_start(position);
        if transition.is_some() {
            self.animated += 1;
            self.pending = transition;
        }
    }

    fn cancel_pending_completion(&mut self, handle: TransitionHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn relocate_element(&mut self, slide: LogicalIndex, before: Option<LogicalIndex>) {
        apply_relocation(&mut self.elements, Relocation { slide, before });
    }

    fn track_offset(&self) -> f32 {
        self.offset
    }

    fn set_track_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    fn slide_start(&self, position: DisplayPosition) -> f32 {
        position.get() as f32 * WIDTH
    }

    fn centering_offset(&self) -> f32 {
        0.0
    }
}

fn build(count: usize, options: CarouselOptions) -> Carousel<usize, MirrorRenderer> {
    Carousel::new((0..count).collect(), MirrorRenderer::default(), options).unwrap()
}

fn looped() -> CarouselOptions {
    CarouselOptions {
        looped: true,
        ..Default::default()
    }
}

/// Lets the renderer report the animation it is running.
fn land(carousel: &mut Carousel<usize, MirrorRenderer>) {
    if let Some(handle) = carousel.renderer_mut().pending.take() {
        assert!(carousel.finish_transition(handle));
    }
}

fn assert_mirrors(carousel: &Carousel<usize, MirrorRenderer>) {
    assert!(carousel.display_order().is_permutation());
    assert_eq!(
        carousel.renderer().elements.as_slice(),
        carousel.display_order().as_slice()
    );
}

type EventLog = Rc<RefCell<Vec<(&'static str, usize, usize)>>>;

fn listen(carousel: &mut Carousel<usize, MirrorRenderer>) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let start = log.clone();
    carousel.on_slide_start(move |e| start.borrow_mut().push(("start", e.from.get(), e.to.get())));
    let end = log.clone();
    carousel.on_slide_end(move |e| end.borrow_mut().push(("end", e.from.get(), e.to.get())));
    log
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_three_looped_slides_cycle() {
    let mut carousel = build(3, looped());
    let mut visited = Vec::new();
    for _ in 0..3 {
        carousel.go_to_next().unwrap();
        land(&mut carousel);
        visited.push(carousel.selected_index().get());
        assert_mirrors(&carousel);
    }
    assert_eq!(visited, vec![1, 2, 0]);
}

#[test]
fn test_non_looped_edge_is_silent() {
    let mut carousel = build(
        4,
        CarouselOptions {
            start_index: 3,
            ..Default::default()
        },
    );
    let log = listen(&mut carousel);
    assert_eq!(carousel.go_to_next(), Err(Rejection::OutOfRange));
    assert_eq!(carousel.selected_index(), LogicalIndex(3));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_looped_neighbors_after_every_settle() {
    let mut carousel = build(4, looped());
    let resolver = IndexResolver::new(4, true);
    for _ in 0..5 {
        carousel.go_to_next().unwrap();
        land(&mut carousel);
        assert!(neighbors_in_place(
            carousel.display_order(),
            &resolver,
            carousel.selected_index(),
            1
        ));
        assert_mirrors(&carousel);
    }
    assert_eq!(carousel.selected_index(), LogicalIndex(1));
}

#[test]
fn test_round_trip_index_mapping_when_idle() {
    let mut carousel = build(6, looped());
    carousel.go_to_slide(4).unwrap();
    land(&mut carousel);
    let resolver = IndexResolver::new(6, true);
    for i in 0..6 {
        let position = resolver.to_display_position(carousel.display_order(), LogicalIndex(i));
        assert_eq!(
            resolver.to_logical_index(carousel.display_order(), position),
            LogicalIndex(i)
        );
    }
}

#[test]
fn test_jump_crosses_one_slot_then_restores() {
    let mut carousel = build(
        4,
        CarouselOptions {
            jump: true,
            ..Default::default()
        },
    );
    let log = listen(&mut carousel);
    let navigation = carousel.go_to_slide(3).unwrap();
    assert!(navigation.jumped);
    assert_eq!(carousel.renderer().animated, 1);
    assert_eq!(carousel.last_position().distance(carousel.position()), 1);
    assert_mirrors(&carousel);

    land(&mut carousel);
    assert!(carousel.display_order().is_identity());
    assert_eq!(carousel.selected_index(), LogicalIndex(3));
    assert_eq!(*log.borrow(), vec![("start", 0, 3), ("end", 0, 3)]);
    assert_mirrors(&carousel);
}

#[test]
fn test_two_looped_slides_become_four() {
    let mut carousel = Carousel::new(
        vec!["left".to_string(), "right".to_string()],
        MirrorRenderer::default(),
        looped(),
    )
    .unwrap();
    assert_eq!(carousel.len(), 4);
    assert_eq!(carousel.original_count(), 2);

    carousel.go_to_previous().unwrap();
    if let Some(handle) = carousel.renderer_mut().pending.take() {
        carousel.finish_transition(handle);
    }
    assert_eq!(carousel.selected_index(), LogicalIndex(3));
    assert_eq!(carousel.original_index(LogicalIndex(3)), LogicalIndex(1));

    assert_eq!(carousel.dispose(), vec!["left".to_string(), "right".to_string()]);
}

#[test]
fn test_no_slides_is_an_error() {
    let result = Carousel::<u8, _>::new(Vec::new(), MirrorRenderer::default(), CarouselOptions::default());
    assert_eq!(result.err(), Some(CarouselError::NoSlides));
}

#[test]
fn test_reselecting_is_a_noop_unless_offset() {
    let mut carousel = build(4, CarouselOptions::default());
    let log = listen(&mut carousel);
    assert_eq!(carousel.go_to_slide(0), Err(Rejection::AlreadySelected));

    carousel.renderer_mut().offset = -30.0;
    assert!(carousel.go_to_slide(0).is_ok());
    land(&mut carousel);
    assert_eq!(*log.borrow(), vec![("start", 0, 0), ("end", 0, 0)]);
}

#[test]
fn test_veto_from_any_listener() {
    let mut carousel = build(4, CarouselOptions::default());
    let asked = Rc::new(RefCell::new(0));
    let counter = asked.clone();
    carousel.on_will_navigate(move |_| {
        *counter.borrow_mut() += 1;
        true
    });
    carousel.on_will_navigate(|event| event.to != LogicalIndex(3));

    assert_eq!(carousel.go_to_slide(3), Err(Rejection::Vetoed));
    assert!(carousel.go_to_slide(2).is_ok());
    assert_eq!(*asked.borrow(), 2);
}

#[test]
fn test_last_request_wins() {
    let mut carousel = build(5, CarouselOptions::default());
    let log = listen(&mut carousel);
    let first = carousel.go_to_slide(1).unwrap().transition.unwrap();
    carousel.go_to_slide(3).unwrap();
    assert!(!carousel.finish_transition(first));
    assert_eq!(carousel.transition_state(), TransitionState::Transitioning);
    land(&mut carousel);
    assert_eq!(carousel.selected_index(), LogicalIndex(3));
    let ends: Vec<_> = log.borrow().iter().filter(|e| e.0 == "end").cloned().collect();
    assert_eq!(ends, vec![("end", 1, 3)]);
}

#[test]
fn test_fast_swipe_left_goes_next() {
    let mut carousel = build(4, CarouselOptions::default());
    carousel.begin_drag();
    carousel.drag_by(-20.0);
    let release = DragRelease {
        velocity: Velocity { x: -0.9, y: 0.0 },
        direction: DragDirection::Left,
        did_move_on_axis: true,
    };
    let navigation = carousel.end_drag(release).unwrap().unwrap();
    assert_eq!(navigation.to, LogicalIndex(1));
}

#[test]
fn test_swipe_past_last_slide_settles_back() {
    let mut carousel = build(
        3,
        CarouselOptions {
            start_index: 2,
            ..Default::default()
        },
    );
    carousel.begin_drag();
    carousel.drag_by(-20.0);
    let release = DragRelease {
        velocity: Velocity { x: -3.0, y: 0.0 },
        direction: DragDirection::Left,
        did_move_on_axis: true,
    };
    let navigation = carousel.end_drag(release).unwrap().unwrap();
    assert_eq!(navigation.to, LogicalIndex(2));
    land(&mut carousel);
    assert!(!carousel.is_visually_offset());
}

#[test]
fn test_add_slide_while_animating() {
    let mut carousel = build(3, looped());
    carousel.go_to_next().unwrap();
    let added = carousel.add_slide(3);
    assert_eq!(added, LogicalIndex(3));
    assert_eq!(carousel.transition_state(), TransitionState::Idle);
    assert_eq!(carousel.selected_index(), LogicalIndex(1));
    assert_mirrors(&carousel);

    carousel.go_to_slide(3).unwrap();
    land(&mut carousel);
    assert_mirrors(&carousel);
}
