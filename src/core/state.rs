//! # Application State
//!
//! Core business state for the carousel viewer. This module contains domain
//! logic only, no TUI-specific types. Presentation state lives in the `tui`
//! module; the renderer is whatever the adapter plugs in.
//!
//! ```text
//! App<R>
//! ├── carousel: Carousel<SlideEntry, R>  // navigation engine + renderer
//! ├── deck_title: String                 // title bar text
//! ├── status_message: String             // status bar text
//! ├── locked: Rc<Cell<bool>>             // shared with the veto listener
//! └── added: usize                       // slides appended at runtime
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Carousel listeners never touch `App` directly: they send
//! [`Action::Notice`] values down the same channel the event loop drains.

use log::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use crate::core::action::{Action, Notice};
use crate::core::carousel::Carousel;
use crate::core::config::{ResolvedConfig, SlideEntry};
use crate::core::error::CarouselError;
use crate::core::renderer::Renderer;

pub struct App<R: Renderer> {
    pub carousel: Carousel<SlideEntry, R>,
    pub deck_title: String,
    pub status_message: String,
    locked: Rc<Cell<bool>>,
    added: usize,
}

impl<R: Renderer> App<R> {
    pub fn new(config: &ResolvedConfig, renderer: R, tx: Sender<Action>) -> Result<Self, CarouselError> {
        let mut carousel = Carousel::new(config.slides.clone(), renderer, config.carousel_options())?;
        let locked = Rc::new(Cell::new(false));

        let veto_locked = locked.clone();
        let veto_tx = tx.clone();
        carousel.on_will_navigate(move |event| {
            if !veto_locked.get() {
                return true;
            }
            send(&veto_tx, Notice::Blocked(*event));
            false
        });
        let start_tx = tx.clone();
        carousel.on_slide_start(move |event| send(&start_tx, Notice::SlideStarted(*event)));
        carousel.on_slide_end(move |event| send(&tx, Notice::SlideSettled(*event)));

        let mut app = Self {
            carousel,
            deck_title: config.deck_title.clone(),
            status_message: String::new(),
            locked,
            added: 0,
        };
        app.status_message = app.position_label();
        Ok(app)
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    pub fn set_locked(&mut self, locked: bool) {
        debug!("App: locked={}", locked);
        self.locked.set(locked);
    }

    pub fn current_slide(&self) -> Option<&SlideEntry> {
        self.carousel
            .slide(self.carousel.selected_index())
            .map(|slide| &slide.content)
    }

    /// "Slide 2 of 5", counting the slides the user supplied.
    pub fn position_label(&self) -> String {
        let selected = self.carousel.original_index(self.carousel.selected_index());
        format!(
            "Slide {} of {}",
            selected.get() + 1,
            self.carousel.original_count()
        )
    }

    /// Content for the next slide appended with the add key.
    pub fn next_added_slide(&mut self) -> SlideEntry {
        self.added += 1;
        SlideEntry::new(
            format!("Added slide {}", self.added),
            "Appended while the carousel was running.",
        )
    }
}

fn send(tx: &Sender<Action>, notice: Notice) {
    if tx.send(Action::Notice(notice)).is_err() {
        warn!("Failed to forward carousel notice: receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let (app, _rx) = test_app(3, false);
        assert_eq!(app.status_message, "Slide 1 of 3");
        assert_eq!(app.deck_title, "Test deck");
        assert!(!app.is_locked());
        assert_eq!(app.current_slide().map(|s| s.title.as_str()), Some("Card 1"));
    }

    #[test]
    fn test_position_label_counts_originals_only() {
        let (mut app, _rx) = test_app(2, true);
        assert_eq!(app.carousel.len(), 4);
        app.carousel.go_to_slide_immediately(3).unwrap();
        assert_eq!(app.position_label(), "Slide 2 of 2");
    }

    #[test]
    fn test_added_slides_are_numbered() {
        let (mut app, _rx) = test_app(1, false);
        assert_eq!(app.next_added_slide().title, "Added slide 1");
        assert_eq!(app.next_added_slide().title, "Added slide 2");
    }
}
