//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the carousel,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Frame Loop
//!
//! Every iteration:
//!
//! 1. Advance the track tween. A landed transition becomes
//!    `Action::TransitionFinished`.
//! 2. Send `Action::Tick` so an unreported transition still settles.
//! 3. Drain listener notices from the channel.
//! 4. Draw, if anything changed.
//! 5. Poll input and dispatch it.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (tween running or pointer held): polls every ~16ms and
//!   redraws every frame.
//! - **Idle**: sleeps up to 250ms and only redraws on events or resize.

mod component;
mod components;
mod event;
pub mod pointer;
pub mod track;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::pointer::PointerTracker;
use crate::tui::track::TrackRenderer;

const ANIMATING_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(250);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Maps a key-level event to the core action it stands for.
fn key_action(event: &TuiEvent) -> Option<Action> {
    match *event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Next => Some(Action::Next),
        TuiEvent::Previous => Some(Action::Previous),
        TuiEvent::First => Some(Action::First),
        TuiEvent::Last => Some(Action::Last),
        TuiEvent::Digit(d) => Some(Action::GoTo(usize::from(d).saturating_sub(1))),
        TuiEvent::AddSlide => Some(Action::AddSlide),
        TuiEvent::ToggleEnabled => Some(Action::ToggleEnabled),
        TuiEvent::ToggleLock => Some(Action::ToggleLock),
        TuiEvent::MouseDown(..) | TuiEvent::MouseDrag(..) | TuiEvent::MouseUp(..) => None,
        TuiEvent::Resize => None,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Channel for listener notices
    let (tx, rx) = mpsc::channel();

    let renderer = TrackRenderer::new(config.transition, config.centered, config.fade);
    let mut app = App::new(&config, renderer, tx).map_err(std::io::Error::other)?;
    let mut pointer = PointerTracker::new(config.axis);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();
        let mut should_quit = false;

        if let Some(handle) = app.carousel.renderer_mut().advance(now) {
            apply(&mut app, Action::TransitionFinished(handle), &mut needs_redraw, &mut should_quit);
        }
        apply(&mut app, Action::Tick(now), &mut needs_redraw, &mut should_quit);

        // Listener notices (slide started / settled / blocked)
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            apply(&mut app, action, &mut needs_redraw, &mut should_quit);
        }

        let animating = app.carousel.renderer().is_animating() || pointer.is_pressed();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &mut app))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATING_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = pointer.handle_event(&event).or_else(|| key_action(&event));
            if let Some(action) = action {
                apply(&mut app, action, &mut needs_redraw, &mut should_quit);
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Carousel shutting down on slide {}", app.carousel.selected_index());
    let contents = app.carousel.dispose();
    debug!("Disposed carousel with {} slides", contents.len());

    ratatui::restore();
    Ok(())
}

fn apply(app: &mut App<TrackRenderer>, action: Action, needs_redraw: &mut bool, should_quit: &mut bool) {
    match update(app, action) {
        Effect::Quit => *should_quit = true,
        Effect::Redraw => *needs_redraw = true,
        Effect::None => {}
    }
}
