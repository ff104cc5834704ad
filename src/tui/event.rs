use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use log::warn;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    ForceQuit, // Ctrl+C
    Next,
    Previous,
    First,
    Last,
    Digit(u8), // 1-9, go to that slide
    AddSlide,
    ToggleEnabled,
    ToggleLock,

    // Pointer events (handled by the PointerTracker)
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp(u16, u16),

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Mouse(mouse_event)) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseDown(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                Some(TuiEvent::MouseDrag(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                Some(TuiEvent::MouseUp(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            warn!("Event read failed: {}", e);
            None
        }
    }
}

pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement also reports releases and repeats
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Right | KeyCode::Char('l')) => Some(TuiEvent::Next),
        (_, KeyCode::Left | KeyCode::Char('h')) => Some(TuiEvent::Previous),
        (_, KeyCode::Home) => Some(TuiEvent::First),
        (_, KeyCode::End) => Some(TuiEvent::Last),
        (_, KeyCode::Char(c @ '1'..='9')) => c.to_digit(10).map(|d| TuiEvent::Digit(d as u8)),
        (_, KeyCode::Char('a')) => Some(TuiEvent::AddSlide),
        (_, KeyCode::Char('e')) => Some(TuiEvent::ToggleEnabled),
        (_, KeyCode::Char('x')) => Some(TuiEvent::ToggleLock),
        (_, KeyCode::Char('q') | KeyCode::Esc) => Some(TuiEvent::Quit),
        _ => None,
    }
}
