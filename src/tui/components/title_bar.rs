//! # TitleBar Component
//!
//! Top status bar showing the deck, the status message, and which carousel
//! modes are on.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.deck_title.clone(), app.status_message.clone(), flags);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Flags and status**: `"Holiday | Slide 2 of 5 | loop jump locked"`
//! 2. **Status only**: `"Holiday | Slide 2 of 5"`
//! 3. **Default**: `"Holiday"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Modes shown at the end of the title bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub looped: bool,
    pub jump: bool,
    pub fade: bool,
    pub locked: bool,
    pub disabled: bool,
}

impl ModeFlags {
    fn labels(&self) -> Vec<&'static str> {
        [
            (self.looped, "loop"),
            (self.jump, "jump"),
            (self.fade, "fade"),
            (self.locked, "locked"),
            (self.disabled, "disabled"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

pub struct TitleBar {
    pub deck_title: String,
    pub status_message: String,
    pub flags: ModeFlags,
}

impl TitleBar {
    pub fn new(deck_title: String, status_message: String, flags: ModeFlags) -> Self {
        Self {
            deck_title,
            status_message,
            flags,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.deck_title.clone(),
            Style::default().fg(Color::Cyan),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        let labels = self.flags.labels();
        if !labels.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", labels.join(" ")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_flags() {
        let flags = ModeFlags {
            looped: true,
            locked: true,
            ..Default::default()
        };
        let mut title_bar = TitleBar::new("Holiday".to_string(), "Slide 2 of 5".to_string(), flags);
        let text = render(&mut title_bar);

        assert!(text.contains("Holiday"));
        assert!(text.contains("Slide 2 of 5"));
        assert!(text.contains("loop locked"));
        assert!(!text.contains("jump"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("Holiday".to_string(), "".to_string(), ModeFlags::default());
        let text = render(&mut title_bar);

        assert!(text.contains("Holiday"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_props_are_mutable() {
        let mut title_bar = TitleBar::new("Deck".to_string(), "".to_string(), ModeFlags::default());
        title_bar.status_message = "Locked".to_string();
        title_bar.flags.disabled = true;

        let text = render(&mut title_bar);
        assert!(text.contains("Deck | Locked | disabled"));
    }
}
