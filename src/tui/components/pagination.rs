//! # Pagination Component
//!
//! A row of dots under the track, one per slide the user supplied. Copies
//! made for two-slide looping light up the dot of the slide they mirror.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const ACTIVE_DOT: &str = "●";
pub const INACTIVE_DOT: &str = "○";

pub struct Pagination {
    pub count: usize,
    pub selected: usize,
}

impl Component for Pagination {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::with_capacity(self.count * 2);
        for i in 0..self.count {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if i == self.selected {
                spans.push(Span::styled(ACTIVE_DOT, Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::styled(INACTIVE_DOT, Style::default().fg(Color::DarkGray)));
            }
        }
        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
