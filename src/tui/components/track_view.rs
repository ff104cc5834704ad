//! # TrackView Component
//!
//! Draws the visible part of the slide track. Each slot arrives with its
//! rendered start column relative to the track area; cards that hang off an
//! edge are drawn into a scratch buffer and copied column by column, so a
//! half-visible card looks like the left or right half of a whole card.

use crate::core::config::SlideEntry;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

/// One card on the track.
pub struct SlotView<'a> {
    /// Rendered start column, relative to the track area. May be negative.
    pub start: i32,
    pub slide: &'a SlideEntry,
    /// One-based number the user knows the slide by.
    pub number: usize,
    pub selected: bool,
}

pub struct TrackView<'a> {
    pub slots: Vec<SlotView<'a>>,
    pub slide_width: u16,
    /// Cross-fade progress of the selected card, when fading.
    pub fade_progress: Option<f32>,
}

impl Component for TrackView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for slot in &self.slots {
            let dim = slot.selected && self.fade_progress.is_some_and(|p| p < 0.5);
            let card = render_card(slot, self.slide_width, area.height, dim);
            blit(frame.buffer_mut(), &card, area, slot.start);
        }
    }
}

fn render_card(slot: &SlotView<'_>, width: u16, height: u16, dim: bool) -> Buffer {
    let card_area = Rect::new(0, 0, width, height);
    let mut card = Buffer::empty(card_area);

    let border = if slot.selected { Color::Cyan } else { Color::DarkGray };
    let mut text_style = Style::default();
    if dim {
        text_style = text_style.add_modifier(Modifier::DIM);
    }

    let title = fit_to_width(
        &format!(" {} · {} ", slot.number, slot.slide.title),
        usize::from(width.saturating_sub(2)),
    );
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(border));
    let inner = block.inner(card_area);
    block.render(card_area, &mut card);

    let lines: Vec<Line> = wrap_body(&slot.slide.body, inner.width)
        .into_iter()
        .map(Line::from)
        .collect();
    Paragraph::new(lines).style(text_style).render(inner, &mut card);
    card
}

/// Copies the columns of `card` that fall inside `area`.
fn blit(target: &mut Buffer, card: &Buffer, area: Rect, start: i32) {
    let card_area = card.area;
    for cy in 0..card_area.height.min(area.height) {
        for cx in 0..card_area.width {
            let x = i32::from(area.x) + start + i32::from(cx);
            if x < i32::from(area.x) || x >= i32::from(area.right()) {
                continue;
            }
            let Ok(x) = u16::try_from(x) else {
                continue;
            };
            target[(x, area.y + cy)] = card[(cx, cy)].clone();
        }
    }
}

pub fn wrap_body(body: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    textwrap::wrap(body, usize::from(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Truncates `text` to `max` display columns, ending in `…` when cut.
pub fn fit_to_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
