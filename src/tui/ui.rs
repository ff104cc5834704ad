use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ModeFlags, Pagination, SlotView, TitleBar, TrackView};
use crate::tui::track::TrackRenderer;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const HELP: &str = "←/→ move  1-9 jump  Home/End  a add  e enable  x lock  q quit";

pub fn draw_ui(frame: &mut Frame, app: &mut App<TrackRenderer>) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(3), Length(1), Length(1)]);
    let [title_area, track_area, dots_area, help_area] = layout.areas(frame.area());

    // Slide sizes follow the terminal width
    app.carousel.renderer_mut().set_viewport(track_area.width);

    let options = app.carousel.options();
    let flags = ModeFlags {
        looped: options.looped,
        jump: options.jump,
        fade: options.fade,
        locked: app.is_locked(),
        disabled: !app.carousel.is_enabled(),
    };
    TitleBar::new(app.deck_title.clone(), app.status_message.clone(), flags)
        .render(frame, title_area);

    let carousel = &app.carousel;
    let renderer = carousel.renderer();
    let selected = carousel.selected_index();
    let slots = renderer
        .visible_slots()
        .into_iter()
        .filter_map(|(index, _, start)| {
            let slide = carousel.slide(index)?;
            Some(SlotView {
                start,
                slide: &slide.content,
                number: carousel.original_index(index).get() + 1,
                selected: index == selected,
            })
        })
        .collect();
    TrackView {
        slots,
        slide_width: renderer.slide_width(),
        fade_progress: renderer.fade_progress(),
    }
    .render(frame, track_area);

    Pagination {
        count: carousel.original_count(),
        selected: carousel.original_index(selected).get(),
    }
    .render(frame, dots_area);

    frame.render_widget(
        Span::styled(HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
