//! # TUI Components
//!
//! All UI components for the terminal interface. Each one is stateless and
//! props-based: it receives everything it draws as struct fields, which
//! keeps dependencies explicit and makes every component testable with
//! ratatui's `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (deck title, status, mode flags)
//! ├── track_view.rs   (the visible slice of the slide track)
//! └── pagination.rs   (one dot per slide)
//! ```

mod pagination;
mod title_bar;
mod track_view;

pub use pagination::Pagination;
pub use title_bar::{ModeFlags, TitleBar};
pub use track_view::{SlotView, TrackView};
