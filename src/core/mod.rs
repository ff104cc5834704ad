//! # Core Application Logic
//!
//! The carousel engine and the viewer's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │            CORE             │
//!                    │        (this module)        │
//!                    │                             │
//!                    │  • Carousel (navigation)    │
//!                    │  • State (app data)         │
//!                    │  • Action (events)          │
//!                    │  • update() (reducer)       │
//!                    │                             │
//!                    │  No I/O besides config.     │
//!                    └──────────────┬──────────────┘
//!                                   │ Renderer trait
//!                    ┌──────────────┴──────────────┐
//!                    ▼                             ▼
//!             ┌────────────┐                ┌────────────┐
//!             │    TUI     │                │   Tests    │
//!             │  Adapter   │                │ (recording │
//!             │ (ratatui)  │                │  renderer) │
//!             └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`index`]: logical/display index newtypes, wrap and clamp
//! - [`display_order`]: the slot permutation and its relocations
//! - [`neighbors`]: circular neighbor placement for looped carousels
//! - [`registry`]: slide storage, ids, bidirectional duplication
//! - [`carousel`]: the navigation state machine
//! - [`drag`]: what a released drag means
//! - [`events`]: `will_navigate` / `slide_start` / `slide_end` listeners
//! - [`renderer`]: the seam the adapter implements
//! - [`config`]: file, env, and CLI settings
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app

pub mod action;
pub mod carousel;
pub mod config;
pub mod display_order;
pub mod drag;
pub mod error;
pub mod events;
pub mod index;
pub mod neighbors;
pub mod registry;
pub mod renderer;
pub mod state;

// Re-export commonly used types for convenience
pub use carousel::{Carousel, CarouselOptions, Navigation, Rejection, TransitionState};
pub use error::CarouselError;
pub use index::{DisplayPosition, LogicalIndex};
pub use renderer::{Renderer, TransitionHandle};
