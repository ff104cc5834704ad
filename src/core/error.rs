use std::fmt;

/// Reasons a carousel cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselError {
    /// The slide container is empty; there is nothing to navigate.
    NoSlides,
    /// An option holds a value the engine cannot work with.
    InvalidOption { name: &'static str, reason: String },
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselError::NoSlides => write!(f, "carousel needs at least one slide"),
            CarouselError::InvalidOption { name, reason } => {
                write!(f, "invalid carousel option `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for CarouselError {}
