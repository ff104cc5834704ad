//! # Index Resolver
//!
//! Two index spaces live side by side in a carousel:
//!
//! - [`LogicalIndex`]: a slide's stable identity, assigned once in content order.
//! - [`DisplayPosition`]: a slot in the current spatial arrangement.
//!
//! They are separate types so one can never be passed where the other is
//! expected. Conversions between them go through [`DisplayOrder`].
//!
//! Navigation requests carry a raw signed index (`isize`) because "previous
//! of slide 0" is `-1` until it is wrapped or clamped by [`IndexResolver`].
//!
//! [`DisplayOrder`]: crate::core::display_order::DisplayOrder

use std::fmt;

use crate::core::display_order::DisplayOrder;

/// Stable identity of a slide within its carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalIndex(pub usize);

impl LogicalIndex {
    pub fn get(self) -> usize {
        self.0
    }

    /// Signed form, for arithmetic that may step below zero before wrapping.
    pub fn signed(self) -> isize {
        self.0 as isize
    }
}

impl fmt::Display for LogicalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A slot within the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DisplayPosition(pub usize);

impl DisplayPosition {
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of slots between two positions.
    pub fn distance(self, other: DisplayPosition) -> usize {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for DisplayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Circular index arithmetic: `(index + displacement) mod length`, always in
/// `0..length` for any displacement.
///
/// `length` must be non-zero.
pub fn wrap(index: isize, displacement: isize, length: usize) -> usize {
    debug_assert!(length > 0, "wrap over an empty range");
    let length = length as isize;
    (index + displacement).rem_euclid(length) as usize
}

/// Resolves raw navigation targets against a slide count and looping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexResolver {
    pub slide_count: usize,
    pub looped: bool,
}

impl IndexResolver {
    pub fn new(slide_count: usize, looped: bool) -> Self {
        Self {
            slide_count,
            looped,
        }
    }

    pub fn is_out_of_range(&self, index: isize) -> bool {
        index <= -1 || index >= self.slide_count as isize
    }

    /// Maps any raw index into `0..slide_count`: wrapping when looped,
    /// clamping otherwise.
    pub fn safe_index(&self, index: isize) -> LogicalIndex {
        if self.slide_count == 0 {
            return LogicalIndex(0);
        }
        if !self.is_out_of_range(index) {
            return LogicalIndex(index as usize);
        }
        if self.looped {
            LogicalIndex(wrap(index, 0, self.slide_count))
        } else {
            LogicalIndex(index.clamp(0, self.slide_count as isize - 1) as usize)
        }
    }

    /// Logical index `offset` steps away from `from`, wrapping around.
    pub fn circular_neighbor(&self, from: LogicalIndex, offset: isize) -> LogicalIndex {
        LogicalIndex(wrap(from.signed(), offset, self.slide_count))
    }

    pub fn to_display_position(&self, order: &DisplayOrder, index: LogicalIndex) -> DisplayPosition {
        order.position_of(index)
    }

    pub fn to_logical_index(&self, order: &DisplayOrder, position: DisplayPosition) -> LogicalIndex {
        order.logical_at(position)
    }
}
