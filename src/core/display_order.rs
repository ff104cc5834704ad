//! # Display Order Model
//!
//! A mutable permutation of logical indices describing which slide sits in
//! which slot. It changes independently of the selection: looping and
//! jumping rearrange slides, selecting one does not.
//!
//! Every mutation returns the [`Relocation`]s a renderer must apply, in
//! order, to move its elements from the old arrangement to the new one.
//! Each relocation is "place `slide` immediately before `before`", or
//! "append" when `before` is `None`.

use log::debug;

use crate::core::index::{DisplayPosition, LogicalIndex};

/// Instruction for a renderer that mirrors the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub slide: LogicalIndex,
    pub before: Option<LogicalIndex>,
}

/// Applies a relocation to a plain element list. Renderers that keep their
/// own element order can use this directly.
pub fn apply_relocation(elements: &mut Vec<LogicalIndex>, relocation: Relocation) {
    if let Some(from) = elements.iter().position(|&e| e == relocation.slide) {
        elements.remove(from);
    }
    let at = relocation
        .before
        .and_then(|anchor| elements.iter().position(|&e| e == anchor))
        .unwrap_or(elements.len());
    elements.insert(at, relocation.slide);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOrder {
    slots: Vec<LogicalIndex>,
}

impl DisplayOrder {
    pub fn identity(len: usize) -> Self {
        Self {
            slots: (0..len).map(LogicalIndex).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[LogicalIndex] {
        &self.slots
    }

    pub fn try_position_of(&self, index: LogicalIndex) -> Option<DisplayPosition> {
        self.slots
            .iter()
            .position(|&slot| slot == index)
            .map(DisplayPosition)
    }

    /// Slot currently holding `index`.
    ///
    /// Asking for an index that is not in the carousel is a programmer error.
    pub fn position_of(&self, index: LogicalIndex) -> DisplayPosition {
        match self.try_position_of(index) {
            Some(position) => position,
            None => {
                debug_assert!(false, "logical index {index} is not in the display order");
                DisplayPosition(0)
            }
        }
    }

    pub fn try_logical_at(&self, position: DisplayPosition) -> Option<LogicalIndex> {
        self.slots.get(position.0).copied()
    }

    /// Slide occupying `position`.
    pub fn logical_at(&self, position: DisplayPosition) -> LogicalIndex {
        match self.try_logical_at(position) {
            Some(index) => index,
            None => {
                debug_assert!(false, "display position {position} is out of bounds");
                LogicalIndex(0)
            }
        }
    }

    pub fn is_identity(&self) -> bool {
        self.slots.iter().enumerate().all(|(i, slot)| slot.0 == i)
    }

    /// True when every logical index in `0..len` appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.slots.len()];
        for slot in &self.slots {
            match seen.get_mut(slot.0) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }

    /// Removes `index` from its slot and reinserts it at `target`, clamped to
    /// the valid range.
    pub fn move_to_position(&mut self, index: LogicalIndex, target: usize) -> Vec<Relocation> {
        let Some(from) = self.try_position_of(index) else {
            debug_assert!(false, "cannot move unknown slide {index}");
            return Vec::new();
        };
        let target = target.min(self.slots.len().saturating_sub(1));
        if from.0 == target {
            return Vec::new();
        }
        self.slots.remove(from.0);
        self.slots.insert(target, index);
        debug!("display order: moved {} {} -> @{}", index, from, target);
        debug_assert!(self.is_permutation());

        vec![self.relocation_at(target)]
    }

    /// Exchanges the slots of two slides.
    pub fn swap(&mut self, a: LogicalIndex, b: LogicalIndex) -> Vec<Relocation> {
        let (Some(pa), Some(pb)) = (self.try_position_of(a), self.try_position_of(b)) else {
            debug_assert!(false, "cannot swap unknown slides {a} and {b}");
            return Vec::new();
        };
        if pa == pb {
            return Vec::new();
        }
        self.slots.swap(pa.0, pb.0);
        debug!("display order: swapped {} {} <-> {} {}", a, pa, b, pb);
        debug_assert!(self.is_permutation());

        // Right element first, anchored to its final successor; the left
        // one then lands in front of whatever now follows its slot.
        let (low, high) = if pa < pb { (pa.0, pb.0) } else { (pb.0, pa.0) };
        vec![self.relocation_at(high), self.relocation_at(low)]
    }

    /// Resets to `[0, 1, .., len-1]`.
    pub fn to_identity(&mut self) -> Vec<Relocation> {
        let Some(first_changed) = self.slots.iter().enumerate().position(|(i, slot)| slot.0 != i)
        else {
            return Vec::new();
        };
        self.slots = (0..self.slots.len()).map(LogicalIndex).collect();
        debug!("display order: reset to identity from @{}", first_changed);

        // Rebuild the suffix right to left: each slide goes in front of its
        // final successor, so after step k the renderer's tail matches.
        (first_changed..self.slots.len())
            .rev()
            .map(|position| self.relocation_at(position))
            .collect()
    }

    fn relocation_at(&self, position: usize) -> Relocation {
        Relocation {
            slide: self.slots[position],
            before: self.slots.get(position + 1).copied(),
        }
    }
}
