//! # Neighbor Placement
//!
//! A looped carousel only looks endless if the slides logically next to the
//! selection are also spatially next to it. After the last slide comes the
//! first, so with the first slide selected the last one has to sit to its
//! left, even though it is at the far end of content order.
//!
//! [`place_neighbors`] moves the `count` circular neighbors on each side of
//! the selection into the slots directly around it, touching nothing that is
//! already in place.

use log::debug;

use crate::core::display_order::{DisplayOrder, Relocation};
use crate::core::index::{DisplayPosition, IndexResolver, LogicalIndex};

/// Which side of the selection a neighbor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Previous,
    Next,
}

impl Side {
    fn sign(self) -> isize {
        match self {
            Side::Previous => -1,
            Side::Next => 1,
        }
    }
}

/// Largest neighbor count both sides can satisfy without wanting the same
/// slide.
pub fn effective_count(requested: usize, slide_count: usize) -> usize {
    requested.min(slide_count.saturating_sub(1) / 2)
}

/// Arranges the circular neighbors of `selected` around it and returns the
/// relocations performed, in order.
pub fn place_neighbors(
    order: &mut DisplayOrder,
    resolver: &IndexResolver,
    selected: LogicalIndex,
    requested: usize,
) -> Vec<Relocation> {
    let count = effective_count(requested, order.len());
    let mut relocations = Vec::new();

    for side in [Side::Previous, Side::Next] {
        for i in 0..count {
            let offset = side.sign() * (i as isize + 1);
            let wanted = resolver.circular_neighbor(selected, offset);
            let selected_at = order.position_of(selected).0 as isize;
            let expected = selected_at + offset;

            let occupant = usize::try_from(expected)
                .ok()
                .and_then(|slot| order.try_logical_at(DisplayPosition(slot)));
            if occupant == Some(wanted) {
                continue;
            }

            // Insertion slot is measured once the neighbor is lifted out.
            let wanted_at = order.position_of(wanted).0 as isize;
            let selected_after_removal = if wanted_at < selected_at {
                selected_at - 1
            } else {
                selected_at
            };
            let target = match side {
                Side::Next => selected_after_removal + i as isize + 1,
                Side::Previous => selected_after_removal - i as isize,
            };

            debug!(
                "neighbors: {:?} #{} of {} is {}, anchor {:?}, inserting at @{}",
                side,
                i + 1,
                selected,
                wanted,
                occupant,
                target
            );
            relocations.extend(order.move_to_position(wanted, target.max(0) as usize));
        }
    }

    relocations
}

/// True when every required neighbor already flanks `selected`.
pub fn neighbors_in_place(
    order: &DisplayOrder,
    resolver: &IndexResolver,
    selected: LogicalIndex,
    requested: usize,
) -> bool {
    let count = effective_count(requested, order.len()) as isize;
    let selected_at = order.position_of(selected).0 as isize;
    (1..=count).all(|step| {
        [-step, step].into_iter().all(|offset| {
            usize::try_from(selected_at + offset)
                .ok()
                .and_then(|slot| order.try_logical_at(DisplayPosition(slot)))
                == Some(resolver.circular_neighbor(selected, offset))
        })
    })
}
