//! # Slide Registry
//!
//! Owns the slide contents in original order and hands out their logical
//! indices. Ids come from an [`IdSequence`] owned by the registry, so two
//! carousels never share a counter.
//!
//! A looped carousel with exactly two slides cannot show a neighbor on both
//! sides of the selection, so the registry duplicates both slides at
//! construction (`A B` becomes `A B A' B'`). Duplicates remember which
//! original they copy and are dropped again by [`SlideRegistry::into_contents`].

use std::fmt;

use log::debug;

use crate::core::index::LogicalIndex;

/// Per-instance id of a slide, e.g. `slide-3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlideId(String);

impl SlideId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instance-scoped id generator.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: String,
    next: u64,
}

impl IdSequence {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn next_id(&mut self) -> SlideId {
        let id = SlideId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new("slide")
    }
}

#[derive(Debug, Clone)]
pub struct Slide<T> {
    pub id: SlideId,
    pub logical_index: LogicalIndex,
    /// Set on bidirectional copies: the slide this one mirrors.
    pub duplicate_of: Option<LogicalIndex>,
    pub content: T,
}

impl<T> Slide<T> {
    pub fn is_duplicate(&self) -> bool {
        self.duplicate_of.is_some()
    }
}

#[derive(Debug)]
pub struct SlideRegistry<T> {
    slides: Vec<Slide<T>>,
    ids: IdSequence,
}

impl<T: Clone> SlideRegistry<T> {
    pub fn new(contents: Vec<T>, mut ids: IdSequence) -> Self {
        let slides = contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| Slide {
                id: ids.next_id(),
                logical_index: LogicalIndex(i),
                duplicate_of: None,
                content,
            })
            .collect();
        Self { slides, ids }
    }

    /// Duplicates a two-slide set so each slide has a twin. No-op for any
    /// other size or when already duplicated.
    pub fn expand_bidirectional(&mut self) -> bool {
        if self.slides.len() != 2 || self.has_duplicates() {
            return false;
        }
        let twins: Vec<Slide<T>> = self
            .slides
            .iter()
            .map(|original| Slide {
                id: self.ids.next_id(),
                logical_index: LogicalIndex(original.logical_index.0 + 2),
                duplicate_of: Some(original.logical_index),
                content: original.content.clone(),
            })
            .collect();
        self.slides.extend(twins);
        debug!("registry: duplicated two slides for bidirectional looping");
        true
    }
}

impl<T> SlideRegistry<T> {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn has_duplicates(&self) -> bool {
        self.slides.iter().any(Slide::is_duplicate)
    }

    /// Count of slides that are not bidirectional copies.
    pub fn original_count(&self) -> usize {
        self.slides.iter().filter(|s| !s.is_duplicate()).count()
    }

    pub fn get(&self, index: LogicalIndex) -> Option<&Slide<T>> {
        self.slides.get(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide<T>> {
        self.slides.iter()
    }

    /// The original slide a logical index stands for.
    pub fn original_index(&self, index: LogicalIndex) -> LogicalIndex {
        self.get(index)
            .and_then(|slide| slide.duplicate_of)
            .unwrap_or(index)
    }

    /// Removes bidirectional copies, returning how many were dropped.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.slides.len();
        self.slides.retain(|slide| !slide.is_duplicate());
        let removed = before - self.slides.len();
        if removed > 0 {
            debug!("registry: removed {} duplicated slides", removed);
        }
        removed
    }

    /// Appends a slide with the next logical index.
    pub fn push(&mut self, content: T) -> LogicalIndex {
        let index = LogicalIndex(self.slides.len());
        self.slides.push(Slide {
            id: self.ids.next_id(),
            logical_index: index,
            duplicate_of: None,
            content,
        });
        index
    }

    /// Consumes the registry, returning the original contents in order.
    pub fn into_contents(mut self) -> Vec<T> {
        self.remove_duplicates();
        self.slides.into_iter().map(|slide| slide.content).collect()
    }
}
