//! Per-kind element id allocation.

use std::collections::HashMap;

use labelkit_core::ElementKind;

/// Hands out element ids, one independent counter per [`ElementKind`].
///
/// Ids start at 1. After a document load, [`IdAllocator::reseed`] moves each
/// counter past the largest id seen for that kind.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: HashMap<ElementKind, u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `kind`.
    pub fn next(&mut self, kind: ElementKind) -> u32 {
        let slot = self.next.entry(kind).or_insert(1);
        let id = *slot;
        *slot = slot.saturating_add(1);
        id
    }

    /// Id the next call to `next(kind)` would return.
    pub fn peek(&self, kind: ElementKind) -> u32 {
        self.next.get(&kind).copied().unwrap_or(1)
    }

    /// Reset every counter, then set each to `max(observed id) + 1` for its kind.
    ///
    /// Kinds with no observed ids start again at 1.
    pub fn reseed<I>(&mut self, observed: I)
    where
        I: IntoIterator<Item = (ElementKind, u32)>,
    {
        self.next.clear();
        for (kind, id) in observed {
            let candidate = id.saturating_add(1);
            let slot = self.next.entry(kind).or_insert(candidate);
            *slot = (*slot).max(candidate);
        }
    }

    /// Forget every counter.
    pub fn reset(&mut self) {
        self.next.clear();
    }
}
