//! # Poset Registry
//!
//! Owns every live poset, keyed by `PosetHandle`.
//!
//! The registry is an ordinary value: callers create one, pass it by
//! reference, and drop it when done. Handles come from a counter it owns;
//! they start at 1 and are never reused after `destroy`.
//!
//! Every operation on an unknown handle is a quiet failure: `false`, `0`,
//! or a no-op, matching the boolean contract of `Poset`.

use crate::poset::Poset;
use crate::{PosetError, PosetHandle};
use std::collections::BTreeMap;

// =============================================================================
// LOGGING HELPERS
// =============================================================================

/// What a mutating call was applied to.
#[derive(Debug, Clone, Copy)]
enum Subject<'a> {
    Element(&'a str),
    Pair(&'a str, &'a str),
}

/// Log the outcome of a mutating call and pass the result through.
///
/// Successes go out at `debug`, rejections at `trace` with their reason.
#[inline]
fn log_outcome<T>(
    op: &'static str,
    handle: PosetHandle,
    subject: Subject<'_>,
    result: Result<T, PosetError>,
) -> Result<T, PosetError> {
    let handle = handle.value();
    match (&result, subject) {
        (Ok(_), Subject::Element(element)) => {
            tracing::debug!(op = op, handle = handle, element = element, "applied");
        }
        (Ok(_), Subject::Pair(from, to)) => {
            tracing::debug!(op = op, handle = handle, from = from, to = to, "applied");
        }
        (Err(e), Subject::Element(element)) => {
            tracing::trace!(op = op, handle = handle, element = element, reason = %e, "rejected");
        }
        (Err(e), Subject::Pair(from, to)) => {
            tracing::trace!(op = op, handle = handle, from = from, to = to, reason = %e, "rejected");
        }
    }
    result
}

/// Collection of posets addressed by opaque handles.
#[derive(Debug, Default)]
pub struct Registry {
    posets: BTreeMap<PosetHandle, Poset>,

    /// Last handle issued; 0 before the first `create`.
    last_handle: u64,
}

impl Registry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh handle bound to an empty poset.
    pub fn create(&mut self) -> PosetHandle {
        self.last_handle = self.last_handle.saturating_add(1);
        let handle = PosetHandle(self.last_handle);
        self.posets.insert(handle, Poset::new());
        tracing::debug!(handle = handle.value(), "poset created");
        handle
    }

    /// Drop the poset bound to `handle`. Returns `false` if there was none.
    pub fn destroy(&mut self, handle: PosetHandle) -> bool {
        let existed = self.posets.remove(&handle).is_some();
        if existed {
            tracing::debug!(handle = handle.value(), "poset destroyed");
        }
        existed
    }

    /// Get the poset bound to `handle`.
    #[must_use]
    pub fn get(&self, handle: PosetHandle) -> Option<&Poset> {
        self.posets.get(&handle)
    }

    /// Get the poset bound to `handle` for mutation.
    pub fn get_mut(&mut self, handle: PosetHandle) -> Option<&mut Poset> {
        self.posets.get_mut(&handle)
    }

    /// Number of live posets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posets.len()
    }

    /// Check if no poset is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posets.is_empty()
    }

    /// Live handles in ascending order.
    pub fn handles(&self) -> impl Iterator<Item = PosetHandle> + '_ {
        self.posets.keys().copied()
    }

    /// Element count of the poset, or 0 for an unknown handle.
    #[must_use]
    pub fn size(&self, handle: PosetHandle) -> usize {
        self.get(handle).map_or(0, Poset::size)
    }

    /// Remove every element of the poset. No-op for an unknown handle.
    pub fn clear(&mut self, handle: PosetHandle) {
        if let Some(poset) = self.get_mut(handle) {
            poset.clear();
            tracing::debug!(handle = handle.value(), "poset cleared");
        }
    }

    // -------------------------------------------------------------------------
    // Fallible forms
    // -------------------------------------------------------------------------

    /// Insert `name` into the poset, reporting why it was refused.
    pub fn try_insert(&mut self, handle: PosetHandle, name: &str) -> Result<(), PosetError> {
        let result = self.poset_mut(handle).and_then(|p| p.try_insert(name));
        log_outcome("insert", handle, Subject::Element(name), result).map(|_| ())
    }

    /// Remove `name` and every relation touching it.
    pub fn try_remove(&mut self, handle: PosetHandle, name: &str) -> Result<(), PosetError> {
        let result = self.poset_mut(handle).and_then(|p| p.try_remove(name));
        log_outcome("remove", handle, Subject::Element(name), result).map(|_| ())
    }

    /// Make `first` precede `second`, closing the order transitively.
    pub fn try_add(
        &mut self,
        handle: PosetHandle,
        first: &str,
        second: &str,
    ) -> Result<(), PosetError> {
        let result = self.poset_mut(handle).and_then(|p| p.try_add(first, second));
        log_outcome("add", handle, Subject::Pair(first, second), result)
    }

    /// Drop the covering relation `first -> second`.
    pub fn try_del(
        &mut self,
        handle: PosetHandle,
        first: &str,
        second: &str,
    ) -> Result<(), PosetError> {
        let result = self.poset_mut(handle).and_then(|p| p.try_del(first, second));
        log_outcome("del", handle, Subject::Pair(first, second), result)
    }

    /// Whether `first` precedes or equals `second`, or why it cannot be asked.
    pub fn try_test(
        &self,
        handle: PosetHandle,
        first: &str,
        second: &str,
    ) -> Result<bool, PosetError> {
        self.get(handle)
            .ok_or(PosetError::UnknownHandle(handle))
            .and_then(|p| p.try_test(first, second))
    }

    // -------------------------------------------------------------------------
    // Boolean forms
    // -------------------------------------------------------------------------

    /// Boolean form of `try_insert`.
    pub fn insert(&mut self, handle: PosetHandle, name: &str) -> bool {
        self.try_insert(handle, name).is_ok()
    }

    /// Boolean form of `try_remove`.
    pub fn remove(&mut self, handle: PosetHandle, name: &str) -> bool {
        self.try_remove(handle, name).is_ok()
    }

    /// Boolean form of `try_add`.
    pub fn add(&mut self, handle: PosetHandle, first: &str, second: &str) -> bool {
        self.try_add(handle, first, second).is_ok()
    }

    /// Boolean form of `try_del`.
    pub fn del(&mut self, handle: PosetHandle, first: &str, second: &str) -> bool {
        self.try_del(handle, first, second).is_ok()
    }

    /// True iff both names are present and `first` precedes or equals `second`.
    #[must_use]
    pub fn test(&self, handle: PosetHandle, first: &str, second: &str) -> bool {
        matches!(self.try_test(handle, first, second), Ok(true))
    }

    fn poset_mut(&mut self, handle: PosetHandle) -> Result<&mut Poset, PosetError> {
        self.posets
            .get_mut(&handle)
            .ok_or(PosetError::UnknownHandle(handle))
    }
}

// =============================================================================
// TESTS
// =============================================================================
