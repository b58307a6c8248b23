#![forbid(unsafe_code)]

//! Zoom state storage keyed by container identity.

use std::collections::HashMap;
use std::fmt;

use crate::geometry::ZoomState;

/// Opaque handle for a diagram container.
///
/// Assigned by the element tracker the first time a container is observed
/// and stable for the container's lifetime, however often its visual is
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u32);

impl ContainerId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "diagram#{}", self.0)
    }
}

/// Sole owner of every container's [`ZoomState`].
///
/// A container without an entry is at identity; entries are created lazily on
/// the first flush or reset.
#[derive(Debug, Clone, Default)]
pub struct ZoomStateStore {
    states: HashMap<ContainerId, ZoomState>,
}

impl ZoomStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored state, if any.
    #[must_use]
    pub fn get(&self, id: ContainerId) -> Option<ZoomState> {
        self.states.get(&id).copied()
    }

    /// Stored state, or identity when nothing is stored yet.
    #[must_use]
    pub fn get_or_identity(&self, id: ContainerId) -> ZoomState {
        self.get(id).unwrap_or(ZoomState::IDENTITY)
    }

    pub fn set(&mut self, id: ContainerId, state: ZoomState) {
        self.states.insert(id, state);
    }

    /// Drop the entry for `id`. Returns the removed state.
    pub fn delete(&mut self, id: ContainerId) -> Option<ZoomState> {
        self.states.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_entry_reads_as_identity() {
        let store = ZoomStateStore::new();
        assert_eq!(store.get(ContainerId::new(1)), None);
        assert_eq!(store.get_or_identity(ContainerId::new(1)), ZoomState::IDENTITY);
    }

    #[test]
    fn set_get_delete() {
        let mut store = ZoomStateStore::new();
        let id = ContainerId::new(7);
        let state = ZoomState::new(2.0, -5.0, 3.0);

        store.set(id, state);
        assert_eq!(store.get(id), Some(state));
        assert_eq!(store.len(), 1);

        assert_eq!(store.delete(id), Some(state));
        assert!(store.is_empty());
        assert_eq!(store.delete(id), None);
    }

    #[test]
    fn entries_are_independent() {
        let mut store = ZoomStateStore::new();
        store.set(ContainerId::new(1), ZoomState::new(2.0, 0.0, 0.0));
        store.set(ContainerId::new(2), ZoomState::new(3.0, 1.0, 1.0));
        store.set(ContainerId::new(1), ZoomState::IDENTITY);

        assert_eq!(store.get(ContainerId::new(1)), Some(ZoomState::IDENTITY));
        assert_eq!(
            store.get(ContainerId::new(2)),
            Some(ZoomState::new(3.0, 1.0, 1.0))
        );
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(ContainerId::new(3).to_string(), "diagram#3");
    }
}
