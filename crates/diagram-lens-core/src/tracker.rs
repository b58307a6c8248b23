#![forbid(unsafe_code)]

//! Element tracking: discovery and (re-)attachment across external re-renders.
//!
//! The external renderer owns every container's subtree. It may insert the
//! visual late, replace it at any time, and strip controls it did not author.
//! The tracker's job is to converge back to "controls present" after each of
//! those events without ever installing anything twice.
//!
//! # Lifecycle
//!
//! - [`scan`](ElementTracker::scan) observes each new container exactly once:
//!   it assigns a [`ContainerId`], subscribes to its subtree, and attaches
//!   immediately when a visual is already present.
//! - [`refresh`](ElementTracker::refresh) runs on every subtree notification
//!   and re-attaches whatever is missing once a visual is present.
//! - Containers that left the document are pruned on the next scan; dropping
//!   their subscription unsubscribes.
//!
//! # Invariants
//!
//! 1. At most one observation (and one subscription) per container.
//! 2. At most one wheel listener per container lifetime; it binds to the
//!    container, so visual replacement never re-binds it.
//! 3. A container with a foreign zoom control gets none of our controls nor
//!    the wheel listener.

use crate::host::{ControlKind, Document};
use crate::logging::debug;
use crate::store::ContainerId;

#[derive(Debug)]
struct Tracked<C, S> {
    container: C,
    id: ContainerId,
    wheel_bound: bool,
    _subscription: S,
}

/// Outcome of one [`scan`](ElementTracker::scan).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Containers observed for the first time.
    pub observed: Vec<ContainerId>,
    /// Newly observed containers that already held a visual and were attached.
    pub attached: Vec<ContainerId>,
    /// Containers dropped because they left the document.
    pub pruned: Vec<ContainerId>,
}

/// Tracks observed containers for one document.
#[derive(Debug)]
pub struct ElementTracker<C, S> {
    tracked: Vec<Tracked<C, S>>,
    next_id: u32,
}

impl<C, S> Default for ElementTracker<C, S> {
    fn default() -> Self {
        Self {
            tracked: Vec::new(),
            next_id: 1,
        }
    }
}

impl<C: Clone + PartialEq, S> ElementTracker<C, S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe every container not yet tracked and prune departed ones.
    pub fn scan<D>(&mut self, host: &mut D) -> ScanReport
    where
        D: Document<Container = C, Subscription = S>,
    {
        let mut report = ScanReport::default();

        self.tracked.retain(|t| {
            let keep = host.is_connected(&t.container);
            if !keep {
                debug!(container = %t.id, "container left the document");
                report.pruned.push(t.id);
            }
            keep
        });
        for &id in &report.pruned {
            host.release_container(id);
        }

        for container in host.find_containers() {
            if self.id_of(&container).is_some() {
                continue;
            }
            let id = self.observe(host, container);
            report.observed.push(id);
            if self.refresh(host, id) {
                report.attached.push(id);
            }
        }

        report
    }

    fn observe<D>(&mut self, host: &mut D, container: C) -> ContainerId
    where
        D: Document<Container = C, Subscription = S>,
    {
        let id = ContainerId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let subscription = host.observe_subtree(&container, id);
        debug!(container = %id, "observing container");
        self.tracked.push(Tracked {
            container,
            id,
            wheel_bound: false,
            _subscription: subscription,
        });
        id
    }

    /// React to a subtree change: attach whatever is missing when the visual
    /// is present. Returns whether the container is attached (the caller
    /// should then re-apply its stored zoom state).
    pub fn refresh<D>(&mut self, host: &mut D, id: ContainerId) -> bool
    where
        D: Document<Container = C, Subscription = S>,
    {
        let Some(tracked) = self.tracked.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if !host.has_visual(&tracked.container) {
            return false;
        }
        if host.has_foreign_control(&tracked.container) {
            debug!(container = %id, "foreign zoom control present; skipping");
            return false;
        }

        if !host.has_control(&tracked.container, ControlKind::Expand) {
            host.install_control(&tracked.container, ControlKind::Expand, id);
        }
        if !tracked.wheel_bound {
            host.install_wheel_listener(&tracked.container, id);
            tracked.wheel_bound = true;
        }
        if !host.has_control(&tracked.container, ControlKind::Reset) {
            host.install_control(&tracked.container, ControlKind::Reset, id);
        }
        true
    }

    /// Live handle for `id`.
    #[must_use]
    pub fn container(&self, id: ContainerId) -> Option<&C> {
        self.tracked.iter().find(|t| t.id == id).map(|t| &t.container)
    }

    /// Id assigned to `container`, if it is tracked.
    #[must_use]
    pub fn id_of(&self, container: &C) -> Option<ContainerId> {
        self.tracked
            .iter()
            .find(|t| t.container == *container)
            .map(|t| t.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Stop tracking everything, releasing every subscription and host
    /// binding. Returns the ids that were dropped.
    pub fn clear<D>(&mut self, host: &mut D) -> Vec<ContainerId>
    where
        D: Document<Container = C, Subscription = S>,
    {
        let ids: Vec<ContainerId> = self.tracked.drain(..).map(|t| t.id).collect();
        for &id in &ids {
            host.release_container(id);
        }
        ids
    }
}
