#![forbid(unsafe_code)]

//! Zoom engine: wheel intake, per-frame flush and rendering of zoom state.
//!
//! [`ZoomEngine`] ties together the [`InputAggregator`], the pure geometry in
//! [`crate::geometry`] and the [`ZoomStateStore`], and pushes results onto a
//! [`Surface`]:
//!
//! 1. [`wheel`](ZoomEngine::wheel) accumulates Ctrl+wheel input and requests a
//!    frame when none is pending.
//! 2. [`flush`](ZoomEngine::flush) runs once per frame: it drains the pending
//!    input, computes the next state from the stored baseline, stores it and
//!    paints it.
//! 3. [`reapply`](ZoomEngine::reapply) repaints the stored state after the
//!    visual was replaced.

use crate::geometry::{ZoomState, ZoomTuning};
use crate::host::{Document, Surface};
use crate::input::{Accumulated, InputAggregator, InputTuning, WheelInput};
use crate::logging::{debug, trace};
use crate::store::{ContainerId, ZoomStateStore};

/// What the host should do with the wheel event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Not a zoom gesture; let the page scroll.
    PassThrough,
    /// Consumed for zoom; suppress default scrolling.
    Consumed,
}

impl WheelOutcome {
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Owner of zoom state and pending wheel input for every container.
#[derive(Debug, Clone, Default)]
pub struct ZoomEngine {
    tuning: ZoomTuning,
    aggregator: InputAggregator,
    store: ZoomStateStore,
}

impl ZoomEngine {
    #[must_use]
    pub fn new(tuning: ZoomTuning, input: InputTuning) -> Self {
        Self {
            tuning,
            aggregator: InputAggregator::new(input),
            store: ZoomStateStore::new(),
        }
    }

    #[must_use]
    pub const fn tuning(&self) -> &ZoomTuning {
        &self.tuning
    }

    #[must_use]
    pub const fn store(&self) -> &ZoomStateStore {
        &self.store
    }

    #[must_use]
    pub const fn aggregator(&self) -> &InputAggregator {
        &self.aggregator
    }

    /// Feed one wheel event for the container.
    pub fn wheel<D: Document>(
        &mut self,
        host: &mut D,
        container: &D::Container,
        id: ContainerId,
        input: &WheelInput,
    ) -> WheelOutcome {
        if !input.is_zoom_gesture() {
            return WheelOutcome::PassThrough;
        }

        let page_height = host.container_rect(container).map(|rect| rect.height);
        let notches = self.aggregator.tuning().notches(input, page_height);
        let accumulated = self.aggregator.accumulate(id, notches, input.client);
        trace!(container = %id, notches, ?accumulated, "wheel accumulated");

        if accumulated == Accumulated::ScheduleFrame {
            host.request_frame(id);
        }
        WheelOutcome::Consumed
    }

    /// Apply the container's pending input. Returns the new state, or `None`
    /// when there was nothing to apply.
    pub fn flush<S: Surface>(
        &mut self,
        host: &mut S,
        container: &S::Container,
        id: ContainerId,
    ) -> Option<ZoomState> {
        let pending = self.aggregator.take(id)?;
        if pending.delta_notches == 0.0 {
            return None;
        }

        let rect = host.container_rect(container).unwrap_or_default();
        let cursor = rect.relative(pending.last_cursor);
        let current = self.store.get_or_identity(id);
        let next = self.tuning.next_state(current, pending.delta_notches, cursor);
        debug!(
            container = %id,
            notches = pending.delta_notches,
            scale = next.scale,
            "zoom flushed"
        );

        self.store.set(id, next);
        self.apply(host, container, &next);
        Some(next)
    }

    /// Paint `state` onto the container.
    ///
    /// Clipping and the zoomed marker live on the container and always follow
    /// `state`; only the visual paint is skipped when the visual is absent.
    /// Returns whether the visual was painted.
    pub fn apply<S: Surface>(&self, host: &mut S, container: &S::Container, state: &ZoomState) -> bool {
        let zoomed = !state.is_identity();
        host.set_clipped(container, zoomed);
        host.set_zoomed_marker(container, zoomed);
        host.paint_visual(container, state)
    }

    /// Repaint the stored state, if any, onto a freshly inserted visual.
    pub fn reapply<S: Surface>(&self, host: &mut S, container: &S::Container, id: ContainerId) -> bool {
        match self.store.get(id) {
            Some(state) => self.apply(host, container, &state),
            None => false,
        }
    }

    /// Store and paint identity. Pending input is left for the next frame.
    pub fn reset<S: Surface>(&mut self, host: &mut S, container: &S::Container, id: ContainerId) {
        debug!(container = %id, "zoom reset");
        self.store.set(id, ZoomState::IDENTITY);
        self.apply(host, container, &ZoomState::IDENTITY);
    }

    /// Discard all state for a container that left the document.
    pub fn forget(&mut self, id: ContainerId) {
        self.store.delete(id);
        self.aggregator.forget(id);
    }
}
