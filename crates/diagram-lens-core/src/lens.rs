#![forbid(unsafe_code)]

//! The lens: one owned instance wiring tracker, zoom engine and overlay to a
//! host.
//!
//! Hosts forward their callbacks here. Every entry point runs to completion
//! and leaves the document consistent; none of them can fail.
//!
//! | host callback                      | entry point                                   |
//! |------------------------------------|-----------------------------------------------|
//! | document ready / initial load      | [`start`](DiagramLens::start)                 |
//! | content-updated notification       | [`content_updated`](DiagramLens::content_updated) |
//! | subtree mutation of a container    | [`subtree_changed`](DiagramLens::subtree_changed) |
//! | wheel on a container               | [`wheel`](DiagramLens::wheel)                 |
//! | animation frame                    | [`frame`](DiagramLens::frame)                 |
//! | expand / reset button click        | [`expand_clicked`](DiagramLens::expand_clicked), [`reset_clicked`](DiagramLens::reset_clicked) |
//! | key press / overlay click          | [`key_down`](DiagramLens::key_down), [`overlay_clicked`](DiagramLens::overlay_clicked) |

use crate::config::LensConfig;
use crate::geometry::ZoomState;
use crate::host::{LensHost, OverlayClickTarget};
use crate::input::WheelInput;
use crate::logging::debug;
use crate::overlay::OverlayController;
use crate::store::ContainerId;
use crate::tracker::{ElementTracker, ScanReport};
use crate::zoom::{WheelOutcome, ZoomEngine};

/// Interactive diagram lens bound to one host document.
pub struct DiagramLens<H: LensHost> {
    host: H,
    config: LensConfig,
    tracker: ElementTracker<H::Container, H::Subscription>,
    engine: ZoomEngine,
    overlay: OverlayController<H::Overlay>,
}

impl<H: LensHost> DiagramLens<H> {
    /// Build a lens. Nothing is touched until [`start`](Self::start).
    pub fn new(host: H, config: LensConfig) -> Self {
        let engine = ZoomEngine::new(config.zoom, config.input);
        Self {
            host,
            config,
            tracker: ElementTracker::new(),
            engine,
            overlay: OverlayController::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &LensConfig {
        &self.config
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Initial scan once the document is ready.
    pub fn start(&mut self) -> ScanReport {
        debug!("lens starting");
        self.scan()
    }

    /// Re-scan after the external renderer replaced content.
    ///
    /// The notification fires before new visuals are inserted; those arrive
    /// later through [`subtree_changed`](Self::subtree_changed).
    pub fn content_updated(&mut self) -> ScanReport {
        self.scan()
    }

    fn scan(&mut self) -> ScanReport {
        let report = self.tracker.scan(&mut self.host);
        for &id in &report.pruned {
            self.engine.forget(id);
        }
        for &id in &report.attached {
            self.reapply(id);
        }
        report
    }

    /// A tracked container's subtree changed.
    pub fn subtree_changed(&mut self, id: ContainerId) {
        if self.tracker.refresh(&mut self.host, id) {
            self.reapply(id);
        }
    }

    fn reapply(&mut self, id: ContainerId) {
        if let Some(container) = self.tracker.container(id) {
            self.engine.reapply(&mut self.host, container, id);
        }
    }

    /// Wheel event on a tracked container.
    pub fn wheel(&mut self, id: ContainerId, input: &WheelInput) -> WheelOutcome {
        if !input.is_zoom_gesture() {
            return WheelOutcome::PassThrough;
        }
        let Some(container) = self.tracker.container(id) else {
            return WheelOutcome::PassThrough;
        };
        self.engine.wheel(&mut self.host, container, id, input)
    }

    /// Scheduled frame for `id`. Returns the new state when one was applied.
    pub fn frame(&mut self, id: ContainerId) -> Option<ZoomState> {
        let Some(container) = self.tracker.container(id) else {
            self.engine.forget(id);
            return None;
        };
        self.engine.flush(&mut self.host, container, id)
    }

    /// Reset control clicked.
    pub fn reset_clicked(&mut self, id: ContainerId) {
        if let Some(container) = self.tracker.container(id) {
            self.engine.reset(&mut self.host, container, id);
        }
    }

    /// Expand control clicked. Returns whether an overlay is now open.
    pub fn expand_clicked(&mut self, id: ContainerId) -> bool {
        let Some(container) = self.tracker.container(id) else {
            return false;
        };
        self.overlay.open(&mut self.host, container)
    }

    /// Document-level key press while the overlay listener is active.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.overlay.key_down(&mut self.host, key)
    }

    /// Click inside the overlay.
    pub fn overlay_clicked(&mut self, target: OverlayClickTarget) -> bool {
        self.overlay.clicked(&mut self.host, target)
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close(&mut self.host);
    }

    #[must_use]
    pub const fn is_overlay_open(&self) -> bool {
        self.overlay.is_open()
    }

    #[must_use]
    pub fn zoom_state(&self, id: ContainerId) -> Option<ZoomState> {
        self.engine.store().get(id)
    }

    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.tracker.len()
    }

    /// Id assigned to a live container, if tracked.
    #[must_use]
    pub fn id_of(&self, container: &H::Container) -> Option<ContainerId> {
        self.tracker.id_of(container)
    }

    /// Close the overlay and forget every container, releasing all
    /// subscriptions.
    pub fn shutdown(&mut self) {
        self.overlay.close(&mut self.host);
        for id in self.tracker.clear(&mut self.host) {
            self.engine.forget(id);
        }
        debug!("lens shut down");
    }
}
