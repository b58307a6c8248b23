#![forbid(unsafe_code)]

//! Full-screen overlay lifecycle.
//!
//! The controller owns at most one open overlay. Opening always closes the
//! previous one first, so the host never holds two overlay elements or two
//! dismissal key listeners at once.

use crate::host::{OverlayClickTarget, OverlayHost};
use crate::logging::debug;

/// DOM `KeyboardEvent.key` value that dismisses the overlay.
pub const DISMISS_KEY: &str = "Escape";

/// Single-overlay controller.
#[derive(Debug)]
pub struct OverlayController<O> {
    active: Option<O>,
}

impl<O> Default for OverlayController<O> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<O> OverlayController<O> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Open an overlay showing a copy of the container's visual.
    ///
    /// Any open overlay is closed first, even when the new one cannot be
    /// built because the container has no visual. Returns whether an overlay
    /// is now open.
    pub fn open<H>(&mut self, host: &mut H, container: &H::Container) -> bool
    where
        H: OverlayHost<Overlay = O>,
    {
        self.close(host);
        self.active = host.open_overlay(container);
        debug!(opened = self.active.is_some(), "overlay open requested");
        self.active.is_some()
    }

    /// Close the open overlay. No-op when none is open.
    pub fn close<H>(&mut self, host: &mut H)
    where
        H: OverlayHost<Overlay = O>,
    {
        if let Some(overlay) = self.active.take() {
            host.close_overlay(overlay);
            debug!("overlay closed");
        }
    }

    /// Handle a document key press. Returns whether it closed the overlay.
    pub fn key_down<H>(&mut self, host: &mut H, key: &str) -> bool
    where
        H: OverlayHost<Overlay = O>,
    {
        if key != DISMISS_KEY || !self.is_open() {
            return false;
        }
        self.close(host);
        true
    }

    /// Handle a click on the overlay. Returns whether it closed the overlay.
    pub fn clicked<H>(&mut self, host: &mut H, target: OverlayClickTarget) -> bool
    where
        H: OverlayHost<Overlay = O>,
    {
        if target == OverlayClickTarget::Diagram || !self.is_open() {
            return false;
        }
        self.close(host);
        true
    }
}
