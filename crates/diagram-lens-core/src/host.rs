#![forbid(unsafe_code)]

//! Host traits: the seams between the engine and a concrete document.
//!
//! The engine never touches a DOM directly. A host (the `web-sys` frontend,
//! or an in-memory fake in tests) implements:
//!
//! - [`Surface`]: measuring a container and painting its current visual,
//! - [`Document`]: discovering containers, installing controls and listeners,
//!   subscribing to subtree changes and scheduling frames,
//! - [`OverlayHost`]: building and tearing down the full-screen overlay.
//!
//! Every method must tolerate the visual being absent; absence is a normal
//! state of the external render cycle, never an error.

use crate::geometry::{Rect, ZoomState};
use crate::store::ContainerId;

/// Controls the engine installs on a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Opens the overlay.
    Expand,
    /// Resets the zoom state; styled visible only while zoomed.
    Reset,
}

/// Where a click on the open overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClickTarget {
    /// Inside the cloned diagram.
    Diagram,
    /// Anywhere else on the backdrop or wrapper.
    Backdrop,
}

/// Measuring and painting a container's visual.
pub trait Surface {
    /// Live container handle. Equality is identity.
    type Container: Clone + PartialEq;

    /// Current on-screen box of the container.
    fn container_rect(&self, container: &Self::Container) -> Option<Rect>;

    /// Paint `state` onto the container's current visual and lift any
    /// intrinsic size clamp the renderer put on it.
    ///
    /// Returns `false` when no visual is present (nothing was painted).
    fn paint_visual(&mut self, container: &Self::Container, state: &ZoomState) -> bool;

    /// Toggle overflow clipping on the container.
    fn set_clipped(&mut self, container: &Self::Container, clipped: bool);

    /// Toggle the zoomed marker on the container.
    fn set_zoomed_marker(&mut self, container: &Self::Container, zoomed: bool);
}

/// Discovery, attachment and scheduling.
pub trait Document: Surface {
    /// Handle for a subtree subscription; dropping it unsubscribes.
    type Subscription;

    /// Every diagram container currently in the document, in document order.
    fn find_containers(&self) -> Vec<Self::Container>;

    /// Whether the container is still connected to the document.
    fn is_connected(&self, container: &Self::Container) -> bool;

    /// Whether the container currently holds a visual.
    fn has_visual(&self, container: &Self::Container) -> bool;

    /// Whether an incompatible extension already installed its own zoom
    /// button on this container.
    fn has_foreign_control(&self, container: &Self::Container) -> bool;

    /// Whether our control of `kind` is present in the container right now.
    fn has_control(&self, container: &Self::Container, kind: ControlKind) -> bool;

    /// Append our control of `kind`; clicks are routed back for `id`.
    fn install_control(&mut self, container: &Self::Container, kind: ControlKind, id: ContainerId);

    /// Bind the wheel listener to the container; events are routed back for
    /// `id`.
    fn install_wheel_listener(&mut self, container: &Self::Container, id: ContainerId);

    /// Subscribe to subtree insertions/removals under the container.
    fn observe_subtree(&mut self, container: &Self::Container, id: ContainerId)
    -> Self::Subscription;

    /// Run the frame callback for `id` once before the next redraw.
    fn request_frame(&mut self, id: ContainerId);

    /// Drop host-side bindings (listeners, control handlers) held for a
    /// container that is no longer tracked.
    fn release_container(&mut self, id: ContainerId);
}

/// Overlay construction.
pub trait OverlayHost: Surface {
    /// Open overlay; owns the detached clone and the dismissal listeners.
    type Overlay;

    /// Build an overlay holding a deep copy of the container's current
    /// visual and register its key and click listeners.
    ///
    /// Returns `None` when the container has no visual.
    fn open_overlay(&mut self, container: &Self::Container) -> Option<Self::Overlay>;

    /// Remove the overlay element and release its listeners.
    fn close_overlay(&mut self, overlay: Self::Overlay);
}

/// Everything the lens facade needs from its host.
pub trait LensHost: Document + OverlayHost {}

impl<T: Document + OverlayHost> LensHost for T {}
