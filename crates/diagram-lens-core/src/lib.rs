#![forbid(unsafe_code)]

//! Core of the diagram lens: zoom, overlay and element tracking for diagrams
//! that an external renderer keeps replacing.
//!
//! The crate is host-agnostic. A host (see `diagram-lens-web`) implements the
//! traits in [`host`] on top of a real document and forwards its callbacks to
//! a [`DiagramLens`]. Everything here is single-threaded and deterministic, so
//! the whole lifecycle can be driven from tests without a browser.

pub mod config;
pub mod geometry;
pub mod host;
pub mod input;
pub mod lens;
pub mod logging;
pub mod overlay;
pub mod store;
pub mod tracker;
pub mod zoom;

#[cfg(test)]
mod testing;

pub use config::{ClassNames, ConfigError, LensConfig};
pub use geometry::{Point, Rect, ZoomState, ZoomTuning};
pub use host::{ControlKind, Document, LensHost, OverlayClickTarget, OverlayHost, Surface};
pub use input::{DeltaMode, InputTuning, Modifiers, WheelInput};
pub use lens::DiagramLens;
pub use store::ContainerId;
pub use zoom::WheelOutcome;
