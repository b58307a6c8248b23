#![forbid(unsafe_code)]

//! WASM frontend for diagram-lens.
//!
//! This crate binds the host-agnostic engine in `diagram-lens-core` to a live
//! preview document:
//! - container discovery and per-container `MutationObserver`s,
//! - wheel, click and key listeners (via `gloo-events`),
//! - `requestAnimationFrame` as the frame scheduler,
//! - the expand/reset buttons, the overlay and the injected stylesheet.
//!
//! Script entry is the exported `DiagramLens` class. Everything the DOM glue
//! needs that does not touch `web-sys` lives in [`controls`], [`dispatch`],
//! [`events`] and [`style`] so it can be tested natively.

pub mod controls;
pub mod dispatch;
pub mod events;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::DiagramLensWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct DiagramLensWeb;

#[cfg(not(target_arch = "wasm32"))]
impl DiagramLensWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
