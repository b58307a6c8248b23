#![forbid(unsafe_code)]

//! Zoom geometry: pure state transitions for cursor-anchored zoom.
//!
//! Nothing in this module knows about events, timing or the document. Callers
//! hand in the current [`ZoomState`], an accumulated notch count and a cursor
//! position relative to the container's bounding box, and get the next state
//! back.
//!
//! # Stepping rule
//!
//! Zoom steps are taken in log space so that equal notch counts produce equal
//! multiplicative change at any scale:
//!
//! ```text
//! scale' = clamp(exp(ln(scale) + notches * log_step), min_scale, max_scale)
//! ```
//!
//! # Anchoring
//!
//! With `ratio = scale' / scale`, the translation is updated so the content
//! point under the cursor stays under the cursor:
//!
//! ```text
//! tx' = cx - (cx - tx) * ratio
//! ty' = cy - (cy - ty) * ratio
//! ```
//!
//! # Example
//!
//! ```
//! use diagram_lens_core::geometry::{Point, ZoomState, ZoomTuning};
//!
//! let tuning = ZoomTuning::default();
//! let next = tuning.next_state(ZoomState::IDENTITY, 1.0, Point::new(40.0, 20.0));
//! assert!((next.scale - 0.03f64.exp()).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Default log-space step per notch.
pub const DEFAULT_LOG_STEP: f64 = 0.03;
/// Default lower scale bound.
pub const DEFAULT_MIN_SCALE: f64 = 0.5;
/// Default upper scale bound.
pub const DEFAULT_MAX_SCALE: f64 = 10.0;

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An on-screen bounding box in CSS pixels (viewport coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a viewport point into coordinates relative to this box's
    /// top-left corner.
    #[must_use]
    pub fn relative(&self, point: Point) -> Point {
        Point::new(point.x - self.x, point.y - self.y)
    }
}

/// Persisted per-container zoom transform.
///
/// Painted as `translate(tx, ty) scale(s)` with the origin at the
/// container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomState {
    /// The canonical reset state `{1, 0, 0}`.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    #[must_use]
    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Whether this is exactly the identity state.
    ///
    /// Only the identity state clears the zoomed marker.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate_x == 0.0 && self.translate_y == 0.0
    }

    /// CSS `transform` value for this state.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }

    /// Map a content point (untransformed visual coordinates) to its
    /// container-relative on-screen position under this transform.
    #[must_use]
    pub fn project(&self, content: Point) -> Point {
        Point::new(
            content.x * self.scale + self.translate_x,
            content.y * self.scale + self.translate_y,
        )
    }

    /// Inverse of [`project`](Self::project).
    #[must_use]
    pub fn unproject(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate_x) / self.scale,
            (screen.y - self.translate_y) / self.scale,
        )
    }
}

/// Tunable zoom constants.
///
/// The step and bounds are UX tuning, so they are configuration rather than
/// hard constants. See [`crate::config::LensConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomTuning {
    /// Log-space step per notch unit. Default: 0.03
    pub log_step: f64,
    /// Lower scale bound. Default: 0.5
    pub min_scale: f64,
    /// Upper scale bound. Default: 10
    pub max_scale: f64,
}

impl Default for ZoomTuning {
    fn default() -> Self {
        Self {
            log_step: DEFAULT_LOG_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl ZoomTuning {
    /// Scale reached from `scale` after `notches` log steps, clamped to the
    /// configured bounds.
    #[must_use]
    pub fn stepped_scale(&self, scale: f64, notches: f64) -> f64 {
        let raw = (scale.ln() + notches * self.log_step).exp();
        if raw.is_nan() {
            return scale.clamp(self.min_scale, self.max_scale);
        }
        raw.clamp(self.min_scale, self.max_scale)
    }

    /// Compute the next zoom state for `notches` accumulated notch units
    /// with the cursor at `cursor` (relative to the container's box).
    #[must_use]
    pub fn next_state(&self, current: ZoomState, notches: f64, cursor: Point) -> ZoomState {
        let scale = self.stepped_scale(current.scale, notches);
        let ratio = scale / current.scale;
        ZoomState {
            scale,
            translate_x: cursor.x - (cursor.x - current.translate_x) * ratio,
            translate_y: cursor.y - (cursor.y - current.translate_y) * ratio,
        }
    }
}

/// Free-function form of [`ZoomTuning::next_state`].
#[must_use]
pub fn compute_next_state(
    tuning: &ZoomTuning,
    current: ZoomState,
    accumulated_notches: f64,
    cursor: Point,
) -> ZoomState {
    tuning.next_state(current, accumulated_notches, cursor)
}
