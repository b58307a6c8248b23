#![forbid(unsafe_code)]

//! Wheel input normalization and per-container aggregation.
//!
//! Wheel events arrive far faster than frames are drawn. Instead of applying
//! each one, the [`InputAggregator`] folds them into one [`PendingInput`] per
//! container and asks for a single frame:
//!
//! - the delta is converted to device-independent notch units,
//! - the signed magnitude is summed and the sum clamped to
//!   `±max_burst_notches`,
//! - the latest cursor position wins,
//! - at most one frame is scheduled per container; later events merge into it.
//!
//! The frame callback then [`take`](InputAggregator::take)s the pending input,
//! which clears both the accumulator and the scheduled flag in one step.

use std::collections::{HashMap, HashSet};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::store::ContainerId;

bitflags! {
    /// Modifier keys held during a wheel event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Unit of a raw wheel delta, as reported by DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Map the DOM constant (`0`, `1`, `2`). Unknown values are treated as
    /// pixels.
    #[must_use]
    pub const fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// One raw wheel event as seen on a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    /// Vertical delta; positive when scrolling down.
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
    pub modifiers: Modifiers,
    /// Pointer position in viewport coordinates.
    pub client: Point,
}

impl WheelInput {
    #[must_use]
    pub const fn new(delta_y: f64, delta_mode: DeltaMode, client: Point) -> Self {
        Self {
            delta_y,
            delta_mode,
            modifiers: Modifiers::empty(),
            client,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether the modifier-zoom chord (Ctrl) is held.
    #[must_use]
    pub const fn is_zoom_gesture(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Wheel normalization constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputTuning {
    /// Bound on the accumulated notch units between two frames. Default: 3
    pub max_burst_notches: f64,
    /// Pixel delta that counts as one notch. Default: 100
    pub pixels_per_notch: f64,
    /// Pixel height of one line for line-mode deltas. Default: 40
    pub line_height_px: f64,
    /// Page height used for page-mode deltas when the container has no
    /// measurable height. Default: 800
    pub fallback_page_px: f64,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            max_burst_notches: 3.0,
            pixels_per_notch: 100.0,
            line_height_px: 40.0,
            fallback_page_px: 800.0,
        }
    }
}

impl InputTuning {
    /// Convert a raw wheel delta into signed notch units.
    ///
    /// Positive notches zoom in, so scrolling up (negative `delta_y`) yields a
    /// positive value. `page_height` is the container's current height, used
    /// for page-mode deltas.
    #[must_use]
    pub fn notches(&self, input: &WheelInput, page_height: Option<f64>) -> f64 {
        let pixels = match input.delta_mode {
            DeltaMode::Pixel => input.delta_y,
            DeltaMode::Line => input.delta_y * self.line_height_px,
            DeltaMode::Page => {
                let page = page_height
                    .filter(|h| h.is_finite() && *h > 0.0)
                    .unwrap_or(self.fallback_page_px);
                input.delta_y * page
            }
        };
        let notches = -pixels / self.pixels_per_notch;
        if notches.is_nan() { 0.0 } else { notches }
    }

    /// Clamp an accumulated value to the burst bound.
    #[must_use]
    pub fn clamp_burst(&self, notches: f64) -> f64 {
        notches.clamp(-self.max_burst_notches, self.max_burst_notches)
    }
}

/// Input accumulated for one container since its last flush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingInput {
    pub delta_notches: f64,
    /// Latest pointer position in viewport coordinates.
    pub last_cursor: Point,
}

/// Result of feeding one event into the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulated {
    /// No frame was pending: the caller must schedule one.
    ScheduleFrame,
    /// Merged into the already scheduled frame.
    Merged,
}

/// Per-container wheel accumulator.
///
/// Not thread-safe; driven from the single UI event loop.
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    tuning: InputTuning,
    pending: HashMap<ContainerId, PendingInput>,
    scheduled: HashSet<ContainerId>,
}

impl InputAggregator {
    #[must_use]
    pub fn new(tuning: InputTuning) -> Self {
        Self {
            tuning,
            pending: HashMap::new(),
            scheduled: HashSet::new(),
        }
    }

    #[must_use]
    pub const fn tuning(&self) -> &InputTuning {
        &self.tuning
    }

    /// Add `notches` at `cursor` to the container's pending input.
    pub fn accumulate(&mut self, id: ContainerId, notches: f64, cursor: Point) -> Accumulated {
        let entry = self.pending.entry(id).or_insert(PendingInput {
            delta_notches: 0.0,
            last_cursor: cursor,
        });
        entry.delta_notches = self.tuning.clamp_burst(entry.delta_notches + notches);
        entry.last_cursor = cursor;

        if self.scheduled.insert(id) {
            Accumulated::ScheduleFrame
        } else {
            Accumulated::Merged
        }
    }

    /// Take and clear the container's pending input, releasing its frame slot.
    pub fn take(&mut self, id: ContainerId) -> Option<PendingInput> {
        self.scheduled.remove(&id);
        self.pending.remove(&id)
    }

    /// Peek at pending input without clearing it.
    #[must_use]
    pub fn pending(&self, id: ContainerId) -> Option<&PendingInput> {
        self.pending.get(&id)
    }

    #[must_use]
    pub fn is_frame_scheduled(&self, id: ContainerId) -> bool {
        self.scheduled.contains(&id)
    }

    /// Drop everything held for a container that left the document.
    pub fn forget(&mut self, id: ContainerId) {
        self.pending.remove(&id);
        self.scheduled.remove(&id);
    }
}
