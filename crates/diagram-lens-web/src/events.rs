#![forbid(unsafe_code)]

//! DOM event field conversion.
//!
//! The wasm listeners read raw fields off `WheelEvent` / `KeyboardEvent` and
//! pass them through these helpers, so the mapping is testable on native
//! targets.

use diagram_lens_core::config::{ConfigError, LensConfig};
use diagram_lens_core::geometry::Point;
use diagram_lens_core::input::{DeltaMode, Modifiers, WheelInput};

/// Modifier flags as reported by a DOM event.
#[must_use]
pub fn modifiers(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Modifiers {
    let mut mods = Modifiers::empty();
    mods.set(Modifiers::SHIFT, shift);
    mods.set(Modifiers::ALT, alt);
    mods.set(Modifiers::CTRL, ctrl);
    mods.set(Modifiers::SUPER, meta);
    mods
}

/// Build a [`WheelInput`] from `WheelEvent` fields.
#[must_use]
pub fn wheel_input(
    delta_y: f64,
    delta_mode: u32,
    client_x: f64,
    client_y: f64,
    modifiers: Modifiers,
) -> WheelInput {
    WheelInput::new(
        delta_y,
        DeltaMode::from_dom(delta_mode),
        Point::new(client_x, client_y),
    )
    .with_modifiers(modifiers)
}

/// Parse the constructor's options argument. Absent or blank text yields the
/// defaults.
pub fn parse_options(options: Option<&str>) -> Result<LensConfig, ConfigError> {
    match options.map(str::trim) {
        None | Some("") => Ok(LensConfig::default()),
        Some(text) => LensConfig::from_json_str(text),
    }
}
