#![forbid(unsafe_code)]

//! Stylesheet injected once per document.
//!
//! Rules are generated from the configured [`ClassNames`] so renamed classes
//! stay consistent between the DOM glue and the CSS:
//!
//! - containers are positioning contexts and scroll horizontally,
//! - the renderer's `max-width` clamp on the visual is lifted,
//! - buttons fade in on hover or keyboard focus,
//! - the reset button only shows while the container carries the zoomed
//!   marker,
//! - the overlay covers the viewport on the editor background colour.

use diagram_lens_core::config::ClassNames;

/// `id` of the injected `<style>` element; its presence means "installed".
pub const STYLE_ELEMENT_ID: &str = "diagram-lens-style";

/// Render the stylesheet for `classes`.
#[must_use]
pub fn stylesheet(classes: &ClassNames) -> String {
    let container = &classes.container;
    let visual = &classes.visual_selector;
    let expand = &classes.expand_button;
    let reset = &classes.reset_button;
    let zoomed = &classes.zoomed;
    let overlay = &classes.overlay;
    let content = &classes.overlay_content;

    let rules = [
        format!(".{container} {{ position: relative; overflow-x: auto; }}"),
        format!(".{container} {visual} {{ max-width: none !important; }}"),
        format!(
            ".{expand}, .{reset} {{ position: absolute; top: 4px; z-index: 10; \
             padding: 2px 6px; border: 1px solid var(--vscode-button-border, transparent); \
             border-radius: 3px; background: var(--vscode-button-secondaryBackground, rgba(128, 128, 128, 0.2)); \
             color: var(--vscode-button-secondaryForeground, inherit); font-size: 14px; line-height: 1; \
             cursor: pointer; opacity: 0; transition: opacity 0.15s ease-in-out; }}"
        ),
        format!(".{expand} {{ right: 4px; }}"),
        format!(".{reset} {{ right: 32px; display: none; }}"),
        format!(
            ".{container}:hover .{expand}, .{expand}:focus-visible, \
             .{container}:hover .{reset}, .{reset}:focus-visible {{ opacity: 1; }}"
        ),
        format!(".{container}.{zoomed} .{reset} {{ display: block; opacity: 1; }}"),
        format!(
            ".{overlay} {{ position: fixed; inset: 0; z-index: 1000; display: flex; \
             align-items: center; justify-content: center; overflow: auto; \
             background: var(--vscode-editor-background); cursor: zoom-out; }}"
        ),
        format!(
            ".{content} {{ max-width: 100%; max-height: 100%; overflow: auto; margin: auto; \
             padding: 16px; box-sizing: border-box; cursor: default; }}"
        ),
    ];

    let mut css = rules.join("\n");
    css.push('\n');
    css
}
