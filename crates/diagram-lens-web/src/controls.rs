#![forbid(unsafe_code)]

//! Button descriptions for the controls appended to each container.

use diagram_lens_core::config::ClassNames;
use diagram_lens_core::host::ControlKind;

/// Everything needed to build one control button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSpec<'a> {
    pub class: &'a str,
    pub glyph: &'static str,
    pub label: &'static str,
}

impl<'a> ControlSpec<'a> {
    #[must_use]
    pub fn for_kind(kind: ControlKind, classes: &'a ClassNames) -> Self {
        match kind {
            ControlKind::Expand => Self {
                class: &classes.expand_button,
                glyph: "\u{2922}",
                label: "Expand diagram",
            },
            ControlKind::Reset => Self {
                class: &classes.reset_button,
                glyph: "\u{27F2}",
                label: "Reset zoom",
            },
        }
    }

    /// Selector matching this control inside its container.
    #[must_use]
    pub fn selector(&self) -> String {
        class_selector(self.class)
    }
}

/// `.name` for a single class name.
#[must_use]
pub fn class_selector(class: &str) -> String {
    format!(".{class}")
}
