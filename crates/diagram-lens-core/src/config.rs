#![forbid(unsafe_code)]

//! Lens configuration.
//!
//! Every field has a default, so an empty JSON object (or no configuration at
//! all) yields the stock behaviour:
//!
//! ```
//! use diagram_lens_core::config::LensConfig;
//!
//! let config = LensConfig::from_json_str(r#"{ "zoom": { "log_step": 0.05 } }"#).unwrap();
//! assert_eq!(config.zoom.log_step, 0.05);
//! assert_eq!(config.classes.container, "mermaid");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::ZoomTuning;
use crate::input::InputTuning;

/// Default name of the window event fired after each preview content update.
pub const DEFAULT_CONTENT_UPDATED_EVENT: &str = "vscode.markdown.updateContent";

/// Configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`LensConfig`].
    Parse(String),
    /// A numeric tuning value is out of range.
    InvalidValue { field: &'static str, value: f64 },
    /// `zoom.min_scale` is not below `zoom.max_scale`.
    ScaleBounds { min: f64, max: f64 },
    /// A class name or selector is empty.
    EmptyName(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid lens configuration: {msg}"),
            Self::InvalidValue { field, value } => {
                write!(f, "{field} must be finite and positive, got {value}")
            }
            Self::ScaleBounds { min, max } => {
                write!(f, "zoom.min_scale ({min}) must be below zoom.max_scale ({max})")
            }
            Self::EmptyName(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Class names and selectors shared with the stylesheet and the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    /// Class identifying diagram containers.
    pub container: String,
    /// Selector for the visual inside a container.
    pub visual_selector: String,
    /// Marker class left by an incompatible zoom extension.
    pub foreign_zoom_button: String,
    pub expand_button: String,
    pub reset_button: String,
    /// Marker class set on a container while its state is not identity.
    pub zoomed: String,
    pub overlay: String,
    /// Scrollable centring wrapper inside the overlay.
    pub overlay_content: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container: "mermaid".to_string(),
            visual_selector: "svg".to_string(),
            foreign_zoom_button: "mermaid-zoom-button".to_string(),
            expand_button: "mermaid-expand-btn".to_string(),
            reset_button: "mermaid-zoom-reset-btn".to_string(),
            zoomed: "mermaid-is-zoomed".to_string(),
            overlay: "mermaid-overlay".to_string(),
            overlay_content: "mermaid-overlay-content".to_string(),
        }
    }
}

impl ClassNames {
    fn names(&self) -> [(&'static str, &str); 8] {
        [
            ("classes.container", self.container.as_str()),
            ("classes.visual_selector", self.visual_selector.as_str()),
            ("classes.foreign_zoom_button", self.foreign_zoom_button.as_str()),
            ("classes.expand_button", self.expand_button.as_str()),
            ("classes.reset_button", self.reset_button.as_str()),
            ("classes.zoomed", self.zoomed.as_str()),
            ("classes.overlay", self.overlay.as_str()),
            ("classes.overlay_content", self.overlay_content.as_str()),
        ]
    }
}

/// Complete lens configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LensConfig {
    pub zoom: ZoomTuning,
    pub input: InputTuning,
    pub classes: ClassNames,
    /// Window event that triggers a re-scan.
    pub content_updated_event: String,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomTuning::default(),
            input: InputTuning::default(),
            classes: ClassNames::default(),
            content_updated_event: DEFAULT_CONTENT_UPDATED_EVENT.to_string(),
        }
    }
}

impl LensConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric ranges and names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("zoom.log_step", self.zoom.log_step),
            ("zoom.min_scale", self.zoom.min_scale),
            ("zoom.max_scale", self.zoom.max_scale),
            ("input.max_burst_notches", self.input.max_burst_notches),
            ("input.pixels_per_notch", self.input.pixels_per_notch),
            ("input.line_height_px", self.input.line_height_px),
            ("input.fallback_page_px", self.input.fallback_page_px),
        ];
        for (field, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        if self.zoom.min_scale >= self.zoom.max_scale {
            return Err(ConfigError::ScaleBounds {
                min: self.zoom.min_scale,
                max: self.zoom.max_scale,
            });
        }

        for (field, value) in self.classes.names() {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyName(field));
            }
        }
        if self.content_updated_event.trim().is_empty() {
            return Err(ConfigError::EmptyName("content_updated_event"));
        }
        Ok(())
    }
}
