//! Card rendering options.

use serde::Deserialize;

use crate::error::{CardError, Result};
use crate::renderer::{CardGeometry, LayoutMode};

/// Options for drawing a card. Every field has a default, so a JSON
/// config only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// SVG width in user units.
    pub width: f64,
    /// SVG height in user units.
    pub height: f64,
    /// Draw dashed beat-column guides.
    pub show_columns: bool,
    /// Print the card number (or measure code) in the corner.
    pub show_label: bool,
    pub mode: LayoutMode,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
            show_columns: true,
            show_label: true,
            mode: LayoutMode::Strict,
        }
    }
}

impl CardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CardConfig =
            serde_json::from_str(json).map_err(|e| CardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Default config at a given size. Zero or negative means "default"
    /// for that dimension, as FFI callers pass it.
    pub fn with_size(width: f64, height: f64) -> Self {
        let defaults = Self::default();
        Self {
            width: if width > 0.0 { width } else { defaults.width },
            height: if height > 0.0 { height } else { defaults.height },
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry().map(|_| ())
    }

    pub fn geometry(&self) -> Result<CardGeometry> {
        CardGeometry::new(self.width, self.height)
    }
}
