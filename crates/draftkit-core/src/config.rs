//! Draft configuration.
//!
//! A single [`DraftConfig`] value is handed to every draft at construction.
//! It can be loaded from a JSON file in which every field is optional:
//!
//! ```json
//! {
//!   "drafts_root": "/srv/drafts",
//!   "image": { "default_duration": 3000000 },
//!   "catalog": { "effects": { "Sparkle": "7012933493663470001" } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{DraftError, Result};
use crate::time::Micros;

/// Top-level configuration for drafts and entity builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Directory under which each draft folder is created.
    pub drafts_root: PathBuf,
    /// Timeline frame rate written to the content document.
    pub fps: f64,
    pub canvas: CanvasSettings,
    pub image: ImageDefaults,
    pub text: TextDefaults,
    /// Extra name → resource-id entries merged over the built-in tables.
    pub catalog: CatalogOverrides,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            drafts_root: PathBuf::from("drafts"),
            fps: 30.0,
            canvas: CanvasSettings::default(),
            image: ImageDefaults::default(),
            text: TextDefaults::default(),
            catalog: CatalogOverrides::default(),
        }
    }
}

impl DraftConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let data = std::fs::read(path)?;
        Self::from_json(&data)
            .map_err(|e| DraftError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from JSON bytes.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| DraftError::Config(format!("Invalid config: {}", e)))
    }

    /// Use a different drafts root.
    pub fn with_drafts_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.drafts_root = root.into();
        self
    }
}

/// Canvas written to `canvas_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub ratio: String,
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            ratio: "original".to_string(),
            width: 1437,
            height: 1920,
        }
    }
}

/// Defaults for still images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDefaults {
    /// Duration used when an image has no explicit or probed length.
    pub default_duration: Micros,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            default_duration: 5_000_000,
        }
    }
}

/// Defaults for text segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub default_duration: Micros,
    /// `#RRGGBB`
    pub default_color: String,
    /// Font size in the host's text units.
    pub default_size: f64,
    /// 0 = left, 1 = center, 2 = right
    pub default_alignment: u8,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            default_duration: 5_000_000,
            default_color: "#FFFFFF".to_string(),
            default_size: 15.0,
            default_alignment: 1,
        }
    }
}

/// Additional resource lookup entries, keyed by display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOverrides {
    pub effects: BTreeMap<String, String>,
    pub transitions: BTreeMap<String, String>,
    pub animations_in: BTreeMap<String, String>,
    pub animations_out: BTreeMap<String, String>,
    pub animations_group: BTreeMap<String, String>,
}
