//! Media probing to get metadata without a full decode.

use draftkit_core::{DraftError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::kind::MediaKind;

/// What a probe learned about a local media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeInfo {
    /// File path
    pub path: PathBuf,
    pub kind: MediaKind,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Native duration; absent for stills.
    pub duration_seconds: Option<f64>,
}

impl ProbeInfo {
    /// Create probe info with no dimensions or duration.
    pub fn new(path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self {
            path: path.into(),
            kind,
            width: None,
            height: None,
            duration_seconds: None,
        }
    }

    /// Set the frame size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the native duration in seconds.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// File name without its extension, used as the material name.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Capability that turns a local path into [`ProbeInfo`].
///
/// Remote URLs and temporary staging are the caller's job; probes only see
/// local files.
pub trait MediaProber {
    /// Probe a media file.
    fn probe(&self, path: &Path) -> Result<ProbeInfo>;
}

impl<P: MediaProber + ?Sized> MediaProber for &P {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        (**self).probe(path)
    }
}

/// Probe that classifies files by extension and reports nominal metadata.
///
/// Useful where ffprobe is not installed. Images report no duration so the
/// configured image default applies.
#[derive(Debug, Clone)]
pub struct ExtensionProbe {
    pub width: u32,
    pub height: u32,
    pub video_seconds: f64,
    pub audio_seconds: f64,
}

impl Default for ExtensionProbe {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            video_seconds: 10.0,
            audio_seconds: 30.0,
        }
    }
}

impl MediaProber for ExtensionProbe {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        if !path.is_file() {
            return Err(DraftError::MediaUnresolved(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let kind = MediaKind::from_extension(path).ok_or_else(|| {
            DraftError::UnsupportedMediaKind(format!("{}", path.display()))
        })?;

        let info = ProbeInfo::new(path, kind);
        Ok(match kind {
            MediaKind::Video => info
                .with_size(self.width, self.height)
                .with_duration(self.video_seconds),
            MediaKind::Image => info.with_size(self.width, self.height),
            MediaKind::Audio => info.with_duration(self.audio_seconds),
            MediaKind::Text | MediaKind::Effect => info,
        })
    }
}
