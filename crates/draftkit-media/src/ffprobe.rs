//! Probe backed by the `ffprobe` binary.
//!
//! The binary is located through ffmpeg-sidecar (next to the current
//! executable, or on `PATH`). Output is requested as JSON and parsed with
//! serde.

use draftkit_core::{DraftError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::kind::MediaKind;
use crate::probe::{MediaProber, ProbeInfo};

/// Container formats ffprobe reports for single still images.
const STILL_IMAGE_FORMATS: &[&str] = &["image2", "png_pipe", "jpeg_pipe", "bmp_pipe", "webp_pipe", "gif"];

/// Probe that shells out to ffprobe.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    binary: PathBuf,
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self {
            binary: ffmpeg_sidecar::ffprobe::ffprobe_path(),
        }
    }
}

impl FfprobeProbe {
    /// Use a specific ffprobe binary.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl MediaProber for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        if !path.is_file() {
            return Err(DraftError::MediaUnresolved(format!(
                "File not found: {}",
                path.display()
            )));
        }

        debug!(path = %path.display(), binary = %self.binary.display(), "Running ffprobe");
        let output = Command::new(&self.binary)
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .output()
            .map_err(|e| DraftError::Probe(format!("Failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(DraftError::Probe(format!(
                "ffprobe exited with {} for {}: {}",
                output.status,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_output(path, &output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
}

/// Turn ffprobe's JSON report into [`ProbeInfo`].
pub(crate) fn parse_output(path: &Path, stdout: &[u8]) -> Result<ProbeInfo> {
    let report: FfprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| DraftError::Probe(format!("Invalid ffprobe output: {}", e)))?;

    let format_name = report
        .format
        .as_ref()
        .and_then(|f| f.format_name.as_deref())
        .unwrap_or_default();
    let video = report
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));
    let audio = report
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));

    let kind = match (video, audio) {
        (Some(_), _) if is_still_image(format_name) => MediaKind::Image,
        (Some(_), _) => MediaKind::Video,
        (None, Some(_)) => MediaKind::Audio,
        (None, None) => {
            return Err(DraftError::UnsupportedMediaKind(format!(
                "{} has no audio or video stream",
                path.display()
            )))
        }
    };

    let mut info = ProbeInfo::new(path, kind);
    if let Some(stream) = video {
        if let (Some(w), Some(h)) = (stream.width, stream.height) {
            info = info.with_size(w, h);
        }
    }

    if kind != MediaKind::Image {
        let primary = video.or(audio);
        let duration = report
            .format
            .as_ref()
            .and_then(|f| f.duration.as_deref())
            .or_else(|| primary.and_then(|s| s.duration.as_deref()))
            .and_then(|d| d.parse::<f64>().ok());
        if let Some(seconds) = duration {
            info = info.with_duration(seconds);
        }
    }

    Ok(info)
}

fn is_still_image(format_name: &str) -> bool {
    format_name
        .split(',')
        .any(|name| STILL_IMAGE_FORMATS.contains(&name))
}
