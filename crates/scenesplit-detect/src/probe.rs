//! Media file probing to get frame rate and length without decoding.

use scenesplit_core::{FrameRate, Result, SceneSplitError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Information about the primary video stream of a media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaProbe {
    /// File path
    pub path: String,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Video frame rate
    pub frame_rate: FrameRate,
    /// Number of video frames
    pub frame_count: i64,
    pub width: u32,
    pub height: u32,
    /// Video codec name
    pub codec: String,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    #[serde(default)]
    streams: Vec<StreamInfo>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
    nb_frames: Option<String>,
}

impl MediaProbe {
    /// Probe a media file with the given ffprobe binary.
    pub fn probe<P: AsRef<Path>>(ffprobe: &Path, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SceneSplitError::NotFound(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let output = Command::new(ffprobe)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                SceneSplitError::collaborator(format!(
                    "Failed to run ffprobe ({}): {e}",
                    ffprobe.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SceneSplitError::collaborator(format!(
                "ffprobe failed on {}: {}",
                path.display(),
                stderr.trim()
            )));
        }

        Self::from_json(&path.to_string_lossy(), &output.stdout)
    }

    /// Build a probe result from ffprobe's `-show_format -show_streams` JSON.
    pub fn from_json(path: &str, stdout: &[u8]) -> Result<Self> {
        let probe: FfprobeOutput = serde_json::from_slice(stdout).map_err(|e| {
            SceneSplitError::collaborator(format!("Failed to parse ffprobe output: {e}"))
        })?;

        let video = probe
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| SceneSplitError::collaborator(format!("No video stream in {path}")))?;

        let frame_rate = video
            .r_frame_rate
            .as_deref()
            .ok_or_else(|| SceneSplitError::collaborator(format!("No frame rate for {path}")))
            .and_then(|r| {
                FrameRate::parse(r).map_err(|e| {
                    SceneSplitError::collaborator(format!("Unusable frame rate for {path}: {e}"))
                })
            })?;

        // Format duration first, stream duration as fallback
        let duration_secs = probe
            .format
            .as_ref()
            .and_then(|f| f.duration.as_deref())
            .or(video.duration.as_deref())
            .and_then(|d| d.parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| SceneSplitError::collaborator(format!("No duration for {path}")))?;

        let frame_count = video
            .nb_frames
            .as_deref()
            .and_then(|n| n.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(|| (duration_secs * frame_rate.to_fps_f64()).round() as i64);

        debug!(path, %frame_rate, frame_count, duration_secs, "Probed media");

        Ok(Self {
            path: path.to_string(),
            duration_secs,
            frame_rate,
            frame_count,
            width: video.width.unwrap_or(0),
            height: video.height.unwrap_or(0),
            codec: video.codec_name.clone().unwrap_or_default(),
        })
    }
}
