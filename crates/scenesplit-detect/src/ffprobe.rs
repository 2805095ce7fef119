//! Scene-change detection by running ffprobe as a sidecar process.
//!
//! ffprobe decodes the requested window through a lavfi `movie` source,
//! keeps only frames whose scene score exceeds the threshold and prints them
//! as JSON. The timestamps of those frames are the scene changes.

use scenesplit_core::{Result, SceneSplitError};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::detector::{validate_window, SceneDetector};

/// Detector backed by the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeDetector {
    binary: PathBuf,
}

impl FfprobeDetector {
    /// Create a detector that runs the given ffprobe binary.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Path of the ffprobe binary in use.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Check if ffprobe can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Arguments for a scene-change query over `[time_start, time_end)`.
    pub fn scene_args(source: &Path, time_start: f64, time_end: f64, threshold: f64) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-show_frames".to_string(),
            "-print_format".to_string(),
            "json".to_string(),
            "-f".to_string(),
            "lavfi".to_string(),
            scene_filter(source, time_start, time_end, threshold),
        ]
    }
}

impl Default for FfprobeDetector {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl SceneDetector for FfprobeDetector {
    fn detect(
        &self,
        source: &Path,
        time_start: f64,
        time_end: f64,
        threshold: f64,
    ) -> Result<Vec<f64>> {
        validate_window(time_start, time_end, threshold)?;
        if !source.exists() {
            return Err(SceneSplitError::NotFound(format!(
                "Media not found: {}",
                source.display()
            )));
        }

        info!(
            source = %source.display(),
            time_start,
            time_end,
            threshold,
            "Running ffprobe scene detection"
        );
        let started = Instant::now();

        let output = Command::new(&self.binary)
            .args(Self::scene_args(source, time_start, time_end, threshold))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                SceneSplitError::collaborator(format!(
                    "Failed to run ffprobe ({}): {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SceneSplitError::collaborator(format!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let cuts = parse_scene_frames(&output.stdout, time_start, time_end)?;
        info!(
            cuts = cuts.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scene detection finished"
        );
        Ok(cuts)
    }
}

/// Build the lavfi graph: open the source, seek and trim to the window,
/// keep frames whose scene score exceeds `threshold`.
pub fn scene_filter(source: &Path, time_start: f64, time_end: f64, threshold: f64) -> String {
    format!(
        "movie={}:seek_point={time_start},trim={time_start}:{time_end},select=gt(scene\\,{threshold})",
        escape_filter_value(&source.to_string_lossy())
    )
}

/// Escape a value for use as a filter option inside a filtergraph.
///
/// Two levels apply: the option parser splits on `:` and the graph parser
/// splits on `,` `;` `[` `]`. Each level strips one layer of backslashes.
fn escape_filter_value(value: &str) -> String {
    let option_level = escape_chars(value, &['\\', '\'', ':']);
    escape_chars(&option_level, &['\\', '\'', ',', ';', '[', ']'])
}

fn escape_chars(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if special.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[derive(Deserialize)]
struct FfprobeFrames {
    #[serde(default)]
    frames: Vec<FfprobeFrame>,
}

#[derive(Deserialize)]
struct FfprobeFrame {
    pkt_dts_time: Option<Value>,
    pts_time: Option<Value>,
    best_effort_timestamp_time: Option<Value>,
}

impl FfprobeFrame {
    /// Frame time in seconds, preferring the decode timestamp.
    fn seconds(&self) -> Option<f64> {
        [
            &self.pkt_dts_time,
            &self.pts_time,
            &self.best_effort_timestamp_time,
        ]
        .into_iter()
        .flatten()
        .find_map(value_seconds)
    }
}

/// ffprobe prints times as strings ("1.000000") but some builds emit numbers.
fn value_seconds(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Extract scene-change times from ffprobe's `-show_frames` JSON output.
///
/// Frames without a usable time, or outside `[time_start, time_end)`, are
/// skipped with a warning. The result is ascending and free of duplicates.
pub fn parse_scene_frames(stdout: &[u8], time_start: f64, time_end: f64) -> Result<Vec<f64>> {
    let parsed: FfprobeFrames = serde_json::from_slice(stdout).map_err(|e| {
        SceneSplitError::collaborator(format!("Failed to parse ffprobe output: {e}"))
    })?;

    let mut cuts = Vec::with_capacity(parsed.frames.len());
    for (index, frame) in parsed.frames.iter().enumerate() {
        match frame.seconds() {
            Some(t) if t.is_finite() && t >= time_start && t < time_end => cuts.push(t),
            Some(t) => warn!(frame = index, time = t, "Dropping scene change outside window"),
            None => warn!(frame = index, "Dropping scene change without a timestamp"),
        }
    }

    cuts.sort_by(f64::total_cmp);
    cuts.dedup();
    debug!(cuts = ?cuts, "Parsed scene changes");
    Ok(cuts)
}
