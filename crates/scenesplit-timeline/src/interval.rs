//! Frame intervals and the scene-cut partitioner.

use scenesplit_core::{FrameRate, Result, SceneSplitError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

/// A half-open frame range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameInterval {
    /// First frame (inclusive)
    pub start: i64,
    /// One past the last frame (exclusive)
    pub end: i64,
}

impl FrameInterval {
    #[inline]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of frames covered.
    #[inline]
    pub fn len(self) -> i64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Check if a frame is within this interval.
    #[inline]
    pub fn contains(self, frame: i64) -> bool {
        frame >= self.start && frame < self.end
    }

    /// Shift both ends by `frames`.
    #[inline]
    pub fn offset(self, frames: i64) -> Self {
        Self::new(self.start + frames, self.end + frames)
    }
}

impl From<(i64, i64)> for FrameInterval {
    fn from((start, end): (i64, i64)) -> Self {
        Self::new(start, end)
    }
}

/// Split `[0, duration)` into frame intervals at the given scene-change
/// timestamps.
///
/// Each timestamp (seconds from the start of the analyzed range) becomes the
/// frame `round(timestamp * frame_rate)`. Rounding is half away from zero, so
/// a cut landing exactly on a half frame moves to the later frame (2.5 → 3).
/// Frames at or before 0, or at or beyond `duration`, are dropped, as are
/// duplicates; negative timestamps therefore never fragment the output.
///
/// The result is ordered, contiguous, covers `[0, duration)` exactly and
/// never contains an empty interval. With no usable cut it is the single
/// interval `[0, duration)`.
///
/// Fails with `InvalidParameter` when `frame_rate` is not a positive finite
/// number, `duration <= 0`, or a timestamp is NaN or infinite.
pub fn partition(timestamps: &[f64], frame_rate: f64, duration: i64) -> Result<Vec<FrameInterval>> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(SceneSplitError::invalid(format!(
            "frame rate must be a positive finite number, got {frame_rate}"
        )));
    }
    if duration <= 0 {
        return Err(SceneSplitError::invalid(format!(
            "duration must be positive, got {duration} frames"
        )));
    }
    if let Some(bad) = timestamps.iter().find(|t| !t.is_finite()) {
        return Err(SceneSplitError::invalid(format!(
            "scene-change timestamp must be finite, got {bad}"
        )));
    }

    let mut boundaries: SmallVec<[i64; 32]> = SmallVec::with_capacity(timestamps.len() + 2);
    boundaries.push(0);
    boundaries.extend(
        timestamps
            .iter()
            .map(|t| (t * frame_rate).round() as i64)
            .filter(|&frame| frame > 0 && frame < duration),
    );
    boundaries.push(duration);
    boundaries[1..].sort_unstable();
    boundaries.dedup();

    let intervals: Vec<FrameInterval> = boundaries
        .windows(2)
        .map(|pair| FrameInterval::new(pair[0], pair[1]))
        .collect();

    debug!(
        timestamps = timestamps.len(),
        intervals = intervals.len(),
        duration,
        "Partitioned frame range"
    );

    Ok(intervals)
}

/// [`partition`] with a rational frame rate.
pub fn partition_at(
    timestamps: &[f64],
    rate: FrameRate,
    duration: i64,
) -> Result<Vec<FrameInterval>> {
    rate.validate()?;
    partition(timestamps, rate.to_fps_f64(), duration)
}
