//! Scene-change detector interface.

use scenesplit_core::{Result, SceneSplitError};
use std::path::Path;

/// Something that finds scene changes in a window of a media source.
///
/// Implementations return absolute source times in seconds, ascending,
/// inside `[time_start, time_end)`. An empty result means no cut was found.
pub trait SceneDetector {
    fn detect(
        &self,
        source: &Path,
        time_start: f64,
        time_end: f64,
        threshold: f64,
    ) -> Result<Vec<f64>>;
}

impl<D: SceneDetector + ?Sized> SceneDetector for &D {
    fn detect(
        &self,
        source: &Path,
        time_start: f64,
        time_end: f64,
        threshold: f64,
    ) -> Result<Vec<f64>> {
        (**self).detect(source, time_start, time_end, threshold)
    }
}

impl<D: SceneDetector + ?Sized> SceneDetector for Box<D> {
    fn detect(
        &self,
        source: &Path,
        time_start: f64,
        time_end: f64,
        threshold: f64,
    ) -> Result<Vec<f64>> {
        (**self).detect(source, time_start, time_end, threshold)
    }
}

/// Check a detection window and threshold before handing them to a detector.
pub fn validate_window(time_start: f64, time_end: f64, threshold: f64) -> Result<()> {
    if !time_start.is_finite() || !time_end.is_finite() {
        return Err(SceneSplitError::invalid(format!(
            "detection window must be finite, got {time_start}..{time_end}"
        )));
    }
    if time_start < 0.0 {
        return Err(SceneSplitError::invalid(format!(
            "detection window starts before zero: {time_start}"
        )));
    }
    if time_end <= time_start {
        return Err(SceneSplitError::invalid(format!(
            "detection window is empty: {time_start}..{time_end}"
        )));
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(SceneSplitError::invalid(format!(
            "scene threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}
