//! Splitting a timeline record at detected scene changes.

use scenesplit_core::{RationalTime, Result, SceneSplitError};
use scenesplit_timeline::{partition_at, FrameInterval, Timeline};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::detector::SceneDetector;

/// Runs a detector over a record's visible range and replaces the record
/// with one piece per detected scene.
pub struct SceneSplitter<D> {
    detector: D,
    threshold: f64,
}

impl<D: SceneDetector> SceneSplitter<D> {
    pub fn new(detector: D, threshold: f64) -> Self {
        Self {
            detector,
            threshold,
        }
    }

    /// Detect and partition without touching the timeline.
    ///
    /// Returned intervals are relative to the record's visible start.
    pub fn plan(&self, timeline: &Timeline, record_id: Uuid) -> Result<Vec<FrameInterval>> {
        let record = timeline
            .record(record_id)
            .ok_or_else(|| SceneSplitError::NotFound(format!("record {record_id}")))?;

        let duration = record.duration();
        if duration <= 0 {
            return Err(SceneSplitError::invalid(format!(
                "record {record_id} has no visible frames"
            )));
        }

        let rate = timeline.frame_rate;
        rate.validate()?;
        let source_range = record.source_range();
        let window_start = RationalTime::from_frames(source_range.start, rate);
        let window_end = RationalTime::from_frames(source_range.end, rate);
        let time_start = window_start.to_seconds_f64();

        debug!(
            record = %record_id,
            source = %record.source_id,
            start = %window_start,
            end = %window_end,
            "Detecting scene changes in record"
        );

        let cuts = self.detector.detect(
            Path::new(&record.source_id),
            time_start,
            window_end.to_seconds_f64(),
            self.threshold,
        )?;
        let relative: Vec<f64> = cuts.iter().map(|t| t - time_start).collect();

        partition_at(&relative, rate, duration)
    }

    /// Split the record in place. Returns the IDs of the new pieces, which
    /// also become the timeline selection.
    pub fn split(&self, timeline: &mut Timeline, record_id: Uuid) -> Result<Vec<Uuid>> {
        let intervals = self.plan(timeline, record_id)?;
        let ids = timeline.replace_with_intervals(record_id, &intervals)?;
        info!(record = %record_id, scenes = ids.len(), "Split record at scene changes");
        Ok(ids)
    }
}
