//! Turning partition output into records on the timeline.

use uuid::Uuid;

use crate::interval::FrameInterval;
use crate::record::IntervalRecord;

/// Create one record per interval, cut from `template`.
///
/// Interval frames are relative to the template's visible start, and each
/// piece sits on the timeline at the same offset from the template's
/// `timeline_start`. Every new record keeps the template's source, anchor,
/// channel and transform, so the pieces remain mergeable with each other and
/// look identical on screen.
pub fn place_intervals(template: &IntervalRecord, intervals: &[FrameInterval]) -> Vec<IntervalRecord> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, interval)| {
            let range = interval.offset(template.range_start);
            IntervalRecord {
                id: Uuid::new_v4(),
                name: format!("{}.{:03}", template.name, i + 1),
                source_id: template.source_id.clone(),
                timeline_anchor: template.timeline_anchor,
                range_start: range.start,
                range_end: range.end,
                timeline_start: template.timeline_start + interval.start,
                channel: template.channel,
                transform: template.transform,
            }
        })
        .collect()
}
