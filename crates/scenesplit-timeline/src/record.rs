//! Interval records: strips placed on the timeline.

use scenesplit_core::{Result, SceneSplitError, StripTransform};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::FrameInterval;

/// Channel given to records that do not name one.
pub const DEFAULT_CHANNEL: u32 = 1;

fn default_channel() -> u32 {
    DEFAULT_CHANNEL
}

/// A source-anchored strip on the timeline.
///
/// All frame positions are timeline frames. `timeline_anchor` is where the
/// logical clip (source frame 0) sits; `range_start..range_end` is the part
/// of the source currently visible, already offset by the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    /// Unique record ID
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Identifier of the underlying media (usually its path)
    pub source_id: String,
    /// Timeline frame where the logical clip begins
    pub timeline_anchor: i64,
    /// First visible frame (inclusive)
    pub range_start: i64,
    /// End of the visible range (exclusive)
    pub range_end: i64,
    /// Position used to order records for merging
    pub timeline_start: i64,
    /// Channel (track row) the record lives on
    #[serde(default = "default_channel")]
    pub channel: u32,
    /// Visual transform, copied unchanged on placement
    #[serde(default)]
    pub transform: StripTransform,
}

impl IntervalRecord {
    /// Create a record showing `range` of a source anchored at `timeline_anchor`.
    ///
    /// The record starts on the timeline where its visible range starts.
    pub fn new(
        name: impl Into<String>,
        source_id: impl Into<String>,
        timeline_anchor: i64,
        range: FrameInterval,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source_id: source_id.into(),
            timeline_anchor,
            range_start: range.start,
            range_end: range.end,
            timeline_start: range.start,
            channel: DEFAULT_CHANNEL,
            transform: StripTransform::IDENTITY,
        }
    }

    /// Place the record on a channel.
    pub fn with_channel(mut self, channel: u32) -> Self {
        self.channel = channel;
        self
    }

    /// Attach a visual transform.
    pub fn with_transform(mut self, transform: StripTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Visible range as a frame interval.
    pub fn range(&self) -> FrameInterval {
        FrameInterval::new(self.range_start, self.range_end)
    }

    /// Number of visible frames.
    pub fn duration(&self) -> i64 {
        self.range_end - self.range_start
    }

    /// Visible range relative to the source's own frame 0.
    pub fn source_range(&self) -> FrameInterval {
        self.range().offset(-self.timeline_anchor)
    }

    /// Reject records whose range runs backwards.
    pub fn validate(&self) -> Result<()> {
        if self.range_start > self.range_end {
            return Err(SceneSplitError::invalid(format!(
                "record {} has range_start {} after range_end {}",
                self.id, self.range_start, self.range_end
            )));
        }
        Ok(())
    }

    /// True when `next` continues this record: same source, same anchor and
    /// starting exactly where this record ends.
    pub fn is_continued_by(&self, next: &IntervalRecord) -> bool {
        next.source_id == self.source_id
            && next.timeline_anchor == self.timeline_anchor
            && next.range_start == self.range_end
    }
}
