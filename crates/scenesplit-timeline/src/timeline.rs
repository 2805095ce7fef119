//! In-memory timeline holding interval records and a selection.

use scenesplit_core::{FrameRate, Result, SceneSplitError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::interval::FrameInterval;
use crate::merge::{merge, RecordRemover};
use crate::placement::place_intervals;
use crate::record::IntervalRecord;

/// Outcome of merging the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of records absorbed into earlier ones
    pub absorbed: usize,
    /// Records left in the selection, in timeline order
    pub survivors: Vec<Uuid>,
    /// Records deleted from the timeline
    pub removed: Vec<Uuid>,
}

/// A timeline of strips with a user selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Unique timeline ID
    pub id: Uuid,
    /// Timeline name
    pub name: String,
    /// Frame rate of the timeline
    pub frame_rate: FrameRate,
    records: Vec<IntervalRecord>,
    #[serde(default)]
    selection: Vec<Uuid>,
}

/// Removal capability handed to the merger: absorbed records are dropped and
/// their IDs remembered so the selection can be updated.
struct TimelineRemoval {
    removed: Vec<Uuid>,
}

impl RecordRemover for TimelineRemoval {
    fn remove(&mut self, record: IntervalRecord) {
        debug!(id = %record.id, name = %record.name, "Removing absorbed record from timeline");
        self.removed.push(record.id);
    }
}

impl Timeline {
    /// Create a new empty timeline.
    pub fn new(name: impl Into<String>, frame_rate: FrameRate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            frame_rate,
            records: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Add a record and return its ID.
    pub fn add_record(&mut self, record: IntervalRecord) -> Uuid {
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Find a record by UUID.
    pub fn record(&self, id: Uuid) -> Option<&IntervalRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find a record mutably by UUID.
    pub fn record_mut(&mut self, id: Uuid) -> Option<&mut IntervalRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Delete a record from the timeline. Returns the removed record.
    pub fn remove_record(&mut self, id: Uuid) -> Option<IntervalRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        self.selection.retain(|s| *s != id);
        Some(self.records.remove(index))
    }

    /// All records, ordered by timeline position then channel.
    pub fn records(&self) -> Vec<&IntervalRecord> {
        let mut ordered: Vec<&IntervalRecord> = self.records.iter().collect();
        ordered.sort_by_key(|r| (r.timeline_start, r.channel));
        ordered
    }

    /// Number of records on the timeline.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Frame just past the last visible frame of any record.
    pub fn duration(&self) -> i64 {
        self.records.iter().map(|r| r.range_end).max().unwrap_or(0)
    }

    // ── Selection ──────────────────────────────────────────────

    /// Add a record to the selection. Unknown IDs are ignored.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.record(id).is_none() {
            return false;
        }
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
        true
    }

    pub fn deselect(&mut self, id: Uuid) {
        self.selection.retain(|s| *s != id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection = self.records.iter().map(|r| r.id).collect();
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selection.contains(&id)
    }

    /// Selected record IDs in selection order.
    pub fn selected_ids(&self) -> &[Uuid] {
        &self.selection
    }

    // ── Editing ────────────────────────────────────────────────

    /// Replace a record with one piece per interval.
    ///
    /// Intervals are relative to the record's visible start and must lie
    /// within its visible range. The new pieces become the selection.
    pub fn replace_with_intervals(
        &mut self,
        id: Uuid,
        intervals: &[FrameInterval],
    ) -> Result<Vec<Uuid>> {
        let template = self
            .record(id)
            .ok_or_else(|| SceneSplitError::NotFound(format!("record {id}")))?;

        if intervals.is_empty() {
            return Err(SceneSplitError::invalid(format!(
                "no intervals to place for record {id}"
            )));
        }
        let duration = template.duration();
        if let Some(bad) = intervals
            .iter()
            .find(|iv| iv.start < 0 || iv.end > duration || iv.is_empty())
        {
            return Err(SceneSplitError::invalid(format!(
                "interval [{}, {}) does not fit record {id} of {duration} frames",
                bad.start, bad.end
            )));
        }

        let pieces = place_intervals(template, intervals);
        let ids: Vec<Uuid> = pieces.iter().map(|p| p.id).collect();

        self.remove_record(id);
        self.records.extend(pieces);
        self.selection = ids.clone();

        info!(record = %id, pieces = ids.len(), "Split record into pieces");
        Ok(ids)
    }

    /// Merge contiguous runs among the selected records.
    ///
    /// Absorbed records are deleted from the timeline; survivors stay
    /// selected.
    pub fn merge_selected(&mut self) -> Result<MergeSummary> {
        let (mut selected, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| self.selection.contains(&r.id));
        self.records = rest;

        let mut removal = TimelineRemoval {
            removed: Vec::new(),
        };
        let outcome = merge(&mut selected, &mut removal);

        // On failure `selected` is untouched and goes back as it was.
        let survivors: Vec<Uuid> = selected.iter().map(|r| r.id).collect();
        self.records.extend(selected);
        let absorbed = outcome?;

        self.selection.retain(|id| !removal.removed.contains(id));
        info!(
            absorbed,
            survivors = survivors.len(),
            "Merged selected records"
        );

        Ok(MergeSummary {
            absorbed,
            survivors,
            removed: removal.removed,
        })
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new("Timeline 1", FrameRate::FPS_24)
    }
}
