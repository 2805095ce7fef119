//! Coalescing of contiguous, source-identical interval records.
//!
//! Records are visited in timeline order. The first record of each run
//! absorbs every following record that continues it (same source, same
//! anchor, starting exactly where the run currently ends). The first record
//! that does not continue the run starts a new run; the old head is never
//! revisited, so contiguity is only ever merged forward in time.

use scenesplit_core::Result;
use tracing::debug;

use crate::record::IntervalRecord;

/// Capability to delete an absorbed record from its owning timeline.
///
/// The record is handed over by value: after absorption it no longer exists
/// as far as the merge is concerned.
pub trait RecordRemover {
    fn remove(&mut self, record: IntervalRecord);
}

impl<F> RecordRemover for F
where
    F: FnMut(IntervalRecord),
{
    fn remove(&mut self, record: IntervalRecord) {
        self(record)
    }
}

/// Merge contiguous runs in `records`, returning how many records were absorbed.
///
/// On success `records` holds the survivors ordered by `timeline_start`
/// (ties keep their input order) and every absorbed record has been passed to
/// `remover`. Running it again on its own output absorbs nothing.
///
/// Fails with `InvalidParameter` if any record has `range_start > range_end`;
/// in that case neither `records` nor the remover is touched.
pub fn merge<R>(records: &mut Vec<IntervalRecord>, remover: &mut R) -> Result<usize>
where
    R: RecordRemover + ?Sized,
{
    for record in records.iter() {
        record.validate()?;
    }
    if records.len() < 2 {
        return Ok(0);
    }

    records.sort_by_key(|r| r.timeline_start);

    let mut survivors: Vec<IntervalRecord> = Vec::with_capacity(records.len());
    let mut absorbed = 0;

    for next in records.drain(..) {
        match survivors.last_mut() {
            Some(head) if head.is_continued_by(&next) => {
                debug!(
                    head = %head.id,
                    absorbed = %next.id,
                    range_end = next.range_end,
                    "Absorbing contiguous record"
                );
                head.range_end = next.range_end;
                remover.remove(next);
                absorbed += 1;
            }
            _ => survivors.push(next),
        }
    }

    *records = survivors;
    Ok(absorbed)
}
