//! SceneSplit Timeline - partitioning and merging
//!
//! Implements the reasoning half of scene splitting:
//! - Partitioning a frame range at scene-change timestamps
//! - Interval records placed on a timeline
//! - Coalescing contiguous, source-identical records back together
//! - An in-memory timeline that owns records and a selection

pub mod interval;
pub mod merge;
pub mod placement;
pub mod record;
pub mod timeline;

pub use interval::{partition, partition_at, FrameInterval};
pub use merge::{merge, RecordRemover};
pub use placement::place_intervals;
pub use record::IntervalRecord;
pub use timeline::{MergeSummary, Timeline};
