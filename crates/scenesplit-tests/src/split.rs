//! Integration tests for the split pipeline.
//!
//! Exercises detection (through a scripted detector), partitioning,
//! placement on a timeline and merging back.

use scenesplit_core::{FrameRate, Result, SceneSplitError, StripTransform};
use scenesplit_detect::{validate_window, SceneDetector, SceneSplitter};
use scenesplit_timeline::{FrameInterval, IntervalRecord, Timeline};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ── Helpers ────────────────────────────────────────────────────

/// Detector answering from a table of absolute cut times per source.
struct Scripted {
    cuts: HashMap<PathBuf, Vec<f64>>,
}

impl Scripted {
    fn new(entries: &[(&str, &[f64])]) -> Self {
        Self {
            cuts: entries
                .iter()
                .map(|(path, cuts)| (PathBuf::from(path), cuts.to_vec()))
                .collect(),
        }
    }
}

impl SceneDetector for Scripted {
    fn detect(&self, source: &Path, start: f64, end: f64, threshold: f64) -> Result<Vec<f64>> {
        validate_window(start, end, threshold)?;
        let cuts = self
            .cuts
            .get(source)
            .ok_or_else(|| SceneSplitError::collaborator(format!("no analysis for {}", source.display())))?;
        Ok(cuts.iter().copied().filter(|t| *t >= start && *t < end).collect())
    }
}

fn ranges(timeline: &Timeline) -> Vec<(i64, i64)> {
    timeline
        .records()
        .iter()
        .map(|r| (r.range_start, r.range_end))
        .collect()
}

// ── Split ──────────────────────────────────────────────────────

#[test]
fn split_whole_clip_at_two_cuts() {
    let mut timeline = Timeline::new("Edit", FrameRate::FPS_24);
    let id = timeline.add_record(IntervalRecord::new(
        "clip",
        "clip.mp4",
        0,
        FrameInterval::new(0, 100),
    ));
    let splitter = SceneSplitter::new(Scripted::new(&[("clip.mp4", &[1.0, 2.5])]), 0.3);

    let ids = splitter.split(&mut timeline, id).unwrap();

    assert_eq!(ids.len(), 3);
    assert_eq!(ranges(&timeline), vec![(0, 24), (24, 60), (60, 100)]);
}

#[test]
fn split_trimmed_clip_only_sees_visible_window() {
    // Logical clip anchored at 100, trimmed to show source frames 48..120
    let mut timeline = Timeline::new("Edit", FrameRate::FPS_24);
    let id = timeline.add_record(IntervalRecord::new(
        "clip",
        "clip.mp4",
        100,
        FrameInterval::new(148, 220),
    ));
    // 1.0 s is before the window, 6.0 s is past it
    let detector = Scripted::new(&[("clip.mp4", &[1.0, 3.0, 4.0, 6.0])]);
    let splitter = SceneSplitter::new(detector, 0.3);

    splitter.split(&mut timeline, id).unwrap();

    // 3.0 s -> source frame 72 -> timeline frame 172; 4.0 s -> 196
    assert_eq!(ranges(&timeline), vec![(148, 172), (172, 196), (196, 220)]);
    for record in timeline.records() {
        assert_eq!(record.timeline_anchor, 100);
    }
}

#[test]
fn split_without_cuts_keeps_one_piece() {
    let mut timeline = Timeline::default();
    let id = timeline.add_record(IntervalRecord::new(
        "static",
        "static.mp4",
        0,
        FrameInterval::new(0, 50),
    ));
    let splitter = SceneSplitter::new(Scripted::new(&[("static.mp4", &[])]), 0.3);

    let ids = splitter.split(&mut timeline, id).unwrap();

    assert_eq!(ids.len(), 1);
    assert_eq!(ranges(&timeline), vec![(0, 50)]);
}

#[test]
fn split_carries_transform_and_channel() {
    let transform = StripTransform::from_trs([-40.0, 12.0], 0.1, [0.5, 0.5]).with_flip(false, true);
    let mut timeline = Timeline::default();
    let id = timeline.add_record(
        IntervalRecord::new("clip", "clip.mp4", 0, FrameInterval::new(0, 100))
            .with_channel(4)
            .with_transform(transform),
    );
    let splitter = SceneSplitter::new(Scripted::new(&[("clip.mp4", &[2.0])]), 0.3);

    splitter.split(&mut timeline, id).unwrap();

    for record in timeline.records() {
        assert_eq!(record.transform, transform);
        assert_eq!(record.channel, 4);
    }
}

#[test]
fn detector_failure_leaves_timeline_untouched() {
    let mut timeline = Timeline::default();
    let id = timeline.add_record(IntervalRecord::new(
        "clip",
        "unknown.mp4",
        0,
        FrameInterval::new(0, 100),
    ));
    let splitter = SceneSplitter::new(Scripted::new(&[]), 0.3);

    let err = splitter.split(&mut timeline, id).unwrap_err();

    assert!(matches!(err, SceneSplitError::CollaboratorFailure(_)));
    assert_eq!(timeline.len(), 1);
    assert!(timeline.record(id).is_some());
}

#[test]
fn out_of_range_threshold_is_invalid() {
    let mut timeline = Timeline::default();
    let id = timeline.add_record(IntervalRecord::new(
        "clip",
        "clip.mp4",
        0,
        FrameInterval::new(0, 100),
    ));
    let splitter = SceneSplitter::new(Scripted::new(&[("clip.mp4", &[])]), 2.0);
    assert!(splitter.split(&mut timeline, id).unwrap_err().is_invalid_parameter());
}

// ── Split, then merge ──────────────────────────────────────────

#[test]
fn split_then_merge_round_trips_to_one_record() {
    let mut timeline = Timeline::new("Edit", FrameRate::FPS_25);
    let id = timeline.add_record(IntervalRecord::new(
        "clip",
        "clip.mp4",
        0,
        FrameInterval::new(0, 250),
    ));
    let splitter = SceneSplitter::new(Scripted::new(&[("clip.mp4", &[1.0, 2.0, 5.5, 8.04])]), 0.3);
    splitter.split(&mut timeline, id).unwrap();
    assert_eq!(timeline.len(), 5);

    let summary = timeline.merge_selected().unwrap();

    assert_eq!(summary.absorbed, 4);
    assert_eq!(ranges(&timeline), vec![(0, 250)]);

    let again = timeline.merge_selected().unwrap();
    assert_eq!(again.absorbed, 0);
}

#[test]
fn merging_after_deleting_a_scene_keeps_the_gap() {
    let mut timeline = Timeline::new("Edit", FrameRate::FPS_24);
    let id = timeline.add_record(IntervalRecord::new(
        "clip",
        "clip.mp4",
        0,
        FrameInterval::new(0, 120),
    ));
    let splitter = SceneSplitter::new(Scripted::new(&[("clip.mp4", &[1.0, 2.0, 3.0, 4.0])]), 0.3);
    let ids = splitter.split(&mut timeline, id).unwrap();

    // Drop the middle scene [48, 72)
    timeline.remove_record(ids[2]).unwrap();
    timeline.select_all();
    let summary = timeline.merge_selected().unwrap();

    assert_eq!(summary.absorbed, 2);
    assert_eq!(ranges(&timeline), vec![(0, 48), (72, 120)]);
}
