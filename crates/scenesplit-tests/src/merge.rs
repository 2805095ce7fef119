//! Integration tests for merging records on a timeline.

use scenesplit_core::FrameRate;
use scenesplit_timeline::{merge, partition, place_intervals, FrameInterval, IntervalRecord, Timeline};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn shot(source: &str, anchor: i64, start: i64, end: i64) -> IntervalRecord {
    IntervalRecord::new("shot", source, anchor, FrameInterval::new(start, end))
}

fn merge_all(records: &mut Vec<IntervalRecord>) -> Vec<Uuid> {
    let mut removed = Vec::new();
    merge(records, &mut |r: IntervalRecord| removed.push(r.id)).unwrap();
    removed
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn three_contiguous_clip_records_become_one() {
    let mut records = vec![
        shot("clip.mp4", 0, 0, 24),
        shot("clip.mp4", 0, 24, 60),
        shot("clip.mp4", 0, 60, 100),
    ];
    let absorbed_ids = vec![records[1].id, records[2].id];

    let removed = merge_all(&mut records);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].range(), FrameInterval::new(0, 100));
    assert_eq!(removed, absorbed_ids);
}

#[test]
fn greedy_forward_chain_spans_all_three() {
    let mut records = vec![
        shot("clip.mp4", 10, 10, 30),
        shot("clip.mp4", 10, 30, 31),
        shot("clip.mp4", 10, 31, 90),
    ];
    merge_all(&mut records);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].range(), FrameInterval::new(10, 90));
}

#[test]
fn break_then_recover_leaves_two_records() {
    let a = shot("clip.mp4", 0, 0, 24);
    let b = shot("clip.mp4", 0, 30, 60);
    let c = shot("clip.mp4", 0, 60, 100);
    let a_before = a.clone();
    let mut records = vec![a, b, c];

    merge_all(&mut records);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0], a_before);
    assert_eq!(records[1].range(), FrameInterval::new(30, 100));
}

#[test]
fn second_merge_is_a_no_op() {
    let mut records = vec![
        shot("a.mp4", 0, 0, 10),
        shot("a.mp4", 0, 10, 20),
        shot("b.mp4", 0, 20, 30),
        shot("a.mp4", 0, 30, 40),
        shot("a.mp4", 0, 40, 50),
    ];
    let first = merge_all(&mut records);
    let snapshot = records.clone();

    let second = merge_all(&mut records);

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(records, snapshot);
}

#[test]
fn partition_place_merge_restores_template_range() {
    let template = shot("feature.mov", 500, 548, 1_988);
    let intervals = partition(&[3.0, 17.25, 40.0, 59.9], 24.0, template.duration()).unwrap();
    let mut pieces = place_intervals(&template, &intervals);
    // Shuffle the order the selection hands them over in
    pieces.reverse();

    let removed = merge_all(&mut pieces);

    assert_eq!(removed.len(), intervals.len() - 1);
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].range(), template.range());
}

// ── Timeline selection ─────────────────────────────────────────

#[test]
fn timeline_merges_two_sources_independently() {
    let mut timeline = Timeline::new("Edit", FrameRate::FPS_24);
    let mut ids = Vec::new();
    for (source, start, end) in [
        ("a.mp4", 0, 24),
        ("a.mp4", 24, 48),
        ("b.mp4", 48, 72),
        ("b.mp4", 72, 96),
    ] {
        let anchor = if source == "a.mp4" { 0 } else { 48 };
        ids.push(timeline.add_record(shot(source, anchor, start, end)));
    }
    timeline.select_all();

    let summary = timeline.merge_selected().unwrap();

    assert_eq!(summary.absorbed, 2);
    assert_eq!(summary.survivors, vec![ids[0], ids[2]]);
    assert_eq!(timeline.record(ids[0]).unwrap().range_end, 48);
    assert_eq!(timeline.record(ids[2]).unwrap().range_end, 96);
    assert!(timeline.record(ids[1]).is_none());
    assert!(timeline.record(ids[3]).is_none());
}

#[test]
fn unselected_neighbour_is_not_absorbed() {
    let mut timeline = Timeline::default();
    let a = timeline.add_record(shot("clip.mp4", 0, 0, 24));
    let b = timeline.add_record(shot("clip.mp4", 0, 24, 48));
    timeline.select(b);

    let summary = timeline.merge_selected().unwrap();

    assert_eq!(summary.absorbed, 0);
    assert_eq!(timeline.len(), 2);
    assert!(timeline.record(a).is_some());
}
