//! Subcommand implementations. Each returns the JSON printed on stdout.

use anyhow::{bail, Context, Result};
use scenesplit_core::FrameRate;
use scenesplit_detect::{FfprobeDetector, MediaProbe, SceneDetector, SceneSplitter, Settings};
use scenesplit_timeline::{merge as merge_records, partition as partition_frames, FrameInterval, IntervalRecord, Timeline};
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

use crate::{DetectArgs, MergeArgs, PartitionArgs, SplitArgs};

pub fn partition(args: &PartitionArgs) -> Result<Value> {
    let intervals = partition_frames(&args.timestamps, args.fps, args.frames)?;
    Ok(json!(intervals))
}

pub fn detect(args: &DetectArgs, settings: &Settings) -> Result<Value> {
    let detector = ffprobe_detector(settings)?;
    let end = match args.end {
        Some(end) => end,
        None => MediaProbe::probe(detector.binary(), &args.file)?.duration_secs,
    };
    let threshold = args.threshold.unwrap_or(settings.detect.threshold);

    let cuts = detector.detect(&args.file, args.start, end, threshold)?;
    Ok(json!({
        "file": args.file,
        "start": args.start,
        "end": end,
        "threshold": threshold,
        "scene_changes": cuts,
    }))
}

pub fn split(args: &SplitArgs, settings: &Settings) -> Result<Value> {
    let detector = ffprobe_detector(settings)?;
    let probe = MediaProbe::probe(detector.binary(), &args.file)?;

    let rate_override = match &args.fps {
        Some(fps) => Some(FrameRate::parse(fps)?),
        None => settings.detect.frame_rate_override()?,
    };
    let (rate, frames) = match rate_override {
        Some(rate) => (rate, (probe.duration_secs * rate.to_fps_f64()).round() as i64),
        None => (probe.frame_rate, probe.frame_count),
    };
    if frames <= 0 {
        bail!("{} has no frames to split", args.file.display());
    }
    info!(file = %args.file.display(), %rate, frames, "Splitting media");

    let mut timeline = Timeline::new(display_name(&args.file), rate);
    let id = timeline.add_record(IntervalRecord::new(
        display_name(&args.file),
        args.file.to_string_lossy(),
        0,
        FrameInterval::new(0, frames),
    ));

    let threshold = args.threshold.unwrap_or(settings.detect.threshold);
    let splitter = SceneSplitter::new(detector, threshold);
    splitter.split(&mut timeline, id)?;

    let merged = if args.merge {
        let summary = timeline.merge_selected()?;
        Some(summary.absorbed)
    } else {
        None
    };

    Ok(json!({
        "frame_rate": rate,
        "frames": frames,
        "merged": merged,
        "records": timeline.records(),
    }))
}

pub fn merge(args: &MergeArgs) -> Result<Value> {
    let data = std::fs::read(&args.records)
        .with_context(|| format!("Failed to read {}", args.records.display()))?;
    let mut records: Vec<IntervalRecord> = serde_json::from_slice(&data)
        .with_context(|| format!("{} is not a JSON array of records", args.records.display()))?;

    let mut removed = Vec::new();
    let absorbed = merge_records(&mut records, &mut |r: IntervalRecord| removed.push(r.id))?;
    info!(absorbed, survivors = records.len(), "Merged records");

    Ok(json!({
        "survivors": records,
        "removed": removed,
    }))
}

/// The configured ffprobe, checked before any media is touched.
fn ffprobe_detector(settings: &Settings) -> Result<FfprobeDetector> {
    let detector = FfprobeDetector::new(&settings.detect.ffprobe);
    if !detector.is_available() {
        bail!(
            "ffprobe could not be run from {} (set detect.ffprobe in the settings file)",
            detector.binary().display()
        );
    }
    Ok(detector)
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenesplit_detect::DetectSettings;
    use std::path::PathBuf;

    #[test]
    fn test_partition_command_output() {
        let args = PartitionArgs {
            fps: 24.0,
            frames: 100,
            timestamps: vec![2.5, 1.0],
        };
        let out = partition(&args).unwrap();
        assert_eq!(
            out,
            json!([
                {"start": 0, "end": 24},
                {"start": 24, "end": 60},
                {"start": 60, "end": 100}
            ])
        );
    }

    #[test]
    fn test_partition_command_rejects_zero_fps() {
        let args = PartitionArgs {
            fps: 0.0,
            frames: 100,
            timestamps: vec![],
        };
        assert!(partition(&args).is_err());
    }

    #[test]
    fn test_merge_command_reads_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let records: Vec<IntervalRecord> = [(0, 24), (24, 60), (60, 100)]
            .into_iter()
            .map(|(s, e)| IntervalRecord::new("shot", "clip.mp4", 0, FrameInterval::new(s, e)))
            .collect();
        std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();

        let out = merge(&MergeArgs { records: path }).unwrap();

        let survivors = out["survivors"].as_array().unwrap();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0]["range_end"], 100);
        assert_eq!(out["removed"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_merge_command_missing_file() {
        let args = MergeArgs {
            records: PathBuf::from("/no/such/records.json"),
        };
        assert!(merge(&args).is_err());
    }

    #[test]
    fn test_unavailable_ffprobe_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-ffprobe");
        let settings = Settings {
            detect: DetectSettings {
                ffprobe: missing.clone(),
                ..DetectSettings::default()
            },
        };

        let err = ffprobe_detector(&settings).unwrap_err();
        assert!(err.to_string().contains(&missing.display().to_string()));

        let args = DetectArgs {
            file: dir.path().join("clip.mp4"),
            start: 0.0,
            end: Some(1.0),
            threshold: None,
        };
        assert!(detect(&args, &settings).is_err());
    }

    #[test]
    fn test_display_name_uses_stem() {
        assert_eq!(display_name(Path::new("/media/interview.mov")), "interview");
    }
}
