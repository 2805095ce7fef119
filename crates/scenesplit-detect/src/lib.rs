//! SceneSplit Detect - the external-analyzer side
//!
//! Provides:
//! - The `SceneDetector` collaborator interface
//! - An ffprobe-backed scene-change detector
//! - Media probing (frame rate, frame count)
//! - User settings
//! - The split pipeline tying detection, partitioning and placement together

pub mod detector;
pub mod ffprobe;
pub mod probe;
pub mod settings;
pub mod split;

pub use detector::{validate_window, SceneDetector};
pub use ffprobe::FfprobeDetector;
pub use probe::MediaProbe;
pub use settings::{DetectSettings, Settings, SettingsError};
pub use split::SceneSplitter;
