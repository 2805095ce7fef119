//! SceneSplit Core - Foundation types
//!
//! This crate provides the types shared by every SceneSplit crate:
//! - Error type and result alias
//! - Time representation (RationalTime, FrameRate)
//! - Strip transforms carried through placement

pub mod error;
pub mod geometry;
pub mod time;

pub use error::{Result, SceneSplitError};
pub use geometry::StripTransform;
pub use time::{FrameRate, RationalTime};
