//! Time representation for frame-accurate splitting
//!
//! Uses rational numbers to avoid floating-point accumulation errors when
//! converting between frame positions and detector windows in seconds.

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SceneSplitError};

/// A rational time value representing a point in time.
/// Uses rational arithmetic to maintain frame-accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RationalTime {
    /// Time value as a rational number (seconds)
    value: Rational64,
}

impl RationalTime {
    /// Create a new RationalTime from numerator and denominator.
    /// The time is `numerator / denominator` seconds.
    #[inline]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            value: Rational64::new(numerator, denominator),
        }
    }

    /// Create a RationalTime from a frame number and frame rate.
    ///
    /// The rate must be valid (see [`FrameRate::validate`]).
    #[inline]
    pub fn from_frames(frames: i64, rate: FrameRate) -> Self {
        Self {
            value: Rational64::new(frames * rate.denominator as i64, rate.numerator as i64),
        }
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn to_seconds_f64(self) -> f64 {
        *self.value.numer() as f64 / *self.value.denom() as f64
    }
}

impl fmt::Display for RationalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.to_seconds_f64())
    }
}

/// Frame rate as a rational number (e.g., 24000/1001 for 23.976 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 24000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Build a frame rate from frames per second, approximating fractional
    /// rates with a millisecond-precision ratio.
    ///
    /// Rates that round to zero or do not fit a `u32` ratio are rejected.
    pub fn from_fps_f64(fps: f64) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(SceneSplitError::invalid(format!(
                "frame rate must be a positive finite number, got {fps}"
            )));
        }
        let out_of_range =
            |_| SceneSplitError::invalid(format!("frame rate {fps} is out of range"));

        let rate = if (fps - fps.round()).abs() < 1e-9 {
            Self::new(u32::try_from(fps.round() as i64).map_err(out_of_range)?, 1)
        } else {
            let ratio = Rational64::new((fps * 1000.0).round() as i64, 1000);
            Self::new(
                u32::try_from(*ratio.numer()).map_err(out_of_range)?,
                u32::try_from(*ratio.denom()).map_err(out_of_range)?,
            )
        };
        rate.validate()?;
        Ok(rate)
    }

    /// Parse an ffprobe-style rate such as `"30000/1001"`, `"24/1"` or `"29.97"`.
    pub fn parse(rate: &str) -> Result<Self> {
        let rate = rate.trim();
        if let Some((num, den)) = rate.split_once('/') {
            let num: u32 = num
                .trim()
                .parse()
                .map_err(|_| SceneSplitError::invalid(format!("bad frame rate: {rate}")))?;
            let den: u32 = den
                .trim()
                .parse()
                .map_err(|_| SceneSplitError::invalid(format!("bad frame rate: {rate}")))?;
            let parsed = Self::new(num, den);
            parsed.validate()?;
            return Ok(parsed);
        }
        let fps: f64 = rate
            .parse()
            .map_err(|_| SceneSplitError::invalid(format!("bad frame rate: {rate}")))?;
        Self::from_fps_f64(fps)
    }

    /// Reject rates with a zero numerator or denominator.
    pub fn validate(self) -> Result<()> {
        if self.numerator == 0 || self.denominator == 0 {
            return Err(SceneSplitError::invalid(format!(
                "frame rate {}/{} is not positive",
                self.numerator, self.denominator
            )));
        }
        Ok(())
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Common frame rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_50: Self = Self::new(50, 1);
    pub const FPS_59_94: Self = Self::new(60000, 1001);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_24
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}
