// dqlens-core/src/domain/tier.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the High tier.
pub const HIGH_THRESHOLD: f64 = 80.0;
/// Lower bound (inclusive) of the Medium tier.
pub const MEDIUM_THRESHOLD: f64 = 60.0;

// Declaration order gives Low < Medium < High, so tiers compare like the
// percentages they come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Medium,
    High,
}

/// Maps a percentage to its severity tier.
///
/// Callers clamp to `[0, 100]` first (see [`clamp_percentage`]); out-of-range
/// input is not corrected here.
pub fn classify(percentage: f64) -> Tier {
    if percentage >= HIGH_THRESHOLD {
        Tier::High
    } else if percentage >= MEDIUM_THRESHOLD {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Restricts a value to `[0, 100]`. NaN collapses to 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Bar colour used by the renderers.
    pub fn color_name(&self) -> &'static str {
        match self {
            Self::Low => "red",
            Self::Medium => "yellow",
            Self::High => "green",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
