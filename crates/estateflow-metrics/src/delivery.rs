//! Guarded division and the three-tier delivery classification shared by
//! every report.

use serde::Serialize;

/// Delivery at or above this percentage of target is on track.
pub const GOOD_THRESHOLD: f64 = 90.0;
/// Delivery at or above this percentage (but below [`GOOD_THRESHOLD`]) needs attention.
pub const WARNING_THRESHOLD: f64 = 70.0;

/// `numerator / denominator`, or `0.0` unless the denominator is positive.
///
/// Reports display the zero as `"-"`. A NaN denominator also yields zero.
#[must_use]
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// `achieved / target * 100`, or `0.0` when there is no target.
#[must_use]
pub fn percent_of(achieved: f64, target: f64) -> f64 {
    ratio_or_zero(achieved, target) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Good,
    Warning,
    Critical,
}

impl DeliveryStatus {
    /// Classify a delivery percentage (achieved as a share of target).
    #[must_use]
    pub fn classify(delivery_percent: f64) -> Self {
        if delivery_percent >= GOOD_THRESHOLD {
            DeliveryStatus::Good
        } else if delivery_percent >= WARNING_THRESHOLD {
            DeliveryStatus::Warning
        } else {
            DeliveryStatus::Critical
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::Good => write!(f, "good"),
            DeliveryStatus::Warning => write!(f, "warning"),
            DeliveryStatus::Critical => write!(f, "critical"),
        }
    }
}

/// A target/achieved pair with its delivery percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub target: f64,
    pub achieved: f64,
    pub delivery_percent: f64,
    pub status: DeliveryStatus,
}

impl Delivery {
    #[must_use]
    pub fn new(target: f64, achieved: f64) -> Self {
        let delivery_percent = percent_of(achieved, target);
        Self {
            target,
            achieved,
            delivery_percent,
            status: DeliveryStatus::classify(delivery_percent),
        }
    }
}
