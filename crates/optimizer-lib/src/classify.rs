//! Utilization classification
//!
//! Maps a utilization percentage onto a qualitative band. The thresholds are
//! closed-open: `[.., 30)` is low, `[30, 70)` is medium, `[70, ..)` is high.
//! Values outside 0-100 are classified as-is.

use serde::Serialize;

/// Upper bound (exclusive) of the low band
pub const LOW_THRESHOLD: f64 = 30.0;

/// Upper bound (exclusive) of the medium band
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Qualitative utilization band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    /// Display severity for this band. A low band means the resource is
    /// likely over-provisioned.
    pub fn severity(self) -> Severity {
        match self {
            Band::Low => Severity::Alerting,
            Band::Medium => Severity::Neutral,
            Band::High => Severity::Nominal,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Low => write!(f, "Low"),
            Band::Medium => write!(f, "Medium"),
            Band::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Alerting,
    Neutral,
    Nominal,
}

/// Which metric a badge describes. Rendered as the column or key the
/// badge sits under; [`UtilizationBadge::label`] omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cpu,
    Memory,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Cpu => write!(f, "CPU"),
            Metric::Memory => write!(f, "Memory"),
        }
    }
}

/// Classify a utilization value. `None` means not reported.
pub fn classify(value: Option<f64>) -> Option<Band> {
    let value = value?;
    let band = if value < LOW_THRESHOLD {
        Band::Low
    } else if value < HIGH_THRESHOLD {
        Band::Medium
    } else {
        Band::High
    };
    Some(band)
}

/// A classified utilization reading ready for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationBadge {
    pub metric: Metric,
    pub value: f64,
    pub band: Band,
    pub severity: Severity,
}

impl UtilizationBadge {
    /// Build a badge, or nothing when the metric was not reported
    pub fn new(metric: Metric, value: Option<f64>) -> Option<Self> {
        let band = classify(value)?;
        Some(Self {
            metric,
            value: value?,
            band,
            severity: band.severity(),
        })
    }

    /// Badge text, e.g. `20% Low`
    pub fn label(&self) -> String {
        format!("{}% {}", self.value, self.band)
    }
}
