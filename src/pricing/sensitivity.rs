//! Three-point sensitivity band around an expected impact

use serde::{Deserialize, Serialize};

/// One point on the sensitivity band: impact percent and PMPM cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Impact as a percentage of base premium
    pub percent: f64,

    /// Per-member-per-month cost, SAR
    pub pmpm: f64,
}

impl SensitivityPoint {
    pub fn new(percent: f64, pmpm: f64) -> Self {
        Self { percent, pmpm }
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            percent: self.percent * factor,
            pmpm: self.pmpm * factor,
        }
    }
}

/// Best/expected/worst triple with a ±25% band around the expected case
///
/// Numeric ordering `best_case.percent <= expected.percent <=
/// worst_case.percent` always holds: for a cost decrease the scale factors
/// swap sides so the deeper saving is the best case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityBand {
    pub best_case: SensitivityPoint,
    pub expected: SensitivityPoint,
    pub worst_case: SensitivityPoint,
}

/// Band half-width: best/worst are ±25% of expected
pub const SENSITIVITY_SPREAD: f64 = 0.25;

impl SensitivityBand {
    /// Build the ±25% band around an expected point
    pub fn around(expected: SensitivityPoint) -> Self {
        let low = expected.scaled(1.0 - SENSITIVITY_SPREAD);
        let high = expected.scaled(1.0 + SENSITIVITY_SPREAD);

        if expected.percent >= 0.0 {
            Self { best_case: low, expected, worst_case: high }
        } else {
            Self { best_case: high, expected, worst_case: low }
        }
    }

    /// Build a band from three independently computed points, ordering them
    /// so the cheapest outcome is the best case
    pub fn from_points(low: SensitivityPoint, expected: SensitivityPoint, high: SensitivityPoint) -> Self {
        if low.percent <= high.percent {
            Self { best_case: low, expected, worst_case: high }
        } else {
            Self { best_case: high, expected, worst_case: low }
        }
    }

    /// A zero-width band at zero impact
    pub fn zero() -> Self {
        let zero = SensitivityPoint::new(0.0, 0.0);
        Self { best_case: zero, expected: zero, worst_case: zero }
    }

    /// Check the band's ordering invariant
    pub fn is_ordered(&self) -> bool {
        self.best_case.percent <= self.expected.percent
            && self.expected.percent <= self.worst_case.percent
    }
}
