// =============================================================================
// Quantum State Visualizer - Numerical Configuration
// =============================================================================
// Purpose: Tolerances shared by every consistency check in the pipeline.
// =============================================================================

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONSISTENCY_TOLERANCE: f64 = 1e-9;
/// Tighter tolerances are routinely broken by f64 rounding alone.
pub const MINIMUM_CONSISTENCY_TOLERANCE: f64 = 1e-15;
pub const MAXIMUM_CONSISTENCY_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericalTolerances {
    /// Allowed deviation for state norm, reduced-matrix trace and
    /// Hermiticity, imaginary Bloch residues and Bloch vector length.
    pub consistency_tolerance: f64,
}

impl Default for NumericalTolerances {
    fn default() -> Self {
        Self {
            consistency_tolerance: DEFAULT_CONSISTENCY_TOLERANCE,
        }
    }
}

impl NumericalTolerances {
    pub fn new(consistency_tolerance: f64) -> Self {
        Self {
            consistency_tolerance,
        }
    }

    pub fn strict() -> Self {
        Self::new(1e-12)
    }

    pub fn is_valid(&self) -> bool {
        (MINIMUM_CONSISTENCY_TOLERANCE..=MAXIMUM_CONSISTENCY_TOLERANCE)
            .contains(&self.consistency_tolerance)
    }
}
