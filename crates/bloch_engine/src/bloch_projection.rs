// =============================================================================
// Quantum State Visualizer - Bloch Projection
// =============================================================================
// Table of Contents:
//   1. Pauli matrices
//   2. BlochVector - Cartesian point in the unit ball
//   3. project_to_bloch_vector - Pauli expectation values
// =============================================================================
// Purpose: Maps a reduced density matrix to (x, y, z) = (Tr rho.sx, Tr rho.sy,
//          Tr rho.sz). For a Hermitian input the traces are real; an imaginary
//          residue means an upstream stage is broken.
// =============================================================================

use crate::error::InternalConsistencyError;
use crate::partial_trace::ReducedDensityMatrix;
use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

// =============================================================================
// 1. Pauli matrices
// =============================================================================

pub fn pauli_x() -> Array2<Complex64> {
    array![
        [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]
    ]
}

pub fn pauli_y() -> Array2<Complex64> {
    array![
        [Complex64::new(0.0, 0.0), Complex64::new(0.0, -1.0)],
        [Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)]
    ]
}

pub fn pauli_z() -> Array2<Complex64> {
    array![
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)]
    ]
}

// =============================================================================
// 2. BlochVector - Cartesian point in the unit ball
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn north_pole() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn south_pole() -> Self {
        Self::new(0.0, 0.0, -1.0)
    }

    pub fn from_angles(theta: f64, phi: f64) -> Self {
        Self::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
    }

    /// Purity magnitude: 1 for a pure qubit, 0 when maximally mixed.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_pure(&self, tolerance: f64) -> bool {
        (self.length() - 1.0).abs() <= tolerance
    }

    /// Polar angle theta in [0, pi] and azimuth phi in (-pi, pi]. Both are 0
    /// at the centre of the ball.
    pub fn spherical_angles(&self) -> (f64, f64) {
        let radius = self.length();
        if radius < 1e-10 {
            return (0.0, 0.0);
        }
        let theta = (self.z / radius).clamp(-1.0, 1.0).acos();
        let phi = self.y.atan2(self.x);
        (theta, phi)
    }

    pub fn distance_to(&self, other: &BlochVector) -> f64 {
        BlochVector::new(self.x - other.x, self.y - other.y, self.z - other.z).length()
    }
}

// =============================================================================
// 3. project_to_bloch_vector - Pauli expectation values
// =============================================================================

fn expectation_value(
    reduced: &ReducedDensityMatrix,
    pauli: &Array2<Complex64>,
    axis: char,
    tolerance: f64,
) -> Result<f64, InternalConsistencyError> {
    let value: Complex64 = reduced.elements().dot(pauli).diag().sum();
    if value.im.abs() > tolerance {
        return Err(InternalConsistencyError::ImaginaryExpectationValue {
            qubit: reduced.qubit_index(),
            axis,
            imaginary: value.im,
            tolerance,
        });
    }
    Ok(value.re)
}

pub fn project_to_bloch_vector(
    reduced: &ReducedDensityMatrix,
    tolerance: f64,
) -> Result<BlochVector, InternalConsistencyError> {
    let projected = (|| -> Result<BlochVector, InternalConsistencyError> {
        Ok(BlochVector::new(
            expectation_value(reduced, &pauli_x(), 'x', tolerance)?,
            expectation_value(reduced, &pauli_y(), 'y', tolerance)?,
            expectation_value(reduced, &pauli_z(), 'z', tolerance)?,
        ))
    })();

    let bloch = match projected {
        Ok(bloch) => bloch,
        Err(err) => {
            tracing::error!(qubit = reduced.qubit_index(), error = %err, "Bloch projection failed");
            return Err(err);
        }
    };

    let length = bloch.length();
    if length > 1.0 + tolerance {
        tracing::error!(qubit = reduced.qubit_index(), length, "Bloch vector escaped the unit ball");
        return Err(InternalConsistencyError::BlochVectorOutsideBall {
            qubit: reduced.qubit_index(),
            length,
            tolerance,
        });
    }

    Ok(bloch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f64 = 1e-9;

    fn pure_qubit(alpha: Complex64, beta: Complex64) -> ReducedDensityMatrix {
        ReducedDensityMatrix::from_elements(
            0,
            [
                [alpha * alpha.conj(), alpha * beta.conj()],
                [beta * alpha.conj(), beta * beta.conj()],
            ],
        )
    }

    fn assert_bloch(actual: BlochVector, expected: BlochVector) {
        assert!(
            actual.distance_to(&expected) < 1e-12,
            "got {actual:?}, expected {expected:?}"
        );
    }

    #[test]
    fn test_cardinal_states() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        let ih = Complex64::new(0.0, std::f64::consts::FRAC_1_SQRT_2);

        let project = |rho: ReducedDensityMatrix| project_to_bloch_vector(&rho, TOLERANCE).unwrap();
        assert_bloch(project(pure_qubit(one, zero)), BlochVector::north_pole());
        assert_bloch(project(pure_qubit(zero, one)), BlochVector::south_pole());
        assert_bloch(project(pure_qubit(h, h)), BlochVector::new(1.0, 0.0, 0.0));
        assert_bloch(project(pure_qubit(h, -h)), BlochVector::new(-1.0, 0.0, 0.0));
        assert_bloch(project(pure_qubit(h, ih)), BlochVector::new(0.0, 1.0, 0.0));
        assert_bloch(project(pure_qubit(h, -ih)), BlochVector::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_maximally_mixed_is_origin() {
        let zero = Complex64::new(0.0, 0.0);
        let half = Complex64::new(0.5, 0.0);
        let rho = ReducedDensityMatrix::from_elements(3, [[half, zero], [zero, half]]);
        let bloch = project_to_bloch_vector(&rho, TOLERANCE).unwrap();
        assert!(bloch.length() < 1e-12);
        assert_eq!(bloch.spherical_angles(), (0.0, 0.0));
    }

    #[test]
    fn test_imaginary_residue_is_reported() {
        // anti-Hermitian off-diagonal: <sigma_x> picks up an imaginary part
        let rho = ReducedDensityMatrix::from_elements(
            2,
            [
                [Complex64::new(0.5, 0.0), Complex64::new(0.0, 0.25)],
                [Complex64::new(0.0, 0.25), Complex64::new(0.5, 0.0)],
            ],
        );
        let err = project_to_bloch_vector(&rho, TOLERANCE).unwrap_err();
        assert!(matches!(
            err,
            InternalConsistencyError::ImaginaryExpectationValue { qubit: 2, axis: 'x', .. }
        ));
    }

    #[test]
    fn test_vector_outside_ball_is_reported() {
        let zero = Complex64::new(0.0, 0.0);
        let rho = ReducedDensityMatrix::from_elements(
            0,
            [[Complex64::new(1.5, 0.0), zero], [zero, Complex64::new(-0.5, 0.0)]],
        );
        assert!(matches!(
            project_to_bloch_vector(&rho, TOLERANCE),
            Err(InternalConsistencyError::BlochVectorOutsideBall { .. })
        ));
    }

    #[test]
    fn test_spherical_angles_round_trip() {
        let bloch = BlochVector::from_angles(FRAC_PI_2, PI / 4.0);
        let (theta, phi) = bloch.spherical_angles();
        assert!((theta - FRAC_PI_2).abs() < 1e-12);
        assert!((phi - PI / 4.0).abs() < 1e-12);
        assert!(bloch.is_pure(1e-12));
    }
}
