// =============================================================================
// Quantum State Visualizer - Density Matrix Builder
// =============================================================================
// Table of Contents:
//   1. DensityMatrix - Full-register operator
//   2. Construction from a pure state
//   3. Invariant checks (trace, Hermiticity, purity)
// =============================================================================
// Purpose: Forms rho = |psi⟩⟨psi| for the whole register. Storage is O(4^N),
//          which stays at most 32x32 for the supported five qubits.
// =============================================================================

use crate::state_backend::QuantumStateVector;
use ndarray::Array2;
use num_complex::Complex64;

// =============================================================================
// 1. DensityMatrix - Full-register operator
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    number_of_quantum_bits: usize,
    elements: Array2<Complex64>,
}

impl DensityMatrix {
    // =========================================================================
    // 2. Construction from a pure state
    // =========================================================================

    pub fn from_state_vector(state: &QuantumStateVector) -> Self {
        let amplitudes = state.amplitudes();
        let dimension = amplitudes.len();
        let elements = Array2::from_shape_fn((dimension, dimension), |(row, col)| {
            amplitudes[row] * amplitudes[col].conj()
        });

        Self {
            number_of_quantum_bits: state.number_of_quantum_bits(),
            elements,
        }
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn dimension(&self) -> usize {
        self.elements.nrows()
    }

    pub fn element(&self, row: usize, col: usize) -> Complex64 {
        self.elements[[row, col]]
    }

    pub fn elements(&self) -> &Array2<Complex64> {
        &self.elements
    }

    // =========================================================================
    // 3. Invariant checks
    // =========================================================================

    pub fn trace(&self) -> Complex64 {
        self.elements.diag().sum()
    }

    /// Largest |rho_ij - conj(rho_ji)| over all entries.
    pub fn hermiticity_deviation(&self) -> f64 {
        let dimension = self.dimension();
        let mut worst: f64 = 0.0;
        for row in 0..dimension {
            for col in row..dimension {
                let deviation =
                    (self.elements[[row, col]] - self.elements[[col, row]].conj()).norm();
                worst = worst.max(deviation);
            }
        }
        worst
    }

    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        self.hermiticity_deviation() <= tolerance
    }

    /// Tr(rho^2); 1 for every state this builder produces.
    pub fn purity(&self) -> f64 {
        self.elements.dot(&self.elements).diag().sum().re
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_program::QuantumCircuitDescription;
    use crate::state_backend::StateVectorSimulator;

    #[test]
    fn test_basis_state_projector() {
        let state = QuantumStateVector::basis_state(2, 0b10);
        let rho = DensityMatrix::from_state_vector(&state);
        assert_eq!(rho.dimension(), 4);
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == 2 && col == 2 { 1.0 } else { 0.0 };
                assert!((rho.element(row, col) - Complex64::new(expected, 0.0)).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_outer_product_conjugates_columns() {
        let amplitude = std::f64::consts::FRAC_1_SQRT_2;
        let state = QuantumStateVector::from_amplitudes(vec![
            Complex64::new(amplitude, 0.0),
            Complex64::new(0.0, amplitude),
        ])
        .unwrap();
        let rho = DensityMatrix::from_state_vector(&state);
        // |+i⟩⟨+i|: rho_01 = a0 * conj(a1) = -i/2
        assert!((rho.element(0, 1) - Complex64::new(0.0, -0.5)).norm() < 1e-12);
        assert!((rho.element(1, 0) - Complex64::new(0.0, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn test_invariants_for_entangled_state() {
        let mut circuit = QuantumCircuitDescription::new(3).unwrap();
        circuit.apply_hadamard_gate(0).unwrap();
        circuit.apply_rotation_y_gate(1, 0.7).unwrap();
        circuit.apply_controlled_not_gate(0, 2).unwrap();
        circuit.apply_rotation_x_gate(2, -1.9).unwrap();
        let state = StateVectorSimulator::new(1e-9)
            .execute_statevector_only(&circuit)
            .unwrap();
        let rho = DensityMatrix::from_state_vector(&state);

        assert_eq!(rho.number_of_quantum_bits(), 3);
        assert!((rho.trace() - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!(rho.is_hermitian(1e-12));
        assert!((rho.purity() - 1.0).abs() < 1e-12);
    }
}
