// =============================================================================
// Quantum State Visualizer - Partial Trace Engine
// =============================================================================
// Table of Contents:
//   1. ReducedDensityMatrix - 2x2 single-qubit operator
//   2. reduce_to_single_qubit - Trace out all spectator qubits
//   3. Consistency validation
// =============================================================================
// Purpose: rho_q[a][b] = sum over spectator words s of rho[idx(a, s), idx(b, s)],
//          where idx inserts bit a (or b) at position q of the (N-1)-bit word s.
//          Each of the 2^(N-1) spectator assignments is visited exactly once
//          per (a, b) pair.
// =============================================================================

use crate::density_matrix::DensityMatrix;
use crate::error::{DimensionError, InternalConsistencyError, QuantumResult};
use crate::state_backend::insert_bit;
use ndarray::Array2;
use num_complex::Complex64;

// =============================================================================
// 1. ReducedDensityMatrix - 2x2 single-qubit operator
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReducedDensityMatrix {
    qubit_index: usize,
    elements: Array2<Complex64>,
}

impl ReducedDensityMatrix {
    /// Wraps an arbitrary 2x2 matrix; no invariants are checked here.
    pub fn from_elements(qubit_index: usize, elements: [[Complex64; 2]; 2]) -> Self {
        Self {
            qubit_index,
            elements: Array2::from_shape_fn((2, 2), |(row, col)| elements[row][col]),
        }
    }

    pub fn qubit_index(&self) -> usize {
        self.qubit_index
    }

    pub fn element(&self, row: usize, col: usize) -> Complex64 {
        self.elements[[row, col]]
    }

    pub fn elements(&self) -> &Array2<Complex64> {
        &self.elements
    }

    pub fn trace(&self) -> Complex64 {
        self.elements[[0, 0]] + self.elements[[1, 1]]
    }

    pub fn hermiticity_deviation(&self) -> f64 {
        let off_diagonal = (self.elements[[0, 1]] - self.elements[[1, 0]].conj()).norm();
        let diagonal = self.elements[[0, 0]].im.abs().max(self.elements[[1, 1]].im.abs());
        off_diagonal.max(diagonal)
    }

    /// Rows of `[re, im]` pairs, the shape the UI expects.
    pub fn to_real_imaginary_pairs(&self) -> [[[f64; 2]; 2]; 2] {
        let pair = |row: usize, col: usize| {
            let value = self.elements[[row, col]];
            [value.re, value.im]
        };
        [[pair(0, 0), pair(0, 1)], [pair(1, 0), pair(1, 1)]]
    }

    // =========================================================================
    // 3. Consistency validation
    // =========================================================================

    pub fn validate(&self, tolerance: f64) -> Result<(), InternalConsistencyError> {
        let trace = self.trace();
        if (trace - Complex64::new(1.0, 0.0)).norm() > tolerance {
            return Err(InternalConsistencyError::TraceDeviation {
                qubit: self.qubit_index,
                trace_real: trace.re,
                trace_imaginary: trace.im,
                tolerance,
            });
        }

        let deviation = self.hermiticity_deviation();
        if deviation > tolerance {
            return Err(InternalConsistencyError::NonHermitian {
                qubit: self.qubit_index,
                deviation,
                tolerance,
            });
        }

        Ok(())
    }
}

// =============================================================================
// 2. reduce_to_single_qubit - Trace out all spectator qubits
// =============================================================================

/// Raw partial trace without tolerance checks.
pub fn partial_trace_single_qubit(
    density_matrix: &DensityMatrix,
    qubit: usize,
) -> Result<ReducedDensityMatrix, DimensionError> {
    let number_of_quantum_bits = density_matrix.number_of_quantum_bits();
    if qubit >= number_of_quantum_bits {
        return Err(DimensionError::new(qubit, number_of_quantum_bits));
    }

    let spectator_configurations = 1usize << (number_of_quantum_bits - 1);
    let mut reduced = [[Complex64::new(0.0, 0.0); 2]; 2];

    for (row_bit, reduced_row) in reduced.iter_mut().enumerate() {
        for (col_bit, entry) in reduced_row.iter_mut().enumerate() {
            *entry = (0..spectator_configurations)
                .map(|spectators| {
                    density_matrix.element(
                        insert_bit(spectators, qubit, row_bit),
                        insert_bit(spectators, qubit, col_bit),
                    )
                })
                .sum();
        }
    }

    Ok(ReducedDensityMatrix::from_elements(qubit, reduced))
}

/// Partial trace followed by the trace/Hermiticity checks. A failed check is
/// an implementation defect and is logged as such.
pub fn reduce_to_single_qubit(
    density_matrix: &DensityMatrix,
    qubit: usize,
    tolerance: f64,
) -> QuantumResult<ReducedDensityMatrix> {
    let reduced = partial_trace_single_qubit(density_matrix, qubit)?;
    if let Err(err) = reduced.validate(tolerance) {
        tracing::error!(qubit, error = %err, "partial trace produced an invalid reduced density matrix");
        return Err(err.into());
    }
    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_program::QuantumCircuitDescription;
    use crate::state_backend::{QuantumStateVector, StateVectorSimulator};

    const TOLERANCE: f64 = 1e-9;

    fn density_for(circuit: &QuantumCircuitDescription) -> DensityMatrix {
        let state = StateVectorSimulator::new(TOLERANCE)
            .execute_statevector_only(circuit)
            .unwrap();
        DensityMatrix::from_state_vector(&state)
    }

    fn assert_matrix(reduced: &ReducedDensityMatrix, expected: [[Complex64; 2]; 2]) {
        for row in 0..2 {
            for col in 0..2 {
                assert!(
                    (reduced.element(row, col) - expected[row][col]).norm() < 1e-12,
                    "qubit {} entry ({row},{col}) = {}, expected {}",
                    reduced.qubit_index(),
                    reduced.element(row, col),
                    expected[row][col]
                );
            }
        }
    }

    /// Brute force: sum rho[i][j] over all pairs whose spectator bits agree.
    fn reference_partial_trace(rho: &DensityMatrix, qubit: usize) -> [[Complex64; 2]; 2] {
        let mask = 1usize << qubit;
        let mut reduced = [[Complex64::new(0.0, 0.0); 2]; 2];
        for i in 0..rho.dimension() {
            for j in 0..rho.dimension() {
                if i & !mask == j & !mask {
                    reduced[(i >> qubit) & 1][(j >> qubit) & 1] += rho.element(i, j);
                }
            }
        }
        reduced
    }

    #[test]
    fn test_every_basis_state_every_qubit() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        for qubits in 1..=5usize {
            for basis_index in 0..(1usize << qubits) {
                let rho =
                    DensityMatrix::from_state_vector(&QuantumStateVector::basis_state(qubits, basis_index));
                for qubit in 0..qubits {
                    let reduced = reduce_to_single_qubit(&rho, qubit, TOLERANCE).unwrap();
                    let expected = if (basis_index >> qubit) & 1 == 0 {
                        [[one, zero], [zero, zero]]
                    } else {
                        [[zero, zero], [zero, one]]
                    };
                    assert_matrix(&reduced, expected);
                }
            }
        }
    }

    #[test]
    fn test_bell_state_is_maximally_mixed() {
        let mut circuit = QuantumCircuitDescription::new(2).unwrap();
        circuit.apply_hadamard_gate(0).unwrap();
        circuit.apply_controlled_not_gate(0, 1).unwrap();
        let rho = density_for(&circuit);

        let half = Complex64::new(0.5, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        for qubit in 0..2 {
            let reduced = reduce_to_single_qubit(&rho, qubit, TOLERANCE).unwrap();
            assert_matrix(&reduced, [[half, zero], [zero, half]]);
        }
    }

    #[test]
    fn test_product_state_keeps_coherence_on_each_qubit() {
        // |+⟩ on qubit 0, |1⟩ on qubit 2, |0⟩ on qubit 1
        let mut circuit = QuantumCircuitDescription::new(3).unwrap();
        circuit.apply_hadamard_gate(0).unwrap();
        circuit.apply_pauli_x_gate(2).unwrap();
        let rho = density_for(&circuit);

        let half = Complex64::new(0.5, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        assert_matrix(
            &reduce_to_single_qubit(&rho, 0, TOLERANCE).unwrap(),
            [[half, half], [half, half]],
        );
        assert_matrix(
            &reduce_to_single_qubit(&rho, 1, TOLERANCE).unwrap(),
            [[one, zero], [zero, zero]],
        );
        assert_matrix(
            &reduce_to_single_qubit(&rho, 2, TOLERANCE).unwrap(),
            [[zero, zero], [zero, one]],
        );
    }

    #[test]
    fn test_matches_brute_force_reference_on_five_qubits() {
        let mut circuit = QuantumCircuitDescription::new(5).unwrap();
        circuit.apply_hadamard_gate(0).unwrap();
        circuit.apply_rotation_y_gate(1, 0.4).unwrap();
        circuit.apply_rotation_x_gate(3, 2.1).unwrap();
        circuit.apply_controlled_not_gate(0, 4).unwrap();
        circuit.apply_controlled_z_gate(3, 1).unwrap();
        circuit.apply_rotation_z_gate(4, 0.9).unwrap();
        circuit.apply_controlled_not_gate(4, 2).unwrap();
        circuit.apply_pauli_y_gate(2).unwrap();
        let rho = density_for(&circuit);

        for qubit in 0..5 {
            let reduced = reduce_to_single_qubit(&rho, qubit, TOLERANCE).unwrap();
            assert_matrix(&reduced, reference_partial_trace(&rho, qubit));
        }
    }

    #[test]
    fn test_qubit_out_of_range() {
        let rho = DensityMatrix::from_state_vector(&QuantumStateVector::zero_state(2));
        let err = reduce_to_single_qubit(&rho, 2, TOLERANCE).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_flags_bad_trace_and_hermiticity() {
        let zero = Complex64::new(0.0, 0.0);
        let bad_trace = ReducedDensityMatrix::from_elements(
            1,
            [[Complex64::new(0.7, 0.0), zero], [zero, Complex64::new(0.7, 0.0)]],
        );
        assert!(matches!(
            bad_trace.validate(TOLERANCE),
            Err(InternalConsistencyError::TraceDeviation { qubit: 1, .. })
        ));

        let not_hermitian = ReducedDensityMatrix::from_elements(
            0,
            [
                [Complex64::new(0.5, 0.0), Complex64::new(0.1, 0.2)],
                [Complex64::new(0.1, 0.2), Complex64::new(0.5, 0.0)],
            ],
        );
        assert!(matches!(
            not_hermitian.validate(TOLERANCE),
            Err(InternalConsistencyError::NonHermitian { qubit: 0, .. })
        ));
    }

    #[test]
    fn test_real_imaginary_pairs_layout() {
        let reduced = ReducedDensityMatrix::from_elements(
            0,
            [
                [Complex64::new(0.5, 0.0), Complex64::new(0.0, -0.5)],
                [Complex64::new(0.0, 0.5), Complex64::new(0.5, 0.0)],
            ],
        );
        let pairs = reduced.to_real_imaginary_pairs();
        assert_eq!(pairs[0][1], [0.0, -0.5]);
        assert_eq!(pairs[1][0], [0.0, 0.5]);
    }
}
