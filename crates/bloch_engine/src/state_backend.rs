// =============================================================================
// Quantum State Visualizer - State Backend
// =============================================================================
// Table of Contents:
//   1. Qubit ordering helpers
//   2. QuantumStateVector - Dense amplitude storage
//   3. Gate embedding - pair / quadruple contractions
//   4. StateVectorSimulator - Runs a circuit from |0...0⟩
// =============================================================================
// Purpose: Dense state vector for registers of at most five qubits. Gates act
//          on the amplitude pairs (or quadruples) that differ only in the
//          touched qubits, so each gate costs O(2^N).
//
// Qubit ordering is little-endian: qubit q owns bit q (value 1 << q) of the
// basis index, so index i encodes |b_{N-1} ... b_1 b_0⟩ with b_q = (i >> q) & 1.
// =============================================================================

use crate::circuit_program::{GateApplication, QuantumCircuitDescription};
use crate::error::{
    DimensionError, GateEmbeddingError, InternalConsistencyError, QuantumResult, ValidationError,
};
use crate::gate_operations::{SingleQubitUnitary, TwoQubitUnitary};
use num_complex::Complex64;

// =============================================================================
// 1. Qubit ordering helpers
// =============================================================================

#[inline]
pub fn qubit_mask(qubit: usize) -> usize {
    1usize << qubit
}

#[inline]
pub fn qubit_bit(basis_index: usize, qubit: usize) -> usize {
    (basis_index >> qubit) & 1
}

/// Spreads `word` apart so that bit position `position` is free, then writes
/// `bit` there. With `word` ranging over 0..2^(N-1) this enumerates every
/// basis index whose qubit `position` equals `bit`, each exactly once.
#[inline]
pub fn insert_bit(word: usize, position: usize, bit: usize) -> usize {
    let low = word & (qubit_mask(position) - 1);
    let high = (word >> position) << (position + 1);
    high | (bit << position) | low
}

// =============================================================================
// 2. QuantumStateVector - Full state vector representation
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct QuantumStateVector {
    amplitudes: Vec<Complex64>,
    number_of_quantum_bits: usize,
}

impl QuantumStateVector {
    pub fn zero_state(number_of_quantum_bits: usize) -> Self {
        let dimension = 1usize << number_of_quantum_bits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            number_of_quantum_bits,
        }
    }

    pub fn basis_state(number_of_quantum_bits: usize, basis_index: usize) -> Self {
        let mut state = Self::zero_state(number_of_quantum_bits);
        state.amplitudes[0] = Complex64::new(0.0, 0.0);
        state.amplitudes[basis_index] = Complex64::new(1.0, 0.0);
        state
    }

    /// Returns `None` unless the length is a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Option<Self> {
        let dimension = amplitudes.len();
        if !dimension.is_power_of_two() {
            return None;
        }
        Some(Self {
            number_of_quantum_bits: dimension.trailing_zeros() as usize,
            amplitudes,
        })
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    pub fn probability_distribution(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), DimensionError> {
        if qubit < self.number_of_quantum_bits {
            Ok(())
        } else {
            Err(DimensionError::new(qubit, self.number_of_quantum_bits))
        }
    }

    // =========================================================================
    // 3. Gate embedding
    // =========================================================================

    /// Applies `matrix` to `qubit`: for each index pair (i0, i1) differing
    /// only in that qubit, (a0, a1) <- matrix * (a0, a1).
    pub fn apply_single_qubit_unitary(
        &mut self,
        qubit: usize,
        matrix: &SingleQubitUnitary,
    ) -> Result<(), DimensionError> {
        self.check_qubit(qubit)?;
        let pair_count = self.dimension() >> 1;

        for spectator in 0..pair_count {
            let index_0 = insert_bit(spectator, qubit, 0);
            let index_1 = index_0 | qubit_mask(qubit);
            let a0 = self.amplitudes[index_0];
            let a1 = self.amplitudes[index_1];
            self.amplitudes[index_0] = matrix[0][0] * a0 + matrix[0][1] * a1;
            self.amplitudes[index_1] = matrix[1][0] * a0 + matrix[1][1] * a1;
        }
        Ok(())
    }

    /// Applies a 4x4 `matrix` in the local basis |control target⟩ (local
    /// index 2 * control_bit + target_bit) to every amplitude quadruple that
    /// differs only in the two touched qubits.
    pub fn apply_two_qubit_unitary(
        &mut self,
        control_qubit: usize,
        target_qubit: usize,
        matrix: &TwoQubitUnitary,
    ) -> Result<(), GateEmbeddingError> {
        self.check_qubit(control_qubit)?;
        self.check_qubit(target_qubit)?;
        if control_qubit == target_qubit {
            return Err(GateEmbeddingError::RepeatedQubit {
                qubit: control_qubit,
            });
        }

        let (low_qubit, high_qubit) = if control_qubit < target_qubit {
            (control_qubit, target_qubit)
        } else {
            (target_qubit, control_qubit)
        };
        let control_mask = qubit_mask(control_qubit);
        let target_mask = qubit_mask(target_qubit);
        let quadruple_count = self.dimension() >> 2;

        for spectator in 0..quadruple_count {
            // Insert the lower position first so the higher one stays aligned.
            let base = insert_bit(insert_bit(spectator, low_qubit, 0), high_qubit, 0);
            let indices = [
                base,
                base | target_mask,
                base | control_mask,
                base | control_mask | target_mask,
            ];
            let old = indices.map(|index| self.amplitudes[index]);

            for (row, &index) in indices.iter().enumerate() {
                self.amplitudes[index] = (0..4).map(|col| matrix[row][col] * old[col]).sum();
            }
        }
        Ok(())
    }

    pub fn apply_gate(&mut self, gate: &GateApplication) -> Result<(), GateEmbeddingError> {
        match gate {
            GateApplication::SingleQubit { kind, target_qubit } => self
                .apply_single_qubit_unitary(*target_qubit, &kind.gate_matrix())
                .map_err(GateEmbeddingError::from),
            GateApplication::TwoQubit {
                kind,
                control_qubit,
                target_qubit,
            } => self.apply_two_qubit_unitary(*control_qubit, *target_qubit, &kind.gate_matrix()),
        }
    }

    pub fn expectation_value_pauli_z(&self, qubit: usize) -> f64 {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(index, amplitude)| match qubit_bit(index, qubit) {
                0 => amplitude.norm_sqr(),
                _ => -amplitude.norm_sqr(),
            })
            .sum()
    }
}

// =============================================================================
// 4. StateVectorSimulator - Runs a circuit from |0...0⟩
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct StateVectorSimulator {
    norm_tolerance: f64,
}

impl StateVectorSimulator {
    pub fn new(norm_tolerance: f64) -> Self {
        Self { norm_tolerance }
    }

    pub fn execute_statevector_only(
        &self,
        circuit: &QuantumCircuitDescription,
    ) -> QuantumResult<QuantumStateVector> {
        let mut state = QuantumStateVector::zero_state(circuit.number_of_quantum_bits());

        for (position, gate) in circuit.gate_applications().iter().enumerate() {
            state.apply_gate(gate).map_err(|err| match err {
                GateEmbeddingError::Dimension(source) => ValidationError::Dimension {
                    position: Some(position),
                    source,
                },
                GateEmbeddingError::RepeatedQubit { qubit } => {
                    ValidationError::SameControlTarget { position, qubit }
                }
            })?;
            tracing::debug!(
                position,
                gate = %gate.gate_kind(),
                qubits = ?gate.target_quantum_bits(),
                "applied gate"
            );
        }

        let norm = state.norm();
        if (norm - 1.0).abs() > self.norm_tolerance {
            tracing::error!(norm, tolerance = self.norm_tolerance, "state vector lost normalization");
            return Err(InternalConsistencyError::StateNormDeviation {
                norm,
                tolerance: self.norm_tolerance,
            }
            .into());
        }

        Ok(state)
    }
}
