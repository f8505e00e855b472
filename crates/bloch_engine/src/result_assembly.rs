// =============================================================================
// Quantum State Visualizer - Result Assembly
// =============================================================================
// Table of Contents:
//   1. Response payloads - success and error shapes
//   2. QubitStateReport - per-qubit Bloch vector and reduced matrix
//   3. assemble_response - packaging in qubit order
// =============================================================================
// Purpose: Serializable output consumed by the circuit-builder UI. Complex
//          entries are written as explicit [re, im] pairs.
// =============================================================================

use crate::bloch_projection::BlochVector;
use crate::error::QuantumRuntimeError;
use crate::partial_trace::ReducedDensityMatrix;
use serde::{Deserialize, Serialize};

// =============================================================================
// 1. Response payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitProcessingResponse {
    pub num_qubits: usize,
    pub qubits: Vec<QubitStateReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponsePayload {
    pub error: String,
}

impl From<&QuantumRuntimeError> for ErrorResponsePayload {
    fn from(err: &QuantumRuntimeError) -> Self {
        Self {
            error: err.client_message(),
        }
    }
}

impl ErrorResponsePayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// =============================================================================
// 2. QubitStateReport
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitStateReport {
    pub index: usize,
    pub bloch_coordinates: BlochVector,
    /// `density_matrix[row][col] = [re, im]`
    pub density_matrix: [[[f64; 2]; 2]; 2],
    pub purity: f64,
}

impl QubitStateReport {
    pub fn new(reduced: &ReducedDensityMatrix, bloch: BlochVector) -> Self {
        Self {
            index: reduced.qubit_index(),
            bloch_coordinates: bloch,
            density_matrix: reduced.to_real_imaginary_pairs(),
            purity: bloch.length(),
        }
    }
}

// =============================================================================
// 3. assemble_response
// =============================================================================

/// Sorts by qubit index so the output order never depends on evaluation order.
pub fn assemble_response(
    number_of_quantum_bits: usize,
    per_qubit: impl IntoIterator<Item = (ReducedDensityMatrix, BlochVector)>,
) -> CircuitProcessingResponse {
    let mut qubits: Vec<QubitStateReport> = per_qubit
        .into_iter()
        .map(|(reduced, bloch)| QubitStateReport::new(&reduced, bloch))
        .collect();
    qubits.sort_by_key(|report| report.index);

    CircuitProcessingResponse {
        num_qubits: number_of_quantum_bits,
        qubits,
    }
}
