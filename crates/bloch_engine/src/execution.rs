// =============================================================================
// Quantum State Visualizer - Pipeline Execution Engine
// =============================================================================
// Table of Contents:
//   1. BlochPipelineEngine - Circuit to per-qubit Bloch vectors
//   2. Pipeline stages
// =============================================================================
// Purpose: Runs the single-pass pipeline
//            circuit -> state vector -> density matrix
//                    -> partial trace (per qubit) -> Bloch projection (per qubit)
//                    -> assembled response
//          The engine holds only its tolerances, so one instance can serve
//          any number of concurrent callers.
// =============================================================================

use crate::bloch_projection::{BlochVector, project_to_bloch_vector};
use crate::circuit_program::{CircuitRequestPayload, QuantumCircuitDescription};
use crate::configuration::NumericalTolerances;
use crate::density_matrix::DensityMatrix;
use crate::error::QuantumResult;
use crate::partial_trace::{ReducedDensityMatrix, reduce_to_single_qubit};
use crate::result_assembly::{CircuitProcessingResponse, assemble_response};
use crate::state_backend::{QuantumStateVector, StateVectorSimulator};

// =============================================================================
// 1. BlochPipelineEngine
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct BlochPipelineEngine {
    tolerances: NumericalTolerances,
}

impl BlochPipelineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(mut self, tolerances: NumericalTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    pub fn tolerances(&self) -> NumericalTolerances {
        self.tolerances
    }

    /// Validates the wire request, then runs the pipeline.
    pub fn process_request(
        &self,
        request: &CircuitRequestPayload,
    ) -> QuantumResult<CircuitProcessingResponse> {
        let circuit = QuantumCircuitDescription::from_request(request)?;
        self.process_circuit(&circuit)
    }

    pub fn process_circuit(
        &self,
        circuit: &QuantumCircuitDescription,
    ) -> QuantumResult<CircuitProcessingResponse> {
        let tolerance = self.tolerances.consistency_tolerance;
        let state = self.simulate(circuit)?;
        let density_matrix = DensityMatrix::from_state_vector(&state);
        tracing::debug!(
            qubits = circuit.number_of_quantum_bits(),
            gates = circuit.gate_count(),
            dimension = density_matrix.dimension(),
            "built system density matrix"
        );

        let per_qubit = (0..circuit.number_of_quantum_bits())
            .map(|qubit| -> QuantumResult<(ReducedDensityMatrix, BlochVector)> {
                let reduced = reduce_to_single_qubit(&density_matrix, qubit, tolerance)?;
                let bloch = project_to_bloch_vector(&reduced, tolerance)?;
                tracing::debug!(qubit, x = bloch.x, y = bloch.y, z = bloch.z, "projected qubit");
                Ok((reduced, bloch))
            })
            .collect::<QuantumResult<Vec<_>>>()?;

        Ok(assemble_response(circuit.number_of_quantum_bits(), per_qubit))
    }

    // =========================================================================
    // 2. Pipeline stages
    // =========================================================================

    pub fn simulate(&self, circuit: &QuantumCircuitDescription) -> QuantumResult<QuantumStateVector> {
        StateVectorSimulator::new(self.tolerances.consistency_tolerance)
            .execute_statevector_only(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_program::GateRequestPayload;

    fn request(num_qubits: i64, gates: Vec<GateRequestPayload>) -> CircuitRequestPayload {
        CircuitRequestPayload {
            num_qubits: Some(num_qubits),
            gates,
        }
    }

    fn bloch_of(response: &CircuitProcessingResponse, qubit: usize) -> BlochVector {
        response.qubits[qubit].bloch_coordinates
    }

    #[test]
    fn test_empty_circuit_points_north() {
        let response = BlochPipelineEngine::new().process_request(&request(4, vec![])).unwrap();
        assert_eq!(response.num_qubits, 4);
        assert_eq!(response.qubits.len(), 4);
        for report in &response.qubits {
            assert!(report.bloch_coordinates.distance_to(&BlochVector::north_pole()) < 1e-12);
            assert!((report.purity - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_asymmetric_circuit_moves_only_target_qubit() {
        let response = BlochPipelineEngine::new()
            .process_request(&request(2, vec![GateRequestPayload::single("x", 0)]))
            .unwrap();
        assert!(bloch_of(&response, 0).distance_to(&BlochVector::south_pole()) < 1e-12);
        assert!(bloch_of(&response, 1).distance_to(&BlochVector::north_pole()) < 1e-12);
    }

    #[test]
    fn test_rz_leaves_north_pole_invariant() {
        let engine = BlochPipelineEngine::new();
        for angle in [-7.0, -1.0, 0.0, 0.5, std::f64::consts::PI, 100.0, 1e12] {
            let response = engine
                .process_request(&request(1, vec![GateRequestPayload::rotation("rz", 0, angle)]))
                .unwrap();
            let bloch = bloch_of(&response, 0);
            assert!(
                bloch.distance_to(&BlochVector::north_pole()) < 1e-12,
                "rz({angle}) moved |0⟩ to {bloch:?}"
            );
            assert!((response.qubits[0].purity - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_with_tolerances_replaces_default() {
        let engine = BlochPipelineEngine::new();
        assert_eq!(engine.tolerances(), NumericalTolerances::default());

        let strict = engine.with_tolerances(NumericalTolerances::strict());
        assert_eq!(strict.tolerances().consistency_tolerance, 1e-12);
        let response = strict
            .process_request(&request(
                3,
                vec![
                    GateRequestPayload::single("h", 0),
                    GateRequestPayload::controlled("cx", 0, 1),
                    GateRequestPayload::controlled("cx", 1, 2),
                ],
            ))
            .unwrap();
        assert_eq!(response.qubits.len(), 3);
    }

    #[test]
    fn test_validation_errors_propagate_unchanged() {
        let err = BlochPipelineEngine::new()
            .process_request(&request(2, vec![GateRequestPayload::controlled("cx", 0, 0)]))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.client_message(),
            "Gate 0: control and target qubits must be different (both 0)"
        );
    }

    #[test]
    fn test_mixed_state_example_stays_on_plus_x() {
        // H q0, H q1, CX 0->1 leaves |+⟩|+⟩ unchanged: both qubits stay pure on +x
        let response = BlochPipelineEngine::new()
            .process_request(&request(
                2,
                vec![
                    GateRequestPayload::single("h", 0),
                    GateRequestPayload::single("h", 1),
                    GateRequestPayload::controlled("cx", 0, 1),
                ],
            ))
            .unwrap();
        for qubit in 0..2 {
            assert!(bloch_of(&response, qubit).distance_to(&BlochVector::new(1.0, 0.0, 0.0)) < 1e-9);
        }
    }

    #[test]
    fn test_partial_entanglement_shrinks_bloch_vector() {
        let response = BlochPipelineEngine::new()
            .process_request(&request(
                2,
                vec![
                    GateRequestPayload::rotation("ry", 0, std::f64::consts::FRAC_PI_4),
                    GateRequestPayload::controlled("cx", 0, 1),
                ],
            ))
            .unwrap();
        let expected_z = std::f64::consts::FRAC_PI_4.cos();
        for qubit in 0..2 {
            let bloch = bloch_of(&response, qubit);
            assert!((bloch.z - expected_z).abs() < 1e-12);
            assert!(bloch.x.abs() < 1e-12 && bloch.y.abs() < 1e-12);
            assert!(response.qubits[qubit].purity < 1.0);
        }
    }
}
