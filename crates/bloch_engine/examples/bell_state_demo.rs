// =============================================================================
// Quantum State Visualizer - Bell State Demo
// =============================================================================
// Table of Contents:
//   1. Circuit construction
//   2. State vector and probabilities
//   3. Per-qubit Bloch vectors
//   4. Wire response
// =============================================================================
// Purpose: Walks a Bell circuit through every pipeline stage and prints what
//          the visualizer would draw for each qubit.
// =============================================================================

use bloch_engine::prelude::*;

fn main() -> Result<(), QuantumRuntimeError> {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║          Quantum State Visualizer - Bell State Walkthrough       ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    // =========================================================================
    // 1. Circuit construction
    // =========================================================================
    println!("📐 Step 1: Constructing the Bell circuit");
    println!("   - Apply hadamard_gate to qubit 0");
    println!("   - Apply controlled_not_gate with control=0, target=1");
    println!();

    let mut quantum_circuit = QuantumCircuitDescription::new(2)?;
    quantum_circuit
        .apply_hadamard_gate(0)?
        .apply_controlled_not_gate(0, 1)?;

    println!("   Number of quantum bits: {}", quantum_circuit.number_of_quantum_bits());
    println!("   Gate count: {}", quantum_circuit.gate_count());
    println!();

    // =========================================================================
    // 2. State vector and probabilities
    // =========================================================================
    println!("⚡ Step 2: Simulating the state vector");
    println!();

    let execution_engine = BlochPipelineEngine::new();
    let state = execution_engine.simulate(&quantum_circuit)?;
    let width = state.number_of_quantum_bits();
    for (basis_index, probability) in state.probability_distribution().iter().enumerate() {
        // highest qubit printed first
        let label: String = (0..width)
            .rev()
            .map(|qubit| if qubit_bit(basis_index, qubit) == 1 { '1' } else { '0' })
            .collect();
        let bar: String = "█".repeat((probability * 50.0) as usize);
        println!("     |{label}⟩: {:6.2}% {bar}", probability * 100.0);
    }

    let density_matrix = DensityMatrix::from_state_vector(&state);
    println!();
    println!("   Tr(ρ) = {:.4}", density_matrix.trace().re);
    println!("   Tr(ρ²) = {:.4}", density_matrix.purity());
    println!();

    // =========================================================================
    // 3. Per-qubit Bloch vectors
    // =========================================================================
    println!("🎨 Step 3: Reducing to single-qubit Bloch vectors");
    println!();

    let response = execution_engine.process_circuit(&quantum_circuit)?;
    for report in &response.qubits {
        let bloch = report.bloch_coordinates;
        let (theta, phi) = bloch.spherical_angles();
        println!(
            "   Qubit {}: θ={:.2}rad φ={:.2}rad\n     x={:.3} y={:.3} z={:.3}\n     Purity: {:.2}%",
            report.index,
            theta,
            phi,
            bloch.x,
            bloch.y,
            bloch.z,
            report.purity * 100.0
        );
    }
    println!("   Note: both qubits of |Φ⁺⟩ sit at the centre of the sphere");
    println!();

    // =========================================================================
    // 4. Wire response
    // =========================================================================
    println!("📦 Step 4: Response as sent to the circuit builder");
    println!();
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("   serialization failed: {err}"),
    }

    Ok(())
}
