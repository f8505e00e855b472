// =============================================================================
// Quantum State Visualizer - Static Catalogs
// =============================================================================
// Table of Contents:
//   1. GateCatalog - Gates the circuit builder may offer
//   2. ExampleCircuit - Ready-made demonstration circuits
// =============================================================================

use crate::circuit_program::{CircuitRequestPayload, GateRequestPayload};
use crate::gate_operations::GateKind;
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// 1. GateCatalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateCatalogEntry {
    #[serde(rename = "type")]
    pub gate_type: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub description: &'static str,
    pub parameters: Vec<&'static str>,
    pub arity: usize,
    pub has_angle: bool,
}

impl GateCatalogEntry {
    pub fn for_gate(kind: GateKind) -> Self {
        let (name, symbol, description) = match kind {
            GateKind::H => ("Hadamard", "H", "Creates superposition"),
            GateKind::X => ("Pauli-X", "X", "Bit flip gate"),
            GateKind::Y => ("Pauli-Y", "Y", "Bit and phase flip gate"),
            GateKind::Z => ("Pauli-Z", "Z", "Phase flip gate"),
            GateKind::Rx => ("Rotation-X", "RX", "Rotation around X-axis"),
            GateKind::Ry => ("Rotation-Y", "RY", "Rotation around Y-axis"),
            GateKind::Rz => ("Rotation-Z", "RZ", "Rotation around Z-axis"),
            GateKind::Cx => ("CNOT", "CX", "Controlled-X gate"),
            GateKind::Cz => ("Controlled-Z", "CZ", "Controlled-Z gate"),
        };

        let parameters = match (kind.arity(), kind.requires_angle()) {
            (1, false) => vec!["qubit"],
            (1, true) => vec!["qubit", "angle"],
            _ => vec!["control", "target"],
        };

        Self {
            gate_type: kind.tag(),
            name,
            symbol,
            description,
            parameters,
            arity: kind.arity(),
            has_angle: kind.requires_angle(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateCatalog {
    pub single_qubit: Vec<GateCatalogEntry>,
    pub two_qubit: Vec<GateCatalogEntry>,
}

pub fn supported_gate_catalog() -> GateCatalog {
    let (single_qubit, two_qubit) = GateKind::ALL
        .iter()
        .map(|kind| GateCatalogEntry::for_gate(*kind))
        .partition(|entry| entry.arity == 1);
    GateCatalog {
        single_qubit,
        two_qubit,
    }
}

// =============================================================================
// 2. ExampleCircuit
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleCircuit {
    pub name: &'static str,
    pub description: &'static str,
    pub circuit: CircuitRequestPayload,
}

impl ExampleCircuit {
    fn new(
        name: &'static str,
        description: &'static str,
        num_qubits: i64,
        gates: Vec<GateRequestPayload>,
    ) -> Self {
        Self {
            name,
            description,
            circuit: CircuitRequestPayload {
                num_qubits: Some(num_qubits),
                gates,
            },
        }
    }
}

/// Keyed by a stable identifier the UI uses to look examples up.
pub fn example_circuit_library() -> BTreeMap<&'static str, ExampleCircuit> {
    BTreeMap::from([
        (
            "bell_state",
            ExampleCircuit::new(
                "Bell State (Entangled Qubits)",
                "Creates maximum entanglement between two qubits",
                2,
                vec![
                    GateRequestPayload::single("h", 0),
                    GateRequestPayload::controlled("cx", 0, 1),
                ],
            ),
        ),
        (
            "ghz_state",
            ExampleCircuit::new(
                "GHZ State (3 Qubits)",
                "Three-qubit entangled state",
                3,
                vec![
                    GateRequestPayload::single("h", 0),
                    GateRequestPayload::controlled("cx", 0, 1),
                    GateRequestPayload::controlled("cx", 1, 2),
                ],
            ),
        ),
        (
            "superposition",
            ExampleCircuit::new(
                "Single Qubit Superposition",
                "Single qubit in equal superposition",
                1,
                vec![GateRequestPayload::single("h", 0)],
            ),
        ),
        (
            "mixed_state",
            ExampleCircuit::new(
                "Mixed State Example",
                "Creates mixed states through partial measurement",
                2,
                vec![
                    GateRequestPayload::single("h", 0),
                    GateRequestPayload::single("h", 1),
                    GateRequestPayload::controlled("cx", 0, 1),
                ],
            ),
        ),
    ])
}
