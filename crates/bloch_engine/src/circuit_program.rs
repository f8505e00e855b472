// =============================================================================
// Quantum State Visualizer - Circuit Program IR
// =============================================================================
// Table of Contents:
//   1. Qubit count bounds
//   2. GateApplication - One validated gate in execution order
//   3. QuantumCircuitDescription - Validated circuit container
//   4. Wire payloads - Loosely typed request shape
//   5. Request decoding and validation
// =============================================================================
// Purpose: The circuit program representation consumed by the state backend.
//          Circuits can only be built through validating constructors, so the
//          simulator never sees an out-of-range qubit or a rotation without an
//          angle.
// =============================================================================

use crate::error::{DimensionError, ValidationError};
use crate::gate_operations::{
    self, GateKind, SingleQubitGateKind, TwoQubitGateKind,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// 1. Qubit count bounds
// =============================================================================

pub const MINIMUM_QUANTUM_BITS: usize = 1;
pub const MAXIMUM_QUANTUM_BITS: usize = 5;

// =============================================================================
// 2. GateApplication - One validated gate
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateApplication {
    SingleQubit {
        kind: SingleQubitGateKind,
        target_qubit: usize,
    },
    TwoQubit {
        kind: TwoQubitGateKind,
        control_qubit: usize,
        target_qubit: usize,
    },
}

impl GateApplication {
    pub fn gate_kind(&self) -> GateKind {
        match self {
            GateApplication::SingleQubit { kind, .. } => kind.gate_kind(),
            GateApplication::TwoQubit { kind, .. } => kind.gate_kind(),
        }
    }

    pub fn target_quantum_bits(&self) -> Vec<usize> {
        match *self {
            GateApplication::SingleQubit { target_qubit, .. } => vec![target_qubit],
            GateApplication::TwoQubit {
                control_qubit,
                target_qubit,
                ..
            } => vec![control_qubit, target_qubit],
        }
    }
}

// =============================================================================
// 3. QuantumCircuitDescription - Validated circuit container
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct QuantumCircuitDescription {
    number_of_quantum_bits: usize,
    gate_applications: Vec<GateApplication>,
}

impl QuantumCircuitDescription {
    pub fn new(number_of_quantum_bits: usize) -> Result<Self, ValidationError> {
        check_qubit_count(number_of_quantum_bits as i64)?;
        Ok(Self {
            number_of_quantum_bits,
            gate_applications: Vec::new(),
        })
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn gate_count(&self) -> usize {
        self.gate_applications.len()
    }

    pub fn gate_applications(&self) -> &[GateApplication] {
        &self.gate_applications
    }

    pub fn add_gate_application(
        &mut self,
        gate: GateApplication,
    ) -> Result<&mut Self, ValidationError> {
        let position = self.gate_applications.len();
        let total = self.number_of_quantum_bits;
        let in_range = |qubit: usize| -> Result<(), ValidationError> {
            if qubit < total {
                Ok(())
            } else {
                Err(ValidationError::Dimension {
                    position: Some(position),
                    source: DimensionError::new(qubit, total),
                })
            }
        };

        match gate {
            GateApplication::SingleQubit { target_qubit, .. } => in_range(target_qubit)?,
            GateApplication::TwoQubit {
                control_qubit,
                target_qubit,
                ..
            } => {
                in_range(control_qubit)?;
                in_range(target_qubit)?;
                if control_qubit == target_qubit {
                    return Err(ValidationError::SameControlTarget {
                        position,
                        qubit: control_qubit,
                    });
                }
            }
        }

        self.gate_applications.push(gate);
        Ok(self)
    }

    pub fn apply_single_qubit_gate(
        &mut self,
        kind: SingleQubitGateKind,
        qubit: usize,
    ) -> Result<&mut Self, ValidationError> {
        self.add_gate_application(GateApplication::SingleQubit {
            kind,
            target_qubit: qubit,
        })
    }

    pub fn apply_hadamard_gate(&mut self, qubit: usize) -> Result<&mut Self, ValidationError> {
        self.apply_single_qubit_gate(SingleQubitGateKind::Hadamard, qubit)
    }

    pub fn apply_pauli_x_gate(&mut self, qubit: usize) -> Result<&mut Self, ValidationError> {
        self.apply_single_qubit_gate(SingleQubitGateKind::PauliX, qubit)
    }

    pub fn apply_pauli_y_gate(&mut self, qubit: usize) -> Result<&mut Self, ValidationError> {
        self.apply_single_qubit_gate(SingleQubitGateKind::PauliY, qubit)
    }

    pub fn apply_pauli_z_gate(&mut self, qubit: usize) -> Result<&mut Self, ValidationError> {
        self.apply_single_qubit_gate(SingleQubitGateKind::PauliZ, qubit)
    }

    pub fn apply_rotation_x_gate(
        &mut self,
        qubit: usize,
        theta: f64,
    ) -> Result<&mut Self, ValidationError> {
        let kind = self.checked_rotation(GateKind::Rx, theta)?;
        self.apply_single_qubit_gate(kind, qubit)
    }

    pub fn apply_rotation_y_gate(
        &mut self,
        qubit: usize,
        theta: f64,
    ) -> Result<&mut Self, ValidationError> {
        let kind = self.checked_rotation(GateKind::Ry, theta)?;
        self.apply_single_qubit_gate(kind, qubit)
    }

    pub fn apply_rotation_z_gate(
        &mut self,
        qubit: usize,
        theta: f64,
    ) -> Result<&mut Self, ValidationError> {
        let kind = self.checked_rotation(GateKind::Rz, theta)?;
        self.apply_single_qubit_gate(kind, qubit)
    }

    pub fn apply_controlled_not_gate(
        &mut self,
        control: usize,
        target: usize,
    ) -> Result<&mut Self, ValidationError> {
        self.add_gate_application(GateApplication::TwoQubit {
            kind: TwoQubitGateKind::ControlledNot,
            control_qubit: control,
            target_qubit: target,
        })
    }

    pub fn apply_controlled_z_gate(
        &mut self,
        control: usize,
        target: usize,
    ) -> Result<&mut Self, ValidationError> {
        self.add_gate_application(GateApplication::TwoQubit {
            kind: TwoQubitGateKind::ControlledZ,
            control_qubit: control,
            target_qubit: target,
        })
    }

    fn checked_rotation(
        &self,
        kind: GateKind,
        theta: f64,
    ) -> Result<SingleQubitGateKind, ValidationError> {
        gate_operations::single_qubit_gate_from_tag(kind.tag(), Some(theta)).map_err(|source| {
            ValidationError::InvalidGate {
                position: Some(self.gate_applications.len()),
                source,
            }
        })
    }

    /// Re-encodes the circuit in the wire shape accepted by `from_request`.
    pub fn to_request_payload(&self) -> CircuitRequestPayload {
        let gates = self
            .gate_applications
            .iter()
            .map(|gate| match *gate {
                GateApplication::SingleQubit { kind, target_qubit } => GateRequestPayload {
                    gate_type: kind.gate_kind().tag().to_string(),
                    qubit: Some(target_qubit as i64),
                    control: None,
                    target: None,
                    angle: kind.angle(),
                },
                GateApplication::TwoQubit {
                    kind,
                    control_qubit,
                    target_qubit,
                } => GateRequestPayload {
                    gate_type: kind.gate_kind().tag().to_string(),
                    qubit: None,
                    control: Some(control_qubit as i64),
                    target: Some(target_qubit as i64),
                    angle: None,
                },
            })
            .collect();

        CircuitRequestPayload {
            num_qubits: Some(self.number_of_quantum_bits as i64),
            gates,
        }
    }
}

fn check_qubit_count(requested: i64) -> Result<usize, ValidationError> {
    let minimum = MINIMUM_QUANTUM_BITS as i64;
    let maximum = MAXIMUM_QUANTUM_BITS as i64;
    if (minimum..=maximum).contains(&requested) {
        Ok(requested as usize)
    } else {
        Err(ValidationError::QubitCountOutOfRange {
            requested,
            minimum: MINIMUM_QUANTUM_BITS,
            maximum: MAXIMUM_QUANTUM_BITS,
        })
    }
}

// =============================================================================
// 4. Wire payloads - Loosely typed request shape
// =============================================================================

/// `{num_qubits, gates}` as sent by the circuit builder. Indices are signed so
/// negative values reach validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitRequestPayload {
    #[serde(default)]
    pub num_qubits: Option<i64>,
    #[serde(default)]
    pub gates: Vec<GateRequestPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRequestPayload {
    #[serde(rename = "type")]
    pub gate_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl GateRequestPayload {
    pub fn single(gate_type: &str, qubit: i64) -> Self {
        Self {
            gate_type: gate_type.to_string(),
            qubit: Some(qubit),
            control: None,
            target: None,
            angle: None,
        }
    }

    pub fn rotation(gate_type: &str, qubit: i64, angle: f64) -> Self {
        Self {
            angle: Some(angle),
            ..Self::single(gate_type, qubit)
        }
    }

    pub fn controlled(gate_type: &str, control: i64, target: i64) -> Self {
        Self {
            gate_type: gate_type.to_string(),
            qubit: None,
            control: Some(control),
            target: Some(target),
            angle: None,
        }
    }
}

// =============================================================================
// 5. Request decoding and validation
// =============================================================================

impl QuantumCircuitDescription {
    pub fn from_request(payload: &CircuitRequestPayload) -> Result<Self, ValidationError> {
        let requested = payload.num_qubits.ok_or(ValidationError::MissingQubitCount)?;
        let number_of_quantum_bits = check_qubit_count(requested)?;
        let mut circuit = Self::new(number_of_quantum_bits)?;

        for (position, gate) in payload.gates.iter().enumerate() {
            let application = decode_gate(position, gate, number_of_quantum_bits)?;
            circuit.add_gate_application(application)?;
        }

        Ok(circuit)
    }
}

fn decode_gate(
    position: usize,
    gate: &GateRequestPayload,
    number_of_quantum_bits: usize,
) -> Result<GateApplication, ValidationError> {
    let invalid_gate = |source| ValidationError::InvalidGate {
        position: Some(position),
        source,
    };
    let kind = GateKind::from_tag(&gate.gate_type).map_err(invalid_gate)?;

    let qubit_field = |value: Option<i64>, field: &'static str| -> Result<usize, ValidationError> {
        let index = value.ok_or_else(|| ValidationError::MissingGateField {
            position,
            gate_type: kind.tag().to_string(),
            field,
        })?;
        if index < 0 || index >= number_of_quantum_bits as i64 {
            return Err(ValidationError::Dimension {
                position: Some(position),
                source: DimensionError::new(index, number_of_quantum_bits),
            });
        }
        Ok(index as usize)
    };

    if kind.arity() == 1 {
        let single = gate_operations::single_qubit_gate_from_tag(kind.tag(), gate.angle)
            .map_err(invalid_gate)?;
        Ok(GateApplication::SingleQubit {
            kind: single,
            target_qubit: qubit_field(gate.qubit, "qubit")?,
        })
    } else {
        let two = gate_operations::two_qubit_gate_from_tag(kind.tag()).map_err(invalid_gate)?;
        Ok(GateApplication::TwoQubit {
            kind: two,
            control_qubit: qubit_field(gate.control, "control")?,
            target_qubit: qubit_field(gate.target, "target")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidGateError;

    fn payload(num_qubits: i64, gates: Vec<GateRequestPayload>) -> CircuitRequestPayload {
        CircuitRequestPayload {
            num_qubits: Some(num_qubits),
            gates,
        }
    }

    #[test]
    fn test_circuit_creation() {
        let mut circuit = QuantumCircuitDescription::new(2).unwrap();
        circuit.apply_hadamard_gate(0).unwrap();
        circuit.apply_controlled_not_gate(0, 1).unwrap();

        assert_eq!(circuit.number_of_quantum_bits(), 2);
        assert_eq!(circuit.gate_count(), 2);
        assert_eq!(circuit.gate_applications()[1].target_quantum_bits(), vec![0, 1]);
    }

    #[test]
    fn test_qubit_count_bounds() {
        for bad in [0, 6, -1] {
            let err = QuantumCircuitDescription::from_request(&payload(bad, vec![])).unwrap_err();
            assert!(matches!(err, ValidationError::QubitCountOutOfRange { requested, .. } if requested == bad));
        }
        for good in 1..=5 {
            assert!(QuantumCircuitDescription::from_request(&payload(good, vec![])).is_ok());
        }
    }

    #[test]
    fn test_missing_qubit_count() {
        let err = QuantumCircuitDescription::from_request(&CircuitRequestPayload::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingQubitCount);
    }

    #[test]
    fn test_decode_preserves_order_and_angles() {
        let request = payload(
            3,
            vec![
                GateRequestPayload::single("H", 0),
                GateRequestPayload::rotation("ry", 2, 0.25),
                GateRequestPayload::controlled("cnot", 0, 1),
                GateRequestPayload::controlled("cz", 2, 0),
            ],
        );
        let circuit = QuantumCircuitDescription::from_request(&request).unwrap();
        let kinds: Vec<GateKind> = circuit
            .gate_applications()
            .iter()
            .map(GateApplication::gate_kind)
            .collect();
        assert_eq!(kinds, vec![GateKind::H, GateKind::Ry, GateKind::Cx, GateKind::Cz]);
        assert_eq!(
            circuit.gate_applications()[1],
            GateApplication::SingleQubit {
                kind: SingleQubitGateKind::RotationY { theta: 0.25 },
                target_qubit: 2,
            }
        );
    }

    #[test]
    fn test_out_of_range_and_negative_indices() {
        let err = QuantumCircuitDescription::from_request(&payload(
            2,
            vec![GateRequestPayload::single("x", 0), GateRequestPayload::single("x", 2)],
        ))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Dimension {
                position: Some(1),
                source: DimensionError { index: 2, total: 2 },
            }
        );

        let err = QuantumCircuitDescription::from_request(&payload(
            2,
            vec![GateRequestPayload::controlled("cx", -1, 0)],
        ))
        .unwrap_err();
        assert!(matches!(err, ValidationError::Dimension { source: DimensionError { index: -1, .. }, .. }));
    }

    #[test]
    fn test_control_equals_target() {
        let err = QuantumCircuitDescription::from_request(&payload(
            2,
            vec![GateRequestPayload::controlled("cz", 1, 1)],
        ))
        .unwrap_err();
        assert_eq!(err, ValidationError::SameControlTarget { position: 0, qubit: 1 });
    }

    #[test]
    fn test_missing_fields_and_angles() {
        let err = QuantumCircuitDescription::from_request(&payload(
            1,
            vec![GateRequestPayload {
                qubit: None,
                ..GateRequestPayload::single("h", 0)
            }],
        ))
        .unwrap_err();
        assert!(matches!(err, ValidationError::MissingGateField { field: "qubit", .. }));

        let err = QuantumCircuitDescription::from_request(&payload(
            1,
            vec![GateRequestPayload::single("rx", 0)],
        ))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidGate {
                position: Some(0),
                source: InvalidGateError::MissingRotationAngle { gate_type: "rx" },
            }
        );

        let err = QuantumCircuitDescription::from_request(&payload(
            1,
            vec![GateRequestPayload::single("measure", 0)],
        ))
        .unwrap_err();
        assert!(err.to_string().contains("unrecognized gate type 'measure'"));
    }

    #[test]
    fn test_builder_rejects_non_finite_rotation() {
        let mut circuit = QuantumCircuitDescription::new(1).unwrap();
        let err = circuit.apply_rotation_z_gate(0, f64::NAN).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidGate { position: Some(0), .. }));
        assert_eq!(circuit.gate_count(), 0);
    }

    #[test]
    fn test_wire_format_round_trip_through_json() {
        let json = r#"{"num_qubits": 2, "gates": [
            {"type": "h", "qubit": 0},
            {"type": "rz", "qubit": 1, "angle": 1.5},
            {"type": "cx", "control": 0, "target": 1}
        ]}"#;
        let request: CircuitRequestPayload = serde_json::from_str(json).unwrap();
        let circuit = QuantumCircuitDescription::from_request(&request).unwrap();
        assert_eq!(circuit.to_request_payload(), request);
    }

    #[test]
    fn test_gates_default_to_empty() {
        let request: CircuitRequestPayload = serde_json::from_str(r#"{"num_qubits": 3}"#).unwrap();
        let circuit = QuantumCircuitDescription::from_request(&request).unwrap();
        assert_eq!(circuit.gate_count(), 0);
    }
}
