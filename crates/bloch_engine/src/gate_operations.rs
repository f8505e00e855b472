// =============================================================================
// Quantum State Visualizer - Gate Operations
// =============================================================================
// Table of Contents:
//   1. GateKind - Closed set of supported gate tags
//   2. Single-qubit gates (Hadamard, Pauli X/Y/Z, Rotations)
//   3. Two-qubit gates (CNOT, CZ)
//   4. Gate library lookups
//   5. Unitarity helpers
// =============================================================================
// Purpose: The fixed gate catalog. Every gate resolves to a small unitary
//          matrix; embedding into the full register is the state backend's job.
//          Two-qubit matrices use the local basis |control target⟩, i.e. local
//          index = 2 * control_bit + target_bit.
// =============================================================================

use crate::error::InvalidGateError;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

pub type SingleQubitUnitary = [[Complex64; 2]; 2];
pub type TwoQubitUnitary = [[Complex64; 4]; 4];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

// =============================================================================
// 1. GateKind - Closed set of supported gate tags
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Cx,
    Cz,
}

impl GateKind {
    pub const ALL: [GateKind; 9] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cx,
        GateKind::Cz,
    ];

    /// Case-insensitive; `cnot` is accepted for `cx`.
    pub fn from_tag(tag: &str) -> Result<Self, InvalidGateError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "h" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "rx" => Ok(GateKind::Rx),
            "ry" => Ok(GateKind::Ry),
            "rz" => Ok(GateKind::Rz),
            "cx" | "cnot" => Ok(GateKind::Cx),
            "cz" => Ok(GateKind::Cz),
            _ => Err(InvalidGateError::UnrecognizedGateType(tag.to_string())),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::Cx => "cx",
            GateKind::Cz => "cz",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            GateKind::Cx | GateKind::Cz => 2,
            _ => 1,
        }
    }

    pub fn requires_angle(self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// 2. Single-qubit gates
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SingleQubitGateKind {
    Hadamard,
    PauliX,
    PauliY,
    PauliZ,
    RotationX { theta: f64 },
    RotationY { theta: f64 },
    RotationZ { theta: f64 },
}

impl SingleQubitGateKind {
    pub fn gate_kind(&self) -> GateKind {
        match self {
            SingleQubitGateKind::Hadamard => GateKind::H,
            SingleQubitGateKind::PauliX => GateKind::X,
            SingleQubitGateKind::PauliY => GateKind::Y,
            SingleQubitGateKind::PauliZ => GateKind::Z,
            SingleQubitGateKind::RotationX { .. } => GateKind::Rx,
            SingleQubitGateKind::RotationY { .. } => GateKind::Ry,
            SingleQubitGateKind::RotationZ { .. } => GateKind::Rz,
        }
    }

    pub fn angle(&self) -> Option<f64> {
        match *self {
            SingleQubitGateKind::RotationX { theta }
            | SingleQubitGateKind::RotationY { theta }
            | SingleQubitGateKind::RotationZ { theta } => Some(theta),
            _ => None,
        }
    }

    pub fn gate_matrix(&self) -> SingleQubitUnitary {
        match *self {
            SingleQubitGateKind::Hadamard => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            SingleQubitGateKind::PauliX => [[ZERO, ONE], [ONE, ZERO]],
            SingleQubitGateKind::PauliY => [[ZERO, -I], [I, ZERO]],
            SingleQubitGateKind::PauliZ => [[ONE, ZERO], [ZERO, -ONE]],
            SingleQubitGateKind::RotationX { theta } => {
                let cos_half = Complex64::new((theta / 2.0).cos(), 0.0);
                let minus_i_sin_half = Complex64::new(0.0, -(theta / 2.0).sin());
                [[cos_half, minus_i_sin_half], [minus_i_sin_half, cos_half]]
            }
            SingleQubitGateKind::RotationY { theta } => {
                let cos_half = Complex64::new((theta / 2.0).cos(), 0.0);
                let sin_half = Complex64::new((theta / 2.0).sin(), 0.0);
                [[cos_half, -sin_half], [sin_half, cos_half]]
            }
            SingleQubitGateKind::RotationZ { theta } => [
                [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
                [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
            ],
        }
    }
}

// =============================================================================
// 3. Two-qubit gates
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoQubitGateKind {
    ControlledNot,
    ControlledZ,
}

impl TwoQubitGateKind {
    pub fn gate_kind(&self) -> GateKind {
        match self {
            TwoQubitGateKind::ControlledNot => GateKind::Cx,
            TwoQubitGateKind::ControlledZ => GateKind::Cz,
        }
    }

    pub fn gate_matrix(&self) -> TwoQubitUnitary {
        match self {
            TwoQubitGateKind::ControlledNot => [
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE],
                [ZERO, ZERO, ONE, ZERO],
            ],
            TwoQubitGateKind::ControlledZ => [
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ZERO, ZERO, -ONE],
            ],
        }
    }
}

// =============================================================================
// 4. Gate library lookups
// =============================================================================

/// Resolves a single-qubit tag and its optional angle. The angle is ignored
/// for non-rotation gates.
pub fn single_qubit_gate_from_tag(
    tag: &str,
    angle: Option<f64>,
) -> Result<SingleQubitGateKind, InvalidGateError> {
    let kind = GateKind::from_tag(tag)?;
    let rotation_angle = || -> Result<f64, InvalidGateError> {
        let gate_type = kind.tag();
        match angle {
            None => Err(InvalidGateError::MissingRotationAngle { gate_type }),
            Some(theta) if !theta.is_finite() => {
                Err(InvalidGateError::NonFiniteRotationAngle { gate_type, angle: theta })
            }
            Some(theta) => Ok(theta),
        }
    };

    match kind {
        GateKind::H => Ok(SingleQubitGateKind::Hadamard),
        GateKind::X => Ok(SingleQubitGateKind::PauliX),
        GateKind::Y => Ok(SingleQubitGateKind::PauliY),
        GateKind::Z => Ok(SingleQubitGateKind::PauliZ),
        GateKind::Rx => Ok(SingleQubitGateKind::RotationX { theta: rotation_angle()? }),
        GateKind::Ry => Ok(SingleQubitGateKind::RotationY { theta: rotation_angle()? }),
        GateKind::Rz => Ok(SingleQubitGateKind::RotationZ { theta: rotation_angle()? }),
        GateKind::Cx | GateKind::Cz => Err(InvalidGateError::ArityMismatch {
            gate_type: kind.tag(),
            arity: kind.arity(),
        }),
    }
}

pub fn two_qubit_gate_from_tag(tag: &str) -> Result<TwoQubitGateKind, InvalidGateError> {
    match GateKind::from_tag(tag)? {
        GateKind::Cx => Ok(TwoQubitGateKind::ControlledNot),
        GateKind::Cz => Ok(TwoQubitGateKind::ControlledZ),
        other => Err(InvalidGateError::ArityMismatch {
            gate_type: other.tag(),
            arity: other.arity(),
        }),
    }
}

pub fn single_qubit_unitary(
    tag: &str,
    angle: Option<f64>,
) -> Result<SingleQubitUnitary, InvalidGateError> {
    single_qubit_gate_from_tag(tag, angle).map(|gate| gate.gate_matrix())
}

pub fn two_qubit_unitary(tag: &str) -> Result<TwoQubitUnitary, InvalidGateError> {
    two_qubit_gate_from_tag(tag).map(|gate| gate.gate_matrix())
}

// =============================================================================
// 5. Unitarity helpers
// =============================================================================

/// Largest entry-wise deviation of U·U† from the identity.
pub fn unitarity_deviation<const D: usize>(matrix: &[[Complex64; D]; D]) -> f64 {
    let mut worst: f64 = 0.0;
    for row in 0..D {
        for col in 0..D {
            let product: Complex64 = (0..D)
                .map(|k| matrix[row][k] * matrix[col][k].conj())
                .sum();
            let expected = if row == col { ONE } else { ZERO };
            worst = worst.max((product - expected).norm());
        }
    }
    worst
}
