// =============================================================================
// Quantum State Visualizer - Unified Error Types
// =============================================================================
// Table of Contents:
//   1. QuantumRuntimeError - Main error enum
//   2. ValidationError - User-facing circuit errors
//   3. InvalidGateError - Gate library lookup errors
//   4. DimensionError - Qubit index out of range
//      GateEmbeddingError - Unvalidated gate placement on a state vector
//   5. InternalConsistencyError - Numerical invariant violations
// =============================================================================
// Purpose: Separates deterministic user-input failures from implementation
//          defects detected by the pipeline's tolerance checks.
// =============================================================================

use thiserror::Error;

// =============================================================================
// 1. QuantumRuntimeError - Main error enum
// =============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumRuntimeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal consistency error: {0}")]
    InternalConsistency(#[from] InternalConsistencyError),
}

impl QuantumRuntimeError {
    pub fn is_validation(&self) -> bool {
        matches!(self, QuantumRuntimeError::Validation(_))
    }

    /// Message surfaced to callers: validation errors verbatim, consistency
    /// failures with their category prefix.
    pub fn client_message(&self) -> String {
        match self {
            QuantumRuntimeError::Validation(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<InvalidGateError> for QuantumRuntimeError {
    fn from(err: InvalidGateError) -> Self {
        QuantumRuntimeError::Validation(ValidationError::InvalidGate {
            position: None,
            source: err,
        })
    }
}

impl From<DimensionError> for QuantumRuntimeError {
    fn from(err: DimensionError) -> Self {
        QuantumRuntimeError::Validation(ValidationError::Dimension {
            position: None,
            source: err,
        })
    }
}

// =============================================================================
// 2. ValidationError - User-facing circuit errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("num_qubits field is required")]
    MissingQubitCount,

    #[error("num_qubits must be between {minimum} and {maximum}, got {requested}")]
    QubitCountOutOfRange {
        requested: i64,
        minimum: usize,
        maximum: usize,
    },

    #[error("{}{source}", gate_prefix(.position))]
    InvalidGate {
        position: Option<usize>,
        #[source]
        source: InvalidGateError,
    },

    #[error("{}{source}", gate_prefix(.position))]
    Dimension {
        position: Option<usize>,
        #[source]
        source: DimensionError,
    },

    #[error("Gate {position} ({gate_type}): missing required field '{field}'")]
    MissingGateField {
        position: usize,
        gate_type: String,
        field: &'static str,
    },

    #[error("Gate {position}: control and target qubits must be different (both {qubit})")]
    SameControlTarget { position: usize, qubit: usize },
}

fn gate_prefix(position: &Option<usize>) -> String {
    position
        .map(|index| format!("Gate {index}: "))
        .unwrap_or_default()
}

// =============================================================================
// 3. InvalidGateError - Gate library lookup errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGateError {
    #[error("unrecognized gate type '{0}'")]
    UnrecognizedGateType(String),

    #[error("gate '{gate_type}' requires an angle")]
    MissingRotationAngle { gate_type: &'static str },

    #[error("gate '{gate_type}' requires a finite angle, got {angle}")]
    NonFiniteRotationAngle { gate_type: &'static str, angle: f64 },

    #[error("gate '{gate_type}' acts on {arity} qubit(s) and cannot be used here")]
    ArityMismatch { gate_type: &'static str, arity: usize },
}

// =============================================================================
// 4. DimensionError - Qubit index out of range
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid qubit index {index}: circuit has {total} qubits")]
pub struct DimensionError {
    pub index: i64,
    pub total: usize,
}

impl DimensionError {
    pub fn new(index: impl TryInto<i64>, total: usize) -> Self {
        Self {
            index: index.try_into().unwrap_or(i64::MAX),
            total,
        }
    }
}

/// Raised when a gate is placed directly on a state vector, bypassing the
/// circuit builders that normally reject these inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateEmbeddingError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error("two-qubit gate needs distinct qubits, got {qubit} twice")]
    RepeatedQubit { qubit: usize },
}

// =============================================================================
// 5. InternalConsistencyError - Numerical invariant violations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InternalConsistencyError {
    #[error("state vector norm {norm} deviates from 1 by more than {tolerance:e}")]
    StateNormDeviation { norm: f64, tolerance: f64 },

    #[error("reduced density matrix of qubit {qubit} has trace {trace_real}{trace_imaginary:+}i, expected 1 within {tolerance:e}")]
    TraceDeviation {
        qubit: usize,
        trace_real: f64,
        trace_imaginary: f64,
        tolerance: f64,
    },

    #[error("reduced density matrix of qubit {qubit} is not Hermitian (deviation {deviation:e}, tolerance {tolerance:e})")]
    NonHermitian {
        qubit: usize,
        deviation: f64,
        tolerance: f64,
    },

    #[error("<sigma_{axis}> of qubit {qubit} has imaginary residue {imaginary:e} above {tolerance:e}")]
    ImaginaryExpectationValue {
        qubit: usize,
        axis: char,
        imaginary: f64,
        tolerance: f64,
    },

    #[error("Bloch vector of qubit {qubit} has length {length}, outside the unit ball (tolerance {tolerance:e})")]
    BlochVectorOutsideBall {
        qubit: usize,
        length: f64,
        tolerance: f64,
    },
}

// =============================================================================
// Result type alias
// =============================================================================

pub type QuantumResult<T> = Result<T, QuantumRuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_error_message() {
        let err = DimensionError::new(5usize, 3);
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_error_conversion() {
        let runtime_err: QuantumRuntimeError = ValidationError::MissingQubitCount.into();
        assert!(runtime_err.is_validation());
        assert_eq!(runtime_err.client_message(), "num_qubits field is required");
    }

    #[test]
    fn test_gate_position_prefix() {
        let err = ValidationError::InvalidGate {
            position: Some(2),
            source: InvalidGateError::UnrecognizedGateType("toffoli".to_string()),
        };
        assert_eq!(err.to_string(), "Gate 2: unrecognized gate type 'toffoli'");

        let bare: QuantumRuntimeError =
            InvalidGateError::MissingRotationAngle { gate_type: "rx" }.into();
        assert_eq!(bare.client_message(), "gate 'rx' requires an angle");
    }

    #[test]
    fn test_consistency_errors_are_not_validation() {
        let err: QuantumRuntimeError = InternalConsistencyError::StateNormDeviation {
            norm: 1.1,
            tolerance: 1e-9,
        }
        .into();
        assert!(!err.is_validation());
        assert!(err.client_message().starts_with("Internal consistency error"));
    }

    #[test]
    fn test_tolerances_print_in_scientific_notation() {
        let err = InternalConsistencyError::StateNormDeviation {
            norm: 0.9999999999999999,
            tolerance: 1e-300,
        };
        let message = err.to_string();
        assert!(message.ends_with("by more than 1e-300"), "{message}");
        assert!(!message.contains("0.000"));

        let err = InternalConsistencyError::NonHermitian {
            qubit: 1,
            deviation: 2.5e-7,
            tolerance: 1e-9,
        };
        assert_eq!(
            err.to_string(),
            "reduced density matrix of qubit 1 is not Hermitian (deviation 2.5e-7, tolerance 1e-9)"
        );
    }

    #[test]
    fn test_repeated_qubit_is_distinct_from_dimension() {
        let repeated = GateEmbeddingError::RepeatedQubit { qubit: 1 };
        assert_eq!(repeated.to_string(), "two-qubit gate needs distinct qubits, got 1 twice");
        let dimension: GateEmbeddingError = DimensionError::new(4usize, 2).into();
        assert_eq!(dimension.to_string(), "Invalid qubit index 4: circuit has 2 qubits");
    }
}
