// =============================================================================
// Quantum State Visualizer - Bloch Engine
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Prelude Module
// =============================================================================
// Purpose: Pure, synchronous pipeline turning a small gate-based circuit
//          (1 to 5 qubits) into one Bloch vector and one reduced density
//          matrix per qubit. Qubit q is bit q of a basis index (little-endian).
// =============================================================================

pub mod bloch_projection;
pub mod catalog;
pub mod circuit_program;
pub mod configuration;
pub mod density_matrix;
pub mod error;
pub mod execution;
pub mod gate_operations;
pub mod partial_trace;
pub mod result_assembly;
pub mod state_backend;

pub mod prelude {
    pub use crate::bloch_projection::*;
    pub use crate::catalog::*;
    pub use crate::circuit_program::*;
    pub use crate::configuration::*;
    pub use crate::density_matrix::*;
    pub use crate::error::*;
    pub use crate::execution::*;
    pub use crate::gate_operations::*;
    pub use crate::partial_trace::*;
    pub use crate::result_assembly::*;
    pub use crate::state_backend::*;
}
