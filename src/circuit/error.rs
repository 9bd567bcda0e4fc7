use thiserror::Error;

use super::GateId;

/// The result of a circuit operation.
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Error returned when a circuit operation failed.
#[derive(Debug, Error)]
pub enum CircuitError {
    /// A connection refers to a gate id outside the gate sequence.
    #[error("gate with id={0} does not exist")]
    GateDoesNotExist(GateId),

    /// Input gates accept no incoming connections.
    #[error("gate {0} is an input and cannot be a connection target")]
    ConnectionToInput(GateId),

    /// Output gates have no outgoing signal to wire anywhere.
    #[error("gate {0} is an output and cannot be a connection source")]
    ConnectionFromOutput(GateId),

    /// The exact same directed edge is already present.
    #[error("connection ({0}, {1}) already exists")]
    DuplicateConnection(GateId, GateId),

    /// The target gate already has as many incoming connections as its kind allows.
    #[error("gate {id} has fan-in capacity {capacity} and it is already full")]
    FaninExceeded { id: GateId, capacity: usize },

    /// Accepting the connection would make the circuit cyclic.
    #[error("connection ({0}, {1}) would create a cycle")]
    CycleCreated(GateId, GateId),

    /// The evaluator was handed an input vector of the wrong width.
    #[error("expected {expected} input values, got {got}")]
    InputWidthMismatch { expected: usize, got: usize },

    /// The circuit has reached an invalid state. This should never happen:
    /// mutations validate everything before touching the circuit, so if this
    /// error is raised there is a bug in this crate.
    #[error("the circuit has reached an invalid state - this should not happen - error: {0}")]
    InvalidState(String),

    /// Just forwarding a [`TableError`].
    #[error("{0}")]
    Table(#[from] TableError),
}

/// Error returned when a truth table is rejected at the boundary.
#[derive(Debug, Error)]
pub enum TableError {
    /// A row's input vector does not have `num_inputs` entries.
    #[error("row {row} has {got} input values, expected {expected}")]
    InputWidth {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A row's expected-output vector does not have `num_outputs` entries.
    #[error("row {row} has {got} expected output values, expected {expected}")]
    OutputWidth {
        row: usize,
        expected: usize,
        got: usize,
    },
}
