//! Synthesize combinational logic circuits from truth tables.
//!
//! Hand a [`TruthTable`] to a [`Synthesizer`] and it searches the space of acyclic
//! gate networks (AND, OR, NOT, XOR, NAND, NOR, XNOR) for one reproducing every row
//! exactly. Check the [`crate::search`] docs for details.

pub mod circuit;
pub mod dot;
pub mod eval;
pub mod netlist;
pub mod search;
pub mod truth;

// Re-exporting symbols and modules.
pub use circuit::{
    CanonicalForm, Circuit, CircuitError, Connection, Gate, GateId, GateKind, Result, TableError,
};
pub use eval::{Evaluation, evaluate};
pub use netlist::{CardId, Netlist, NetlistCard, NetlistConnection};
pub use search::{CancelToken, Neighbors, Outcome, Score, SearchLimits, Synthesizer, score};
pub use truth::{TruthTable, TruthTableRow};
