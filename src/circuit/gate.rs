//! A [`Gate`] is one node of a circuit, identified by a [`GateId`] and carrying a [`GateKind`].

use std::fmt::Display;

/// A gate id.
///
/// Ids are positions: the gate with id `i` is the `i`-th gate of the circuit's gate
/// sequence, and connections refer to gates through these positions.
pub type GateId = usize;

/// The kind of a gate.
///
/// `Input` and `Output` form the circuit boundary and are fixed once the circuit is
/// created. The seven other kinds are the combinational palette the search is allowed
/// to add gates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateKind {
    /// A primary input. Carries the value assigned by the caller, accepts no fanin.
    Input,
    /// A primary output. Copies the value of its single fanin.
    Output,
    And,
    Or,
    Not,
    Xor,
    Nand,
    Nor,
    Xnor,
}

/// The combinational gate kinds, in the order the neighbor generator tries them.
pub const PALETTE: [GateKind; 7] = [
    GateKind::And,
    GateKind::Xor,
    GateKind::Or,
    GateKind::Not,
    GateKind::Nand,
    GateKind::Nor,
    GateKind::Xnor,
];

impl GateKind {
    /// Number of incoming connections this kind of gate accepts.
    pub fn fanin_capacity(self) -> usize {
        match self {
            GateKind::Input => 0,
            GateKind::Output | GateKind::Not => 1,
            _ => 2,
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, GateKind::Input)
    }

    pub fn is_output(self) -> bool {
        matches!(self, GateKind::Output)
    }

    /// True for the seven combinational kinds (ie neither an input nor an output).
    pub fn is_combinational(self) -> bool {
        !self.is_input() && !self.is_output()
    }

    /// Apply the truth-table semantics of a combinational kind.
    ///
    /// Unary kinds only read `p1`. Disconnected ports are expected to be resolved to
    /// `false` by the caller before getting here.
    ///
    /// Panics on `Input`/`Output`, which have no combinational semantics of their own.
    pub fn eval(self, p1: bool, p2: bool) -> bool {
        match self {
            GateKind::And => p1 && p2,
            GateKind::Or => p1 || p2,
            GateKind::Not => !p1,
            GateKind::Xor => p1 ^ p2,
            GateKind::Nand => !(p1 && p2),
            GateKind::Nor => !(p1 || p2),
            GateKind::Xnor => !(p1 ^ p2),
            GateKind::Input | GateKind::Output => {
                panic!("eval called on non-combinational gate kind {:?}", self)
            }
        }
    }
}

impl Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GateKind::Input => "Input",
            GateKind::Output => "Output",
            GateKind::And => "And",
            GateKind::Or => "Or",
            GateKind::Not => "Not",
            GateKind::Xor => "Xor",
            GateKind::Nand => "Nand",
            GateKind::Nor => "Nor",
            GateKind::Xnor => "Xnor",
        };
        write!(f, "{}", s)
    }
}

/// One node of the circuit graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gate {
    /// Position of this gate in the circuit's gate sequence.
    pub id: GateId,
    pub kind: GateKind,
}

impl Gate {
    pub fn new(id: GateId, kind: GateKind) -> Self {
        Gate { id, kind }
    }
}
