//! Module defining the [`Circuit`] struct, as well as [`Gate`], [`GateKind`], [`Connection`]
//! and some other relevant structs.
//!
//! To synthesize a circuit from a truth table, check the [`crate::search`] docs.

pub mod cycle;
pub mod error;
pub mod gate;

use itertools::Itertools;

pub use error::{CircuitError, Result, TableError};
pub use gate::{Gate, GateId, GateKind, PALETTE};

/// A directed edge carrying one boolean value from the output of `from` to an
/// input port of `to`.
///
/// The target port is implicit: it is the rank of this connection among the
/// connections targeting `to`, in insertion order. The first incoming edge of a
/// gate feeds port 1, the second feeds port 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Connection {
    pub from: GateId,
    pub to: GateId,
}

/// A whole candidate circuit: an ordered gate sequence plus a connection list.
///
/// The gate with id `i` is `gates[i]`; the circuit's inputs come first, then its
/// outputs, then every combinational gate in the order it was added. A circuit is
/// built once via [`Circuit::new`] and then only grows, one mutation at a time,
/// through [`add_gate`] and [`add_connection`] - both validate everything before
/// touching the circuit, so a `Circuit` you can observe always satisfies its
/// invariants (valid indices, fan-in capacities respected, acyclic).
///
/// Equality and hashing are structural and order-independent: two circuits that
/// denote the same network but were built through different mutation orders
/// compare equal. See [`canonical_form`] for how.
///
/// [`add_gate`]: Circuit::add_gate
/// [`add_connection`]: Circuit::add_connection
/// [`canonical_form`]: Circuit::canonical_form
#[derive(Debug, Clone)]
pub struct Circuit {
    gates: Vec<Gate>,
    connections: Vec<Connection>,
    /// True iff some combinational gate currently lacks an incoming or an
    /// outgoing connection. Kept up to date by the mutation methods.
    has_disconnected_gate: bool,
}

/// The canonical form of a [`Circuit`], used for structural equality, hashing and
/// the search's visited set.
///
/// Gates are reordered by kind-then-id and connections are relabelled through that
/// reordering, then sorted. Two circuits reached through different construction
/// orders therefore canonicalize to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalForm {
    kinds: Vec<GateKind>,
    connections: Vec<(GateId, GateId)>,
}

impl Circuit {
    /// Create the trivial circuit: `num_inputs` input gates, `num_outputs` output
    /// gates, no combinational gates, no connections.
    pub fn new(num_inputs: usize, num_outputs: usize) -> Self {
        let mut gates = Vec::with_capacity(num_inputs + num_outputs);
        for _ in 0..num_inputs {
            gates.push(Gate::new(gates.len(), GateKind::Input));
        }
        for _ in 0..num_outputs {
            gates.push(Gate::new(gates.len(), GateKind::Output));
        }
        Circuit {
            gates,
            connections: Vec::new(),
            has_disconnected_gate: false,
        }
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// True iff some combinational gate lacks an incoming or an outgoing connection.
    /// A circuit reported as a solution never has one.
    pub fn has_disconnected_gate(&self) -> bool {
        self.has_disconnected_gate
    }

    /// Ids of the input gates, in id order. Input values are assigned in this order.
    pub fn input_ids(&self) -> Vec<GateId> {
        self.ids_of_kind(GateKind::Input)
    }

    /// Ids of the output gates, in id order. Output values are read in this order.
    pub fn output_ids(&self) -> Vec<GateId> {
        self.ids_of_kind(GateKind::Output)
    }

    fn ids_of_kind(&self, kind: GateKind) -> Vec<GateId> {
        self.gates
            .iter()
            .filter(|g| g.kind == kind)
            .map(|g| g.id)
            .collect()
    }

    /// Number of combinational gates (the circuit size the search tries to keep small).
    pub fn combinational_count(&self) -> usize {
        self.gates
            .iter()
            .filter(|g| g.kind.is_combinational())
            .count()
    }

    /// Number of incoming connections of the given gate.
    pub fn fanin_count(&self, id: GateId) -> usize {
        self.connections.iter().filter(|c| c.to == id).count()
    }

    /// Number of outgoing connections of the given gate.
    pub fn fanout_count(&self, id: GateId) -> usize {
        self.connections.iter().filter(|c| c.from == id).count()
    }

    /// Source gates wired to the given gate, in port order: `providers(id)[0]`
    /// feeds port 1, `providers(id)[1]` (if any) feeds port 2.
    pub fn providers(&self, id: GateId) -> Vec<GateId> {
        self.connections
            .iter()
            .filter(|c| c.to == id)
            .map(|c| c.from)
            .collect()
    }

    /// Append one combinational gate with no connections yet and return its id.
    ///
    /// Fails on `Input`/`Output` kinds: the circuit boundary is fixed at creation.
    pub fn add_gate(&mut self, kind: GateKind) -> Result<GateId> {
        if !kind.is_combinational() {
            return Err(CircuitError::InvalidState(format!(
                "cannot add {} gate, the circuit boundary is fixed at creation",
                kind
            )));
        }
        let id = self.gates.len();
        self.gates.push(Gate::new(id, kind));
        // The fresh gate has no edges at all.
        self.has_disconnected_gate = true;
        Ok(id)
    }

    /// Add the directed connection `(from, to)`, targeting the next free port of `to`.
    ///
    /// This will fail if:
    /// - either id is out of range
    /// - `to` is an input gate or `from` is an output gate
    /// - the exact same edge already exists
    /// - `to` already has as many incoming connections as its fan-in capacity
    /// - or accepting the edge would make the circuit cyclic.
    pub fn add_connection(&mut self, from: GateId, to: GateId) -> Result<()> {
        let n = self.gates.len();
        if from >= n {
            return Err(CircuitError::GateDoesNotExist(from));
        }
        if to >= n {
            return Err(CircuitError::GateDoesNotExist(to));
        }
        if self.gates[to].kind.is_input() {
            return Err(CircuitError::ConnectionToInput(to));
        }
        if self.gates[from].kind.is_output() {
            return Err(CircuitError::ConnectionFromOutput(from));
        }
        if self.connections.contains(&Connection { from, to }) {
            return Err(CircuitError::DuplicateConnection(from, to));
        }
        let capacity = self.gates[to].kind.fanin_capacity();
        if self.fanin_count(to) >= capacity {
            return Err(CircuitError::FaninExceeded { id: to, capacity });
        }

        // Acyclicity is enforced before acceptance: add tentatively, roll back on a cycle.
        self.connections.push(Connection { from, to });
        if cycle::has_cycle(self) {
            self.connections.pop();
            return Err(CircuitError::CycleCreated(from, to));
        }

        self.refresh_connectivity();
        Ok(())
    }

    /// Push an edge without any validation. Test-only escape hatch used to build
    /// the malformed circuits the defensive code paths are checked against.
    #[cfg(test)]
    pub(crate) fn push_connection_unchecked(&mut self, from: GateId, to: GateId) {
        self.connections.push(Connection { from, to });
    }

    /// Recompute [`has_disconnected_gate`] with a full sweep.
    ///
    /// [`has_disconnected_gate`]: Circuit::has_disconnected_gate
    fn refresh_connectivity(&mut self) {
        self.has_disconnected_gate = self.gates.iter().any(|g| {
            g.kind.is_combinational()
                && (self.fanin_count(g.id) == 0 || self.fanout_count(g.id) == 0)
        });
    }

    /// Compute the canonical form of this circuit.
    ///
    /// Gates are sorted by kind-then-id (a total order, stable for gates of the
    /// same kind), every connection endpoint is relabelled to its gate's rank in
    /// that order, and the relabelled connections are sorted. Structural equality
    /// and hashing go through this value rather than relying on incidental
    /// sequence order, so the order-independence is explicit and testable.
    pub fn canonical_form(&self) -> CanonicalForm {
        let order: Vec<GateId> = self
            .gates
            .iter()
            .map(|g| g.id)
            .sorted_by_key(|&id| (self.gates[id].kind, id))
            .collect();

        let mut rank = vec![0; self.gates.len()];
        for (pos, &id) in order.iter().enumerate() {
            rank[id] = pos;
        }

        let kinds = order.iter().map(|&id| self.gates[id].kind).collect();
        let connections = self
            .connections
            .iter()
            .map(|c| (rank[c.from], rank[c.to]))
            .sorted()
            .collect();

        CanonicalForm { kinds, connections }
    }

    /// Checking if the circuit structure is correct.
    /// This function was written for debug purposes, as the crate is supposed to
    /// maintain integrity of the circuit at any moment.
    pub fn check_integrity(&self) -> Result<()> {
        // Ids must be positions.
        for (pos, gate) in self.gates.iter().enumerate() {
            if gate.id != pos {
                return Err(CircuitError::InvalidState(format!(
                    "gate at position {} carries id {}",
                    pos, gate.id
                )));
            }
        }

        let n = self.gates.len();
        for (i, c) in self.connections.iter().enumerate() {
            if c.from >= n {
                return Err(CircuitError::GateDoesNotExist(c.from));
            }
            if c.to >= n {
                return Err(CircuitError::GateDoesNotExist(c.to));
            }
            if self.gates[c.to].kind.is_input() {
                return Err(CircuitError::ConnectionToInput(c.to));
            }
            if self.gates[c.from].kind.is_output() {
                return Err(CircuitError::ConnectionFromOutput(c.from));
            }
            if self.connections[..i].contains(c) {
                return Err(CircuitError::DuplicateConnection(c.from, c.to));
            }
        }

        for gate in &self.gates {
            let capacity = gate.kind.fanin_capacity();
            if self.fanin_count(gate.id) > capacity {
                return Err(CircuitError::FaninExceeded {
                    id: gate.id,
                    capacity,
                });
            }
        }

        if cycle::has_cycle(self) {
            return Err(CircuitError::InvalidState(
                "the connection graph contains a cycle".to_string(),
            ));
        }

        let flag = self.gates.iter().any(|g| {
            g.kind.is_combinational()
                && (self.fanin_count(g.id) == 0 || self.fanout_count(g.id) == 0)
        });
        if flag != self.has_disconnected_gate {
            return Err(CircuitError::InvalidState(format!(
                "has_disconnected_gate is {} but a sweep says {}",
                self.has_disconnected_gate, flag
            )));
        }

        Ok(())
    }
}

impl PartialEq for Circuit {
    /// Structural, order-independent equality through [`Circuit::canonical_form`].
    fn eq(&self, other: &Self) -> bool {
        self.canonical_form() == other.canonical_form()
    }
}

impl Eq for Circuit {}

impl std::hash::Hash for Circuit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical_form().hash(state);
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::hash::{DefaultHasher, Hash, Hasher};

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn new_circuit_layout() {
        let circuit = Circuit::new(2, 1);
        assert_eq!(circuit.gates().len(), 3);
        assert_eq!(circuit.input_ids(), vec![0, 1]);
        assert_eq!(circuit.output_ids(), vec![2]);
        assert!(circuit.connections().is_empty());
        assert!(!circuit.has_disconnected_gate());
        circuit.check_integrity().unwrap();
    }

    #[test]
    fn add_gate_marks_disconnected() {
        let mut circuit = Circuit::new(1, 1);
        let id = circuit.add_gate(GateKind::And).unwrap();
        assert_eq!(id, 2);
        assert!(circuit.has_disconnected_gate());
        circuit.check_integrity().unwrap();

        // The boundary is fixed.
        assert!(circuit.add_gate(GateKind::Input).is_err());
        assert!(circuit.add_gate(GateKind::Output).is_err());
    }

    #[test]
    fn add_connection_rules() {
        let mut circuit = Circuit::new(2, 1);
        let and = circuit.add_gate(GateKind::And).unwrap();

        assert!(matches!(
            circuit.add_connection(99, and),
            Err(CircuitError::GateDoesNotExist(99))
        ));
        assert!(matches!(
            circuit.add_connection(0, 1),
            Err(CircuitError::ConnectionToInput(1))
        ));
        assert!(matches!(
            circuit.add_connection(2, and),
            Err(CircuitError::ConnectionFromOutput(2))
        ));

        circuit.add_connection(0, and).unwrap();
        assert!(matches!(
            circuit.add_connection(0, and),
            Err(CircuitError::DuplicateConnection(0, 3))
        ));
        circuit.add_connection(1, and).unwrap();

        // And is binary, a third provider must be refused.
        let not = circuit.add_gate(GateKind::Not).unwrap();
        assert!(matches!(
            circuit.add_connection(not, and),
            Err(CircuitError::FaninExceeded { id: 3, capacity: 2 })
        ));

        // Two binary gates with spare fan-in, so the back edge reaches the cycle
        // check instead of tripping on capacity.
        let xor = circuit.add_gate(GateKind::Xor).unwrap();
        let or = circuit.add_gate(GateKind::Or).unwrap();
        circuit.add_connection(xor, or).unwrap();
        assert!(matches!(
            circuit.add_connection(or, xor),
            Err(CircuitError::CycleCreated(6, 5))
        ));

        circuit.check_integrity().unwrap();
    }

    #[test]
    fn ports_follow_insertion_order() {
        let mut circuit = Circuit::new(2, 1);
        let and = circuit.add_gate(GateKind::And).unwrap();
        circuit.add_connection(1, and).unwrap();
        circuit.add_connection(0, and).unwrap();
        assert_eq!(circuit.providers(and), vec![1, 0]);
        assert_eq!(circuit.fanin_count(and), 2);
        assert_eq!(circuit.fanout_count(1), 1);
    }

    #[test]
    fn connectivity_sweep() {
        let mut circuit = Circuit::new(1, 1);
        let not = circuit.add_gate(GateKind::Not).unwrap();
        assert!(circuit.has_disconnected_gate());
        circuit.add_connection(0, not).unwrap();
        // Incoming edge only: still dangling on the way out.
        assert!(circuit.has_disconnected_gate());
        circuit.add_connection(not, 1).unwrap();
        assert!(!circuit.has_disconnected_gate());
        circuit.check_integrity().unwrap();
    }

    #[test]
    fn equality_ignores_connection_order() {
        let mut a = Circuit::new(2, 1);
        let and_a = a.add_gate(GateKind::And).unwrap();
        a.add_connection(0, and_a).unwrap();
        a.add_connection(1, and_a).unwrap();
        a.add_connection(and_a, 2).unwrap();

        let mut b = Circuit::new(2, 1);
        let and_b = b.add_gate(GateKind::And).unwrap();
        b.add_connection(and_b, 2).unwrap();
        b.add_connection(1, and_b).unwrap();
        b.add_connection(0, and_b).unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.canonical_form(), b.canonical_form());
    }

    #[test]
    fn equality_ignores_gate_order() {
        // And added before Or, wired And -> Or.
        let mut a = Circuit::new(1, 1);
        let and_a = a.add_gate(GateKind::And).unwrap();
        let or_a = a.add_gate(GateKind::Or).unwrap();
        a.add_connection(and_a, or_a).unwrap();

        // Or added before And, same logical wiring.
        let mut b = Circuit::new(1, 1);
        let or_b = b.add_gate(GateKind::Or).unwrap();
        let and_b = b.add_gate(GateKind::And).unwrap();
        b.add_connection(and_b, or_b).unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn inequality_on_different_wiring() {
        let mut a = Circuit::new(2, 1);
        let and_a = a.add_gate(GateKind::And).unwrap();
        a.add_connection(0, and_a).unwrap();

        let mut b = Circuit::new(2, 1);
        let and_b = b.add_gate(GateKind::And).unwrap();
        b.add_connection(1, and_b).unwrap();

        assert_ne!(a, b);

        let mut c = Circuit::new(2, 1);
        c.add_gate(GateKind::Or).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn canonical_form_deduplicates_in_a_set() {
        let mut a = Circuit::new(1, 1);
        let not_a = a.add_gate(GateKind::Not).unwrap();
        a.add_connection(0, not_a).unwrap();

        let mut b = Circuit::new(1, 1);
        let not_b = b.add_gate(GateKind::Not).unwrap();
        b.add_connection(0, not_b).unwrap();

        let mut seen = HashSet::new();
        assert!(seen.insert(a.canonical_form()));
        assert!(!seen.insert(b.canonical_form()));
    }

    #[test]
    fn integrity_catches_manual_damage() {
        let mut circuit = Circuit::new(1, 1);
        circuit.push_connection_unchecked(1, 0);
        assert!(circuit.check_integrity().is_err());
    }
}
