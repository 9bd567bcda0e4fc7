//! Cycle detection and topological ordering via Kahn's algorithm.
//!
//! One Kahn pass serves two callers: the neighbor generator, which only needs to know
//! whether a candidate connection closes a cycle, and the evaluator, which needs a full
//! dependency order to resolve gate values in.

use std::collections::VecDeque;

use super::{Circuit, GateId};

/// Returns a topological order of the circuit's gates, or [`None`] if the
/// connection graph contains a cycle.
///
/// Runs in O(V+E). Connections referring to out-of-range gate ids are ignored;
/// they cannot occur through the [`Circuit`] mutation API, this is only defensive.
pub fn topological_order(circuit: &Circuit) -> Option<Vec<GateId>> {
    let n = circuit.gates().len();

    let mut in_degree = vec![0usize; n];
    let mut successors: Vec<Vec<GateId>> = vec![Vec::new(); n];

    for connection in circuit.connections() {
        if connection.from >= n || connection.to >= n {
            continue;
        }
        successors[connection.from].push(connection.to);
        in_degree[connection.to] += 1;
    }

    let mut queue: VecDeque<GateId> = (0..n).filter(|&id| in_degree[id] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for &succ in &successors[id] {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push_back(succ);
            }
        }
    }

    // Gates left with a non-zero in-degree sit on a cycle.
    if order.len() < n { None } else { Some(order) }
}

/// Returns true if the circuit's connection graph contains a cycle.
pub fn has_cycle(circuit: &Circuit) -> bool {
    topological_order(circuit).is_none()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::circuit::{Circuit, GateKind};

    /// A circuit with three chained Not gates (plus an unused input/output pair),
    /// with the chain edges inserted straight into the connection list.
    fn chain() -> Circuit {
        let mut circuit = Circuit::new(1, 1);
        circuit.add_gate(GateKind::Not).unwrap();
        circuit.add_gate(GateKind::Not).unwrap();
        circuit.add_gate(GateKind::Not).unwrap();
        circuit
    }

    #[test]
    fn chain_is_acyclic() {
        let mut circuit = chain();
        circuit.add_connection(2, 3).unwrap();
        circuit.add_connection(3, 4).unwrap();
        assert!(!has_cycle(&circuit));

        let order = topological_order(&circuit).unwrap();
        let pos =
            |id: usize| order.iter().position(|&x| x == id).unwrap();
        assert!(pos(2) < pos(3));
        assert!(pos(3) < pos(4));
    }

    #[test]
    fn closing_the_chain_is_cyclic() {
        let mut circuit = chain();
        circuit.add_connection(2, 3).unwrap();
        circuit.add_connection(3, 4).unwrap();
        // add_connection refuses the closing edge, so inject it manually.
        circuit.push_connection_unchecked(4, 2);
        assert!(has_cycle(&circuit));
        assert!(topological_order(&circuit).is_none());
    }

    #[test]
    fn disconnected_components_are_acyclic() {
        // Nothing is wired at all: every gate is its own component.
        let circuit = chain();
        assert!(!has_cycle(&circuit));
        assert_eq!(topological_order(&circuit).unwrap().len(), 5);
    }

    #[test]
    fn out_of_range_connection_is_ignored() {
        let mut circuit = chain();
        circuit.push_connection_unchecked(2, 99);
        assert!(!has_cycle(&circuit));
    }
}
