//! Translation of a solved circuit into a flat, serializable card/connection list.
//!
//! The engine itself performs no I/O; a persistence or rendering layer takes a
//! [`Netlist`] and writes it wherever it wants. Ids are 1-based and assigned in
//! input / combinational-gate / output order, and every connection carries its
//! explicit target port - the two things a dumb storage format needs and a
//! [`Circuit`] keeps implicit.

use crate::circuit::{Circuit, GateKind};

/// A stable id in the exported netlist. Unrelated to [`crate::circuit::GateId`],
/// which is a position in the circuit's gate sequence.
pub type CardId = u32;

/// One exported gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetlistCard {
    pub id: CardId,
    pub kind: GateKind,
}

/// One exported connection, with its target port made explicit (1 or 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetlistConnection {
    pub from: CardId,
    pub to: CardId,
    pub port: u8,
}

/// The serializable form of a circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Netlist {
    cards: Vec<NetlistCard>,
    connections: Vec<NetlistConnection>,
}

impl Netlist {
    /// Flatten a circuit: inputs first, then combinational gates, then outputs,
    /// with ids counted from 1 in that order. Ports follow the circuit's
    /// connection insertion order (first incoming edge of a gate is port 1).
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let n = circuit.gates().len();
        let mut card_ids = vec![0; n];
        let mut cards = Vec::with_capacity(n);

        let mut next_id = 1;
        for pass in [
            GateKind::is_input as fn(GateKind) -> bool,
            GateKind::is_combinational,
            GateKind::is_output,
        ] {
            for gate in circuit.gates().iter().filter(|g| pass(g.kind)) {
                card_ids[gate.id] = next_id;
                cards.push(NetlistCard {
                    id: next_id,
                    kind: gate.kind,
                });
                next_id += 1;
            }
        }

        let mut used_ports = vec![0u8; n];
        let connections = circuit
            .connections()
            .iter()
            .map(|c| {
                used_ports[c.to] += 1;
                NetlistConnection {
                    from: card_ids[c.from],
                    to: card_ids[c.to],
                    port: used_ports[c.to],
                }
            })
            .collect();

        Netlist { cards, connections }
    }

    pub fn cards(&self) -> &[NetlistCard] {
        &self.cards
    }

    pub fn connections(&self) -> &[NetlistConnection] {
        &self.connections
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_follow_input_gate_output_order() {
        // Circuit layout: input 0, output 1, then a Not added later.
        let mut circuit = Circuit::new(1, 1);
        let not = circuit.add_gate(GateKind::Not).unwrap();
        circuit.add_connection(0, not).unwrap();
        circuit.add_connection(not, 1).unwrap();

        let netlist = Netlist::from_circuit(&circuit);
        let kinds: Vec<GateKind> = netlist.cards().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![GateKind::Input, GateKind::Not, GateKind::Output]);
        assert_eq!(
            netlist.cards().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn ports_are_materialized() {
        let mut circuit = Circuit::new(2, 1);
        let and = circuit.add_gate(GateKind::And).unwrap();
        // Wire input 1 before input 0: it must land on port 1.
        circuit.add_connection(1, and).unwrap();
        circuit.add_connection(0, and).unwrap();
        circuit.add_connection(and, 2).unwrap();

        let netlist = Netlist::from_circuit(&circuit);
        // Cards: inputs 1 and 2, the And is 3, the output is 4.
        assert_eq!(
            netlist.connections(),
            &[
                NetlistConnection {
                    from: 2,
                    to: 3,
                    port: 1
                },
                NetlistConnection {
                    from: 1,
                    to: 3,
                    port: 2
                },
                NetlistConnection {
                    from: 3,
                    to: 4,
                    port: 1
                },
            ]
        );
    }
}
