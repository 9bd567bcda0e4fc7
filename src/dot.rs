//! Export circuits to the Graphviz dot format using [`Circuit::to_dot`].
//!
//! ```rust
//! use gatesynth::{Circuit, GateKind};
//!
//! let mut circuit = Circuit::new(1, 1);
//! let not = circuit.add_gate(GateKind::Not).unwrap();
//! circuit.add_connection(0, not).unwrap();
//! circuit.add_connection(not, 1).unwrap();
//! println!("{}", circuit.to_dot());
//! ```
//!
//! You can then render the graph using the DOT engine.

use std::fmt::Write;

use crate::circuit::{Circuit, GateKind};

const RANKDIR: &str = "LR";
const INPUT_NODE_FORMAT: &str = "[shape=box, color=blue]";
const OUTPUT_NODE_FORMAT: &str = "[shape=box, color=green]";
const GATE_NODE_FORMAT: &str = "[shape=circle]";
const EDGE_FORMAT: &str = "[arrowsize=0.5]";

impl Circuit {
    /// Render the circuit as a Graphviz digraph. Inputs and outputs get numbered
    /// box labels, combinational gates are labelled by kind, and every edge is
    /// annotated with the target port it feeds.
    pub fn to_dot(&self) -> String {
        // Writing to a String cannot fail, hence the unwraps.
        let mut out = String::new();
        writeln!(out, "digraph {{").unwrap();
        writeln!(out, "    rankdir={};", RANKDIR).unwrap();

        let mut input_no = 0;
        let mut output_no = 0;
        for gate in self.gates() {
            match gate.kind {
                GateKind::Input => {
                    input_no += 1;
                    writeln!(
                        out,
                        "    g{} {} [label=\"Input {}\"];",
                        gate.id, INPUT_NODE_FORMAT, input_no
                    )
                    .unwrap();
                }
                GateKind::Output => {
                    output_no += 1;
                    writeln!(
                        out,
                        "    g{} {} [label=\"Output {}\"];",
                        gate.id, OUTPUT_NODE_FORMAT, output_no
                    )
                    .unwrap();
                }
                kind => {
                    writeln!(
                        out,
                        "    g{} {} [label=\"{}\"];",
                        gate.id, GATE_NODE_FORMAT, kind
                    )
                    .unwrap();
                }
            }
        }

        let mut used_ports = vec![0u8; self.gates().len()];
        for connection in self.connections() {
            used_ports[connection.to] += 1;
            writeln!(
                out,
                "    g{} -> g{} {} [headlabel=\"{}\"];",
                connection.from, connection.to, EDGE_FORMAT, used_ports[connection.to]
            )
            .unwrap();
        }

        writeln!(out, "}}").unwrap();
        out
    }
}
