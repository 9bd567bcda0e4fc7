//! The circuit evaluator.
//!
//! Gate values are resolved strictly in topological order of the connection graph,
//! never in gate-creation order: the search wires connections between
//! arbitrarily-ordered existing gates, so creation order and dependency order have
//! no reason to coincide.

use crate::circuit::{Circuit, CircuitError, GateId, GateKind, Result, cycle};

/// The fully-resolved result of one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    outputs: Vec<bool>,
    values: Vec<bool>,
}

impl Evaluation {
    /// Values observed at the output gates, in output-gate id order.
    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    /// The resolved value of any gate - kept around for diagnostics.
    pub fn value(&self, id: GateId) -> Option<bool> {
        self.values.get(id).copied()
    }
}

/// Evaluate the circuit for one input vector.
///
/// `inputs` are assigned to the input gates in id order and must match their count.
/// A gate port with no provider wired to it reads `false`; an output gate with no
/// provider resolves to `false`.
///
/// Pure: the circuit is not touched, and evaluating the same circuit with the same
/// inputs always yields the same [`Evaluation`].
pub fn evaluate(circuit: &Circuit, inputs: &[bool]) -> Result<Evaluation> {
    let input_ids = circuit.input_ids();
    if inputs.len() != input_ids.len() {
        return Err(CircuitError::InputWidthMismatch {
            expected: input_ids.len(),
            got: inputs.len(),
        });
    }

    // The mutation API never lets a cyclic circuit escape, so this is unreachable
    // for circuits built through it.
    let order = cycle::topological_order(circuit).ok_or_else(|| {
        CircuitError::InvalidState("cannot evaluate a cyclic circuit".to_string())
    })?;

    let mut values = vec![false; circuit.gates().len()];
    for (&id, &value) in input_ids.iter().zip(inputs) {
        values[id] = value;
    }

    for id in order {
        let kind = circuit.gates()[id].kind;
        match kind {
            // Assigned above.
            GateKind::Input => {}
            GateKind::Output => {
                values[id] = circuit
                    .providers(id)
                    .first()
                    .map_or(false, |&p| values[p]);
            }
            _ => {
                let providers = circuit.providers(id);
                let p1 = providers.first().map_or(false, |&p| values[p]);
                let p2 = providers.get(1).map_or(false, |&p| values[p]);
                values[id] = kind.eval(p1, p2);
            }
        }
    }

    let outputs = circuit.output_ids().iter().map(|&id| values[id]).collect();
    Ok(Evaluation { outputs, values })
}
