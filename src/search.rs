//! Best-first synthesis search.
//!
//! The driver owns a cost-ordered frontier and a visited set of canonical forms,
//! expands the cheapest candidate with the neighbor generator, and stops the moment a
//! generated candidate reproduces every truth-table row with no dangling gate.
//!
//! Everything is local to one [`Synthesizer`] call: no globals, so independent
//! searches can run concurrently on separate threads. A long-running search is
//! expected to be put on a worker thread by the caller, who keeps a [`CancelToken`]
//! to stop it.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering::Relaxed},
    },
};

use crate::{
    circuit::{Circuit, GateId, PALETTE, Result},
    eval::evaluate,
    truth::TruthTable,
};

/// The cost of a candidate against a truth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Mismatch penalty plus complexity penalty. Lower is explored first.
    pub cost: u64,
    /// True iff every output bit of every row matched.
    pub exact: bool,
}

/// Penalty per mismatched output bit. Large enough to dominate circuit size:
/// the search goes for correctness first and small circuits second.
const MISMATCH_PENALTY: u64 = 100;
/// Penalty per gate.
const GATE_PENALTY: u64 = 10;
/// Penalty per connection.
const CONNECTION_PENALTY: u64 = 1;

/// Score a candidate circuit: evaluate it once per truth-table row, charge
/// [`MISMATCH_PENALTY`] per wrong output bit, then add the size penalties.
///
/// Fails only if the circuit's input count does not match the table's width.
pub fn score(circuit: &Circuit, table: &TruthTable) -> Result<Score> {
    let mut mismatch = 0;
    for row in table.rows() {
        let eval = evaluate(circuit, &row.inputs)?;
        for (got, expected) in eval.outputs().iter().zip(&row.expected) {
            if got != expected {
                mismatch += MISMATCH_PENALTY;
            }
        }
    }

    let complexity = GATE_PENALTY * circuit.gates().len() as u64
        + CONNECTION_PENALTY * circuit.connections().len() as u64;

    Ok(Score {
        cost: mismatch + complexity,
        exact: mismatch == 0,
    })
}

/// Bounds on the explored space.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Maximum number of combinational gates a candidate may hold. [`None`] means
    /// unbounded, in which case the add-gate move keeps the space infinite and the
    /// search can only end in [`Outcome::Solved`] or [`Outcome::Cancelled`].
    pub max_gates: Option<usize>,
}

/// Lazy enumeration of all legal single-step mutations of a circuit.
///
/// Yields first the add-gate moves (one per palette kind, while under the gate
/// limit), then the add-connection moves for every ordered gate pair that passes
/// the port rules and does not close a cycle. Each yielded circuit differs from the
/// parent by exactly one mutation; the same mutation is never yielded twice.
/// Structural duplicates *across* different mutations can still occur - the
/// driver's visited set deals with those.
pub struct Neighbors<'a> {
    circuit: &'a Circuit,
    palette_idx: usize,
    source: GateId,
    target: GateId,
}

impl<'a> Neighbors<'a> {
    pub fn new(circuit: &'a Circuit, limits: SearchLimits) -> Self {
        // Consume the add-gate moves up front if the gate budget is spent.
        let palette_idx = match limits.max_gates {
            Some(max) if circuit.combinational_count() >= max => PALETTE.len(),
            _ => 0,
        };
        Neighbors {
            circuit,
            palette_idx,
            source: 0,
            target: 0,
        }
    }

    /// Advance the `(source, target)` cursor by one cell of the pair grid.
    fn bump(&mut self) {
        self.target += 1;
        if self.target >= self.circuit.gates().len() {
            self.target = 0;
            self.source += 1;
        }
    }
}

impl Iterator for Neighbors<'_> {
    type Item = Circuit;

    fn next(&mut self) -> Option<Circuit> {
        if self.palette_idx < PALETTE.len() {
            let kind = PALETTE[self.palette_idx];
            self.palette_idx += 1;
            let mut next = self.circuit.clone();
            next.add_gate(kind)
                .expect("palette kinds are combinational");
            return Some(next);
        }

        let n = self.circuit.gates().len();
        while self.source < n {
            let (from, to) = (self.source, self.target);
            self.bump();

            if from == to {
                continue;
            }
            let source_kind = self.circuit.gates()[from].kind;
            let target_kind = self.circuit.gates()[to].kind;
            if target_kind.is_input() || source_kind.is_output() {
                continue;
            }
            if self.circuit.fanin_count(to) >= target_kind.fanin_capacity() {
                continue;
            }
            if self
                .circuit
                .connections()
                .iter()
                .any(|c| c.from == from && c.to == to)
            {
                continue;
            }

            let mut next = self.circuit.clone();
            // The only error left to hit here is the cycle rejection.
            if next.add_connection(from, to).is_ok() {
                return Some(next);
            }
        }

        None
    }
}

/// Cooperative cancellation flag, checked once per frontier pop.
///
/// Clone it, hand one copy to the search thread and keep the other; calling
/// [`cancel`] makes the running search unwind to [`Outcome::Cancelled`].
///
/// [`cancel`]: CancelToken::cancel
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Relaxed)
    }
}

/// Terminal outcome of a search run.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A circuit reproducing every row exactly, with no disconnected gate.
    Solved(Circuit),
    /// The frontier emptied without a qualifying circuit: no solution exists in
    /// the explored space under the gate palette, fan-in rules and limits.
    Exhausted,
    /// The caller asked us to stop. Distinct from giving up.
    Cancelled,
}

impl Outcome {
    pub fn solved(&self) -> Option<&Circuit> {
        match self {
            Outcome::Solved(circuit) => Some(circuit),
            _ => None,
        }
    }
}

/// A frontier entry. Ordered so that [`BinaryHeap`] pops the *lowest* cost first;
/// the insertion sequence number makes the order total (ties resolved
/// first-in-first-out, which is as arbitrary as anything).
struct FrontierEntry {
    cost: u64,
    seq: u64,
    circuit: Circuit,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the heap is a max-heap and we want the cheapest entry on top.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// The search driver.
///
/// ```rust
/// use gatesynth::{Outcome, SearchLimits, Synthesizer, TruthTable};
///
/// // Learn a NOT gate: one input, one output, inverted.
/// let table = TruthTable::from_fn(1, 1, |i| vec![!i[0]]);
/// let synthesizer = Synthesizer::with_limits(table, SearchLimits { max_gates: Some(1) });
/// match synthesizer.run() {
///     Outcome::Solved(circuit) => assert!(!circuit.has_disconnected_gate()),
///     _ => panic!("a NOT gate is certainly realizable"),
/// }
/// ```
pub struct Synthesizer {
    table: TruthTable,
    limits: SearchLimits,
}

impl Synthesizer {
    /// A search over the unbounded space (no gate limit).
    pub fn new(table: TruthTable) -> Self {
        Synthesizer {
            table,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(table: TruthTable, limits: SearchLimits) -> Self {
        Synthesizer { table, limits }
    }

    /// Run the search to one of its terminal outcomes, without cancellation.
    pub fn run(&self) -> Outcome {
        self.run_with_cancel(&CancelToken::new())
    }

    /// Run the search, polling `cancel` once per frontier pop.
    ///
    /// The frontier and visited set live on this call's stack and are dropped
    /// wholesale on return, whatever the outcome.
    pub fn run_with_cancel(&self, cancel: &CancelToken) -> Outcome {
        let initial = Circuit::new(self.table.num_inputs(), self.table.num_outputs());

        // Search circuits are built against this very table, so scoring cannot fail.
        let initial_score =
            score(&initial, &self.table).expect("initial circuit matches the table width");
        if initial_score.exact && !initial.has_disconnected_gate() {
            return Outcome::Solved(initial);
        }

        let mut visited = HashSet::new();
        visited.insert(initial.canonical_form());

        let mut frontier = BinaryHeap::new();
        let mut seq = 0;
        frontier.push(FrontierEntry {
            cost: initial_score.cost,
            seq,
            circuit: initial,
        });

        while let Some(entry) = frontier.pop() {
            if cancel.is_cancelled() {
                return Outcome::Cancelled;
            }

            for neighbor in Neighbors::new(&entry.circuit, self.limits) {
                if !visited.insert(neighbor.canonical_form()) {
                    continue;
                }

                let neighbor_score =
                    score(&neighbor, &self.table).expect("neighbors match the table width");

                // Greedy exit on generation: a qualifying candidate is accepted
                // immediately, without waiting for it to surface as the frontier
                // minimum.
                if neighbor_score.exact && !neighbor.has_disconnected_gate() {
                    return Outcome::Solved(neighbor);
                }

                seq += 1;
                frontier.push(FrontierEntry {
                    cost: neighbor_score.cost,
                    seq,
                    circuit: neighbor,
                });
            }
        }

        Outcome::Exhausted
    }
}
