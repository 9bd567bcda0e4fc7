//! Truth tables: the search objective supplied by the caller.
//!
//! A [`TruthTable`] is validated wholesale at construction; the engine never has to
//! deal with a mis-sized row once a table exists.

use crate::circuit::TableError;

/// One input-vector / expected-output-vector pair the synthesized circuit must reproduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRow {
    pub inputs: Vec<bool>,
    pub expected: Vec<bool>,
}

impl TruthTableRow {
    pub fn new(inputs: Vec<bool>, expected: Vec<bool>) -> Self {
        TruthTableRow { inputs, expected }
    }
}

/// The full search objective: input/output widths plus one row per input combination
/// the caller cares about.
#[derive(Debug, Clone)]
pub struct TruthTable {
    num_inputs: usize,
    num_outputs: usize,
    rows: Vec<TruthTableRow>,
}

impl TruthTable {
    /// Build a table, rejecting any row whose input or expected-output vector does
    /// not have the announced width.
    pub fn new(
        num_inputs: usize,
        num_outputs: usize,
        rows: Vec<TruthTableRow>,
    ) -> Result<Self, TableError> {
        for (i, row) in rows.iter().enumerate() {
            if row.inputs.len() != num_inputs {
                return Err(TableError::InputWidth {
                    row: i,
                    expected: num_inputs,
                    got: row.inputs.len(),
                });
            }
            if row.expected.len() != num_outputs {
                return Err(TableError::OutputWidth {
                    row: i,
                    expected: num_outputs,
                    got: row.expected.len(),
                });
            }
        }
        Ok(TruthTable {
            num_inputs,
            num_outputs,
            rows,
        })
    }

    /// Build the exhaustive table of a boolean function: one row per input
    /// combination, `2^num_inputs` rows in total. Input vectors are enumerated in
    /// binary counting order, most significant bit first.
    pub fn from_fn<F>(num_inputs: usize, num_outputs: usize, f: F) -> Self
    where
        F: Fn(&[bool]) -> Vec<bool>,
    {
        let mut rows = Vec::with_capacity(1 << num_inputs);
        for combo in 0..(1u64 << num_inputs) {
            let inputs: Vec<bool> = (0..num_inputs)
                .map(|bit| combo >> (num_inputs - 1 - bit) & 1 == 1)
                .collect();
            let expected = f(&inputs);
            assert_eq!(expected.len(), num_outputs);
            rows.push(TruthTableRow { inputs, expected });
        }
        TruthTable {
            num_inputs,
            num_outputs,
            rows,
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_bad_row_widths() {
        let short_input = vec![TruthTableRow::new(vec![true], vec![false])];
        assert!(TruthTable::new(2, 1, short_input).is_err());

        let short_output = vec![TruthTableRow::new(vec![true, false], vec![])];
        assert!(TruthTable::new(2, 1, short_output).is_err());

        let ok = vec![TruthTableRow::new(vec![true, false], vec![true])];
        assert!(TruthTable::new(2, 1, ok).is_ok());
    }

    #[test]
    fn from_fn_enumerates_all_combinations() {
        let table = TruthTable::from_fn(2, 1, |inputs| vec![inputs[0] && inputs[1]]);
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[0].inputs, vec![false, false]);
        assert_eq!(table.rows()[3].inputs, vec![true, true]);
        assert_eq!(table.rows()[3].expected, vec![true]);
        assert_eq!(table.rows()[1].expected, vec![false]);
    }
}
