use serde::{Deserialize, Serialize};

use crate::codec::Digit;

/// One sort problem: numbers as drawn, and the same numbers ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub input: Vec<u64>,
    pub output: Vec<u64>,
}

impl Row {
    /// Builds a row whose expected output is `input` sorted by numeric value.
    pub fn from_unsorted(input: Vec<u64>) -> Row {
        let mut output = input.clone();
        // `sort` is stable; equal numbers keep their drawn order.
        output.sort();
        Row { input, output }
    }
}

/// A `Row` flattened to one digit per network unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRow {
    pub input: Vec<Digit>,
    pub output: Vec<Digit>,
}

/// Normalized inputs and expected outputs as two parallel batches;
/// `inputs[i]` and `outputs[i]` come from the same row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParallelVectors {
    pub inputs: Vec<Vec<f64>>,
    pub outputs: Vec<Vec<f64>>,
}

impl ParallelVectors {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
