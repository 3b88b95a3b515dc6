use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{digits_to_string, Digit};

/// How the learner did on one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Normalized input vector that was fed to the learner.
    pub input: Vec<f64>,
    /// Learner output decoded to digits.
    pub actual: Vec<Digit>,
    /// Expected output decoded to digits.
    pub expected: Vec<Digit>,
    /// `actual == expected` at every position.
    pub correct: bool,
}

impl ResultRecord {
    /// The decoded output as `"d,d,d"`.
    pub fn actual_string(&self) -> String {
        digits_to_string(&self.actual)
    }
}

/// Aggregate outcome of one evaluation pass, with per-row records in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    correct: usize,
    total: usize,
    accuracy: f64,
    records: Vec<ResultRecord>,
}

impl EvaluationReport {
    pub fn new(records: Vec<ResultRecord>) -> EvaluationReport {
        let total = records.len();
        let correct = records.iter().filter(|r| r.correct).count();
        EvaluationReport {
            correct,
            total,
            accuracy: accuracy_percent(correct, total),
            records,
        }
    }

    /// Percentage of fully correct rows, rounded to two decimals.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accuracy: {:.2}%", self.accuracy)
    }
}

/// `correct / total` as a percentage rounded to two decimals; 0 for no rows.
fn accuracy_percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = correct as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}
