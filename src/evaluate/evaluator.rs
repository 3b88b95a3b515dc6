use tracing::{info, warn};

use crate::codec::denormalize_vector;
use crate::data::{format_single_input, to_parallel_vectors, FormattedRow, ParallelVectors};
use crate::error::{Result, SortError};
use crate::evaluate::report::{EvaluationReport, ResultRecord};
use crate::learner::Learner;
use crate::train::TrainConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fit the learner on the dataset, then score it on the same rows.
    Train,
    /// Score the learner as it is.
    Evaluate,
}

/// Normalizes a dataset into parallel batches after checking that every
/// input and output vector has the width of the first row's input.
pub fn normalize_dataset(rows: &[FormattedRow]) -> Result<ParallelVectors> {
    let Some(first) = rows.first() else {
        return Ok(ParallelVectors::default());
    };
    let width = first.input.len();
    for (row, formatted) in rows.iter().enumerate() {
        for found in [formatted.input.len(), formatted.output.len()] {
            if found != width {
                return Err(SortError::ShapeMismatch { row, expected: width, found });
            }
        }
    }
    Ok(to_parallel_vectors(rows))
}

/// Drives a learner through fit/predict and scores its decoded outputs.
///
/// Holds nothing but the learner handle and the hyperparameters passed to
/// `fit`; pass `&mut learner` to keep ownership with the caller.
pub struct Evaluator<L> {
    learner: L,
    train_config: TrainConfig,
}

impl<L: Learner> Evaluator<L> {
    pub fn new(learner: L, train_config: TrainConfig) -> Evaluator<L> {
        Evaluator { learner, train_config }
    }

    pub fn learner(&self) -> &L {
        &self.learner
    }

    pub fn train(&mut self, rows: &[FormattedRow]) -> Result<EvaluationReport> {
        self.run(rows, Mode::Train)
    }

    pub fn evaluate(&mut self, rows: &[FormattedRow]) -> Result<EvaluationReport> {
        self.run(rows, Mode::Evaluate)
    }

    /// Normalize, optionally fit, predict every row, decode and compare.
    pub fn run(&mut self, rows: &[FormattedRow], mode: Mode) -> Result<EvaluationReport> {
        let data = normalize_dataset(rows)?;

        if mode == Mode::Train {
            if data.is_empty() {
                warn!("empty dataset; skipping fit");
            } else {
                info!(rows = data.len(), "training");
                self.learner.fit(&data.inputs, &data.outputs, &self.train_config)?;
            }
        }

        let mut records = Vec::with_capacity(data.len());
        for (row, (input, output)) in data.inputs.into_iter().zip(data.outputs).enumerate() {
            let raw = self.learner.predict(&input)?;
            if raw.len() != output.len() {
                return Err(SortError::ShapeMismatch {
                    row,
                    expected: output.len(),
                    found: raw.len(),
                });
            }
            let actual = denormalize_vector(&raw);
            let expected = denormalize_vector(&output);
            let correct = actual == expected;
            records.push(ResultRecord { input, actual, expected, correct });
        }

        let report = EvaluationReport::new(records);
        info!(
            mode = ?mode,
            correct = report.correct(),
            total = report.total(),
            accuracy = report.accuracy(),
            "evaluation finished"
        );
        Ok(report)
    }

    /// Runs the learner on one `"321,145"`-style query line.
    ///
    /// The expected output is the line's own sort, so the record's `correct`
    /// flag says whether the learner sorted it.
    pub fn query(&mut self, line: &str) -> Result<ResultRecord> {
        let rows = format_single_input(line)?;
        let report = self.evaluate(&rows)?;
        report
            .into_records()
            .pop()
            .ok_or_else(|| SortError::MalformedInput(format!("no numbers in '{}'", line.trim())))
    }
}
