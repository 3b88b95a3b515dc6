use serde::{Serialize, Deserialize};

/// Outcome of a whole training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Epochs actually run; below the budget when the threshold was reached.
    pub iterations: usize,
    /// Mean error of the last completed epoch.
    pub error: f64,
}
