use serde::{Serialize, Deserialize};

/// Hyperparameters for a `train_loop` run.
///
/// # Fields
/// - `iterations`      — maximum number of full passes over the training data
/// - `error_threshold` — stop early once an epoch's mean error falls below this
/// - `learning_rate`   — step size for gradient descent
/// - `momentum`        — fraction of the previous update carried into the next
/// - `batch_size`      — samples per update; `1` is online gradient descent
/// - `log_period`      — log progress every this many epochs; `0` disables it
/// - `seed`            — seeds weight initialization and per-epoch shuffling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub iterations: usize,
    pub error_threshold: f64,
    pub learning_rate: f64,
    pub momentum: f64,
    pub batch_size: usize,
    pub log_period: usize,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            iterations: 20_000,
            error_threshold: 0.0001,
            learning_rate: 0.3,
            momentum: 0.1,
            batch_size: 1,
            log_period: 100,
            seed: 0,
        }
    }
}
