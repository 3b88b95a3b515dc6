use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::data::generator::MAX_DIGITS;
use crate::error::{Result, SortError};
use crate::learner::network_learner::DEFAULT_HIDDEN_LAYERS;
use crate::train::TrainConfig;

/// Everything one end-to-end run needs: dataset shape, network topology and
/// training hyperparameters.
///
/// Missing fields in a JSON config fall back to the defaults below, which
/// reproduce the classic "sort two 3-digit numbers" setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Rows in the generated training set.
    pub train_rows: usize,
    /// Rows in the generated held-out test set.
    pub test_rows: usize,
    /// Numbers to sort per row.
    pub count_per_row: usize,
    /// Decimal digits per number.
    pub digits: u32,
    pub hidden_layers: Vec<usize>,
    /// Activation of the hidden layers; the output layer is always sigmoid.
    pub hidden_activation: ActivationFunction,
    /// Seed for dataset generation.
    pub seed: u64,
    pub train: TrainConfig,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            train_rows: 2000,
            test_rows: 5000,
            count_per_row: 2,
            digits: 3,
            hidden_layers: DEFAULT_HIDDEN_LAYERS.to_vec(),
            hidden_activation: ActivationFunction::Sigmoid,
            seed: 42,
            train: TrainConfig::default(),
        }
    }
}

impl SortConfig {
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<SortConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: SortConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    /// Width of every input and output vector the network sees.
    pub fn vector_width(&self) -> usize {
        self.count_per_row * self.digits as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.count_per_row == 0 {
            return Err(SortError::InvalidConfig("count_per_row must be at least 1".into()));
        }
        if self.digits == 0 || self.digits > MAX_DIGITS {
            return Err(SortError::InvalidConfig(format!(
                "digits must be in 1..={MAX_DIGITS}, got {}",
                self.digits
            )));
        }
        if self.hidden_layers.contains(&0) {
            return Err(SortError::InvalidConfig("hidden layer widths must be at least 1".into()));
        }
        if self.train.batch_size == 0 {
            return Err(SortError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if !(self.train.learning_rate.is_finite() && self.train.learning_rate > 0.0) {
            return Err(SortError::InvalidConfig("learning_rate must be positive".into()));
        }
        Ok(())
    }
}
