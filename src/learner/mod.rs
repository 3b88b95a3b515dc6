//! The trainable function-approximator the evaluation pipeline drives.
//!
//! The pipeline only needs two capabilities: fit a batch of normalized
//! input/output pairs, and map one normalized input to an output vector of the
//! same width. [`NetworkLearner`] is the feed-forward implementation shipped
//! with the crate; anything else satisfying [`Learner`] can be substituted.

pub mod network_learner;

pub use network_learner::NetworkLearner;

use crate::error::Result;
use crate::train::{TrainConfig, TrainSummary};

pub trait Learner {
    /// Fits the learner to `inputs[i] → outputs[i]` for every `i`.
    ///
    /// Blocks until training finishes.
    fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        outputs: &[Vec<f64>],
        config: &TrainConfig,
    ) -> Result<TrainSummary>;

    /// Raw output vector for one normalized input.
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>>;
}

impl<L: Learner + ?Sized> Learner for &mut L {
    fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        outputs: &[Vec<f64>],
        config: &TrainConfig,
    ) -> Result<TrainSummary> {
        (**self).fit(inputs, outputs, config)
    }

    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        (**self).predict(input)
    }
}

impl<L: Learner + ?Sized> Learner for Box<L> {
    fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        outputs: &[Vec<f64>],
        config: &TrainConfig,
    ) -> Result<TrainSummary> {
        (**self).fit(inputs, outputs, config)
    }

    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        (**self).predict(input)
    }
}
