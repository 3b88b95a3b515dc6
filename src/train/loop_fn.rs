use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::summary::TrainSummary;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` until the epoch error drops below
/// `config.error_threshold` or `config.iterations` epochs have run.
///
/// `inputs[i]` pairs with `labels[i]`; both must already match the network's
/// input and output widths. `rng` drives the per-epoch shuffle.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    config: &TrainConfig,
    rng: &mut R,
) -> TrainSummary {
    debug_assert_eq!(inputs.len(), labels.len());

    let optimizer = Sgd::new(config.learning_rate, config.momentum);
    let batch_size = config.batch_size.max(1);
    let mut summary = TrainSummary { iterations: 0, error: f64::INFINITY };

    if inputs.is_empty() {
        return summary;
    }

    for epoch in 1..=config.iterations {
        let t_start = Instant::now();
        let error = run_one_epoch(network, inputs, labels, &optimizer, batch_size, rng);
        summary = TrainSummary { iterations: epoch, error };

        if config.log_period > 0 && epoch % config.log_period == 0 {
            info!(
                epoch,
                error,
                elapsed_ms = t_start.elapsed().as_millis() as u64,
                "training progress"
            );
        }

        if error < config.error_threshold {
            debug!(epoch, error, threshold = config.error_threshold, "error threshold reached");
            break;
        }
    }

    summary
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one full epoch of mini-batch descent over the training data.
/// Returns the mean error over all samples.
fn run_one_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    optimizer: &Sgd,
    batch_size: usize,
    rng: &mut R,
) -> f64 {
    let n = inputs.len();
    let mut total_error = 0.0;

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    for batch in indices.chunks(batch_size) {
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        for &idx in batch {
            let output = network.forward(&inputs[idx]);
            total_error += MseLoss::loss(&output, &labels[idx]);

            let mut delta = Matrix::row_vector(&MseLoss::derivative(&output, &labels[idx]));
            for i in (0..network.layers.len()).rev() {
                let (w_grad, b_grad, input_delta) = network.layers[i].compute_gradients(&delta);
                acc_grads[i].0 = &acc_grads[i].0 + &w_grad;
                acc_grads[i].1 = &acc_grads[i].1 + &b_grad;
                delta = input_delta;
            }
        }

        let inv_batch = 1.0 / batch.len() as f64;
        for (layer, (w_acc, b_acc)) in network.layers.iter_mut().zip(acc_grads) {
            optimizer.step(layer, &w_acc.scale(inv_batch), &b_acc.scale(inv_batch));
        }
    }

    total_error / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn xor() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (
            vec![vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0], vec![0.0, 0.0]],
            vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]],
        )
    }

    #[test]
    fn error_decreases_on_xor() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut network = Network::new(2, &[4], 1, ActivationFunction::Sigmoid, &mut rng);
        let (inputs, labels) = xor();

        let short = TrainConfig { iterations: 1, log_period: 0, ..TrainConfig::default() };
        let first = train_loop(&mut network, &inputs, &labels, &short, &mut rng);

        let long = TrainConfig { iterations: 3000, log_period: 0, learning_rate: 0.5, ..TrainConfig::default() };
        let last = train_loop(&mut network, &inputs, &labels, &long, &mut rng);

        assert!(last.error < first.error, "{} !< {}", last.error, first.error);
    }

    #[test]
    fn stops_at_error_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut network = Network::new(1, &[], 1, ActivationFunction::Sigmoid, &mut rng);
        let config = TrainConfig {
            iterations: 10,
            error_threshold: f64::INFINITY,
            ..TrainConfig::default()
        };
        let summary = train_loop(&mut network, &[vec![0.5]], &[vec![0.5]], &config, &mut rng);
        assert_eq!(summary.iterations, 1);
    }

    #[test]
    fn empty_dataset_runs_no_epochs() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut network = Network::new(1, &[], 1, ActivationFunction::Sigmoid, &mut rng);
        let summary = train_loop(&mut network, &[], &[], &TrainConfig::default(), &mut rng);
        assert_eq!(summary.iterations, 0);
    }

    #[test]
    fn mini_batches_cover_a_ragged_tail() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut network = Network::new(2, &[3], 1, ActivationFunction::Sigmoid, &mut rng);
        let (inputs, labels) = xor();
        let config = TrainConfig { iterations: 5, batch_size: 3, log_period: 1, ..TrainConfig::default() };
        let summary = train_loop(&mut network, &inputs, &labels, &config, &mut rng);
        assert_eq!(summary.iterations, 5);
        assert!(summary.error.is_finite());
    }
}
