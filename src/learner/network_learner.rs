use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::activation::activation::ActivationFunction;
use crate::error::{Result, SortError};
use crate::learner::Learner;
use crate::network::network::Network;
use crate::train::{train_loop, TrainConfig, TrainSummary};

/// Hidden layer widths used when none are given.
pub const DEFAULT_HIDDEN_LAYERS: [usize; 2] = [25, 25];

/// Feed-forward network with a sigmoid output layer, sized from the data on the first `fit`.
#[derive(Debug, Clone)]
pub struct NetworkLearner {
    hidden_layers: Vec<usize>,
    activation: ActivationFunction,
    network: Option<Network>,
}

impl Default for NetworkLearner {
    fn default() -> Self {
        NetworkLearner::new(DEFAULT_HIDDEN_LAYERS.to_vec())
    }
}

impl NetworkLearner {
    pub fn new(hidden_layers: Vec<usize>) -> NetworkLearner {
        NetworkLearner {
            hidden_layers,
            activation: ActivationFunction::Sigmoid,
            network: None,
        }
    }

    /// Activation for the hidden layers; the output layer stays sigmoid.
    pub fn with_activation(mut self, activation: ActivationFunction) -> NetworkLearner {
        self.activation = activation;
        self
    }

    /// Wraps an already trained network; `fit` continues training it.
    pub fn from_network(network: Network) -> NetworkLearner {
        let hidden_layers = network.layers.iter()
            .take(network.layers.len().saturating_sub(1))
            .map(|l| l.size)
            .collect();
        let activation = if network.layers.len() > 1 {
            network.layers[0].activator
        } else {
            ActivationFunction::default()
        };
        NetworkLearner {
            hidden_layers,
            activation,
            network: Some(network),
        }
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.network.is_some()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.network.as_ref().ok_or(SortError::Untrained)?.save_json(path)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkLearner> {
        Ok(NetworkLearner::from_network(Network::load_json(path)?))
    }

    /// Returns the network, building a fresh one when none exists or the
    /// existing one has different input/output widths.
    fn network_for(&mut self, input_size: usize, output_size: usize, rng: &mut ChaCha8Rng) -> &mut Network {
        let network = match self.network.take() {
            Some(n) if n.input_size() == input_size && n.output_size() == output_size => n,
            previous => {
                if previous.is_some() {
                    warn!(input_size, output_size, "data width changed; reinitializing network");
                }
                Network::new(input_size, &self.hidden_layers, output_size, self.activation, rng)
            }
        };
        self.network.insert(network)
    }
}

impl Learner for NetworkLearner {
    fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        outputs: &[Vec<f64>],
        config: &TrainConfig,
    ) -> Result<TrainSummary> {
        if inputs.len() != outputs.len() {
            return Err(SortError::ShapeMismatch {
                row: inputs.len().min(outputs.len()),
                expected: inputs.len(),
                found: outputs.len(),
            });
        }
        let (Some(first_in), Some(first_out)) = (inputs.first(), outputs.first()) else {
            warn!("fit called with no samples; nothing to learn");
            return Ok(TrainSummary { iterations: 0, error: f64::INFINITY });
        };

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let network = self.network_for(first_in.len(), first_out.len(), &mut rng);
        info!(
            samples = inputs.len(),
            layers = network.layers.len(),
            iterations = config.iterations,
            learning_rate = config.learning_rate,
            "training network"
        );
        let summary = train_loop(network, inputs, outputs, config, &mut rng);
        info!(iterations = summary.iterations, error = summary.error, "training finished");
        Ok(summary)
    }

    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let network = self.network.as_mut().ok_or(SortError::Untrained)?;
        if input.len() != network.input_size() {
            return Err(SortError::ShapeMismatch {
                row: 0,
                expected: network.input_size(),
                found: input.len(),
            });
        }
        Ok(network.forward(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_before_fit_is_untrained() {
        let mut learner = NetworkLearner::default();
        assert!(matches!(learner.predict(&[0.5]), Err(SortError::Untrained)));
        assert!(matches!(learner.save_json("unused.json"), Err(SortError::Untrained)));
    }

    #[test]
    fn fit_sizes_network_from_data() {
        let mut learner = NetworkLearner::new(vec![4]);
        let config = TrainConfig { iterations: 2, log_period: 0, ..TrainConfig::default() };
        learner.fit(&[vec![0.1, 0.2, 0.3]], &[vec![0.3, 0.2, 0.1]], &config).unwrap();

        let network = learner.network().unwrap();
        assert_eq!((network.input_size(), network.output_size()), (3, 3));
        assert_eq!(learner.predict(&[0.0, 0.5, 1.0]).unwrap().len(), 3);
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let mut learner = NetworkLearner::new(vec![2]);
        let config = TrainConfig { iterations: 1, log_period: 0, ..TrainConfig::default() };
        learner.fit(&[vec![0.1, 0.2]], &[vec![0.2, 0.1]], &config).unwrap();
        assert!(matches!(
            learner.predict(&[0.1]),
            Err(SortError::ShapeMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn same_seed_trains_identically() {
        let inputs = vec![vec![0.1, 0.9], vec![0.8, 0.2]];
        let outputs = vec![vec![0.1, 0.9], vec![0.2, 0.8]];
        let config = TrainConfig { iterations: 20, log_period: 0, seed: 5, ..TrainConfig::default() };

        let mut a = NetworkLearner::new(vec![3]);
        let mut b = NetworkLearner::new(vec![3]);
        let sa = a.fit(&inputs, &outputs, &config).unwrap();
        let sb = b.fit(&inputs, &outputs, &config).unwrap();
        assert_eq!(sa, sb);
        assert_eq!(a.predict(&[0.5, 0.5]).unwrap(), b.predict(&[0.5, 0.5]).unwrap());
    }

    #[test]
    fn from_network_recovers_hidden_layers() {
        let mut learner = NetworkLearner::default();
        let config = TrainConfig { iterations: 1, log_period: 0, ..TrainConfig::default() };
        learner.fit(&[vec![0.0; 6]], &[vec![0.0; 6]], &config).unwrap();
        let copy = NetworkLearner::from_network(learner.network().unwrap().clone());
        assert_eq!(copy.hidden_layers, DEFAULT_HIDDEN_LAYERS.to_vec());
        assert!(copy.is_trained());
    }

    #[test]
    fn chosen_activation_reaches_hidden_layers_and_survives_reload() {
        let mut learner = NetworkLearner::new(vec![4, 4])
            .with_activation(ActivationFunction::LeakyReLU { alpha: 0.01 });
        let config = TrainConfig { iterations: 3, log_period: 0, ..TrainConfig::default() };
        learner.fit(&[vec![0.2, 0.8]], &[vec![0.8, 0.2]], &config).unwrap();

        let network = learner.network().unwrap().clone();
        assert_eq!(network.layers[0].activator, ActivationFunction::LeakyReLU { alpha: 0.01 });
        assert_eq!(network.layers[2].activator, ActivationFunction::Sigmoid);
        assert!(learner.predict(&[0.5, 0.5]).unwrap().iter().all(|v| (0.0..=1.0).contains(v)));

        let copy = NetworkLearner::from_network(network);
        assert_eq!(copy.activation, ActivationFunction::LeakyReLU { alpha: 0.01 });
    }
}
