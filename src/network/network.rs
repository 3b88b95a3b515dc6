use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{activation::activation::ActivationFunction, layers::dense::Layer};
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds `input_size → hidden[0] → … → output_size`. Hidden layers use
    /// `hidden_activation`; the output layer is always sigmoid so predictions
    /// stay in the normalized `[0, 1]` range.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        hidden: &[usize],
        output_size: usize,
        hidden_activation: ActivationFunction,
        rng: &mut R,
    ) -> Network {
        let mut layers = Vec::with_capacity(hidden.len() + 1);
        let mut fan_in = input_size;
        for &size in hidden {
            layers.push(Layer::new(size, fan_in, hidden_activation, rng));
            fan_in = size;
        }
        layers.push(Layer::new(output_size, fan_in, ActivationFunction::Sigmoid, rng));
        Network { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
