use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer: `a = f(x·W + b)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
    // Forward-pass caches needed by backprop; not part of the saved model.
    #[serde(skip)]
    input: Matrix,
    #[serde(skip)]
    pre_neurons: Matrix,
    // Momentum buffers, lazily sized on the first update.
    #[serde(skip)]
    weights_velocity: Option<Matrix>,
    #[serde(skip)]
    biases_velocity: Option<Matrix>,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer {
            size,
            input_size,
            weights: Matrix::xavier(input_size, size, rng),
            biases: Matrix::small_uniform(1, size, rng),
            activator: activation,
            input: Matrix::default(),
            pre_neurons: Matrix::default(),
            weights_velocity: None,
            biases_velocity: None,
        }
    }

    /// Forward pass for one sample; caches the input and `z` for backprop.
    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let x = Matrix::row_vector(input);
        let z = &(&x * &self.weights) + &self.biases;
        let a = z.map(|v| self.activator.function(v));
        self.input = x;
        self.pre_neurons = z;
        a.row(0).to_vec()
    }

    /// Backprop through this layer for the most recent `feed_from` sample.
    ///
    /// `output_delta` is ∂L/∂a for this layer. Returns
    /// `(weights_grad, biases_grad, input_delta)` where `input_delta` is ∂L/∂a
    /// of the previous layer.
    pub fn compute_gradients(&self, output_delta: &Matrix) -> (Matrix, Matrix, Matrix) {
        let act_derivative = self.pre_neurons.map(|z| self.activator.derivative(z));
        // δ = ∂L/∂a ⊙ f'(z)
        let layer_delta = output_delta.hadamard(&act_derivative);

        let weights_grad = &self.input.transpose() * &layer_delta;
        let input_delta = &layer_delta * &self.weights.transpose();

        (weights_grad, layer_delta, input_delta)
    }

    /// Momentum step: `v = momentum·v − lr·grad`, then `w += v`.
    pub fn apply_gradients(
        &mut self,
        weights_grad: &Matrix,
        biases_grad: &Matrix,
        learning_rate: f64,
        momentum: f64,
    ) {
        let wv = step_velocity(self.weights_velocity.take(), weights_grad, learning_rate, momentum);
        let bv = step_velocity(self.biases_velocity.take(), biases_grad, learning_rate, momentum);
        self.weights = &self.weights + &wv;
        self.biases = &self.biases + &bv;
        self.weights_velocity = Some(wv);
        self.biases_velocity = Some(bv);
    }
}

fn step_velocity(previous: Option<Matrix>, grad: &Matrix, learning_rate: f64, momentum: f64) -> Matrix {
    let step = grad.scale(-learning_rate);
    match previous {
        Some(v) if momentum != 0.0 => &v.scale(momentum) + &step,
        _ => step,
    }
}
