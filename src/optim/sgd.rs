use crate::{math::matrix::Matrix, layers::dense::Layer};

/// Gradient descent with classical momentum.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64, momentum: f64) -> Sgd {
        Sgd { learning_rate, momentum }
    }

    /// Applies one update to a layer given its pre-computed gradients.
    pub fn step(&self, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &Matrix) {
        layer.apply_gradients(weights_grad, biases_grad, self.learning_rate, self.momentum);
    }
}
