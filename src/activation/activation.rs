use serde::{Serialize, Deserialize};

/// Element-wise activation applied after a dense layer's linear transform.
///
/// The output layer should squash into `[0, 1]` (`Sigmoid`) since targets are
/// normalized digits; hidden layers may use any variant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative with respect to the pre-activation `z`.
    pub fn derivative(&self, z: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let s = self.function(z);
                s * (1.0 - s)
            }
            ActivationFunction::Tanh => {
                let t = z.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if z > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if z > 0.0 { 1.0 } else { *alpha },
            ActivationFunction::Identity => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_is_centered_at_half() {
        assert_relative_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
        assert_relative_eq!(ActivationFunction::Sigmoid.derivative(0.0), 0.25);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for act in [
            ActivationFunction::Sigmoid,
            ActivationFunction::Tanh,
            ActivationFunction::LeakyReLU { alpha: 0.1 },
            ActivationFunction::Identity,
        ] {
            for z in [-1.3, -0.2, 0.4, 2.0] {
                let numeric = (act.function(z + h) - act.function(z - h)) / (2.0 * h);
                assert_relative_eq!(act.derivative(z), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ActivationFunction::Sigmoid).unwrap();
        assert_eq!(json, "\"sigmoid\"");
    }
}
