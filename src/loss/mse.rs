/// Mean-squared error between a network output and its normalized target.
pub struct MseLoss;

impl MseLoss {
    /// mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let sum: f64 = predicted.iter().zip(expected)
            .map(|(p, e)| (p - e).powi(2))
            .sum();
        sum / predicted.len() as f64
    }

    /// ∂L/∂p up to the constant 2/n, which the learning rate absorbs.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected)
            .map(|(p, e)| p - e)
            .collect()
    }
}
