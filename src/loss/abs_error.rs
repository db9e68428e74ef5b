/// Summed absolute error, the convergence measure of minimum-error training.
pub struct AbsoluteError;

impl AbsoluteError {
    /// Σ |expected - predicted| (a sum, not a mean).
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| (y - p).abs())
            .sum()
    }
}
