use std::f64::consts::E;

/// Inputs beyond this magnitude saturate the sigmoid to exactly 0.0 or 1.0.
pub const SATURATION_LIMIT: f64 = 45.0;

/// Logistic sigmoid transfer function used by every neuron.
pub struct Sigmoid;

impl Sigmoid {
    /// 1 / (1 + e^-x), clamped to 0.0 below -45 and 1.0 above 45.
    pub fn output(x: f64) -> f64 {
        if x < -SATURATION_LIMIT {
            0.0
        } else if x > SATURATION_LIMIT {
            1.0
        } else {
            1.0 / (1.0 + E.powf(-x))
        }
    }

    /// Derivative expressed in terms of the sigmoid's own output.
    ///
    /// `y` must already be `Sigmoid::output(x)`, not the raw pre-activation.
    pub fn derivative(y: f64) -> f64 {
        y * (1.0 - y)
    }
}
