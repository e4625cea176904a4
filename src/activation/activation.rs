use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    /// Softmax is a vector-valued activation; it is applied over a whole layer
    /// output by `apply()`. The element-wise `function()` must not see it.
    Softmax,
}

impl ActivationFunction {
    /// Element-wise activation. Panics for `Softmax`, which only exists over a
    /// full vector; go through `apply()` instead.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Softmax => {
                panic!("ActivationFunction::Softmax::function() must not be called directly; \
                        use ActivationFunction::apply() which applies the full-vector softmax.")
            }
        }
    }

    /// Applies the activation to a whole layer output.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => softmax(z),
            _ => z.iter().map(|&x| self.function(x)).collect(),
        }
    }
}

/// y_i = exp(z_i) / Σ_j exp(z_j)
///
/// No max-logit subtraction: trained parameters were calibrated against this
/// exact formula, so outputs must match it even at the margins. Logits above
/// ~709 overflow `exp` and the result turns into NaN; that case is logged,
/// not corrected.
pub fn softmax(z: &[f64]) -> Vec<f64> {
    let exps: Vec<f64> = z.iter().map(|x| x.exp()).collect();
    let denom: f64 = exps.iter().sum();
    if !denom.is_finite() || denom == 0.0 {
        tracing::warn!(denom, "softmax denominator is not a usable finite value; probabilities will be degenerate");
    }
    exps.iter().map(|e| e / denom).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        let out = ActivationFunction::ReLU.apply(&[-2.0, 0.0, 3.5]);
        assert_eq!(out, vec![0.0, 0.0, 3.5]);
    }

    #[test]
    fn softmax_is_a_distribution() {
        let out = softmax(&[1.0, 2.0, 3.0, -4.0]);
        let total: f64 = out.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(out.iter().all(|&p| p >= 0.0));
        assert!(out[2] > out[1] && out[1] > out[0]);
    }

    #[test]
    fn softmax_uniform_for_equal_logits() {
        let out = ActivationFunction::Softmax.apply(&[0.0; 10]);
        for p in out {
            assert!((p - 0.1).abs() < 1e-15);
        }
    }

    #[test]
    fn softmax_overflows_without_stabilization() {
        // exp(1000) is +inf, inf / inf is NaN. Reproduced on purpose.
        let out = softmax(&[1000.0, 0.0]);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 0.0);
    }

    #[test]
    #[should_panic]
    fn softmax_has_no_elementwise_form() {
        ActivationFunction::Softmax.function(1.0);
    }
}
