use serde::{Serialize, Deserialize};

use crate::network::parameters::CLASSES;

/// Outcome of one classification: the winning digit, its softmax
/// probability, and the full distribution it was picked from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: usize,
    pub confidence: f64,
    pub probabilities: [f64; CLASSES],
}

impl ClassificationResult {
    /// Picks the first maximal entry. A NaN counts as maximal, so the first
    /// NaN wins, mirroring array `argmax` semantics.
    pub fn from_probabilities(probabilities: [f64; CLASSES]) -> ClassificationResult {
        let label = argmax(&probabilities);
        ClassificationResult {
            label,
            confidence: probabilities[label],
            probabilities,
        }
    }

    /// Confidence as a percentage, the way results are shown to users.
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if v[best].is_nan() {
            break;
        }
        if x.is_nan() || x > v[best] {
            best = i;
        }
    }
    best
}
