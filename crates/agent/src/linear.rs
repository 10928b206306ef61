use serde::Deserialize;
use sim::{Action, Observation};
use std::path::Path;

use crate::error::PolicyError;
use crate::Policy;

const OBS_DIM: usize = 4;

/// On-disk layout of trained weights.
///
/// Weights are stored row-major as `out_dim` rows of `in_dim` values, one row
/// per action, followed by one bias per action.
#[derive(Deserialize)]
struct LinearWeights {
    in_dim: usize,
    out_dim: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

/// Single dense layer scoring each action; the highest score wins.
#[derive(Debug)]
pub struct LinearPolicy {
    weights: Vec<f32>,
    bias: Vec<f32>,
    rng: fastrand::Rng,
}

impl LinearPolicy {
    /// Build a policy from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Shape`] unless `weights` holds
    /// `Action::COUNT * 4` values and `bias` holds `Action::COUNT`.
    pub fn new(weights: Vec<f32>, bias: Vec<f32>) -> Result<Self, PolicyError> {
        if weights.len() != Action::COUNT * OBS_DIM {
            return Err(PolicyError::Shape(format!(
                "expected {} weights, found {}",
                Action::COUNT * OBS_DIM,
                weights.len()
            )));
        }
        if bias.len() != Action::COUNT {
            return Err(PolicyError::Shape(format!(
                "expected {} biases, found {}",
                Action::COUNT,
                bias.len()
            )));
        }
        Ok(Self {
            weights,
            bias,
            rng: fastrand::Rng::new(),
        })
    }

    /// Parse weights from their JSON representation.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or on dimensions that do not match the
    /// four-value observation and two-action space.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let raw: LinearWeights = serde_json::from_str(json)?;
        if raw.in_dim != OBS_DIM || raw.out_dim != Action::COUNT {
            return Err(PolicyError::Shape(format!(
                "expected {OBS_DIM}x{} layer, found {}x{}",
                Action::COUNT,
                raw.in_dim,
                raw.out_dim
            )));
        }
        Self::new(raw.weights, raw.bias)
    }

    /// Load weights from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Io`] if the file cannot be read, otherwise the
    /// errors of [`LinearPolicy::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_json(&json)?;
        tracing::info!("Loaded linear policy from {:?}", path);
        Ok(policy)
    }

    /// Seed the sampler used for non-deterministic predictions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Per-action scores for `observation`.
    #[must_use]
    pub fn scores(&self, observation: &Observation) -> [f32; Action::COUNT] {
        let x = observation.to_array();
        let mut out = [0.0; Action::COUNT];
        for (a, score) in out.iter_mut().enumerate() {
            let row = &self.weights[a * OBS_DIM..(a + 1) * OBS_DIM];
            *score = row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>() + self.bias[a];
        }
        out
    }
}

impl Policy for LinearPolicy {
    fn predict(&mut self, observation: &Observation, deterministic: bool) -> Action {
        let [decrease, increase] = self.scores(observation);
        if deterministic {
            return if increase > decrease {
                Action::Increase
            } else {
                Action::Decrease
            };
        }
        // Two-way softmax: P(increase) = sigmoid(increase - decrease).
        let p_increase = 1.0 / (1.0 + (decrease - increase).exp());
        if self.rng.f32() < p_increase {
            Action::Increase
        } else {
            Action::Decrease
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ANGLE_ONLY: &str = r#"{
        "in_dim": 4,
        "out_dim": 2,
        "weights": [0.0, 0.0, -1.0, 0.0,
                    0.0, 0.0,  1.0, 0.0],
        "bias": [0.0, 0.0]
    }"#;

    #[test]
    fn scores_are_row_dot_products_plus_bias() {
        let policy = LinearPolicy::new(
            vec![1.0, 2.0, 3.0, 4.0, -1.0, 0.0, 0.5, 0.0],
            vec![0.5, -0.5],
        )
        .unwrap();
        let [d, i] = policy.scores(&Observation::new(1.0, 1.0, 1.0, 1.0));
        assert_relative_eq!(d, 10.5);
        assert_relative_eq!(i, -1.0);
    }

    #[test]
    fn deterministic_picks_the_larger_score() {
        let mut policy = LinearPolicy::from_json(ANGLE_ONLY).unwrap();
        assert_eq!(
            policy.predict(&Observation::new(0.0, 0.0, 0.2, 0.0), true),
            Action::Increase
        );
        assert_eq!(
            policy.predict(&Observation::new(0.0, 0.0, -0.2, 0.0), true),
            Action::Decrease
        );
    }

    #[test]
    fn sampling_follows_the_preference() {
        let mut policy = LinearPolicy::from_json(ANGLE_ONLY).unwrap().with_seed(11);
        // Score gap of 10 => P(increase) > 0.9999.
        let obs = Observation::new(0.0, 0.0, 5.0, 0.0);
        let increases = (0..200)
            .filter(|_| policy.predict(&obs, false) == Action::Increase)
            .count();
        assert!(increases > 190);
    }

    #[test]
    fn rejects_wrong_layer_shape() {
        let json = r#"{"in_dim": 3, "out_dim": 2, "weights": [0,0,0,0,0,0], "bias": [0,0]}"#;
        assert!(matches!(
            LinearPolicy::from_json(json),
            Err(PolicyError::Shape(_))
        ));
        assert!(matches!(
            LinearPolicy::new(vec![0.0; 8], vec![0.0]),
            Err(PolicyError::Shape(_))
        ));
    }
}
