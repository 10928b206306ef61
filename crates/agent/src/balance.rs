use sim::{Action, Observation};

use crate::Policy;

/// Bang-bang proportional-derivative balancer.
///
/// Pushes towards +x whenever the weighted sum of the state is positive.
/// Always deterministic; the `deterministic` flag is ignored.
#[derive(Clone, Debug)]
pub struct BalancePolicy {
    /// Gains for `[x, x_dot, theta, theta_dot]`.
    pub gains: [f32; 4],
}

impl Default for BalancePolicy {
    fn default() -> Self {
        Self {
            gains: [0.05, 0.1, 1.0, 0.5],
        }
    }
}

impl BalancePolicy {
    fn score(&self, observation: &Observation) -> f32 {
        observation
            .to_array()
            .iter()
            .zip(self.gains)
            .map(|(s, k)| s * k)
            .sum()
    }
}

impl Policy for BalancePolicy {
    fn predict(&mut self, observation: &Observation, _deterministic: bool) -> Action {
        if self.score(observation) > 0.0 {
            Action::Increase
        } else {
            Action::Decrease
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::{CartPoleConfig, CartPoleEnv, Environment};

    #[test]
    fn pushes_under_a_leaning_pole() {
        let mut policy = BalancePolicy::default();
        let right = Observation::new(0.0, 0.0, 0.1, 0.0);
        let left = Observation::new(0.0, 0.0, -0.1, 0.0);
        assert_eq!(policy.predict(&right, true), Action::Increase);
        assert_eq!(policy.predict(&left, true), Action::Decrease);
    }

    #[test]
    fn keeps_the_pole_up_for_two_seconds() {
        let config = CartPoleConfig {
            reset_noise: 0.0,
            ..Default::default()
        };
        let mut env = CartPoleEnv::with_config(config, 0);
        let mut policy = BalancePolicy::default();
        let mut obs = env.reset().unwrap();
        for i in 0..100 {
            let step = env.step(policy.predict(&obs, true)).unwrap();
            assert!(!step.terminated, "pole fell at step {i}");
            obs = step.observation;
        }
    }
}
