//! Classic cart-pole balancing environment
//!
//! A cart slides along a frictionless track with a pole hinged on top. Each
//! step pushes the cart left or right with a fixed force; the episode ends when
//! the pole leans past the failure angle or the cart leaves the track, and is
//! truncated after a fixed number of steps. Every step (including the final
//! one) earns a reward of 1.

use crate::env::Environment;
use crate::error::SimError;
use crate::types::{Action, Observation, Step};

/// Configuration for a [`CartPoleEnv`]
#[derive(Clone, Debug)]
pub struct CartPoleConfig {
    /// Gravitational acceleration
    pub gravity: f32,
    /// Cart mass in kg
    pub cart_mass: f32,
    /// Pole mass in kg
    pub pole_mass: f32,
    /// Half the pole length in meters
    pub pole_half_length: f32,
    /// Force applied to the cart by each action
    pub force_magnitude: f32,
    /// Integration time step in seconds
    pub tau: f32,
    /// Cart position beyond which the episode terminates
    pub position_limit: f32,
    /// Pole angle (radians) beyond which the episode terminates
    pub failure_angle: f32,
    /// Steps after which the episode is truncated
    pub max_steps: u32,
    /// Half-width of the uniform noise applied to every state component on reset
    pub reset_noise: f32,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            pole_half_length: 0.5,
            force_magnitude: 10.0,
            tau: 0.02,
            position_limit: 2.4,
            failure_angle: 12.0_f32.to_radians(),
            max_steps: 500,
            reset_noise: 0.05,
        }
    }
}

impl CartPoleConfig {
    fn total_mass(&self) -> f32 {
        self.cart_mass + self.pole_mass
    }

    fn pole_mass_length(&self) -> f32 {
        self.pole_mass * self.pole_half_length
    }
}

/// A single cart-pole simulation
pub struct CartPoleEnv {
    config: CartPoleConfig,
    state: Observation,
    steps: u32,
    rng: fastrand::Rng,
    closed: bool,
}

impl CartPoleEnv {
    /// Create an environment with the default configuration.
    ///
    /// The environment starts at rest; call [`Environment::reset`] to sample an
    /// initial state.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(CartPoleConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(config: CartPoleConfig, seed: u64) -> Self {
        Self {
            config,
            state: Observation::default(),
            steps: 0,
            rng: fastrand::Rng::with_seed(seed),
            closed: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CartPoleConfig {
        &self.config
    }

    /// Current state without advancing the simulation
    #[must_use]
    pub fn state(&self) -> Observation {
        self.state
    }

    /// Steps taken in the current episode
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Explicit Euler integration of the cart-pole equations of motion.
    fn integrate(&mut self, force: f32) {
        let c = &self.config;
        let Observation {
            cart_position: x,
            cart_velocity: x_dot,
            pole_angle: theta,
            pole_angular_velocity: theta_dot,
        } = self.state;

        let (sin_theta, cos_theta) = theta.sin_cos();
        let temp = (force + c.pole_mass_length() * theta_dot * theta_dot * sin_theta) / c.total_mass();
        let theta_acc = (c.gravity * sin_theta - cos_theta * temp)
            / (c.pole_half_length * (4.0 / 3.0 - c.pole_mass * cos_theta * cos_theta / c.total_mass()));
        let x_acc = temp - c.pole_mass_length() * theta_acc * cos_theta / c.total_mass();

        self.state = Observation::new(
            x + c.tau * x_dot,
            x_dot + c.tau * x_acc,
            theta + c.tau * theta_dot,
            theta_dot + c.tau * theta_acc,
        );
    }

    fn is_terminal(&self) -> bool {
        self.state.cart_position.abs() > self.config.position_limit
            || self.state.pole_angle.abs() > self.config.failure_angle
    }

    fn sample_noise(&mut self) -> f32 {
        (self.rng.f32() * 2.0 - 1.0) * self.config.reset_noise
    }
}

impl Environment for CartPoleEnv {
    fn reset(&mut self) -> Result<Observation, SimError> {
        if self.closed {
            return Err(SimError::Closed);
        }
        self.state = Observation::new(
            self.sample_noise(),
            self.sample_noise(),
            self.sample_noise(),
            self.sample_noise(),
        );
        self.steps = 0;
        Ok(self.state)
    }

    fn step(&mut self, action: Action) -> Result<Step, SimError> {
        if self.closed {
            return Err(SimError::Closed);
        }
        self.integrate(action.direction() * self.config.force_magnitude);
        self.steps += 1;

        Ok(Step {
            observation: self.state,
            reward: 1.0,
            terminated: self.is_terminal(),
            truncated: self.steps >= self.config.max_steps,
        })
    }

    fn close(&mut self) {
        if !self.closed {
            tracing::debug!("closing cart-pole environment after {} steps", self.steps);
        }
        self.closed = true;
    }
}
