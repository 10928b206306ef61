use crate::error::SimError;

/// Snapshot of the cart-pole state as reported by an environment.
///
/// Replaced wholesale on every step; nothing mutates an observation in place.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Observation {
    /// Cart position along the track (simulation units).
    pub cart_position: f32,
    /// Cart velocity.
    pub cart_velocity: f32,
    /// Pole angle in radians, 0 = upright, positive = leaning towards +x.
    pub pole_angle: f32,
    /// Pole angular velocity.
    pub pole_angular_velocity: f32,
}

impl Observation {
    #[must_use]
    pub const fn new(
        cart_position: f32,
        cart_velocity: f32,
        pole_angle: f32,
        pole_angular_velocity: f32,
    ) -> Self {
        Self {
            cart_position,
            cart_velocity,
            pole_angle,
            pole_angular_velocity,
        }
    }

    /// State vector `[x, x_dot, theta, theta_dot]`.
    #[must_use]
    pub const fn to_array(&self) -> [f32; 4] {
        [
            self.cart_position,
            self.cart_velocity,
            self.pole_angle,
            self.pole_angular_velocity,
        ]
    }
}

impl From<[f32; 4]> for Observation {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Discrete cart force direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// Push towards -x (action index 0).
    #[default]
    Decrease,
    /// Push towards +x (action index 1).
    Increase,
}

impl Action {
    pub const COUNT: usize = 2;

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Action::Decrease => 0,
            Action::Increase => 1,
        }
    }

    /// Sign of the force this action applies.
    #[must_use]
    pub const fn direction(self) -> f32 {
        match self {
            Action::Decrease => -1.0,
            Action::Increase => 1.0,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = SimError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Action::Decrease),
            1 => Ok(Action::Increase),
            other => Err(SimError::InvalidAction(other)),
        }
    }
}

/// Result of advancing an environment by one action.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f32,
    /// The episode reached a terminal state (pole fell, cart left the track).
    pub terminated: bool,
    /// The episode was cut short by a time limit.
    pub truncated: bool,
}

impl Step {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}
