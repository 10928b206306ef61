use crate::error::SimError;
use crate::types::{Action, Observation, Step};

/// Episodic control environment.
///
/// Modelled on the Gym interface: [`reset`] starts a new episode and
/// [`step`] advances it by one discrete action. Implementations own all
/// simulation state; callers only ever see [`Observation`]s.
///
/// [`reset`]: Environment::reset
/// [`step`]: Environment::step
pub trait Environment {
    /// Re-initialise to a valid starting state and return its observation.
    fn reset(&mut self) -> Result<Observation, SimError>;

    /// Advance by one action.
    fn step(&mut self, action: Action) -> Result<Step, SimError>;

    /// Release any resources held by the environment. Further calls to
    /// [`reset`](Environment::reset) or [`step`](Environment::step) fail.
    fn close(&mut self);
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn reset(&mut self) -> Result<Observation, SimError> {
        (**self).reset()
    }

    fn step(&mut self, action: Action) -> Result<Step, SimError> {
        (**self).step(action)
    }

    fn close(&mut self) {
        (**self).close();
    }
}
