#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Control Policies
//!
//! Decision makers for AI-controlled lanes. A [`Policy`] maps the current
//! [`sim::Observation`] to one discrete [`sim::Action`] and keeps no memory
//! between calls that the caller could observe.
//!
//! -   [`LinearPolicy`] evaluates trained weights loaded from a JSON file.
//! -   [`BalancePolicy`] is a fixed proportional-derivative controller used
//!     when no trained weights are configured.

pub mod balance;
pub mod error;
pub mod linear;

pub use balance::BalancePolicy;
pub use error::PolicyError;
pub use linear::LinearPolicy;

use sim::{Action, Observation};

/// Maps observations to actions.
pub trait Policy {
    /// Choose an action for `observation`.
    ///
    /// With `deterministic` set the policy must return its single most
    /// preferred action; otherwise it may sample.
    fn predict(&mut self, observation: &Observation, deterministic: bool) -> Action;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn predict(&mut self, observation: &Observation, deterministic: bool) -> Action {
        (**self).predict(observation, deterministic)
    }
}
