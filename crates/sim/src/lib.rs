#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! # Cart-Pole Simulation
//!
//! The simulation layer consumed by the viewer. It defines the data that flows
//! out of an environment ([`Observation`], [`Step`]), the discrete control
//! input that flows in ([`Action`]), and the [`Environment`] trait the lane
//! controllers drive.
//!
//! [`CartPoleEnv`] is a self-contained implementation of the classic
//! balancing task. Anything else that speaks the [`Environment`] interface can
//! be substituted for it, which is how the tests script exact episode lengths.
//!
//! ```rust,ignore
//! use sim::{Action, CartPoleEnv, Environment};
//!
//! let mut env = CartPoleEnv::new(0);
//! let mut obs = env.reset()?;
//! loop {
//!     let step = env.step(Action::Increase)?;
//!     obs = step.observation;
//!     if step.is_done() {
//!         break;
//!     }
//! }
//! ```

pub mod cartpole;
pub mod env;
pub mod error;
pub mod types;

pub use cartpole::{CartPoleConfig, CartPoleEnv};
pub use env::Environment;
pub use error::SimError;
pub use types::{Action, Observation, Step};
