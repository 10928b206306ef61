//! # Balance
//!
//! A cart-pole viewer that pits a human at the keyboard against a trained
//! policy, or shows the policy alone. The crate is split so the pieces can be
//! driven from tests without a window:
//!
//! -   [`config`]: command-line options.
//! -   [`lane`]: [`LaneController`], one environment plus its score and
//!     action source.
//! -   [`app`]: the tick loop and start-up wiring.

pub mod app;
pub mod config;
pub mod lane;

pub use app::{run, run_loop, LoopConfig, LoopStats};
pub use config::{Cli, ViewArg};
pub use lane::{ActionSource, LaneController, TickOutcome};
