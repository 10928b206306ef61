//! One independently simulated lane.

use agent::Policy;
use render::LaneView;
use sim::{Action, Environment, Observation, SimError};

/// Who decides a lane's actions.
pub enum ActionSource {
    /// The most recent keyboard choice.
    Human,
    /// A policy queried in deterministic mode every tick.
    Policy(Box<dyn Policy>),
}

/// State of a lane after one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub observation: Observation,
    pub score: f32,
    /// The episode ended this tick and the lane was reset.
    pub did_reset: bool,
}

/// Drives one environment and keeps its score.
///
/// Episodes restart forever: when a step terminates or truncates, the
/// environment is reset within the same tick so the renderer never sees a
/// finished episode.
pub struct LaneController {
    label: String,
    env: Box<dyn Environment>,
    source: ActionSource,
    observation: Observation,
    score: f32,
    episodes: u64,
}

impl LaneController {
    /// Reset `env` and start the first episode.
    pub fn new(
        label: impl Into<String>,
        mut env: Box<dyn Environment>,
        source: ActionSource,
    ) -> Result<Self, SimError> {
        let observation = env.reset()?;
        Ok(Self {
            label: label.into(),
            env,
            source,
            observation,
            score: 0.0,
            episodes: 0,
        })
    }

    /// Advance by one step. `human` is used only by human lanes; `None`
    /// falls back to the initial action.
    pub fn tick(&mut self, human: Option<Action>) -> Result<TickOutcome, SimError> {
        let action = match &mut self.source {
            ActionSource::Policy(policy) => policy.predict(&self.observation, true),
            ActionSource::Human => human.unwrap_or_default(),
        };

        let step = self.env.step(action)?;
        self.score += step.reward;

        let did_reset = step.is_done();
        if did_reset {
            self.episodes += 1;
            tracing::debug!(
                "{}: episode {} over with score {}",
                self.label,
                self.episodes,
                self.score
            );
            self.observation = self.env.reset()?;
            self.score = 0.0;
        } else {
            self.observation = step.observation;
        }

        Ok(TickOutcome {
            observation: self.observation,
            score: self.score,
            did_reset,
        })
    }

    #[must_use]
    pub fn view(&self) -> LaneView<'_> {
        LaneView {
            label: &self.label,
            observation: self.observation,
            score: self.score,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        self.observation
    }

    #[must_use]
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Episodes completed so far.
    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self.source, ActionSource::Human)
    }

    pub fn close(&mut self) {
        self.env.close();
    }
}
