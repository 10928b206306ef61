#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use agent::Policy;
use image::RgbaImage;
use render::{Display, DisplayError, InputEvent};
use sim::{Action, Environment, Observation, SimError, Step};

/// Observation returned by the `n`th reset (first reset is `n = 0`).
pub fn reset_observation(n: u32) -> Observation {
    Observation::new(0.0, 0.0, 0.0, n as f32)
}

/// Environment that terminates on a fixed step of every episode. The `k`th
/// step of an episode pays reward `k`.
pub struct ScriptedEnv {
    terminate_on: u32,
    steps: u32,
    resets: u32,
    pub actions: Rc<RefCell<Vec<Action>>>,
    pub closed: Rc<Cell<bool>>,
}

impl ScriptedEnv {
    pub fn new(terminate_on: u32) -> Self {
        Self {
            terminate_on,
            steps: 0,
            resets: 0,
            actions: Rc::default(),
            closed: Rc::default(),
        }
    }
}

impl Environment for ScriptedEnv {
    fn reset(&mut self) -> Result<Observation, SimError> {
        if self.closed.get() {
            return Err(SimError::Closed);
        }
        let obs = reset_observation(self.resets);
        self.resets += 1;
        self.steps = 0;
        Ok(obs)
    }

    fn step(&mut self, action: Action) -> Result<Step, SimError> {
        if self.closed.get() {
            return Err(SimError::Closed);
        }
        self.actions.borrow_mut().push(action);
        self.steps += 1;
        Ok(Step {
            observation: Observation::new(self.steps as f32 * 0.1, 0.0, 0.0, 0.0),
            reward: self.steps as f32,
            terminated: self.steps == self.terminate_on,
            truncated: false,
        })
    }

    fn close(&mut self) {
        self.closed.set(true);
    }
}

/// Always picks the same action.
pub struct FixedPolicy(pub Action);

impl Policy for FixedPolicy {
    fn predict(&mut self, _observation: &Observation, _deterministic: bool) -> Action {
        self.0
    }
}

/// Replays a list of event batches, one per poll, then stays quiet.
pub struct ScriptedDisplay {
    script: VecDeque<Vec<InputEvent>>,
    pub frames: u64,
    pub fail_present: bool,
}

impl ScriptedDisplay {
    pub fn new(script: Vec<Vec<InputEvent>>) -> Self {
        Self {
            script: script.into(),
            frames: 0,
            fail_present: false,
        }
    }
}

impl Display for ScriptedDisplay {
    fn size(&self) -> (u32, u32) {
        (800, 500)
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.script.pop_front().unwrap_or_default()
    }

    fn present(&mut self, frame: &RgbaImage) -> Result<(), DisplayError> {
        if self.fail_present {
            return Err(DisplayError::FrameSize {
                expected: (1, 1),
                got: frame.dimensions(),
            });
        }
        self.frames += 1;
        Ok(())
    }
}
