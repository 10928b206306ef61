//! Keyboard and window events reduced to what the loop cares about.

use sim::Action;

/// Keys with a meaning in the visualizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Escape,
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyPressed(Key),
    CloseRequested,
}

/// Turns the events of one tick into a human action and a quit flag.
///
/// The action is latched: it only changes when a direction key is pressed,
/// so with no input the previous choice is reused.
#[derive(Debug, Default)]
pub struct InputSampler {
    pending: Action,
    quit: bool,
}

impl InputSampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `events` into the sampler. If several direction keys arrive in
    /// one tick, the last one wins.
    pub fn sample(&mut self, events: impl IntoIterator<Item = InputEvent>) -> Action {
        for event in events {
            match event {
                InputEvent::KeyPressed(Key::Left) => self.pending = Action::Decrease,
                InputEvent::KeyPressed(Key::Right) => self.pending = Action::Increase,
                InputEvent::KeyPressed(Key::Escape) | InputEvent::CloseRequested => {
                    self.quit = true;
                }
                InputEvent::KeyPressed(Key::Other) => {}
            }
        }
        self.pending
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.pending
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
