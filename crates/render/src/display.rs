//! Where finished frames go
//!
//! The main loop talks to a [`Display`] only: it drains input events from it
//! once per tick and hands it each composited frame. [`HeadlessDisplay`]
//! accepts frames without showing them; the windowed implementation lives in
//! [`crate::window`].

use image::RgbaImage;

use crate::error::DisplayError;
use crate::input::InputEvent;

pub trait Display {
    /// Size of the frames this display accepts.
    fn size(&self) -> (u32, u32);

    /// Drain the events that arrived since the last call. Never blocks.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Show `frame`.
    ///
    /// # Errors
    ///
    /// Any error here is fatal to the loop.
    fn present(&mut self, frame: &RgbaImage) -> Result<(), DisplayError>;
}

/// Off-screen display. Produces no input and keeps the latest frame.
#[derive(Debug)]
pub struct HeadlessDisplay {
    width: u32,
    height: u32,
    frames: u64,
    last: Option<RgbaImage>,
}

impl HeadlessDisplay {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: 0,
            last: None,
        }
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RgbaImage> {
        self.last.as_ref()
    }
}

impl Display for HeadlessDisplay {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }

    fn present(&mut self, frame: &RgbaImage) -> Result<(), DisplayError> {
        check_frame_size(self.size(), frame)?;
        self.frames += 1;
        match &mut self.last {
            Some(last) => last.copy_from_slice(frame.as_raw()),
            None => self.last = Some(frame.clone()),
        }
        Ok(())
    }
}

pub(crate) fn check_frame_size(expected: (u32, u32), frame: &RgbaImage) -> Result<(), DisplayError> {
    let got = frame.dimensions();
    if got == expected {
        Ok(())
    } else {
        Err(DisplayError::FrameSize { expected, got })
    }
}
