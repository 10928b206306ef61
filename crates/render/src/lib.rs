//! # Cart-Pole Rendering
//!
//! Turns lane state into pixels. Frames are composited in software onto a
//! [`Canvas`] and handed to a [`Display`], either a window
//! ([`WindowDisplay`]) or nothing at all ([`HeadlessDisplay`]).
//!
//! -   [`CoordinateMapper`] maps cart positions to lane pixels.
//! -   [`PivotFrame`] keeps the rotated pole attached to the cart.
//! -   [`FrameCompositor`] draws a frame in a fixed layer order.
//! -   [`InputSampler`] latches the human action between key presses.

pub mod assets;
pub mod canvas;
pub mod compositor;
pub mod display;
pub mod error;
pub mod input;
pub mod layout;
pub mod pipeline;
pub mod pivot;
pub mod sprite;
pub mod transform;
pub mod window;

pub use assets::{load_font, AssetBundle, Backdrop};
pub use canvas::{Canvas, Color, RgbaCanvas};
pub use compositor::{FrameCompositor, LanePose, LaneView};
pub use display::{Display, HeadlessDisplay};
pub use error::{AssetError, DisplayError};
pub use input::{InputEvent, InputSampler, Key};
pub use layout::{LaneRect, SpriteStyle, ViewLayout};
pub use pivot::{PivotFrame, PlacedSprite};
pub use sprite::{PivotSprite, Sprite};
pub use transform::CoordinateMapper;
pub use window::WindowDisplay;
