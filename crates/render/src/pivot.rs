//! Rotation of sprites about an off-centre pivot
//!
//! Sprites rotate about their own centre, but the pole has to stay attached
//! to the cart at its base. [`PivotFrame`] records where the pivot sits on the
//! unrotated sprite; [`PivotFrame::place`] works out where the centre of the
//! rotated sprite must go so that the pivot lands on a given screen point.
//!
//! All vectors are in screen space (`y` down). Angles are drawing-frame
//! degrees: positive turns the sprite counter-clockwise as seen on screen,
//! which is the opposite sense to the physical pole angle. Use
//! [`CoordinateMapper::rotation_degrees`] to convert.
//!
//! [`CoordinateMapper::rotation_degrees`]: crate::transform::CoordinateMapper::rotation_degrees

use glam::Vec2;

use crate::transform::CoordinateMapper;

/// Rotate `v` counter-clockwise on screen by `angle_deg`.
#[must_use]
pub fn rotate_on_screen(v: Vec2, angle_deg: f32) -> Vec2 {
    // With y pointing down a visual counter-clockwise turn is a negative
    // mathematical rotation.
    Vec2::from_angle(-angle_deg.to_radians()).rotate(v)
}

/// Size of the axis-aligned box enclosing a `size` rectangle rotated by
/// `angle_deg`.
#[must_use]
pub fn rotated_bounds(size: Vec2, angle_deg: f32) -> Vec2 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Vec2::new(
        size.x * c.abs() + size.y * s.abs(),
        size.x * s.abs() + size.y * c.abs(),
    )
}

/// A rotatable sprite for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PivotFrame {
    /// Unrotated sprite size in pixels.
    pub size: Vec2,
    /// Vector from the unrotated sprite's centre to its pivot.
    pub pivot_offset: Vec2,
    /// Drawing-frame rotation in degrees.
    pub angle_deg: f32,
}

/// Where to draw a rotated sprite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacedSprite {
    /// Centre of the rotated sprite (and of its bounding box).
    pub center: Vec2,
    /// Drawing-frame rotation in degrees.
    pub angle_deg: f32,
    /// Size of the rotated sprite's bounding box.
    pub bounds: Vec2,
}

impl PlacedSprite {
    #[must_use]
    pub fn top_left(&self) -> Vec2 {
        self.center - self.bounds * 0.5
    }
}

impl PivotFrame {
    /// Frame for a sprite whose pivot is at `pivot_offset` from its centre,
    /// tilted by the physical angle `pole_angle` (radians).
    #[must_use]
    pub fn new(size: Vec2, pivot_offset: Vec2, pole_angle: f32) -> Self {
        Self {
            size,
            pivot_offset,
            angle_deg: CoordinateMapper::rotation_degrees(pole_angle),
        }
    }

    /// Frame for a sprite hinged at the middle of its bottom edge.
    #[must_use]
    pub fn bottom_pivot(size: Vec2, pole_angle: f32) -> Self {
        Self::new(size, Vec2::new(0.0, size.y * 0.5), pole_angle)
    }

    /// Centre-to-pivot vector after rotation.
    #[must_use]
    pub fn rotated_offset(&self) -> Vec2 {
        rotate_on_screen(self.pivot_offset, self.angle_deg)
    }

    /// Place the rotated sprite so that its pivot coincides with `anchor`.
    #[must_use]
    pub fn place(&self, anchor: Vec2) -> PlacedSprite {
        PlacedSprite {
            center: anchor - self.rotated_offset(),
            angle_deg: self.angle_deg,
            bounds: rotated_bounds(self.size, self.angle_deg),
        }
    }

    /// Screen position of the pivot for a sprite drawn at `placed`.
    #[must_use]
    pub fn anchor_of(&self, placed: &PlacedSprite) -> Vec2 {
        placed.center + rotate_on_screen(self.pivot_offset, placed.angle_deg)
    }
}
