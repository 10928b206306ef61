//! Screen layout presets
//!
//! Pixel constants for the two supported views. Everything here is a tunable;
//! the compositor only relies on the relationships (pivot above cart centre,
//! lanes tiling the canvas left to right).

use glam::IVec2;
use image::Rgba;

use crate::canvas::Color;

const ACCENT: Color = Rgba([0, 189, 255, 255]);
const WHITE: Color = Rgba([255, 255, 255, 255]);

/// How the cart and pole visuals are obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteStyle {
    /// Bitmaps loaded from the asset directory.
    Images,
    /// Shapes drawn at start-up.
    Procedural,
}

/// Horizontal slice of the canvas owned by one lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaneRect {
    pub origin_x: i32,
    pub width: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

/// Horizontal ground line under the cart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundLine {
    /// Distance of the line above the canvas bottom.
    pub offset_from_bottom: i32,
    /// Gap left free at each lane edge.
    pub margin: i32,
    pub stroke: Stroke,
}

/// Optional picture in the top-right corner of a lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MascotPlacement {
    pub size: (u32, u32),
    pub margin: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewLayout {
    pub width: u32,
    pub height: u32,
    pub lane_count: usize,
    pub sprite_style: SpriteStyle,
    /// Canvas colour when no background image is used.
    pub background: Color,
    pub cart_size: (u32, u32),
    pub pole_size: (u32, u32),
    /// Cart centre sits this far above the canvas bottom.
    pub cart_offset_from_bottom: i32,
    /// Pole pivot sits this far above the cart centre.
    pub pivot_lift: i32,
    /// Drawn at the canvas midline when more than one lane is shown.
    pub divider: Stroke,
    pub ground: Option<GroundLine>,
    pub mascot: Option<MascotPlacement>,
    pub font_px: f32,
    pub label_offset: IVec2,
    pub label_color: Color,
    pub score_offset: IVec2,
    pub score_color: Color,
    /// Full-canvas wash drawn last.
    pub overlay: Color,
}

impl ViewLayout {
    /// Human (left) versus AI (right).
    #[must_use]
    pub fn split() -> Self {
        Self {
            width: 800,
            height: 500,
            lane_count: 2,
            sprite_style: SpriteStyle::Images,
            background: Rgba([0, 0, 0, 255]),
            cart_size: (100, 60),
            pole_size: (15, 150),
            cart_offset_from_bottom: 120,
            pivot_lift: 10,
            divider: Stroke {
                width: 2.0,
                color: ACCENT,
            },
            ground: None,
            mascot: None,
            font_px: 20.0,
            label_offset: IVec2::new(20, 20),
            label_color: ACCENT,
            score_offset: IVec2::new(20, 50),
            score_color: WHITE,
            overlay: Rgba([0, 189, 255, 20]),
        }
    }

    /// A single AI lane with procedural visuals.
    #[must_use]
    pub fn solo() -> Self {
        Self {
            width: 800,
            height: 500,
            lane_count: 1,
            sprite_style: SpriteStyle::Procedural,
            background: Rgba([240, 249, 255, 255]),
            // 80x40 body plus wheels hanging 6 px below it.
            cart_size: (80, 46),
            // 10x120 bar padded for the tip ball.
            pole_size: (40, 160),
            // Puts the top of the cart body 100 px above the bottom.
            cart_offset_from_bottom: 77,
            pivot_lift: 23,
            divider: Stroke {
                width: 2.0,
                color: ACCENT,
            },
            ground: Some(GroundLine {
                offset_from_bottom: 80,
                margin: 50,
                stroke: Stroke {
                    width: 4.0,
                    color: Rgba([203, 213, 225, 255]),
                },
            }),
            mascot: Some(MascotPlacement {
                size: (100, 100),
                margin: 20,
            }),
            font_px: 24.0,
            label_offset: IVec2::new(20, 20),
            label_color: ACCENT,
            score_offset: IVec2::new(20, 50),
            score_color: WHITE,
            overlay: Rgba([0, 189, 255, 30]),
        }
    }

    #[must_use]
    pub fn lane_width(&self) -> u32 {
        self.width / self.lane_count.max(1) as u32
    }

    #[must_use]
    pub fn lane_rect(&self, index: usize) -> LaneRect {
        let width = self.lane_width();
        LaneRect {
            origin_x: (index as u32 * width) as i32,
            width,
        }
    }

    /// Vertical pixel of the cart centre.
    #[must_use]
    pub fn cart_y(&self) -> i32 {
        self.height as i32 - self.cart_offset_from_bottom
    }

    /// Vertical pixel of the pole pivot.
    #[must_use]
    pub fn pivot_y(&self) -> i32 {
        self.cart_y() - self.pivot_lift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lanes_tile_the_canvas() {
        let layout = ViewLayout::split();
        assert_eq!(layout.lane_rect(0), LaneRect { origin_x: 0, width: 400 });
        assert_eq!(layout.lane_rect(1), LaneRect { origin_x: 400, width: 400 });
        assert_eq!(layout.cart_y(), 380);
        assert_eq!(layout.pivot_y(), 370);
    }

    #[test]
    fn solo_pivot_is_the_top_of_the_cart_body() {
        let layout = ViewLayout::solo();
        assert_eq!(layout.lane_rect(0).width, 800);
        assert_eq!(layout.pivot_y(), 400);
        assert!(layout.pivot_y() < layout.cart_y());
    }
}
