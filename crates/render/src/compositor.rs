//! Frame composition
//!
//! Draws a complete frame in a fixed back-to-front order:
//!
//! 1. backdrop over the whole canvas
//! 2. divider at the midline (only with two or more lanes)
//! 3. per lane, left to right: decorations (ground line, mascot), cart, pole,
//!    label, score
//! 4. translucent overlay over the whole canvas
//!
//! Presenting the finished canvas is the caller's job.

use glam::{IVec2, Vec2};
use sim::Observation;

use crate::assets::{AssetBundle, Backdrop};
use crate::canvas::Canvas;
use crate::layout::{LaneRect, ViewLayout};
use crate::pivot::{PivotFrame, PlacedSprite};
use crate::transform::CoordinateMapper;

/// What the compositor needs to know about one lane.
#[derive(Copy, Clone, Debug)]
pub struct LaneView<'a> {
    pub label: &'a str,
    pub observation: Observation,
    pub score: f32,
}

/// Screen placement of one lane's cart and pole.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LanePose {
    pub cart_center: IVec2,
    pub pivot: Vec2,
    pub pole: PlacedSprite,
}

pub struct FrameCompositor {
    pub layout: ViewLayout,
    pub mapper: CoordinateMapper,
}

impl FrameCompositor {
    #[must_use]
    pub fn new(layout: ViewLayout, mapper: CoordinateMapper) -> Self {
        Self { layout, mapper }
    }

    /// Where the cart and pole of a lane go for `observation`.
    #[must_use]
    pub fn lane_pose(&self, lane: LaneRect, observation: &Observation, assets: &AssetBundle) -> LanePose {
        let x = self
            .mapper
            .map_cart_x(observation.cart_position, lane.origin_x, lane.width);
        let cart_center = IVec2::new(x, self.layout.cart_y());
        let pivot = Vec2::new(x as f32, self.layout.pivot_y() as f32);
        let frame = PivotFrame::new(
            assets.pole.sprite.size(),
            assets.pole.pivot_offset,
            observation.pole_angle,
        );
        LanePose {
            cart_center,
            pivot,
            pole: frame.place(pivot),
        }
    }

    /// Draw one frame for `lanes` onto `canvas`.
    pub fn render<C: Canvas>(&self, canvas: &mut C, assets: &AssetBundle, lanes: &[LaneView<'_>]) {
        let layout = &self.layout;

        match &assets.backdrop {
            Backdrop::Fill(color) => canvas.fill(*color),
            Backdrop::Image(sprite) => canvas.draw_sprite(sprite, IVec2::ZERO),
        }

        if lanes.len() > 1 {
            let mid = layout.width as f32 / 2.0;
            canvas.draw_line(
                Vec2::new(mid, 0.0),
                Vec2::new(mid, layout.height as f32),
                layout.divider.width,
                layout.divider.color,
            );
        }

        for (index, lane) in lanes.iter().enumerate() {
            self.draw_lane(canvas, assets, layout.lane_rect(index), lane);
        }

        canvas.tint(layout.overlay);
    }

    fn draw_lane<C: Canvas>(&self, canvas: &mut C, assets: &AssetBundle, rect: LaneRect, lane: &LaneView<'_>) {
        let layout = &self.layout;
        let left = rect.origin_x;
        let right = rect.origin_x + rect.width as i32;

        if let Some(ground) = layout.ground {
            let y = (layout.height as i32 - ground.offset_from_bottom) as f32;
            canvas.draw_line(
                Vec2::new((left + ground.margin) as f32, y),
                Vec2::new((right - ground.margin) as f32, y),
                ground.stroke.width,
                ground.stroke.color,
            );
        }
        if let (Some(placement), Some(mascot)) = (layout.mascot, &assets.mascot) {
            let top_left = IVec2::new(
                right - placement.margin - mascot.width() as i32,
                placement.margin,
            );
            canvas.draw_sprite(mascot, top_left);
        }

        let pose = self.lane_pose(rect, &lane.observation, assets);
        let cart_top_left = pose.cart_center
            - IVec2::new(assets.cart.width() as i32 / 2, assets.cart.height() as i32 / 2);
        canvas.draw_sprite(&assets.cart, cart_top_left);
        canvas.draw_rotated(&assets.pole.sprite, &pose.pole);

        let origin = IVec2::new(left, 0);
        canvas.draw_text(
            lane.label,
            origin + layout.label_offset,
            layout.font_px,
            layout.label_color,
        );
        canvas.draw_text(
            &format!("SCORE: {}", lane.score as i64),
            origin + layout.score_offset,
            layout.font_px,
            layout.score_color,
        );
    }
}
