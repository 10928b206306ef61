//! Software drawing surface
//!
//! [`Canvas`] is the narrow set of operations the compositor needs. The
//! production implementation, [`RgbaCanvas`], rasterises into an
//! [`image::RgbaImage`] that a [`crate::display::Display`] then presents.

use glam::{IVec2, Vec2};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::pivot::{rotate_on_screen, PlacedSprite};
use crate::sprite::Sprite;

pub type Color = Rgba<u8>;

/// Drawing operations used to build a frame.
///
/// Every operation alpha-blends over what is already there, except
/// [`fill`](Canvas::fill) which overwrites.
pub trait Canvas {
    fn size(&self) -> (u32, u32);

    /// Overwrite every pixel with `color`.
    fn fill(&mut self, color: Color);

    /// Draw `sprite` unrotated with its top-left corner at `top_left`.
    fn draw_sprite(&mut self, sprite: &Sprite, top_left: IVec2);

    /// Draw `sprite` rotated by `placed.angle_deg` about its centre, with the
    /// centre at `placed.center`.
    fn draw_rotated(&mut self, sprite: &Sprite, placed: &PlacedSprite);

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Draw a single line of text whose bounding box starts at `top_left`.
    fn draw_text(&mut self, text: &str, top_left: IVec2, px: f32, color: Color);

    /// Blend `color` over the whole canvas.
    fn tint(&mut self, color: Color);
}

/// Source-over blend of `src`, scaled by `coverage`, onto `dst`.
fn blend(dst: &mut Color, src: Color, coverage: f32) {
    let sa = f32::from(src[3]) / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

fn in_rounded_rect(p: Vec2, min: Vec2, max: Vec2, radius: f32) -> bool {
    if p.x < min.x || p.y < min.y || p.x > max.x || p.y > max.y {
        return false;
    }
    let r = radius
        .min((max.x - min.x) * 0.5)
        .min((max.y - min.y) * 0.5)
        .max(0.0);
    let nearest = Vec2::new(
        p.x.clamp(min.x + r, max.x - r),
        p.y.clamp(min.y + r, max.y - r),
    );
    p.distance_squared(nearest) <= r * r
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance(a + ab * t)
}

/// Canvas backed by an RGBA image.
pub struct RgbaCanvas {
    image: RgbaImage,
    font: Option<Font<'static>>,
}

impl RgbaCanvas {
    /// Opaque black canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            font: None,
        }
    }

    /// Fully transparent canvas, used to build sprites.
    #[must_use]
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            font: None,
        }
    }

    /// Font used by [`Canvas::draw_text`]. Without one, text is skipped.
    #[must_use]
    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn into_sprite(self) -> Sprite {
        Sprite::new(self.image)
    }

    /// Blend `color` into every pixel whose centre satisfies `inside`,
    /// scanning only the box `[min, max)`.
    fn fill_where(&mut self, min: Vec2, max: Vec2, color: Color, inside: impl Fn(Vec2) -> bool) {
        let (w, h) = self.image.dimensions();
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(w);
        let y1 = (max.y.ceil().max(0.0) as u32).min(h);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if inside(p) {
                    blend(self.image.get_pixel_mut(x, y), color, 1.0);
                }
            }
        }
    }

    pub fn fill_rounded_rect(&mut self, min: Vec2, size: Vec2, radius: f32, color: Color) {
        let max = min + size;
        self.fill_where(min, max, color, |p| in_rounded_rect(p, min, max, radius));
    }

    /// Outline of a rounded rectangle, `thickness` pixels wide, drawn inside
    /// its bounds.
    pub fn stroke_rounded_rect(
        &mut self,
        min: Vec2,
        size: Vec2,
        radius: f32,
        thickness: f32,
        color: Color,
    ) {
        let max = min + size;
        let inset = Vec2::splat(thickness);
        self.fill_where(min, max, color, |p| {
            in_rounded_rect(p, min, max, radius)
                && !in_rounded_rect(p, min + inset, max - inset, radius - thickness)
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let r = Vec2::splat(radius);
        self.fill_where(center - r, center + r, color, |p| {
            p.distance_squared(center) <= radius * radius
        });
    }
}

impl Canvas for RgbaCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill(&mut self, color: Color) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, top_left: IVec2) {
        let (w, h) = self.image.dimensions();
        for (sx, sy, px) in sprite.image.enumerate_pixels() {
            let x = top_left.x + sx as i32;
            let y = top_left.y + sy as i32;
            if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
                continue;
            }
            blend(self.image.get_pixel_mut(x as u32, y as u32), *px, 1.0);
        }
    }

    fn draw_rotated(&mut self, sprite: &Sprite, placed: &PlacedSprite) {
        let (w, h) = self.image.dimensions();
        let src_size = sprite.size();
        let src_center = src_size * 0.5;
        let min = placed.top_left().floor().max(Vec2::ZERO);
        let max = (placed.center + placed.bounds * 0.5)
            .ceil()
            .min(Vec2::new(w as f32, h as f32));
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        for y in min.y as u32..max.y as u32 {
            for x in min.x as u32..max.x as u32 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - placed.center;
                let s = rotate_on_screen(d, -placed.angle_deg) + src_center;
                if s.x < 0.0 || s.y < 0.0 || s.x >= src_size.x || s.y >= src_size.y {
                    continue;
                }
                let px = *sprite.image.get_pixel(s.x as u32, s.y as u32);
                blend(self.image.get_pixel_mut(x, y), px, 1.0);
            }
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let half = width * 0.5;
        let pad = Vec2::splat(half);
        self.fill_where(from.min(to) - pad, from.max(to) + pad, color, |p| {
            distance_to_segment(p, from, to) <= half
        });
    }

    fn draw_text(&mut self, text: &str, top_left: IVec2, px: f32, color: Color) {
        let Some(font) = &self.font else {
            return;
        };
        let image = &mut self.image;
        let (w, h) = image.dimensions();
        let scale = Scale::uniform(px);
        let ascent = font.v_metrics(scale).ascent;
        let start = point(top_left.x as f32, top_left.y as f32 + ascent);

        for glyph in font.layout(text, scale, start) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let x = bb.min.x + gx as i32;
                let y = bb.min.y + gy as i32;
                if x >= 0 && y >= 0 && x < w as i32 && y < h as i32 {
                    blend(image.get_pixel_mut(x as u32, y as u32), color, coverage);
                }
            });
        }
    }

    fn tint(&mut self, color: Color) {
        for px in self.image.pixels_mut() {
            blend(px, color, 1.0);
        }
    }
}
