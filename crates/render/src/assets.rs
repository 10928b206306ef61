//! Visual resources for a view
//!
//! Core sprites (background, cart, pole) are required: failing to load any of
//! them is an error. The mascot is decorative and is skipped with a warning
//! when it cannot be loaded.

use glam::Vec2;
use image::{Rgb, Rgba};
use rusttype::Font;
use std::path::Path;

use crate::canvas::{Color, RgbaCanvas};
use crate::error::AssetError;
use crate::layout::{SpriteStyle, ViewLayout};
use crate::sprite::{PivotSprite, Sprite};

pub const BACKGROUND_FILE: &str = "background.png";
pub const CART_FILE: &str = "cart.png";
pub const POLE_FILE: &str = "pole.png";
pub const MASCOT_FILE: &str = "mascot.png";

/// Pure white is transparent in the bitmap sprites.
const COLOR_KEY: Rgb<u8> = Rgb([255, 255, 255]);

const CART_BODY: Color = Rgba([255, 206, 0, 255]);
const CART_TRIM: Color = Rgba([51, 51, 51, 255]);
const POLE_BAR: Color = Rgba([255, 107, 107, 255]);
const POLE_TIP: Color = Rgba([255, 243, 64, 255]);

/// What sits behind everything else.
#[derive(Clone, Debug)]
pub enum Backdrop {
    Fill(Color),
    Image(Sprite),
}

/// Everything the compositor draws that is not computed per frame.
#[derive(Clone, Debug)]
pub struct AssetBundle {
    pub backdrop: Backdrop,
    pub cart: Sprite,
    pub pole: PivotSprite,
    pub mascot: Option<Sprite>,
}

impl AssetBundle {
    /// Load the assets `layout` asks for from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Image`] when a core bitmap sprite is missing or
    /// unreadable.
    pub fn load(dir: &Path, layout: &ViewLayout) -> Result<Self, AssetError> {
        let mut bundle = match layout.sprite_style {
            SpriteStyle::Images => Self {
                backdrop: Backdrop::Image(Sprite::load(
                    &dir.join(BACKGROUND_FILE),
                    Some((layout.width, layout.height)),
                    None,
                )?),
                cart: Sprite::load(&dir.join(CART_FILE), Some(layout.cart_size), Some(COLOR_KEY))?,
                pole: PivotSprite::bottom_pivot(Sprite::load(
                    &dir.join(POLE_FILE),
                    Some(layout.pole_size),
                    Some(COLOR_KEY),
                )?),
                mascot: None,
            },
            SpriteStyle::Procedural => Self::procedural(layout),
        };

        if let Some(placement) = layout.mascot {
            match Sprite::load(&dir.join(MASCOT_FILE), Some(placement.size), None) {
                Ok(sprite) => bundle.mascot = Some(sprite),
                Err(e) => tracing::warn!("Skipping mascot: {e}"),
            }
        }

        tracing::info!("Assets ready ({:?} sprites)", layout.sprite_style);
        Ok(bundle)
    }

    /// Flat background with drawn cart and pole. Needs no files.
    #[must_use]
    pub fn procedural(layout: &ViewLayout) -> Self {
        Self {
            backdrop: Backdrop::Fill(layout.background),
            cart: procedural_cart(layout.cart_size),
            pole: procedural_pole(layout.pole_size),
            mascot: None,
        }
    }
}

/// Rounded yellow body with two wheels poking out underneath.
#[must_use]
pub fn procedural_cart((w, h): (u32, u32)) -> Sprite {
    let (wf, hf) = (w as f32, h as f32);
    let body = Vec2::new(wf, (hf - 6.0).max(1.0));
    let mut canvas = RgbaCanvas::transparent(w, h);
    canvas.fill_rounded_rect(Vec2::ZERO, body, 10.0, CART_BODY);
    canvas.stroke_rounded_rect(Vec2::ZERO, body, 10.0, 2.0, CART_TRIM);
    for dx in [-25.0, 25.0] {
        canvas.fill_circle(Vec2::new(wf * 0.5 + dx, body.y - 5.0), 10.0, CART_TRIM);
    }
    canvas.into_sprite()
}

/// 10x120 bar with a ball on top, hinged 10 px above the sprite's bottom.
#[must_use]
pub fn procedural_pole((w, h): (u32, u32)) -> PivotSprite {
    let (wf, hf) = (w as f32, h as f32);
    let pivot = Vec2::new(wf * 0.5, hf - 10.0);
    let mut canvas = RgbaCanvas::transparent(w, h);
    canvas.fill_rounded_rect(pivot - Vec2::new(5.0, 120.0), Vec2::new(10.0, 120.0), 5.0, POLE_BAR);
    canvas.fill_circle(pivot - Vec2::new(0.0, 125.0), 8.0, POLE_TIP);
    PivotSprite {
        sprite: canvas.into_sprite(),
        pivot_offset: pivot - Vec2::new(wf, hf) * 0.5,
    }
}

/// Read a TrueType font.
///
/// # Errors
///
/// Returns [`AssetError::FontRead`] if the file cannot be read and
/// [`AssetError::FontInvalid`] if it does not parse.
pub fn load_font(path: &Path) -> Result<Font<'static>, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| AssetError::FontInvalid(path.to_path_buf()))
}
