use glam::Vec2;
use image::imageops::FilterType;
use image::{Rgb, RgbaImage};
use std::path::Path;

use crate::error::AssetError;

/// An RGBA bitmap with straight (non-premultiplied) alpha.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub image: RgbaImage,
}

impl Sprite {
    #[must_use]
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    /// Load a PNG, make `color_key` pixels transparent and scale to `size`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Image`] if the file is missing or cannot be
    /// decoded.
    pub fn load(
        path: &Path,
        size: Option<(u32, u32)>,
        color_key: Option<Rgb<u8>>,
    ) -> Result<Self, AssetError> {
        let mut image = image::open(path)
            .map_err(|source| AssetError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        if let Some(key) = color_key {
            for px in image.pixels_mut() {
                if px.0[..3] == key.0 {
                    px.0[3] = 0;
                }
            }
        }

        if let Some((w, h)) = size {
            if (w, h) != image.dimensions() {
                // Nearest keeps keyed-out pixels fully transparent.
                image = image::imageops::resize(&image, w, h, FilterType::Nearest);
            }
        }

        tracing::debug!("Loaded sprite {:?} ({}x{})", path, image.width(), image.height());
        Ok(Self { image })
    }
}

/// A sprite that rotates about a pivot away from its centre.
#[derive(Clone, Debug)]
pub struct PivotSprite {
    pub sprite: Sprite,
    /// Vector from the sprite's centre to its pivot, unrotated.
    pub pivot_offset: Vec2,
}

impl PivotSprite {
    /// Sprite hinged at the middle of its bottom edge.
    #[must_use]
    pub fn bottom_pivot(sprite: Sprite) -> Self {
        let pivot_offset = Vec2::new(0.0, sprite.size().y * 0.5);
        Self {
            sprite,
            pivot_offset,
        }
    }
}
