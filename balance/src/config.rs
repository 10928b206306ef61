//! Command-line configuration.

use clap::{Parser, ValueEnum};
use render::ViewLayout;
use std::path::PathBuf;

/// Which viewer to run.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewArg {
    /// Human lane on the left, AI lane on the right.
    Split,
    /// A single AI lane with drawn visuals.
    Solo,
}

impl ViewArg {
    #[must_use]
    pub fn layout(self) -> ViewLayout {
        match self {
            Self::Split => ViewLayout::split(),
            Self::Solo => ViewLayout::solo(),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "balance")]
#[command(about = "Watch a cart-pole policy balance, or try to beat it yourself", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = ViewArg::Split)]
    pub view: ViewArg,

    /// Directory holding the sprite images and the font.
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// TrueType font, relative to the asset directory.
    #[arg(long, default_value = "font.ttf")]
    pub font: PathBuf,

    /// Linear policy weights (JSON). Without one a built-in controller plays.
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Frame rate cap. 0 runs as fast as possible.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Run without a window.
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Number of ticks to run in headless mode.
    #[arg(long, default_value_t = 5000)]
    pub ticks: u64,

    /// Environment seed. Defaults to one derived from the clock.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Half the track width in simulation units. `[-H, H]` spans the whole
    /// lane width and is also where an episode ends.
    #[arg(long, default_value_t = 2.4)]
    pub track_half_range: f32,
}

impl Cli {
    #[must_use]
    pub fn font_path(&self) -> PathBuf {
        self.assets.join(&self.font)
    }
}
