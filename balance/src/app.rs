//! # Main Loop
//!
//! Ties the lanes, the compositor and a display together. Every tick runs,
//! strictly in order:
//!
//! 1. drain input and update the human action (quit and termination signals
//!    are honoured here)
//! 2. step every lane
//! 3. composite the frame and present it
//! 4. sleep away whatever is left of the frame budget
//!
//! Everything runs on the calling thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use agent::{BalancePolicy, LinearPolicy, Policy};
use anyhow::{Context, Result};
use render::{
    load_font, AssetBundle, CoordinateMapper, Display, FrameCompositor, HeadlessDisplay,
    InputSampler, LaneView, RgbaCanvas, WindowDisplay,
};
use sim::{CartPoleConfig, CartPoleEnv};

use crate::config::{Cli, ViewArg};
use crate::lane::{ActionSource, LaneController};

/// Ticks between progress log lines.
pub const PROGRESS_EVERY: u64 = 300;

pub const HUMAN_LABEL: &str = "HUMAN (Arrows)";
pub const AI_LABEL: &str = "AI AGENT";

const WINDOW_TITLE: &str = "Cart-Pole: Human vs AI";

#[derive(Clone, Debug, Default)]
pub struct LoopConfig {
    /// Frame rate cap; 0 disables sleeping.
    pub fps: u32,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Set from outside the loop (SIGINT/SIGTERM) to stop at the next tick.
    pub shutdown: Option<Arc<AtomicBool>>,
}

impl LoopConfig {
    #[must_use]
    pub fn frame_budget(&self) -> Option<Duration> {
        (self.fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(self.fps)))
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    /// Episodes finished across all lanes.
    pub episodes: u64,
    pub quit_requested: bool,
}

/// Run ticks until quit is requested, the tick limit is reached or
/// something fails. Lanes are closed on every exit path.
///
/// # Errors
///
/// Environment failures and presentation failures end the loop.
pub fn run_loop<D: Display>(
    display: &mut D,
    canvas: &mut RgbaCanvas,
    compositor: &FrameCompositor,
    assets: &AssetBundle,
    lanes: &mut [LaneController],
    config: &LoopConfig,
) -> Result<LoopStats> {
    tracing::info!(
        "Starting loop: {} lane(s), {} fps cap",
        lanes.len(),
        config.fps
    );
    let result = drive(display, canvas, compositor, assets, lanes, config);
    for lane in lanes.iter_mut() {
        lane.close();
    }
    if let Ok(stats) = &result {
        tracing::info!(
            "Loop stopped after {} ticks and {} episodes",
            stats.ticks,
            stats.episodes
        );
    }
    result
}

fn drive<D: Display>(
    display: &mut D,
    canvas: &mut RgbaCanvas,
    compositor: &FrameCompositor,
    assets: &AssetBundle,
    lanes: &mut [LaneController],
    config: &LoopConfig,
) -> Result<LoopStats> {
    let mut sampler = InputSampler::new();
    let mut stats = LoopStats::default();
    let budget = config.frame_budget();

    loop {
        if config.max_ticks.is_some_and(|max| stats.ticks >= max) {
            break;
        }
        if config.shutdown_requested() {
            tracing::info!("Termination requested");
            stats.quit_requested = true;
            break;
        }
        let frame_start = Instant::now();

        let human = sampler.sample(display.poll_events());
        if sampler.quit_requested() {
            tracing::info!("Quit requested");
            stats.quit_requested = true;
            break;
        }

        for lane in lanes.iter_mut() {
            let outcome = lane
                .tick(Some(human))
                .with_context(|| format!("lane {:?} failed to step", lane.label()))?;
            if outcome.did_reset {
                stats.episodes += 1;
            }
        }

        let views: Vec<LaneView<'_>> = lanes.iter().map(LaneController::view).collect();
        compositor.render(canvas, assets, &views);
        display
            .present(canvas.image())
            .context("failed to present frame")?;
        stats.ticks += 1;

        if stats.ticks % PROGRESS_EVERY == 0 {
            let scores: Vec<String> = lanes
                .iter()
                .map(|lane| format!("{}={}", lane.label(), lane.score() as i64))
                .collect();
            tracing::info!("Tick {}: {}", stats.ticks, scores.join(", "));
        }

        if let Some(budget) = budget {
            let elapsed = frame_start.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
    }

    Ok(stats)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

fn load_policy(cli: &Cli) -> Result<Box<dyn Policy>> {
    match &cli.policy {
        Some(path) => {
            let policy = LinearPolicy::load(path)
                .with_context(|| format!("failed to load policy from {path:?}"))?;
            Ok(Box::new(policy))
        }
        None => {
            tracing::info!("No policy file given, using the built-in balance controller");
            Ok(Box::new(BalancePolicy::default()))
        }
    }
}

/// Physics parameters for every lane. The track bounds follow
/// `--track-half-range` so the episode ends where the cart leaves the lane.
#[must_use]
pub fn cartpole_config(cli: &Cli) -> CartPoleConfig {
    CartPoleConfig {
        position_limit: cli.track_half_range,
        ..CartPoleConfig::default()
    }
}

/// Lanes for the chosen view, left to right.
///
/// # Errors
///
/// Fails if the policy cannot be loaded or an environment cannot be reset.
pub fn build_lanes(cli: &Cli, seed: u64) -> Result<Vec<LaneController>> {
    let policy = load_policy(cli)?;
    let physics = cartpole_config(cli);
    let env = |seed| Box::new(CartPoleEnv::with_config(physics.clone(), seed));
    let ai = |seed| LaneController::new(AI_LABEL, env(seed), ActionSource::Policy(policy));
    let lanes = match cli.view {
        ViewArg::Split => vec![
            LaneController::new(HUMAN_LABEL, env(seed), ActionSource::Human)
                .context("failed to reset human lane")?,
            ai(seed.wrapping_add(1)).context("failed to reset AI lane")?,
        ],
        ViewArg::Solo => vec![ai(seed).context("failed to reset AI lane")?],
    };
    Ok(lanes)
}

/// Load everything, open the display and run until done.
///
/// # Errors
///
/// Any failure to acquire assets, the policy or the display aborts before the
/// loop starts; runtime failures end the loop.
pub fn run(cli: &Cli) -> Result<()> {
    let layout = cli.view.layout();
    let assets = AssetBundle::load(&cli.assets, &layout)
        .with_context(|| format!("failed to load assets from {:?}", cli.assets))?;
    let font = load_font(&cli.font_path()).context("failed to load font")?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    tracing::info!("Environment seed {}", seed);
    let mut lanes = build_lanes(cli, seed)?;

    let compositor = FrameCompositor::new(layout.clone(), CoordinateMapper::new(cli.track_half_range));
    let mut canvas = RgbaCanvas::new(layout.width, layout.height).with_font(font);

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install termination handler")?;

    if cli.headless {
        let mut display = HeadlessDisplay::new(layout.width, layout.height);
        let config = LoopConfig {
            fps: 0,
            max_ticks: Some(cli.ticks),
            shutdown: Some(shutdown),
        };
        run_loop(&mut display, &mut canvas, &compositor, &assets, &mut lanes, &config)?;
    } else {
        let mut display = WindowDisplay::new(WINDOW_TITLE, layout.width, layout.height)
            .context("failed to open window")?;
        let config = LoopConfig {
            fps: cli.fps,
            max_ticks: None,
            shutdown: Some(shutdown),
        };
        run_loop(&mut display, &mut canvas, &compositor, &assets, &mut lanes, &config)?;
    }
    Ok(())
}
