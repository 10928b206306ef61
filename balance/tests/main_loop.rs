mod common;

use balance::{run_loop, ActionSource, LaneController, LoopConfig};
use common::{FixedPolicy, ScriptedDisplay, ScriptedEnv};
use render::{AssetBundle, CoordinateMapper, FrameCompositor, InputEvent, Key, RgbaCanvas, ViewLayout};
use sim::Action;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct Harness {
    compositor: FrameCompositor,
    assets: AssetBundle,
    canvas: RgbaCanvas,
    lanes: Vec<LaneController>,
    human_actions: Rc<RefCell<Vec<Action>>>,
    closed: Vec<Rc<Cell<bool>>>,
}

fn harness() -> Harness {
    let layout = ViewLayout::split();
    let human_env = ScriptedEnv::new(1000);
    let ai_env = ScriptedEnv::new(2);
    let human_actions = human_env.actions.clone();
    let closed = vec![human_env.closed.clone(), ai_env.closed.clone()];
    let lanes = vec![
        LaneController::new("HUMAN (Arrows)", Box::new(human_env), ActionSource::Human).unwrap(),
        LaneController::new(
            "AI AGENT",
            Box::new(ai_env),
            ActionSource::Policy(Box::new(FixedPolicy(Action::Increase))),
        )
        .unwrap(),
    ];
    Harness {
        compositor: FrameCompositor::new(layout.clone(), CoordinateMapper::default()),
        assets: AssetBundle::procedural(&layout),
        canvas: RgbaCanvas::new(layout.width, layout.height),
        lanes,
        human_actions,
        closed,
    }
}

fn uncapped(max_ticks: Option<u64>) -> LoopConfig {
    LoopConfig {
        fps: 0,
        max_ticks,
        ..LoopConfig::default()
    }
}

#[test]
fn human_action_is_latched_between_key_presses() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![
        vec![InputEvent::KeyPressed(Key::Right)],
        vec![],
        vec![InputEvent::KeyPressed(Key::Left)],
    ]);

    let stats = run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &uncapped(Some(3)),
    )
    .unwrap();

    assert_eq!(stats.ticks, 3);
    assert!(!stats.quit_requested);
    assert_eq!(display.frames, 3);
    assert_eq!(
        *h.human_actions.borrow(),
        vec![Action::Increase, Action::Increase, Action::Decrease]
    );
    // AI lane ends an episode every second step.
    assert_eq!(stats.episodes, 1);
}

#[test]
fn left_then_quiet_ticks_keep_pushing_left() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![
        vec![InputEvent::KeyPressed(Key::Left)],
        vec![],
        vec![],
        vec![],
    ]);

    let stats = run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &uncapped(Some(4)),
    )
    .unwrap();

    assert_eq!(stats.ticks, 4);
    // Left is also the initial action, so the latch holds it unchanged.
    assert_eq!(*h.human_actions.borrow(), vec![Action::Decrease; 4]);
}

#[test]
fn close_request_stops_before_the_next_step() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![vec![], vec![InputEvent::CloseRequested]]);

    let stats = run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &uncapped(None),
    )
    .unwrap();

    assert!(stats.quit_requested);
    assert_eq!(stats.ticks, 1);
    assert_eq!(display.frames, 1);
    assert_eq!(h.human_actions.borrow().len(), 1);
    assert!(h.closed.iter().all(|c| c.get()));
}

#[test]
fn escape_quits_too() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![vec![InputEvent::KeyPressed(Key::Escape)]]);
    let stats = run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &uncapped(None),
    )
    .unwrap();
    assert_eq!(stats.ticks, 0);
    assert_eq!(display.frames, 0);
}

#[test]
fn termination_signal_stops_before_the_first_tick() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![vec![InputEvent::KeyPressed(Key::Right)]]);
    let shutdown = Arc::new(AtomicBool::new(true));

    let stats = run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &LoopConfig {
            shutdown: Some(Arc::clone(&shutdown)),
            ..uncapped(None)
        },
    )
    .unwrap();

    assert!(stats.quit_requested);
    assert_eq!(stats.ticks, 0);
    assert_eq!(display.frames, 0);
    assert!(h.human_actions.borrow().is_empty());
    assert!(h.closed.iter().all(|c| c.get()));
}

#[test]
fn termination_signal_mid_run_ends_the_loop() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![]);
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(30));
        flag.store(true, Ordering::SeqCst);
    });

    let stats = run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &LoopConfig {
            fps: 100,
            max_ticks: None,
            shutdown: Some(shutdown),
        },
    )
    .unwrap();
    stopper.join().unwrap();

    assert!(stats.quit_requested);
    assert!(stats.ticks >= 1);
    assert!(h.closed.iter().all(|c| c.get()));
}

#[test]
fn presentation_failure_is_fatal_and_releases_lanes() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![]);
    display.fail_present = true;

    let err = run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &uncapped(Some(10)),
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("failed to present frame"));
    assert!(h.closed.iter().all(|c| c.get()));
}

#[test]
fn frame_cap_slows_the_loop() {
    let mut h = harness();
    let mut display = ScriptedDisplay::new(vec![]);
    let start = std::time::Instant::now();
    run_loop(
        &mut display,
        &mut h.canvas,
        &h.compositor,
        &h.assets,
        &mut h.lanes,
        &LoopConfig {
            fps: 100,
            max_ticks: Some(3),
            ..LoopConfig::default()
        },
    )
    .unwrap();
    assert!(start.elapsed() >= std::time::Duration::from_millis(25));
}
