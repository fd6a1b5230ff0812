//! Hookshot headless driver
//!
//! Runs a scripted session through the game core with a real frame timer.
//! Usage: `hookshot [settings.json] [level.json] [ticks|wallclock]`
//!
//! Pass `-` for a path to keep the built-in default.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use hookshot::sim::LevelConfig;
use hookshot::{Control, CountdownMode, DeviceState, Game, Result, SceneId, Settings};

/// Target frame pacing for the headless loop
const FRAME_PACING: Duration = Duration::from_millis(16);
/// Hard stop in case the script never reaches the exit item
const MAX_FRAMES: u32 = 2_000;

const DEFAULT_LEVEL: [&str; 22] = [
    "########################################",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#..............#####...................#",
    "#......................................#",
    "#......................................#",
    "#.......................#######........#",
    "#......................................#",
    "#......................................#",
    "#....######............................#",
    "#......................................#",
    "#......................................#",
    "#.................#####................#",
    "#......................................#",
    "#......................................#",
    "#...........................######.....#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "########################################",
];

/// One scripted step: hold `controls` for `frames` frames
struct Step {
    frames: u32,
    controls: &'static [Control],
    cursor: Vec2,
}

const fn step(frames: u32, controls: &'static [Control], cursor: Vec2) -> Step {
    Step {
        frames,
        controls,
        cursor,
    }
}

const SCRIPT: &[Step] = &[
    // Menu: start the tutorial
    step(2, &[Control::Validate], Vec2::ZERO),
    step(2, &[], Vec2::ZERO),
    // Run right, jump, then swing from the ceiling
    step(60, &[Control::Right], Vec2::ZERO),
    step(2, &[Control::Jump, Control::Right], Vec2::ZERO),
    step(40, &[Control::MouseHook], Vec2::new(640.0, 40.0)),
    step(2, &[], Vec2::ZERO),
    step(2, &[Control::Dash, Control::Left], Vec2::ZERO),
    // Portal pair toward the left and right walls
    step(2, &[Control::Portal], Vec2::new(40.0, 600.0)),
    step(40, &[], Vec2::ZERO),
    step(2, &[Control::Portal], Vec2::new(1240.0, 600.0)),
    step(60, &[Control::Left], Vec2::ZERO),
    // Back to the menu, random game, then out
    step(2, &[Control::Quit], Vec2::ZERO),
    step(2, &[Control::Down], Vec2::ZERO),
    step(2, &[Control::Validate], Vec2::ZERO),
    step(120, &[Control::Right, Control::Jump], Vec2::ZERO),
    step(2, &[Control::Quit], Vec2::ZERO),
    step(2, &[Control::Up], Vec2::ZERO),
    step(2, &[Control::Validate], Vec2::ZERO),
];

fn device_for(frame: u32) -> DeviceState {
    let mut start = 0;
    for s in SCRIPT {
        if frame < start + s.frames {
            let mut device = DeviceState::default().with_cursor(s.cursor);
            for &control in s.controls {
                device.press(control);
            }
            return device;
        }
        start += s.frames;
    }
    DeviceState::default()
}

fn load_settings(path: Option<&str>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    }
}

fn load_level(path: Option<&str>) -> Result<LevelConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(Path::new(path))?;
            let config = LevelConfig::from_json(&json)?;
            log::info!("Loaded level from {}", path);
            Ok(config)
        }
        None => Ok(LevelConfig::from_ascii(&DEFAULT_LEVEL, 32, 32)),
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize| args.get(i).map(String::as_str).filter(|a| *a != "-");

    let mut settings = load_settings(arg(0))?;
    let level = load_level(arg(1))?;
    if let Some(name) = arg(2) {
        match CountdownMode::from_str(name) {
            Some(mode) => settings.countdown = mode,
            None => log::warn!("Unknown countdown mode '{}', keeping {}", name, settings.countdown.as_str()),
        }
    }

    let mut game = Game::new(settings, Some(level))?;
    let start = Instant::now();
    let mut last = start;
    let mut scene = game.current_scene();

    for frame in 0..MAX_FRAMES {
        if game.should_exit() {
            break;
        }

        let now = Instant::now();
        let frame_time = now - last;
        last = now;
        let now_ms = u64::try_from((now - start).as_millis()).unwrap_or(u64::MAX);

        if let Err(e) = game.frame(&device_for(frame), frame_time, now_ms) {
            log::error!("Frame {}: {}", frame, e);
        }

        let snapshot = game.snapshot();
        if snapshot.scene != scene {
            log::info!(
                "Frame {}: {:?} -> {:?}",
                frame,
                scene,
                snapshot.scene
            );
            scene = snapshot.scene;
        }
        if scene != SceneId::MainMenu && frame % 60 == 0 {
            log::debug!(
                "Frame {}: score {}, {}s elapsed, {} drawables, alpha {:.2}",
                frame,
                snapshot.hud.score,
                snapshot.hud.elapsed_secs,
                snapshot.drawables.len(),
                snapshot.alpha
            );
        }
        if let Some(outcome) = snapshot.hud.outcome {
            log::debug!("Round over: {:?}, score {}", outcome, snapshot.hud.score);
        }

        thread::sleep(FRAME_PACING);
    }

    log::info!(
        "Session finished after {:.1}s ({} ticks)",
        start.elapsed().as_secs_f64(),
        game.clock().ticks()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Hookshot (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
