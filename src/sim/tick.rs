//! Fixed timestep simulation tick
//!
//! Advances a game world by one physics step: integrate, resolve collisions,
//! teleport, collect stars, then check the round's end conditions.

use std::time::Duration;

use super::context::SimContext;
use super::stars::{collect_stars, spawn_star};
use super::state::World;
use crate::consts::STAR_SCORE;
use crate::input::{GameEvent, TickInput};

/// Apply the player-facing events of one tick.
///
/// Scene-level events (validate, help, quit) are left to the scene.
pub fn apply_events(world: &mut World, input: &TickInput, ctx: &mut SimContext) {
    for &event in &input.events {
        match event {
            GameEvent::Pause => ctx.toggle_pause(),
            GameEvent::SlowMotion => ctx.toggle_slow_motion(),
            _ if world.is_ended() || ctx.paused => {}
            GameEvent::MoveLeft => world.player.move_left(),
            GameEvent::MoveRight => world.player.move_right(),
            GameEvent::Jump => world.player.jump(),
            GameEvent::Hook => world.player.launch_hook(input.aim),
            GameEvent::StopHook => world.player.stop_hook(),
            GameEvent::Dash => {
                world.player.dash(ctx.now_ms);
            }
            GameEvent::Portal => {
                world
                    .player
                    .fire_portal(input.aim, world.level.walls(), ctx.now_ms);
            }
            GameEvent::MoveUp
            | GameEvent::MoveDown
            | GameEvent::Validate
            | GameEvent::Help
            | GameEvent::Quit => {}
        }
    }
}

/// Advance the world by one fixed step.
///
/// `elapsed_secs` is the round timer's current value.
pub fn tick(world: &mut World, dt: Duration, elapsed_secs: u32, ctx: &SimContext) {
    if world.is_ended() || ctx.paused {
        return;
    }

    if elapsed_secs >= world.duration_secs {
        world.end_round(false, elapsed_secs);
        return;
    }

    let player = &mut world.player;
    player.body.record_previous();
    if let Some(hook) = player.hook.as_mut() {
        hook.body.record_previous();
    }

    player.update(dt.as_secs_f32());
    player.resolve_collisions(world.level.walls());
    player.apply_portal();

    let taken = collect_stars(&mut world.stars, &world.player.rect());
    if taken > 0 {
        world.score += taken as u64 * STAR_SCORE;
        log::debug!("Collected {} star(s), score {}", taken, world.score);

        if world.mode.respawns_stars() {
            for _ in 0..taken {
                match spawn_star(&mut world.rng, world.bounds, &world.level, &world.stars) {
                    Some(star) => world.stars.push(star),
                    None => log::warn!("No room to respawn a star"),
                }
            }
        }
    }

    if world.stars.is_empty() {
        world.end_round(true, elapsed_secs);
    }
}
