//! Headless playground for the 2D kinematic controller.
//!
//! Usage: `playground [scene.json]`. Without an argument the built-in level is
//! used. The scene's scripted input is replayed at a simulated 60 fps render
//! rate, feeding the fixed-tick controller through a [`FixedTimestep`].
//! Set `RUST_LOG=debug` to see every vertical collision and jump.

mod controller;
mod scene;
mod tick;
mod world;

use std::{env, time::Duration};

use kcc2d::{BoxCaster, KinematicBody};

use crate::{
    controller::{Controller, Feedback},
    scene::{InputTrack, Scene, SceneError},
    tick::FixedTimestep,
};

const FRAME: Duration = Duration::from_micros(16_667);

/// Final state of a scripted run.
#[derive(Debug)]
struct RunSummary {
    ticks: u64,
    jumps: u32,
    landings: u32,
    ceiling_hits: u32,
    feedback: Feedback,
    body: KinematicBody,
}

fn run(scene: &Scene, caster: &impl BoxCaster) -> Result<RunSummary, SceneError> {
    let mut body = scene.spawn_body()?;
    let mut controller = Controller::new(scene.controller);
    let mut clock =
        FixedTimestep::new(scene.tick_hz).with_max_ticks_per_advance(scene.max_ticks_per_frame);
    let mut track = InputTrack::new(&scene.script);
    log::debug!("controller settings: {:?}", controller.settings());

    let mut summary = RunSummary {
        ticks: 0,
        jumps: 0,
        landings: 0,
        ceiling_hits: 0,
        feedback: Feedback::Neutral,
        body: body.clone(),
    };

    'frames: while !track.is_finished() {
        for _ in 0..clock.advance(FRAME) {
            let Some(input) = track.next() else {
                break 'frames;
            };
            if input.jump_pressed {
                controller.press_jump();
            }

            if controller.fixed_update(&mut body, input.axis, clock.dt(), &scene.step) {
                summary.jumps += 1;
            }

            if let Some(event) = body.step(caster, clock.dt(), &scene.step) {
                controller.on_vertical_collision(&event);
                if event.sign < 0 {
                    summary.landings += 1;
                } else {
                    summary.ceiling_hits += 1;
                }
                log::info!(
                    "tick {}: {} platform {} at ({:.2}, {:.2})",
                    summary.ticks,
                    if event.sign < 0 { "landed on" } else { "bumped" },
                    event.collider,
                    event.point.x,
                    event.point.y
                );
            }
            summary.ticks += 1;
        }
    }

    summary.feedback = controller.feedback();
    summary.body = body;
    Ok(summary)
}

fn main() -> Result<(), SceneError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = match env::args().nth(1) {
        Some(path) => Scene::load(path)?,
        None => {
            log::info!("no scene given, using the built-in level");
            Scene::default()
        }
    };

    let world = world::build_world(&scene);
    log::info!(
        "running {} scripted ticks at {} Hz",
        scene.script_len(),
        scene.tick_hz
    );

    let summary = run(&scene, &world)?;
    let body = &summary.body;
    log::info!(
        "done after {} ticks: {} jumps, {} landings, {} ceiling hits, feedback {:?}",
        summary.ticks,
        summary.jumps,
        summary.landings,
        summary.ceiling_hits,
        summary.feedback
    );
    log::info!(
        "final position ({:.3}, {:.3}) velocity ({:.3}, {:.3}) grounded={} facing={}",
        body.position().x,
        body.position().y,
        body.velocity().x,
        body.velocity().y,
        body.grounded(),
        body.facing()
    );

    Ok(())
}
