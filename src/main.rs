//! Terminal runner (default binary).
//!
//! crossterm supplies mouse and key events, the core runs at a fixed rate, and
//! the scene is drawn through a diffing framebuffer renderer.

mod cli;
mod logging;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::{event, terminal};
use log::info;

use apple_container::core::{Cursor, GameController, InputSampler, Scene, Signal};
use apple_container::input::{Feed, TermInput};
use apple_container::term::{FrameBuffer, SceneView, Screen, Viewport};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!("starting with seed {seed} at {} fps", cli.fps);

    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen, &cli, seed);

    // Always try to restore terminal state.
    let _ = screen.leave();
    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(screen: &mut Screen, cli: &Cli, seed: u32) -> Result<()> {
    let mut game = GameController::new(seed);
    let mut sampler = InputSampler::new();
    let mut keys = TermInput::new();

    let view = SceneView::default();
    let mut scene = Scene::new();
    let (w, h) = terminal::size()?;
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;
    let frame = Duration::from_millis(cli.frame_ms());
    let mut next_frame = Instant::now();

    loop {
        // Input until the next frame is due.
        while event::poll(next_frame.saturating_duration_since(Instant::now()))? {
            match keys.handle_event(&event::read()?, now_ms()) {
                Feed::Quit => return Ok(()),
                Feed::Focus(focused) => sampler.set_focus(focused),
                Feed::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    screen.invalidate();
                }
                Feed::Handled | Feed::Ignored => {}
            }
            if Instant::now() >= next_frame {
                break;
            }
        }

        next_frame += frame;
        let late = Instant::now();
        if next_frame < late {
            next_frame = late + frame;
        }

        // Tick.
        let t = now_ms();
        keys.expire(t);
        sampler.poll(true, &keys);
        keys.end_frame();

        let (px, py) = keys.mouse_px();
        let cursor = Cursor::from_physical(&viewport.mapper(), px, py);
        if let Signal::Exit = game.tick(&sampler, cursor, t) {
            info!("exit requested");
            return Ok(());
        }

        // Render.
        scene.build_into(&game, t);
        view.render_into(&scene, viewport, &mut fb);
        screen.present(&mut fb)?;
    }
}
