// What you SEE:
// • A grey canvas. Files or folders passed on the command line load in the
//   background and pop in at the top-left as they finish decoding.
// • Left click picks the topmost picture: drag to move, pull a corner to
//   resize (past the opposite edge mirrors it). Right drag pans everything.
// • The toolbar under the selection (or W F R E D C) reorders, flips,
//   rotates, toggles the eraser, deletes, duplicates. ESC quits.

mod actions;
mod brush;
mod collection;
mod config;
mod draw;
mod error;
mod gesture;
mod ingest;
mod scene;
mod surface;
mod toolbar;
mod types;
mod visage;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info, trace};

use brush::BrushConfig;
use collection::VisageCollection;
use config::{BACKGROUND, Config};
use draw::{Drawer, draw_text_5x7};
use error::Error;
use gesture::GestureController;
use ingest::Ingest;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    /* --- Window setup ---
       Visual: an empty resizable canvas opens. */
    let cfg = Config::from_env();
    let mut drawer = Drawer::new(&cfg.title, cfg.width, cfg.height)?;
    info!(width = cfg.width, height = cfg.height, "window opened");

    /* --- Screen buffer, reused every frame; follows the window size --- */
    let mut screen = FrameBuffer::new(cfg.width, cfg.height, BACKGROUND);

    /* --- Canvas state --- */
    let mut visages = VisageCollection::new();
    let mut ctl = GestureController::new(BrushConfig::new(cfg.brush_radius));

    /* --- Dropped batch = paths from the command line ---
       Visual: pictures appear one by one while the window stays live. */
    let ingest = Ingest::new();
    ingest.submit(std::env::args_os().skip(1).map(PathBuf::from).collect());

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Take whatever finished loading. A file that could not be read ends the session. */
        if let Err(e) = ingest.drain(&mut visages) {
            error!(error = %e, "dropped files could not be loaded");
            return Err(e.into());
        }

        /* 2) Inputs → gestures, toolbar, hotkeys */
        ctl.update(&drawer.input(), &mut visages);
        if let Some(hint) = ctl.cursor_change(&visages) {
            drawer.set_cursor(hint); // visual: pointer shape follows what a click would do
        }

        /* 3) Paint the scene back to front */
        let (w, h) = drawer.size();
        screen.resize(w.max(1), h.max(1), BACKGROUND);
        screen.clear(BACKGROUND);
        draw::render(&mut screen, &scene::build(&visages, &ctl));

        /* 4) HUD: count, eraser state, pending loads, FPS */
        let mut hud = format!("{} PICTURES", visages.len());
        if ctl.is_erasing() {
            hud.push_str(&format!(" | ERASER {}", ctl.brush().radius()));
        }
        if ingest.in_flight() > 0 {
            hud.push_str(" | LOADING");
        }
        hud.push_str(&format!(" | {hud_fps_text}"));
        draw_text_5x7(&mut screen, 8, 8, &hud, 1, 0x00_FF_FF_FF);

        /* 5) Present to the window */
        drawer.present(&screen)?;

        /* 6) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            trace!(fps, "frame rate");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!(pictures = visages.len(), "window closed");
    Ok(())
}
