//! Command-line picker: loads a TOML fixture scene, lists every object
//! under a screen point, and clicks it repeatedly to show selection cycling.
//!
//! Set `RUST_LOG=debug` to see per-pick collection statistics.

use std::path::{Path, PathBuf};

use glam::Vec2;
use scenepick::input::{InputEvent, MouseButton, PickInput};
use scenepick::options::Options;
use scenepick::picking::{PickHost, PickOutcome, PickRequest, PickSession};
use scenepick::scene::fixture::{FixtureScene, MemorySelection};
use scenepick::scene::SelectionHost;

const USAGE: &str = "Usage: scenepick <scene.toml> <x> <y> [clicks] [options.toml]";

struct Args {
    scene: PathBuf,
    x: f32,
    y: f32,
    clicks: usize,
    options: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let scene = args.next().ok_or(USAGE)?;
    let x = parse_number(args.next(), "x")?;
    let y = parse_number(args.next(), "y")?;
    let clicks = match args.next() {
        Some(n) => n
            .parse()
            .map_err(|e| format!("invalid click count {n:?}: {e}"))?,
        None => 1,
    };
    Ok(Args {
        scene: PathBuf::from(scene),
        x,
        y,
        clicks,
        options: args.next().map(PathBuf::from),
    })
}

fn parse_number(arg: Option<String>, name: &str) -> Result<f32, String> {
    let arg = arg.ok_or(USAGE)?;
    arg.parse()
        .map_err(|e| format!("invalid {name} coordinate {arg:?}: {e}"))
}

fn load_options(path: Option<&Path>) -> Result<Options, String> {
    match path {
        Some(path) => Options::load(path).map_err(|e| e.to_string()),
        None => Ok(Options::default()),
    }
}

/// Feed one click at the cursor position through the input processor.
fn click(input: &mut PickInput, x: f32, y: f32, session: &mut PickSession) {
    for event in [
        InputEvent::CursorMoved { x, y },
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        },
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        },
    ] {
        if let Some(request) = input.handle_event(event) {
            session.request_pick(request);
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let options = load_options(args.options.as_deref())?;
    let scene = FixtureScene::load(&args.scene).map_err(|e| e.to_string())?;
    let mut input = PickInput::new(options.picking.clone(), options.input.clone());
    let mut session = PickSession::new(options);
    let mut selection = MemorySelection::default();

    let request =
        PickRequest::from_options(Vec2::new(args.x, args.y), &session.options().picking);
    let hits = session.pick_all(&request, &scene, Some(&scene), Some(&scene));
    log::info!("{} objects under ({}, {})", hits.len(), args.x, args.y);
    for (rank, hit) in hits.iter().enumerate() {
        log::info!(
            "  {rank}: {} {:?} at distance {:.3}",
            hit.object,
            hit.source,
            hit.distance
        );
    }

    for n in 1..=args.clicks {
        click(&mut input, args.x, args.y, &mut session);
        let outcomes = session.tick(&mut PickHost {
            scene: &scene,
            ui: Some(&scene),
            physics: Some(&scene),
            selection: &mut selection,
        });
        if selection.take_changed() {
            session.on_selection_changed();
        }
        for outcome in outcomes {
            match outcome {
                PickOutcome::NoHit => log::info!("click {n}: nothing selected"),
                PickOutcome::Fresh(id) => log::info!("click {n}: selected {id}"),
                PickOutcome::Cycled(id) => log::info!("click {n}: cycled to {id}"),
            }
        }
    }

    if let Some(active) = selection.active() {
        log::info!("final selection: {active}");
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
