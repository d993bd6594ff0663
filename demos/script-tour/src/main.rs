//! Run the tour scenes headlessly and log what the scripts do.
//!
//! Usage: script-tour [scene|all] [config.json]

use std::error::Error;
use script_tour::scenes::{Adventure, Countdown, LoopingSquare, ProximityFlash};
use script_tour::{Demo, DemoRunner};
use zap_script::{InputEvent, Rng, RunnerConfig};

const FRAME_DT: f32 = 1.0 / 60.0;
const SCENES: [&str; 4] = ["looping-square", "countdown", "proximity-flash", "adventure"];

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.format_timestamp_millis().init();
}

/// Drive a scene for `seconds` with a jittery frame clock, then report.
fn tour<D: Demo>(demo: D, config: &RunnerConfig, seconds: f32, input: &[(f32, InputEvent)]) {
    let name = demo.name();
    let mut runner = DemoRunner::with_config(demo, config.clone());
    runner.init();

    let mut rng = Rng::new(0x5eed);
    let mut pending = input.iter().peekable();
    let mut elapsed = 0.0;
    while elapsed < seconds {
        while let Some((_, event)) = pending.next_if(|(at, _)| *at <= elapsed) {
            runner.push_input(*event);
        }
        let dt = FRAME_DT * rng.range(0.8, 1.25);
        runner.tick(dt);
        elapsed += dt;
    }

    for fault in runner.faults() {
        log::warn!("{}: {}", name, fault);
    }
    log::info!(
        "{}: {} frames, {} scripts still running, {} faults",
        name,
        runner.frames(),
        runner.ctx().scripts.len(),
        runner.faults().len()
    );
}

fn run_scene(name: &str, config: &RunnerConfig) -> Result<(), Box<dyn Error>> {
    match name {
        "looping-square" => tour(LoopingSquare::default(), config, 8.0, &[]),
        "countdown" => tour(
            Countdown::default(),
            config,
            5.0,
            &[
                (0.5, InputEvent::PointerDown { x: 0.0, y: 0.0 }),
                (0.6, InputEvent::PointerUp { x: 0.0, y: 0.0 }),
            ],
        ),
        "proximity-flash" => tour(ProximityFlash::default(), config, 12.0, &[]),
        "adventure" => tour(
            Adventure::default(),
            config,
            12.0,
            &[
                (0.2, InputEvent::KeyDown { key_code: 65 }),
                (1.0, InputEvent::KeyUp { key_code: 65 }),
                (1.5, InputEvent::KeyDown { key_code: 32 }),
                (1.6, InputEvent::KeyUp { key_code: 32 }),
            ],
        ),
        other => return Err(format!("unknown scene '{}', expected one of {:?} or 'all'", other, SCENES).into()),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let scene = args.next().unwrap_or_else(|| "all".to_string());
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let config = RunnerConfig::from_json(&json)?;
            log::info!("Loaded runner config from {}", path);
            config
        }
        None => RunnerConfig::default(),
    };

    if scene == "all" {
        for name in SCENES {
            run_scene(name, &config)?;
        }
        Ok(())
    } else {
        run_scene(&scene, &config)
    }
}
