//! Asteroid Field entry point
//!
//! Headless runner: plays a seeded game on autopilot and logs what happens.
//! Rendering and real audio output belong to a frontend, not this binary.
//!
//! Usage: `asteroid-field [--seed N] [--ticks N] [--tuning FILE] [--settings FILE]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use asteroid_field::audio::AudioManager;
    use asteroid_field::consts::TICKS_PER_SECOND;
    use asteroid_field::sim::{GameEvent, GameState, TickInput, tick};
    use asteroid_field::{Settings, Tuning};

    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let args = Args::parse(std::env::args().skip(1));
    let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();
    let settings = args.settings.as_deref().map(Settings::load).unwrap_or_default();

    let mut state = GameState::with_tuning(args.seed, tuning);
    let mut audio = AudioManager::new(&settings);
    log::info!("Game initialized with seed: {}", args.seed);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut best_level = state.level;
    let mut cues = 0usize;

    for _ in 0..args.ticks {
        tick(&mut state, &input);
        audio.trigger(&state.events);
        cues += audio.drain().len();

        for event in &state.events {
            match event {
                GameEvent::LevelComplete { level } => log::info!("Cleared level {}", level),
                GameEvent::GameOver => log::info!("Ship lost at {}s", state.time_ticks / u64::from(TICKS_PER_SECOND)),
                other => log::trace!("{}", other.name()),
            }
        }
        best_level = best_level.max(state.level);

        if settings.show_debug && state.time_ticks % u64::from(TICKS_PER_SECOND * 10) == 0 {
            log::debug!("{:?}", state.hud());
        }
    }

    let hud = state.hud();
    log::info!(
        "Finished after {} ticks: score {}, level {} (best {}), {} sound cues",
        state.time_ticks,
        hud.score,
        hud.level,
        best_level,
        cues
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; a frontend drives `sim::tick` itself
}

/// Command line options
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct Args {
    seed: u64,
    ticks: u64,
    tuning: Option<String>,
    settings: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut parsed = Args {
            seed: 1,
            ticks: 60 * 60,
            tuning: None,
            settings: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => match args.next().map(|v| v.parse()) {
                    Some(Ok(seed)) => parsed.seed = seed,
                    _ => log::warn!("--seed expects a number"),
                },
                "--ticks" => match args.next().map(|v| v.parse()) {
                    Some(Ok(ticks)) => parsed.ticks = ticks,
                    _ => log::warn!("--ticks expects a number"),
                },
                "--tuning" => parsed.tuning = args.next(),
                "--settings" => parsed.settings = args.next(),
                other => log::warn!("Ignoring unknown argument {:?}", other),
            }
        }
        parsed
    }
}
