//! Ball Dodge headless host
//!
//! Loads settings, runs the fixed-timestep loop and prints render snapshots
//! as JSON lines on stdout. Logging goes to stderr via env_logger.

#[cfg(not(target_arch = "wasm32"))]
use ball_dodge::consts::SIM_DT;
#[cfg(not(target_arch = "wasm32"))]
use ball_dodge::sim::{GameEvent, GameState, TickInput, tick};
#[cfg(not(target_arch = "wasm32"))]
use ball_dodge::{ConfigError, GameMode, Settings};

/// Environment override for the difficulty preset
#[cfg(not(target_arch = "wasm32"))]
const MODE_ENV_VAR: &str = "BALL_DODGE_MODE";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), ConfigError> {
    env_logger::init();
    log::info!("Ball Dodge (headless) starting...");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let mut settings = Settings::load_or_default(path.as_deref())?;
    if let Ok(mode) = std::env::var(MODE_ENV_VAR) {
        settings.mode = GameMode::parse(&mode)?;
        log::info!("Mode overridden by {}: {}", MODE_ENV_VAR, settings.mode.as_str());
    }

    let seed = settings.seed.unwrap_or_else(seed_from_clock);
    let mut state = GameState::new(seed, settings.mode);
    let input = TickInput {
        idle_mode: settings.idle_mode,
        ..Default::default()
    };

    while state.time_ticks < settings.max_ticks && !state.is_game_over() {
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::PlayerDestroyed => log::info!("Player destroyed"),
                GameEvent::HazardDestroyedByInvincibility => log::debug!("Hazard smashed"),
                GameEvent::PowerUpCollected(kind) => log::info!("Collected {:?}", kind),
            }
        }

        if settings.snapshot_interval > 0 && state.time_ticks % settings.snapshot_interval == 0 {
            print_snapshot(&state)?;
        }
    }

    print_snapshot(&state)?;
    log::info!(
        "Run finished after {:.1}s: score {}, skill {:.2}, {} near misses",
        state.elapsed,
        state.score,
        state.player.skill,
        state.skill.near_misses
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn print_snapshot(state: &GameState) -> Result<(), ConfigError> {
    println!("{}", serde_json::to_string(&state.snapshot())?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is driven by an embedding page
}
