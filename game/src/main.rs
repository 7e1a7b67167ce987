use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tokio::{
    runtime::Runtime,
    sync::mpsc::unbounded_channel,
    time::{self, Duration, Instant, MissedTickBehavior},
};

use game::{
    config::{Args, GameSettings},
    configure_app,
    input::input_task,
    resources::RunState,
};

const LOG_FILTER: &str = "bevy_app=warn,bevy_ecs=warn";

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let settings = GameSettings::try_from(Args::parse())?;

    let runtime = Runtime::new().context("failed to start tokio runtime")?;
    let result = runtime.block_on(run(settings));
    // The stdin reader may still be parked in a blocking read
    runtime.shutdown_background();
    result
}

async fn run(settings: GameSettings) -> Result<()> {
    let rng = settings.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    // Channel for sending from the stdin task to the game loop
    let (to_game, from_input) = unbounded_channel();
    tokio::spawn(input_task(tokio::io::stdin(), to_game));

    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(bevy::log::LogPlugin {
        level: bevy::log::Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    });
    configure_app(&mut app, &settings, rng, from_input);

    info!(
        "starting maze loop at {} Hz (hold, release, goto <row> <col>, goal, regen, status, quit)",
        settings.tick_rate
    );

    // Run the app in a loop manually at tick_rate Hz
    let tick_duration = Duration::from_nanos(1_000_000_000 / settings.tick_rate);
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frame: u64 = 0;
    loop {
        interval.tick().await;

        let update_start = Instant::now();
        app.update();
        let update_elapsed = update_start.elapsed();

        if update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        if app.world().resource::<RunState>().quit {
            break;
        }
        frame += 1;
    }

    info!("quitting after {} completed runs", app.world().resource::<RunState>().runs);
    Ok(())
}
