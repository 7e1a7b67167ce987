use anyhow::{Context, Result, ensure};
use clap::Parser;
use std::path::PathBuf;

use common::{MazeConfig, PerceptionConfig, constants::*};

// Loop period stays at 1ms or longer
const MAX_TICK_RATE: u64 = 1000;

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Mask vision maze", long_about = None)]
pub struct Args {
    // Maze rows (rounded up to odd, at least 11)
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    // Maze columns (rounded up to odd, at least 11)
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    // Chance an interior wall is fake (tuned for 0.05-0.40)
    #[arg(long, default_value_t = DEFAULT_FAKE_WALL_CHANCE)]
    pub fake_wall_chance: f64,

    // Share of open cells holding an invisible wall (tuned for 0.05-0.30)
    #[arg(long, default_value_t = DEFAULT_INVIS_WALL_CHANCE)]
    pub invis_wall_chance: f64,

    // Seconds of vision on a full meter
    #[arg(long, default_value_t = DEFAULT_MAX_METER)]
    pub max_meter: f32,

    // Meter drained per second while held
    #[arg(long, default_value_t = DEFAULT_DRAIN_RATE)]
    pub drain_rate: f32,

    // Meter regained per second while released
    #[arg(long, default_value_t = DEFAULT_RECHARGE_RATE)]
    pub recharge_rate: f32,

    // Fraction of the meter needed before vision works again after running dry
    #[arg(long, default_value_t = DEFAULT_RECHARGE_THRESHOLD)]
    pub recharge_threshold: f32,

    // Seconds between reaching the exit and the next maze
    #[arg(long, default_value_t = DEFAULT_RESTART_DELAY)]
    pub restart_delay: f32,

    // Seed for maze generation; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    // Game loop frequency in Hz
    #[arg(long, default_value_t = 60)]
    pub tick_rate: u64,

    // Log an ASCII picture of every generated maze
    #[arg(long, default_value_t = false)]
    pub print_maze: bool,

    // Write every generated maze as JSON to this path
    #[cfg(feature = "json")]
    #[arg(long)]
    pub dump_json: Option<PathBuf>,
}

// ============================================================================
// Game Settings
// ============================================================================

// Everything the app needs, checked once at startup
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub maze: MazeConfig,
    pub perception: PerceptionConfig,
    pub restart_delay: f32,
    pub seed: Option<u64>,
    pub tick_rate: u64,
    pub print_maze: bool,
    pub dump_json: Option<PathBuf>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            perception: PerceptionConfig::default(),
            restart_delay: DEFAULT_RESTART_DELAY,
            seed: None,
            tick_rate: 60,
            print_maze: false,
            dump_json: None,
        }
    }
}

impl TryFrom<Args> for GameSettings {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        // Maze values are normalized by the builder, never rejected
        let maze = MazeConfig {
            rows: args.rows,
            cols: args.cols,
            fake_wall_chance: args.fake_wall_chance,
            invis_wall_chance: args.invis_wall_chance,
        };

        let perception = PerceptionConfig {
            max_meter: args.max_meter,
            drain_rate: args.drain_rate,
            recharge_rate: args.recharge_rate,
            recharge_threshold: args.recharge_threshold,
        };
        perception.validate().context("invalid perception settings")?;

        ensure!(
            args.restart_delay.is_finite() && args.restart_delay >= 0.0,
            "restart delay must be non-negative, got {}",
            args.restart_delay
        );
        ensure!(
            (1..=MAX_TICK_RATE).contains(&args.tick_rate),
            "tick rate must be between 1 and {} Hz, got {}",
            MAX_TICK_RATE,
            args.tick_rate
        );

        #[cfg(feature = "json")]
        let dump_json = args.dump_json;
        #[cfg(not(feature = "json"))]
        let dump_json = None;

        Ok(Self {
            maze,
            perception,
            restart_delay: args.restart_delay,
            seed: args.seed,
            tick_rate: args.tick_rate,
            print_maze: args.print_maze,
            dump_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<GameSettings> {
        let args = Args::try_parse_from(std::iter::once("game").chain(args.iter().copied()))?;
        GameSettings::try_from(args)
    }

    #[test]
    fn defaults_match_tuning_constants() {
        let settings = parse(&[]).expect("defaults parse");
        assert_eq!(settings.maze, MazeConfig::default());
        assert_eq!(settings.perception, PerceptionConfig::default());
        assert_eq!(settings.tick_rate, 60);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn even_dimensions_pass_through_for_normalization() {
        let settings = parse(&["--rows", "10", "--cols", "4", "--seed", "9"]).expect("parse");
        assert_eq!((settings.maze.rows, settings.maze.cols), (10, 4));
        assert_eq!(settings.maze.normalized().rows, 11);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn bad_meter_settings_are_rejected() {
        assert!(parse(&["--recharge-threshold", "1.5"]).is_err());
        assert!(parse(&["--max-meter", "0"]).is_err());
        assert!(parse(&["--tick-rate", "0"]).is_err());
        assert!(parse(&["--tick-rate", "1001"]).is_err());
        assert!(parse(&["--tick-rate", "2000000000"]).is_err());
        assert_eq!(parse(&["--tick-rate", "1000"]).expect("parse").tick_rate, 1000);
        assert!(parse(&["--restart-delay", "-1"]).is_err());
    }
}
