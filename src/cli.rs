//! Command-line arguments. Every option can also come from a `BLOCKFALL_*`
//! environment variable.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::core::{parse_shape_pool, ConfigError, GameConfig, Randomizer, RotationRule};
use crate::types::{BASE_FALL_MS, DEFAULT_ARR_MS, DEFAULT_DAS_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RandomizerArg {
    /// Shuffled bag, each shape once per bag.
    Bag,
    /// Independent uniform draws.
    Uniform,
}

impl From<RandomizerArg> for Randomizer {
    fn from(value: RandomizerArg) -> Self {
        match value {
            RandomizerArg::Bag => Randomizer::Bag,
            RandomizerArg::Uniform => Randomizer::Uniform,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "blockfall", version, about)]
pub struct Args {
    // ---------------- grid ----------------
    /// Grid width in cells.
    #[arg(long, env = "BLOCKFALL_WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub width: u16,

    /// Grid height in cells.
    #[arg(long, env = "BLOCKFALL_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    pub height: u16,

    // ---------------- rules ----------------
    /// Fall interval at level 0, in milliseconds.
    #[arg(long, env = "BLOCKFALL_FALL_MS", default_value_t = BASE_FALL_MS)]
    pub fall_ms: u32,

    /// Keep the level-0 fall interval at every level.
    #[arg(long, env = "BLOCKFALL_NO_SPEED_UP")]
    pub no_speed_up: bool,

    /// Try sideways/upward offsets when a rotation collides.
    #[arg(long, env = "BLOCKFALL_KICKS")]
    pub kicks: bool,

    /// How shapes are drawn from the pool.
    #[arg(long, value_enum, env = "BLOCKFALL_RANDOMIZER", default_value_t = RandomizerArg::Bag)]
    pub randomizer: RandomizerArg,

    /// Shape pool as letters: i o t s z j l, d = single block.
    #[arg(long, env = "BLOCKFALL_SHAPES", default_value = "iotszjl")]
    pub shapes: String,

    /// Fixed cycling shape sequence (letters); overrides the randomizer.
    #[arg(long, env = "BLOCKFALL_SCRIPT")]
    pub script: Option<String>,

    /// RNG seed.
    #[arg(long, env = "BLOCKFALL_SEED", default_value_t = 1)]
    pub seed: u32,

    // ---------------- input ----------------
    /// Delay before a held key starts repeating, in milliseconds.
    #[arg(long, env = "BLOCKFALL_DAS_MS", default_value_t = DEFAULT_DAS_MS)]
    pub das_ms: u32,

    /// Interval between repeats of a held key, in milliseconds.
    #[arg(long, env = "BLOCKFALL_ARR_MS", default_value_t = DEFAULT_ARR_MS)]
    pub arr_ms: u32,

    // ---------------- mode / output ----------------
    /// Read commands from stdin and write JSON snapshots to stdout.
    #[arg(long, env = "BLOCKFALL_HEADLESS")]
    pub headless: bool,

    /// Include 3D scene blocks in headless output.
    #[arg(long, requires = "headless")]
    pub scene: bool,

    /// Write logs here. Without it the terminal mode logs nothing.
    #[arg(long, env = "BLOCKFALL_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let script = match &self.script {
            Some(letters) => parse_shape_pool(letters)?,
            None => Vec::new(),
        };
        let config = GameConfig {
            width: self.width,
            height: self.height,
            fall_interval_ms: self.fall_ms,
            speed_up: !self.no_speed_up,
            rotation: if self.kicks {
                RotationRule::Kicks
            } else {
                RotationRule::NoKick
            },
            randomizer: self.randomizer.into(),
            shapes: parse_shape_pool(&self.shapes)?,
            script,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeId;

    #[test]
    fn test_defaults_match_game_config_defaults() {
        let args = Args::parse_from(["blockfall"]);
        assert_eq!(args.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let args = Args::parse_from([
            "blockfall",
            "--width",
            "6",
            "--kicks",
            "--no-speed-up",
            "--randomizer",
            "uniform",
            "--shapes",
            "od",
            "--script",
            "ti",
        ]);
        let config = args.game_config().unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.rotation, RotationRule::Kicks);
        assert!(!config.speed_up);
        assert_eq!(config.randomizer, Randomizer::Uniform);
        assert_eq!(config.shapes, vec![ShapeId::O, ShapeId::Dot]);
        assert_eq!(config.script, vec![ShapeId::T, ShapeId::I]);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let args = Args::parse_from(["blockfall", "--height", "2"]);
        assert!(matches!(
            args.game_config(),
            Err(ConfigError::BoardTooSmall { .. })
        ));

        let args = Args::parse_from(["blockfall", "--shapes", "q"]);
        assert_eq!(args.game_config(), Err(ConfigError::UnknownShape('q')));
    }

    #[test]
    fn test_scene_requires_headless() {
        assert!(Args::try_parse_from(["blockfall", "--scene"]).is_err());
        assert!(Args::try_parse_from(["blockfall", "--headless", "--scene"]).is_ok());
    }
}
