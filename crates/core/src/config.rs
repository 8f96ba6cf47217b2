//! Game configuration
//!
//! Everything a session needs to know up front. Dimensions are fixed for the
//! life of a session; changing them requires a new [`crate::Game`].

use crate::error::ConfigError;
use crate::rng::Randomizer;
use crate::types::{
    ShapeId, BASE_FALL_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, MIN_DIMENSION,
};

/// Offsets tried, in order, by [`RotationRule::Kicks`].
pub const KICK_OFFSETS: [(i16, i16); 6] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0), (0, 1)];

/// What happens when a rotation would collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationRule {
    /// Reject the rotation; the piece is unchanged.
    #[default]
    NoKick,
    /// Try [`KICK_OFFSETS`] in order and take the first that fits.
    Kicks,
}

impl RotationRule {
    pub fn offsets(self) -> &'static [(i16, i16)] {
        match self {
            RotationRule::NoKick => &KICK_OFFSETS[..1],
            RotationRule::Kicks => &KICK_OFFSETS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Fall interval at level 0, in milliseconds.
    pub fall_interval_ms: u32,
    /// Shorten the fall interval as levels increase.
    pub speed_up: bool,
    pub rotation: RotationRule,
    pub randomizer: Randomizer,
    pub shapes: Vec<ShapeId>,
    /// Fixed shape sequence, cycled. Overrides `randomizer` when non-empty.
    pub script: Vec<ShapeId>,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fall_interval_ms: BASE_FALL_MS,
            speed_up: true,
            rotation: RotationRule::NoKick,
            randomizer: Randomizer::Bag,
            shapes: ShapeId::TETROMINOES.to_vec(),
            script: Vec::new(),
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_DIMENSION,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }
        if self.shapes.is_empty() {
            return Err(ConfigError::EmptyShapePool);
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        Ok(())
    }
}

/// Parse a shape pool from letters, e.g. `"iotszjl"` or `"tod"`.
///
/// Duplicates are kept, which weights the pool.
pub fn parse_shape_pool(letters: &str) -> Result<Vec<ShapeId>, ConfigError> {
    let shapes = letters
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| ShapeId::from_char(c).ok_or(ConfigError::UnknownShape(c)))
        .collect::<Result<Vec<_>, _>>()?;
    if shapes.is_empty() {
        return Err(ConfigError::EmptyShapePool);
    }
    Ok(shapes)
}
