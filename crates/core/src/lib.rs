//! Core game logic - pure, deterministic, and testable
//!
//! Grid model, pieces, collision, line clearing and the game controller.
//! Nothing here touches a terminal, a clock or a file; callers feed commands
//! and elapsed time in and read snapshots out.
//!
//! # Coordinates
//!
//! Cells are `(col, row)` with column 0 on the left and **row 0 at the floor**.
//! Gravity decreases the row index. A piece spawns with the top of its
//! bounding box against the grid's top edge.
//!
//! # Module Structure
//!
//! - [`grid`]: occupancy storage, bounds checks, row operations
//! - [`shapes`]: static shape table and clockwise rotation
//! - [`piece`]: the active piece (shape + orientation + anchor)
//! - [`collision`]: the one predicate every move, rotation and fall uses
//! - [`line_clear`]: detection and removal of completed rows
//! - [`game`]: the spawn → fall → lock → clear state machine
//! - [`rng`]: deterministic bag, uniform and scripted shape queues
//! - [`scoring`]: line and drop scores, levels, fall intervals
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, GameConfig};
//! use blockfall_types::{Command, Phase};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! game.start();
//! assert_eq!(game.phase(), Phase::Falling);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//! game.apply(Command::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.grid().occupied_count(), 4);
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod line_clear;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{collides, drop_distance, first_collision, Blocker, Collision};
pub use config::{parse_shape_pool, GameConfig, RotationRule};
pub use error::{ConfigError, GridError, PlacementFault};
pub use game::{Game, GameEvent, StepOutcome};
pub use grid::{Grid, Occupant};
pub use line_clear::{clear_completed_rows, clear_rows, completed_rows};
pub use piece::{Piece, PieceCells};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, fall_interval_ms};
pub use shapes::{get_shape, Shape, ShapeColor};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
