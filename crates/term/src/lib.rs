//! Render adapters.
//!
//! Everything here reads a [`core::GameSnapshot`] and never mutates the game.
//!
//! - [`game_view`]/[`renderer`]: a small game-oriented terminal pipeline that
//!   draws into a framebuffer and flushes only the changed runs
//! - [`scene`]: a rebuildable list of positioned blocks for a 3D view
//!
//! Grid rows grow upward; both adapters flip or offset rows on the way out,
//! never the other way round.

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;
pub mod scene;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use render_throttle::{snapshot_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use scene::{build_scene, build_scene_into, BlockKind, SceneBlock, SceneLayout, Vec3};
