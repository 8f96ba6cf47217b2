//! Headless driver: line-oriented commands in, JSON snapshots out.
//!
//! Each input line is one request:
//!
//! ```text
//! tick            one state-machine step
//! tick 5          five steps
//! advance 250     advance the fall clock by 250 ms
//! moveLeft        any command name (moveRight, rotateCw, softDrop, hardDrop, reset)
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Every other line
//! produces exactly one JSON object on its own output line: a frame, or an
//! `{"error": ...}` object for a line that did not parse.

use std::io::{BufRead, Write};

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::{Game, GameEvent, GameSnapshot, StepOutcome};
use crate::term::{build_scene_into, SceneBlock, SceneLayout};
use crate::types::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Tick(u32),
    Advance(u32),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("unknown request `{0}`")]
    Unknown(String),
    #[error("`{verb}` expects a non-negative integer, got `{arg}`")]
    BadCount { verb: &'static str, arg: String },
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(String),
}

/// Parse one input line. `Ok(None)` for blank lines and comments.
pub fn parse_request(line: &str) -> Result<Option<Request>, RequestError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next();
    if let Some(extra) = parts.next() {
        return Err(RequestError::UnexpectedArgument(extra.to_string()));
    }

    let count = |verb: &'static str, default: Option<u32>| match (arg, default) {
        (None, Some(d)) => Ok(d),
        (Some(a), _) => a.parse::<u32>().map_err(|_| RequestError::BadCount {
            verb,
            arg: a.to_string(),
        }),
        (None, None) => Err(RequestError::BadCount {
            verb,
            arg: String::new(),
        }),
    };

    match verb {
        "tick" => count("tick", Some(1)).map(|n| Some(Request::Tick(n))),
        "advance" => count("advance", None).map(|ms| Some(Request::Advance(ms))),
        _ => {
            let command =
                Command::from_str(verb).ok_or_else(|| RequestError::Unknown(verb.to_string()))?;
            if arg.is_some() {
                return Err(RequestError::UnexpectedArgument(verb.to_string()));
            }
            Ok(Some(Request::Command(command)))
        }
    }
}

/// One output line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame<'a> {
    #[serde(flatten)]
    pub snapshot: &'a GameSnapshot,
    /// Whether the command changed anything; absent for clock requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    pub events: &'a [GameEvent],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<&'a [SceneBlock]>,
}

#[derive(Debug, Serialize)]
struct ErrorLine<'a> {
    error: &'a str,
    line: &'a str,
}

/// Reusable buffers between frames.
pub struct Session {
    game: Game,
    snapshot: GameSnapshot,
    scene: Option<(SceneLayout, Vec<SceneBlock>)>,
}

impl Session {
    pub fn new(game: Game, with_scene: bool) -> Self {
        Self {
            game,
            snapshot: GameSnapshot::default(),
            scene: with_scene.then(|| (SceneLayout::default(), Vec::new())),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Execute one request; returns the command result, if it was a command.
    pub fn execute(&mut self, request: Request) -> Option<bool> {
        match request {
            Request::Tick(n) => {
                // Once the game is over every further step is idle.
                for _ in 0..n {
                    if self.game.tick() == StepOutcome::Idle {
                        break;
                    }
                }
                None
            }
            Request::Advance(ms) => {
                self.game.advance(ms);
                None
            }
            Request::Command(command) => Some(self.game.apply(command)),
        }
    }

    /// Write the current state as one JSON line.
    pub fn write_frame<W: Write>(&mut self, out: &mut W, applied: Option<bool>) -> Result<()> {
        self.game.snapshot_into(&mut self.snapshot);
        let events = self.game.take_events();
        let scene = match self.scene.as_mut() {
            Some((layout, blocks)) => {
                build_scene_into(&self.snapshot, layout, blocks);
                Some(blocks.as_slice())
            }
            None => None,
        };
        let frame = Frame {
            snapshot: &self.snapshot,
            applied,
            events: &events,
            scene,
        };
        serde_json::to_writer(&mut *out, &frame)?;
        out.write_all(b"\n")?;
        Ok(())
    }

    /// Drive the game from `input` until EOF, writing one line per request.
    ///
    /// The game is started first and its initial state written before any
    /// input is read.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        self.game.start();
        self.write_frame(&mut out, None)?;

        for line in input.lines() {
            let line = line?;
            match parse_request(&line) {
                Ok(None) => continue,
                Ok(Some(request)) => {
                    debug!(?request, "headless request");
                    let applied = self.execute(request);
                    self.write_frame(&mut out, applied)?;
                }
                Err(err) => {
                    warn!(%err, line = line.as_str(), "rejected headless request");
                    let msg = err.to_string();
                    serde_json::to_writer(
                        &mut out,
                        &ErrorLine {
                            error: &msg,
                            line: line.trim(),
                        },
                    )?;
                    out.write_all(b"\n")?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}
