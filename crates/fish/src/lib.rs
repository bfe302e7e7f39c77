//! ><> host: sessions, debugging and the `fish` command.
//!
//! [`fish_vm`] executes one instruction per call. This crate drives it the
//! way an interpreter does:
//! - [`Session`] steps a program to completion under a step budget
//! - [`DebugState`] pauses on grid breakpoints and single-steps
//! - the `fish` binary loads source from files, stdin, `-e` or a
//!   `fish.toml` project

pub mod debug;
pub mod session;

pub use debug::{DebugEvent, DebugMode, DebugState, Position};
pub use session::{
    DEFAULT_MAX_STEPS, RunOutcome, Session, SessionConfig, SessionError, render_output,
};
