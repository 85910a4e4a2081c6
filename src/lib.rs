//! ricrob-task - validated configuration for robot puzzle solvers
//!
//! Turns untrusted input (command line flags with environment overrides,
//! or URL query parameters) into an immutable, board consistent [`Args`]
//! value, and wraps it in a [`Task`] that reports solver progress as JSON
//! lines.
//!
//! # Architecture
//!
//! - [`coordinate`] - Board coordinates and their `"x,y"` form
//! - [`symbol`] - Target symbols, shapes and colors
//! - [`tiles`] - Quadrant tile codes
//! - [`board`] - Board capability, layouts and quadrant geometry
//! - [`robots`] - Robot positions and their board checks
//! - [`params`] - Flag and query parameter sources
//! - [`args`] - The validated aggregate
//! - [`task`] - Solver run lifecycle and records
//! - [`config`] - Settings of the binary
//! - [`server`] - HTTP front end for the URL path
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use ricrob_task::board::Layout;
//! use ricrob_task::task::Task;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut task = Task::from_flags(&Layout::default())?;
//!     task.progress(50, &[]);
//!     task.result(&[], &[]);
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod board;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod params;
pub mod robots;
pub mod server;
pub mod symbol;
pub mod task;
pub mod tiles;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::args::Args;
    pub use crate::board::{Board, BoardBuilder, Field, Layout};
    pub use crate::coordinate::Coordinate;
    pub use crate::error::{ErrorCategory, Result, TaskError};
    pub use crate::params::{FlagArgs, FlagParams, ParamSource, QueryParams};
    pub use crate::robots::{Robot, Robots};
    pub use crate::symbol::{Color, Shape, Symbol};
    pub use crate::task::{Move, Moves, Task};
    pub use crate::tiles::Tiles;
}

// Direct re-exports for convenience
pub use args::Args;
pub use error::{Result, TaskError};
pub use task::Task;
