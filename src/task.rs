//! Solver task lifecycle
//!
//! A [`Task`] wraps validated [`Args`] for one solver run and reports its
//! progress as JSON lines, one object per record:
//!
//! ```text
//! {"time":"...","level":"INFO","msg":"progress","solver":"ida","percent":40}
//! {"time":"...","level":"INFO","msg":"result","solver":"ida","duration":12,"moves":[{"to":{"x":0,"y":5},"robot":"redRobot"}]}
//! {"time":"...","level":"ERROR","msg":"exit","solver":"ida","duration":3,"err":"out of memory"}
//! ```
//!
//! `result` and `exit` consume the task: once a run has completed or
//! aborted, no further record can be emitted for it.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::io::Write;
use std::time::Instant;

use crate::args::Args;
use crate::board::BoardBuilder;
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::params::{FlagArgs, FlagParams};
use crate::robots::Robot;

/// Single robot move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub to: Coordinate,
    pub robot: Robot,
}

/// Solution as an ordered list of moves
pub type Moves = Vec<Move>;

/// Caller supplied record fields
pub type Extras<'a> = &'a [(&'a str, Value)];

/// Lifecycle state of a running task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// No progress reported yet
    Created,
    /// At least one progress record emitted
    Running,
}

#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Error => "ERROR",
        }
    }
}

/// JSON line writer bound to one solver name
struct TaskLogger {
    solver: String,
    out: Box<dyn Write + Send>,
}

impl TaskLogger {
    fn record(&mut self, level: Level, msg: &str, fields: Vec<(&str, Value)>, extras: Extras<'_>) {
        let mut object = Map::new();
        object.insert(
            "time".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        object.insert("level".to_string(), Value::String(level.as_str().to_string()));
        object.insert("msg".to_string(), Value::String(msg.to_string()));
        object.insert("solver".to_string(), Value::String(self.solver.clone()));
        for (key, value) in fields {
            object.insert(key.to_string(), value);
        }
        for (key, value) in extras {
            object.insert((*key).to_string(), value.clone());
        }

        let written = serde_json::to_writer(&mut self.out, &object)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, record = msg, "Failed to write task record");
        }
    }
}

/// One solver run over validated arguments
pub struct Task {
    args: Args,
    logger: TaskLogger,
    start: Instant,
    progress: u8,
    state: TaskState,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("args", &self.args)
            .field("solver", &self.logger.solver)
            .field("progress", &self.progress)
            .field("state", &self.state)
            .finish()
    }
}

impl Task {
    /// Create a task logging to stdout under the process name
    pub fn new(args: Args) -> Self {
        let solver = std::env::args_os()
            .next()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::with_writer(args, solver, Box::new(std::io::stdout()))
    }

    /// Create a task logging to an explicit writer
    pub fn with_writer(args: Args, solver: impl Into<String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            args,
            logger: TaskLogger {
                solver: solver.into(),
                out,
            },
            start: Instant::now(),
            progress: 0,
            state: TaskState::Created,
        }
    }

    /// Create a task from the process arguments and `RICROB_` environment
    ///
    /// Malformed flags print usage and exit; validation errors are returned.
    pub fn from_flags<B>(builder: &B) -> Result<Self>
    where
        B: BoardBuilder + ?Sized,
    {
        let params = FlagParams::from_process_env(FlagArgs::from_process_args())?;
        let args = Args::from_params(&params, builder)?;
        Ok(Self::new(args))
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Last reported progress percentage
    pub fn progress_percent(&self) -> u8 {
        self.progress
    }

    /// Milliseconds since the task was created
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Report progress as a percentage, capped at 100
    pub fn progress(&mut self, percent: u8, extras: Extras<'_>) {
        let percent = percent.min(100);
        if percent < self.progress {
            tracing::warn!(previous = self.progress, percent, "Progress went backwards");
        }
        self.progress = percent;
        self.state = TaskState::Running;
        self.logger
            .record(Level::Info, "progress", vec![("percent", Value::from(percent))], extras);
    }

    /// Report a solver specific level, such as a search depth
    pub fn level(&mut self, level: u32, extras: Extras<'_>) {
        self.state = TaskState::Running;
        self.logger
            .record(Level::Info, "progress", vec![("level", Value::from(level))], extras);
    }

    /// Report the solution and finish the task
    pub fn result(mut self, moves: &[Move], extras: Extras<'_>) {
        let fields = vec![
            ("duration", Value::from(self.elapsed_ms())),
            ("moves", serde_json::to_value(moves).unwrap_or(Value::Null)),
        ];
        self.logger.record(Level::Info, "result", fields, extras);
    }

    /// Report a fatal error and terminate the process with status 1
    pub fn exit(mut self, err: impl fmt::Display) -> ! {
        self.abort(&err);
        std::process::exit(1)
    }

    fn abort(&mut self, err: &dyn fmt::Display) {
        let fields = vec![
            ("duration", Value::from(self.elapsed_ms())),
            ("err", Value::String(err.to_string())),
        ];
        self.logger.record(Level::Error, "exit", fields, &[]);
    }
}
