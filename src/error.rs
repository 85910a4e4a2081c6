//! Error handling for task parsing and validation
//!
//! Every parse and validation step returns a [`TaskError`]. Construction
//! fails fast: the first violated rule is returned, errors are never
//! aggregated.
//!
//! # Usage
//!
//! ```rust
//! use ricrob_task::error::{ErrorCategory, TaskError};
//!
//! let err = TaskError::DuplicateTile("A1F".to_string());
//! assert_eq!(err.category(), ErrorCategory::Consistency);
//! assert_eq!(err.to_string(), "duplicate tile A1F");
//! ```

use std::num::ParseIntError;
use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::symbol::Symbol;

/// Result type for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed text: bad coordinate, bad tile code shape, bad boolean
    Format,
    /// Token outside a closed vocabulary (symbol, shape, color)
    UnknownToken,
    /// Board level consistency: duplicates, off board, robot on symbol
    Consistency,
}

impl ErrorCategory {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::UnknownToken => "unknown_token",
            Self::Consistency => "consistency",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task parsing and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Coordinate text is not two comma separated fields
    #[error("invalid coordinate format: {0}")]
    InvalidCoordinateFormat(String),

    /// X component is not an integer in range
    #[error("invalid x coordinate {input} - {source}")]
    InvalidCoordinateX {
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// Y component is not an integer in range
    #[error("invalid y coordinate {input} - {source}")]
    InvalidCoordinateY {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid symbol {0}")]
    InvalidSymbol(String),

    #[error("invalid shape {0}")]
    InvalidShape(String),

    #[error("invalid color {0}")]
    InvalidColor(String),

    #[error("invalid robot {0}")]
    InvalidRobot(String),

    /// Target color given together with a compound symbol of another color
    #[error("target color {color} does not match symbol {symbol}")]
    TargetColorMismatch { symbol: Symbol, color: String },

    /// Boolean parameter that is not one of the accepted spellings
    #[error("invalid boolean value {value} for parameter {name}")]
    InvalidBool { name: String, value: String },

    /// Override variable whose value is not valid unicode
    #[error("environment variable {0} is not valid unicode")]
    NonUnicodeEnv(String),

    #[error("invalid tile {0}")]
    InvalidTile(String),

    #[error("duplicate tile {0}")]
    DuplicateTile(String),

    /// Robot outside the board or inside the forbidden centre
    #[error("invalid robot coordinates {0} - center field")]
    InvalidRobotPosition(Coordinate),

    #[error("robot {robot} sits on symbol {} color {}", .symbol.shape_str(), .symbol.color_str())]
    RobotOnSymbol { robot: Coordinate, symbol: Symbol },

    #[error("duplicate robot position {0}")]
    DuplicateRobotPosition(Coordinate),
}

impl TaskError {
    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCoordinateFormat(_)
            | Self::InvalidCoordinateX { .. }
            | Self::InvalidCoordinateY { .. }
            | Self::InvalidBool { .. }
            | Self::NonUnicodeEnv(_)
            | Self::InvalidTile(_) => ErrorCategory::Format,
            Self::InvalidSymbol(_)
            | Self::InvalidShape(_)
            | Self::InvalidColor(_)
            | Self::InvalidRobot(_) => ErrorCategory::UnknownToken,
            Self::TargetColorMismatch { .. }
            | Self::DuplicateTile(_)
            | Self::InvalidRobotPosition(_)
            | Self::RobotOnSymbol { .. }
            | Self::DuplicateRobotPosition(_) => ErrorCategory::Consistency,
        }
    }

    /// Create an invalid bool error
    pub fn invalid_bool(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidBool {
            name: name.into(),
            value: value.into(),
        }
    }
}
