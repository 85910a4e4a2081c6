//! Quadrant tiles of the board
//!
//! A tile code has three characters: the tile set (`A` or `B`), the tile
//! number (`1` to `4`) and the visible face (`F` front, `B` back).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Result, TaskError};

/// Default tile codes
pub const DEFAULT_TOP_LEFT: &str = "A1F";
pub const DEFAULT_TOP_RIGHT: &str = "A2F";
pub const DEFAULT_BOTTOM_LEFT: &str = "A4F";
pub const DEFAULT_BOTTOM_RIGHT: &str = "A3F";

fn tile_code_pattern() -> &'static Regex {
    static TILE_RE: OnceLock<Regex> = OnceLock::new();
    TILE_RE.get_or_init(|| Regex::new(r"^[AB][1-4][FB]$").expect("Invalid regex pattern"))
}

/// Board quadrant occupied by one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Get all quadrants in validation order
    pub fn all() -> [Self; 4] {
        [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight]
    }
}

/// Parsed tile code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCode {
    pub set: char,
    pub number: u8,
    pub front: bool,
}

impl FromStr for TileCode {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        if !tile_code_pattern().is_match(s) {
            return Err(TaskError::InvalidTile(s.to_string()));
        }

        let bytes = s.as_bytes();
        Ok(Self {
            set: bytes[0] as char,
            number: bytes[1] - b'0',
            front: bytes[2] == b'F',
        })
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = if self.front { 'F' } else { 'B' };
        write!(f, "{}{}{}", self.set, self.number, face)
    }
}

/// The four tile codes of a board, one per quadrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiles {
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
}

impl Default for Tiles {
    fn default() -> Self {
        Self {
            top_left: DEFAULT_TOP_LEFT.to_string(),
            top_right: DEFAULT_TOP_RIGHT.to_string(),
            bottom_left: DEFAULT_BOTTOM_LEFT.to_string(),
            bottom_right: DEFAULT_BOTTOM_RIGHT.to_string(),
        }
    }
}

impl Tiles {
    /// Tile code of a quadrant
    pub fn get(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomLeft => &self.bottom_left,
            Quadrant::BottomRight => &self.bottom_right,
        }
    }

    /// Validate the tile codes
    ///
    /// Checks each code in quadrant order; a malformed code fails with
    /// [`TaskError::InvalidTile`], a repeated one with
    /// [`TaskError::DuplicateTile`].
    pub fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for quadrant in Quadrant::all() {
            let code = self.get(quadrant);
            code.parse::<TileCode>()?;
            if !seen.insert(code) {
                return Err(TaskError::DuplicateTile(code.to_string()));
            }
        }
        tracing::debug!(tiles = ?self, "Tiles validated");
        Ok(())
    }
}
