//! Robot identities and starting positions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::coordinate::Coordinate;
use crate::error::{Result, TaskError};

/// Default robot positions
pub const DEFAULT_YELLOW: Coordinate = Coordinate::new(0, 0);
pub const DEFAULT_RED: Coordinate = Coordinate::new(1, 0);
pub const DEFAULT_GREEN: Coordinate = Coordinate::new(2, 0);
pub const DEFAULT_BLUE: Coordinate = Coordinate::new(3, 0);
pub const DEFAULT_SILVER: Coordinate = Coordinate::SENTINEL;

/// Robot identity, used in move records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Robot {
    Yellow,
    Red,
    Green,
    Blue,
    Silver,
}

impl Robot {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "yellowRobot",
            Self::Red => "redRobot",
            Self::Green => "greenRobot",
            Self::Blue => "blueRobot",
            Self::Silver => "silverRobot",
        }
    }

    /// Get all robots in validation order
    pub fn all() -> [Self; 5] {
        [Self::Yellow, Self::Red, Self::Green, Self::Blue, Self::Silver]
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Robot {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|robot| robot.as_str() == s)
            .ok_or_else(|| TaskError::InvalidRobot(s.to_string()))
    }
}

impl From<Robot> for &'static str {
    fn from(robot: Robot) -> Self {
        robot.as_str()
    }
}

impl TryFrom<String> for Robot {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Starting coordinates of the robots
///
/// The silver robot is optional; [`Coordinate::SENTINEL`] means it is not
/// in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robots {
    pub yellow: Coordinate,
    pub red: Coordinate,
    pub green: Coordinate,
    pub blue: Coordinate,
    pub silver: Coordinate,
}

impl Default for Robots {
    fn default() -> Self {
        Self {
            yellow: DEFAULT_YELLOW,
            red: DEFAULT_RED,
            green: DEFAULT_GREEN,
            blue: DEFAULT_BLUE,
            silver: DEFAULT_SILVER,
        }
    }
}

impl Robots {
    /// Whether the silver robot is in play
    #[must_use]
    pub fn has_silver(&self) -> bool {
        !self.silver.is_sentinel()
    }

    /// Position of a robot, `None` for an absent silver robot
    pub fn get(&self, robot: Robot) -> Option<Coordinate> {
        match robot {
            Robot::Yellow => Some(self.yellow),
            Robot::Red => Some(self.red),
            Robot::Green => Some(self.green),
            Robot::Blue => Some(self.blue),
            Robot::Silver => self.has_silver().then_some(self.silver),
        }
    }

    /// Robots in play with their positions, in validation order
    pub fn active(&self) -> impl Iterator<Item = (Robot, Coordinate)> + '_ {
        Robot::all()
            .into_iter()
            .filter_map(move |robot| self.get(robot).map(|coord| (robot, coord)))
    }

    /// Validate the robot positions against a board
    ///
    /// For each robot in play, in order: the position must be a valid board
    /// coordinate, must not carry a symbol when `check_robot_on_symbol` is
    /// set, and must not be taken by an earlier robot.
    pub fn check<B: Board + ?Sized>(&self, board: &B, check_robot_on_symbol: bool) -> Result<()> {
        let mut taken = HashSet::new();
        for (robot, coord) in self.active() {
            if !board.is_valid_coordinate(coord) {
                return Err(TaskError::InvalidRobotPosition(coord));
            }
            if check_robot_on_symbol {
                if let Some(symbol) = board.field(coord).symbol {
                    return Err(TaskError::RobotOnSymbol { robot: coord, symbol });
                }
            }
            if !taken.insert(coord) {
                return Err(TaskError::DuplicateRobotPosition(coord));
            }
            tracing::trace!(robot = %robot, position = %coord, "Robot position accepted");
        }
        Ok(())
    }
}
