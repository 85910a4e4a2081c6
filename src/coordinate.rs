//! Board coordinates and their `"x,y"` text form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaskError;

/// Two dimensional board coordinate
///
/// Components fit a signed byte. Whether a coordinate is legal depends on
/// the board and is checked by [`crate::robots::Robots::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i8,
    pub y: i8,
}

impl Coordinate {
    /// Marks an optional robot as not in play
    pub const SENTINEL: Self = Self { x: -1, y: -1 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = TaskError;

    /// Parse `"x,y"`
    ///
    /// # Examples
    ///
    /// ```
    /// use ricrob_task::coordinate::Coordinate;
    ///
    /// let coord: Coordinate = "3,-1".parse().unwrap();
    /// assert_eq!(coord, Coordinate::new(3, -1));
    /// assert!("3".parse::<Coordinate>().is_err());
    /// assert!("128,0".parse::<Coordinate>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TaskError::InvalidCoordinateFormat(s.to_string()));
        };

        let x = x.parse::<i8>().map_err(|source| TaskError::InvalidCoordinateX {
            input: s.to_string(),
            source,
        })?;
        let y = y.parse::<i8>().map_err(|source| TaskError::InvalidCoordinateY {
            input: s.to_string(),
            source,
        })?;

        Ok(Self { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!("0,0".parse::<Coordinate>().unwrap(), Coordinate::new(0, 0));
        assert_eq!("15,7".parse::<Coordinate>().unwrap(), Coordinate::new(15, 7));
        assert_eq!("-1,-1".parse::<Coordinate>().unwrap(), Coordinate::SENTINEL);
        assert_eq!("+4,2".parse::<Coordinate>().unwrap(), Coordinate::new(4, 2));
    }

    #[test]
    fn test_parse_format_errors() {
        for input in ["", "1", "1,2,3", "1;2"] {
            assert!(
                matches!(
                    input.parse::<Coordinate>(),
                    Err(TaskError::InvalidCoordinateFormat(_))
                ),
                "expected format error for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_component_errors() {
        assert!(matches!(
            "a,1".parse::<Coordinate>(),
            Err(TaskError::InvalidCoordinateX { .. })
        ));
        assert!(matches!(
            "1,".parse::<Coordinate>(),
            Err(TaskError::InvalidCoordinateY { .. })
        ));
        assert!(matches!(
            "0,200".parse::<Coordinate>(),
            Err(TaskError::InvalidCoordinateY { .. })
        ));
        assert!(matches!(
            " 1,2".parse::<Coordinate>(),
            Err(TaskError::InvalidCoordinateX { .. })
        ));
    }

    #[test]
    fn test_sentinel() {
        assert!(Coordinate::SENTINEL.is_sentinel());
        assert!(!Coordinate::new(-1, 0).is_sentinel());
    }

    #[test]
    fn test_serialize_as_object() {
        let json = serde_json::to_value(Coordinate::new(2, 5)).unwrap();
        assert_eq!(json, serde_json::json!({"x": 2, "y": 5}));
    }

    proptest! {
        #[test]
        fn prop_text_round_trip(x in any::<i8>(), y in any::<i8>()) {
            let text = Coordinate::new(x, y).to_string();
            let parsed: Coordinate = text.parse().unwrap();
            prop_assert_eq!(parsed, Coordinate::new(x, y));
            prop_assert_eq!(parsed.to_string(), text);
        }
    }
}
