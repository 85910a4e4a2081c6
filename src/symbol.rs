//! Target symbols and colors
//!
//! The vocabularies are closed sum types. Parsing a token is fallible,
//! formatting is total: every value has exactly one canonical token.
//!
//! | Type | Tokens |
//! |------|--------|
//! | [`Color`] | `yellow`, `red`, `green`, `blue` |
//! | [`Shape`] | `pyramid`, `star`, `moon`, `saturn` |
//! | [`Symbol`] | `yellowPyramid` .. `blueSaturn`, `cosmic` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaskError;

/// Color of a robot or a colored symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Color {
    Yellow,
    Red,
    Green,
    Blue,
}

impl Color {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Get all colors
    pub fn all() -> [Self; 4] {
        [Self::Yellow, Self::Red, Self::Green, Self::Blue]
    }
}

impl FromStr for Color {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| TaskError::InvalidColor(s.to_string()))
    }
}

/// Shape of a colored symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Shape {
    Pyramid,
    Star,
    Moon,
    Saturn,
}

impl Shape {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pyramid => "pyramid",
            Self::Star => "star",
            Self::Moon => "moon",
            Self::Saturn => "saturn",
        }
    }

    /// Get all shapes
    pub fn all() -> [Self; 4] {
        [Self::Pyramid, Self::Star, Self::Moon, Self::Saturn]
    }
}

impl FromStr for Shape {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| TaskError::InvalidShape(s.to_string()))
    }
}

/// A target symbol: a colored shape or the universal cosmic target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Symbol {
    Colored { color: Color, shape: Shape },
    Cosmic,
}

impl Symbol {
    pub const fn colored(color: Color, shape: Shape) -> Self {
        Self::Colored { color, shape }
    }

    /// Get the canonical token
    pub fn as_str(&self) -> &'static str {
        use Color::*;
        use Shape::*;

        match self {
            Self::Colored { color, shape } => match (color, shape) {
                (Yellow, Pyramid) => "yellowPyramid",
                (Yellow, Star) => "yellowStar",
                (Yellow, Moon) => "yellowMoon",
                (Yellow, Saturn) => "yellowSaturn",
                (Red, Pyramid) => "redPyramid",
                (Red, Star) => "redStar",
                (Red, Moon) => "redMoon",
                (Red, Saturn) => "redSaturn",
                (Green, Pyramid) => "greenPyramid",
                (Green, Star) => "greenStar",
                (Green, Moon) => "greenMoon",
                (Green, Saturn) => "greenSaturn",
                (Blue, Pyramid) => "bluePyramid",
                (Blue, Star) => "blueStar",
                (Blue, Moon) => "blueMoon",
                (Blue, Saturn) => "blueSaturn",
            },
            Self::Cosmic => "cosmic",
        }
    }

    /// Color of the symbol, `None` for cosmic
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Colored { color, .. } => Some(*color),
            Self::Cosmic => None,
        }
    }

    /// Shape of the symbol, `None` for cosmic
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Colored { shape, .. } => Some(*shape),
            Self::Cosmic => None,
        }
    }

    pub fn shape_str(&self) -> &'static str {
        self.shape().map_or("cosmic", |shape| shape.as_str())
    }

    pub fn color_str(&self) -> &'static str {
        self.color().map_or("any", |color| color.as_str())
    }

    /// Get all symbols, colored ones grouped by color, cosmic last
    pub fn all() -> Vec<Self> {
        Color::all()
            .into_iter()
            .flat_map(|color| Shape::all().into_iter().map(move |shape| Self::colored(color, shape)))
            .chain(std::iter::once(Self::Cosmic))
            .collect()
    }
}

impl FromStr for Symbol {
    type Err = TaskError;

    /// Parse a canonical symbol token
    ///
    /// # Examples
    ///
    /// ```
    /// use ricrob_task::symbol::{Color, Shape, Symbol};
    ///
    /// let symbol: Symbol = "redMoon".parse().unwrap();
    /// assert_eq!(symbol, Symbol::colored(Color::Red, Shape::Moon));
    /// assert_eq!("cosmic".parse::<Symbol>().unwrap(), Symbol::Cosmic);
    /// assert!("RedMoon".parse::<Symbol>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|symbol| symbol.as_str() == s)
            .ok_or_else(|| TaskError::InvalidSymbol(s.to_string()))
    }
}

macro_rules! token_conversions {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.as_str()
            }
        }

        impl TryFrom<String> for $ty {
            type Error = TaskError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    )*};
}

token_conversions!(Color, Shape, Symbol);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_symbol_vocabulary_size() {
        let all = Symbol::all();
        assert_eq!(all.len(), 17);
        assert_eq!(all.last(), Some(&Symbol::Cosmic));
    }

    #[test]
    fn test_symbol_tokens_round_trip() {
        for symbol in Symbol::all() {
            assert_eq!(symbol.as_str().parse::<Symbol>().unwrap(), symbol);
        }
    }

    #[test]
    fn test_color_and_shape_round_trip() {
        for color in Color::all() {
            assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
        }
        for shape in Shape::all() {
            assert_eq!(shape.to_string().parse::<Shape>().unwrap(), shape);
        }
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(
            "purpleStar".parse::<Symbol>(),
            Err(TaskError::InvalidSymbol("purpleStar".to_string()))
        );
        assert_eq!("Cosmic".parse::<Symbol>(), Err(TaskError::InvalidSymbol("Cosmic".into())));
        assert_eq!("".parse::<Symbol>(), Err(TaskError::InvalidSymbol(String::new())));
        assert_eq!("silver".parse::<Color>(), Err(TaskError::InvalidColor("silver".into())));
        assert_eq!("cross".parse::<Shape>(), Err(TaskError::InvalidShape("cross".into())));
    }

    #[test]
    fn test_symbol_parts() {
        let symbol = Symbol::colored(Color::Green, Shape::Saturn);
        assert_eq!(symbol.to_string(), "greenSaturn");
        assert_eq!(symbol.color(), Some(Color::Green));
        assert_eq!(symbol.shape(), Some(Shape::Saturn));
        assert_eq!(Symbol::Cosmic.color(), None);
        assert_eq!(Symbol::Cosmic.shape_str(), "cosmic");
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&Symbol::colored(Color::Blue, Shape::Star)).unwrap();
        assert_eq!(json, "\"blueStar\"");

        let symbol: Symbol = serde_json::from_str("\"cosmic\"").unwrap();
        assert_eq!(symbol, Symbol::Cosmic);

        assert!(serde_json::from_str::<Symbol>("\"blue\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_only_vocabulary_parses(token in "[a-zA-Z]{0,14}") {
            let known = Symbol::all().iter().any(|symbol| symbol.as_str() == token);
            prop_assert_eq!(token.parse::<Symbol>().is_ok(), known);
        }
    }
}
