//! Validated task arguments
//!
//! [`Args`] is the only way configuration reaches a solver. It is built by
//! [`Args::from_params`] from any [`ParamSource`] and is immutable afterwards.
//!
//! # Example
//!
//! ```
//! use ricrob_task::args::Args;
//! use ricrob_task::board::Layout;
//!
//! let args = Args::from_query("ry=4,4&rs=5,5&ts=redStar", &Layout::default()).unwrap();
//! assert!(args.robots().has_silver());
//! assert_eq!(args.target().to_string(), "redStar");
//!
//! let err = Args::from_query("ttr=A1F", &Layout::default()).unwrap_err();
//! assert_eq!(err.to_string(), "duplicate tile A1F");
//! ```

use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use crate::board::BoardBuilder;
use crate::coordinate::Coordinate;
use crate::error::{Result, TaskError};
use crate::params::{self, FlagArgs, FlagParams, ParamSource, QueryParams};
use crate::robots::{self, Robots};
use crate::symbol::{Color, Shape, Symbol};
use crate::tiles::{self, Tiles};

/// Default target symbol token
pub const DEFAULT_TARGET_SYMBOL: &str = "cosmic";

/// Default of the robot on symbol check
pub const DEFAULT_CHECK_ROBOT_ON_SYMBOL: bool = true;

/// Validated arguments of a solver task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Args {
    tiles: Tiles,
    robots: Robots,
    target: Symbol,
    check_robot_on_symbol: bool,
}

impl Args {
    /// Read and validate arguments from a parameter source
    ///
    /// Validation order: tiles, robots against the board built from the
    /// tiles, then the target. The first failure is returned.
    pub fn from_params<P, B>(params: &P, builder: &B) -> Result<Self>
    where
        P: ParamSource + ?Sized,
        B: BoardBuilder + ?Sized,
    {
        let tiles = Tiles {
            top_left: params.get_or(params::TOP_LEFT_TILE, tiles::DEFAULT_TOP_LEFT),
            top_right: params.get_or(params::TOP_RIGHT_TILE, tiles::DEFAULT_TOP_RIGHT),
            bottom_left: params.get_or(params::BOTTOM_LEFT_TILE, tiles::DEFAULT_BOTTOM_LEFT),
            bottom_right: params.get_or(params::BOTTOM_RIGHT_TILE, tiles::DEFAULT_BOTTOM_RIGHT),
        };
        tiles.check()?;

        let check_robot_on_symbol = match params.get(params::CHECK_ROBOT_ON_SYMBOL) {
            Some(value) => params::parse_bool(params::CHECK_ROBOT_ON_SYMBOL, &value)?,
            None => DEFAULT_CHECK_ROBOT_ON_SYMBOL,
        };

        let robots = Robots {
            yellow: coordinate(params, params::YELLOW_ROBOT, robots::DEFAULT_YELLOW)?,
            red: coordinate(params, params::RED_ROBOT, robots::DEFAULT_RED)?,
            green: coordinate(params, params::GREEN_ROBOT, robots::DEFAULT_GREEN)?,
            blue: coordinate(params, params::BLUE_ROBOT, robots::DEFAULT_BLUE)?,
            silver: coordinate(params, params::SILVER_ROBOT, robots::DEFAULT_SILVER)?,
        };
        let board = builder.build(&tiles);
        robots.check(&board, check_robot_on_symbol)?;

        let target = resolve_target(
            &params.get_or(params::TARGET_SYMBOL, DEFAULT_TARGET_SYMBOL),
            params.get(params::TARGET_COLOR).as_deref(),
        )?;

        tracing::debug!(
            target = %target,
            silver = robots.has_silver(),
            check_robot_on_symbol,
            "Task arguments validated"
        );

        Ok(Self {
            tiles,
            robots,
            target,
            check_robot_on_symbol,
        })
    }

    /// Build from command line flags with an environment fallback
    pub fn from_flags<B>(flags: FlagArgs, env: HashMap<String, String>, builder: &B) -> Result<Self>
    where
        B: BoardBuilder + ?Sized,
    {
        Self::from_params(&FlagParams::with_env(flags, env), builder)
    }

    /// Build from the query parameters of a URL
    pub fn from_url<B>(url: &Url, builder: &B) -> Result<Self>
    where
        B: BoardBuilder + ?Sized,
    {
        Self::from_params(&QueryParams::from_url(url), builder)
    }

    /// Build from a raw query string
    pub fn from_query<B>(query: &str, builder: &B) -> Result<Self>
    where
        B: BoardBuilder + ?Sized,
    {
        Self::from_params(&QueryParams::from_query(query), builder)
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn robots(&self) -> &Robots {
        &self.robots
    }

    pub fn target(&self) -> Symbol {
        self.target
    }

    pub fn check_robot_on_symbol(&self) -> bool {
        self.check_robot_on_symbol
    }

    /// Parameter names and raw values reproducing these arguments
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (params::TOP_LEFT_TILE, self.tiles.top_left.clone()),
            (params::TOP_RIGHT_TILE, self.tiles.top_right.clone()),
            (params::BOTTOM_LEFT_TILE, self.tiles.bottom_left.clone()),
            (params::BOTTOM_RIGHT_TILE, self.tiles.bottom_right.clone()),
            (params::YELLOW_ROBOT, self.robots.yellow.to_string()),
            (params::RED_ROBOT, self.robots.red.to_string()),
            (params::GREEN_ROBOT, self.robots.green.to_string()),
            (params::BLUE_ROBOT, self.robots.blue.to_string()),
            (params::SILVER_ROBOT, self.robots.silver.to_string()),
            (params::TARGET_SYMBOL, self.target.to_string()),
            (params::CHECK_ROBOT_ON_SYMBOL, self.check_robot_on_symbol.to_string()),
        ]
    }

    /// Command line arguments reproducing these arguments, for launching a
    /// solver process
    ///
    /// ```
    /// use ricrob_task::args::Args;
    /// use ricrob_task::board::Layout;
    ///
    /// let args = Args::from_query("", &Layout::default()).unwrap();
    /// let cmd = args.cmd_args();
    /// assert_eq!(cmd[0], "--ttl=A1F");
    /// assert!(cmd.contains(&"--rs=-1,-1".to_string()));
    /// ```
    pub fn cmd_args(&self) -> Vec<String> {
        self.to_pairs()
            .into_iter()
            .map(|(name, value)| format!("--{name}={value}"))
            .collect()
    }

    /// URL query string reproducing these arguments
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_pairs())
            .finish()
    }
}

fn coordinate<P>(params: &P, name: &str, default: Coordinate) -> Result<Coordinate>
where
    P: ParamSource + ?Sized,
{
    match params.get(name) {
        Some(value) => value.parse(),
        None => Ok(default),
    }
}

/// Resolve the target from the `ts` and `tc` raw values
///
/// `ts` is either a symbol token or a bare shape that needs `tc`. With a
/// compound symbol `tc` is optional but must agree; with `cosmic` it is
/// ignored. An empty `tc` counts as absent.
pub fn resolve_target(symbol: &str, color: Option<&str>) -> Result<Symbol> {
    let color = color.filter(|color| !color.is_empty());
    if let Ok(target) = symbol.parse::<Symbol>() {
        return match (target, color) {
            (Symbol::Colored { color: own, .. }, Some(given)) if own.as_str() != given => {
                Err(TaskError::TargetColorMismatch {
                    symbol: target,
                    color: given.to_string(),
                })
            }
            _ => Ok(target),
        };
    }

    let shape = symbol
        .parse::<Shape>()
        .map_err(|_| TaskError::InvalidSymbol(symbol.to_string()))?;
    let color = color.unwrap_or_default().parse::<Color>()?;
    Ok(Symbol::colored(color, shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;

    #[test]
    fn test_defaults() {
        let args = Args::from_query("", &Layout::default()).unwrap();
        assert_eq!(args.tiles(), &Tiles::default());
        assert_eq!(args.robots(), &Robots::default());
        assert_eq!(args.target(), Symbol::Cosmic);
        assert!(args.check_robot_on_symbol());
        assert!(!args.robots().has_silver());
    }

    #[test]
    fn test_resolve_target() {
        let yellow_star = Symbol::colored(Color::Yellow, Shape::Star);
        assert_eq!(resolve_target("cosmic", None), Ok(Symbol::Cosmic));
        assert_eq!(resolve_target("cosmic", Some("red")), Ok(Symbol::Cosmic));
        assert_eq!(resolve_target("yellowStar", None), Ok(yellow_star));
        assert_eq!(resolve_target("yellowStar", Some("yellow")), Ok(yellow_star));
        assert_eq!(resolve_target("star", Some("yellow")), Ok(yellow_star));
        assert_eq!(
            resolve_target("yellowStar", Some("red")),
            Err(TaskError::TargetColorMismatch {
                symbol: yellow_star,
                color: "red".to_string()
            })
        );
        assert_eq!(resolve_target("star", None), Err(TaskError::InvalidColor(String::new())));
        assert_eq!(resolve_target("star", Some("")), Err(TaskError::InvalidColor(String::new())));
        assert_eq!(
            resolve_target("star", Some("pink")),
            Err(TaskError::InvalidColor("pink".to_string()))
        );
        assert_eq!(
            resolve_target("triangle", None),
            Err(TaskError::InvalidSymbol("triangle".to_string()))
        );
    }

    #[test]
    fn test_empty_target_color_is_absent() {
        let args = Args::from_query("ts=redMoon&tc=", &Layout::default()).unwrap();
        assert_eq!(args.target(), Symbol::colored(Color::Red, Shape::Moon));

        let args = Args::from_query("ts=cosmic&tc=", &Layout::default()).unwrap();
        assert_eq!(args.target(), Symbol::Cosmic);
    }

    #[test]
    fn test_invalid_crs() {
        assert_eq!(
            Args::from_query("crs=maybe", &Layout::default()),
            Err(TaskError::invalid_bool("crs", "maybe"))
        );
    }

    #[test]
    fn test_bad_coordinate_text() {
        assert!(matches!(
            Args::from_query("rr=1", &Layout::default()),
            Err(TaskError::InvalidCoordinateFormat(_))
        ));
        assert!(matches!(
            Args::from_query("rr=1,300", &Layout::default()),
            Err(TaskError::InvalidCoordinateY { .. })
        ));
    }

    #[test]
    fn test_tiles_checked_before_robots() {
        assert_eq!(
            Args::from_query("ttl=A9F&ry=-1,0", &Layout::default()),
            Err(TaskError::InvalidTile("A9F".to_string()))
        );
    }

    #[test]
    fn test_robots_checked_before_target() {
        assert_eq!(
            Args::from_query("ry=-1,0&ts=nothing", &Layout::default()),
            Err(TaskError::InvalidRobotPosition(Coordinate::new(-1, 0)))
        );
    }

    #[test]
    fn test_query_round_trip() {
        let args = Args::from_query(
            "ttl=B1B&ttr=A2F&tbl=B4F&tbr=A3B&ry=5,5&rr=6,6&rg=9,9&rb=10,10&rs=0,15&ts=star&tc=green&crs=0",
            &Layout::default(),
        )
        .unwrap();
        assert_eq!(args.target(), Symbol::colored(Color::Green, Shape::Star));
        assert!(!args.check_robot_on_symbol());

        let again = Args::from_query(&args.to_query(), &Layout::default()).unwrap();
        assert_eq!(again, args);
    }

    #[test]
    fn test_cmd_args_round_trip() {
        let args = Args::from_query("ry=4,1&rs=-1,-1&ts=blueMoon&crs=false", &Layout::default()).unwrap();

        let argv = std::iter::once("solver".to_string()).chain(args.cmd_args());
        let flags = FlagArgs::try_parse_from(argv).unwrap();
        let again = Args::from_flags(flags, HashMap::new(), &Layout::default()).unwrap();
        assert_eq!(again, args);
    }

    #[test]
    fn test_serialize() {
        let args = Args::from_query("rs=4,4", &Layout::default()).unwrap();
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["tiles"]["top_left"], "A1F");
        assert_eq!(json["robots"]["silver"], serde_json::json!({"x": 4, "y": 4}));
        assert_eq!(json["target"], "cosmic");
        assert_eq!(json["check_robot_on_symbol"], true);
    }
}
