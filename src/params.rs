//! Raw parameter sources
//!
//! Both entry points, command line flags and URL query strings, use the same
//! parameter names. Each is exposed through [`ParamSource`], so a single
//! validation routine ([`crate::args::Args::from_params`]) serves both.
//!
//! | Source | Precedence |
//! |--------|------------|
//! | [`FlagParams`] | flag > `RICROB_<NAME>` environment variable > default |
//! | [`QueryParams`] | query parameter > default |

use clap::Parser;
use std::collections::HashMap;
use std::ffi::OsString;
use url::Url;

use crate::error::{Result, TaskError};

/// Prefix of environment variables overriding flag defaults
pub const ENV_PREFIX: &str = "RICROB_";

// Parameter names
pub const TOP_LEFT_TILE: &str = "ttl";
pub const TOP_RIGHT_TILE: &str = "ttr";
pub const BOTTOM_LEFT_TILE: &str = "tbl";
pub const BOTTOM_RIGHT_TILE: &str = "tbr";

pub const YELLOW_ROBOT: &str = "ry";
pub const RED_ROBOT: &str = "rr";
pub const GREEN_ROBOT: &str = "rg";
pub const BLUE_ROBOT: &str = "rb";
pub const SILVER_ROBOT: &str = "rs";

pub const TARGET_SYMBOL: &str = "ts";
pub const TARGET_COLOR: &str = "tc";
pub const CHECK_ROBOT_ON_SYMBOL: &str = "crs";

/// All parameter names
pub const NAMES: [&str; 12] = [
    TOP_LEFT_TILE,
    TOP_RIGHT_TILE,
    BOTTOM_LEFT_TILE,
    BOTTOM_RIGHT_TILE,
    YELLOW_ROBOT,
    RED_ROBOT,
    GREEN_ROBOT,
    BLUE_ROBOT,
    SILVER_ROBOT,
    TARGET_SYMBOL,
    TARGET_COLOR,
    CHECK_ROBOT_ON_SYMBOL,
];

/// Environment variable overriding the default of a parameter
///
/// ```
/// assert_eq!(ricrob_task::params::env_var("ttl"), "RICROB_TTL");
/// ```
pub fn env_var(name: &str) -> String {
    format!("{ENV_PREFIX}{}", name.to_uppercase())
}

/// Pick the effective raw value of a parameter: flag, then environment,
/// then default
pub fn resolve<'a>(
    flag: Option<&'a str>,
    env: Option<&'a str>,
    default: Option<&'a str>,
) -> Option<&'a str> {
    flag.or(env).or(default)
}

/// Parse a boolean the way Go's `strconv.ParseBool` does
pub fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(TaskError::invalid_bool(name, value)),
    }
}

/// Key-value accessor over raw parameter values
pub trait ParamSource {
    /// Raw override for a parameter, `None` when the default applies
    fn get(&self, name: &str) -> Option<String>;

    /// Raw value of a parameter, falling back to `default`
    fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }
}

/// Command line flags, one long option per parameter
///
/// Values stay raw strings: parsing and validation happen once, in
/// [`crate::args::Args::from_params`].
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct FlagArgs {
    /// Top left tile [env: RICROB_TTL] [default: A1F]
    #[arg(long)]
    pub ttl: Option<String>,

    /// Top right tile [env: RICROB_TTR] [default: A2F]
    #[arg(long)]
    pub ttr: Option<String>,

    /// Bottom left tile [env: RICROB_TBL] [default: A4F]
    #[arg(long)]
    pub tbl: Option<String>,

    /// Bottom right tile [env: RICROB_TBR] [default: A3F]
    #[arg(long)]
    pub tbr: Option<String>,

    /// Yellow robot position x,y [env: RICROB_RY] [default: 0,0]
    #[arg(long, allow_hyphen_values = true)]
    pub ry: Option<String>,

    /// Red robot position x,y [env: RICROB_RR] [default: 1,0]
    #[arg(long, allow_hyphen_values = true)]
    pub rr: Option<String>,

    /// Green robot position x,y [env: RICROB_RG] [default: 2,0]
    #[arg(long, allow_hyphen_values = true)]
    pub rg: Option<String>,

    /// Blue robot position x,y [env: RICROB_RB] [default: 3,0]
    #[arg(long, allow_hyphen_values = true)]
    pub rb: Option<String>,

    /// Silver robot position x,y, -1,-1 if not in play [env: RICROB_RS] [default: -1,-1]
    #[arg(long, allow_hyphen_values = true)]
    pub rs: Option<String>,

    /// Target symbol like yellowPyramid or cosmic, or a bare shape with --tc [env: RICROB_TS] [default: cosmic]
    #[arg(long)]
    pub ts: Option<String>,

    /// Target color when --ts is a bare shape (yellow|red|green|blue) [env: RICROB_TC]
    #[arg(long)]
    pub tc: Option<String>,

    /// Check if robots sit on a symbol [env: RICROB_CRS] [default: true]
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub crs: Option<String>,
}

#[derive(Parser)]
#[command(about = "Robot puzzle solver task")]
struct FlagCommand {
    #[command(flatten)]
    flags: FlagArgs,
}

impl FlagArgs {
    /// Parse the process arguments; prints usage and exits on bad flags
    pub fn from_process_args() -> Self {
        FlagCommand::parse().flags
    }

    /// Parse an argument vector whose first item is the program name
    pub fn try_parse_from<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        FlagCommand::try_parse_from(args).map(|command| command.flags)
    }

    /// Value given on the command line for a parameter
    pub fn value(&self, name: &str) -> Option<&str> {
        let value = match name {
            TOP_LEFT_TILE => &self.ttl,
            TOP_RIGHT_TILE => &self.ttr,
            BOTTOM_LEFT_TILE => &self.tbl,
            BOTTOM_RIGHT_TILE => &self.tbr,
            YELLOW_ROBOT => &self.ry,
            RED_ROBOT => &self.rr,
            GREEN_ROBOT => &self.rg,
            BLUE_ROBOT => &self.rb,
            SILVER_ROBOT => &self.rs,
            TARGET_SYMBOL => &self.ts,
            TARGET_COLOR => &self.tc,
            CHECK_ROBOT_ON_SYMBOL => &self.crs,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Flags with environment variable fallback
#[derive(Debug, Clone, Default)]
pub struct FlagParams {
    flags: FlagArgs,
    env: HashMap<String, String>,
}

impl FlagParams {
    /// Use an explicit environment, keyed by variable name
    pub fn with_env(flags: FlagArgs, env: HashMap<String, String>) -> Self {
        Self { flags, env }
    }

    /// Snapshot the `RICROB_` variables of the process environment
    pub fn from_process_env(flags: FlagArgs) -> Result<Self> {
        Self::from_env_os(flags, std::env::vars_os())
    }

    /// Keep the `RICROB_` entries of a raw environment
    ///
    /// Other variables are skipped whatever their encoding; a `RICROB_`
    /// value that is not valid unicode is an error.
    pub fn from_env_os<I>(flags: FlagArgs, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = HashMap::new();
        for (key, value) in vars {
            let Some(key) = key.to_str().filter(|key| key.starts_with(ENV_PREFIX)) else {
                continue;
            };
            let value = value
                .into_string()
                .map_err(|_| TaskError::NonUnicodeEnv(key.to_string()))?;
            env.insert(key.to_string(), value);
        }
        Ok(Self { flags, env })
    }
}

impl ParamSource for FlagParams {
    fn get(&self, name: &str) -> Option<String> {
        let env = self.env.get(&env_var(name)).map(String::as_str);
        resolve(self.flags.value(name), env, None).map(str::to_string)
    }
}

/// URL query parameters
///
/// The first occurrence of a repeated key wins.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`)
    pub fn from_query(query: &str) -> Self {
        let mut values = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            values.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self { values }
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }
}

impl ParamSource for QueryParams {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}
