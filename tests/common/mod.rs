//! Common test utilities

use std::collections::HashMap;

use ricrob_task::board::{Layout, SymbolCell, TileLayout};
use ricrob_task::params::FlagArgs;
use ricrob_task::symbol::{Color, Shape, Symbol};

/// Parse flags as a solver process would receive them
pub fn flags(args: &[&str]) -> FlagArgs {
    FlagArgs::try_parse_from(std::iter::once("solver").chain(args.iter().copied()))
        .expect("flags should parse")
}

/// Environment map from pairs
#[allow(dead_code)]
pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Layout with a yellow star on A1F at (1,3) and a cosmic cell on A2F at (6,1)
///
/// With the default tiles these land on board cells (1,3) and (14,6).
#[allow(dead_code)]
pub fn sample_layout() -> Layout {
    let mut layout = Layout::default();
    layout.tiles.insert(
        "A1F".to_string(),
        TileLayout {
            symbols: vec![SymbolCell {
                x: 1,
                y: 3,
                symbol: Symbol::colored(Color::Yellow, Shape::Star),
            }],
        },
    );
    layout.tiles.insert(
        "A2F".to_string(),
        TileLayout {
            symbols: vec![SymbolCell {
                x: 6,
                y: 1,
                symbol: Symbol::Cosmic,
            }],
        },
    );
    layout
}
