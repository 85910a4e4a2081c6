//! Board lookups used by robot validation
//!
//! Validation only needs two answers from a board: whether a coordinate is
//! a legal robot position, and which symbol a cell carries. Both are behind
//! the [`Board`] trait so validation can run against any geometry.
//!
//! [`QuadrantBoard`] is the shipped implementation: a 16x16 board with a
//! forbidden 2x2 centre, whose symbol cells come from a [`Layout`].
//!
//! # Layout file
//!
//! Symbol cells are listed per tile code in tile local coordinates, as if
//! the tile lay in the top left quadrant. Local `(7,7)` touches the board
//! centre and cannot carry a symbol.
//!
//! ```toml
//! [tiles.A1F]
//! symbols = [
//!     { x = 1, y = 2, symbol = "redMoon" },
//!     { x = 6, y = 1, symbol = "cosmic" },
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::symbol::Symbol;
use crate::tiles::{Quadrant, TileCode, Tiles};

/// Number of cells along one board edge
pub const BOARD_SIZE: i8 = 16;

/// Number of cells along one tile edge
pub const TILE_SIZE: i8 = BOARD_SIZE / 2;

/// Content of a single board cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Field {
    pub symbol: Option<Symbol>,
}

/// Board capability consumed by validation
pub trait Board {
    /// Whether a robot may stand on the coordinate: on the board and outside
    /// the centre
    fn is_valid_coordinate(&self, coord: Coordinate) -> bool;

    /// Content of the cell at a valid coordinate
    fn field(&self, coord: Coordinate) -> Field;
}

/// Builds a board from the four tile codes
pub trait BoardBuilder {
    type Board: Board;

    fn build(&self, tiles: &Tiles) -> Self::Board;
}

/// Whether the coordinate lies inside the forbidden centre block
pub fn is_center(coord: Coordinate) -> bool {
    let lo = TILE_SIZE - 1;
    let hi = TILE_SIZE;
    (lo..=hi).contains(&coord.x) && (lo..=hi).contains(&coord.y)
}

/// Whether the coordinate lies on a 16x16 board
pub fn is_on_board(coord: Coordinate) -> bool {
    (0..BOARD_SIZE).contains(&coord.x) && (0..BOARD_SIZE).contains(&coord.y)
}

/// Map a tile local cell into its quadrant on the board
pub fn rotate_into(quadrant: Quadrant, local: Coordinate) -> Coordinate {
    let max = BOARD_SIZE - 1;
    let Coordinate { x, y } = local;
    match quadrant {
        Quadrant::TopLeft => Coordinate::new(x, y),
        Quadrant::TopRight => Coordinate::new(max - y, x),
        Quadrant::BottomRight => Coordinate::new(max - x, max - y),
        Quadrant::BottomLeft => Coordinate::new(y, max - x),
    }
}

/// Errors that can occur while loading a layout
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("failed to read layout file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layout file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid tile {0} in layout")]
    InvalidTile(String),

    #[error("cell {cell} of tile {tile} is outside the tile or at its center corner")]
    InvalidCell { tile: String, cell: Coordinate },

    #[error("duplicate symbol cell {cell} in tile {tile}")]
    DuplicateCell { tile: String, cell: Coordinate },
}

/// Symbol cell of a tile, in tile local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCell {
    pub x: i8,
    pub y: i8,
    pub symbol: Symbol,
}

impl SymbolCell {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Symbol cells of one tile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayout {
    #[serde(default)]
    pub symbols: Vec<SymbolCell>,
}

/// Symbol layouts of all known tiles
///
/// Tiles absent from the layout carry no symbols. The default layout is
/// empty, which reduces the board to its geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub tiles: HashMap<String, TileLayout>,
}

impl Layout {
    /// Load and validate a layout from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let layout: Self = toml::from_str(&content).map_err(|source| LayoutError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        layout.validate()?;
        tracing::debug!(path = %path.display(), tiles = layout.tiles.len(), "Layout loaded");
        Ok(layout)
    }

    /// Validate tile codes and symbol cells
    pub fn validate(&self) -> Result<(), LayoutError> {
        let corner = Coordinate::new(TILE_SIZE - 1, TILE_SIZE - 1);
        for (tile, tile_layout) in &self.tiles {
            if tile.parse::<TileCode>().is_err() {
                return Err(LayoutError::InvalidTile(tile.clone()));
            }

            let mut cells = HashSet::new();
            for cell in &tile_layout.symbols {
                let coord = cell.coordinate();
                let in_tile = (0..TILE_SIZE).contains(&coord.x) && (0..TILE_SIZE).contains(&coord.y);
                if !in_tile || coord == corner {
                    return Err(LayoutError::InvalidCell {
                        tile: tile.clone(),
                        cell: coord,
                    });
                }
                if !cells.insert(coord) {
                    return Err(LayoutError::DuplicateCell {
                        tile: tile.clone(),
                        cell: coord,
                    });
                }
            }
        }
        Ok(())
    }
}

impl BoardBuilder for Layout {
    type Board = QuadrantBoard;

    fn build(&self, tiles: &Tiles) -> QuadrantBoard {
        let mut symbols = HashMap::new();
        for quadrant in Quadrant::all() {
            let Some(tile_layout) = self.tiles.get(tiles.get(quadrant)) else {
                continue;
            };
            for cell in &tile_layout.symbols {
                symbols.insert(rotate_into(quadrant, cell.coordinate()), cell.symbol);
            }
        }
        QuadrantBoard { symbols }
    }
}

/// 16x16 board assembled from four rotated tiles
#[derive(Debug, Clone, Default)]
pub struct QuadrantBoard {
    symbols: HashMap<Coordinate, Symbol>,
}

impl QuadrantBoard {
    /// Number of cells carrying a symbol
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}

impl Board for QuadrantBoard {
    fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        is_on_board(coord) && !is_center(coord)
    }

    fn field(&self, coord: Coordinate) -> Field {
        Field {
            symbol: self.symbols.get(&coord).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Color, Shape};
    use std::io::Write;

    fn layout_with(tile: &str, cells: Vec<SymbolCell>) -> Layout {
        let mut layout = Layout::default();
        layout
            .tiles
            .insert(tile.to_string(), TileLayout { symbols: cells });
        layout
    }

    #[test]
    fn test_geometry() {
        let board = Layout::default().build(&Tiles::default());
        assert!(board.is_valid_coordinate(Coordinate::new(0, 0)));
        assert!(board.is_valid_coordinate(Coordinate::new(15, 15)));
        assert!(board.is_valid_coordinate(Coordinate::new(6, 7)));
        assert!(!board.is_valid_coordinate(Coordinate::new(-1, 0)));
        assert!(!board.is_valid_coordinate(Coordinate::new(16, 0)));
        assert!(!board.is_valid_coordinate(Coordinate::new(0, 16)));
        for (x, y) in [(7, 7), (7, 8), (8, 7), (8, 8)] {
            assert!(!board.is_valid_coordinate(Coordinate::new(x, y)));
        }
        assert_eq!(board.symbol_count(), 0);
    }

    #[test]
    fn test_rotation_maps_center_corner_to_center() {
        let corner = Coordinate::new(7, 7);
        for quadrant in Quadrant::all() {
            assert!(is_center(rotate_into(quadrant, corner)), "{quadrant:?}");
        }
        assert_eq!(rotate_into(Quadrant::TopRight, Coordinate::new(0, 0)), Coordinate::new(15, 0));
        assert_eq!(rotate_into(Quadrant::BottomRight, Coordinate::new(0, 0)), Coordinate::new(15, 15));
        assert_eq!(rotate_into(Quadrant::BottomLeft, Coordinate::new(0, 0)), Coordinate::new(0, 15));
    }

    #[test]
    fn test_symbols_follow_tile_quadrant() {
        let moon = Symbol::colored(Color::Red, Shape::Moon);
        let layout = layout_with("A2F", vec![SymbolCell { x: 1, y: 2, symbol: moon }]);

        // A2F sits top right by default
        let board = layout.build(&Tiles::default());
        assert_eq!(board.field(Coordinate::new(13, 1)).symbol, Some(moon));
        assert_eq!(board.field(Coordinate::new(1, 2)).symbol, None);

        let tiles = Tiles {
            top_left: "A2F".into(),
            top_right: "A1F".into(),
            ..Tiles::default()
        };
        let board = layout.build(&tiles);
        assert_eq!(board.field(Coordinate::new(1, 2)).symbol, Some(moon));
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        let cell = |x, y| SymbolCell { x, y, symbol: Symbol::Cosmic };

        assert!(matches!(
            layout_with("Z1F", vec![]).validate(),
            Err(LayoutError::InvalidTile(_))
        ));
        assert!(matches!(
            layout_with("A1F", vec![cell(8, 0)]).validate(),
            Err(LayoutError::InvalidCell { .. })
        ));
        assert!(matches!(
            layout_with("A1F", vec![cell(7, 7)]).validate(),
            Err(LayoutError::InvalidCell { .. })
        ));
        assert!(matches!(
            layout_with("A1F", vec![cell(1, 1), cell(1, 1)]).validate(),
            Err(LayoutError::DuplicateCell { .. })
        ));
        assert!(layout_with("A1F", vec![cell(1, 1), cell(2, 1)]).validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[tiles.A1F]
symbols = [
    {{ x = 1, y = 3, symbol = "yellowStar" }},
    {{ x = 6, y = 1, symbol = "cosmic" }},
]

[tiles.A3F]
"#
        )
        .unwrap();

        let layout = Layout::from_file(file.path()).unwrap();
        assert_eq!(layout.tiles.len(), 2);
        assert_eq!(layout.tiles["A1F"].symbols.len(), 2);
        assert!(layout.tiles["A3F"].symbols.is_empty());

        let board = layout.build(&Tiles::default());
        assert_eq!(
            board.field(Coordinate::new(1, 3)).symbol,
            Some(Symbol::colored(Color::Yellow, Shape::Star))
        );
        assert_eq!(board.symbol_count(), 2);
    }

    #[test]
    fn test_from_file_errors() {
        let missing = Layout::from_file(Path::new("/nonexistent/layout.toml"));
        assert!(matches!(missing, Err(LayoutError::Read { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tiles.A1F]\nsymbols = [{{ x = 1, y = 1, symbol = \"pinkStar\" }}]").unwrap();
        assert!(matches!(
            Layout::from_file(file.path()),
            Err(LayoutError::Parse { .. })
        ));
    }
}
