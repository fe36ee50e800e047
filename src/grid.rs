//! Static tile grid the actors collide with.
//!
//! Anything outside `[0, width) × [0, height)` counts as empty, so the world
//! is open past its edges unless walled explicitly.

use thiserror::Error;
use tracing::debug;

use crate::entities::{Rect, Tile, Vec2i, TILE_SIZE};

/// Largest width or height a grid may have, in tiles.  Keeps tile counts and
/// pixel extents well inside `i32`.
pub const MAX_DIMENSION: i32 = 4096;

/// Layout the game starts with: `#` is a wall, `.` is empty.
pub const DEFAULT_LEVEL: [&str; 10] = [
    "..........",
    "..........",
    ".#..#.....",
    ".#.#.#....",
    "##########",
    "....#.....",
    "....#.....",
    "....#.....",
    "....#.....",
    "..........",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level layout has no rows")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
    #[error("level is {width}x{height} tiles, limit is {} per side", MAX_DIMENSION)]
    TooLarge { width: usize, height: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// An all-empty grid.  Each side is clamped to `0..=MAX_DIMENSION`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, MAX_DIMENSION);
        let height = height.clamp(0, MAX_DIMENSION);
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width as usize * height as usize],
        }
    }

    /// Parse an ASCII layout, one string per row.
    ///
    /// `#` is a wall; `.` and space are empty.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let first = rows.first().ok_or(LevelError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(LevelError::Empty);
        }
        let limit = MAX_DIMENSION as usize;
        if width > limit || rows.len() > limit {
            return Err(LevelError::TooLarge { width, height: rows.len() });
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow { row, expected: width, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' | ' ' => Tile::Empty,
                    _ => return Err(LevelError::UnknownTile { ch, row, col }),
                };
                tiles.push(tile);
            }
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
        })
    }

    pub fn default_level() -> Self {
        // DEFAULT_LEVEL is a fixed, well-formed table
        Self::from_rows(&DEFAULT_LEVEL).unwrap_or_else(|_| Self::new(10, 10))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The grid's extent in world pixels.
    pub fn boundary(&self) -> Rect {
        Rect::new(0, 0, self.width * TILE_SIZE, self.height * TILE_SIZE)
    }

    pub fn is_tile_inbounds(&self, tile: Vec2i) -> bool {
        0 <= tile.x && tile.x < self.width && 0 <= tile.y && tile.y < self.height
    }

    pub fn is_tile_empty(&self, tile: Vec2i) -> bool {
        self.tile(tile).map_or(true, |t| t == Tile::Empty)
    }

    /// Stored state at `tile`, or `None` when out of bounds.
    pub fn tile(&self, tile: Vec2i) -> Option<Tile> {
        self.index(tile).map(|i| self.tiles[i])
    }

    /// Level-editing path.  Out-of-bounds writes are ignored and return `false`.
    pub fn set_tile(&mut self, tile: Vec2i, state: Tile) -> bool {
        match self.index(tile) {
            Some(i) => {
                self.tiles[i] = state;
                debug!(x = tile.x, y = tile.y, ?state, "tile edited");
                true
            }
            None => false,
        }
    }

    /// Coordinates of every wall tile, row by row.
    pub fn walls(&self) -> impl Iterator<Item = Vec2i> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Tile::Wall)
            .map(move |(i, _)| Vec2i::new(i as i32 % width, i as i32 / width))
    }

    fn index(&self, tile: Vec2i) -> Option<usize> {
        if self.is_tile_inbounds(tile) {
            Some(tile.y as usize * self.width as usize + tile.x as usize)
        } else {
            None
        }
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::default_level()
    }
}
