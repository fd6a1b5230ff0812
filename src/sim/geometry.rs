//! Static level geometry
//!
//! Walls are axis-aligned rectangles derived once from a tile board and
//! never mutated afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let x1 = self.left().max(other.left());
        let y1 = self.top().max(other.top());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        x2 - x1 > 0.0 && y2 - y1 > 0.0
    }
}

/// Key/value property attached to a tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileProperty {
    pub name: String,
    pub value: String,
}

/// One board cell; negative index means empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub index: i32,
    #[serde(default)]
    pub properties: Vec<TileProperty>,
}

impl Tile {
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.index >= 0
    }
}

/// Parsed level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// Board width in tiles
    pub width: usize,
    /// Board height in tiles
    pub height: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    #[serde(rename = "tiles")]
    pub board: Vec<Vec<Tile>>,
}

impl LevelConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a config from a character grid (`#` solid, anything else empty)
    pub fn from_ascii(rows: &[&str], tile_width: u32, tile_height: u32) -> Self {
        let board: Vec<Vec<Tile>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| Tile {
                        index: if c == '#' { 0 } else { -1 },
                        properties: Vec::new(),
                    })
                    .collect()
            })
            .collect();
        Self {
            width: board.first().map_or(0, Vec::len),
            height: board.len(),
            tile_width,
            tile_height,
            board,
        }
    }

    /// Reject records that would silently produce wrong geometry
    pub fn validate(&self) -> Result<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(SimError::InvalidLevel(format!(
                "tile size must be positive, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if self.board.is_empty() {
            return Err(SimError::InvalidLevel("board has no rows".into()));
        }
        if self.board.len() != self.height {
            return Err(SimError::InvalidLevel(format!(
                "board has {} rows but height is {}",
                self.board.len(),
                self.height
            )));
        }
        if let Some((row, cells)) = self
            .board
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != self.width)
        {
            return Err(SimError::InvalidLevel(format!(
                "row {} has {} cells but width is {}",
                row,
                cells.len(),
                self.width
            )));
        }
        Ok(())
    }
}

/// Static wall geometry of the active level
#[derive(Debug, Clone, Default)]
pub struct Level {
    walls: Vec<Rect>,
    bounds: Vec2,
}

impl Level {
    /// One wall per solid cell at `(col * tile_width, row * tile_height)`
    pub fn from_config(config: &LevelConfig) -> Result<Self> {
        config.validate()?;

        let tw = config.tile_width as f32;
        let th = config.tile_height as f32;
        let walls: Vec<Rect> = config
            .board
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, tile)| tile.is_solid())
                    .map(move |(col, _)| Rect::new(col as f32 * tw, row as f32 * th, tw, th))
            })
            .collect();

        log::debug!(
            "Level {}x{} tiles built with {} walls",
            config.width,
            config.height,
            walls.len()
        );

        Ok(Self {
            walls,
            bounds: Vec2::new(config.width as f32 * tw, config.height as f32 * th),
        })
    }

    pub fn from_walls(walls: Vec<Rect>) -> Self {
        let bounds = walls
            .iter()
            .fold(Vec2::ZERO, |acc, w| acc.max(Vec2::new(w.right(), w.bottom())));
        Self { walls, bounds }
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    /// Pixel extent of the board
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn overlaps_any(&self, rect: &Rect) -> bool {
        self.walls.iter().any(|w| w.overlaps(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_walls_from_board() {
        let config = LevelConfig::from_ascii(&["#..", "..#"], 32, 16);
        let level = Level::from_config(&config).unwrap();
        assert_eq!(
            level.walls(),
            &[Rect::new(0.0, 0.0, 32.0, 16.0), Rect::new(64.0, 16.0, 32.0, 16.0)]
        );
        assert_eq!(level.bounds(), Vec2::new(96.0, 32.0));
    }

    #[test]
    fn test_level_json_format() {
        let json = r#"{
            "width": 2, "height": 1, "tileWidth": 32, "tileHeight": 32,
            "tiles": [[{ "index": 3, "properties": [] }, { "index": -1 }]]
        }"#;
        let config = LevelConfig::from_json(json).unwrap();
        let level = Level::from_config(&config).unwrap();
        assert_eq!(level.walls().len(), 1);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let mut config = LevelConfig::from_ascii(&["##", "#"], 32, 32);
        assert!(matches!(
            Level::from_config(&config),
            Err(SimError::InvalidLevel(_))
        ));

        config = LevelConfig::from_ascii(&["##"], 0, 32);
        assert!(Level::from_config(&config).is_err());

        config = LevelConfig::from_ascii(&[], 32, 32);
        assert!(Level::from_config(&config).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            LevelConfig::from_json(r#"{ "width": 2 }"#),
            Err(SimError::Json(_))
        ));
    }
}
