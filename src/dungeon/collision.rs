//! Walkability of a dungeon floor and spawn point search.

use crate::character::Position;
use crate::core::constants::{
    BOSS_SPAWN_POINT_ATTEMPTS, DUNGEON_SIZE, MIN_MAP_SIZE, PLAYER_SIZE, SPAWN_POINT_ATTEMPTS,
};
use rand::Rng;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum MapLoadError {
    #[error("failed to read collision map: {0}")]
    Io(#[from] std::io::Error),
    #[error("collision map is empty")]
    Empty,
    #[error("collision map row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("collision map size {size} is below the minimum of {min}")]
    TooSmall { size: i32, min: i32 },
}

/// Read-only view of which parts of a square dungeon can be walked on.
pub trait CollisionMap {
    /// Side length of the dungeon in world units.
    fn size(&self) -> i32;

    /// Whether a single world point is walkable. Out-of-range points are
    /// treated as walkable; callers clamp first.
    fn is_point_passable(&self, x: i32, y: i32) -> bool;

    /// Samples the four corners and four edge midpoints of the box,
    /// each clamped into the map.
    fn is_passable(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        let last = self.size() - 1;
        let points = [
            (x, y),
            (x + width - 1, y),
            (x, y + height - 1),
            (x + width - 1, y + height - 1),
            (x + width / 2, y),
            (x + width / 2, y + height - 1),
            (x, y + height / 2),
            (x + width - 1, y + height / 2),
        ];
        points
            .iter()
            .all(|&(px, py)| self.is_point_passable(px.clamp(0, last), py.clamp(0, last)))
    }

    /// Random walkable spot near the bottom of the map for the player.
    fn find_spawn_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position
    where
        Self: Sized,
    {
        let size = self.size();
        for _ in 0..SPAWN_POINT_ATTEMPTS {
            let x = rng.gen_range(100..=size - 150);
            let y = rng.gen_range(size - 300..=size - 100);
            if self.is_passable(x, y, PLAYER_SIZE, PLAYER_SIZE) {
                return Position::new(x, y);
            }
        }
        warn!("no walkable player spawn found, using default");
        Position::new(size / 2 - 24, size - 150)
    }

    /// Random walkable spot in the top quarter of the map for the boss.
    fn find_boss_spawn_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position
    where
        Self: Sized,
    {
        let size = self.size();
        for _ in 0..BOSS_SPAWN_POINT_ATTEMPTS {
            let x = rng.gen_range(100..=size - 150);
            let y = rng.gen_range(50..=size / 4);
            if self.is_passable(x, y, PLAYER_SIZE, PLAYER_SIZE) {
                return Position::new(x, y);
            }
        }
        warn!("no walkable boss spawn found, using default");
        Position::new(size / 2 - 24, 100)
    }
}

/// Occupancy grid built from a text mask. `#` marks a blocked cell, any
/// other character is floor. Each cell covers `size / columns` by
/// `size / rows` world units.
#[derive(Debug, Clone)]
pub struct CollisionGrid {
    size: i32,
    columns: usize,
    rows: usize,
    blocked: Vec<bool>,
}

impl CollisionGrid {
    /// A grid with no obstacles at all.
    pub fn open(size: i32) -> Result<Self, MapLoadError> {
        check_size(size)?;
        Ok(Self::open_unchecked(size))
    }

    /// Open grid of the standard dungeon size.
    pub fn open_default() -> Self {
        Self::open_unchecked(DUNGEON_SIZE)
    }

    fn open_unchecked(size: i32) -> Self {
        Self {
            size,
            columns: 1,
            rows: 1,
            blocked: vec![false],
        }
    }

    pub fn parse(mask: &str, size: i32) -> Result<Self, MapLoadError> {
        check_size(size)?;
        let lines: Vec<&str> = mask
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let columns = lines.first().map(|line| line.chars().count()).ok_or(MapLoadError::Empty)?;

        let mut blocked = Vec::with_capacity(columns * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(MapLoadError::Ragged {
                    row,
                    found,
                    expected: columns,
                });
            }
            blocked.extend(line.chars().map(|c| c == '#'));
        }

        Ok(Self {
            size,
            columns,
            rows: lines.len(),
            blocked,
        })
    }

    /// Parses a bundled mask, falling back to an open grid if it is malformed.
    pub fn from_mask_or_open(name: &str, mask: &str) -> Self {
        match Self::parse(mask, DUNGEON_SIZE) {
            Ok(grid) => {
                debug!(map = name, columns = grid.columns, rows = grid.rows, "collision map loaded");
                grid
            }
            Err(e) => {
                warn!(map = name, error = %e, "invalid collision map, everything is walkable");
                Self::open_default()
            }
        }
    }

    /// Reads a mask from disk. Any failure yields an open grid.
    pub fn load_or_open(path: &Path) -> Self {
        let loaded = fs::read_to_string(path)
            .map_err(MapLoadError::from)
            .and_then(|mask| Self::parse(&mask, DUNGEON_SIZE));
        match loaded {
            Ok(grid) => grid,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "collision map unavailable, everything is walkable");
                Self::open_default()
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.blocked.iter().all(|b| !b)
    }
}

/// Spawn searches sample fixed margins from the edges, so tiny maps have no
/// valid range to sample from.
fn check_size(size: i32) -> Result<(), MapLoadError> {
    if size < MIN_MAP_SIZE {
        return Err(MapLoadError::TooSmall {
            size,
            min: MIN_MAP_SIZE,
        });
    }
    Ok(())
}

impl CollisionMap for CollisionGrid {
    fn size(&self) -> i32 {
        self.size
    }

    fn is_point_passable(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.size || y >= self.size {
            return true;
        }
        let column = x as usize * self.columns / self.size as usize;
        let row = y as usize * self.rows / self.size as usize;
        !self.blocked[row * self.columns + column]
    }
}
