use core::ops::{Index, RangeInclusive};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use command::*;
pub use engine::*;
pub use error::*;
pub use seed::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod command;
mod engine;
mod error;
mod seed;
mod session;
mod tile;
mod types;

/// Allowed range for both the row and the column count.
pub const DIMENSION_RANGE: RangeInclusive<i64> = 5..=10;

/// Validated mine field description, the product of seed parsing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    size: Coord2,
    mine_positions: Vec<Coord2>,
}

impl BoardConfig {
    /// Builds a config under the same rules the seed loader enforces.
    pub fn new(rows: i64, cols: i64, mine_positions: &[(i64, i64)]) -> Result<Self, SeedError> {
        let size = check_dimensions(rows, cols)?;
        let count = i64::try_from(mine_positions.len()).unwrap_or(i64::MAX);
        check_mine_count(count, size)?;
        let mine_positions = mine_positions
            .iter()
            .map(|&(row, col)| check_mine_position(row, col, size))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            size,
            mine_positions,
        })
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    /// Declared mine count; duplicates in the seed are counted here.
    pub fn mine_count(&self) -> CellCount {
        CellCount::try_from(self.mine_positions.len()).unwrap_or(CellCount::MAX)
    }

    pub fn mine_positions(&self) -> &[Coord2] {
        &self.mine_positions
    }
}

pub(crate) fn check_dimensions(rows: i64, cols: i64) -> Result<Coord2, SeedError> {
    let malformed = || SeedError::MalformedDimensions { rows, cols };
    if !DIMENSION_RANGE.contains(&rows) || !DIMENSION_RANGE.contains(&cols) {
        return Err(malformed());
    }
    let rows = Coord::try_from(rows).map_err(|_| malformed())?;
    let cols = Coord::try_from(cols).map_err(|_| malformed())?;
    Ok((rows, cols))
}

pub(crate) fn check_mine_count(count: i64, size: Coord2) -> Result<CellCount, SeedError> {
    let max = i64::from(mult(size.0, size.1)) - 1;
    if !(1..=max).contains(&count) {
        return Err(SeedError::MalformedMineCount { count });
    }
    CellCount::try_from(count).map_err(|_| SeedError::MalformedMineCount { count })
}

pub(crate) fn check_mine_position(row: i64, col: i64, size: Coord2) -> Result<Coord2, SeedError> {
    let in_bounds = |value: i64, bound: Coord| (0..i64::from(bound)).contains(&value);
    if in_bounds(row, size.0) && in_bounds(col, size.1) {
        // both values are below a `Coord` bound here
        Ok((row as Coord, col as Coord))
    } else {
        Err(SeedError::MalformedMinePosition {
            row,
            col: Some(col),
        })
    }
}

/// Fixed placement of mines over the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for &coords in config.mine_positions() {
            if mine_mask[coords.to_nd_index()] {
                log::warn!("Duplicate mine at {coords:?} collapses into one");
            }
            mine_mask[coords.to_nd_index()] = true;
        }
        Self::from_mine_mask(mine_mask)
    }

    pub fn validate_coords(&self, position: Position) -> crate::Result<Coord2> {
        position
            .within(self.size())
            .ok_or(GameError::InvalidCoords {
                row: position.row,
                col: position.col,
            })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        )
    }

    /// Number of distinct mined cells.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self
            .mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count();
        // at most eight neighbours
        count as u8
    }

    pub(crate) fn mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was safe; carries its adjacent mine count.
    Revealed(u8),
    /// The cell held a mine, the game is lost.
    HitMine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_out_of_range_dimensions() {
        assert!(matches!(
            BoardConfig::new(4, 5, &[(0, 0)]),
            Err(SeedError::MalformedDimensions { rows: 4, cols: 5 })
        ));
        assert!(matches!(
            BoardConfig::new(5, 11, &[(0, 0)]),
            Err(SeedError::MalformedDimensions { .. })
        ));
        assert!(BoardConfig::new(10, 10, &[(9, 9)]).is_ok());
    }

    #[test]
    fn config_requires_at_least_one_safe_cell() {
        let full: Vec<_> = (0..5).flat_map(|r| (0..5).map(move |c| (r, c))).collect();
        assert!(matches!(
            BoardConfig::new(5, 5, &full),
            Err(SeedError::MalformedMineCount { count: 25 })
        ));
        assert!(BoardConfig::new(5, 5, &full[..24]).is_ok());
        assert!(matches!(
            BoardConfig::new(5, 5, &[]),
            Err(SeedError::MalformedMineCount { count: 0 })
        ));
    }

    #[test]
    fn config_rejects_mines_outside_the_grid() {
        assert!(matches!(
            BoardConfig::new(5, 6, &[(0, 6)]),
            Err(SeedError::MalformedMinePosition {
                row: 0,
                col: Some(6)
            })
        ));
        assert!(matches!(
            BoardConfig::new(5, 6, &[(-1, 0)]),
            Err(SeedError::MalformedMinePosition { .. })
        ));
    }

    #[test]
    fn duplicate_mines_collapse_in_layout() {
        let config = BoardConfig::new(5, 5, &[(1, 1), (1, 1), (2, 3)]).unwrap();
        let layout = MineLayout::from_config(&config);

        assert_eq!(config.mine_count(), 3);
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((1, 1)));
        assert!(layout.contains_mine((2, 3)));
    }

    #[test]
    fn adjacent_count_is_clipped_at_edges() {
        let config = BoardConfig::new(5, 5, &[(0, 0), (4, 4), (2, 2)]).unwrap();
        let layout = MineLayout::from_config(&config);

        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((4, 0)), 0);
        assert_eq!(layout.adjacent_mine_count((3, 3)), 2);
    }
}
