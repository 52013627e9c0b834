use ndarray::{Array2, Zip};

use crate::*;

/// Rendered view of every cell, indexed `[row, col]`.
pub type Snapshot = Array2<RenderedCell>;

/// Mine layout plus the player-visible state of each cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(MineLayout::from_config(config))
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    /// Uncovers one cell. Neighbouring zero cells are left alone and the
    /// previous state of the cell is not consulted.
    pub fn reveal(&mut self, position: Position) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(position)?;

        if self.mine_layout[coords] {
            log::debug!("Mine hit at {coords:?}");
            return Ok(RevealOutcome::HitMine);
        }

        let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
        self.cells[coords.to_nd_index()] = CellState::Revealed(adjacent_mines);
        Ok(RevealOutcome::Revealed(adjacent_mines))
    }

    /// Flags a cell as a mine, overwriting whatever it showed before.
    pub fn mark(&mut self, position: Position) -> Result<()> {
        self.set_cell(position, CellState::Marked)
    }

    /// Flags a cell as uncertain, overwriting whatever it showed before.
    pub fn guess(&mut self, position: Position) -> Result<()> {
        self.set_cell(position, CellState::Guessed)
    }

    fn set_cell(&mut self, position: Position, state: CellState) -> Result<()> {
        let coords = self.mine_layout.validate_coords(position)?;
        self.cells[coords.to_nd_index()] = state;
        Ok(())
    }

    /// Every safe cell is revealed.
    pub fn all_safe_revealed(&self) -> bool {
        Zip::from(self.mine_layout.mask())
            .and(&self.cells)
            .all(|&is_mine, &cell| is_mine || cell.is_revealed())
    }

    /// Every mine is marked.
    pub fn all_mines_marked(&self) -> bool {
        Zip::from(self.mine_layout.mask())
            .and(&self.cells)
            .all(|&is_mine, &cell| !is_mine || cell.is_marked())
    }

    pub fn is_won(&self) -> bool {
        self.all_safe_revealed() && self.all_mines_marked()
    }

    /// Display-ready copy of the board. Without fog of war, mined cells are
    /// flagged for distinct markup whatever their visible state.
    pub fn render(&self, fog_of_war: bool) -> Snapshot {
        Zip::from(&self.cells)
            .and(self.mine_layout.mask())
            .map_collect(|&state, &is_mine| RenderedCell {
                state,
                exposed_mine: !fog_of_war && is_mine,
            })
    }
}
