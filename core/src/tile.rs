use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Marked,
    Guessed,
    Revealed(u8),
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Marked)
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Hidden => ' ',
            Self::Marked => 'F',
            Self::Guessed => '?',
            Self::Revealed(count) => (b'0' + count) as char,
        }
    }
}

/// One cell of a rendered board snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedCell {
    pub state: CellState,
    /// Set only when fog of war is off and the cell holds a mine.
    pub exposed_mine: bool,
}

impl RenderedCell {
    pub const fn glyph(self) -> char {
        self.state.glyph()
    }
}
