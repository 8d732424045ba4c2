use derive_more::{Add, Display, Sub};

/// My personal coordinate type for the sand grid
/// col is the horizontal axis, positive to the right
/// row is the vertical axis, positive downwards, row 0 is the top of the window
/// Signed so that positions left of or above the grid can still be described
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Add, Sub)]
#[display(fmt = "({}, {})", col, row)]
pub struct CellVector {
    pub col: isize,
    pub row: isize,
}

/// Convienient constants
impl CellVector {
    pub const ZERO: Self = Self { col: 0, row: 0 };
    pub const DOWN: Self = Self { col: 0, row: 1 };
    pub const DOWN_LEFT: Self = Self { col: -1, row: 1 };
    pub const DOWN_RIGHT: Self = Self { col: 1, row: 1 };
}

impl CellVector {
    pub fn new(col: isize, row: isize) -> Self {
        Self { col, row }
    }
    /// None if either axis overflows
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            col: self.col.checked_add(other.col)?,
            row: self.row.checked_add(other.row)?,
        })
    }
}

impl From<(isize, isize)> for CellVector {
    fn from((col, row): (isize, isize)) -> Self {
        Self { col, row }
    }
}
