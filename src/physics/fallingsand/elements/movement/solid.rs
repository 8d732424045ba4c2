use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::physics::fallingsand::{
    data::element_grid::ElementGrid, elements::element::Movement, util::vectors::CellVector,
};

/// The cells a falling solid may move into, in priority order
/// Declaration order is the tie break, down left always wins over down right
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum FallDirection {
    /// Straight down
    Down,
    /// One column left, one row down
    DownLeft,
    /// One column right, one row down
    DownRight,
}

impl FallDirection {
    /// The offset from the particle to the candidate cell
    pub fn offset(&self) -> CellVector {
        match self {
            FallDirection::Down => CellVector::DOWN,
            FallDirection::DownLeft => CellVector::DOWN_LEFT,
            FallDirection::DownRight => CellVector::DOWN_RIGHT,
        }
    }
}

/// Default solid element behavior
/// Move to the first candidate below that is in bounds and empty, otherwise stay
pub fn solid_process(element_grid: &ElementGrid, pos: CellVector) -> Movement {
    FallDirection::iter()
        .map(|direction| pos + direction.offset())
        .find(|candidate| element_grid.is_vacant(*candidate))
        .map_or(Movement::Stay, Movement::MoveTo)
}
