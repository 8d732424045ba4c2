use strum_macros::{Display, EnumIter};

use super::sand::Sand;
use crate::physics::fallingsand::data::element_grid::ElementGrid;
use crate::physics::fallingsand::util::vectors::CellVector;

/// Every kind of particle that can occupy a cell
/// Only sand exists for now, but the grid never assumes that
#[derive(Default, Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ElementType {
    #[default]
    Sand,
}

impl ElementType {
    /// The rule that decides how this kind of particle moves
    pub fn get_rule(&self) -> &'static dyn UpdateRule {
        match self {
            ElementType::Sand => &Sand,
        }
    }
}

/// The outcome of evaluating a particle for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// No legal move, the particle stays where it is
    Stay,
    /// Move to this cell, which is guaranteed empty and in bounds
    MoveTo(CellVector),
}

/// Maps a particle's neighborhood to a move or stay decision
/// Implementations only read the grid, the simulation applies the decision
pub trait UpdateRule: Send + Sync {
    fn evaluate(&self, element_grid: &ElementGrid, pos: CellVector) -> Movement;
}

/// One occupied cell
/// Owned by the cell that holds it, moving a particle transfers it between cells
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Particle {
    kind: ElementType,
    /// Last evaluation found no legal move, skip until a neighbor changes
    settled: bool,
}

impl Particle {
    pub fn new(kind: ElementType) -> Self {
        Self {
            kind,
            settled: false,
        }
    }
    pub fn get_type(&self) -> ElementType {
        self.kind
    }
    pub fn is_settled(&self) -> bool {
        self.settled
    }
    pub fn set_settled(&mut self, settled: bool) {
        self.settled = settled;
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_new_particle_is_unsettled() {
        for kind in ElementType::iter() {
            let particle = Particle::new(kind);
            assert_eq!(particle.get_type(), kind);
            assert!(!particle.is_settled());
        }
    }

    #[test]
    fn test_default_is_sand() {
        assert_eq!(Particle::default().get_type(), ElementType::Sand);
        assert_eq!(ElementType::Sand.to_string(), "Sand");
    }
}
