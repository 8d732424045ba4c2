use itertools::iproduct;

use crate::physics::fallingsand::elements::element::{ElementType, Particle};
use crate::physics::fallingsand::util::grid::{Grid, GridOutOfBoundsError};
use crate::physics::fallingsand::util::vectors::CellVector;

/// An element grid is the 2D store of cells the simulation runs on
/// Each cell holds at most one particle, None is an empty cell
#[derive(Clone, Debug, PartialEq)]
pub struct ElementGrid {
    grid: Grid<Option<Particle>>,

    /// Kept in step with every write so counting never needs a full scan
    num_particles: usize,

    /// Particles that are not settled, in total and per row
    /// Rows with none are skipped by the sweep without visiting their cells
    num_active: usize,
    active_per_row: Vec<usize>,
}

fn is_active(cell: &Option<Particle>) -> bool {
    matches!(cell, Some(particle) if !particle.is_settled())
}

/* Initialization */
impl ElementGrid {
    /// Creates a new element grid with every cell empty
    pub fn new_empty(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new_empty(width, height),
            num_particles: 0,
            num_active: 0,
            active_per_row: vec![0; height],
        }
    }
}

/* Getters */
impl ElementGrid {
    pub fn get_width(&self) -> usize {
        self.grid.get_width()
    }
    pub fn get_height(&self) -> usize {
        self.grid.get_height()
    }
    pub fn get_grid(&self) -> &Grid<Option<Particle>> {
        &self.grid
    }
    pub fn get_num_particles(&self) -> usize {
        self.num_particles
    }
    /// Number of particles that will be evaluated on the next sweep
    pub fn get_num_active(&self) -> usize {
        self.num_active
    }
    /// Whether any particle in the row will be evaluated on the next sweep
    pub fn row_has_active(&self, row: usize) -> bool {
        self.active_per_row.get(row).is_some_and(|count| *count > 0)
    }
    /// Every occupied coordinate, row major
    pub fn occupied_cells(&self) -> Vec<CellVector> {
        self.grid
            .indexed_iter()
            .filter(|(_, cell)| cell.is_some())
            .map(|(pos, _)| pos)
            .collect()
    }
}

/// Bounds checked access, the contract used by everything outside the sweep
impl ElementGrid {
    pub fn in_bounds(&self, pos: CellVector) -> bool {
        self.grid.in_bounds(pos)
    }
    /// In bounds and holding no particle
    pub fn is_vacant(&self, pos: CellVector) -> bool {
        matches!(self.grid.checked_get(pos), Ok(None))
    }
    pub fn get(&self, pos: CellVector) -> Result<Option<Particle>, GridOutOfBoundsError> {
        self.grid.checked_get(pos).copied()
    }
    /// Unconditionally overwrites the cell
    /// Check occupancy first when an existing particle must be preserved
    pub fn set(
        &mut self,
        pos: CellVector,
        particle: Option<Particle>,
    ) -> Result<(), GridOutOfBoundsError> {
        self.replace(pos, particle).map(|_| ())
    }
    /// Like set, but gives you ownership of the original value
    pub fn replace(
        &mut self,
        pos: CellVector,
        particle: Option<Particle>,
    ) -> Result<Option<Particle>, GridOutOfBoundsError> {
        let incoming = particle.is_some();
        let incoming_active = is_active(&particle);
        let previous = self.grid.checked_replace(pos, particle)?;
        match (previous.is_some(), incoming) {
            (false, true) => self.num_particles += 1,
            (true, false) => self.num_particles -= 1,
            _ => {}
        }
        if is_active(&previous) {
            self.mark_inactive(pos);
        }
        if incoming_active {
            self.mark_active(pos);
        }
        self.unsettle_neighborhood(pos);
        Ok(previous)
    }
    /// Puts a new default particle in the cell if it is empty
    /// Returns whether a particle was inserted, an occupied cell is left untouched
    pub fn insert(&mut self, pos: CellVector) -> Result<bool, GridOutOfBoundsError> {
        if self.get(pos)?.is_some() {
            return Ok(false);
        }
        self.set(pos, Some(Particle::new(ElementType::default())))?;
        Ok(true)
    }
    /// Empties the cell, returning the particle that was there if any
    pub fn remove(&mut self, pos: CellVector) -> Result<Option<Particle>, GridOutOfBoundsError> {
        if self.get(pos)?.is_none() {
            return Ok(None);
        }
        self.replace(pos, None)
    }
    /// Empties every occupied cell, returning how many particles were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.num_particles;
        for cell in self.grid.iter_mut() {
            *cell = None;
        }
        self.num_particles = 0;
        self.num_active = 0;
        self.active_per_row.fill(0);
        removed
    }
}

/// Sweep helpers
/// These are only called with coordinates the sweep already knows are in bounds,
/// so an out of bounds coordinate here is a bug and panics
impl ElementGrid {
    pub(crate) fn particle_at(&self, pos: CellVector) -> Option<Particle> {
        *self.grid.get(pos)
    }
    /// Mark the particle at pos as having no legal move
    pub(crate) fn settle(&mut self, pos: CellVector) {
        if let Some(particle) = self.grid.get_mut(pos) {
            if particle.is_settled() {
                return;
            }
            particle.set_settled(true);
            self.mark_inactive(pos);
        }
    }
    /// Transfers the particle at from into the empty cell at to
    pub(crate) fn move_particle(&mut self, from: CellVector, to: CellVector) {
        debug_assert!(self.grid.get(to).is_none(), "{} is already occupied", to);
        let particle = self.grid.replace(from, None);
        debug_assert!(particle.is_some(), "{} has nothing to move", from);
        let active = is_active(&particle);
        self.grid.set(to, particle);
        if active {
            self.mark_inactive(from);
            self.mark_active(to);
        }
        self.unsettle_neighborhood(from);
        self.unsettle_neighborhood(to);
    }
    /// Any write can open up a move for a settled neighbor, so wake up the whole 3x3 block
    pub(crate) fn unsettle_neighborhood(&mut self, pos: CellVector) {
        for (d_row, d_col) in iproduct!(-1..=1, -1..=1) {
            let neighbor = pos + CellVector::new(d_col, d_row);
            let woke = match self.grid.checked_get_mut(neighbor) {
                Some(Some(particle)) if particle.is_settled() => {
                    particle.set_settled(false);
                    true
                }
                _ => false,
            };
            if woke {
                self.mark_active(neighbor);
            }
        }
    }
    fn mark_active(&mut self, pos: CellVector) {
        self.num_active += 1;
        self.active_per_row[pos.row as usize] += 1;
    }
    fn mark_inactive(&mut self, pos: CellVector) {
        self.num_active -= 1;
        self.active_per_row[pos.row as usize] -= 1;
    }
}

/* Rendering */
impl ElementGrid {
    /// A copy of the current cells for the renderer
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            grid: self.grid.clone(),
            num_particles: self.num_particles,
        }
    }
}

/// A read only copy of the element grid taken between ticks
/// Never aliases the live grid, so it can be held while the simulation keeps running
#[derive(Clone, Debug, PartialEq)]
pub struct GridSnapshot {
    grid: Grid<Option<Particle>>,
    num_particles: usize,
}

impl GridSnapshot {
    pub fn get_width(&self) -> usize {
        self.grid.get_width()
    }
    pub fn get_height(&self) -> usize {
        self.grid.get_height()
    }
    pub fn get_num_particles(&self) -> usize {
        self.num_particles
    }
    /// Every occupied cell with its particle, row major
    pub fn iter_occupied(&self) -> impl Iterator<Item = (CellVector, Particle)> + '_ {
        self.grid
            .indexed_iter()
            .filter_map(|(pos, cell)| cell.as_ref().map(|particle| (pos, *particle)))
    }
}
