//! The simulation owns the element grid and advances it one tick at a time.
//!
//! A frame is, in order: [`Simulation::handle_controls`], [`Simulation::update`], then the
//! renderer reads [`Simulation::render_snapshot`]. Pacing and the frame loop itself belong
//! to whoever drives the simulation.
#![warn(missing_docs)]

use bevy::log::{debug, info, trace, warn};
use derive_more::{Add, AddAssign, Display, From, Into};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum_macros::Display as StrumDisplay;
use thiserror::Error;

use super::controls::{Brush, BrushMode, ControlKey, KeyState, PointerState, MAX_BRUSH_SIZE};
use super::data::element_grid::{ElementGrid, GridSnapshot};
use super::elements::element::{Movement, Particle};
use super::util::functions::pixel_to_cell;
use super::util::grid::GridOutOfBoundsError;
use super::util::vectors::CellVector;

/// Everything that can go wrong talking to the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A coordinate outside the grid
    #[error(transparent)]
    OutOfBounds(#[from] GridOutOfBoundsError),
    /// The simulation could not be built from the given parameters
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}

/// The number of completed ticks
#[derive(
    Default, Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Add, AddAssign, From, Into,
)]
pub struct Tick(pub u64);

/// Idle between ticks, Sweeping while update runs
#[derive(Default, Debug, StrumDisplay, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Accepting input mutations
    #[default]
    Idle,
    /// A sweep is in progress
    Sweeping,
}

/// Builds a Simulation
/// Defaults to an 800x600 pixel window with 10 pixel cells
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    width_px: i32,
    height_px: i32,
    cell_size_px: i32,
    brush_size: u8,
    spawn_chance: f64,
    seed: u64,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Start here
    pub fn new() -> Self {
        Self {
            width_px: 800,
            height_px: 600,
            cell_size_px: 10,
            brush_size: 1,
            spawn_chance: 1.0,
            seed: 0,
        }
    }

    /// Window width in pixels
    pub fn width_px(mut self, width_px: i32) -> Self {
        self.width_px = width_px;
        self
    }

    /// Window height in pixels
    pub fn height_px(mut self, height_px: i32) -> Self {
        self.height_px = height_px;
        self
    }

    /// The side length of one cell in pixels
    pub fn cell_size_px(mut self, cell_size_px: i32) -> Self {
        self.cell_size_px = cell_size_px;
        self
    }

    /// The starting brush size in cells per side, 1..=MAX_BRUSH_SIZE
    pub fn brush_size(mut self, brush_size: u8) -> Self {
        self.brush_size = brush_size;
        self
    }

    /// Probability that a painted cell actually receives a particle
    pub fn spawn_chance(mut self, spawn_chance: f64) -> Self {
        self.spawn_chance = spawn_chance;
        self
    }

    /// Seed for the brush's random number generator
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the parameters and creates an empty simulation
    pub fn build(self) -> Result<Simulation, SimulationError> {
        if self.cell_size_px <= 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "cell size must be positive, got {}",
                self.cell_size_px
            )));
        }
        if self.width_px <= 0 || self.height_px <= 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "window must have a positive size, got {}x{}",
                self.width_px, self.height_px
            )));
        }
        let width_cells = (self.width_px / self.cell_size_px) as usize;
        let height_cells = (self.height_px / self.cell_size_px) as usize;
        if width_cells == 0 || height_cells == 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "a {}px cell does not fit in a {}x{} window",
                self.cell_size_px, self.width_px, self.height_px
            )));
        }
        if !(1..=MAX_BRUSH_SIZE).contains(&self.brush_size) {
            return Err(SimulationError::InvalidConfig(format!(
                "brush size must be between 1 and {}, got {}",
                MAX_BRUSH_SIZE, self.brush_size
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(SimulationError::InvalidConfig(format!(
                "spawn chance must be between 0 and 1, got {}",
                self.spawn_chance
            )));
        }

        info!(
            "Creating simulation with {}x{} cells of {}px",
            width_cells, height_cells, self.cell_size_px
        );
        Ok(Simulation {
            element_grid: ElementGrid::new_empty(width_cells, height_cells),
            cell_size_px: self.cell_size_px as u32,
            brush: Brush::new(self.brush_size, BrushMode::default()),
            spawn_chance: self.spawn_chance,
            rng: StdRng::seed_from_u64(self.seed),
            state: SimulationState::Idle,
            tick: Tick::default(),
        })
    }
}

/// A falling sand cellular automaton
/// Each cell holds at most one particle, which the mutation API enforces
#[derive(Debug, Clone)]
pub struct Simulation {
    element_grid: ElementGrid,
    cell_size_px: u32,
    brush: Brush,
    spawn_chance: f64,
    rng: StdRng,
    state: SimulationState,
    tick: Tick,
}

/* Initialization */
impl Simulation {
    /// Derives the grid size from the window size and cell size
    pub fn new(width_px: i32, height_px: i32, cell_size_px: i32) -> Result<Self, SimulationError> {
        SimulationBuilder::new()
            .width_px(width_px)
            .height_px(height_px)
            .cell_size_px(cell_size_px)
            .build()
    }
}

/* Getters */
impl Simulation {
    /// Read only view of the live grid, do not hold it across a tick
    pub fn get_element_grid(&self) -> &ElementGrid {
        &self.element_grid
    }
    /// The side length of one cell in pixels
    pub fn get_cell_size_px(&self) -> u32 {
        self.cell_size_px
    }
    /// Grid width in cells
    pub fn get_width_cells(&self) -> usize {
        self.element_grid.get_width()
    }
    /// Grid height in cells
    pub fn get_height_cells(&self) -> usize {
        self.element_grid.get_height()
    }
    /// The brush the pointer paints with
    pub fn get_brush(&self) -> &Brush {
        &self.brush
    }
    /// Idle unless called from inside a sweep
    pub fn get_state(&self) -> SimulationState {
        self.state
    }
    /// Number of completed calls to update
    pub fn tick(&self) -> Tick {
        self.tick
    }
    /// Number of particles on the grid
    pub fn particle_count(&self) -> usize {
        self.element_grid.get_num_particles()
    }
    /// Number of particles that are not settled
    pub fn active_particle_count(&self) -> usize {
        self.element_grid.get_num_active()
    }
    /// The particle at the coordinate, None for an empty cell
    pub fn get_particle(&self, pos: CellVector) -> Result<Option<Particle>, SimulationError> {
        Ok(self.element_grid.get(pos)?)
    }
    /// A copy of the grid for the renderer, taken after update
    pub fn render_snapshot(&self) -> GridSnapshot {
        self.element_grid.snapshot()
    }
}

/// The mutation API
impl Simulation {
    /// Adds a sand particle to an empty cell
    /// Returns false without touching the grid when the cell is already occupied
    pub fn add_particle(&mut self, pos: CellVector) -> Result<bool, SimulationError> {
        debug_assert_eq!(self.state, SimulationState::Idle);
        Ok(self.element_grid.insert(pos)?)
    }

    /// Removes the particle in the cell
    /// Returns false when the cell was already empty, only out of bounds is an error
    pub fn remove_particle(&mut self, pos: CellVector) -> Result<bool, SimulationError> {
        debug_assert_eq!(self.state, SimulationState::Idle);
        Ok(self.element_grid.remove(pos)?.is_some())
    }

    /// Removes every particle, returning how many there were
    pub fn clear(&mut self) -> usize {
        let removed = self.element_grid.clear();
        debug!("Cleared {} particles", removed);
        removed
    }

    /// Applies one frame of input, call once per frame before update
    /// Key presses are applied before the pointer, so clear and paint in the
    /// same frame leaves only the new paint
    pub fn handle_controls(&mut self, pointer: &PointerState, keys: &KeyState) {
        self.handle_keys(keys);

        if !pointer.primary_down {
            return;
        }
        let Some(position) = pointer.position else {
            return;
        };
        // NaN or infinite coordinates would cast to a real cell
        if !position.is_finite() {
            return;
        }
        let center = pixel_to_cell(position, self.cell_size_px);
        let brush = self.brush;
        for pos in brush.footprint(center) {
            // Pointers dragged past the window edge are ignored, not errors
            if !self.element_grid.in_bounds(pos) {
                continue;
            }
            let res = match brush.get_mode() {
                BrushMode::Paint => {
                    if !self.roll_spawn() {
                        continue;
                    }
                    self.add_particle(pos)
                }
                BrushMode::Erase => self.remove_particle(pos),
            };
            if let Err(err) = res {
                warn!("Brush could not write to {}: {}", pos, err);
            }
        }
    }

    /// Mode and brush keys first, then clear
    fn handle_keys(&mut self, keys: &KeyState) {
        if keys.is_empty() {
            return;
        }
        if keys.just_pressed(ControlKey::PaintMode) {
            self.brush.set_mode(BrushMode::Paint);
            debug!("Brush mode: {}", self.brush.get_mode());
        }
        if keys.just_pressed(ControlKey::EraseMode) {
            self.brush.set_mode(BrushMode::Erase);
            debug!("Brush mode: {}", self.brush.get_mode());
        }
        if keys.just_pressed(ControlKey::BrushGrow) {
            self.brush.grow();
            debug!("Brush size: {}", self.brush.get_size());
        }
        if keys.just_pressed(ControlKey::BrushShrink) {
            self.brush.shrink();
            debug!("Brush size: {}", self.brush.get_size());
        }
        if keys.just_pressed(ControlKey::Clear) {
            self.clear();
        }
    }

    /// Whether a painted cell should get a particle this time
    fn roll_spawn(&mut self) -> bool {
        self.spawn_chance >= 1.0 || self.rng.gen_bool(self.spawn_chance)
    }
}

/// Handle processing
impl Simulation {
    /// Runs one full sweep of the grid and returns how many particles moved
    ///
    /// Rows are swept bottom to top, each row left to right. A particle only ever moves
    /// into the row below, which has already been swept, so nothing moves more than one
    /// cell per tick. Settled particles are skipped until a write nearby wakes them, and a
    /// row holding only settled particles is skipped without visiting its cells.
    pub fn update(&mut self) -> usize {
        debug_assert_eq!(self.state, SimulationState::Idle);
        self.state = SimulationState::Sweeping;

        let width = self.element_grid.get_width();
        let height = self.element_grid.get_height();
        let mut moved = 0;
        for row in (0..height).rev() {
            if !self.element_grid.row_has_active(row) {
                continue;
            }
            for col in 0..width {
                let pos = CellVector::new(col as isize, row as isize);
                let Some(particle) = self.element_grid.particle_at(pos) else {
                    continue;
                };
                if particle.is_settled() {
                    continue;
                }
                match particle
                    .get_type()
                    .get_rule()
                    .evaluate(&self.element_grid, pos)
                {
                    Movement::Stay => self.element_grid.settle(pos),
                    Movement::MoveTo(dest) => {
                        debug_assert_eq!(dest.row, pos.row + 1, "particles only fall one row");
                        self.element_grid.move_particle(pos, dest);
                        moved += 1;
                    }
                }
            }
        }

        self.state = SimulationState::Idle;
        self.tick += Tick(1);
        trace!(
            "Tick {}: {} moved, {} particles",
            self.tick,
            moved,
            self.element_grid.get_num_particles()
        );
        moved
    }

    /// One whole frame of simulation: input, then physics
    pub fn step(&mut self, pointer: &PointerState, keys: &KeyState) -> usize {
        self.handle_controls(pointer, keys);
        self.update()
    }
}
