//! Input state handed to the simulation once per frame.
//! Kept free of any windowing types so the simulation can be driven from tests.

use bevy::math::Vec2;
use hashbrown::HashSet;
use itertools::iproduct;
use strum_macros::{Display, EnumIter};

use super::util::vectors::CellVector;

/// The biggest brush, in cells per side
pub const MAX_BRUSH_SIZE: u8 = 8;

/// Where the pointer is and whether the primary button is held
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Window pixels with the origin at the top left, None when outside the window
    pub position: Option<Vec2>,
    pub primary_down: bool,
}

impl PointerState {
    pub fn pressed_at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            primary_down: true,
        }
    }
    pub fn released() -> Self {
        Self::default()
    }
}

/// The actions a key can be bound to
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ControlKey {
    /// Remove every particle
    Clear,
    BrushGrow,
    BrushShrink,
    PaintMode,
    EraseMode,
}

/// The keys newly pressed this frame
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct KeyState {
    just_pressed: HashSet<ControlKey>,
}

impl KeyState {
    pub fn press(&mut self, key: ControlKey) {
        self.just_pressed.insert(key);
    }
    pub fn just_pressed(&self, key: ControlKey) -> bool {
        self.just_pressed.contains(&key)
    }
    pub fn is_empty(&self) -> bool {
        self.just_pressed.is_empty()
    }
    pub fn clear(&mut self) {
        self.just_pressed.clear();
    }
}

impl FromIterator<ControlKey> for KeyState {
    fn from_iter<I: IntoIterator<Item = ControlKey>>(iter: I) -> Self {
        Self {
            just_pressed: iter.into_iter().collect(),
        }
    }
}

/// What holding the pointer down does
#[derive(Default, Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum BrushMode {
    #[default]
    Paint,
    Erase,
}

/// A square brush centred on the cell under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    size: u8,
    mode: BrushMode,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            size: 1,
            mode: BrushMode::default(),
        }
    }
}

impl Brush {
    /// Size is clamped to 1..=MAX_BRUSH_SIZE
    pub fn new(size: u8, mode: BrushMode) -> Self {
        Self {
            size: size.clamp(1, MAX_BRUSH_SIZE),
            mode,
        }
    }
    pub fn get_size(&self) -> u8 {
        self.size
    }
    pub fn get_mode(&self) -> BrushMode {
        self.mode
    }
    pub fn set_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
    }
    pub fn grow(&mut self) {
        self.size = (self.size + 1).min(MAX_BRUSH_SIZE);
    }
    pub fn shrink(&mut self) {
        self.size = self.size.saturating_sub(1).max(1);
    }
    /// Every cell the brush covers, row major, may include cells outside the grid
    /// An even sized brush leans up and to the left of the centre
    /// Cells that would overflow the coordinate type are left out
    pub fn footprint(&self, center: CellVector) -> impl Iterator<Item = CellVector> {
        let size = self.size as isize;
        let half = size / 2;
        iproduct!(-half..size - half, -half..size - half)
            .filter_map(move |(d_row, d_col)| center.checked_add(CellVector::new(d_col, d_row)))
    }
}
