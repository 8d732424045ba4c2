use bevy::math::Vec2;

use super::vectors::CellVector;

/// Converts a position in window pixels (origin top left) to the cell under it
/// Uses floor division so positions left of or above the window land on negative cells
/// instead of being folded onto column or row 0
pub fn pixel_to_cell(pixel: Vec2, cell_size_px: u32) -> CellVector {
    let cell_size = cell_size_px as f32;
    CellVector::new(
        (pixel.x / cell_size).floor() as isize,
        (pixel.y / cell_size).floor() as isize,
    )
}

/// The pixel rectangle covered by a cell, as (top left corner, size)
pub fn cell_to_pixel_rect(cell: CellVector, cell_size_px: u32) -> (Vec2, Vec2) {
    let cell_size = cell_size_px as f32;
    (
        Vec2::new(cell.col as f32 * cell_size, cell.row as f32 * cell_size),
        Vec2::splat(cell_size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_cell() {
        assert_eq!(pixel_to_cell(Vec2::new(0.0, 0.0), 10), CellVector::new(0, 0));
        assert_eq!(pixel_to_cell(Vec2::new(9.9, 10.0), 10), CellVector::new(0, 1));
        assert_eq!(pixel_to_cell(Vec2::new(799.0, 599.0), 10), CellVector::new(79, 59));
    }

    #[test]
    fn test_pixel_to_cell_negative() {
        assert_eq!(pixel_to_cell(Vec2::new(-0.5, 3.0), 10), CellVector::new(-1, 0));
        assert_eq!(pixel_to_cell(Vec2::new(5.0, -11.0), 10), CellVector::new(0, -2));
    }

    #[test]
    fn test_cell_to_pixel_rect() {
        let (corner, size) = cell_to_pixel_rect(CellVector::new(2, 3), 10);
        assert_eq!(corner, Vec2::new(20.0, 30.0));
        assert_eq!(size, Vec2::new(10.0, 10.0));
    }
}
