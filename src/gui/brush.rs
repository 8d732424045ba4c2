use bevy::ecs::system::Res;
use bevy::gizmos::gizmos::Gizmos;
use bevy::math::Vec2;
use bevy::render::color::Color;

use crate::physics::fallingsand::controls::{Brush, BrushMode};
use crate::physics::fallingsand::util::functions::{cell_to_pixel_rect, pixel_to_cell};
use crate::physics::fallingsand::util::vectors::CellVector;

use super::camera::{pixel_to_world, WindowSize};
use super::controls::PendingControls;
use super::SandSimulation;

/// The pixel rectangle the brush covers, as (top left corner, size)
pub fn brush_pixel_rect(brush: &Brush, center: CellVector, cell_size_px: u32) -> (Vec2, Vec2) {
    let half = (brush.get_size() / 2) as isize;
    let (corner, _) = cell_to_pixel_rect(center - CellVector::new(half, half), cell_size_px);
    (corner, Vec2::splat((brush.get_size() as u32 * cell_size_px) as f32))
}

fn brush_color(mode: BrushMode) -> Color {
    match mode {
        BrushMode::Paint => Color::rgb_u8(212, 165, 106),
        BrushMode::Erase => Color::rgb_u8(255, 74, 106),
    }
}

/// Outline the cells the brush would paint
pub fn draw_brush_system(
    simulation: Res<SandSimulation>,
    pending: Res<PendingControls>,
    window_size: Res<WindowSize>,
    mut gizmos: Gizmos,
) {
    let Some(position) = pending.pointer.position else {
        return;
    };
    let simulation = &simulation.0;
    let cell_size = simulation.get_cell_size_px();
    let brush = simulation.get_brush();
    let (corner, size) = brush_pixel_rect(brush, pixel_to_cell(position, cell_size), cell_size);
    gizmos.rect_2d(
        pixel_to_world(corner + size / 2.0, window_size.0),
        0.0,
        size,
        brush_color(brush.get_mode()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_brush_rect() {
        let brush = Brush::default();
        let (corner, size) = brush_pixel_rect(&brush, CellVector::new(3, 2), 10);
        assert_eq!(corner, Vec2::new(30.0, 20.0));
        assert_eq!(size, Vec2::splat(10.0));
    }

    #[test]
    fn test_brush_rect_matches_footprint() {
        let brush = Brush::new(3, BrushMode::Erase);
        let center = CellVector::new(5, 5);
        let (corner, size) = brush_pixel_rect(&brush, center, 10);
        let first = brush.footprint(center).next().unwrap();
        assert_eq!(corner, Vec2::new(first.col as f32 * 10.0, first.row as f32 * 10.0));
        assert_eq!(size, Vec2::splat(30.0));
    }
}
