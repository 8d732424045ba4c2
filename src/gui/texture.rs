//! Draws the grid as one texture, one texel per cell, stretched over the window

use bevy::asset::{Assets, Handle};
use bevy::ecs::change_detection::DetectChanges;
use bevy::ecs::system::{Commands, Res, ResMut, Resource};
use bevy::math::Vec2;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::render::texture::Image;
use bevy::sprite::{Sprite, SpriteBundle};
use bevy::transform::components::Transform;

use crate::physics::fallingsand::data::element_grid::GridSnapshot;
use crate::physics::fallingsand::elements::element::ElementType;

use super::camera::{pixel_to_world, WindowSize};
use super::SandSimulation;

/// Empty cells are see through so the clear color shows
pub const EMPTY_COLOR: [u8; 4] = [0, 0, 0, 0];

/// The handle of the texture the grid is drawn into
#[derive(Resource)]
pub struct GridTexture(pub Handle<Image>);

pub fn element_color(element: ElementType) -> [u8; 4] {
    match element {
        ElementType::Sand => [212, 165, 106, 255],
    }
}

/// RGBA pixels for the snapshot, row major, top row first
pub fn snapshot_pixels(snapshot: &GridSnapshot) -> Vec<u8> {
    let width = snapshot.get_width();
    let mut pixels = EMPTY_COLOR.repeat(width * snapshot.get_height());
    for (pos, particle) in snapshot.iter_occupied() {
        let offset = (pos.row as usize * width + pos.col as usize) * 4;
        pixels[offset..offset + 4].copy_from_slice(&element_color(particle.get_type()));
    }
    pixels
}

/// Convert to a bevy image
pub fn to_bevy_image(snapshot: &GridSnapshot) -> Image {
    let size = Extent3d {
        width: snapshot.get_width() as u32,
        height: snapshot.get_height() as u32,
        depth_or_array_layers: 1,
    };
    Image::new(
        size,
        TextureDimension::D2,
        snapshot_pixels(snapshot),
        TextureFormat::Rgba8UnormSrgb,
    )
}

pub fn setup_grid_sprite_system(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    simulation: Res<SandSimulation>,
    window_size: Res<WindowSize>,
) {
    let simulation = &simulation.0;
    let handle = images.add(to_bevy_image(&simulation.render_snapshot()));

    // Partial cells at the right and bottom edge are not simulated, so the grid can be
    // a little smaller than the window. Pin its top left corner to the window's.
    let cell_size = simulation.get_cell_size_px() as f32;
    let grid_size = Vec2::new(
        simulation.get_width_cells() as f32 * cell_size,
        simulation.get_height_cells() as f32 * cell_size,
    );
    let center = pixel_to_world(grid_size / 2.0, window_size.0);

    commands.spawn(SpriteBundle {
        texture: handle.clone(),
        sprite: Sprite {
            custom_size: Some(grid_size),
            ..Default::default()
        },
        transform: Transform::from_translation(center.extend(0.0)),
        ..Default::default()
    });
    commands.insert_resource(GridTexture(handle));
}

pub fn upload_grid_texture_system(
    simulation: Res<SandSimulation>,
    texture: Option<Res<GridTexture>>,
    mut images: ResMut<Assets<Image>>,
) {
    if !simulation.is_changed() {
        return;
    }
    let Some(texture) = texture else {
        return;
    };
    if let Some(image) = images.get_mut(&texture.0) {
        image.data = snapshot_pixels(&simulation.0.render_snapshot());
    }
}
