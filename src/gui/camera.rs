//! The bevy camera for the game

use bevy::core_pipeline::core_2d::Camera2dBundle;
use bevy::ecs::system::{Commands, Resource};
use bevy::math::Vec2;

/// The window size in pixels the simulation was built for
#[derive(Resource, Debug, Clone, Copy)]
pub struct WindowSize(pub Vec2);

pub fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Window pixels (origin top left, y down) to world coordinates (origin centre, y up)
/// for the default 2d camera
pub fn pixel_to_world(pixel: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(pixel.x - window_size.x / 2.0, window_size.y / 2.0 - pixel.y)
}
