//! This module contains all the bevy related code.
//! The simulation itself knows nothing about windows, this is the frame loop that drives it:
//! input is collected every frame, the simulation steps at a fixed rate,
//! and the grid is drawn from a snapshot.

pub mod brush;
pub mod camera;
pub mod controls;
pub mod texture;

use bevy::app::{App, FixedUpdate, Plugin, PreUpdate, Startup, Update};
use bevy::core_pipeline::clear_color::ClearColor;
use bevy::ecs::schedule::IntoSystemConfigs;
use bevy::ecs::system::{ResMut, Resource};
use bevy::input::InputSystem;
use bevy::math::Vec2;
use bevy::render::color::Color;
use bevy::time::{Fixed, Time};

use crate::physics::fallingsand::simulation::Simulation;

use self::brush::draw_brush_system;
use self::camera::{setup_camera_system, WindowSize};
use self::controls::{collect_controls_system, PendingControls};
use self::texture::{setup_grid_sprite_system, upload_grid_texture_system};

/// Ticks per second when none is given
pub const DEFAULT_TICK_RATE_HZ: f64 = 120.0;

/// The simulation as a bevy resource
#[derive(Resource)]
pub struct SandSimulation(pub Simulation);

/// Runs a falling sand simulation inside a bevy app
pub struct SandboxPlugin {
    simulation: Simulation,
    window_size: Vec2,
    tick_rate_hz: f64,
}

impl SandboxPlugin {
    /// window_size is the size in pixels the simulation was built for
    pub fn new(simulation: Simulation, window_size: Vec2) -> Self {
        Self {
            simulation,
            window_size,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
        }
    }

    pub fn tick_rate_hz(mut self, tick_rate_hz: f64) -> Self {
        self.tick_rate_hz = tick_rate_hz;
        self
    }
}

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SandSimulation(self.simulation.clone()))
            .insert_resource(WindowSize(self.window_size))
            .insert_resource(Time::<Fixed>::from_hz(self.tick_rate_hz))
            .insert_resource(ClearColor(Color::rgb_u8(29, 29, 29)))
            .init_resource::<PendingControls>();
        app.add_systems(Startup, (setup_camera_system, setup_grid_sprite_system));
        app.add_systems(PreUpdate, collect_controls_system.after(InputSystem));
        app.add_systems(FixedUpdate, step_simulation_system);
        app.add_systems(Update, (upload_grid_texture_system, draw_brush_system));
    }
}

/// One tick: apply the input gathered since the last tick, then sweep
fn step_simulation_system(
    mut simulation: ResMut<SandSimulation>,
    mut pending: ResMut<PendingControls>,
) {
    let keys = pending.take_keys();
    simulation.0.step(&pending.pointer, &keys);
}
