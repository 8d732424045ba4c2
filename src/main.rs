use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;

use falling_sand::gui::SandboxPlugin;
use falling_sand::physics::fallingsand::simulation::{SimulationBuilder, SimulationError};

const WINDOW_WIDTH: i32 = 800;
const WINDOW_HEIGHT: i32 = 600;
const CELL_SIZE: i32 = 10;
const FPS: f64 = 120.0;

fn main() -> Result<(), SimulationError> {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(LogPlugin {
                level: Level::INFO,
                filter: "wgpu=error,naga=warn,falling_sand=debug".to_string(),
                ..Default::default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Falling Sand".to_string(),
                    resolution: WindowResolution::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
                    resizable: false,
                    ..Default::default()
                }),
                ..Default::default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Built after the log plugin so construction is logged
    let simulation = SimulationBuilder::new()
        .width_px(WINDOW_WIDTH)
        .height_px(WINDOW_HEIGHT)
        .cell_size_px(CELL_SIZE)
        .brush_size(3)
        .spawn_chance(0.2)
        .seed(rand::random())
        .build()?;

    app.add_plugins(
        SandboxPlugin::new(
            simulation,
            Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
        )
        .tick_rate_hz(FPS),
    )
    .run();
    Ok(())
}
