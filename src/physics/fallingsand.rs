//! Falling sand physics engine.
//! A grid of cells, each holding at most one particle, swept once per tick
//! while the player adds and removes particles between ticks.

pub mod controls;
pub mod data;
pub mod elements;
pub mod simulation;
pub mod util;
