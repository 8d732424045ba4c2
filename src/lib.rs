//! A falling sand toy.
//!
//! [`physics`] holds the simulation itself and can be driven without a window.
//! [`gui`] wires it into a bevy app.

pub mod gui;
pub mod physics;
