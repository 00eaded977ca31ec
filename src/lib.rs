//! Snake on a 3D lattice
//!
//! This library provides:
//! - Core game logic: grid world, turn queue, collision and food rules (game module)
//! - Keyboard and swipe translation into headings (input module)
//! - Terminal rendering of the cube, one slice per layer (render module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;
