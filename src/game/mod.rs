//! Core game logic for Snake on a 3D lattice
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends push direction requests in and read cells, food, score and status out.

pub mod config;
pub mod direction;
pub mod state;
pub mod vector;
pub mod world;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::DirectionController;
pub use state::{EndReason, GameStatus, Snake};
pub use vector::{Heading, InvalidHeading, Vec3i};
pub use world::{GridWorld, TickOutcome};
