//! Color Cannon: shoot approaching balls with a matching color
//!
//! The cannon orbits a central target and aims at the pointer. Balls spawn
//! on the canvas edges every two seconds and drift toward the center; a shot
//! only destroys a ball of its own color.

pub mod state;
pub mod tick;

pub use state::{ApproachingBall, BallColor, Cannon, Cannonball, Edge, ShooterEvent, ShooterState};
