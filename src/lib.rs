//! Canvas Arcade - two small canvas games for the browser
//!
//! Core modules:
//! - `sim`: Headless simulation for both games (entities, stepping, collisions)
//! - `render`: Pure scene building plus the Canvas 2D backend
//! - `tuning`: Data-driven game constants
//! - `audio`: Procedural Web Audio cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::{ShooterTuning, Tuning, TuningError, WordPopTuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Maximum timer firings processed per `advance` call (prevents spiral of death)
    pub const MAX_CATCH_UP: u32 = 8;

    /// Word Pop: simulation tick period (ms)
    pub const WORD_TICK_MS: f64 = 30.0;
    /// Word Pop: spawn period at game start (ms)
    pub const WORD_SPAWN_START_MS: f64 = 3000.0;
    /// Word Pop: spawn period reduction per speed-up (ms)
    pub const WORD_SPAWN_STEP_MS: f64 = 500.0;
    /// Word Pop: spawn period never drops below this (ms)
    pub const WORD_SPAWN_MIN_MS: f64 = 500.0;
    /// Word Pop: speed up spawning every N popped words
    pub const WORD_SPEEDUP_EVERY: u32 = 10;
    /// Word Pop: live bubble cap; spawning at the cap ends the game
    pub const MAX_BUBBLES: usize = 30;
    /// Word Pop: ticks a popped bubble animates before removal
    pub const POP_FRAMES: u32 = 10;
    /// Word Pop: radius lost per pop tick
    pub const POP_SHRINK: f32 = 2.0;
    /// Word Pop: bubble radius = base + per_letter * len
    pub const BUBBLE_BASE_RADIUS: f32 = 30.0;
    pub const BUBBLE_RADIUS_PER_LETTER: f32 = 2.0;
    /// Word Pop: max spawn speed per axis (px/tick)
    pub const BUBBLE_MAX_SPEED: f32 = 2.0;
    /// Word Pop: attempts to find a free spot before skipping a spawn
    pub const SPAWN_ATTEMPTS: u32 = 200;
    /// Word Pop: canvas is the viewport minus this margin on each axis
    pub const WORD_CANVAS_MARGIN: f64 = 200.0;

    /// Color Cannon: approaching ball spawn period (ms)
    pub const SHOOTER_SPAWN_MS: f64 = 2000.0;
    /// Color Cannon: central target radius
    pub const TARGET_RADIUS: f32 = 30.0;
    /// Color Cannon: radius of the circle the cannon orbits on
    pub const CANNON_ORBIT: f32 = 100.0;
    /// Color Cannon: cannon barrel size (drawn centered on the cannon position)
    pub const CANNON_LENGTH: f32 = 20.0;
    pub const CANNON_WIDTH: f32 = 10.0;
    /// Color Cannon: projectile defaults
    pub const CANNONBALL_RADIUS: f32 = 5.0;
    pub const CANNONBALL_SPEED: f32 = 5.0;
    /// Color Cannon: approaching ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_SPEED: f32 = 1.0;
}

/// True when two circles overlap (strictly closer than the sum of radii)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Angle (radians) of the vector from `from` to `to`, screen coordinates (y down)
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// True when a point lies outside the `[0, w] x [0, h]` rectangle
#[inline]
pub fn outside_bounds(p: Vec2, width: f32, height: f32) -> bool {
    p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height
}
