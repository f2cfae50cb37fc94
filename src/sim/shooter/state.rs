//! Color Cannon game state and entity types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::Interval;
use crate::tuning::ShooterTuning;
use crate::{angle_to, heading};

/// The two colors shared by the cannon, its shots and the approaching balls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallColor {
    #[default]
    Red,
    Green,
}

impl BallColor {
    pub const ALL: [BallColor; 2] = [BallColor::Red, BallColor::Green];

    /// CSS color name
    pub fn as_css(&self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Green => "green",
        }
    }

    /// Next color in the cycle
    pub fn next(self) -> Self {
        match self {
            BallColor::Red => BallColor::Green,
            BallColor::Green => BallColor::Red,
        }
    }
}

/// Canvas edge an approaching ball enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Things the driver reacts to (audio, logs)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShooterEvent {
    Fired { color: BallColor },
    Hit { color: BallColor, pos: Vec2 },
    Spawned { color: BallColor, edge: Edge },
    ColorChanged { color: BallColor },
}

/// The cannon orbiting the central target
#[derive(Debug, Clone, PartialEq)]
pub struct Cannon {
    /// Aim angle (radians, screen coordinates)
    pub angle: f32,
    pub color: BallColor,
    /// Distance from canvas center
    pub orbit: f32,
}

impl Cannon {
    pub fn new(orbit: f32) -> Self {
        Self {
            angle: 0.0,
            color: BallColor::Red,
            orbit,
        }
    }

    /// Muzzle position for a given canvas center
    pub fn position(&self, center: Vec2) -> Vec2 {
        center + heading(self.angle) * self.orbit
    }
}

/// A shot fired by the cannon
#[derive(Debug, Clone, PartialEq)]
pub struct Cannonball {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Direction of travel, fixed at fire time
    pub angle: f32,
    pub color: BallColor,
}

impl Cannonball {
    /// Straight-line motion
    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
    }
}

/// A ball drifting from the canvas edge toward the center
#[derive(Debug, Clone, PartialEq)]
pub struct ApproachingBall {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: BallColor,
}

impl ApproachingBall {
    /// Move toward `target`, re-aiming every frame
    pub fn advance(&mut self, target: Vec2) {
        let angle = angle_to(self.pos, target);
        self.pos += heading(angle) * self.speed;
    }
}

/// Complete Color Cannon state
#[derive(Debug, Clone)]
pub struct ShooterState {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
    pub cannon: Cannon,
    pub cannonballs: Vec<Cannonball>,
    pub approaching: Vec<ApproachingBall>,
    pub spawn_timer: Interval,
    pub running: bool,
    pub tuning: ShooterTuning,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<ShooterEvent>,
}

impl ShooterState {
    /// Create a running game on a `width` x `height` canvas
    pub fn new(width: f32, height: f32, seed: u64, tuning: ShooterTuning) -> Self {
        let mut state = Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height / 2.0),
            cannon: Cannon::new(tuning.cannon_orbit),
            cannonballs: Vec::new(),
            approaching: Vec::new(),
            spawn_timer: Interval::new(tuning.spawn_ms),
            running: false,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.start();
        state
    }

    /// Arm the spawn timer and resume stepping
    pub fn start(&mut self) {
        self.spawn_timer.arm();
        self.running = true;
    }

    /// Stop spawning and stepping
    pub fn stop(&mut self) {
        self.spawn_timer.disarm();
        self.running = false;
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<ShooterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Point the cannon at a canvas position
    pub fn aim_at(&mut self, x: f32, y: f32) {
        self.cannon.angle = angle_to(self.center, Vec2::new(x, y));
    }

    /// Cycle the cannon color
    pub fn toggle_color(&mut self) -> BallColor {
        self.cannon.color = self.cannon.color.next();
        self.events.push(ShooterEvent::ColorChanged {
            color: self.cannon.color,
        });
        self.cannon.color
    }

    /// Fire one shot from the muzzle along the current aim
    pub fn fire(&mut self) {
        let ball = Cannonball {
            pos: self.cannon.position(self.center),
            radius: self.tuning.cannonball_radius,
            speed: self.tuning.cannonball_speed,
            angle: self.cannon.angle,
            color: self.cannon.color,
        };
        self.events.push(ShooterEvent::Fired { color: ball.color });
        self.cannonballs.push(ball);
    }

    /// Place a random-color ball at a random point on a random edge
    pub fn spawn_approaching(&mut self) {
        let color = BallColor::ALL[self.rng.random_range(0..BallColor::ALL.len())];
        let edge = Edge::ALL[self.rng.random_range(0..Edge::ALL.len())];
        let along_x = self.rng.random::<f32>() * self.width;
        let along_y = self.rng.random::<f32>() * self.height;
        let pos = match edge {
            Edge::Top => Vec2::new(along_x, 0.0),
            Edge::Right => Vec2::new(self.width, along_y),
            Edge::Bottom => Vec2::new(along_x, self.height),
            Edge::Left => Vec2::new(0.0, along_y),
        };
        log::debug!("Spawned {} ball on {:?} edge at {:?}", color.as_css(), edge, pos);
        self.approaching.push(ApproachingBall {
            pos,
            radius: self.tuning.ball_radius,
            speed: self.tuning.ball_speed,
            color,
        });
        self.events.push(ShooterEvent::Spawned { color, edge });
    }
}
