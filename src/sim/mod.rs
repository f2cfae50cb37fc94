//! Headless simulation for both games
//!
//! Everything gameplay-related lives here and stays free of DOM and canvas:
//! - Seeded RNG only
//! - Timers are fed elapsed time by the caller
//! - Entities are updated and removed in list order

pub mod collision;
pub mod shooter;
pub mod timer;
pub mod wordpop;

pub use collision::resolve_elastic;
pub use shooter::{ApproachingBall, BallColor, Cannon, Cannonball, Edge, ShooterEvent, ShooterState};
pub use timer::Interval;
pub use wordpop::{Bubble, WordPhase, WordPopEvent, WordPopState};
