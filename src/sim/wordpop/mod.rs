//! Word Pop: pop floating word bubbles by typing them
//!
//! A 30 ms fixed tick moves and bounces the bubbles; an independent spawn
//! timer adds new words, faster as the score grows. Too many bubbles on
//! screen ends the run.

pub mod state;
pub mod tick;

pub use state::{Bubble, WordPhase, WordPopEvent, WordPopState};
