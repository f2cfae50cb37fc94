//! Word Pop game state and entity types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::Interval;
use crate::tuning::WordPopTuning;

/// Running vs stopped, toggled by the Start/Stop button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordPhase {
    Stopped,
    Running,
}

/// Things the driver reacts to (audio, HUD, alerts)
#[derive(Debug, Clone, PartialEq)]
pub enum WordPopEvent {
    Spawned { word: String },
    Popped { word: String, score: u32 },
    SpawnIntervalChanged { interval_ms: f64 },
    /// Bubble cap reached; the game has already stopped itself
    GameOver { score: u32 },
}

/// A floating word bubble
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub word: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Matched by the player; shrinking toward removal
    pub popping: bool,
    /// Ticks elapsed since popping started
    pub pop_frame: u32,
}

impl Bubble {
    pub fn new(word: impl Into<String>, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            word: word.into(),
            pos,
            vel,
            radius,
            popping: false,
            pop_frame: 0,
        }
    }

    pub fn overlaps(&self, other: &Bubble) -> bool {
        crate::circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    /// Start the pop animation
    pub fn pop(&mut self) {
        self.popping = true;
    }

    /// Move one tick and bounce off the canvas walls.
    ///
    /// Only the velocity sign flips; the position is not pulled back inside.
    pub fn integrate(&mut self, width: f32, height: f32) {
        self.pos += self.vel;
        if self.pos.x + self.radius > width || self.pos.x - self.radius < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + self.radius > height || self.pos.y - self.radius < 0.0 {
            self.vel.y = -self.vel.y;
        }
    }

    /// Advance the pop animation by one tick
    pub fn advance_pop(&mut self, shrink: f32) {
        self.pop_frame += 1;
        self.radius = (self.radius - shrink).max(0.0);
    }
}

/// Complete Word Pop state
#[derive(Debug, Clone)]
pub struct WordPopState {
    pub width: f32,
    pub height: f32,
    /// Live bubbles in spawn order (input matching scans this order)
    pub bubbles: Vec<Bubble>,
    pub score: u32,
    pub spawn_interval_ms: f64,
    pub phase: WordPhase,
    pub tick_timer: Interval,
    pub spawn_timer: Interval,
    pub tuning: WordPopTuning,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<WordPopEvent>,
}

impl WordPopState {
    /// Create a stopped game on a `width` x `height` canvas
    pub fn new(width: f32, height: f32, seed: u64, tuning: WordPopTuning) -> Self {
        Self {
            width,
            height,
            bubbles: Vec::new(),
            score: 0,
            spawn_interval_ms: tuning.spawn_start_ms,
            phase: WordPhase::Stopped,
            tick_timer: Interval::new(tuning.tick_ms),
            spawn_timer: Interval::new(tuning.spawn_start_ms),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == WordPhase::Running
    }

    /// Reset and start both timers
    pub fn start(&mut self) {
        self.bubbles.clear();
        self.score = 0;
        self.spawn_interval_ms = self.tuning.spawn_start_ms;
        self.tick_timer.rearm(self.tuning.tick_ms);
        self.spawn_timer.rearm(self.spawn_interval_ms);
        self.phase = WordPhase::Running;
        log::info!("Word Pop started");
    }

    /// Stop both timers. Bubbles are kept until the next start.
    pub fn stop(&mut self) {
        self.tick_timer.disarm();
        self.spawn_timer.disarm();
        if self.phase == WordPhase::Running {
            log::info!("Word Pop stopped (score {})", self.score);
        }
        self.phase = WordPhase::Stopped;
    }

    /// Start/Stop button
    pub fn toggle(&mut self) -> WordPhase {
        match self.phase {
            WordPhase::Stopped => self.start(),
            WordPhase::Running => self.stop(),
        }
        self.phase
    }

    /// Live bubble count (popping bubbles included until removed)
    pub fn remaining(&self) -> usize {
        self.bubbles.len()
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<WordPopEvent> {
        std::mem::take(&mut self.events)
    }

    /// Random bubble for `word` whose circle fits inside the canvas
    pub(crate) fn random_bubble(&mut self, word: &str) -> Bubble {
        let radius = self.tuning.radius_for(word);
        let x = random_span(&mut self.rng, radius, self.width - radius);
        let y = random_span(&mut self.rng, radius, self.height - radius);
        let max = self.tuning.max_speed;
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * 2.0 * max,
            (self.rng.random::<f32>() - 0.5) * 2.0 * max,
        );
        Bubble::new(word, Vec2::new(x, y), vel, radius)
    }

    /// Pick a vocabulary word
    pub(crate) fn random_word(&mut self) -> String {
        let index = self.rng.random_range(0..self.tuning.vocabulary.len());
        self.tuning.vocabulary[index].clone()
    }
}

/// Uniform in `[lo, hi)`; collapses to `lo` when the span is empty
fn random_span(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
