//! Word Pop stepping, spawning and input matching

use super::state::{Bubble, WordPhase, WordPopEvent, WordPopState};
use crate::sim::collision::resolve_elastic;

impl WordPopState {
    /// Feed elapsed wall time into both timers and run whatever fired
    pub fn advance(&mut self, dt_ms: f64) {
        if self.phase != WordPhase::Running {
            return;
        }
        let ticks = self.tick_timer.advance(dt_ms);
        for _ in 0..ticks {
            self.step();
        }
        let spawns = self.spawn_timer.advance(dt_ms);
        for _ in 0..spawns {
            if self.phase != WordPhase::Running {
                break;
            }
            self.spawn();
        }
    }

    /// One fixed simulation tick
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);

        for bubble in self.bubbles.iter_mut().filter(|b| !b.popping) {
            bubble.integrate(width, height);
        }

        // Pairwise response, each unordered pair once
        let n = self.bubbles.len();
        let mut contacts = 0u32;
        for i in 0..n {
            for j in (i + 1)..n {
                let (left, right) = self.bubbles.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                if a.popping || b.popping {
                    continue;
                }
                if resolve_elastic(a.pos, &mut a.vel, a.radius, b.pos, &mut b.vel, b.radius) {
                    contacts += 1;
                }
            }
        }
        if contacts > 0 {
            log::trace!("Resolved {} bubble contacts", contacts);
        }

        let shrink = self.tuning.pop_shrink;
        for bubble in self.bubbles.iter_mut().filter(|b| b.popping) {
            bubble.advance_pop(shrink);
        }

        let pop_frames = self.tuning.pop_frames;
        self.bubbles.retain(|b| !b.popping || b.pop_frame < pop_frames);
    }

    /// Spawn timer callback: add one random word, or end the game at the cap
    pub fn spawn(&mut self) {
        if self.at_cap() {
            return;
        }
        if self.tuning.vocabulary.is_empty() {
            log::warn!("Word Pop has an empty vocabulary; nothing to spawn");
            return;
        }

        for _ in 0..self.tuning.spawn_attempts {
            let word = self.random_word();
            let candidate = self.random_bubble(&word);
            if self.fits(&candidate) {
                self.push_bubble(candidate);
                return;
            }
        }
        log::debug!(
            "No free spot after {} attempts; skipping spawn",
            self.tuning.spawn_attempts
        );
    }

    /// Spawn a specific word at a free random spot. Returns false if the game
    /// ended at the cap or no spot was found.
    pub fn spawn_word(&mut self, word: &str) -> bool {
        if self.at_cap() {
            return false;
        }
        for _ in 0..self.tuning.spawn_attempts {
            let candidate = self.random_bubble(word);
            if self.fits(&candidate) {
                self.push_bubble(candidate);
                return true;
            }
        }
        false
    }

    /// Text input callback. Returns true when a bubble was popped (the caller
    /// clears the input field).
    pub fn handle_input(&mut self, text: &str) -> bool {
        if self.phase != WordPhase::Running {
            return false;
        }
        let typed = text.trim().to_lowercase();
        if typed.is_empty() {
            return false;
        }

        let Some(bubble) = self
            .bubbles
            .iter_mut()
            .find(|b| !b.popping && b.word == typed)
        else {
            return false;
        };
        bubble.pop();
        self.score += 1;
        log::debug!("Popped '{}' (score {})", typed, self.score);
        self.events.push(WordPopEvent::Popped {
            word: typed,
            score: self.score,
        });

        if self.score.checked_rem(self.tuning.speedup_every) == Some(0) {
            self.speed_up_spawning();
        }
        true
    }

    /// Shorten the spawn period and restart the spawn timer
    fn speed_up_spawning(&mut self) {
        self.spawn_interval_ms =
            (self.spawn_interval_ms - self.tuning.spawn_step_ms).max(self.tuning.spawn_min_ms);
        self.spawn_timer.rearm(self.spawn_interval_ms);
        log::info!("Spawn interval now {} ms", self.spawn_interval_ms);
        self.events.push(WordPopEvent::SpawnIntervalChanged {
            interval_ms: self.spawn_interval_ms,
        });
    }

    /// Game over check; stops the game when the cap is reached
    fn at_cap(&mut self) -> bool {
        if self.bubbles.len() < self.tuning.max_bubbles {
            return false;
        }
        log::info!(
            "Game over: {} bubbles on screen (score {})",
            self.bubbles.len(),
            self.score
        );
        self.events.push(WordPopEvent::GameOver { score: self.score });
        self.stop();
        true
    }

    fn fits(&self, candidate: &Bubble) -> bool {
        !self.bubbles.iter().any(|b| candidate.overlaps(b))
    }

    fn push_bubble(&mut self, bubble: Bubble) {
        log::debug!("Spawned '{}' at {:?}", bubble.word, bubble.pos);
        self.events.push(WordPopEvent::Spawned {
            word: bubble.word.clone(),
        });
        self.bubbles.push(bubble);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::tuning::WordPopTuning;

    fn running(seed: u64) -> WordPopState {
        let mut state = WordPopState::new(1000.0, 700.0, seed, WordPopTuning::default());
        state.start();
        state
    }

    fn still_bubble(word: &str, x: f32, y: f32) -> Bubble {
        let radius = WordPopTuning::default().radius_for(word);
        Bubble::new(word, Vec2::new(x, y), Vec2::ZERO, radius)
    }

    #[test]
    fn test_start_resets() {
        let mut state = running(1);
        state.score = 7;
        state.spawn_interval_ms = 1000.0;
        state.spawn_word("kiwi");
        state.stop();
        state.start();
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn_interval_ms, 3000.0);
        assert!(state.bubbles.is_empty());
        assert!(state.tick_timer.is_armed());
        assert!(state.spawn_timer.is_armed());
    }

    #[test]
    fn test_toggle_stop_disarms_timers() {
        let mut state = running(2);
        assert_eq!(state.toggle(), WordPhase::Stopped);
        assert!(!state.tick_timer.is_armed());
        assert!(!state.spawn_timer.is_armed());
        state.advance(10_000.0);
        assert!(state.bubbles.is_empty());
        assert_eq!(state.toggle(), WordPhase::Running);
    }

    #[test]
    fn test_pop_apple_scenario() {
        let mut state = running(3);
        assert!(state.spawn_word("apple"));
        assert!(state.handle_input("apple"));
        assert_eq!(state.score, 1);
        assert!(state.bubbles[0].popping);

        for _ in 0..9 {
            state.step();
        }
        assert_eq!(state.remaining(), 1);
        assert_eq!(state.bubbles[0].pop_frame, 9);
        state.step();
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_popping_bubble_shrinks() {
        let mut state = running(4);
        state.bubbles.push(still_bubble("kiwi", 500.0, 350.0));
        state.handle_input("kiwi");
        let before = state.bubbles[0].radius;
        state.step();
        assert_eq!(state.bubbles[0].radius, before - 2.0);
        assert_eq!(state.bubbles[0].pos, Vec2::new(500.0, 350.0));
    }

    #[test]
    fn test_input_is_trimmed_and_case_insensitive() {
        let mut state = running(5);
        state.bubbles.push(still_bubble("mango", 200.0, 200.0));
        assert!(state.handle_input("  MaNgO \n"));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_partial_or_wrong_input_ignored() {
        let mut state = running(6);
        state.bubbles.push(still_bubble("mango", 200.0, 200.0));
        assert!(!state.handle_input("man"));
        assert!(!state.handle_input(""));
        assert!(!state.handle_input("mangoes"));
        assert_eq!(state.score, 0);
        assert!(!state.bubbles[0].popping);
    }

    #[test]
    fn test_duplicate_words_first_match_wins() {
        let mut state = running(7);
        state.bubbles.push(still_bubble("pear", 100.0, 100.0));
        state.bubbles.push(still_bubble("pear", 400.0, 400.0));
        assert!(state.handle_input("pear"));
        assert!(state.bubbles[0].popping);
        assert!(!state.bubbles[1].popping);
        assert_eq!(state.score, 1);

        // The popping one is skipped; the second gets matched next
        assert!(state.handle_input("pear"));
        assert!(state.bubbles[1].popping);
        assert_eq!(state.score, 2);
        assert!(!state.handle_input("pear"));
    }

    #[test]
    fn test_input_ignored_when_stopped() {
        let mut state = running(8);
        state.bubbles.push(still_bubble("fig", 100.0, 100.0));
        state.stop();
        assert!(!state.handle_input("fig"));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_every_tenth_word_speeds_up_spawning() {
        let mut state = running(9);
        state.score = 9;
        state.bubbles.push(still_bubble("lime", 100.0, 100.0));
        state.handle_input("lime");
        assert_eq!(state.score, 10);
        assert_eq!(state.spawn_interval_ms, 2500.0);
        assert_eq!(state.spawn_timer.period_ms(), 2500.0);
        assert!(state.drain_events().contains(&WordPopEvent::SpawnIntervalChanged {
            interval_ms: 2500.0
        }));

        // Off-multiple scores leave it alone
        state.bubbles.push(still_bubble("leek", 400.0, 400.0));
        state.handle_input("leek");
        assert_eq!(state.spawn_interval_ms, 2500.0);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut state = running(10);
        state.spawn_interval_ms = 500.0;
        state.score = 19;
        state.bubbles.push(still_bubble("okra", 100.0, 100.0));
        state.handle_input("okra");
        assert_eq!(state.spawn_interval_ms, 500.0);

        state.spawn_interval_ms = 800.0;
        state.score = 29;
        state.bubbles.push(still_bubble("kale", 400.0, 400.0));
        state.handle_input("kale");
        assert_eq!(state.spawn_interval_ms, 500.0);
    }

    #[test]
    fn test_zero_speedup_every_never_speeds_up() {
        let tuning = WordPopTuning {
            speedup_every: 0,
            ..WordPopTuning::default()
        };
        let mut state = WordPopState::new(1000.0, 700.0, 12, tuning);
        state.start();
        state.bubbles.push(still_bubble("plum", 100.0, 100.0));
        assert!(state.handle_input("plum"));
        assert_eq!(state.score, 1);
        assert_eq!(state.spawn_interval_ms, 3000.0);
    }

    #[test]
    fn test_cap_ends_game() {
        let tuning = WordPopTuning {
            max_bubbles: 3,
            ..WordPopTuning::default()
        };
        let mut state = WordPopState::new(1000.0, 700.0, 11, tuning);
        state.start();
        for _ in 0..3 {
            state.spawn();
        }
        assert_eq!(state.remaining(), 3);
        state.drain_events();

        state.spawn();
        assert_eq!(state.remaining(), 3);
        assert_eq!(state.phase, WordPhase::Stopped);
        assert_eq!(
            state.drain_events(),
            vec![WordPopEvent::GameOver { score: 0 }]
        );
    }

    #[test]
    fn test_wall_bounce_reflects_without_clamping() {
        let mut state = running(12);
        let mut bubble = still_bubble("fig", 1000.0 - 36.0, 350.0);
        bubble.vel = Vec2::new(1.5, 0.5);
        state.bubbles.push(bubble);
        state.step();
        let b = &state.bubbles[0];
        assert_eq!(b.vel.x, -1.5);
        assert_eq!(b.vel.y, 0.5);
        assert!(b.pos.x + b.radius > 1000.0);
    }

    #[test]
    fn test_overlapping_bubbles_separate() {
        let mut state = running(13);
        let mut a = still_bubble("yam", 300.0, 300.0);
        a.vel = Vec2::new(1.0, 0.0);
        let mut b = still_bubble("yam", 360.0, 300.0);
        b.vel = Vec2::new(-1.0, 0.0);
        state.bubbles.push(a);
        state.bubbles.push(b);
        state.step();
        assert!(state.bubbles[0].vel.x < 0.0);
        assert!(state.bubbles[1].vel.x > 0.0);
    }

    #[test]
    fn test_advance_drives_ticks_and_spawns() {
        let mut state = running(14);
        for _ in 0..100 {
            state.advance(30.0);
        }
        assert_eq!(state.remaining(), 1);
        assert!(matches!(
            state.drain_events().as_slice(),
            [WordPopEvent::Spawned { .. }]
        ));
    }

    #[test]
    fn test_seeded_runs_match() {
        let mut a = running(99);
        let mut b = running(99);
        for _ in 0..500 {
            a.advance(30.0);
            b.advance(30.0);
        }
        assert_eq!(a.bubbles, b.bubbles);
    }

    proptest! {
        #[test]
        fn prop_spawned_bubbles_never_overlap(seed in any::<u64>()) {
            let mut state = running(seed);
            for _ in 0..20 {
                let before = state.remaining();
                state.spawn();
                if state.remaining() > before {
                    let (new, existing) = state.bubbles.split_last().unwrap();
                    for other in existing {
                        prop_assert!(new.pos.distance(other.pos) >= new.radius + other.radius);
                    }
                    prop_assert!(new.pos.x >= new.radius && new.pos.x <= 1000.0 - new.radius);
                    prop_assert!(new.pos.y >= new.radius && new.pos.y <= 700.0 - new.radius);
                }
            }
        }
    }
}
