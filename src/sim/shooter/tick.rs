//! Color Cannon per-frame stepping

use super::state::{ShooterEvent, ShooterState};
use crate::{circles_overlap, outside_bounds};

impl ShooterState {
    /// Called once per animation frame with the frame's elapsed time
    pub fn advance(&mut self, dt_ms: f64) {
        if !self.running {
            return;
        }
        let spawns = self.spawn_timer.advance(dt_ms);
        for _ in 0..spawns {
            self.spawn_approaching();
        }
        self.step();
    }

    /// One frame of motion, collisions and culling.
    ///
    /// Removal is two-phase: entities are marked during the scans and the
    /// collections are compacted afterwards, so no neighbor is skipped.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);

        for shot in &mut self.cannonballs {
            shot.advance();
        }

        // Each shot takes out at most one same-color ball
        let mut shot_dead = vec![false; self.cannonballs.len()];
        let mut ball_dead = vec![false; self.approaching.len()];
        for (si, shot) in self.cannonballs.iter().enumerate() {
            let target = self.approaching.iter().enumerate().find(|(bi, ball)| {
                !ball_dead[*bi]
                    && ball.color == shot.color
                    && circles_overlap(shot.pos, shot.radius, ball.pos, ball.radius)
            });
            if let Some((bi, ball)) = target {
                shot_dead[si] = true;
                ball_dead[bi] = true;
                log::debug!("Hit {} ball at {:?}", ball.color.as_css(), ball.pos);
                self.events.push(ShooterEvent::Hit {
                    color: ball.color,
                    pos: ball.pos,
                });
            }
        }

        let mut dead = shot_dead.into_iter();
        self.cannonballs.retain(|shot| {
            let hit = dead.next().unwrap_or(false);
            !hit && !outside_bounds(shot.pos, width, height)
        });

        let center = self.center;
        let mut dead = ball_dead.into_iter();
        self.approaching.retain_mut(|ball| {
            if dead.next().unwrap_or(false) {
                return false;
            }
            ball.advance(center);
            !outside_bounds(ball.pos, width, height)
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::shooter::state::{ApproachingBall, BallColor, Cannonball};
    use crate::tuning::ShooterTuning;

    fn game(seed: u64) -> ShooterState {
        ShooterState::new(800.0, 600.0, seed, ShooterTuning::default())
    }

    fn ball_at(x: f32, y: f32, color: BallColor) -> ApproachingBall {
        ApproachingBall {
            pos: Vec2::new(x, y),
            radius: 15.0,
            speed: 1.0,
            color,
        }
    }

    fn shot_at(x: f32, y: f32, angle: f32, color: BallColor) -> Cannonball {
        Cannonball {
            pos: Vec2::new(x, y),
            radius: 5.0,
            speed: 5.0,
            angle,
            color,
        }
    }

    #[test]
    fn test_aim_follows_pointer() {
        let mut state = game(1);
        state.aim_at(400.0, 500.0);
        assert!((state.cannon.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let muzzle = state.cannon.position(state.center);
        assert!((muzzle - Vec2::new(400.0, 400.0)).length() < 1e-3);
    }

    #[test]
    fn test_toggle_color_cycles() {
        let mut state = game(2);
        assert_eq!(state.cannon.color, BallColor::Red);
        assert_eq!(state.toggle_color(), BallColor::Green);
        assert_eq!(state.toggle_color(), BallColor::Red);
    }

    #[test]
    fn test_fire_uses_cannon_state() {
        let mut state = game(3);
        state.aim_at(800.0, 300.0);
        state.toggle_color();
        state.fire();
        let shot = &state.cannonballs[0];
        assert_eq!(shot.color, BallColor::Green);
        assert!((shot.pos - Vec2::new(500.0, 300.0)).length() < 1e-3);
        assert_eq!(shot.radius, 5.0);

        state.step();
        assert!((state.cannonballs[0].pos.x - 505.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_color_hit_removes_both() {
        let mut state = game(4);
        state.cannonballs.push(shot_at(600.0, 300.0, 0.0, BallColor::Red));
        state.approaching.push(ball_at(620.0, 300.0, BallColor::Red));
        state.step();
        assert!(state.cannonballs.is_empty());
        assert!(state.approaching.is_empty());
        assert!(matches!(
            state.drain_events().as_slice(),
            [ShooterEvent::Hit {
                color: BallColor::Red,
                ..
            }]
        ));
    }

    #[test]
    fn test_color_mismatch_passes_through() {
        let mut state = game(5);
        state.cannonballs.push(shot_at(600.0, 300.0, 0.0, BallColor::Red));
        state.approaching.push(ball_at(620.0, 300.0, BallColor::Green));
        state.step();
        assert_eq!(state.cannonballs.len(), 1);
        assert_eq!(state.approaching.len(), 1);
    }

    #[test]
    fn test_one_shot_one_ball() {
        let mut state = game(6);
        state.cannonballs.push(shot_at(600.0, 300.0, 0.0, BallColor::Red));
        state.approaching.push(ball_at(615.0, 300.0, BallColor::Red));
        state.approaching.push(ball_at(620.0, 305.0, BallColor::Red));
        state.step();
        assert!(state.cannonballs.is_empty());
        assert_eq!(state.approaching.len(), 1);
    }

    #[test]
    fn test_adjacent_removals_do_not_skip() {
        let mut state = game(7);
        state.cannonballs.push(shot_at(600.0, 300.0, 0.0, BallColor::Red));
        state.cannonballs.push(shot_at(200.0, 300.0, 0.0, BallColor::Green));
        state.approaching.push(ball_at(620.0, 300.0, BallColor::Red));
        state.approaching.push(ball_at(220.0, 300.0, BallColor::Green));
        state.step();
        assert!(state.cannonballs.is_empty());
        assert!(state.approaching.is_empty());
    }

    #[test]
    fn test_off_canvas_shots_removed() {
        let mut state = game(8);
        state.cannonballs.push(shot_at(798.0, 300.0, 0.0, BallColor::Red));
        state.cannonballs.push(shot_at(400.0, 2.0, -std::f32::consts::FRAC_PI_2, BallColor::Red));
        state.cannonballs.push(shot_at(400.0, 300.0, 0.0, BallColor::Red));
        state.step();
        assert_eq!(state.cannonballs.len(), 1);
        assert!((state.cannonballs[0].pos.x - 405.0).abs() < 1e-3);
    }

    #[test]
    fn test_off_canvas_balls_removed() {
        let mut state = game(10);
        state.approaching.push(ball_at(-5.0, 300.0, BallColor::Red));
        state.approaching.push(ball_at(200.0, 300.0, BallColor::Green));
        state.approaching.push(ball_at(400.0, 605.0, BallColor::Green));
        state.step();
        assert_eq!(state.approaching.len(), 1);
        assert_eq!(state.approaching[0].color, BallColor::Green);
        assert!((state.approaching[0].pos - Vec2::new(201.0, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_approaching_ball_moves_toward_center() {
        let mut state = game(9);
        state.approaching.push(ball_at(0.0, 300.0, BallColor::Green));
        state.step();
        assert!((state.approaching[0].pos - Vec2::new(1.0, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_spawn_timer_runs_every_two_seconds() {
        let mut state = game(10);
        for _ in 0..119 {
            state.advance(1000.0 / 60.0);
        }
        assert!(state.approaching.is_empty());
        state.advance(1000.0 / 60.0 + 0.01);
        assert_eq!(state.approaching.len(), 1);
    }

    #[test]
    fn test_stop_halts_everything() {
        let mut state = game(11);
        state.fire();
        state.stop();
        state.advance(5000.0);
        assert!(state.approaching.is_empty());
        assert!((state.cannonballs[0].pos.x - 500.0).abs() < 1e-3);
        state.start();
        state.advance(16.0);
        assert!((state.cannonballs[0].pos.x - 505.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_spawns_land_on_an_edge(seed in any::<u64>()) {
            let mut state = game(seed);
            for _ in 0..16 {
                state.spawn_approaching();
            }
            for ball in &state.approaching {
                let p = ball.pos;
                let on_edge = p.x == 0.0 || p.x == 800.0 || p.y == 0.0 || p.y == 600.0;
                prop_assert!(on_edge);
                prop_assert!(!outside_bounds(p, 800.0, 600.0));
            }
        }
    }
}
