//! Data-driven game constants
//!
//! Defaults reproduce the classic feel of both games. A JSON document can
//! override any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Words the bubbles are labeled with
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "apple", "grape", "peach", "plum", "berry", "mango", "lemon", "melon", "olive", "kiwi", "fig",
    "date", "lime", "pear", "cherry", "apric", "guava", "papay", "quinc", "tomat", "onion",
    "radis", "carro", "beet", "corn", "beans", "peas", "okra", "kale", "spin", "yam", "zucch",
    "squas", "turni", "leek",
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

/// Word Pop balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordPopTuning {
    pub tick_ms: f64,
    pub spawn_start_ms: f64,
    pub spawn_step_ms: f64,
    pub spawn_min_ms: f64,
    /// Speed up spawning every N popped words
    pub speedup_every: u32,
    pub max_bubbles: usize,
    /// A popping bubble is removed at the end of the tick its frame count reaches this
    pub pop_frames: u32,
    pub pop_shrink: f32,
    pub base_radius: f32,
    pub radius_per_letter: f32,
    pub max_speed: f32,
    pub spawn_attempts: u32,
    pub vocabulary: Vec<String>,
}

impl Default for WordPopTuning {
    fn default() -> Self {
        Self {
            tick_ms: WORD_TICK_MS,
            spawn_start_ms: WORD_SPAWN_START_MS,
            spawn_step_ms: WORD_SPAWN_STEP_MS,
            spawn_min_ms: WORD_SPAWN_MIN_MS,
            speedup_every: WORD_SPEEDUP_EVERY,
            max_bubbles: MAX_BUBBLES,
            pop_frames: POP_FRAMES,
            pop_shrink: POP_SHRINK,
            base_radius: BUBBLE_BASE_RADIUS,
            radius_per_letter: BUBBLE_RADIUS_PER_LETTER,
            max_speed: BUBBLE_MAX_SPEED,
            spawn_attempts: SPAWN_ATTEMPTS,
            vocabulary: DEFAULT_VOCABULARY.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordPopTuning {
    /// Bubble radius for a word
    pub fn radius_for(&self, word: &str) -> f32 {
        self.base_radius + self.radius_per_letter * word.chars().count() as f32
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tick_ms <= 0.0 {
            return Err(invalid("tick_ms", "must be positive"));
        }
        if self.spawn_min_ms <= 0.0 {
            return Err(invalid("spawn_min_ms", "must be positive"));
        }
        if self.spawn_start_ms < self.spawn_min_ms {
            return Err(invalid("spawn_start_ms", "must not be below spawn_min_ms"));
        }
        if self.spawn_step_ms < 0.0 {
            return Err(invalid("spawn_step_ms", "must not be negative"));
        }
        if self.speedup_every == 0 {
            return Err(invalid("speedup_every", "must be at least 1"));
        }
        if self.max_bubbles == 0 {
            return Err(invalid("max_bubbles", "must be at least 1"));
        }
        if self.base_radius <= 0.0 {
            return Err(invalid("base_radius", "must be positive"));
        }
        if self.spawn_attempts == 0 {
            return Err(invalid("spawn_attempts", "must be at least 1"));
        }
        if self.vocabulary.is_empty() {
            return Err(invalid("vocabulary", "must contain at least one word"));
        }
        // Words are matched against trimmed, lowercased input
        if self
            .vocabulary
            .iter()
            .any(|w| w.is_empty() || w.trim() != w || w.to_lowercase() != *w)
        {
            return Err(invalid("vocabulary", "words must be non-empty, trimmed and lowercase"));
        }
        Ok(())
    }
}

/// Color Cannon balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTuning {
    pub spawn_ms: f64,
    pub target_radius: f32,
    pub cannon_orbit: f32,
    pub cannonball_radius: f32,
    pub cannonball_speed: f32,
    pub ball_radius: f32,
    pub ball_speed: f32,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            spawn_ms: SHOOTER_SPAWN_MS,
            target_radius: TARGET_RADIUS,
            cannon_orbit: CANNON_ORBIT,
            cannonball_radius: CANNONBALL_RADIUS,
            cannonball_speed: CANNONBALL_SPEED,
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
        }
    }
}

impl ShooterTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_ms <= 0.0 {
            return Err(invalid("spawn_ms", "must be positive"));
        }
        if self.cannonball_radius <= 0.0 {
            return Err(invalid("cannonball_radius", "must be positive"));
        }
        if self.ball_radius <= 0.0 {
            return Err(invalid("ball_radius", "must be positive"));
        }
        if self.cannonball_speed <= 0.0 {
            return Err(invalid("cannonball_speed", "must be positive"));
        }
        if self.ball_speed <= 0.0 {
            return Err(invalid("ball_speed", "must be positive"));
        }
        Ok(())
    }
}

/// Tuning for both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub wordpop: WordPopTuning,
    pub shooter: ShooterTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        self.wordpop.validate()?;
        self.shooter.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(WordPopTuning::default().vocabulary.len(), 35);
    }

    #[test]
    fn test_radius_from_word_length() {
        let t = WordPopTuning::default();
        assert_eq!(t.radius_for("fig"), 36.0);
        assert_eq!(t.radius_for("cherry"), 42.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "wordpop": { "max_bubbles": 5 } }"#).unwrap();
        assert_eq!(tuning.wordpop.max_bubbles, 5);
        assert_eq!(tuning.wordpop.tick_ms, WORD_TICK_MS);
        assert_eq!(tuning.shooter, ShooterTuning::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let err = Tuning::from_json(r#"{ "wordpop": { "vocabulary": [] } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "vocabulary",
                ..
            }
        ));
    }

    #[test]
    fn test_uppercase_word_rejected() {
        let mut t = WordPopTuning::default();
        t.vocabulary = vec!["Apple".to_string()];
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let err = Tuning::from_json(r#"{ "shooter": { "ball_speed": 0.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("ball_speed"));
    }
}
