//! Audio cues using the Web Audio API
//!
//! Procedurally generated blips - no sound files to ship.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{ShooterEvent, WordPopEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Word bubble popped
    Pop,
    /// Spawn interval got shorter
    SpeedUp,
    /// Word Pop ran out of room
    GameOver,
    /// Cannon fired
    Fire,
    /// Shot destroyed a ball
    Hit,
    /// Cannon color switched
    ColorSwap,
}

impl SoundEffect {
    /// Cue for a Word Pop event, if it has one
    pub fn for_wordpop(event: &WordPopEvent) -> Option<Self> {
        match event {
            WordPopEvent::Popped { .. } => Some(SoundEffect::Pop),
            WordPopEvent::SpawnIntervalChanged { .. } => Some(SoundEffect::SpeedUp),
            WordPopEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            WordPopEvent::Spawned { .. } => None,
        }
    }

    /// Cue for a Color Cannon event, if it has one
    pub fn for_shooter(event: &ShooterEvent) -> Option<Self> {
        match event {
            ShooterEvent::Fired { .. } => Some(SoundEffect::Fire),
            ShooterEvent::Hit { .. } => Some(SoundEffect::Hit),
            ShooterEvent::ColorChanged { .. } => Some(SoundEffect::ColorSwap),
            ShooterEvent::Spawned { .. } => None,
        }
    }
}

/// Audio manager shared by both games
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.5,
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        let Some(ctx) = &self.ctx else { return };

        // Browsers start the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Pop => self.play_pop(ctx, vol),
            SoundEffect::SpeedUp => self.play_speed_up(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::Fire => self.play_fire(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::ColorSwap => self.play_color_swap(ctx, vol),
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single enveloped tone with an optional pitch sweep
    #[allow(clippy::too_many_arguments)]
    fn tone(
        &self,
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from_hz: f32,
        to_hz: f32,
        gain_level: f32,
        delay: f64,
        duration: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from_hz, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(gain_level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from_hz, t).ok();
        if to_hz != from_hz {
            osc.frequency()
                .exponential_ramp_to_value_at_time(to_hz, t + duration)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration + 0.02).ok();
    }

    /// Pop - short rising bubble
    fn play_pop(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Sine, 300.0, 900.0, vol * 0.5, 0.0, 0.08);
    }

    /// Speed-up - two quick ascending notes
    fn play_speed_up(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Triangle, 660.0, 660.0, vol * 0.35, 0.0, 0.1);
        self.tone(ctx, OscillatorType::Triangle, 880.0, 880.0, vol * 0.35, 0.1, 0.15);
    }

    /// Game over - descending sad slide
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Sawtooth, 400.0, 80.0, vol * 0.4, 0.0, 0.8);
    }

    /// Fire - quick falling zap
    fn play_fire(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Square, 900.0, 200.0, vol * 0.15, 0.0, 0.07);
    }

    /// Hit - thump plus crack
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Sine, 160.0, 50.0, vol * 0.6, 0.0, 0.15);
        self.tone(ctx, OscillatorType::Square, 1500.0, 1500.0, vol * 0.15, 0.0, 0.05);
    }

    /// Color swap - soft click
    fn play_color_swap(&self, ctx: &AudioContext, vol: f32) {
        self.tone(ctx, OscillatorType::Triangle, 500.0, 500.0, vol * 0.25, 0.0, 0.04);
    }
}
