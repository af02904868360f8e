//! Web Audio synth
//!
//! Procedurally generated sound effects, no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::SoundEffect;
use crate::settings::Settings;

pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Shoot => self.play_shoot(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::Explosion => self.play_explosion(ctx, vol),
            SoundEffect::PowerUp => self.play_power_up(ctx, vol),
            SoundEffect::Damage => self.play_damage(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

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

    /// Single oscillator sweeping `from` -> `to` over `length` seconds
    fn sweep(
        &self,
        ctx: &AudioContext,
        osc_type: OscillatorType,
        (from, to): (f32, f32),
        level: f32,
        length: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + length)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + length + 0.02).ok();
    }

    /// Shoot - short laser chirp
    fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Square, (880.0, 220.0), vol * 0.12, 0.08);
    }

    /// Hit - soft tap
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Triangle, (300.0, 200.0), vol * 0.25, 0.05);
    }

    /// Explosion - low boom with a crack on top
    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Sawtooth, (100.0, 30.0), vol * 0.45, 0.35);

        let t = ctx.current_time();
        if let Some((osc, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Power-up - rising arpeggio
    fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Damage - harsh downward buzz
    fn play_damage(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Sawtooth, (220.0, 55.0), vol * 0.4, 0.3);
    }

    /// Game over - G4 F4 E4 D4 C4 walking down
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 349.23, 329.63, 293.66, 261.63].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}
