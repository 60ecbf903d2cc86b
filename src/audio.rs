//! Audio using the Web Audio API
//!
//! Sound effects are synthesized on the fly. Ambience loops come from the
//! page's `<audio>` elements, one per `Ambience`.

use wasm_bindgen::JsCast;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::sim::PlaygroundEvent;
use crate::theme::Ambience;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Donut tapped
    Tap,
    /// New donut sprinkled in
    Sprinkle,
    /// Donuts scattered by a pinch
    Scatter,
    /// Device shaken
    Shake,
}

impl SoundEffect {
    /// Sound for a playground event, if any
    pub fn for_event(event: &PlaygroundEvent) -> Option<Self> {
        match event {
            PlaygroundEvent::Tapped(_) => Some(SoundEffect::Tap),
            PlaygroundEvent::Spawned(_) => Some(SoundEffect::Sprinkle),
            PlaygroundEvent::Scattered => Some(SoundEffect::Scatter),
            PlaygroundEvent::Shaken => Some(SoundEffect::Shake),
            PlaygroundEvent::Reset => None,
        }
    }
}

/// Audio manager for the playground
pub struct AudioManager {
    ctx: Option<AudioContext>,
    ambience: Option<HtmlAudioElement>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }
        Self {
            ctx,
            ambience: None,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context and ambience (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
        if !self.muted {
            if let Some(track) = &self.ambience {
                let _ = track.play();
            }
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        if let Some(track) = &self.ambience {
            track.set_volume(self.ambience_volume());
        }
    }

    /// Mute/unmute everything, pausing the ambience loop while muted
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(track) = &self.ambience {
            if muted {
                let _ = track.pause();
            } else {
                let _ = track.play();
            }
        }
    }

    /// Switch the looping ambience track
    pub fn set_ambience(&mut self, ambience: Ambience) {
        if let Some(old) = self.ambience.take() {
            let _ = old.pause();
        }

        let track = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(ambience.track_id()))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());

        let Some(track) = track else {
            log::warn!("No audio element for ambience '{}'", ambience.as_str());
            return;
        };

        track.set_loop(true);
        track.set_volume(self.ambience_volume());
        if !self.muted {
            let _ = track.play();
        }
        self.ambience = Some(track);
    }

    fn ambience_volume(&self) -> f64 {
        (self.master_volume * 0.5) as f64
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play whatever sounds a batch of playground events calls for
    pub fn play_events(&self, events: &[PlaygroundEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Tap => self.play_tap(ctx, vol),
            SoundEffect::Sprinkle => self.play_sprinkle(ctx, vol),
            SoundEffect::Scatter => self.play_scatter(ctx, vol),
            SoundEffect::Shake => self.play_shake(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
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

    /// Tap - soft doughy boop
    fn play_tap(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Sprinkle - two quick bright chimes
    fn play_sprinkle(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [880.0, 1320.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            let start = t + i as f64 * 0.05;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.2, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(start + 0.2).ok();
        }
    }

    /// Scatter - falling whoosh
    fn play_scatter(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.35)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Shake - low rattle
    fn play_shake(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }
}
