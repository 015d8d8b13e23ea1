//! Audio port: sound cues and background melody
//!
//! Procedurally generated tones - no external files needed! The simulation
//! only talks to [`AudioSink`]; the Web Audio backend lives behind
//! `target_arch = "wasm32"` and everything else gets [`SilentAudio`].

/// Sound cues triggered by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Wing flap chirp
    Flap,
    /// Coin pickup
    Coin,
    /// Golden egg arpeggio
    Egg,
    /// Power-up sweep
    PowerUp,
    /// Damage thud
    Hit,
    /// Obstacle passed
    Score,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator in a sound cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub freq: f32,
    /// Exponential pitch sweep target, if any
    pub sweep_to: Option<f32>,
    pub duration_s: f64,
    /// Start offset from the cue trigger
    pub delay_s: f64,
    pub wave: Waveform,
}

impl Voice {
    const fn tone(freq: f32, duration_s: f64, delay_s: f64, wave: Waveform) -> Self {
        Self {
            freq,
            sweep_to: None,
            duration_s,
            delay_s,
            wave,
        }
    }
}

const FLAP: [Voice; 2] = [
    Voice::tone(600.0, 0.08, 0.0, Waveform::Sine),
    Voice::tone(800.0, 0.06, 0.03, Waveform::Sine),
];

const COIN: [Voice; 2] = [
    Voice::tone(880.0, 0.1, 0.0, Waveform::Sine),
    Voice::tone(1320.0, 0.15, 0.06, Waveform::Sine),
];

const EGG: [Voice; 4] = [
    Voice::tone(523.0, 0.1, 0.0, Waveform::Sine),
    Voice::tone(659.0, 0.1, 0.08, Waveform::Sine),
    Voice::tone(784.0, 0.1, 0.16, Waveform::Sine),
    Voice::tone(1047.0, 0.15, 0.24, Waveform::Sine),
];

const POWER_UP: [Voice; 1] = [Voice {
    freq: 300.0,
    sweep_to: Some(1200.0),
    duration_s: 0.4,
    delay_s: 0.0,
    wave: Waveform::Sine,
}];

const HIT: [Voice; 2] = [
    Voice::tone(100.0, 0.3, 0.0, Waveform::Sawtooth),
    Voice::tone(60.0, 0.2, 0.0, Waveform::Square),
];

const SCORE: [Voice; 1] = [Voice::tone(660.0, 0.08, 0.0, Waveform::Square)];

impl Sound {
    /// Oscillators making up this cue
    pub fn voices(&self) -> &'static [Voice] {
        match self {
            Sound::Flap => &FLAP,
            Sound::Coin => &COIN,
            Sound::Egg => &EGG,
            Sound::PowerUp => &POWER_UP,
            Sound::Hit => &HIT,
            Sound::Score => &SCORE,
        }
    }
}

/// A melody step; `freq == 0` is a rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub duration_ms: f32,
}

const fn note(freq: f32, duration_ms: f32) -> Note {
    Note { freq, duration_ms }
}

/// Background loop (C major, ends on a rest)
pub const MELODY: [Note; 15] = [
    note(523.0, 200.0),
    note(587.0, 200.0),
    note(659.0, 200.0),
    note(523.0, 200.0),
    note(659.0, 200.0),
    note(698.0, 200.0),
    note(784.0, 400.0),
    note(784.0, 200.0),
    note(698.0, 200.0),
    note(659.0, 200.0),
    note(587.0, 200.0),
    note(523.0, 200.0),
    note(587.0, 200.0),
    note(523.0, 400.0),
    note(0.0, 200.0),
];

/// Steps through [`MELODY`] on game time
#[derive(Debug, Clone, Default)]
pub struct MelodySequencer {
    playing: bool,
    index: usize,
    until_next_ms: f32,
}

impl MelodySequencer {
    pub fn start(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.index = 0;
        self.until_next_ms = 0.0;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance by `dt_ms` and return the notes to strike now (rests skipped)
    pub fn advance(&mut self, dt_ms: f32) -> Vec<Note> {
        let mut struck = Vec::new();
        if !self.playing {
            return struck;
        }
        self.until_next_ms -= dt_ms.max(0.0);
        while self.until_next_ms <= 0.0 {
            let step = MELODY[self.index];
            if step.freq > 0.0 {
                struck.push(step);
            }
            self.until_next_ms += step.duration_ms;
            self.index = (self.index + 1) % MELODY.len();
        }
        struck
    }
}

/// Audio collaborator. Calls are fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
    fn start_music(&mut self);
    fn stop_music(&mut self);
    /// Flip mute; returns the new state
    fn toggle_mute(&mut self) -> bool;
    fn is_muted(&self) -> bool;
    /// Advance time-based playback (melody)
    fn tick(&mut self, dt_ms: f32);
}

/// Backend that makes no sound but keeps mute and melody state
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    muted: bool,
    music: MelodySequencer,
}

impl SilentAudio {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            music: MelodySequencer::default(),
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_playing()
    }
}

impl AudioSink for SilentAudio {
    fn play(&mut self, _sound: Sound) {}

    fn start_music(&mut self) {
        self.music.start();
    }

    fn stop_music(&mut self) {
        self.music.stop();
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn tick(&mut self, dt_ms: f32) {
        self.music.advance(dt_ms);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioNode, GainNode, OscillatorType};

    use super::{AudioSink, MelodySequencer, Note, Sound, Voice, Waveform};
    use crate::settings::Settings;

    /// SFX bus level before user volume
    const SFX_LEVEL: f32 = 0.3;
    /// Music bus level before user volume
    const MUSIC_LEVEL: f32 = 0.15;

    /// Web Audio backend
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        sfx_bus: Option<GainNode>,
        music_bus: Option<GainNode>,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
        music: MelodySequencer,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            let sfx_bus = ctx.as_ref().and_then(make_bus);
            let music_bus = ctx.as_ref().and_then(make_bus);

            let mut audio = Self {
                ctx,
                sfx_bus,
                music_bus,
                sfx_volume: settings.master_volume * settings.sfx_volume,
                music_volume: settings.master_volume * settings.music_volume,
                muted: settings.muted,
                music: MelodySequencer::default(),
            };
            audio.apply_levels();
            audio
        }

        fn apply_levels(&mut self) {
            let (sfx, music) = if self.muted {
                (0.0, 0.0)
            } else {
                (SFX_LEVEL * self.sfx_volume, MUSIC_LEVEL * self.music_volume)
            };
            if let Some(bus) = &self.sfx_bus {
                bus.gain().set_value(sfx);
            }
            if let Some(bus) = &self.music_bus {
                bus.gain().set_value(music);
            }
        }

        /// Resume audio context (browsers require a user gesture)
        fn resume(&self) {
            if let Some(ctx) = &self.ctx
                && ctx.state() == web_sys::AudioContextState::Suspended
            {
                let _ = ctx.resume();
            }
        }

        fn voice(&self, ctx: &AudioContext, bus: &AudioNode, voice: &Voice) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(oscillator_type(voice.wave));
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(bus).ok()?;

            let t = ctx.current_time() + voice.delay_s;
            osc.frequency().set_value_at_time(voice.freq, t).ok()?;
            if let Some(target) = voice.sweep_to {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(target, t + voice.duration_s * 0.75)
                    .ok()?;
            }
            gain.gain().set_value_at_time(0.3, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + voice.duration_s)
                .ok()?;

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + voice.duration_s).ok()?;
            Some(())
        }

        fn strike(&self, note: Note) {
            let (Some(ctx), Some(bus)) = (&self.ctx, &self.music_bus) else {
                return;
            };
            let voice = Voice::tone(
                note.freq,
                f64::from(note.duration_ms) / 1000.0 * 0.9,
                0.0,
                Waveform::Sine,
            );
            let _ = self.voice(ctx, bus, &voice);
        }
    }

    fn make_bus(ctx: &AudioContext) -> Option<GainNode> {
        let gain = ctx.create_gain().ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some(gain)
    }

    fn oscillator_type(wave: Waveform) -> OscillatorType {
        match wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, sound: Sound) {
            if self.muted {
                return;
            }
            self.resume();
            let (Some(ctx), Some(bus)) = (&self.ctx, &self.sfx_bus) else {
                return;
            };
            for voice in sound.voices() {
                let _ = self.voice(ctx, bus, voice);
            }
        }

        fn start_music(&mut self) {
            self.resume();
            self.music.start();
        }

        fn stop_music(&mut self) {
            self.music.stop();
        }

        fn toggle_mute(&mut self) -> bool {
            self.muted = !self.muted;
            self.apply_levels();
            self.muted
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn tick(&mut self, dt_ms: f32) {
            for note in self.music.advance(dt_ms) {
                if !self.muted {
                    self.strike(note);
                }
            }
        }
    }
}
