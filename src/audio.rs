//! Audio cues
//!
//! The game only ever triggers discrete cues. Whether they are heard is up to
//! the sink: a missing or broken backend must never change gameplay.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Ball or bullet hits a brick
    BrickHit,
    /// Ball fell out of the arena
    LifeLost,
    /// Extra life caught
    LifeGained,
    /// Any other power-up caught
    PowerUpCaught,
    /// A level begins (including the first)
    LevelStart,
}

impl SoundCue {
    /// Relative loudness of each cue
    pub fn gain(&self) -> f32 {
        match self {
            SoundCue::BrickHit => 0.4,
            SoundCue::LifeLost => 0.8,
            SoundCue::LifeGained => 0.7,
            SoundCue::PowerUpCaught => 0.6,
            SoundCue::LevelStart => 0.7,
        }
    }
}

/// Anything that accepts cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Output device behind an `AudioManager`
pub trait SoundBackend {
    /// Play `cue` at `volume` (0.0 - 1.0, already mixed)
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn SoundBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn SoundBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend available - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager with volumes and mute taken from settings
    pub fn from_settings(
        backend: Option<Box<dyn SoundBackend>>,
        settings: &crate::Settings,
    ) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Whether a backend is attached
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume() * cue.gain();
        if vol <= 0.0 {
            return;
        }

        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(cue, vol);
    }
}
