//! Sound cue mixing
//!
//! Turns simulation events and phase changes into sound cues with a resolved
//! volume. Playback itself belongs to whatever implements [`AudioSink`].

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Sword connects (enemy hurt or defeated)
    Hit,
    /// Knight takes a fatal hit
    Damage,
    /// Survived the countdown
    Success,
    /// Looping background track
    Music,
}

impl SoundEffect {
    /// Base volume before settings are applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Hit => 0.3,
            SoundEffect::Damage => 0.6,
            SoundEffect::Success => 0.7,
            SoundEffect::Music => 0.3,
        }
    }

    /// Playback rate (damage reuses the hit sample, slowed down)
    pub fn playback_rate(&self) -> f32 {
        match self {
            SoundEffect::Damage => 0.8,
            _ => 1.0,
        }
    }

    fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Music)
    }
}

/// A resolved request for the sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    Play {
        effect: SoundEffect,
        volume: f32,
        rate: f32,
    },
    StartMusic {
        volume: f32,
    },
    StopMusic,
}

/// Something that can actually make noise
pub trait AudioSink {
    fn submit(&mut self, command: AudioCommand);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    last_phase: Option<GamePhase>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            muted: settings.muted,
            music_playing: false,
            last_phase: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Flip mute; muting stops the music, unmuting lets the next phase check restart it
    pub fn toggle_mute(&mut self, sink: &mut impl AudioSink) {
        self.muted = !self.muted;
        log::info!("Sound {}", if self.muted { "muted" } else { "unmuted" });
        if self.muted && self.music_playing {
            self.music_playing = false;
            sink.submit(AudioCommand::StopMusic);
        }
        // Force the next phase update to re-evaluate music
        self.last_phase = None;
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        effect.base_volume() * self.master_volume * channel
    }

    /// Play a one-shot effect unless muted
    pub fn play(&self, effect: SoundEffect, sink: &mut impl AudioSink) {
        if self.muted {
            log::debug!("{effect:?} skipped (muted)");
            return;
        }
        sink.submit(AudioCommand::Play {
            effect,
            volume: self.effective_volume(effect),
            rate: effect.playback_rate(),
        });
    }

    /// Map simulation events to cues
    pub fn handle_events(&self, events: &[GameEvent], sink: &mut impl AudioSink) {
        for event in events {
            let effect = match event {
                GameEvent::EnemyHit { .. } | GameEvent::EnemyDefeated { .. } => SoundEffect::Hit,
                GameEvent::KnightDamaged => SoundEffect::Damage,
                GameEvent::Victory => SoundEffect::Success,
                GameEvent::EnemySpawned { .. } | GameEvent::ObstacleSpawned { .. } => continue,
            };
            self.play(effect, sink);
        }
    }

    /// Background music runs only while playing and unmuted
    pub fn update_phase(&mut self, phase: GamePhase, sink: &mut impl AudioSink) {
        if self.last_phase == Some(phase) {
            return;
        }
        self.last_phase = Some(phase);

        let want_music = phase == GamePhase::Playing && !self.muted;
        if want_music && !self.music_playing {
            self.music_playing = true;
            sink.submit(AudioCommand::StartMusic {
                volume: self.effective_volume(SoundEffect::Music),
            });
        } else if !want_music && self.music_playing {
            self.music_playing = false;
            sink.submit(AudioCommand::StopMusic);
        }
    }
}
