//! Audio system
//!
//! Sound effects are looked up once through the asset provider and played
//! through a pluggable backend. Playback is fire-and-forget: missing
//! sounds are skipped and backend failures are logged, never returned.

use std::collections::HashMap;

use thiserror::Error;

use crate::assets::{AssetProvider, SoundHandle};
use crate::sim::{EnemyKind, GameEvent, PickupKind};

/// Background music file
pub const MUSIC_FILE: &str = "music.ogg";
/// Base volume for the music track
pub const MUSIC_VOLUME: f32 = 0.20;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Light enemy fires
    EnemyShootLight,
    /// Heavy enemy fires
    EnemyShootHeavy,
    /// Boss volley
    BossShoot,
    /// Player takes a hit
    Hit,
    /// Anything explodes
    Explosion,
    /// Health pickup collected
    PickHealth,
    /// Weapon module collected
    PickModule,
    /// Boss wave announced
    BossComing,
    /// Menu confirm
    ButtonPress,
    /// Session start
    Splash,
    GameLose,
    GameWin,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 13] = [
        SoundEffect::Shoot,
        SoundEffect::EnemyShootLight,
        SoundEffect::EnemyShootHeavy,
        SoundEffect::BossShoot,
        SoundEffect::Hit,
        SoundEffect::Explosion,
        SoundEffect::PickHealth,
        SoundEffect::PickModule,
        SoundEffect::BossComing,
        SoundEffect::ButtonPress,
        SoundEffect::Splash,
        SoundEffect::GameLose,
        SoundEffect::GameWin,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Shoot
            | SoundEffect::EnemyShootLight
            | SoundEffect::EnemyShootHeavy
            | SoundEffect::BossShoot => "shoot.wav",
            SoundEffect::Hit => "hit.wav",
            SoundEffect::Explosion => "explosion.wav",
            SoundEffect::PickHealth => "pick_hp.wav",
            SoundEffect::PickModule => "pick_module.wav",
            SoundEffect::BossComing => "bosscoming.wav",
            SoundEffect::ButtonPress => "button_press.wav",
            SoundEffect::Splash => "splash.wav",
            SoundEffect::GameLose => "gamelose.wav",
            SoundEffect::GameWin => "gamewin.wav",
        }
    }

    /// Mix level before master/sfx scaling
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.38,
            SoundEffect::EnemyShootLight => 0.12,
            SoundEffect::EnemyShootHeavy => 0.14,
            SoundEffect::BossShoot => 0.18,
            SoundEffect::Hit => 0.35,
            SoundEffect::Explosion => 0.35,
            SoundEffect::PickHealth | SoundEffect::PickModule => 0.65,
            SoundEffect::BossComing => 0.80,
            SoundEffect::ButtonPress | SoundEffect::Splash => 0.55,
            SoundEffect::GameLose | SoundEffect::GameWin => 0.75,
        }
    }

    /// Sound requested by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::PlayerFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::EnemyFired { kind: EnemyKind::Light } => Some(SoundEffect::EnemyShootLight),
            GameEvent::EnemyFired { kind: EnemyKind::Heavy } => Some(SoundEffect::EnemyShootHeavy),
            GameEvent::BossVolley => Some(SoundEffect::BossShoot),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::Hit),
            GameEvent::Explosion { .. } => Some(SoundEffect::Explosion),
            GameEvent::PickupCollected { kind: PickupKind::Health } => Some(SoundEffect::PickHealth),
            GameEvent::PickupCollected {
                kind: PickupKind::WeaponUpgrade,
            } => Some(SoundEffect::PickModule),
            GameEvent::WaveSpawned { boss: true, .. } => Some(SoundEffect::BossComing),
            GameEvent::WaveSpawned { boss: false, .. } | GameEvent::PickupDropped { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    Unavailable,
    #[error("failed to play {name}: {reason}")]
    Playback { name: String, reason: String },
}

/// Output device for sounds
pub trait SoundBackend {
    fn play(&mut self, sound: &SoundHandle, volume: f32) -> Result<(), AudioError>;

    /// Start looping background music
    fn play_music(&mut self, name: &str, volume: f32) -> Result<(), AudioError>;
}

/// Backend with no device; logs what would have played
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, sound: &SoundHandle, volume: f32) -> Result<(), AudioError> {
        log::trace!("play {} at {:.2}", sound.name, volume);
        Ok(())
    }

    fn play_music(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        log::debug!("music {} at {:.2}", name, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn SoundBackend>,
    handles: HashMap<SoundEffect, SoundHandle>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn SoundBackend>) -> Self {
        Self {
            backend,
            handles: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Resolve every effect through `assets`; missing files stay silent
    pub fn load(&mut self, assets: &mut dyn AssetProvider) {
        self.handles.clear();
        for effect in SoundEffect::ALL {
            if let Some(handle) = assets.sound(effect.file_name()) {
                self.handles.insert(effect, handle);
            }
        }
        log::info!(
            "Audio loaded {}/{} sound effects",
            self.handles.len(),
            SoundEffect::ALL.len()
        );
    }

    /// Queue and start the background track, if present
    pub fn start_music(&mut self, assets: &mut dyn AssetProvider) {
        if !assets.load_music(MUSIC_FILE) || self.muted {
            return;
        }
        let volume = MUSIC_VOLUME * self.master_volume * self.music_volume;
        if let Err(e) = self.backend.play_music(MUSIC_FILE, volume) {
            log::warn!("Music failed: {}", e);
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_loaded(&self, effect: SoundEffect) -> bool {
        self.handles.contains_key(&effect)
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(handle) = self.handles.get(&effect) else {
            return;
        };
        if let Err(e) = self.backend.play(handle, vol) {
            log::warn!("Sound {:?} failed: {}", effect, e);
        }
    }

    /// Play the sound of every event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Image;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Provider that knows a fixed set of sounds
    struct FakeAssets {
        sounds: Vec<&'static str>,
    }

    impl AssetProvider for FakeAssets {
        fn image(&mut self, name: &str, size: (u32, u32)) -> Image {
            Image::placeholder(name, size)
        }

        fn sound(&mut self, name: &str) -> Option<SoundHandle> {
            self.sounds.iter().any(|s| *s == name).then(|| SoundHandle {
                name: name.to_string(),
                path: PathBuf::from(name),
            })
        }

        fn load_music(&mut self, name: &str) -> bool {
            name == MUSIC_FILE
        }
    }

    type Played = Rc<RefCell<Vec<(String, f32)>>>;

    struct Recorder {
        played: Played,
        fail: bool,
    }

    impl SoundBackend for Recorder {
        fn play(&mut self, sound: &SoundHandle, volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::Unavailable);
            }
            self.played.borrow_mut().push((sound.name.clone(), volume));
            Ok(())
        }

        fn play_music(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
            self.played.borrow_mut().push((name.to_string(), volume));
            Ok(())
        }
    }

    fn manager(fail: bool) -> (AudioManager, Played) {
        let played = Played::default();
        let mut audio = AudioManager::new(Box::new(Recorder {
            played: played.clone(),
            fail,
        }));
        let mut assets = FakeAssets {
            sounds: vec!["shoot.wav", "explosion.wav"],
        };
        audio.load(&mut assets);
        (audio, played)
    }

    #[test]
    fn test_missing_sounds_are_skipped() {
        let (mut audio, played) = manager(false);
        assert!(audio.is_loaded(SoundEffect::Shoot));
        assert!(!audio.is_loaded(SoundEffect::Hit));

        audio.play(SoundEffect::Hit);
        audio.play(SoundEffect::Explosion);
        let played = played.borrow();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].0, "explosion.wav");
        assert!((played[0].1 - 0.8 * 0.35).abs() < 0.0001);
    }

    #[test]
    fn test_mute_silences_everything() {
        let (mut audio, played) = manager(false);
        audio.set_muted(true);
        audio.play(SoundEffect::Shoot);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_backend_errors_are_swallowed() {
        let (mut audio, played) = manager(true);
        audio.play(SoundEffect::Shoot);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_events_map_to_sounds() {
        let (mut audio, played) = manager(false);
        audio.play_events(&[
            GameEvent::PlayerFired { shots: 2 },
            GameEvent::WaveSpawned { wave: 2, boss: false },
            GameEvent::EnemyFired { kind: EnemyKind::Heavy },
        ]);
        let played = played.borrow();
        assert_eq!(played.len(), 2);
        assert!((played[1].1 - 0.8 * 0.14).abs() < 0.0001);
    }

    #[test]
    fn test_event_sound_table() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::WaveSpawned { wave: 4, boss: true }),
            Some(SoundEffect::BossComing)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PickupCollected {
                kind: PickupKind::WeaponUpgrade
            }),
            Some(SoundEffect::PickModule)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PickupDropped {
                kind: PickupKind::Health,
                pos: glam::Vec2::ZERO
            }),
            None
        );
    }

    #[test]
    fn test_music_uses_track_volume() {
        let (mut audio, played) = manager(false);
        audio.set_music_volume(1.0);
        audio.set_master_volume(1.0);
        let mut assets = FakeAssets { sounds: vec![] };
        audio.start_music(&mut assets);
        let played = played.borrow();
        assert_eq!(played[0].0, MUSIC_FILE);
        assert!((played[0].1 - MUSIC_VOLUME).abs() < 0.0001);
    }
}
