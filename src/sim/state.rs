//! Session state and core simulation types
//!
//! A `Session` is one playthrough. It exclusively owns every entity
//! collection; entities carry stable `u32` handles from `EntityIds`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Boss, EnemyKind, FormationEnemy};
use super::hazard::{Meteor, Pickup, PickupKind};
use super::player::Player;
use super::projectile::{Explosion, Projectile};
use super::starfield::{STAR_COUNT, Starfield};
use super::wave::{SpawnTargets, WaveManager};

/// Allocator for entity handles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Side effects produced by a step, consumed by audio and UI layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a fan of `shots` bullets
    PlayerFired { shots: usize },
    /// A formation enemy fired
    EnemyFired { kind: EnemyKind },
    /// The boss fired its fan
    BossVolley,
    /// Player took a hit; `health` is what remains
    PlayerHit { health: u32 },
    /// Something blew up
    Explosion { pos: Vec2 },
    /// A pickup dropped from a kill
    PickupDropped { kind: PickupKind, pos: Vec2 },
    /// Player collected a pickup
    PickupCollected { kind: PickupKind },
    /// A new wave entered the field
    WaveSpawned { wave: u32, boss: bool },
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player backed out to the menu
    ReturnToMenu { score: u64 },
    /// Player closed the game
    Quit { score: u64 },
    /// Boss destroyed
    Win { score: u64 },
    /// Player destroyed or formation breached
    Lose { score: u64 },
}

impl Outcome {
    pub fn score(&self) -> u64 {
        match *self {
            Outcome::ReturnToMenu { score }
            | Outcome::Quit { score }
            | Outcome::Win { score }
            | Outcome::Lose { score } => score,
        }
    }
}

/// One playthrough
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the session RNG was created from
    pub seed: u64,
    /// All randomness in the session flows through this generator
    pub rng: Pcg32,
    pub ids: EntityIds,
    pub score: u64,
    /// Best score known when the session started (HUD only)
    pub high_score: u64,
    pub paused: bool,
    /// Simulated seconds (excludes paused time)
    pub time: f32,
    pub player: Player,
    pub enemies: Vec<FormationEnemy>,
    pub bosses: Vec<Boss>,
    pub meteors: Vec<Meteor>,
    pub pickups: Vec<Pickup>,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub waves: WaveManager,
    /// Seconds since the last meteor
    pub meteor_timer: f32,
    pub starfield: Starfield,
    /// Side effects of the most recent step
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Start a session and spawn its first wave
    pub fn new(seed: u64, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(STAR_COUNT, &mut rng);
        let mut session = Self {
            seed,
            rng,
            ids: EntityIds::default(),
            score: 0,
            high_score,
            paused: false,
            time: 0.0,
            player: Player::default(),
            enemies: Vec::new(),
            bosses: Vec::new(),
            meteors: Vec::new(),
            pickups: Vec::new(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            explosions: Vec::new(),
            waves: WaveManager::new(),
            meteor_timer: 0.0,
            starfield,
            events: Vec::new(),
        };
        log::info!("Session started with seed {}", seed);
        session.spawn_wave();
        session
    }

    /// Ask the wave manager for the next wave
    pub fn spawn_wave(&mut self) {
        let boss = self.waves.spawn_wave(
            SpawnTargets {
                ids: &mut self.ids,
                enemies: &mut self.enemies,
                bosses: &mut self.bosses,
            },
            &mut self.rng,
        );
        self.events.push(GameEvent::WaveSpawned {
            wave: self.waves.current_wave(),
            boss,
        });
    }

    /// Spawn an explosion effect at `pos`
    pub fn explode(&mut self, pos: Vec2) {
        let id = self.ids.next();
        self.explosions.push(Explosion::new(id, pos));
        self.events.push(GameEvent::Explosion { pos });
    }

    /// Roll the drop table and place any pickup at `pos`
    pub fn maybe_drop(&mut self, pos: Vec2) {
        if let Some(kind) = PickupKind::roll_drop(&mut self.rng) {
            let id = self.ids.next();
            self.pickups.push(Pickup::new(id, kind, pos));
            self.events.push(GameEvent::PickupDropped { kind, pos });
        }
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.bosses.first()
    }

    /// True while the current wave is a formation with members left
    pub fn formation_active(&self) -> bool {
        self.waves.formation.is_some() && !self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_spawns_first_wave() {
        let session = Session::new(12345, 40);
        assert_eq!(session.enemies.len(), 9);
        assert!(session.bosses.is_empty());
        assert_eq!(session.waves.wave_number, 2);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 40);
        assert!(session.formation_active());
        assert_eq!(
            session.events,
            vec![GameEvent::WaveSpawned { wave: 1, boss: false }]
        );
    }

    #[test]
    fn test_same_seed_same_first_wave() {
        let a = Session::new(99999, 0);
        let b = Session::new(99999, 0);
        let kinds_a: Vec<EnemyKind> = a.enemies.iter().map(|e| e.kind).collect();
        let kinds_b: Vec<EnemyKind> = b.enemies.iter().map(|e| e.kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut ids = EntityIds::default();
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
    }

    #[test]
    fn test_outcome_score() {
        assert_eq!(Outcome::Win { score: 512 }.score(), 512);
        assert_eq!(Outcome::Quit { score: 3 }.score(), 3);
    }
}
