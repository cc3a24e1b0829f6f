//! Star Sweep - A vertical formation shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, waves, collisions, scoring)
//! - `game`: Menu / playing / game-over state machine
//! - `renderer`: Draw list + HUD handed to an output sink
//! - `assets`: Image/sound lookup with placeholder fallback
//! - `audio`: Sound effect catalog and mixing
//! - `persistence`: File-backed high score store
//! - `platform`: Frame clock, input latching, headless autopilot
//! - `settings`: JSON-backed preferences

pub mod assets;
pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, Screen};
pub use highscores::{HighScore, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 74.0;
    pub const PLAYER_HEIGHT: f32 = 84.0;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_SPAWN_LIFT: f32 = 88.0;
    pub const PLAYER_SPEED: f32 = 420.0;
    pub const PLAYER_HP_MAX: u32 = 5;
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.16;
    pub const WEAPON_TIER_MAX: u8 = 4;

    /// Energy model
    pub const ENERGY_MAX: f32 = 100.0;
    pub const ENERGY_REGEN_PER_SEC: f32 = 18.0;
    /// Cost of one trigger pull per weapon tier
    pub const ENERGY_SHOT_COST: f32 = 3.0;
    pub const ENERGY_BOOST_COST_PER_SEC: f32 = 35.0;
    pub const BOOST_MULT: f32 = 1.65;

    /// Projectiles
    pub const BULLET_SPEED_PLAYER: f32 = 780.0;
    pub const BULLET_SPEED_ENEMY: f32 = 340.0;
    /// Fraction of enemy bullet speed used for horizontal aim
    pub const ENEMY_AIM_FACTOR: f32 = 0.32;

    /// Formation enemies
    pub const ENEMY_HP_LIGHT: i32 = 1;
    pub const ENEMY_HP_HEAVY: i32 = 2;
    /// Floor on the fire-rate multiplier (prevents huge waits)
    pub const ENEMY_FIRE_RATE_FLOOR: f32 = 0.35;

    /// Boss
    pub const BOSS_HP: i32 = 60;
    pub const BOSS_WIDTH: f32 = 280.0;
    pub const BOSS_HEIGHT: f32 = 200.0;
    pub const BOSS_START_TOP: f32 = -220.0;
    pub const BOSS_ENTRY_Y: f32 = 60.0;
    pub const BOSS_ENTRY_SPEED: f32 = 220.0;
    pub const BOSS_PATROL_SPEED: f32 = 240.0;
    pub const BOSS_PATROL_MARGIN: f32 = 60.0;
    pub const BOSS_FIRST_VOLLEY: f32 = 1.2;
    pub const BOSS_VOLLEY_SPREAD: [f32; 5] = [-240.0, -120.0, 0.0, 120.0, 240.0];
    pub const BOSS_BULLET_MULT: f32 = 1.2;
    /// Wave number that brings the boss instead of a formation
    pub const BOSS_WAVE: u32 = 4;

    /// Formation sweep
    pub const FORMATION_SPEED: f32 = 80.0;
    pub const FORMATION_SPEED_PER_WAVE: f32 = 5.0;
    pub const FORMATION_DROP: f32 = 28.0;
    pub const FORMATION_MARGIN: f32 = 40.0;
    pub const FORMATION_START_Y: f32 = 70.0;
    pub const FORMATION_DX: f32 = 92.0;
    pub const FORMATION_DY: f32 = 70.0;
    /// Enemies reaching this line end the run
    pub const BREACH_LINE: f32 = FIELD_HEIGHT - 130.0;

    /// Meteors
    pub const ENABLE_METEORS: bool = true;
    pub const METEOR_SPEED_MIN: i32 = 120;
    pub const METEOR_SPEED_MAX: i32 = 220;
    pub const METEOR_SPEED_PER_WAVE: f32 = 12.0;
    pub const METEOR_DRIFT_MAX: i32 = 140;
    pub const METEOR_SIZES: [f32; 3] = [52.0, 66.0, 82.0];
    pub const SPAWN_METEOR_BASE_MS: f32 = 1400.0;
    pub const SPAWN_METEOR_MIN_MS: f32 = 600.0;
    pub const SPAWN_METEOR_MS_PER_WAVE: f32 = 30.0;

    /// Pickups
    pub const PICKUP_FALL_SPEED: f32 = 180.0;
    pub const DROP_CHANCE: f32 = 0.18;
    pub const DROP_HP_WEIGHT: f32 = 0.55;

    /// Explosion effect
    pub const EXPLOSION_DURATION: f32 = 0.30;
    pub const EXPLOSION_FRAMES: u32 = 9;

    /// Scoring
    pub const SCORE_LIGHT: u64 = 12;
    pub const SCORE_HEAVY: u64 = 25;
    pub const SCORE_METEOR: u64 = 8;
    pub const SCORE_BOSS: u64 = 500;

    /// Longest frame the clock will report (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

