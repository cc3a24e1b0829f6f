//! Draw list construction
//!
//! A `Frame` is everything an output sink needs to show one frame:
//! positioned sprites in paint order, the starfield, HUD values and the
//! screen overlay.

use std::f32::consts::PI;

use glam::Vec2;

use crate::consts::EXPLOSION_FRAMES;
use crate::sim::{Boss, EnemyKind, Explosion, PickupKind, Player, Session, Star};

/// Entity tag used when walking all collections for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy(EnemyKind),
    Boss,
    Meteor,
    Pickup(PickupKind),
    PlayerShot,
    EnemyShot,
    Explosion,
}

impl EntityKind {
    /// Image file drawn for this kind
    pub fn sprite(self) -> &'static str {
        match self {
            EntityKind::Player => "player.png",
            EntityKind::Enemy(EnemyKind::Light) => "enemy1.png",
            EntityKind::Enemy(EnemyKind::Heavy) => "enemy2.png",
            EntityKind::Boss => "boss.png",
            EntityKind::Meteor => "meteor.png",
            EntityKind::Pickup(PickupKind::Health) => "hp.png",
            EntityKind::Pickup(PickupKind::WeaponUpgrade) => "upgrade_module.png",
            EntityKind::PlayerShot | EntityKind::EnemyShot | EntityKind::Explosion => "spark.png",
        }
    }
}

/// One positioned drawable
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub kind: EntityKind,
    /// Center
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, clockwise
    pub rotation: f32,
    /// 0..=255
    pub alpha: u8,
}

impl DrawItem {
    fn new(kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            pos,
            size,
            rotation: 0.0,
            alpha: 255,
        }
    }

    pub fn sprite(&self) -> &'static str {
        self.kind.sprite()
    }

    /// Integer pixel size for image lookup
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.size.x.round() as u32, self.size.y.round() as u32)
    }
}

/// Heads-up display values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    pub health: u32,
    pub max_health: u32,
    pub score: u64,
    pub high_score: u64,
    /// Most recently spawned wave
    pub wave: u32,
    /// 0..=1
    pub energy: f32,
    pub weapon_tier: u8,
    pub boss_health: Option<i32>,
    pub paused: bool,
}

/// Full-screen overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    Menu { high_score: u64 },
    GameOver { won: bool, score: u64, high_score: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub stars: Vec<Star>,
    pub items: Vec<DrawItem>,
    pub hud: Option<Hud>,
    pub overlay: Overlay,
}

impl Frame {
    pub fn menu(high_score: u64) -> Self {
        Self {
            stars: Vec::new(),
            items: Vec::new(),
            hud: None,
            overlay: Overlay::Menu { high_score },
        }
    }

    pub fn game_over(won: bool, score: u64, high_score: u64) -> Self {
        Self {
            stars: Vec::new(),
            items: Vec::new(),
            hud: None,
            overlay: Overlay::GameOver { won, score, high_score },
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.items.iter().filter(|i| i.kind == kind).count()
    }
}

fn explosion_item(ex: &Explosion) -> DrawItem {
    let frame = ex.frame().min(EXPLOSION_FRAMES - 1);
    let mut item = DrawItem::new(EntityKind::Explosion, ex.pos, Vec2::splat(26.0 + 10.0 * frame as f32));
    item.rotation = (22.0 * frame as f32).to_radians();
    item.alpha = 255u32.saturating_sub(frame * 28) as u8;
    item
}

pub fn hud(session: &Session) -> Hud {
    Hud {
        health: session.player.health,
        max_health: session.player.max_health,
        score: session.score,
        high_score: session.high_score.max(session.score),
        wave: session.waves.current_wave(),
        energy: session.player.energy_fraction(),
        weapon_tier: session.player.weapon_tier,
        boss_health: session.boss().map(|b| b.health.max(0)),
        paused: session.paused,
    }
}

/// Snapshot a session into a draw list.
///
/// Paint order: meteors, pickups, enemies, boss, shots, player, explosions.
pub fn build_frame(session: &Session) -> Frame {
    let mut items = Vec::with_capacity(
        session.enemies.len()
            + session.meteors.len()
            + session.pickups.len()
            + session.player_shots.len()
            + session.enemy_shots.len()
            + session.explosions.len()
            + 2,
    );

    items.extend(
        session
            .meteors
            .iter()
            .map(|m| DrawItem::new(EntityKind::Meteor, m.pos, Vec2::splat(m.size))),
    );
    items.extend(
        session
            .pickups
            .iter()
            .map(|p| DrawItem::new(EntityKind::Pickup(p.kind), p.pos, p.kind.size())),
    );
    items.extend(
        session
            .enemies
            .iter()
            .map(|e| DrawItem::new(EntityKind::Enemy(e.kind), e.pos, e.kind.size())),
    );
    items.extend(
        session
            .bosses
            .iter()
            .map(|b| DrawItem::new(EntityKind::Boss, b.pos, Boss::SIZE)),
    );
    items.extend(
        session
            .player_shots
            .iter()
            .map(|s| DrawItem::new(EntityKind::PlayerShot, s.pos, s.size)),
    );
    items.extend(session.enemy_shots.iter().map(|s| {
        let mut item = DrawItem::new(EntityKind::EnemyShot, s.pos, s.size);
        // Spark sprite points up; enemy shots fly down
        item.rotation = PI;
        item
    }));
    items.push(DrawItem::new(EntityKind::Player, session.player.pos, Player::SIZE));
    items.extend(session.explosions.iter().map(explosion_item));

    Frame {
        stars: session.starfield.stars.clone(),
        items,
        hud: Some(hud(session)),
        overlay: if session.paused { Overlay::Paused } else { Overlay::None },
    }
}
