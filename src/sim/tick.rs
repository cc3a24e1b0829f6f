//! Per-frame session step
//!
//! One call per rendered frame. The order of the stages below is part of
//! the game rules: collisions are resolved last, enemies before the boss
//! before meteors, and a boss kill ends the step immediately.

use super::collision::{Aabb, collide_group, consume_overlapping};
use super::hazard::{Meteor, PickupKind};
use super::state::{GameEvent, Outcome, Session};
use crate::consts::*;

/// Normalized input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Trigger held
    pub fire: bool,
    /// Boost held
    pub boost: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Menu confirm (edge-triggered)
    pub confirm: bool,
    /// Back out (edge-triggered)
    pub cancel: bool,
    /// Window closed / quit requested
    pub quit: bool,
}

/// Seconds between meteors on a given wave
pub fn meteor_interval(wave: u32) -> f32 {
    let ms = (SPAWN_METEOR_BASE_MS - wave as f32 * SPAWN_METEOR_MS_PER_WAVE).max(SPAWN_METEOR_MIN_MS);
    ms / 1000.0
}

/// Drop the items whose flag is set, keeping order
fn remove_flagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut flags = flags.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

impl Session {
    /// Advance the session by `dt` seconds.
    ///
    /// Returns `None` while play continues. Side effects of the step are
    /// left in `self.events`.
    pub fn step(&mut self, dt: f32, input: &TickInput) -> Option<Outcome> {
        self.events.clear();

        if input.quit {
            return Some(Outcome::Quit { score: self.score });
        }
        if input.cancel {
            return Some(Outcome::ReturnToMenu { score: self.score });
        }

        if input.pause {
            self.paused = !self.paused;
            log::debug!("Session {}", if self.paused { "paused" } else { "resumed" });
        }
        if self.paused {
            return None;
        }

        let dt = dt.max(0.0);
        self.time += dt;

        self.player.update(dt, input);

        if input.fire && self.player.can_shoot() {
            let ids = &mut self.ids;
            let shots = self.player.shoot(|| ids.next());
            self.events.push(GameEvent::PlayerFired { shots: shots.len() });
            self.player_shots.extend(shots);
        }

        if !self.enemies.is_empty()
            && let Some(formation) = self.waves.formation.as_mut()
        {
            let speed = FORMATION_SPEED + self.waves.wave_number as f32 * FORMATION_SPEED_PER_WAVE;
            formation.update(dt, speed, FORMATION_DROP, FORMATION_MARGIN);
        }

        let star_speed = 275.0 + self.waves.wave_number as f32 * 6.0;
        self.starfield.update(dt, star_speed, &mut self.rng);

        self.update_entities(dt);
        self.enemy_fire();

        if self.enemies.is_empty() && self.bosses.is_empty() {
            self.spawn_wave();
        }

        if self.waves.formation.is_some()
            && self.enemies.iter().any(|e| e.bounds().bottom() >= BREACH_LINE)
        {
            log::info!("Formation breached the defence line");
            return Some(self.lose());
        }

        if ENABLE_METEORS && self.bosses.is_empty() {
            self.tick_meteor_spawner(dt);
        }

        self.resolve_collisions()
    }

    fn update_entities(&mut self, dt: f32) {
        let formation = self.waves.formation.as_ref();
        for enemy in &mut self.enemies {
            enemy.update(dt, formation);
        }
        for boss in &mut self.bosses {
            boss.update(dt);
        }
        self.meteors.retain_mut(|m| m.update(dt));
        self.pickups.retain_mut(|p| p.update(dt));
        self.player_shots.retain_mut(|s| s.update(dt));
        self.enemy_shots.retain_mut(|s| s.update(dt));
        self.explosions.retain_mut(|e| e.update(dt));
    }

    fn enemy_fire(&mut self) {
        let player_pos = self.player.pos;

        for enemy in &mut self.enemies {
            let ids = &mut self.ids;
            if let Some(shot) = enemy.try_shoot(|| ids.next(), player_pos, &mut self.rng) {
                self.events.push(GameEvent::EnemyFired { kind: enemy.kind });
                self.enemy_shots.push(shot);
            }
        }

        for boss in &mut self.bosses {
            let ids = &mut self.ids;
            if let Some(volley) = boss.try_shoot(|| ids.next(), &mut self.rng) {
                self.events.push(GameEvent::BossVolley);
                self.enemy_shots.extend(volley);
            }
        }
    }

    fn tick_meteor_spawner(&mut self, dt: f32) {
        self.meteor_timer += dt;
        if self.meteor_timer >= meteor_interval(self.waves.wave_number) {
            self.meteor_timer = 0.0;
            let meteor = Meteor::spawn(self.ids.next(), self.waves.wave_number, &mut self.rng);
            log::debug!("Meteor {} spawned at x={:.0}", meteor.id, meteor.pos.x);
            self.meteors.push(meteor);
        }
    }

    fn lose(&self) -> Outcome {
        log::info!("Session lost with score {}", self.score);
        Outcome::Lose { score: self.score }
    }

    /// One hit on the player; true when it was fatal
    fn hit_player(&mut self) -> bool {
        self.player.take_damage(1);
        self.events.push(GameEvent::PlayerHit {
            health: self.player.health,
        });
        self.player.is_dead()
    }

    fn resolve_collisions(&mut self) -> Option<Outcome> {
        // Enemies vs player shots
        let boxes: Vec<Aabb> = self.enemies.iter().map(|e| e.bounds()).collect();
        let hits = collide_group(&boxes, &mut self.player_shots);
        let mut dead = vec![false; self.enemies.len()];
        for (i, count) in hits.into_iter().enumerate() {
            let enemy = &mut self.enemies[i];
            if count > 0 && enemy.damage(count) {
                let (pos, kind) = (enemy.pos, enemy.kind);
                dead[i] = true;
                self.explode(pos);
                self.maybe_drop(pos);
                self.score += kind.score();
            }
        }
        remove_flagged(&mut self.enemies, &dead);

        // Boss vs player shots; a kill ends the step
        let boxes: Vec<Aabb> = self.bosses.iter().map(|b| b.bounds()).collect();
        let hits = collide_group(&boxes, &mut self.player_shots);
        for (i, count) in hits.into_iter().enumerate() {
            if count > 0 && self.bosses[i].damage(count) {
                let boss = self.bosses.remove(i);
                self.explode(boss.pos);
                self.score += SCORE_BOSS;
                log::info!("Boss destroyed, session won with score {}", self.score);
                return Some(Outcome::Win { score: self.score });
            }
        }

        // Meteors vs player shots
        let boxes: Vec<Aabb> = self.meteors.iter().map(|m| m.bounds()).collect();
        let hits = collide_group(&boxes, &mut self.player_shots);
        let mut dead = vec![false; self.meteors.len()];
        for (i, count) in hits.into_iter().enumerate() {
            let meteor = &mut self.meteors[i];
            if count > 0 && meteor.damage(count) {
                let pos = meteor.pos;
                dead[i] = true;
                self.explode(pos);
                self.maybe_drop(pos);
                self.score += SCORE_METEOR;
            }
        }
        remove_flagged(&mut self.meteors, &dead);

        let player_box = self.player.bounds();

        // Enemy shots vs player: one hit however many connect
        if consume_overlapping(&player_box, &mut self.enemy_shots) > 0 && self.hit_player() {
            return Some(self.lose());
        }

        // Body contact: enemies and meteors are destroyed, the boss is not
        let before = self.enemies.len() + self.meteors.len();
        self.enemies.retain(|e| !e.bounds().overlaps(&player_box));
        self.meteors.retain(|m| !m.bounds().overlaps(&player_box));
        let rammed = self.enemies.len() + self.meteors.len() < before;
        let boss_contact = self.bosses.iter().any(|b| b.bounds().overlaps(&player_box));
        if (rammed || boss_contact) && self.hit_player() {
            return Some(self.lose());
        }

        // Pickups
        let mut collected = Vec::new();
        self.pickups.retain(|p| {
            let hit = p.bounds().overlaps(&player_box);
            if hit {
                collected.push(p.kind);
            }
            !hit
        });
        for kind in collected {
            match kind {
                PickupKind::Health => self.player.heal(1),
                PickupKind::WeaponUpgrade => self.player.upgrade_weapon(),
            }
            log::debug!("Collected {:?} pickup", kind);
            self.events.push(GameEvent::PickupCollected { kind });
        }

        None
    }
}
