//! Wave generation
//!
//! Waves cycle through four formation layouts; wave `BOSS_WAVE` brings the
//! boss instead.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Boss, EnemyKind, FormationEnemy};
use super::formation::{FormationController, FormationId};
use super::state::EntityIds;
use crate::consts::*;

/// Formation layouts, in wave order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// Rows of 1, 2, 3, 2, 1
    Diamond,
    /// One row of 10
    Line,
    /// Two stacked rows of 8
    TwoLines,
    /// 11 points with the apex in the middle
    VShape,
}

impl Pattern {
    /// Layout used by a (1-based) wave number
    pub fn for_wave(wave: u32) -> Self {
        match (wave.max(1) - 1) % 4 {
            0 => Pattern::Diamond,
            1 => Pattern::Line,
            2 => Pattern::TwoLines,
            _ => Pattern::VShape,
        }
    }

    /// Local-space points around horizontal center `cx`, first row at y = 0
    pub fn points(self, cx: f32) -> Vec<Vec2> {
        let (dx, dy) = (FORMATION_DX, FORMATION_DY);
        match self {
            Pattern::Diamond => {
                let mut pts = Vec::with_capacity(9);
                for (row, n) in [1, 2, 3, 2, 1].into_iter().enumerate() {
                    pts.extend(line(cx, row as f32 * dy, n, dx));
                }
                pts
            }
            Pattern::Line => line(cx, 0.0, 10, dx),
            Pattern::TwoLines => {
                let mut pts = line(cx, 0.0, 8, dx);
                pts.extend(line(cx, dy, 8, dx));
                pts
            }
            Pattern::VShape => {
                let n = 11;
                let half = (n / 2) as i32;
                (0..n as i32)
                    .map(|i| {
                        let d = (i - half).abs() as f32;
                        Vec2::new(cx + (i - half) as f32 * dx, d * dy)
                    })
                    .collect()
            }
        }
    }
}

/// `n` evenly spaced points centered on `cx`
fn line(cx: f32, y: f32, n: usize, dx: f32) -> Vec<Vec2> {
    let x0 = cx - (n as f32 - 1.0) * dx / 2.0;
    (0..n).map(|i| Vec2::new(x0 + i as f32 * dx, y)).collect()
}

/// Chance of a heavy enemy on a given wave
pub fn heavy_chance(wave: u32) -> f32 {
    (0.20 + (wave.max(1) - 1) as f32 * 0.12).min(0.75)
}

/// Fire-rate multiplier for enemies of a given wave
pub fn fire_rate(wave: u32) -> f32 {
    1.0 + wave as f32 * 0.06
}

/// Collections a wave spawns into
pub struct SpawnTargets<'a> {
    pub ids: &'a mut EntityIds,
    pub enemies: &'a mut Vec<FormationEnemy>,
    pub bosses: &'a mut Vec<Boss>,
}

/// Produces successive waves and owns the live formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveManager {
    /// Number of the next wave to spawn (1-based)
    pub wave_number: u32,
    /// Formation driving the current wave, if it is not a boss wave
    pub formation: Option<FormationController>,
    next_formation_id: u32,
}

impl Default for WaveManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveManager {
    pub fn new() -> Self {
        Self {
            wave_number: 1,
            formation: None,
            next_formation_id: 1,
        }
    }

    /// Number of the most recently spawned wave (0 before the first)
    pub fn current_wave(&self) -> u32 {
        self.wave_number - 1
    }

    /// Spawn the next wave; returns true when it was the boss
    pub fn spawn_wave(&mut self, targets: SpawnTargets<'_>, rng: &mut impl Rng) -> bool {
        let wave = self.wave_number;
        self.wave_number += 1;
        self.formation = None;

        if wave == BOSS_WAVE {
            let boss = Boss::new(targets.ids.next());
            log::info!("Wave {}: boss {} incoming", wave, boss.id);
            targets.bosses.push(boss);
            return true;
        }

        let pattern = Pattern::for_wave(wave);
        let points = pattern.points(FIELD_WIDTH / 2.0);
        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);

        let id = FormationId(self.next_formation_id);
        self.next_formation_id += 1;
        let controller = FormationController::new(id, min_x, max_x, FORMATION_START_Y);

        let p_heavy = heavy_chance(wave);
        let rate = fire_rate(wave);
        for base in &points {
            let kind = if rng.random::<f32>() < p_heavy {
                EnemyKind::Heavy
            } else {
                EnemyKind::Light
            };
            let enemy = FormationEnemy::new(targets.ids.next(), &controller, *base, kind, rate, rng);
            targets.enemies.push(enemy);
        }

        log::info!(
            "Wave {}: {:?} formation of {} (heavy chance {:.2})",
            wave,
            pattern,
            points.len(),
            p_heavy
        );
        self.formation = Some(controller);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Pools {
        ids: EntityIds,
        enemies: Vec<FormationEnemy>,
        bosses: Vec<Boss>,
    }

    impl Pools {
        fn new() -> Self {
            Self {
                ids: EntityIds::default(),
                enemies: Vec::new(),
                bosses: Vec::new(),
            }
        }

        fn targets(&mut self) -> SpawnTargets<'_> {
            SpawnTargets {
                ids: &mut self.ids,
                enemies: &mut self.enemies,
                bosses: &mut self.bosses,
            }
        }
    }

    #[test]
    fn test_pattern_point_counts() {
        assert_eq!(Pattern::Diamond.points(640.0).len(), 9);
        assert_eq!(Pattern::Line.points(640.0).len(), 10);
        assert_eq!(Pattern::TwoLines.points(640.0).len(), 16);
        assert_eq!(Pattern::VShape.points(640.0).len(), 11);
    }

    #[test]
    fn test_patterns_are_centered() {
        for pattern in [Pattern::Diamond, Pattern::Line, Pattern::TwoLines, Pattern::VShape] {
            let pts = pattern.points(640.0);
            let min_x = pts.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
            let max_x = pts.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
            assert!(((min_x + max_x) / 2.0 - 640.0).abs() < 0.001, "{pattern:?}");
        }
    }

    #[test]
    fn test_v_shape_apex_at_center() {
        let pts = Pattern::VShape.points(640.0);
        let apex = pts[5];
        assert_eq!(apex, Vec2::new(640.0, 0.0));
        assert!(pts.iter().all(|p| p.y >= apex.y));
        assert_eq!(pts[0].y, 5.0 * FORMATION_DY);
    }

    #[test]
    fn test_pattern_cycle() {
        assert_eq!(Pattern::for_wave(1), Pattern::Diamond);
        assert_eq!(Pattern::for_wave(2), Pattern::Line);
        assert_eq!(Pattern::for_wave(3), Pattern::TwoLines);
        assert_eq!(Pattern::for_wave(4), Pattern::VShape);
        assert_eq!(Pattern::for_wave(5), Pattern::Diamond);
        assert_eq!(Pattern::for_wave(8), Pattern::VShape);
    }

    #[test]
    fn test_heavy_chance_is_capped() {
        assert!((heavy_chance(1) - 0.20).abs() < 0.0001);
        assert!((heavy_chance(3) - 0.44).abs() < 0.0001);
        assert_eq!(heavy_chance(6), 0.75);
        assert_eq!(heavy_chance(50), 0.75);
        assert!(fire_rate(5) > fire_rate(1));
    }

    #[test]
    fn test_spawn_sequence_with_boss_on_wave_four() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut pools = Pools::new();
        let mut waves = WaveManager::new();
        let expected = [9usize, 10, 16];

        for (i, count) in expected.iter().enumerate() {
            pools.enemies.clear();
            let boss = waves.spawn_wave(pools.targets(), &mut rng);
            assert!(!boss);
            assert_eq!(pools.enemies.len(), *count);
            assert_eq!(waves.wave_number, i as u32 + 2);
            let formation = waves.formation.as_ref().expect("formation wave");
            assert!(pools.enemies.iter().all(|e| e.formation == formation.id));
        }

        pools.enemies.clear();
        let boss = waves.spawn_wave(pools.targets(), &mut rng);
        assert!(boss);
        assert!(waves.formation.is_none());
        assert!(pools.enemies.is_empty());
        assert_eq!(pools.bosses.len(), 1);
        assert_eq!(waves.wave_number, 5);

        // Wave 5 returns to the diamond
        let boss = waves.spawn_wave(pools.targets(), &mut rng);
        assert!(!boss);
        assert_eq!(pools.enemies.len(), 9);
        assert_eq!(waves.current_wave(), 5);
    }

    #[test]
    fn test_enemies_start_at_formation_row() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut pools = Pools::new();
        let mut waves = WaveManager::new();
        waves.spawn_wave(pools.targets(), &mut rng);
        let top = pools.enemies.iter().map(|e| e.pos.y).fold(f32::INFINITY, f32::min);
        assert_eq!(top, FORMATION_START_Y);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut pools = Pools::new();
        let mut waves = WaveManager::new();
        waves.spawn_wave(pools.targets(), &mut rng);
        waves.spawn_wave(pools.targets(), &mut rng);
        let mut ids: Vec<u32> = pools.enemies.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 19);
    }
}
