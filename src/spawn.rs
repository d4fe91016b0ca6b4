/// Timed spawning of enemies, formations, powerups and bosses.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::compute::{new_common, new_first_boss, new_flyer, new_powerup, new_second_boss};
use crate::entities::{Enemy, Millis, Powerup, PowerupKind};
use crate::platform::WIDTH;
use crate::vector::Vector2D;

pub const COMMON_SPAWN_INTERVAL: Millis = 500;
const FIRST_COMMON_SPAWN: Millis = 2000;
const SPAWN_MARGIN: f64 = 10.0;
const SPAWN_Y: f64 = -10.0;

pub const FORMATION_SIZE: u32 = 10;
pub const FORMATION_GAP: Millis = 120;
pub const FORMATION_PAUSE_MIN: Millis = 3000;
pub const FORMATION_PAUSE_MAX: Millis = 6000;
const FIRST_FORMATION: Millis = 7000;

pub const POWERUP_INTERVAL_MIN: Millis = 15_000;
pub const POWERUP_INTERVAL_MAX: Millis = 25_000;

pub const FIRST_BOSS_AT: Millis = 45_000;
pub const BOSS_COOLDOWN: Millis = 30_000;
pub const FIRST_BOSS_LIFE: u32 = 30;
pub const SECOND_BOSS_LIFE: u32 = 40;
const BOSS_SPAWN_Y: f64 = -30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    First,
    Second,
}

/// What one call to `SpawnDirector::spawn` produced.
#[derive(Debug, Default)]
pub struct Spawns {
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
}

#[derive(Clone, Debug)]
pub struct SpawnDirector {
    pub next_common_spawn: Millis,
    pub next_advanced_spawn: Millis,
    /// Column the current formation drops from: 20% or 80% of the width.
    pub advanced_spawn_x: f64,
    pub formation_count: u32,
    pub next_powerup_spawn: Millis,
    pub next_boss_spawn: Millis,
    pub next_boss: BossKind,
    /// A boss spawned by us is still in the world.
    pub boss_on_field: bool,
}

impl SpawnDirector {
    /// Schedule relative to `start`, the time of the first frame.
    pub fn new(start: Millis, rng: &mut impl Rng) -> Self {
        Self {
            next_common_spawn: start + FIRST_COMMON_SPAWN,
            next_advanced_spawn: start + FIRST_FORMATION,
            advanced_spawn_x: WIDTH * 0.20,
            formation_count: 0,
            next_powerup_spawn: start + rng.gen_range(POWERUP_INTERVAL_MIN..=POWERUP_INTERVAL_MAX),
            next_boss_spawn: start + FIRST_BOSS_AT,
            next_boss: BossKind::First,
            boss_on_field: false,
        }
    }

    /// Run every timer once against `now`. `boss_alive` tells whether any
    /// boss is still in the world.
    pub fn spawn(&mut self, now: Millis, boss_alive: bool, rng: &mut impl Rng) -> Spawns {
        let mut spawns = Spawns::default();

        if now > self.next_common_spawn {
            let x = rng.gen_range(SPAWN_MARGIN..WIDTH - SPAWN_MARGIN);
            spawns.enemies.push(new_common(Vector2D::new(x, SPAWN_Y), rng));
            self.next_common_spawn = now + COMMON_SPAWN_INTERVAL;
        }

        if now > self.next_advanced_spawn {
            spawns.enemies.push(self.next_formation_member(now, rng));
        }

        if now > self.next_powerup_spawn {
            let kind = if rng.gen_bool(0.5) {
                PowerupKind::ZaWarudo
            } else {
                PowerupKind::LaserMode
            };
            let x = rng.gen_range(SPAWN_MARGIN..WIDTH - SPAWN_MARGIN);
            spawns
                .powerups
                .push(new_powerup(kind, Vector2D::new(x, SPAWN_Y), rng));
            self.next_powerup_spawn =
                now + rng.gen_range(POWERUP_INTERVAL_MIN..=POWERUP_INTERVAL_MAX);
        }

        if let Some(boss) = self.boss(now, boss_alive) {
            spawns.enemies.push(boss);
        }

        spawns
    }

    fn next_formation_member(&mut self, now: Millis, rng: &mut impl Rng) -> Enemy {
        let spawn_on_right = self.advanced_spawn_x > WIDTH / 2.0;
        let flyer = new_flyer(Vector2D::new(self.advanced_spawn_x, SPAWN_Y));
        trace!(spawn_on_right, count = self.formation_count, "flyer spawned");

        self.formation_count += 1;
        if self.formation_count < FORMATION_SIZE {
            self.next_advanced_spawn = now + FORMATION_GAP;
        } else {
            self.formation_count = 0;
            self.advanced_spawn_x = if rng.gen_bool(0.5) {
                WIDTH * 0.2
            } else {
                WIDTH * 0.8
            };
            self.next_advanced_spawn =
                now + rng.gen_range(FORMATION_PAUSE_MIN..=FORMATION_PAUSE_MAX);
            debug!(
                next_x = self.advanced_spawn_x,
                next_at = self.next_advanced_spawn,
                "formation complete"
            );
        }
        flyer
    }

    fn boss(&mut self, now: Millis, boss_alive: bool) -> Option<Enemy> {
        if boss_alive {
            self.boss_on_field = true;
            return None;
        }
        if self.boss_on_field {
            self.boss_on_field = false;
            self.next_boss_spawn = now + BOSS_COOLDOWN;
            debug!(next_at = self.next_boss_spawn, "boss gone");
            return None;
        }
        if now <= self.next_boss_spawn {
            return None;
        }

        let position = Vector2D::new(WIDTH / 2.0, BOSS_SPAWN_Y);
        let boss = match self.next_boss {
            BossKind::First => new_first_boss(position, FIRST_BOSS_LIFE),
            BossKind::Second => new_second_boss(position, SECOND_BOSS_LIFE, now),
        };
        info!(kind = ?self.next_boss, at = now, "boss spawned");
        self.next_boss = match self.next_boss {
            BossKind::First => BossKind::Second,
            BossKind::Second => BossKind::First,
        };
        self.boss_on_field = true;
        Some(boss)
    }
}
