/// Per-frame collision and lifecycle resolver.
///
/// `tick` runs once per frame after input has been applied. Step order
/// matters: collisions are resolved against last frame's positions, then
/// everything moves, then enemies fire, then new entities spawn.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::Collidable;
use crate::compute::{
    animate_background, die_for_duration, enemy_shots, is_boss, is_boss_za_warudo_active,
    is_finished, is_za_warudo_active, move_enemy, move_powerup, move_projectile, new_explosion,
    pick_power_up, revive, update_boss_effects, update_explosion, update_power_up_timers,
};
use crate::entities::{Explosion, Millis, Player, ProjectileKind, World};
use crate::platform::{HEIGHT, WIDTH};
use crate::spawn::SpawnDirector;

pub const PLAYER_DEATH_DURATION: Millis = 2000;
pub const ENEMY_EXPLOSION_DURATION: Millis = 500;
pub const BOSS_EXPLOSION_DURATION: Millis = 2000;

/// Share of real time that passes for whoever is caught in a time stop.
pub const TIME_SLOW_FACTOR: f64 = 0.25;

/// How far past the playfield an enemy may drift before it is dropped.
const ENEMY_EXIT_MARGIN: f64 = 10.0;

/// Share of real time passing for the player's side: its movement and its
/// Bullets. Slowed while any boss has stopped time.
pub fn player_time_scale(world: &World) -> f64 {
    if world.enemies.iter().any(is_boss_za_warudo_active) {
        TIME_SLOW_FACTOR
    } else {
        1.0
    }
}

/// Share of real time passing for the enemy side: enemy movement and Balls.
pub fn enemy_time_scale(world: &World) -> f64 {
    if is_za_warudo_active(&world.player) {
        TIME_SLOW_FACTOR
    } else {
        1.0
    }
}

pub fn player_side_dt(world: &World, delta: Millis) -> f64 {
    delta as f64 * player_time_scale(world)
}

pub fn enemy_side_dt(world: &World, delta: Millis) -> f64 {
    delta as f64 * enemy_time_scale(world)
}

fn out_of_playfield(x: f64, y: f64) -> bool {
    x < 0.0 || x > WIDTH || y < 0.0 || y > HEIGHT
}

fn kill_player(player: &mut Player, explosions: &mut Vec<Explosion>, now: Millis) {
    die_for_duration(player, now, PLAYER_DEATH_DURATION);
    explosions.push(new_explosion(player.position, now, PLAYER_DEATH_DURATION));
    debug!(at = now, revive_at = player.revive_at, "player down");
}

/// Advance the world by one frame.
pub fn tick(
    world: &mut World,
    spawner: &mut SpawnDirector,
    now: Millis,
    delta: Millis,
    rng: &mut impl Rng,
) {
    let player_dt = player_side_dt(world, delta);
    let enemy_scale = enemy_time_scale(world);
    let enemy_dt = delta as f64 * enemy_scale;

    // ── 1. Player revival and powerup countdowns ──────────────────────────────
    revive(&mut world.player, now);
    update_power_up_timers(&mut world.player, delta);

    // ── 2. Player vs. enemy Balls ─────────────────────────────────────────────
    for ball in world
        .projectiles
        .iter()
        .filter(|p| p.kind == ProjectileKind::Ball)
    {
        if world.player.intersects(ball) {
            kill_player(&mut world.player, &mut world.explosions, now);
        }
    }

    // ── 3. Player vs. enemies ─────────────────────────────────────────────────
    for enemy in &world.enemies {
        if world.player.intersects(enemy) {
            kill_player(&mut world.player, &mut world.explosions, now);
        }
    }

    // ── 4. Bullets vs. enemies ────────────────────────────────────────────────
    // Non-boss hits keep the bullet in flight; a boss absorbs the bullet.
    let mut spent = vec![false; world.projectiles.len()];
    for (i, bullet) in world.projectiles.iter().enumerate() {
        if bullet.kind != ProjectileKind::Bullet {
            continue;
        }
        let explosions = &mut world.explosions;
        let mut absorbed = false;
        world.enemies.retain_mut(|enemy| {
            if absorbed || !enemy.intersects(bullet) {
                return true;
            }
            if !is_boss(enemy) {
                explosions.push(new_explosion(enemy.position, now, ENEMY_EXPLOSION_DURATION));
                return false;
            }
            absorbed = true;
            enemy.life = enemy.life.saturating_sub(1);
            if enemy.life > 0 {
                return true;
            }
            info!(at = now, "boss destroyed");
            explosions.push(new_explosion(enemy.position, now, BOSS_EXPLOSION_DURATION));
            false
        });
        spent[i] = absorbed;
    }
    let mut index = 0;
    world.projectiles.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });

    // ── 5. Player vs. powerups ────────────────────────────────────────────────
    let player = &mut world.player;
    world.powerups.retain(|powerup| {
        if !player.intersects(powerup) {
            return true;
        }
        pick_power_up(player, powerup.kind);
        debug!(kind = ?powerup.kind, "powerup picked up");
        false
    });

    // ── 6. Backgrounds ────────────────────────────────────────────────────────
    animate_background(&mut world.far_stars, delta);
    animate_background(&mut world.near_stars, delta);

    // ── 7. Explosions ─────────────────────────────────────────────────────────
    world.explosions.retain_mut(|explosion| {
        update_explosion(explosion, now);
        !is_finished(explosion)
    });

    // ── 8. Projectiles and powerups move; anything off-screen goes ────────────
    world.projectiles.retain_mut(|projectile| {
        let dt = match projectile.kind {
            ProjectileKind::Bullet => player_dt,
            ProjectileKind::Ball => enemy_dt,
        };
        move_projectile(projectile, dt);
        !out_of_playfield(projectile.position.x, projectile.position.y)
    });
    world.powerups.retain_mut(|powerup| {
        move_powerup(powerup, delta as f64);
        powerup.position.y <= HEIGHT + ENEMY_EXIT_MARGIN
    });

    // ── 9. Enemies move; anything past the bottom or the sides goes ───────────
    world.enemies.retain_mut(|enemy| {
        move_enemy(enemy, enemy_dt, enemy_scale);
        update_boss_effects(enemy, now, delta);
        let p = enemy.position;
        p.y <= HEIGHT + ENEMY_EXIT_MARGIN
            && p.x >= -ENEMY_EXIT_MARGIN
            && p.x <= WIDTH + ENEMY_EXIT_MARGIN
    });

    // ── 10. Enemies fire, unless the player has stopped time ──────────────────
    if !is_za_warudo_active(&world.player) {
        for enemy in &mut world.enemies {
            world.projectiles.extend(enemy_shots(enemy, now, rng));
        }
    }

    // ── 11. Spawning ──────────────────────────────────────────────────────────
    let boss_alive = world.enemies.iter().any(is_boss);
    let spawns = spawner.spawn(now, boss_alive, rng);
    world.enemies.extend(spawns.enemies);
    world.powerups.extend(spawns.powerups);
}
