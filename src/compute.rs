/// Per-entity game logic.
///
/// Every function operates on one entity (or the closed enum of its
/// variants) and takes the current time explicitly. All randomness comes
/// through an injected `Rng` so tests can seed it.

use std::f64::consts::PI;

use rand::Rng;

use crate::entities::{
    Background, Color, Direction, Dive, Enemy, EnemyKind, Explosion, FirstBoss, Flyer, Millis,
    PatrolLeg, Player, Powerup, PowerupKind, Projectile, ProjectileKind, SecondBoss, World,
};
use crate::platform::{HEIGHT, WIDTH};
use crate::vector::Vector2D;
use crate::weapon::{new_projectile, Weapon, PISTOL_RECOIL};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Closest the player may get to the top edge.
const PLAYER_TOP_MARGIN: f64 = 25.0;

/// Flyers and the first boss start turning once they cross this share of
/// the playfield height.
const DIVE_TURN_THRESHOLD: f64 = 0.30;
/// Radians per millisecond.
pub const DIVE_TURN_RATE: f64 = 0.003;
/// How close the heading must come to horizontal before it locks.
const DIVE_LOCK_TOLERANCE: f64 = 0.05;
const FIRST_BOSS_SPEED_FACTOR: f64 = 4.0;

pub const VOLLEY_INTERVAL: Millis = 1000;
pub const VOLLEY_SPEED: f64 = 0.30;
pub const VOLLEY_SPREAD: f64 = PI / 8.0;
pub const VOLLEY_JITTER: f64 = PI / 12.0;

const ENEMY_SHOT_VELOCITY: Vector2D = Vector2D::new(0.0, 0.45);
/// Added to a random share of the recoil after each Common shot.
const COMMON_SHOT_DELAY: Millis = 200;
/// Added to a random share of the recoil after each boss shot.
const BOSS_SHOT_DELAY: Millis = 15;

const PATROL_TOP: f64 = 0.20;
const PATROL_BOTTOM: f64 = 0.85;
const PATROL_LEFT: f64 = 0.15;
const PATROL_RIGHT: f64 = 0.85;
/// Patrol distance per frame at full speed.
const PATROL_STEP: f64 = 1.0;

/// The second boss stops time this long after it appears.
pub const BOSS_ZA_WARUDO_DELAY: Millis = 5000;
const BOSS_ZA_WARUDO_RING_GROWTH: f64 = 3.0;

const STAR_COUNT: usize = 20;

// ── Constructors ──────────────────────────────────────────────────────────────

pub fn new_player(position: Vector2D) -> Player {
    Player {
        position,
        velocity: Vector2D::of_scalar(0.25),
        radius: 12.0,
        color: Color::Blue,
        is_alive: true,
        revive_at: 0,
        gun: Weapon::pistol(),
        za_warudo_timer: 0,
        laser_mode_timer: 0,
    }
}

/// Straight faller with a randomized speed of 0.20–0.35 px/ms.
pub fn new_common(position: Vector2D, rng: &mut impl Rng) -> Enemy {
    Enemy {
        position,
        velocity: Vector2D::new(0.0, rng.gen_range(0.20..0.35)),
        radius: 9.0,
        color: Color::Cyan,
        life: 1,
        gun: Some(Weapon::cannon()),
        kind: EnemyKind::Common,
    }
}

pub fn new_flyer(position: Vector2D) -> Enemy {
    Enemy {
        position,
        velocity: Vector2D::new(0.42, 0.42),
        radius: 12.0,
        color: Color::Magenta,
        life: 1,
        gun: None,
        kind: EnemyKind::Flyer(Flyer {
            dive: Dive {
                angle: 3.0 * PI / 2.0,
                rotation_speed: 0.0,
            },
            can_shoot: false,
            next_volley_at: 0,
        }),
    }
}

pub fn new_first_boss(position: Vector2D, life: u32) -> Enemy {
    Enemy {
        position,
        velocity: Vector2D::new(0.05, 0.05),
        radius: 30.0,
        color: Color::Red,
        life,
        gun: Some(Weapon::cannon()),
        kind: EnemyKind::FirstBoss(FirstBoss {
            dive: Dive {
                angle: 3.0 * PI / 2.0,
                rotation_speed: 0.0,
            },
            max_life: life,
        }),
    }
}

pub fn new_second_boss(position: Vector2D, life: u32, now: Millis) -> Enemy {
    Enemy {
        position,
        velocity: Vector2D::new(0.05, 0.05),
        radius: 30.0,
        color: Color::Yellow,
        life,
        gun: Some(Weapon::triple_cannon()),
        kind: EnemyKind::SecondBoss(SecondBoss {
            leg: PatrolLeg::Entering,
            can_shoot: false,
            shift: true,
            max_life: life,
            spawned_at: now,
            za_warudo_timer: 0,
            za_warudo_radius: 0.0,
            za_warudo_used: false,
        }),
    }
}

pub fn new_powerup(kind: PowerupKind, position: Vector2D, rng: &mut impl Rng) -> Powerup {
    let color = match kind {
        PowerupKind::ZaWarudo => Color::Yellow,
        PowerupKind::LaserMode => Color::Orange,
    };
    Powerup {
        position,
        velocity: Vector2D::new(0.0, rng.gen_range(0.08..0.15)),
        radius: 8.0,
        color,
        kind,
    }
}

pub fn new_explosion(position: Vector2D, now: Millis, duration: Millis) -> Explosion {
    Explosion {
        position,
        started_at: now,
        duration,
        elapsed: 0,
    }
}

pub fn new_background(
    color: Color,
    count: usize,
    size: f64,
    speed: f64,
    rng: &mut impl Rng,
) -> Background {
    let stars = (0..count)
        .map(|_| Vector2D::new(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT)))
        .collect();
    Background {
        stars,
        color,
        size,
        speed,
    }
}

/// Initial world: the player mid-screen, no enemies, two star layers.
pub fn init_world(rng: &mut impl Rng) -> World {
    World {
        player: new_player(Vector2D::new(WIDTH / 2.0, HEIGHT / 2.0)),
        projectiles: Vec::with_capacity(200),
        enemies: Vec::with_capacity(20),
        explosions: Vec::with_capacity(15),
        powerups: Vec::new(),
        far_stars: new_background(Color::DarkGray, STAR_COUNT, 2.0, 0.045, rng),
        near_stars: new_background(Color::Gray, STAR_COUNT, 3.0, 0.070, rng),
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Move one step in `direction`, clamped to the playfield. No-op while dead.
pub fn move_player(player: &mut Player, dt: f64, direction: Direction) {
    if !player.is_alive {
        return;
    }
    let p = &mut player.position;
    let v = player.velocity;
    match direction {
        Direction::North => p.y = (p.y - dt * v.y).max(PLAYER_TOP_MARGIN),
        Direction::South => p.y = (p.y + dt * v.y).min(HEIGHT),
        Direction::East => p.x = (p.x + dt * v.x).min(WIDTH),
        Direction::West => p.x = (p.x - dt * v.x).max(0.0),
    }
}

/// Fire straight up from two radii above the ship's center.
pub fn player_shot(player: &mut Player, now: Millis) -> Option<Projectile> {
    if !player.is_alive {
        return None;
    }
    let recoil = if is_laser_mode_active(player) {
        PISTOL_RECOIL / 2
    } else {
        player.gun.recoil()
    };
    let muzzle = Vector2D::new(player.position.x, player.position.y - 2.0 * player.radius);
    player
        .gun
        .fire_with_recoil(now, recoil, muzzle, Vector2D::new(0.0, -1.0))
}

pub fn die_for_duration(player: &mut Player, now: Millis, duration: Millis) {
    player.is_alive = false;
    player.revive_at = now + duration;
}

pub fn revive(player: &mut Player, now: Millis) {
    if now > player.revive_at {
        player.is_alive = true;
    }
}

/// Reset the matching timer to the full duration.
pub fn pick_power_up(player: &mut Player, kind: PowerupKind) {
    match kind {
        PowerupKind::ZaWarudo => player.za_warudo_timer = kind.duration(),
        PowerupKind::LaserMode => player.laser_mode_timer = kind.duration(),
    }
}

pub fn update_power_up_timers(player: &mut Player, delta: Millis) {
    player.za_warudo_timer = player.za_warudo_timer.saturating_sub(delta);
    player.laser_mode_timer = player.laser_mode_timer.saturating_sub(delta);
}

pub fn is_za_warudo_active(player: &Player) -> bool {
    player.za_warudo_timer > 0
}

pub fn is_laser_mode_active(player: &Player) -> bool {
    player.laser_mode_timer > 0
}

// ── Enemies: movement ─────────────────────────────────────────────────────────

pub fn is_boss(enemy: &Enemy) -> bool {
    matches!(
        enemy.kind,
        EnemyKind::FirstBoss(_) | EnemyKind::SecondBoss(_)
    )
}

/// Advance `enemy` by `dt` milliseconds according to its own movement law.
///
/// `time_scale` is the share of real time passing for the enemy side. `dt`
/// already carries it; the second boss patrols per frame, not per
/// millisecond, so its step is scaled directly.
pub fn move_enemy(enemy: &mut Enemy, dt: f64, time_scale: f64) {
    match &mut enemy.kind {
        EnemyKind::Common => {
            enemy.position.x += enemy.velocity.x * dt;
            enemy.position.y += enemy.velocity.y * dt;
        }
        EnemyKind::Flyer(flyer) => {
            dive(&mut enemy.position, enemy.velocity, &mut flyer.dive, dt, 1.0);
            if lock_heading(&mut flyer.dive) {
                flyer.can_shoot = true;
            }
        }
        EnemyKind::FirstBoss(boss) => {
            dive(
                &mut enemy.position,
                enemy.velocity,
                &mut boss.dive,
                dt,
                FIRST_BOSS_SPEED_FACTOR,
            );
        }
        EnemyKind::SecondBoss(boss) => {
            patrol(&mut enemy.position, boss, PATROL_STEP * time_scale);
        }
    }
}

fn dive(position: &mut Vector2D, velocity: Vector2D, dive: &mut Dive, dt: f64, speed: f64) {
    let prev_y = position.y;

    position.x += speed * velocity.x * dive.angle.cos() * dt;
    position.y -= speed * velocity.y * dive.angle.sin() * dt;

    dive.angle += dive.rotation_speed * dt;

    let threshold = HEIGHT * DIVE_TURN_THRESHOLD;
    if prev_y < threshold && position.y >= threshold {
        dive.rotation_speed = if position.x < WIDTH / 2.0 {
            DIVE_TURN_RATE
        } else {
            -DIVE_TURN_RATE
        };
    }
}

/// Stop turning once the heading is back to horizontal. Returns true on lock.
fn lock_heading(dive: &mut Dive) -> bool {
    let target = if dive.rotation_speed > 0.0 {
        3.0 * PI
    } else if dive.rotation_speed < 0.0 {
        0.0
    } else {
        return false;
    };
    if (dive.angle - target).abs() < DIVE_LOCK_TOLERANCE {
        dive.rotation_speed = 0.0;
        dive.angle = target;
        return true;
    }
    false
}

/// `step` units along the current leg; corners snap exactly.
fn patrol(position: &mut Vector2D, boss: &mut SecondBoss, step: f64) {
    let top = HEIGHT * PATROL_TOP;
    let bottom = HEIGHT * PATROL_BOTTOM;
    let left = WIDTH * PATROL_LEFT;
    let right = WIDTH * PATROL_RIGHT;

    let next = match boss.leg {
        PatrolLeg::Entering => {
            position.y += step;
            (position.y >= top).then(|| {
                position.y = top;
                PatrolLeg::Top
            })
        }
        PatrolLeg::Top => {
            position.x += step;
            (position.x >= right).then(|| {
                position.x = right;
                PatrolLeg::Right
            })
        }
        PatrolLeg::Right => {
            position.y += step;
            (position.y >= bottom).then(|| {
                position.y = bottom;
                PatrolLeg::Bottom
            })
        }
        PatrolLeg::Bottom => {
            position.x -= step;
            (position.x <= left).then(|| {
                position.x = left;
                PatrolLeg::Left
            })
        }
        PatrolLeg::Left => {
            position.y -= step;
            (position.y <= top).then(|| {
                position.y = top;
                PatrolLeg::Top
            })
        }
    };

    if let Some(leg) = next {
        boss.leg = leg;
        boss.can_shoot = true;
    }
}

/// Per-frame bookkeeping of the second boss: shape flip and its time stop.
pub fn update_boss_effects(enemy: &mut Enemy, now: Millis, delta: Millis) {
    let EnemyKind::SecondBoss(boss) = &mut enemy.kind else {
        return;
    };
    boss.shift = !boss.shift;

    boss.za_warudo_timer = boss.za_warudo_timer.saturating_sub(delta);
    if !boss.za_warudo_used && now > boss.spawned_at + BOSS_ZA_WARUDO_DELAY {
        boss.za_warudo_timer = PowerupKind::ZaWarudo.duration();
        boss.za_warudo_used = true;
        tracing::info!(at = now, "second boss stopped time");
    }

    if boss.za_warudo_timer > 0 {
        boss.za_warudo_radius += BOSS_ZA_WARUDO_RING_GROWTH;
    } else {
        boss.za_warudo_radius = 0.0;
    }
}

pub fn is_boss_za_warudo_active(enemy: &Enemy) -> bool {
    matches!(&enemy.kind, EnemyKind::SecondBoss(boss) if boss.za_warudo_timer > 0)
}

// ── Enemies: shooting ─────────────────────────────────────────────────────────

/// Single straight-down shot; the next shot is pushed out by `delay` plus
/// a random share of the weapon's recoil.
pub fn enemy_shot(enemy: &mut Enemy, now: Millis, rng: &mut impl Rng) -> Option<Projectile> {
    let delay = match enemy.kind {
        EnemyKind::Common => COMMON_SHOT_DELAY,
        EnemyKind::FirstBoss(_) | EnemyKind::SecondBoss(_) => BOSS_SHOT_DELAY,
        EnemyKind::Flyer(_) => return None,
    };
    let gun = enemy.gun.as_mut()?;
    let ball = gun.fire(now, enemy.position, ENEMY_SHOT_VELOCITY)?;
    let jitter = rng.gen_range(0.0..gun.recoil() as f64) as Millis;
    gun.set_next_shot_at(now + delay + jitter);
    Some(ball)
}

/// Flyer volley: three Balls once the dive has locked, at most once per
/// `VOLLEY_INTERVAL`.
pub fn shot_multiple(enemy: &mut Enemy, now: Millis, rng: &mut impl Rng) -> Vec<Projectile> {
    let EnemyKind::Flyer(flyer) = &mut enemy.kind else {
        return Vec::new();
    };
    if !flyer.can_shoot || now < flyer.next_volley_at {
        return Vec::new();
    }
    flyer.can_shoot = false;
    flyer.next_volley_at = now + VOLLEY_INTERVAL;
    spread_volley(enemy.position, rng)
}

/// Three Balls fanned around straight down, each jittered by up to ±π/12.
pub fn spread_volley(origin: Vector2D, rng: &mut impl Rng) -> Vec<Projectile> {
    let down = PI / 2.0;
    [down + VOLLEY_SPREAD, down, down - VOLLEY_SPREAD]
        .into_iter()
        .map(|angle| {
            let angle = angle + rng.gen_range(-VOLLEY_JITTER..VOLLEY_JITTER);
            let velocity = Vector2D::new(angle.cos() * VOLLEY_SPEED, angle.sin() * VOLLEY_SPEED);
            new_projectile(ProjectileKind::Ball, origin, velocity)
        })
        .collect()
}

/// Everything `enemy` fires this frame.
///
/// Flyers use their volley, everyone else a single shot. The second boss
/// also fans out a spread each time it turns a patrol corner.
pub fn enemy_shots(enemy: &mut Enemy, now: Millis, rng: &mut impl Rng) -> Vec<Projectile> {
    if let EnemyKind::Flyer(_) = enemy.kind {
        return shot_multiple(enemy, now, rng);
    }
    let mut shots: Vec<Projectile> = enemy_shot(enemy, now, rng).into_iter().collect();
    if let EnemyKind::SecondBoss(boss) = &mut enemy.kind {
        if boss.can_shoot {
            boss.can_shoot = false;
            shots.extend(spread_volley(enemy.position, rng));
        }
    }
    shots
}

// ── Everything else ───────────────────────────────────────────────────────────

pub fn move_projectile(projectile: &mut Projectile, dt: f64) {
    projectile.position.x += projectile.velocity.x * dt;
    projectile.position.y += projectile.velocity.y * dt;
}

pub fn move_powerup(powerup: &mut Powerup, dt: f64) {
    powerup.position.x += powerup.velocity.x * dt;
    powerup.position.y += powerup.velocity.y * dt;
}

pub fn update_explosion(explosion: &mut Explosion, now: Millis) {
    explosion.elapsed = now.saturating_sub(explosion.started_at);
}

pub fn is_finished(explosion: &Explosion) -> bool {
    explosion.elapsed >= explosion.duration
}

/// Scroll the layer down, wrapping stars back to the top.
pub fn animate_background(background: &mut Background, delta: Millis) {
    let shift = background.speed * delta as f64;
    for star in &mut background.stars {
        star.y = (star.y + shift) % HEIGHT;
    }
}
