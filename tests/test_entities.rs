use shoot_em_up::collision::Collidable;
use shoot_em_up::compute::{die_for_duration, new_common, new_player};
use shoot_em_up::entities::*;
use shoot_em_up::vector::Vector2D;
use shoot_em_up::weapon::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ball_at(x: f64, y: f64) -> Projectile {
    new_projectile(ProjectileKind::Ball, Vector2D::new(x, y), Vector2D::default())
}

// ── Vector2D ──────────────────────────────────────────────────────────────────

#[test]
fn distance_is_euclidean() {
    let a = Vector2D::new(0.0, 0.0);
    let b = Vector2D::new(3.0, 4.0);
    assert_eq!(a.distance(&b), 5.0);
    assert_eq!(b.distance(&a), 5.0);
}

#[test]
fn of_scalar_fills_both_axes() {
    assert_eq!(Vector2D::of_scalar(0.25), Vector2D::new(0.25, 0.25));
}

// ── Weapon ────────────────────────────────────────────────────────────────────

#[test]
fn presets_carry_their_recoil_and_ammo() {
    assert_eq!(Weapon::pistol().recoil(), 100);
    assert_eq!(Weapon::pistol().kind(), ProjectileKind::Bullet);
    assert_eq!(Weapon::cannon().recoil(), 500);
    assert_eq!(Weapon::cannon().kind(), ProjectileKind::Ball);
    assert_eq!(Weapon::triple_cannon().recoil(), 1000);
    assert_eq!(Weapon::triple_cannon().kind(), ProjectileKind::Ball);
}

#[test]
fn fresh_weapon_fires_at_time_zero() {
    let mut gun = Weapon::pistol();
    let shot = gun.fire(0, Vector2D::new(1.0, 2.0), Vector2D::new(0.0, -1.0));
    let shot = shot.expect("fresh weapon must fire");
    assert_eq!(shot.kind, ProjectileKind::Bullet);
    assert_eq!(shot.position, Vector2D::new(1.0, 2.0));
    assert_eq!(shot.velocity, Vector2D::new(0.0, -1.0));
    assert_eq!(gun.next_shot_at(), Some(100));
}

#[test]
fn second_shot_within_recoil_is_refused() {
    let mut gun = Weapon::pistol();
    assert!(gun.fire(0, Vector2D::default(), Vector2D::default()).is_some());
    assert!(gun.fire(50, Vector2D::default(), Vector2D::default()).is_none());
    // Refusing leaves the cooldown alone
    assert_eq!(gun.next_shot_at(), Some(100));
    // Exactly at the boundary is still too early
    assert!(gun.fire(100, Vector2D::default(), Vector2D::default()).is_none());
    assert!(gun.fire(101, Vector2D::default(), Vector2D::default()).is_some());
    assert_eq!(gun.next_shot_at(), Some(201));
}

#[test]
fn every_preset_honours_its_recoil() {
    for mut gun in [Weapon::pistol(), Weapon::cannon(), Weapon::triple_cannon()] {
        let recoil = gun.recoil();
        assert!(gun.fire(10, Vector2D::default(), Vector2D::default()).is_some());
        assert!(gun
            .fire(10 + recoil - 1, Vector2D::default(), Vector2D::default())
            .is_none());
        assert!(gun
            .fire(10 + recoil + 1, Vector2D::default(), Vector2D::default())
            .is_some());
    }
}

#[test]
fn next_shot_can_be_overridden() {
    let mut gun = Weapon::cannon();
    gun.fire(0, Vector2D::default(), Vector2D::default());
    gun.set_next_shot_at(300);
    assert!(!gun.is_ready(300));
    assert!(gun.is_ready(301));
}

#[test]
fn fire_with_recoil_uses_the_given_cooldown() {
    let mut gun = Weapon::pistol();
    gun.fire_with_recoil(0, 50, Vector2D::default(), Vector2D::default());
    assert_eq!(gun.next_shot_at(), Some(50));
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn default_intersection_is_symmetric() {
    let mut rng = seeded_rng();
    let enemy = new_common(Vector2D::new(100.0, 100.0), &mut rng);
    // radii 9 + 3 = 12
    for (dx, expected) in [(0.0, true), (11.9, true), (12.0, false), (30.0, false)] {
        let ball = ball_at(100.0 + dx, 100.0);
        assert_eq!(enemy.intersects(&ball), expected, "dx = {dx}");
        assert_eq!(ball.intersects(&enemy), expected, "dx = {dx}");
    }
}

#[test]
fn player_hitbox_is_eighty_percent_of_the_radii() {
    let mut rng = seeded_rng();
    let player = new_player(Vector2D::new(200.0, 200.0));
    // radii 12 + 9 = 21, player threshold 16.8
    let near = new_common(Vector2D::new(216.0, 200.0), &mut rng);
    let edge = new_common(Vector2D::new(217.0, 200.0), &mut rng);
    assert!(player.intersects(&near));
    assert!(!player.intersects(&edge));
    // The enemy still uses the plain rule
    assert!(edge.intersects(&player));
}

#[test]
fn enemy_one_unit_inside_the_radii_touches_the_player() {
    let mut rng = seeded_rng();
    let player = new_player(Vector2D::new(200.0, 200.0));
    let enemy = new_common(Vector2D::new(200.0, 220.0), &mut rng);
    assert!(enemy.intersects(&player));
}

#[test]
fn dead_player_never_intersects() {
    let mut player = new_player(Vector2D::new(200.0, 200.0));
    let ball = ball_at(200.0, 200.0);
    assert!(player.intersects(&ball));
    die_for_duration(&mut player, 0, 2000);
    assert!(!player.intersects(&ball));
}

// ── Plain data ────────────────────────────────────────────────────────────────

#[test]
fn powerup_durations() {
    assert_eq!(PowerupKind::ZaWarudo.duration(), 4000);
    assert_eq!(PowerupKind::LaserMode.duration(), 8000);
}

#[test]
fn world_clone_is_independent() {
    let mut rng = seeded_rng();
    let original = shoot_em_up::compute::init_world(&mut rng);
    let mut cloned = original.clone();

    cloned.player.position.x = 1.0;
    cloned
        .enemies
        .push(new_common(Vector2D::new(5.0, 5.0), &mut rng));

    assert_eq!(original.player.position.x, 240.0);
    assert!(original.enemies.is_empty());
}
