/// Cooldown-gated projectile factory.
///
/// A weapon is bound to one `ProjectileKind` and refuses to fire until its
/// recoil has elapsed since the previous shot.

use crate::entities::{Color, Millis, Projectile, ProjectileKind};
use crate::vector::Vector2D;

pub const PISTOL_RECOIL: Millis = 100;
pub const CANNON_RECOIL: Millis = 500;
pub const TRIPLE_CANNON_RECOIL: Millis = 1000;

const BULLET_RADIUS: f64 = 2.0;
const BALL_RADIUS: f64 = 3.0;

/// Build a projectile of the given kind.
pub fn new_projectile(kind: ProjectileKind, position: Vector2D, velocity: Vector2D) -> Projectile {
    let (radius, color) = match kind {
        ProjectileKind::Bullet => (BULLET_RADIUS, Color::Green),
        ProjectileKind::Ball => (BALL_RADIUS, Color::Red),
    };
    Projectile {
        position,
        velocity,
        radius,
        color,
        kind,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    kind: ProjectileKind,
    recoil: Millis,
    /// `None` until the first shot: a fresh weapon is always ready.
    next_shot_at: Option<Millis>,
}

impl Weapon {
    pub fn new(kind: ProjectileKind, recoil: Millis) -> Self {
        Self {
            kind,
            recoil,
            next_shot_at: None,
        }
    }

    pub fn pistol() -> Self {
        Self::new(ProjectileKind::Bullet, PISTOL_RECOIL)
    }

    pub fn cannon() -> Self {
        Self::new(ProjectileKind::Ball, CANNON_RECOIL)
    }

    pub fn triple_cannon() -> Self {
        Self::new(ProjectileKind::Ball, TRIPLE_CANNON_RECOIL)
    }

    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    pub fn recoil(&self) -> Millis {
        self.recoil
    }

    pub fn next_shot_at(&self) -> Option<Millis> {
        self.next_shot_at
    }

    /// Override the next allowed shot time, used to jitter enemy fire.
    pub fn set_next_shot_at(&mut self, at: Millis) {
        self.next_shot_at = Some(at);
    }

    pub fn is_ready(&self, now: Millis) -> bool {
        self.next_shot_at.map_or(true, |next| now > next)
    }

    /// Fire if `now` is past the next allowed shot; no side effect otherwise.
    pub fn fire(&mut self, now: Millis, position: Vector2D, velocity: Vector2D) -> Option<Projectile> {
        self.fire_with_recoil(now, self.recoil, position, velocity)
    }

    /// Like `fire`, but the cooldown started by this shot is `recoil`
    /// instead of the weapon's own.
    pub fn fire_with_recoil(
        &mut self,
        now: Millis,
        recoil: Millis,
        position: Vector2D,
        velocity: Vector2D,
    ) -> Option<Projectile> {
        if !self.is_ready(now) {
            return None;
        }
        self.next_shot_at = Some(now + recoil);
        Some(new_projectile(self.kind, position, velocity))
    }
}
