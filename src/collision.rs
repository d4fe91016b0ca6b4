/// Circle-vs-circle intersection shared by every entity.

use crate::entities::{Enemy, Player, Powerup, Projectile};
use crate::vector::Vector2D;

/// Player hitbox as a fraction of the summed radii.
pub const PLAYER_HITBOX_SCALE: f64 = 0.8;

pub trait Collidable {
    fn position(&self) -> Vector2D;
    fn radius(&self) -> f64;

    /// True when the centers are closer than the summed radii.
    fn intersects(&self, other: &dyn Collidable) -> bool {
        self.position().distance(&other.position()) < self.radius() + other.radius()
    }
}

impl Collidable for Player {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    /// Tighter than the drawn ship, and never while dead.
    fn intersects(&self, other: &dyn Collidable) -> bool {
        if !self.is_alive {
            return false;
        }
        let dist = self.position.distance(&other.position());
        dist < (self.radius + other.radius()) * PLAYER_HITBOX_SCALE
    }
}

impl Collidable for Enemy {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Collidable for Projectile {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Collidable for Powerup {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
