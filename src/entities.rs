/// Entity data. Nothing in this module has behavior.
///
/// Behavior lives in `compute` (per-entity) and `tick` (per-frame resolver).
/// Every variant family is a closed enum so behavior dispatches with `match`.

use crate::vector::Vector2D;
use crate::weapon::Weapon;

/// Absolute timestamp or duration in milliseconds since the run started.
pub type Millis = u64;

/// Render tag carried by every entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Cyan,
    Magenta,
    Red,
    Yellow,
    Orange,
    Green,
    White,
    Gray,
    LightGray,
    DarkGray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Player-fired, damages enemies.
    Bullet,
    /// Enemy-fired, damages the player.
    Ball,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub color: Color,
    pub kind: ProjectileKind,
}

// ── Powerups ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerupKind {
    /// Time-slow effect.
    ZaWarudo,
    /// Faster pistol.
    LaserMode,
}

impl PowerupKind {
    pub const fn duration(self) -> Millis {
        match self {
            PowerupKind::ZaWarudo => 4000,
            PowerupKind::LaserMode => 8000,
        }
    }
}

/// A falling pickup.
#[derive(Clone, Debug, PartialEq)]
pub struct Powerup {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub color: Color,
    pub kind: PowerupKind,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub position: Vector2D,
    /// Pixels per millisecond on each axis.
    pub velocity: Vector2D,
    pub radius: f64,
    pub color: Color,
    pub is_alive: bool,
    pub revive_at: Millis,
    pub gun: Weapon,
    /// Remaining ZaWarudo time; 0 when inactive.
    pub za_warudo_timer: Millis,
    /// Remaining LaserMode time; 0 when inactive.
    pub laser_mode_timer: Millis,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Angle-parameterized dive shared by Flyers and the first boss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dive {
    /// Heading in radians; 3π/2 points straight down the screen.
    pub angle: f64,
    /// Radians per millisecond.
    pub rotation_speed: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flyer {
    pub dive: Dive,
    /// Raised once the dive has locked onto a horizontal heading.
    pub can_shoot: bool,
    pub next_volley_at: Millis,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FirstBoss {
    pub dive: Dive,
    pub max_life: u32,
}

/// Legs of the second boss's rectangular patrol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatrolLeg {
    /// Descending from above the playfield towards the top edge.
    Entering,
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SecondBoss {
    pub leg: PatrolLeg,
    /// Raised on every leg transition, cleared by the corner spread.
    pub can_shoot: bool,
    /// Diamond when true, circle when false; flips every frame.
    pub shift: bool,
    pub max_life: u32,
    pub spawned_at: Millis,
    pub za_warudo_timer: Millis,
    pub za_warudo_radius: f64,
    pub za_warudo_used: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    Common,
    Flyer(Flyer),
    FirstBoss(FirstBoss),
    SecondBoss(SecondBoss),
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub color: Color,
    pub life: u32,
    pub gun: Option<Weapon>,
    pub kind: EnemyKind,
}

// ── Visual-only entities ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub position: Vector2D,
    pub started_at: Millis,
    pub duration: Millis,
    /// Time since `started_at` as of the last update.
    pub elapsed: Millis,
}

/// One scrolling starfield layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub stars: Vec<Vector2D>,
    pub color: Color,
    pub size: f64,
    /// Pixels per millisecond, downwards.
    pub speed: f64,
}

// ── Master world state ────────────────────────────────────────────────────────

/// Everything the orchestrator owns. Collection order carries no meaning.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub powerups: Vec<Powerup>,
    pub far_stars: Background,
    pub near_stars: Background,
}
