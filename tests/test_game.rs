use std::collections::HashSet;
use std::time::Duration;

use shoot_em_up::compute::{die_for_duration, new_first_boss, new_second_boss, pick_power_up};
use shoot_em_up::entities::*;
use shoot_em_up::error::Result;
use shoot_em_up::game::Game;
use shoot_em_up::platform::{Canvas, Key, Keyboard, WIDTH};
use shoot_em_up::render::render;
use shoot_em_up::vector::Vector2D;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Fakes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Color(Color),
    Circle(f64, f64, f64),
    Diamond(f64, f64, f64),
    Ring(f64, f64, f64),
    Line(f64, f64, f64, f64),
    Player(f64, f64),
    Display,
}

#[derive(Default)]
struct RecordingCanvas {
    calls: Vec<Call>,
}

impl RecordingCanvas {
    fn displays(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Display).count()
    }

    fn players(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Player(..)))
            .count()
    }

    fn diamonds(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Diamond(..)))
            .count()
    }

    fn ring_radii(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Ring(_, _, r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    fn lines(&self) -> Vec<(f64, f64, f64, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Line(x1, y1, x2, y2) => Some((*x1, *y1, *x2, *y2)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.calls.push(Call::Color(color));
    }
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.calls.push(Call::Circle(cx, cy, radius));
    }
    fn fill_diamond(&mut self, cx: f64, cy: f64, radius: f64) {
        self.calls.push(Call::Diamond(cx, cy, radius));
    }
    fn draw_ring(&mut self, cx: f64, cy: f64, radius: f64) {
        self.calls.push(Call::Ring(cx, cy, radius));
    }
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.calls.push(Call::Line(x1, y1, x2, y2));
    }
    fn draw_player(&mut self, cx: f64, cy: f64, _radius: f64) {
        self.calls.push(Call::Player(cx, cy));
    }
    fn display(&mut self) -> Result<()> {
        self.calls.push(Call::Display);
        Ok(())
    }
}

/// Holds a fixed set of keys; presses Quit once `quit_after` polls happened.
#[derive(Default)]
struct ScriptedKeys {
    held: HashSet<Key>,
    polls: usize,
    quit_after: Option<usize>,
}

impl ScriptedKeys {
    fn holding(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Keyboard for ScriptedKeys {
    fn poll(&mut self) {
        self.polls += 1;
        if self.quit_after.is_some_and(|n| self.polls > n) {
            self.held.insert(Key::Quit);
        }
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

fn new_game() -> Game<StdRng> {
    Game::new(StdRng::seed_from_u64(99))
}

fn bullets(game: &Game<StdRng>) -> usize {
    game.world
        .projectiles
        .iter()
        .filter(|p| p.kind == ProjectileKind::Bullet)
        .count()
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn idle_first_frame_draws_once_and_spawns_nothing() {
    let mut game = new_game();
    let mut keys = ScriptedKeys::default();
    let mut canvas = RecordingCanvas::default();

    assert!(game.frame(0, &mut keys, &mut canvas).unwrap());

    assert!(game.world.projectiles.is_empty());
    assert!(game.world.enemies.is_empty());
    assert_eq!(canvas.displays(), 1);
    assert_eq!(canvas.calls.last(), Some(&Call::Display));
    assert_eq!(canvas.players(), 1);
    assert_eq!(keys.polls, 1);
}

#[test]
fn pistol_fires_once_per_recoil() {
    let mut game = new_game();
    let mut keys = ScriptedKeys::holding(&[Key::Fire]);
    let mut canvas = RecordingCanvas::default();

    game.frame(0, &mut keys, &mut canvas).unwrap();
    assert_eq!(bullets(&game), 1);

    game.frame(50, &mut keys, &mut canvas).unwrap();
    assert_eq!(bullets(&game), 1);

    game.frame(101, &mut keys, &mut canvas).unwrap();
    assert_eq!(bullets(&game), 2);
}

#[test]
fn held_direction_moves_the_player() {
    let mut game = new_game();
    let mut keys = ScriptedKeys::holding(&[Key::Left, Key::Up]);
    let mut canvas = RecordingCanvas::default();

    game.frame(0, &mut keys, &mut canvas).unwrap();
    game.frame(100, &mut keys, &mut canvas).unwrap();

    assert_eq!(game.world.player.position, Vector2D::new(215.0, 335.0));
    assert_eq!(game.current_time(), 100);
}

#[test]
fn quit_stops_before_any_update() {
    let mut game = new_game();
    let mut keys = ScriptedKeys::holding(&[Key::Quit, Key::Fire, Key::Left]);
    let mut canvas = RecordingCanvas::default();

    assert!(!game.frame(0, &mut keys, &mut canvas).unwrap());

    assert!(game.world.projectiles.is_empty());
    assert_eq!(game.world.player.position, Vector2D::new(240.0, 360.0));
    assert!(canvas.calls.is_empty());
}

#[test]
fn run_loops_until_quit() {
    let mut game = new_game();
    let mut keys = ScriptedKeys {
        quit_after: Some(2),
        ..ScriptedKeys::default()
    };
    let mut canvas = RecordingCanvas::default();

    game.run(&mut keys, &mut canvas, Duration::ZERO).unwrap();

    assert_eq!(keys.polls, 3);
    assert_eq!(canvas.displays(), 2);
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn dead_player_is_not_drawn() {
    let mut game = new_game();
    die_for_duration(&mut game.world.player, 0, 2000);
    let mut canvas = RecordingCanvas::default();

    render(&game.world, &mut canvas).unwrap();

    assert_eq!(canvas.players(), 0);
    assert_eq!(canvas.displays(), 1);
}

#[test]
fn second_boss_shape_follows_its_shift_flag() {
    let mut game = new_game();
    let boss = new_second_boss(Vector2D::new(100.0, 100.0), 40, 0);
    game.world.enemies.push(boss);

    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();
    assert_eq!(canvas.diamonds(), 1);

    if let EnemyKind::SecondBoss(b) = &mut game.world.enemies[0].kind {
        b.shift = false;
    }
    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();
    assert_eq!(canvas.diamonds(), 0);
    assert!(canvas
        .calls
        .contains(&Call::Circle(100.0, 100.0, 30.0)));
}

#[test]
fn fresh_explosion_is_orange() {
    let mut game = new_game();
    game.world.explosions.push(Explosion {
        position: Vector2D::new(50.0, 50.0),
        started_at: 0,
        duration: 500,
        elapsed: 100,
    });
    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();
    assert!(canvas.calls.contains(&Call::Color(Color::Orange)));
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
    }
}

#[test]
fn life_bar_shrinks_with_boss_life() {
    let mut game = new_game();
    let mut boss = new_first_boss(Vector2D::new(100.0, 100.0), 30);
    boss.life = 15;
    game.world.enemies.push(boss);

    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();

    let half = (WIDTH - 40.0) / 2.0;
    let bars: Vec<_> = canvas
        .lines()
        .into_iter()
        .filter(|&(_, y1, _, y2)| y1 == 12.0 && y2 == 12.0)
        .collect();
    assert_eq!(bars, vec![(20.0, 12.0, 20.0 + half, 12.0)]);
}

#[test]
fn time_stop_rings_open_outward() {
    let mut game = new_game();
    pick_power_up(&mut game.world.player, PowerupKind::ZaWarudo);
    game.world.player.za_warudo_timer = 3900;

    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();

    // (4000 - 3900) * 1.6, then 50 apart
    assert_close(&canvas.ring_radii(), &[160.0, 110.0, 60.0]);
    assert!(canvas.calls.contains(&Call::Color(Color::Yellow)));
}

#[test]
fn time_stop_rings_close_at_the_end() {
    let mut game = new_game();
    game.world.player.za_warudo_timer = 100;

    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();

    // 100 * 0.75 - 100 is below zero, so the innermost ring is skipped
    assert_close(&canvas.ring_radii(), &[25.0, 75.0]);
}

#[test]
fn no_rings_mid_time_stop() {
    let mut game = new_game();
    game.world.player.za_warudo_timer = 2000;

    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();

    assert!(canvas.ring_radii().is_empty());
}

#[test]
fn laser_gauge_shrinks_with_time_left() {
    let mut game = new_game();
    game.world.player.laser_mode_timer = 4000;
    let Vector2D { x, y } = game.world.player.position;

    let mut canvas = RecordingCanvas::default();
    render(&game.world, &mut canvas).unwrap();

    let lines = canvas.lines();
    assert!(lines.contains(&(x - 12.0, y - 15.0, x + 12.0, y - 15.0)));
    assert!(lines.contains(&(x - 8.0, y - 21.0, x + 8.0, y - 21.0)));
    assert!(canvas.calls.contains(&Call::Circle(x, y - 25.0, 4.0)));
}
