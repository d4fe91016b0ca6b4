/// Turns the world into draw calls on a `Canvas`.
///
/// No game state is changed here; every animated detail (boss shape flip,
/// ring growth, explosion progress) is advanced by `tick`.

use crate::entities::{
    Background, Color, Enemy, EnemyKind, Explosion, Millis, Player, Powerup, PowerupKind,
    Projectile, ProjectileKind, World,
};
use crate::error::Result;
use crate::platform::{Canvas, WIDTH};
use crate::vector::Vector2D;

const ZA_WARUDO_OPENING: Millis = 3600;
const ZA_WARUDO_CLOSING: Millis = 500;
const RING_GAP: f64 = 50.0;

const LIFE_BAR_Y: f64 = 12.0;
const LIFE_BAR_MARGIN: f64 = 20.0;

/// Draw one complete frame and present it.
pub fn render(world: &World, canvas: &mut impl Canvas) -> Result<()> {
    draw_background(canvas, &world.far_stars);
    draw_background(canvas, &world.near_stars);

    // Time-stop rings go underneath everything else.
    draw_player_effects(canvas, &world.player);
    for enemy in &world.enemies {
        draw_boss_za_warudo(canvas, enemy);
    }

    for projectile in &world.projectiles {
        draw_projectile(canvas, projectile);
    }
    for enemy in &world.enemies {
        draw_enemy(canvas, enemy);
    }
    for powerup in &world.powerups {
        draw_powerup(canvas, powerup);
    }
    for explosion in &world.explosions {
        draw_explosion(canvas, explosion);
    }

    draw_player(canvas, &world.player);

    canvas.display()
}

fn draw_background(canvas: &mut impl Canvas, background: &Background) {
    canvas.set_color(background.color);
    for star in &background.stars {
        canvas.fill_circle(star.x, star.y, background.size / 2.0);
    }
}

fn draw_projectile(canvas: &mut impl Canvas, projectile: &Projectile) {
    let p = projectile.position;
    canvas.set_color(projectile.color);
    match projectile.kind {
        ProjectileKind::Bullet => canvas.draw_line(p.x, p.y - 5.0, p.x, p.y + 5.0),
        ProjectileKind::Ball => canvas.fill_circle(p.x, p.y, projectile.radius),
    }
}

fn draw_enemy(canvas: &mut impl Canvas, enemy: &Enemy) {
    let p = enemy.position;
    let r = enemy.radius;
    canvas.set_color(enemy.color);
    match &enemy.kind {
        EnemyKind::Common => canvas.fill_circle(p.x, p.y, r),
        EnemyKind::Flyer(_) => canvas.fill_diamond(p.x, p.y, r),
        EnemyKind::FirstBoss(boss) => {
            canvas.draw_line(p.x - r, p.y - r, p.x, p.y + r);
            canvas.draw_line(p.x + r, p.y - r, p.x, p.y + r);
            canvas.draw_line(p.x - r, p.y - r, p.x, p.y - r * 0.5);
            canvas.draw_line(p.x + r, p.y - r, p.x, p.y - r * 0.5);
            draw_life_bar(canvas, enemy.color, enemy.life, boss.max_life);
        }
        EnemyKind::SecondBoss(boss) => {
            if boss.shift {
                canvas.fill_diamond(p.x, p.y, r);
            } else {
                canvas.fill_circle(p.x, p.y, r);
            }
            draw_life_bar(canvas, enemy.color, enemy.life, boss.max_life);
        }
    }
}

fn draw_life_bar(canvas: &mut impl Canvas, color: Color, life: u32, max_life: u32) {
    if max_life == 0 {
        return;
    }
    let full = WIDTH - 2.0 * LIFE_BAR_MARGIN;
    let length = full * f64::from(life) / f64::from(max_life);
    canvas.set_color(color);
    canvas.draw_line(
        LIFE_BAR_MARGIN,
        LIFE_BAR_Y,
        LIFE_BAR_MARGIN + length,
        LIFE_BAR_Y,
    );
}

fn draw_boss_za_warudo(canvas: &mut impl Canvas, enemy: &Enemy) {
    let EnemyKind::SecondBoss(boss) = &enemy.kind else {
        return;
    };
    if boss.za_warudo_timer == 0 {
        return;
    }
    let color = if boss.za_warudo_timer % 2 == 1 {
        Color::White
    } else {
        Color::Yellow
    };
    canvas.set_color(color);
    canvas.draw_ring(enemy.position.x, enemy.position.y, boss.za_warudo_radius);
}

fn draw_powerup(canvas: &mut impl Canvas, powerup: &Powerup) {
    canvas.set_color(powerup.color);
    canvas.fill_diamond(powerup.position.x, powerup.position.y, powerup.radius);
}

fn draw_explosion(canvas: &mut impl Canvas, explosion: &Explosion) {
    let progress = if explosion.duration == 0 {
        1.0
    } else {
        explosion.elapsed as f64 / explosion.duration as f64
    };
    let color = if progress < 0.5 {
        Color::Orange
    } else {
        Color::Red
    };
    canvas.set_color(color);
    canvas.fill_circle(
        explosion.position.x,
        explosion.position.y,
        4.0 + progress * 16.0,
    );
}

fn draw_player(canvas: &mut impl Canvas, player: &Player) {
    if !player.is_alive {
        return;
    }
    canvas.set_color(player.color);
    canvas.draw_player(player.position.x, player.position.y, player.radius);
}

fn draw_player_effects(canvas: &mut impl Canvas, player: &Player) {
    if player.za_warudo_timer > 0 {
        draw_za_warudo_rings(canvas, player.position, player.za_warudo_timer, Color::Yellow);
    }
    if player.laser_mode_timer > 0 {
        draw_laser_gauge(canvas, player.position, player.laser_mode_timer);
    }
}

/// Three rings that sweep outward as the stop begins and collapse as it ends.
fn draw_za_warudo_rings(canvas: &mut impl Canvas, center: Vector2D, time_left: Millis, color: Color) {
    let duration = PowerupKind::ZaWarudo.duration();
    let shades = [color, Color::LightGray, Color::DarkGray];

    if time_left > ZA_WARUDO_OPENING {
        let mut r = (duration - time_left) as f64 * 1.6;
        for shade in shades {
            canvas.set_color(shade);
            canvas.draw_ring(center.x, center.y, r);
            r = (r - RING_GAP).max(0.0);
        }
    }
    if time_left < ZA_WARUDO_CLOSING {
        let mut r = time_left as f64 * 0.75 - 100.0;
        for shade in shades {
            canvas.set_color(shade);
            if r >= 0.0 {
                canvas.draw_ring(center.x, center.y, r);
            }
            r = (r + RING_GAP).max(0.0);
        }
    }
}

/// Two bars above the ship that shrink as LaserMode runs out.
fn draw_laser_gauge(canvas: &mut impl Canvas, center: Vector2D, time_left: Millis) {
    let share = time_left as f64 / PowerupKind::LaserMode.duration() as f64;
    canvas.set_color(Color::Red);

    let mut y = center.y - 15.0;
    canvas.draw_line(center.x - share * 24.0, y, center.x + share * 24.0, y);
    y -= 6.0;
    canvas.draw_line(center.x - share * 16.0, y, center.x + share * 16.0, y);
    y -= 4.0;
    canvas.fill_circle(center.x, y, 4.0);
}
