/// The frame cycle: read input, update the world, render.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::compute::{init_world, move_player, player_shot};
use crate::entities::{Direction, Millis, World};
use crate::error::Result;
use crate::platform::{Canvas, Key, Keyboard};
use crate::render::render;
use crate::spawn::SpawnDirector;
use crate::tick::{player_side_dt, tick};

const MOVES: [(Key, Direction); 4] = [
    (Key::Up, Direction::North),
    (Key::Down, Direction::South),
    (Key::Left, Direction::West),
    (Key::Right, Direction::East),
];

pub struct Game<R: Rng> {
    pub world: World,
    pub spawner: SpawnDirector,
    rng: R,
    /// Timestamp of the frame in progress, sampled once at frame start.
    current_time: Millis,
    frames: u64,
}

impl<R: Rng> Game<R> {
    /// A fresh run whose clock starts at 0.
    pub fn new(mut rng: R) -> Self {
        let world = init_world(&mut rng);
        let spawner = SpawnDirector::new(0, &mut rng);
        Self {
            world,
            spawner,
            rng,
            current_time: 0,
            frames: 0,
        }
    }

    pub fn current_time(&self) -> Millis {
        self.current_time
    }

    /// Run one frame at `now`. Returns `false` once the player asked to
    /// quit; in that case nothing was updated or drawn.
    pub fn frame(
        &mut self,
        now: Millis,
        keyboard: &mut impl Keyboard,
        canvas: &mut impl Canvas,
    ) -> Result<bool> {
        let delta = now.saturating_sub(self.current_time);
        self.current_time = now;

        keyboard.poll();
        if keyboard.is_key_pressed(Key::Quit) {
            return Ok(false);
        }

        self.read_input(&*keyboard, delta);
        tick(
            &mut self.world,
            &mut self.spawner,
            now,
            delta,
            &mut self.rng,
        );
        render(&self.world, canvas)?;

        self.frames += 1;
        Ok(true)
    }

    fn read_input(&mut self, keyboard: &impl Keyboard, delta: Millis) {
        let dt = player_side_dt(&self.world, delta);
        for (key, direction) in MOVES {
            if keyboard.is_key_pressed(key) {
                move_player(&mut self.world.player, dt, direction);
            }
        }

        if keyboard.is_key_pressed(Key::Fire) {
            if let Some(bullet) = player_shot(&mut self.world.player, self.current_time) {
                self.world.projectiles.push(bullet);
            }
        }
    }

    /// Loop until quit, holding each frame to at least `frame_budget`.
    pub fn run(
        &mut self,
        keyboard: &mut impl Keyboard,
        canvas: &mut impl Canvas,
        frame_budget: Duration,
    ) -> Result<()> {
        let start = Instant::now();
        info!(budget_ms = frame_budget.as_millis() as u64, "run started");

        loop {
            let frame_start = Instant::now();
            let now = start.elapsed().as_millis() as Millis;
            if !self.frame(now, keyboard, canvas)? {
                break;
            }
            busy_wait(frame_start, frame_budget);
        }

        info!(
            frames = self.frames,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "run finished"
        );
        Ok(())
    }
}

/// Spin, yielding the processor, until `budget` has passed since `from`.
fn busy_wait(from: Instant, budget: Duration) {
    while from.elapsed() < budget {
        std::thread::yield_now();
    }
}
