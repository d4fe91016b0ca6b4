mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use shoot_em_up::config::Args;
use shoot_em_up::error::GameError;
use shoot_em_up::game::Game;
use shoot_em_up::platform::{Key, Keyboard};

use display::TerminalCanvas;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// window. Covers terminals that never send release events: OS key repeat
/// runs at 15 Hz or faster, so the window is refreshed before it expires.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

/// Keyboard state fed by the event-reader thread.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
///   `Repeat` / `Release` events, so keys are dropped on release.
/// * **Classic terminals**: only `Press` events (OS key repeat shows up as
///   repeated presses). Keys expire after `HOLD_WINDOW` of silence.
struct TerminalKeyboard {
    rx: mpsc::Receiver<Event>,
    last_seen: HashMap<Key, Instant>,
    quit: bool,
}

impl TerminalKeyboard {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            last_seen: HashMap::new(),
            quit: false,
        }
    }
}

impl Keyboard for TerminalKeyboard {
    fn poll(&mut self) {
        let now = Instant::now();
        while let Ok(event) = self.rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                self.quit = true;
                continue;
            }
            let Some(key) = key_for(code) else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if key == Key::Quit {
                        self.quit = true;
                    }
                    self.last_seen.insert(key, now);
                }
                KeyEventKind::Release => {
                    self.last_seen.remove(&key);
                }
            }
        }
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        if key == Key::Quit {
            return self.quit;
        }
        self.last_seen
            .get(&key)
            .map(|seen| seen.elapsed() <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so logs only go to a file when asked for.
fn init_tracing(args: &Args) -> Result<(), GameError> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .map_err(|e| GameError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args).context("logging setup")?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release and repeat events; other terminals fall back to
    // the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the frame loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped, program exiting
            }
        }
    });

    let result = run(out, rx, rng, &args);

    // Always restore the terminal
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "game aborted");
    }
    result.context("game loop")
}

fn run(
    out: BufWriter<std::io::Stdout>,
    rx: mpsc::Receiver<Event>,
    rng: StdRng,
    args: &Args,
) -> Result<(), GameError> {
    let mut canvas = TerminalCanvas::new(out)?;
    let mut keyboard = TerminalKeyboard::new(rx);
    Game::new(rng).run(&mut keyboard, &mut canvas, args.frame_budget())
}
