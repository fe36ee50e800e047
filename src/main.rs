mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use display::DebugView;
use tile_shooter::compute::{PlayerInput, Simulation};
use tile_shooter::config::GameConfig;

/// A key counts as "held" if its last press/repeat event arrived within
/// this many milliseconds.  Covers terminals that don't emit key-release
/// events: OS key repeat is ≥ 15 Hz, so the window is refreshed before expiry.
const HOLD_WINDOW_MS: u32 = 133;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tile-based platform shooter in the terminal")]
struct Args {
    /// JSON file overriding game constants and the level layout
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write logs here (filtered by RUST_LOG, default `info`).  Logging is off without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Mouse (debug probe + level editor) ───────────────────────────────────────

fn handle_mouse(sim: &mut Simulation, debug: &mut DebugView, ev: MouseEvent) {
    let world = display::screen_to_world(ev.column, ev.row);
    let tile = world.to_tile();
    match ev.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            debug.mouse = Some(world);
            debug.probe = Some(sim.probe(world));
            sim.continue_edit(tile);
        }
        MouseEventKind::Down(MouseButton::Left) if debug.enabled => {
            sim.begin_edit(tile);
        }
        MouseEventKind::Up(_) => sim.end_edit(),
        _ => {}
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Horizontal movement uses a `key_frame` map recording the frame of the last
/// press/repeat of every key, so A/D can be held together with Space or E.
/// Jump, shoot, reset and the debug toggle fire once per press.
fn game_loop<W: Write>(
    out: &mut W,
    sim: &mut Simulation,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame_ms = sim.config.frame_ms.max(1);
    let frame_budget = Duration::from_millis(frame_ms as u64);
    let hold_window = (HOLD_WINDOW_MS / frame_ms).max(1) as u64;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut debug = DebugView::default();
    let mut frame: u64 = 0;
    let mut dt = frame_ms;

    loop {
        let begin = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Esc => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char(' ') => sim.jump(),
                            KeyCode::Char('e') | KeyCode::Char('E') => {
                                sim.shoot();
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => sim.reset_player(),
                            KeyCode::Char('q') | KeyCode::Char('Q') => {
                                debug.enabled = !debug.enabled;
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(m) => handle_mouse(sim, &mut debug, m),
                _ => {}
            }
        }

        let held = |keys: &[KeyCode]| keys.iter().any(|k| is_held(&key_frame, k, frame, hold_window));
        let input = PlayerInput {
            left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        };
        sim.apply_input(input);
        // Whole tick before drawing; animations run on the last frame's real time
        sim.tick(dt);

        display::render(out, sim, &debug)?;

        let work_ms = begin.elapsed().as_millis() as u32;
        let fps_snapshot = if work_ms > 0 { 1000 / work_ms } else { 0 };
        debug.fps = (debug.fps + fps_snapshot) / 2;

        let elapsed = begin.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }

        dt = begin.elapsed().as_millis() as u32;
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let grid = config.grid().context("building level")?;
    info!(
        config = ?args.config,
        width = grid.width(),
        height = grid.height(),
        "starting"
    );
    let mut sim = Simulation::new(config, grid);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut sim, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(projectiles = sim.count_alive_projectiles(), "shutting down");
    result.context("terminal I/O failed")
}
