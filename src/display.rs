//! Rendering layer.  All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! simulation.  No game logic is performed; this module only translates
//! world pixels into terminal cells and cells back into world pixels.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use tile_shooter::animation::{Animation, FrameTimer};
use tile_shooter::compute::{PlayerPose, Simulation};
use tile_shooter::entities::{Dir, Projectile, ProjectileState, Rect, Vec2i, TILE_SIZE};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_GROUND_TOP: Color = Color::Green;
const C_GROUND: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_BOLT: Color = Color::Cyan;
const C_POOF: Color = Color::Magenta;
const C_DEBUG: Color = Color::Red;
const C_HITBOX: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── World ↔ screen mapping ────────────────────────────────────────────────────

/// World pixels per terminal column / row.  A tile is 4 × 2 cells.
pub const CELL_W: i32 = 32;
pub const CELL_H: i32 = 64;

/// Screen cell of world pixel (0, 0).  Row 0 is the hint, row 1 the border.
const ORIGIN_COL: i32 = 1;
const ORIGIN_ROW: i32 = 2;

/// Terminal dimensions, sampled once per frame.
#[derive(Clone, Copy, Debug)]
struct Screen {
    width: u16,
    height: u16,
}

impl Screen {
    /// Cell showing world pixel `p`, or `None` when it is off screen.
    /// Row 0 is reserved for the controls hint.
    fn cell(&self, p: Vec2i) -> Option<(u16, u16)> {
        let col = ORIGIN_COL + p.x.div_euclid(CELL_W);
        let row = ORIGIN_ROW + p.y.div_euclid(CELL_H);
        if col < 0 || row < 1 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

/// Centre of the world area covered by a terminal cell.
pub fn screen_to_world(col: u16, row: u16) -> Vec2i {
    Vec2i::new(
        (col as i32 - ORIGIN_COL) * CELL_W + CELL_W / 2,
        (row as i32 - ORIGIN_ROW) * CELL_H + CELL_H / 2,
    )
}

// ── Debug overlay data ────────────────────────────────────────────────────────

/// What the debug overlay shows.  Collected by the game loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugView {
    pub enabled: bool,
    pub fps: u32,
    pub mouse: Option<Vec2i>,
    pub probe: Option<Vec2i>,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, sim: &Simulation, debug: &DebugView) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let screen = Screen { width, height };
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, sim.grid.boundary())?;
    draw_level(out, &screen, sim)?;
    draw_player(out, &screen, sim)?;
    for projectile in sim.projectiles.slots() {
        draw_projectile(out, &screen, projectile)?;
    }

    if debug.enabled {
        draw_debug(out, &screen, sim, debug)?;
    }
    draw_controls_hint(out)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, boundary: Rect) -> std::io::Result<()> {
    let w = (boundary.w / CELL_W) as usize;
    let h = (boundary.h / CELL_H) as u16;
    let top = (ORIGIN_ROW - 1) as u16;
    let left = (ORIGIN_COL - 1) as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(left, top + h + 1))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in top + 1..=top + h {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(left + w as u16 + 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Level ─────────────────────────────────────────────────────────────────────

fn draw_level<W: Write>(out: &mut W, screen: &Screen, sim: &Simulation) -> std::io::Result<()> {
    let cols = (TILE_SIZE / CELL_W) as usize;
    let rows = TILE_SIZE / CELL_H;

    for tile in sim.grid.walls() {
        let grassy = sim.grid.is_tile_empty(tile - Vec2i::new(0, 1));
        for r in 0..rows {
            let p = tile * TILE_SIZE + Vec2i::new(0, r * CELL_H);
            let Some((col, row)) = screen.cell(p) else {
                continue;
            };
            let (color, glyph) = if grassy && r == 0 {
                (C_GROUND_TOP, "▀")
            } else {
                (C_GROUND, "█")
            };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph.repeat(cols)))?;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, screen: &Screen, sim: &Simulation) -> std::io::Result<()> {
    // Walking cycles through four leg poses.
    let player = &sim.player;
    let glyph = match player.pose {
        PlayerPose::Idle => "☺",
        PlayerPose::Walking => {
            let frames = ["╿", "╽", "┃", "╽"];
            frames[player.current_animation().frame_current() % frames.len()]
        }
    };
    let tb = player.actor.world_texbox();
    let mid = Vec2i::new(tb.x + tb.w / 2, tb.y + tb.h / 2);
    let Some((col, row)) = screen.cell(mid) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(glyph))?;

    // Facing marker at the front edge of the sprite box
    let (edge, marker) = match player.actor.dir {
        Dir::Right => (Vec2i::new(tb.x + tb.w - 1, mid.y), "›"),
        Dir::Left => (Vec2i::new(tb.x, mid.y), "‹"),
    };
    if let Some((edge_col, edge_row)) = screen.cell(edge) {
        if edge_col != col {
            out.queue(cursor::MoveTo(edge_col, edge_row))?;
            out.queue(Print(marker))?;
        }
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    screen: &Screen,
    projectile: &Projectile<FrameTimer>,
) -> std::io::Result<()> {
    let (pos, color, glyph) = match &projectile.state {
        ProjectileState::Active(f) => {
            let frames = ["∙", "•", "●", "•", "∙"];
            let glyph = frames[projectile.active.frame_current() % frames.len()];
            (f.pos, C_BOLT, glyph)
        }
        ProjectileState::Poof(f) => {
            let frames = ["✶", "✷", "*", "·"];
            let glyph = frames[projectile.poof.frame_current() % frames.len()];
            (f.pos, C_POOF, glyph)
        }
        ProjectileState::Dead => return Ok(()),
    };
    if let Some((col, row)) = screen.cell(pos) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Debug overlay ─────────────────────────────────────────────────────────────

fn draw_debug<W: Write>(
    out: &mut W,
    screen: &Screen,
    sim: &Simulation,
    debug: &DebugView,
) -> std::io::Result<()> {
    // Hitbox corners
    let hb = sim.player.actor.world_hitbox();
    out.queue(style::SetForegroundColor(C_HITBOX))?;
    for corner in [
        Vec2i::new(hb.x, hb.y),
        Vec2i::new(hb.x + hb.w, hb.y),
        Vec2i::new(hb.x, hb.y + hb.h),
        Vec2i::new(hb.x + hb.w, hb.y + hb.h),
    ] {
        if let Some((col, row)) = screen.cell(corner) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("+"))?;
        }
    }

    out.queue(style::SetForegroundColor(C_DEBUG))?;
    if let Some(mouse) = debug.mouse {
        draw_tile_outline(out, screen, mouse.to_tile())?;
    }
    if let Some((col, row)) = debug.probe.and_then(|p| screen.cell(p)) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("◎"))?;
    }

    let fmt_point = |p: Option<Vec2i>| match p {
        Some(p) => format!("({}, {})", p.x, p.y),
        None => "-".to_string(),
    };
    let lines = [
        format!("FPS: {}", debug.fps),
        format!("Mouse Position: {}", fmt_point(debug.mouse)),
        format!("Collision Probe: {}", fmt_point(debug.probe)),
        format!("Projectiles: {}", sim.count_alive_projectiles()),
    ];

    // Right of the level, or over it on narrow terminals
    let level_cols = (sim.grid.boundary().w / CELL_W + ORIGIN_COL + 2) as u16;
    let x = if screen.width > level_cols + 30 { level_cols } else { 1 };
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(x, ORIGIN_ROW as u16 + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

/// Box the cells of `tile`, e.g. the one under the mouse.
fn draw_tile_outline<W: Write>(out: &mut W, screen: &Screen, tile: Vec2i) -> std::io::Result<()> {
    let cols = (TILE_SIZE / CELL_W) as usize;
    let rows = TILE_SIZE / CELL_H;
    let inner = "─".repeat(cols.saturating_sub(2));
    let origin = tile * TILE_SIZE;
    for r in 0..rows {
        let Some((col, row)) = screen.cell(origin + Vec2i::new(0, r * CELL_H)) else {
            continue;
        };
        let line = if r == 0 {
            format!("┌{inner}┐")
        } else {
            format!("└{inner}┘")
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Controls hint (row 0) ─────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "A D : Move  SPACE : Jump  E : Shoot  R : Reset  Q : Debug  ESC : Quit",
    ))?;
    Ok(())
}
