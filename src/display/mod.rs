/// Terminal rendering.  Every function takes a mutable writer and the
/// engine's published snapshot; no game logic runs here.  The module
/// projects the 1300×750 world onto the terminal grid and translates
/// the snapshot into queued terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::engine::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{ActorKind, LevelOutcome, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEARTS: Color = Color::Red;
const C_HUD_BOSS: Color = Color::Magenta;
const C_USER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Red;
const C_USER_PROJECTILE: Color = Color::Cyan;
const C_ENEMY_PROJECTILE: Color = Color::Magenta;
const C_BOSS_PROJECTILE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame from the published snapshot.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, snap, width)?;

    for sprite in &snap.sprites {
        draw_sprite(out, sprite.kind, sprite.x, sprite.y, width, height)?;
    }

    draw_controls_hint(out, height)?;

    match snap.outcome {
        Some(LevelOutcome::Win) => draw_overlay(out, snap, width, height, true)?,
        Some(LevelOutcome::Lose) => draw_overlay(out, snap, width, height, false)?,
        _ => {}
    }

    // Leave the cursor out of the playfield, then flush the queue
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World → terminal projection ───────────────────────────────────────────────

/// Map a world coordinate to a terminal cell inside the playfield
/// (rows 2..height-2, cols 1..width-1).
fn project(x: f64, y: f64, width: u16, height: u16) -> (u16, u16) {
    let cols = width.saturating_sub(2).max(1) as f64;
    let rows = height.saturating_sub(4).max(1) as f64;
    let cx = 1.0 + (x.clamp(0.0, SCREEN_WIDTH) / SCREEN_WIDTH) * (cols - 1.0);
    let cy = 2.0 + (y.clamp(0.0, SCREEN_HEIGHT) / SCREEN_HEIGHT) * (rows - 1.0);
    (cx as u16, cy as u16)
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Top bar on row 1, below the HUD
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Bottom bar on row h-2, above the controls hint
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, width: u16) -> std::io::Result<()> {
    // Score and kills, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}   Kills: {}", snap.score, snap.kills)))?;

    // Boss status in the centre, only while the boss is alive
    if let Some(boss) = &snap.boss {
        let boss_str = if boss.shielded {
            format!("BOSS {:>2}  SHIELD ACTIVE", boss.health)
        } else {
            format!("BOSS {:>2}", boss.health)
        };
        let bx = (width / 2).saturating_sub(boss_str.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(bx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_BOSS))?;
        out.queue(Print(&boss_str))?;
    }

    // Hearts, right
    let hearts: String = "♥".repeat(snap.hearts.max(0) as usize);
    let hearts_text = format!("Hearts: {}", hearts);
    let rx = width.saturating_sub(hearts_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEARTS))?;
    out.queue(Print(&hearts_text))?;

    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    kind: ActorKind,
    x: f64,
    y: f64,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let (glyph, color) = match kind {
        ActorKind::User => ("=▶", C_USER),
        ActorKind::Enemy => ("◀=", C_ENEMY),
        ActorKind::Boss => ("《◉》", C_BOSS),
        ActorKind::UserProjectile => ("─", C_USER_PROJECTILE),
        ActorKind::EnemyProjectile => ("╌", C_ENEMY_PROJECTILE),
        ActorKind::BossProjectile => ("●", C_BOSS_PROJECTILE),
    };
    let (cx, cy) = project(x, y, width, height);
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Fire   Q : Quit"))?;
    Ok(())
}

// ── End-of-run overlay ────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    width: u16,
    height: u16,
    won: bool,
) -> std::io::Result<()> {
    let (banner, color) = if won {
        ("║     YOU  WIN     ║", Color::Green)
    } else {
        ("║    GAME  OVER    ║", Color::Red)
    };
    let score_line = format!("Final Score: {}", snap.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", color),
        (banner, color),
        ("╚══════════════════╝", color),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, c)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*c))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
