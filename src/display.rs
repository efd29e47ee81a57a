//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{GameState, Phase, Sprite};

/// Character used for the visual ground line.
const GROUND_CHAR: &str = "─";

// ── Colour themes ─────────────────────────────────────────────────────────────

struct Palette {
    player: Color,
    obstacle: Color,
    cloud: Color,
    text: Color,
    bg: Color,
}

const DAY: Palette = Palette {
    player: Color::Green,
    obstacle: Color::Red,
    cloud: Color::Grey,
    text: Color::White,
    bg: Color::Reset,
};

const NIGHT: Palette = Palette {
    player: Color::Cyan,
    obstacle: Color::Magenta,
    cloud: Color::White,
    text: Color::Yellow,
    bg: Color::DarkBlue,
};

fn palette(is_day: bool) -> &'static Palette {
    if is_day {
        &DAY
    } else {
        &NIGHT
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let pal = palette(state.is_day);

    out.queue(style::SetBackgroundColor(pal.bg))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for cloud in &state.clouds {
        draw_sprite(out, cloud.sprite, cloud.x.round() as i32, cloud.y, pal.cloud, state)?;
    }

    draw_ground(out, state, pal)?;

    for obstacle in &state.obstacles {
        let rect = obstacle.bounding_box();
        draw_sprite(out, obstacle.sprite, rect.x, rect.y, pal.obstacle, state)?;
    }

    draw_sprite(
        out,
        state.player.sprite(),
        state.player.x,
        state.player.y_top,
        pal.player,
        state,
    )?;

    draw_hud(out, state, pal)?;

    match state.phase {
        Phase::Start => draw_start_banner(out, state, pal)?,
        Phase::Paused => draw_centered_lines(out, state, pal, &["-- PAUSED --".to_string()])?,
        Phase::GameOver => {
            let lines = [
                "GAME OVER".to_string(),
                format!("Your score: {}", state.score),
                "Press R to restart, Q to quit".to_string(),
            ];
            draw_centered_lines(out, state, pal, &lines)?;
        }
        Phase::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Blit a sprite at (x, y) with spaces transparent. Cells outside the
/// screen are skipped, so sprites entering from the right or leaving on
/// the left clip cleanly instead of erroring.
fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    x: i32,
    y: i32,
    color: Color,
    state: &GameState,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (row, line) in sprite.rows.iter().enumerate() {
        let draw_y = y + row as i32;
        if draw_y < 0 || draw_y >= state.height as i32 {
            continue;
        }
        for (col, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let draw_x = x + col as i32;
            if draw_x < 0 || draw_x >= state.width as i32 {
                continue;
            }
            out.queue(cursor::MoveTo(draw_x as u16, draw_y as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

// ── Ground line ───────────────────────────────────────────────────────────────

fn draw_ground<W: Write>(out: &mut W, state: &GameState, pal: &Palette) -> std::io::Result<()> {
    // The visual line sits one row below where sprite bottoms rest.
    let row = state.ground_y + 1;
    if row < 0 || row >= state.height as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(0, row as u16))?;
    out.queue(style::SetForegroundColor(pal.text))?;
    out.queue(Print(GROUND_CHAR.repeat(state.width.saturating_sub(1) as usize)))?;
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, pal: &Palette) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(pal.text))?;

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    // High score — right
    let hs_text = format!("High Score: {}", state.high_score);
    let hs_x = state
        .width
        .saturating_sub(hs_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(hs_x, 0))?;
    out.queue(Print(&hs_text))?;

    let mode_text = if state.is_day { "Mode: Day" } else { "Mode: Night" };
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(Print(mode_text))?;

    Ok(())
}

// ── Banners ───────────────────────────────────────────────────────────────────

fn draw_start_banner<W: Write>(
    out: &mut W,
    state: &GameState,
    pal: &Palette,
) -> std::io::Result<()> {
    let lines = [
        "D I N O   D A S H".to_string(),
        String::new(),
        "Press any key to start".to_string(),
        "Space/Up: Jump   P: Pause   Q: Quit".to_string(),
    ];
    draw_centered_lines(out, state, pal, &lines)
}

fn draw_centered_lines<W: Write>(
    out: &mut W,
    state: &GameState,
    pal: &Palette,
    lines: &[String],
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(pal.text))?;
    let start_row = (state.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        let col = (state.width / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
