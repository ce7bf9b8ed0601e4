use crate::config::START_CAPTION;
use crate::particles::{Effect, ParticleField};
use crate::snapshot::{LOVE_NOTE, LOVE_SIGNOFF, Snapshot, TITLE};
use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{ExecutableCommand, QueueableCommand};
use std::io::{self, Write};
use std::time::Instant;

// Single-cell glyphs so particles never shift the grid
const HEART: char = '♥';
const SPARKLE_SMALL: char = '·';
const SPARKLE_BIG: char = '✧';

const UNITS_PER_ROW: usize = 3;

pub fn enter() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    Ok(())
}

pub fn restore() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn text_block(snapshot: &Snapshot) -> Vec<String> {
    let mut block = vec![TITLE.to_string(), START_CAPTION.to_string(), String::new()];

    if !snapshot.started {
        block.push("Not yet started".to_string());
        block.push(String::new());
    }
    if let Some(occasion) = snapshot.occasion {
        block.push(occasion.banner());
        block.push(String::new());
    }

    for row in snapshot.time_units().chunks(UNITS_PER_ROW) {
        let cells: Vec<String> = row
            .iter()
            .map(|u| format!("{:>7} {:<12}", u.value, u.label))
            .collect();
        block.push(cells.join("  "));
    }

    block.push(String::new());
    block.push(LOVE_NOTE.to_string());
    block.push(LOVE_SIGNOFF.to_string());
    block
}

/// Lays out one frame as exactly `rows` lines of at most `cols` cells:
/// the counter text centered, particles drawn into the blank cells around it.
pub fn compose(
    snapshot: &Snapshot,
    particles: &ParticleField,
    now: Instant,
    cols: u16,
    rows: u16,
) -> Vec<String> {
    let (w, h) = (cols as usize, rows as usize);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let mut grid = vec![vec![' '; w]; h];

    let block = text_block(snapshot);
    let top = h.saturating_sub(block.len()) / 2;
    for (i, line) in block.iter().enumerate() {
        let Some(row) = grid.get_mut(top + i) else {
            break;
        };
        let chars: Vec<char> = line.chars().collect();
        let left = w.saturating_sub(chars.len()) / 2;
        for (cell, ch) in row.iter_mut().skip(left).zip(chars) {
            *cell = ch;
        }
    }

    for particle in particles.iter() {
        let progress = particle.progress(now);
        let (x, y, glyph) = match particle.effect {
            Effect::Heart(heart) => {
                let x = scale(heart.left, w);
                // Rises from the bottom row to above the top edge
                let travelled = (progress * (h as f32 + 1.0)) as usize;
                let Some(y) = (h - 1).checked_sub(travelled) else {
                    continue;
                };
                (x, y, HEART)
            }
            Effect::Sparkle(sparkle) => {
                let glyph = if (0.25..0.75).contains(&progress) {
                    SPARKLE_BIG
                } else {
                    SPARKLE_SMALL
                };
                (scale(sparkle.x, w), scale(sparkle.y, h), glyph)
            }
        };

        if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            if *cell == ' ' {
                *cell = glyph;
            }
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn scale(percent: f32, extent: usize) -> usize {
    let pos = (percent.clamp(0.0, 100.0) / 100.0 * extent as f32) as usize;
    pos.min(extent.saturating_sub(1))
}

pub fn draw<W: Write>(out: &mut W, frame: &[String]) -> Result<()> {
    for (i, line) in frame.iter().enumerate() {
        out.queue(MoveTo(0, i as u16))?;
        out.queue(Print(line))?;
        out.queue(Clear(ClearType::UntilNewLine))?;
    }
    out.flush()?;
    Ok(())
}
