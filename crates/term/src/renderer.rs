//! Screen: owns the real terminal and flushes framebuffers to it.
//!
//! Each frame is diffed against the last one presented; only changed runs of
//! cells are re-emitted. A size change or [`Screen::invalidate`] forces a full
//! repaint.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Horizontal run of changed cells on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct Screen {
    stdout: io::Stdout,
    shown: FrameBuffer,
    valid: bool,
    runs: Vec<Run>,
    buf: Vec<u8>,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: FrameBuffer::new(0, 0),
            valid: false,
            runs: Vec::with_capacity(256),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen with mouse and focus reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(EnableFocusChange)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo everything [`Screen::enter`] did. Safe to call more than once.
    pub fn leave(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableFocusChange)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Present `fb`, then swap it with the previously shown frame.
    ///
    /// The caller gets the stale buffer back to draw the next frame into, so
    /// no frame is ever cloned.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let same_size = self.shown.width() == fb.width() && self.shown.height() == fb.height();
        if self.valid && same_size {
            changed_runs(&self.shown, fb, &mut self.runs);
            encode_runs_into(fb, &self.runs, &mut self.buf)?;
        } else {
            encode_full_into(fb, &mut self.buf)?;
        }
        self.flush()?;

        std::mem::swap(&mut self.shown, fb);
        fb.resize(self.shown.width(), self.shown.height());
        self.valid = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the changed runs between two equally sized frames into `out`.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<Run>) {
    out.clear();
    for y in 0..next.height() {
        let (a, b) = (prev.row(y), next.row(y));
        let mut start: Option<usize> = None;
        for x in 0..b.len() {
            let dirty = a.get(x) != Some(&b[x]);
            match (dirty, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    out.push(run(s, x, y));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            out.push(run(s, b.len(), y));
        }
    }
}

fn run(start: usize, end: usize, y: u16) -> Run {
    Run {
        x: start as u16,
        y,
        len: (end - start) as u16,
    }
}

/// Encode a full repaint of `fb` into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        emit_cells(fb.row(y), &mut style, out)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only `runs` of `fb` into `out`.
pub fn encode_runs_into(fb: &FrameBuffer, runs: &[Run], out: &mut Vec<u8>) -> Result<()> {
    if runs.is_empty() {
        return Ok(());
    }
    let mut style = None;
    for r in runs {
        let row = fb.row(r.y);
        let start = usize::from(r.x);
        let end = (start + usize::from(r.len)).min(row.len());
        out.queue(cursor::MoveTo(r.x, r.y))?;
        emit_cells(&row[start..end], &mut style, out)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn emit_cells(cells: &[Cell], current: &mut Option<CellStyle>, out: &mut Vec<u8>) -> Result<()> {
    for cell in cells {
        if *current != Some(cell.style) {
            apply_style(out, cell.style)?;
            *current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.set(x, 0, 'X', style);
        }
        b.set(5, 1, 'Y', style);

        let mut runs = Vec::new();
        changed_runs(&a, &b, &mut runs);
        assert_eq!(
            runs,
            vec![Run { x: 1, y: 0, len: 3 }, Run { x: 5, y: 1, len: 1 }]
        );
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = FrameBuffer::new(8, 3);
        let mut runs = Vec::new();
        changed_runs(&a, &a.clone(), &mut runs);
        assert!(runs.is_empty());

        let mut out = Vec::new();
        encode_runs_into(&a, &runs, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn full_encode_contains_every_glyph() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "a7z", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("a7z"));
    }
}
