// Copyright (c) 2026 rezky_nightky

//! Turns frames into terminal bytes: a full repaint on the first frame or
//! after a size change, otherwise only the cells that changed.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::color::{terminal_color, ColorMode};
use crate::frame::Frame;

struct State<W> {
    out: W,
    /// Our own copy of the last frame written. Never shares storage with
    /// the caller's buffer.
    last: Option<Frame>,
    buf: Vec<u8>,
}

pub struct Renderer<W: Write> {
    color_mode: ColorMode,
    state: Mutex<State<W>>,
}

/// Running foreground while a frame is being emitted.
#[derive(Default)]
struct Pen {
    fg: Option<Color>,
}

impl Pen {
    fn apply(&mut self, buf: &mut Vec<u8>, cell: Cell, mode: ColorMode) -> io::Result<()> {
        let want = if cell.is_bg {
            None
        } else {
            terminal_color(mode, cell.fg)
        };
        if want == self.fg {
            return Ok(());
        }
        match want {
            Some(fg) => buf.queue(SetForegroundColor(fg))?,
            None => buf.queue(SetAttribute(Attribute::Reset))?,
        };
        self.fg = want;
        Ok(())
    }
}

fn full_render(buf: &mut Vec<u8>, frame: &Frame, mode: ColorMode) -> io::Result<()> {
    let mut pen = Pen::default();
    let width = frame.width as usize;

    buf.queue(cursor::MoveTo(0, 0))?;
    for y in 0..frame.height {
        if y > 0 {
            buf.queue(cursor::MoveTo(0, y))?;
        }
        let mut drifted = false;
        for x in 0..frame.width {
            let cell = frame.cell_at_index(y as usize * width + x as usize);
            if drifted {
                buf.queue(cursor::MoveTo(x, y))?;
            }
            pen.apply(buf, cell, mode)?;
            buf.queue(Print(cell.ch))?;
            drifted = cell.ch.width() != Some(1);
        }
    }
    buf.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn delta_render(buf: &mut Vec<u8>, prev: &Frame, frame: &Frame, mode: ColorMode) -> io::Result<()> {
    let mut pen = Pen::default();
    let mut cur_pos: Option<(u16, u16)> = None;
    let mut changed = false;

    for (i, (old, cell)) in prev.cells().iter().zip(frame.cells()).enumerate() {
        if old == cell {
            continue;
        }
        changed = true;

        let x = (i % frame.width as usize) as u16;
        let y = (i / frame.width as usize) as u16;
        if cur_pos != Some((x, y)) {
            buf.queue(cursor::MoveTo(x, y))?;
        }
        pen.apply(buf, *cell, mode)?;
        buf.queue(Print(cell.ch))?;

        // wide or zero-width glyphs leave the cursor somewhere we can't trust
        cur_pos = match cell.ch.width() {
            Some(1) => Some((x.saturating_add(1), y)),
            _ => None,
        };
    }

    if changed {
        buf.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, color_mode: ColorMode) -> Self {
        Self {
            color_mode,
            state: Mutex::new(State {
                out,
                last: None,
                buf: Vec::with_capacity(16 * 1024),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes `frame` and remembers a private copy of it for the next diff.
    pub fn draw(&self, frame: &Frame) -> io::Result<()> {
        let mut guard = self.lock();
        let State { out, last, buf } = &mut *guard;

        buf.clear();
        match last.as_ref() {
            Some(prev) if prev.same_size(frame) => delta_render(buf, prev, frame, self.color_mode)?,
            _ => full_render(buf, frame, self.color_mode)?,
        }

        if !buf.is_empty() {
            if let Err(e) = out.write_all(buf).and_then(|()| out.flush()) {
                // part of the frame may be on screen; only a full repaint is safe
                *last = None;
                return Err(e);
            }
        }
        tracing::trace!(bytes = buf.len(), "frame written");

        if let Some(prev) = last.as_mut() {
            prev.copy_from(frame);
        } else {
            *last = Some(frame.clone());
        }
        Ok(())
    }

    /// Drops the cached frame so the next draw repaints everything.
    pub fn invalidate(&self) {
        self.lock().last = None;
    }
}

#[cfg(test)]
impl<W: Write> Renderer<W> {
    fn cached(&self) -> Option<Frame> {
        self.lock().last.clone()
    }
}

#[cfg(test)]
impl Renderer<Vec<u8>> {
    fn take_output(&self) -> String {
        String::from_utf8(std::mem::take(&mut self.lock().out)).unwrap()
    }
}
