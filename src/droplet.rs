// Copyright (c) 2026 rezky_nightky

use rand::{seq::IndexedRandom, Rng};

use crate::{
    cell::Cell,
    color::{gradient_index, Rgb},
    frame::Frame,
};

/// Glyphs and trail lengths a droplet may be drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct DropShape {
    pub min_len: u16,
    pub max_len: u16,
    pub chars: Vec<char>,
}

impl DropShape {
    fn roll_len<R: Rng + ?Sized>(&self, rng: &mut R) -> u16 {
        let lo = self.min_len.max(1);
        rng.random_range(lo..=self.max_len.max(lo))
    }

    fn roll_char<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.chars.choose(rng).copied().unwrap_or('0')
    }
}

/// Per-tick chances driving the active/inactive cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Odds {
    pub reactivate: f64,
    pub pause: f64,
}

impl Odds {
    /// Denser rain wakes sleeping droplets more often and parks them less.
    pub fn from_density(density: f64, min_pause: f64) -> Self {
        let reactivate = if density > 1.0 {
            0.005 + (density - 1.0) * 0.02
        } else {
            0.005 * density
        };
        let pause = if density > 1.0 {
            0.05 - (density - 1.0) * 0.02
        } else {
            0.15 - density * 0.05
        };
        Self {
            reactivate: reactivate.clamp(0.0, 1.0),
            pause: pause.clamp(min_pause, 1.0),
        }
    }
}

/// One falling stream bound to a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Droplet {
    /// Row of the head. Negative while still above the screen.
    pub position: i32,
    pub length: u16,
    pub ch: char,
    pub active: bool,
}

/// Fresh active droplet with a staggered start so columns fall out of step.
pub fn create_droplet<R: Rng + ?Sized>(height: u16, shape: &DropShape, rng: &mut R) -> Droplet {
    let h = i32::from(height.max(1));
    let position = rng.random_range(0..h) - rng.random_range(0..(h / 2).max(1));
    Droplet {
        position,
        length: shape.roll_len(rng),
        ch: shape.roll_char(rng),
        active: true,
    }
}

impl Droplet {
    pub fn tail(&self) -> i32 {
        self.position - i32::from(self.length)
    }

    fn reroll<R: Rng + ?Sized>(&mut self, shape: &DropShape, rng: &mut R) {
        self.length = shape.roll_len(rng);
        self.ch = shape.roll_char(rng);
    }

    /// Advances one tick against a screen `height` rows tall.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        height: u16,
        shape: &DropShape,
        odds: &Odds,
        rng: &mut R,
    ) {
        if !self.active {
            if rng.random::<f64>() < odds.reactivate {
                self.reroll(shape, rng);
                self.position = 0;
                self.active = true;
            }
            return;
        }

        self.position += 1;
        if self.tail() > i32::from(height) {
            self.reroll(shape, rng);
            self.position = -i32::from(self.length);
            if rng.random::<f64>() < odds.pause {
                self.active = false;
            }
        }
    }

    /// Paints the visible part of the trail into column `col`.
    pub fn draw(&self, col: u16, frame: &mut Frame, gradient: &[Rgb]) {
        if !self.active || gradient.is_empty() {
            return;
        }
        let top = self.tail().max(0);
        let bottom = self.position.min(i32::from(frame.height) - 1);
        for row in top..=bottom {
            let distance = (self.position - row) as u16;
            let fg = gradient[gradient_index(distance, self.length, gradient.len())];
            frame.set(col, row as u16, Cell::glyph(self.ch, fg));
        }
    }
}
