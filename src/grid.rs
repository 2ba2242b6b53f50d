// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, Rng};

use crate::{
    color::Rgb,
    config::Settings,
    droplet::{create_droplet, DropShape, Droplet, Odds},
    error::ConfigError,
    frame::Frame,
};

/// Droplets grouped by terminal column.
pub struct DropGrid {
    width: u16,
    height: u16,
    density: f64,
    shape: DropShape,
    odds: Odds,
    settings: Settings,
    columns: Vec<Vec<Droplet>>,
    rng: StdRng,
}

impl DropGrid {
    /// Empty grid; the first [`DropGrid::resize`] populates it.
    pub fn new(settings: &Settings, rng: StdRng) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            width: 0,
            height: 0,
            density: settings.density,
            shape: settings.shape(),
            odds: settings.odds_for(settings.density),
            settings: settings.clone(),
            columns: Vec::new(),
            rng,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    #[cfg(test)]
    pub fn columns(&self) -> &[Vec<Droplet>] {
        &self.columns
    }

    /// Counts a column may hold at the current density without re-rolling.
    fn count_bounds(&self) -> (usize, usize) {
        let lo = self.density.floor() as usize;
        let hi = self.density.ceil() as usize;
        (lo.max(1), hi.max(1))
    }

    /// Whole part plus a weighted roll for the fraction, at least one.
    fn roll_count(&mut self) -> usize {
        let whole = self.density.floor();
        let mut n = whole as usize;
        if self.rng.random::<f64>() < self.density - whole {
            n += 1;
        }
        n.max(1)
    }

    /// Leaves a column alone while its count still suits the density.
    fn fit_column(&mut self, drops: &mut Vec<Droplet>) {
        let (lo, hi) = self.count_bounds();
        if !(lo..=hi).contains(&drops.len()) {
            self.refill_column(drops);
        }
    }

    /// Rolls a fresh target count and truncates or tops up to it.
    fn refill_column(&mut self, drops: &mut Vec<Droplet>) {
        let target = self.roll_count();
        drops.truncate(target);
        while drops.len() < target {
            drops.push(create_droplet(self.height, &self.shape, &mut self.rng));
        }
    }

    /// Matches the grid to a new screen size, keeping droplets in columns
    /// that survive.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;

        let mut old = std::mem::take(&mut self.columns).into_iter();
        let mut columns = Vec::with_capacity(width as usize);
        for _ in 0..width {
            let mut drops = old.next().unwrap_or_default();
            self.fit_column(&mut drops);
            columns.push(drops);
        }
        self.columns = columns;
    }

    /// Changes the drops-per-column target and re-derives the odds.
    pub fn set_density(&mut self, density: f64) {
        self.density = density;
        self.odds = self.settings.odds_for(density);

        let mut columns = std::mem::take(&mut self.columns);
        for drops in &mut columns {
            self.refill_column(drops);
        }
        self.columns = columns;
    }

    /// Advances every droplet one tick and draws the active ones.
    pub fn rain(&mut self, frame: &mut Frame, gradient: &[Rgb]) {
        let Self {
            height,
            shape,
            odds,
            columns,
            rng,
            ..
        } = self;
        for (col, drops) in columns.iter_mut().enumerate() {
            for d in drops.iter_mut() {
                d.update(*height, shape, odds, rng);
                d.draw(col as u16, frame, gradient);
            }
        }
    }
}
