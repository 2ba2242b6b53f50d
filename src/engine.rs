// Copyright (c) 2026 rezky_nightky

use std::io;

use rand::rngs::StdRng;

use crate::{
    color::{trail_gradient, Rgb, TRAIL_STEPS},
    config::Settings,
    error::ConfigError,
    frame::Frame,
    grid::DropGrid,
};

/// Size used until the terminal reports a usable one.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Source of the current terminal size as `(width, height)`.
pub trait SizeSource {
    fn size(&mut self) -> io::Result<(u16, u16)>;
}

impl<F> SizeSource for F
where
    F: FnMut() -> io::Result<(u16, u16)>,
{
    fn size(&mut self) -> io::Result<(u16, u16)> {
        self()
    }
}

/// Drives the grid and owns the single frame buffer reused every tick.
pub struct Engine<S: SizeSource> {
    grid: DropGrid,
    frame: Frame,
    gradient: Vec<Rgb>,
    sizes: S,
}

impl<S: SizeSource> Engine<S> {
    pub fn new(settings: &Settings, sizes: S, rng: StdRng) -> Result<Self, ConfigError> {
        let grid = DropGrid::new(settings, rng)?;
        let mut engine = Self {
            grid,
            frame: Frame::new(0, 0),
            gradient: trail_gradient(settings.base_color, TRAIL_STEPS, settings.fade),
            sizes,
        };
        let (width, height) = engine.query_size().unwrap_or(FALLBACK_SIZE);
        engine.resize(width, height);
        Ok(engine)
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn grid(&self) -> &DropGrid {
        &self.grid
    }

    pub fn set_density(&mut self, density: f64) {
        self.grid.set_density(density);
    }

    /// Usable size from the provider, or `None` when it failed or reported
    /// an empty screen.
    fn query_size(&mut self) -> Option<(u16, u16)> {
        match self.sizes.size() {
            Ok((w, h)) if w > 0 && h > 0 => Some((w, h)),
            Ok((w, h)) => {
                tracing::debug!(width = w, height = h, "ignoring empty terminal size");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "terminal size query failed");
                None
            }
        }
    }

    /// Resizes the grid and swaps in a freshly allocated frame buffer.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width() && height == self.height() {
            return;
        }
        tracing::debug!(width, height, "resizing rain");
        self.grid.resize(width, height);
        self.frame = Frame::new(width, height);
    }

    /// Produces the next frame. The returned buffer is reused, so callers
    /// that keep it past the next call must copy it.
    pub fn next_frame(&mut self) -> &Frame {
        if let Some((width, height)) = self.query_size() {
            self.resize(width, height);
        }

        self.frame.clear();
        self.grid.rain(&mut self.frame, &self.gradient);
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    use super::*;

    fn fixed(w: u16, h: u16) -> impl FnMut() -> io::Result<(u16, u16)> {
        move || Ok((w, h))
    }

    fn settings() -> Settings {
        Settings {
            density: 1.0,
            ..Settings::default()
        }
    }

    #[test]
    fn starts_at_reported_size() {
        let e = Engine::new(&settings(), fixed(12, 5), StdRng::seed_from_u64(1)).unwrap();
        assert_eq!((e.width(), e.height()), (12, 5));
        assert_eq!(e.grid().columns().len(), 12);
    }

    #[test]
    fn failed_query_falls_back_then_keeps_last_size() {
        let fail = Rc::new(StdCell::new(true));
        let size = Rc::new(StdCell::new((30u16, 10u16)));
        let sizes = {
            let fail = Rc::clone(&fail);
            let size = Rc::clone(&size);
            move || -> io::Result<(u16, u16)> {
                if fail.get() {
                    Err(io::Error::other("no tty"))
                } else {
                    Ok(size.get())
                }
            }
        };
        let mut e = Engine::new(&settings(), sizes, StdRng::seed_from_u64(2)).unwrap();
        assert_eq!((e.width(), e.height()), FALLBACK_SIZE);

        fail.set(false);
        let f = e.next_frame();
        assert_eq!((f.width, f.height), (30, 10));

        fail.set(true);
        let f = e.next_frame();
        assert_eq!((f.width, f.height), (30, 10));

        fail.set(false);
        size.set((0, 0));
        let f = e.next_frame();
        assert_eq!((f.width, f.height), (30, 10));
    }

    #[test]
    fn resize_reallocates_frame_at_new_size() {
        let size = Rc::new(StdCell::new((6u16, 4u16)));
        let sizes = {
            let size = Rc::clone(&size);
            move || -> io::Result<(u16, u16)> { Ok(size.get()) }
        };
        let mut e = Engine::new(&settings(), sizes, StdRng::seed_from_u64(3)).unwrap();
        e.next_frame();
        size.set((9, 2));
        let f = e.next_frame();
        assert_eq!((f.width, f.height), (9, 2));
        assert_eq!(f.cells().len(), 18);
        assert_eq!(e.grid().columns().len(), 9);
    }

    #[test]
    fn steady_state_reuses_one_buffer() {
        let mut e = Engine::new(&settings(), fixed(8, 6), StdRng::seed_from_u64(4)).unwrap();
        let first = e.next_frame() as *const Frame;
        let second = e.next_frame() as *const Frame;
        assert_eq!(first, second);
    }

    #[test]
    fn frame_matches_droplet_state() {
        let mut e = Engine::new(&settings(), fixed(5, 7), StdRng::seed_from_u64(5)).unwrap();
        for _ in 0..20 {
            let frame = e.next_frame().clone();
            let mut expected = Frame::new(5, 7);
            let gradient = trail_gradient(Rgb::new(0, 255, 0), TRAIL_STEPS, 0.7);
            for (col, drops) in e.grid().columns().iter().enumerate() {
                for d in drops {
                    d.draw(col as u16, &mut expected, &gradient);
                }
            }
            assert_eq!(frame, expected);
        }
    }
}
