// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// Brightening factor applied to the head of every trail.
pub const HEAD_BOOST: f64 = 1.2;

/// Number of shades in a trail gradient.
pub const TRAIL_STEPS: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn luma_sum(self) -> u16 {
        u16::from(self.r) + u16::from(self.g) + u16::from(self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

fn scale(v: u8, factor: f64) -> u8 {
    (f64::from(v) * factor).clamp(0.0, 255.0) as u8
}

/// Multiplies every channel by `factor`, saturating at 255.
pub fn brighten(c: Rgb, factor: f64) -> Rgb {
    Rgb::new(scale(c.r, factor), scale(c.g, factor), scale(c.b, factor))
}

/// Multiplies every channel by `factor` (expected <= 1).
pub fn dim(c: Rgb, factor: f64) -> Rgb {
    Rgb::new(scale(c.r, factor), scale(c.g, factor), scale(c.b, factor))
}

/// Head-to-tail shades for `base`.
///
/// Index 0 is the brightened head; the rest fade linearly by
/// `1 - (i / (steps - 1)) * decay`.
pub fn trail_gradient(base: Rgb, steps: usize, decay: f64) -> Vec<Rgb> {
    if steps == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(steps);
    out.push(brighten(base, HEAD_BOOST));
    if steps == 1 {
        return out;
    }
    let last = (steps - 1) as f64;
    for i in 1..steps {
        let fade = 1.0 - (i as f64 / last) * decay;
        out.push(dim(base, fade.max(0.0)));
    }
    out
}

/// Maps a row's distance from the head onto a gradient of `steps` shades.
pub fn gradient_index(distance: u16, length: u16, steps: usize) -> usize {
    if steps == 0 {
        return 0;
    }
    let length = f64::from(length.max(1));
    let idx = (f64::from(distance) / length * steps as f64).floor() as usize;
    idx.min(steps - 1)
}

fn dist2(a: Rgb, b: (u8, u8, u8)) -> i32 {
    let dr = i32::from(a.r) - i32::from(b.0);
    let dg = i32::from(a.g) - i32::from(b.1);
    let db = i32::from(a.b) - i32::from(b.2);
    dr * dr + dg * dg + db * db
}

fn to_ansi256(c: Rgb) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let step = |v: u8| ((u16::from(v) * 5 + 127) / 255) as u8;
    let (r6, g6, b6) = (step(c.r), step(c.g), step(c.b));
    let cube = (
        LEVELS[r6 as usize],
        LEVELS[g6 as usize],
        LEVELS[b6 as usize],
    );
    let cube_idx = 16 + 36 * r6 + 6 * g6 + b6;

    let avg = (c.luma_sum() / 3) as u8;
    let (gray_idx, gray) = match avg {
        0..=7 => (16, 0),
        239..=255 => (231, 255),
        _ => {
            let idx = 232 + (avg - 8) / 10;
            (idx, 8 + 10 * (idx - 232))
        }
    };

    if dist2(c, (gray, gray, gray)) < dist2(c, cube) {
        gray_idx
    } else {
        cube_idx
    }
}

fn to_color16(c: Rgb) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::DarkGrey, (128, 128, 128)),
        (Color::Grey, (192, 192, 192)),
        (Color::White, (255, 255, 255)),
        (Color::DarkRed, (128, 0, 0)),
        (Color::Red, (255, 0, 0)),
        (Color::DarkGreen, (0, 128, 0)),
        (Color::Green, (0, 255, 0)),
        (Color::DarkBlue, (0, 0, 128)),
        (Color::Blue, (0, 0, 255)),
        (Color::DarkCyan, (0, 128, 128)),
        (Color::Cyan, (0, 255, 255)),
        (Color::DarkMagenta, (128, 0, 128)),
        (Color::Magenta, (255, 0, 255)),
        (Color::DarkYellow, (128, 128, 0)),
        (Color::Yellow, (255, 255, 0)),
    ];

    TABLE
        .iter()
        .min_by_key(|(_, rgb)| dist2(c, *rgb))
        .map(|(color, _)| *color)
        .unwrap_or(Color::White)
}

/// Terminal foreground for `c`, or `None` when the mode carries no color.
pub fn terminal_color(mode: ColorMode, c: Rgb) -> Option<Color> {
    match mode {
        ColorMode::Mono => None,
        ColorMode::Color16 => Some(to_color16(c)),
        ColorMode::Color256 => Some(Color::AnsiValue(to_ansi256(c))),
        ColorMode::TrueColor => Some(Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brighten_saturates_at_255() {
        let c = brighten(Rgb::new(0, 255, 100), 1.2);
        assert_eq!(c, Rgb::new(0, 255, 120));
    }

    #[test]
    fn dim_truncates() {
        let c = dim(Rgb::new(255, 191, 3), 0.5);
        assert_eq!(c, Rgb::new(127, 95, 1));
    }

    #[test]
    fn gradient_starts_with_brightened_head_and_never_brightens() {
        for base in [
            Rgb::new(0, 255, 0),
            Rgb::new(255, 191, 0),
            Rgb::new(128, 0, 255),
            Rgb::new(255, 255, 255),
            Rgb::new(3, 7, 11),
        ] {
            for decay in [0.0, 0.7, 0.8, 1.0] {
                let g = trail_gradient(base, TRAIL_STEPS, decay);
                assert_eq!(g.len(), TRAIL_STEPS);
                assert_eq!(g[0], brighten(base, HEAD_BOOST));
                for pair in g.windows(2) {
                    assert!(
                        pair[0].luma_sum() >= pair[1].luma_sum(),
                        "{:?} brightened along the trail: {:?}",
                        base,
                        g
                    );
                }
            }
        }
    }

    #[test]
    fn gradient_tail_fades_by_decay() {
        let g = trail_gradient(Rgb::new(0, 200, 0), 6, 0.7);
        assert_eq!(g[5], Rgb::new(0, 60, 0));
    }

    #[test]
    fn gradient_degenerate_lengths() {
        assert!(trail_gradient(Rgb::new(1, 2, 3), 0, 0.7).is_empty());
        assert_eq!(trail_gradient(Rgb::new(10, 10, 10), 1, 0.7), vec![Rgb::new(12, 12, 12)]);
    }

    #[test]
    fn gradient_index_is_clamped() {
        assert_eq!(gradient_index(0, 10, 6), 0);
        assert_eq!(gradient_index(5, 10, 6), 3);
        assert_eq!(gradient_index(10, 10, 6), 5);
        assert_eq!(gradient_index(40, 10, 6), 5);
        assert_eq!(gradient_index(3, 0, 6), 5);
    }

    #[test]
    fn mono_has_no_terminal_color() {
        assert_eq!(terminal_color(ColorMode::Mono, Rgb::new(0, 255, 0)), None);
        assert_eq!(
            terminal_color(ColorMode::Color16, Rgb::new(0, 250, 0)),
            Some(Color::Green)
        );
        assert_eq!(
            terminal_color(ColorMode::Color256, Rgb::new(0, 255, 0)),
            Some(Color::AnsiValue(46))
        );
    }
}
