// Copyright (c) 2026 rezky_nightky

use crate::color::Rgb;
use crate::error::ConfigError;

pub const THEMES: &[(&str, Rgb, &str)] = &[
    ("green", Rgb::new(0, 255, 0), "Classic phosphor green"),
    ("amber", Rgb::new(255, 191, 0), "Amber monitor"),
    ("red", Rgb::new(255, 0, 0), "Red"),
    ("orange", Rgb::new(255, 165, 0), "Orange"),
    ("blue", Rgb::new(0, 150, 255), "Blue"),
    ("purple", Rgb::new(128, 0, 255), "Purple"),
    ("cyan", Rgb::new(0, 255, 255), "Cyan"),
    ("pink", Rgb::new(255, 20, 147), "Deep pink"),
    ("white", Rgb::new(255, 255, 255), "White"),
];

pub fn theme_from_str(name: &str) -> Result<Rgb, ConfigError> {
    let key = name.trim().to_ascii_lowercase();
    let key = match key.as_str() {
        "grey" | "gray" => "white",
        "yellow" | "gold" => "amber",
        other => other,
    };
    THEMES
        .iter()
        .find(|(n, _, _)| *n == key)
        .map(|(_, rgb, _)| *rgb)
        .ok_or_else(|| ConfigError::UnknownColor(name.to_string()))
}

/// Parses `R,G,B` with decimal components.
pub fn parse_rgb(s: &str) -> Result<Rgb, ConfigError> {
    let bad = || ConfigError::InvalidRgb(s.to_string());
    let mut parts = s.split(',').map(|p| p.trim().parse::<u8>());
    let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };
    Ok(Rgb::new(r, g, b))
}
