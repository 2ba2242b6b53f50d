// Copyright (c) 2026 rezky_nightky

use thiserror::Error;

/// Rejected configuration. Raised before any engine or grid exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("character set cannot be empty")]
    EmptyCharset,

    #[error("unknown color '{0}' (see --list-colors)")]
    UnknownColor(String),

    #[error("invalid rgb '{0}' (expected: R,G,B with each value 0-255)")]
    InvalidRgb(String),

    #[error("invalid drop length range {min}..={max} (need 1 <= min <= max)")]
    InvalidLengthRange { min: u16, max: u16 },

    #[error("failed to apply {name} {value} (min {min} max {max})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid probability for {name}: {value} (must be within 0..=1)")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("invalid --colormode: {0} (allowed: 0,16,8/256,24/32)")]
    InvalidColorMode(u16),
}
