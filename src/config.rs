// Copyright (c) 2026 rezky_nightky

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::charset::{charset_from_str, CHARSETS};
use crate::color::{ColorMode, Rgb};
use crate::droplet::{DropShape, Odds};
use crate::error::ConfigError;
use crate::theme::{parse_rgb, theme_from_str, THEMES};

pub const DENSITY_RANGE: (f64, f64) = (0.1, 3.0);
pub const FPS_RANGE: (u32, u32) = (1, 60);
pub const DURATION_MAX_SECS: f64 = 86400.0;

pub fn color_enabled_stdout() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphfall", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'c',
        long = "color",
        default_value = "green",
        help_heading = "APPEARANCE",
        help = "Color theme (see --list-colors)"
    )]
    pub color: String,

    #[arg(
        long = "rgb",
        value_name = "R,G,B",
        help_heading = "APPEARANCE",
        help = "Custom base color, overrides --color"
    )]
    pub rgb: Option<String>,

    #[arg(
        long = "fade",
        default_value_t = 0.7,
        help_heading = "APPEARANCE",
        help = "How far the trail fades toward black (min 0 max 1)"
    )]
    pub fade: f64,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: 24-bit if COLORTERM says so, else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 10,
        help_heading = "PERFORMANCE",
        help = "Frames per second (min 1 max 60)"
    )]
    pub fps: u32,

    #[arg(
        short = 'd',
        long = "density",
        default_value_t = 0.7,
        help_heading = "PERFORMANCE",
        help = "Drops per column (min 0.1 max 3.0)"
    )]
    pub density: f64,

    #[arg(
        long = "charset",
        default_value = "matrix",
        help_heading = "CHARSET",
        help = "Charset preset (see --list-charsets) or a literal string of glyphs"
    )]
    pub charset: String,

    #[arg(
        long = "min-len",
        default_value_t = 8,
        help_heading = "DROPS (ADVANCED)",
        help = "Shortest trail length"
    )]
    pub min_len: u16,

    #[arg(
        long = "max-len",
        default_value_t = 19,
        help_heading = "DROPS (ADVANCED)",
        help = "Longest trail length"
    )]
    pub max_len: u16,

    #[arg(
        long = "reactivate-chance",
        help_heading = "DROPS (ADVANCED)",
        help = "Per-tick chance a parked drop restarts (0-1). Default derives from density"
    )]
    pub reactivate_chance: Option<f64>,

    #[arg(
        long = "pause-chance",
        help_heading = "DROPS (ADVANCED)",
        help = "Chance a drop parks after leaving the screen (0-1). Default derives from density"
    )]
    pub pause_chance: Option<f64>,

    #[arg(
        long = "min-pause-chance",
        default_value_t = 0.01,
        help_heading = "DROPS (ADVANCED)",
        help = "Floor for the density-derived pause chance (0-1)"
    )]
    pub min_pause_chance: f64,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (<=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the random generator for a reproducible rain"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "log-file",
        value_name = "PATH",
        help_heading = "GENERAL",
        help = "Write diagnostics to PATH (filter with RUST_LOG)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "list-charsets",
        help_heading = "HELP",
        help = "List available charset presets and exit"
    )]
    pub list_charsets: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available color themes and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    ColorMode::Color256
}

impl Args {
    pub fn color_mode(&self) -> Result<ColorMode, ConfigError> {
        match self.colormode {
            None => Ok(detect_color_mode_auto()),
            Some(0) => Ok(ColorMode::Mono),
            Some(16) => Ok(ColorMode::Color16),
            Some(8) | Some(256) => Ok(ColorMode::Color256),
            Some(24) | Some(32) => Ok(ColorMode::TrueColor),
            Some(other) => Err(ConfigError::InvalidColorMode(other)),
        }
    }

    /// Wall-clock limit for the run; `None` when unset or not positive.
    pub fn run_limit(&self) -> Result<Option<Duration>, ConfigError> {
        match self.duration {
            Some(s) if s.is_nan() || s > 0.0 => {
                require_range("--duration", s, 0.1, DURATION_MAX_SECS)?;
                Ok(Some(Duration::from_secs_f64(s)))
            }
            _ => Ok(None),
        }
    }

    /// Resolves names and presets into a validated [`Settings`].
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let base_color = match &self.rgb {
            Some(rgb) => parse_rgb(rgb)?,
            None => theme_from_str(&self.color)?,
        };
        let settings = Settings {
            base_color,
            density: self.density,
            chars: charset_from_str(&self.charset)?,
            min_len: self.min_len,
            max_len: self.max_len,
            reactivate_chance: self.reactivate_chance,
            pause_chance: self.pause_chance,
            min_pause_chance: self.min_pause_chance,
            fade: self.fade,
            fps: self.fps,
            color_mode: self.color_mode()?,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Everything the simulation and renderer need, resolved and immutable.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub base_color: Rgb,
    pub density: f64,
    pub chars: Vec<char>,
    pub min_len: u16,
    pub max_len: u16,
    pub reactivate_chance: Option<f64>,
    pub pause_chance: Option<f64>,
    pub min_pause_chance: f64,
    pub fade: f64,
    pub fps: u32,
    pub color_mode: ColorMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_color: Rgb::new(0, 255, 0),
            density: 0.7,
            chars: vec!['0', '1'],
            min_len: 8,
            max_len: 19,
            reactivate_chance: None,
            pause_chance: None,
            min_pause_chance: 0.01,
            fade: 0.7,
            fps: 10,
            color_mode: ColorMode::TrueColor,
        }
    }
}

fn require_range(name: &'static str, v: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !v.is_finite() || v < min || v > max {
        return Err(ConfigError::OutOfRange {
            name,
            value: v,
            min,
            max,
        });
    }
    Ok(())
}

fn require_probability(name: &'static str, v: f64) -> Result<(), ConfigError> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(ConfigError::InvalidProbability { name, value: v });
    }
    Ok(())
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chars.is_empty() {
            return Err(ConfigError::EmptyCharset);
        }
        if self.min_len == 0 || self.min_len > self.max_len {
            return Err(ConfigError::InvalidLengthRange {
                min: self.min_len,
                max: self.max_len,
            });
        }
        require_range("--density", self.density, DENSITY_RANGE.0, DENSITY_RANGE.1)?;
        require_range(
            "--fps",
            f64::from(self.fps),
            f64::from(FPS_RANGE.0),
            f64::from(FPS_RANGE.1),
        )?;
        require_range("--fade", self.fade, 0.0, 1.0)?;
        if let Some(p) = self.reactivate_chance {
            require_probability("--reactivate-chance", p)?;
        }
        if let Some(p) = self.pause_chance {
            require_probability("--pause-chance", p)?;
        }
        require_probability("--min-pause-chance", self.min_pause_chance)
    }

    pub fn shape(&self) -> DropShape {
        DropShape {
            min_len: self.min_len,
            max_len: self.max_len,
            chars: self.chars.clone(),
        }
    }

    /// Chances for `density`, with any explicit override taking precedence.
    pub fn odds_for(&self, density: f64) -> Odds {
        let derived = Odds::from_density(density, self.min_pause_chance);
        Odds {
            reactivate: self.reactivate_chance.unwrap_or(derived.reactivate),
            pause: self.pause_chance.unwrap_or(derived.pause),
        }
    }
}

pub fn print_list_charsets() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE CHARSET PRESETS:\x1b[0m");
        println!("\x1b[2mNOTE: Anything else passed to --charset is used as literal glyphs.\x1b[0m");
    } else {
        println!("AVAILABLE CHARSET PRESETS:");
        println!("NOTE: Anything else passed to --charset is used as literal glyphs.");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    for (name, desc) in CHARSETS {
        println!("{:<12} {}", name, desc);
    }
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLOR THEMES:\x1b[0m");
    } else {
        println!("AVAILABLE COLOR THEMES:");
    }
    println!();
    println!("VALUE        RGB            DESCRIPTION");
    for (name, rgb, desc) in THEMES {
        let triple = format!("{},{},{}", rgb.r, rgb.g, rgb.b);
        println!("{:<12} {:<14} {}", name, triple, desc);
    }
    println!();
    println!("Density: {}-{}", DENSITY_RANGE.0, DENSITY_RANGE.1);
    println!("FPS: {}-{}", FPS_RANGE.0, FPS_RANGE.1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["glyphfall"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_produce_valid_settings() {
        let s = parse(&["--colormode", "24"]).settings().unwrap();
        assert_eq!(s.base_color, Rgb::new(0, 255, 0));
        assert_eq!(s.density, 0.7);
        assert_eq!(s.fps, 10);
        assert_eq!((s.min_len, s.max_len), (8, 19));
        assert_eq!(s.chars[0], 'λ');
        assert_eq!(s.color_mode, ColorMode::TrueColor);
    }

    #[test]
    fn rgb_overrides_theme() {
        let s = parse(&["--color", "red", "--rgb", "1,2,3", "--colormode", "0"])
            .settings()
            .unwrap();
        assert_eq!(s.base_color, Rgb::new(1, 2, 3));
        assert_eq!(s.color_mode, ColorMode::Mono);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = parse(&["--density", "4", "--colormode", "24"]).settings();
        assert!(matches!(
            err,
            Err(ConfigError::OutOfRange { name: "--density", .. })
        ));
        let err = parse(&["--fps", "0", "--colormode", "24"]).settings();
        assert!(matches!(err, Err(ConfigError::OutOfRange { name: "--fps", .. })));
        let err = parse(&["--colormode", "7"]).settings();
        assert_eq!(err, Err(ConfigError::InvalidColorMode(7)));
    }

    #[test]
    fn colormode_aliases_match_error_hint() {
        assert_eq!(parse(&["--colormode", "256"]).color_mode(), Ok(ColorMode::Color256));
        assert_eq!(parse(&["--colormode", "32"]).color_mode(), Ok(ColorMode::TrueColor));
        let msg = ConfigError::InvalidColorMode(7).to_string();
        assert!(msg.contains("8/256") && msg.contains("24/32"), "{}", msg);
    }

    #[test]
    fn bad_lengths_and_probabilities_are_rejected() {
        let s = Settings {
            min_len: 5,
            max_len: 4,
            ..Settings::default()
        };
        assert_eq!(
            s.validate(),
            Err(ConfigError::InvalidLengthRange { min: 5, max: 4 })
        );

        let s = Settings {
            min_len: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());

        let s = Settings {
            pause_chance: Some(1.5),
            ..Settings::default()
        };
        assert_eq!(
            s.validate(),
            Err(ConfigError::InvalidProbability {
                name: "--pause-chance",
                value: 1.5
            })
        );

        let s = Settings {
            reactivate_chance: Some(f64::NAN),
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn empty_charset_is_rejected() {
        let s = Settings {
            chars: Vec::new(),
            ..Settings::default()
        };
        assert_eq!(s.validate(), Err(ConfigError::EmptyCharset));
    }

    #[test]
    fn duration_limits() {
        assert_eq!(parse(&[]).run_limit(), Ok(None));
        assert_eq!(parse(&["--duration", "0"]).run_limit(), Ok(None));
        assert_eq!(
            parse(&["--duration", "2.5"]).run_limit(),
            Ok(Some(Duration::from_millis(2500)))
        );
        assert!(parse(&["--duration", "100000"]).run_limit().is_err());
    }

    #[test]
    fn explicit_odds_win_over_density() {
        let s = Settings {
            reactivate_chance: Some(0.5),
            ..Settings::default()
        };
        let odds = s.odds_for(2.0);
        assert_eq!(odds.reactivate, 0.5);
        assert_eq!(odds.pause, Odds::from_density(2.0, 0.01).pause);
    }
}
