// Copyright (c) 2026 rezky_nightky

use std::char;

use crate::error::ConfigError;

pub const CHARSETS: &[(&str, &str)] = &[
    ("matrix", "Half-width katakana with a lambda"),
    ("katakana", "Half-width katakana"),
    ("binary", "0 and 1 (aliases: bin, 01)"),
    ("digits", "Digits only (aliases: dec, decimal)"),
    ("hex", "0-9 and A-F"),
    ("ascii", "Letters and digits"),
    ("symbols", "ASCII punctuation"),
    ("greek", "Greek lowercase"),
    ("cyrillic", "Cyrillic lowercase"),
    ("kanji", "A handful of kanji (double width)"),
    ("emojis", "Emoji (double width)"),
];

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    out.extend((start..=end).filter_map(char::from_u32));
}

fn named(name: &str) -> Option<Vec<char>> {
    let mut out = Vec::new();
    match name {
        "matrix" => {
            out.push('λ');
            push_range(&mut out, 0xFF71, 0xFF9D);
        }
        "katakana" => push_range(&mut out, 0xFF66, 0xFF9D),
        "bin" | "binary" | "01" => push_range(&mut out, 0x30, 0x31),
        "digits" | "dec" | "decimal" => push_range(&mut out, 0x30, 0x39),
        "hex" | "hexadecimal" => {
            push_range(&mut out, 0x30, 0x39);
            push_range(&mut out, 0x41, 0x46);
        }
        "ascii" => {
            push_range(&mut out, 0x41, 0x5A);
            push_range(&mut out, 0x61, 0x7A);
            push_range(&mut out, 0x30, 0x39);
        }
        "symbols" => out.extend("!@#$%^&*()_+-=[]{}|;':\",./<>?".chars()),
        "greek" => out.extend("αβγδεζηθικλμνξοπρστυφχψω".chars()),
        "cyrillic" => out.extend("абвгдежзийклмнопрстуфхцчшщъыьэюя".chars()),
        "kanji" => out.extend("書道日本漢字文化侍".chars()),
        "emojis" => out.extend("😂😅😊🔥💯✨🚀🎉🌟🌈".chars()),
        _ => return None,
    }
    Some(out)
}

/// Resolves a preset name, or treats `input` as a literal list of glyphs.
pub fn charset_from_str(input: &str) -> Result<Vec<char>, ConfigError> {
    if input.is_empty() {
        return Err(ConfigError::EmptyCharset);
    }
    if let Some(set) = named(&input.trim().to_ascii_lowercase()) {
        return Ok(set);
    }
    let custom: Vec<char> = input.chars().filter(|c| !c.is_control()).collect();
    if custom.is_empty() {
        return Err(ConfigError::EmptyCharset);
    }
    Ok(custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_has_only_0_and_1() {
        assert_eq!(charset_from_str("binary").unwrap(), vec!['0', '1']);
        assert_eq!(charset_from_str("01").unwrap(), vec!['0', '1']);
    }

    #[test]
    fn matrix_starts_with_lambda_then_katakana() {
        let set = charset_from_str("MATRIX").unwrap();
        assert_eq!(set[0], 'λ');
        assert_eq!(set[1], 'ｱ');
        assert_eq!(*set.last().unwrap(), 'ﾝ');
    }

    #[test]
    fn every_listed_preset_resolves() {
        for (name, _) in CHARSETS {
            assert!(!named(name).unwrap().is_empty(), "{}", name);
        }
    }

    #[test]
    fn unknown_names_are_custom_glyphs() {
        assert_eq!(charset_from_str("xyz").unwrap(), vec!['x', 'y', 'z']);
    }

    #[test]
    fn empty_charset_is_rejected() {
        assert_eq!(charset_from_str(""), Err(ConfigError::EmptyCharset));
        assert_eq!(charset_from_str("\n\t"), Err(ConfigError::EmptyCharset));
    }
}
