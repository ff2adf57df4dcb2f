//! Flip: turns text upside down.

use hermes_core::Result;
use hermes_robot::{Plugin, Response, Robot};

/// Upside-down counterpart of `c` (lowercase input); unknown characters map to themselves.
fn flip_char(c: char) -> char {
    match c {
        'a' => 'ɐ',
        'b' => 'q',
        'c' => 'ɔ',
        'd' => 'p',
        'e' => 'ǝ',
        'f' => 'ɟ',
        'g' => 'ƃ',
        'h' => 'ɥ',
        'i' => 'ᴉ',
        'j' => 'ɾ',
        'k' => 'ʞ',
        'm' => 'ɯ',
        'n' => 'u',
        'p' => 'd',
        'q' => 'b',
        'r' => 'ɹ',
        't' => 'ʇ',
        'u' => 'n',
        'v' => 'ʌ',
        'w' => 'ʍ',
        'y' => 'ʎ',
        '1' => 'Ɩ',
        '2' => 'ᄅ',
        '3' => 'Ɛ',
        '4' => 'ㄣ',
        '5' => 'ϛ',
        '6' => '9',
        '7' => 'ㄥ',
        '9' => '6',
        '.' => '˙',
        ',' => '\'',
        '\'' => ',',
        '"' => '„',
        '?' => '¿',
        '!' => '¡',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '_' => '‾',
        '&' => '⅋',
        ';' => '؛',
        other => other,
    }
}

/// Reverses `text` and substitutes every character with its upside-down form.
pub fn flip(text: &str) -> String {
    text.to_lowercase().chars().rev().map(flip_char).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlipPlugin;

impl Plugin for FlipPlugin {
    fn name(&self) -> &str {
        "flip"
    }

    fn register(&self, robot: &Robot) -> Result<()> {
        robot.respond(r"(?is)^flip\s+(.+)$", |res: &Response, _robot: &Robot| {
            res.say(flip(res.group(1).unwrap_or_default()));
            Ok(())
        })?;
        robot.help(&["flip <text>"], "Flip <text> upside down.");
        Ok(())
    }
}
