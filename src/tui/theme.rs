use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0E, 0x14, 0x1B),
            text: Color::Rgb(0xC6, 0xCF, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFF, 0xB3, 0x1A),
            dim: Color::Rgb(0x6B, 0x78, 0x86),
            red: Color::Rgb(0xFF, 0x55, 0x55),
            yellow: Color::Rgb(0xF2, 0xD0, 0x3B),
            green: Color::Rgb(0x4C, 0xD9, 0x7B),
            cyan: Color::Rgb(0x4F, 0xC3, 0xF7),
            purple: Color::Rgb(0xB3, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x1F, 0x2D, 0x3A),
        }
    }
}

/// Parse "#RRGGBB" into an RGB color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

impl Theme {
    /// Start from the default palette and apply every valid `[ui.colors]` entry.
    /// Unknown names and malformed values are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (name, value) in &ui.colors {
            if let (Some(slot), Some(color)) = (theme.slot_mut(name), parse_hex_color(value)) {
                *slot = color;
            }
        }
        theme
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Color> {
        let slot = match name {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "highlight" => &mut self.highlight,
            "dim" => &mut self.dim,
            "red" => &mut self.red,
            "yellow" => &mut self.yellow,
            "green" => &mut self.green,
            "cyan" => &mut self.cyan,
            "purple" => &mut self.purple,
            "selection_bg" => &mut self.selection_bg,
            _ => return None,
        };
        Some(slot)
    }

    /// Unfilled slots are red, exactly full is green, over-committed is yellow
    pub fn need_color(&self, need: i64) -> Color {
        match need {
            n if n > 0 => self.red,
            0 => self.green,
            _ => self.yellow,
        }
    }

    /// Pill color by star rating
    pub fn star_color(&self, stars: u8) -> Color {
        match stars {
            5 => self.highlight,
            4 => self.purple,
            3 => self.cyan,
            _ => self.dim,
        }
    }
}
