//! Theme cycling and terminal palettes

use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Themes cycled by default.
pub const DEFAULT_THEMES: [&str; 3] = ["light", "dark", "blue"];

/// Alternate cycle selected with `--solarized`.
pub const SOLARIZED_THEMES: [&str; 3] = ["light", "dark", "solarized"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("theme list is empty")]
    Empty,
}

/// Ordered theme names plus the index of the active one.
///
/// The index is always inside `[0, names.len())` and the list is never
/// empty when built through [`ThemeState::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThemeState {
    names: Vec<String>,
    index: usize,
}

impl ThemeState {
    /// Start at the first theme of `names`.
    pub fn new<I, S>(names: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(ThemeError::Empty);
        }
        Ok(Self { names, index: 0 })
    }

    /// Identifier of the active theme (the page's `data-theme` value).
    pub fn current(&self) -> &str {
        self.names
            .get(self.index)
            .or_else(|| self.names.first())
            .map(String::as_str)
            .unwrap_or(DEFAULT_THEMES[0])
    }

    /// Step to the next theme, wrapping at the end of the list.
    pub fn advance(&mut self) {
        if self.names.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.names.len();
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Text shown on the theme button.
    pub fn label(&self) -> String {
        capitalize(self.current())
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.current())
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            names: DEFAULT_THEMES.iter().map(|name| name.to_string()).collect(),
            index: 0,
        }
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Terminal colors for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    /// Banner gradient endpoints as RGB triples.
    pub banner: [(u8, u8, u8); 2],
}

const LIGHT: Palette = Palette {
    bg: Color::Rgb(245, 245, 240),
    panel: Color::Rgb(230, 230, 222),
    fg: Color::Rgb(30, 30, 30),
    muted: Color::Rgb(110, 110, 110),
    accent: Color::Rgb(200, 110, 20),
    error: Color::Rgb(180, 30, 30),
    banner: [(230, 140, 40), (200, 70, 90)],
};

const DARK: Palette = Palette {
    bg: Color::Rgb(24, 24, 30),
    panel: Color::Rgb(38, 38, 48),
    fg: Color::Rgb(225, 225, 230),
    muted: Color::Rgb(130, 130, 145),
    accent: Color::Rgb(120, 200, 160),
    error: Color::Rgb(240, 100, 90),
    banner: [(100, 200, 150), (255, 220, 100)],
};

const BLUE: Palette = Palette {
    bg: Color::Rgb(12, 30, 60),
    panel: Color::Rgb(22, 48, 90),
    fg: Color::Rgb(220, 235, 255),
    muted: Color::Rgb(130, 160, 200),
    accent: Color::Rgb(110, 190, 255),
    error: Color::Rgb(255, 120, 120),
    banner: [(100, 180, 255), (150, 220, 200)],
};

const SOLARIZED: Palette = Palette {
    bg: Color::Rgb(0, 43, 54),
    panel: Color::Rgb(7, 54, 66),
    fg: Color::Rgb(147, 161, 161),
    muted: Color::Rgb(88, 110, 117),
    accent: Color::Rgb(181, 137, 0),
    error: Color::Rgb(220, 50, 47),
    banner: [(181, 137, 0), (203, 75, 22)],
};

impl Palette {
    /// Unknown theme names fall back to the dark palette.
    pub fn for_theme(name: &str) -> Self {
        match name {
            "light" => LIGHT,
            "dark" => DARK,
            "blue" => BLUE,
            "solarized" => SOLARIZED,
            _ => DARK,
        }
    }
}
