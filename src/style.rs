//! Color and markup.
//!
//! A [`Styler`] is the explicit style context threaded through the formatters.
//! It carries the resolved color capability plus a suppression depth used by
//! [`Styler::no_color`], so a disabled region is always scoped and restored.

use crate::error::{GhiError, Result};
use clap::ValueEnum;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::str::FromStr;

const RESET_FG: &str = "\x1b[39m";
const RESET_BG: &str = "\x1b[39;49m";
const BOLD: &str = "\x1b[1m";
const RESET_BOLD: &str = "\x1b[22m";

/// A terminal color: one of the eight named ANSI colors, bright black, or an
/// RGB value rendered through the xterm-256 palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a hex color such as `"fc2929"` or `"#aaa"`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(GhiError::InvalidColor(hex.to_string())),
        };
        let channel = |i: usize| {
            expanded
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| GhiError::InvalidColor(hex.to_string()))
        };
        Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    fn ansi_index(self) -> Option<u8> {
        match self {
            Color::Black => Some(0),
            Color::Red => Some(1),
            Color::Green => Some(2),
            Color::Yellow => Some(3),
            Color::Blue => Some(4),
            Color::Magenta => Some(5),
            Color::Cyan => Some(6),
            Color::White => Some(7),
            Color::Gray | Color::Rgb(..) => None,
        }
    }

    fn code(self, layer: Layer) -> String {
        let base = match layer {
            Layer::Fg => 30,
            Layer::Bg => 40,
        };
        match (self, self.ansi_index()) {
            (_, Some(n)) => (base + n as u16).to_string(),
            (Color::Rgb(r, g, b), None) => format!("{};5;{}", base + 8, xterm256(r, g, b)),
            _ => (base + 60).to_string(),
        }
    }

    /// Whether dark text reads better than light text on this color.
    fn is_light(self) -> bool {
        match self {
            Color::Rgb(r, g, b) => {
                let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
                luma > 128_000
            }
            Color::Green | Color::Yellow | Color::Cyan | Color::White => true,
            _ => false,
        }
    }
}

impl FromStr for Color {
    type Err = GhiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            "gray" | "grey" => Ok(Color::Gray),
            _ => Color::from_hex(s),
        }
    }
}

/// Nearest xterm-256 palette entry for an RGB value.
fn xterm256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            v => 232 + ((v as u16 - 8) * 24 / 247) as u8,
        };
    }
    let level = |v: u8| match v {
        0..=47 => 0,
        48..=114 => 1,
        v => (v - 35) / 40,
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Which layer a color is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Fg,
    Bg,
}

/// Color capability as configured by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        }
    }

    /// Resolve to a yes/no answer given whether output is interactive.
    pub fn resolve(self, interactive: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => interactive && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

/// Current styling state of a [`Styler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleScope {
    Enabled,
    Disabled,
    /// Enabled, but inside a [`Styler::no_color`] region.
    Suppressed,
}

/// Style context: applies escapes when enabled and not suppressed.
///
/// The suppression depth lives in a `Cell`, so a `Styler` is `Send` but not
/// `Sync`: each thread renders with its own instance, and a [`no_color`]
/// region only affects the instance it was entered on.
///
/// [`no_color`]: Styler::no_color
#[derive(Debug, Default)]
pub struct Styler {
    enabled: bool,
    suppressed: Cell<usize>,
}

/// Keeps styling disabled on its [`Styler`] until dropped.
#[must_use = "styling is restored as soon as the scope is dropped"]
pub struct NoColorScope<'a> {
    styler: &'a Styler,
}

impl Drop for NoColorScope<'_> {
    fn drop(&mut self) {
        let depth = self.styler.suppressed.get();
        self.styler.suppressed.set(depth.saturating_sub(1));
    }
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            suppressed: Cell::new(0),
        }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn from_choice(choice: ColorChoice, interactive: bool) -> Self {
        Self::new(choice.resolve(interactive))
    }

    /// Whether escapes are currently emitted.
    pub fn is_enabled(&self) -> bool {
        self.scope() == StyleScope::Enabled
    }

    pub fn scope(&self) -> StyleScope {
        match (self.enabled, self.suppressed.get()) {
            (false, _) => StyleScope::Disabled,
            (true, 0) => StyleScope::Enabled,
            (true, _) => StyleScope::Suppressed,
        }
    }

    /// `body` in foreground `color`; unchanged when `color` is `None` or
    /// styling is off.
    pub fn fg(&self, color: impl Into<Option<Color>>, body: impl AsRef<str>) -> String {
        self.paint(Layer::Fg, color, body)
    }

    /// `body` on background `color`, with a contrasting foreground.
    pub fn bg(&self, color: impl Into<Option<Color>>, body: impl AsRef<str>) -> String {
        self.paint(Layer::Bg, color, body)
    }

    pub fn paint(
        &self,
        layer: Layer,
        color: impl Into<Option<Color>>,
        body: impl AsRef<str>,
    ) -> String {
        let body = body.as_ref();
        let color = match color.into() {
            Some(color) if self.is_enabled() => color,
            _ => return body.to_string(),
        };
        match layer {
            Layer::Fg => format!("\x1b[{}m{body}{RESET_FG}", color.code(Layer::Fg)),
            Layer::Bg => {
                let text = if color.is_light() { Color::Black } else { Color::White };
                format!(
                    "\x1b[{};{}m{body}{RESET_BG}",
                    text.code(Layer::Fg),
                    color.code(Layer::Bg)
                )
            }
        }
    }

    /// `body` in bold.
    pub fn bright(&self, body: impl AsRef<str>) -> String {
        let body = body.as_ref();
        if self.is_enabled() {
            format!("{BOLD}{body}{RESET_BOLD}")
        } else {
            body.to_string()
        }
    }

    /// Disable styling until the returned scope is dropped.
    pub fn suppress(&self) -> NoColorScope<'_> {
        self.suppressed.set(self.suppressed.get() + 1);
        NoColorScope { styler: self }
    }

    /// Run `body` with styling disabled, restoring the previous state on exit
    /// (including unwinding).
    pub fn no_color<T>(&self, body: impl FnOnce() -> T) -> T {
        let _scope = self.suppress();
        body()
    }

    /// `" tag "` when styling is active, `"[tag]"` otherwise.
    pub fn format_tag(&self, tag: &str) -> String {
        if self.is_enabled() {
            format!(" {tag} ")
        } else {
            format!("[{tag}]")
        }
    }

    /// Emphasize every match of `pattern` in `text`.
    pub fn highlight(&self, text: &str, pattern: &Regex) -> String {
        if !self.is_enabled() {
            return text.to_string();
        }
        pattern
            .replace_all(text, |caps: &Captures| {
                self.bright(self.fg(Color::Yellow, &caps[0]))
            })
            .into_owned()
    }
}
