// TOML theme record parser
//
// This is the native catalog format for attune. Each record carries every
// color in three representations (truecolor hex, 256-color index, named
// ANSI) so the fallback resolver never has to invent a downgrade, and every
// symbol with unicode/simple/ascii variants for the glyph ladder.
//
// Format version: 1

use crate::capability::{ColorDepth, GlyphTier};
use crate::theme::AnsiColor;
use serde::Deserialize;

/// Root structure for TOML theme files.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlTheme {
    pub meta: ThemeMeta,
    /// Semantic color roles in declaration order (the toml map preserves it).
    pub palette: toml::map::Map<String, toml::Value>,
    /// Semantic glyph roles in declaration order.
    #[serde(default)]
    pub symbols: toml::map::Map<String, toml::Value>,
    pub animation: RawAnimation,
    pub requires: RawRequirements,
}

/// Theme metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeMeta {
    pub id: String,
    pub name: String,
    /// For future schema evolution
    #[allow(dead_code)]
    pub version: u32,
    pub category: String,
    pub level: String,
    /// Theme id substituted when high-contrast is forced (optional)
    #[serde(default)]
    pub accessible_variant: Option<String>,
    #[serde(default)]
    #[allow(dead_code)] // Metadata for theme attribution
    pub author: Option<String>,
}

/// One color role value with all three representations.
#[derive(Debug, Clone, Deserialize)]
pub struct RawColor {
    /// Truecolor hex: #RRGGBB
    pub rgb: String,
    /// xterm 256-color index
    pub indexed: u8,
    /// Named 16-color ANSI: "red", "bright-cyan", ...
    pub ansi: String,
}

/// One symbol role value with its fallback chain.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSymbol {
    /// Full unicode glyph
    pub glyph: String,
    /// Optional basic-unicode stand-in; defaults to the ascii fallback
    #[serde(default)]
    pub simple: Option<String>,
    /// 7-bit ascii fallback
    pub ascii: String,
}

/// Animation profile section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnimation {
    pub fps: u8,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Timing curve: "linear", "smoothstep", "golden-ratio" (default)
    #[serde(default)]
    pub curve: Option<String>,
    #[serde(default)]
    pub effects: Vec<RawEffect>,
}

/// A named effect bound to the palette or symbol role it animates.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEffect {
    pub name: String,
    /// Palette role this effect modulates
    #[serde(default)]
    pub color: Option<String>,
    /// Symbol role this effect cycles
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Minimum capability requirements section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequirements {
    pub color: ColorDepth,
    pub glyphs: GlyphTier,
}

fn default_true() -> bool {
    true
}

impl TomlTheme {
    /// Parse a TOML theme record from a string.
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Parse a #RRGGBB hex string.
pub fn parse_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Parse a named ANSI color.
pub fn parse_ansi(value: &str) -> Option<AnsiColor> {
    let name = value.trim().to_ascii_lowercase().replace('_', "-");
    let color = match name.as_str() {
        "black" => AnsiColor::Black,
        "red" => AnsiColor::Red,
        "green" => AnsiColor::Green,
        "yellow" => AnsiColor::Yellow,
        "blue" => AnsiColor::Blue,
        "magenta" => AnsiColor::Magenta,
        "cyan" => AnsiColor::Cyan,
        "white" => AnsiColor::White,
        "bright-black" | "gray" | "grey" => AnsiColor::BrightBlack,
        "bright-red" => AnsiColor::BrightRed,
        "bright-green" => AnsiColor::BrightGreen,
        "bright-yellow" => AnsiColor::BrightYellow,
        "bright-blue" => AnsiColor::BrightBlue,
        "bright-magenta" => AnsiColor::BrightMagenta,
        "bright-cyan" => AnsiColor::BrightCyan,
        "bright-white" => AnsiColor::BrightWhite,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("#ff0000"), Some((255, 0, 0)));
        assert_eq!(parse_rgb("00afff"), Some((0, 175, 255)));
        assert_eq!(parse_rgb("#fff"), None);
        assert_eq!(parse_rgb("#gggggg"), None);
    }

    #[test]
    fn test_parse_ansi() {
        assert_eq!(parse_ansi("cyan"), Some(AnsiColor::Cyan));
        assert_eq!(parse_ansi("bright-magenta"), Some(AnsiColor::BrightMagenta));
        assert_eq!(parse_ansi("bright_yellow"), Some(AnsiColor::BrightYellow));
        assert_eq!(parse_ansi("mauve"), None);
    }

    #[test]
    fn test_parse_theme() {
        let toml = r##"
[meta]
id = "test-theme"
name = "Test Theme"
version = 1
category = "consciousness"
level = "beginner"

[palette]
background = { rgb = "#0b0e14", indexed = 233, ansi = "black" }
foreground = { rgb = "#d9e2ec", indexed = 253, ansi = "white" }
accent = { rgb = "#ff00ff", indexed = 201, ansi = "bright-magenta" }

[symbols]
focus = { glyph = "◉", simple = "●", ascii = "o" }

[animation]
fps = 6
curve = "golden-ratio"

[[animation.effects]]
name = "breath"
color = "accent"

[requires]
color = "truecolor"
glyphs = "unicode-full"
"##;

        let theme = TomlTheme::from_str(toml).unwrap();
        assert_eq!(theme.meta.id, "test-theme");
        assert_eq!(theme.meta.category, "consciousness");
        assert!(theme.meta.accessible_variant.is_none());
        assert_eq!(theme.palette.len(), 3);
        assert_eq!(theme.animation.effects.len(), 1);
        assert!(theme.animation.enabled);
        assert_eq!(theme.requires.color, ColorDepth::TrueColor);

        // Declaration order survives parsing - the resolver depends on it.
        let roles: Vec<&str> = theme.palette.keys().map(|k| k.as_str()).collect();
        assert_eq!(roles, vec!["background", "foreground", "accent"]);
    }
}
