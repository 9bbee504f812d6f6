// Theme catalog - immutable, validated collection of theme descriptors
//
// Architecture:
// - TomlTheme: raw catalog record as authored (toml_format.rs)
// - ThemeDescriptor: strongly-typed, validated descriptor built at load
// - ThemeCatalog: loaded once at startup, read-only afterward (concurrent
//   readers need no locking)
//
// Theme loading priority:
// 1. External TOML themes from ~/.config/attune/themes/*.toml
// 2. Bundled themes (extracted on first run)
//
// Validation is fatal at load time: duplicate ids, unparseable colors, or an
// animation effect referencing a role the theme doesn't define all reject the
// whole catalog. The engine must not start on a corrupt catalog.

mod bundled;
mod toml_format;

pub use toml_format::TomlTheme;

use crate::capability::{ColorDepth, GlyphTier};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use toml_format::{RawColor, RawSymbol};

/// Golden ratio, the timing constant the animation curves are built around.
pub const PHI: f64 = 1.618033988749894;

/// Theme id the controller switches to on an emergency signal. Must exist in
/// every catalog; controller construction fails otherwise.
pub const SAFETY_THEME_ID: &str = "high-contrast";

/// Theme id used when every selection tier falls through.
pub const DEFAULT_THEME_ID: &str = "consciousness-default";

// ─────────────────────────────────────────────────────────────────────────────
// Descriptor building blocks
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog category tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Consciousness,
    Transcendence,
    Healing,
    Grounding,
    Meditation,
    Accessibility,
}

impl ThemeCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "consciousness" => Some(ThemeCategory::Consciousness),
            "transcendence" => Some(ThemeCategory::Transcendence),
            "healing" => Some(ThemeCategory::Healing),
            "grounding" => Some(ThemeCategory::Grounding),
            "meditation" => Some(ThemeCategory::Meditation),
            "accessibility" => Some(ThemeCategory::Accessibility),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeCategory::Consciousness => "consciousness",
            ThemeCategory::Transcendence => "transcendence",
            ThemeCategory::Healing => "healing",
            ThemeCategory::Grounding => "grounding",
            ThemeCategory::Meditation => "meditation",
            ThemeCategory::Accessibility => "accessibility",
        }
    }
}

/// User experience levels, ordered Beginner < Expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(ExperienceLevel::Beginner),
            "intermediate" => Some(ExperienceLevel::Intermediate),
            "advanced" => Some(ExperienceLevel::Advanced),
            "expert" => Some(ExperienceLevel::Expert),
            _ => None,
        }
    }
}

/// The 16 named ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// SGR foreground code (30-37, 90-97).
    pub fn sgr_fg(&self) -> u8 {
        match self {
            AnsiColor::Black => 30,
            AnsiColor::Red => 31,
            AnsiColor::Green => 32,
            AnsiColor::Yellow => 33,
            AnsiColor::Blue => 34,
            AnsiColor::Magenta => 35,
            AnsiColor::Cyan => 36,
            AnsiColor::White => 37,
            AnsiColor::BrightBlack => 90,
            AnsiColor::BrightRed => 91,
            AnsiColor::BrightGreen => 92,
            AnsiColor::BrightYellow => 93,
            AnsiColor::BrightBlue => 94,
            AnsiColor::BrightMagenta => 95,
            AnsiColor::BrightCyan => 96,
            AnsiColor::BrightWhite => 97,
        }
    }
}

/// A palette value with all three renderable representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColor {
    pub rgb: (u8, u8, u8),
    pub indexed: u8,
    pub ansi: AnsiColor,
}

/// A symbol value with its fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolSpec {
    pub glyph: String,
    /// Basic-unicode stand-in; empty means "use ascii"
    pub simple: Option<String>,
    pub ascii: String,
}

/// Easing curves for transitions. All are monotonic [0,1] -> [0,1] with
/// f(0)=0 and f(1)=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingCurve {
    Linear,
    SmoothStep,
    #[default]
    GoldenRatio,
}

impl TimingCurve {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(TimingCurve::Linear),
            "smoothstep" | "smooth-step" => Some(TimingCurve::SmoothStep),
            "golden-ratio" | "golden_ratio" | "phi" => Some(TimingCurve::GoldenRatio),
            _ => None,
        }
    }

    /// Map raw progress to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingCurve::Linear => t,
            TimingCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
            // Quadratic ease weighted by PHI; monotone on [0,1] and lands
            // exactly on 1.0 at t=1.
            TimingCurve::GoldenRatio => t * t * (PHI - (PHI - 1.0) * t),
        }
    }
}

/// An effect bound to the role it animates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectSpec {
    pub name: String,
    pub color_role: Option<String>,
    pub symbol_role: Option<String>,
}

/// Per-theme animation profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationProfile {
    pub fps: u8,
    pub enabled: bool,
    pub curve: TimingCurve,
    pub effects: Vec<EffectSpec>,
}

/// Minimum capability this theme is authored for. Resolution never renders a
/// theme richer than its own requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityRequirements {
    pub color: ColorDepth,
    pub glyphs: GlyphTier,
}

/// Immutable record defining a complete visual style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeDescriptor {
    pub id: String,
    pub name: String,
    pub category: ThemeCategory,
    pub level: ExperienceLevel,
    /// Semantic color roles in declaration order
    pub palette: Vec<(String, ThemeColor)>,
    /// Semantic glyph roles in declaration order
    pub symbols: Vec<(String, SymbolSpec)>,
    pub animation: AnimationProfile,
    pub requires: CapabilityRequirements,
    /// Theme substituted when high-contrast is forced
    pub accessible_variant: Option<String>,
}

impl ThemeDescriptor {
    pub fn color(&self, role: &str) -> Option<&ThemeColor> {
        self.palette.iter().find(|(r, _)| r == role).map(|(_, c)| c)
    }

    pub fn symbol(&self, role: &str) -> Option<&SymbolSpec> {
        self.symbols.iter().find(|(r, _)| r == role).map(|(_, s)| s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that reject a catalog at load time.
#[derive(Debug)]
pub enum CatalogError {
    Parse {
        source_name: String,
        message: String,
    },
    DuplicateId(String),
    InvalidField {
        theme: String,
        field: &'static str,
        value: String,
    },
    InvalidColor {
        theme: String,
        role: String,
        reason: String,
    },
    InvalidSymbol {
        theme: String,
        role: String,
        reason: String,
    },
    DanglingEffectRole {
        theme: String,
        effect: String,
        role: String,
    },
    UnboundEffect {
        theme: String,
        effect: String,
    },
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse { source_name, message } => {
                write!(f, "failed to parse theme record {source_name}: {message}")
            }
            CatalogError::DuplicateId(id) => write!(f, "duplicate theme id {id:?}"),
            CatalogError::InvalidField { theme, field, value } => {
                write!(f, "theme {theme:?}: invalid {field} {value:?}")
            }
            CatalogError::InvalidColor { theme, role, reason } => {
                write!(f, "theme {theme:?}: palette role {role:?}: {reason}")
            }
            CatalogError::InvalidSymbol { theme, role, reason } => {
                write!(f, "theme {theme:?}: symbol role {role:?}: {reason}")
            }
            CatalogError::DanglingEffectRole { theme, effect, role } => {
                write!(
                    f,
                    "theme {theme:?}: effect {effect:?} references undefined role {role:?}"
                )
            }
            CatalogError::UnboundEffect { theme, effect } => {
                write!(f, "theme {theme:?}: effect {effect:?} names no color or symbol role")
            }
            CatalogError::Empty => write!(f, "catalog has no themes"),
        }
    }
}

impl std::error::Error for CatalogError {}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptor construction
// ─────────────────────────────────────────────────────────────────────────────

impl ThemeDescriptor {
    /// Build a validated descriptor from a raw record.
    pub fn from_toml(raw: TomlTheme) -> Result<Self, CatalogError> {
        let theme_id = raw.meta.id.clone();

        let category = ThemeCategory::parse(&raw.meta.category).ok_or_else(|| {
            CatalogError::InvalidField {
                theme: theme_id.clone(),
                field: "category",
                value: raw.meta.category.clone(),
            }
        })?;

        let level = ExperienceLevel::parse(&raw.meta.level).ok_or_else(|| {
            CatalogError::InvalidField {
                theme: theme_id.clone(),
                field: "level",
                value: raw.meta.level.clone(),
            }
        })?;

        let mut palette = Vec::with_capacity(raw.palette.len());
        for (role, value) in &raw.palette {
            let raw_color: RawColor =
                value.clone().try_into().map_err(|e| CatalogError::InvalidColor {
                    theme: theme_id.clone(),
                    role: role.clone(),
                    reason: e.to_string(),
                })?;
            let rgb = toml_format::parse_rgb(&raw_color.rgb).ok_or_else(|| {
                CatalogError::InvalidColor {
                    theme: theme_id.clone(),
                    role: role.clone(),
                    reason: format!("bad hex color {:?}", raw_color.rgb),
                }
            })?;
            let ansi = toml_format::parse_ansi(&raw_color.ansi).ok_or_else(|| {
                CatalogError::InvalidColor {
                    theme: theme_id.clone(),
                    role: role.clone(),
                    reason: format!("unknown ansi color {:?}", raw_color.ansi),
                }
            })?;
            palette.push((
                role.clone(),
                ThemeColor {
                    rgb,
                    indexed: raw_color.indexed,
                    ansi,
                },
            ));
        }

        let mut symbols = Vec::with_capacity(raw.symbols.len());
        for (role, value) in &raw.symbols {
            let raw_symbol: RawSymbol =
                value.clone().try_into().map_err(|e| CatalogError::InvalidSymbol {
                    theme: theme_id.clone(),
                    role: role.clone(),
                    reason: e.to_string(),
                })?;
            symbols.push((
                role.clone(),
                SymbolSpec {
                    glyph: raw_symbol.glyph,
                    simple: raw_symbol.simple,
                    ascii: raw_symbol.ascii,
                },
            ));
        }

        let curve = match &raw.animation.curve {
            Some(name) => TimingCurve::parse(name).ok_or_else(|| CatalogError::InvalidField {
                theme: theme_id.clone(),
                field: "animation.curve",
                value: name.clone(),
            })?,
            None => TimingCurve::default(),
        };

        let mut effects = Vec::with_capacity(raw.animation.effects.len());
        for effect in &raw.animation.effects {
            if effect.color.is_none() && effect.symbol.is_none() {
                return Err(CatalogError::UnboundEffect {
                    theme: theme_id.clone(),
                    effect: effect.name.clone(),
                });
            }
            // Invariant: every role an effect references must exist.
            if let Some(role) = &effect.color {
                if !palette.iter().any(|(r, _)| r == role) {
                    return Err(CatalogError::DanglingEffectRole {
                        theme: theme_id.clone(),
                        effect: effect.name.clone(),
                        role: role.clone(),
                    });
                }
            }
            if let Some(role) = &effect.symbol {
                if !symbols.iter().any(|(r, _)| r == role) {
                    return Err(CatalogError::DanglingEffectRole {
                        theme: theme_id.clone(),
                        effect: effect.name.clone(),
                        role: role.clone(),
                    });
                }
            }
            effects.push(EffectSpec {
                name: effect.name.clone(),
                color_role: effect.color.clone(),
                symbol_role: effect.symbol.clone(),
            });
        }

        Ok(ThemeDescriptor {
            id: raw.meta.id,
            name: raw.meta.name,
            category,
            level,
            palette,
            symbols,
            animation: AnimationProfile {
                fps: raw.animation.fps,
                enabled: raw.animation.enabled,
                curve,
                effects,
            },
            requires: CapabilityRequirements {
                color: raw.requires.color,
                glyphs: raw.requires.glyphs,
            },
            accessible_variant: raw.meta.accessible_variant,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable theme catalog. Loaded once, shared read-only.
#[derive(Debug)]
pub struct ThemeCatalog {
    themes: Vec<ThemeDescriptor>,
    index: HashMap<String, usize>,
}

impl ThemeCatalog {
    /// Validate raw records and build the catalog. Insertion order is
    /// preserved; it is the tie-break order everywhere downstream.
    pub fn load(records: Vec<TomlTheme>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut themes = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            let descriptor = ThemeDescriptor::from_toml(record)?;
            if index.contains_key(&descriptor.id) {
                return Err(CatalogError::DuplicateId(descriptor.id));
            }
            index.insert(descriptor.id.clone(), themes.len());
            themes.push(descriptor);
        }

        Ok(Self { themes, index })
    }

    /// Load user themes (~/.config/attune/themes/*.toml) plus bundled themes.
    /// A user file sharing an id with a bundled theme replaces it.
    pub fn load_default() -> Result<Self, CatalogError> {
        let mut records: Vec<TomlTheme> = Vec::new();

        if let Some(dir) = Self::themes_dir() {
            if let Ok(entries) = std::fs::read_dir(&dir) {
                let mut paths: Vec<PathBuf> = entries
                    .flatten()
                    .map(|e| e.path())
                    .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
                    .collect();
                paths.sort(); // stable catalog order across runs

                for path in paths {
                    let name = path.display().to_string();
                    let contents =
                        std::fs::read_to_string(&path).map_err(|e| CatalogError::Parse {
                            source_name: name.clone(),
                            message: e.to_string(),
                        })?;
                    let record =
                        TomlTheme::from_str(&contents).map_err(|e| CatalogError::Parse {
                            source_name: name,
                            message: e.to_string(),
                        })?;
                    records.push(record);
                }
            }
        }

        for theme in bundled::BUNDLED_THEMES {
            let record =
                TomlTheme::from_str(theme.content).map_err(|e| CatalogError::Parse {
                    source_name: format!("bundled:{}", theme.filename),
                    message: e.to_string(),
                })?;
            if !records.iter().any(|r| r.meta.id == record.meta.id) {
                records.push(record);
            }
        }

        Self::load(records)
    }

    pub fn lookup(&self, id: &str) -> Option<&ThemeDescriptor> {
        self.index.get(id).map(|&i| &self.themes[i])
    }

    /// Themes of one category, in catalog insertion order.
    pub fn list_by_category(&self, category: ThemeCategory) -> Vec<&ThemeDescriptor> {
        self.themes.iter().filter(|t| t.category == category).collect()
    }

    /// All themes, in catalog insertion order.
    pub fn themes(&self) -> &[ThemeDescriptor] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Get themes directory path.
    pub fn themes_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("attune").join("themes"))
    }
}

/// Ensure themes directory exists and extract bundled themes on first run.
pub fn ensure_themes_extracted() {
    let Some(themes_dir) = ThemeCatalog::themes_dir() else {
        return;
    };

    if std::fs::create_dir_all(&themes_dir).is_err() {
        return;
    }

    // Marker file so user deletions stick
    let marker = themes_dir.join(".extracted_v1");
    if marker.exists() {
        return;
    }

    for theme in bundled::BUNDLED_THEMES {
        let path = themes_dir.join(theme.filename);
        // Only write if file doesn't exist (don't overwrite user modifications)
        if !path.exists() {
            let _ = std::fs::write(&path, theme.content);
        }
    }

    let _ = std::fs::write(&marker, "1");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, category: &str) -> TomlTheme {
        let toml = format!(
            r##"
[meta]
id = "{id}"
name = "{id}"
version = 1
category = "{category}"
level = "beginner"

[palette]
background = {{ rgb = "#101418", indexed = 233, ansi = "black" }}
accent = {{ rgb = "#00afff", indexed = 39, ansi = "bright-cyan" }}

[symbols]
focus = {{ glyph = "◉", ascii = "o" }}

[animation]
fps = 4

[[animation.effects]]
name = "pulse"
color = "accent"

[requires]
color = "ansi256"
glyphs = "unicode-basic"
"##
        );
        TomlTheme::from_str(&toml).unwrap()
    }

    #[test]
    fn load_then_lookup_round_trips() {
        let catalog =
            ThemeCatalog::load(vec![record("alpha-calm", "meditation"), record("beta-bright", "grounding")])
                .unwrap();

        assert_eq!(catalog.len(), 2);
        let theme = catalog.lookup("alpha-calm").unwrap();
        assert_eq!(theme.name, "alpha-calm");
        assert_eq!(theme.category, ThemeCategory::Meditation);
        assert_eq!(theme.color("accent").unwrap().indexed, 39);
        assert_eq!(theme.symbol("focus").unwrap().ascii, "o");
        assert!(catalog.lookup("missing").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ThemeCatalog::load(vec![record("dup", "healing"), record("dup", "healing")])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "dup"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(ThemeCatalog::load(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn dangling_effect_role_is_rejected() {
        let mut raw = record("broken", "healing");
        raw.animation.effects[0].color = Some("missing-role".into());
        let err = ThemeCatalog::load(vec![raw]).unwrap_err();
        assert!(matches!(err, CatalogError::DanglingEffectRole { role, .. } if role == "missing-role"));
    }

    #[test]
    fn effect_without_binding_is_rejected() {
        let mut raw = record("unbound", "healing");
        raw.animation.effects[0].color = None;
        let err = ThemeCatalog::load(vec![raw]).unwrap_err();
        assert!(matches!(err, CatalogError::UnboundEffect { .. }));
    }

    #[test]
    fn list_by_category_preserves_insertion_order() {
        let catalog = ThemeCatalog::load(vec![
            record("first", "healing"),
            record("other", "grounding"),
            record("second", "healing"),
        ])
        .unwrap();

        let healing: Vec<&str> = catalog
            .list_by_category(ThemeCategory::Healing)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(healing, vec!["first", "second"]);
    }

    #[test]
    fn bundled_themes_all_validate() {
        let records: Vec<TomlTheme> = bundled::BUNDLED_THEMES
            .iter()
            .map(|t| TomlTheme::from_str(t.content).expect(t.filename))
            .collect();
        let catalog = ThemeCatalog::load(records).unwrap();

        // The safety and default themes must ship in the bundle.
        assert!(catalog.lookup(SAFETY_THEME_ID).is_some());
        assert!(catalog.lookup(DEFAULT_THEME_ID).is_some());

        let safety = catalog.lookup(SAFETY_THEME_ID).unwrap();
        assert_eq!(safety.category, ThemeCategory::Accessibility);

        // Every bundled theme carries the consciousness-state roles the
        // controller renders from live signals.
        for theme in catalog.themes() {
            for role in ["deep_delta", "delta", "theta", "alpha", "beta", "gamma"] {
                assert!(theme.color(role).is_some(), "{} missing {role}", theme.id);
            }
        }
    }

    #[test]
    fn golden_ratio_curve_is_monotonic_unit_interval() {
        let curve = TimingCurve::GoldenRatio;
        assert_eq!(curve.apply(0.0), 0.0);
        assert!((curve.apply(1.0) - 1.0).abs() < 1e-12);

        let mut last = 0.0;
        for i in 1..=100 {
            let eased = curve.apply(i as f64 / 100.0);
            assert!(eased >= last, "curve not monotonic at step {i}");
            assert!((0.0..=1.0).contains(&eased));
            last = eased;
        }
    }
}
