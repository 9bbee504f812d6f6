// Fallback resolver - degrade a theme descriptor to what the surface can render
//
// Resolution walks a fixed degradation ladder independently per axis:
//   color   truecolor -> 256 -> 16 -> mono
//   glyphs  unicode-full -> unicode-basic -> ascii
//   fps     requested -> capability budget -> disabled
// picking, per axis, the richest tier supported by both the capability vector
// and the descriptor's own requirement. Every semantic role survives every
// downgrade because descriptors carry all representations up front.
//
// Accessibility flags override the ladder outcome unconditionally:
// high-contrast swaps in the theme's accessible variant (or the High Contrast
// theme wholesale), motion-reduction forces animations off regardless of
// budget. Resolution is pure and deterministic - same inputs, same output -
// so re-resolving never flickers.

use crate::capability::{CapabilityVector, ColorDepth, GlyphTier};
use crate::theme::{
    AnsiColor, EffectSpec, ThemeCatalog, ThemeDescriptor, TimingCurve, SAFETY_THEME_ID,
};
use serde::Serialize;

/// A color ready for the renderer at the resolved depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcreteColor {
    Rgb(u8, u8, u8),
    Indexed(u8),
    Named(AnsiColor),
    /// Mono tier: render with the terminal's default colors
    Default,
}

/// A theme after fallback resolution - guaranteed renderable on the surface
/// the capability vector describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveTheme {
    pub id: String,
    pub name: String,
    pub color_depth: ColorDepth,
    pub glyph_tier: GlyphTier,
    /// Effective frame rate; 0 when animations are disabled
    pub fps: u8,
    pub animations_enabled: bool,
    pub curve: TimingCurve,
    /// Effects surviving resolution (empty when animations are disabled)
    pub effects: Vec<EffectSpec>,
    /// role -> concrete color, descriptor declaration order
    pub colors: Vec<(String, ConcreteColor)>,
    /// role -> concrete glyph, descriptor declaration order
    pub glyphs: Vec<(String, String)>,
}

impl EffectiveTheme {
    pub fn color(&self, role: &str) -> Option<ConcreteColor> {
        self.colors.iter().find(|(r, _)| r == role).map(|(_, c)| *c)
    }

    pub fn glyph(&self, role: &str) -> Option<&str> {
        self.glyphs.iter().find(|(r, _)| r == role).map(|(_, g)| g.as_str())
    }
}

/// Resolve a desired theme against the surface capabilities.
///
/// The catalog is needed for the high-contrast substitution path; everything
/// else reads only the descriptor and the vector.
pub fn resolve(
    desired: &ThemeDescriptor,
    caps: &CapabilityVector,
    catalog: &ThemeCatalog,
) -> EffectiveTheme {
    // Accessibility override first: contrast requirements replace the theme
    // before the ladder runs, and the substitute goes through the same
    // ladder so it is still capability-correct.
    if caps.high_contrast && desired.category != crate::theme::ThemeCategory::Accessibility {
        let substitute = desired
            .accessible_variant
            .as_deref()
            .and_then(|id| catalog.lookup(id))
            .or_else(|| catalog.lookup(SAFETY_THEME_ID));
        if let Some(sub) = substitute {
            if sub.id != desired.id {
                tracing::debug!(from = %desired.id, to = %sub.id, "high-contrast substitution");
                return resolve_ladder(sub, caps);
            }
        }
    }

    resolve_ladder(desired, caps)
}

/// The per-axis degradation ladder, shared by the normal path and the
/// post-substitution path.
fn resolve_ladder(desired: &ThemeDescriptor, caps: &CapabilityVector) -> EffectiveTheme {
    let color_depth = caps.color.min(desired.requires.color);
    let glyph_tier = caps.glyphs.min(desired.requires.glyphs);

    let requested_fps = desired.animation.fps;
    let mut fps = requested_fps.min(caps.max_fps);
    let mut enabled = desired.animation.enabled && fps > 0;
    // Motion reduction wins over any budget.
    if caps.reduce_motion {
        enabled = false;
    }
    if !enabled {
        fps = 0;
    }

    let colors = desired
        .palette
        .iter()
        .map(|(role, value)| {
            let concrete = match color_depth {
                ColorDepth::TrueColor => {
                    let (r, g, b) = value.rgb;
                    ConcreteColor::Rgb(r, g, b)
                }
                ColorDepth::Ansi256 => ConcreteColor::Indexed(value.indexed),
                ColorDepth::Ansi16 => ConcreteColor::Named(value.ansi),
                ColorDepth::Mono => ConcreteColor::Default,
            };
            (role.clone(), concrete)
        })
        .collect();

    let glyphs = desired
        .symbols
        .iter()
        .map(|(role, spec)| {
            let glyph = match glyph_tier {
                GlyphTier::UnicodeFull => spec.glyph.clone(),
                GlyphTier::UnicodeBasic => {
                    spec.simple.clone().unwrap_or_else(|| spec.ascii.clone())
                }
                GlyphTier::Ascii => spec.ascii.clone(),
            };
            (role.clone(), glyph)
        })
        .collect();

    EffectiveTheme {
        id: desired.id.clone(),
        name: desired.name.clone(),
        color_depth,
        glyph_tier,
        fps,
        animations_enabled: enabled,
        curve: desired.animation.curve,
        effects: if enabled {
            desired.animation.effects.clone()
        } else {
            Vec::new()
        },
        colors,
        glyphs,
    }
}
