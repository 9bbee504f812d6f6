// Capability probe - assess what the current display surface can render
//
// The probe never fails: any query error, missing environment, or timeout
// degrades to the most conservative vector (mono, ascii, no animation, all
// accessibility flags set). Capability uncertainty must never block rendering.
//
// Detection heuristics follow the usual terminal conventions: NO_COLOR and
// FORCE_COLOR are honored first, then COLORTERM, then TERM. Sustainable frame
// rate comes from a per-terminal table rather than a live benchmark; values
// are deliberately modest.

use serde::Serialize;
use std::io::IsTerminal;
use std::sync::mpsc;
use std::time::Duration;

/// Color depth tiers, poorest to richest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorDepth {
    Mono,
    Ansi16,
    Ansi256,
    // One word in theme files and COLORTERM convention, not "true-color"
    #[serde(rename = "truecolor")]
    TrueColor,
}

/// Glyph rendering tiers, poorest to richest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlyphTier {
    Ascii,
    UnicodeBasic,
    UnicodeFull,
}

/// Normalized snapshot of what the surface supports.
///
/// Immutable per session; a resize/reconnect may produce a fresh one, which
/// the controller applies at the start of its next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityVector {
    pub color: ColorDepth,
    pub glyphs: GlyphTier,
    /// Max sustainable frame rate. 0 means animations are off entirely.
    pub max_fps: u8,
    pub high_contrast: bool,
    pub reduce_motion: bool,
    pub screen_reader: bool,
}

impl CapabilityVector {
    /// The vector assumed when nothing can be determined about the surface.
    pub fn conservative() -> Self {
        Self {
            color: ColorDepth::Mono,
            glyphs: GlyphTier::Ascii,
            max_fps: 0,
            high_contrast: true,
            reduce_motion: true,
            screen_reader: true,
        }
    }
}

/// Raw, unnormalized report gathered from the surface layer.
///
/// Everything is optional or defaulted so a partial collection still
/// produces a usable report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawCapabilityReport {
    pub term: String,
    pub colorterm: String,
    pub lang: String,
    pub no_color: bool,
    pub force_color: bool,
    pub is_tty: bool,
    pub cols: u16,
    pub rows: u16,
    pub high_contrast_hint: bool,
    pub reduce_motion_hint: bool,
    pub screen_reader_hint: bool,
}

impl RawCapabilityReport {
    /// Gather a report from the process environment and the terminal.
    pub fn collect() -> Self {
        let env = |key: &str| std::env::var(key).unwrap_or_default();
        let flag = |key: &str| std::env::var(key).map(|v| !v.is_empty()).unwrap_or(false);

        let (cols, rows) = crossterm::terminal::size().unwrap_or((0, 0));

        Self {
            term: env("TERM").to_ascii_lowercase(),
            colorterm: env("COLORTERM").to_ascii_lowercase(),
            lang: env("LANG").to_ascii_lowercase(),
            no_color: flag("NO_COLOR"),
            force_color: flag("FORCE_COLOR"),
            is_tty: std::io::stdout().is_terminal(),
            cols,
            rows,
            high_contrast_hint: flag("ATTUNE_HIGH_CONTRAST"),
            reduce_motion_hint: flag("ATTUNE_REDUCE_MOTION"),
            screen_reader_hint: flag("ATTUNE_SCREEN_READER"),
        }
    }
}

/// Recommended sustainable frame rates for known terminal families.
/// Unknown terminals get the xterm default.
const FPS_TABLE: &[(&str, u8)] = &[
    ("iterm", 10),
    ("kitty", 10),
    ("alacritty", 10),
    ("gnome", 8),
    ("konsole", 8),
    ("wezterm", 8),
    ("windows-terminal", 7),
    ("vscode", 6),
    ("xterm", 5),
    ("screen", 4),
    ("tmux", 4),
    ("linux", 3),
    ("dumb", 0),
];

const DEFAULT_FPS: u8 = 5;

/// Normalize a raw report into a capability vector.
///
/// Pure: the same report always yields the same vector, which keeps
/// re-probes from flickering the output.
pub fn probe(report: &RawCapabilityReport) -> CapabilityVector {
    let color = detect_color_depth(report);
    let glyphs = detect_glyph_tier(report);
    let max_fps = detect_fps(report, color);

    CapabilityVector {
        color,
        glyphs,
        max_fps,
        high_contrast: report.high_contrast_hint,
        reduce_motion: report.reduce_motion_hint || max_fps == 0,
        screen_reader: report.screen_reader_hint,
    }
}

/// Collect and normalize with a bounded wait.
///
/// Surface queries are the one place the engine may stall (e.g. a remote tty
/// answering a size ioctl slowly), so collection runs on a helper thread and
/// expiry falls back to the conservative vector.
pub fn probe_with_timeout(timeout: Duration) -> CapabilityVector {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(RawCapabilityReport::collect());
    });

    match rx.recv_timeout(timeout) {
        Ok(report) => probe(&report),
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "capability probe timed out, using conservative vector");
            CapabilityVector::conservative()
        }
    }
}

fn detect_color_depth(report: &RawCapabilityReport) -> ColorDepth {
    if report.no_color {
        return ColorDepth::Mono;
    }
    if report.colorterm.contains("truecolor") || report.colorterm.contains("24bit") {
        return ColorDepth::TrueColor;
    }
    if report.term.contains("truecolor") || report.term.contains("24bit") {
        return ColorDepth::TrueColor;
    }
    if report.term.contains("256color") {
        return ColorDepth::Ansi256;
    }
    if report.force_color {
        return ColorDepth::Ansi256;
    }
    if report.term.contains("color") || report.term.contains("ansi") || report.term.contains("xterm")
    {
        return ColorDepth::Ansi16;
    }
    if !report.is_tty || report.term.is_empty() || report.term == "dumb" {
        return ColorDepth::Mono;
    }
    ColorDepth::Ansi16
}

fn detect_glyph_tier(report: &RawCapabilityReport) -> GlyphTier {
    let utf8 = report.lang.contains("utf-8") || report.lang.contains("utf8");
    if !utf8 {
        return GlyphTier::Ascii;
    }
    // Multiplexers historically mangle wide/astral glyphs; keep them at the
    // basic tier even with a UTF-8 locale.
    if report.term.contains("screen") || report.term.contains("linux") {
        return GlyphTier::UnicodeBasic;
    }
    GlyphTier::UnicodeFull
}

fn detect_fps(report: &RawCapabilityReport, color: ColorDepth) -> u8 {
    if color == ColorDepth::Mono && !report.force_color {
        return 0;
    }
    if !report.is_tty {
        return 0;
    }
    for (needle, fps) in FPS_TABLE {
        if report.term.contains(needle) || report.colorterm.contains(needle) {
            return *fps;
        }
    }
    DEFAULT_FPS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RawCapabilityReport {
        RawCapabilityReport {
            term: "xterm-256color".into(),
            colorterm: String::new(),
            lang: "en_us.utf-8".into(),
            is_tty: true,
            cols: 120,
            rows: 40,
            ..Default::default()
        }
    }

    #[test]
    fn truecolor_detected_from_colorterm() {
        let mut r = report();
        r.colorterm = "truecolor".into();
        assert_eq!(probe(&r).color, ColorDepth::TrueColor);
    }

    #[test]
    fn no_color_forces_mono_and_disables_animation() {
        let mut r = report();
        r.no_color = true;
        let caps = probe(&r);
        assert_eq!(caps.color, ColorDepth::Mono);
        assert_eq!(caps.max_fps, 0);
        assert!(caps.reduce_motion);
    }

    #[test]
    fn ascii_locale_gets_ascii_glyphs() {
        let mut r = report();
        r.lang = "c".into();
        assert_eq!(probe(&r).glyphs, GlyphTier::Ascii);
    }

    #[test]
    fn multiplexer_capped_at_basic_unicode() {
        let mut r = report();
        r.term = "screen-256color".into();
        assert_eq!(probe(&r).glyphs, GlyphTier::UnicodeBasic);
    }

    #[test]
    fn non_tty_disables_animation() {
        let mut r = report();
        r.is_tty = false;
        assert_eq!(probe(&r).max_fps, 0);
    }

    #[test]
    fn probe_is_deterministic() {
        let r = report();
        assert_eq!(probe(&r), probe(&r));
    }

    #[test]
    fn conservative_vector_assumes_nothing() {
        let caps = CapabilityVector::conservative();
        assert_eq!(caps.color, ColorDepth::Mono);
        assert_eq!(caps.glyphs, GlyphTier::Ascii);
        assert_eq!(caps.max_fps, 0);
        assert!(caps.high_contrast && caps.reduce_motion && caps.screen_reader);
    }

    #[test]
    fn tiers_deserialize_from_theme_file_spellings() {
        // These strings are the on-disk format; they must keep parsing.
        for (spelling, depth) in [
            ("mono", ColorDepth::Mono),
            ("ansi16", ColorDepth::Ansi16),
            ("ansi256", ColorDepth::Ansi256),
            ("truecolor", ColorDepth::TrueColor),
        ] {
            let parsed: ColorDepth = serde_json::from_str(&format!("\"{spelling}\"")).unwrap();
            assert_eq!(parsed, depth, "spelling {spelling:?}");
        }
        for (spelling, tier) in [
            ("ascii", GlyphTier::Ascii),
            ("unicode-basic", GlyphTier::UnicodeBasic),
            ("unicode-full", GlyphTier::UnicodeFull),
        ] {
            let parsed: GlyphTier = serde_json::from_str(&format!("\"{spelling}\"")).unwrap();
            assert_eq!(parsed, tier, "spelling {spelling:?}");
        }
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(ColorDepth::Mono < ColorDepth::Ansi16);
        assert!(ColorDepth::Ansi256 < ColorDepth::TrueColor);
        assert!(GlyphTier::Ascii < GlyphTier::UnicodeBasic);
        assert!(GlyphTier::UnicodeBasic < GlyphTier::UnicodeFull);
    }
}
