//! Bundled TOML themes (compiled into binary, extracted on first run)
//!
//! These themes are written to ~/.config/attune/themes/ on first run.
//! Users can then modify them freely; a user file with the same theme id
//! replaces the bundled record at load.
//!
//! Each theme lives in its own module file for easy editing. See
//! consciousness_default.rs for the flagship theme.

mod consciousness_default;
mod deep_meditation;
mod earth_grounding;
mod gentle_healing;
mod high_contrast;
mod minimal_focus;
mod sacred_geometry;
mod vibrant_transcendence;

pub use consciousness_default::THEME as CONSCIOUSNESS_DEFAULT;
pub use deep_meditation::THEME as DEEP_MEDITATION;
pub use earth_grounding::THEME as EARTH_GROUNDING;
pub use gentle_healing::THEME as GENTLE_HEALING;
pub use high_contrast::THEME as HIGH_CONTRAST;
pub use minimal_focus::THEME as MINIMAL_FOCUS;
pub use sacred_geometry::THEME as SACRED_GEOMETRY;
pub use vibrant_transcendence::THEME as VIBRANT_TRANSCENDENCE;

/// Bundled theme: filename and TOML content
pub struct BundledTheme {
    pub filename: &'static str,
    pub content: &'static str,
}

/// All bundled themes, in catalog order
pub const BUNDLED_THEMES: &[BundledTheme] = &[
    BundledTheme {
        filename: "consciousness_default.toml",
        content: CONSCIOUSNESS_DEFAULT,
    },
    BundledTheme {
        filename: "gentle_healing.toml",
        content: GENTLE_HEALING,
    },
    BundledTheme {
        filename: "vibrant_transcendence.toml",
        content: VIBRANT_TRANSCENDENCE,
    },
    BundledTheme {
        filename: "deep_meditation.toml",
        content: DEEP_MEDITATION,
    },
    BundledTheme {
        filename: "earth_grounding.toml",
        content: EARTH_GROUNDING,
    },
    BundledTheme {
        filename: "sacred_geometry.toml",
        content: SACRED_GEOMETRY,
    },
    BundledTheme {
        filename: "minimal_focus.toml",
        content: MINIMAL_FOCUS,
    },
    BundledTheme {
        filename: "high_contrast.toml",
        content: HIGH_CONTRAST,
    },
];
