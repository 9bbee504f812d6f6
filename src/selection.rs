// Selection policy - pure precedence cascade from context to candidate theme
//
// The cascade is totally ordered, highest tier first:
//   1. explicit user-specified theme id, used verbatim
//   2. emergency safety level (or a declared high-contrast preference)
//      forces the designated safety theme
//   3. session intention matched against theme categories
//   4. time-of-day bucket mapped to a fixed category table
//   5. experience level: exact match, else nearest lower
//   6. default theme
// Ties inside a tier break by catalog insertion order. The function does no
// I/O and touches no hidden state, so auto-selection is reproducible in
// tests. An unknown explicit id is not an error - it falls through to the
// lower tiers.

use crate::signals::{ConsciousnessState, SafetyLevel};
use crate::theme::{
    ExperienceLevel, ThemeCatalog, ThemeCategory, ThemeDescriptor, DEFAULT_THEME_ID,
    SAFETY_THEME_ID,
};
use chrono::Timelike;

/// Time-of-day buckets used by selection tier 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Midday,
    Afternoon,
    Evening,
    LateNight,
}

impl TimeOfDay {
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            5..=8 => TimeOfDay::EarlyMorning,
            9..=11 => TimeOfDay::Morning,
            12..=14 => TimeOfDay::Midday,
            15..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::LateNight,
        }
    }

    pub fn now() -> Self {
        Self::from_hour(chrono::Local::now().hour() as u8)
    }

    /// Fixed bucket -> category table, preference order within the bucket.
    pub fn categories(&self) -> &'static [ThemeCategory] {
        match self {
            TimeOfDay::EarlyMorning => &[ThemeCategory::Meditation, ThemeCategory::Grounding],
            TimeOfDay::Morning => &[ThemeCategory::Consciousness, ThemeCategory::Grounding],
            TimeOfDay::Midday => &[ThemeCategory::Grounding, ThemeCategory::Consciousness],
            TimeOfDay::Afternoon => &[ThemeCategory::Consciousness, ThemeCategory::Healing],
            TimeOfDay::Evening => &[ThemeCategory::Healing, ThemeCategory::Transcendence],
            TimeOfDay::LateNight => &[ThemeCategory::Meditation, ThemeCategory::Healing],
        }
    }
}

/// Declared user profile feeding selection tiers 2 and 5.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub level: ExperienceLevel,
    /// Declared category preferences, narrowing the tier-5 candidate pool
    pub preferred_categories: Vec<ThemeCategory>,
    /// Declared accessibility preference; forces the safety theme
    pub high_contrast: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            level: ExperienceLevel::Beginner,
            preferred_categories: Vec::new(),
            high_contrast: false,
        }
    }
}

/// Everything a selection request knows. Produced fresh per request, never
/// mutated in place.
#[derive(Debug, Clone)]
pub struct SelectionContext {
    pub explicit_theme: Option<String>,
    pub profile: UserProfile,
    /// Free-form session intention tag, e.g. "healing" or "deep-focus"
    pub intention: Option<String>,
    pub time_of_day: TimeOfDay,
    pub state: ConsciousnessState,
    pub safety: SafetyLevel,
}

impl SelectionContext {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            explicit_theme: None,
            profile,
            intention: None,
            time_of_day: TimeOfDay::now(),
            state: ConsciousnessState::Beta,
            safety: SafetyLevel::Normal,
        }
    }

    pub fn with_explicit_theme(mut self, id: impl Into<String>) -> Self {
        self.explicit_theme = Some(id.into());
        self
    }

    pub fn with_intention(mut self, intention: impl Into<String>) -> Self {
        self.intention = Some(intention.into());
        self
    }
}

/// Run the precedence cascade. Pure; total over any validated catalog.
pub fn select<'a>(ctx: &SelectionContext, catalog: &'a ThemeCatalog) -> &'a ThemeDescriptor {
    // Tier 1: explicit theme id, verbatim.
    if let Some(id) = &ctx.explicit_theme {
        if let Some(theme) = catalog.lookup(id) {
            return theme;
        }
        tracing::debug!(theme = %id, "explicit theme not in catalog, falling through");
    }

    // Tier 2: emergency or declared high-contrast forces the safety theme.
    if ctx.safety == SafetyLevel::Emergency || ctx.profile.high_contrast {
        if let Some(theme) = catalog.lookup(SAFETY_THEME_ID) {
            return theme;
        }
    }

    // Tier 3: session intention matched against category tags.
    if let Some(category) = ctx.intention.as_deref().and_then(ThemeCategory::parse) {
        if let Some(theme) = first_in_category(catalog, category) {
            return theme;
        }
    }

    // Tier 4: time-of-day bucket table.
    for category in ctx.time_of_day.categories() {
        if let Some(theme) = first_in_category(catalog, *category) {
            return theme;
        }
    }

    // Tier 5: experience level within the preferred pool - exact match
    // first, else the nearest level below.
    let pool: Vec<&ThemeDescriptor> = {
        let preferred: Vec<&ThemeDescriptor> = catalog
            .themes()
            .iter()
            .filter(|t| ctx.profile.preferred_categories.contains(&t.category))
            .collect();
        if preferred.is_empty() {
            catalog.themes().iter().collect()
        } else {
            preferred
        }
    };
    if let Some(theme) = pool.iter().copied().find(|t| t.level == ctx.profile.level) {
        return theme;
    }
    if let Some(theme) = pool
        .iter()
        .copied()
        .filter(|t| t.level < ctx.profile.level)
        .max_by_key(|t| t.level)
    {
        return theme;
    }

    // Tier 6: default fallback.
    catalog
        .lookup(DEFAULT_THEME_ID)
        .unwrap_or_else(|| &catalog.themes()[0])
}

fn first_in_category(catalog: &ThemeCatalog, category: ThemeCategory) -> Option<&ThemeDescriptor> {
    // list_by_category preserves insertion order, so first match is the
    // catalog-order tie-break.
    catalog.list_by_category(category).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TomlTheme;

    fn record(id: &str, category: &str, level: &str) -> TomlTheme {
        let toml = format!(
            r##"
[meta]
id = "{id}"
name = "{id}"
version = 1
category = "{category}"
level = "{level}"

[palette]
background = {{ rgb = "#000000", indexed = 16, ansi = "black" }}

[animation]
fps = 0
enabled = false

[requires]
color = "ansi16"
glyphs = "ascii"
"##
        );
        TomlTheme::from_str(&toml).unwrap()
    }

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::load(vec![
            record("consciousness-default", "consciousness", "beginner"),
            record("gentle-healing", "healing", "beginner"),
            record("vibrant-transcendence", "transcendence", "advanced"),
            record("deep-meditation", "meditation", "intermediate"),
            record("high-contrast", "accessibility", "beginner"),
        ])
        .unwrap()
    }

    fn ctx() -> SelectionContext {
        SelectionContext {
            explicit_theme: None,
            profile: UserProfile::default(),
            intention: None,
            time_of_day: TimeOfDay::Midday,
            state: ConsciousnessState::Beta,
            safety: SafetyLevel::Normal,
        }
    }

    #[test]
    fn explicit_theme_wins_over_everything() {
        let catalog = catalog();
        let mut ctx = ctx().with_explicit_theme("deep-meditation").with_intention("healing");
        ctx.safety = SafetyLevel::Caution;
        assert_eq!(select(&ctx, &catalog).id, "deep-meditation");
    }

    #[test]
    fn unknown_explicit_id_falls_through() {
        let catalog = catalog();
        let ctx = ctx().with_explicit_theme("no-such-theme").with_intention("healing");
        assert_eq!(select(&ctx, &catalog).id, "gentle-healing");
    }

    #[test]
    fn emergency_forces_safety_theme() {
        let catalog = catalog();
        let mut ctx = ctx().with_explicit_theme("no-such-theme").with_intention("healing");
        ctx.safety = SafetyLevel::Emergency;
        assert_eq!(select(&ctx, &catalog).id, "high-contrast");
    }

    #[test]
    fn declared_high_contrast_forces_safety_theme() {
        // Scenario: high-contrast preference set, intention present anyway
        let catalog = ThemeCatalog::load(vec![
            record("consciousness-default", "consciousness", "beginner"),
            record("high-contrast", "accessibility", "beginner"),
        ])
        .unwrap();
        let mut ctx = ctx().with_intention("consciousness");
        ctx.profile.high_contrast = true;
        assert_eq!(select(&ctx, &catalog).id, "high-contrast");
    }

    #[test]
    fn intention_matches_category_in_catalog_order() {
        let catalog = ThemeCatalog::load(vec![
            record("consciousness-default", "consciousness", "beginner"),
            record("first-healing", "healing", "beginner"),
            record("second-healing", "healing", "expert"),
        ])
        .unwrap();
        let ctx = ctx().with_intention("healing");
        assert_eq!(select(&ctx, &catalog).id, "first-healing");
    }

    #[test]
    fn time_of_day_bucket_maps_to_category_table() {
        let catalog = catalog();

        let mut late = ctx();
        late.time_of_day = TimeOfDay::LateNight;
        assert_eq!(select(&late, &catalog).id, "deep-meditation");

        let mut midday = ctx();
        midday.time_of_day = TimeOfDay::Midday;
        // Midday prefers grounding; none in catalog, so consciousness next.
        assert_eq!(select(&midday, &catalog).id, "consciousness-default");
    }

    #[test]
    fn experience_level_prefers_exact_then_nearest_lower() {
        // No intention, and a bucket whose categories are absent, so the
        // cascade reaches tier 5.
        let catalog = ThemeCatalog::load(vec![
            record("beginner-a", "accessibility", "beginner"),
            record("advanced-a", "accessibility", "advanced"),
        ])
        .unwrap();

        let mut exact = ctx();
        exact.profile.level = ExperienceLevel::Advanced;
        assert_eq!(select(&exact, &catalog).id, "advanced-a");

        let mut lower = ctx();
        lower.profile.level = ExperienceLevel::Intermediate;
        assert_eq!(select(&lower, &catalog).id, "beginner-a");
    }

    #[test]
    fn hour_buckets_cover_the_clock() {
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::EarlyMorning);
        assert_eq!(TimeOfDay::from_hour(10), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(13), TimeOfDay::Midday);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::LateNight);
        assert_eq!(TimeOfDay::from_hour(2), TimeOfDay::LateNight);
    }

    #[test]
    fn selection_is_reproducible() {
        let catalog = catalog();
        let ctx = ctx().with_intention("transcendence");
        let first = select(&ctx, &catalog).id.clone();
        for _ in 0..10 {
            assert_eq!(select(&ctx, &catalog).id, first);
        }
    }
}
