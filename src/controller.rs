// Adaptive controller - owns the render state machine and produces snapshots
//
// One controller instance owns the mutable render state; everything else
// talks to it through handles or reads the RenderSnapshot a tick returns.
// Phases:
//   Idle            nothing selected yet, renders the safety fallback
//   Steady          holding one effective theme
//   Transitioning   blending from a frozen source toward a target
//   SafetyOverride  pinned to the safety theme after an emergency signal
//
// An emergency signal takes effect within the same tick, interrupting any
// blend. The override is sticky: de-escalation alone never reverts it - it
// takes safety back at normal AND an explicit selection request. Selection
// requests and capability re-probes arrive through latest-wins slots and are
// consumed at the top of the next tick.

use crate::capability::CapabilityVector;
use crate::config::TransitionConfig;
use crate::resolve::{self, ConcreteColor, EffectiveTheme};
use crate::selection::{self, SelectionContext};
use crate::signals::{ConsciousnessState, SafetyLevel, StateSignal};
use crate::theme::{ThemeCatalog, TimingCurve, PHI, SAFETY_THEME_ID};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Render state machine phases, observable through snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Steady,
    Transitioning,
    SafetyOverride,
}

/// Per-effect instruction for the renderer: which effect to run and where in
/// its cycle it currently is.
#[derive(Debug, Clone, Serialize)]
pub struct AnimationDirective {
    pub effect: String,
    /// Cycle position in [0,1)
    pub phase: f64,
}

/// What the renderer gets each tick. Pure data, serializable for --json
/// inspection.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: Phase,
    /// Fully-resolved (possibly blended) theme to render right now
    pub theme: EffectiveTheme,
    /// Eased transition progress; 1.0 outside of Transitioning
    pub progress: f64,
    pub safety: SafetyLevel,
    pub state: Option<ConsciousnessState>,
    pub animation: Vec<AnimationDirective>,
}

/// Writer side of the selection slot. Clone freely across tasks; the newest
/// request wins, consumed at the next tick.
#[derive(Clone)]
pub struct SelectionHandle(Arc<Mutex<Option<SelectionContext>>>);

impl SelectionHandle {
    pub fn request_selection(&self, ctx: SelectionContext) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(ctx);
        }
    }
}

/// An in-flight blend. The source is frozen at the moment the transition
/// started; blending always interpolates source -> target, never from the
/// moving blend itself.
struct Transition {
    source: EffectiveTheme,
    target: EffectiveTheme,
    started: Instant,
    duration: Duration,
    curve: TimingCurve,
}

pub struct AdaptiveController {
    catalog: Arc<ThemeCatalog>,
    caps: CapabilityVector,
    transition_cfg: TransitionConfig,

    phase: Phase,
    current: Option<EffectiveTheme>,
    transition: Option<Transition>,
    /// Safety theme resolved against the current capabilities; refreshed on
    /// re-probe so an emergency switch can never fail mid-session
    safety_theme: EffectiveTheme,
    last_safety: SafetyLevel,
    last_state: Option<ConsciousnessState>,

    selection_slot: Arc<Mutex<Option<SelectionContext>>>,
    pending_caps: Arc<Mutex<Option<CapabilityVector>>>,

    epoch: Instant,
}

impl AdaptiveController {
    /// Fails if the safety theme is missing from the catalog: the engine
    /// must be able to honor an emergency signal before it starts.
    pub fn new(
        catalog: Arc<ThemeCatalog>,
        caps: CapabilityVector,
        transition_cfg: TransitionConfig,
    ) -> Result<Self> {
        let safety_desc = catalog.lookup(SAFETY_THEME_ID).ok_or_else(|| {
            anyhow!("safety theme {SAFETY_THEME_ID:?} missing from catalog, refusing to start")
        })?;
        let safety_theme = resolve::resolve(safety_desc, &caps, &catalog);

        Ok(Self {
            catalog,
            caps,
            transition_cfg,
            phase: Phase::Idle,
            current: None,
            transition: None,
            safety_theme,
            last_safety: SafetyLevel::Normal,
            last_state: None,
            selection_slot: Arc::new(Mutex::new(None)),
            pending_caps: Arc::new(Mutex::new(None)),
            epoch: Instant::now(),
        })
    }

    pub fn selection_handle(&self) -> SelectionHandle {
        SelectionHandle(Arc::clone(&self.selection_slot))
    }

    /// Queue a re-probed capability vector; applied at the top of the next
    /// tick. Latest-wins like the selection slot.
    pub fn apply_capability(&self, caps: CapabilityVector) {
        if let Ok(mut guard) = self.pending_caps.lock() {
            *guard = Some(caps);
        }
    }

    /// Advance the state machine and produce what to render now.
    pub fn tick(&mut self, now: Instant, signal: Option<&StateSignal>) -> RenderSnapshot {
        if let Some(caps) = self.pending_caps.lock().ok().and_then(|mut g| g.take()) {
            self.reprobe(caps);
        }

        if let Some(sig) = signal {
            self.last_safety = sig.safety;
            self.last_state = Some(sig.state);
        }

        // Emergency interrupts whatever is in flight, this tick.
        if self.last_safety == SafetyLevel::Emergency && self.phase != Phase::SafetyOverride {
            tracing::warn!("emergency signal, switching to safety theme");
            self.current = Some(self.safety_theme.clone());
            self.transition = None;
            self.phase = Phase::SafetyOverride;
        }

        // The override pins the safety theme until safety is back to normal
        // AND a new selection arrives; requests stay queued meanwhile.
        let may_select =
            self.phase != Phase::SafetyOverride || self.last_safety == SafetyLevel::Normal;
        if may_select {
            if let Some(mut ctx) = self.selection_slot.lock().ok().and_then(|mut g| g.take()) {
                ctx.safety = self.last_safety;
                if let Some(state) = self.last_state {
                    ctx.state = state;
                }
                self.retarget(&ctx, now);
            }
        }

        self.advance(now)
    }

    /// Point the machine at a freshly selected and resolved target.
    fn retarget(&mut self, ctx: &SelectionContext, now: Instant) {
        let desired = selection::select(ctx, &self.catalog);
        let target = resolve::resolve(desired, &self.caps, &self.catalog);
        tracing::info!(theme = %target.id, phase = ?self.phase, "selection applied");

        if self.current.is_none() {
            // First selection: nothing to blend from.
            self.current = Some(target);
            self.transition = None;
            self.phase = Phase::Steady;
            return;
        }

        if self.transition.is_none() && self.current.as_ref() == Some(&target) {
            self.phase = Phase::Steady;
            return;
        }

        // Re-entrant selection freezes the current blend as the new source,
        // so the render never jumps.
        let source = self.blended(now);

        if !target.animations_enabled {
            // Motion reduction or an animation-free target: snap.
            self.current = Some(target);
            self.transition = None;
            self.phase = Phase::Steady;
            return;
        }

        let base_ms = (PHI * 1000.0) as u64;
        let duration = Duration::from_millis(
            base_ms.clamp(self.transition_cfg.min_ms, self.transition_cfg.max_ms),
        );
        let curve = target.curve;
        self.transition = Some(Transition {
            source,
            target,
            started: now,
            duration,
            curve,
        });
        self.phase = Phase::Transitioning;
    }

    /// Sample or complete the in-flight transition and emit the snapshot.
    fn advance(&mut self, now: Instant) -> RenderSnapshot {
        if let Some(tr) = &self.transition {
            let raw = raw_progress(tr, now);
            if raw >= 1.0 {
                self.current = Some(tr.target.clone());
                self.transition = None;
                self.phase = Phase::Steady;
            }
        }

        let (theme, progress) = match &self.transition {
            Some(tr) => {
                let raw = raw_progress(tr, now);
                let eased = tr.curve.apply(raw);
                (blend(&tr.source, &tr.target, eased, raw), eased)
            }
            None => match &self.current {
                Some(cur) => (cur.clone(), 1.0),
                // Idle before the first selection: the safety theme is the
                // only thing guaranteed renderable.
                None => (self.safety_theme.clone(), 1.0),
            },
        };

        let animation = if theme.animations_enabled {
            let cycle = ((now - self.epoch).as_secs_f64() / PHI).fract();
            theme
                .effects
                .iter()
                .map(|e| AnimationDirective {
                    effect: e.name.clone(),
                    phase: cycle,
                })
                .collect()
        } else {
            Vec::new()
        };

        RenderSnapshot {
            phase: self.phase,
            theme,
            progress,
            safety: self.last_safety,
            state: self.last_state,
            animation,
        }
    }

    /// Apply a new capability vector: re-resolve the active target against it
    /// and snap. An in-flight blend is abandoned; its endpoints are no longer
    /// renderable as resolved.
    fn reprobe(&mut self, caps: CapabilityVector) {
        tracing::info!(color = ?caps.color, glyphs = ?caps.glyphs, "capability re-probe applied");
        self.caps = caps;

        if let Some(desc) = self.catalog.lookup(SAFETY_THEME_ID) {
            self.safety_theme = resolve::resolve(desc, &self.caps, &self.catalog);
        }
        if self.phase == Phase::SafetyOverride {
            self.current = Some(self.safety_theme.clone());
            self.transition = None;
            return;
        }

        let active_id = self
            .transition
            .as_ref()
            .map(|t| t.target.id.clone())
            .or_else(|| self.current.as_ref().map(|c| c.id.clone()));
        if let Some(id) = active_id {
            match self.catalog.lookup(&id) {
                Some(desc) => {
                    self.current = Some(resolve::resolve(desc, &self.caps, &self.catalog));
                    self.transition = None;
                    if self.phase == Phase::Transitioning {
                        self.phase = Phase::Steady;
                    }
                }
                None => {
                    // User theme gone from a reloaded catalog: hold what we
                    // have and keep rendering.
                    tracing::warn!(theme = %id, "active theme no longer in catalog, holding state");
                }
            }
        }
    }

    /// The theme as rendered right now, blend included.
    fn blended(&self, now: Instant) -> EffectiveTheme {
        match &self.transition {
            Some(tr) => {
                let raw = raw_progress(tr, now);
                blend(&tr.source, &tr.target, tr.curve.apply(raw), raw)
            }
            None => match &self.current {
                Some(cur) => cur.clone(),
                None => self.safety_theme.clone(),
            },
        }
    }
}

fn raw_progress(tr: &Transition, now: Instant) -> f64 {
    if tr.duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(tr.started);
    (elapsed.as_secs_f64() / tr.duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Blend source toward target. True-color channels interpolate through the
/// eased progress; everything discrete (glyphs, indexed and named colors,
/// effect lists, metadata) snaps to the target at raw progress 0.5. The
/// target's role set drives the output; roles the source lacks snap
/// immediately.
fn blend(source: &EffectiveTheme, target: &EffectiveTheme, eased: f64, raw: f64) -> EffectiveTheme {
    let take_target = raw >= 0.5;

    let colors = target
        .colors
        .iter()
        .map(|(role, to)| {
            let concrete = match (source.color(role), to) {
                (Some(ConcreteColor::Rgb(r0, g0, b0)), ConcreteColor::Rgb(r1, g1, b1)) => {
                    ConcreteColor::Rgb(
                        lerp_channel(r0, *r1, eased),
                        lerp_channel(g0, *g1, eased),
                        lerp_channel(b0, *b1, eased),
                    )
                }
                (Some(from), _) if !take_target => from,
                _ => *to,
            };
            (role.clone(), concrete)
        })
        .collect();

    let glyphs = target
        .glyphs
        .iter()
        .map(|(role, to)| {
            let glyph = if take_target {
                to.clone()
            } else {
                source.glyph(role).map(str::to_string).unwrap_or_else(|| to.clone())
            };
            (role.clone(), glyph)
        })
        .collect();

    let discrete = if take_target { target } else { source };
    EffectiveTheme {
        id: discrete.id.clone(),
        name: discrete.name.clone(),
        color_depth: discrete.color_depth,
        glyph_tier: discrete.glyph_tier,
        fps: discrete.fps,
        animations_enabled: discrete.animations_enabled,
        curve: discrete.curve,
        effects: discrete.effects.clone(),
        colors,
        glyphs,
    }
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{ColorDepth, GlyphTier};
    use crate::selection::UserProfile;
    use crate::theme::TomlTheme;

    fn record(id: &str, accent: &str, fps: u8) -> TomlTheme {
        let enabled = fps > 0;
        let toml = format!(
            r##"
[meta]
id = "{id}"
name = "{id}"
version = 1
category = "consciousness"
level = "beginner"
accessible_variant = "high-contrast"

[palette]
background = {{ rgb = "#000000", indexed = 16, ansi = "black" }}
accent = {{ rgb = "{accent}", indexed = 39, ansi = "cyan" }}

[symbols]
focus = {{ glyph = "◉", ascii = "o" }}

[animation]
fps = {fps}
enabled = {enabled}
curve = "linear"

[requires]
color = "truecolor"
glyphs = "unicode-full"
"##
        );
        TomlTheme::from_str(&toml).unwrap()
    }

    fn safety_record() -> TomlTheme {
        let toml = r##"
[meta]
id = "high-contrast"
name = "High Contrast"
version = 1
category = "accessibility"
level = "beginner"

[palette]
background = { rgb = "#000000", indexed = 16, ansi = "black" }
accent = { rgb = "#ffff00", indexed = 226, ansi = "bright-yellow" }

[symbols]
focus = { glyph = "O", ascii = "O" }

[animation]
fps = 0
enabled = false

[requires]
color = "ansi16"
glyphs = "ascii"
"##;
        TomlTheme::from_str(toml).unwrap()
    }

    fn catalog() -> Arc<ThemeCatalog> {
        Arc::new(
            ThemeCatalog::load(vec![
                record("theme-a", "#c80000", 6),
                record("theme-b", "#000000", 6),
                record("theme-c", "#ff0000", 6),
                safety_record(),
            ])
            .unwrap(),
        )
    }

    fn full_caps() -> CapabilityVector {
        CapabilityVector {
            color: ColorDepth::TrueColor,
            glyphs: GlyphTier::UnicodeFull,
            max_fps: 10,
            high_contrast: false,
            reduce_motion: false,
            screen_reader: false,
        }
    }

    // min == max pins the transition duration so tests can step time exactly
    fn cfg_1s() -> TransitionConfig {
        TransitionConfig {
            min_ms: 1000,
            max_ms: 1000,
        }
    }

    fn request(controller: &AdaptiveController, id: &str) {
        controller
            .selection_handle()
            .request_selection(SelectionContext::new(UserProfile::default()).with_explicit_theme(id));
    }

    fn accent_red(snapshot: &RenderSnapshot) -> u8 {
        match snapshot.theme.color("accent").unwrap() {
            ConcreteColor::Rgb(r, _, _) => r,
            other => panic!("expected rgb accent, got {other:?}"),
        }
    }

    #[test]
    fn construction_fails_without_safety_theme() {
        let catalog = Arc::new(
            ThemeCatalog::load(vec![record("theme-a", "#c80000", 6)]).unwrap(),
        );
        assert!(AdaptiveController::new(catalog, full_caps(), cfg_1s()).is_err());
    }

    #[test]
    fn first_selection_snaps_to_steady() {
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        request(&controller, "theme-a");
        let snap = controller.tick(Instant::now(), None);
        assert_eq!(snap.phase, Phase::Steady);
        assert_eq!(snap.theme.id, "theme-a");
        assert_eq!(snap.progress, 1.0);
    }

    #[test]
    fn full_duration_lands_steady_on_target_with_no_residual_blend() {
        // Steady on A, select B, step exactly one transition duration
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let t0 = Instant::now();
        request(&controller, "theme-a");
        controller.tick(t0, None);

        request(&controller, "theme-b");
        let mid = controller.tick(t0, None);
        assert_eq!(mid.phase, Phase::Transitioning);

        let done = controller.tick(t0 + Duration::from_millis(1000), None);
        assert_eq!(done.phase, Phase::Steady);
        assert_eq!(done.theme.id, "theme-b");
        assert_eq!(done.progress, 1.0);
        assert_eq!(accent_red(&done), 0); // exactly B's accent, no residue
    }

    #[test]
    fn blend_interpolates_rgb_and_snaps_discrete_at_midpoint() {
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let t0 = Instant::now();
        request(&controller, "theme-a");
        controller.tick(t0, None);
        request(&controller, "theme-b");
        controller.tick(t0, None);

        let quarter = controller.tick(t0 + Duration::from_millis(250), None);
        let red = accent_red(&quarter);
        assert!(red < 200 && red > 0, "expected partial blend, got {red}");
        // Before the midpoint, discrete metadata still reads as the source.
        assert_eq!(quarter.theme.id, "theme-a");

        let late = controller.tick(t0 + Duration::from_millis(750), None);
        assert_eq!(late.theme.id, "theme-b");
    }

    #[test]
    fn emergency_reaches_safety_theme_within_one_tick() {
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let t0 = Instant::now();
        request(&controller, "theme-a");
        controller.tick(t0, None);

        let signal = StateSignal::new(ConsciousnessState::Gamma, SafetyLevel::Emergency);
        let snap = controller.tick(t0 + Duration::from_millis(100), Some(&signal));
        assert_eq!(snap.phase, Phase::SafetyOverride);
        assert_eq!(snap.theme.id, SAFETY_THEME_ID);
        assert_eq!(snap.progress, 1.0);
    }

    #[test]
    fn emergency_mid_transition_then_deescalation_does_not_silently_revert() {
        // Scenario: A->B in flight, emergency, then safety back to normal
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let t0 = Instant::now();
        request(&controller, "theme-a");
        controller.tick(t0, None);
        request(&controller, "theme-b");
        controller.tick(t0, None);

        let emergency = StateSignal::new(ConsciousnessState::Gamma, SafetyLevel::Emergency);
        let snap = controller.tick(t0 + Duration::from_millis(400), Some(&emergency));
        assert_eq!(snap.phase, Phase::SafetyOverride);
        assert_eq!(snap.theme.id, SAFETY_THEME_ID);

        // De-escalation without a new selection: still pinned.
        let normal = StateSignal::new(ConsciousnessState::Alpha, SafetyLevel::Normal);
        let snap = controller.tick(t0 + Duration::from_millis(800), Some(&normal));
        assert_eq!(snap.phase, Phase::SafetyOverride);
        assert_eq!(snap.theme.id, SAFETY_THEME_ID);

        // Much later, still no revert.
        let snap = controller.tick(t0 + Duration::from_secs(30), None);
        assert_eq!(snap.phase, Phase::SafetyOverride);
        assert_eq!(snap.theme.id, SAFETY_THEME_ID);
    }

    #[test]
    fn explicit_reselection_exits_safety_override_once_normal() {
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let t0 = Instant::now();
        request(&controller, "theme-a");
        controller.tick(t0, None);

        let emergency = StateSignal::new(ConsciousnessState::Gamma, SafetyLevel::Emergency);
        controller.tick(t0 + Duration::from_millis(100), Some(&emergency));

        // Selection while still in emergency stays queued.
        request(&controller, "theme-c");
        let pinned = controller.tick(t0 + Duration::from_millis(200), None);
        assert_eq!(pinned.phase, Phase::SafetyOverride);

        // Normal safety releases the queued request.
        let normal = StateSignal::new(ConsciousnessState::Alpha, SafetyLevel::Normal);
        let released = controller.tick(t0 + Duration::from_millis(300), Some(&normal));
        assert_eq!(released.phase, Phase::Transitioning);

        let done = controller.tick(t0 + Duration::from_millis(1300), None);
        assert_eq!(done.phase, Phase::Steady);
        assert_eq!(done.theme.id, "theme-c");
    }

    #[test]
    fn retarget_mid_blend_never_doubles_back() {
        // A (red 200) -> B (red 0); retarget to C (red 255) mid-blend. The
        // red channel must move monotonically from its frozen value to 255.
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let t0 = Instant::now();
        request(&controller, "theme-a");
        controller.tick(t0, None);
        request(&controller, "theme-b");
        controller.tick(t0, None);

        let retarget_at = t0 + Duration::from_millis(400);
        let frozen = accent_red(&controller.tick(retarget_at, None));

        request(&controller, "theme-c");
        let mut last = accent_red(&controller.tick(retarget_at, None));
        assert!(
            (i16::from(last) - i16::from(frozen)).abs() <= 1,
            "retarget jumped: {frozen} -> {last}"
        );

        for step in 1..=10 {
            let now = retarget_at + Duration::from_millis(step * 100);
            let snap = controller.tick(now, None);
            let red = accent_red(&snap);
            assert!(red >= last, "double-back at step {step}: {last} -> {red}");
            last = red;
        }
        assert_eq!(last, 255);
    }

    #[test]
    fn capability_reprobe_applies_at_next_tick() {
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let t0 = Instant::now();
        request(&controller, "theme-a");
        let snap = controller.tick(t0, None);
        assert!(matches!(
            snap.theme.color("accent"),
            Some(ConcreteColor::Rgb(..))
        ));

        controller.apply_capability(CapabilityVector::conservative());
        let snap = controller.tick(t0 + Duration::from_millis(100), None);
        assert_eq!(snap.theme.color("accent"), Some(ConcreteColor::Default));
        assert!(!snap.theme.animations_enabled);
    }

    #[test]
    fn idle_tick_renders_the_safety_fallback() {
        let mut controller = AdaptiveController::new(catalog(), full_caps(), cfg_1s()).unwrap();
        let snap = controller.tick(Instant::now(), None);
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.theme.id, SAFETY_THEME_ID);
    }
}
