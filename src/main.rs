// Attune - adaptive theme resolution and rendering engine
//
// Consumes consciousness telemetry signals and continuously decides what the
// terminal should look like: which theme, degraded to what the surface can
// actually render, blended smoothly between targets, and pinned to a
// high-contrast safety theme the moment an emergency signal arrives.
//
// Architecture:
// - Theme catalog: validated TOML descriptors, bundled + user-provided
// - Capability probe: fail-soft assessment of the display surface
// - Selection policy: pure precedence cascade from context to theme
// - Fallback resolver: per-axis degradation ladder + accessibility overrides
// - Adaptive controller: render state machine producing per-tick snapshots
// - Preview renderer: prints each snapshot as an ANSI status line (a real
//   front-end would consume the snapshots instead)

mod capability;
mod cli;
mod config;
mod controller;
mod demo;
mod logging;
mod resolve;
mod selection;
mod signals;
mod theme;

use anyhow::{Context, Result};
use config::Config;
use controller::RenderSnapshot;
use resolve::ConcreteColor;
use selection::{SelectionContext, TimeOfDay};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use theme::ThemeCatalog;
use tokio::sync::oneshot;

/// How long the capability probe may stall before the conservative vector
/// takes over.
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands first (themes/probe/config) - they exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // First-run setup: config template and bundled theme extraction
    Config::ensure_config_exists();
    theme::ensure_themes_extracted();

    let config = Config::from_env();

    // Keep the guard alive so file logs flush on shutdown
    let _log_guard = logging::init(&config.logging);

    tracing::info!(version = config::VERSION, "starting attune");

    let catalog = Arc::new(
        ThemeCatalog::load_default()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("theme catalog failed validation")?,
    );
    tracing::info!(themes = catalog.len(), "catalog loaded");

    let caps = capability::probe_with_timeout(PROBE_TIMEOUT);
    tracing::info!(
        color = ?caps.color,
        glyphs = ?caps.glyphs,
        max_fps = caps.max_fps,
        "surface capabilities"
    );

    let mut controller =
        controller::AdaptiveController::new(Arc::clone(&catalog), caps, config.transition)?;
    let selection = controller.selection_handle();

    // Initial selection from config: explicit theme if set, the declared
    // profile otherwise.
    let mut ctx = SelectionContext::new(config.profile.to_profile());
    if let Some(hour) = config.time_of_day {
        ctx.time_of_day = TimeOfDay::from_hour(hour);
    }
    if let Some(id) = &config.theme {
        ctx = ctx.with_explicit_theme(id.clone());
    }
    if let Some(intention) = &config.profile.intention {
        ctx = ctx.with_intention(intention.clone());
    }
    selection.request_selection(ctx);

    // Telemetry: the demo script in demo mode, otherwise an external
    // producer writes into the same slot.
    let signal_slot = signals::shared_signal();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let demo_handle = if config.demo_mode {
        tracing::info!("running in DEMO MODE - scripted telemetry walk");
        let slot = Arc::clone(&signal_slot);
        let handle = selection.clone();
        Some(tokio::spawn(async move {
            demo::run_demo(slot, handle, shutdown_rx).await;
        }))
    } else {
        drop(shutdown_rx);
        None
    };

    // Render loop: the probe's sustainable rate, capped by config, but at
    // least 1 so transitions and signals still advance when animation is off.
    let fps = caps.max_fps.clamp(1, config.fps_cap);
    let mut ticker = tokio::time::interval(Duration::from_millis(1000 / fps as u64));
    tracing::info!(fps, "render loop starting, ctrl-c to exit");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
            _ = ticker.tick() => {
                let signal = signals::latest(&signal_slot);
                let snapshot = controller.tick(Instant::now(), signal.as_ref());
                print_preview(&snapshot);
            }
        }
    }

    let _ = shutdown_tx.send(());
    if let Some(handle) = demo_handle {
        handle.abort();
    }
    println!();

    Ok(())
}

/// Render one snapshot as a single ANSI status line, overwriting in place.
///
/// This is a stand-in for a real front-end: it demonstrates concrete colors
/// at every depth tier without doing any layout of its own.
fn print_preview(snapshot: &RenderSnapshot) {
    let theme = &snapshot.theme;

    let state_role = snapshot.state.map(|s| s.role_name()).unwrap_or("foreground");
    let state_label = snapshot.state.map(|s| s.role_name()).unwrap_or("-");
    let state_color = sgr(theme.color(state_role).unwrap_or(ConcreteColor::Default));
    let header_color = sgr(theme.color("header").unwrap_or(ConcreteColor::Default));
    let safety_role = match snapshot.safety {
        signals::SafetyLevel::Normal => "safe",
        signals::SafetyLevel::Caution => "caution",
        signals::SafetyLevel::Emergency => "critical",
    };
    let safety_color = sgr(theme.color(safety_role).unwrap_or(ConcreteColor::Default));

    let focus = theme.glyph("focus").unwrap_or("o");
    let bar = progress_bar(theme, snapshot.progress);

    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        "\r\x1b[2K{header_color}{focus} {name}\x1b[0m  {state_color}{state_label}\x1b[0m  \
         {safety_color}{safety}\x1b[0m  {phase:?} {bar}",
        name = theme.name,
        safety = snapshot.safety.as_str(),
        phase = snapshot.phase,
    );
    let _ = out.flush();
}

/// Transition progress as a ten-cell bar in the theme's own glyphs.
fn progress_bar(theme: &resolve::EffectiveTheme, progress: f64) -> String {
    let full = theme.glyph("progress_full").unwrap_or("#");
    let empty = theme.glyph("progress_empty").unwrap_or("-");
    let filled = (progress.clamp(0.0, 1.0) * 10.0).round() as usize;
    let mut bar = String::new();
    for i in 0..10 {
        bar.push_str(if i < filled { full } else { empty });
    }
    bar
}

/// SGR foreground escape for a concrete color.
fn sgr(color: ConcreteColor) -> String {
    match color {
        ConcreteColor::Rgb(r, g, b) => format!("\x1b[38;2;{r};{g};{b}m"),
        ConcreteColor::Indexed(i) => format!("\x1b[38;5;{i}m"),
        ConcreteColor::Named(ansi) => format!("\x1b[{}m", ansi.sgr_fg()),
        ConcreteColor::Default => "\x1b[39m".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capability::ColorDepth;
    use theme::AnsiColor;

    #[test]
    fn sgr_covers_every_depth_tier() {
        assert_eq!(sgr(ConcreteColor::Rgb(255, 135, 0)), "\x1b[38;2;255;135;0m");
        assert_eq!(sgr(ConcreteColor::Indexed(208)), "\x1b[38;5;208m");
        assert_eq!(sgr(ConcreteColor::Named(AnsiColor::BrightYellow)), "\x1b[93m");
        assert_eq!(sgr(ConcreteColor::Default), "\x1b[39m");
    }

    #[test]
    fn progress_bar_uses_theme_glyphs() {
        let theme = resolve::EffectiveTheme {
            id: "t".into(),
            name: "t".into(),
            color_depth: ColorDepth::Ansi16,
            glyph_tier: capability::GlyphTier::Ascii,
            fps: 0,
            animations_enabled: false,
            curve: theme::TimingCurve::Linear,
            effects: Vec::new(),
            colors: Vec::new(),
            glyphs: vec![
                ("progress_full".into(), "#".into()),
                ("progress_empty".into(), ".".into()),
            ],
        };
        assert_eq!(progress_bar(&theme, 0.5), "#####.....");
        assert_eq!(progress_bar(&theme, 1.0), "##########");
    }
}
