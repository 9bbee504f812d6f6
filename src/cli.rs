// CLI module - command-line argument parsing and handlers
//
// Provides subcommands for inspection and configuration:
// - themes: list the catalog, or show one theme in full
// - probe: print the detected surface capabilities
// - config --show/--reset/--edit/--path: configuration management

use crate::capability::{self, RawCapabilityReport};
use crate::config::{Config, VERSION};
use crate::theme::ThemeCatalog;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// Attune - adaptive theme engine for consciousness telemetry
#[derive(Parser)]
#[command(name = "attune")]
#[command(version = VERSION)]
#[command(about = "Adaptive theme resolution and rendering engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available themes, or show one in detail
    Themes {
        /// Theme id to show in full
        #[arg(long)]
        show: Option<String>,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Probe the current surface and print its capability vector
    Probe {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Themes { show, json }) => {
            handle_themes(show.as_deref(), json);
            true
        }
        Some(Commands::Probe { json }) => {
            handle_probe(json);
            true
        }
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else {
                // No flag provided, show help
                println!("Usage: attune config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false, // No subcommand, run the engine
    }
}

fn handle_themes(show: Option<&str>, json: bool) {
    let catalog = match ThemeCatalog::load_default() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: theme catalog failed to load: {e}");
            std::process::exit(1);
        }
    };

    if let Some(id) = show {
        let Some(theme) = catalog.lookup(id) else {
            eprintln!("Error: no theme with id {id:?}");
            eprintln!("Run `attune themes` for the list.");
            std::process::exit(1);
        };
        if json {
            match serde_json::to_string_pretty(theme) {
                Ok(out) => println!("{out}"),
                Err(e) => eprintln!("Error: {e}"),
            }
        } else {
            println!("{} ({})", theme.name, theme.id);
            println!("  category: {}", theme.category.as_str());
            println!("  level:    {:?}", theme.level);
            println!("  requires: {:?} / {:?}", theme.requires.color, theme.requires.glyphs);
            println!(
                "  animation: {} fps, {:?}, {} effect(s)",
                theme.animation.fps,
                theme.animation.curve,
                theme.animation.effects.len()
            );
            println!("  palette roles:");
            for (role, color) in &theme.palette {
                let (r, g, b) = color.rgb;
                println!("    {role:<14} #{r:02x}{g:02x}{b:02x}  idx {:>3}  {:?}", color.indexed, color.ansi);
            }
            println!("  symbol roles:");
            for (role, spec) in &theme.symbols {
                println!("    {role:<14} {:?} -> {:?}", spec.glyph, spec.ascii);
            }
        }
        return;
    }

    if json {
        match serde_json::to_string_pretty(catalog.themes()) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("Error: {e}"),
        }
        return;
    }

    println!("Available themes ({}):", catalog.len());
    for theme in catalog.themes() {
        println!(
            "  {:<24} {:<14} {:?}",
            theme.id,
            theme.category.as_str(),
            theme.level
        );
    }
    println!();
    println!("Show one in full with `attune themes --show <id>`.");
}

fn handle_probe(json: bool) {
    let report = RawCapabilityReport::collect();
    let caps = capability::probe(&report);

    if json {
        let out = serde_json::json!({ "report": report, "capabilities": caps });
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Error: {e}"),
        }
        return;
    }

    println!("# Surface report");
    println!("term = {:?}", report.term);
    println!("colorterm = {:?}", report.colorterm);
    println!("lang = {:?}", report.lang);
    println!("tty = {}, size = {}x{}", report.is_tty, report.cols, report.rows);
    println!();
    println!("# Capability vector");
    println!("color = {:?}", caps.color);
    println!("glyphs = {:?}", caps.glyphs);
    println!("max_fps = {}", caps.max_fps);
    println!(
        "high_contrast = {}, reduce_motion = {}, screen_reader = {}",
        caps.high_contrast, caps.reduce_motion, caps.screen_reader
    );
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("{}", config.to_toml());

    // Show source info
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            eprintln!("Aborted.");
            return;
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return;
        }
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Write the commented template first so there is something to edit
    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created {} from the default template", path.display());
    }

    let fallback = if cfg!(windows) { "notepad" } else { "nano" };
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| fallback.to_string());

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {
            println!("Saved. Changes apply on the next attune start.");
        }
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR, or edit the file directly: {}", path.display());
            std::process::exit(1);
        }
    }
}
