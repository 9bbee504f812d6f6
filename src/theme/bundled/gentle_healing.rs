//! Gentle Healing - soft greens for sensitive sessions

pub const THEME: &str = r##"# Gentle Healing theme for attune
# Soft, low-intensity greens for sensitive neural profiles

[meta]
id = "gentle-healing"
name = "Gentle Healing"
version = 1
author = "attune"
category = "healing"
level = "beginner"
accessible_variant = "high-contrast"

[palette]
background = { rgb = "#101810", indexed = 232, ansi = "black" }
foreground = { rgb = "#c8d8c8", indexed = 251, ansi = "white" }
header = { rgb = "#5faf87", indexed = 72, ansi = "cyan" }
accent = { rgb = "#87d7af", indexed = 115, ansi = "bright-green" }
gentle = { rgb = "#a8b8a8", indexed = 248, ansi = "white" }
emphasis = { rgb = "#d7d787", indexed = 186, ansi = "yellow" }
deep_delta = { rgb = "#1c3947", indexed = 23, ansi = "blue" }
delta = { rgb = "#3f5f8f", indexed = 61, ansi = "blue" }
theta = { rgb = "#4f9f6f", indexed = 71, ansi = "green" }
alpha = { rgb = "#cf9f5f", indexed = 179, ansi = "yellow" }
beta = { rgb = "#cf6f5f", indexed = 173, ansi = "red" }
gamma = { rgb = "#8f6fbf", indexed = 103, ansi = "magenta" }
safe = { rgb = "#00af5f", indexed = 35, ansi = "green" }
caution = { rgb = "#d7af5f", indexed = 179, ansi = "yellow" }
danger = { rgb = "#d75f5f", indexed = 167, ansi = "red" }
critical = { rgb = "#ff5f5f", indexed = 203, ansi = "bright-red" }

[symbols]
focus = { glyph = "❁", simple = "●", ascii = "o" }
wave = { glyph = "∿", simple = "~", ascii = "~" }
phi = { glyph = "Φ", ascii = "PHI" }
spark = { glyph = "✧", simple = "+", ascii = "+" }
progress_full = { glyph = "▓", simple = "#", ascii = "#" }
progress_empty = { glyph = "░", simple = ".", ascii = "." }

[animation]
fps = 3
curve = "smoothstep"

[[animation.effects]]
name = "breath"
color = "background"

[requires]
color = "ansi256"
glyphs = "unicode-basic"
"##;
