//! High Contrast - the designated safety and accessibility theme
//!
//! The controller resolves this theme eagerly at startup and switches to it
//! on an emergency signal, so it must render everywhere: ascii glyphs,
//! 16-color palette, no animation.

pub const THEME: &str = r##"# High Contrast theme for attune
# Maximum-visibility safety theme; must render on any surface

[meta]
id = "high-contrast"
name = "High Contrast"
version = 1
author = "attune"
category = "accessibility"
level = "beginner"

[palette]
background = { rgb = "#000000", indexed = 16, ansi = "black" }
foreground = { rgb = "#ffffff", indexed = 231, ansi = "bright-white" }
header = { rgb = "#ffffff", indexed = 231, ansi = "bright-white" }
accent = { rgb = "#ffff00", indexed = 226, ansi = "bright-yellow" }
gentle = { rgb = "#ffffff", indexed = 231, ansi = "bright-white" }
emphasis = { rgb = "#ffff00", indexed = 226, ansi = "bright-yellow" }
deep_delta = { rgb = "#5fafff", indexed = 75, ansi = "bright-blue" }
delta = { rgb = "#5fafff", indexed = 75, ansi = "bright-blue" }
theta = { rgb = "#00ff00", indexed = 46, ansi = "bright-green" }
alpha = { rgb = "#ffff00", indexed = 226, ansi = "bright-yellow" }
beta = { rgb = "#ff5f5f", indexed = 203, ansi = "bright-red" }
gamma = { rgb = "#ff5fff", indexed = 207, ansi = "bright-magenta" }
safe = { rgb = "#00ff00", indexed = 46, ansi = "bright-green" }
caution = { rgb = "#ffff00", indexed = 226, ansi = "bright-yellow" }
danger = { rgb = "#ff0000", indexed = 196, ansi = "bright-red" }
critical = { rgb = "#ff0000", indexed = 196, ansi = "bright-red" }

[symbols]
focus = { glyph = "O", ascii = "O" }
wave = { glyph = "~", ascii = "~" }
phi = { glyph = "PHI", ascii = "PHI" }
spark = { glyph = "!", ascii = "!" }
progress_full = { glyph = "#", ascii = "#" }
progress_empty = { glyph = "-", ascii = "-" }

[animation]
fps = 0
enabled = false
curve = "linear"

[requires]
color = "ansi16"
glyphs = "ascii"
"##;
