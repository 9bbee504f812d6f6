//! Minimal Focus - animation-free 16-color theme

pub const THEME: &str = r##"# Minimal Focus theme for attune
# Clean 16-color palette with no animation, for focus work and plain terminals

[meta]
id = "minimal-focus"
name = "Minimal Focus"
version = 1
author = "attune"
category = "grounding"
level = "intermediate"
accessible_variant = "high-contrast"

[palette]
background = { rgb = "#000000", indexed = 16, ansi = "black" }
foreground = { rgb = "#c0c0c0", indexed = 250, ansi = "white" }
header = { rgb = "#00cdcd", indexed = 44, ansi = "cyan" }
accent = { rgb = "#cdcd00", indexed = 184, ansi = "yellow" }
gentle = { rgb = "#808080", indexed = 244, ansi = "bright-black" }
emphasis = { rgb = "#ffff00", indexed = 226, ansi = "bright-yellow" }
deep_delta = { rgb = "#00008b", indexed = 18, ansi = "blue" }
delta = { rgb = "#0000cd", indexed = 20, ansi = "blue" }
theta = { rgb = "#00cd00", indexed = 40, ansi = "green" }
alpha = { rgb = "#cd8500", indexed = 172, ansi = "yellow" }
beta = { rgb = "#cd0000", indexed = 160, ansi = "red" }
gamma = { rgb = "#cd00cd", indexed = 164, ansi = "magenta" }
safe = { rgb = "#00cd00", indexed = 40, ansi = "green" }
caution = { rgb = "#cdcd00", indexed = 184, ansi = "yellow" }
danger = { rgb = "#cd0000", indexed = 160, ansi = "red" }
critical = { rgb = "#ff0000", indexed = 9, ansi = "bright-red" }

[symbols]
focus = { glyph = "o", ascii = "o" }
wave = { glyph = "~", ascii = "~" }
phi = { glyph = "PHI", ascii = "PHI" }
spark = { glyph = "*", ascii = "*" }
progress_full = { glyph = "#", ascii = "#" }
progress_empty = { glyph = ".", ascii = "." }

[animation]
fps = 0
enabled = false
curve = "linear"

[requires]
color = "ansi16"
glyphs = "ascii"
"##;
