//! Consciousness Default - the flagship theme
//! Balanced state colors over a deep night-sky base

pub const THEME: &str = r##"# Consciousness Default theme for attune
# Balanced consciousness-aware palette on a deep night-sky base

[meta]
id = "consciousness-default"
name = "Consciousness Default"
version = 1
author = "attune"
category = "consciousness"
level = "beginner"
accessible_variant = "high-contrast"

[palette]
background = { rgb = "#0b0e1a", indexed = 233, ansi = "black" }
foreground = { rgb = "#d4d7e0", indexed = 253, ansi = "white" }
header = { rgb = "#00afff", indexed = 39, ansi = "bright-cyan" }
accent = { rgb = "#ff00ff", indexed = 201, ansi = "bright-magenta" }
gentle = { rgb = "#bcbcbc", indexed = 250, ansi = "white" }
emphasis = { rgb = "#ffff00", indexed = 226, ansi = "bright-yellow" }
deep_delta = { rgb = "#00005f", indexed = 17, ansi = "blue" }
delta = { rgb = "#2e4fd8", indexed = 21, ansi = "bright-blue" }
theta = { rgb = "#00875f", indexed = 29, ansi = "green" }
alpha = { rgb = "#ff8700", indexed = 208, ansi = "yellow" }
beta = { rgb = "#ff4040", indexed = 196, ansi = "red" }
gamma = { rgb = "#8700ff", indexed = 93, ansi = "magenta" }
safe = { rgb = "#008700", indexed = 28, ansi = "green" }
caution = { rgb = "#ffd700", indexed = 220, ansi = "bright-yellow" }
danger = { rgb = "#ff0000", indexed = 196, ansi = "red" }
critical = { rgb = "#ff3333", indexed = 9, ansi = "bright-red" }

[symbols]
focus = { glyph = "◉", simple = "●", ascii = "o" }
wave = { glyph = "∿", simple = "~", ascii = "~" }
phi = { glyph = "Φ", ascii = "PHI" }
spark = { glyph = "✦", simple = "*", ascii = "*" }
progress_full = { glyph = "█", simple = "#", ascii = "#" }
progress_empty = { glyph = "░", simple = ".", ascii = "." }

[animation]
fps = 6
curve = "golden-ratio"

[[animation.effects]]
name = "breath"
color = "background"

[[animation.effects]]
name = "pulse"
color = "accent"

[[animation.effects]]
name = "shimmer"
symbol = "spark"

[requires]
color = "truecolor"
glyphs = "unicode-full"
"##;
