//! Vibrant Transcendence - saturated violets for immersive sessions

pub const THEME: &str = r##"# Vibrant Transcendence theme for attune
# Rich, saturated violets and golds for resilient profiles

[meta]
id = "vibrant-transcendence"
name = "Vibrant Transcendence"
version = 1
author = "attune"
category = "transcendence"
level = "advanced"
accessible_variant = "high-contrast"

[palette]
background = { rgb = "#14081f", indexed = 232, ansi = "black" }
foreground = { rgb = "#e8dff0", indexed = 254, ansi = "bright-white" }
header = { rgb = "#af5fff", indexed = 135, ansi = "bright-magenta" }
accent = { rgb = "#ff5fd7", indexed = 206, ansi = "bright-magenta" }
gentle = { rgb = "#b8a8c8", indexed = 247, ansi = "white" }
emphasis = { rgb = "#ffd75f", indexed = 221, ansi = "bright-yellow" }
deep_delta = { rgb = "#1f0047", indexed = 17, ansi = "blue" }
delta = { rgb = "#4f2fbf", indexed = 56, ansi = "blue" }
theta = { rgb = "#00d787", indexed = 42, ansi = "bright-green" }
alpha = { rgb = "#ffaf00", indexed = 214, ansi = "bright-yellow" }
beta = { rgb = "#ff005f", indexed = 197, ansi = "bright-red" }
gamma = { rgb = "#af00ff", indexed = 129, ansi = "bright-magenta" }
safe = { rgb = "#00d700", indexed = 40, ansi = "bright-green" }
caution = { rgb = "#ffd700", indexed = 220, ansi = "bright-yellow" }
danger = { rgb = "#ff0000", indexed = 196, ansi = "red" }
critical = { rgb = "#ff3333", indexed = 9, ansi = "bright-red" }

[symbols]
focus = { glyph = "✺", simple = "●", ascii = "*" }
wave = { glyph = "∿", simple = "~", ascii = "~" }
phi = { glyph = "Φ", ascii = "PHI" }
spark = { glyph = "✦", simple = "*", ascii = "*" }
progress_full = { glyph = "█", simple = "#", ascii = "#" }
progress_empty = { glyph = "▒", simple = ".", ascii = "." }

[animation]
fps = 10
curve = "golden-ratio"

[[animation.effects]]
name = "pulse"
color = "accent"

[[animation.effects]]
name = "spiral"
symbol = "phi"

[[animation.effects]]
name = "shimmer"
symbol = "spark"

[requires]
color = "truecolor"
glyphs = "unicode-full"
"##;
