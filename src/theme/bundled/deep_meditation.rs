//! Deep Meditation - near-still indigo for long sits

pub const THEME: &str = r##"# Deep Meditation theme for attune
# Near-still indigo palette, slow breathing animation only

[meta]
id = "deep-meditation"
name = "Deep Meditation"
version = 1
author = "attune"
category = "meditation"
level = "intermediate"
accessible_variant = "high-contrast"

[palette]
background = { rgb = "#070b14", indexed = 232, ansi = "black" }
foreground = { rgb = "#aab4c8", indexed = 249, ansi = "white" }
header = { rgb = "#5f87af", indexed = 67, ansi = "blue" }
accent = { rgb = "#5f5faf", indexed = 61, ansi = "magenta" }
gentle = { rgb = "#8a94a8", indexed = 245, ansi = "white" }
emphasis = { rgb = "#afaf87", indexed = 144, ansi = "yellow" }
deep_delta = { rgb = "#00005f", indexed = 17, ansi = "blue" }
delta = { rgb = "#00008f", indexed = 18, ansi = "blue" }
theta = { rgb = "#005f5f", indexed = 23, ansi = "cyan" }
alpha = { rgb = "#875f00", indexed = 94, ansi = "yellow" }
beta = { rgb = "#875f5f", indexed = 95, ansi = "red" }
gamma = { rgb = "#5f0087", indexed = 54, ansi = "magenta" }
safe = { rgb = "#005f00", indexed = 22, ansi = "green" }
caution = { rgb = "#af8700", indexed = 136, ansi = "yellow" }
danger = { rgb = "#af0000", indexed = 124, ansi = "red" }
critical = { rgb = "#ff3333", indexed = 9, ansi = "bright-red" }

[symbols]
focus = { glyph = "☉", simple = "●", ascii = "o" }
wave = { glyph = "∿", simple = "~", ascii = "~" }
phi = { glyph = "Φ", ascii = "PHI" }
spark = { glyph = "·", simple = ".", ascii = "." }
progress_full = { glyph = "▪", simple = "#", ascii = "#" }
progress_empty = { glyph = "▫", simple = ".", ascii = "." }

[animation]
fps = 2
curve = "smoothstep"

[[animation.effects]]
name = "breath"
color = "background"

[requires]
color = "ansi256"
glyphs = "unicode-full"
"##;
