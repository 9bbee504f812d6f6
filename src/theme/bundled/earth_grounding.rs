//! Earth Grounding - warm browns and Schumann greens

pub const THEME: &str = r##"# Earth Grounding theme for attune
# Warm earth tones anchored by Schumann-resonance greens

[meta]
id = "earth-grounding"
name = "Earth Grounding"
version = 1
author = "attune"
category = "grounding"
level = "beginner"
accessible_variant = "high-contrast"

[palette]
background = { rgb = "#171207", indexed = 232, ansi = "black" }
foreground = { rgb = "#d8cbb0", indexed = 251, ansi = "white" }
header = { rgb = "#00af00", indexed = 34, ansi = "green" }
accent = { rgb = "#af8700", indexed = 136, ansi = "yellow" }
gentle = { rgb = "#a89878", indexed = 246, ansi = "white" }
emphasis = { rgb = "#ffaf00", indexed = 214, ansi = "bright-yellow" }
deep_delta = { rgb = "#002b36", indexed = 23, ansi = "blue" }
delta = { rgb = "#30567f", indexed = 60, ansi = "blue" }
theta = { rgb = "#42824a", indexed = 65, ansi = "green" }
alpha = { rgb = "#c78a3b", indexed = 172, ansi = "yellow" }
beta = { rgb = "#b05442", indexed = 131, ansi = "red" }
gamma = { rgb = "#7a5da0", indexed = 97, ansi = "magenta" }
safe = { rgb = "#008700", indexed = 28, ansi = "green" }
caution = { rgb = "#d7af00", indexed = 178, ansi = "yellow" }
danger = { rgb = "#d70000", indexed = 160, ansi = "red" }
critical = { rgb = "#ff3333", indexed = 9, ansi = "bright-red" }

[symbols]
focus = { glyph = "⏣", simple = "●", ascii = "o" }
wave = { glyph = "∿", simple = "~", ascii = "~" }
phi = { glyph = "Φ", ascii = "PHI" }
spark = { glyph = "❖", simple = "+", ascii = "+" }
progress_full = { glyph = "▓", simple = "#", ascii = "#" }
progress_empty = { glyph = "░", simple = ".", ascii = "." }

[animation]
fps = 4
curve = "golden-ratio"

[[animation.effects]]
name = "breath"
color = "background"

[[animation.effects]]
name = "pulse"
color = "header"

[requires]
color = "ansi256"
glyphs = "unicode-basic"
"##;
