//! Sacred Geometry - phi-centric palette for expert visualization

pub const THEME: &str = r##"# Sacred Geometry theme for attune
# Golden-ratio purples and golds, full-glyph geometry set

[meta]
id = "sacred-geometry"
name = "Sacred Geometry"
version = 1
author = "attune"
category = "meditation"
level = "expert"
accessible_variant = "high-contrast"

[palette]
background = { rgb = "#120a1a", indexed = 232, ansi = "black" }
foreground = { rgb = "#e0d8e8", indexed = 254, ansi = "bright-white" }
header = { rgb = "#af00ff", indexed = 129, ansi = "bright-magenta" }
accent = { rgb = "#ffaf00", indexed = 214, ansi = "bright-yellow" }
gentle = { rgb = "#b0a8b8", indexed = 247, ansi = "white" }
emphasis = { rgb = "#ffd700", indexed = 220, ansi = "bright-yellow" }
deep_delta = { rgb = "#00005f", indexed = 17, ansi = "blue" }
delta = { rgb = "#3030c0", indexed = 20, ansi = "bright-blue" }
theta = { rgb = "#00875f", indexed = 29, ansi = "green" }
alpha = { rgb = "#ff8700", indexed = 208, ansi = "yellow" }
beta = { rgb = "#ff4545", indexed = 196, ansi = "red" }
gamma = { rgb = "#9932cc", indexed = 93, ansi = "magenta" }
safe = { rgb = "#008700", indexed = 28, ansi = "green" }
caution = { rgb = "#ffd700", indexed = 220, ansi = "bright-yellow" }
danger = { rgb = "#ff0000", indexed = 196, ansi = "red" }
critical = { rgb = "#ff3333", indexed = 9, ansi = "bright-red" }

[symbols]
focus = { glyph = "✡", simple = "●", ascii = "o" }
wave = { glyph = "∿", simple = "~", ascii = "~" }
phi = { glyph = "Φ", ascii = "PHI" }
spark = { glyph = "✦", simple = "*", ascii = "*" }
progress_full = { glyph = "◆", simple = "#", ascii = "#" }
progress_empty = { glyph = "◇", simple = ".", ascii = "." }

[animation]
fps = 8
curve = "golden-ratio"

[[animation.effects]]
name = "spiral"
symbol = "phi"

[[animation.effects]]
name = "pulse"
color = "accent"

[requires]
color = "truecolor"
glyphs = "unicode-full"
"##;
