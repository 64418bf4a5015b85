//! Block font used for titles and the countdown digits

use crate::error::SectionFault;

/// Rows in every glyph
pub const GLYPH_HEIGHT: u16 = 5;
/// Blank columns between adjacent glyphs
pub const GLYPH_GAP: u16 = 1;

/// One character drawn as rows of `#` (ink) and ` ` (blank)
#[derive(Debug, PartialEq, Eq)]
pub struct Glyph(pub [&'static str; GLYPH_HEIGHT as usize]);

impl Glyph {
    pub fn width(&self) -> u16 {
        self.0[0].len() as u16
    }

    pub fn rows(&self) -> &[&'static str] {
        &self.0
    }
}

static GLYPH_A: Glyph = Glyph([" ### ", "#   #", "#####", "#   #", "#   #"]);
static GLYPH_B: Glyph = Glyph(["#### ", "#   #", "#### ", "#   #", "#### "]);
static GLYPH_C: Glyph = Glyph([" ####", "#    ", "#    ", "#    ", " ####"]);
static GLYPH_D: Glyph = Glyph(["#### ", "#   #", "#   #", "#   #", "#### "]);
static GLYPH_E: Glyph = Glyph(["#####", "#    ", "#### ", "#    ", "#####"]);
static GLYPH_F: Glyph = Glyph(["#####", "#    ", "#### ", "#    ", "#    "]);
static GLYPH_G: Glyph = Glyph([" ####", "#    ", "#  ##", "#   #", " ####"]);
static GLYPH_H: Glyph = Glyph(["#   #", "#   #", "#####", "#   #", "#   #"]);
static GLYPH_I: Glyph = Glyph(["#####", "  #  ", "  #  ", "  #  ", "#####"]);
static GLYPH_J: Glyph = Glyph(["#####", "   # ", "   # ", "#  # ", " ##  "]);
static GLYPH_K: Glyph = Glyph(["#   #", "#  # ", "###  ", "#  # ", "#   #"]);
static GLYPH_L: Glyph = Glyph(["#    ", "#    ", "#    ", "#    ", "#####"]);
static GLYPH_M: Glyph = Glyph(["#   #", "## ##", "# # #", "#   #", "#   #"]);
static GLYPH_N: Glyph = Glyph(["#   #", "##  #", "# # #", "#  ##", "#   #"]);
static GLYPH_O: Glyph = Glyph([" ### ", "#   #", "#   #", "#   #", " ### "]);
static GLYPH_P: Glyph = Glyph(["#### ", "#   #", "#### ", "#    ", "#    "]);
static GLYPH_Q: Glyph = Glyph([" ### ", "#   #", "# # #", "#  # ", " ## #"]);
static GLYPH_R: Glyph = Glyph(["#### ", "#   #", "#### ", "#  # ", "#   #"]);
static GLYPH_S: Glyph = Glyph([" ####", "#    ", " ### ", "    #", "#### "]);
static GLYPH_T: Glyph = Glyph(["#####", "  #  ", "  #  ", "  #  ", "  #  "]);
static GLYPH_U: Glyph = Glyph(["#   #", "#   #", "#   #", "#   #", " ### "]);
static GLYPH_V: Glyph = Glyph(["#   #", "#   #", "#   #", " # # ", "  #  "]);
static GLYPH_W: Glyph = Glyph(["#   #", "#   #", "# # #", "## ##", "#   #"]);
static GLYPH_X: Glyph = Glyph(["#   #", " # # ", "  #  ", " # # ", "#   #"]);
static GLYPH_Y: Glyph = Glyph(["#   #", " # # ", "  #  ", "  #  ", "  #  "]);
static GLYPH_Z: Glyph = Glyph(["#####", "   # ", "  #  ", " #   ", "#####"]);

static GLYPH_0: Glyph = Glyph([" ### ", "#  ##", "# # #", "##  #", " ### "]);
static GLYPH_1: Glyph = Glyph(["  #  ", " ##  ", "  #  ", "  #  ", " ### "]);
static GLYPH_2: Glyph = Glyph([" ### ", "#   #", "  ## ", " #   ", "#####"]);
static GLYPH_3: Glyph = Glyph(["#### ", "    #", " ### ", "    #", "#### "]);
static GLYPH_4: Glyph = Glyph(["#   #", "#   #", "#####", "    #", "    #"]);
static GLYPH_5: Glyph = Glyph(["#####", "#    ", "#### ", "    #", "#### "]);
static GLYPH_6: Glyph = Glyph([" ### ", "#    ", "#### ", "#   #", " ### "]);
static GLYPH_7: Glyph = Glyph(["#####", "    #", "   # ", "  #  ", "  #  "]);
static GLYPH_8: Glyph = Glyph([" ### ", "#   #", " ### ", "#   #", " ### "]);
static GLYPH_9: Glyph = Glyph([" ### ", "#   #", " ####", "    #", " ### "]);

static GLYPH_COLON: Glyph = Glyph(["   ", " # ", "   ", " # ", "   "]);
static GLYPH_SPACE: Glyph = Glyph(["   ", "   ", "   ", "   ", "   "]);
static GLYPH_DASH: Glyph = Glyph(["     ", "     ", " ### ", "     ", "     "]);
static GLYPH_UNDERSCORE: Glyph = Glyph(["     ", "     ", "     ", "     ", "#####"]);

/// Look up the glyph for a character; lowercase letters share the uppercase glyph
pub fn glyph(c: char) -> Option<&'static Glyph> {
    let g = match c.to_ascii_uppercase() {
        'A' => &GLYPH_A,
        'B' => &GLYPH_B,
        'C' => &GLYPH_C,
        'D' => &GLYPH_D,
        'E' => &GLYPH_E,
        'F' => &GLYPH_F,
        'G' => &GLYPH_G,
        'H' => &GLYPH_H,
        'I' => &GLYPH_I,
        'J' => &GLYPH_J,
        'K' => &GLYPH_K,
        'L' => &GLYPH_L,
        'M' => &GLYPH_M,
        'N' => &GLYPH_N,
        'O' => &GLYPH_O,
        'P' => &GLYPH_P,
        'Q' => &GLYPH_Q,
        'R' => &GLYPH_R,
        'S' => &GLYPH_S,
        'T' => &GLYPH_T,
        'U' => &GLYPH_U,
        'V' => &GLYPH_V,
        'W' => &GLYPH_W,
        'X' => &GLYPH_X,
        'Y' => &GLYPH_Y,
        'Z' => &GLYPH_Z,
        '0' => &GLYPH_0,
        '1' => &GLYPH_1,
        '2' => &GLYPH_2,
        '3' => &GLYPH_3,
        '4' => &GLYPH_4,
        '5' => &GLYPH_5,
        '6' => &GLYPH_6,
        '7' => &GLYPH_7,
        '8' => &GLYPH_8,
        '9' => &GLYPH_9,
        ':' => &GLYPH_COLON,
        ' ' => &GLYPH_SPACE,
        '-' => &GLYPH_DASH,
        '_' => &GLYPH_UNDERSCORE,
        _ => return None,
    };
    Some(g)
}

/// A string converted to glyphs
#[derive(Debug, Clone)]
pub struct Text {
    source: String,
    glyphs: Vec<&'static Glyph>,
    width: u16,
}

impl Text {
    /// Fails on a character with no glyph, or when the drawn text would be
    /// wider than a terminal coordinate can address.
    pub fn new(s: &str) -> Result<Self, SectionFault> {
        let glyphs = s
            .chars()
            .map(|c| glyph(c).ok_or(SectionFault::Glyph(c)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut width: u16 = 0;
        for (i, g) in glyphs.iter().enumerate() {
            let gap = if i == 0 { 0 } else { GLYPH_GAP };
            width = width
                .checked_add(gap)
                .and_then(|w| w.checked_add(g.width()))
                .ok_or(SectionFault::TooWide(glyphs.len()))?;
        }

        Ok(Self {
            source: s.to_string(),
            glyphs,
            width,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn glyphs(&self) -> &[&'static Glyph] {
        &self.glyphs
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        if self.glyphs.is_empty() {
            0
        } else {
            GLYPH_HEIGHT
        }
    }
}
