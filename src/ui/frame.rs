//! Layout of a title and a display text as positioned glyphs

use super::font::{Glyph, Text, GLYPH_GAP};

/// Blank rows between the title and the display text
pub const ROW_GAP: u16 = 1;

/// A glyph at a cell offset relative to the frame's top-left corner
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub glyph: &'static Glyph,
}

/// Everything the renderer needs for one redraw
#[derive(Debug, Clone)]
pub struct Frame {
    title: String,
    text: String,
    placements: Vec<Placement>,
    width: u16,
    height: u16,
}

impl Frame {
    /// Stack `title` above `body`, each centered within the combined box
    pub fn compose(title: &Text, body: &Text) -> Self {
        let width = title.width().max(body.width());
        let gap = if title.height() > 0 && body.height() > 0 {
            ROW_GAP
        } else {
            0
        };
        let height = title.height() + gap + body.height();

        let mut placements = Vec::with_capacity(title.glyphs().len() + body.glyphs().len());
        place_line(&mut placements, title, (width - title.width()) / 2, 0);
        place_line(
            &mut placements,
            body,
            (width - body.width()) / 2,
            title.height() + gap,
        );

        Self {
            title: title.as_str().to_string(),
            text: body.as_str().to_string(),
            placements,
            width,
            height,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Bounding box as (width, height) in cells
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Top-left corner that centers the frame on a `cols` x `rows` screen
    pub fn origin_on(&self, cols: u16, rows: u16) -> (u16, u16) {
        (
            cols.saturating_sub(self.width) / 2,
            rows.saturating_sub(self.height) / 2,
        )
    }
}

fn place_line(out: &mut Vec<Placement>, line: &Text, x0: u16, y: u16) {
    let mut x = x0;
    for &glyph in line.glyphs() {
        out.push(Placement { x, y, glyph });
        x = x.saturating_add(glyph.width() + GLYPH_GAP);
    }
}
