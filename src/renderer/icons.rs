use resvg::usvg::{Options, Tree};

use super::Result;
use crate::reaction::Reaction;

/// Side length a glyph is drawn at inside its cell, in logical pixels
pub const GLYPH_SIZE: f32 = 40.0;

/// Parsed glyph of every reaction, ready to rasterize
pub struct GlyphSet {
    trees: [Tree; 3],
}

impl GlyphSet {
    pub fn new() -> Result<Self> {
        let [thumb, heart, clap] = Reaction::ALL;
        Ok(Self {
            trees: [parse(thumb)?, parse(heart)?, parse(clap)?],
        })
    }

    pub fn get(&self, reaction: Reaction) -> &Tree {
        &self.trees[reaction.index()]
    }

    /// Factor that maps the glyph's own units onto [`GLYPH_SIZE`]
    pub fn unit_scale(&self, reaction: Reaction) -> f32 {
        let size = self.get(reaction).size();
        GLYPH_SIZE / size.width().max(size.height())
    }
}

fn parse(reaction: Reaction) -> Result<Tree> {
    let svg = reaction.glyph_svg();
    let tree = Tree::from_data(svg.as_bytes(), &Options::default())?;
    log::debug!(
        "Parsed {} glyph ({}x{})",
        reaction,
        tree.size().width(),
        tree.size().height()
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_glyph_parses() {
        let glyphs = GlyphSet::new().expect("glyphs should parse");
        for reaction in Reaction::ALL {
            assert_eq!(glyphs.get(reaction).size().width(), 24.0);
            assert!((glyphs.unit_scale(reaction) - GLYPH_SIZE / 24.0).abs() < 1e-6);
        }
    }
}
