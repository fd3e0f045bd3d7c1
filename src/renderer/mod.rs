//! Software rendering of the reaction bar.
//!
//! Every frame is rasterized on the CPU with `resvg`: the capsule first, then
//! each glyph through the transform its view sampled on the last frame.

mod export;
mod icons;

pub use export::{save_png, to_image};
pub use icons::{GlyphSet, GLYPH_SIZE};

use resvg::tiny_skia::Pixmap;
use resvg::usvg::{Options, Tree};
use thiserror::Error;

use crate::color::Color;
use crate::layout::Rect;
use crate::reaction::ReactionBar;
use crate::transform::Transform;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to parse SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("Cannot allocate a {width}x{height} pixmap")]
    PixmapSize { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Fill behind the whole canvas
pub const BACKGROUND: Color = Color::WHITE;
/// Thin-material grey of the capsule
pub const CAPSULE_FILL: Color = Color::rgba(0.898, 0.898, 0.918, 0.9);

/// Rasterizes a [`ReactionBar`] into pixmaps.
pub struct Renderer {
    scale_factor: f32,
    glyphs: GlyphSet,
}

impl Renderer {
    /// A renderer producing `scale_factor` device pixels per logical pixel
    pub fn new(scale_factor: f32) -> Result<Self> {
        Ok(Self {
            scale_factor: scale_factor.max(0.1),
            glyphs: GlyphSet::new()?,
        })
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Pixmap dimensions for a canvas of the given logical size
    pub fn pixel_size(&self, canvas: Rect) -> (u32, u32) {
        (
            (canvas.width * self.scale_factor).ceil() as u32,
            (canvas.height * self.scale_factor).ceil() as u32,
        )
    }

    /// Draw the bar as it was left by its last frame
    pub fn render(&self, bar: &ReactionBar) -> Result<Pixmap> {
        let layout = bar.layout();
        let (width, height) = self.pixel_size(layout.canvas);
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::PixmapSize { width, height })?;

        let [r, g, b, a] = BACKGROUND.to_rgba8();
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));

        let device = Transform::scale(self.scale_factor);

        let capsule = capsule_tree(layout.capsule)?;
        let at_capsule = device.then(&Transform::translate(layout.capsule.x, layout.capsule.y));
        resvg::render(&capsule, at_capsule.to_skia(), &mut pixmap.as_mut());

        for view in bar.views() {
            let reaction = view.reaction();
            let (cx, cy) = layout.cell(reaction).center();
            let half = GLYPH_SIZE / 2.0;

            // Glyph units -> centered on the origin -> animated -> cell center
            let glyph = device
                .then(&Transform::translate(cx, cy))
                .then(&view.transform())
                .then(&Transform::translate(-half, -half))
                .then(&Transform::scale(self.glyphs.unit_scale(reaction)));

            resvg::render(self.glyphs.get(reaction), glyph.to_skia(), &mut pixmap.as_mut());
        }

        Ok(pixmap)
    }
}

fn capsule_tree(rect: Rect) -> Result<Tree> {
    let [r, g, b, _] = CAPSULE_FILL.to_rgba8();
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" rx="{radius}" fill="rgb({r},{g},{b})" fill-opacity="{opacity}"/></svg>"#,
        w = rect.width,
        h = rect.height,
        radius = rect.height / 2.0,
        r = r,
        g = g,
        b = b,
        opacity = CAPSULE_FILL.a,
    );
    Ok(Tree::from_data(svg.as_bytes(), &Options::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::Reaction;

    #[test]
    fn test_pixel_size_follows_scale_factor() {
        let renderer = Renderer::new(2.0).expect("renderer");
        let canvas = Rect::new(0.0, 0.0, 100.0, 50.5);
        assert_eq!(renderer.pixel_size(canvas), (200, 101));
    }

    #[test]
    fn test_render_draws_capsule_and_glyphs() {
        let bar = ReactionBar::new();
        let renderer = Renderer::new(1.0).expect("renderer");
        let pixmap = renderer.render(&bar).expect("render");

        let layout = bar.layout();
        assert_eq!(
            (pixmap.width(), pixmap.height()),
            renderer.pixel_size(layout.canvas)
        );

        // Corner stays background
        let corner = pixmap.pixel(0, 0).expect("corner pixel").demultiply();
        assert_eq!(
            (corner.red(), corner.green(), corner.blue()),
            (255, 255, 255)
        );

        // Heart center is tinted red
        let (x, y) = layout.cell(Reaction::Heart).center();
        let center = pixmap
            .pixel(x as u32, y as u32)
            .expect("center pixel")
            .demultiply();
        assert!(center.red() > 200);
        assert!(center.green() < 120);
    }
}
