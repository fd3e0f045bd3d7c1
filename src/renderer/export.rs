use std::path::Path;

use resvg::tiny_skia::Pixmap;

use super::Result;

/// Convert a premultiplied pixmap into a straight-alpha image
pub fn to_image(pixmap: &Pixmap) -> image::RgbaImage {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    // Four bytes per pixel always fill the buffer exactly
    image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| image::RgbaImage::new(pixmap.width(), pixmap.height()))
}

/// Write `pixmap` to `path` as a PNG
pub fn save_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    to_image(pixmap).save_with_format(path, image::ImageFormat::Png)?;
    log::info!("Saved frame to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::Color;

    #[test]
    fn test_to_image_demultiplies() {
        let mut pixmap = Pixmap::new(2, 1).expect("pixmap");
        pixmap.fill(Color::from_rgba8(255, 0, 0, 128));

        let image = to_image(&pixmap);
        assert_eq!(image.dimensions(), (2, 1));
        let pixel = image.get_pixel(1, 0);
        assert_eq!(pixel[3], 128);
        assert!(pixel[0] >= 254);
        assert_eq!(pixel[1], 0);
    }
}
