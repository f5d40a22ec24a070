use std::path::Path;

use anyhow::Context as _;

use crate::error::{RaceChartError, RaceChartResult};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy, which is what PNG expects.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = false;
        }
        self
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Parses the SVG with system fonts loaded and rasterizes it at its own size.
pub fn rasterize_svg(svg: &str) -> RaceChartResult<FrameRGBA> {
    let mut opts = usvg::Options::default();
    opts.font_family = "sans-serif".to_string();
    opts.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| RaceChartError::render(format!("parse svg: {e}")))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| RaceChartError::render("failed to allocate chart pixmap"))?;

    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());
    tracing::debug!(
        width = size.width(),
        height = size.height(),
        fonts = tree.fontdb().len(),
        "svg rasterized"
    );

    Ok(FrameRGBA {
        width: size.width(),
        height: size.height(),
        data: pixmap.take(),
        premultiplied: true,
    })
}

pub fn write_png(frame: FrameRGBA, path: &Path) -> RaceChartResult<()> {
    let frame = frame.into_straight();
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
