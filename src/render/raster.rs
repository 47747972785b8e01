use std::{path::Path, sync::Arc};

use crate::{
    foundation::error::{CountdownError, CountdownResult},
    layers::ProgressLayers,
    render::svg::frame_svg,
    widget::FrameSnapshot,
};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as `[r, g, b, a]`, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = self.data.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Convert premultiplied pixels to straight alpha in place.
    pub fn demultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }
}

/// SVG rasterizer with a font database resolved once up front.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_faces", &self.fontdb.faces().count())
            .finish()
    }
}

impl Rasterizer {
    /// Rasterizer using system fonts plus any `.ttf`/`.otf`/`.ttc` files in `font_dirs`.
    pub fn new<P: AsRef<Path>>(font_dirs: impl IntoIterator<Item = P>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        tracing::debug!(faces = db.faces().count(), "font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Rasterizer with system fonts only.
    pub fn with_system_fonts() -> Self {
        Self::new(std::iter::empty::<&Path>())
    }

    /// Render one widget frame.
    #[tracing::instrument(skip_all, fields(t = frame.time_secs))]
    pub fn render(&self, layers: &ProgressLayers, frame: &FrameSnapshot) -> CountdownResult<FrameRGBA> {
        self.render_svg(&frame_svg(layers, frame))
    }

    /// Parse and rasterize an SVG document at its intrinsic size.
    pub fn render_svg(&self, svg: &str) -> CountdownResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| CountdownError::render(format!("parse svg: {e}")))?;

        let size = tree.size().to_int_size();
        let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| CountdownError::render("failed to allocate frame pixmap"))?;
        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(FrameRGBA {
            width: pixmap.width(),
            height: pixmap.height(),
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

/// Write `frame` as a PNG, creating parent directories as needed.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> CountdownResult<()> {
    let mut straight = frame.clone();
    straight.demultiply();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CountdownError::render(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }

    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| CountdownError::render(format!("write png '{}': {e}", path.display())))
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), "skipping font: {e}");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
