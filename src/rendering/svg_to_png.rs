use crate::error::RenderError;
use crate::models::Dimensions;
use resvg::usvg::{self, Transform};
use std::io::Cursor;
use tiny_skia::Pixmap;

/// Rasterizes snapshot SVGs into PNG previews.
///
/// The SVG is scaled to fit the target while keeping its aspect ratio and
/// centered on the background color (white unless overridden).
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    background: tiny_skia::Color,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            background: tiny_skia::Color::WHITE,
        }
    }

    pub fn with_background(mut self, background: tiny_skia::Color) -> Self {
        self.background = background;
        self
    }

    /// Render SVG markup to an RGBA PNG of `target` size.
    pub fn render_to_png(
        &self,
        svg_data: &[u8],
        target: Dimensions,
    ) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.rasterize_svg(svg_data, target)?;
        let png = encode_png(target, pixmap.data())?;

        tracing::debug!(
            width = target.width,
            height = target.height,
            bytes = png.len(),
            "Rendered PNG preview"
        );
        Ok(png)
    }

    /// Like [`SvgRenderer::render_to_png`], but on the blocking thread pool.
    pub async fn render_in_background(
        &self,
        svg: String,
        target: Dimensions,
    ) -> Result<Vec<u8>, RenderError> {
        let renderer = *self;
        tokio::task::spawn_blocking(move || renderer.render_to_png(svg.as_bytes(), target))
            .await
            .map_err(|e| RenderError::Io(std::io::Error::other(e)))?
    }

    /// Parse and rasterize SVG to an RGBA pixmap
    fn rasterize_svg(&self, svg_data: &[u8], target: Dimensions) -> Result<Pixmap, RenderError> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let scale_x = target.width as f32 / svg_size.width();
        let scale_y = target.height as f32 / svg_size.height();
        let scale = scale_x.min(scale_y);

        let scaled_width = svg_size.width() * scale;
        let scaled_height = svg_size.height() * scale;
        let offset_x = (target.width as f32 - scaled_width) / 2.0;
        let offset_y = (target.height as f32 - scaled_height) / 2.0;

        let mut pixmap =
            Pixmap::new(target.width, target.height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(self.background);

        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode RGBA8 pixel data as a PNG.
///
/// With an opaque background, premultiplied and straight alpha coincide.
fn encode_png(target: Dimensions, rgba: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, target.width, target.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><g><path d="M0,0 L100,0 L100,100 L0,100 Z" fill="#FF0000" stroke="none" stroke-width="0.2"/></g></svg>"##;

    fn decode(png_bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(Cursor::new(png_bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn test_render_to_target_size() {
        let renderer = SvgRenderer::new();
        let png_bytes = renderer
            .render_to_png(SQUARE.as_bytes(), Dimensions::new(64, 32))
            .unwrap();

        let (info, _) = decode(&png_bytes);
        assert_eq!(info.width, 64);
        assert_eq!(info.height, 32);
        assert_eq!(info.color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_aspect_fit_leaves_white_margins() {
        let renderer = SvgRenderer::new();
        let png_bytes = renderer
            .render_to_png(SQUARE.as_bytes(), Dimensions::new(64, 32))
            .unwrap();

        let (info, buf) = decode(&png_bytes);
        // 100x100 scaled into 32x32, centered: columns 16..48 are red
        assert_eq!(pixel(&buf, info.width, 2, 16), [255, 255, 255, 255]);
        assert_eq!(pixel(&buf, info.width, 32, 16), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, info.width, 61, 16), [255, 255, 255, 255]);
    }

    #[test]
    fn test_empty_snapshot_renders_white() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><g/></svg>"#;
        let png_bytes = SvgRenderer::new()
            .render_to_png(svg.as_bytes(), Dimensions::new(10, 10))
            .unwrap();
        let (info, buf) = decode(&png_bytes);
        assert_eq!(pixel(&buf, info.width, 5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_svg() {
        let result = SvgRenderer::new().render_to_png(b"not svg", Dimensions::new(10, 10));
        assert!(matches!(result, Err(RenderError::SvgParse(_))));
    }

    #[tokio::test]
    async fn test_render_in_background() {
        let renderer = SvgRenderer::new();
        let png_bytes = renderer
            .render_in_background(SQUARE.to_string(), Dimensions::new(20, 20))
            .await
            .unwrap();
        assert!(png_bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
