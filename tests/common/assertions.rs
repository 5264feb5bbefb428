//! Custom assertions for snapshot output.

/// Assert the text is a complete SVG document of the given size
pub fn assert_svg_document(svg: &str, width: u32, height: u32) {
    assert!(
        svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#),
        "Not an SVG document: {svg}"
    );
    assert!(svg.ends_with("</svg>"), "SVG not closed: {svg}");
    assert!(
        svg.contains(&format!(r#"width="{width}" height="{height}""#)),
        "Expected {width}x{height} in {svg}"
    );
}

/// Number of `<path` elements in an SVG document
pub fn path_count(svg: &str) -> usize {
    svg.matches("<path ").count()
}

/// Assert the bytes carry the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Not a PNG"
    );
}
