use svg::node::element::path::Data;

use super::scene::Element;

pub const FONT_FAMILY: &str = "sans-serif";

pub fn path_open(path_data: Data, color: Option<&str>, weight: Option<f64>) -> Element {
    let col = color.unwrap_or("black");
    let stroke_width = weight.unwrap_or(2.0);
    Element::new("path")
        .set("stroke", col)
        .set("fill", "none")
        .set("stroke-width", stroke_width)
        .set("d", path_data)
}

pub fn path_partial(path_data: Data, color: Option<&str>, weight: Option<f64>) -> Element {
    let col = color.unwrap_or("black");
    let stroke_width = weight.unwrap_or(2.0);
    Element::new("path")
        .set("stroke", col)
        .set("stroke-opacity", 0.8)
        .set("fill", col)
        .set("fill-opacity", 0.2)
        .set("stroke-width", stroke_width)
        .set("d", path_data)
}

/// Inline font style shared by axis and legend text.
pub fn font_style(font_size: f64) -> String {
    format!("font-family: {}; font-size: {}px;", FONT_FAMILY, font_size)
}
