//! Chart furniture shared by every chart kind: the root element, title and
//! axis label wrappers, and the series legend.

use super::data::{DatasetCollection, Points};
use super::scene::Element;
use super::style::font_style;

pub const LEGEND_ROW_HEIGHT: f64 = 20.0;
pub const LEGEND_SWATCH_SIZE: f64 = 12.0;

/// Height of the strip holding the x axis label.
pub const X_LABEL_HEIGHT: f64 = 25.0;

/// Width of the strip holding the rotated y axis label.
pub const Y_LABEL_WIDTH: f64 = 25.0;

const TITLE_FONT_SIZE: f64 = 16.0;
const LABEL_FONT_SIZE: f64 = 14.0;
const LEGEND_FONT_SIZE: f64 = 12.0;

/// The outermost `svg` element of a chart.
pub fn chart_root(width: f64, height: f64) -> Element {
    Element::new("svg")
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", width)
        .set("height", height)
}

fn centred_text(content: &str, font_size: f64) -> Element {
    Element::text(content)
        .set("x", "50%")
        .set("y", "50%")
        .set("style", font_style(font_size))
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
}

/// Nested `svg` spanning the top margin, holding a centred title.
pub fn title_wrapper(title: &str, width: f64, height: f64) -> Element {
    Element::new("svg")
        .set("x", 0)
        .set("y", 0)
        .set("width", width)
        .set("height", height)
        .add(centred_text(title, TITLE_FONT_SIZE))
}

/// Nested `svg` along the bottom edge of the chart, holding the x label.
pub fn x_label_wrapper(label: &str, width: f64, height: f64) -> Element {
    Element::new("svg")
        .set("x", 0)
        .set("y", height - X_LABEL_HEIGHT)
        .set("width", width)
        .set("height", X_LABEL_HEIGHT)
        .add(centred_text(label, LABEL_FONT_SIZE))
}

/// Nested `svg` along the left edge of the chart, holding the y label
/// rotated a quarter turn anticlockwise.
pub fn y_label_wrapper(label: &str, height: f64) -> Element {
    let (cx, cy) = (Y_LABEL_WIDTH / 2.0, height / 2.0);
    Element::new("svg")
        .set("x", 0)
        .set("y", 0)
        .set("width", Y_LABEL_WIDTH)
        .set("height", height)
        .add(
            Element::text(label)
                .set("x", cx)
                .set("y", cy)
                .set("style", font_style(LABEL_FONT_SIZE))
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("transform", format!("rotate(-90, {}, {})", cx, cy)),
        )
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// A column of colour swatches, one row per series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>) -> Legend {
        Legend { entries }
    }

    /// One entry per member series, coloured with its fill. Unnamed series
    /// are called `Group 1`, `Group 2`, ...
    pub fn from_collection<T: Points>(collection: &DatasetCollection<T>) -> Legend {
        let entries = collection
            .datasets()
            .iter()
            .enumerate()
            .map(|(i, data)| LegendEntry {
                label: data
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Group {}", i + 1)),
                color: collection.fill(i).unwrap_or("black").to_string(),
            })
            .collect();
        Legend { entries }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn height(&self) -> f64 {
        self.entries.len() as f64 * LEGEND_ROW_HEIGHT
    }

    /// The legend as a group translated to `(x, y)`.
    pub fn element(&self, x: f64, y: f64) -> Element {
        let mut group = Element::new("g")
            .set("transform", format!("translate({}, {})", x, y))
            .set("style", font_style(LEGEND_FONT_SIZE));
        let swatch_offset = (LEGEND_ROW_HEIGHT - LEGEND_SWATCH_SIZE) / 2.0;
        for (i, entry) in self.entries.iter().enumerate() {
            let row_y = i as f64 * LEGEND_ROW_HEIGHT;
            group = group.add(
                Element::new("g")
                    .add(
                        Element::new("rect")
                            .set("x", 0)
                            .set("y", row_y + swatch_offset)
                            .set("width", LEGEND_SWATCH_SIZE)
                            .set("height", LEGEND_SWATCH_SIZE)
                            .set("fill", &entry.color),
                    )
                    .add(
                        Element::text(&entry.label)
                            .set("x", LEGEND_SWATCH_SIZE + 6.0)
                            .set("y", row_y + LEGEND_ROW_HEIGHT / 2.0)
                            .set("dominant-baseline", "middle"),
                    ),
            );
        }
        group
    }
}
