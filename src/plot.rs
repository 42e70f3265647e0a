//!
//! Invoked by calling:
//! `flexplot plot <args>`

use std::fs;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use tracing::{debug, info, warn};
use usvg::{fontdb, TreeParsing, TreeTextToPath};

use crate::cli::{self, Palette, View};
use crate::error::{Error, Result};
use crate::io;

use self::chart::{Graph, GraphOptions, DEFAULT_MARGIN_RIGHT, LEGEND_MARGIN_RIGHT};
use self::coordinates::Baseline;
use self::data::{Dataset, DatasetCollection, Points};
use self::radar::RadarChart;

pub use cli::PlotOptions;

/// Axis lines, ticks and labels.
pub mod axis;

/// Bar chart composers.
pub mod bar;

/// Cartesian chart options and orchestration.
pub mod chart;

/// Chart root, title wrappers and legend.
pub mod component;

/// Data space to drawing space mappings.
pub mod coordinates;

/// Series and collections of series.
pub mod data;

/// Line segments and the along primitive.
pub mod geometry;

/// Radar chart composer.
pub mod radar;

/// Point, bubble and line composers.
pub mod scatter;

/// Retained-mode scene graph.
pub mod scene;

/// SVG styling functions.
pub mod style;

/// Width in pixels of rasterised output.
pub const PNG_WIDTH: u32 = 2000;

pub fn save_svg(markup: &str, output: &str) -> Result<()> {
    fs::write(output, markup)?;
    Ok(())
}

pub fn save_png(markup: &str, output: &str) -> Result<()> {
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    let opt = usvg::Options::default();
    let mut tree = usvg::Tree::from_data(markup.as_bytes(), &opt)
        .map_err(|err| Error::RenderError(err.to_string()))?;
    tree.convert_text(&fontdb);

    let width = PNG_WIDTH;
    let height = (width as f64 * tree.size.height() / tree.size.width()) as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::RenderError(format!("invalid image size {}x{}", width, height)))?;
    resvg::render(
        &tree,
        resvg::FitTo::Size(width, height),
        tiny_skia::Transform::default(),
        pixmap.as_mut(),
    )
    .ok_or_else(|| Error::RenderError("unable to render chart".to_string()))?;
    pixmap
        .save_png(output)
        .map_err(|err| Error::RenderError(err.to_string()))?;
    Ok(())
}

pub enum Suffix {
    PNG,
    SVG,
}

impl FromStr for Suffix {
    type Err = ();
    fn from_str(input: &str) -> std::result::Result<Suffix, Self::Err> {
        match input {
            "png" => Ok(Suffix::PNG),
            "svg" => Ok(Suffix::SVG),
            _ => Err(()),
        }
    }
}

/// Write `markup` as SVG text or a PNG image, depending on the suffix of
/// `output`.
pub fn save_by_suffix(markup: &str, output: &str) -> Result<()> {
    let suffix_str = Path::new(output)
        .extension()
        .and_then(|suffix| suffix.to_str())
        .unwrap_or_default()
        .to_string();
    match Suffix::from_str(&suffix_str) {
        Ok(Suffix::PNG) => save_png(markup, output)?,
        Ok(Suffix::SVG) => save_svg(markup, output)?,
        Err(_) => return Err(Error::InvalidImageSuffix(suffix_str)),
    };
    info!(output, "saved chart");
    Ok(())
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShowLegend {
    /// Legend for charts with more than one series
    #[default]
    Default,
    None,
}

/// Convert a colorous::Color to 6 digit hex string
/// # Examples
///
/// ```
/// # use colorous::Color;
/// # use flexplot::plot::color_to_hex;
/// assert_eq!(color_to_hex(Color {r: 255, g: 127, b: 0}), "#ff7f00");
/// ```
pub fn color_to_hex(color: colorous::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Paired palette with the light and dark member of each pair swapped.
pub fn reverse_palette(count: usize) -> Vec<String> {
    let gradient = colorous::PAIRED;
    (0..count)
        .map(|i| color_to_hex(gradient[(i ^ 1) % gradient.len()]))
        .collect()
}

pub fn default_palette(count: usize) -> Vec<String> {
    let gradient = colorous::PAIRED;
    (0..count)
        .map(|i| color_to_hex(gradient[i % gradient.len()]))
        .collect()
}

/// Build a palette of `count` colours, then apply `<index>=<hex>` overrides.
///
/// Overrides that do not parse or fall outside the palette are skipped.
pub fn set_palette(
    name: &Option<Palette>,
    colors: &Option<Vec<String>>,
    count: usize,
) -> Vec<String> {
    let mut color_list = match name {
        Some(Palette::Default) | None => default_palette(count),
        Some(Palette::Inverse) => reverse_palette(count),
        Some(Palette::Viridis) => {
            let gradient = colorous::VIRIDIS;
            (0..count)
                .map(|i| color_to_hex(gradient.eval_rational(i, count)))
                .collect()
        }
    };
    for color in colors.iter().flatten() {
        let parsed = color
            .split_once('=')
            .and_then(|(index, hex)| index.trim().parse::<usize>().ok().map(|i| (i, hex)));
        match parsed {
            Some((i, hex)) if i < count => {
                let hexcode = hex.trim().replace("hex", "#");
                color_list[i] = if hexcode.starts_with('#') {
                    hexcode
                } else {
                    format!("#{}", hexcode)
                };
            }
            _ => warn!(color = %color, "ignoring palette override"),
        }
    }
    color_list
}

fn require_bubbles(collection: &DatasetCollection<Dataset>) -> Result<()> {
    if collection
        .datasets()
        .iter()
        .any(|data| data.z_values().is_none())
    {
        return Err(Error::NotDefined("z values".to_string()));
    }
    Ok(())
}

fn render_radar(
    options: GraphOptions,
    mut collection: DatasetCollection<Dataset>,
    legend: bool,
) -> Result<String> {
    let axes = collection
        .datasets()
        .first()
        .map(|data| data.y_values().len())
        .unwrap_or(0);
    let mut chart = RadarChart::new(options, axes);
    if let Some(Dataset::Categorical(data)) = collection.datasets().first() {
        chart.set_labels(data.labels())?;
    }
    chart.plot(&mut collection)?;
    if legend {
        chart.make_legend(&collection);
    }
    Ok(chart.serialize())
}

fn render_graph(
    view: View,
    options: GraphOptions,
    mut collection: DatasetCollection<Dataset>,
    legend: bool,
) -> Result<String> {
    let baseline = match view {
        View::Bar => Baseline::Zero,
        _ => Baseline::Data,
    };
    if view == View::Bubble {
        require_bubbles(&collection)?;
    }
    let mut graph = Graph::new(options);
    if let [data] = collection.datasets() {
        // a lone series keeps its own y floor
        let palette = graph.options().palette_colors(2);
        graph.plot(data, baseline)?;
        match view {
            View::Bar => graph.make_bar(data, &palette[0])?,
            View::Line => graph.make_line(data, &palette[1])?,
            _ => graph.make_point(data, &palette[0], &palette[1])?,
        };
    } else {
        graph.plot(&collection, baseline)?;
        match view {
            View::Bar => graph.make_bars(&mut collection)?,
            View::Line => graph.make_lines(&mut collection)?,
            _ => graph.make_points(&mut collection)?,
        };
        if legend {
            graph.make_legend(&mut collection);
        }
    }
    Ok(graph.serialize())
}

/// Render `datasets` as a chart of kind `view` and return the markup.
pub fn render_view(
    view: View,
    datasets: Vec<Dataset>,
    options: GraphOptions,
    show_legend: ShowLegend,
) -> Result<String> {
    if datasets.is_empty() {
        return Err(Error::EmptyDataset);
    }
    let legend = datasets.len() > 1 && show_legend != ShowLegend::None;
    let mut options = options;
    if legend && options.margin_right == DEFAULT_MARGIN_RIGHT {
        options.margin_right = LEGEND_MARGIN_RIGHT;
    }
    debug!(?view, series = datasets.len(), legend, "render");
    let collection = DatasetCollection::new(datasets);
    match view {
        View::Radar => render_radar(options, collection, legend),
        _ => render_graph(view, options, collection, legend),
    }
}

fn load_input(options: &PlotOptions) -> Result<(GraphOptions, Vec<Dataset>)> {
    if io::is_csv(&options.input) {
        let y = options
            .y_field
            .clone()
            .ok_or_else(|| Error::NotDefined("y-field".to_string()))?;
        let fields = io::CsvFields {
            x: options.x_field.clone(),
            y: y.clone(),
            z: options.z_field.clone(),
            category: options.cat_field.clone(),
        };
        let dataset = io::read_csv_file(&options.input, &fields)?;
        let graph_options = GraphOptions {
            x_label: fields.category.or(fields.x).unwrap_or_default(),
            y_label: y,
            ..Default::default()
        };
        Ok((graph_options, vec![dataset]))
    } else {
        let chart = io::read_chart_file(&options.input)?;
        let datasets = chart.datasets()?;
        Ok((chart.options, datasets))
    }
}

/// Command line options take precedence over options read from the input.
fn apply_overrides(graph_options: &mut GraphOptions, options: &PlotOptions) {
    if let Some(title) = &options.title {
        graph_options.title = title.clone();
    }
    if let Some(label) = &options.x_label {
        graph_options.x_label = label.clone();
    }
    if let Some(label) = &options.y_label {
        graph_options.y_label = label.clone();
    }
    if let Some(width) = options.width {
        graph_options.width = width;
    }
    if let Some(height) = options.height {
        graph_options.height = height;
    }
    if options.palette.is_some() {
        graph_options.palette = options.palette;
    }
    if options.color.is_some() {
        graph_options.colors = options.color.clone();
    }
}

/// Make a chart
pub fn plot(options: &cli::PlotOptions) -> std::result::Result<(), anyhow::Error> {
    let (mut graph_options, datasets) = load_input(options)?;
    apply_overrides(&mut graph_options, options);
    let markup = render_view(options.view, datasets, graph_options, options.show_legend)?;
    save_by_suffix(&markup, &options.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::data::{CategoricalData, NumericData};

    #[test]
    fn test_default_palette_wraps() {
        let palette = default_palette(13);
        assert_eq!(palette[0], "#a6cee3");
        assert_eq!(palette[1], "#1f78b4");
        assert_eq!(palette[12], palette[0]);
    }

    #[test]
    fn test_reverse_palette_swaps_pairs() {
        assert_eq!(reverse_palette(2), vec!["#1f78b4", "#a6cee3"]);
    }

    #[test]
    fn test_set_palette_overrides() {
        let colors = Some(vec![
            "1=ff0000".to_string(),
            "0=hex00ff00".to_string(),
            "7=#000000".to_string(),
            "nonsense".to_string(),
        ]);
        let palette = set_palette(&None, &colors, 3);
        assert_eq!(palette, vec!["#00ff00", "#ff0000", "#b2df8a"]);
    }

    #[test]
    fn test_render_single_bar_series() {
        let data = CategoricalData::new(["A", "B", "C"], vec![1.0, 5.0, 10.0]).unwrap();
        let markup = render_view(
            View::Bar,
            vec![data.into()],
            GraphOptions::default(),
            ShowLegend::Default,
        )
        .unwrap();
        assert_eq!(markup.matches("<rect").count(), 3);
        assert!(markup.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    }

    #[test]
    fn test_render_adds_legend_margin() {
        let a = NumericData::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        let b = NumericData::new(vec![1.0, 2.0], vec![3.0, 1.0]).unwrap();
        let markup = render_view(
            View::Line,
            vec![a.into(), b.into()],
            GraphOptions::default(),
            ShowLegend::Default,
        )
        .unwrap();
        assert!(markup.contains("translate(610, "));
        assert!(markup.contains(">Group 2</text>"));
    }

    #[test]
    fn test_bubble_needs_z() {
        let data = NumericData::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(
            render_view(
                View::Bubble,
                vec![data.into()],
                GraphOptions::default(),
                ShowLegend::Default
            ),
            Err(Error::NotDefined("z values".to_string()))
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            render_view(
                View::Scatter,
                vec![],
                GraphOptions::default(),
                ShowLegend::Default
            ),
            Err(Error::EmptyDataset)
        );
    }

    #[test]
    fn test_invalid_suffix() {
        assert_eq!(
            save_by_suffix("<svg />", "chart.gif"),
            Err(Error::InvalidImageSuffix("gif".to_string()))
        );
    }
}
