//! Axis lines, tick marks and tick labels.

use tracing::trace;

use super::coordinates::CartesianCoordinates;
use super::data::{Series, DEFAULT_MAX_LABELS};
use super::geometry::Segment;
use super::scene::{Element, NodeId, Scene};
use super::style::font_style;
use crate::utils::format_number;

/// Number of intervals on the y axis, whatever the data.
pub const Y_TICK_INTERVALS: usize = 10;

#[derive(Clone, Debug)]
pub struct AxisOptions {
    pub color: String,
    pub weight: f64,
    pub tick_color: String,
    pub tick_weight: f64,
    pub tick_length: f64,
    pub font_size: f64,
    /// Gap between the end of a tick and its label.
    pub label_offset: f64,
    /// Rotation of x axis labels, in degrees.
    pub label_rotation: f64,
    pub max_labels: usize,
}

impl Default for AxisOptions {
    fn default() -> AxisOptions {
        AxisOptions {
            color: "#cccccc".to_string(),
            weight: 1.0,
            tick_color: "#000000".to_string(),
            tick_weight: 1.0,
            tick_length: 5.0,
            font_size: 12.0,
            label_offset: 10.0,
            label_rotation: 75.0,
            max_labels: DEFAULT_MAX_LABELS,
        }
    }
}

/// Ids of the nodes making up one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisHandles {
    pub group: NodeId,
    pub line: NodeId,
    pub ticks: NodeId,
    pub labels: NodeId,
}

fn axis_groups(
    scene: &mut Scene,
    parent: NodeId,
    segment: Segment,
    anchor: &str,
    options: &AxisOptions,
) -> AxisHandles {
    let group = scene.add_child(parent, Element::new("g"));
    let line = scene.add_child(
        group,
        segment
            .to_element()
            .set("stroke", &options.color)
            .set("stroke-width", options.weight),
    );
    let ticks = scene.add_child(
        group,
        Element::new("g")
            .set("stroke-width", options.tick_weight)
            .set("stroke", &options.tick_color),
    );
    let labels = scene.add_child(
        group,
        Element::new("g")
            .set("style", font_style(options.font_size))
            .set("text-anchor", anchor),
    );
    AxisHandles {
        group,
        line,
        ticks,
        labels,
    }
}

/// Fractions of the axis length at which x ticks are placed.
///
/// Numeric data gets a tick on every bin boundary, categorical data a tick
/// centred under each category slot.
pub fn x_tick_fractions<S: Series + ?Sized>(data: &S, label_count: usize) -> Vec<f64> {
    if data.x_extent().is_some() {
        let n = label_count.saturating_sub(1).max(1) as f64;
        (0..label_count).map(|i| i as f64 / n).collect()
    } else {
        let n = data.size() as f64;
        (0..data.size().min(label_count))
            .map(|i| i as f64 / n + 0.5 / n)
            .collect()
    }
}

/// Draw the x axis along the bottom edge of the plot area.
pub fn x_axis<S: Series + ?Sized>(
    scene: &mut Scene,
    parent: NodeId,
    coordinates: &CartesianCoordinates,
    data: &S,
    options: &AxisOptions,
) -> AxisHandles {
    let area = coordinates.area;
    let segment = Segment::new((area.left, area.bottom), (area.right, area.bottom));
    let handles = axis_groups(scene, parent, segment, "start", options);

    let labels = data.x_labels(options.max_labels);
    let fractions = x_tick_fractions(data, labels.len());
    trace!(count = fractions.len(), "x axis ticks");
    let label_y = area.bottom + options.tick_length + options.label_offset;
    for (label, fraction) in labels.into_iter().zip(fractions) {
        let (x, y) = segment.along(fraction);
        scene.add_child(
            handles.ticks,
            Segment::new((x, y), (x, y + options.tick_length)).to_element(),
        );
        // translate rather than x/y so the rotation pivots on the tick
        scene.add_child(
            handles.labels,
            Element::text(label).set(
                "transform",
                format!(
                    "translate({}, {}) rotate({})",
                    format_number(x),
                    format_number(label_y),
                    format_number(options.label_rotation)
                ),
            ),
        );
    }
    handles
}

/// Draw the y axis along the left edge of the plot area, with
/// [`Y_TICK_INTERVALS`] evenly spaced intervals over the mapped range.
pub fn y_axis(
    scene: &mut Scene,
    parent: NodeId,
    coordinates: &CartesianCoordinates,
    options: &AxisOptions,
) -> AxisHandles {
    let area = coordinates.area;
    let segment = Segment::new((area.left, area.top), (area.left, area.bottom));
    let handles = axis_groups(scene, parent, segment, "end", options);

    let labels = coordinates.y_labels(Y_TICK_INTERVALS);
    let n = Y_TICK_INTERVALS as f64;
    trace!(count = labels.len(), "y axis ticks");
    // labels run bottom to top, the axis line runs top to bottom
    for (i, label) in labels.into_iter().enumerate() {
        let (x, y) = segment.along((n - i as f64) / n);
        scene.add_child(
            handles.ticks,
            Segment::new((x - options.tick_length, y), (x, y)).to_element(),
        );
        scene.add_child(
            handles.labels,
            Element::text(label)
                .set("x", x - options.tick_length)
                .set("y", y)
                .set("dominant-baseline", "middle"),
        );
    }
    handles
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::plot::coordinates::{Baseline, PlotArea};
    use crate::plot::data::{CategoricalData, NumericData};

    fn area() -> PlotArea {
        PlotArea {
            left: 100.0,
            right: 700.0,
            top: 50.0,
            bottom: 300.0,
        }
    }

    fn tick_xs(scene: &Scene, handles: &AxisHandles) -> Vec<f64> {
        scene
            .node(handles.ticks)
            .children()
            .iter()
            .map(|id| scene.node(*id).get_number("x1"))
            .collect()
    }

    #[test]
    fn test_numeric_x_axis() {
        let data = NumericData::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        let coordinates = CartesianCoordinates::new(area(), &data, Baseline::Data).unwrap();
        let mut scene = Scene::new(Element::new("svg"));
        let root = scene.root();
        let handles = x_axis(&mut scene, root, &coordinates, &data, &AxisOptions::default());
        assert_eq!(tick_xs(&scene, &handles), vec![100.0, 300.0, 500.0, 700.0]);
        let labels: Vec<_> = scene
            .node(handles.labels)
            .children()
            .iter()
            .map(|id| scene.node(*id).content().unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["0.0", "0.6", "1.3", "2.0"]);
    }

    #[test]
    fn test_categorical_x_axis_centres_labels() {
        let data = CategoricalData::new(["A", "B", "C"], vec![1.0, 5.0, 10.0]).unwrap();
        let coordinates = CartesianCoordinates::new(area(), &data, Baseline::Zero).unwrap();
        let mut scene = Scene::new(Element::new("svg"));
        let root = scene.root();
        let handles = x_axis(&mut scene, root, &coordinates, &data, &AxisOptions::default());
        assert_eq!(tick_xs(&scene, &handles), vec![200.0, 400.0, 600.0]);
        let first_label = scene.node(scene.node(handles.labels).children()[0]);
        assert_eq!(first_label.content(), Some("A"));
        assert_eq!(
            first_label.attribute("transform"),
            Some("translate(200, 315) rotate(75)")
        );
    }

    #[test]
    fn test_y_axis_runs_bottom_to_top() {
        let data = CategoricalData::new(["A", "B"], vec![0.0, 10.0]).unwrap();
        let coordinates = CartesianCoordinates::new(area(), &data, Baseline::Data).unwrap();
        let mut scene = Scene::new(Element::new("svg"));
        let root = scene.root();
        let handles = y_axis(&mut scene, root, &coordinates, &AxisOptions::default());
        let labels = scene.node(handles.labels).children().to_vec();
        assert_eq!(labels.len(), Y_TICK_INTERVALS + 1);
        let bottom = scene.node(labels[0]);
        assert_eq!(bottom.content(), Some("0.0"));
        assert_relative_eq!(bottom.get_number("y"), 300.0);
        let top = scene.node(labels[Y_TICK_INTERVALS]);
        assert_eq!(top.content(), Some("10.0"));
        assert_relative_eq!(top.get_number("y"), 50.0);
        assert_eq!(scene.node(handles.line).get_number("x1"), 100.0);
    }
}
