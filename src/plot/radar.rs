//! Radar (spider) charts: one spoke per category, one closed polygon per
//! series.

use std::f64::consts::PI;

use svg::node::element::path::Data;
use tracing::debug;

use crate::error::{Error, Result};

use super::chart::GraphOptions;
use super::component::{chart_root, title_wrapper, Legend};
use super::coordinates::{PlotArea, PolarCoordinates};
use super::data::{DatasetCollection, Points};
use super::geometry::{Point, Segment};
use super::scene::{Element, NodeId, Scene};
use super::style::{font_style, path_partial};

/// Grid ticks are drawn at `k / RADAR_LEVELS` along each spoke.
pub const RADAR_LEVELS: usize = 10;

#[derive(Clone, Debug)]
pub struct RadarOptions {
    pub spoke_color: String,
    pub spoke_weight: f64,
    /// Radius of the marker at the outer end of each spoke.
    pub spoke_end_radius: f64,
    pub tick_color: String,
    pub tick_size: f64,
    pub font_size: f64,
    /// Distance beyond the spoke end at which category labels sit.
    pub label_offset: f64,
}

impl Default for RadarOptions {
    fn default() -> RadarOptions {
        RadarOptions {
            spoke_color: "#cccccc".to_string(),
            spoke_weight: 1.0,
            spoke_end_radius: 3.0,
            tick_color: "#999999".to_string(),
            tick_size: 6.0,
            font_size: 12.0,
            label_offset: 15.0,
        }
    }
}

/// Angle of spoke `index` out of `count`, starting at the top and running
/// clockwise.
pub fn spoke_angle(index: usize, count: usize) -> f64 {
    -PI / 2.0 + 2.0 * PI * index as f64 / count as f64
}

#[derive(Clone, Debug)]
pub struct RadarChart {
    options: GraphOptions,
    radar_options: RadarOptions,
    polar: PolarCoordinates,
    spokes: Vec<Segment>,
    scene: Scene,
    title: NodeId,
    frame: NodeId,
    series: NodeId,
}

impl RadarChart {
    pub fn new(options: GraphOptions, axes: usize) -> RadarChart {
        RadarChart::with_radar_options(options, RadarOptions::default(), axes)
    }

    pub fn with_radar_options(
        options: GraphOptions,
        radar_options: RadarOptions,
        axes: usize,
    ) -> RadarChart {
        let area = options.plot_area();
        let center = (
            (area.left + area.right) / 2.0,
            (area.top + area.bottom) / 2.0,
        );
        let radius = area.width().min(area.height()).max(0.0) / 2.0;
        let polar = PolarCoordinates::new(center, radius);
        let spokes: Vec<Segment> = (0..axes)
            .map(|i| polar.spoke(spoke_angle(i, axes)))
            .collect();
        debug!(axes, ?center, radius, "radar chart");

        let mut scene = Scene::new(chart_root(options.width, options.height));
        let root = scene.root();
        let wrapper = scene.add_child(
            root,
            title_wrapper(&options.title, options.width, options.margin_top),
        );
        let title = scene.node(wrapper).children()[0];
        let frame = scene.add_child(root, Element::new("g"));
        let series = scene.add_child(root, Element::new("g"));

        let mut chart = RadarChart {
            options,
            radar_options,
            polar,
            spokes,
            scene,
            title,
            frame,
            series,
        };
        chart.draw_frame();
        chart
    }

    fn draw_frame(&mut self) {
        let options = &self.radar_options;
        let spoke_group = self.scene.add_child(
            self.frame,
            Element::new("g")
                .set("stroke", &options.spoke_color)
                .set("stroke-width", options.spoke_weight)
                .set("fill", &options.spoke_color),
        );
        let grid = self.scene.add_child(
            self.frame,
            Element::new("g")
                .set("stroke", &options.tick_color)
                .set("stroke-width", 1),
        );
        for spoke in self.spokes.iter() {
            self.scene.add_child(spoke_group, spoke.to_element());
            self.scene.add_child(
                spoke_group,
                Element::new("circle")
                    .set("cx", spoke.end.0)
                    .set("cy", spoke.end.1)
                    .set("r", options.spoke_end_radius),
            );
            let (nx, ny) = spoke.normal();
            let half = options.tick_size / 2.0;
            for k in 1..RADAR_LEVELS {
                let (x, y) = spoke.along(k as f64 / RADAR_LEVELS as f64);
                self.scene.add_child(
                    grid,
                    Segment::new((x - nx * half, y - ny * half), (x + nx * half, y + ny * half))
                        .to_element(),
                );
            }
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn axes(&self) -> usize {
        self.spokes.len()
    }

    pub fn spokes(&self) -> &[Segment] {
        &self.spokes
    }

    pub fn polar(&self) -> &PolarCoordinates {
        &self.polar
    }

    pub fn set_title(&mut self, title: &str) {
        self.options.title = title.to_string();
        self.scene.node_mut(self.title).set_content(title);
    }

    /// Write one label just beyond the end of each spoke.
    pub fn set_labels<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<NodeId> {
        self.check_count(labels.len())?;
        let group = self.scene.add_child(
            self.frame,
            Element::new("g")
                .set("style", font_style(self.radar_options.font_size))
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle"),
        );
        let reach = 1.0 + self.radar_options.label_offset / self.polar.radius.max(1.0);
        for (i, label) in labels.iter().enumerate() {
            let (x, y) = self.spokes[i].along(reach);
            self.scene.add_child(
                group,
                Element::text(label.as_ref()).set("x", x).set("y", y),
            );
        }
        Ok(group)
    }

    fn check_count(&self, actual: usize) -> Result<()> {
        if actual != self.axes() {
            return Err(Error::AxisCountMismatch {
                expected: self.axes(),
                actual,
            });
        }
        Ok(())
    }

    fn polygon(&self, percentages: &[f64]) -> Data {
        let vertices: Vec<Point> = self
            .spokes
            .iter()
            .zip(percentages)
            .map(|(spoke, percent)| spoke.along(*percent))
            .collect();
        let mut path_data = Data::new();
        for (i, vertex) in vertices.into_iter().enumerate() {
            path_data = if i == 0 {
                path_data.move_to(vertex)
            } else {
                path_data.line_to(vertex)
            };
        }
        path_data.close()
    }

    /// Draw one closed polygon with vertex `i` at `percentages[i]` of the way
    /// along spoke `i`.
    pub fn plot_percentages(&mut self, percentages: &[f64], color: &str) -> Result<NodeId> {
        self.check_count(percentages.len())?;
        let path = path_partial(self.polygon(percentages), Some(color), None);
        Ok(self.scene.add_child(self.series, path))
    }

    /// Draw one polygon per series, each value scaled from zero (or the lowest
    /// negative value) to the highest value any series has on the same spoke.
    ///
    /// A spoke where every value is zero puts them all on the outer edge.
    /// Nothing is drawn unless every series has one value per spoke.
    pub fn plot<T: Points>(&mut self, collection: &mut DatasetCollection<T>) -> Result<Vec<NodeId>> {
        for data in collection.datasets() {
            self.check_count(data.y_values().len())?;
        }
        collection.assign_colors(&self.options.palette_colors(collection.len()));
        debug!(series = collection.len(), "radar polygons");
        let mut ids = vec![];
        for (s, data) in collection.datasets().iter().enumerate() {
            let percentages: Vec<f64> = data
                .y_values()
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    match (collection.index_y_min(i), collection.index_y_max(i)) {
                        (Some(min), Some(max)) if max > min => (value - min) / (max - min),
                        _ => 1.0,
                    }
                })
                .collect();
            let color = collection.stroke(s).unwrap_or("black").to_string();
            ids.push(self.plot_percentages(&percentages, &color)?);
        }
        Ok(ids)
    }

    /// Place a legend for `collection` to the right of the chart area.
    pub fn make_legend<T: Points>(&mut self, collection: &DatasetCollection<T>) -> NodeId {
        let legend = Legend::from_collection(collection);
        let area: PlotArea = self.options.plot_area();
        let root = self.scene.root();
        let y = (area.bottom - legend.height()) / 2.0;
        self.scene.add_child(root, legend.element(area.right + 10.0, y))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn serialize(&self) -> String {
        self.scene.serialize()
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use svg::node::element::path::Command;

    use super::*;
    use crate::plot::data::CategoricalData;

    #[test]
    fn test_spokes_start_at_top() {
        let chart = RadarChart::new(GraphOptions::default(), 4);
        let center = chart.polar().center();
        let top = chart.spokes()[0];
        assert_eq!(top.start, center);
        assert_relative_eq!(top.end.0, center.0, epsilon = 1e-9);
        assert_relative_eq!(top.end.1, center.1 - chart.polar().radius, epsilon = 1e-9);
        let right = chart.spokes()[1];
        assert_relative_eq!(right.end.0, center.0 + chart.polar().radius, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_elements() {
        let chart = RadarChart::new(GraphOptions::default(), 5);
        let root = chart.scene().root();
        // spokes plus grid ticks
        assert_eq!(
            chart.scene().find_all(root, "line").len(),
            5 + 5 * (RADAR_LEVELS - 1)
        );
        assert_eq!(chart.scene().find_all(root, "circle").len(), 5);
    }

    #[test]
    fn test_percentage_count_mismatch() {
        let mut chart = RadarChart::new(GraphOptions::default(), 5);
        assert_eq!(
            chart.plot_percentages(&[0.1, 0.5, 1.0], "red"),
            Err(Error::AxisCountMismatch {
                expected: 5,
                actual: 3
            })
        );
        let root = chart.scene().root();
        assert!(chart.scene().find_all(root, "path").is_empty());
    }

    #[test]
    fn test_plot_scales_per_spoke() {
        let mut chart = RadarChart::new(GraphOptions::default(), 3);
        let a = CategoricalData::new(["x", "y", "z"], vec![0.0, 50.0, 7.0]).unwrap();
        let b = CategoricalData::new(["x", "y", "z"], vec![10.0, 100.0, 7.0]).unwrap();
        let mut collection = a + b;
        let ids = chart.plot(&mut collection).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(collection.fill(1).is_some());
        let d = chart.scene().node(ids[0]).attribute("d").unwrap().to_string();
        let parsed = Data::parse(&d).unwrap();
        // move, two lines, close
        assert_eq!(parsed.iter().count(), 4);
    }

    #[test]
    fn test_single_series_scales_from_zero() {
        let mut chart = RadarChart::new(GraphOptions::default(), 3);
        let data = CategoricalData::new(["x", "y", "z"], vec![1.0, 2.0, 30.0]).unwrap();
        let mut collection = DatasetCollection::new(vec![data]);
        let ids = chart.plot(&mut collection).unwrap();
        let d = chart.scene().node(ids[0]).attribute("d").unwrap().to_string();
        let vertices: Vec<Point> = Data::parse(&d)
            .unwrap()
            .iter()
            .filter_map(|command| match command {
                Command::Move(_, params) | Command::Line(_, params) => {
                    Some((params[0] as f64, params[1] as f64))
                }
                _ => None,
            })
            .collect();
        assert_eq!(vertices.len(), 3);
        for (i, fraction) in [1.0 / 30.0, 2.0 / 30.0, 1.0].iter().enumerate() {
            let expected = chart.spokes()[i].along(*fraction);
            assert_abs_diff_eq!(vertices[i].0, expected.0, epsilon = 1e-3);
            assert_abs_diff_eq!(vertices[i].1, expected.1, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_plot_rejects_short_series() {
        let mut chart = RadarChart::new(GraphOptions::default(), 4);
        let a = CategoricalData::new(["x", "y", "z"], vec![1.0, 2.0, 3.0]).unwrap();
        let mut collection = DatasetCollection::new(vec![a]);
        assert_eq!(
            chart.plot(&mut collection),
            Err(Error::AxisCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_labels_sit_beyond_spokes() {
        let mut chart = RadarChart::new(GraphOptions::default(), 2);
        let group = chart.set_labels(&["north", "south"]).unwrap();
        let first = chart.scene().node(group).children()[0];
        let node = chart.scene().node(first);
        assert_eq!(node.content(), Some("north"));
        assert!(node.get_number("y") < chart.spokes()[0].end.1);
        assert!(chart.set_labels(&["only"]).is_err());
    }
}
