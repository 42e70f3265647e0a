//! Cartesian chart orchestration: page options, coordinate binding, axes and
//! the series composers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Palette;
use crate::error::{Error, Result};

use super::axis::{x_axis, y_axis, AxisHandles, AxisOptions};
use super::bar::{bars, grouped_bars};
use super::component::{chart_root, title_wrapper, x_label_wrapper, y_label_wrapper, Legend};
use super::coordinates::{Baseline, CartesianCoordinates, PlotArea};
use super::data::{DatasetCollection, Points, Series};
use super::scatter::{line, points};
use super::scene::{Element, NodeId, Scene};
use super::set_palette;

pub const DEFAULT_MARGIN_RIGHT: f64 = 50.0;
pub const LEGEND_MARGIN_RIGHT: f64 = 200.0;

/// Page size, margins, titles and colours of a chart.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GraphOptions {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub palette: Option<Palette>,
    /// Palette overrides as `<index>=<hex>`.
    pub colors: Option<Vec<String>>,
}

impl Default for GraphOptions {
    fn default() -> GraphOptions {
        GraphOptions {
            width: 800.0,
            height: 400.0,
            margin_left: 100.0,
            margin_right: DEFAULT_MARGIN_RIGHT,
            margin_top: 50.0,
            margin_bottom: 100.0,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            palette: None,
            colors: None,
        }
    }
}

impl GraphOptions {
    /// Defaults with room for a legend on the right.
    pub fn with_legend() -> GraphOptions {
        GraphOptions {
            margin_right: LEGEND_MARGIN_RIGHT,
            ..Default::default()
        }
    }

    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            left: self.margin_left,
            right: self.width - self.margin_right,
            top: self.margin_top,
            bottom: self.height - self.margin_bottom,
        }
    }

    pub fn palette_colors(&self, count: usize) -> Vec<String> {
        set_palette(&self.palette, &self.colors, count)
    }
}

/// A Cartesian chart under construction.
///
/// Call [`Graph::plot`] to bind the coordinates and draw the axes, then any
/// of the `make_*` composers.
#[derive(Clone, Debug)]
pub struct Graph {
    options: GraphOptions,
    axis_options: AxisOptions,
    scene: Scene,
    coordinates: Option<CartesianCoordinates>,
    title: NodeId,
    x_label: NodeId,
    y_label: NodeId,
    axes: NodeId,
    series: NodeId,
    x_axis: Option<AxisHandles>,
    y_axis: Option<AxisHandles>,
}

fn wrapped_text(scene: &Scene, wrapper: NodeId) -> NodeId {
    scene.node(wrapper).children()[0]
}

impl Graph {
    pub fn new(options: GraphOptions) -> Graph {
        let mut scene = Scene::new(chart_root(options.width, options.height));
        let root = scene.root();
        let wrapper = scene.add_child(
            root,
            title_wrapper(&options.title, options.width, options.margin_top),
        );
        let title = wrapped_text(&scene, wrapper);
        let wrapper = scene.add_child(
            root,
            x_label_wrapper(&options.x_label, options.width, options.height),
        );
        let x_label = wrapped_text(&scene, wrapper);
        let wrapper = scene.add_child(root, y_label_wrapper(&options.y_label, options.height));
        let y_label = wrapped_text(&scene, wrapper);
        let axes = scene.add_child(root, Element::new("g"));
        let series = scene.add_child(root, Element::new("g"));
        Graph {
            options,
            axis_options: AxisOptions::default(),
            scene,
            coordinates: None,
            title,
            x_label,
            y_label,
            axes,
            series,
            x_axis: None,
            y_axis: None,
        }
    }

    pub fn with_axis_options(mut self, axis_options: AxisOptions) -> Graph {
        self.axis_options = axis_options;
        self
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn set_title(&mut self, title: &str) {
        self.options.title = title.to_string();
        self.scene.node_mut(self.title).set_content(title);
    }

    pub fn set_x_label(&mut self, label: &str) {
        self.options.x_label = label.to_string();
        self.scene.node_mut(self.x_label).set_content(label);
    }

    pub fn set_y_label(&mut self, label: &str) {
        self.options.y_label = label.to_string();
        self.scene.node_mut(self.y_label).set_content(label);
    }

    fn apply_default_title(&mut self, prefix: &str) {
        let options = &self.options;
        if options.title.is_empty() && !options.x_label.is_empty() && !options.y_label.is_empty()
        {
            let title = format!("{} for {} vs. {}", prefix, options.x_label, options.y_label);
            self.set_title(&title);
        }
    }

    /// Bind the coordinates to `data` and (re)draw both axes.
    ///
    /// Series already drawn keep their positions.
    pub fn plot<S: Series + ?Sized>(&mut self, data: &S, baseline: Baseline) -> Result<()> {
        let area = self.options.plot_area();
        match self.coordinates.as_mut() {
            Some(coordinates) => coordinates.rebind(data, baseline)?,
            None => {
                self.coordinates = Some(CartesianCoordinates::new(area, data, baseline)?);
            }
        }
        let coordinates = self.coordinates()?.clone();
        self.scene.clear_children(self.axes);
        self.x_axis = Some(x_axis(
            &mut self.scene,
            self.axes,
            &coordinates,
            data,
            &self.axis_options,
        ));
        self.y_axis = Some(y_axis(
            &mut self.scene,
            self.axes,
            &coordinates,
            &self.axis_options,
        ));
        Ok(())
    }

    pub fn coordinates(&self) -> Result<&CartesianCoordinates> {
        self.coordinates
            .as_ref()
            .ok_or_else(|| Error::NotDefined("coordinates".to_string()))
    }

    pub fn x_axis(&self) -> Option<&AxisHandles> {
        self.x_axis.as_ref()
    }

    pub fn y_axis(&self) -> Option<&AxisHandles> {
        self.y_axis.as_ref()
    }

    fn check_categorical<S: Series + ?Sized>(data: &S) -> Result<()> {
        if data.x_extent().is_some() {
            return Err(Error::Generic(
                "Bar charts need categorical data".to_string(),
            ));
        }
        Ok(())
    }

    pub fn make_bar<P: Points + ?Sized>(&mut self, data: &P, color: &str) -> Result<NodeId> {
        Graph::check_categorical(data)?;
        let coordinates = self.coordinates()?.clone();
        self.apply_default_title("Chart");
        Ok(bars(&mut self.scene, self.series, &coordinates, data, color))
    }

    pub fn make_bars<T: Points>(
        &mut self,
        collection: &mut DatasetCollection<T>,
    ) -> Result<Vec<NodeId>> {
        Graph::check_categorical(&*collection)?;
        let coordinates = self.coordinates()?.clone();
        collection.assign_colors(&self.options.palette_colors(collection.len()));
        self.apply_default_title("Chart");
        Ok(grouped_bars(
            &mut self.scene,
            self.series,
            &coordinates,
            collection,
        ))
    }

    pub fn make_point<P: Points + ?Sized>(
        &mut self,
        data: &P,
        fill: &str,
        stroke: &str,
    ) -> Result<NodeId> {
        let coordinates = self.coordinates()?.clone();
        self.apply_default_title("Scatterplot");
        Ok(points(
            &mut self.scene,
            self.series,
            &coordinates,
            data,
            fill,
            stroke,
        ))
    }

    pub fn make_points<T: Points>(
        &mut self,
        collection: &mut DatasetCollection<T>,
    ) -> Result<Vec<NodeId>> {
        let coordinates = self.coordinates()?.clone();
        collection.assign_colors(&self.options.palette_colors(collection.len()));
        self.apply_default_title("Scatterplot");
        let ids = collection
            .datasets()
            .iter()
            .enumerate()
            .map(|(i, data)| {
                points(
                    &mut self.scene,
                    self.series,
                    &coordinates,
                    data,
                    collection.fill(i).unwrap_or("black"),
                    collection.stroke(i).unwrap_or("black"),
                )
            })
            .collect();
        Ok(ids)
    }

    pub fn make_line<P: Points + ?Sized>(&mut self, data: &P, color: &str) -> Result<NodeId> {
        let coordinates = self.coordinates()?.clone();
        self.apply_default_title("Scatterplot");
        Ok(line(&mut self.scene, self.series, &coordinates, data, color))
    }

    pub fn make_lines<T: Points>(
        &mut self,
        collection: &mut DatasetCollection<T>,
    ) -> Result<Vec<NodeId>> {
        let coordinates = self.coordinates()?.clone();
        collection.assign_colors(&self.options.palette_colors(collection.len()));
        self.apply_default_title("Scatterplot");
        let ids = collection
            .datasets()
            .iter()
            .enumerate()
            .map(|(i, data)| {
                line(
                    &mut self.scene,
                    self.series,
                    &coordinates,
                    data,
                    collection.stroke(i).unwrap_or("black"),
                )
            })
            .collect();
        Ok(ids)
    }

    /// Place a legend for `collection` in the right margin, vertically
    /// centred on the plot area.
    pub fn make_legend<T: Points>(&mut self, collection: &mut DatasetCollection<T>) -> NodeId {
        collection.assign_colors(&self.options.palette_colors(collection.len()));
        let legend = Legend::from_collection(collection);
        let area = self.options.plot_area();
        let y = (area.bottom - legend.height()) / 2.0;
        debug!(rows = legend.entries().len(), "legend");
        let root = self.scene.root();
        self.scene
            .add_child(root, legend.element(area.right + 10.0, y))
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
    use super::*;
    use crate::plot::data::{CategoricalData, NumericData};

    #[test]
    fn test_default_options() {
        let options = GraphOptions::default();
        assert_eq!(
            options.plot_area(),
            PlotArea {
                left: 100.0,
                right: 750.0,
                top: 50.0,
                bottom: 300.0
            }
        );
        assert_eq!(GraphOptions::with_legend().plot_area().right, 600.0);
    }

    #[test]
    fn test_options_from_yaml() {
        let options: GraphOptions =
            serde_yaml::from_str("width: 1000\ntitle: Sales\npalette: viridis\n").unwrap();
        assert_eq!(options.width, 1000.0);
        assert_eq!(options.height, 400.0);
        assert_eq!(options.title, "Sales");
        assert_eq!(options.palette, Some(Palette::Viridis));
    }

    #[test]
    fn test_compose_before_plot() {
        let data = CategoricalData::new(["A"], vec![1.0]).unwrap();
        let mut graph = Graph::new(GraphOptions::default());
        assert_eq!(
            graph.make_bar(&data, "red"),
            Err(Error::NotDefined("coordinates".to_string()))
        );
    }

    #[test]
    fn test_bar_rejects_numeric_data() {
        let data = NumericData::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        let mut graph = Graph::new(GraphOptions::default());
        graph.plot(&data, Baseline::Zero).unwrap();
        assert!(matches!(graph.make_bar(&data, "red"), Err(Error::Generic(_))));
    }

    #[test]
    fn test_default_titles() {
        let data = CategoricalData::new(["A", "B"], vec![1.0, 2.0]).unwrap();
        let mut graph = Graph::new(GraphOptions::default());
        graph.set_x_label("fruit");
        graph.set_y_label("count");
        graph.plot(&data, Baseline::Zero).unwrap();
        graph.make_bar(&data, "red").unwrap();
        assert_eq!(graph.options().title, "Chart for fruit vs. count");

        let data = NumericData::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        let mut graph = Graph::new(GraphOptions {
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            ..Default::default()
        });
        graph.plot(&data, Baseline::Data).unwrap();
        graph.make_point(&data, "red", "black").unwrap();
        assert!(graph
            .serialize()
            .contains(">Scatterplot for x vs. y</text>"));

        let mut graph = Graph::new(GraphOptions {
            title: "Mine".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            ..Default::default()
        });
        graph.plot(&data, Baseline::Data).unwrap();
        graph.make_line(&data, "red").unwrap();
        assert_eq!(graph.options().title, "Mine");
    }

    #[test]
    fn test_replot_redraws_axes() {
        let small = NumericData::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let large = NumericData::new(vec![0.0, 100.0], vec![0.0, 50.0]).unwrap();
        let mut graph = Graph::new(GraphOptions::default());
        graph.plot(&small, Baseline::Data).unwrap();
        graph.plot(&large, Baseline::Data).unwrap();
        let root = graph.scene().root();
        let lines = graph.scene().find_all(root, "line");
        // two axis lines, 3 x ticks and 11 y ticks
        assert_eq!(lines.len(), 2 + 3 + 11);
        let y_axis = graph.y_axis().unwrap();
        let top_label = *graph.scene().node(y_axis.labels).children().last().unwrap();
        assert_eq!(graph.scene().node(top_label).content(), Some("50.0"));
    }

    #[test]
    fn test_legend_position() {
        let a = CategoricalData::new(["A"], vec![1.0]).unwrap();
        let b = CategoricalData::new(["A"], vec![2.0]).unwrap();
        let mut collection = a + b;
        let mut graph = Graph::new(GraphOptions::with_legend());
        let id = graph.make_legend(&mut collection);
        assert_eq!(
            graph.scene().node(id).attribute("transform"),
            Some("translate(610, 130)")
        );
    }
}
