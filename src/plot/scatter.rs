//! Point, bubble and line composers.

use svg::node::element::path::Data;
use tracing::debug;

use super::coordinates::CartesianCoordinates;
use super::data::Points;
use super::scene::{Element, NodeId, Scene};
use super::style::path_open;

/// Radius used when a series carries no z values.
pub const DEFAULT_POINT_RADIUS: f64 = 2.0;

/// One `circle` per datapoint, grouped under a `g` carrying the colours.
///
/// The radius is the z value when present, used as is.
pub fn points<P: Points + ?Sized>(
    scene: &mut Scene,
    parent: NodeId,
    coordinates: &CartesianCoordinates,
    data: &P,
    fill: &str,
    stroke: &str,
) -> NodeId {
    let group = scene.add_child(
        parent,
        Element::new("g").set("fill", fill).set("stroke", stroke),
    );
    let xs = data.x_positions();
    let radii = data.z_values();
    debug!(count = xs.len(), bubbles = radii.is_some(), "points");
    for (i, (x, y)) in xs.iter().zip(data.y_values()).enumerate() {
        let (cx, cy) = coordinates.map(*x, *y);
        let r = radii
            .and_then(|z| z.get(i).copied())
            .unwrap_or(DEFAULT_POINT_RADIUS);
        scene.add_child(
            group,
            Element::new("circle").set("cx", cx).set("cy", cy).set("r", r),
        );
    }
    group
}

/// Path data joining the mapped datapoints in order.
pub fn line_data<P: Points + ?Sized>(coordinates: &CartesianCoordinates, data: &P) -> Data {
    let mut path_data = Data::new();
    for (i, (x, y)) in data.x_positions().iter().zip(data.y_values()).enumerate() {
        let point = coordinates.map(*x, *y);
        path_data = if i == 0 {
            path_data.move_to(point)
        } else {
            path_data.line_to(point)
        };
    }
    path_data
}

/// An open `path` through every datapoint, stroked with `color`.
pub fn line<P: Points + ?Sized>(
    scene: &mut Scene,
    parent: NodeId,
    coordinates: &CartesianCoordinates,
    data: &P,
    color: &str,
) -> NodeId {
    debug!(count = data.size(), "line");
    scene.add_child(
        parent,
        path_open(line_data(coordinates, data), Some(color), None),
    )
}

#[cfg(test)]
mod tests {
    use svg::node::element::path::{Command, Data};

    use super::*;
    use crate::plot::coordinates::{Baseline, PlotArea};
    use crate::plot::data::NumericData;

    fn area() -> PlotArea {
        PlotArea {
            left: 100.0,
            right: 700.0,
            top: 50.0,
            bottom: 300.0,
        }
    }

    #[test]
    fn test_points_use_default_radius() {
        let data = NumericData::new(vec![0.0, 5.0, 10.0], vec![0.0, 5.0, 10.0]).unwrap();
        let coordinates = CartesianCoordinates::new(area(), &data, Baseline::Data).unwrap();
        let mut scene = Scene::new(Element::new("svg"));
        let root = scene.root();
        let group = points(&mut scene, root, &coordinates, &data, "#a6cee3", "#1f78b4");
        let circles = scene.node(group).children().to_vec();
        assert_eq!(circles.len(), 3);
        let middle = scene.node(circles[1]);
        assert_eq!(middle.get_number("cx"), 400.0);
        assert_eq!(middle.get_number("cy"), 175.0);
        assert_eq!(middle.get_number("r"), DEFAULT_POINT_RADIUS);
    }

    #[test]
    fn test_bubbles_use_z() {
        let data =
            NumericData::with_z(vec![0.0, 10.0], vec![0.0, 10.0], vec![4.0, 12.5]).unwrap();
        let coordinates = CartesianCoordinates::new(area(), &data, Baseline::Data).unwrap();
        let mut scene = Scene::new(Element::new("svg"));
        let root = scene.root();
        let group = points(&mut scene, root, &coordinates, &data, "red", "black");
        let radii: Vec<f64> = scene
            .node(group)
            .children()
            .iter()
            .map(|id| scene.node(*id).get_number("r"))
            .collect();
        assert_eq!(radii, vec![4.0, 12.5]);
    }

    #[test]
    fn test_line_path() {
        let data = NumericData::new(vec![0.0, 5.0, 10.0], vec![0.0, 10.0, 0.0]).unwrap();
        let coordinates = CartesianCoordinates::new(area(), &data, Baseline::Data).unwrap();
        let mut scene = Scene::new(Element::new("svg"));
        let root = scene.root();
        let id = line(&mut scene, root, &coordinates, &data, "#1f78b4");
        let node = scene.node(id);
        assert_eq!(node.attribute("fill"), Some("none"));
        assert_eq!(node.attribute("stroke"), Some("#1f78b4"));
        let parsed = Data::parse(node.attribute("d").unwrap()).unwrap();
        let commands: Vec<&Command> = parsed.iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], Command::Move(..)));
        assert!(matches!(commands[2], Command::Line(..)));
    }
}
