//! Bar chart composers.

use tracing::debug;

use super::coordinates::CartesianCoordinates;
use super::data::{DatasetCollection, Points};
use super::scene::{Element, NodeId, Scene};

/// Gap left between neighbouring bars.
pub const BAR_SPACING: f64 = 2.0;

/// The value bars grow from: zero, or the nearest edge of the range when
/// zero lies outside it.
fn base_value(coordinates: &CartesianCoordinates) -> f64 {
    0.0_f64.clamp(coordinates.range[0], coordinates.range[1])
}

fn bar_rect(coordinates: &CartesianCoordinates, x: f64, width: f64, value: f64) -> Element {
    let base = base_value(coordinates);
    let span = coordinates.range[1] - coordinates.range[0];
    let height = (value - base).abs() / span * coordinates.area.height();
    Element::new("rect")
        .set("x", x)
        .set("y", coordinates.map_y(value.max(base)))
        .set("width", (width - BAR_SPACING).max(0.0))
        .set("height", height)
}

/// One bar per category, each filling its slot less [`BAR_SPACING`].
///
/// Returns the id of the group holding the bars.
pub fn bars<P: Points + ?Sized>(
    scene: &mut Scene,
    parent: NodeId,
    coordinates: &CartesianCoordinates,
    data: &P,
    fill: &str,
) -> NodeId {
    let values = data.y_values();
    let slot = coordinates.area.width() / values.len().max(1) as f64;
    debug!(count = values.len(), slot, "bars");
    let group = scene.add_child(parent, Element::new("g").set("fill", fill));
    for (i, value) in values.iter().enumerate() {
        let x = coordinates.area.left + i as f64 * slot;
        scene.add_child(group, bar_rect(coordinates, x, slot, *value));
    }
    group
}

/// Side by side bars for every member of `collection`, one group per series.
///
/// Each category slot is split into equal sub-slots in series order.
pub fn grouped_bars<T: Points>(
    scene: &mut Scene,
    parent: NodeId,
    coordinates: &CartesianCoordinates,
    collection: &DatasetCollection<T>,
) -> Vec<NodeId> {
    let categories = collection
        .datasets()
        .iter()
        .map(|data| data.y_values().len())
        .max()
        .unwrap_or(0);
    let slot = coordinates.area.width() / categories.max(1) as f64;
    let sub_slot = slot / collection.len().max(1) as f64;
    debug!(categories, series = collection.len(), sub_slot, "grouped bars");
    collection
        .datasets()
        .iter()
        .enumerate()
        .map(|(s, data)| {
            let group = scene.add_child(
                parent,
                Element::new("g").set("fill", collection.fill(s).unwrap_or("black")),
            );
            for (i, value) in data.y_values().iter().enumerate() {
                let x = coordinates.area.left + i as f64 * slot + s as f64 * sub_slot;
                scene.add_child(group, bar_rect(coordinates, x, sub_slot, *value));
            }
            group
        })
        .collect()
}
