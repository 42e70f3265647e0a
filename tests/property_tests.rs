use flexplot::plot::coordinates::{Baseline, CartesianCoordinates, PlotArea};
use flexplot::plot::data::{CategoricalData, DatasetCollection, NumericData, Series};
use flexplot::plot::geometry::Segment;
use proptest::prelude::*;

fn area() -> PlotArea {
    PlotArea {
        left: 100.0,
        right: 750.0,
        top: 50.0,
        bottom: 300.0,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn mapper_edges_land_on_area(
        xs in prop::collection::vec(-1_000.0f64..1_000.0, 2..30),
        ys in prop::collection::vec(-1_000.0f64..1_000.0, 2..30)
    ) {
        let n = xs.len().min(ys.len());
        let data = NumericData::new(xs[..n].to_vec(), ys[..n].to_vec()).expect("valid data");
        let [x_min, x_max] = data.x_extent().expect("x extent");
        let [y_min, y_max] = data.y_extent().expect("y extent");
        prop_assume!(x_max > x_min && y_max > y_min);

        let coordinates = CartesianCoordinates::new(area(), &data, Baseline::Data).expect("bind");
        prop_assert!(close(coordinates.map_x(x_min), 100.0));
        prop_assert!(close(coordinates.map_x(x_max), 750.0));
        prop_assert!(close(coordinates.map_y(y_min), 300.0));
        prop_assert!(close(coordinates.map_y(y_max), 50.0));
    }

    #[test]
    fn along_hits_both_endpoints(
        x1 in -500.0f64..500.0,
        y1 in -500.0f64..500.0,
        x2 in -500.0f64..500.0,
        y2 in -500.0f64..500.0,
        vertical in any::<bool>()
    ) {
        let end = if vertical { (x1, y2) } else { (x2, y2) };
        let segment = Segment::new((x1, y1), end);
        prop_assume!(segment.length() > 1e-3);
        prop_assume!(segment.is_vertical() || segment.width() > 1e-3);

        let start = segment.along(0.0);
        prop_assert!(close(start.0, x1) && close(start.1, y1));
        let finish = segment.along(1.0);
        prop_assert!(close(finish.0, end.0) && close(finish.1, end.1));
    }

    #[test]
    fn numeric_label_count(size in 1usize..60, max_labels in 1usize..30) {
        let xs: Vec<f64> = (0..size).map(|i| i as f64 * 1.5).collect();
        let data = NumericData::new(xs.clone(), xs).expect("valid data");
        prop_assert_eq!(data.x_labels(max_labels).len(), size.min(max_labels) + 1);
    }

    #[test]
    fn categorical_label_count(size in 1usize..60, max_labels in 1usize..30) {
        let labels: Vec<String> = (0..size).map(|i| format!("c{}", i)).collect();
        let data = CategoricalData::new(labels, vec![1.0; size]).expect("valid data");
        prop_assert_eq!(data.x_labels(max_labels).len(), size);
    }

    #[test]
    fn collection_floor_never_above_zero(
        a in prop::collection::vec(-100.0f64..100.0, 1..10),
        b in prop::collection::vec(-100.0f64..100.0, 1..10)
    ) {
        let first = NumericData::new(a.clone(), a).expect("valid data");
        let second = NumericData::new(b.clone(), b).expect("valid data");
        let collection: DatasetCollection<NumericData> = first + second;
        prop_assert!(collection.y_min().expect("y min") <= 0.0);
    }
}
