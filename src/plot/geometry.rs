use super::scene::{Element, Node};

/// A point in drawing space.
pub type Point = (f64, f64);

/// A straight line segment between two fixed endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Segment {
        Segment { start, end }
    }

    /// Read the endpoints of a `line` node. Missing coordinates are `NaN`.
    pub fn from_node(node: &Node) -> Segment {
        Segment {
            start: (node.get_number("x1"), node.get_number("y1")),
            end: (node.get_number("x2"), node.get_number("y2")),
        }
    }

    /// A `line` element spanning this segment.
    pub fn to_element(&self) -> Element {
        Element::new("line")
            .set("x1", self.start.0)
            .set("x2", self.end.0)
            .set("y1", self.start.1)
            .set("y2", self.end.1)
    }

    pub fn width(&self) -> f64 {
        (self.end.0 - self.start.0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.end.1 - self.start.1).abs()
    }

    pub fn length(&self) -> f64 {
        self.width().hypot(self.height())
    }

    pub fn slope(&self) -> f64 {
        (self.end.1 - self.start.1) / (self.end.0 - self.start.0)
    }

    pub fn is_vertical(&self) -> bool {
        self.start.0 == self.end.0
    }

    /// The point `percent` of the way along the segment, measured by length
    /// from `start`.
    ///
    /// Values outside `[0, 1]` extrapolate beyond the endpoints.
    pub fn along(&self, percent: f64) -> Point {
        let (x1, y1) = self.start;
        let (x2, y2) = self.end;
        let target = percent * self.length();

        if self.is_vertical() {
            return if y1 > y2 {
                (x1, y1 - target)
            } else {
                (x1, y1 + target)
            };
        }

        let slope = self.slope();
        // roots of (x - x1)^2 * (1 + slope^2) = target^2
        let offset = target.abs() / (1.0 + slope * slope).sqrt();
        let (x_a, x_b) = (x1 + offset, x1 - offset);
        // keep the root on the same side of x1 as x2, or the opposite side
        // when walking backwards
        let toward_end = (x2 > x1) == (percent >= 0.0);
        let x = if toward_end { x_a } else { x_b };
        (x, slope * (x - x1) + y1)
    }

    /// Unit vector perpendicular to the segment.
    pub fn normal(&self) -> Point {
        let length = self.length();
        if length == 0.0 {
            return (0.0, 0.0);
        }
        (
            -(self.end.1 - self.start.1) / length,
            (self.end.0 - self.start.0) / length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_relative_eq!(actual.0, expected.0, epsilon = 1e-9);
        assert_relative_eq!(actual.1, expected.1, epsilon = 1e-9);
    }

    #[test]
    fn test_along_endpoints() {
        let segments = [
            Segment::new((0.0, 0.0), (3.0, 4.0)),
            Segment::new((10.0, 5.0), (-2.0, 1.0)),
            Segment::new((4.0, 10.0), (4.0, 2.0)),
            Segment::new((4.0, 2.0), (4.0, 10.0)),
            Segment::new((100.0, 300.0), (700.0, 300.0)),
        ];
        for segment in segments.iter() {
            assert_point_eq(segment.along(0.0), segment.start);
            assert_point_eq(segment.along(1.0), segment.end);
        }
    }

    #[test]
    fn test_along_midpoint() {
        let segment = Segment::new((0.0, 0.0), (3.0, 4.0));
        assert_point_eq(segment.along(0.5), (1.5, 2.0));
        let backwards = Segment::new((3.0, 4.0), (0.0, 0.0));
        assert_point_eq(backwards.along(0.2), (2.4, 3.2));
    }

    #[test]
    fn test_along_vertical() {
        let up = Segment::new((5.0, 100.0), (5.0, 0.0));
        assert_point_eq(up.along(0.25), (5.0, 75.0));
        let down = Segment::new((5.0, 0.0), (5.0, 100.0));
        assert_point_eq(down.along(0.25), (5.0, 25.0));
    }

    #[test]
    fn test_along_extrapolates() {
        let segment = Segment::new((0.0, 0.0), (10.0, 0.0));
        assert_point_eq(segment.along(1.5), (15.0, 0.0));
        assert_point_eq(segment.along(-0.5), (-5.0, 0.0));
    }

    #[test]
    fn test_measurements() {
        let segment = Segment::new((1.0, 1.0), (4.0, 5.0));
        assert_relative_eq!(segment.length(), 5.0);
        assert_relative_eq!(segment.width(), 3.0);
        assert_relative_eq!(segment.height(), 4.0);
        assert_relative_eq!(segment.slope(), 4.0 / 3.0);
        assert_point_eq(segment.normal(), (-0.8, 0.6));
    }

    #[test]
    fn test_node_round_trip() {
        use crate::plot::scene::Scene;
        let segment = Segment::new((1.0, 2.0), (3.0, 4.5));
        let scene = Scene::new(segment.to_element());
        assert_eq!(Segment::from_node(scene.node(scene.root())), segment);
    }
}
