//! Mappings from data space to drawing space.

use coord_transforms::d2::polar2cartesian;
use coord_transforms::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::{format_label, linear_scale_float, spaced_values};

use super::data::Series;
use super::geometry::{Point, Segment};

/// The drawing rectangle, in drawing units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// How the y range is derived from the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Baseline {
    /// Use the series' own y extent.
    #[default]
    Data,
    /// Widen the y extent so that it includes zero.
    Zero,
}

fn checked_span(axis: &str, extent: [f64; 2]) -> Result<[f64; 2]> {
    let span = extent[1] - extent[0];
    if span == 0.0 || !span.is_finite() {
        return Err(Error::DegenerateDomain {
            axis: axis.to_string(),
            value: extent[0],
        });
    }
    Ok(extent)
}

/// Affine mapping of a series' domain and range onto a [`PlotArea`].
///
/// The y axis is inverted so that the largest value sits on the top edge.
#[derive(Clone, Debug, PartialEq)]
pub struct CartesianCoordinates {
    pub area: PlotArea,
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl CartesianCoordinates {
    pub fn new<S: Series + ?Sized>(
        area: PlotArea,
        data: &S,
        baseline: Baseline,
    ) -> Result<CartesianCoordinates> {
        let mut coordinates = CartesianCoordinates {
            area,
            domain: [f64::NAN; 2],
            range: [f64::NAN; 2],
        };
        coordinates.rebind(data, baseline)?;
        Ok(coordinates)
    }

    /// Recompute domain and range from `data`.
    ///
    /// Geometry mapped before the call keeps its old coordinates. On error
    /// the mapping is left unchanged.
    pub fn rebind<S: Series + ?Sized>(&mut self, data: &S, baseline: Baseline) -> Result<()> {
        let domain = match data.x_extent() {
            Some(extent) => checked_span("x", extent)?,
            None if data.size() > 0 => [0.0, data.size() as f64],
            None => return Err(Error::EmptyDataset),
        };
        let range = match (data.y_extent(), baseline) {
            (None, _) => return Err(Error::EmptyDataset),
            (Some(extent), Baseline::Data) => extent,
            (Some([min, max]), Baseline::Zero) => [min.min(0.0), max.max(0.0)],
        };
        let range = checked_span("y", range)?;
        debug!(?domain, ?range, "bind coordinates");
        self.domain = domain;
        self.range = range;
        Ok(())
    }

    pub fn map_x(&self, x: f64) -> f64 {
        linear_scale_float(x, &self.domain, &[self.area.left, self.area.right])
    }

    pub fn map_y(&self, y: f64) -> f64 {
        linear_scale_float(y, &self.range, &[self.area.bottom, self.area.top])
    }

    pub fn map(&self, x: f64, y: f64) -> Point {
        (self.map_x(x), self.map_y(y))
    }

    /// `n + 1` labels evenly spaced over the bound y range.
    pub fn y_labels(&self, n: usize) -> Vec<String> {
        spaced_values(self.range[0], self.range[1], n)
            .into_iter()
            .map(format_label)
            .collect()
    }
}

/// Mapping of (angle, fraction of radius) onto a circle in drawing space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarCoordinates {
    center: Point,
    pub radius: f64,
}

impl PolarCoordinates {
    pub fn new(center: Point, radius: f64) -> PolarCoordinates {
        PolarCoordinates { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// `angle` is in radians; `percent` scales the radius.
    pub fn map(&self, angle: f64, percent: f64) -> Point {
        let cartesian = polar2cartesian(&Vector2::new(percent * self.radius, angle));
        (self.center.0 + cartesian[0], self.center.1 + cartesian[1])
    }

    /// The segment from the centre to the edge of the circle at `angle`.
    pub fn spoke(&self, angle: f64) -> Segment {
        Segment::new(self.center, self.map(angle, 1.0))
    }
}
