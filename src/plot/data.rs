//! Dataset model: single categorical or numeric series, and collections of
//! series drawn on shared axes.

use std::ops::Add;

use crate::error::{Error, Result};
use crate::utils::{float_extent, format_label, spaced_values};

/// Default cap on the number of numeric x-axis bins.
pub const DEFAULT_MAX_LABELS: usize = 20;

/// Capabilities shared by every plottable series and by collections.
pub trait Series {
    /// Number of datapoints (or categories).
    fn size(&self) -> usize;

    /// `[min, max]` of the numeric x values, `None` for categorical data.
    fn x_extent(&self) -> Option<[f64; 2]>;

    /// `[min, max]` of the y values, `None` when empty.
    fn y_extent(&self) -> Option<[f64; 2]>;

    fn x_labels(&self, max_labels: usize) -> Vec<String>;

    /// `n + 1` labels evenly spaced from the lowest to the highest y value.
    fn y_labels(&self, n: usize) -> Vec<String> {
        match self.y_extent() {
            Some([min, max]) => spaced_values(min, max, n)
                .into_iter()
                .map(format_label)
                .collect(),
            None => vec![],
        }
    }

    fn x_min(&self) -> Option<f64> {
        self.x_extent().map(|extent| extent[0])
    }

    fn x_max(&self) -> Option<f64> {
        self.x_extent().map(|extent| extent[1])
    }

    fn y_min(&self) -> Option<f64> {
        self.y_extent().map(|extent| extent[0])
    }

    fn y_max(&self) -> Option<f64> {
        self.y_extent().map(|extent| extent[1])
    }
}

/// A single series whose individual points can be plotted.
pub trait Points: Series {
    fn name(&self) -> Option<&str>;

    fn y_values(&self) -> &[f64];

    /// x coordinate of each point in data space. Categories sit at the
    /// centre of their slot, `i + 0.5`.
    fn x_positions(&self) -> Vec<f64>;

    fn z_values(&self) -> Option<&[f64]> {
        None
    }
}

fn numeric_labels(extent: Option<[f64; 2]>, size: usize, max_labels: usize) -> Vec<String> {
    match extent {
        Some([min, max]) => spaced_values(min, max, size.min(max_labels))
            .into_iter()
            .map(format_label)
            .collect(),
        None => vec![],
    }
}

fn check_length(field: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::LengthMismatch {
            field: field.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Bar-chart style data: one value per category label.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoricalData {
    labels: Vec<String>,
    values: Vec<f64>,
    name: Option<String>,
}

impl CategoricalData {
    pub fn new<I, S>(labels: I, values: Vec<f64>) -> Result<CategoricalData>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        check_length("y", labels.len(), values.len())?;
        Ok(CategoricalData {
            labels,
            values,
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> CategoricalData {
        self.name = Some(name.into());
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Series for CategoricalData {
    fn size(&self) -> usize {
        self.labels.len()
    }

    fn x_extent(&self) -> Option<[f64; 2]> {
        None
    }

    fn y_extent(&self) -> Option<[f64; 2]> {
        float_extent(&self.values)
    }

    fn x_labels(&self, _max_labels: usize) -> Vec<String> {
        self.labels.clone()
    }
}

impl Points for CategoricalData {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn y_values(&self) -> &[f64] {
        &self.values
    }

    fn x_positions(&self) -> Vec<f64> {
        (0..self.labels.len()).map(|i| i as f64 + 0.5).collect()
    }
}

/// Scatter style data with numeric x, y and optional z (point radius).
#[derive(Clone, Debug, PartialEq)]
pub struct NumericData {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Option<Vec<f64>>,
    name: Option<String>,
}

impl NumericData {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<NumericData> {
        check_length("y", x.len(), y.len())?;
        Ok(NumericData {
            x,
            y,
            z: None,
            name: None,
        })
    }

    pub fn with_z(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<NumericData> {
        let mut data = NumericData::new(x, y)?;
        check_length("z", data.y.len(), z.len())?;
        data.z = Some(z);
        Ok(data)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> NumericData {
        self.name = Some(name.into());
        self
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x
    }
}

impl Series for NumericData {
    fn size(&self) -> usize {
        self.x.len()
    }

    fn x_extent(&self) -> Option<[f64; 2]> {
        float_extent(&self.x)
    }

    fn y_extent(&self) -> Option<[f64; 2]> {
        float_extent(&self.y)
    }

    fn x_labels(&self, max_labels: usize) -> Vec<String> {
        numeric_labels(self.x_extent(), self.size(), max_labels)
    }
}

impl Points for NumericData {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn y_values(&self) -> &[f64] {
        &self.y
    }

    fn x_positions(&self) -> Vec<f64> {
        self.x.clone()
    }

    fn z_values(&self) -> Option<&[f64]> {
        self.z.as_deref()
    }
}

/// Either kind of series, for callers that decide at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
    Categorical(CategoricalData),
    Numeric(NumericData),
}

impl From<CategoricalData> for Dataset {
    fn from(data: CategoricalData) -> Self {
        Dataset::Categorical(data)
    }
}

impl From<NumericData> for Dataset {
    fn from(data: NumericData) -> Self {
        Dataset::Numeric(data)
    }
}

impl Dataset {
    pub fn is_categorical(&self) -> bool {
        matches!(self, Dataset::Categorical(_))
    }
}

impl Series for Dataset {
    fn size(&self) -> usize {
        match self {
            Dataset::Categorical(data) => data.size(),
            Dataset::Numeric(data) => data.size(),
        }
    }

    fn x_extent(&self) -> Option<[f64; 2]> {
        match self {
            Dataset::Categorical(data) => data.x_extent(),
            Dataset::Numeric(data) => data.x_extent(),
        }
    }

    fn y_extent(&self) -> Option<[f64; 2]> {
        match self {
            Dataset::Categorical(data) => data.y_extent(),
            Dataset::Numeric(data) => data.y_extent(),
        }
    }

    fn x_labels(&self, max_labels: usize) -> Vec<String> {
        match self {
            Dataset::Categorical(data) => data.x_labels(max_labels),
            Dataset::Numeric(data) => data.x_labels(max_labels),
        }
    }
}

impl Points for Dataset {
    fn name(&self) -> Option<&str> {
        match self {
            Dataset::Categorical(data) => data.name(),
            Dataset::Numeric(data) => data.name(),
        }
    }

    fn y_values(&self) -> &[f64] {
        match self {
            Dataset::Categorical(data) => data.y_values(),
            Dataset::Numeric(data) => data.y_values(),
        }
    }

    fn x_positions(&self) -> Vec<f64> {
        match self {
            Dataset::Categorical(data) => data.x_positions(),
            Dataset::Numeric(data) => data.x_positions(),
        }
    }

    fn z_values(&self) -> Option<&[f64]> {
        match self {
            Dataset::Categorical(data) => data.z_values(),
            Dataset::Numeric(data) => data.z_values(),
        }
    }
}

/// Several series plotted together, with their assigned colours.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetCollection<T> {
    datasets: Vec<T>,
    fills: Vec<String>,
    strokes: Vec<String>,
}

impl<T> Default for DatasetCollection<T> {
    fn default() -> Self {
        DatasetCollection {
            datasets: vec![],
            fills: vec![],
            strokes: vec![],
        }
    }
}

impl<T: Points> DatasetCollection<T> {
    pub fn new(datasets: Vec<T>) -> DatasetCollection<T> {
        DatasetCollection {
            datasets,
            ..Default::default()
        }
    }

    /// A collection holding exactly `first` and `second`, in that order.
    pub fn combine(first: T, second: T) -> DatasetCollection<T> {
        DatasetCollection::new(vec![first, second])
    }

    pub fn push(&mut self, data: T) {
        self.datasets.push(data);
    }

    pub fn datasets(&self) -> &[T] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Give every dataset that has no colours yet a fill and a stroke.
    ///
    /// Dataset `i` is filled with `palette[i]` and stroked with the paired
    /// entry `palette[i ^ 1]`, both wrapping at the palette length.
    pub fn assign_colors(&mut self, palette: &[String]) {
        if palette.is_empty() {
            return;
        }
        for i in self.fills.len()..self.datasets.len() {
            self.fills.push(palette[i % palette.len()].clone());
        }
        for i in self.strokes.len()..self.datasets.len() {
            self.strokes.push(palette[(i ^ 1) % palette.len()].clone());
        }
    }

    pub fn fill(&self, index: usize) -> Option<&str> {
        self.fills.get(index).map(String::as_str)
    }

    pub fn stroke(&self, index: usize) -> Option<&str> {
        self.strokes.get(index).map(String::as_str)
    }

    fn index_extent(&self, index: usize) -> Option<[f64; 2]> {
        let values: Vec<f64> = self
            .datasets
            .iter()
            .filter_map(|data| data.y_values().get(index).copied())
            .collect();
        float_extent(&values).map(|[min, max]| [min.min(0.0), max])
    }

    /// Lowest value at `index` across all member series, floored at zero.
    pub fn index_y_min(&self, index: usize) -> Option<f64> {
        self.index_extent(index).map(|extent| extent[0])
    }

    /// Highest value at `index` across all member series.
    pub fn index_y_max(&self, index: usize) -> Option<f64> {
        self.index_extent(index).map(|extent| extent[1])
    }

    /// `n + 1` labels spanning the values found at `index`.
    pub fn index_y_labels(&self, index: usize, n: usize) -> Vec<String> {
        match self.index_extent(index) {
            Some([min, max]) => spaced_values(min, max, n)
                .into_iter()
                .map(format_label)
                .collect(),
            None => vec![],
        }
    }
}

impl<T: Points> Series for DatasetCollection<T> {
    fn size(&self) -> usize {
        self.datasets.first().map(Series::size).unwrap_or(0)
    }

    fn x_extent(&self) -> Option<[f64; 2]> {
        self.datasets
            .iter()
            .filter_map(Series::x_extent)
            .reduce(|a, b| [a[0].min(b[0]), a[1].max(b[1])])
    }

    /// The floor is pinned at or below zero.
    fn y_extent(&self) -> Option<[f64; 2]> {
        self.datasets
            .iter()
            .filter_map(Series::y_extent)
            .reduce(|a, b| [a[0].min(b[0]), a[1].max(b[1])])
            .map(|[min, max]| [min.min(0.0), max])
    }

    fn x_labels(&self, max_labels: usize) -> Vec<String> {
        match self.x_extent() {
            Some(extent) => numeric_labels(Some(extent), self.size(), max_labels),
            None => self
                .datasets
                .first()
                .map(|data| data.x_labels(max_labels))
                .unwrap_or_default(),
        }
    }
}

impl Add for NumericData {
    type Output = DatasetCollection<NumericData>;

    fn add(self, other: NumericData) -> Self::Output {
        DatasetCollection::combine(self, other)
    }
}

impl Add for CategoricalData {
    type Output = DatasetCollection<CategoricalData>;

    fn add(self, other: CategoricalData) -> Self::Output {
        DatasetCollection::combine(self, other)
    }
}

impl Add for Dataset {
    type Output = DatasetCollection<Dataset>;

    fn add(self, other: Dataset) -> Self::Output {
        DatasetCollection::combine(self, other)
    }
}

impl<T: Points> Add<T> for DatasetCollection<T> {
    type Output = DatasetCollection<T>;

    fn add(mut self, other: T) -> Self::Output {
        self.push(other);
        self
    }
}
