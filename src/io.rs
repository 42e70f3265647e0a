//! Loading chart data from YAML, JSON and CSV files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::plot::chart::GraphOptions;
use crate::plot::data::{CategoricalData, Dataset, NumericData};

/// One series as written in a chart file.
///
/// Either `labels` (categorical) or `x` (numeric) must be given.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SeriesRecord {
    pub name: Option<String>,
    pub labels: Option<Vec<String>>,
    pub x: Option<Vec<f64>>,
    pub y: Vec<f64>,
    pub z: Option<Vec<f64>>,
}

impl TryFrom<SeriesRecord> for Dataset {
    type Error = Error;

    fn try_from(record: SeriesRecord) -> Result<Dataset> {
        let dataset: Dataset = match (record.labels, record.x, record.z) {
            (Some(labels), _, _) => CategoricalData::new(labels, record.y)?.into(),
            (None, Some(x), Some(z)) => NumericData::with_z(x, record.y, z)?.into(),
            (None, Some(x), None) => NumericData::new(x, record.y)?.into(),
            (None, None, _) => return Err(Error::NotDefined("labels or x".to_string())),
        };
        Ok(match (dataset, record.name) {
            (Dataset::Categorical(data), Some(name)) => data.with_name(name).into(),
            (Dataset::Numeric(data), Some(name)) => data.with_name(name).into(),
            (dataset, None) => dataset,
        })
    }
}

/// Contents of a YAML or JSON chart file.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChartFile {
    pub options: GraphOptions,
    pub series: Vec<SeriesRecord>,
}

impl ChartFile {
    pub fn datasets(&self) -> Result<Vec<Dataset>> {
        self.series
            .iter()
            .cloned()
            .map(Dataset::try_from)
            .collect()
    }
}

/// Column names to read from a CSV file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvFields {
    pub x: Option<String>,
    pub y: String,
    pub z: Option<String>,
    pub category: Option<String>,
}

pub fn file_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .map_err(|err| Error::FileNotFound(format!("{}: {}", path.display(), err)))?;
    Ok(Box::new(BufReader::new(file)))
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|suffix| suffix.to_str())
        .unwrap_or_default()
        .to_lowercase()
}

/// Read a chart file, choosing the parser from the file extension.
pub fn read_chart_file(path: &Path) -> Result<ChartFile> {
    let reader = file_reader(path)?;
    let chart: ChartFile = match extension(path).as_str() {
        "json" => serde_json::from_reader(reader)?,
        "yaml" | "yml" => serde_yaml::from_reader(reader)?,
        other => {
            return Err(Error::ReaderError(format!(
                "unsupported chart file type '{}'",
                other
            )))
        }
    };
    debug!(path = %path.display(), series = chart.series.len(), "read chart file");
    Ok(chart)
}

pub fn is_csv(path: &Path) -> bool {
    matches!(extension(path).as_str(), "csv" | "tsv")
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
}

fn parse_value(value: &str, column: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        Error::ReaderError(format!("invalid number '{}' in column {}", value, column))
    })
}

/// Read one series from delimited text with a header row.
///
/// A `category` column gives categorical data, otherwise `x` is required.
pub fn read_csv<R: Read>(reader: R, delimiter: u8, fields: &CsvFields) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let y_index = column_index(&headers, &fields.y)?;
    let label_index = match &fields.category {
        Some(name) => Some(column_index(&headers, name)?),
        None => None,
    };
    let x_index = match (&fields.x, label_index) {
        (_, Some(_)) => None,
        (Some(name), None) => Some(column_index(&headers, name)?),
        (None, None) => return Err(Error::NotDefined("x-field or category".to_string())),
    };
    let z_index = match &fields.z {
        Some(name) => Some(column_index(&headers, name)?),
        None => None,
    };

    let mut labels = vec![];
    let mut x = vec![];
    let mut y = vec![];
    let mut z = vec![];
    for result in rdr.records() {
        let record = result?;
        let field = |index: usize| record.get(index).unwrap_or_default();
        y.push(parse_value(field(y_index), &fields.y)?);
        if let Some(index) = label_index {
            labels.push(field(index).to_string());
        }
        if let (Some(index), Some(name)) = (x_index, &fields.x) {
            x.push(parse_value(field(index), name)?);
        }
        if let (Some(index), Some(name)) = (z_index, &fields.z) {
            z.push(parse_value(field(index), name)?);
        }
    }
    debug!(rows = y.len(), "read csv");

    let dataset: Dataset = if label_index.is_some() {
        CategoricalData::new(labels, y)?.with_name(fields.y.clone()).into()
    } else if z_index.is_some() {
        NumericData::with_z(x, y, z)?.with_name(fields.y.clone()).into()
    } else {
        NumericData::new(x, y)?.with_name(fields.y.clone()).into()
    };
    Ok(dataset)
}

pub fn read_csv_file(path: &Path, fields: &CsvFields) -> Result<Dataset> {
    let delimiter = if extension(path) == "tsv" { b'\t' } else { b',' };
    read_csv(file_reader(path)?, delimiter, fields)
}
