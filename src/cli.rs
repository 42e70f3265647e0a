use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::plot::ShowLegend;

/// Top level arguments to `flexplot`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

/// `flexplot` subcommands
#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Render a chart from a data file.
    /// Called as `flexplot plot`
    Plot(PlotOptions),
}

/// Chart kinds
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// One bar per category, grouped side by side for several series
    #[default]
    Bar,
    /// Fixed size points
    Scatter,
    /// Points sized by the z values
    Bubble,
    /// Lines joining the points of each series
    Line,
    /// One spoke per category, one polygon per series
    Radar,
}

#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Paired qualitative palette
    #[default]
    Default,
    /// Paired palette with each light/dark pair swapped
    Inverse,
    Viridis,
}

/// Options to pass to `flexplot plot`
#[derive(Parser, Debug, Default, Clone)]
pub struct PlotOptions {
    /// Path to a YAML, JSON or CSV data file
    #[arg(long, short = 'i')]
    pub input: PathBuf,
    /// View to plot
    #[arg(long, short = 'v')]
    #[clap(value_enum)]
    pub view: View,
    /// Output filename (.svg or .png)
    #[arg(long, short = 'o', default_value_t = String::from("output.svg"))]
    pub output: String,
    /// Chart title
    #[arg(long, short = 't')]
    pub title: Option<String>,
    /// X-axis label
    #[arg(long = "x-label")]
    pub x_label: Option<String>,
    /// Y-axis label
    #[arg(long = "y-label")]
    pub y_label: Option<String>,
    /// Chart width
    #[arg(long)]
    pub width: Option<f64>,
    /// Chart height
    #[arg(long)]
    pub height: Option<f64>,
    /// X values column for CSV input
    #[arg(long = "x-field", short = 'x')]
    pub x_field: Option<String>,
    /// Y values column for CSV input
    #[arg(long = "y-field", short = 'y')]
    pub y_field: Option<String>,
    /// Z values (point radius) column for CSV input
    #[arg(long = "z-field", short = 'z')]
    pub z_field: Option<String>,
    /// Category labels column for CSV input
    #[arg(long = "category", short = 'c')]
    pub cat_field: Option<String>,
    /// Show a legend for multi-series charts
    #[arg(long = "legend", value_enum, default_value_t = ShowLegend::Default)]
    pub show_legend: ShowLegend,
    /// Colour palette for series
    #[arg(long, value_enum)]
    pub palette: Option<Palette>,
    /// Individual colours to modify palette (<index>=<hexcode>)
    #[arg(long)]
    pub color: Option<Vec<String>>,
}

/// Command line argument parser
pub fn parse() -> Arguments {
    Arguments::parse()
}
