//! `flexplot` renders statistical charts (bar, scatter, bubble, line and
//! radar) as SVG markup from categorical or numeric data series.
//!
//! The layout engine lives in [`plot`]: a dataset is bound to a coordinate
//! mapper, axes and series geometry are appended to a [`plot::scene::Scene`],
//! and the scene is serialized to markup.

/// The flexplot Command Line Interface.
pub mod cli;

/// Error types.
pub mod error;

/// Functions for reading chart data files.
pub mod io;

/// Generate a plot.
pub mod plot;

/// Dispatch of parsed command line arguments.
pub mod run;

/// Utility functions.
pub mod utils;
