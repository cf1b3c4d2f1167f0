//! Drive gnuplot from Rust: options with defaults, series written to
//! temporary data files, a command script piped to gnuplot's stdin and an
//! optional SVG to PNG conversion through ImageMagick.

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod plot;
pub mod script;
pub mod session;

pub use data::{DataFile, Series};
pub use error::{Error, Result};
pub use options::{PlotOptions, SeriesOptions};
pub use output::{Output, OutputType};
pub use plot::{GnuPlot, GnuPlotBuilder};
