use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gplot_utils::dpi::{inch_point_from_pixel, Point};
use gplot_utils::path::extension_of;

use crate::error::{Error, Result};
use crate::options::PlotOptions;
use crate::script::quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputType {
    Eps,
    Svg,
    /// Rendered as SVG, then converted with ImageMagick. gnuplot's libgd
    /// PNG terminal renders poorly.
    Png,
}

impl OutputType {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "eps" => Ok(OutputType::Eps),
            "svg" => Ok(OutputType::Svg),
            "png" => Ok(OutputType::Png),
            _ => Err(Error::UnknownOutputType(ext.to_string())),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        match extension_of(&path) {
            Some(ext) => Self::from_extension(&ext),
            None => Err(Error::UnknownOutputType(
                path.as_ref().display().to_string(),
            )),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputType::Eps => "eps",
            OutputType::Svg => "svg",
            OutputType::Png => "png",
        }
    }

    /// Extension of the file gnuplot itself writes.
    pub fn render_extension(&self) -> &'static str {
        match self {
            OutputType::Png => "svg",
            other => other.extension(),
        }
    }

    pub fn needs_conversion(&self) -> bool {
        matches!(self, OutputType::Png)
    }

    /// Argument of `set term`.
    pub fn terminal(&self, opts: &PlotOptions) -> String {
        match self {
            OutputType::Eps => {
                let size = inch_point_from_pixel(&Point::new(opts.width, opts.height), &opts.dpi);
                format!(
                    "postscript eps enhanced color font {} {} size {}in, {}in",
                    quote(&opts.font_face),
                    opts.font_size,
                    size.x,
                    size.y
                )
            }
            OutputType::Svg | OutputType::Png => format!(
                "svg font {} size {}, {}",
                quote(&format!("{},{}", opts.font_face, opts.font_size)),
                opts.width,
                opts.height
            ),
        }
    }
}

impl FromStr for OutputType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where the finished graph goes.
pub enum Output {
    Path(PathBuf),
    /// The graph is rendered to a temporary file and copied into the writer.
    Writer(Box<dyn Write>),
}

impl Output {
    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        Output::Path(path.into())
    }

    pub fn writer<W: Write + 'static>(writer: W) -> Self {
        Output::Writer(Box::new(writer))
    }

    /// A command-line output argument: `-` is stdout, anything else a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Output::writer(std::io::stdout())
        } else {
            Output::path(arg)
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Output::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

impl From<PathBuf> for Output {
    fn from(path: PathBuf) -> Self {
        Output::Path(path)
    }
}

impl From<&Path> for Output {
    fn from(path: &Path) -> Self {
        Output::Path(path.to_path_buf())
    }
}

impl From<&str> for Output {
    fn from(path: &str) -> Self {
        Output::Path(PathBuf::from(path))
    }
}
