use std::io::{BufWriter, Write};
use std::path::Path;

use globwalk::glob;
use gplot_utils::path::sanitize_file_component;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

pub const MAX_DIMENSIONS: usize = 3;

/// One labelled dataset. Every point carries 1 to 3 coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Vec<f64>>,
}

impl Series {
    pub fn new<S: Into<String>>(label: S, points: Vec<Vec<f64>>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn from_columns<S: Into<String>>(label: S, xs: &[f64], ys: &[f64]) -> Self {
        let points = xs.iter().zip(ys).map(|(x, y)| vec![*x, *y]).collect();
        Self::new(label, points)
    }

    /// Coordinates per point, taken from the first point.
    pub fn dimensions(&self) -> usize {
        self.points.first().map_or(0, |p| p.len())
    }

    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(Error::EmptySeries(self.label.clone()));
        }
        if let Some(bad) = self
            .points
            .iter()
            .find(|p| p.is_empty() || p.len() > MAX_DIMENSIONS)
        {
            return Err(Error::InvalidDimensions {
                label: self.label.clone(),
                dims: bad.len(),
            });
        }
        Ok(())
    }

    /// Reads numeric rows separated by whitespace, commas or tabs. Blank
    /// lines and lines starting with `#` are skipped, as gnuplot does. The
    /// label is the file stem.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let label = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .delimiter(b'\t')
            .from_path(path)
            .map_err(|source| Error::Data {
                path: path.to_path_buf(),
                source,
            })?;

        let mut points = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| Error::Data {
                path: path.to_path_buf(),
                source,
            })?;
            let line = record.position().map_or(0, |p| p.line());
            let row = record.iter().collect::<Vec<_>>().join(" ");

            let point = parse_row(&row).map_err(|value| Error::InvalidNumber {
                path: path.to_path_buf(),
                line,
                value,
            })?;
            if !point.is_empty() {
                points.push(point);
            }
        }

        Ok(Self::new(label, points))
    }
}

pub const DATA_EXTENSIONS: [&str; 3] = ["csv", "dat", "tsv"];

/// Loads every data file under `dir`, recursively, in natural order of
/// their paths.
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Series>> {
    let dir = dir.as_ref();
    let matcher = format!("{}/**/*.{{{}}}", dir.display(), DATA_EXTENSIONS.join(","));
    let mut files = glob(&matcher)?.collect::<std::result::Result<Vec<_>, _>>()?;
    files.sort_by(|a, b| natord::compare(&a.path().to_string_lossy(), &b.path().to_string_lossy()));

    if files.is_empty() {
        return Err(Error::NoDataFiles(dir.to_path_buf()));
    }

    files
        .iter()
        .map(|entry| {
            log::debug!("reading {}", entry.path().display());
            Series::from_path(entry.path())
        })
        .collect()
}

fn parse_row(row: &str) -> std::result::Result<Vec<f64>, String> {
    row.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<f64>().map_err(|_| v.to_string()))
        .collect()
}

/// A series written to a temporary file for gnuplot to read. The file is
/// removed when this is dropped.
#[derive(Debug)]
pub struct DataFile {
    pub label: String,
    pub dimensions: usize,
    file: NamedTempFile,
}

impl DataFile {
    pub fn write(series: &Series) -> Result<Self> {
        series.validate()?;

        let file = tempfile::Builder::new()
            .prefix("gplot-")
            .suffix(&format!(
                ".gnuplot-{}",
                sanitize_file_component(&series.label)
            ))
            .tempfile()?;

        {
            let mut w = BufWriter::new(file.as_file());
            for coords in series.points.iter() {
                for (i, x) in coords.iter().enumerate() {
                    if i > 0 {
                        w.write_all(b" ")?;
                    }
                    write!(w, "{}", x)?;
                }
                w.write_all(b"\n")?;
            }
            w.flush()?;
        }
        log::trace!(
            "wrote {} points of `{}` to {}",
            series.points.len(),
            series.label,
            file.path().display()
        );

        Ok(Self {
            label: series.label.clone(),
            dimensions: series.dimensions(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
