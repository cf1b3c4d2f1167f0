use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_FONTPATH: &str = "/usr/share/fonts/!:/usr/local/share/fonts/!";

/// Per-series overrides, keyed by series label in [`PlotOptions::series`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub filled: Option<bool>,
    pub filled_colour: Option<String>,
}

/// Everything that shapes the emitted gnuplot script.
///
/// Missing fields in a configuration file take the values of
/// [`PlotOptions::default`], and [`PlotOptions::set`] merges textual
/// `key=value` overrides on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Draw lines between points.
    pub lines: bool,
    /// Smooth lines with cubic splines. Ignored unless `lines` is set.
    pub smooth: bool,
    /// Fill every series down to the x axis.
    pub filled: bool,
    /// Fill colour, a gnuplot colour name or `#rrggbb`.
    pub filled_colour: String,
    pub opacity: f64,
    pub opacity_border: bool,
    pub font_face: String,
    pub font_size: u32,
    pub legend_location: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub series: BTreeMap<String, SeriesOptions>,
    pub fontpath: String,
    /// Resolution used to express the pixel size in inches for EPS output.
    pub dpi: f32,
    pub gnuplot: String,
    pub convert: String,
    /// Echo the script next to a path output with the `.plot` extension.
    pub save_script: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            lines: true,
            smooth: true,
            filled: false,
            filled_colour: "skyblue".to_string(),
            opacity: 1.0,
            opacity_border: false,
            font_face: "Minion Pro".to_string(),
            font_size: 12,
            legend_location: "outside right".to_string(),
            width: 800,
            height: 600,
            title: None,
            xlabel: None,
            ylabel: None,
            series: BTreeMap::new(),
            fontpath: DEFAULT_FONTPATH.to_string(),
            dpi: 100.0,
            gnuplot: "gnuplot".to_string(),
            convert: "convert".to_string(),
            save_script: false,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidOptionValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn valid_opacity(opacity: f64) -> bool {
    (0.0..=1.0).contains(&opacity)
}

fn valid_dpi(dpi: f32) -> bool {
    dpi.is_finite() && dpi > 0.0
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl PlotOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let options: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the ranges that the types alone do not enforce.
    pub fn validate(&self) -> Result<()> {
        if !valid_opacity(self.opacity) {
            return Err(invalid("opacity", &self.opacity.to_string()));
        }
        if !valid_dpi(self.dpi) {
            return Err(invalid("dpi", &self.dpi.to_string()));
        }
        Ok(())
    }

    /// Overrides a single option from its textual form.
    ///
    /// Besides the field names, `filled_<label>` and `filled_<label>_colour`
    /// address the per-series overrides. An empty value clears `title`,
    /// `xlabel` and `ylabel`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "lines" => self.lines = parse_bool(key, value)?,
            "smooth" => self.smooth = parse_bool(key, value)?,
            "filled" => self.filled = parse_bool(key, value)?,
            "filled_colour" => self.filled_colour = value.to_string(),
            "opacity" => {
                let opacity: f64 = parse_num(key, value)?;
                if !valid_opacity(opacity) {
                    return Err(invalid(key, value));
                }
                self.opacity = opacity;
            }
            "opacity_border" => self.opacity_border = parse_bool(key, value)?,
            "font_face" => self.font_face = value.to_string(),
            "font_size" => self.font_size = parse_num(key, value)?,
            "legend_location" => self.legend_location = value.to_string(),
            "width" => self.width = parse_num(key, value)?,
            "height" => self.height = parse_num(key, value)?,
            "title" => self.title = optional(value),
            "xlabel" => self.xlabel = optional(value),
            "ylabel" => self.ylabel = optional(value),
            "fontpath" => self.fontpath = value.to_string(),
            "dpi" => {
                let dpi: f32 = parse_num(key, value)?;
                if !valid_dpi(dpi) {
                    return Err(invalid(key, value));
                }
                self.dpi = dpi;
            }
            "gnuplot" => self.gnuplot = value.to_string(),
            "convert" => self.convert = value.to_string(),
            "save_script" => self.save_script = parse_bool(key, value)?,
            _ => return self.set_series(key, value),
        }
        Ok(())
    }

    fn set_series(&mut self, key: &str, value: &str) -> Result<()> {
        let rest = match key.strip_prefix("filled_") {
            Some(rest) if !rest.is_empty() => rest,
            _ => return Err(Error::UnknownOption(key.to_string())),
        };

        match rest.strip_suffix("_colour") {
            Some(label) if !label.is_empty() => {
                self.series.entry(label.to_string()).or_default().filled_colour =
                    Some(value.to_string());
            }
            _ => {
                self.series.entry(rest.to_string()).or_default().filled =
                    Some(parse_bool(key, value)?);
            }
        }
        Ok(())
    }

    /// Applies overrides in order, later keys win.
    pub fn merge<K, V, I>(&mut self, overrides: I) -> Result<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in overrides {
            self.set(key.as_ref(), value.as_ref())?;
        }
        Ok(())
    }

    pub fn is_filled(&self, label: &str) -> bool {
        self.filled
            || self
                .series
                .get(label)
                .and_then(|s| s.filled)
                .unwrap_or(false)
    }

    pub fn fill_colour(&self, label: &str) -> &str {
        self.series
            .get(label)
            .and_then(|s| s.filled_colour.as_deref())
            .unwrap_or(self.filled_colour.as_str())
    }
}

/// Splits a `key=value` command line override.
pub fn parse_override(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::MalformedOverride(s.to_string())),
    }
}
