use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use gplot_utils::image::convert_svg_to_png;
use gplot_utils::path::is_program_in_path;
use tempfile::TempPath;

use crate::data::{DataFile, Series};
use crate::error::{Error, Result};
use crate::options::PlotOptions;
use crate::output::{Output, OutputType};
use crate::script;
use crate::session::Session;

/// Renders series through gnuplot into a file or a writer.
///
/// Each call to [`GnuPlot::plot`] writes the series to temporary files,
/// feeds a fresh gnuplot process the script built from the options and
/// removes every temporary file before returning.
#[derive(Debug)]
pub struct GnuPlot {
    output: Output,
    output_type: OutputType,
    options: PlotOptions,
}

pub struct GnuPlotBuilder {
    output: Output,
    output_type: Option<OutputType>,
    options: PlotOptions,
    overrides: Vec<(String, String)>,
}

impl GnuPlotBuilder {
    pub fn output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = Some(output_type);
        self
    }

    pub fn options(mut self, options: PlotOptions) -> Self {
        self.options = options;
        self
    }

    /// Queues a textual override, applied on top of the options by
    /// [`GnuPlotBuilder::build`].
    pub fn option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<GnuPlot> {
        let mut options = self.options;
        options.merge(self.overrides)?;
        GnuPlot::new(self.output, self.output_type, options)
    }
}

fn temp_output(ext: &str) -> Result<TempPath> {
    let file = tempfile::Builder::new()
        .prefix("gplot-")
        .suffix(&format!(".gnuplot-output.{}", ext))
        .tempfile()?;
    Ok(file.into_temp_path())
}

impl GnuPlot {
    /// `output_type` overrides the extension of a path output and is
    /// required for a writer output.
    pub fn new<O: Into<Output>>(
        output: O,
        output_type: Option<OutputType>,
        options: PlotOptions,
    ) -> Result<Self> {
        options.validate()?;
        let output = output.into();
        let output_type = match (&output, output_type) {
            (_, Some(t)) => t,
            (Output::Path(path), None) => OutputType::from_path(path)?,
            (Output::Writer(_), None) => return Err(Error::MissingOutputType),
        };

        if output_type.needs_conversion() {
            log::debug!(
                "{} output is rendered as svg and converted with {}",
                output_type,
                options.convert
            );
        }

        Ok(Self {
            output,
            output_type,
            options,
        })
    }

    pub fn builder<O: Into<Output>>(output: O) -> GnuPlotBuilder {
        GnuPlotBuilder {
            output: output.into(),
            output_type: None,
            options: PlotOptions::default(),
            overrides: Vec::new(),
        }
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// The commands sent to gnuplot when rendering `files` to `render_path`.
    pub fn script(&self, render_path: &Path, files: &[DataFile]) -> Vec<String> {
        script::build(&self.options, self.output_type, render_path, files)
    }

    pub fn plot(&mut self, series: &[Series]) -> Result<()> {
        if series.is_empty() {
            return Err(Error::NoSeries);
        }
        let files = series
            .iter()
            .map(DataFile::write)
            .collect::<Result<Vec<_>>>()?;

        let converts = self.output_type.needs_conversion();
        if converts && !is_program_in_path(&self.options.convert) {
            return Err(Error::ProgramNotFound(self.options.convert.clone()));
        }

        // the path gnuplot writes to, and where the finished graph lands
        // before it is copied into a writer
        let mut temps = Vec::new();
        let render_path: PathBuf;
        let final_path: PathBuf;
        match &self.output {
            Output::Path(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                final_path = path.clone();
                if converts {
                    let temp = temp_output(self.output_type.render_extension())?;
                    render_path = temp.to_path_buf();
                    temps.push(temp);
                } else {
                    render_path = path.clone();
                }
            }
            Output::Writer(_) => {
                let temp = temp_output(self.output_type.render_extension())?;
                render_path = temp.to_path_buf();
                temps.push(temp);
                if converts {
                    let temp = temp_output(self.output_type.extension())?;
                    final_path = temp.to_path_buf();
                    temps.push(temp);
                } else {
                    final_path = render_path.clone();
                }
            }
        }

        let commands = self.script(&render_path, &files);
        if self.options.save_script {
            if let Output::Path(path) = &self.output {
                let script_path = path.with_extension("plot");
                log::debug!("saving script to {}", script_path.display());
                std::fs::write(&script_path, commands.join("\n") + "\n")?;
            }
        }

        Session::spawn(&self.options.gnuplot)?.run(&commands)?;

        if converts {
            convert_svg_to_png(&self.options.convert, &render_path, &final_path)
                .map_err(|e| Error::Conversion(e.to_string()))?;
        }

        if let Output::Writer(writer) = &mut self.output {
            let mut rendered = File::open(&final_path)?;
            std::io::copy(&mut rendered, writer)?;
            writer.flush()?;
        }

        log::info!(
            "plotted {} series to {}",
            series.len(),
            match &self.output {
                Output::Path(path) => path.display().to_string(),
                Output::Writer(_) => format!("writer ({})", self.output_type),
            }
        );

        for temp in temps {
            log::trace!("removing temp file {}", temp.display());
            temp.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_requires_type() {
        let err = GnuPlot::new(Output::writer(Vec::new()), None, PlotOptions::default());
        assert!(matches!(err, Err(Error::MissingOutputType)));

        let plot = GnuPlot::new(
            Output::writer(Vec::new()),
            Some(OutputType::Svg),
            PlotOptions::default(),
        )
        .unwrap();
        assert_eq!(plot.output_type(), OutputType::Svg);

        // `-o -` on the command line
        assert!(matches!(
            GnuPlot::new(Output::from_arg("-"), None, PlotOptions::default()),
            Err(Error::MissingOutputType)
        ));
    }

    #[test]
    fn type_inferred_or_overridden() {
        let plot = GnuPlot::new("graph.eps", None, PlotOptions::default()).unwrap();
        assert_eq!(plot.output_type(), OutputType::Eps);

        let plot = GnuPlot::new("graph.out", Some(OutputType::Png), PlotOptions::default()).unwrap();
        assert_eq!(plot.output_type(), OutputType::Png);

        assert!(matches!(
            GnuPlot::new("graph.out", None, PlotOptions::default()),
            Err(Error::UnknownOutputType(_))
        ));
    }

    #[test]
    fn builder_merges_overrides() {
        let plot = GnuPlot::builder("graph.svg")
            .option("filled", "true")
            .option("filled_familiar_colour", "red")
            .option("opacity", "0.5")
            .build()
            .unwrap();
        assert!(plot.options().filled);
        assert_eq!(plot.options().fill_colour("familiar"), "red");
        assert_eq!(plot.options().opacity, 0.5);

        assert!(GnuPlot::builder("graph.svg")
            .option("bogus", "1")
            .build()
            .is_err());
    }

    #[test]
    fn nothing_to_plot() {
        let mut plot = GnuPlot::new("graph.svg", None, PlotOptions::default()).unwrap();
        assert!(matches!(plot.plot(&[]), Err(Error::NoSeries)));
    }

    #[test]
    fn invalid_series_fails_before_gnuplot() {
        let mut options = PlotOptions::default();
        options.gnuplot = "gplot-no-such-gnuplot".to_string();
        let mut plot = GnuPlot::new("graph.svg", None, options).unwrap();
        let series = [Series::new("empty", vec![])];
        assert!(matches!(plot.plot(&series), Err(Error::EmptySeries(_))));
    }

    #[test]
    fn missing_gnuplot() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = PlotOptions::default();
        options.gnuplot = "gplot-no-such-gnuplot".to_string();
        let mut plot = GnuPlot::new(dir.path().join("graph.svg"), None, options).unwrap();
        let series = [Series::new("a", vec![vec![1.0, 2.0]])];
        assert!(matches!(
            plot.plot(&series),
            Err(Error::ProgramNotFound(p)) if p == "gplot-no-such-gnuplot"
        ));
    }
}
