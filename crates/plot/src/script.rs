//! gnuplot command scripts.
//!
//! A script is a list of commands sent one per line on gnuplot's stdin. The
//! data itself never goes through the script: every series is referenced by
//! the path of its [`DataFile`].

use std::path::Path;

use crate::data::DataFile;
use crate::options::PlotOptions;
use crate::output::OutputType;

/// Wraps `s` in double quotes, escaping `\` and `"`.
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// `plot` for 1 or 2 coordinates, `splot` for 3.
pub fn plot_command(dimensions: usize) -> &'static str {
    if dimensions >= 3 {
        "splot"
    } else {
        "plot"
    }
}

fn using(dimensions: usize) -> String {
    (1..=dimensions)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(":")
}

/// The plot command for all `files`; the command is picked from the first.
pub fn plot_line(files: &[DataFile], opts: &PlotOptions) -> String {
    let mut line = String::new();
    let Some(first) = files.first() else {
        return line;
    };
    line.push_str(plot_command(first.dimensions));

    for (n, file) in files.iter().enumerate() {
        line.push_str(if n == 0 { " " } else { ", " });
        line.push_str(&quote(&file.path().to_string_lossy()));
        line.push_str(&format!(" using {}", using(file.dimensions)));

        if opts.smooth && opts.lines {
            line.push_str(" smooth csplines");
        }

        // the title has to come before `with`
        line.push_str(&format!(" title {}", quote(&file.label)));

        let filled = opts.is_filled(&file.label);
        if opts.lines && !filled {
            line.push_str(" with lines");
        }
        if filled {
            line.push_str(&format!(
                " with filledcurves x1 lt rgb {}",
                quote(opts.fill_colour(&file.label))
            ));
        }
    }

    line
}

/// Builds the full command list, from `set fontpath` to `quit`.
pub fn build(
    opts: &PlotOptions,
    output_type: OutputType,
    render_path: &Path,
    files: &[DataFile],
) -> Vec<String> {
    let mut commands = Vec::new();

    commands.push(format!("set fontpath {}", quote(&opts.fontpath)));
    commands.push(format!("set term {}", output_type.terminal(opts)));
    commands.push(format!(
        "set output {}",
        quote(&render_path.to_string_lossy())
    ));
    commands.push(format!("set key {}", opts.legend_location));

    if let Some(title) = &opts.title {
        commands.push(format!("set title {}", quote(title)));
    }

    if opts.opacity != 1.0 {
        let mut fill = format!("set style fill solid {:.3}", opts.opacity);
        if !opts.opacity_border {
            fill.push_str(" noborder");
        }
        commands.push(fill);
    }

    if let Some(xlabel) = &opts.xlabel {
        commands.push(format!("set xlabel {}", quote(xlabel)));
    }
    if let Some(ylabel) = &opts.ylabel {
        commands.push(format!("set ylabel {}", quote(ylabel)));
    }

    commands.push(plot_line(files, opts));
    // flushes the output file before quitting
    commands.push("unset output".to_string());
    commands.push("quit".to_string());

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use pretty_assertions::assert_eq;

    fn files(series: &[Series]) -> Vec<DataFile> {
        series.iter().map(|s| DataFile::write(s).unwrap()).collect()
    }

    fn q(file: &DataFile) -> String {
        quote(&file.path().to_string_lossy())
    }

    #[test]
    fn quoting() {
        assert_eq!(quote("Accuracy (%)"), r#""Accuracy (%)""#);
        assert_eq!(quote(r#"a "b" \c"#), r#""a \"b\" \\c""#);
    }

    #[test]
    fn command_by_dimensions() {
        assert_eq!(plot_command(1), "plot");
        assert_eq!(plot_command(2), "plot");
        assert_eq!(plot_command(3), "splot");
        assert_eq!(using(3), "1:2:3");
    }

    #[test]
    fn default_lines_are_smoothed() {
        let files = files(&[
            Series::new("a", vec![vec![0.0, 1.0]]),
            Series::new("b", vec![vec![0.0, 2.0]]),
        ]);
        let line = plot_line(&files, &PlotOptions::default());
        assert_eq!(
            line,
            format!(
                r#"plot {} using 1:2 smooth csplines title "a" with lines, {} using 1:2 smooth csplines title "b" with lines"#,
                q(&files[0]),
                q(&files[1])
            )
        );
    }

    #[test]
    fn smoothing_needs_lines() {
        let files = files(&[Series::new("pts", vec![vec![0.0, 1.0, 2.0]])]);
        let mut opts = PlotOptions::default();
        opts.lines = false;
        assert_eq!(
            plot_line(&files, &opts),
            format!(r#"splot {} using 1:2:3 title "pts""#, q(&files[0]))
        );
    }

    #[test]
    fn per_series_fill() {
        let files = files(&[
            Series::new("familiar", vec![vec![0.0, 1.0]]),
            Series::new("unfamiliar", vec![vec![0.0, 2.0]]),
        ]);
        let mut opts = PlotOptions::default();
        opts.merge([
            ("smooth", "false"),
            ("filled_familiar", "true"),
            ("filled_familiar_colour", "red"),
        ])
        .unwrap();

        assert_eq!(
            plot_line(&files, &opts),
            format!(
                r#"plot {} using 1:2 title "familiar" with filledcurves x1 lt rgb "red", {} using 1:2 title "unfamiliar" with lines"#,
                q(&files[0]),
                q(&files[1])
            )
        );
    }

    #[test]
    fn full_script() {
        let files = files(&[Series::new("familiar", vec![vec![0.0, 4.0]])]);
        let mut opts = PlotOptions::default();
        opts.merge([
            ("filled", "true"),
            ("opacity", "0.5"),
            ("xlabel", "Accuracy (%)"),
            ("ylabel", "Iterations"),
            ("title", "Test SVG"),
        ])
        .unwrap();

        let script = build(&opts, OutputType::Svg, Path::new("/tmp/out.svg"), &files);
        assert_eq!(
            script,
            vec![
                r#"set fontpath "/usr/share/fonts/!:/usr/local/share/fonts/!""#.to_string(),
                r#"set term svg font "Minion Pro,12" size 800, 600"#.to_string(),
                r#"set output "/tmp/out.svg""#.to_string(),
                "set key outside right".to_string(),
                r#"set title "Test SVG""#.to_string(),
                "set style fill solid 0.500 noborder".to_string(),
                r#"set xlabel "Accuracy (%)""#.to_string(),
                r#"set ylabel "Iterations""#.to_string(),
                format!(
                    r#"plot {} using 1:2 smooth csplines title "familiar" with filledcurves x1 lt rgb "skyblue""#,
                    q(&files[0])
                ),
                "unset output".to_string(),
                "quit".to_string(),
            ]
        );
    }

    #[test]
    fn opaque_fill_is_not_styled() {
        let files = files(&[Series::new("a", vec![vec![1.0]])]);
        let mut opts = PlotOptions::default();
        let script = build(&opts, OutputType::Eps, Path::new("o.eps"), &files);
        assert!(!script.iter().any(|c| c.starts_with("set style fill")));

        opts.set("opacity", "0.25").unwrap();
        opts.set("opacity_border", "true").unwrap();
        let script = build(&opts, OutputType::Eps, Path::new("o.eps"), &files);
        assert!(script.contains(&"set style fill solid 0.250".to_string()));
        assert!(script.contains(&format!(
            r#"plot {} using 1 smooth csplines title "a" with lines"#,
            q(&files[0])
        )));
    }
}
