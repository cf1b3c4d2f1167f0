use clap::Parser;
use gplot::{GnuPlot, OutputType, Series};
use gplot_utils::logger::init_logger;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Output file (eps, svg or png)
    output: String,

    // Output type, inferred from the output extension by default
    #[clap(short = 't', long = "type")]
    output_type: Option<OutputType>,

    // Log every gnuplot command
    #[clap(short = 'v', long = "verbose")]
    verbose: bool,
}

// iterations, familiar accuracy, unfamiliar accuracy
const DATA: &str = "0   4.098360    3.884533
50  55.59515    38.48895
100 77.690662   51.967377
200 94.654312   59.337134
300 99.287241   64.433357
400 99.679258   67.533856
500 99.893086   68.104062
800 99.893086   68.175338";

fn split_columns(data: &str) -> Result<(Series, Series), Box<dyn Error>> {
    let mut familiar = Vec::new();
    let mut unfamiliar = Vec::new();
    for line in data.lines() {
        let vals = line
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;
        if let [x, fam, unfam] = vals[..] {
            familiar.push(vec![x, fam]);
            unfamiliar.push(vec![x, unfam]);
        } else {
            return Err(format!("expected 3 columns, got `{}`", line).into());
        }
    }
    Ok((
        Series::new("familiar", familiar),
        Series::new("unfamiliar", unfamiliar),
    ))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logger(args.verbose);

    let mut builder = GnuPlot::builder(args.output.as_str())
        .option("filled", "true")
        .option("filled_familiar_colour", "red")
        .option("opacity", "0.5")
        .option("xlabel", "Accuracy (%)")
        .option("ylabel", "Iterations")
        .option("title", "Test SVG");
    if let Some(output_type) = args.output_type {
        builder = builder.output_type(output_type);
    }
    let mut plot = builder.build()?;

    let (familiar, unfamiliar) = split_columns(DATA)?;
    plot.plot(&[familiar, unfamiliar])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_table_splits_in_two_series() {
        let (familiar, unfamiliar) = split_columns(DATA).unwrap();
        assert_eq!(familiar.points.len(), 8);
        assert_eq!(unfamiliar.points.len(), 8);
        assert_eq!(familiar.points[1], vec![50.0, 55.59515]);
        assert_eq!(unfamiliar.points[7], vec![800.0, 68.175338]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(split_columns("1 2\n").is_err());
    }
}
