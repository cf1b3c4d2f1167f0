use clap::Parser;
use gplot::data::load_dir;
use gplot::options::parse_override;
use gplot::{GnuPlot, Output, OutputType, PlotOptions};
use gplot_utils::logger::init_logger;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Directory holding the data files (csv, dat, tsv)
    #[clap(short = 'i', long = "input")]
    input: String,

    // Output file, or `-` for stdout (needs --type)
    #[clap(short = 'o', long = "output")]
    output: String,

    // JSON file with plot options
    #[clap(short = 'c', long = "config")]
    config: Option<String>,

    // Option override as key=value, may be repeated
    #[clap(short = 's', long = "set")]
    set: Vec<String>,

    // Output type (eps, svg, png), inferred from the output extension by default
    #[clap(short = 't', long = "type")]
    output_type: Option<OutputType>,

    // Log every gnuplot command
    #[clap(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();
    let args = Args::parse();
    init_logger(args.verbose);

    let mut options = match &args.config {
        Some(config) => PlotOptions::from_path(config)?,
        None => PlotOptions::default(),
    };
    let overrides = args
        .set
        .iter()
        .map(|s| parse_override(s))
        .collect::<Result<Vec<_>, _>>()?;
    options.merge(overrides)?;

    let series = load_dir(&args.input)?;
    let output = Output::from_arg(&args.output);

    let mut plot = GnuPlot::new(output, args.output_type, options)?;
    plot.plot(&series)?;

    log::info!("Time elapsed in main() is: {:?}", start.elapsed());
    Ok(())
}
