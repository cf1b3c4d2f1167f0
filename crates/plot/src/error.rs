use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown output type `{0}`, expected one of eps, svg, png")]
    UnknownOutputType(String),

    #[error("writing to a writer requires an explicit output type")]
    MissingOutputType,

    #[error("no series to plot")]
    NoSeries,

    #[error("series `{0}` has no points")]
    EmptySeries(String),

    #[error("series `{label}` has points with {dims} coordinates, expected 1 to 3")]
    InvalidDimensions { label: String, dims: usize },

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("invalid value `{value}` for option `{key}`")]
    InvalidOptionValue { key: String, value: String },

    #[error("malformed override `{0}`, expected key=value")]
    MalformedOverride(String),

    #[error("`{0}` was not found, is it installed and in PATH?")]
    ProgramNotFound(String),

    #[error("gnuplot exited with {status}: {stderr}")]
    Gnuplot { status: std::process::ExitStatus, stderr: String },

    #[error("image conversion failed: {0}")]
    Conversion(String),

    #[error("failed to read {}: {}", .path.display(), .source)]
    Data { path: PathBuf, source: csv::Error },

    #[error("invalid number `{}` in {} at line {}", .value, .path.display(), .line)]
    InvalidNumber { path: PathBuf, line: u64, value: String },

    #[error("no data files found in {}", .0.display())]
    NoDataFiles(PathBuf),

    #[error(transparent)]
    Glob(#[from] globwalk::GlobError),

    #[error(transparent)]
    Walk(#[from] globwalk::WalkError),

    #[error(transparent)]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
