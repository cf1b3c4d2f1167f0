pub mod dpi;
pub mod image;
pub mod logger;
pub mod path;
