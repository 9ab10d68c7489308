pub mod angle;
pub mod errors;

pub use angle::{circular_diff, circular_midpoint, normalize_degrees};
pub use errors::ChartError;
