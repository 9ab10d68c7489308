//! Data models for chart generation
//!
//! This module organizes the typed records flowing through the pipeline.
//! Everything here is plain data; the logic lives in the service modules.

pub mod aspect;
pub mod body;
pub mod cusp;
pub mod layout;
pub mod request;

// Re-export commonly used types for convenience
pub use aspect::{AspectDefinition, AspectMatch};
pub use body::CelestialBody;
pub use cusp::HouseCusp;
pub use layout::{ChartLayout, ChartLine, LabelCategory, LabelPlacement, Rgb};
pub use request::{BodySummary, ChartRequest, ChartResponse};
