// Business logic services
// Transport-agnostic, driven by the HTTP handlers

pub mod relay;
pub mod image_analysis;

pub use relay::{ChatRelay, RelayStream};
pub use image_analysis::{ANALYSIS_ERROR_PREFIX, analyze_image};
