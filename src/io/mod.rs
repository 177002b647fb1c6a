//! Input/output operations, configuration, and error handling

/// Command-line parsing and batch processing
pub mod cli;
/// Generation constants and output settings
pub mod configuration;
/// Error types
pub mod error;
/// PNG export of the fine tile grid
pub mod image;
/// Batch progress display
pub mod progress;
