/// Command-line parsing and command dispatch
pub mod cli;
/// Fixed geometry, naming conventions and display settings
pub mod configuration;
/// Error types shared by all operations
pub mod error;
/// Image decoding, pixel format normalization and encoding
pub mod image;
/// Diagnostic logging setup
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Status messages reported to the user
pub mod status;
