//! Shared constants and helpers for the demostream workspace.

pub mod constants;
pub mod fs;

pub use constants::{DEMO_EXTENSION, MAX_DEMO_BYTES, MAX_MESSAGE_LENGTH};
pub use fs::{default_extension, read_file_with_limit, write_file};
