//! Centralized constants for demo recording and playback.
//!
//! Single source of truth shared by the core library and the command line
//! tooling.

/// Largest payload a single demo frame may carry.
///
/// Matches the largest message the live protocol will ever send, so any frame
/// that claims more than this is corrupt rather than merely long.
pub const MAX_MESSAGE_LENGTH: usize = 8000;

/// Extension appended to demo names that don't carry one.
pub const DEMO_EXTENSION: &str = ".dem";

/// Maximum allowed demo file size for reading into memory.
pub const MAX_DEMO_BYTES: u64 = 256 * 1024 * 1024; // 256 MiB
