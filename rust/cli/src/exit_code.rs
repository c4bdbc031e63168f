//! Exit code constants for the CLI application.
//!
//! A finished or quit session exits with [`SUCCESS`], even when the human
//! was eliminated; the outcome is reported on stdout instead.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code.
pub const ERROR: i32 = 2;
