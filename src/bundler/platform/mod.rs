//! Platform-specific installer generators.

pub mod windows;
