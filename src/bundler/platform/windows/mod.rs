//! Windows installer generators.

pub mod wix;
