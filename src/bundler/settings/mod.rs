//! Configuration structures for manifest generation.
//!
//! Product metadata, WiX output options and source groups, plus a builder
//! that validates them together.

mod builder;
mod core;
mod group;
mod package;
mod windows;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use group::{GroupSettings, ShortcutSettings};
pub use package::ProductSettings;
pub use windows::{KeySeparator, RegistryLoadPolicy, WixSettings};
