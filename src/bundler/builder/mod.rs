//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that runs WiX
//! source generation end to end.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Generates the `.wxs` manifest and GUID registry
//! 3. Calculates the manifest checksum
//! 4. Returns a [`BundledArtifact`](crate::bundler::BundledArtifact)
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct
//! - [`tool_detection`] - WiX toolset availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use orchestrator::Bundler;
