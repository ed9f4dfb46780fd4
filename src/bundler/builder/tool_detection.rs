//! External tool detection.
//!
//! The generated source is compiled by the WiX toolset, which this crate
//! never runs. Detection only lets the orchestrator tell the user what to
//! invoke next.

use std::sync::LazyLock;

/// WiX toolset flavour found on PATH.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WixToolset {
    /// WiX v3 `candle` + `light`.
    Legacy,
    /// WiX v4+ unified `wix` CLI.
    Unified,
}

impl WixToolset {
    /// Suggested compile command for `wxs`.
    pub fn compile_hint(self, wxs: &std::path::Path) -> String {
        match self {
            WixToolset::Legacy => format!(
                "candle {0} && light {1}",
                wxs.display(),
                wxs.with_extension("wixobj").display()
            ),
            WixToolset::Unified => format!("wix build {}", wxs.display()),
        }
    }
}

/// Cached toolset lookup.
pub static WIX_TOOLSET: LazyLock<Option<WixToolset>> = LazyLock::new(|| {
    match (which::which("candle"), which::which("light")) {
        (Ok(candle), Ok(_)) => {
            log::debug!("Found candle at: {}", candle.display());
            return Some(WixToolset::Legacy);
        }
        (Ok(candle), Err(e)) => {
            log::debug!(
                "Found candle at {} but light is missing: {}",
                candle.display(),
                e
            );
        }
        _ => {}
    }

    match which::which("wix") {
        Ok(path) => {
            log::debug!("Found wix at: {}", path.display());
            Some(WixToolset::Unified)
        }
        Err(e) => {
            log::debug!("WiX toolset not found in PATH: {}", e);
            None
        }
    }
});
