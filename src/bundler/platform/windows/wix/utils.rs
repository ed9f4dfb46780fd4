//! WiX utility functions.
//!
//! Validation of product versions and GUID fields.

use crate::bundler::error::{Error, Result};

/// Validate a version string for MSI `ProductVersion`.
///
/// Windows Installer accepts 1 to 4 numeric dot-separated parts with
/// major and minor below 256 and build below 65536. The fourth part is
/// allowed but ignored by the installer when comparing versions:
/// - "1" -> ok
/// - "1.2.3" -> ok
/// - "1.2.3.4" -> ok
/// - "1.2.3.4.5" -> error
/// - "256.0.0" -> error
pub fn validate_product_version(version: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidVersion {
        version: version.to_string(),
        reason,
    };

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() > 4 {
        return Err(invalid(format!("{} parts, at most 4 allowed", parts.len())));
    }

    const LIMITS: [u32; 4] = [255, 255, 65535, 65535];
    for (index, (part, limit)) in parts.iter().zip(LIMITS).enumerate() {
        let value: u32 = part
            .parse()
            .map_err(|_| invalid(format!("part {} `{}` is not a number", index + 1, part)))?;
        if value > limit {
            return Err(invalid(format!(
                "part {} is {}, maximum is {}",
                index + 1,
                value,
                limit
            )));
        }
    }

    Ok(())
}

/// Validate a GUID config field.
///
/// With `allow_auto`, the WiX placeholder `*` is accepted as well.
pub fn validate_guid(field: &str, value: &str, allow_auto: bool) -> Result<()> {
    if allow_auto && value == "*" {
        return Ok(());
    }
    uuid::Uuid::parse_str(value.trim_start_matches('{').trim_end_matches('}'))
        .map(|_| ())
        .map_err(|_| Error::InvalidGuid {
            field: field.to_string(),
            value: value.to_string(),
        })
}
