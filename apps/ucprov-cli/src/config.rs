//! CLI configuration file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use ucprov_axl::AxlTarget;
use ucprov_core::ProvisioningConfig;

use crate::error::{CliError, CliResult};

/// Full CLI configuration, loaded from one TOML file at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Default CSV file for bulk provisioning.
    pub csv_input: Option<PathBuf>,
    /// AXL endpoint and device template.
    pub axl: AxlTarget,
    /// Required groups and settle delay.
    #[serde(default)]
    pub provisioning: ProvisioningConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&text)
            .map_err(|e| CliError::Config(format!("cannot parse {}: {e}", path.display())))
    }
}
