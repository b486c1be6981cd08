use std::path::Path;

use eyre::eyre;
use intake_core::config::IntakeConfig;
use intake_export::response::ResponseIdentity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the binary is configured with. The codec and wrapper
/// settings sit at the top level; the answer identity under `response`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub response: ResponseIdentity,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponseSection {
    response: ResponseIdentity,
}

/// Load the config at `path`, or the defaults when there is none.
pub fn load_config(path: Option<&Path>) -> eyre::Result<CliConfig> {
    let Some(path) = path else {
        debug!("no config file given, using defaults");
        return Ok(CliConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse a config file. Versioning and validation follow
/// [`IntakeConfig::from_json_str`].
pub fn parse_config(contents: &str) -> eyre::Result<CliConfig> {
    let intake = IntakeConfig::from_json_str(contents)?;
    let section: ResponseSection = serde_json::from_str(contents)?;
    Ok(CliConfig {
        intake,
        response: section.response,
    })
}
