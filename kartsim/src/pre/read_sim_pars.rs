use crate::core::config_store::{KartConfig, RaceConfig};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

/// SimPars is used to store all other parameter structs. Missing sections or fields are set to
/// their defaults.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimPars {
    pub race_config: RaceConfig,
    pub kart_config: KartConfig,
}

/// read_sim_pars reads the JSON file and decodes the JSON string into the simulation parameters
/// struct.
pub fn read_sim_pars(filepath: &Path) -> anyhow::Result<SimPars> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;

    // read and parse parameter file content
    let pars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}

/// parse_sim_pars decodes a JSON string into the simulation parameters struct.
pub fn parse_sim_pars(json: &str) -> anyhow::Result<SimPars> {
    serde_json::from_str(json).context("Failed to parse simulation parameters!")
}
