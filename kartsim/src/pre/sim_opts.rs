use crate::core::config_store::ConfigStore;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// FieldOverride describes a configuration field that is set from the command line, e.g.
/// race.laps=5.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOverride {
    pub section: String,
    pub field: String,
    pub value: String,
}

/// parse_field_override splits an override of the form section.field=value.
pub fn parse_field_override(s: &str) -> Result<FieldOverride, String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Override {} must have the form section.field=value!", s))?;
    let (section, field) = key
        .split_once('.')
        .ok_or_else(|| format!("Override key {} must have the form section.field!", key))?;

    Ok(FieldOverride {
        section: section.trim().to_owned(),
        field: field.trim().to_owned(),
        value: value.to_owned(),
    })
}

/// apply_overrides sets all inserted fields in the configuration store (in the given order).
pub fn apply_overrides(store: &mut ConfigStore, overrides: &[FieldOverride]) -> anyhow::Result<()> {
    for field_override in overrides.iter() {
        store
            .set_field_str(
                &field_override.section,
                &field_override.field,
                &field_override.value,
            )
            .context(format!(
                "Failed to apply override {}.{}={}!",
                field_override.section, field_override.field, field_override.value
            ))?;
    }
    Ok(())
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "KS-TB",
    about = "A tick-based kart race simulator written in Rust"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug printing
    #[clap(short, long)]
    pub debug: bool,

    /// Activate real-time simulation (one tick per second divided by the real-time factor, type
    /// "stop" and press enter to stop the race)
    #[clap(long)]
    pub realtime: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set number of simulation runs (must be one in case of real-time simulation)
    #[clap(short, long, default_value = "1")]
    pub no_sim_runs: u32,

    /// Set path to the simulation parameter file (defaults are used if not set)
    #[clap(short, long, value_parser)]
    pub parfile_path: Option<PathBuf>,

    /// Set racer name (overrides the name in the parameter file)
    #[clap(long)]
    pub racer_name: Option<String>,

    /// Set a single configuration field, e.g. race.laps=5 or kart.color=#2E86AB (repeatable)
    #[clap(short = 's', long = "set", value_parser = parse_field_override)]
    pub overrides: Vec<FieldOverride>,

    /// Set real-time factor (only relevant in case of real-time simulation)
    #[clap(short, long, default_value = "1.0")]
    pub realtime_factor: f64,

    /// Set seed of the random number generator for reproducible races
    #[clap(long)]
    pub seed: Option<u64>,
}
