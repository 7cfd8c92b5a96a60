use crate::pre::read_sim_pars::SimPars;
use crate::pre::sim_opts::SimOpts;
use anyhow::Context;
use helpers::general::InputValueError;

pub const MIN_LAPS: u32 = 1;
pub const MAX_LAPS: u32 = 10;
pub const MIN_PLAYERS: u32 = 2;
pub const MAX_PLAYERS: u32 = 8;

/// check_sim_opts_pars assures that the inserted options and parameters are within reasonable
/// limits and raises an error if not. The racer name is not checked here, an empty name is
/// rejected when the race is started.
pub fn check_sim_opts_pars(sim_opts: &SimOpts, sim_pars: &SimPars) -> anyhow::Result<()> {
    // PART 1: SIMULATION OPTIONS
    if sim_opts.no_sim_runs < 1 {
        return Err(InputValueError).context(format!(
            "no_sim_runs must be at least equal to one, but is {}!",
            sim_opts.no_sim_runs
        ));
    }

    if sim_opts.realtime && sim_opts.no_sim_runs != 1 {
        return Err(InputValueError)
            .context("If real-time simulation is activated, no_sim_runs must be equal to one!");
    }

    if sim_opts.realtime && !(0.1..=100.0).contains(&sim_opts.realtime_factor) {
        return Err(InputValueError).context(format!(
            "realtime_factor is {:.3}, which is not within the reasonable range of [0.1, 100.0]!",
            sim_opts.realtime_factor
        ));
    }

    // PART 2: SIMULATION PARAMETERS
    check_sim_pars(sim_pars)
}

/// check_sim_pars checks the race configuration limits.
pub fn check_sim_pars(sim_pars: &SimPars) -> anyhow::Result<()> {
    let race_config = &sim_pars.race_config;

    if !(MIN_LAPS..=MAX_LAPS).contains(&race_config.laps) {
        return Err(InputValueError).context(format!(
            "laps is {}, which is not within the allowed range of [{}, {}]!",
            race_config.laps, MIN_LAPS, MAX_LAPS
        ));
    }

    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&race_config.players) {
        return Err(InputValueError).context(format!(
            "players is {}, which is not within the allowed range of [{}, {}]!",
            race_config.players, MIN_PLAYERS, MAX_PLAYERS
        ));
    }

    Ok(())
}
