use anyhow::{anyhow, Context};
use clap::Parser;
use flume::{Receiver, RecvTimeoutError};
use helpers::general::format_mins_secs;
use kartsim::core::config_store::{ConfigField, ConfigStore, KartField};
use kartsim::core::handle_race::{handle_race, RaceCommand};
use kartsim::interfaces::notification::{LogSink, Notification};
use kartsim::interfaces::observer::{RaceObserver, RaceSnapshot};
use kartsim::post::race_result::{RaceResult, RaceStats};
use kartsim::pre::check_sim_opts_pars::check_sim_opts_pars;
use kartsim::pre::read_sim_pars::{read_sim_pars, SimPars};
use kartsim::pre::sim_opts::{apply_overrides, SimOpts};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::io::BufRead;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// interval in which the console checks for new race snapshots during a real-time race
const CONSOLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

// print a status line every few seconds of race time during a real-time race
const STATUS_PRINT_INTERVAL: u32 = 10;

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get simulation options from the command line arguments and read simulation parameters
    let sim_opts: SimOpts = SimOpts::parse();
    init_logging(sim_opts.debug)?;

    let sim_pars = match sim_opts.parfile_path.as_ref() {
        Some(parfile_path) => read_sim_pars(parfile_path.as_path())?,
        None => SimPars::default(),
    };

    // apply overrides from the command line
    let mut store = ConfigStore::from_configs(sim_pars.race_config, sim_pars.kart_config);
    apply_overrides(&mut store, &sim_opts.overrides)?;

    if let Some(racer_name) = sim_opts.racer_name.as_ref() {
        store.set_field(ConfigField::Kart(KartField::RacerName(racer_name.to_owned())));
    }

    let sim_pars = SimPars {
        race_config: store.race_config().to_owned(),
        kart_config: store.kart_config().to_owned(),
    };

    // check simulation options and parameters
    check_sim_opts_pars(&sim_opts, &sim_pars)?;

    // print race details
    let race_config = &sim_pars.race_config;
    let kart_config = &sim_pars.kart_config;
    info!(
        "Simulating {} laps on {} ({}) with {} players, difficulty {}, power-ups {}",
        race_config.laps,
        race_config.track.name(),
        race_config.track.difficulty(),
        race_config.players,
        race_config.difficulty,
        if race_config.power_ups_enabled {
            "on"
        } else {
            "off"
        }
    );
    if race_config.laps != race_config.track.recommended_laps() {
        info!(
            "{} is usually driven with {} laps",
            race_config.track.name(),
            race_config.track.recommended_laps()
        );
    }
    info!(
        "Kart: {} ({}), {} ({}), color {}",
        kart_config.chassis.name(),
        kart_config.chassis.stats(),
        kart_config.wheels.name(),
        kart_config.wheels.stats(),
        kart_config.color
    );
    if !kart_config.color.in_palette() {
        warn!("Kart color {} is not one of the selectable colors", kart_config.color);
    }

    // EXECUTION -----------------------------------------------------------------------------------
    let mut race_results: Vec<RaceResult> = Vec::with_capacity(sim_opts.no_sim_runs as usize);

    if sim_opts.realtime {
        // REAL-TIME CASE --------------------------------------------------------------------------
        if let Some(race_result) = run_realtime(&sim_opts, &sim_pars)? {
            race_results.push(race_result);
        }
    } else if sim_opts.no_sim_runs == 1 {
        // SINGLE RUN ------------------------------------------------------------------------------
        let t_start = Instant::now();

        if let Some(race_result) = handle_race(
            race_config,
            kart_config,
            LogSink,
            create_rng(sim_opts.seed, 0),
            None,
            None,
            None,
        )? {
            race_results.push(race_result);
        }

        info!(
            "Execution time (total): {}ms",
            t_start.elapsed().as_millis()
        );
    } else {
        // MULTIPLE THREADS ------------------------------------------------------------------------
        let t_start = Instant::now();

        let tmp_results: anyhow::Result<Vec<Option<RaceResult>>> = (0..sim_opts.no_sim_runs)
            .into_par_iter()
            .map(|run| {
                handle_race(
                    race_config,
                    kart_config,
                    Vec::<Notification>::new(),
                    create_rng(sim_opts.seed, u64::from(run)),
                    None,
                    None,
                    None,
                )
            })
            .collect();
        race_results.extend(tmp_results?.into_iter().flatten());

        info!(
            "Execution time (total): {}ms",
            t_start.elapsed().as_millis()
        );
    }

    // POST-PROCESSING -----------------------------------------------------------------------------
    // print results
    if race_results.len() == 1 {
        race_results[0].print_result();
    } else if race_results.len() > 1 {
        RaceStats::from_results(&race_results).print_stats();
    }

    Ok(())
}

/// init_logging installs the console subscriber. Records of the log facade used by the kartsim
/// library are forwarded to it. RUST_LOG takes precedence over the debug flag.
fn init_logging(debug: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" })),
        )
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to set up logging: {}", e))
}

/// create_rng returns a seeded random number generator (seed shifted by the run index) if a seed
/// was inserted, else a generator seeded by the operating system.
fn create_rng(seed: Option<u64>, run: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run)),
        None => StdRng::from_os_rng(),
    }
}

/// run_realtime simulates the race in a separate thread and presents its notifications and
/// snapshots in the console. Typing "stop" stops the race.
fn run_realtime(sim_opts: &SimOpts, sim_pars: &SimPars) -> anyhow::Result<Option<RaceResult>> {
    // create channels for communication between console and race thread
    let (notification_tx, notification_rx) = flume::unbounded::<Notification>();
    let (snapshot_tx, snapshot_rx) = flume::unbounded::<RaceSnapshot>();
    let (cmd_tx, cmd_rx) = flume::unbounded::<RaceCommand>();

    // create a separate thread for the race -> parameters get moved and must therefore be copied
    let race_config = sim_pars.race_config.to_owned();
    let kart_config = sim_pars.kart_config.to_owned();
    let rng = create_rng(sim_opts.seed, 0);
    let realtime_factor = sim_opts.realtime_factor;

    let race_thread = thread::spawn(move || {
        handle_race(
            &race_config,
            &kart_config,
            notification_tx,
            rng,
            Some(realtime_factor),
            Some(&snapshot_tx),
            Some(&cmd_rx),
        )
    });

    // read stop commands from the console input (the thread ends together with the program)
    let _ = thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) if line.trim() == "stop" => {
                    if cmd_tx.send(RaceCommand::Stop).is_err() {
                        break;
                    }
                }
                Ok(_) => println!("Type \"stop\" to stop the race"),
                Err(_) => break,
            }
        }
    });

    present_race(&notification_rx, RaceObserver::new(snapshot_rx));

    race_thread
        .join()
        .map_err(|_| anyhow!("Race thread panicked!"))?
        .context("Real-time race failed!")
}

/// present_race prints notifications and regular status lines until the race thread drops its
/// notification sender.
fn present_race(notification_rx: &Receiver<Notification>, mut observer: RaceObserver) {
    let mut prev_status_secs = 0;

    loop {
        match notification_rx.recv_timeout(CONSOLE_POLL_INTERVAL) {
            Ok(notification) => println!("{}: {}", notification.severity, notification.message),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if observer.update() {
            let state = &observer.snapshot.race_state;

            if state.running && state.elapsed_secs >= prev_status_secs + STATUS_PRINT_INTERVAL {
                info!(
                    "Race time {}, lap {}/{}, position P{}/{}, progress {:.1}%",
                    format_mins_secs(state.elapsed_secs),
                    state.cur_lap,
                    observer.snapshot.race_config.laps,
                    state.position,
                    observer.snapshot.race_config.players,
                    state.progress
                );
                prev_status_secs = state.elapsed_secs;
            }
        }
    }
}
