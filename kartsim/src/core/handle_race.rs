use crate::core::config_store::{KartConfig, RaceConfig};
use crate::core::race::{Race, RacePhase};
use crate::core::random::RandomSource;
use crate::interfaces::notification::NotificationSink;
use crate::interfaces::observer::RaceSnapshot;
use crate::post::race_result::RaceResult;
use anyhow::Context;
use flume::{Receiver, RecvTimeoutError, Sender};
use helpers::general::InputValueError;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// (s) Real-time duration of a single tick for a real-time factor of 1.0.
pub const TICK_DURATION: f64 = 1.0;

/// Commands a presentation layer can send to a race that is currently simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceCommand {
    Stop,
}

/// handle_race creates and simulates a race on the basis of the inserted configurations, and
/// returns the result for post-processing. The race is ticked until it is completed or a stop
/// command is received, in which case None is returned.
///
/// * `realtime_factor` - If set, a tick is executed every TICK_DURATION / realtime_factor seconds
/// (real-time simulation), otherwise the race is simulated as fast as possible
/// * `tx` - Optional channel to send a snapshot to the presentation layer after every change
/// * `cmd_rx` - Optional channel to receive commands from the presentation layer
pub fn handle_race<S: NotificationSink, R: RandomSource>(
    race_config: &RaceConfig,
    kart_config: &KartConfig,
    sink: S,
    rng: R,
    realtime_factor: Option<f64>,
    tx: Option<&Sender<RaceSnapshot>>,
    cmd_rx: Option<&Receiver<RaceCommand>>,
) -> anyhow::Result<Option<RaceResult>> {
    if let Some(realtime_factor) = realtime_factor {
        if !(realtime_factor > 0.0 && realtime_factor.is_finite()) {
            return Err(InputValueError).context(format!(
                "Real-time factor must be positive and finite, but it is {}!",
                realtime_factor
            ));
        }
    }

    // create and start the race
    let mut race = Race::new(sink, rng);
    race.start(race_config, kart_config)
        .context("Failed to start the race!")?;
    send_snapshot(&race, tx)?;

    match realtime_factor {
        None => {
            // NORMAL SIMULATION -------------------------------------------------------------------
            while race.get_running() {
                if stop_requested(cmd_rx) {
                    race.stop();
                } else {
                    race.tick();
                }
                send_snapshot(&race, tx)?;
            }
        }
        Some(realtime_factor) => {
            // REAL-TIME SIMULATION ----------------------------------------------------------------
            let t_tick = Duration::from_secs_f64(TICK_DURATION / realtime_factor);
            let mut t_next_tick = Instant::now() + t_tick;

            while race.get_running() {
                // wait for the next tick, a stop command ends the waiting immediately
                if wait_for_tick(t_next_tick, cmd_rx) {
                    race.stop();
                    send_snapshot(&race, tx)?;
                    break;
                }

                race.tick();
                send_snapshot(&race, tx)?;

                let state = race.state();
                debug!(
                    "Simulating... Current race time is {}s, current lap is {}, progress {:.1}%",
                    state.elapsed_secs, state.cur_lap, state.progress
                );

                t_next_tick += t_tick;
                let t_now = Instant::now();

                if t_next_tick < t_now {
                    warn!("Could not keep up with real-time!");
                    t_next_tick = t_now;
                }
            }
        }
    }

    // return race result
    if race.phase() == RacePhase::Completed {
        info!(
            "Race finished after {}s of race time",
            race.state().elapsed_secs
        );
        Ok(race.acknowledge_result())
    } else {
        info!("Race ended without a result");
        Ok(None)
    }
}

fn send_snapshot<S: NotificationSink, R: RandomSource>(
    race: &Race<S, R>,
    tx: Option<&Sender<RaceSnapshot>>,
) -> anyhow::Result<()> {
    if let Some(tx) = tx {
        tx.send(race.snapshot())
            .context("Failed to send race snapshot to the presentation layer!")?;
    }
    Ok(())
}

/// stop_requested checks the command channel without blocking.
fn stop_requested(cmd_rx: Option<&Receiver<RaceCommand>>) -> bool {
    match cmd_rx {
        Some(rx) => rx.try_iter().any(|cmd| cmd == RaceCommand::Stop),
        None => false,
    }
}

/// wait_for_tick blocks until the inserted instant is reached and returns false, or returns true
/// as soon as a stop command is received.
fn wait_for_tick(t_next_tick: Instant, cmd_rx: Option<&Receiver<RaceCommand>>) -> bool {
    let rx = match cmd_rx {
        Some(rx) => rx,
        None => {
            std::thread::sleep(t_next_tick.saturating_duration_since(Instant::now()));
            return false;
        }
    };

    let t_remaining = t_next_tick.saturating_duration_since(Instant::now());

    match rx.recv_timeout(t_remaining) {
        Ok(RaceCommand::Stop) => true,
        Err(RecvTimeoutError::Timeout) => false,
        Err(RecvTimeoutError::Disconnected) => {
            // nobody can send a stop command anymore, just wait for the tick
            std::thread::sleep(t_next_tick.saturating_duration_since(Instant::now()));
            false
        }
    }
}
