use crate::core::config_store::{KartConfig, RaceConfig};
use crate::core::random::RandomSource;
use crate::interfaces::notification::{NotificationSink, Severity};
use crate::interfaces::observer::RaceSnapshot;
use crate::post::race_result::RaceResult;
use helpers::general::format_mins_secs;
use log::debug;
use std::cmp::min;
use std::error::Error;
use std::fmt;

/// Number of ticks (simulated seconds) it takes to drive a single lap.
pub const TICKS_PER_LAP: u32 = 60;

/// The starting position is drawn from the first few grid slots only.
pub const MAX_START_POSITION: u32 = 4;

// used to catch floating point rounding at lap boundaries and at the finish
const PROG_TOLERANCE: f64 = 1e-9;

/// Possible phases of a race:
/// * `Idle` -> no race active (initial phase)
/// * `Running` -> race active, advanced by tick
/// * `Completed` -> race finished, result available until it is acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    Running,
    Completed,
}

impl Default for RacePhase {
    fn default() -> Self {
        RacePhase::Idle
    }
}

/// * `running` - True while the race is active
/// * `elapsed_secs` - (s) Elapsed race time
/// * `cur_lap` - Current lap, 1 to laps
/// * `position` - Current position of the racer, 1 to players
/// * `progress` - (%) Race progress, 0.0 to 100.0
/// * `last_lap_start_secs` - (s) Race time at which the current lap was started
#[derive(Debug, Clone, PartialEq)]
pub struct RaceState {
    pub running: bool,
    pub elapsed_secs: u32,
    pub cur_lap: u32,
    pub position: u32,
    pub progress: f64,
    pub last_lap_start_secs: u32,
}

impl Default for RaceState {
    fn default() -> Self {
        RaceState {
            running: false,
            elapsed_secs: 0,
            cur_lap: 1,
            position: 1,
            progress: 0.0,
            last_lap_start_secs: 0,
        }
    }
}

/// ValidationError is returned if a race cannot be started with the inserted configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyRacerName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::EmptyRacerName => write!(f, "Please enter your racer name!"),
        }
    }
}

impl Error for ValidationError {}

/// The Race contains the race progress statemachine. It is advanced by calling tick once per
/// simulated second while the race is running. Events are reported to the notification sink,
/// position changes are based on draws from the random source.
///
/// Phase transitions:
/// * `Idle` -> `Running` by start
/// * `Running` -> `Completed` by complete (called by tick as soon as the progress reaches 100%)
/// * `Running` -> `Idle` by stop (no result)
/// * `Completed` -> `Idle` by acknowledge_result
///
/// Calling an operation in a phase it is not valid for is a usage error and panics.
#[derive(Debug)]
pub struct Race<S: NotificationSink, R: RandomSource> {
    phase: RacePhase,
    state: RaceState,
    race_config: RaceConfig,
    kart_config: KartConfig,
    laptimes: Vec<u32>,
    result: Option<RaceResult>,
    sink: S,
    rng: R,
}

impl<S: NotificationSink, R: RandomSource> Race<S, R> {
    pub fn new(sink: S, rng: R) -> Race<S, R> {
        Race {
            phase: RacePhase::Idle,
            state: RaceState::default(),
            race_config: RaceConfig::default(),
            kart_config: KartConfig::default(),
            laptimes: vec![],
            result: None,
            sink,
            rng,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // PHASE TRANSITIONS ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method starts a new race with a snapshot of the inserted configurations. A result of a
    /// previous race that was not acknowledged yet is discarded. If the racer name is empty (after
    /// trimming), an error notification is emitted and the race is not started.
    pub fn start(
        &mut self,
        race_config: &RaceConfig,
        kart_config: &KartConfig,
    ) -> Result<(), ValidationError> {
        assert!(
            self.phase != RacePhase::Running,
            "A race cannot be started while another race is running!"
        );
        assert!(race_config.laps >= 1, "A race must have at least one lap!");

        if kart_config.racer_name.trim().is_empty() {
            let err = ValidationError::EmptyRacerName;
            self.sink.notify(Severity::Error, err.to_string());
            return Err(err);
        }

        self.race_config = race_config.to_owned();
        self.kart_config = kart_config.to_owned();
        self.laptimes.clear();
        self.result = None;

        self.state = RaceState {
            running: true,
            position: self
                .rng
                .next_position(min(MAX_START_POSITION, race_config.players)),
            ..Default::default()
        };
        self.phase = RacePhase::Running;

        self.sink.notify(
            Severity::Success,
            format!("Race started on {}!", race_config.track.name()),
        );
        self.sink.notify(
            Severity::Info,
            format!("Starting position: P{}", self.state.position),
        );

        Ok(())
    }

    /// The method simulates one second of race time. Execution order:
    /// 1. Increment the race time.
    /// 2. Update the race progress (one lap takes TICKS_PER_LAP ticks), limited to 100%.
    /// 3. Handle a lap transition if the progress reached a new lap, then possibly change the
    /// position based on one random draw: a draw above 0.7 gains a position, a draw below 0.3
    /// loses one (as far as the field allows it).
    /// 4. Complete the race if the progress reached 100%.
    pub fn tick(&mut self) {
        assert!(
            self.phase == RacePhase::Running,
            "tick must only be called while the race is running!"
        );

        // increment race time
        self.state.elapsed_secs += 1;

        // update race progress -> it is calculated from the elapsed ticks instead of summing up
        // the increments such that no rounding errors accumulate
        let laps = self.race_config.laps;
        let tot_ticks = f64::from(laps * TICKS_PER_LAP);
        let progress = f64::from(self.state.elapsed_secs) * 100.0 / tot_ticks;
        self.state.progress = if progress >= 100.0 - PROG_TOLERANCE {
            100.0
        } else {
            progress
        };

        // handle lap transition
        let lap_float = self.state.progress / 100.0 * f64::from(laps);
        let new_lap = (lap_float + PROG_TOLERANCE).floor() as u32 + 1;

        if new_lap > self.state.cur_lap && new_lap <= laps {
            let t_lap = self.state.elapsed_secs - self.state.last_lap_start_secs;
            self.laptimes.push(t_lap);

            self.sink.notify(
                Severity::Info,
                format!(
                    "Lap {} completed! Lap time: {}",
                    self.state.cur_lap,
                    format_mins_secs(t_lap)
                ),
            );
            debug!(
                "Lap transition {} -> {} at {}s",
                self.state.cur_lap, new_lap, self.state.elapsed_secs
            );

            self.state.last_lap_start_secs = self.state.elapsed_secs;
            self.state.cur_lap = new_lap;
        }

        // handle position change
        self.handle_position_change();

        if self.state.progress >= 100.0 {
            self.complete();
        }
    }

    /// The method finishes the race and creates the race result.
    pub fn complete(&mut self) {
        assert!(
            self.phase == RacePhase::Running,
            "complete must only be called while the race is running!"
        );

        self.phase = RacePhase::Completed;
        self.state.running = false;

        // the final lap is finished together with the race
        self.laptimes
            .push(self.state.elapsed_secs - self.state.last_lap_start_secs);

        let result = RaceResult {
            track_name: self.race_config.track.name().to_owned(),
            racer_name: self.kart_config.racer_name.trim().to_owned(),
            final_position: self.state.position,
            total_secs: self.state.elapsed_secs,
            total_time_formatted: format_mins_secs(self.state.elapsed_secs),
            tot_no_players: self.race_config.players,
            laps_completed: self.race_config.laps,
            avg_laptime_formatted: format_mins_secs(
                self.state.elapsed_secs / self.race_config.laps,
            ),
            laptimes: self.laptimes.to_owned(),
        };

        self.sink.notify(
            Severity::Success,
            format!(
                "Race completed! Final position: P{} of {} ({})",
                result.final_position, result.tot_no_players, result.total_time_formatted
            ),
        );

        self.result = Some(result);
    }

    /// The method aborts the running race. No result is created.
    pub fn stop(&mut self) {
        assert!(
            self.phase == RacePhase::Running,
            "stop must only be called while the race is running!"
        );

        self.phase = RacePhase::Idle;
        self.state = RaceState::default();
        self.laptimes.clear();

        self.sink.notify(Severity::Info, String::from("Race stopped"));
    }

    /// The method returns to the idle phase after a completed race and hands out the result.
    pub fn acknowledge_result(&mut self) -> Option<RaceResult> {
        assert!(
            self.phase == RacePhase::Completed,
            "acknowledge_result must only be called after the race was completed!"
        );

        self.phase = RacePhase::Idle;
        self.state = RaceState::default();
        self.result.take()
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    fn handle_position_change(&mut self) {
        let r = self.rng.next_unit();

        if r > 0.7 && self.state.position > 1 {
            self.state.position -= 1;
            self.sink.notify(
                Severity::Success,
                format!("Overtake! You moved up to P{}", self.state.position),
            );
        } else if r < 0.3 && self.state.position < self.race_config.players {
            self.state.position += 1;
            self.sink.notify(
                Severity::Warning,
                format!("Overtaken! You dropped to P{}", self.state.position),
            );
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    pub fn result(&self) -> Option<&RaceResult> {
        self.result.as_ref()
    }

    /// race_config returns the configuration snapshot the current (or last) race was started with.
    pub fn race_config(&self) -> &RaceConfig {
        &self.race_config
    }

    pub fn kart_config(&self) -> &KartConfig {
        &self.kart_config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn get_running(&self) -> bool {
        self.phase == RacePhase::Running
    }

    /// snapshot copies the current race data for a presentation layer.
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            phase: self.phase,
            race_config: self.race_config.to_owned(),
            kart_config: self.kart_config.to_owned(),
            race_state: self.state.to_owned(),
            race_result: self.result.to_owned(),
        }
    }
}
