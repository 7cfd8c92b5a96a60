use crate::core::config_store::{KartConfig, RaceConfig};
use crate::core::race::{RacePhase, RaceState};
use crate::post::race_result::RaceResult;
use flume::Receiver;

/// RaceSnapshot is a read-only copy of everything a presentation layer needs to render a race.
#[derive(Debug, Clone, Default)]
pub struct RaceSnapshot {
    pub phase: RacePhase,
    pub race_config: RaceConfig,
    pub kart_config: KartConfig,
    pub race_state: RaceState,
    pub race_result: Option<RaceResult>,
}

#[derive(Debug)]
pub struct RaceObserver {
    pub rx: Receiver<RaceSnapshot>,
    pub snapshot: RaceSnapshot,
}

impl RaceObserver {
    pub fn new(rx: Receiver<RaceSnapshot>) -> RaceObserver {
        RaceObserver {
            rx,
            snapshot: Default::default(),
        }
    }

    /// update drains the channel and keeps the latest snapshot. It returns true if a new snapshot
    /// was received.
    pub fn update(&mut self) -> bool {
        match self.rx.try_iter().last() {
            Some(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            None => false,
        }
    }
}
