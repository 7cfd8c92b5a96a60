use helpers::general::{format_mins_secs, mean};
use std::fmt::Write;

/// RaceResult contains all race information that is required for post-processing the results. It
/// is created once at the end of a race and not changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub track_name: String,
    pub racer_name: String,
    pub final_position: u32,
    pub total_secs: u32,
    pub total_time_formatted: String,
    pub tot_no_players: u32,
    pub laps_completed: u32,
    pub avg_laptime_formatted: String,
    pub laptimes: Vec<u32>,
}

impl RaceResult {
    /// get_result_string creates the text block that summarizes the race result.
    pub fn get_result_string(&self) -> String {
        let mut tmp_string = String::new();

        writeln!(&mut tmp_string, "Track: {}", self.track_name).unwrap();
        writeln!(&mut tmp_string, "Racer: {}", self.racer_name).unwrap();
        writeln!(
            &mut tmp_string,
            "Final position: P{} of {}",
            self.final_position, self.tot_no_players
        )
        .unwrap();
        writeln!(&mut tmp_string, "Total time: {}", self.total_time_formatted).unwrap();
        writeln!(&mut tmp_string, "Laps completed: {}", self.laps_completed).unwrap();
        writeln!(
            &mut tmp_string,
            "Average lap time: {}",
            self.avg_laptime_formatted
        )
        .unwrap();

        write!(&mut tmp_string, "Lap times:").unwrap();
        for (i, &t_lap) in self.laptimes.iter().enumerate() {
            write!(&mut tmp_string, " {:2}: {}", i + 1, format_mins_secs(t_lap)).unwrap();
        }

        tmp_string
    }

    /// print_result prints the race result to the console output.
    pub fn print_result(&self) {
        println!("RESULT: Race result");
        println!("{}", self.get_result_string());
    }
}

/// RaceStats aggregates the results of several races of the same racer.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceStats {
    pub races_completed: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub best_total_secs: Option<u32>,
    pub best_laptime_secs: Option<u32>,
    pub avg_final_position: Option<f64>,
}

impl RaceStats {
    pub fn from_results(race_results: &[RaceResult]) -> RaceStats {
        let races_completed = race_results.len() as u32;
        let wins = race_results
            .iter()
            .filter(|race_result| race_result.final_position == 1)
            .count() as u32;
        let win_rate = if races_completed > 0 {
            f64::from(wins) / f64::from(races_completed) * 100.0
        } else {
            0.0
        };
        let final_positions: Vec<u32> = race_results
            .iter()
            .map(|race_result| race_result.final_position)
            .collect();

        RaceStats {
            races_completed,
            wins,
            win_rate,
            best_total_secs: race_results
                .iter()
                .map(|race_result| race_result.total_secs)
                .min(),
            best_laptime_secs: race_results
                .iter()
                .flat_map(|race_result| race_result.laptimes.iter().copied())
                .min(),
            avg_final_position: mean(&final_positions),
        }
    }

    /// print_stats prints the aggregated statistics to the console output.
    pub fn print_stats(&self) {
        println!("RESULT: Race statistics");
        println!("Races completed: {}", self.races_completed);
        println!("Wins: {}", self.wins);
        println!("Win rate: {:.0}%", self.win_rate);

        if let Some(best_total_secs) = self.best_total_secs {
            println!("Best total time: {}", format_mins_secs(best_total_secs));
        }
        if let Some(best_laptime_secs) = self.best_laptime_secs {
            println!("Best lap time: {}", format_mins_secs(best_laptime_secs));
        }
        if let Some(avg_final_position) = self.avg_final_position {
            println!("Average final position: {:.2}", avg_final_position);
        }
    }
}
