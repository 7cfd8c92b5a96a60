pub mod core {
    pub mod config_store;
    pub mod handle_race;
    pub mod kart;
    pub mod race;
    pub mod random;
    pub mod track;
}

pub mod interfaces {
    pub mod notification;
    pub mod observer;
}

pub mod post {
    pub mod race_result;
}

pub mod pre {
    pub mod check_sim_opts_pars;
    pub mod read_sim_pars;
    pub mod sim_opts;
}



#[cfg(test)]
mod config_store_tests {
    use crate::core::config_store::{ConfigField, ConfigStore, KartField, RaceField};
    use crate::core::kart::{ChassisId, RgbColor, WheelsId};
    use crate::core::track::{Difficulty, TrackId};

    #[test]
    fn test_defaults() {
        let store = ConfigStore::new();
        let race_config = store.race_config();
        let kart_config = store.kart_config();

        assert_eq!(race_config.track, TrackId::MarioCircuit);
        assert_eq!(race_config.laps, 3);
        assert_eq!(race_config.players, 4);
        assert_eq!(race_config.difficulty, Difficulty::Medium);
        assert!(race_config.power_ups_enabled);
        assert_eq!(kart_config.chassis, ChassisId::Standard);
        assert_eq!(kart_config.wheels, WheelsId::Normal);
        assert_eq!(kart_config.color.to_string(), "#FF6B35");
        assert_eq!(kart_config.racer_name, "");
    }

    #[test]
    fn test_set_field_1() {
        let mut store = ConfigStore::new();
        store.set_field(ConfigField::Race(RaceField::Laps(7)));

        let mut expected = ConfigStore::new();
        expected.set_field(ConfigField::Race(RaceField::Laps(7)));
        assert_eq!(store.race_config().laps, 7);
        assert_eq!(store.race_config().players, 4);
        assert_eq!(store.race_config().track, TrackId::MarioCircuit);
        assert_eq!(store.kart_config(), ConfigStore::new().kart_config());
        assert_eq!(store, expected);
    }
    #[test]
    fn test_set_field_2() {
        let mut store = ConfigStore::new();
        store.set_field(ConfigField::Kart(KartField::RacerName(String::from("Ace"))));
        store.set_field(ConfigField::Kart(KartField::Wheels(WheelsId::Drift)));

        assert_eq!(store.kart_config().racer_name, "Ace");
        assert_eq!(store.kart_config().wheels, WheelsId::Drift);
        assert_eq!(store.kart_config().chassis, ChassisId::Standard);
        assert_eq!(store.race_config(), ConfigStore::new().race_config());
    }

    #[test]
    fn test_set_field_str_1() {
        let mut store = ConfigStore::new();
        store.set_field_str("race", "track", "rainbow_road").unwrap();
        store.set_field_str("race", "players", "8").unwrap();
        store.set_field_str("race", "difficulty", "expert").unwrap();
        store.set_field_str("race", "power_ups_enabled", "false").unwrap();
        store.set_field_str("kart", "chassis", "heavy").unwrap();
        store.set_field_str("kart", "color", "#2E86AB").unwrap();

        assert_eq!(store.race_config().track, TrackId::RainbowRoad);
        assert_eq!(store.race_config().players, 8);
        assert_eq!(store.race_config().difficulty, Difficulty::Expert);
        assert!(!store.race_config().power_ups_enabled);
        assert_eq!(store.kart_config().chassis, ChassisId::Heavy);
        assert_eq!(
            store.kart_config().color,
            RgbColor {
                r: 0x2E,
                g: 0x86,
                b: 0xAB
            }
        );
    }
    #[test]
    fn test_set_field_str_2() {
        let mut store = ConfigStore::new();
        assert!(store.set_field_str("race", "laps", "three").is_err());
        assert!(store.set_field_str("race", "track", "moon_base").is_err());
        assert!(store.set_field_str("kart", "speed", "5").is_err());
        assert!(store.set_field_str("engine", "laps", "5").is_err());
        assert!(store.set_field_str("kart", "color", "not a color").is_err());

        // failed updates do not change anything
        assert_eq!(store, ConfigStore::new());
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut store = ConfigStore::new();
        store.set_field(ConfigField::Race(RaceField::Laps(10)));
        store.set_field(ConfigField::Kart(KartField::RacerName(String::from("Ace"))));

        store.reset_to_defaults();
        let once = store.clone();
        store.reset_to_defaults();

        assert_eq!(store, once);
        assert_eq!(store, ConfigStore::new());
    }
}

#[cfg(test)]
mod catalog_tests {
    use crate::core::kart::{ChassisId, RgbColor, WheelsId, COLOR_PALETTE};
    use crate::core::track::{Difficulty, TrackId, TRACKS};

    #[test]
    fn test_track_ids() {
        for track in TRACKS.iter() {
            assert_eq!(TrackId::from_id(track.id()), Some(*track));
        }
        assert_eq!(TrackId::BowserCastle.name(), "Fire Castle");
        assert_eq!(TrackId::BowserCastle.difficulty(), Difficulty::Expert);
        assert_eq!(TrackId::RainbowRoad.recommended_laps(), 5);
        assert!(TrackId::from_id("moon_base").is_none());
    }

    #[test]
    fn test_parts() {
        assert_eq!(ChassisId::Racing.stats().speed, 5);
        assert_eq!(ChassisId::Light.stats().acceleration, 5);
        assert_eq!(WheelsId::Offroad.stats().durability, 5);
        assert_eq!(WheelsId::from_id("drift"), Some(WheelsId::Drift));
        assert_eq!(ChassisId::from_id("racing"), Some(ChassisId::Racing));
        assert_eq!(
            ChassisId::Heavy.stats().to_string(),
            "speed 4, acceleration 1, handling 5"
        );
        assert_eq!(WheelsId::Racing.stats().to_string(), "grip 5, durability 2");
    }

    #[test]
    fn test_color_palette() {
        for color in COLOR_PALETTE.iter() {
            let rgb_color = RgbColor::from_hex(color).unwrap();
            assert_eq!(&rgb_color.to_string(), color);
            assert!(rgb_color.in_palette());
        }
        assert!(RgbColor::default().in_palette());
        assert!(RgbColor::from_hex("#ff6b35").unwrap().in_palette());
        assert!(!RgbColor::from_hex("#123456").unwrap().in_palette());
    }
}

#[cfg(test)]
mod pre_tests {
    use crate::core::config_store::ConfigStore;
    use crate::core::kart::RgbColor;
    use crate::core::track::TrackId;
    use crate::pre::check_sim_opts_pars::check_sim_pars;
    use crate::pre::read_sim_pars::{parse_sim_pars, read_sim_pars, SimPars};
    use crate::pre::sim_opts::{apply_overrides, parse_field_override, FieldOverride};
    use std::path::Path;

    #[test]
    fn test_parse_sim_pars_1() {
        let sim_pars = parse_sim_pars("{}").unwrap();
        assert_eq!(sim_pars, SimPars::default());
    }
    #[test]
    fn test_parse_sim_pars_2() {
        let json = r##"{
            "race_config": {"track": "rainbow_road", "laps": 5},
            "kart_config": {"color": "#2E86AB", "racer_name": "Ace", "wheels": "offroad"}
        }"##;
        let sim_pars = parse_sim_pars(json).unwrap();

        assert_eq!(sim_pars.race_config.track, TrackId::RainbowRoad);
        assert_eq!(sim_pars.race_config.laps, 5);
        assert_eq!(sim_pars.race_config.players, 4);
        assert_eq!(
            sim_pars.kart_config.color,
            RgbColor::from_hex("#2E86AB").unwrap()
        );
        assert_eq!(sim_pars.kart_config.racer_name, "Ace");
    }
    #[test]
    fn test_parse_sim_pars_3() {
        assert!(parse_sim_pars(r#"{"race_config": {"track": "moon_base"}}"#).is_err());
        assert!(parse_sim_pars(r#"{"kart_config": {"color": "sparkly"}}"#).is_err());
    }

    #[test]
    fn test_read_sim_pars_1() {
        let parfile_path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("input")
            .join("pars_rainbow_road.json");
        let sim_pars = read_sim_pars(&parfile_path).unwrap();

        assert_eq!(sim_pars.race_config.track, TrackId::RainbowRoad);
        assert_eq!(sim_pars.race_config.players, 6);
        assert_eq!(sim_pars.kart_config.racer_name, "Ace");
        assert!(check_sim_pars(&sim_pars).is_ok());
    }
    #[test]
    fn test_read_sim_pars_2() {
        assert!(read_sim_pars(Path::new("does/not/exist.json")).is_err());
    }

    #[test]
    fn test_check_sim_pars() {
        let mut sim_pars = SimPars::default();
        assert!(check_sim_pars(&sim_pars).is_ok());

        sim_pars.race_config.laps = 11;
        assert!(check_sim_pars(&sim_pars).is_err());

        sim_pars.race_config.laps = 10;
        sim_pars.race_config.players = 1;
        assert!(check_sim_pars(&sim_pars).is_err());

        sim_pars.race_config.players = 8;
        assert!(check_sim_pars(&sim_pars).is_ok());
    }

    #[test]
    fn test_parse_field_override_1() {
        assert_eq!(
            parse_field_override("kart.color=#2E86AB"),
            Ok(FieldOverride {
                section: String::from("kart"),
                field: String::from("color"),
                value: String::from("#2E86AB"),
            })
        );
    }
    #[test]
    fn test_parse_field_override_2() {
        assert!(parse_field_override("race.laps").is_err());
        assert!(parse_field_override("laps=3").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut store = ConfigStore::new();
        let overrides = vec![
            parse_field_override("race.laps=5").unwrap(),
            parse_field_override("kart.racer_name=Ace").unwrap(),
            parse_field_override("race.laps=6").unwrap(),
        ];
        apply_overrides(&mut store, &overrides).unwrap();

        assert_eq!(store.race_config().laps, 6);
        assert_eq!(store.kart_config().racer_name, "Ace");

        let bad_overrides = vec![parse_field_override("race.laps=-1").unwrap()];
        assert!(apply_overrides(&mut store, &bad_overrides).is_err());
    }
}


#[cfg(test)]
mod handle_race_tests {
    use crate::core::handle_race::{handle_race, RaceCommand};
    use crate::core::race::RacePhase;
    use crate::core::random::ScriptedRandom;
    use crate::interfaces::notification::Notification;
    use crate::test_helpers::{count_containing, kart_config, race_config};
    use helpers::general::InputValueError;

    #[test]
    fn test_handle_race_1() {
        let mut sink: Vec<Notification> = vec![];
        let result = handle_race(
            &race_config(3, 4),
            &kart_config("Ace"),
            &mut sink,
            ScriptedRandom::neutral(2),
            None,
            None,
            None,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.total_secs, 180);
        assert_eq!(result.final_position, 2);
        assert_eq!(result.avg_laptime_formatted, "1:00");
        assert_eq!(count_containing(&sink, "Race completed!"), 1);
    }

    #[test]
    fn test_handle_race_invalid_realtime_factor() {
        for &realtime_factor in [0.0, -1.0, f64::NAN, f64::INFINITY].iter() {
            let mut sink: Vec<Notification> = vec![];
            let res = handle_race(
                &race_config(1, 2),
                &kart_config("Ace"),
                &mut sink,
                ScriptedRandom::neutral(1),
                Some(realtime_factor),
                None,
                None,
            );

            let err = res.unwrap_err();
            assert!(err.downcast_ref::<InputValueError>().is_some());
            assert!(sink.is_empty());
        }
    }

    #[test]
    fn test_handle_race_snapshots() {
        let (tx, rx) = flume::unbounded();
        let result = handle_race(
            &race_config(1, 2),
            &kart_config("Ace"),
            Vec::<Notification>::new(),
            ScriptedRandom::neutral(1),
            None,
            Some(&tx),
            None,
        )
        .unwrap();
        assert!(result.is_some());

        let snapshots: Vec<_> = rx.try_iter().collect();
        assert_eq!(snapshots.len(), 61);
        assert_eq!(snapshots[0].phase, RacePhase::Running);
        assert_eq!(snapshots[0].race_state.elapsed_secs, 0);

        let last = snapshots.last().unwrap();
        assert_eq!(last.phase, RacePhase::Completed);
        assert!(last.race_result.is_some());
    }

    #[test]
    fn test_handle_race_stop() {
        let (cmd_tx, cmd_rx) = flume::unbounded();
        cmd_tx.send(RaceCommand::Stop).unwrap();

        let mut sink: Vec<Notification> = vec![];
        let result = handle_race(
            &race_config(3, 4),
            &kart_config("Ace"),
            &mut sink,
            ScriptedRandom::neutral(1),
            None,
            None,
            Some(&cmd_rx),
        )
        .unwrap();

        assert!(result.is_none());
        assert_eq!(sink.last().unwrap().message, "Race stopped");
    }

    #[test]
    fn test_handle_race_empty_name() {
        let mut sink: Vec<Notification> = vec![];
        let res = handle_race(
            &race_config(3, 4),
            &kart_config(" "),
            &mut sink,
            ScriptedRandom::neutral(1),
            None,
            None,
            None,
        );

        assert!(res.is_err());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_handle_race_realtime_1() {
        // 60 ticks of 1ms each
        let result = handle_race(
            &race_config(1, 2),
            &kart_config("Ace"),
            Vec::<Notification>::new(),
            ScriptedRandom::neutral(1),
            Some(1000.0),
            None,
            None,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.total_secs, 60);
    }
    #[test]
    fn test_handle_race_realtime_2() {
        let (cmd_tx, cmd_rx) = flume::unbounded();
        let (tx, rx) = flume::unbounded();
        cmd_tx.send(RaceCommand::Stop).unwrap();

        let result = handle_race(
            &race_config(3, 4),
            &kart_config("Ace"),
            Vec::<Notification>::new(),
            ScriptedRandom::neutral(1),
            Some(1.0),
            Some(&tx),
            Some(&cmd_rx),
        )
        .unwrap();

        // the pending stop command ends the race before the first tick
        assert!(result.is_none());
        let last = rx.try_iter().last().unwrap();
        assert_eq!(last.phase, RacePhase::Idle);
        assert_eq!(last.race_state.elapsed_secs, 0);
    }
}

#[cfg(test)]
mod race_result_tests {
    use crate::post::race_result::{RaceResult, RaceStats};
    use approx::assert_ulps_eq;

    fn result(final_position: u32, total_secs: u32) -> RaceResult {
        RaceResult {
            track_name: String::from("Speed Circuit"),
            racer_name: String::from("Ace"),
            final_position,
            total_secs,
            total_time_formatted: helpers::general::format_mins_secs(total_secs),
            tot_no_players: 4,
            laps_completed: 3,
            avg_laptime_formatted: helpers::general::format_mins_secs(total_secs / 3),
            laptimes: vec![60, 60, 60],
        }
    }

    #[test]
    fn test_result_string() {
        let tmp_string = result(2, 180).get_result_string();
        assert!(tmp_string.contains("Final position: P2 of 4"));
        assert!(tmp_string.contains("Total time: 3:00"));
        assert!(tmp_string.contains("Average lap time: 1:00"));
    }

    #[test]
    fn test_race_stats_1() {
        let stats = RaceStats::from_results(&[
            result(1, 180),
            result(3, 200),
            RaceResult {
                laptimes: vec![62, 55, 53],
                ..result(1, 170)
            },
            result(2, 190),
        ]);

        assert_eq!(stats.races_completed, 4);
        assert_eq!(stats.wins, 2);
        assert_ulps_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.best_total_secs, Some(170));
        assert_eq!(stats.best_laptime_secs, Some(53));
        assert_ulps_eq!(stats.avg_final_position.unwrap(), 1.75);
    }
    #[test]
    fn test_race_stats_2() {
        let stats = RaceStats::from_results(&[]);
        assert_eq!(stats.races_completed, 0);
        assert_ulps_eq!(stats.win_rate, 0.0);
        assert!(stats.best_total_secs.is_none());
        assert!(stats.best_laptime_secs.is_none());
        assert!(stats.avg_final_position.is_none());
    }
}
