use crate::core::kart::{ChassisId, RgbColor, WheelsId};
use crate::core::track::{parse_difficulty, Difficulty, TrackId};
use anyhow::Context;
use helpers::general::InputValueError;
use serde::{Deserialize, Serialize};

/// * `track` - Selected track
/// * `laps` - Number of laps in the race, 1 to 10
/// * `players` - Number of players in the race (including the user), 2 to 8
/// * `difficulty` - Difficulty of the computer opponents
/// * `power_ups_enabled` - Boolean to determine whether power-ups are used in the race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub track: TrackId,
    pub laps: u32,
    pub players: u32,
    pub difficulty: Difficulty,
    pub power_ups_enabled: bool,
}

impl Default for RaceConfig {
    fn default() -> Self {
        RaceConfig {
            track: TrackId::MarioCircuit,
            laps: 3,
            players: 4,
            difficulty: Difficulty::Medium,
            power_ups_enabled: true,
        }
    }
}

/// * `chassis` - Selected chassis
/// * `wheels` - Selected wheels
/// * `color` - Kart color
/// * `racer_name` - Name of the racer, must not be empty (after trimming) to start a race
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KartConfig {
    pub chassis: ChassisId,
    pub wheels: WheelsId,
    pub color: RgbColor,
    pub racer_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RaceField {
    Track(TrackId),
    Laps(u32),
    Players(u32),
    Difficulty(Difficulty),
    PowerUpsEnabled(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum KartField {
    Chassis(ChassisId),
    Wheels(WheelsId),
    Color(RgbColor),
    RacerName(String),
}

/// ConfigField describes a single field update in one of the two configuration sections.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigField {
    Race(RaceField),
    Kart(KartField),
}

/// The ConfigStore holds the user-editable race and kart settings. Every update replaces exactly
/// one field and keeps all others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    race_config: RaceConfig,
    kart_config: KartConfig,
}

impl ConfigStore {
    pub fn new() -> ConfigStore {
        Default::default()
    }

    /// from_configs creates a store from previously loaded configurations, e.g. from a parameter
    /// file.
    pub fn from_configs(race_config: RaceConfig, kart_config: KartConfig) -> ConfigStore {
        ConfigStore {
            race_config,
            kart_config,
        }
    }

    pub fn race_config(&self) -> &RaceConfig {
        &self.race_config
    }

    pub fn kart_config(&self) -> &KartConfig {
        &self.kart_config
    }

    pub fn set_field(&mut self, field: ConfigField) {
        match field {
            ConfigField::Race(race_field) => match race_field {
                RaceField::Track(x) => self.race_config.track = x,
                RaceField::Laps(x) => self.race_config.laps = x,
                RaceField::Players(x) => self.race_config.players = x,
                RaceField::Difficulty(x) => self.race_config.difficulty = x,
                RaceField::PowerUpsEnabled(x) => self.race_config.power_ups_enabled = x,
            },
            ConfigField::Kart(kart_field) => match kart_field {
                KartField::Chassis(x) => self.kart_config.chassis = x,
                KartField::Wheels(x) => self.kart_config.wheels = x,
                KartField::Color(x) => self.kart_config.color = x,
                KartField::RacerName(x) => self.kart_config.racer_name = x,
            },
        }
    }

    /// set_field_str parses the inserted value for the given section (race or kart) and field
    /// and applies it using set_field.
    pub fn set_field_str(&mut self, section: &str, field: &str, value: &str) -> anyhow::Result<()> {
        let config_field = parse_config_field(section, field, value)?;
        self.set_field(config_field);
        Ok(())
    }

    /// reset_to_defaults restores both configurations to their initial values.
    pub fn reset_to_defaults(&mut self) {
        self.race_config = RaceConfig::default();
        self.kart_config = KartConfig::default();
    }
}

/// parse_config_field converts a textual field update into a typed ConfigField.
pub fn parse_config_field(section: &str, field: &str, value: &str) -> anyhow::Result<ConfigField> {
    let config_field = match (section, field) {
        ("race", "track") => ConfigField::Race(RaceField::Track(
            TrackId::from_id(value)
                .ok_or(InputValueError)
                .context(format!("Unknown track {}!", value))?,
        )),
        ("race", "laps") => ConfigField::Race(RaceField::Laps(
            value
                .parse()
                .context(format!("Could not parse number of laps {}!", value))?,
        )),
        ("race", "players") => ConfigField::Race(RaceField::Players(
            value
                .parse()
                .context(format!("Could not parse number of players {}!", value))?,
        )),
        ("race", "difficulty") => ConfigField::Race(RaceField::Difficulty(
            parse_difficulty(value)
                .ok_or(InputValueError)
                .context(format!("Unknown difficulty {}!", value))?,
        )),
        ("race", "power_ups_enabled") => ConfigField::Race(RaceField::PowerUpsEnabled(
            value
                .parse()
                .context(format!("Could not parse power-ups flag {}!", value))?,
        )),
        ("kart", "chassis") => ConfigField::Kart(KartField::Chassis(
            ChassisId::from_id(value)
                .ok_or(InputValueError)
                .context(format!("Unknown chassis {}!", value))?,
        )),
        ("kart", "wheels") => ConfigField::Kart(KartField::Wheels(
            WheelsId::from_id(value)
                .ok_or(InputValueError)
                .context(format!("Unknown wheels {}!", value))?,
        )),
        ("kart", "color") => ConfigField::Kart(KartField::Color(RgbColor::from_hex(value)?)),
        ("kart", "racer_name") => ConfigField::Kart(KartField::RacerName(value.to_owned())),
        _ => {
            return Err(InputValueError).context(format!(
                "Unknown configuration field {}.{}!",
                section, field
            ))
        }
    };

    Ok(config_field)
}
