use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// Colors that can be selected for a kart.
pub const COLOR_PALETTE: [&str; 6] = [
    "#FF6B35", "#2E86AB", "#F7931E", "#A23B72", "#F18F01", "#C73E1D",
];

/// * `speed` - Top speed rating (1-5)
/// * `acceleration` - Acceleration rating (1-5)
/// * `handling` - Handling rating (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChassisStats {
    pub speed: u8,
    pub acceleration: u8,
    pub handling: u8,
}

/// * `grip` - Grip rating (1-5)
/// * `durability` - Durability rating (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelsStats {
    pub grip: u8,
    pub durability: u8,
}

impl fmt::Display for ChassisStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "speed {}, acceleration {}, handling {}",
            self.speed, self.acceleration, self.handling
        )
    }
}

impl fmt::Display for WheelsStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "grip {}, durability {}", self.grip, self.durability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChassisId {
    Standard,
    Racing,
    Heavy,
    Light,
}

impl Default for ChassisId {
    fn default() -> Self {
        ChassisId::Standard
    }
}

impl ChassisId {
    pub fn name(&self) -> &'static str {
        match self {
            ChassisId::Standard => "Standard Kart",
            ChassisId::Racing => "Racing Kart",
            ChassisId::Heavy => "Heavy Kart",
            ChassisId::Light => "Light Kart",
        }
    }

    pub fn stats(&self) -> ChassisStats {
        let (speed, acceleration, handling) = match self {
            ChassisId::Standard => (3, 3, 3),
            ChassisId::Racing => (5, 2, 4),
            ChassisId::Heavy => (4, 1, 5),
            ChassisId::Light => (2, 5, 3),
        };
        ChassisStats {
            speed,
            acceleration,
            handling,
        }
    }

    pub fn from_id(id: &str) -> Option<ChassisId> {
        match id {
            "standard" => Some(ChassisId::Standard),
            "racing" => Some(ChassisId::Racing),
            "heavy" => Some(ChassisId::Heavy),
            "light" => Some(ChassisId::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelsId {
    Normal,
    Racing,
    Offroad,
    Drift,
}

impl Default for WheelsId {
    fn default() -> Self {
        WheelsId::Normal
    }
}

impl WheelsId {
    pub fn name(&self) -> &'static str {
        match self {
            WheelsId::Normal => "Normal Tires",
            WheelsId::Racing => "Racing Slicks",
            WheelsId::Offroad => "Off-Road Tires",
            WheelsId::Drift => "Drift Tires",
        }
    }

    pub fn stats(&self) -> WheelsStats {
        let (grip, durability) = match self {
            WheelsId::Normal => (3, 4),
            WheelsId::Racing => (5, 2),
            WheelsId::Offroad => (4, 5),
            WheelsId::Drift => (2, 3),
        };
        WheelsStats { grip, durability }
    }

    pub fn from_id(id: &str) -> Option<WheelsId> {
        match id {
            "normal" => Some(WheelsId::Normal),
            "racing" => Some(WheelsId::Racing),
            "offroad" => Some(WheelsId::Offroad),
            "drift" => Some(WheelsId::Drift),
            _ => None,
        }
    }
}

/// RgbColor is stored as separate channels but read from and written to parameter files as a hex
/// color string, e.g. #FF6B35.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// from_hex parses a CSS color string into an RGB color (alpha is dropped).
    pub fn from_hex(hex: &str) -> anyhow::Result<RgbColor> {
        let tmp_color = hex
            .parse::<css_color_parser::Color>()
            .context(format!("Could not parse hex color {}!", hex))?;

        Ok(RgbColor {
            r: tmp_color.r,
            g: tmp_color.g,
            b: tmp_color.b,
        })
    }

    /// in_palette checks if the color is one of the selectable colors.
    pub fn in_palette(&self) -> bool {
        let color = self.to_string();
        COLOR_PALETTE.iter().any(|palette_color| *palette_color == color)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        // #FF6B35
        RgbColor {
            r: 255,
            g: 107,
            b: 53,
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        RgbColor::from_hex(&s).map_err(|e| e.to_string())
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_string()
    }
}
