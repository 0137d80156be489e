use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported house systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Porphyry,
    Alcabitus,
    Topocentric,
    Morinus,
    Meridian,
}

/// House system mapping: (name, one-letter code)
const HOUSE_SYSTEMS: &[(HouseSystem, &str, char)] = &[
    (HouseSystem::Placidus, "placidus", 'P'),
    (HouseSystem::Koch, "koch", 'K'),
    (HouseSystem::Equal, "equal", 'E'),
    (HouseSystem::WholeSign, "whole_sign", 'W'),
    (HouseSystem::Regiomontanus, "regiomontanus", 'R'),
    (HouseSystem::Campanus, "campanus", 'C'),
    (HouseSystem::Porphyry, "porphyry", 'O'),
    (HouseSystem::Alcabitus, "alcabitus", 'B'),
    (HouseSystem::Topocentric, "topocentric", 'T'),
    (HouseSystem::Morinus, "morinus", 'M'),
    (HouseSystem::Meridian, "meridian", 'X'),
];

impl HouseSystem {
    /// Swiss Ephemeris style one-letter code
    pub fn code(self) -> char {
        HOUSE_SYSTEMS
            .iter()
            .find(|(system, _, _)| *system == self)
            .map(|(_, _, code)| *code)
            .unwrap_or('P')
    }

    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(system, _, _)| *system == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("placidus")
    }

    /// Systems whose cusps are undefined where the semi-arcs vanish
    pub fn requires_semi_arcs(self) -> bool {
        matches!(self, HouseSystem::Placidus | HouseSystem::Koch | HouseSystem::Alcabitus)
    }

    pub fn all() -> impl Iterator<Item = HouseSystem> {
        HOUSE_SYSTEMS.iter().map(|(system, _, _)| *system)
    }

    fn valid_names() -> Vec<String> {
        HOUSE_SYSTEMS
            .iter()
            .map(|(_, name, code)| format!("{name} ({code})"))
            .collect()
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let upper = c.to_ascii_uppercase();
            if let Some((system, _, _)) = HOUSE_SYSTEMS.iter().find(|(_, _, code)| *code == upper) {
                return Ok(*system);
            }
        }
        let key = trimmed.to_lowercase().replace(['-', ' '], "_");
        let key = match key.as_str() {
            "wholesign" | "whole" => "whole_sign",
            "alcabitius" => "alcabitus",
            other => other,
        };
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, name, _)| *name == key)
            .map(|(system, _, _)| *system)
            .ok_or_else(|| ChartError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HouseSystem::valid_names(),
            })
    }
}
