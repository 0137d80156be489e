//! Engine configuration: aspect definitions, orbs, Arabic Part formulas,
//! fixed-star catalog and search tolerances.
//!
//! An [`EngineConfig`] is built once (defaults, TOML or JSON) and shared
//! read-only as `Arc<EngineConfig>` by every calculator.

use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub name: String,
    /// Exact angle in `[0, 180]`
    pub angle: f64,
    /// Allowed deviation from the exact angle
    pub orb: f64,
    /// Wider orb used when the Sun or Moon takes part
    #[serde(default)]
    pub luminary_orb: Option<f64>,
    #[serde(default)]
    pub major: bool,
}

impl AspectDefinition {
    pub fn new(name: &str, angle: f64, orb: f64, luminary_orb: Option<f64>, major: bool) -> Self {
        Self {
            name: name.to_string(),
            angle,
            orb,
            luminary_orb,
            major,
        }
    }

    /// Orb that applies to a pair, depending on whether a luminary is involved
    pub fn orb_for(&self, involves_luminary: bool) -> f64 {
        if involves_luminary {
            self.luminary_orb.unwrap_or(self.orb).max(self.orb)
        } else {
            self.orb
        }
    }
}

/// Arabic Part formula: `base + add - subtract`, swapping `add` and
/// `subtract` for night charts when `reverse_at_night` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartFormula {
    pub name: String,
    #[serde(default = "default_part_base")]
    pub base: String,
    pub add: String,
    pub subtract: String,
    #[serde(default)]
    pub reverse_at_night: bool,
}

fn default_part_base() -> String {
    "Ascendant".to_string()
}

impl PartFormula {
    pub fn new(name: &str, add: &str, subtract: &str, reverse_at_night: bool) -> Self {
        Self {
            name: name.to_string(),
            base: default_part_base(),
            add: add.to_string(),
            subtract: subtract.to_string(),
            reverse_at_night,
        }
    }

    /// `(base, add, subtract)` references for the given sect
    pub fn terms(&self, is_day_chart: bool) -> (&str, &str, &str) {
        if self.reverse_at_night && !is_day_chart {
            (&self.base, &self.subtract, &self.add)
        } else {
            (&self.base, &self.add, &self.subtract)
        }
    }

    pub fn references(&self) -> [&str; 3] {
        [&self.base, &self.add, &self.subtract]
    }
}

/// Fixed star with J2000 ecliptic coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedStar {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub magnitude: f64,
}

impl FixedStar {
    fn new(name: &str, longitude: f64, latitude: f64, magnitude: f64) -> Self {
        Self {
            name: name.to_string(),
            longitude,
            latitude,
            magnitude,
        }
    }
}

/// Orbs of the non-natal techniques
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechniqueOrbs {
    pub transit: f64,
    pub progression: f64,
    pub midpoint: f64,
    pub antiscia: f64,
    pub fixed_star: f64,
    /// Paran tolerance expressed in degrees of diurnal rotation (1° = 4 minutes)
    pub paran: f64,
}

impl Default for TechniqueOrbs {
    fn default() -> Self {
        Self {
            transit: 1.0,
            progression: 1.0,
            midpoint: 1.5,
            antiscia: 1.0,
            fixed_star: 1.5,
            paran: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Bisection stops once the bracket is narrower than this
    pub tolerance_days: f64,
    pub max_iterations: u32,
    /// Coarse scan step for solar returns and heliacal events
    pub solar_step_days: f64,
    /// Coarse scan step for lunar returns
    pub lunar_step_days: f64,
    /// Coarse scan step for station searches
    pub station_step_days: f64,
    /// Solar depression required for a heliacal event
    pub arcus_visionis: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            tolerance_days: 1e-7,
            max_iterations: 100,
            solar_step_days: 1.0,
            lunar_step_days: 0.25,
            station_step_days: 1.0,
            arcus_visionis: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aspects: Vec<AspectDefinition>,
    pub orbs: TechniqueOrbs,
    /// Projection step used to decide applying vs separating
    pub applying_step_days: f64,
    /// Aspects tighter than this are flagged exact
    pub exact_threshold: f64,
    /// Tolerance around the exaltation degree
    pub exaltation_tolerance: f64,
    /// Use Uranus, Neptune and Pluto as co-rulers of Aquarius, Pisces, Scorpio
    pub modern_rulers: bool,
    pub arabic_parts: Vec<PartFormula>,
    pub fixed_stars: Vec<FixedStar>,
    /// Annual general precession in arc seconds
    pub precession_arcsec_per_year: f64,
    pub tropical_year_days: f64,
    pub search: SearchSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aspects: default_aspects(),
            orbs: TechniqueOrbs::default(),
            applying_step_days: 0.1,
            exact_threshold: 0.1,
            exaltation_tolerance: 1.0,
            modern_rulers: false,
            arabic_parts: default_parts(),
            fixed_stars: default_fixed_stars(),
            precession_arcsec_per_year: 50.29,
            tropical_year_days: 365.24219,
            search: SearchSettings::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> ChartResult<Self> {
        let config: EngineConfig = toml::from_str(text)
            .map_err(|e| ChartError::MalformedInput(format!("engine config (toml): {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> ChartResult<Self> {
        let config: EngineConfig = serde_json::from_str(text)
            .map_err(|e| ChartError::MalformedInput(format!("engine config (json): {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables the calculators cannot work with
    pub fn validate(&self) -> ChartResult<()> {
        for def in &self.aspects {
            if !(0.0..=180.0).contains(&def.angle) {
                return Err(ChartError::MalformedInput(format!(
                    "aspect {} has angle {} outside [0, 180]",
                    def.name, def.angle
                )));
            }
            if !def.orb.is_finite() || def.orb < 0.0 {
                return Err(ChartError::MalformedInput(format!(
                    "aspect {} has invalid orb {}",
                    def.name, def.orb
                )));
            }
        }
        let mut seen = HashSet::new();
        for part in &self.arabic_parts {
            if !seen.insert(part.name.as_str()) {
                return Err(ChartError::MalformedInput(format!(
                    "duplicate Arabic Part formula: {}",
                    part.name
                )));
            }
        }
        if self.applying_step_days <= 0.0 || self.tropical_year_days <= 0.0 {
            return Err(ChartError::MalformedInput(
                "applying_step_days and tropical_year_days must be positive".to_string(),
            ));
        }
        if self.search.tolerance_days <= 0.0 || self.search.max_iterations == 0 {
            return Err(ChartError::MalformedInput(
                "search tolerance and iteration budget must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn aspect(&self, name: &str) -> Option<&AspectDefinition> {
        self.aspects.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn major_aspects(&self) -> Vec<AspectDefinition> {
        self.aspects.iter().filter(|a| a.major).cloned().collect()
    }

    pub fn fixed_star(&self, name: &str) -> Option<&FixedStar> {
        self.fixed_stars.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

pub fn default_aspects() -> Vec<AspectDefinition> {
    vec![
        AspectDefinition::new("Conjunction", 0.0, 8.0, Some(10.0), true),
        AspectDefinition::new("Opposition", 180.0, 7.0, Some(10.0), true),
        AspectDefinition::new("Trine", 120.0, 7.0, Some(9.0), true),
        AspectDefinition::new("Square", 90.0, 6.0, Some(8.0), true),
        AspectDefinition::new("Sextile", 60.0, 5.0, Some(6.0), true),
        AspectDefinition::new("Quincunx", 150.0, 3.0, None, false),
        AspectDefinition::new("Semisextile", 30.0, 2.0, None, false),
        AspectDefinition::new("Semisquare", 45.0, 2.0, None, false),
        AspectDefinition::new("Sesquiquadrate", 135.0, 2.0, None, false),
        AspectDefinition::new("Quintile", 72.0, 1.5, None, false),
        AspectDefinition::new("Biquintile", 144.0, 1.5, None, false),
    ]
}

pub fn default_parts() -> Vec<PartFormula> {
    vec![
        PartFormula::new("Fortune", "Moon", "Sun", true),
        PartFormula::new("Spirit", "Sun", "Moon", true),
        PartFormula::new("Eros", "Venus", "Spirit", true),
        PartFormula::new("Necessity", "Fortune", "Mercury", true),
        PartFormula::new("Courage", "Fortune", "Mars", true),
        PartFormula::new("Victory", "Jupiter", "Spirit", true),
        PartFormula::new("Nemesis", "Fortune", "Saturn", true),
        PartFormula::new("Marriage", "Venus", "Saturn", false),
        PartFormula::new("Father", "Saturn", "Sun", true),
        PartFormula::new("Mother", "Moon", "Venus", true),
    ]
}

pub fn default_fixed_stars() -> Vec<FixedStar> {
    vec![
        FixedStar::new("Scheat", 359.37, 31.13, 2.4),
        FixedStar::new("Algol", 56.17, 22.42, 2.1),
        FixedStar::new("Alcyone", 59.98, 4.05, 2.9),
        FixedStar::new("Aldebaran", 69.79, -5.47, 0.9),
        FixedStar::new("Rigel", 76.83, -31.12, 0.1),
        FixedStar::new("Capella", 81.85, 22.86, 0.1),
        FixedStar::new("Betelgeuse", 88.75, -16.03, 0.5),
        FixedStar::new("Sirius", 104.08, -39.61, -1.46),
        FixedStar::new("Canopus", 104.97, -75.82, -0.7),
        FixedStar::new("Castor", 110.23, 10.09, 1.6),
        FixedStar::new("Pollux", 113.22, 6.68, 1.1),
        FixedStar::new("Procyon", 115.79, -16.02, 0.4),
        FixedStar::new("Regulus", 149.83, 0.47, 1.4),
        FixedStar::new("Spica", 203.84, -2.05, 1.0),
        FixedStar::new("Arcturus", 204.23, 30.73, -0.05),
        FixedStar::new("Antares", 249.76, -4.57, 1.0),
        FixedStar::new("Vega", 285.32, 61.73, 0.03),
        FixedStar::new("Altair", 301.78, 29.30, 0.8),
        FixedStar::new("Fomalhaut", 333.87, -21.13, 1.2),
        FixedStar::new("Deneb Adige", 335.33, 59.91, 1.3),
        FixedStar::new("Achernar", 345.30, -59.38, 0.5),
    ]
}
