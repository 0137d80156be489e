//! Zodiac signs and longitude formatting.

use crate::math::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

pub const SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Sign containing an ecliptic longitude
    pub fn from_longitude(longitude: f64) -> Sign {
        let idx = (normalize_degrees(longitude) / 30.0) as usize;
        SIGNS[idx.min(11)]
    }

    pub fn from_index(index: usize) -> Sign {
        SIGNS[index % 12]
    }

    /// 0 for Aries .. 11 for Pisces
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn opposite(self) -> Sign {
        Sign::from_index(self.index() + 6)
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Longitude broken down into sign and degree/minute/second within it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: Sign,
    /// Decimal degrees within the sign, `[0, 30)`
    pub degree_in_sign: f64,
    pub degrees: u8,
    pub minutes: u8,
    pub seconds: f64,
}

impl SignPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        let sign = Sign::from_longitude(lon);
        let degree_in_sign = (lon - sign.start_longitude()).clamp(0.0, 30.0 - f64::EPSILON * 32.0);
        let degrees = degree_in_sign.floor();
        let minutes_f = (degree_in_sign - degrees) * 60.0;
        let minutes = minutes_f.floor();
        let seconds = (minutes_f - minutes) * 60.0;
        SignPosition {
            sign,
            degree_in_sign,
            degrees: degrees as u8,
            minutes: minutes as u8,
            seconds,
        }
    }
}

impl fmt::Display for SignPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{:02}'{:02}\" {}",
            self.degrees,
            self.minutes,
            self.seconds.floor() as u8,
            self.sign
        )
    }
}
