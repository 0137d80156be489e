//! Essential dignities for Western astrology.
//!
//! Rulership, exaltation, triplicity (Dorothean), terms (Egyptian) and faces
//! (Chaldean decans), plus the debilities of detriment and fall.

use crate::config::EngineConfig;
use crate::ephemeris::types::Body;
use crate::math::angular_separation;
use crate::western::rulers::{exaltation, rules};
use crate::zodiac::{Element, Sign};
use serde::{Deserialize, Serialize};

/// Strongest essential dignity held, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DignityStatus {
    Rulership,
    Exaltation,
    Triplicity,
    Term,
    Face,
    Peregrine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dignity {
    pub ruler: bool,
    pub exaltation: bool,
    /// Within the configured tolerance of the exaltation degree
    pub exact_exaltation: bool,
    pub detriment: bool,
    pub fall: bool,
    /// Within the configured tolerance of the fall degree
    pub exact_fall: bool,
    /// Triplicity ruler of the place for the chart's sect
    pub triplicity_ruler: Body,
    /// Participating triplicity ruler, sect independent
    pub triplicity_co_ruler: Body,
    pub term_ruler: Body,
    pub face_ruler: Body,
    pub status: DignityStatus,
}

/// (day, night, participating) triplicity rulers per element
const TRIPLICITIES: [(Element, Body, Body, Body); 4] = [
    (Element::Fire, Body::Sun, Body::Jupiter, Body::Saturn),
    (Element::Earth, Body::Venus, Body::Moon, Body::Mars),
    (Element::Air, Body::Saturn, Body::Mercury, Body::Jupiter),
    (Element::Water, Body::Venus, Body::Mars, Body::Moon),
];

/// Egyptian terms: five (ruler, width) bands per sign, widths summing to 30
const TERMS: [[(Body, f64); 5]; 12] = [
    [(Body::Jupiter, 6.0), (Body::Venus, 6.0), (Body::Mercury, 8.0), (Body::Mars, 5.0), (Body::Saturn, 5.0)],
    [(Body::Venus, 8.0), (Body::Mercury, 6.0), (Body::Jupiter, 8.0), (Body::Saturn, 5.0), (Body::Mars, 3.0)],
    [(Body::Mercury, 6.0), (Body::Jupiter, 6.0), (Body::Venus, 5.0), (Body::Mars, 7.0), (Body::Saturn, 6.0)],
    [(Body::Mars, 7.0), (Body::Venus, 6.0), (Body::Mercury, 6.0), (Body::Jupiter, 7.0), (Body::Saturn, 4.0)],
    [(Body::Jupiter, 6.0), (Body::Venus, 5.0), (Body::Saturn, 7.0), (Body::Mercury, 6.0), (Body::Mars, 6.0)],
    [(Body::Mercury, 7.0), (Body::Venus, 10.0), (Body::Jupiter, 4.0), (Body::Mars, 7.0), (Body::Saturn, 2.0)],
    [(Body::Saturn, 6.0), (Body::Mercury, 8.0), (Body::Jupiter, 7.0), (Body::Venus, 7.0), (Body::Mars, 2.0)],
    [(Body::Mars, 7.0), (Body::Venus, 4.0), (Body::Mercury, 8.0), (Body::Jupiter, 5.0), (Body::Saturn, 6.0)],
    [(Body::Jupiter, 12.0), (Body::Venus, 5.0), (Body::Mercury, 4.0), (Body::Saturn, 5.0), (Body::Mars, 4.0)],
    [(Body::Mercury, 7.0), (Body::Jupiter, 7.0), (Body::Venus, 8.0), (Body::Saturn, 4.0), (Body::Mars, 4.0)],
    [(Body::Mercury, 7.0), (Body::Venus, 6.0), (Body::Jupiter, 7.0), (Body::Mars, 5.0), (Body::Saturn, 5.0)],
    [(Body::Venus, 12.0), (Body::Jupiter, 4.0), (Body::Mercury, 3.0), (Body::Mars, 9.0), (Body::Saturn, 2.0)],
];

/// Chaldean order starting from the first face of Aries
const CHALDEAN_FACES: [Body; 7] = [
    Body::Mars,
    Body::Sun,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Saturn,
    Body::Jupiter,
];

/// (sect ruler, participating ruler) of an element
pub fn triplicity_rulers(element: Element, is_day_chart: bool) -> (Body, Body) {
    let (_, day, night, participating) = TRIPLICITIES
        .iter()
        .find(|(e, _, _, _)| *e == element)
        .copied()
        .unwrap_or(TRIPLICITIES[0]);
    (if is_day_chart { day } else { night }, participating)
}

pub fn term_ruler(sign: Sign, degree_in_sign: f64) -> Body {
    let bands = &TERMS[sign.index()];
    let mut end = 0.0;
    for (ruler, width) in bands {
        end += width;
        if degree_in_sign < end {
            return *ruler;
        }
    }
    bands[4].0
}

/// Face (decan) index 0, 1 or 2 within a sign
pub fn face_index(degree_in_sign: f64) -> usize {
    ((degree_in_sign.max(0.0) / 10.0) as usize).min(2)
}

pub fn face_ruler(sign: Sign, degree_in_sign: f64) -> Body {
    CHALDEAN_FACES[(sign.index() * 3 + face_index(degree_in_sign)) % 7]
}

/// Evaluates essential dignities for planets placed in a sign
#[derive(Debug, Clone)]
pub struct DignityEvaluator {
    modern_rulers: bool,
    exaltation_tolerance: f64,
}

impl DignityEvaluator {
    pub fn new(modern_rulers: bool, exaltation_tolerance: f64) -> Self {
        Self {
            modern_rulers,
            exaltation_tolerance,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.modern_rulers, config.exaltation_tolerance)
    }

    /// Bodies that receive a dignity assessment
    pub fn evaluates(&self, body: Body) -> bool {
        body.is_classical() || (self.modern_rulers && body.is_outer())
    }

    /// Dignities of `planet` at `degree_in_sign` of `sign`; `None` for bodies
    /// outside the dignity scheme (nodes, asteroids, outer planets without
    /// modern rulers).
    pub fn dignities(&self, planet: Body, sign: Sign, degree_in_sign: f64, is_day_chart: bool) -> Option<Dignity> {
        if !self.evaluates(planet) {
            return None;
        }
        let longitude = sign.start_longitude() + degree_in_sign;

        let ruler = rules(planet, sign, self.modern_rulers);
        let detriment = rules(planet, sign.opposite(), self.modern_rulers);

        let (exalted, exact_exaltation, fall, exact_fall) = match exaltation(planet) {
            Some((ex_sign, ex_degree)) => {
                let ex_lon = ex_sign.start_longitude() + ex_degree;
                (
                    sign == ex_sign,
                    angular_separation(longitude, ex_lon) <= self.exaltation_tolerance,
                    sign == ex_sign.opposite(),
                    angular_separation(longitude, ex_lon + 180.0) <= self.exaltation_tolerance,
                )
            }
            None => (false, false, false, false),
        };

        let (triplicity_ruler, triplicity_co_ruler) = triplicity_rulers(sign.element(), is_day_chart);
        let term = term_ruler(sign, degree_in_sign);
        let face = face_ruler(sign, degree_in_sign);

        let status = if ruler {
            DignityStatus::Rulership
        } else if exalted {
            DignityStatus::Exaltation
        } else if triplicity_ruler == planet {
            DignityStatus::Triplicity
        } else if term == planet {
            DignityStatus::Term
        } else if face == planet {
            DignityStatus::Face
        } else {
            DignityStatus::Peregrine
        };

        Some(Dignity {
            ruler,
            exaltation: exalted,
            exact_exaltation,
            detriment,
            fall,
            exact_fall,
            triplicity_ruler,
            triplicity_co_ruler,
            term_ruler: term,
            face_ruler: face,
            status,
        })
    }

    pub fn dignities_at(&self, planet: Body, longitude: f64, is_day_chart: bool) -> Option<Dignity> {
        let pos = crate::zodiac::SignPosition::from_longitude(longitude);
        self.dignities(planet, pos.sign, pos.degree_in_sign, is_day_chart)
    }
}

impl Default for DignityEvaluator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_cover_each_sign() {
        for bands in TERMS.iter() {
            let total: f64 = bands.iter().map(|(_, w)| w).sum();
            assert_eq!(total, 30.0);
        }
    }

    #[test]
    fn test_term_and_face_rulers() {
        assert_eq!(term_ruler(Sign::Aries, 0.0), Body::Jupiter);
        assert_eq!(term_ruler(Sign::Aries, 6.0), Body::Venus);
        assert_eq!(term_ruler(Sign::Aries, 29.9), Body::Saturn);
        assert_eq!(term_ruler(Sign::Sagittarius, 11.9), Body::Jupiter);
        assert_eq!(face_ruler(Sign::Aries, 5.0), Body::Mars);
        assert_eq!(face_ruler(Sign::Aries, 25.0), Body::Venus);
        assert_eq!(face_ruler(Sign::Taurus, 0.0), Body::Mercury);
        assert_eq!(face_ruler(Sign::Pisces, 29.0), Body::Mars);
    }

    #[test]
    fn test_sun_in_leo_rules() {
        let eval = DignityEvaluator::default();
        let d = eval.dignities(Body::Sun, Sign::Leo, 15.0, true).unwrap();
        assert!(d.ruler);
        assert_eq!(d.status, DignityStatus::Rulership);
        assert!(!d.detriment);
    }

    #[test]
    fn test_venus_in_virgo_falls() {
        let eval = DignityEvaluator::default();
        let d = eval.dignities(Body::Venus, Sign::Virgo, 27.0, false).unwrap();
        assert!(d.fall);
        assert!(d.exact_fall);
        assert!(!d.exaltation);
        assert_eq!(d.triplicity_ruler, Body::Moon);
        assert_eq!(d.triplicity_co_ruler, Body::Mars);
        assert_eq!(d.term_ruler, Body::Mars);
    }

    #[test]
    fn test_triplicity_depends_on_sect() {
        let eval = DignityEvaluator::default();
        let day = eval.dignities(Body::Jupiter, Sign::Sagittarius, 20.0, true).unwrap();
        assert_eq!(day.status, DignityStatus::Rulership);
        let day = eval.dignities(Body::Jupiter, Sign::Aries, 20.0, true).unwrap();
        assert_eq!(day.status, DignityStatus::Peregrine);
        let night = eval.dignities(Body::Jupiter, Sign::Aries, 20.0, false).unwrap();
        assert_eq!(night.status, DignityStatus::Triplicity);
    }

    #[test]
    fn test_exact_exaltation() {
        let eval = DignityEvaluator::default();
        let d = eval.dignities_at(Body::Sun, 19.0, true).unwrap();
        assert!(d.exaltation && d.exact_exaltation);
        assert_eq!(d.status, DignityStatus::Exaltation);
        let d = eval.dignities_at(Body::Sun, 5.0, true).unwrap();
        assert!(d.exaltation && !d.exact_exaltation);
    }

    #[test]
    fn test_nodes_and_outer_planets() {
        let eval = DignityEvaluator::default();
        assert!(eval.dignities(Body::TrueNode, Sign::Gemini, 3.0, true).is_none());
        assert!(eval.dignities(Body::Pluto, Sign::Scorpio, 3.0, true).is_none());
        let modern = DignityEvaluator::new(true, 2.0);
        let d = modern.dignities(Body::Pluto, Sign::Scorpio, 3.0, true).unwrap();
        assert_eq!(d.status, DignityStatus::Rulership);
        let d = modern.dignities(Body::Uranus, Sign::Leo, 3.0, true).unwrap();
        assert!(d.detriment);
    }
}
