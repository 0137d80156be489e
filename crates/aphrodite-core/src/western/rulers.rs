//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their planetary rulers (traditional and modern) and
//! planets to their signs of exaltation.

use crate::ephemeris::types::Body;
use crate::zodiac::{Sign, SIGNS};

const TRADITIONAL_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Mars,    // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Saturn,  // Aquarius
    Body::Jupiter, // Pisces
];

/// Exaltation sign and degree of the seven classical planets
const EXALTATIONS: [(Body, Sign, f64); 7] = [
    (Body::Sun, Sign::Aries, 19.0),
    (Body::Moon, Sign::Taurus, 3.0),
    (Body::Mercury, Sign::Virgo, 15.0),
    (Body::Venus, Sign::Pisces, 27.0),
    (Body::Mars, Sign::Capricorn, 28.0),
    (Body::Jupiter, Sign::Cancer, 15.0),
    (Body::Saturn, Sign::Libra, 21.0),
];

pub fn traditional_ruler(sign: Sign) -> Body {
    TRADITIONAL_RULERS[sign.index()]
}

/// Modern co-ruler of Scorpio, Aquarius and Pisces
pub fn modern_ruler(sign: Sign) -> Option<Body> {
    match sign {
        Sign::Scorpio => Some(Body::Pluto),
        Sign::Aquarius => Some(Body::Uranus),
        Sign::Pisces => Some(Body::Neptune),
        _ => None,
    }
}

/// Get sign ruler; the modern scheme prefers the outer planet where there is one
pub fn sign_ruler(sign: Sign, modern: bool) -> Body {
    if modern {
        modern_ruler(sign).unwrap_or_else(|| traditional_ruler(sign))
    } else {
        traditional_ruler(sign)
    }
}

pub fn sign_ruler_from_longitude(longitude: f64, modern: bool) -> Body {
    sign_ruler(Sign::from_longitude(longitude), modern)
}

/// Whether `body` rules `sign` (traditional ruler, plus the modern co-ruler when enabled)
pub fn rules(body: Body, sign: Sign, modern: bool) -> bool {
    traditional_ruler(sign) == body || (modern && modern_ruler(sign) == Some(body))
}

pub fn signs_ruled_by(body: Body, modern: bool) -> Vec<Sign> {
    SIGNS.iter().copied().filter(|s| rules(body, *s, modern)).collect()
}

/// Exaltation sign and degree within it
pub fn exaltation(body: Body) -> Option<(Sign, f64)> {
    EXALTATIONS
        .iter()
        .find(|(b, _, _)| *b == body)
        .map(|(_, sign, degree)| (*sign, *degree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_sign_ruler_traditional() {
        assert_eq!(sign_ruler(Sign::Aries, false), Body::Mars);
        assert_eq!(sign_ruler(Sign::Cancer, false), Body::Moon);
        assert_eq!(sign_ruler(Sign::Leo, false), Body::Sun);
        assert_eq!(sign_ruler(Sign::Scorpio, false), Body::Mars);
    }

    #[test]
    fn test_get_sign_ruler_modern() {
        assert_eq!(sign_ruler(Sign::Scorpio, true), Body::Pluto);
        assert_eq!(sign_ruler(Sign::Aquarius, true), Body::Uranus);
        assert_eq!(sign_ruler(Sign::Pisces, true), Body::Neptune);
        assert_eq!(sign_ruler(Sign::Gemini, true), Body::Mercury);
    }

    #[test]
    fn test_signs_ruled_by() {
        assert_eq!(signs_ruled_by(Body::Saturn, false), vec![Sign::Capricorn, Sign::Aquarius]);
        assert_eq!(signs_ruled_by(Body::Uranus, false), Vec::<Sign>::new());
        assert_eq!(signs_ruled_by(Body::Uranus, true), vec![Sign::Aquarius]);
        assert!(rules(Body::Saturn, Sign::Aquarius, true));
    }
}
