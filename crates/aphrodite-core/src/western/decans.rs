//! Western astrology decans calculations.
//!
//! Each sign is divided into 3 decans (10 degrees each). Decan rulers follow
//! the element-group (triplicity) scheme; the Chaldean face ruler is reported
//! alongside.

use crate::ephemeris::types::Body;
use crate::western::dignities::{face_index, face_ruler};
use crate::western::rulers::sign_ruler;
use crate::zodiac::{Element, Sign, SignPosition, SIGNS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecanInfo {
    pub sign: Sign,
    pub element: Element,
    #[serde(rename = "signRuler")]
    pub sign_ruler: Body,
    #[serde(rename = "decanIndex")]
    pub decan_index: u8, // 1, 2, or 3
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64, // 0 <= x < 30
    /// Ruler of the sign of the same element the decan belongs to
    #[serde(rename = "decanRuler")]
    pub decan_ruler: Body,
    #[serde(rename = "faceRuler")]
    pub face_ruler: Body,
}

/// Given degree in sign (0–29.999...), returns decan index 1, 2, or 3.
pub fn decan_index(degree_in_sign: f64) -> u8 {
    face_index(degree_in_sign) as u8 + 1
}

/// Signs sharing an element, in zodiac order
fn element_group(element: Element) -> Vec<Sign> {
    SIGNS.iter().copied().filter(|s| s.element() == element).collect()
}

/// Compute decan info given a sign and degree in that sign.
pub fn decan_info_for_sign_and_degree(sign: Sign, degree_in_sign: f64, modern: bool) -> DecanInfo {
    let index = decan_index(degree_in_sign);
    let group = element_group(sign.element());
    let position = group.iter().position(|s| *s == sign).unwrap_or(0);
    // Rotate through the 3 signs in the element group
    let ruling_sign = group[(position + index as usize - 1) % group.len()];

    DecanInfo {
        sign,
        element: sign.element(),
        sign_ruler: sign_ruler(sign, modern),
        decan_index: index,
        degree_in_sign,
        decan_ruler: sign_ruler(ruling_sign, modern),
        face_ruler: face_ruler(sign, degree_in_sign),
    }
}

/// Decan info from absolute longitude 0–360.
pub fn decan_info_from_longitude(longitude: f64, modern: bool) -> DecanInfo {
    let pos = SignPosition::from_longitude(longitude);
    decan_info_for_sign_and_degree(pos.sign, pos.degree_in_sign, modern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decan_index() {
        assert_eq!(decan_index(0.0), 1);
        assert_eq!(decan_index(9.999), 1);
        assert_eq!(decan_index(10.0), 2);
        assert_eq!(decan_index(19.999), 2);
        assert_eq!(decan_index(20.0), 3);
        assert_eq!(decan_index(29.999), 3);
    }

    #[test]
    fn test_decan_info_for_sign_and_degree() {
        let info = decan_info_for_sign_and_degree(Sign::Aries, 5.0, false);
        assert_eq!(info.decan_index, 1);
        assert_eq!(info.sign_ruler, Body::Mars);
        assert_eq!(info.decan_ruler, Body::Mars);
        assert_eq!(info.face_ruler, Body::Mars);

        // second decan of Aries belongs to Leo
        let info = decan_info_for_sign_and_degree(Sign::Aries, 15.0, false);
        assert_eq!(info.decan_ruler, Body::Sun);
        assert_eq!(info.face_ruler, Body::Sun);
    }

    #[test]
    fn test_decan_from_longitude_wraps_element_group() {
        // 25° Pisces: third decan, group Cancer/Scorpio/Pisces wraps to Scorpio
        let info = decan_info_from_longitude(355.0, false);
        assert_eq!(info.sign, Sign::Pisces);
        assert_eq!(info.decan_index, 3);
        assert_eq!(info.decan_ruler, Body::Mars);
        let info = decan_info_from_longitude(355.0, true);
        assert_eq!(info.decan_ruler, Body::Pluto);
    }
}
