#[cfg(test)]
mod tests {
    use aphrodite_core::western::decans::*;
    use aphrodite_core::zodiac::{Element, Sign};
    use aphrodite_core::Body;

    #[test]
    fn test_decan_index_bands() {
        for (degree, index) in [(0.0, 1), (5.0, 1), (9.999, 1), (10.0, 2), (15.0, 2), (19.999, 2), (20.0, 3), (29.999, 3)] {
            assert_eq!(decan_index(degree), index, "{degree}");
        }
    }

    #[test]
    fn test_decan_info_for_sign_and_degree() {
        let info = decan_info_for_sign_and_degree(Sign::Aries, 5.0, false);
        assert_eq!(info.sign, Sign::Aries);
        assert_eq!(info.element, Element::Fire);
        assert_eq!(info.decan_index, 1);
        assert_eq!(info.sign_ruler, Body::Mars);
        assert_eq!(info.decan_ruler, Body::Mars);
    }

    #[test]
    fn test_decan_info_from_longitude() {
        // 25° Leo: third decan of fire falls to Aries
        let info = decan_info_from_longitude(145.0, false);
        assert_eq!(info.sign, Sign::Leo);
        assert_eq!(info.decan_index, 3);
        assert!((info.degree_in_sign - 25.0).abs() < 1e-9);
        assert_eq!(info.decan_ruler, Body::Mars);
        assert_eq!(info.face_ruler, Body::Mars);

        // 15° Aquarius: second decan belongs to Gemini
        let info = decan_info_from_longitude(315.0, true);
        assert_eq!(info.sign_ruler, Body::Uranus);
        assert_eq!(info.decan_ruler, Body::Mercury);
    }

    #[test]
    fn test_decan_info_camel_case_json() {
        let json = serde_json::to_value(decan_info_from_longitude(0.0, false)).unwrap();
        assert!(json.get("decanRuler").is_some());
        assert!(json.get("degreeInSign").is_some());
    }
}
