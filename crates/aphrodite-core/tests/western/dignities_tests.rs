#[cfg(test)]
mod tests {
    use aphrodite_core::western::dignities::*;
    use aphrodite_core::zodiac::Sign;
    use aphrodite_core::Body;

    #[test]
    fn test_domicile_rulers() {
        let evaluator = DignityEvaluator::default();
        // Sun in Leo, Moon in Cancer
        let sun = evaluator.dignities_at(Body::Sun, 135.0, true).unwrap();
        assert!(sun.ruler);
        assert_eq!(sun.status, DignityStatus::Rulership);
        let moon = evaluator.dignities_at(Body::Moon, 105.0, false).unwrap();
        assert!(moon.ruler);
    }

    #[test]
    fn test_exact_exaltation_and_fall() {
        let evaluator = DignityEvaluator::default();
        let sun = evaluator.dignities_at(Body::Sun, 19.0, true).unwrap();
        assert!(sun.exaltation && sun.exact_exaltation);
        assert_eq!(sun.status, DignityStatus::Exaltation);

        let saturn = evaluator.dignities(Body::Saturn, Sign::Aries, 21.0, true).unwrap();
        assert!(saturn.fall && saturn.exact_fall);
        assert!(!saturn.exaltation);
    }

    #[test]
    fn test_exaltation_degree_tolerance_is_one_degree() {
        let evaluator = DignityEvaluator::default();
        // Moon exalted at 3° Taurus; 4.5° is in the sign but off the degree
        let moon = evaluator.dignities(Body::Moon, Sign::Taurus, 4.5, true).unwrap();
        assert!(moon.exaltation);
        assert!(!moon.exact_exaltation);
        let moon = evaluator.dignities(Body::Moon, Sign::Taurus, 3.9, true).unwrap();
        assert!(moon.exact_exaltation);

        // fall uses the same tolerance: Moon at 1.5° from 3° Scorpio
        let moon = evaluator.dignities(Body::Moon, Sign::Scorpio, 1.5, true).unwrap();
        assert!(moon.fall);
        assert!(!moon.exact_fall);
    }

    #[test]
    fn test_detriment() {
        let mars = DignityEvaluator::default().dignities(Body::Mars, Sign::Libra, 3.0, true).unwrap();
        assert!(mars.detriment);
        assert!(!mars.ruler);
    }

    #[test]
    fn test_minor_dignities_follow_sect() {
        let evaluator = DignityEvaluator::default();
        // 27° Virgo: Venus in fall, term of Mars, face of Mercury
        let day = evaluator.dignities(Body::Venus, Sign::Virgo, 27.0, true).unwrap();
        assert!(day.exact_fall);
        assert_eq!(day.term_ruler, Body::Mars);
        assert_eq!(day.face_ruler, Body::Mercury);
        assert_eq!(day.triplicity_ruler, Body::Venus);
        assert_eq!(day.status, DignityStatus::Triplicity);

        let night = evaluator.dignities(Body::Venus, Sign::Virgo, 27.0, false).unwrap();
        assert_eq!(night.triplicity_ruler, Body::Moon);
        assert_eq!(night.status, DignityStatus::Peregrine);
    }

    #[test]
    fn test_outer_planets_need_modern_rulers() {
        assert!(DignityEvaluator::default().dignities_at(Body::Uranus, 315.0, true).is_none());
        let modern = DignityEvaluator::new(true, 2.0);
        let uranus = modern.dignities_at(Body::Uranus, 315.0, true).unwrap();
        assert!(uranus.ruler);
        assert!(DignityEvaluator::default().dignities_at(Body::TrueNode, 10.0, true).is_none());
    }
}
