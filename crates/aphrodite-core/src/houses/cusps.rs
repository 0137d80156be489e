use crate::error::{ChartError, ChartResult};
use crate::houses::HouseSystem;
use crate::math::normalize_degrees;
use serde::{Deserialize, Serialize};

/// Spans of the twelve houses must add up to a full circle within this tolerance
const CIRCLE_TOLERANCE: f64 = 1e-6;

/// Twelve ordered house cusps forming a partition of the ecliptic.
///
/// House `i` is the half-open interval `[cusp_i, cusp_{i+1})` taken in the
/// direction of increasing longitude, with house 12 wrapping to cusp 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 12]", into = "[f64; 12]")]
pub struct HouseCusps {
    cusps: [f64; 12],
}

impl HouseCusps {
    pub fn new(raw: [f64; 12]) -> ChartResult<Self> {
        let mut cusps = [0.0; 12];
        for (i, value) in raw.iter().enumerate() {
            if !value.is_finite() {
                return Err(ChartError::house_calc(
                    "cusps",
                    format!("cusp {} is not finite", i + 1),
                ));
            }
            cusps[i] = normalize_degrees(*value);
        }
        let mut total = 0.0;
        for i in 0..12 {
            let span = forward_span(cusps[i], cusps[(i + 1) % 12]);
            if span <= 0.0 {
                return Err(ChartError::house_calc(
                    "cusps",
                    format!("house {} has an empty span", i + 1),
                ));
            }
            total += span;
        }
        if (total - 360.0).abs() > CIRCLE_TOLERANCE {
            return Err(ChartError::house_calc(
                "cusps",
                format!("cusps are out of order (spans total {total:.6}°)"),
            ));
        }
        Ok(Self { cusps })
    }

    /// Cusp of house `house` (1..=12)
    pub fn cusp(&self, house: u8) -> Option<f64> {
        if (1..=12).contains(&house) {
            Some(self.cusps[house as usize - 1])
        } else {
            None
        }
    }

    pub fn as_array(&self) -> &[f64; 12] {
        &self.cusps
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.cusps.iter().enumerate().map(|(i, c)| (i as u8 + 1, *c))
    }

    /// Angular width of house `house`
    pub fn span(&self, house: u8) -> Option<f64> {
        let start = self.cusp(house)?;
        let end = self.cusps[house as usize % 12];
        Some(forward_span(start, end))
    }

    /// House (1..=12) containing an ecliptic longitude.
    ///
    /// A longitude that no interval claims signals inconsistent cusps and is
    /// reported rather than assigned a default house.
    pub fn house_of(&self, longitude: f64) -> ChartResult<u8> {
        let lon = normalize_degrees(longitude);
        for i in 0..12 {
            let start = self.cusps[i];
            let span = forward_span(start, self.cusps[(i + 1) % 12]);
            if normalize_degrees(lon - start) < span {
                return Ok(i as u8 + 1);
            }
        }
        Err(ChartError::house_calc(
            "placement",
            format!("longitude {lon:.6} falls in no house"),
        ))
    }

    /// Whole-sign or equal cusps starting from a first cusp
    pub fn equal_from(first: f64) -> ChartResult<Self> {
        let mut raw = [0.0; 12];
        for (i, cusp) in raw.iter_mut().enumerate() {
            *cusp = first + 30.0 * i as f64;
        }
        Self::new(raw)
    }
}

impl TryFrom<[f64; 12]> for HouseCusps {
    type Error = ChartError;

    fn try_from(raw: [f64; 12]) -> Result<Self, Self::Error> {
        HouseCusps::new(raw)
    }
}

impl From<HouseCusps> for [f64; 12] {
    fn from(cusps: HouseCusps) -> Self {
        cusps.cusps
    }
}

/// Validated cusps plus the angles of one house computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseSet {
    pub system: HouseSystem,
    pub cusps: HouseCusps,
    pub ascendant: f64,
    pub midheaven: f64,
    pub vertex: f64,
    pub east_point: f64,
    pub armc: f64,
}

fn forward_span(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HouseCusps {
        HouseCusps::new([
            100.0, 125.0, 152.0, 184.0, 218.0, 250.0, 280.0, 305.0, 332.0, 4.0, 38.0, 70.0,
        ])
        .unwrap()
    }

    #[test]
    fn test_house_of_wraps_past_aries() {
        let cusps = sample();
        assert_eq!(cusps.house_of(100.0).unwrap(), 1);
        assert_eq!(cusps.house_of(124.999).unwrap(), 1);
        assert_eq!(cusps.house_of(125.0).unwrap(), 2);
        assert_eq!(cusps.house_of(359.0).unwrap(), 9);
        assert_eq!(cusps.house_of(2.0).unwrap(), 9);
        assert_eq!(cusps.house_of(4.0).unwrap(), 10);
        assert_eq!(cusps.house_of(99.9).unwrap(), 12);
    }

    #[test]
    fn test_every_longitude_gets_exactly_one_house() {
        let cusps = sample();
        let mut lon = 0.0;
        while lon < 360.0 {
            let house = cusps.house_of(lon).unwrap();
            let claimed = (1..=12u8)
                .filter(|h| {
                    let start = cusps.cusp(*h).unwrap();
                    normalize_degrees(lon - start) < cusps.span(*h).unwrap()
                })
                .count();
            assert_eq!(claimed, 1, "longitude {lon}");
            assert!((1..=12).contains(&house));
            lon += 0.37;
        }
    }

    #[test]
    fn test_out_of_order_cusps_rejected() {
        let err = HouseCusps::new([
            0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 330.0, 300.0,
        ])
        .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::HouseCalcError);

        let err = HouseCusps::new([0.0; 12]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::HouseCalcError);
    }

    #[test]
    fn test_serde_validates() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: HouseCusps = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
        assert!(serde_json::from_str::<HouseCusps>("[1,1,1,1,1,1,1,1,1,1,1,1]").is_err());
    }
}
