//! Swiss Ephemeris backed provider (`swiss-ephemeris` feature).

use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{Body, EclipticPosition, GeoLocation, HouseFrame, Observer};
use crate::error::{ChartError, ChartResult};
use crate::houses::HouseSystem;
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, houses_ex};

/// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris body numbers
const BODY_CODES: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
    (Body::MeanNode, 10),
    (Body::TrueNode, 11),
    (Body::Lilith, 12),
    (Body::Chiron, 15),
    (Body::Ceres, 17),
    (Body::Pallas, 18),
    (Body::Juno, 19),
    (Body::Vesta, 20),
];

pub struct SwissEphemeris {
    ephemeris_path: PathBuf,
}

impl SwissEphemeris {
    /// Create a provider reading data files from `ephemeris_path`, falling back
    /// to `SWISS_EPHEMERIS_PATH` and then the usual system location.
    pub fn new(ephemeris_path: Option<PathBuf>) -> ChartResult<Self> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });
        if !path.exists() {
            return Err(ChartError::unavailable(
                "swiss ephemeris",
                format!("ephemeris path does not exist: {}", path.display()),
            ));
        }
        Ok(Self { ephemeris_path: path })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    fn body_code(body: Body) -> ChartResult<i32> {
        BODY_CODES
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| ChartError::unavailable(body.name(), "no Swiss Ephemeris body number"))
    }
}

impl EphemerisProvider for SwissEphemeris {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn position(&self, body: Body, jd_ut: f64, observer: &Observer) -> ChartResult<EclipticPosition> {
        if let Observer::Topocentric { .. } = observer {
            return Err(ChartError::unavailable(
                body.name(),
                "topocentric positions are not supported by this provider",
            ));
        }
        if body == Body::SouthNode {
            let north = self.position(Body::TrueNode, jd_ut, observer)?;
            return Ok(EclipticPosition {
                longitude: north.longitude + 180.0,
                latitude: -north.latitude,
                ..north
            });
        }
        let code = Self::body_code(body)?;
        let result = calc_ut(jd_ut, code as u32, CALC_FLAGS as u32)
            .map_err(|e| ChartError::unavailable(body.name(), format!("Swiss Ephemeris error: {}", e)))?;
        let out = result.out;
        Ok(EclipticPosition {
            longitude: out[0],
            latitude: out[1],
            distance_au: out[2],
            speed_longitude: out[3],
        })
    }

    fn houses(&self, jd_ut: f64, location: &GeoLocation, system: HouseSystem) -> ChartResult<HouseFrame> {
        let (c, a) = houses_ex(jd_ut, 0, location.lat, location.lon, system.code() as i32);
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = c[i + 1];
        }
        if cusps.iter().chain(a.iter().take(5)).any(|v| !v.is_finite()) {
            return Err(ChartError::house_calc(system.name(), "Swiss Ephemeris returned non-finite houses"));
        }
        Ok(HouseFrame {
            cusps,
            ascendant: a[0],
            midheaven: a[1],
            armc: a[2],
            vertex: a[3],
            east_point: a[4],
        })
    }
}
