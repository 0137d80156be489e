//! Self-contained low-precision ephemeris.
//!
//! Sun and Moon follow Meeus (Astronomical Algorithms, ch. 25 and a truncated
//! ch. 47), the planets use the JPL approximate Keplerian elements valid
//! 1800-2050, and the lunar nodes and apogee use Meeus' mean elements with the
//! principal true-node terms. Accuracy is of the order of 0.01° for the Sun and
//! planets and a few hundredths of a degree for the Moon, which is ample for
//! chart work and keeps the engine usable without ephemeris files.

use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::time::{julian_centuries, local_sidereal_time, mean_obliquity, terrestrial_time};
use crate::ephemeris::types::{Body, EclipticPosition, GeoLocation, HouseFrame, Observer};
use crate::error::{ChartError, ChartResult};
use crate::houses::{compute_house_frame, HouseSystem};
use crate::math::{normalize_degrees, signed_delta};

const AU_KM: f64 = 149_597_870.7;
const EARTH_RADIUS_KM: f64 = 6_378.14;
const LIGHT_DAYS_PER_AU: f64 = 0.005_775_518_3;
/// Half-width of the central difference used for speeds
const SPEED_STEP_DAYS: f64 = 0.01;
const KEPLER_MAX_ITER: usize = 30;

/// Keplerian elements at J2000 and their rates per Julian century:
/// a (AU), e, I, L, longitude of perihelion, longitude of ascending node (degrees)
struct OrbitalElements {
    base: [f64; 6],
    rate: [f64; 6],
}

const EARTH: OrbitalElements = OrbitalElements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};

fn planet_elements(body: Body) -> Option<OrbitalElements> {
    let elements = match body {
        Body::Mercury => OrbitalElements {
            base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
            rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
        },
        Body::Venus => OrbitalElements {
            base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
            rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
        },
        Body::Mars => OrbitalElements {
            base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
            rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
        },
        Body::Jupiter => OrbitalElements {
            base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
            rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
        },
        Body::Saturn => OrbitalElements {
            base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
            rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
        },
        Body::Uranus => OrbitalElements {
            base: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
            rate: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
        },
        Body::Neptune => OrbitalElements {
            base: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
            rate: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
        },
        Body::Pluto => OrbitalElements {
            base: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
            rate: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
        },
        _ => return None,
    };
    Some(elements)
}

/// Periodic terms for the Moon's longitude and distance:
/// D, M, M', F, Σl (1e-6 deg), Σr (1e-3 km)
const MOON_LR: [(i8, i8, i8, i8, f64, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
];

/// Periodic terms for the Moon's latitude: D, M, M', F, Σb (1e-6 deg)
const MOON_B: [(i8, i8, i8, i8, f64); 15] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
];

/// Geocentric spherical coordinates, equinox of date
#[derive(Debug, Clone, Copy)]
struct Spherical {
    lon: f64,
    lat: f64,
    /// AU; zero for calculated points without a physical body
    dist: f64,
}

/// Fundamental lunar arguments in degrees (Meeus 47.1-47.5)
struct LunarArguments {
    l: f64,
    d: f64,
    m: f64,
    mp: f64,
    f: f64,
}

impl LunarArguments {
    fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            l: 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
                - t4 / 65_194_000.0,
            d: 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
                - t4 / 113_065_000.0,
            m: 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0,
            mp: 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
                - t4 / 14_712_000.0,
            f: 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
                + t4 / 863_310_000.0,
        }
    }
}

fn sin_d(deg: f64) -> f64 {
    deg.to_radians().sin()
}

fn cos_d(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Nutation in longitude, degrees (Meeus 22, low-accuracy form)
fn nutation_longitude(t: f64) -> f64 {
    let omega = 125.044_52 - 1_934.136_261 * t;
    let l_sun = 280.4665 + 36_000.7698 * t;
    let l_moon = 218.3165 + 481_267.8813 * t;
    (-17.20 * sin_d(omega) - 1.32 * sin_d(2.0 * l_sun) - 0.23 * sin_d(2.0 * l_moon)
        + 0.21 * sin_d(2.0 * omega))
        / 3600.0
}

/// General precession in longitude from J2000 to the date, degrees
fn precession_since_j2000(t: f64) -> f64 {
    (5_029.096_6 * t + 1.111_13 * t * t) / 3600.0
}

fn sun_geocentric(t: f64) -> Spherical {
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_d(m)
        + (0.019_993 - 0.000_101 * t) * sin_d(2.0 * m)
        + 0.000_289 * sin_d(3.0 * m);
    let true_lon = l0 + c;
    let nu = m + c;
    let r = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * cos_d(nu));
    Spherical {
        lon: normalize_degrees(true_lon - 0.005_69 + nutation_longitude(t)),
        lat: 0.0,
        dist: r,
    }
}

fn moon_geocentric(t: f64) -> Spherical {
    let args = LunarArguments::at(t);
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    let eccentricity_factor = |m: i8| match m.abs() {
        0 => 1.0,
        1 => e,
        _ => e * e,
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(d, m, mp, f, cl, cr) in MOON_LR.iter() {
        let arg = f64::from(d) * args.d + f64::from(m) * args.m + f64::from(mp) * args.mp
            + f64::from(f) * args.f;
        let k = eccentricity_factor(m);
        sum_l += cl * k * sin_d(arg);
        sum_r += cr * k * cos_d(arg);
    }
    let mut sum_b = 0.0;
    for &(d, m, mp, f, cb) in MOON_B.iter() {
        let arg = f64::from(d) * args.d + f64::from(m) * args.m + f64::from(mp) * args.mp
            + f64::from(f) * args.f;
        sum_b += cb * eccentricity_factor(m) * sin_d(arg);
    }

    sum_l += 3_958.0 * sin_d(a1) + 1_962.0 * sin_d(args.l - args.f) + 318.0 * sin_d(a2);
    sum_b += -2_235.0 * sin_d(args.l) + 382.0 * sin_d(a3) + 175.0 * sin_d(a1 - args.f)
        + 175.0 * sin_d(a1 + args.f)
        + 127.0 * sin_d(args.l - args.mp)
        - 115.0 * sin_d(args.l + args.mp);

    Spherical {
        lon: normalize_degrees(args.l + sum_l / 1e6 + nutation_longitude(t)),
        lat: sum_b / 1e6,
        dist: (385_000.56 + sum_r / 1_000.0) / AU_KM,
    }
}

fn mean_node(t: f64) -> f64 {
    let t2 = t * t;
    125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t2 * t / 467_441.0
        - t2 * t2 / 60_616_000.0
}

fn true_node(t: f64) -> f64 {
    let args = LunarArguments::at(t);
    mean_node(t) - 1.4979 * sin_d(2.0 * (args.d - args.f)) - 0.1500 * sin_d(args.m)
        - 0.1226 * sin_d(2.0 * args.d)
        + 0.1176 * sin_d(2.0 * args.f)
        - 0.0801 * sin_d(2.0 * (args.mp - args.f))
}

/// Mean lunar apogee (Black Moon Lilith)
fn mean_apogee(t: f64) -> f64 {
    let t2 = t * t;
    83.353_246_5 + 4_069.013_728_7 * t - 0.010_320_0 * t2 - t2 * t / 80_053.0
        + t2 * t2 / 18_999_000.0
        + 180.0
}

fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let m = (mean_anomaly + std::f64::consts::PI).rem_euclid(std::f64::consts::TAU) - std::f64::consts::PI;
    let mut ecc = m + e * m.sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (ecc - e * ecc.sin() - m) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc
}

/// Heliocentric ecliptic coordinates (AU, mean ecliptic and equinox J2000)
fn heliocentric(elements: &OrbitalElements, t: f64) -> [f64; 3] {
    let el: Vec<f64> = (0..6).map(|i| elements.base[i] + elements.rate[i] * t).collect();
    let (a, e, inc, l, peri, node) = (el[0], el[1], el[2].to_radians(), el[3], el[4], el[5]);
    let omega = (peri - node).to_radians();
    let node = node.to_radians();
    let ecc = solve_kepler((l - peri).to_radians(), e);

    let xp = a * (ecc.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc.sin();

    let (cw, sw) = (omega.cos(), omega.sin());
    let (cn, sn) = (node.cos(), node.sin());
    let (ci, si) = (inc.cos(), inc.sin());
    [
        (cw * cn - sw * sn * ci) * xp + (-sw * cn - cw * sn * ci) * yp,
        (cw * sn + sw * cn * ci) * xp + (-sw * sn + cw * cn * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ]
}

fn planet_geocentric(elements: &OrbitalElements, t: f64) -> Spherical {
    let earth = heliocentric(&EARTH, t);
    let relative = |p: [f64; 3]| [p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]];
    let mut d = relative(heliocentric(elements, t));
    let dist = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
    // one light-time iteration
    let retarded = t - dist * LIGHT_DAYS_PER_AU / 36_525.0;
    d = relative(heliocentric(elements, retarded));
    let dist = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
    let lon = d[1].atan2(d[0]).to_degrees();
    let lat = d[2].atan2(d[0].hypot(d[1])).to_degrees();
    Spherical {
        lon: normalize_degrees(lon + precession_since_j2000(t) + nutation_longitude(t)),
        lat,
        dist,
    }
}

/// Shift a geocentric position to an observer on the Earth's surface
fn apply_parallax(pos: Spherical, location: &GeoLocation, elevation_m: f64, jd_ut: f64) -> Spherical {
    if pos.dist <= 0.0 {
        return pos;
    }
    let eps = mean_obliquity(jd_ut).to_radians();
    let (l, b) = (pos.lon.to_radians(), pos.lat.to_radians());
    let x = pos.dist * b.cos() * l.cos();
    let y = pos.dist * b.cos() * l.sin();
    let z = pos.dist * b.sin();
    // ecliptic -> equatorial
    let ye = y * eps.cos() - z * eps.sin();
    let ze = y * eps.sin() + z * eps.cos();

    let rho = (EARTH_RADIUS_KM + elevation_m / 1_000.0) / AU_KM;
    let geocentric_lat = (location.lat - 0.1924 * sin_d(2.0 * location.lat)).to_radians();
    let lst = local_sidereal_time(jd_ut, location.lon).to_radians();
    let xo = rho * geocentric_lat.cos() * lst.cos();
    let yo = rho * geocentric_lat.cos() * lst.sin();
    let zo = rho * geocentric_lat.sin();

    let (xt, yt, zt) = (x - xo, ye - yo, ze - zo);
    // equatorial -> ecliptic
    let yc = yt * eps.cos() + zt * eps.sin();
    let zc = -yt * eps.sin() + zt * eps.cos();
    Spherical {
        lon: normalize_degrees(yc.atan2(xt).to_degrees()),
        lat: zc.atan2(xt.hypot(yc)).to_degrees(),
        dist: (xt * xt + yt * yt + zt * zt).sqrt(),
    }
}

/// Pure-Rust ephemeris provider
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    pub fn supports(body: Body) -> bool {
        !matches!(
            body,
            Body::Chiron | Body::Ceres | Body::Pallas | Body::Juno | Body::Vesta
        )
    }

    fn geocentric(&self, body: Body, jd_ut: f64) -> ChartResult<Spherical> {
        let t = julian_centuries(terrestrial_time(jd_ut));
        let point = |lon: f64| Spherical {
            lon: normalize_degrees(lon),
            lat: 0.0,
            dist: 0.0,
        };
        let pos = match body {
            Body::Sun => sun_geocentric(t),
            Body::Moon => moon_geocentric(t),
            Body::MeanNode => point(mean_node(t)),
            Body::TrueNode => point(true_node(t)),
            Body::SouthNode => point(true_node(t) + 180.0),
            Body::Lilith => point(mean_apogee(t)),
            other => match planet_elements(other) {
                Some(elements) => planet_geocentric(&elements, t),
                None => {
                    return Err(ChartError::unavailable(
                        other.name(),
                        "no analytic theory for this body",
                    ))
                }
            },
        };
        Ok(pos)
    }

    fn observed(&self, body: Body, jd_ut: f64, observer: &Observer) -> ChartResult<Spherical> {
        let pos = self.geocentric(body, jd_ut)?;
        Ok(match observer {
            Observer::Geocentric => pos,
            Observer::Topocentric { location, elevation_m } => {
                apply_parallax(pos, location, *elevation_m, jd_ut)
            }
        })
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn name(&self) -> &str {
        "analytic"
    }

    fn position(&self, body: Body, jd_ut: f64, observer: &Observer) -> ChartResult<EclipticPosition> {
        let now = self.observed(body, jd_ut, observer)?;
        let ahead = self.observed(body, jd_ut + SPEED_STEP_DAYS, observer)?;
        let behind = self.observed(body, jd_ut - SPEED_STEP_DAYS, observer)?;
        Ok(EclipticPosition {
            longitude: now.lon,
            latitude: now.lat,
            distance_au: now.dist,
            speed_longitude: signed_delta(ahead.lon, behind.lon) / (2.0 * SPEED_STEP_DAYS),
        })
    }

    fn houses(&self, jd_ut: f64, location: &GeoLocation, system: HouseSystem) -> ChartResult<HouseFrame> {
        let armc = local_sidereal_time(jd_ut, location.lon);
        let eps = mean_obliquity(terrestrial_time(jd_ut));
        compute_house_frame(system, armc, location.lat, eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::time::J2000;
    use crate::math::angular_separation;

    #[test]
    fn test_sun_meeus_example() {
        // Meeus example 25.a: 1992-10-13 0h TD, apparent longitude 199.90988
        let t = julian_centuries(2_448_908.5);
        let sun = sun_geocentric(t);
        assert!(angular_separation(sun.lon, 199.909_88) < 0.01, "{}", sun.lon);
        assert!((sun.dist - 0.997_66).abs() < 1e-3);
    }

    #[test]
    fn test_moon_meeus_example() {
        // Meeus example 47.a: 1992-04-12 0h TD, λ = 133.162655, β = -3.229126
        let t = julian_centuries(2_448_724.5);
        let moon = moon_geocentric(t);
        assert!(angular_separation(moon.lon, 133.162_655) < 0.06, "{}", moon.lon);
        assert!((moon.lat + 3.229_126).abs() < 0.08, "{}", moon.lat);
        assert!((moon.dist * AU_KM - 368_409.7).abs() < 300.0);
    }

    #[test]
    fn test_mean_node_j2000() {
        assert!(angular_separation(normalize_degrees(mean_node(0.0)), 125.044_547_9) < 1e-9);
    }

    #[test]
    fn test_kepler_circular_orbit() {
        assert!((solve_kepler(1.0, 0.0) - 1.0).abs() < 1e-12);
        let e = 0.2;
        let ecc = solve_kepler(2.0, e);
        assert!((ecc - e * ecc.sin() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_unsupported_body_is_unavailable() {
        let eph = AnalyticEphemeris::new();
        let err = eph.position(Body::Chiron, J2000, &Observer::Geocentric).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::EphemerisUnavailable);
    }

    #[test]
    fn test_sun_speed_about_one_degree() {
        let eph = AnalyticEphemeris::new();
        let sun = eph.position(Body::Sun, J2000, &Observer::Geocentric).unwrap();
        assert!((sun.speed_longitude - 1.019).abs() < 0.01, "{}", sun.speed_longitude);
        assert!(angular_separation(sun.longitude, 280.37) < 0.05, "{}", sun.longitude);
    }

    #[test]
    fn test_topocentric_moon_parallax_bounded() {
        let eph = AnalyticEphemeris::new();
        let geo = eph.position(Body::Moon, J2000, &Observer::Geocentric).unwrap();
        let topo = eph
            .position(
                Body::Moon,
                J2000,
                &Observer::Topocentric {
                    location: GeoLocation { lat: 40.0, lon: -74.0 },
                    elevation_m: 10.0,
                },
            )
            .unwrap();
        let shift = angular_separation(geo.longitude, topo.longitude);
        assert!(shift > 0.0 && shift < 1.1, "{}", shift);
    }
}
