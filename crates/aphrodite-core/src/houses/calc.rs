//! Cusp and angle computation from sidereal time, latitude and obliquity.

use crate::ephemeris::types::HouseFrame;
use crate::error::{ChartError, ChartResult};
use crate::houses::HouseSystem;
use crate::math::normalize_degrees;

const PLACIDUS_MAX_ITER: usize = 100;
const PLACIDUS_CONVERGENCE_DEG: f64 = 1e-10;

/// Ecliptic point rising on the horizon of a pole `pole` when the meridian
/// has right ascension `armc`.
fn oblique_ascendant(armc: f64, pole: f64, eps: f64) -> f64 {
    let (t, p, e) = (armc.to_radians(), pole.to_radians(), eps.to_radians());
    let y = t.cos();
    let x = -(t.sin() * e.cos() + p.tan() * e.sin());
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Ecliptic longitude of the point on the hour circle of right ascension `ra`
fn ra_to_longitude(ra: f64, eps: f64) -> f64 {
    let (r, e) = (ra.to_radians(), eps.to_radians());
    normalize_degrees(r.sin().atan2(r.cos() * e.cos()).to_degrees())
}

/// Ecliptic longitude of the equator point `ra` projected through the ecliptic poles
fn equator_to_longitude(ra: f64, eps: f64) -> f64 {
    let (r, e) = (ra.to_radians(), eps.to_radians());
    normalize_degrees((r.sin() * e.cos()).atan2(r.cos()).to_degrees())
}

fn declination_of(longitude: f64, eps: f64) -> f64 {
    (eps.to_radians().sin() * longitude.to_radians().sin())
        .asin()
        .to_degrees()
}

/// Ascensional difference of a declination, `None` where the semi-arc vanishes
fn ascensional_difference(dec: f64, latitude: f64) -> Option<f64> {
    let x = latitude.to_radians().tan() * dec.to_radians().tan();
    if !x.is_finite() || x.abs() > 1.0 {
        None
    } else {
        Some(x.asin().to_degrees())
    }
}

pub fn ascendant(armc: f64, latitude: f64, eps: f64) -> f64 {
    oblique_ascendant(armc, latitude, eps)
}

pub fn midheaven(armc: f64, eps: f64) -> f64 {
    ra_to_longitude(armc, eps)
}

/// Equatorial ascendant
pub fn east_point(armc: f64, eps: f64) -> f64 {
    oblique_ascendant(armc, 0.0, eps)
}

/// Western intersection of the ecliptic and the prime vertical
pub fn vertex(armc: f64, latitude: f64, eps: f64) -> f64 {
    let co_latitude = if latitude >= 0.0 {
        90.0 - latitude
    } else {
        -90.0 - latitude
    };
    oblique_ascendant(armc + 180.0, co_latitude, eps)
}

/// Compute cusps and angles for a house system.
///
/// Systems built on diurnal semi-arcs fail with `HouseCalc` where those arcs do
/// not exist (inside the polar circles); every other failure to produce an
/// ordered set of cusps is reported the same way.
pub fn compute_house_frame(
    system: HouseSystem,
    armc: f64,
    latitude: f64,
    eps: f64,
) -> ChartResult<HouseFrame> {
    if !latitude.is_finite() || latitude.abs() >= 90.0 {
        return Err(ChartError::MalformedInput(format!(
            "house latitude must be strictly between -90 and 90, got {latitude}"
        )));
    }
    if !armc.is_finite() || !eps.is_finite() {
        return Err(ChartError::house_calc(system.name(), "non-finite sidereal time or obliquity"));
    }

    let armc = normalize_degrees(armc);
    let asc = ascendant(armc, latitude, eps);
    let mc = midheaven(armc, eps);

    let cusps = match system {
        HouseSystem::Equal => equal_cusps(asc),
        HouseSystem::WholeSign => equal_cusps((asc / 30.0).floor() * 30.0),
        HouseSystem::Porphyry => porphyry_cusps(asc, mc),
        HouseSystem::Regiomontanus => regiomontanus_cusps(armc, latitude, eps, asc, mc),
        HouseSystem::Campanus => campanus_cusps(armc, latitude, eps, asc, mc),
        HouseSystem::Topocentric => topocentric_cusps(armc, latitude, eps, asc, mc),
        HouseSystem::Placidus => placidus_cusps(armc, latitude, eps, asc, mc)?,
        HouseSystem::Koch => koch_cusps(armc, latitude, eps, asc, mc)?,
        HouseSystem::Alcabitus => alcabitus_cusps(armc, latitude, eps, asc, mc)?,
        HouseSystem::Morinus => equator_cusps(armc, |ra| equator_to_longitude(ra, eps)),
        HouseSystem::Meridian => equator_cusps(armc, |ra| ra_to_longitude(ra, eps)),
    };

    if cusps.iter().any(|c| !c.is_finite()) {
        return Err(ChartError::house_calc(system.name(), "non-finite cusp"));
    }

    Ok(HouseFrame {
        cusps,
        ascendant: asc,
        midheaven: mc,
        vertex: vertex(armc, latitude, eps),
        east_point: east_point(armc, eps),
        armc,
    })
}

fn equal_cusps(first: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(first + 30.0 * i as f64);
    }
    cusps
}

/// Fill the opposite houses 4..9 from 10..3
fn with_opposites(asc: f64, mc: f64, c11: f64, c12: f64, c2: f64, c3: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    cusps[0] = asc;
    cusps[1] = c2;
    cusps[2] = c3;
    cusps[9] = mc;
    cusps[10] = c11;
    cusps[11] = c12;
    for i in 3..9 {
        cusps[i] = normalize_degrees(cusps[(i + 6) % 12] + 180.0);
    }
    cusps
}

fn porphyry_cusps(asc: f64, mc: f64) -> [f64; 12] {
    let upper = normalize_degrees(asc - mc);
    let lower = normalize_degrees(mc + 180.0 - asc);
    with_opposites(
        asc,
        mc,
        normalize_degrees(mc + upper / 3.0),
        normalize_degrees(mc + 2.0 * upper / 3.0),
        normalize_degrees(asc + lower / 3.0),
        normalize_degrees(asc + 2.0 * lower / 3.0),
    )
}

fn pole(latitude: f64, factor: f64) -> f64 {
    (latitude.to_radians().tan() * factor).atan().to_degrees()
}

fn regiomontanus_cusps(armc: f64, latitude: f64, eps: f64, asc: f64, mc: f64) -> [f64; 12] {
    let p30 = pole(latitude, 0.5);
    let p60 = pole(latitude, 60f64.to_radians().sin());
    with_opposites(
        asc,
        mc,
        oblique_ascendant(armc - 60.0, p30, eps),
        oblique_ascendant(armc - 30.0, p60, eps),
        oblique_ascendant(armc + 30.0, p60, eps),
        oblique_ascendant(armc + 60.0, p30, eps),
    )
}

fn campanus_cusps(armc: f64, latitude: f64, eps: f64, asc: f64, mc: f64) -> [f64; 12] {
    let phi = latitude.to_radians();
    let sqrt3 = 3f64.sqrt();
    let p30 = (phi.sin() * 0.5).asin().to_degrees();
    let p60 = (phi.sin() * 60f64.to_radians().sin()).asin().to_degrees();
    let h30 = (sqrt3 / phi.cos()).atan().to_degrees();
    let h60 = (1.0 / (sqrt3 * phi.cos())).atan().to_degrees();
    with_opposites(
        asc,
        mc,
        oblique_ascendant(armc - h30, p30, eps),
        oblique_ascendant(armc - h60, p60, eps),
        oblique_ascendant(armc + h60, p60, eps),
        oblique_ascendant(armc + h30, p30, eps),
    )
}

fn topocentric_cusps(armc: f64, latitude: f64, eps: f64, asc: f64, mc: f64) -> [f64; 12] {
    let p1 = pole(latitude, 1.0 / 3.0);
    let p2 = pole(latitude, 2.0 / 3.0);
    with_opposites(
        asc,
        mc,
        oblique_ascendant(armc - 60.0, p1, eps),
        oblique_ascendant(armc - 30.0, p2, eps),
        oblique_ascendant(armc + 30.0, p2, eps),
        oblique_ascendant(armc + 60.0, p1, eps),
    )
}

fn semi_arc_failure(system: HouseSystem, latitude: f64) -> ChartError {
    ChartError::house_calc(
        system.name(),
        format!("semi-arcs undefined at latitude {latitude:.4}"),
    )
}

/// Iterate the Placidus condition: the cusp's hour angle is a fixed fraction
/// of its own semi-arc.
fn placidus_cusp(armc: f64, latitude: f64, eps: f64, fraction: f64, above: bool) -> ChartResult<f64> {
    let mut ra = if above {
        armc + 90.0 * fraction
    } else {
        armc + 180.0 - 90.0 * fraction
    };
    let mut lon = ra_to_longitude(ra, eps);
    for _ in 0..PLACIDUS_MAX_ITER {
        let dec = declination_of(lon, eps);
        let ad = ascensional_difference(dec, latitude)
            .ok_or_else(|| semi_arc_failure(HouseSystem::Placidus, latitude))?;
        ra = if above {
            armc + (90.0 + ad) * fraction
        } else {
            armc + 180.0 - (90.0 - ad) * fraction
        };
        let next = ra_to_longitude(ra, eps);
        let delta = crate::math::angular_separation(next, lon);
        lon = next;
        if delta < PLACIDUS_CONVERGENCE_DEG {
            return Ok(lon);
        }
    }
    Err(ChartError::house_calc(
        HouseSystem::Placidus.name(),
        format!("cusp iteration did not converge at latitude {latitude:.4}"),
    ))
}

fn placidus_cusps(armc: f64, latitude: f64, eps: f64, asc: f64, mc: f64) -> ChartResult<[f64; 12]> {
    if ascensional_difference(eps, latitude).is_none() {
        return Err(semi_arc_failure(HouseSystem::Placidus, latitude));
    }
    Ok(with_opposites(
        asc,
        mc,
        placidus_cusp(armc, latitude, eps, 1.0 / 3.0, true)?,
        placidus_cusp(armc, latitude, eps, 2.0 / 3.0, true)?,
        placidus_cusp(armc, latitude, eps, 2.0 / 3.0, false)?,
        placidus_cusp(armc, latitude, eps, 1.0 / 3.0, false)?,
    ))
}

fn koch_cusps(armc: f64, latitude: f64, eps: f64, asc: f64, mc: f64) -> ChartResult<[f64; 12]> {
    if ascensional_difference(eps, latitude).is_none() {
        return Err(semi_arc_failure(HouseSystem::Koch, latitude));
    }
    let ad = ascensional_difference(declination_of(mc, eps), latitude)
        .ok_or_else(|| semi_arc_failure(HouseSystem::Koch, latitude))?;
    let third = (90.0 + ad) / 3.0;
    Ok(with_opposites(
        asc,
        mc,
        oblique_ascendant(armc - 2.0 * third, latitude, eps),
        oblique_ascendant(armc - third, latitude, eps),
        oblique_ascendant(armc + third, latitude, eps),
        oblique_ascendant(armc + 2.0 * third, latitude, eps),
    ))
}

fn alcabitus_cusps(armc: f64, latitude: f64, eps: f64, asc: f64, mc: f64) -> ChartResult<[f64; 12]> {
    if ascensional_difference(eps, latitude).is_none() {
        return Err(semi_arc_failure(HouseSystem::Alcabitus, latitude));
    }
    let ad = ascensional_difference(declination_of(asc, eps), latitude)
        .ok_or_else(|| semi_arc_failure(HouseSystem::Alcabitus, latitude))?;
    let day = 90.0 + ad;
    let night = 90.0 - ad;
    Ok(with_opposites(
        asc,
        mc,
        ra_to_longitude(armc + day / 3.0, eps),
        ra_to_longitude(armc + 2.0 * day / 3.0, eps),
        ra_to_longitude(armc + 180.0 - 2.0 * night / 3.0, eps),
        ra_to_longitude(armc + 180.0 - night / 3.0, eps),
    ))
}

/// Equal divisions of the equator starting 90° east of the meridian
fn equator_cusps(armc: f64, project: impl Fn(f64) -> f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = project(armc + 90.0 + 30.0 * i as f64);
    }
    cusps
}
