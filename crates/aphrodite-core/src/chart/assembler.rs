use crate::aspects::{Aspect, AspectCalculator, HasLongitude};
use crate::chart::settings::{ChartRequest, ChartSettings, DerivedSelection};
use crate::chart::types::{
    build_angles, longitude_pool, Angle, AngleKind, Annotation, CelestialPoint, Chart, ChartKind, ChartMetadata,
};
use crate::config::EngineConfig;
use crate::derived::{
    antiscia_contacts, compute_antiscia, compute_midpoints, find_parans, midpoint_hits, resolve_parts, star_contacts,
    star_positions, DerivedPoints,
};
use crate::ephemeris::types::{Body, EclipticPosition, GeoLocation};
use crate::ephemeris::EphemerisAdapter;
use crate::error::ChartResult;
use crate::houses::HouseCusps;
use crate::math::normalize_degrees;
use crate::western::DignityEvaluator;
use std::sync::Arc;

/// Builds [`Chart`]s from requests using one ephemeris and one engine config
#[derive(Debug, Clone)]
pub struct ChartAssembler {
    adapter: EphemerisAdapter,
    config: Arc<EngineConfig>,
}

impl ChartAssembler {
    pub fn new(adapter: EphemerisAdapter, config: Arc<EngineConfig>) -> Self {
        Self { adapter, config }
    }

    pub fn adapter(&self) -> &EphemerisAdapter {
        &self.adapter
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assemble a natal chart.
    ///
    /// Fails when the houses or either luminary cannot be computed; any other
    /// body or derived family that fails is left out and recorded as an
    /// annotation.
    pub fn assemble(&self, request: &ChartRequest) -> ChartResult<Chart> {
        self.assemble_as(request, ChartKind::Natal)
    }

    pub(crate) fn assemble_as(&self, request: &ChartRequest, kind: ChartKind) -> ChartResult<Chart> {
        request.validate()?;
        let settings = &request.settings;
        let location = request.location;
        let jd = self.adapter.julian_day(request.instant);
        log::debug!("assembling {:?} chart at JD {:.6} ({}, {})", kind, jd, location.lat, location.lon);

        let houses = self.adapter.houses(jd, &location, settings.house_system)?;
        let offset = self.adapter.zodiac_offset(jd, settings.zodiac)?;
        let mut annotations = Vec::new();

        let observer = settings.observer.observer_at(location);
        let mut points = Vec::new();
        for body in settings.effective_bodies() {
            match self.adapter.position(body, jd, &observer) {
                Ok(pos) => points.push(CelestialPoint::new(
                    body,
                    EclipticPosition {
                        longitude: normalize_degrees(pos.longitude - offset),
                        ..pos
                    },
                )),
                Err(e) if body.is_luminary() => return Err(e),
                Err(e) => {
                    log::warn!("omitting {}: {}", body, e);
                    annotations.push(Annotation::from_error(body.name(), &e));
                }
            }
        }
        log::debug!("placed {} bodies with {}", points.len(), self.adapter.provider_name());

        let cusps = if offset == 0.0 {
            houses.cusps
        } else {
            HouseCusps::new((*houses.cusps.as_array()).map(|c| c - offset))?
        };
        let angles = build_angles(
            houses.ascendant - offset,
            houses.midheaven - offset,
            Some(houses.vertex - offset),
            Some(houses.east_point - offset),
        );

        place_in_houses(&mut points, &cusps, &mut annotations);

        let ascendant = normalize_degrees(houses.ascendant - offset);
        let is_day = points
            .iter()
            .find(|p| p.body == Body::Sun)
            .map(|sun| is_day_chart(sun, ascendant))
            .unwrap_or(true);

        let evaluator = DignityEvaluator::from_config(&self.config);
        for point in points.iter_mut() {
            point.dignity = evaluator.dignities_at(point.body, point.longitude, is_day);
        }

        let calculator = self.natal_calculator(settings);
        let aspects = {
            let chart_points = aspect_set(&points, &angles);
            calculator.find_aspects(&chart_points)
        };
        log::debug!("found {} aspects", aspects.len());

        let derived = self.derive(
            &DerivedContext {
                points: &points,
                angles: &angles,
                cusps: Some(&cusps),
                jd,
                offset,
                location,
                is_day,
            },
            settings.derived,
            &mut annotations,
        );

        let metadata = ChartMetadata {
            kind,
            instant: Some(request.instant),
            julian_day: Some(jd),
            location: Some(location),
            house_system: Some(settings.house_system),
            zodiac: settings.zodiac,
            observer: settings.observer,
            aspect_angles: settings.aspect_angles.clone(),
            day_chart: Some(is_day),
            annotations,
        };
        Ok(Chart::from_parts(metadata, points, angles, Some(cusps), aspects, derived))
    }

    /// Calculator for aspects within one chart, honoring a restricted aspect list
    pub fn natal_calculator(&self, settings: &ChartSettings) -> AspectCalculator {
        let calculator = AspectCalculator::from_config(&self.config);
        match &settings.aspect_angles {
            Some(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                calculator.only(&names)
            }
            None => calculator,
        }
    }

    /// Aspects among a set of points and the Ascendant/Midheaven of `angles`
    pub(crate) fn aspects_for(&self, points: &[CelestialPoint], angles: &[Angle], settings: &ChartSettings) -> Vec<Aspect> {
        self.natal_calculator(settings).find_aspects(&aspect_set(points, angles))
    }

    fn derive(&self, ctx: &DerivedContext<'_>, selection: DerivedSelection, annotations: &mut Vec<Annotation>) -> DerivedPoints {
        let config = &self.config;
        let mut derived = DerivedPoints::default();
        let chart_points = aspect_set(ctx.points, ctx.angles);

        if selection.arabic_parts {
            let pool = longitude_pool(ctx.points, ctx.angles, ctx.cusps);
            match resolve_parts(&pool, &config.arabic_parts, ctx.is_day) {
                Ok(parts) => derived.arabic_parts = parts,
                Err(e) => {
                    log::warn!("arabic parts unresolved: {}", e);
                    annotations.push(Annotation::from_error("arabic_parts", &e));
                }
            }
        }

        if selection.midpoints {
            derived.midpoints = compute_midpoints(&chart_points);
            derived.midpoint_hits = midpoint_hits(&derived.midpoints, &chart_points, config.orbs.midpoint);
        }

        if selection.antiscia {
            let sources: Vec<(String, f64, f64)> = ctx
                .points
                .iter()
                .map(|p| (p.body.name().to_string(), p.longitude, p.latitude))
                .collect();
            derived.antiscia = compute_antiscia(&sources);
            derived.antiscia_contacts = antiscia_contacts(&derived.antiscia, &chart_points, config.orbs.antiscia);
        }

        if selection.fixed_stars || selection.parans {
            let mut stars = star_positions(&config.fixed_stars, ctx.jd, config.precession_arcsec_per_year);
            for star in stars.iter_mut() {
                star.longitude = normalize_degrees(star.longitude - ctx.offset);
            }
            if selection.fixed_stars {
                let mut targets: Vec<&dyn HasLongitude> = ctx.points.iter().map(|p| p as &dyn HasLongitude).collect();
                targets.extend(ctx.angles.iter().map(|a| a as &dyn HasLongitude));
                derived.star_contacts = star_contacts(&stars, &targets, config.orbs.fixed_star);
            }
            if selection.parans {
                // rise and set times need tropical coordinates
                let tropical_stars: Vec<_> = stars
                    .iter()
                    .cloned()
                    .map(|mut s| {
                        s.longitude = normalize_degrees(s.longitude + ctx.offset);
                        s
                    })
                    .collect();
                let bodies: Vec<(String, f64, f64)> = ctx
                    .points
                    .iter()
                    .map(|p| (p.body.name().to_string(), normalize_degrees(p.longitude + ctx.offset), p.latitude))
                    .collect();
                match find_parans(&tropical_stars, &bodies, ctx.jd, &ctx.location, config.orbs.paran) {
                    Ok(parans) => derived.parans = parans,
                    Err(e) => {
                        log::warn!("parans skipped: {}", e);
                        annotations.push(Annotation::from_error("parans", &e));
                    }
                }
            }
            if selection.fixed_stars {
                derived.fixed_stars = stars;
            }
        }

        derived
    }
}

struct DerivedContext<'a> {
    points: &'a [CelestialPoint],
    angles: &'a [Angle],
    cusps: Option<&'a HouseCusps>,
    jd: f64,
    offset: f64,
    location: GeoLocation,
    is_day: bool,
}

/// Points plus Ascendant and Midheaven
pub(crate) fn aspect_set<'a>(points: &'a [CelestialPoint], angles: &'a [Angle]) -> Vec<&'a dyn HasLongitude> {
    let mut set: Vec<&dyn HasLongitude> = points.iter().map(|p| p as &dyn HasLongitude).collect();
    set.extend(
        angles
            .iter()
            .filter(|a| matches!(a.kind, AngleKind::Ascendant | AngleKind::Midheaven))
            .map(|a| a as &dyn HasLongitude),
    );
    set
}

/// Assign houses; a longitude no house claims is annotated and left unplaced
pub(crate) fn place_in_houses(points: &mut [CelestialPoint], cusps: &HouseCusps, annotations: &mut Vec<Annotation>) {
    for point in points.iter_mut() {
        match cusps.house_of(point.longitude) {
            Ok(house) => point.house = Some(house),
            Err(e) => {
                log::warn!("{} not placed in a house: {}", point.body, e);
                annotations.push(Annotation::from_error(point.body.name(), &e));
                point.house = None;
            }
        }
    }
}

/// Day chart when the Sun is in houses 7 to 12 (above the horizon).
///
/// Without a house the Sun is judged against the Ascendant directly.
pub fn is_day_chart(sun: &CelestialPoint, ascendant: f64) -> bool {
    match sun.house {
        Some(house) => house >= 7,
        None => normalize_degrees(sun.longitude - ascendant) >= 180.0,
    }
}
