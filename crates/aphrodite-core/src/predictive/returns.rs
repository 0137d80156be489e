//! Solar and lunar returns.

use crate::chart::{Chart, ChartAssembler, ChartKind, ChartRequest};
use crate::ephemeris::time::julian_day_to_datetime;
use crate::ephemeris::types::{Body, GeoLocation, Observer, ZodiacType};
use crate::ephemeris::EphemerisAdapter;
use crate::error::{ChartError, ChartResult};
use crate::math::{normalize_degrees, signed_delta};
use crate::predictive::{chart_location, settings_like};
use crate::search::{find_crossings, SearchOptions, SearchWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest Sun and Moon cycles are a little over a year and a month
const SOLAR_SPAN_DAYS: f64 = 370.0;
const LUNAR_SPAN_DAYS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Solar,
    Lunar,
}

impl ReturnKind {
    pub fn body(self) -> Body {
        match self {
            ReturnKind::Solar => Body::Sun,
            ReturnKind::Lunar => Body::Moon,
        }
    }

    fn chart_kind(self) -> ChartKind {
        match self {
            ReturnKind::Solar => ChartKind::SolarReturn,
            ReturnKind::Lunar => ChartKind::LunarReturn,
        }
    }
}

/// First instant after `after_jd` when the body's longitude in `zodiac`,
/// as seen by `observer`, equals `target` again.
#[allow(clippy::too_many_arguments)]
pub fn find_return(
    adapter: &EphemerisAdapter,
    kind: ReturnKind,
    target: f64,
    zodiac: ZodiacType,
    observer: &Observer,
    after_jd: f64,
    step_days: f64,
    options: &SearchOptions,
) -> ChartResult<f64> {
    let (span, event) = match kind {
        ReturnKind::Solar => (SOLAR_SPAN_DAYS, "solar return"),
        ReturnKind::Lunar => (LUNAR_SPAN_DAYS, "lunar return"),
    };
    let body = kind.body();
    let target = normalize_degrees(target);
    let window = SearchWindow::starting_at(after_jd, span, step_days)?;
    let options = options.with_jump_limit(180.0).with_event(event);

    let delta = |jd: f64| -> ChartResult<f64> {
        let offset = adapter.zodiac_offset(jd, zodiac)?;
        Ok(signed_delta(adapter.position(body, jd, observer)?.longitude - offset, target))
    };
    find_crossings(delta, &window, &options)?
        .into_iter()
        .find(|c| c.rising && c.jd > after_jd)
        .map(|c| c.jd)
        .ok_or_else(|| ChartError::EventNotFound {
            event: event.to_string(),
            detail: format!("{} never reaches {:.6} within {} days", body, target, span),
        })
}

fn return_chart(
    assembler: &ChartAssembler,
    natal: &Chart,
    kind: ReturnKind,
    after: DateTime<Utc>,
    location: Option<GeoLocation>,
) -> ChartResult<Chart> {
    let body = kind.body();
    let target = natal
        .point(body)
        .map(|p| p.longitude)
        .ok_or_else(|| ChartError::MalformedInput(format!("natal chart has no {}", body)))?;
    let search = &assembler.config().search;
    let step = match kind {
        ReturnKind::Solar => search.solar_step_days,
        ReturnKind::Lunar => search.lunar_step_days,
    };
    let location = match location {
        Some(l) => l,
        None => chart_location(natal)?,
    };
    let meta = natal.metadata();
    let jd = find_return(
        assembler.adapter(),
        kind,
        target,
        meta.zodiac,
        &meta.observer.observer_at(location),
        assembler.adapter().julian_day(after),
        step,
        &SearchOptions::from_settings(search),
    )?;
    log::debug!("{:?} return at JD {:.7}", kind, jd);
    let request = ChartRequest::new(julian_day_to_datetime(jd)?, location).with_settings(settings_like(natal));
    assembler.assemble_as(&request, kind.chart_kind())
}

/// Chart for the first Sun return after `after`, at the natal place or `location`
pub fn solar_return(
    assembler: &ChartAssembler,
    natal: &Chart,
    after: DateTime<Utc>,
    location: Option<GeoLocation>,
) -> ChartResult<Chart> {
    return_chart(assembler, natal, ReturnKind::Solar, after, location)
}

/// Chart for the first Moon return after `after`, at the natal place or `location`
pub fn lunar_return(
    assembler: &ChartAssembler,
    natal: &Chart,
    after: DateTime<Utc>,
    location: Option<GeoLocation>,
) -> ChartResult<Chart> {
    return_chart(assembler, natal, ReturnKind::Lunar, after, location)
}
