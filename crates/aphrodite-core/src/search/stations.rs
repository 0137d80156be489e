//! Planetary stations: instants where the speed in longitude changes sign.

use crate::ephemeris::time::julian_day_to_datetime;
use crate::ephemeris::types::Body;
use crate::ephemeris::EphemerisAdapter;
use crate::error::{ChartError, ChartResult};
use crate::search::root::{find_crossings, not_found, SearchOptions, SearchWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    /// Direct motion turning retrograde
    StationRetrograde,
    /// Retrograde motion turning direct
    StationDirect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub body: Body,
    pub kind: StationKind,
    pub julian_day: f64,
    pub instant: DateTime<Utc>,
    pub longitude: f64,
}

fn check_body(body: Body) -> ChartResult<()> {
    if body.has_stations() {
        Ok(())
    } else {
        Err(ChartError::MalformedInput(format!("{} has no stations", body)))
    }
}

/// All stations of `body` inside the window
pub fn find_stations(
    adapter: &EphemerisAdapter,
    body: Body,
    window: &SearchWindow,
    options: &SearchOptions,
) -> ChartResult<Vec<Station>> {
    check_body(body)?;
    let options = options.with_event("station");
    let crossings = find_crossings(|jd| adapter.speed(body, jd), window, &options)?;
    log::debug!("{} stations of {} in {:.1} days", crossings.len(), body, window.end_jd - window.start_jd);

    crossings
        .into_iter()
        .map(|c| {
            Ok(Station {
                body,
                kind: if c.rising {
                    StationKind::StationDirect
                } else {
                    StationKind::StationRetrograde
                },
                julian_day: c.jd,
                instant: julian_day_to_datetime(c.jd)?,
                longitude: adapter.longitude(body, c.jd)?,
            })
        })
        .collect()
}

/// First station of `body` inside the window
pub fn next_station(
    adapter: &EphemerisAdapter,
    body: Body,
    window: &SearchWindow,
    options: &SearchOptions,
) -> ChartResult<Station> {
    let options = options.with_event("station");
    find_stations(adapter, body, window, &options)?
        .into_iter()
        .next()
        .ok_or_else(|| not_found(window, &options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_luminaries_and_nodes_rejected() {
        let adapter = EphemerisAdapter::analytic();
        let window = SearchWindow::new(2_451_545.0, 2_451_645.0, 1.0).unwrap();
        for body in [Body::Sun, Body::Moon, Body::TrueNode, Body::MeanNode, Body::SouthNode] {
            let err = find_stations(&adapter, body, &window, &SearchOptions::default()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedInput);
        }
    }
}
