//! Independent per-body searches run side by side on the blocking pool.

use crate::ephemeris::types::Body;
use crate::ephemeris::EphemerisAdapter;
use crate::error::{ChartError, ChartResult};
use crate::search::root::{SearchOptions, SearchWindow};
use crate::search::stations::{find_stations, Station};
use tokio::task::JoinSet;

/// Stations of several bodies over the same window.
///
/// Results come back in the order of `bodies`; the first failing body fails
/// the whole call.
pub async fn search_stations_concurrently(
    adapter: EphemerisAdapter,
    bodies: Vec<Body>,
    window: SearchWindow,
    options: SearchOptions,
) -> ChartResult<Vec<(Body, Vec<Station>)>> {
    window.validate()?;
    let mut set = JoinSet::new();
    for (index, body) in bodies.iter().copied().enumerate() {
        let adapter = adapter.clone();
        set.spawn_blocking(move || (index, body, find_stations(&adapter, body, &window, &options)));
    }

    let mut results: Vec<Option<(Body, Vec<Station>)>> = vec![None; bodies.len()];
    while let Some(joined) = set.join_next().await {
        let (index, body, stations) =
            joined.map_err(|e| ChartError::MalformedInput(format!("station search task failed: {e}")))?;
        match stations {
            Ok(stations) => results[index] = Some((body, stations)),
            Err(e) => {
                log::warn!("station search for {} failed: {}", body, e);
                set.abort_all();
                return Err(e);
            }
        }
    }
    Ok(results.into_iter().flatten().collect())
}
