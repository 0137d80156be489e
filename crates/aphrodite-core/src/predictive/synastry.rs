use crate::aspects::{Aspect, AspectCalculator, HasLongitude};
use crate::chart::Chart;
use crate::config::EngineConfig;
use crate::predictive::{house_overlay, HouseOverlay};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynastryReport {
    /// `point_a` always belongs to the first chart, `point_b` to the second
    pub aspects: Vec<Aspect>,
    /// First chart's points in the second chart's houses
    pub a_in_b_houses: Vec<HouseOverlay>,
    /// Second chart's points in the first chart's houses
    pub b_in_a_houses: Vec<HouseOverlay>,
}

/// Inter-chart aspects from A's points to B's points and angles, plus both
/// house overlays.
pub fn synastry(config: &EngineConfig, a: &Chart, b: &Chart) -> SynastryReport {
    let calculator = AspectCalculator::from_config(config);
    let a_points: Vec<&dyn HasLongitude> = a.points().iter().map(|p| p as &dyn HasLongitude).collect();
    let b_points: Vec<&dyn HasLongitude> = b.points().iter().map(|p| p as &dyn HasLongitude).collect();
    let aspects = calculator.find_cross_aspects(&a_points, &b.aspect_points());

    SynastryReport {
        aspects,
        a_in_b_houses: b.cusps().map(|c| house_overlay(&a_points, c)).unwrap_or_default(),
        b_in_a_houses: a.cusps().map(|c| house_overlay(&b_points, c)).unwrap_or_default(),
    }
}
