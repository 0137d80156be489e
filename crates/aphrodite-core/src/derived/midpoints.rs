//! Midpoints and their hits on chart points.

use crate::aspects::{Aspect, AspectCalculator, HasLongitude};
use crate::config::AspectDefinition;
use crate::math::shortest_arc_midpoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Midpoint {
    /// "A/B"
    pub name: String,
    pub point_a: String,
    pub point_b: String,
    pub longitude: f64,
}

impl Midpoint {
    pub fn between(a: &dyn HasLongitude, b: &dyn HasLongitude) -> Self {
        Self {
            name: format!("{}/{}", a.label(), b.label()),
            point_a: a.label().to_string(),
            point_b: b.label().to_string(),
            longitude: shortest_arc_midpoint(a.longitude(), b.longitude()),
        }
    }
}

/// Midpoints of every unordered pair, in input order
pub fn compute_midpoints(points: &[&dyn HasLongitude]) -> Vec<Midpoint> {
    let mut midpoints = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            midpoints.push(Midpoint::between(points[i], points[j]));
        }
    }
    midpoints
}

/// Conjunctions and oppositions of midpoints to chart points within `orb`.
///
/// A midpoint never hits either of its own two points.
pub fn midpoint_hits(midpoints: &[Midpoint], points: &[&dyn HasLongitude], orb: f64) -> Vec<Aspect> {
    let calculator = AspectCalculator::new(vec![
        AspectDefinition::new("Conjunction", 0.0, orb, None, true),
        AspectDefinition::new("Opposition", 180.0, orb, None, true),
    ]);
    let mut hits = Vec::new();
    for midpoint in midpoints {
        for point in points {
            if point.label() == midpoint.point_a || point.label() == midpoint.point_b {
                continue;
            }
            hits.extend(calculator.aspects_between(midpoint, *point));
        }
    }
    crate::aspects::sort_aspects(&mut hits);
    hits
}

impl HasLongitude for Midpoint {
    fn label(&self) -> &str {
        &self.name
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}
