use crate::aspects::types::{Aspect, HasLongitude};
use crate::config::{AspectDefinition, EngineConfig};
use crate::math::angular_separation;
use std::cmp::Ordering;

const DEFAULT_APPLYING_STEP_DAYS: f64 = 0.1;
const DEFAULT_EXACT_THRESHOLD: f64 = 0.1;

/// Finds aspects between points using a table of aspect definitions
#[derive(Debug, Clone)]
pub struct AspectCalculator {
    definitions: Vec<AspectDefinition>,
    orb_override: Option<f64>,
    applying_step_days: f64,
    exact_threshold: f64,
}

impl AspectCalculator {
    /// Create a calculator from explicit definitions
    pub fn new(definitions: Vec<AspectDefinition>) -> Self {
        Self {
            definitions,
            orb_override: None,
            applying_step_days: DEFAULT_APPLYING_STEP_DAYS,
            exact_threshold: DEFAULT_EXACT_THRESHOLD,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            definitions: config.aspects.clone(),
            orb_override: None,
            applying_step_days: config.applying_step_days,
            exact_threshold: config.exact_threshold,
        }
    }

    /// Use a single orb for every definition (transits, progressions, midpoint hits)
    pub fn with_orb(mut self, orb: f64) -> Self {
        self.orb_override = Some(orb);
        self
    }

    /// Keep only the named definitions
    pub fn only(mut self, names: &[&str]) -> Self {
        self.definitions
            .retain(|d| names.iter().any(|n| n.eq_ignore_ascii_case(&d.name)));
        self
    }

    pub fn definitions(&self) -> &[AspectDefinition] {
        &self.definitions
    }

    /// All aspects among a set of points, each unordered pair once.
    ///
    /// Point names in the output are ordered so that `point_a <= point_b`,
    /// making the result independent of input order.
    pub fn find_aspects(&self, points: &[&dyn HasLongitude]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let (a, b) = if points[i].label() <= points[j].label() {
                    (points[i], points[j])
                } else {
                    (points[j], points[i])
                };
                aspects.extend(self.aspects_between(a, b));
            }
        }
        sort_aspects(&mut aspects);
        aspects
    }

    /// Aspects from every point of `from` to every point of `to`
    pub fn find_cross_aspects(&self, from: &[&dyn HasLongitude], to: &[&dyn HasLongitude]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for a in from {
            for b in to {
                aspects.extend(self.aspects_between(*a, *b));
            }
        }
        sort_aspects(&mut aspects);
        aspects
    }

    /// Every definition matched by a single pair
    pub fn aspects_between(&self, a: &dyn HasLongitude, b: &dyn HasLongitude) -> Vec<Aspect> {
        let separation = angular_separation(a.longitude(), b.longitude());
        let luminary = a.is_luminary() || b.is_luminary();

        self.definitions
            .iter()
            .filter_map(|def| {
                let orb = (separation - def.angle).abs();
                let allowed = self.orb_override.unwrap_or_else(|| def.orb_for(luminary));
                if orb > allowed {
                    return None;
                }
                Some(Aspect {
                    point_a: a.label().to_string(),
                    point_b: b.label().to_string(),
                    aspect_name: def.name.clone(),
                    exact_angle: def.angle,
                    separation,
                    orb,
                    applying: self.is_applying(a, b, def.angle, orb),
                    exact: orb < self.exact_threshold,
                })
            })
            .collect()
    }

    /// Project both points forward and compare the deviation from the exact angle
    fn is_applying(&self, a: &dyn HasLongitude, b: &dyn HasLongitude, angle: f64, orb: f64) -> Option<bool> {
        let (speed_a, speed_b) = (a.speed()?, b.speed()?);
        if speed_a == speed_b {
            return None;
        }
        let dt = self.applying_step_days;
        let future = angular_separation(a.longitude() + speed_a * dt, b.longitude() + speed_b * dt);
        Some((future - angle).abs() < orb)
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Tightest first, then by names
pub fn sort_aspects(aspects: &mut [Aspect]) {
    aspects.sort_by(|x, y| {
        x.orb
            .partial_cmp(&y.orb)
            .unwrap_or(Ordering::Equal)
            .then_with(|| x.point_a.cmp(&y.point_a))
            .then_with(|| x.point_b.cmp(&y.point_b))
            .then_with(|| x.aspect_name.cmp(&y.aspect_name))
    });
}
