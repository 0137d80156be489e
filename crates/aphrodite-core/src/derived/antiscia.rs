//! Antiscia (solstitial mirror points) and contra-antiscia (equinoctial mirror points).

use crate::aspects::{Aspect, AspectCalculator, HasLongitude};
use crate::config::AspectDefinition;
use crate::math::{antiscion, contra_antiscion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorKind {
    Antiscion,
    ContraAntiscion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntisciaPoint {
    /// "Antiscion Venus", "Contra-antiscion Venus"
    pub name: String,
    pub source: String,
    pub kind: MirrorKind,
    pub longitude: f64,
    pub latitude: f64,
}

impl AntisciaPoint {
    pub fn antiscion_of(source: &str, longitude: f64, latitude: f64) -> Self {
        Self {
            name: format!("Antiscion {source}"),
            source: source.to_string(),
            kind: MirrorKind::Antiscion,
            longitude: antiscion(longitude),
            latitude,
        }
    }

    pub fn contra_antiscion_of(source: &str, longitude: f64, latitude: f64) -> Self {
        Self {
            name: format!("Contra-antiscion {source}"),
            source: source.to_string(),
            kind: MirrorKind::ContraAntiscion,
            longitude: contra_antiscion(longitude),
            latitude: -latitude,
        }
    }
}

impl HasLongitude for AntisciaPoint {
    fn label(&self) -> &str {
        &self.name
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Both mirror points for each `(label, longitude, latitude)` source
pub fn compute_antiscia(sources: &[(String, f64, f64)]) -> Vec<AntisciaPoint> {
    sources
        .iter()
        .flat_map(|(label, lon, lat)| {
            [
                AntisciaPoint::antiscion_of(label, *lon, *lat),
                AntisciaPoint::contra_antiscion_of(label, *lon, *lat),
            ]
        })
        .collect()
}

/// Conjunctions of mirror points with other chart points within `orb`
pub fn antiscia_contacts(mirrors: &[AntisciaPoint], points: &[&dyn HasLongitude], orb: f64) -> Vec<Aspect> {
    let calculator = AspectCalculator::new(vec![AspectDefinition::new("Conjunction", 0.0, orb, None, true)]);
    let mut contacts = Vec::new();
    for mirror in mirrors {
        for point in points.iter().filter(|p| p.label() != mirror.source) {
            contacts.extend(calculator.aspects_between(mirror, *point));
        }
    }
    crate::aspects::sort_aspects(&mut contacts);
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::LongitudePoint;

    #[test]
    fn test_mirror_points() {
        let a = AntisciaPoint::antiscion_of("Venus", 10.0, 1.5);
        assert!((a.longitude - 170.0).abs() < 1e-9);
        assert_eq!(a.latitude, 1.5);
        let c = AntisciaPoint::contra_antiscion_of("Venus", 10.0, 1.5);
        assert!((c.longitude - 350.0).abs() < 1e-9);
        assert_eq!(c.latitude, -1.5);
    }

    #[test]
    fn test_contacts() {
        let mirrors = compute_antiscia(&[("Venus".to_string(), 10.0, 0.0)]);
        assert_eq!(mirrors.len(), 2);
        let mars = LongitudePoint::new("Mars", 170.6, None);
        let venus = LongitudePoint::new("Venus", 10.0, None);
        let contacts = antiscia_contacts(&mirrors, &[&mars, &venus], 1.0);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].point_a, "Antiscion Venus");
        assert_eq!(contacts[0].point_b, "Mars");
    }
}
