//! Points derived arithmetically from other chart points.

pub mod antiscia;
pub mod arabic_parts;
pub mod fixed_stars;
pub mod midpoints;

pub use antiscia::{antiscia_contacts, compute_antiscia, AntisciaPoint, MirrorKind};
pub use arabic_parts::{part_longitude, resolve_parts, ArabicPart};
pub use fixed_stars::{find_parans, precessed_longitude, star_contacts, star_positions, AngleEvent, Paran, StarPosition};
pub use midpoints::{compute_midpoints, midpoint_hits, Midpoint};

use crate::aspects::{Aspect, HasLongitude};
use serde::{Deserialize, Serialize};

impl HasLongitude for ArabicPart {
    fn label(&self) -> &str {
        &self.name
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Any derived point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DerivedPoint {
    ArabicPart(ArabicPart),
    Midpoint(Midpoint),
    Antiscia(AntisciaPoint),
}

impl HasLongitude for DerivedPoint {
    fn label(&self) -> &str {
        match self {
            DerivedPoint::ArabicPart(p) => p.label(),
            DerivedPoint::Midpoint(p) => p.label(),
            DerivedPoint::Antiscia(p) => p.label(),
        }
    }

    fn longitude(&self) -> f64 {
        match self {
            DerivedPoint::ArabicPart(p) => p.longitude,
            DerivedPoint::Midpoint(p) => p.longitude,
            DerivedPoint::Antiscia(p) => p.longitude,
        }
    }
}

/// Derived families attached to a chart; empty when not requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoints {
    pub arabic_parts: Vec<ArabicPart>,
    pub midpoints: Vec<Midpoint>,
    pub midpoint_hits: Vec<Aspect>,
    pub antiscia: Vec<AntisciaPoint>,
    pub antiscia_contacts: Vec<Aspect>,
    pub fixed_stars: Vec<StarPosition>,
    pub star_contacts: Vec<Aspect>,
    pub parans: Vec<Paran>,
}

impl DerivedPoints {
    /// Every derived point as a tagged value
    pub fn points(&self) -> Vec<DerivedPoint> {
        self.arabic_parts
            .iter()
            .cloned()
            .map(DerivedPoint::ArabicPart)
            .chain(self.midpoints.iter().cloned().map(DerivedPoint::Midpoint))
            .chain(self.antiscia.iter().cloned().map(DerivedPoint::Antiscia))
            .collect()
    }

    pub fn arabic_part(&self, name: &str) -> Option<&ArabicPart> {
        self.arabic_parts.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.arabic_parts.is_empty()
            && self.midpoints.is_empty()
            && self.antiscia.is_empty()
            && self.fixed_stars.is_empty()
    }
}
