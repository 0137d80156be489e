//! Chart assembly: positions, houses, dignities, aspects and derived points
//! composed into one immutable [`Chart`].

pub mod assembler;
pub mod settings;
pub mod types;

pub use assembler::{is_day_chart, ChartAssembler};
pub use settings::{default_bodies, ChartRequest, ChartSettings, DerivedSelection, ObserverMode};
pub use types::{build_angles, Angle, AngleKind, Annotation, CelestialPoint, Chart, ChartKind, ChartMetadata};
