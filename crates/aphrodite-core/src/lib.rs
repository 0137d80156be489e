//! Astrological chart computation engine.
//!
//! Positions come from an [`ephemeris::EphemerisProvider`]; everything else
//! (houses, aspects, dignities, derived points, predictive techniques and time
//! searches) is computed here and returned as plain serializable data.

pub mod aspects;
pub mod chart;
pub mod config;
pub mod derived;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod math;
pub mod predictive;
pub mod search;
pub mod western;
pub mod zodiac;

pub use chart::{Chart, ChartAssembler, ChartRequest, ChartSettings};
pub use config::EngineConfig;
pub use ephemeris::{AnalyticEphemeris, Body, EphemerisAdapter, EphemerisProvider, GeoLocation};
pub use error::{ChartError, ChartResult, ErrorKind};
pub use houses::HouseSystem;
