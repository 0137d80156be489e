pub mod adapter;
pub mod analytic;
pub mod provider;
#[cfg(feature = "swiss-ephemeris")]
pub mod swiss;
pub mod time;
pub mod types;

pub use adapter::EphemerisAdapter;
pub use analytic::AnalyticEphemeris;
pub use provider::EphemerisProvider;
#[cfg(feature = "swiss-ephemeris")]
pub use swiss::SwissEphemeris;
pub use time::{datetime_to_julian_day, julian_day_to_datetime};
pub use types::{
    Ayanamsa, Body, EclipticPosition, GeoLocation, HouseFrame, Observer, ZodiacType, ALL_BODIES,
};
