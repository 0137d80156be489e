//! House systems: cusp computation and placement of longitudes into houses.

pub mod calc;
pub mod cusps;
pub mod system;

pub use calc::{ascendant, compute_house_frame, east_point, midheaven, vertex};
pub use cusps::{HouseCusps, HouseSet};
pub use system::HouseSystem;
