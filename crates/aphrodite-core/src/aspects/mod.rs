pub mod calculator;
pub mod types;

pub use calculator::{sort_aspects, AspectCalculator};
pub use types::{Aspect, HasLongitude, LongitudePoint};
