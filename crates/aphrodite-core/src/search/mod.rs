//! Time search: roots of scalar functions of time, stations and heliacal events.

pub mod concurrent;
pub mod heliacal;
pub mod root;
pub mod stations;

pub use concurrent::search_stations_concurrently;
pub use heliacal::{HeliacalEvent, HeliacalKind, HeliacalSearch, HeliacalTarget};
pub use root::{find_crossings, find_first_crossing, Crossing, SearchOptions, SearchWindow};
pub use stations::{find_stations, next_station, Station, StationKind};
