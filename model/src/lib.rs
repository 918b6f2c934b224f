//! Turns the raw GTFS tables into geometry for one route.

#[macro_use]
extern crate log;

mod export;
mod geometry;
mod resolve;

pub use self::export::{path_feature, stop_feature};
pub use self::geometry::{bounds, stop_position, to_bbox};
pub use self::resolve::{resolve, resolve_feed, Path, RouteGeometry};
