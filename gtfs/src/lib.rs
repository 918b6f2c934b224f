//! Reads the handful of GTFS tables needed to draw a route on a map.

#[macro_use]
extern crate log;

mod error;
mod feed;
mod ids;
mod routes;
mod shapes;
mod stop_times;
mod stops;
mod table;
mod trips;

pub use error::FeedError;
pub use feed::{load_table, load_tables, Feed, ROUTES, SHAPES, STOPS, STOP_TIMES, TRIPS};
pub use ids::{RouteID, ShapeID, StopID, TripID};
pub use routes::{list_routes, Route};
pub use shapes::ShapePoint;
pub use stop_times::StopTime;
pub use stops::Stop;
pub use table::{parse, Record, Table};
pub use trips::Trip;

/// Parses a latitude or longitude. Anything that isn't a number, including a missing value, becomes
/// NaN instead of an error; deciding what to do with those points is up to whoever draws them.
pub fn parse_coordinate(value: Option<&str>) -> f64 {
    value
        .and_then(|x| x.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
