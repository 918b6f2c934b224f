use crate::{Record, RouteID, ShapeID, TripID};

/// The part of trips.txt needed to find a route's shapes and stops
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub trip_id: TripID,
    pub route_id: RouteID,
    /// Optional in GTFS. Trips without one just don't contribute a path.
    pub shape_id: Option<ShapeID>,
}

impl Trip {
    /// `None` if the row is missing its trip or route ID
    pub fn from_record(rec: &Record) -> Option<Self> {
        Some(Self {
            trip_id: TripID::new(rec.get("trip_id")?),
            route_id: RouteID::new(rec.get("route_id")?),
            shape_id: rec
                .get("shape_id")
                .filter(|x| !x.is_empty())
                .map(ShapeID::new),
        })
    }
}
