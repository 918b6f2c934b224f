use crate::{Record, StopID, TripID};

/// Links a trip to one stop it serves. Times and sequence aren't needed to draw a route.
#[derive(Clone, Debug, PartialEq)]
pub struct StopTime {
    pub trip_id: TripID,
    pub stop_id: StopID,
}

impl StopTime {
    pub fn from_record(rec: &Record) -> Option<Self> {
        Some(Self {
            trip_id: TripID::new(rec.get("trip_id")?),
            stop_id: StopID::new(rec.get("stop_id")?),
        })
    }
}
