use crate::{parse_coordinate, Record, StopID};

#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub stop_id: StopID,
    pub name: Option<String>,
    pub description: Option<String>,
    /// NaN if stops.txt doesn't have a number here
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    pub fn from_record(rec: &Record) -> Option<Self> {
        Some(Self {
            stop_id: StopID::new(rec.get("stop_id")?),
            name: rec.get("stop_name").map(|x| x.to_string()),
            description: rec.get("stop_desc").map(|x| x.to_string()),
            lat: parse_coordinate(rec.get("stop_lat")),
            lon: parse_coordinate(rec.get("stop_lon")),
        })
    }

    pub fn has_position(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Text shown when someone clicks on the stop
    pub fn describe(&self) -> String {
        format!(
            "Bus Stop: {}\nStop ID: {}\nDescription: {}\nLocation: ({}, {})",
            self.name.as_deref().unwrap_or_default(),
            self.stop_id,
            self.description.as_deref().unwrap_or_default(),
            self.lat,
            self.lon
        )
    }
}
