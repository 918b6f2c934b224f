use crate::{parse_coordinate, Record, ShapeID};

/// One point of a shape. Points belong to their shape in file order; shape_pt_sequence is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePoint {
    pub shape_id: ShapeID,
    pub lat: f64,
    pub lon: f64,
}

impl ShapePoint {
    pub fn from_record(rec: &Record) -> Option<Self> {
        Some(Self {
            shape_id: ShapeID::new(rec.get("shape_id")?),
            lat: parse_coordinate(rec.get("shape_pt_lat")),
            lon: parse_coordinate(rec.get("shape_pt_lon")),
        })
    }
}
