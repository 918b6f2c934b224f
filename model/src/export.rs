use geo::{LineString, Point};
use geojson::{Feature, Geometry, Value};

use gtfs::Stop;

use crate::geometry::is_finite;
use crate::{stop_position, Path};

/// A LineString following the path. Points without a real position are skipped; if fewer than two
/// remain, there's no geometry at all.
pub fn path_feature(path: &Path) -> Feature {
    let line: LineString = path.line.coords().copied().filter(is_finite).collect();
    let mut feature = new_feature(if line.0.len() >= 2 {
        Some(Geometry::new(Value::from(&line)))
    } else {
        None
    });
    feature.set_property("type", "route");
    feature.set_property("shape_id", path.shape_id.to_string());
    feature
}

/// A Point for the stop, or no geometry if its position didn't parse
pub fn stop_feature(stop: &Stop) -> Feature {
    let pos = stop_position(stop);
    let mut feature = new_feature(if is_finite(&pos) {
        Some(Geometry::new(Value::from(&Point::from(pos))))
    } else {
        None
    });
    feature.set_property("type", "stop");
    feature.set_property("stop_id", stop.stop_id.to_string());
    feature.set_property("stop_name", stop.name.clone().unwrap_or_default());
    feature.set_property("stop_desc", stop.description.clone().unwrap_or_default());
    feature
}

fn new_feature(geometry: Option<Geometry>) -> Feature {
    Feature {
        bbox: None,
        geometry,
        id: None,
        properties: None,
        foreign_members: None,
    }
}
