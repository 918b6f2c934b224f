use geo::{coord, BoundingRect, Coord, MultiPoint, Rect};

use gtfs::Stop;

/// GTFS stores latitude and longitude; geo wants x = longitude, y = latitude.
pub fn stop_position(stop: &Stop) -> Coord {
    coord! { x: stop.lon, y: stop.lat }
}

pub fn is_finite(pt: &Coord) -> bool {
    pt.x.is_finite() && pt.y.is_finite()
}

/// The smallest box covering the points that have a real position. `None` if none do.
pub fn bounds(pts: impl IntoIterator<Item = Coord>) -> Option<Rect> {
    let pts: Vec<Coord> = pts.into_iter().filter(is_finite).collect();
    MultiPoint::from(pts).bounding_rect()
}

/// In GeoJSON order: west, south, east, north
pub fn to_bbox(rect: &Rect) -> Vec<f64> {
    vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]
}
