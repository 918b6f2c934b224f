use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use geo::{coord, LineString, Rect};

use gtfs::{
    Feed, RouteID, ShapeID, ShapePoint, Stop, StopID, StopTime, Table, Trip, TripID, SHAPES,
    STOPS, STOP_TIMES, TRIPS,
};

use crate::{bounds, stop_position};

/// One polyline, with points in the order shapes.txt lists them. x is longitude, y is latitude.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub shape_id: ShapeID,
    pub line: LineString,
}

/// Everything needed to draw one route
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteGeometry {
    /// Ordered by the first appearance of each shape in shapes.txt
    pub paths: Vec<Path>,
    /// In stops.txt order, each stop_id at most once unless stops.txt itself repeats it
    pub stops: Vec<Stop>,
}

impl RouteGeometry {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.stops.is_empty()
    }

    /// Covers every path point and stop with a real position. `None` if there aren't any.
    pub fn bounds(&self) -> Option<Rect> {
        let path_pts = self.paths.iter().flat_map(|p| p.line.coords().copied());
        let stop_pts = self.stops.iter().map(stop_position);
        bounds(path_pts.chain(stop_pts))
    }
}

/// Joins trips to shapes and trips to stop_times to stops, keeping only what `route_id` uses. A
/// route without trips isn't an error; it just has nothing to draw.
pub fn resolve(
    route_id: &RouteID,
    trips: &Table,
    shapes: &Table,
    stop_times: &Table,
    stops: &Table,
) -> RouteGeometry {
    let mut trip_ids: BTreeSet<TripID> = BTreeSet::new();
    let mut shape_ids: BTreeSet<ShapeID> = BTreeSet::new();
    for trip in trips.records().iter().filter_map(Trip::from_record) {
        if &trip.route_id != route_id {
            continue;
        }
        trip_ids.insert(trip.trip_id);
        if let Some(shape_id) = trip.shape_id {
            shape_ids.insert(shape_id);
        }
    }
    debug!(
        "{route_id} has {} trips using {} shapes",
        trip_ids.len(),
        shape_ids.len()
    );

    let paths = group_shapes(&shape_ids, shapes);

    let stop_ids: BTreeSet<StopID> = stop_times
        .records()
        .iter()
        .filter_map(StopTime::from_record)
        .filter(|st| trip_ids.contains(&st.trip_id))
        .map(|st| st.stop_id)
        .collect();
    let stops: Vec<Stop> = stops
        .records()
        .iter()
        .filter_map(Stop::from_record)
        .filter(|stop| stop_ids.contains(&stop.stop_id))
        .collect();

    let unplaced = stops.iter().filter(|s| !s.has_position()).count();
    if unplaced > 0 {
        debug!("{unplaced} stops on {route_id} have no usable position");
    }

    RouteGeometry { paths, stops }
}

// Points of one shape don't have to be adjacent in the file; they still form one path.
fn group_shapes(shape_ids: &BTreeSet<ShapeID>, shapes: &Table) -> Vec<Path> {
    let mut paths: Vec<Path> = Vec::new();
    let mut path_idx: BTreeMap<ShapeID, usize> = BTreeMap::new();
    for pt in shapes.records().iter().filter_map(ShapePoint::from_record) {
        if !shape_ids.contains(&pt.shape_id) {
            continue;
        }
        let idx = *path_idx.entry(pt.shape_id.clone()).or_insert_with(|| {
            paths.push(Path {
                shape_id: pt.shape_id.clone(),
                line: LineString::new(Vec::new()),
            });
            paths.len() - 1
        });
        paths[idx].line.0.push(coord! { x: pt.lon, y: pt.lat });
    }

    for shape_id in shape_ids {
        if !path_idx.contains_key(shape_id) {
            warn!("Trips use {shape_id}, but it's not in {SHAPES}");
        }
    }
    paths
}

/// Loads the four tables from one pass over the archive, then resolves.
pub fn resolve_feed(route_id: &RouteID, feed: &mut Feed) -> Result<RouteGeometry> {
    let tables = feed.load_tables(&[SHAPES, STOPS, STOP_TIMES, TRIPS])?;
    let trips = &tables[TRIPS];
    let shapes = &tables[SHAPES];
    let stop_times = &tables[STOP_TIMES];
    let stops = &tables[STOPS];

    trips.require_columns(TRIPS, &["trip_id", "route_id"])?;
    shapes.require_columns(SHAPES, &["shape_id", "shape_pt_lat", "shape_pt_lon"])?;
    stop_times.require_columns(STOP_TIMES, &["trip_id", "stop_id"])?;
    stops.require_columns(STOPS, &["stop_id", "stop_lat", "stop_lon"])?;

    let geometry = resolve(route_id, trips, shapes, stop_times, stops);
    info!(
        "{route_id} has {} paths and {} stops",
        geometry.paths.len(),
        geometry.stops.len()
    );
    Ok(geometry)
}
