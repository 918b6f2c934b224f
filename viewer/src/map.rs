use anyhow::Result;
use geo::{coord, Coord, Rect};
use geojson::{Feature, FeatureCollection, GeoJson};

use gtfs::Stop;
use model::{path_feature, stop_feature, to_bbox, Path};

const PATH_COLOR: &str = "blue";
const STOP_COLOR: &str = "orange";

/// Whatever displays a route. Each render call replaces what the previous one of the same kind
/// drew.
pub trait MapPresenter {
    fn render_paths(&mut self, paths: &[Path]);
    fn render_stops(&mut self, stops: &[Stop]);
    /// `None` means there's nothing to fit; the viewport stays where it is.
    fn fit_viewport(&mut self, bounds: Option<Rect>);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Viewport {
    /// x is longitude, y is latitude
    Centered { center: Coord, zoom: u8 },
    Fitted(Rect),
}

impl Viewport {
    /// Kuala Lumpur
    pub fn default_view() -> Self {
        Viewport::Centered {
            center: coord! { x: 101.6869, y: 3.139 },
            zoom: 12,
        }
    }
}

/// A map whose contents are a GeoJSON document. It owns the current path and stop layers and the
/// viewport; nothing else holds onto them.
pub struct GeoJsonMap {
    paths: Vec<Feature>,
    stops: Vec<Feature>,
    viewport: Viewport,
}

impl GeoJsonMap {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            stops: Vec::new(),
            viewport: Viewport::default_view(),
        }
    }

    pub fn path_layer(&self) -> &[Feature] {
        &self.paths
    }

    pub fn stop_layer(&self) -> &[Feature] {
        &self.stops
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn to_geojson(&self) -> GeoJson {
        let mut features = self.paths.clone();
        features.extend(self.stops.iter().cloned());

        let mut foreign_members = serde_json::Map::new();
        let bbox = match self.viewport {
            Viewport::Fitted(bounds) => Some(to_bbox(&bounds)),
            Viewport::Centered { center, zoom } => {
                foreign_members.insert(
                    "center".to_string(),
                    serde_json::json!([center.x, center.y]),
                );
                foreign_members.insert("zoom".to_string(), serde_json::json!(zoom));
                None
            }
        };
        GeoJson::FeatureCollection(FeatureCollection {
            features,
            bbox,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn save(&self, path: &str) -> Result<()> {
        fs_err::write(path, serde_json::to_string_pretty(&self.to_geojson())?)?;
        info!("Wrote {path}");
        Ok(())
    }
}

impl Default for GeoJsonMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapPresenter for GeoJsonMap {
    fn render_paths(&mut self, paths: &[Path]) {
        // Build the new layer completely before dropping the old one
        let layer: Vec<Feature> = paths
            .iter()
            .map(|path| {
                let mut feature = path_feature(path);
                feature.set_property("color", PATH_COLOR);
                feature
            })
            .collect();
        self.paths = layer;
    }

    fn render_stops(&mut self, stops: &[Stop]) {
        let layer: Vec<Feature> = stops
            .iter()
            .map(|stop| {
                let mut feature = stop_feature(stop);
                feature.set_property("color", STOP_COLOR);
                feature.set_property("popup", stop.describe());
                feature
            })
            .collect();
        self.stops = layer;
    }

    fn fit_viewport(&mut self, bounds: Option<Rect>) {
        if let Some(bounds) = bounds {
            debug!("Fitting the viewport to {:?}", to_bbox(&bounds));
            self.viewport = Viewport::Fitted(bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use gtfs::{ShapeID, StopID};
    use model::bounds;

    use super::*;

    fn path(id: &str, pts: Vec<(f64, f64)>) -> Path {
        Path {
            shape_id: ShapeID::new(id),
            line: pts
                .into_iter()
                .map(|(lat, lon)| coord! { x: lon, y: lat })
                .collect(),
        }
    }

    fn downtown() -> Option<Rect> {
        bounds(vec![
            coord! { x: 101.6, y: 3.1 },
            coord! { x: 101.7, y: 3.2 },
        ])
    }

    fn stop(id: &str, lat: f64, lon: f64) -> Stop {
        Stop {
            stop_id: StopID::new(id),
            name: Some("Central".to_string()),
            description: Some("Main hub".to_string()),
            lat,
            lon,
        }
    }

    #[test]
    fn test_render_replaces_layers() {
        let mut map = GeoJsonMap::new();
        map.render_paths(&[path("S1", vec![(1.0, 1.0), (2.0, 2.0)]), path("S2", vec![])]);
        map.render_stops(&[stop("A", 1.0, 1.0)]);
        assert_eq!(map.path_layer().len(), 2);
        assert_eq!(map.stop_layer().len(), 1);

        map.render_paths(&[path("S3", vec![(1.0, 1.0), (2.0, 2.0)])]);
        assert_eq!(map.path_layer().len(), 1);
        assert_eq!(
            map.path_layer()[0].property("shape_id"),
            Some(&serde_json::json!("S3"))
        );
        // Stops weren't touched
        assert_eq!(map.stop_layer().len(), 1);
    }

    #[test]
    fn test_empty_render() {
        let mut map = GeoJsonMap::new();
        map.render_paths(&[path("S1", vec![(1.0, 1.0), (2.0, 2.0)])]);
        map.render_paths(&[]);
        map.render_stops(&[]);
        map.fit_viewport(None);
        assert!(map.path_layer().is_empty());
        assert!(map.stop_layer().is_empty());
        assert_eq!(map.viewport(), &Viewport::default_view());
    }

    #[test]
    fn test_fit_viewport() {
        let mut map = GeoJsonMap::new();
        let bounds = downtown();
        map.fit_viewport(bounds);
        assert_eq!(map.viewport(), &Viewport::Fitted(bounds.unwrap()));

        // Rendering nothing afterwards keeps the old view
        map.fit_viewport(None);
        assert_eq!(map.viewport(), &Viewport::Fitted(bounds.unwrap()));
    }

    #[test]
    fn test_stop_popup_and_nan() {
        let mut map = GeoJsonMap::new();
        map.render_stops(&[stop("A", 3.15, 101.65), stop("B", f64::NAN, 101.65)]);
        assert_eq!(map.stop_layer().len(), 2);

        let popup = map.stop_layer()[0].property("popup").unwrap().as_str().unwrap();
        assert!(popup.contains("Bus Stop: Central"));
        assert!(popup.contains("Stop ID: A"));
        assert!(popup.contains("Description: Main hub"));
        assert!(popup.contains("(3.15, 101.65)"));
        assert_eq!(
            map.stop_layer()[0].property("color"),
            Some(&serde_json::json!("orange"))
        );

        assert!(map.stop_layer()[1].geometry.is_none());
    }

    #[test]
    fn test_document() {
        let mut map = GeoJsonMap::new();
        match map.to_geojson() {
            GeoJson::FeatureCollection(fc) => {
                assert!(fc.features.is_empty());
                assert_eq!(fc.bbox, None);
                assert_eq!(
                    fc.foreign_members.unwrap()["zoom"],
                    serde_json::json!(12)
                );
            }
            _ => panic!("expected a FeatureCollection"),
        }

        map.render_paths(&[path("S1", vec![(3.1, 101.6), (3.2, 101.7)])]);
        map.render_stops(&[stop("A", 3.15, 101.65)]);
        map.fit_viewport(downtown());
        match map.to_geojson() {
            GeoJson::FeatureCollection(fc) => {
                assert_eq!(fc.features.len(), 2);
                assert_eq!(fc.bbox, Some(vec![101.6, 3.1, 101.7, 3.2]));
            }
            _ => panic!("expected a FeatureCollection"),
        }
    }
}
