use std::cell::RefCell;

use anyhow::Result;

use gtfs::{list_routes, Feed, FeedError, RouteID, ROUTES};
use model::{resolve_feed, RouteGeometry};

use crate::{LoadingIndicator, MapPresenter};

/// Produces the raw bytes of a GTFS zip
pub trait ArchiveSource {
    fn fetch(&self) -> Result<Vec<u8>, FeedError>;
}

/// Reads the archive from disk on every fetch
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self { path: path.into() }
    }
}

impl ArchiveSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, FeedError> {
        let bytes = fs_err::read(&self.path).map_err(|source| FeedError::Fetch {
            path: self.path.clone(),
            source,
        })?;
        debug!("Read {} bytes from {}", bytes.len(), self.path);
        Ok(bytes)
    }
}

/// Fetches once and hands out the same bytes for the rest of the session. The archive is never
/// re-read, even if it changes underneath.
pub struct CachedSource<S> {
    inner: S,
    bytes: RefCell<Option<Vec<u8>>>,
}

impl<S: ArchiveSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            bytes: RefCell::new(None),
        }
    }
}

impl<S: ArchiveSource> ArchiveSource for CachedSource<S> {
    fn fetch(&self) -> Result<Vec<u8>, FeedError> {
        if let Some(ref bytes) = *self.bytes.borrow() {
            return Ok(bytes.clone());
        }
        // Failures aren't cached; the next fetch tries again
        let bytes = self.inner.fetch()?;
        *self.bytes.borrow_mut() = Some(bytes.clone());
        Ok(bytes)
    }
}

/// One entry in the route picker
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOption {
    pub route_id: RouteID,
    pub label: String,
}

/// Ties the archive, the loading indicator, and the map together. Every query starts from a fresh
/// fetch of the archive (unless the source caches), and a query that fails leaves the map as it
/// was.
pub struct App<S, M> {
    source: S,
    map: M,
    loading: LoadingIndicator,
}

impl<S: ArchiveSource, M: MapPresenter> App<S, M> {
    pub fn new(source: S, map: M) -> Self {
        Self {
            source,
            map,
            loading: LoadingIndicator::new(),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// The options for the route picker, in routes.txt order
    pub fn populate_routes(&self) -> Result<Vec<RouteOption>> {
        let _loading = self.loading.show("routes");
        let result = self.list_route_options();
        if let Err(ref err) = result {
            error!("Couldn't load routes: {err:#}");
        }
        result
    }

    fn list_route_options(&self) -> Result<Vec<RouteOption>> {
        let mut feed = Feed::open(self.source.fetch()?)?;
        let routes = list_routes(&feed.load_table(ROUTES)?)?;
        info!("Found {} routes", routes.len());
        Ok(routes
            .into_iter()
            .map(|route| RouteOption {
                label: route.label(),
                route_id: route.route_id,
            })
            .collect())
    }

    /// Draws one route, replacing whatever was drawn before. An empty selection is rejected before
    /// anything is fetched.
    pub fn show_route(&mut self, route_id: &str) -> Result<RouteGeometry> {
        if route_id.is_empty() {
            bail!("Please select a bus route.");
        }
        let route_id = RouteID::new(route_id);

        let _loading = self.loading.show(&format!("route {route_id}"));
        let geometry = match self.resolve_route(&route_id) {
            Ok(geometry) => geometry,
            Err(err) => {
                error!("Couldn't load {route_id}: {err:#}");
                return Err(err);
            }
        };

        self.map.render_paths(&geometry.paths);
        self.map.render_stops(&geometry.stops);
        self.map.fit_viewport(geometry.bounds());
        Ok(geometry)
    }

    fn resolve_route(&self, route_id: &RouteID) -> Result<RouteGeometry> {
        let mut feed = Feed::open(self.source.fetch()?)?;
        resolve_feed(route_id, &mut feed)
    }
}
