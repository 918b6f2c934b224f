#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod app;
mod loading;
mod map;

pub use app::{App, ArchiveSource, CachedSource, FileSource, RouteOption};
pub use loading::{Loading, LoadingIndicator};
pub use map::{GeoJsonMap, MapPresenter, Viewport};

/// Prints messages from the `log` crate to STDOUT, at info level unless RUST_LOG says otherwise.
pub fn setup_logger() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}
