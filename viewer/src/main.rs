#[macro_use]
extern crate log;

use anyhow::Result;
use structopt::StructOpt;

use viewer::{App, ArchiveSource, CachedSource, FileSource, GeoJsonMap};

#[derive(StructOpt)]
#[structopt(about = "Draws one route from a GTFS feed as a GeoJSON map")]
struct Args {
    /// The path to a GTFS .zip file
    #[structopt(long, default_value = "gtfs_rapid_bus_kl.zip")]
    gtfs: String,
    /// Read the archive once and reuse it for every query
    #[structopt(long)]
    cache: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// List every route, to find the ID to show
    Routes {
        /// Print JSON instead of tab-separated lines
        #[structopt(long)]
        json: bool,
    },
    /// Draw a route's path and stops
    Show {
        /// The route_id from routes.txt
        #[structopt(long)]
        route: Option<String>,
        /// Where to write the map
        #[structopt(long, default_value = "map.geojson")]
        output: String,
    },
}

fn main() -> Result<()> {
    viewer::setup_logger();

    let args = Args::from_args();
    if args.cache {
        run(CachedSource::new(FileSource::new(args.gtfs)), args.command)
    } else {
        run(FileSource::new(args.gtfs), args.command)
    }
}

fn run<S: ArchiveSource>(source: S, command: Command) -> Result<()> {
    let mut app = App::new(source, GeoJsonMap::new());
    match command {
        Command::Routes { json } => {
            let options = app.populate_routes()?;
            if json {
                let list: Vec<serde_json::Value> = options
                    .iter()
                    .map(|x| serde_json::json!({ "route_id": x.route_id, "label": x.label }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for x in options {
                    println!("{}\t{}", x.route_id, x.label);
                }
            }
        }
        Command::Show { route, output } => {
            let geometry = app.show_route(route.as_deref().unwrap_or_default())?;
            if geometry.is_empty() {
                warn!("Nothing to draw for this route");
            }
            app.map().save(&output)?;
        }
    }
    Ok(())
}
