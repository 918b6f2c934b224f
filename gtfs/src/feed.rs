use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::{parse, FeedError, Table};

pub const ROUTES: &str = "routes.txt";
pub const TRIPS: &str = "trips.txt";
pub const SHAPES: &str = "shapes.txt";
pub const STOPS: &str = "stops.txt";
pub const STOP_TIMES: &str = "stop_times.txt";

/// A decoded GTFS archive. Nothing is cached; each table is decompressed and parsed when asked
/// for.
pub struct Feed {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl Feed {
    pub fn open(bytes: Vec<u8>) -> Result<Self, FeedError> {
        let feed = Self {
            archive: ZipArchive::new(Cursor::new(bytes))?,
        };
        debug!("Opened GTFS archive with tables {:?}", feed.table_names());
        Ok(feed)
    }

    pub fn load_table(&mut self, name: &str) -> Result<Table, FeedError> {
        let path = self.entry_path(name)?;
        let mut file = self.archive.by_name(&path)?;
        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|source| FeedError::Encoding {
                table: name.to_string(),
                source,
            })?;
        let table = parse(&text)?;
        debug!("{path} has {} records", table.len());
        Ok(table)
    }

    /// Loads every table or fails on the first problem.
    pub fn load_tables(&mut self, names: &[&str]) -> Result<BTreeMap<String, Table>, FeedError> {
        let mut tables = BTreeMap::new();
        for name in names {
            tables.insert(name.to_string(), self.load_table(name)?);
        }
        Ok(tables)
    }

    /// Every .txt entry in the archive, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .archive
            .file_names()
            .filter(|x| x.ends_with(".txt"))
            .map(|x| x.to_string())
            .collect();
        names.sort();
        names
    }

    // Feeds are usually zipped flat, but some are zipped along with their directory, like
    // gtfs/stops.txt. Prefer the root entry, then the shallowest nested one.
    fn entry_path(&self, name: &str) -> Result<String, FeedError> {
        let suffix = format!("/{name}");
        let mut best: Option<&str> = None;
        for path in self.archive.file_names() {
            if path == name {
                return Ok(path.to_string());
            }
            if path.ends_with(&suffix)
                && best.map_or(true, |x| (path.len(), path) < (x.len(), x))
            {
                best = Some(path);
            }
        }
        best.map(|x| x.to_string())
            .ok_or_else(|| FeedError::NotFound(name.to_string()))
    }
}

/// Decodes the archive and pulls out one table.
pub fn load_table(bytes: Vec<u8>, name: &str) -> Result<Table, FeedError> {
    Feed::open(bytes)?.load_table(name)
}

/// Decodes the archive once and pulls out several tables.
pub fn load_tables(bytes: Vec<u8>, names: &[&str]) -> Result<BTreeMap<String, Table>, FeedError> {
    Feed::open(bytes)?.load_tables(names)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::FileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
        let files: Vec<(&str, &[u8])> = files.iter().map(|(n, c)| (*n, c.as_bytes())).collect();
        zip_raw(&files)
    }

    fn zip_raw(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer
                .start_file(
                    *name,
                    FileOptions::default().compression_method(CompressionMethod::Deflated),
                )
                .unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_load_table() {
        let bytes = zip_bytes(&[(ROUTES, "route_id,route_short_name\nR1,100\nR2,200\n")]);
        let table = load_table(bytes, ROUTES).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].get("route_short_name"), Some("200"));
    }

    #[test]
    fn test_load_tables() {
        let bytes = zip_bytes(&[
            (TRIPS, "trip_id,route_id\nT1,R1\n"),
            (STOP_TIMES, "trip_id,stop_id\nT1,S1\nT1,S2\n"),
        ]);
        let tables = load_tables(bytes, &[TRIPS, STOP_TIMES]).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[TRIPS].len(), 1);
        assert_eq!(tables[STOP_TIMES].len(), 2);
    }

    #[test]
    fn test_missing_table() {
        let bytes = zip_bytes(&[(TRIPS, "trip_id,route_id\nT1,R1\n")]);
        assert!(matches!(
            load_tables(bytes, &[TRIPS, SHAPES]),
            Err(FeedError::NotFound(name)) if name == SHAPES
        ));
    }

    #[test]
    fn test_corrupt_archive() {
        let err = load_table(b"definitely not a zip".to_vec(), ROUTES).unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));

        assert!(matches!(Feed::open(Vec::new()), Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_not_utf8() {
        let bytes = zip_raw(&[
            (ROUTES, &b"route_id\nR1\n"[..]),
            (STOPS, &b"stop_id,stop_name\nS1,\xff\xfeCentral\n"[..]),
        ]);
        let mut feed = Feed::open(bytes).unwrap();
        assert!(matches!(
            feed.load_table(STOPS),
            Err(FeedError::Encoding { table, .. }) if table == STOPS
        ));
        // The other tables are still fine
        assert_eq!(feed.load_table(ROUTES).unwrap().len(), 1);
        assert!(matches!(
            feed.load_tables(&[ROUTES, STOPS]),
            Err(FeedError::Encoding { .. })
        ));
    }

    #[test]
    fn test_nested_directory() {
        let bytes = zip_bytes(&[("gtfs/stops.txt", "stop_id,stop_lat,stop_lon\nS1,1,2\n")]);
        let mut feed = Feed::open(bytes).unwrap();
        assert_eq!(feed.table_names(), vec!["gtfs/stops.txt".to_string()]);
        assert_eq!(feed.load_table(STOPS).unwrap().len(), 1);
    }

    #[test]
    fn test_root_entry_preferred() {
        let bytes = zip_bytes(&[
            ("old/routes.txt", "route_id\nOLD\n"),
            (ROUTES, "route_id\nNEW\n"),
            ("a/b/trips.txt", "trip_id\nDEEP\n"),
            ("a/trips.txt", "trip_id\nSHALLOW\n"),
        ]);
        let mut feed = Feed::open(bytes).unwrap();
        let routes = feed.load_table(ROUTES).unwrap();
        assert_eq!(routes.records()[0].get("route_id"), Some("NEW"));
        let trips = feed.load_table(TRIPS).unwrap();
        assert_eq!(trips.records()[0].get("trip_id"), Some("SHALLOW"));
    }
}
