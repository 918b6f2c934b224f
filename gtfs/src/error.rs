use thiserror::Error;

/// Everything that can go wrong getting a table out of a GTFS archive. A failed call never returns
/// a partial result.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("couldn't fetch the GTFS archive from {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't open the GTFS archive: {0}")]
    Decode(#[from] zip::result::ZipError),
    #[error("the GTFS archive has no {0}")]
    NotFound(String),
    #[error("couldn't read {table} as text: {source}")]
    Encoding {
        table: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),
    #[error("{table} has no {column} column")]
    MissingColumn { table: String, column: String },
}

