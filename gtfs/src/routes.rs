use crate::{FeedError, Record, RouteID, Table, ROUTES};

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub route_id: RouteID,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

impl Route {
    fn from_record(rec: &Record) -> Self {
        Self {
            route_id: RouteID::new(rec.get("route_id").unwrap_or_default()),
            short_name: rec.get("route_short_name").map(|x| x.to_string()),
            long_name: rec.get("route_long_name").map(|x| x.to_string()),
        }
    }

    /// How the route appears in a picker, like "100 - Downtown Express"
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.short_name.as_deref().unwrap_or_default(),
            self.long_name.as_deref().unwrap_or_default()
        )
    }
}

/// Every route in table order. Duplicates aren't merged and nothing is sorted.
pub fn list_routes(table: &Table) -> Result<Vec<Route>, FeedError> {
    table.require_columns(ROUTES, &["route_id"])?;
    Ok(table.records().iter().map(Route::from_record).collect())
}
