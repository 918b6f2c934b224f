use std::fmt;

use serde::Serialize;

// IDs in GTFS are opaque strings. They often look numeric, but nothing guarantees it, so only ever
// compare them as text.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(x: S) -> Self {
                Self(x.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(RouteID);
define_id!(TripID);
define_id!(ShapeID);
define_id!(StopID);
