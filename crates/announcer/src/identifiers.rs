//! Identifiers for schedule entities.
//!
//! All identifiers use Arc<str> so stops and routes can be cloned into every
//! projection result without copying strings.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(StopIdentifier);
impl_identifier!(
    /// Internal key of a route in the schedule tables.
    RouteIdentifier
);
impl_identifier!(
    /// Public route number painted on the vehicle (e.g. "200", "N199").
    RouteNumber
);
impl_identifier!(TripIdentifier);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StopIdentifier::new("stop_123");
        let id2 = StopIdentifier::new("stop_123");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0));
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(RouteNumber::new("200"), 42);

        assert_eq!(map.get(&RouteNumber::from("200")), Some(&42));
        assert_eq!(map.get(&RouteNumber::from("201")), None);
    }

    #[test]
    fn test_identifier_display() {
        let id = TripIdentifier::new("trip_7");
        assert_eq!(format!("{}", id), "trip_7");
        assert_eq!(TripIdentifier::from(String::from("trip_7")).as_str(), "trip_7");
    }
}
