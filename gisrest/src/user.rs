//! User records and the typed inputs of each user operation.
//!
//! Every operation has an explicit input type with documented defaults, so
//! the HTTP layer and the CLI apply the same rules.

use serde::{Deserialize, Serialize};

use crate::error::{GisError, Result};
use crate::point::GeoPoint;

/// Default name given to users created without one.
pub const DEFAULT_USER_NAME: &str = "user";

/// A stored user as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Server-assigned id.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Latitude of the stored location.
    pub lat: f64,
    /// Longitude of the stored location.
    pub lng: f64,
}

impl User {
    /// Location of this user.
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Proximity search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateQuery {
    /// Search center.
    pub center: GeoPoint,
    /// Maximum distance from `center`, in units of the store's SRID.
    pub radius: f64,
    /// Maximum number of users returned. Passed to the store unchecked.
    pub limit: i64,
}

impl LocateQuery {
    /// Default radius when none is given.
    pub const DEFAULT_RADIUS: f64 = 1.0;
    /// Default limit when none is given.
    pub const DEFAULT_LIMIT: i64 = 1;

    /// Create a query around `(lat, lng)`.
    pub fn new(lat: f64, lng: f64, radius: f64, limit: i64) -> Self {
        Self {
            center: GeoPoint::new(lat, lng),
            radius,
            limit,
        }
    }
}

impl Default for LocateQuery {
    fn default() -> Self {
        Self::new(0.0, 0.0, Self::DEFAULT_RADIUS, Self::DEFAULT_LIMIT)
    }
}

/// A user to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Initial location.
    pub location: GeoPoint,
}

impl NewUser {
    /// Build a new user, falling back to `lat = 0`, `lng = 0` and
    /// [`DEFAULT_USER_NAME`] for missing fields.
    pub fn from_parts(name: Option<String>, lat: Option<f64>, lng: Option<f64>) -> Self {
        Self {
            name: name.unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            location: GeoPoint::new(lat.unwrap_or(0.0), lng.unwrap_or(0.0)),
        }
    }
}

impl Default for NewUser {
    fn default() -> Self {
        Self::from_parts(None, None, None)
    }
}

/// A partial update of a user.
///
/// At least one of `name` and `location` is always set. Construct it with
/// [`UserUpdate::from_parts`] to keep that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    name: Option<String>,
    location: Option<GeoPoint>,
}

impl UserUpdate {
    /// Build an update from optional request fields.
    ///
    /// The location changes only when both `lat` and `lng` are given; a lone
    /// coordinate is ignored. An empty name counts as no name.
    ///
    /// # Errors
    ///
    /// Returns [`GisError::InvalidUpdateData`] when nothing would change.
    pub fn from_parts(name: Option<String>, lat: Option<f64>, lng: Option<f64>) -> Result<Self> {
        let name = name.filter(|n| !n.is_empty());
        let location = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        if name.is_none() && location.is_none() {
            return Err(GisError::InvalidUpdateData);
        }

        Ok(Self { name, location })
    }

    /// New name, if it changes.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// New location, if it changes.
    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }
}

/// Reject the zero id that absent or malformed ids are mapped to.
pub fn validate_user_id(user_id: i64) -> Result<i64> {
    if user_id == 0 {
        Err(GisError::InvalidUserId)
    } else {
        Ok(user_id)
    }
}

/// Parse a user id path segment. Anything that is not an integer becomes `0`.
pub fn parse_user_id(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialize_keys() {
        let user = User {
            user_id: 7,
            name: "alice".to_string(),
            lat: 10.0,
            lng: 20.0,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["name"], "alice");
        assert_eq!(json["lat"].as_f64(), Some(10.0));
        assert_eq!(json["lng"].as_f64(), Some(20.0));
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_locate_defaults() {
        let query = LocateQuery::default();
        assert_eq!(query.center, GeoPoint::new(0.0, 0.0));
        assert_eq!(query.radius, 1.0);
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::default();
        assert_eq!(user.name, "user");
        assert_eq!(user.location, GeoPoint::new(0.0, 0.0));

        let user = NewUser::from_parts(Some("bob".to_string()), Some(1.5), None);
        assert_eq!(user.name, "bob");
        assert_eq!(user.location, GeoPoint::new(1.5, 0.0));
    }

    #[test]
    fn test_update_name_only() {
        let update = UserUpdate::from_parts(Some("carol".to_string()), None, None).unwrap();
        assert_eq!(update.name(), Some("carol"));
        assert_eq!(update.location(), None);
    }

    #[test]
    fn test_update_location_only() {
        let update = UserUpdate::from_parts(None, Some(1.0), Some(2.0)).unwrap();
        assert_eq!(update.name(), None);
        assert_eq!(update.location(), Some(GeoPoint::new(1.0, 2.0)));
    }

    #[test]
    fn test_update_zero_coordinates_are_present() {
        let update = UserUpdate::from_parts(None, Some(0.0), Some(0.0)).unwrap();
        assert_eq!(update.location(), Some(GeoPoint::new(0.0, 0.0)));
    }

    #[test]
    fn test_update_rejects_empty() {
        assert!(matches!(
            UserUpdate::from_parts(None, None, None),
            Err(GisError::InvalidUpdateData)
        ));
        assert!(matches!(
            UserUpdate::from_parts(Some(String::new()), None, None),
            Err(GisError::InvalidUpdateData)
        ));
        // Half a coordinate pair does not count as a location change
        assert!(matches!(
            UserUpdate::from_parts(None, Some(1.0), None),
            Err(GisError::InvalidUpdateData)
        ));
    }

    #[test]
    fn test_update_partial_pair_with_name() {
        let update = UserUpdate::from_parts(Some("dave".to_string()), None, Some(3.0)).unwrap();
        assert_eq!(update.name(), Some("dave"));
        assert_eq!(update.location(), None);
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!(parse_user_id("13"), 13);
        assert_eq!(parse_user_id(" 42 "), 42);
        assert_eq!(parse_user_id("abc"), 0);
        assert_eq!(parse_user_id(""), 0);

        assert!(validate_user_id(13).is_ok());
        assert!(matches!(validate_user_id(0), Err(GisError::InvalidUserId)));
    }
}
