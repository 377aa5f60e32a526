use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A point-located vendor facility as stored.
///
/// Ids are assigned by the store at insertion time and never supplied by
/// callers; everything except `status` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub status: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Payload for creating a vendor. Carries no id on purpose.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVendor {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

fn default_status() -> String {
    "success".to_string()
}

impl NewVendor {
    /// Coordinate range check. NaN fails both range tests.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(AppError::Validation(format!(
                "lat {} out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(AppError::Validation(format!(
                "lng {} out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// Body of the status-update operation. Status is an opaque label: any
/// string is legal and updates simply replace it.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// A query rectangle: `[min_lat, max_lat] x [min_lng, max_lng]`, inclusive
/// on all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Builds a box only when all four bounds are present. A partial set of
    /// bounds yields `None`; callers treat that as "no filter" rather than
    /// applying half a rectangle.
    pub fn from_parts(
        min_lat: Option<f64>,
        max_lat: Option<f64>,
        min_lng: Option<f64>,
        max_lng: Option<f64>,
    ) -> Option<Self> {
        match (min_lat, max_lat, min_lng, max_lng) {
            (Some(min_lat), Some(max_lat), Some(min_lng), Some(max_lng)) => Some(Self {
                min_lat,
                max_lat,
                min_lng,
                max_lng,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_vendor(lat: f64, lng: f64) -> NewVendor {
        NewVendor {
            name: "Fountain".to_string(),
            lat,
            lng,
            status: "success".to_string(),
            kind: String::new(),
        }
    }

    #[test]
    fn test_coordinates_in_range_accepted() {
        assert!(new_vendor(25.0339, 121.5644).validate().is_ok());
        // Edges are legal.
        assert!(new_vendor(90.0, 180.0).validate().is_ok());
        assert!(new_vendor(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        assert!(matches!(
            new_vendor(90.5, 0.0).validate(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            new_vendor(0.0, -180.1).validate(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            new_vendor(f64::NAN, 0.0).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_bounding_box_requires_all_four_bounds() {
        assert!(BoundingBox::from_parts(Some(25.0), Some(26.0), Some(121.0), Some(122.0)).is_some());

        // Any missing bound means no filter at all.
        assert_eq!(
            BoundingBox::from_parts(Some(25.0), None, Some(121.0), Some(122.0)),
            None
        );
        assert_eq!(BoundingBox::from_parts(Some(25.0), None, None, None), None);
        assert_eq!(BoundingBox::from_parts(None, None, None, None), None);
    }

    #[test]
    fn test_new_vendor_defaults() {
        let v: NewVendor =
            serde_json::from_str(r#"{"lat": 25.0339, "lng": 121.5644}"#).unwrap();
        assert_eq!(v.name, "");
        assert_eq!(v.status, "success");
        assert_eq!(v.kind, "");
    }

    #[test]
    fn test_vendor_serializes_type_field() {
        let v = Vendor {
            id: 1,
            name: "Fountain".to_string(),
            lat: 25.0339,
            lng: 121.5644,
            status: "success".to_string(),
            kind: "park".to_string(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "park");
        assert!(json.get("kind").is_none());
    }
}
