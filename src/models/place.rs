use serde::{Deserialize, Serialize};

/// A listed place.
///
/// `title` and `price` are the canonical field names. Older API revisions sent
/// `name` and `price_per_night`; those are accepted on input only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(alias = "price_per_night")]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub amenities: Vec<AmenityRef>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Place {
    /// "City, Country" when the backend sent either part
    pub fn location(&self) -> Option<String> {
        match (self.city.as_deref(), self.country.as_deref()) {
            (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
            (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
            (None, None) => None,
        }
    }

    pub fn amenity_names(&self) -> Vec<&str> {
        self.amenities.iter().map(AmenityRef::label).collect()
    }
}

/// Amenities embedded in a place, either as bare ids or as full records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AmenityRef {
    Named {
        #[serde(default)]
        id: Option<String>,
        name: String,
    },
    Id(String),
}

impl AmenityRef {
    pub fn label(&self) -> &str {
        match self {
            AmenityRef::Named { name, .. } => name,
            AmenityRef::Id(id) => id,
        }
    }
}

/// Body for `POST /places/`. The owner is taken from the bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlace {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_canonical_fields() {
        let place: Place = serde_json::from_str(
            r#"{"id": "p1", "title": "Loft", "price": 120.0, "owner_id": "u1",
                "amenities": [{"id": "a1", "name": "WiFi"}, "a2"]}"#,
        )
        .unwrap();
        assert_eq!(place.title, "Loft");
        assert_eq!(place.price, 120.0);
        assert_eq!(place.amenity_names(), vec!["WiFi", "a2"]);
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let place: Place = serde_json::from_str(
            r#"{"id": "p2", "name": "Cabin", "price_per_night": 80, "city": "Tulsa"}"#,
        )
        .unwrap();
        assert_eq!(place.title, "Cabin");
        assert_eq!(place.price, 80.0);
        assert_eq!(place.location().as_deref(), Some("Tulsa"));
        assert!(place.amenities.is_empty());
    }

    #[test]
    fn test_new_place_omits_empty_amenities() {
        let draft = NewPlace {
            title: "Loft".into(),
            description: "Bright".into(),
            price: 99.5,
            latitude: 1.0,
            longitude: 2.0,
            amenities: vec![],
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("amenities").is_none());
        assert_eq!(json["title"], "Loft");
    }
}
