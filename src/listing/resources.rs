// Row renderers and endpoint configuration for each resource type

use super::Resource;
use crate::models::{
    format_optional_date, format_price, format_rating, short_id, truncate, yes_no, Amenity,
    NewAmenity, NewPlace, NewReview, NewUser, Place, Review, User,
};

fn optional_short_id(id: Option<&str>) -> String {
    id.map(short_id).unwrap_or_else(|| "-".to_string())
}

impl Resource for User {
    type Draft = NewUser;

    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
    const ENDPOINT: &'static str = "/users/";
    const AUTH_REQUIRED: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "NAME", "EMAIL", "ADMIN", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            self.full_name(),
            self.email.clone(),
            yes_no(self.is_admin).to_string(),
            format_optional_date(self.created_at.as_deref()),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.full_name()),
            ("Email", self.email.clone()),
            ("Admin", yes_no(self.is_admin).to_string()),
            ("Created", format_optional_date(self.created_at.as_deref())),
        ]
    }
}

impl Resource for Place {
    type Draft = NewPlace;

    const SINGULAR: &'static str = "place";
    const PLURAL: &'static str = "places";
    const ENDPOINT: &'static str = "/places/";
    const AUTH_REQUIRED: bool = false;

    fn id(&self) -> &str {
        &self.id
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "TITLE", "PRICE", "OWNER", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            self.title.clone(),
            format_price(self.price),
            optional_short_id(self.owner_id.as_deref()),
            format_optional_date(self.created_at.as_deref()),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Host", self.owner_id.clone().unwrap_or_else(|| "-".to_string())),
            ("Price", format!("{} per night", format_price(self.price))),
        ];
        if let Some(location) = self.location() {
            fields.push(("Location", location));
        }
        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            fields.push(("Coordinates", format!("{:.4}, {:.4}", lat, lng)));
        }
        fields.push((
            "Description",
            self.description.clone().unwrap_or_else(|| "-".to_string()),
        ));
        let amenities = self.amenity_names();
        fields.push((
            "Amenities",
            if amenities.is_empty() {
                "None".to_string()
            } else {
                amenities.join(", ")
            },
        ));
        fields
    }
}

impl Resource for Review {
    type Draft = NewReview;

    const SINGULAR: &'static str = "review";
    const PLURAL: &'static str = "reviews";
    const ENDPOINT: &'static str = "/reviews/";
    const AUTH_REQUIRED: bool = false;

    fn id(&self) -> &str {
        &self.id
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "TEXT", "RATING", "USER", "PLACE", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            truncate(&self.text, 50),
            format_rating(self.rating),
            optional_short_id(self.user_id.as_deref()),
            optional_short_id(self.place_id.as_deref()),
            format_optional_date(self.created_at.as_deref()),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Rating", format_rating(self.rating)),
            ("Text", self.text.clone()),
            ("User", self.user_id.clone().unwrap_or_else(|| "-".to_string())),
            ("Place", self.place_id.clone().unwrap_or_else(|| "-".to_string())),
            ("Created", format_optional_date(self.created_at.as_deref())),
        ]
    }
}

impl Resource for Amenity {
    type Draft = NewAmenity;

    const SINGULAR: &'static str = "amenity";
    const PLURAL: &'static str = "amenities";
    const ENDPOINT: &'static str = "/amenities/";
    const AUTH_REQUIRED: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "NAME", "CREATED"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            self.name.clone(),
            format_optional_date(self.created_at.as_deref()),
        ]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Created", format_optional_date(self.created_at.as_deref())),
        ]
    }
}
