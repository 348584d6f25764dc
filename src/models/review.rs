use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub text: String,
    pub rating: i32,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `POST /reviews/`. The author is taken from the bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub text: String,
    pub rating: i32,
    pub place_id: String,
}
