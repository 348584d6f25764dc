//! Place detail view and review submission.

use tracing::{error, info, warn};

use super::{render_detail, Resource};
use crate::api::ClientError;
use crate::models::{format_optional_date, format_rating, short_id, NewReview, Place, Review};
use crate::ui::{Console, View};
use crate::ClientState;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetail {
    pub place: Option<Place>,
    /// Whether the add-review action is offered
    pub can_review: bool,
    pub reviews: Option<Vec<Review>>,
}

pub struct PlaceDetailPage<'a> {
    state: &'a ClientState,
    console: Console,
}

impl<'a> PlaceDetailPage<'a> {
    pub fn new(state: &'a ClientState) -> Self {
        Self::for_console(state, Console::Public)
    }

    /// Detail page as shown on `console`. Only the public console offers the
    /// add-review action.
    pub fn for_console(state: &'a ClientState, console: Console) -> Self {
        Self { state, console }
    }

    fn reviews_path(place_id: &str) -> String {
        format!("{}/reviews", Place::item_path(place_id))
    }

    /// Render a place, then its reviews. The reviews are fetched even when the
    /// place itself failed to load.
    pub async fn load(&self, place_id: &str) -> PlaceDetail {
        let ui = &self.state.ui;
        let token = self.state.session.token();
        let can_review = self.console == Console::Public && token.is_some();

        let place = match self
            .state
            .api
            .get::<Place>(&Place::item_path(place_id), token.as_deref())
            .await
        {
            Ok(place) => {
                ui.show(&render_detail(&place.detail()));
                Some(place)
            }
            Err(e) => {
                error!(error = %e, place_id, "Error fetching place details");
                ui.show(&format!("Failed to load place details: {}", e));
                None
            }
        };

        if self.console == Console::Public {
            if can_review {
                ui.show(&format!(
                    "Add a review: {}",
                    View::AddReview(place_id.to_string()).command()
                ));
            } else {
                ui.show(&format!("Login to add a review: {}", View::Login.command()));
            }
        }

        let reviews = match self
            .state
            .api
            .get::<Vec<Review>>(&Self::reviews_path(place_id), None)
            .await
        {
            Ok(reviews) => {
                ui.show(&render_reviews(&reviews));
                Some(reviews)
            }
            Err(e) => {
                error!(error = %e, place_id, "Error fetching reviews");
                ui.show("Failed to load reviews");
                None
            }
        };

        PlaceDetail {
            place,
            can_review,
            reviews,
        }
    }

    /// Post a review for `place_id`.
    ///
    /// Both fields must be present. The rating must be an integer; its range
    /// is enforced by the backend.
    pub async fn submit_review(
        &self,
        place_id: &str,
        text: &str,
        rating: &str,
    ) -> Result<(), ClientError> {
        let ui = &self.state.ui;

        let Some(token) = self.state.session.token() else {
            ui.alert("Please login to add a review.");
            ui.redirect(&View::Login);
            return Err(ClientError::NotLoggedIn);
        };

        let text = text.trim();
        let rating = rating.trim();
        if text.is_empty() || rating.is_empty() {
            ui.alert("Please fill in all fields");
            return Err(ClientError::Validation(
                "review text and rating are required".to_string(),
            ));
        }

        let rating: i32 = match rating.parse() {
            Ok(rating) => rating,
            Err(_) => {
                ui.alert("Rating must be a whole number");
                return Err(ClientError::Validation(format!(
                    "invalid rating '{}'",
                    rating
                )));
            }
        };

        let review = NewReview {
            text: text.to_string(),
            rating,
            place_id: place_id.to_string(),
        };

        match self
            .state
            .api
            .post::<_, serde_json::Value>(Review::ENDPOINT, &review, Some(&token))
            .await
        {
            Ok(_) => {
                info!(place_id, rating, "Review submitted");
                ui.alert("Review submitted successfully!");
                ui.redirect(&View::PlaceDetail(place_id.to_string()));
                Ok(())
            }
            Err(e @ ClientError::Api { .. }) => {
                warn!(error = %e, place_id, "Review rejected");
                ui.alert(&format!("Failed to submit review: {}", e));
                Err(e)
            }
            Err(e) => {
                error!(error = %e, place_id, "Error submitting review");
                ui.alert("An error occurred while submitting the review.");
                Err(e)
            }
        }
    }
}

fn render_reviews(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return format!("No {} found", Review::PLURAL);
    }

    let mut out = format!("Reviews ({})", reviews.len());
    for review in reviews {
        let author = review
            .user_id
            .as_deref()
            .map(short_id)
            .unwrap_or_else(|| "anonymous".to_string());
        out.push_str(&format!(
            "\n\n  {}  by {} on {}\n  {}",
            format_rating(review.rating),
            author,
            format_optional_date(review.created_at.as_deref()),
            review.text
        ));
    }
    out
}
