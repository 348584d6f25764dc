//! Public place cards and the client-side price filter.

use std::fmt;
use std::str::FromStr;

use super::{LoadOutcome, Resource, ResourceList};
use crate::models::{format_price, Place};
use crate::ui::{Console, View};
use crate::ClientState;

/// Upper bound on the nightly price, or no bound at all
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PriceFilter {
    #[default]
    All,
    Max(f64),
}

impl PriceFilter {
    pub fn admits(&self, price: f64) -> bool {
        match self {
            PriceFilter::All => true,
            PriceFilter::Max(max) => price <= *max,
        }
    }
}

impl FromStr for PriceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(PriceFilter::All);
        }
        match s.parse::<f64>() {
            Ok(max) if max.is_finite() && max >= 0.0 => Ok(PriceFilter::Max(max)),
            _ => Err(format!("invalid price filter '{}': expected 'all' or a price", s)),
        }
    }
}

impl fmt::Display for PriceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceFilter::All => f.write_str("all"),
            PriceFilter::Max(max) => write!(f, "{}", format_price(*max)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCard {
    pub id: String,
    pub title: String,
    /// Price captured when the card was rendered; the filter compares against this
    pub price: f64,
    pub visible: bool,
}

/// Rendered place cards. Filtering only toggles visibility; it never refetches.
#[derive(Debug, Clone, Default)]
pub struct PlaceCards {
    cards: Vec<PlaceCard>,
}

impl PlaceCards {
    pub fn from_places(places: &[Place]) -> Self {
        let cards = places
            .iter()
            .map(|place| PlaceCard {
                id: place.id().to_string(),
                title: place.title.clone(),
                price: place.price,
                visible: true,
            })
            .collect();
        Self { cards }
    }

    pub fn filter_by_price(&mut self, filter: PriceFilter) {
        for card in &mut self.cards {
            card.visible = filter.admits(card.price);
        }
    }

    pub fn cards(&self) -> &[PlaceCard] {
        &self.cards
    }

    pub fn visible(&self) -> impl Iterator<Item = &PlaceCard> {
        self.cards.iter().filter(|c| c.visible)
    }

    pub fn render(&self) -> String {
        if self.cards.is_empty() {
            return format!("No {} found", Place::PLURAL);
        }

        let blocks: Vec<String> = self
            .visible()
            .map(|card| {
                format!(
                    "{}\n  Price per night: {}\n  Details: {}",
                    card.title,
                    format_price(card.price),
                    View::PlaceDetail(card.id.clone()).command()
                )
            })
            .collect();

        if blocks.is_empty() {
            "No places match the selected price".to_string()
        } else {
            blocks.join("\n\n")
        }
    }
}

/// Index page: fetch places (token optional), render cards, apply the filter
pub async fn browse_places(state: &ClientState, filter: PriceFilter) -> (LoadOutcome, PlaceCards) {
    let list = ResourceList::<Place>::new(state, Console::Public);
    let token = state.session.token();

    match list.fetch(token.as_deref()).await {
        Ok(places) => {
            let mut cards = PlaceCards::from_places(&places);
            cards.filter_by_price(filter);
            state.ui.show(&cards.render());
            let outcome = if places.is_empty() {
                LoadOutcome::Empty
            } else {
                LoadOutcome::Rendered(cards.visible().count())
            };
            (outcome, cards)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching places");
            state.ui.show(&format!("Failed to load places: {}", e));
            (LoadOutcome::Failed, PlaceCards::default())
        }
    }
}
