//! The card catalog.
//!
//! The deck is static configuration: a list of card ids and the measure
//! each card carries when held in orientation 1. The built-in deck is the
//! 33-card set printed for the Compose Yourself game; other decks load from JSON:
//!
//! ```json
//! { "cards": [ { "id": "400", "measure": "2h6q5q" } ] }
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use crate::codec::decode;
use crate::error::{CardError, Result};
use crate::model::Measure;
use crate::orientation::{is_card_id, CardNumber};

/// Measures printed on the standard deck, in catalog order.
pub const STANDARD_MEASURES: [&str; 33] = [
    "1q2q3q4q",
    "2h6q5q",
    "5h4q4e1e",
    "6q2q3h",
    "4q1q6h",
    "2q1h4e6e",
    "4h4q5q",
    "5e1e5h3q",
    "5q4e6e6e3e4e3e",
    "5e3e5h5q",
    "4h2q1e5e",
    "1q4h2q",
    "2q1h6e2e",
    "1h3e4e1e2e",
    "1h1e3e4e1e",
    "3q1q1h",
    "6q4q2q3q",
    "4q3q3h",
    "4h5e4e3e4e",
    "3e2e1q4e3e5q",
    "5e5e2q6h",
    "4q3h1e1e",
    "2q5q1e4e1e6e",
    "5e6e5h5q",
    "2e6e3h5e3e",
    "6q6e4e2q1e4e",
    "3e4e3e2e1h",
    "1q6q1e5e2e4e",
    "4e1e4e5e6h",
    "5h2q1e2e",
    "3h1e2e6q",
    "3q5q1e1e5q",
    "2e1e2h2e6e",
];

/// Id of the first card in the standard deck; later cards count up.
const STANDARD_FIRST_ID: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub measure: Measure,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Deserialize)]
struct DeckFile {
    cards: Vec<CardEntry>,
}

#[derive(Deserialize)]
struct CardEntry {
    id: String,
    measure: String,
}

impl Deck {
    /// The 33-card reference deck, ids `"100"` to `"132"`.
    pub fn standard() -> Self {
        let cards = STANDARD_MEASURES
            .iter()
            .enumerate()
            .filter_map(|(i, code)| {
                // The catalog is a compile-time constant; every entry decodes.
                decode(code).ok().map(|measure| Card {
                    id: format!("{:03}", STANDARD_FIRST_ID + i),
                    measure,
                })
            })
            .collect();
        Self { cards }
    }

    /// Build a deck from `(id, measure code)` pairs.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut seen = HashSet::new();
        let mut cards = Vec::new();
        for (id, code) in entries {
            if !is_card_id(id) {
                return Err(CardError::InvalidDeck(format!("card id '{id}' is not three digits")));
            }
            if !seen.insert(id.to_string()) {
                return Err(CardError::InvalidDeck(format!("duplicate card id '{id}'")));
            }
            let measure = decode(code)
                .map_err(|e| CardError::InvalidDeck(format!("card '{id}': {e}")))?;
            cards.push(Card {
                id: id.to_string(),
                measure,
            });
        }
        log::debug!("loaded deck with {} cards", cards.len());
        Ok(Self { cards })
    }

    /// Load a deck from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DeckFile =
            serde_json::from_str(json).map_err(|e| CardError::InvalidDeck(e.to_string()))?;
        Self::from_entries(file.cards.iter().map(|c| (c.id.as_str(), c.measure.as_str())))
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The measure shown by a card held in the given orientation.
    pub fn measure_for(&self, number: &CardNumber) -> Result<Measure> {
        let card = self
            .get(number.card())
            .ok_or_else(|| CardError::UnknownCard(number.card().to_string()))?;
        Ok(number.orientation().apply(&card.measure))
    }
}
