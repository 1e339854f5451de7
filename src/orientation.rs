//! Card orientations and card numbers.
//!
//! A physical card can be turned four ways. Turning it end over end plays
//! the measure backwards; turning it upside down mirrors the pitches. A
//! card number is the three-digit card id followed by the orientation
//! digit, e.g. `"4001"`. Stored compositions refer to these numbers, so
//! the digit-to-transform table below must not change.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::codec::{invert_pitch, reverse_time};
use crate::error::{CardError, Result};
use crate::model::Measure;

/// Digits in a card id.
pub const CARD_ID_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    /// 1: as printed.
    Identity,
    /// 2: pitch-inverted.
    Inverted,
    /// 3: time-reversed.
    Reversed,
    /// 4: time-reversed and pitch-inverted.
    ReversedInverted,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Identity,
        Orientation::Inverted,
        Orientation::Reversed,
        Orientation::ReversedInverted,
    ];

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Orientation::Identity),
            2 => Ok(Orientation::Inverted),
            3 => Ok(Orientation::Reversed),
            4 => Ok(Orientation::ReversedInverted),
            _ => Err(CardError::InvalidOrientation(
                char::from_digit(code as u32, 10).unwrap_or('?'),
            )),
        }
    }

    pub fn from_char(c: char) -> Result<Self> {
        match c.to_digit(10) {
            Some(d) => Self::from_code(d as u8).map_err(|_| CardError::InvalidOrientation(c)),
            None => Err(CardError::InvalidOrientation(c)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Orientation::Identity => 1,
            Orientation::Inverted => 2,
            Orientation::Reversed => 3,
            Orientation::ReversedInverted => 4,
        }
    }

    pub fn is_time_reversed(self) -> bool {
        matches!(self, Orientation::Reversed | Orientation::ReversedInverted)
    }

    pub fn is_pitch_inverted(self) -> bool {
        matches!(self, Orientation::Inverted | Orientation::ReversedInverted)
    }

    fn from_flags(reversed: bool, inverted: bool) -> Self {
        match (reversed, inverted) {
            (false, false) => Orientation::Identity,
            (false, true) => Orientation::Inverted,
            (true, false) => Orientation::Reversed,
            (true, true) => Orientation::ReversedInverted,
        }
    }

    /// Build the measure this orientation shows for a base measure.
    pub fn apply(self, measure: &Measure) -> Measure {
        let pitched = if self.is_pitch_inverted() {
            invert_pitch(measure)
        } else {
            measure.clone()
        };
        if self.is_time_reversed() {
            reverse_time(&pitched)
        } else {
            pitched
        }
    }

    /// Orientation after turning the card over its top or bottom edge.
    pub fn flip_vertical(self) -> Self {
        Self::from_flags(self.is_time_reversed(), !self.is_pitch_inverted())
    }

    /// Orientation after turning the card over its left or right edge.
    pub fn flip_horizontal(self) -> Self {
        Self::from_flags(!self.is_time_reversed(), self.is_pitch_inverted())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A card id together with the way the card is turned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CardNumber {
    card: String,
    orientation: Orientation,
}

impl CardNumber {
    pub fn new(card: &str, orientation: Orientation) -> Result<Self> {
        if !is_card_id(card) {
            return Err(CardError::InvalidCardNumber(card.to_string()));
        }
        Ok(Self {
            card: card.to_string(),
            orientation,
        })
    }

    pub fn card(&self) -> &str {
        &self.card
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn flip_vertical(&self) -> Self {
        Self {
            card: self.card.clone(),
            orientation: self.orientation.flip_vertical(),
        }
    }

    pub fn flip_horizontal(&self) -> Self {
        Self {
            card: self.card.clone(),
            orientation: self.orientation.flip_horizontal(),
        }
    }
}

impl FromStr for CardNumber {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CARD_ID_LENGTH + 1 {
            return Err(CardError::InvalidCardNumber(s.to_string()));
        }
        let card: String = chars[..CARD_ID_LENGTH].iter().collect();
        if !is_card_id(&card) {
            return Err(CardError::InvalidCardNumber(s.to_string()));
        }
        let orientation = Orientation::from_char(chars[CARD_ID_LENGTH])?;
        Ok(Self { card, orientation })
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card, self.orientation)
    }
}

/// Three ASCII digits.
pub(crate) fn is_card_id(id: &str) -> bool {
    id.len() == CARD_ID_LENGTH && id.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use pretty_assertions::assert_eq;

    #[test]
    fn orientation_table_matches_card_numbers() {
        let flags: Vec<(u8, bool, bool)> = Orientation::ALL
            .iter()
            .map(|o| (o.code(), o.is_time_reversed(), o.is_pitch_inverted()))
            .collect();
        assert_eq!(
            flags,
            vec![(1, false, false), (2, false, true), (3, true, false), (4, true, true)]
        );
    }

    #[test]
    fn orientation_four_reverses_and_inverts() {
        let base = decode("2h6q5q").unwrap();
        let turned = Orientation::ReversedInverted.apply(&base);
        assert_eq!(encode(&turned), "3q2q6h");
    }

    #[test]
    fn invalid_orientation_codes() {
        assert_eq!(Orientation::from_code(0), Err(CardError::InvalidOrientation('0')));
        assert_eq!(Orientation::from_code(5), Err(CardError::InvalidOrientation('5')));
        assert_eq!(Orientation::from_char('x'), Err(CardError::InvalidOrientation('x')));
    }

    #[test]
    fn card_number_round_trips() {
        let number: CardNumber = "4001".parse().unwrap();
        assert_eq!(number.card(), "400");
        assert_eq!(number.orientation(), Orientation::Identity);
        assert_eq!(number.to_string(), "4001");
    }

    #[test]
    fn card_number_rejects_bad_input() {
        assert_eq!(
            "40a1".parse::<CardNumber>(),
            Err(CardError::InvalidCardNumber("40a1".into()))
        );
        assert_eq!(
            "400".parse::<CardNumber>(),
            Err(CardError::InvalidCardNumber("400".into()))
        );
        assert_eq!(
            "4009".parse::<CardNumber>(),
            Err(CardError::InvalidOrientation('9'))
        );
    }

    #[test]
    fn flips_toggle_one_transform() {
        let base = decode("5e1e5h3q").unwrap();
        for o in Orientation::ALL {
            assert_eq!(o.flip_vertical().apply(&base), invert_pitch(&o.apply(&base)));
            assert_eq!(o.flip_horizontal().apply(&base), reverse_time(&o.apply(&base)));
            assert_eq!(o.flip_vertical().flip_vertical(), o);
        }
    }
}
