use core::fmt;
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::constants::{DRAW_PENALTY, WILD_DRAW_PENALTY};
use crate::error::UnoError;

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum CardColor {
    Red,
    Yellow,
    Blue,
    Green,
    Black,
}

impl CardColor {
    /// Black cards are wild: they follow anything and anything follows them.
    pub fn is_wild(self) -> bool {
        self == CardColor::Black
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CardValue {
    Number(u8),
    Skip,
    Reverse,
    Draw,
    Color,
}

impl Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Number(number) => write!(f, "{number}"),
            CardValue::Skip => write!(f, "Skip"),
            CardValue::Reverse => write!(f, "Reverse"),
            CardValue::Draw => write!(f, "Draw"),
            CardValue::Color => write!(f, "Color"),
        }
    }
}

impl FromStr for CardValue {
    type Err = UnoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Skip" => Ok(CardValue::Skip),
            "Reverse" => Ok(CardValue::Reverse),
            "Draw" => Ok(CardValue::Draw),
            "Color" => Ok(CardValue::Color),
            _ => match s.parse::<u8>() {
                Ok(number) if number <= 9 && s.len() == 1 => Ok(CardValue::Number(number)),
                _ => Err(UnoError::InvalidCardValue(s.to_string())),
            },
        }
    }
}

impl From<CardValue> for String {
    fn from(value: CardValue) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CardValue {
    type Error = UnoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: CardColor,
    pub value: CardValue,
}

impl Card {
    pub const fn new(color: CardColor, value: CardValue) -> Self {
        Self { color, value }
    }

    /// Whether this card may be played on top of `top`.
    pub fn can_follow(&self, top: &Card) -> bool {
        top.color.is_wild()
            || self.color.is_wild()
            || self.color == top.color
            || self.value == top.value
    }

    /// Cards the next player has to draw when this card is played.
    pub fn penalty(&self) -> Option<u8> {
        match self.value {
            CardValue::Draw if self.color.is_wild() => Some(WILD_DRAW_PENALTY),
            CardValue::Draw => Some(DRAW_PENALTY),
            _ => None,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.value)
    }
}
