use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::Card;

/// A move requested by the player holding the turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum Action {
    Play { card: Card },
    Draw,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Played(Card),
    /// `None` when neither the deck nor the discard pile had a card to give.
    Drew(Option<Card>),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionRejection {
    #[error("It is not this player's turn")]
    NotYourTurn,
    #[error("An action was already taken this turn")]
    AlreadyActed,
    #[error("The card is not in the player's hand")]
    CardNotInHand,
    #[error("The card does not match the top card")]
    IllegalMove,
    #[error("Drawing is only allowed without a playable card")]
    LegalMoveAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardColor, CardValue};

    #[test]
    fn actions_are_tagged_by_kind() {
        let play = Action::Play {
            card: Card::new(CardColor::Blue, CardValue::Reverse),
        };
        assert_eq!(
            serde_json::to_string(&play).unwrap(),
            r#"{"kind":"PLAY","card":{"color":"Blue","value":"Reverse"}}"#
        );

        let draw: Action = serde_json::from_str(r#"{"kind":"DRAW"}"#).unwrap();
        assert_eq!(draw, Action::Draw);
    }
}
