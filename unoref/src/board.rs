use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::player::PlayerId;

/// Public snapshot of the table, rebuilt every time it is sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub top_card: Option<Card>,
    /// In seating order.
    pub hand_sizes: Vec<(PlayerId, usize)>,
}

impl Board {
    pub fn hand_size(&self, player_id: &str) -> Option<usize> {
        self.hand_sizes
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|(_, size)| *size)
    }
}

/// Every hand on the table, for the inspection channel only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandTable(pub Vec<(PlayerId, Vec<Card>)>);
