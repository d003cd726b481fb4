use std::collections::HashSet;

use crate::constants::{MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{Result, UnoError};
use crate::message::ALIVE;

pub type PlayerId = String;

/// Seating order of a game. Fixed once the game is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster(Vec<PlayerId>);

impl Roster {
    pub fn new(player_ids: Vec<PlayerId>) -> Result<Self> {
        if player_ids.len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if player_ids.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers);
        }

        let mut seen = HashSet::with_capacity(player_ids.len());
        for player_id in &player_ids {
            if player_id.is_empty() || player_id == ALIVE {
                return Err(UnoError::ReservedPlayerId(player_id.clone()));
            }
            if !seen.insert(player_id.as_str()) {
                return Err(UnoError::DuplicatePlayer(player_id.clone()));
            }
        }

        Ok(Self(player_ids))
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.position(player_id).is_some()
    }

    pub fn position(&self, player_id: &str) -> Option<usize> {
        self.0.iter().position(|x| x == player_id)
    }
}

impl std::ops::Index<usize> for Roster {
    type Output = PlayerId;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_player_ids(count: usize) -> Vec<PlayerId> {
        (0..count).map(|i| format!("Player {}", i + 1)).collect()
    }

    #[test]
    fn return_ok_if_enough_players() {
        let roster = Roster::new(create_player_ids(2)).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1], "Player 2");
    }

    #[test]
    fn return_err_if_not_enough_players() {
        let error = Roster::new(create_player_ids(1)).unwrap_err();
        assert!(matches!(error, UnoError::NotEnoughPlayers));
    }

    #[test]
    fn return_err_if_too_many_players() {
        let error = Roster::new(create_player_ids(8)).unwrap_err();
        assert!(matches!(error, UnoError::TooManyPlayers));
    }

    #[test]
    fn return_err_on_duplicate_or_reserved_ids() {
        let error = Roster::new(vec!["Mark".into(), "Talha".into(), "Mark".into()]).unwrap_err();
        assert!(matches!(error, UnoError::DuplicatePlayer(id) if id == "Mark"));

        let error = Roster::new(vec!["Mark".into(), "alive".into()]).unwrap_err();
        assert!(matches!(error, UnoError::ReservedPlayerId(_)));
    }
}
