use strum::EnumCount;

use crate::card::CardColor;

pub(crate) const NUMBER_CARDS_PER_COLOR: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9];
pub(crate) const SKIP_CARDS_PER_COLOR: u8 = 1;
pub(crate) const REVERSE_CARDS_PER_COLOR: u8 = 1;
pub(crate) const DRAW_CARDS_PER_COLOR: u8 = 1;

/// Every color except Black.
pub(crate) const SUITED_COLORS: u8 = CardColor::COUNT as u8 - 1;

pub(crate) const NUMBER_CARDS_IN_DECK: u8 = NUMBER_CARDS_PER_COLOR.len() as u8 * SUITED_COLORS;
pub(crate) const SKIP_CARDS_IN_DECK: u8 = SKIP_CARDS_PER_COLOR * SUITED_COLORS;
pub(crate) const REVERSE_CARDS_IN_DECK: u8 = REVERSE_CARDS_PER_COLOR * SUITED_COLORS;
pub(crate) const DRAW_CARDS_IN_DECK: u8 = DRAW_CARDS_PER_COLOR * SUITED_COLORS;

pub(crate) const WILD_COLOR_CARDS_IN_DECK: u8 = 2;
pub(crate) const WILD_DRAW_CARDS_IN_DECK: u8 = 2;

pub const TOTAL_CARDS_IN_DECK: u8 = NUMBER_CARDS_IN_DECK
    + SKIP_CARDS_IN_DECK
    + REVERSE_CARDS_IN_DECK
    + DRAW_CARDS_IN_DECK
    + WILD_COLOR_CARDS_IN_DECK
    + WILD_DRAW_CARDS_IN_DECK;

pub const HAND_SIZE: usize = 7;

pub const DRAW_PENALTY: u8 = 2;
pub const WILD_DRAW_PENALTY: u8 = 4;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = (TOTAL_CARDS_IN_DECK as usize - 1) / HAND_SIZE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_card_count_constants() {
        assert_eq!(SUITED_COLORS, 4);
        assert_eq!(NUMBER_CARDS_IN_DECK, 36);

        assert_eq!(SKIP_CARDS_IN_DECK, 4);

        assert_eq!(REVERSE_CARDS_IN_DECK, 4);

        assert_eq!(DRAW_CARDS_IN_DECK, 4);

        assert_eq!(TOTAL_CARDS_IN_DECK, 52);
    }

    #[test]
    fn a_full_table_can_always_be_dealt() {
        assert_eq!(MAX_PLAYERS, 7);
        assert!(MAX_PLAYERS * HAND_SIZE < TOTAL_CARDS_IN_DECK as usize);
    }
}
