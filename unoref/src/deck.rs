use rand::Rng;
use strum::IntoEnumIterator;

use crate::{
    card::{Card, CardColor, CardValue},
    constants::*,
};

/// Cards not yet drawn. Order carries no meaning; draws pick a random card.
#[derive(Debug, Default)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

        for color in CardColor::iter().filter(|color| !color.is_wild()) {
            // Number Cards
            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::new(color, CardValue::Number(*number)));
            }

            // Skip Cards
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::new(color, CardValue::Skip));
            }

            // Draw Cards
            for _ in 0..DRAW_CARDS_PER_COLOR {
                cards.push(Card::new(color, CardValue::Draw));
            }

            // Reverse Cards
            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::new(color, CardValue::Reverse));
            }
        }

        for _ in 0..WILD_COLOR_CARDS_IN_DECK {
            cards.push(Card::new(CardColor::Black, CardValue::Color));
        }

        for _ in 0..WILD_DRAW_CARDS_IN_DECK {
            cards.push(Card::new(CardColor::Black, CardValue::Draw));
        }

        Self(cards)
    }

    pub fn draw_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.0.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.0.len());
        Some(self.0.swap_remove(index))
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn correct_card_count_new_deck() {
        assert_eq!(Deck::new().cards_count(), TOTAL_CARDS_IN_DECK as usize);
    }

    #[test]
    fn new_deck_has_two_wild_color_and_two_wild_draw_cards() {
        let deck = Deck::new();
        let count = |card: Card| deck.0.iter().filter(|x| **x == card).count();

        assert_eq!(count(Card::new(CardColor::Black, CardValue::Color)), 2);
        assert_eq!(count(Card::new(CardColor::Black, CardValue::Draw)), 2);
        assert_eq!(count(Card::new(CardColor::Green, CardValue::Number(9))), 1);
        assert_eq!(count(Card::new(CardColor::Red, CardValue::Number(0))), 0);
    }

    #[test]
    fn draw_random_removes_cards_until_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = Deck::new();

        let mut drawn = Vec::new();
        while let Some(card) = deck.draw_random(&mut rng) {
            drawn.push(card);
        }

        assert!(deck.is_empty());
        assert_eq!(drawn.len(), TOTAL_CARDS_IN_DECK as usize);

        deck.extend(drawn);
        assert_eq!(deck.cards_count(), TOTAL_CARDS_IN_DECK as usize);
    }
}
