use crate::card::Card;

/// Played cards, most recent last.
#[derive(Debug, Default)]
pub struct DiscardStack(Vec<Card>);

impl DiscardStack {
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn top(&self) -> Option<&Card> {
        self.0.last()
    }

    /// Removes every card except the top one, leaving it in place.
    pub fn drain_below_top(&mut self) -> Vec<Card> {
        let below = self.0.len().saturating_sub(1);
        self.0.drain(..below).collect()
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }
}
