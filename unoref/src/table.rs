use std::collections::HashMap;

use rand::rngs::StdRng;
use tracing::debug;

use crate::board::{Board, HandTable};
use crate::card::{Card, CardValue};
use crate::constants::HAND_SIZE;
use crate::deck::Deck;
use crate::player::{PlayerId, Roster};
use crate::stack::DiscardStack;
use crate::state::GameState;
use crate::turn::{Action, ActionOutcome, ActionRejection};

/// Everything the referee and the watchers contend for: hands, deck,
/// discard pile and turn flags. Only reachable through [`crate::lock::GameLock`]
/// once a game is running.
#[derive(Debug)]
pub struct Table {
    roster: Roster,
    hands: HashMap<PlayerId, Vec<Card>>,
    deck: Deck,
    discard: DiscardStack,
    state: GameState,
    rng: StdRng,
}

impl Table {
    /// Starts a normal deal that can be overridden before play begins.
    pub fn builder(roster: Roster, rng: StdRng) -> TableBuilder {
        TableBuilder {
            roster,
            rng,
            top_card: None,
            hands: Vec::new(),
        }
    }

    /// Flips one card onto the discard pile and deals a hand to every seat.
    pub fn new(roster: Roster, rng: StdRng) -> Self {
        let hands = roster
            .iter()
            .map(|id| (id.clone(), Vec::with_capacity(HAND_SIZE)))
            .collect();

        let mut table = Self {
            roster,
            hands,
            deck: Deck::new(),
            discard: DiscardStack::default(),
            state: GameState::default(),
            rng,
        };

        if let Some(card) = table.deck.draw_random(&mut table.rng) {
            table.discard.push(card);
        }

        for index in 0..table.roster.len() {
            let player_id = table.roster[index].clone();
            table.give_cards(&player_id, HAND_SIZE);
        }

        table
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub(crate) fn discard_mut(&mut self) -> &mut DiscardStack {
        &mut self.discard
    }

    pub fn hand(&self, player_id: &str) -> Option<&[Card]> {
        self.hands.get(player_id).map(Vec::as_slice)
    }

    pub(crate) fn hand_mut(&mut self, player_id: &str) -> Option<&mut Vec<Card>> {
        self.hands.get_mut(player_id)
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard.top()
    }

    pub fn current_player(&self) -> &PlayerId {
        &self.roster[self.state.current_player_index]
    }

    pub fn previous_player(&self) -> &PlayerId {
        &self.roster[self.state.previous_player_index]
    }

    pub fn is_current_player(&self, player_id: &str) -> bool {
        self.current_player() == player_id
    }

    pub fn is_legal(&self, card: &Card) -> bool {
        self.top_card().map_or(true, |top| card.can_follow(top))
    }

    pub fn legal_move_exists(&self, player_id: &str) -> bool {
        self.hand(player_id)
            .map_or(false, |hand| hand.iter().any(|card| self.is_legal(card)))
    }

    /// Takes a random card from the deck, recycling the discard pile below
    /// its top card first if the deck ran out.
    pub fn draw_random_card(&mut self) -> Option<Card> {
        if self.deck.is_empty() {
            let recycled = self.discard.drain_below_top();
            debug!(count = recycled.len(), "deck exhausted, recycling discard pile");
            self.deck.extend(recycled);
        }
        self.deck.draw_random(&mut self.rng)
    }

    /// Returns how many cards were actually handed out.
    pub fn give_cards(&mut self, player_id: &str, count: usize) -> usize {
        if !self.hands.contains_key(player_id) {
            return 0;
        }

        let mut given = 0;
        for _ in 0..count {
            let Some(card) = self.draw_random_card() else {
                break;
            };
            if let Some(hand) = self.hands.get_mut(player_id) {
                hand.push(card);
                given += 1;
            }
        }
        given
    }

    /// Validates and applies the one action a player gets per turn.
    pub fn take_action(
        &mut self,
        player_id: &str,
        action: &Action,
    ) -> Result<ActionOutcome, ActionRejection> {
        if self.state.turn_action_taken {
            return Err(ActionRejection::AlreadyActed);
        }
        if !self.is_current_player(player_id) {
            return Err(ActionRejection::NotYourTurn);
        }

        // The previous player can no longer be caught once this turn is underway.
        self.state.missing_uno_window_open = false;

        let outcome = match action {
            Action::Play { card } => self.play_card(player_id, *card)?,
            Action::Draw => self.draw_instead_of_playing(player_id)?,
        };

        self.state.turn_action_taken = true;
        Ok(outcome)
    }

    fn play_card(&mut self, player_id: &str, card: Card) -> Result<ActionOutcome, ActionRejection> {
        let index = self
            .hand(player_id)
            .and_then(|hand| hand.iter().position(|x| *x == card))
            .ok_or(ActionRejection::CardNotInHand)?;

        if !self.is_legal(&card) {
            return Err(ActionRejection::IllegalMove);
        }

        if let Some(hand) = self.hands.get_mut(player_id) {
            hand.remove(index);
        }
        self.discard.push(card);

        match card.value {
            CardValue::Reverse => self.state.direction.flip(),
            CardValue::Skip => self.state.skip_next = true,
            _ => {}
        }
        if let Some(penalty) = card.penalty() {
            self.state.pending_penalty = penalty;
        }

        Ok(ActionOutcome::Played(card))
    }

    fn draw_instead_of_playing(&mut self, player_id: &str) -> Result<ActionOutcome, ActionRejection> {
        if self.legal_move_exists(player_id) {
            return Err(ActionRejection::LegalMoveAvailable);
        }

        let card = self.draw_random_card();
        if let (Some(card), Some(hand)) = (card, self.hands.get_mut(player_id)) {
            hand.push(card);
        }

        Ok(ActionOutcome::Drew(card))
    }

    /// Deals the owed penalty to `player_id` and clears it.
    pub fn apply_pending_penalty(&mut self, player_id: &str) -> usize {
        let owed = std::mem::take(&mut self.state.pending_penalty);
        if owed == 0 {
            return 0;
        }
        self.give_cards(player_id, owed.into())
    }

    /// Passes the turn on. Returns `false`, changing nothing, when
    /// `player_id` does not hold the turn.
    pub fn end_turn(&mut self, player_id: &str) -> bool {
        if !self.is_current_player(player_id) {
            return false;
        }

        let on_last_card = self.hand(player_id).map_or(false, |hand| hand.len() == 1);
        if on_last_card && !self.state.uno_called {
            self.state.missing_uno_window_open = true;
        }
        self.state.uno_called = false;

        self.state.advance(self.roster.len());
        true
    }

    pub fn call_uno(&mut self, player_id: &str) -> bool {
        let accepted = self.is_current_player(player_id)
            && self.state.turn_action_taken
            && !self.state.uno_called
            && self.hand(player_id).map_or(false, |hand| hand.len() == 1);

        if accepted {
            self.state.uno_called = true;
        }
        accepted
    }

    /// Gives the previous player one card if they can still be caught.
    /// Returns the penalized player.
    pub fn accuse_missing_uno(&mut self) -> Option<PlayerId> {
        if !self.state.missing_uno_window_open {
            return None;
        }

        let accused = self.previous_player().clone();
        self.give_cards(&accused, 1);
        self.state.missing_uno_window_open = false;
        Some(accused)
    }

    /// First seat, in roster order, with an empty hand.
    pub fn winner(&self) -> Option<&PlayerId> {
        self.roster
            .iter()
            .find(|id| self.hand(id).map_or(false, <[Card]>::is_empty))
    }

    pub fn board(&self) -> Board {
        Board {
            top_card: self.top_card().copied(),
            hand_sizes: self
                .roster
                .iter()
                .map(|id| (id.clone(), self.hand(id).map_or(0, <[Card]>::len)))
                .collect(),
        }
    }

    pub fn hand_table(&self) -> HandTable {
        HandTable(
            self.roster
                .iter()
                .map(|id| (id.clone(), self.hand(id).map(<[Card]>::to_vec).unwrap_or_default()))
                .collect(),
        )
    }

    /// Marks the game as over. The watchers stop accepting calls from here on.
    pub fn finish(&mut self) {
        self.state.game_over = true;
    }

    /// Deck, discard pile and all hands together.
    pub fn cards_in_play(&self) -> usize {
        self.deck.cards_count()
            + self.discard.cards_count()
            + self.hands.values().map(Vec::len).sum::<usize>()
    }
}

/// Sets up a position by hand on top of a normal deal: a chosen top card
/// and chosen hands. Meant for scenario tests, not for a running game.
#[derive(Debug)]
pub struct TableBuilder {
    roster: Roster,
    rng: StdRng,
    top_card: Option<Card>,
    hands: Vec<(PlayerId, Vec<Card>)>,
}

impl TableBuilder {
    pub fn top_card(mut self, card: Card) -> Self {
        self.top_card = Some(card);
        self
    }

    /// Replaces the dealt hand of `player_id`. Unseated ids are ignored.
    pub fn hand(mut self, player_id: impl Into<PlayerId>, cards: Vec<Card>) -> Self {
        self.hands.push((player_id.into(), cards));
        self
    }

    pub fn build(self) -> Table {
        let mut table = Table::new(self.roster, self.rng);
        if let Some(card) = self.top_card {
            table.discard_mut().push(card);
        }
        for (player_id, cards) in self.hands {
            if let Some(hand) = table.hand_mut(&player_id) {
                *hand = cards;
            }
        }
        table
    }
}
