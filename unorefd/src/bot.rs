use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};
use unoref::{
    board::Board,
    bus::{MessageBus, Pattern},
    card::Card,
    error::Result,
    message::{Body, Message, TakeStatus},
    player::PlayerId,
    turn::Action,
};

/// A simple in-process client: plays the first legal card, draws otherwise,
/// and sometimes forgets to call UNO.
pub struct Bot {
    id: PlayerId,
    bus: MessageBus,
    rng: StdRng,
    forget_uno_chance: f64,
    hand: Vec<Card>,
    board: Option<Board>,
    /// Who took the turn most recently, and whether they called UNO.
    turn_holder: Option<PlayerId>,
    holder_called_uno: bool,
    waiting_for_uno: bool,
}

impl Bot {
    pub fn new(id: PlayerId, bus: MessageBus, forget_uno_chance: f64, rng: &mut impl Rng) -> Self {
        Self {
            id,
            bus,
            rng: StdRng::seed_from_u64(rng.gen()),
            forget_uno_chance,
            hand: Vec::new(),
            board: None,
            turn_holder: None,
            holder_called_uno: false,
            waiting_for_uno: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        self.send(Body::Ready)?;
        let pattern = Pattern::addressed_to(self.id.clone());

        loop {
            let message = self.bus.get(&pattern).await?;
            match message.body {
                Body::Take(TakeStatus::Alive) => self.send(Body::Taken)?,
                Body::Take(TakeStatus::Winner(winner)) => {
                    info!(bot = %self.id, %winner, "game finished");
                    return Ok(());
                }
                Body::Takes(player) => self.on_turn_taken(player)?,
                Body::Board(board) => self.board = Some(board),
                Body::Cards(cards) => self.hand = cards,
                // The hand shown by the last `cards` was stale; try again.
                Body::Invalid => self.act()?,
                Body::Success => self.after_action()?,
                Body::UnoCalled(player) => {
                    if self.turn_holder.as_ref() == Some(&player) {
                        self.holder_called_uno = true;
                    }
                    if player == self.id && self.waiting_for_uno {
                        self.waiting_for_uno = false;
                        self.send(Body::Ended)?;
                    }
                }
                _ => {}
            }
        }
    }

    fn send(&self, body: Body) -> Result<()> {
        self.bus.put(Message::new(self.id.clone(), body))
    }

    fn on_turn_taken(&mut self, player: PlayerId) -> Result<()> {
        if let Some(previous) = self.turn_holder.take() {
            let on_last_card = self
                .board
                .as_ref()
                .and_then(|board| board.hand_size(&previous))
                == Some(1);
            if previous != self.id && on_last_card && !self.holder_called_uno {
                debug!(bot = %self.id, %previous, "accusing missing UNO");
                self.send(Body::MissingUno)?;
            }
        }

        let mine = player == self.id;
        self.turn_holder = Some(player);
        self.holder_called_uno = false;

        if mine {
            self.act()?;
        }
        Ok(())
    }

    fn act(&mut self) -> Result<()> {
        let top = self.board.as_ref().and_then(|board| board.top_card);
        let playable = self
            .hand
            .iter()
            .find(|card| top.map_or(true, |top| card.can_follow(&top)))
            .copied();

        let action = match playable {
            Some(card) => Action::Play { card },
            None => Action::Draw,
        };
        self.send(Body::Action(action))
    }

    fn after_action(&mut self) -> Result<()> {
        match self.hand.len() {
            // Won; the referee announces it.
            0 => Ok(()),
            1 if !self.rng.gen_bool(self.forget_uno_chance) => {
                self.waiting_for_uno = true;
                self.send(Body::CallUno)
            }
            _ => self.send(Body::Ended),
        }
    }
}
