use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::bus::{MessageBus, Pattern};
use crate::card::Card;
use crate::config::GameConfig;
use crate::error::Result;
use crate::lock::GameLock;
use crate::message::{Body, Command, Message, TakeStatus};
use crate::player::{PlayerId, Roster};
use crate::table::Table;
use crate::turn::{Action, ActionOutcome};
use crate::watcher;

/// Sends the public board and each player's private hand to every seat.
pub(crate) fn publish_board(bus: &MessageBus, table: &Table) -> Result<()> {
    let board: Board = table.board();
    for player in table.roster().iter() {
        bus.put(Message::new(player.clone(), Body::Board(board.clone())))?;
        let cards = table.hand(player).map(<[Card]>::to_vec).unwrap_or_default();
        bus.put(Message::new(player.clone(), Body::Cards(cards)))?;
    }
    Ok(())
}

/// Drives one game over the bus: turn order, action checks and the end of
/// the game. The UNO watchers run beside it for the game's lifetime.
pub struct Referee {
    bus: MessageBus,
    game: Arc<GameLock>,
    roster: Roster,
    config: GameConfig,
    shutdown: watch::Sender<bool>,
}

impl Referee {
    pub fn new(bus: MessageBus, roster: Roster, config: GameConfig) -> Self {
        let table = Table::new(roster, config.rng());
        Self::with_table(bus, table, config)
    }

    /// Starts from an already dealt table.
    pub fn with_table(bus: MessageBus, table: Table, config: GameConfig) -> Self {
        let roster = table.roster().clone();
        let (shutdown, _) = watch::channel(false);
        Self {
            bus,
            game: Arc::new(GameLock::new(table)),
            roster,
            config,
            shutdown,
        }
    }

    pub fn game(&self) -> Arc<GameLock> {
        self.game.clone()
    }

    /// Flips to `true` once the game is over.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Plays the game to the end and returns the winner.
    ///
    /// A failure of the bus ends the game as well; the watchers are stopped
    /// and joined either way.
    #[instrument(skip(self))]
    pub async fn run(self) -> Result<PlayerId> {
        self.open().await?;

        let uno = tokio::spawn(watcher::uno_watcher(
            self.bus.clone(),
            self.game.clone(),
            self.shutdown.subscribe(),
        ));
        let missing_uno = tokio::spawn(watcher::missing_uno_watcher(
            self.bus.clone(),
            self.game.clone(),
            self.config.notice_pause,
            self.shutdown.subscribe(),
        ));

        let first = self.game.with(|table| table.current_player().clone()).await;
        let outcome = match self.bus.put(Message::new(first, Body::Take(TakeStatus::Alive))) {
            Ok(()) => self.play().await,
            Err(err) => Err(err),
        };

        self.game.with(Table::finish).await;
        self.shutdown.send_replace(true);
        let (uno, missing_uno) = tokio::join!(uno, missing_uno);

        match &outcome {
            Ok(winner) => info!(%winner, "game over"),
            Err(err) => warn!(%err, "game aborted"),
        }

        let winner = outcome?;
        uno??;
        missing_uno??;
        Ok(winner)
    }

    async fn open(&self) -> Result<()> {
        self.game
            .with(|table| publish_board(&self.bus, table))
            .await?;
        self.bus
            .broadcast(&self.roster, Body::Players(self.roster.ids().to_vec()))?;

        let mut ready = HashSet::with_capacity(self.roster.len());
        while ready.len() < self.roster.len() {
            let message = self.bus.get(&Pattern::command(Command::Ready)).await?;
            if !self.roster.contains(&message.player) {
                debug!(player = %message.player, "ignoring ready from unseated player");
                continue;
            }
            ready.insert(message.player);
        }

        info!("all players ready");
        self.bus.broadcast(&self.roster, Body::AllReady)
    }

    // TODO: a silent client stalls every await below; give each turn phase
    // a deadline and forfeit or auto-draw for the player when it expires.
    async fn play(&self) -> Result<PlayerId> {
        loop {
            self.await_taken().await?;
            self.await_action().await?;

            if let Some(winner) = self.finish_if_won().await? {
                return Ok(winner);
            }

            self.await_ended().await?;
        }
    }

    /// Next `taken`, `action` or `ended` from any seat. Every phase reads all
    /// three so a message that does not fit the phase is dropped or answered
    /// right away instead of lingering into a later turn.
    async fn next_turn_message(&self) -> Result<Message> {
        let taken = Pattern::command(Command::Taken);
        let action = Pattern::command(Command::Action);
        let ended = Pattern::command(Command::Ended);

        tokio::select! {
            biased;
            message = self.bus.get(&taken) => message,
            message = self.bus.get(&action) => message,
            message = self.bus.get(&ended) => message,
        }
    }

    async fn await_taken(&self) -> Result<PlayerId> {
        loop {
            let message = self.next_turn_message().await?;
            let player = message.player;

            match message.body {
                Body::Taken => {}
                Body::Action(_) => {
                    debug!(%player, "action before the turn was taken");
                    self.bus.put(Message::new(player, Body::Invalid))?;
                    continue;
                }
                _ => {
                    debug!(%player, "ignoring end of turn before the turn was taken");
                    continue;
                }
            }

            let accepted = self
                .game
                .with(|table| -> Result<bool> {
                    if !table.is_current_player(&player) {
                        return Ok(false);
                    }

                    self.bus
                        .broadcast(table.roster(), Body::Takes(player.clone()))?;

                    let drawn = table.apply_pending_penalty(&player);
                    if drawn > 0 {
                        info!(%player, drawn, "penalty applied");
                        publish_board(&self.bus, table)?;
                    }
                    Ok(true)
                })
                .await?;

            if accepted {
                info!(%player, "turn taken");
                return Ok(player);
            }
            debug!(%player, "ignoring turn claim out of order");
        }
    }

    async fn await_action(&self) -> Result<()> {
        loop {
            let message = self.next_turn_message().await?;
            let player = message.player;

            match message.body {
                Body::Action(action) => {
                    if self.try_action(player, action).await? {
                        return Ok(());
                    }
                }
                Body::Taken => debug!(%player, "ignoring turn claim out of order"),
                _ => debug!(%player, "ignoring end of turn before an action"),
            }
        }
    }

    /// Replies `success` or `invalid`. Returns whether the action was accepted.
    async fn try_action(&self, player: PlayerId, action: Action) -> Result<bool> {
        self.game
            .with(|table| -> Result<bool> {
                match table.take_action(&player, &action) {
                    Ok(outcome) => {
                        info!(%player, ?outcome, "action accepted");
                        if let ActionOutcome::Drew(Some(card)) = outcome {
                            self.bus.put(Message::new(player.clone(), Body::Card(card)))?;
                        }
                        // A winning play is announced by the end-of-game check instead.
                        if table.winner().is_none() {
                            publish_board(&self.bus, table)?;
                        }
                        self.bus.put(Message::new(player.clone(), Body::Success))?;
                        Ok(true)
                    }
                    Err(rejection) => {
                        debug!(%player, %rejection, "action rejected");
                        self.bus.put(Message::new(player.clone(), Body::Invalid))?;
                        Ok(false)
                    }
                }
            })
            .await
    }

    async fn finish_if_won(&self) -> Result<Option<PlayerId>> {
        self.game
            .with(|table| -> Result<Option<PlayerId>> {
                let Some(winner) = table.winner().cloned() else {
                    return Ok(None);
                };
                table.finish();
                self.bus
                    .broadcast(table.roster(), Body::Take(TakeStatus::Winner(winner.clone())))?;
                Ok(Some(winner))
            })
            .await
    }

    async fn await_ended(&self) -> Result<()> {
        loop {
            let message = self.next_turn_message().await?;
            let player = message.player;

            match message.body {
                Body::Ended => {}
                // Always rejected: the action of this turn is spent.
                Body::Action(action) => {
                    self.try_action(player, action).await?;
                    continue;
                }
                _ => {
                    debug!(%player, "ignoring turn claim out of order");
                    continue;
                }
            }

            let next = self
                .game
                .with(|table| {
                    table
                        .end_turn(&player)
                        .then(|| table.current_player().clone())
                })
                .await;

            match next {
                Some(next) => {
                    info!(%player, %next, "turn ended");
                    return self.bus.put(Message::new(next, Body::Take(TakeStatus::Alive)));
                }
                None => debug!(%player, "ignoring end of turn out of order"),
            }
        }
    }
}
