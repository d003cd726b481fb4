//! Debug side-channel: answers `board` and `hands` requests on a bus of its
//! own so introspection never mixes with game traffic.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::bus::{MessageBus, Pattern};
use crate::error::Result;
use crate::lock::GameLock;
use crate::message::{Body, Flow, Message};

pub async fn serve(
    bus: MessageBus,
    game: Arc<GameLock>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let pattern = Pattern::any().flow(Flow::ToServer);

    loop {
        let game_over = *shutdown.borrow();
        if game_over {
            return Ok(());
        }

        let request = tokio::select! {
            request = bus.get(&pattern) => request?,
            _ = shutdown.changed() => return Ok(()),
        };

        let reply = match request.body {
            Body::InspectBoard => game.with(|table| Body::Board(table.board())).await,
            Body::InspectHands => game.with(|table| Body::Hands(table.hand_table())).await,
            other => {
                debug!(player = %request.player, command = %other.command(), "unknown inspection request");
                continue;
            }
        };
        bus.put(Message::new(request.player, reply))?;
    }
}
