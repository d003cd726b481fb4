//! Background loops that handle UNO calls and missing-UNO accusations
//! while the referee runs the turns.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::bus::{MessageBus, Pattern};
use crate::error::Result;
use crate::lock::GameLock;
use crate::message::{Body, Command, Message};
use crate::referee::publish_board;

/// Waits for the next message matching `pattern`, or `None` once the game
/// is over.
async fn next_message(
    bus: &MessageBus,
    pattern: &Pattern,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<Option<Message>> {
    let game_over = *shutdown.borrow();
    if game_over {
        return Ok(None);
    }
    tokio::select! {
        message = bus.get(pattern) => message.map(Some),
        // A dropped sender means the referee is gone too.
        _ = shutdown.changed() => Ok(None),
    }
}

/// Accepts a UNO call from the player holding the turn once they have acted
/// and are down to one card. Every other call is dropped without a reply.
pub async fn uno_watcher(
    bus: MessageBus,
    game: Arc<GameLock>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let pattern = Pattern::command(Command::CallUno);

    while let Some(message) = next_message(&bus, &pattern, &mut shutdown).await? {
        let caller = message.player;

        let accepted = game
            .with(|table| -> Result<bool> {
                if table.state().game_over || !table.call_uno(&caller) {
                    return Ok(false);
                }
                bus.broadcast(table.roster(), Body::UnoCalled(caller.clone()))?;
                Ok(true)
            })
            .await?;

        if accepted {
            info!(%caller, "UNO called");
        } else {
            debug!(%caller, "ignoring UNO call");
        }
    }

    Ok(())
}

/// Penalizes the previous player with one card when they ended their turn
/// on a single card without calling UNO and nobody has acted since.
pub async fn missing_uno_watcher(
    bus: MessageBus,
    game: Arc<GameLock>,
    notice_pause: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let pattern = Pattern::command(Command::MissingUno);

    while let Some(message) = next_message(&bus, &pattern, &mut shutdown).await? {
        let accuser = message.player;

        let accused = game
            .with(|table| -> Result<_> {
                if table.state().game_over || !table.roster().contains(&accuser) {
                    return Ok(None);
                }
                let Some(accused) = table.accuse_missing_uno() else {
                    return Ok(None);
                };
                bus.broadcast(
                    table.roster(),
                    Body::MissingUnoApplied {
                        accused: accused.clone(),
                        accuser: accuser.clone(),
                    },
                )?;
                Ok(Some(accused))
            })
            .await?;

        let Some(accused) = accused else {
            debug!(%accuser, "ignoring missing UNO accusation");
            continue;
        };
        info!(%accused, %accuser, "missing UNO penalty applied");

        // Let clients show the notice before the board changes under it.
        tokio::time::sleep(notice_pause).await;
        game.with(|table| {
            if table.state().game_over {
                return Ok(());
            }
            publish_board(&bus, table)
        })
        .await?;
    }

    Ok(())
}
